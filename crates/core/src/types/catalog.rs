//! Catalog model shared by both stores.
//!
//! These mirror the Shopify REST Admin API `products.json` and
//! `variants/<id>.json` shapes closely enough to deserialize them directly.
//! Fields this system does not use are ignored.

use serde::{Deserialize, Serialize};

use super::id::{ProductId, VariantId};
use super::sku::Sku;

/// A product as listed by a store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub variants: Vec<Variant>,
}

/// A purchasable option of a [`Product`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Variant {
    pub id: VariantId,
    /// Present on `variants/<id>.json`, usually present in listings too.
    #[serde(default)]
    pub product_id: Option<ProductId>,
    #[serde(default)]
    pub sku: Option<String>,
    #[serde(default)]
    pub title: String,
}

impl Variant {
    /// The variant's SKU, or `None` when it is absent or empty.
    #[must_use]
    pub fn sku(&self) -> Option<Sku> {
        Sku::from_optional(self.sku.as_deref())
    }

    /// Whether this variant carries exactly the given SKU.
    #[must_use]
    pub fn has_sku(&self, sku: &Sku) -> bool {
        self.sku.as_deref() == Some(sku.as_str())
    }
}

impl Product {
    /// First variant (in listing order) whose SKU equals `sku`.
    #[must_use]
    pub fn find_variant_by_sku(&self, sku: &Sku) -> Option<&Variant> {
        self.variants.iter().find(|variant| variant.has_sku(sku))
    }
}

/// A (product, variant) pair found in one store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedPair {
    pub product: Product,
    pub variant: Variant,
}

impl ResolvedPair {
    /// Scan products in listing order for the first variant with `sku`.
    #[must_use]
    pub fn find_by_sku(products: &[Product], sku: &Sku) -> Option<Self> {
        products.iter().find_map(|product| {
            product.find_variant_by_sku(sku).map(|variant| Self {
                product: product.clone(),
                variant: variant.clone(),
            })
        })
    }

    /// Flattened reference to this pair.
    #[must_use]
    pub fn to_ref(&self) -> VariantRef {
        VariantRef::new(&self.product, &self.variant)
    }
}

/// Flattened product/variant identity used in reports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VariantRef {
    pub product_id: ProductId,
    pub product_title: String,
    pub variant_id: VariantId,
    pub variant_title: String,
}

impl VariantRef {
    #[must_use]
    pub fn new(product: &Product, variant: &Variant) -> Self {
        Self {
            product_id: product.id,
            product_title: product.title.clone(),
            variant_id: variant.id,
            variant_title: variant.title.clone(),
        }
    }
}

/// Basic shop identity returned by `shop.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShopInfo {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub domain: String,
    #[serde(default)]
    pub myshopify_domain: Option<String>,
    #[serde(default)]
    pub currency: Option<String>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn variant(id: i64, sku: Option<&str>) -> Variant {
        Variant {
            id: VariantId::new(id),
            product_id: None,
            sku: sku.map(str::to_string),
            title: format!("Variant {id}"),
        }
    }

    #[test]
    fn test_variant_sku_empty_is_none() {
        assert!(variant(1, None).sku().is_none());
        assert!(variant(1, Some("")).sku().is_none());
        assert_eq!(variant(1, Some("A")).sku(), Sku::parse("A"));
    }

    #[test]
    fn test_find_by_sku_first_listed_wins() {
        let products = vec![
            Product {
                id: ProductId::new(1),
                title: "One".to_string(),
                variants: vec![variant(10, Some("B")), variant(11, Some("A"))],
            },
            Product {
                id: ProductId::new(2),
                title: "Two".to_string(),
                variants: vec![variant(20, Some("A"))],
            },
        ];

        let pair = ResolvedPair::find_by_sku(&products, &Sku::parse("A").unwrap()).unwrap();
        assert_eq!(pair.product.id, ProductId::new(1));
        assert_eq!(pair.variant.id, VariantId::new(11));
    }

    #[test]
    fn test_pair_to_ref() {
        let pair = ResolvedPair {
            product: Product {
                id: ProductId::new(7),
                title: "Tee".to_string(),
                variants: vec![],
            },
            variant: variant(70, Some("TEE-M")),
        };

        let item = pair.to_ref();
        assert_eq!(item.product_id, ProductId::new(7));
        assert_eq!(item.product_title, "Tee");
        assert_eq!(item.variant_id, VariantId::new(70));
        assert_eq!(item.variant_title, "Variant 70");
    }

    #[test]
    fn test_find_by_sku_exact_match_only() {
        let products = vec![Product {
            id: ProductId::new(1),
            title: "One".to_string(),
            variants: vec![variant(10, Some("a"))],
        }];

        assert!(ResolvedPair::find_by_sku(&products, &Sku::parse("A").unwrap()).is_none());
    }

    #[test]
    fn test_deserialize_rest_product() {
        let json = r#"{
            "id": 632910392,
            "title": "IPod Nano - 8GB",
            "handle": "ipod-nano",
            "variants": [
                {"id": 808950810, "product_id": 632910392, "title": "Pink", "sku": "IPOD2008PINK", "price": "199.00"},
                {"id": 808950811, "product_id": 632910392, "title": "Red", "sku": null}
            ]
        }"#;

        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.variants.len(), 2);
        assert_eq!(product.variants[0].sku(), Sku::parse("IPOD2008PINK"));
        assert!(product.variants[1].sku().is_none());
    }
}
