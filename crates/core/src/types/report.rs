//! Catalog reconciliation report types.

use serde::{Deserialize, Serialize};

use super::catalog::VariantRef;
use super::sku::Sku;

/// A source variant linked to a target variant by SKU.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MappingEntry {
    pub sku: Sku,
    pub source: VariantRef,
    pub target: VariantRef,
}

/// A variant with a SKU that has no counterpart in the other store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnmappedItem {
    pub sku: Sku,
    #[serde(flatten)]
    pub item: VariantRef,
}

/// Result of a full two-way catalog join.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogReport {
    /// Mapping entries in source listing order.
    pub mapping: Vec<MappingEntry>,
    pub unmapped_source: Vec<UnmappedItem>,
    pub unmapped_target: Vec<UnmappedItem>,
}

/// Summary counts of a [`CatalogReport`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncStats {
    pub total_mapped: usize,
    pub unmapped_source: usize,
    pub unmapped_target: usize,
}

impl CatalogReport {
    #[must_use]
    pub fn stats(&self) -> SyncStats {
        SyncStats {
            total_mapped: self.mapping.len(),
            unmapped_source: self.unmapped_source.len(),
            unmapped_target: self.unmapped_target.len(),
        }
    }

    /// Look up the mapping entry for a SKU.
    #[must_use]
    pub fn mapping_for(&self, sku: &Sku) -> Option<&MappingEntry> {
        self.mapping.iter().find(|entry| &entry.sku == sku)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::types::id::{ProductId, VariantId};

    fn item(sku: &str) -> UnmappedItem {
        UnmappedItem {
            sku: Sku::parse(sku).unwrap(),
            item: VariantRef {
                product_id: ProductId::new(1),
                product_title: "Shirt".to_string(),
                variant_id: VariantId::new(2),
                variant_title: "Large".to_string(),
            },
        }
    }

    #[test]
    fn test_stats_counts() {
        let report = CatalogReport {
            mapping: vec![],
            unmapped_source: vec![item("A")],
            unmapped_target: vec![item("B"), item("C")],
        };

        assert_eq!(
            report.stats(),
            SyncStats {
                total_mapped: 0,
                unmapped_source: 1,
                unmapped_target: 2,
            }
        );
    }

    #[test]
    fn test_unmapped_item_serializes_flat() {
        let value = serde_json::to_value(item("A")).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "sku": "A",
                "productId": 1,
                "productTitle": "Shirt",
                "variantId": 2,
                "variantTitle": "Large",
            })
        );
    }

    #[test]
    fn test_stats_serializes_camel_case() {
        let value = serde_json::to_value(SyncStats::default()).unwrap();
        assert!(value.get("totalMapped").is_some());
        assert!(value.get("unmappedSource").is_some());
    }
}
