//! Shopify REST response envelopes.
//!
//! Every REST resource is wrapped in an object keyed by the resource name
//! (`{"products": [...]}`, `{"variant": {...}}`). Catalog payloads
//! deserialize straight into the core types.

use catalog_bridge_core::{DraftOrderId, Product, ShopInfo, Variant};
use serde::{Deserialize, Serialize};

/// Response from `GET /products.json`.
#[derive(Debug, Deserialize)]
pub struct ProductsResponse {
    #[serde(default)]
    pub products: Vec<Product>,
}

/// Response from `GET /variants/<id>.json`.
#[derive(Debug, Deserialize)]
pub struct VariantResponse {
    pub variant: Variant,
}

/// Response from `GET /shop.json`.
#[derive(Debug, Deserialize)]
pub struct ShopResponse {
    pub shop: ShopInfo,
}

/// Response from `POST /draft_orders.json`.
#[derive(Debug, Deserialize)]
pub struct DraftOrderResponse {
    pub draft_order: DraftOrder,
}

/// A draft order created on the target store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DraftOrder {
    pub id: DraftOrderId,
    /// Human-facing name (e.g. `#D12`).
    #[serde(default)]
    pub name: Option<String>,
    /// Payable checkout link for the customer.
    #[serde(default)]
    pub invoice_url: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_products_response() {
        let json = r#"{"products": [{"id": 1, "title": "Tee", "variants": [{"id": 2, "sku": "TEE"}]}]}"#;
        let response: ProductsResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.products.len(), 1);
        assert_eq!(response.products[0].variants[0].title, "");
    }

    #[test]
    fn test_draft_order_response() {
        let json = r##"{"draft_order": {
            "id": 994118539,
            "name": "#D2",
            "status": "open",
            "invoice_url": "https://shop.example/123/invoices/abc",
            "line_items": []
        }}"##;
        let response: DraftOrderResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.draft_order.id, DraftOrderId::new(994_118_539));
        assert_eq!(response.draft_order.name.as_deref(), Some("#D2"));
        assert_eq!(
            response.draft_order.invoice_url.as_deref(),
            Some("https://shop.example/123/invoices/abc")
        );
    }

    #[test]
    fn test_variant_response_without_sku() {
        let json = r#"{"variant": {"id": 10, "product_id": 3, "title": "Default Title", "sku": ""}}"#;
        let response: VariantResponse = serde_json::from_str(json).unwrap();
        assert!(response.variant.sku().is_none());
    }
}
