//! Cart lines in source-store terms and line items in target-store terms.

use serde::{Deserialize, Serialize};

use super::id::VariantId;
use super::sku::Sku;

/// One cart line as submitted by the source storefront.
///
/// At least one of `variant_id` and `sku` must be present for the line to
/// be resolvable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    /// Variant ID in the source store.
    #[serde(default)]
    pub variant_id: Option<VariantId>,
    #[serde(default)]
    pub sku: Option<String>,
    pub quantity: u32,
}

impl CartLine {
    /// Line identified by SKU only.
    #[must_use]
    pub fn by_sku(sku: impl Into<String>, quantity: u32) -> Self {
        Self {
            variant_id: None,
            sku: Some(sku.into()),
            quantity,
        }
    }

    /// Line identified by source variant ID only.
    #[must_use]
    pub const fn by_variant(variant_id: VariantId, quantity: u32) -> Self {
        Self {
            variant_id: Some(variant_id),
            sku: None,
            quantity,
        }
    }

    /// The line's SKU, or `None` when absent or empty.
    #[must_use]
    pub fn sku(&self) -> Option<Sku> {
        Sku::from_optional(self.sku.as_deref())
    }
}

/// A line item valid on the target store.
///
/// Serializes in the shape Shopify's draft order endpoint expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    pub variant_id: VariantId,
    pub quantity: u32,
}
