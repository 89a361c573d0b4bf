//! Translation of source-store carts into target-store draft orders.
//!
//! Each cart line is resolved independently and in input order: by SKU
//! first when one is present, then by source variant ID. A line that cannot
//! be resolved, including one whose lookup hit an API error, becomes a
//! warning and never stops the remaining lines. One draft order is created
//! with exactly the resolved lines, and only if at least one resolved.

use catalog_bridge_core::{CartLine, DraftOrderId, LineItem, ResolvedPair, Sku, VariantId};
use serde::Serialize;
use thiserror::Error;
use tracing::{info, instrument, warn};

use crate::resolver::{ResolveError, Resolver};
use crate::shopify::{CatalogApi, RemoteApiError, StoreRole};

/// Checkout-level failures.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// The cart has no lines.
    #[error("Cart is empty")]
    EmptyCart,

    /// No line could be mapped to the target store.
    #[error("No items could be mapped to the target store")]
    NoItemsMapped {
        /// One warning per cart line, in line order.
        warnings: Vec<String>,
    },

    /// The draft order could not be created.
    #[error("Failed to create draft order: {0}")]
    Remote(#[from] RemoteApiError),
}

/// Why a cart line could not be resolved.
#[derive(Debug, Error)]
pub enum FailureReason {
    #[error("quantity must be at least 1")]
    InvalidQuantity,

    #[error("no SKU or variant ID provided")]
    MissingIdentifiers,

    #[error("no matching variant in target store")]
    NotFound,

    #[error("source variant {0} not found")]
    SourceVariantNotFound(VariantId),

    #[error("source variant {0} has no SKU")]
    MissingSourceSku(VariantId),

    #[error("lookup failed: {0}")]
    Remote(RemoteApiError),
}

/// A cart line that could not be resolved.
#[derive(Debug)]
pub struct LineFailure {
    /// Zero-based index of the line in the cart.
    pub line_index: usize,
    pub sku: Option<String>,
    pub reason: FailureReason,
}

impl std::fmt::Display for LineFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Line {} (SKU: {}): {}",
            self.line_index + 1,
            self.sku.as_deref().unwrap_or("N/A"),
            self.reason
        )
    }
}

/// Outcome of resolving one cart line.
#[derive(Debug)]
pub enum LineOutcome {
    Resolved(LineItem),
    Failed(LineFailure),
}

/// Resolved line items plus warnings for the lines that were dropped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Translation {
    pub line_items: Vec<LineItem>,
    /// One entry per unresolved line, ordered by line index.
    pub warnings: Vec<String>,
}

/// Result of a successful checkout creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutOutcome {
    pub checkout_url: Option<String>,
    pub draft_order_id: DraftOrderId,
    pub items_processed: usize,
    /// `None` when every line resolved.
    pub warnings: Option<Vec<String>>,
}

/// Converts carts into target-store line items and draft orders.
pub struct CheckoutTranslator<'a, C> {
    resolver: Resolver<'a, C>,
}

impl<'a, C: CatalogApi> CheckoutTranslator<'a, C> {
    #[must_use]
    pub const fn new(resolver: Resolver<'a, C>) -> Self {
        Self { resolver }
    }

    /// Resolve every cart line, collecting per-line warnings.
    ///
    /// Lines are processed sequentially so warnings stay in line order.
    ///
    /// # Errors
    ///
    /// Returns `EmptyCart` for an empty cart, or `NoItemsMapped` when no
    /// line resolves. Never returns `Remote`.
    #[instrument(skip_all, fields(lines = lines.len()))]
    pub async fn translate(&self, lines: &[CartLine]) -> Result<Translation, CheckoutError> {
        if lines.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }

        let mut line_items = Vec::with_capacity(lines.len());
        let mut warnings = Vec::new();

        for (line_index, line) in lines.iter().enumerate() {
            match self.resolve_line(line_index, line).await {
                LineOutcome::Resolved(item) => line_items.push(item),
                LineOutcome::Failed(failure) => {
                    warn!(
                        line = failure.line_index + 1,
                        sku = failure.sku.as_deref().unwrap_or("N/A"),
                        reason = %failure.reason,
                        "Cart line not mapped"
                    );
                    warnings.push(failure.to_string());
                }
            }
        }

        if line_items.is_empty() {
            return Err(CheckoutError::NoItemsMapped { warnings });
        }

        Ok(Translation {
            line_items,
            warnings,
        })
    }

    /// Translate the cart and create one draft order on the target store.
    ///
    /// # Errors
    ///
    /// Returns the `translate` errors (no order is created for them), or
    /// `Remote` if the draft order call fails.
    #[instrument(skip_all, fields(lines = lines.len()))]
    pub async fn create_checkout(&self, lines: &[CartLine]) -> Result<CheckoutOutcome, CheckoutError> {
        let Translation {
            line_items,
            warnings,
        } = self.translate(lines).await?;

        let order = self
            .resolver
            .stores()
            .target
            .create_draft_order(&line_items)
            .await?;

        info!(
            draft_order_id = %order.id,
            items_processed = line_items.len(),
            skipped = warnings.len(),
            "Checkout created on target store"
        );

        Ok(CheckoutOutcome {
            checkout_url: order.invoice_url,
            draft_order_id: order.id,
            items_processed: line_items.len(),
            warnings: (!warnings.is_empty()).then_some(warnings),
        })
    }

    /// Resolve a single line: SKU first, then source variant ID.
    async fn resolve_line(&self, line_index: usize, line: &CartLine) -> LineOutcome {
        let failed = |reason| {
            LineOutcome::Failed(LineFailure {
                line_index,
                sku: line.sku().map(Sku::into_inner),
                reason,
            })
        };

        if line.quantity == 0 {
            return failed(FailureReason::InvalidQuantity);
        }

        let resolved = |pair: ResolvedPair| {
            LineOutcome::Resolved(LineItem {
                variant_id: pair.variant.id,
                quantity: line.quantity,
            })
        };

        let mut reason = FailureReason::MissingIdentifiers;

        if let Some(sku) = line.sku() {
            match self.resolver.resolve_by_sku(StoreRole::Target, &sku).await {
                Ok(Some(pair)) => return resolved(pair),
                Ok(None) => reason = FailureReason::NotFound,
                Err(e) => return failed(FailureReason::Remote(e)),
            }
        }

        if let Some(variant_id) = line.variant_id {
            reason = match self.resolver.resolve_by_source_variant(variant_id).await {
                Ok(Some(pair)) => return resolved(pair),
                Ok(None) => FailureReason::NotFound,
                Err(ResolveError::MissingSku { variant_id }) => {
                    FailureReason::MissingSourceSku(variant_id)
                }
                Err(ResolveError::Remote(e)) if e.is_not_found() => {
                    FailureReason::SourceVariantNotFound(variant_id)
                }
                Err(ResolveError::Remote(e)) => FailureReason::Remote(e),
            };
        }

        failed(reason)
    }
}
