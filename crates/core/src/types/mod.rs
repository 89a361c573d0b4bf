//! Core types for Catalog Bridge.
//!
//! This module provides type-safe wrappers for the catalog domain.

pub mod cart;
pub mod catalog;
pub mod id;
pub mod report;
pub mod sku;

pub use cart::{CartLine, LineItem};
pub use catalog::{Product, ResolvedPair, ShopInfo, Variant, VariantRef};
pub use id::{DraftOrderId, IdParseError, ProductId, VariantId};
pub use report::{CatalogReport, MappingEntry, SyncStats, UnmappedItem};
pub use sku::Sku;
