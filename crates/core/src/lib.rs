//! Catalog Bridge Core - Shared types library.
//!
//! This crate provides the types used across all Catalog Bridge components:
//! - `catalog-bridge` - Reconciliation service and checkout translator
//! - `catalog-bridge-cli` - Command-line tools for sync reports and lookups
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no HTTP clients. This keeps
//! it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Shopify IDs, SKUs, catalog model, cart lines and sync reports

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
