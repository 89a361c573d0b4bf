//! Catalog bridge library.
//!
//! Links the variants of two independently managed Shopify stores by SKU,
//! reconciles their catalogs, and translates carts built against the source
//! store into draft orders on the target store. Exposed as a library so the
//! HTTP service, the CLI, and the integration tests share one implementation.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cache;
pub mod checkout;
pub mod config;
pub mod error;
pub mod reconcile;
pub mod resolver;
pub mod routes;
pub mod shopify;
pub mod state;
