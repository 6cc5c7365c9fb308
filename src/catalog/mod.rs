//! Remote creature catalog
//!
//! This module provides:
//! - API types for the list and detail endpoints, and the projected domain types
//! - `CatalogSource`, the client seam, with its HTTP implementation
//! - The detail resolver and the concurrent catalog loader

pub mod client;
pub mod loader;
pub mod resolver;
pub mod types;

#[cfg(test)]
pub(crate) mod fake;

pub use client::{CatalogSource, HttpCatalogClient};
pub use loader::{derive_facets, Catalog, CatalogLoader};
pub use resolver::resolve_record;
pub use types::*;
