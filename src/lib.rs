//! Creature catalog client
//!
//! Loads the first page of a remote creature catalog, resolves every index
//! entry into a full [`Record`] concurrently, derives the category facets and
//! filters the loaded set by category and (debounced) name text.
//!
//! ```text
//! index GET ──► IndexEntry* ──► resolve (fan-out, all-settled) ──► Record*
//!                                                                    │
//!                                           derive_facets ◄──────────┤
//!                                                                    ▼
//!   category select ─────────────────────────────────────────► FilterState ──► displayed
//!   text input ──► Debouncer ──► debounced text ─────────────────────┘
//! ```

pub mod catalog;
pub mod config;
pub mod debounce;
pub mod error;
pub mod filter;
pub mod session;

pub use catalog::{
    derive_facets, resolve_record, Catalog, CatalogLoader, CatalogSource, CreatureDetail, Facet,
    HttpCatalogClient, IndexEntry, Record,
};
pub use config::{CatalogConfig, FilterPolicy};
pub use debounce::Debouncer;
pub use error::FetchError;
pub use filter::{apply_filters, filter_by_category, filter_by_text, ActiveRule, FilterState};
pub use session::{CatalogSession, LoadTicket, SessionStatus};
