//! Catalog loader
//!
//! Fetches the first index page, resolves every entry concurrently and
//! derives the facet list. All detail requests are issued together and the
//! loader waits for every one of them to settle, success or failure, so a
//! failing entry is dropped without affecting the others.

use super::client::CatalogSource;
use super::resolver::resolve_record;
use super::types::{Facet, Record};
use crate::config::CatalogConfig;
use futures::future::join_all;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{info, warn};

/// Result of one load: resolved records in index order plus their facets
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    pub records: Vec<Record>,
    pub facets: Vec<Facet>,
}

impl Catalog {
    pub fn from_records(records: Vec<Record>) -> Self {
        let facets = derive_facets(&records);
        Self { records, facets }
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[derive(Clone)]
pub struct CatalogLoader {
    source: Arc<dyn CatalogSource>,
    page_size: usize,
}

impl CatalogLoader {
    pub fn new(source: Arc<dyn CatalogSource>, page_size: usize) -> Self {
        Self { source, page_size }
    }

    pub fn from_config(source: Arc<dyn CatalogSource>, config: &CatalogConfig) -> Self {
        Self::new(source, config.page_size)
    }

    /// Never fails: index failures yield an empty catalog, detail failures
    /// drop the affected entry.
    pub async fn load(&self) -> Catalog {
        info!(page_size = self.page_size, "Loading catalog index");

        let entries = match self.source.fetch_index(self.page_size).await {
            Ok(entries) => entries,
            Err(e) => {
                warn!(kind = e.kind(), error = %e, "Failed to fetch catalog index");
                return Catalog::default();
            }
        };

        if entries.is_empty() {
            info!("Catalog index is empty");
            return Catalog::default();
        }

        let source = self.source.as_ref();
        let resolved = join_all(entries.iter().map(|entry| resolve_record(source, entry))).await;
        let records: Vec<Record> = resolved.into_iter().flatten().collect();

        let catalog = Catalog::from_records(records);
        info!(
            requested = entries.len(),
            resolved = catalog.records.len(),
            facets = catalog.facets.len(),
            "Catalog loaded"
        );
        catalog
    }
}

/// Distinct categories in first-seen order (record order, then category order)
pub fn derive_facets(records: &[Record]) -> Vec<Facet> {
    let mut seen = HashSet::new();
    records
        .iter()
        .flat_map(|r| r.categories.iter())
        .filter(|c| seen.insert(c.as_str()))
        .map(|c| Facet::new(c.as_str()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::fake::FakeSource;
    use serde_json::json;
    use std::time::Duration;

    fn record(id: i64, name: &str, categories: &[&str]) -> Record {
        Record {
            id,
            name: name.to_string(),
            categories: categories.iter().map(|c| c.to_string()).collect(),
            image_url: None,
        }
    }

    fn detail(id: i64, name: &str, categories: &[&str]) -> serde_json::Value {
        let types: Vec<_> = categories
            .iter()
            .map(|c| json!({ "type": { "name": c } }))
            .collect();
        json!({ "id": id, "name": name, "types": types, "sprites": { "front_default": null } })
    }

    fn url(id: i64) -> String {
        format!("http://fake/pokemon/{}/", id)
    }

    #[test]
    fn test_facets_first_seen_order() {
        let records = vec![
            record(1, "bulbasaur", &["grass", "poison"]),
            record(23, "ekans", &["poison"]),
            record(4, "charmander", &["fire"]),
        ];
        let facets = derive_facets(&records);
        let values: Vec<_> = facets.iter().map(|f| f.value.as_str()).collect();
        let labels: Vec<_> = facets.iter().map(|f| f.label.as_str()).collect();
        assert_eq!(values, vec!["grass", "poison", "fire"]);
        assert_eq!(labels, vec!["Grass", "Poison", "Fire"]);
    }

    #[test]
    fn test_facets_dedup_within_record() {
        let records = vec![record(1, "odd", &["water", "water"])];
        assert_eq!(derive_facets(&records), vec![Facet::new("water")]);
    }

    #[tokio::test]
    async fn test_load_resolves_in_index_order() {
        let source = FakeSource::new()
            .with_index(vec![("bulbasaur", url(1)), ("charmander", url(4))])
            .with_detail(&url(1), detail(1, "bulbasaur", &["grass", "poison"]))
            .with_detail(&url(4), detail(4, "charmander", &["fire"]))
            .with_delay(&url(1), Duration::from_millis(30));

        let catalog = CatalogLoader::new(Arc::new(source), 10).load().await;
        let names: Vec<_> = catalog.records.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["bulbasaur", "charmander"]);
        assert_eq!(catalog.facets.len(), 3);
    }

    #[tokio::test]
    async fn test_empty_index_completes_empty() {
        let source = FakeSource::new().with_empty_index();
        let catalog = CatalogLoader::new(Arc::new(source), 10).load().await;
        assert!(catalog.records.is_empty());
        assert!(catalog.facets.is_empty());
    }

    #[tokio::test]
    async fn test_index_failure_completes_empty() {
        let source = FakeSource::new().with_index_status(503);
        let catalog = CatalogLoader::new(Arc::new(source), 10).load().await;
        assert_eq!(catalog, Catalog::default());
    }

    #[tokio::test]
    async fn test_page_size_is_forwarded() {
        let source = Arc::new(FakeSource::new().with_empty_index());
        CatalogLoader::new(source.clone(), 10).load().await;
        assert_eq!(source.requested_limits(), vec![10]);
    }

    #[tokio::test]
    async fn test_one_failure_of_ten_drops_only_that_entry() {
        let mut source = FakeSource::new();
        let mut index = Vec::new();
        for id in 1..=10 {
            let name = format!("creature-{}", id);
            index.push((name.clone(), url(id)));
            source = if id == 6 {
                source.with_status(&url(id), 500)
            } else {
                source.with_detail(&url(id), detail(id, &name, &["normal"]))
            };
            source = source.with_delay(&url(id), Duration::from_millis(10 * (11 - id) as u64));
        }
        let source = Arc::new(source.with_index(index));

        let catalog = CatalogLoader::new(source.clone(), 10).load().await;

        assert_eq!(catalog.records.len(), 9);
        assert!(catalog.records.iter().all(|r| r.id != 6));
        assert_eq!(catalog.facets, vec![Facet::new("normal")]);
        assert_eq!(source.max_in_flight(), 10);
    }
}
