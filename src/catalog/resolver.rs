//! Detail resolver
//!
//! Resolves one index entry into a [`Record`]. Any failure is logged and
//! collapses to `None` ("unresolved"); the caller drops the entry.

use super::client::CatalogSource;
use super::types::{IndexEntry, Record};
use tracing::warn;

pub async fn resolve_record(source: &dyn CatalogSource, entry: &IndexEntry) -> Option<Record> {
    match source.fetch_detail(&entry.url).await {
        Ok(detail) => Some(Record::from_detail(&detail)),
        Err(e) => {
            warn!(
                name = %entry.name,
                url = %entry.url,
                kind = e.kind(),
                error = %e,
                "Failed to resolve catalog entry"
            );
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::fake::FakeSource;
    use serde_json::json;

    #[tokio::test]
    async fn test_resolves_record() {
        let source = FakeSource::new().with_detail(
            "http://fake/pokemon/4/",
            json!({
                "id": 4,
                "name": "charmander",
                "types": [ { "type": { "name": "fire" } } ],
                "sprites": { "front_default": "http://img/4.png" }
            }),
        );
        let entry = IndexEntry {
            name: "charmander".to_string(),
            url: "http://fake/pokemon/4/".to_string(),
        };

        let record = resolve_record(&source, &entry).await.unwrap();
        assert_eq!(record.id, 4);
        assert_eq!(record.categories, vec!["fire"]);
        assert_eq!(record.image_url.as_deref(), Some("http://img/4.png"));
    }

    #[tokio::test]
    async fn test_missing_sprite_still_resolves() {
        let source = FakeSource::new().with_detail(
            "http://fake/pokemon/7/",
            json!({ "id": 7, "name": "squirtle", "types": [ { "type": { "name": "water" } } ] }),
        );
        let entry = IndexEntry {
            name: "squirtle".to_string(),
            url: "http://fake/pokemon/7/".to_string(),
        };

        let record = resolve_record(&source, &entry).await.unwrap();
        assert_eq!(record.image_url, None);
    }

    #[tokio::test]
    async fn test_null_detail_view_fields_still_resolve() {
        let source = FakeSource::new()
            .with_detail(
                "http://fake/pokemon/4/",
                json!({ "id": 4, "name": "charmander",
                        "types": [ { "type": { "name": "fire" } } ],
                        "stats": null, "abilities": null, "moves": null }),
            )
            .with_detail(
                "http://fake/pokemon/5/",
                json!({ "id": 5, "name": "charmeleon",
                        "types": [ { "type": { "name": "fire" } } ],
                        "moves": [ { "move": null } ] }),
            );

        for (id, name) in [(4, "charmander"), (5, "charmeleon")] {
            let entry = IndexEntry {
                name: name.to_string(),
                url: format!("http://fake/pokemon/{}/", id),
            };
            let record = resolve_record(&source, &entry).await.unwrap();
            assert_eq!(record.id, id);
            assert_eq!(record.categories, vec!["fire"]);
        }
    }

    #[tokio::test]
    async fn test_failures_are_unresolved() {
        let source = FakeSource::new()
            .with_status("http://fake/pokemon/1/", 500)
            .with_detail("http://fake/pokemon/2/", json!({ "name": "no-id" }));

        for url in [
            "http://fake/pokemon/1/",
            "http://fake/pokemon/2/",
            "http://fake/pokemon/3/",
        ] {
            let entry = IndexEntry {
                name: "x".to_string(),
                url: url.to_string(),
            };
            assert!(resolve_record(&source, &entry).await.is_none(), "{}", url);
        }
    }
}
