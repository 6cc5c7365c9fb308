//! Catalog API and domain types
//!
//! Wire types mirror the JSON returned by the list and detail endpoints and
//! only declare the fields this crate reads. Domain types are the projected,
//! immutable values the rest of the crate works with.

use serde::{Deserialize, Deserializer, Serialize};

/// Number of moves shown on the detail view
pub const DETAIL_MOVE_LIMIT: usize = 5;

// =============================================================================
// Wire types
// =============================================================================

/// `GET {api_base}pokemon?limit=N`
#[derive(Debug, Clone, Deserialize)]
pub struct IndexPage {
    pub results: Vec<IndexEntry>,
}

/// Reference to a full record, produced by the list endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexEntry {
    pub name: String,
    pub url: String,
}

/// A `{ name, url }` pair as nested throughout the detail payload
#[derive(Debug, Clone, Deserialize)]
pub struct NamedResource {
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TypeSlot {
    #[serde(rename = "type")]
    pub kind: NamedResource,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Sprites {
    #[serde(default)]
    pub front_default: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StatSlot {
    pub stat: NamedResource,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AbilitySlot {
    pub ability: NamedResource,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MoveSlot {
    #[serde(rename = "move")]
    pub move_: NamedResource,
}

/// `GET {detail_url}`
///
/// `id`, `name` and `types` are required; a payload without them is a parse
/// failure. Everything else is optional. The detail-view collections are
/// lenient: `null` reads as empty and malformed entries are skipped, so they
/// can never make a record unresolvable.
#[derive(Debug, Clone, Deserialize)]
pub struct DetailResponse {
    pub id: i64,
    pub name: String,
    pub types: Vec<TypeSlot>,
    #[serde(default)]
    pub sprites: Option<Sprites>,
    #[serde(default, deserialize_with = "lenient_vec")]
    pub stats: Vec<StatSlot>,
    #[serde(default, deserialize_with = "lenient_vec")]
    pub abilities: Vec<AbilitySlot>,
    #[serde(default, deserialize_with = "lenient_vec")]
    pub moves: Vec<MoveSlot>,
}

/// `null` → empty; entries that do not match `T` are dropped
fn lenient_vec<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: serde::de::DeserializeOwned,
{
    let items: Option<Vec<serde_json::Value>> = Option::deserialize(deserializer)?;
    Ok(items
        .unwrap_or_default()
        .into_iter()
        .filter_map(|item| serde_json::from_value(item).ok())
        .collect())
}

impl DetailResponse {
    fn front_sprite(&self) -> Option<String> {
        self.sprites.as_ref().and_then(|s| s.front_default.clone())
    }
}

// =============================================================================
// Domain types
// =============================================================================

/// A fully resolved catalog entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Record {
    pub id: i64,
    pub name: String,
    /// Category names in API order. Duplicates inside one record are kept.
    pub categories: Vec<String>,
    pub image_url: Option<String>,
}

impl Record {
    pub fn from_detail(detail: &DetailResponse) -> Self {
        Self {
            id: detail.id,
            name: detail.name.clone(),
            categories: detail.types.iter().map(|t| t.kind.name.clone()).collect(),
            image_url: detail.front_sprite(),
        }
    }

    pub fn has_category(&self, value: &str) -> bool {
        self.categories.iter().any(|c| c == value)
    }
}

/// A distinct category value offered as a filter option
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Facet {
    pub value: String,
    pub label: String,
}

impl Facet {
    pub fn new(value: impl Into<String>) -> Self {
        let value = value.into();
        let label = capitalize(&value);
        Self { value, label }
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Read-only projection backing the detail view
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreatureDetail {
    pub id: i64,
    pub name: String,
    pub image_url: Option<String>,
    pub types: Vec<String>,
    pub stats: Vec<String>,
    pub abilities: Vec<String>,
    /// First [`DETAIL_MOVE_LIMIT`] moves in API order
    pub moves: Vec<String>,
}

impl CreatureDetail {
    pub fn from_response(detail: &DetailResponse) -> Self {
        Self {
            id: detail.id,
            name: detail.name.clone(),
            image_url: detail.front_sprite(),
            types: detail.types.iter().map(|t| t.kind.name.clone()).collect(),
            stats: detail.stats.iter().map(|s| s.stat.name.clone()).collect(),
            abilities: detail
                .abilities
                .iter()
                .map(|a| a.ability.name.clone())
                .collect(),
            moves: detail
                .moves
                .iter()
                .take(DETAIL_MOVE_LIMIT)
                .map(|m| m.move_.name.clone())
                .collect(),
        }
    }
}
