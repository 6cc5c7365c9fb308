//! Filter engine
//!
//! Pure recomputation of the displayed subset from the loaded records, the
//! selected category facet and the debounced search text.
//!
//! Under [`FilterPolicy::LastChanged`] the category rule and the text rule
//! are never combined: each is evaluated against the full loaded set and the
//! input that changed most recently decides which one produces the output.
//! Loading a new record set re-runs the category rule and then the text
//! rule, so the text rule is active after every load.
//! [`FilterPolicy::Intersect`] applies both.

use crate::catalog::{Facet, Record};
use crate::config::FilterPolicy;

/// Which single rule produces the displayed set under `LastChanged`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActiveRule {
    Category,
    Text,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterState {
    pub category: Option<Facet>,
    /// Updates with every keystroke
    pub raw_text: String,
    /// Updates only when the debouncer settles
    pub debounced_text: String,
    active: ActiveRule,
}

impl Default for FilterState {
    fn default() -> Self {
        Self {
            category: None,
            raw_text: String::new(),
            debounced_text: String::new(),
            active: ActiveRule::Text,
        }
    }
}

impl FilterState {
    pub fn active_rule(&self) -> ActiveRule {
        self.active
    }

    /// Returns `true` when the selection actually changed
    pub fn select_category(&mut self, facet: Option<Facet>) -> bool {
        if self.category == facet {
            return false;
        }
        self.category = facet;
        self.active = ActiveRule::Category;
        true
    }

    pub fn set_raw_text(&mut self, text: impl Into<String>) {
        self.raw_text = text.into();
    }

    /// Returns `true` when the debounced text actually changed
    pub fn set_debounced_text(&mut self, text: impl Into<String>) -> bool {
        let text = text.into();
        if self.debounced_text == text {
            return false;
        }
        self.debounced_text = text;
        self.active = ActiveRule::Text;
        true
    }

    /// Manual search: re-apply the text rule with the debounced value
    pub fn trigger_search(&mut self) {
        self.active = ActiveRule::Text;
    }

    pub(crate) fn records_replaced(&mut self) {
        self.active = ActiveRule::Text;
    }
}

fn category_matches(record: &Record, facet: Option<&Facet>) -> bool {
    facet.map_or(true, |f| record.has_category(&f.value))
}

fn text_matches(record: &Record, text: &str) -> bool {
    text.is_empty() || record.name.contains(text)
}

/// Records carrying the facet's value; all records when none is selected
pub fn filter_by_category(records: &[Record], facet: Option<&Facet>) -> Vec<Record> {
    records
        .iter()
        .filter(|r| category_matches(r, facet))
        .cloned()
        .collect()
}

/// Case-sensitive substring match on the name; all records for empty text
pub fn filter_by_text(records: &[Record], text: &str) -> Vec<Record> {
    records
        .iter()
        .filter(|r| text_matches(r, text))
        .cloned()
        .collect()
}

pub fn apply_filters(records: &[Record], state: &FilterState, policy: FilterPolicy) -> Vec<Record> {
    match policy {
        FilterPolicy::LastChanged => match state.active {
            ActiveRule::Category => filter_by_category(records, state.category.as_ref()),
            ActiveRule::Text => filter_by_text(records, &state.debounced_text),
        },
        FilterPolicy::Intersect => records
            .iter()
            .filter(|r| {
                category_matches(r, state.category.as_ref())
                    && text_matches(r, &state.debounced_text)
            })
            .cloned()
            .collect(),
    }
}
