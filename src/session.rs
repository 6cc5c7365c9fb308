//! Catalog session state
//!
//! One `CatalogSession` owns everything a single browsing session shows:
//! the loaded records and facets, the loading flag, the filter inputs and the
//! displayed subset. All mutation happens through `&mut self` at three
//! points: load completion, filter input, debounce settling.
//!
//! Loads are tagged with a [`LoadTicket`]. `teardown` invalidates every
//! outstanding ticket, so a load that finishes after teardown is discarded
//! instead of repopulating cleared state.

use crate::catalog::{Catalog, CatalogLoader, Facet, Record};
use crate::config::{CatalogConfig, FilterPolicy};
use crate::debounce::Debouncer;
use crate::filter::{apply_filters, FilterState};
use std::time::Duration;
use tokio::sync::watch;
use tracing::debug;

/// What the results area shows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    Loading,
    /// Load finished, nothing to show
    Empty,
    Results(usize),
}

/// Proof that a load was started in the current session epoch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket {
    epoch: u64,
}

pub struct CatalogSession {
    records: Vec<Record>,
    facets: Vec<Facet>,
    loading: bool,
    filter: FilterState,
    displayed: Vec<Record>,
    policy: FilterPolicy,
    epoch: u64,
    debounce: Duration,
    text: Debouncer<String>,
    debounced_rx: watch::Receiver<String>,
}

impl CatalogSession {
    pub fn new(config: &CatalogConfig) -> Self {
        Self::with_settings(config.debounce, config.filter_policy)
    }

    pub fn with_settings(debounce: Duration, policy: FilterPolicy) -> Self {
        let text = Debouncer::new(String::new(), debounce);
        let debounced_rx = text.subscribe();
        Self {
            records: Vec::new(),
            facets: Vec::new(),
            loading: true,
            filter: FilterState::default(),
            displayed: Vec::new(),
            policy,
            epoch: 0,
            debounce,
            text,
            debounced_rx,
        }
    }

    // -------------------------------------------------------------------------
    // Loading
    // -------------------------------------------------------------------------

    pub fn begin_load(&mut self) -> LoadTicket {
        self.loading = true;
        LoadTicket { epoch: self.epoch }
    }

    /// Publish a finished load. Returns `false` if the ticket is stale.
    pub fn complete_load(&mut self, ticket: LoadTicket, catalog: Catalog) -> bool {
        if ticket.epoch != self.epoch {
            debug!(
                ticket_epoch = ticket.epoch,
                session_epoch = self.epoch,
                "Discarding catalog load from a torn-down session"
            );
            return false;
        }

        self.records = catalog.records;
        self.facets = catalog.facets;
        self.loading = false;
        self.filter.records_replaced();
        self.recompute();
        true
    }

    /// Load the catalog and publish it
    pub async fn mount(&mut self, loader: &CatalogLoader) -> bool {
        let ticket = self.begin_load();
        let catalog = loader.load().await;
        self.complete_load(ticket, catalog)
    }

    /// Clear all published state and cancel any pending debounce
    pub fn teardown(&mut self) {
        self.epoch += 1;
        self.records.clear();
        self.facets.clear();
        self.displayed.clear();
        self.loading = false;
        self.filter = FilterState::default();

        self.text = Debouncer::new(String::new(), self.debounce);
        self.debounced_rx = self.text.subscribe();
    }

    // -------------------------------------------------------------------------
    // Filter inputs
    // -------------------------------------------------------------------------

    pub fn select_category(&mut self, facet: Option<Facet>) {
        if self.filter.select_category(facet) {
            self.recompute();
        }
    }

    /// Select by category value; unknown values are ignored
    pub fn select_category_value(&mut self, value: &str) -> bool {
        match self.facets.iter().find(|f| f.value == value).cloned() {
            Some(facet) => {
                self.select_category(Some(facet));
                true
            }
            None => false,
        }
    }

    /// Raw keystroke input. The text rule only sees it once debounced.
    pub fn input_text(&mut self, text: impl Into<String>) {
        let text = text.into();
        self.filter.set_raw_text(text.clone());
        self.text.push(text);
    }

    /// Apply the latest debounced value if it has not been applied yet
    pub fn sync_debounced(&mut self) -> bool {
        let text = self.debounced_rx.borrow_and_update().clone();
        if self.filter.set_debounced_text(text) {
            self.recompute();
            true
        } else {
            false
        }
    }

    /// Wait for the debouncer to settle, then apply the value.
    ///
    /// Returns whether the displayed set was recomputed.
    pub async fn debounced_changed(&mut self) -> bool {
        if self.debounced_rx.changed().await.is_err() {
            return false;
        }
        self.sync_debounced()
    }

    /// Manual search trigger; uses the debounced value, not the raw text
    pub fn search(&mut self) {
        self.filter.trigger_search();
        self.recompute();
    }

    fn recompute(&mut self) {
        self.displayed = apply_filters(&self.records, &self.filter, self.policy);
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn facets(&self) -> &[Facet] {
        &self.facets
    }

    pub fn displayed(&self) -> &[Record] {
        &self.displayed
    }

    pub fn filter(&self) -> &FilterState {
        &self.filter
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn is_text_pending(&self) -> bool {
        self.text.is_pending()
    }

    pub fn status(&self) -> SessionStatus {
        if self.loading {
            SessionStatus::Loading
        } else if self.displayed.is_empty() {
            SessionStatus::Empty
        } else {
            SessionStatus::Results(self.displayed.len())
        }
    }
}
