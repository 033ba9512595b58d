use tariffwatch_catalog::FixtureProvider;
use tariffwatch_insights::overview::{QuickSearch, is_active_term, quick_search};

use crate::latency::{LoadGate, LoadPhase, LoadTicket};

/// State of the overview page: KPI and category sections plus the quick
/// search box.
#[derive(Debug, Clone, Default)]
pub struct OverviewView {
    kpis: LoadPhase,
    kpis_gate: LoadGate,
    categories: LoadPhase,
    categories_gate: LoadGate,
    search_term: String,
    search: LoadPhase,
    search_gate: LoadGate,
}

impl OverviewView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Page opened: both sections start loading. Returns the KPI and
    /// category tickets, in that order.
    pub fn open(&mut self) -> (LoadTicket, LoadTicket) {
        let kpis = self.kpis_gate.issue();
        let categories = self.categories_gate.issue();
        self.kpis = LoadPhase::loading(&kpis);
        self.categories = LoadPhase::loading(&categories);
        (kpis, categories)
    }

    pub fn kpis_loaded(&mut self, ticket: &LoadTicket) -> bool {
        self.kpis_gate.complete(&mut self.kpis, ticket)
    }

    pub fn categories_loaded(&mut self, ticket: &LoadTicket) -> bool {
        self.categories_gate.complete(&mut self.categories, ticket)
    }

    pub fn kpis_phase(&self) -> LoadPhase {
        self.kpis
    }

    pub fn categories_phase(&self) -> LoadPhase {
        self.categories
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub fn search_phase(&self) -> LoadPhase {
        self.search
    }

    /// Keystroke in the search box. Returns a ticket when the term is long
    /// enough to search; shorter terms hide the results and cancel any
    /// search in flight.
    pub fn set_search_term(&mut self, term: impl Into<String>) -> Option<LoadTicket> {
        self.search_term = term.into();
        if is_active_term(&self.search_term) {
            let ticket = self.search_gate.issue();
            self.search = LoadPhase::loading(&ticket);
            Some(ticket)
        } else {
            self.search_gate.supersede();
            self.search = LoadPhase::NotLoaded;
            None
        }
    }

    pub fn search_loaded(&mut self, ticket: &LoadTicket) -> bool {
        self.search_gate.complete(&mut self.search, ticket)
    }

    /// Results for the current term; inactive until the search has loaded.
    pub fn results<'a, P: FixtureProvider>(&self, provider: &'a P) -> QuickSearch<'a> {
        if !self.search.is_ready() {
            return QuickSearch::Inactive;
        }
        quick_search(&self.search_term, provider.skus(), provider.suppliers())
    }
}
