use serde::Serialize;

use tariffwatch_catalog::{FixtureProvider, Sku};
use tariffwatch_core::SkuId;
use tariffwatch_insights::ranking::{SupplierRanking, SupplierTypeFilter, rank_suppliers};
use tariffwatch_insights::scenario::{DEFAULT_TARIFF_INCREASE, TariffScenario, clamp_increase, tariff_scenario};

use crate::latency::{LoadGate, LoadPhase, LoadTicket};

/// Whether the alternatives tab has computed its ranking yet. `NotLoaded` is
/// distinct from an empty ranking.
pub type AlternativesState = LoadPhase;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DetailTab {
    #[default]
    Overview,
    Alternatives,
}

/// State of an open SKU detail view.
#[derive(Debug, Clone)]
pub struct DetailView {
    sku: SkuId,
    tab: DetailTab,
    supplier_filter: SupplierTypeFilter,
    tariff_increase: f64,
    alternatives: AlternativesState,
    alternatives_gate: LoadGate,
}

impl DetailView {
    pub fn new(sku: SkuId) -> Self {
        Self {
            sku,
            tab: DetailTab::Overview,
            supplier_filter: SupplierTypeFilter::All,
            tariff_increase: DEFAULT_TARIFF_INCREASE,
            alternatives: LoadPhase::NotLoaded,
            alternatives_gate: LoadGate::new(),
        }
    }

    pub fn sku(&self) -> &SkuId {
        &self.sku
    }

    pub fn tab(&self) -> DetailTab {
        self.tab
    }

    pub fn supplier_filter(&self) -> SupplierTypeFilter {
        self.supplier_filter
    }

    pub fn tariff_increase(&self) -> f64 {
        self.tariff_increase
    }

    pub fn alternatives(&self) -> AlternativesState {
        self.alternatives
    }

    /// Switch tabs. Entering the alternatives tab starts a fresh load and
    /// returns its ticket; leaving it abandons any load in flight.
    pub fn select_tab(&mut self, tab: DetailTab) -> Option<LoadTicket> {
        self.tab = tab;
        match tab {
            DetailTab::Alternatives => {
                let ticket = self.alternatives_gate.issue();
                self.alternatives = LoadPhase::loading(&ticket);
                Some(ticket)
            }
            DetailTab::Overview => {
                self.cancel_pending();
                if self.alternatives.is_loading() {
                    self.alternatives = LoadPhase::NotLoaded;
                }
                None
            }
        }
    }

    /// Mark the alternatives as loaded. Stale tickets are ignored.
    pub fn alternatives_loaded(&mut self, ticket: &LoadTicket) -> bool {
        let applied = self.alternatives_gate.complete(&mut self.alternatives, ticket);
        if !applied {
            tracing::debug!(sku = %self.sku, generation = ticket.generation(), "ignoring stale alternatives load");
        }
        applied
    }

    pub fn set_supplier_filter(&mut self, filter: SupplierTypeFilter) {
        self.supplier_filter = filter;
    }

    /// Slider input; clamped to the supported range.
    pub fn set_tariff_increase(&mut self, increase: f64) {
        self.tariff_increase = clamp_increase(increase);
    }

    pub(crate) fn cancel_pending(&self) {
        self.alternatives_gate.supersede();
    }

    /// Ranking for the open SKU, once the alternatives have loaded.
    pub fn ranking<'a, P: FixtureProvider>(&self, provider: &'a P) -> Option<SupplierRanking<'a>> {
        if !self.alternatives.is_ready() {
            return None;
        }
        let sku = provider.find_sku(self.sku.as_str())?;
        Some(rank_suppliers(sku, provider.suppliers(), provider.mapping()))
    }

    pub fn scenario(&self, sku: &Sku) -> Option<TariffScenario> {
        tariff_scenario(sku, self.tariff_increase)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tariffwatch_catalog::Catalog;
    use tariffwatch_insights::ranking::{EmptyReason, RankingOutcome};

    #[test]
    fn opens_on_overview_with_defaults() {
        let view = DetailView::new(SkuId::new("SKU-1001"));
        assert_eq!(view.tab(), DetailTab::Overview);
        assert_eq!(view.supplier_filter(), SupplierTypeFilter::All);
        assert_eq!(view.tariff_increase(), 5.0);
        assert_eq!(view.alternatives(), AlternativesState::NotLoaded);
    }

    #[test]
    fn ranking_is_withheld_until_loaded() {
        let catalog = Catalog::embedded().unwrap();
        let mut view = DetailView::new(SkuId::new("SKU-1001"));
        assert!(view.ranking(&catalog).is_none());

        let ticket = view.select_tab(DetailTab::Alternatives).unwrap();
        assert!(view.alternatives().is_loading());
        assert!(view.ranking(&catalog).is_none());

        assert!(view.alternatives_loaded(&ticket));
        let ranking = view.ranking(&catalog).unwrap();
        assert!(!ranking.is_empty());
    }

    #[test]
    fn reentering_the_tab_supersedes_the_earlier_load() {
        let mut view = DetailView::new(SkuId::new("SKU-1001"));
        let first = view.select_tab(DetailTab::Alternatives).unwrap();
        assert!(view.select_tab(DetailTab::Overview).is_none());
        assert_eq!(view.alternatives(), AlternativesState::NotLoaded);

        let second = view.select_tab(DetailTab::Alternatives).unwrap();
        assert!(!view.alternatives_loaded(&first));
        assert!(view.alternatives_loaded(&second));
        assert!(view.alternatives().is_ready());
    }

    #[test]
    fn ticket_from_another_sku_is_ignored() {
        let mut first = DetailView::new(SkuId::new("SKU-1001"));
        let foreign = first.select_tab(DetailTab::Alternatives).unwrap();

        let mut view = DetailView::new(SkuId::new("SKU-1006"));
        let own = view.select_tab(DetailTab::Alternatives).unwrap();
        assert_eq!(foreign.generation(), own.generation());

        assert!(!view.alternatives_loaded(&foreign));
        assert!(view.alternatives().is_loading());
        assert!(view.alternatives_loaded(&own));
    }

    #[test]
    fn loaded_but_empty_is_not_the_same_as_not_loaded() {
        let catalog = Catalog::embedded().unwrap();
        let mut view = DetailView::new(SkuId::new("SKU-1006"));
        let ticket = view.select_tab(DetailTab::Alternatives).unwrap();
        view.alternatives_loaded(&ticket);

        let ranking = view.ranking(&catalog).unwrap();
        assert_eq!(ranking.outcome(), RankingOutcome::Empty(EmptyReason::AlreadyOptimal));
    }

    #[test]
    fn slider_is_clamped_and_drives_the_scenario() {
        let catalog = Catalog::embedded().unwrap();
        let sku = catalog.find_sku("SKU-1001").unwrap();
        let mut view = DetailView::new(sku.id.clone());

        view.set_tariff_increase(50.0);
        assert_eq!(view.tariff_increase(), 20.0);
        let scenario = view.scenario(sku).unwrap();
        assert_eq!(scenario.margin_impact, -20.0);
        assert_eq!(scenario.projected_loss, sku.spend * 20.0 / 100.0);

        let domestic = catalog.find_sku("SKU-4004").unwrap();
        assert!(view.scenario(domestic).is_none());
    }
}
