use tariffwatch_catalog::Sku;
use tariffwatch_core::SkuId;
use tariffwatch_insights::query::{self, ActionFilter, QueryPage, QueryParams, SortDirection, SortField};

use crate::detail::DetailView;

/// State of the sourcing dashboard: the SKU table's query parameters and the
/// SKU whose detail view is open.
#[derive(Debug, Clone, Default)]
pub struct DashboardView {
    params: QueryParams,
    detail: Option<DetailView>,
}

impl DashboardView {
    pub fn new(page_size: usize) -> Self {
        Self {
            params: QueryParams::default().with_page_size(page_size),
            detail: None,
        }
    }

    pub fn params(&self) -> &QueryParams {
        &self.params
    }

    /// Changing the search text starts over at page 1.
    pub fn set_search(&mut self, text: impl Into<String>) {
        let text = text.into();
        if text != self.params.search_text {
            self.params.search_text = text;
            self.params.page = 1;
        }
    }

    pub fn set_action_filter(&mut self, filter: ActionFilter) {
        if filter != self.params.action_filter {
            self.params.action_filter = filter;
            self.params.page = 1;
        }
    }

    /// Header click: the active column flips direction, a new column starts
    /// descending.
    pub fn toggle_sort(&mut self, field: SortField) {
        if field == self.params.sort_field {
            self.params.sort_direction = self.params.sort_direction.toggled();
        } else {
            self.params.sort_field = field;
            self.params.sort_direction = SortDirection::Descending;
        }
    }

    pub fn previous_page(&mut self) {
        self.params.page = self.params.page.saturating_sub(1).max(1);
    }

    pub fn next_page(&mut self, total_pages: usize) {
        self.params.page = (self.params.page + 1).min(total_pages.max(1));
    }

    pub fn go_to_page(&mut self, page: usize, total_pages: usize) {
        self.params.page = page.clamp(1, total_pages.max(1));
    }

    /// Current page of `skus` under this view's parameters.
    pub fn page<'a>(&self, skus: &'a [Sku]) -> QueryPage<'a> {
        query::query(skus, &self.params)
    }

    /// Open `sku`, abandoning any load still pending for the view it replaces.
    pub fn open_detail(&mut self, sku: SkuId) -> &mut DetailView {
        tracing::debug!(%sku, "opening sku detail");
        if let Some(previous) = self.detail.take() {
            previous.cancel_pending();
        }
        self.detail.insert(DetailView::new(sku))
    }

    pub fn close_detail(&mut self) {
        if let Some(detail) = self.detail.take() {
            detail.cancel_pending();
        }
    }

    pub fn detail(&self) -> Option<&DetailView> {
        self.detail.as_ref()
    }

    pub fn detail_mut(&mut self) -> Option<&mut DetailView> {
        self.detail.as_mut()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tariffwatch_catalog::{Catalog, FixtureProvider, SourcingAction};
    use tariffwatch_insights::DEFAULT_PAGE_SIZE;

    use crate::detail::DetailTab;

    #[test]
    fn starts_with_dashboard_defaults() {
        let view = DashboardView::new(DEFAULT_PAGE_SIZE);
        assert_eq!(view.params(), &QueryParams::default());
        assert!(view.detail().is_none());
    }

    #[test]
    fn sort_toggle_flips_then_resets() {
        let mut view = DashboardView::default();
        view.toggle_sort(SortField::TotalRisk);
        assert_eq!(view.params().sort_direction, SortDirection::Ascending);
        view.toggle_sort(SortField::TotalRisk);
        assert_eq!(view.params().sort_direction, SortDirection::Descending);

        view.toggle_sort(SortField::TotalRisk);
        view.toggle_sort(SortField::Spend);
        assert_eq!(view.params().sort_field, SortField::Spend);
        assert_eq!(view.params().sort_direction, SortDirection::Descending);
    }

    #[test]
    fn paging_is_clamped() {
        let catalog = Catalog::embedded().unwrap();
        let mut view = DashboardView::new(15);
        let total_pages = view.page(catalog.skus()).total_pages;
        assert_eq!(total_pages, 3);

        view.previous_page();
        assert_eq!(view.params().page, 1);

        for _ in 0..10 {
            view.next_page(total_pages);
        }
        assert_eq!(view.params().page, 3);
        let last = view.page(catalog.skus());
        assert_eq!(last.items.len(), 7);
        assert_eq!((last.first_index(), last.last_index()), (31, 37));

        view.go_to_page(0, total_pages);
        assert_eq!(view.params().page, 1);
    }

    #[test]
    fn narrowing_the_list_returns_to_first_page() {
        let catalog = Catalog::embedded().unwrap();
        let mut view = DashboardView::new(15);
        view.go_to_page(3, 3);

        view.set_action_filter(ActionFilter::Only(SourcingAction::Shift));
        assert_eq!(view.params().page, 1);
        let page = view.page(catalog.skus());
        assert!(page.items.iter().all(|s| s.action == SourcingAction::Shift));

        view.go_to_page(2, 2);
        view.set_search("china");
        assert_eq!(view.params().page, 1);
        view.go_to_page(2, 2);
        view.set_search("china");
        assert_eq!(view.params().page, 2);
    }

    #[test]
    fn switching_sku_drops_the_previous_alternatives_load() {
        let mut view = DashboardView::default();
        let stale = view
            .open_detail(SkuId::new("SKU-1001"))
            .select_tab(DetailTab::Alternatives)
            .unwrap();

        view.open_detail(SkuId::new("SKU-1006"))
            .select_tab(DetailTab::Alternatives)
            .unwrap();
        assert!(!stale.is_current());

        let detail = view.detail_mut().unwrap();
        assert!(!detail.alternatives_loaded(&stale));
        assert!(detail.alternatives().is_loading());
    }

    #[test]
    fn detail_opens_and_closes() {
        let mut view = DashboardView::default();
        view.open_detail(SkuId::new("SKU-1001"));
        assert_eq!(view.detail().map(|d| d.sku().as_str()), Some("SKU-1001"));
        view.close_detail();
        assert!(view.detail().is_none());
    }
}
