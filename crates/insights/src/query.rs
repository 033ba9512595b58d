//! SKU list query pipeline: filter, sort, page.
//!
//! Pure function of its inputs. Raw UI parameters never fail to parse:
//! unknown values fall back to the dashboard defaults.

use core::cmp::Ordering;

use serde::{Deserialize, Serialize};

use tariffwatch_catalog::{Sku, SourcingAction};

/// Rows per page on the sourcing dashboard.
pub const DEFAULT_PAGE_SIZE: usize = 15;

/// Field a SKU list can be sorted by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortField {
    Id,
    Name,
    Category,
    Origin,
    Spend,
    CurrentMargin,
    TariffImpact,
    #[default]
    TotalRisk,
    Action,
}

impl SortField {
    pub const ALL: [SortField; 9] = [
        SortField::Id,
        SortField::Name,
        SortField::Category,
        SortField::Origin,
        SortField::Spend,
        SortField::CurrentMargin,
        SortField::TariffImpact,
        SortField::TotalRisk,
        SortField::Action,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SortField::Id => "id",
            SortField::Name => "name",
            SortField::Category => "category",
            SortField::Origin => "origin",
            SortField::Spend => "spend",
            SortField::CurrentMargin => "current_margin",
            SortField::TariffImpact => "tariff_impact",
            SortField::TotalRisk => "total_risk",
            SortField::Action => "action",
        }
    }

    /// Parse a field name in snake_case, kebab-case or camelCase; anything
    /// unrecognized sorts by total risk.
    pub fn parse_or_default(raw: &str) -> Self {
        let normalized: String = raw
            .chars()
            .filter(|c| *c != '_' && *c != '-')
            .flat_map(char::to_lowercase)
            .collect();
        Self::ALL
            .into_iter()
            .find(|f| f.as_str().replace('_', "") == normalized)
            .unwrap_or_default()
    }

    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            SortField::Spend | SortField::CurrentMargin | SortField::TariffImpact | SortField::TotalRisk
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    Ascending,
    #[default]
    Descending,
}

impl SortDirection {
    pub fn parse_or_default(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "asc" | "ascending" => SortDirection::Ascending,
            "desc" | "descending" => SortDirection::Descending,
            _ => SortDirection::default(),
        }
    }

    /// Short form, as accepted by `parse_or_default`.
    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Ascending => "asc",
            SortDirection::Descending => "desc",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }
}

/// Recommended-action filter for the SKU list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ActionFilter {
    #[default]
    All,
    Only(SourcingAction),
}

impl ActionFilter {
    /// Unrecognized values (including `"all"`) mean no filtering.
    pub fn parse_or_all(raw: &str) -> Self {
        SourcingAction::parse(raw).map_or(ActionFilter::All, ActionFilter::Only)
    }

    pub fn matches(&self, action: SourcingAction) -> bool {
        match self {
            ActionFilter::All => true,
            ActionFilter::Only(wanted) => *wanted == action,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ActionFilter::All => "all",
            ActionFilter::Only(action) => action.as_str(),
        }
    }
}

/// Clamp a raw (possibly negative) 1-indexed page number.
pub fn clamp_page(raw: i64) -> usize {
    usize::try_from(raw).unwrap_or(0).max(1)
}

/// Parameters of one SKU list query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryParams {
    pub search_text: String,
    pub action_filter: ActionFilter,
    pub sort_field: SortField,
    pub sort_direction: SortDirection,
    /// 1-indexed; 0 is treated as 1.
    pub page: usize,
    /// 0 is treated as 1.
    pub page_size: usize,
}

impl Default for QueryParams {
    fn default() -> Self {
        Self {
            search_text: String::new(),
            action_filter: ActionFilter::All,
            sort_field: SortField::TotalRisk,
            sort_direction: SortDirection::Descending,
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl QueryParams {
    pub fn with_search(mut self, text: impl Into<String>) -> Self {
        self.search_text = text.into();
        self
    }

    pub fn with_action(mut self, filter: ActionFilter) -> Self {
        self.action_filter = filter;
        self
    }

    pub fn with_sort(mut self, field: SortField, direction: SortDirection) -> Self {
        self.sort_field = field;
        self.sort_direction = direction;
        self
    }

    pub fn with_page(mut self, page: usize) -> Self {
        self.page = page;
        self
    }

    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    fn effective_page(&self) -> usize {
        self.page.max(1)
    }

    fn effective_page_size(&self) -> usize {
        self.page_size.max(1)
    }
}

/// One page of query results.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueryPage<'a> {
    pub items: Vec<&'a Sku>,
    pub page: usize,
    pub page_size: usize,
    pub total_matching: usize,
    pub total_pages: usize,
    /// Size of the unfiltered collection ("N of M SKUs").
    pub catalog_total: usize,
}

impl QueryPage<'_> {
    /// 1-based position of the first row on this page; 0 when the page is empty.
    pub fn first_index(&self) -> usize {
        if self.items.is_empty() {
            0
        } else {
            (self.page - 1) * self.page_size + 1
        }
    }

    /// 1-based position of the last row on this page; 0 when the page is empty.
    pub fn last_index(&self) -> usize {
        if self.items.is_empty() {
            0
        } else {
            self.first_index() + self.items.len() - 1
        }
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }
}

/// Whether `sku` matches a (case-insensitive) search on name, id or origin.
pub fn matches_search(sku: &Sku, needle_lower: &str) -> bool {
    needle_lower.is_empty()
        || sku.name.to_lowercase().contains(needle_lower)
        || sku.id.as_str().to_lowercase().contains(needle_lower)
        || sku.origin.to_lowercase().contains(needle_lower)
}

/// Filter `all`, keeping input order.
pub fn filter_skus<'a>(all: &'a [Sku], params: &QueryParams) -> Vec<&'a Sku> {
    let needle = params.search_text.to_lowercase();
    all.iter()
        .filter(|sku| matches_search(sku, &needle) && params.action_filter.matches(sku.action))
        .collect()
}

/// Compare two SKUs by `field` in ascending order.
///
/// Text fields compare case-insensitively; numeric fields numerically.
pub fn compare_by(a: &Sku, b: &Sku, field: SortField) -> Ordering {
    match field {
        SortField::Id => cmp_ignore_case(a.id.as_str(), b.id.as_str()),
        SortField::Name => cmp_ignore_case(&a.name, &b.name),
        SortField::Category => cmp_ignore_case(&a.category, &b.category),
        SortField::Origin => cmp_ignore_case(&a.origin, &b.origin),
        SortField::Spend => a.spend.total_cmp(&b.spend),
        SortField::CurrentMargin => a.current_margin.total_cmp(&b.current_margin),
        SortField::TariffImpact => a.tariff_impact.total_cmp(&b.tariff_impact),
        SortField::TotalRisk => a.total_risk.cmp(&b.total_risk),
        SortField::Action => a.action.as_str().cmp(b.action.as_str()),
    }
}

fn cmp_ignore_case(a: &str, b: &str) -> Ordering {
    a.chars()
        .flat_map(char::to_lowercase)
        .cmp(b.chars().flat_map(char::to_lowercase))
}

/// Sort in place. Stable: equal keys keep their relative order in both
/// directions.
pub fn sort_skus(skus: &mut [&Sku], field: SortField, direction: SortDirection) {
    match direction {
        SortDirection::Ascending => skus.sort_by(|a, b| compare_by(a, b, field)),
        SortDirection::Descending => skus.sort_by(|a, b| compare_by(a, b, field).reverse()),
    }
}

/// Filter and sort, without paging.
pub fn filter_and_sort<'a>(all: &'a [Sku], params: &QueryParams) -> Vec<&'a Sku> {
    let mut matching = filter_skus(all, params);
    sort_skus(&mut matching, params.sort_field, params.sort_direction);
    matching
}

/// Run the full pipeline: filter, sort, then cut out the requested page.
///
/// Pages past the end come back empty; `total_pages` is at least 1.
pub fn query<'a>(all: &'a [Sku], params: &QueryParams) -> QueryPage<'a> {
    let matching = filter_and_sort(all, params);
    let page = params.effective_page();
    let page_size = params.effective_page_size();

    let total_matching = matching.len();
    let total_pages = total_matching.div_ceil(page_size).max(1);

    let start = (page - 1).saturating_mul(page_size);
    let items: Vec<&Sku> = matching.into_iter().skip(start).take(page_size).collect();

    tracing::debug!(
        search = %params.search_text,
        action = params.action_filter.as_str(),
        sort = params.sort_field.as_str(),
        page,
        total_matching,
        "sku query"
    );

    QueryPage {
        items,
        page,
        page_size,
        total_matching,
        total_pages,
        catalog_total: all.len(),
    }
}
