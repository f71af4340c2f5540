//! Catalog view: the filtered, sorted and paginated product grid.

use std::cmp::Ordering;
use std::ops::Range;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::catalog::Product;
use crate::search::{CategoryFilter, FilterAction, FilterState, SortKey};

/// Whether the grid has anything to show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewStatus {
    /// At least one product matches.
    Results,
    /// Nothing matches; show the "no results" panel instead of the grid.
    NoResults,
}

/// What a caller has to re-render after a dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewUpdate {
    /// Redraw the whole grid.
    Replaced,
    /// Append `filtered()[range]` to the grid.
    Appended(Range<usize>),
    /// Nothing changed.
    Unchanged,
}

/// Kind of a removable filter chip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActiveFilterKind {
    Category,
    Search,
}

/// A removable chip summarizing an active filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveFilter {
    pub kind: ActiveFilterKind,
    /// Raw value (`men`, the search term).
    pub value: String,
    /// Text shown on the chip.
    pub label: String,
}

impl ActiveFilter {
    /// The action the chip's remove button dispatches.
    pub fn remove_action(&self) -> FilterAction {
        match self.kind {
            ActiveFilterKind::Category => FilterAction::RemoveCategory,
            ActiveFilterKind::Search => FilterAction::ClearSearch,
        }
    }
}

/// Pagination info.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Pagination {
    /// Pages revealed (1-indexed).
    pub page: u32,
    /// Items per page.
    pub per_page: u32,
    /// Total number of matching items.
    pub total: usize,
    /// Total number of pages.
    pub total_pages: u32,
    /// Whether "load more" has anything to reveal.
    pub has_next: bool,
}

impl Pagination {
    /// Create pagination info.
    pub fn new(page: u32, per_page: u32, total: usize) -> Self {
        let per_page = per_page.max(1);
        let total_pages = if total == 0 {
            1
        } else {
            total.div_ceil(per_page as usize) as u32
        };

        Self {
            page,
            per_page,
            total,
            total_pages,
            has_next: page < total_pages,
        }
    }
}

/// Products matching `state`, sorted by its sort key.
///
/// The sort is stable: products with equal keys keep catalog order.
pub fn filter_and_sort(catalog: &[Product], state: &FilterState) -> Vec<Product> {
    let mut filtered: Vec<Product> = catalog.iter().filter(|p| state.matches(p)).cloned().collect();
    match state.sort {
        SortKey::Featured => {}
        SortKey::PriceLow => filtered.sort_by_key(|p| p.price.amount_cents),
        SortKey::PriceHigh => filtered.sort_by(|a, b| b.price.amount_cents.cmp(&a.price.amount_cents)),
        SortKey::Newest => filtered.sort_by(|a, b| b.id.cmp(&a.id)),
        SortKey::Rating => filtered.sort_by(|a, b| rating_desc(a, b)),
    }
    filtered
}

fn rating_desc(a: &Product, b: &Product) -> Ordering {
    let key = |p: &Product| if p.rating.is_nan() { 0.0 } else { p.rating };
    key(b).total_cmp(&key(a))
}

/// The products grid of one page.
///
/// Holds the catalog, the filter state and the derived result list; every
/// state change recomputes the result list.
#[derive(Debug, Clone)]
pub struct CatalogView {
    catalog: Arc<[Product]>,
    state: FilterState,
    filtered: Vec<Product>,
}

impl CatalogView {
    /// Create a view over `catalog`.
    pub fn new(catalog: impl Into<Arc<[Product]>>, state: FilterState) -> Self {
        let catalog = catalog.into();
        let filtered = filter_and_sort(&catalog, &state);
        Self {
            catalog,
            state,
            filtered,
        }
    }

    /// The full catalog.
    pub fn catalog(&self) -> &[Product] {
        &self.catalog
    }

    /// Current filter state.
    pub fn state(&self) -> &FilterState {
        &self.state
    }

    /// Apply an action and report what to re-render.
    pub fn dispatch(&mut self, action: FilterAction) -> ViewUpdate {
        if action == FilterAction::LoadMore {
            if !self.has_more() {
                return ViewUpdate::Unchanged;
            }
            let start = self.displayed().len();
            self.state = self.state.clone().apply(FilterAction::LoadMore);
            return ViewUpdate::Appended(start..self.displayed().len());
        }

        let next = self.state.clone().apply(action);
        if next == self.state {
            return ViewUpdate::Unchanged;
        }
        self.state = next;
        self.recompute();
        ViewUpdate::Replaced
    }

    /// Reveal the next page and return only the newly shown products.
    ///
    /// Returns `None` when everything is already displayed.
    pub fn load_more(&mut self) -> Option<&[Product]> {
        match self.dispatch(FilterAction::LoadMore) {
            ViewUpdate::Appended(range) => Some(&self.filtered[range]),
            _ => None,
        }
    }

    /// Every matching product, sorted.
    pub fn filtered(&self) -> &[Product] {
        &self.filtered
    }

    /// The first `page * page_size` matching products.
    pub fn displayed(&self) -> &[Product] {
        let end = self.state.revealed().min(self.filtered.len());
        &self.filtered[..end]
    }

    /// Whether "load more" would reveal anything.
    pub fn has_more(&self) -> bool {
        self.displayed().len() < self.filtered.len()
    }

    /// Results or the dedicated no-results state.
    pub fn status(&self) -> ViewStatus {
        if self.filtered.is_empty() {
            ViewStatus::NoResults
        } else {
            ViewStatus::Results
        }
    }

    /// `(showing, total)` for the "Showing X of Y" line.
    pub fn results_info(&self) -> (usize, usize) {
        (self.displayed().len(), self.filtered.len())
    }

    /// Pagination summary.
    pub fn pagination(&self) -> Pagination {
        Pagination::new(self.state.page, self.state.page_size, self.filtered.len())
    }

    /// Chips for the active category and search filters.
    pub fn active_filters(&self) -> Vec<ActiveFilter> {
        let mut chips = Vec::new();
        if let CategoryFilter::Only(category) = self.state.category {
            chips.push(ActiveFilter {
                kind: ActiveFilterKind::Category,
                value: category.slug().to_string(),
                label: category.label().to_string(),
            });
        }
        if !self.state.search.is_empty() {
            chips.push(ActiveFilter {
                kind: ActiveFilterKind::Search,
                value: self.state.search.clone(),
                label: format!("Search: \"{}\"", self.state.search),
            });
        }
        chips
    }

    fn recompute(&mut self) {
        self.filtered = filter_and_sort(&self.catalog, &self.state);
    }
}
