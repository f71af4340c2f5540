//! Filter state for the products page and its URL mirror.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use url::form_urlencoded;

use crate::catalog::{Category, Product};
use crate::ids::ProductId;
use crate::CommerceError;

/// Products shown per page.
pub const DEFAULT_PAGE_SIZE: u32 = 12;

/// Page the filter state is mirrored onto.
pub const PRODUCTS_PAGE: &str = "products.html";

/// Category selection, `all` or a single department.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(Category),
}

impl CategoryFilter {
    /// Whether `product` passes this filter.
    pub fn matches(&self, product: &Product) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(category) => product.category == *category,
        }
    }

    /// URL value (`all`, `men`, ...).
    pub fn slug(&self) -> &'static str {
        match self {
            CategoryFilter::All => "all",
            CategoryFilter::Only(category) => category.slug(),
        }
    }

    /// Parse an allow-listed slug.
    pub fn from_slug(slug: &str) -> Option<Self> {
        if slug.trim().eq_ignore_ascii_case("all") {
            return Some(CategoryFilter::All);
        }
        Category::from_slug(slug).map(CategoryFilter::Only)
    }
}

impl From<Category> for CategoryFilter {
    fn from(category: Category) -> Self {
        CategoryFilter::Only(category)
    }
}

impl FromStr for CategoryFilter {
    type Err = CommerceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CategoryFilter::from_slug(s).ok_or_else(|| CommerceError::UnknownCategory(s.to_string()))
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

/// Sort options for the products grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum SortKey {
    /// Catalog order.
    #[default]
    Featured,
    /// Sort by price, low to high.
    PriceLow,
    /// Sort by price, high to low.
    PriceHigh,
    /// Highest id first.
    Newest,
    /// Highest rated first.
    Rating,
}

impl SortKey {
    /// All sort keys in select-box order.
    pub const ALL: [SortKey; 5] = [
        SortKey::Featured,
        SortKey::PriceLow,
        SortKey::PriceHigh,
        SortKey::Newest,
        SortKey::Rating,
    ];

    /// URL value (`featured`, `price-low`, ...).
    pub fn slug(&self) -> &'static str {
        match self {
            SortKey::Featured => "featured",
            SortKey::PriceLow => "price-low",
            SortKey::PriceHigh => "price-high",
            SortKey::Newest => "newest",
            SortKey::Rating => "rating",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            SortKey::Featured => "Featured",
            SortKey::PriceLow => "Price: Low to High",
            SortKey::PriceHigh => "Price: High to Low",
            SortKey::Newest => "Newest",
            SortKey::Rating => "Highest Rated",
        }
    }

    /// Parse an allow-listed slug.
    pub fn from_slug(slug: &str) -> Option<Self> {
        SortKey::ALL
            .into_iter()
            .find(|key| key.slug().eq_ignore_ascii_case(slug.trim()))
    }
}

impl FromStr for SortKey {
    type Err = CommerceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SortKey::from_slug(s).ok_or_else(|| CommerceError::UnknownSortKey(s.to_string()))
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

/// User intents that change the filter state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterAction {
    /// A category button was clicked.
    SetCategory(CategoryFilter),
    /// The (debounced) search text changed.
    SetSearch(String),
    /// The search clear button was clicked.
    ClearSearch,
    /// A sort option was picked.
    SetSort(SortKey),
    /// "Load more" was clicked.
    LoadMore,
    /// The category chip was removed.
    RemoveCategory,
    /// "Clear all filters" was clicked.
    ClearAll,
}

/// Category, search, sort and pagination state of one catalog view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterState {
    /// Selected category.
    pub category: CategoryFilter,
    /// Search term, trimmed and lower-cased.
    pub search: String,
    /// Selected sort.
    pub sort: SortKey,
    /// Pages revealed so far (1-indexed).
    pub page: u32,
    /// Items per page.
    pub page_size: u32,
}

impl Default for FilterState {
    fn default() -> Self {
        Self {
            category: CategoryFilter::All,
            search: String::new(),
            sort: SortKey::Featured,
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl FilterState {
    /// Default state with a custom page size (at least 1).
    pub fn with_page_size(page_size: u32) -> Self {
        Self {
            page_size: page_size.max(1),
            ..Self::default()
        }
    }

    /// Apply an action, returning the next state.
    ///
    /// Every action other than [`FilterAction::LoadMore`] resets the page to
    /// 1. `LoadMore` always advances; the view decides whether there is
    /// anything left to reveal.
    pub fn apply(mut self, action: FilterAction) -> Self {
        match action {
            FilterAction::SetCategory(category) => self.category = category,
            FilterAction::SetSearch(text) => self.search = normalize_search(&text),
            FilterAction::ClearSearch => self.search.clear(),
            FilterAction::SetSort(sort) => self.sort = sort,
            FilterAction::RemoveCategory => self.category = CategoryFilter::All,
            FilterAction::ClearAll => {
                self.category = CategoryFilter::All;
                self.search.clear();
                self.sort = SortKey::Featured;
            }
            FilterAction::LoadMore => {
                self.page = self.page.saturating_add(1);
                return self;
            }
        }
        self.page = 1;
        self
    }

    /// Whether `product` passes both the category and the search filter.
    pub fn matches(&self, product: &Product) -> bool {
        self.category.matches(product) && product.matches_search(&self.search)
    }

    /// Number of items revealed at the current page.
    pub fn revealed(&self) -> usize {
        (self.page as usize).saturating_mul(self.page_size as usize)
    }

    /// Restore state from a query string such as `?category=men&sort=rating`.
    ///
    /// Unknown category or sort values are ignored. Only the first
    /// occurrence of each key counts.
    pub fn from_query(query: &str) -> Self {
        let mut state = Self::default();
        let query = query.strip_prefix('?').unwrap_or(query);
        let pairs: Vec<(String, String)> = form_urlencoded::parse(query.as_bytes())
            .into_owned()
            .collect();
        let first = |key: &str| pairs.iter().find(|(k, _)| k == key).map(|(_, v)| v.as_str());

        if let Some(category) = first("category").and_then(CategoryFilter::from_slug) {
            state.category = category;
        }
        if let Some(search) = first("search") {
            state.search = normalize_search(search);
        }
        if let Some(sort) = first("sort").and_then(SortKey::from_slug) {
            state.sort = sort;
        }
        state
    }

    /// Query string for the current state, omitting defaults. Empty when
    /// everything is at its default.
    pub fn to_query(&self) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        if self.category != CategoryFilter::All {
            serializer.append_pair("category", self.category.slug());
        }
        if !self.search.is_empty() {
            serializer.append_pair("search", &self.search);
        }
        if self.sort != SortKey::Featured {
            serializer.append_pair("sort", self.sort.slug());
        }
        serializer.finish()
    }

    /// Relative URL to put in the history entry.
    pub fn location(&self) -> String {
        let query = self.to_query();
        if query.is_empty() {
            PRODUCTS_PAGE.to_string()
        } else {
            format!("{}?{}", PRODUCTS_PAGE, query)
        }
    }
}

/// Read the `id` parameter of a detail page URL query.
pub fn product_id_from_query(query: &str) -> Option<ProductId> {
    let query = query.strip_prefix('?').unwrap_or(query);
    form_urlencoded::parse(query.as_bytes())
        .find(|(key, _)| key == "id")
        .and_then(|(_, value)| value.parse().ok())
}

fn normalize_search(text: &str) -> String {
    text.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_changes_reset_page() {
        let state = FilterState::default()
            .apply(FilterAction::LoadMore)
            .apply(FilterAction::LoadMore);
        assert_eq!(state.page, 3);

        let state = state.apply(FilterAction::SetCategory(Category::Women.into()));
        assert_eq!(state.page, 1);

        let state = state
            .apply(FilterAction::LoadMore)
            .apply(FilterAction::SetSort(SortKey::Rating));
        assert_eq!(state.page, 1);
    }

    #[test]
    fn test_search_normalized() {
        let state = FilterState::default().apply(FilterAction::SetSearch("  Linen DRESS ".into()));
        assert_eq!(state.search, "linen dress");
        assert_eq!(state.apply(FilterAction::ClearSearch).search, "");
    }

    #[test]
    fn test_clear_all_keeps_page_size() {
        let state = FilterState::with_page_size(6)
            .apply(FilterAction::SetCategory(Category::Men.into()))
            .apply(FilterAction::SetSearch("tee".into()))
            .apply(FilterAction::SetSort(SortKey::PriceHigh))
            .apply(FilterAction::ClearAll);
        assert_eq!(state, FilterState::with_page_size(6));
    }

    #[test]
    fn test_from_query_allow_list() {
        let state = FilterState::from_query("?category=women&search=Linen&sort=price-high");
        assert_eq!(state.category, CategoryFilter::Only(Category::Women));
        assert_eq!(state.search, "linen");
        assert_eq!(state.sort, SortKey::PriceHigh);

        let state = FilterState::from_query("category=kids&sort=cheapest");
        assert_eq!(state, FilterState::default());
    }

    #[test]
    fn test_from_query_decodes() {
        let state = FilterState::from_query("search=white+tee&search=ignored");
        assert_eq!(state.search, "white tee");
    }

    #[test]
    fn test_to_query_omits_defaults() {
        assert_eq!(FilterState::default().to_query(), "");
        assert_eq!(FilterState::default().location(), "products.html");

        let state = FilterState::default()
            .apply(FilterAction::SetCategory(Category::Men.into()))
            .apply(FilterAction::SetSearch("slim fit".into()));
        assert_eq!(state.to_query(), "category=men&search=slim+fit");
        assert_eq!(state.location(), "products.html?category=men&search=slim+fit");
    }

    #[test]
    fn test_query_roundtrip() {
        let state = FilterState::default()
            .apply(FilterAction::SetCategory(Category::Accessories.into()))
            .apply(FilterAction::SetSort(SortKey::Newest));
        assert_eq!(FilterState::from_query(&state.to_query()), state);
    }

    #[test]
    fn test_product_id_from_query() {
        assert_eq!(product_id_from_query("?id=7"), Some(ProductId::new(7)));
        assert_eq!(product_id_from_query("ref=home&id=12"), Some(ProductId::new(12)));
        assert_eq!(product_id_from_query("id=abc"), None);
        assert_eq!(product_id_from_query(""), None);
    }
}
