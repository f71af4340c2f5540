//! Products page grid, filter bar and "load more".

use std::ops::Range;

use tim_commerce::card::ProductCard;
use tim_commerce::catalog::{Category, Product};
use tim_commerce::search::{ActiveFilterKind, CatalogView, CategoryFilter, SortKey, ViewStatus};
use tim_commerce::timer::Timestamp;

use crate::html::html_escape;
use crate::sections::render_product_card;

/// Render the full results area for the current view state.
pub fn render_catalog_view(view: &CatalogView) -> String {
    let body = match view.status() {
        ViewStatus::Results => render_product_grid(view.displayed()),
        ViewStatus::NoResults => render_no_results(),
    };

    format!(
        r#"<section class="products-section" data-section="results">
    {info}
    {filters}
    {body}
    {load_more}
</section>"#,
        info = render_results_info(view),
        filters = render_active_filters(view),
        body = body,
        load_more = render_load_more(view),
    )
}

/// The products page body: filter bar with category buttons and sort
/// select, then the results area.
pub fn render_products_page(view: &CatalogView) -> String {
    let state = view.state();
    format!(
        r#"<div class="products-toolbar">
    {categories}
    {sort}
</div>
{results}"#,
        categories = render_category_filters(state.category),
        sort = render_sort_select(state.sort),
        results = render_catalog_view(view),
    )
}

/// Render a grid of fresh cards.
pub fn render_product_grid(products: &[Product]) -> String {
    let cards: String = render_cards(products);
    format!(
        r#"<div class="products-grid" id="products-grid">
{}
</div>"#,
        cards
    )
}

/// Cards for the products newly revealed by "load more".
pub fn render_appended(view: &CatalogView, range: Range<usize>) -> String {
    view.filtered()
        .get(range)
        .map(render_cards)
        .unwrap_or_default()
}

fn render_cards(products: &[Product]) -> String {
    // Fresh cards have no confirmation pending, so the time is irrelevant.
    let now = Timestamp::default();
    products
        .iter()
        .map(|p| render_product_card(&ProductCard::new(p.clone()), now))
        .collect::<Vec<_>>()
        .join("\n")
}

/// The "Showing X of Y products" line.
pub fn render_results_info(view: &CatalogView) -> String {
    let (showing, total) = view.results_info();
    format!(
        r#"<div class="results-info">Showing <span id="showing-count">{}</span> of <span id="total-count">{}</span> products</div>"#,
        group_thousands(showing),
        group_thousands(total)
    )
}

/// Removable chips for the active category and search.
pub fn render_active_filters(view: &CatalogView) -> String {
    let chips: String = view
        .active_filters()
        .iter()
        .map(|chip| {
            let kind = match chip.kind {
                ActiveFilterKind::Category => "category",
                ActiveFilterKind::Search => "search",
            };
            format!(
                r#"<div class="active-filter"><span>{}</span><button class="active-filter-remove" data-type="{}" data-value="{}" aria-label="Remove filter">×</button></div>"#,
                html_escape(&chip.label),
                kind,
                html_escape(&chip.value)
            )
        })
        .collect();
    format!(r#"<div class="active-filters" id="active-filters">{}</div>"#, chips)
}

/// Category buttons with the selected one marked active.
pub fn render_category_filters(selected: CategoryFilter) -> String {
    let mut buttons = vec![filter_button("all", "All", selected == CategoryFilter::All)];
    for category in Category::ALL {
        buttons.push(filter_button(
            category.slug(),
            category.label(),
            selected == CategoryFilter::Only(category),
        ));
    }
    format!(r#"<div class="filter-buttons">{}</div>"#, buttons.join(""))
}

fn filter_button(value: &str, label: &str, active: bool) -> String {
    format!(
        r#"<button class="filter-btn{}" data-filter="{}">{}</button>"#,
        if active { " active" } else { "" },
        value,
        html_escape(label)
    )
}

/// Sort dropdown with the current key selected.
pub fn render_sort_select(selected: SortKey) -> String {
    let options: String = SortKey::ALL
        .iter()
        .map(|key| {
            format!(
                r#"<option value="{}"{}>{}</option>"#,
                key.slug(),
                if *key == selected { " selected" } else { "" },
                key.display_name()
            )
        })
        .collect();
    format!(r#"<select id="sort-select" class="sort-select">{}</select>"#, options)
}

fn render_no_results() -> String {
    r#"<div class="no-results" id="no-results">
    <h3>No products found</h3>
    <p>Try adjusting your search or filter criteria.</p>
    <button class="clear-filters-btn">Clear all filters</button>
</div>"#
        .to_string()
}

fn render_load_more(view: &CatalogView) -> String {
    if view.has_more() {
        return r#"<button class="load-more-btn" id="load-more-btn">Load More Products</button>"#
            .to_string();
    }
    let page_size = view.state().page_size as usize;
    if view.status() == ViewStatus::Results && view.filtered().len() > page_size {
        return r#"<button class="load-more-btn" id="load-more-btn" disabled hidden>All products loaded</button>"#
            .to_string();
    }
    String::new()
}

fn group_thousands(n: usize) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use tim_commerce::catalog::{new_arrivals, CatalogGenerator};
    use tim_commerce::search::{FilterAction, FilterState, ViewUpdate};

    fn generated(count: u32) -> CatalogView {
        CatalogView::new(CatalogGenerator::seeded(9).generate(count), FilterState::default())
    }

    #[test]
    fn test_grid_first_page() {
        let view = generated(30);
        let html = render_catalog_view(&view);
        assert_eq!(html.matches(r#"class="product-card""#).count(), 12);
        assert!(html.contains(r#"<span id="showing-count">12</span> of <span id="total-count">30</span>"#));
        assert!(html.contains("Load More Products"));
        assert!(!html.contains("no-results"));
    }

    #[test]
    fn test_load_more_appends_only_new_cards() {
        let mut view = generated(30);
        let range = match view.dispatch(FilterAction::LoadMore) {
            ViewUpdate::Appended(range) => range,
            other => panic!("unexpected update {:?}", other),
        };
        let html = render_appended(&view, range);
        assert_eq!(html.matches(r#"class="product-card""#).count(), 12);
        assert!(html.contains(r#"data-product-id="13""#));

        view.dispatch(FilterAction::LoadMore);
        let html = render_catalog_view(&view);
        assert!(html.contains("All products loaded"));
    }

    #[test]
    fn test_no_results_state() {
        let mut view = CatalogView::new(new_arrivals(), FilterState::default());
        view.dispatch(FilterAction::SetSearch("ballgown".into()));
        let html = render_catalog_view(&view);
        assert!(html.contains("No products found"));
        assert!(!html.contains("product-card"));
        assert!(!html.contains("load-more-btn"));
        assert!(html.contains(r#"Search: &quot;ballgown&quot;"#));
    }

    #[test]
    fn test_filter_controls() {
        let html = render_category_filters(CategoryFilter::Only(Category::Women));
        assert!(html.contains(r#"<button class="filter-btn active" data-filter="women">Women&#39;s</button>"#));
        assert!(html.contains(r#"<button class="filter-btn" data-filter="all">All</button>"#));

        let html = render_sort_select(SortKey::Rating);
        assert!(html.contains(r#"<option value="rating" selected>Highest Rated</option>"#));
    }

    #[test]
    fn test_products_page_toolbar_before_results() {
        let view = CatalogView::new(new_arrivals(), FilterState::from_query("?category=men&sort=price-low"));
        let html = render_products_page(&view);
        assert!(html.contains(r#"<button class="filter-btn active" data-filter="men">"#));
        assert!(html.contains(r#"<option value="price-low" selected>"#));
        let toolbar = html.find("products-toolbar").unwrap();
        let first_card = html.find(r#"class="product-card""#).unwrap();
        assert!(toolbar < first_card);
    }

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands(7), "7");
        assert_eq!(group_thousands(1234), "1,234");
        assert_eq!(group_thousands(1234567), "1,234,567");
    }
}
