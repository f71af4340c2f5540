//! Catalog browsing.

use std::time::Duration;

use anyhow::Result;
use tim_commerce::search::{
    CatalogView, CategoryFilter, Debouncer, FilterAction, FilterState, SortKey, ViewStatus,
};
use tim_commerce::timer::Timestamp;
use tim_storefront::render_products_page;

use super::CatalogArgs;
use crate::context::Context;
use crate::output::{badge_label, stars};

/// Simulated gap between keystrokes when typing the search text.
const KEYSTROKE_INTERVAL: Duration = Duration::from_millis(80);

/// Run the catalog command.
pub async fn run(args: CatalogArgs, ctx: &Context) -> Result<()> {
    let mut state = match args.query.as_deref() {
        Some(query) => FilterState::from_query(query),
        None => FilterState::default(),
    };
    state.page_size = ctx.config.catalog.page_size.max(1);

    let mut view = CatalogView::new(ctx.catalog(), state);

    if let Some(category) = args.category.as_deref() {
        let category: CategoryFilter = category.parse()?;
        view.dispatch(FilterAction::SetCategory(category));
    }
    if let Some(sort) = args.sort.as_deref() {
        let sort: SortKey = sort.parse()?;
        view.dispatch(FilterAction::SetSort(sort));
    }
    if let Some(text) = args.search.as_deref() {
        if let Some(term) = type_search(text, ctx) {
            view.dispatch(FilterAction::SetSearch(term));
        }
    }
    for _ in 0..args.more {
        if view.load_more().is_none() {
            ctx.output.debug("Nothing more to load");
            break;
        }
    }

    if args.html {
        ctx.output.raw(&render_products_page(&view));
        return Ok(());
    }

    let (showing, total) = view.results_info();

    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({
            "location": view.state().location(),
            "showing": showing,
            "total": total,
            "has_more": view.has_more(),
            "products": view.displayed(),
        }));
        return Ok(());
    }

    ctx.output.header("Products");

    if view.status() == ViewStatus::NoResults {
        ctx.output.warn("No products found. Try adjusting your search or filter criteria.");
        return Ok(());
    }

    let widths = [4, 32, 12, 14, 10, 6];
    ctx.output.table_row(&["ID", "Name", "Category", "Price", "Rating", ""], &widths);
    for product in view.displayed() {
        let price = ctx.format_price(&product.price);
        let rating = stars(product.rating);
        let badge = badge_label(product);
        ctx.output.table_row(
            &[
                &product.id.to_string(),
                &product.name,
                product.category.label(),
                &price,
                &rating,
                &badge,
            ],
            &widths,
        );
    }

    ctx.output.info("");
    ctx.output.info(&format!("Showing {} of {} products", showing, total));
    for chip in view.active_filters() {
        ctx.output.list_item(&chip.label);
    }
    if view.has_more() {
        ctx.output.info("More products available (use --more)");
    }
    ctx.output.kv("URL", &view.state().location());

    Ok(())
}

/// Feed `text` through the search debouncer one keystroke at a time and
/// return what would be applied once typing stops.
fn type_search(text: &str, ctx: &Context) -> Option<String> {
    let delay = Duration::from_millis(ctx.config.search.debounce_ms);
    let mut debouncer = Debouncer::new(delay);
    let mut at = Timestamp::now();
    let mut typed = String::new();
    let mut keystrokes = 0;

    for c in text.chars() {
        typed.push(c);
        debouncer.push(typed.clone(), at);
        at = at + KEYSTROKE_INTERVAL;
        keystrokes += 1;
    }

    let applied = debouncer.poll(at + delay);
    ctx.logger
        .debug_builder("search applied")
        .field_i64("keystrokes", keystrokes)
        .duration_ms("debounce", delay)
        .emit();
    applied
}
