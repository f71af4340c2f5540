//! Product detail lookup.

use std::time::Duration;

use anyhow::Result;
use tim_commerce::card::QuickView;
use tim_commerce::catalog::ProductRegistry;
use tim_commerce::lookup::resolve_product;
use tim_commerce::timer::Sleeper;
use tim_storefront::render_quick_view;

use super::ProductArgs;
use crate::context::Context;
use crate::output::stars;
use crate::sleeper::TokioSleeper;

/// Run the product command.
///
/// The catalog is published to the registry after `--publish-delay-ms`
/// while the lookup polls for it, the same race the detail page runs
/// against the listing script.
pub async fn run(args: ProductArgs, ctx: &Context) -> Result<()> {
    let registry = ProductRegistry::new();
    let query = detail_query(&args.id);
    let policy = ctx.config.lookup_policy();
    let sleeper = TokioSleeper;

    let publish = async {
        sleeper
            .sleep(Duration::from_millis(args.publish_delay_ms))
            .await;
        registry.publish(ctx.catalog());
        ctx.output.debug("Catalog published");
    };

    let spinner = ctx.output.spinner("Looking up product...");
    let (_, resolved) = tokio::join!(
        publish,
        resolve_product(&registry, &query, &policy, &sleeper)
    );
    spinner.finish_and_clear();

    let product = resolved?;
    let view = QuickView::from_product(&product);

    if args.html {
        ctx.output.raw(&render_quick_view(&view));
        return Ok(());
    }

    if ctx.output.is_json() {
        ctx.output.json(&product);
        return Ok(());
    }

    ctx.output.header(&view.name);
    ctx.output.kv("SKU", &view.sku);
    ctx.output.kv("Category", &view.category_label);
    ctx.output.kv("Price", &ctx.format_price(&view.price));
    if let Some(original) = &view.original_price {
        ctx.output.kv("Was", &ctx.format_price(original));
    }
    if let Some(discount) = view.discount_percent {
        ctx.output.kv("Discount", &format!("-{}%", discount));
    }
    ctx.output.kv(
        "Rating",
        &format!("{} ({} reviews)", stars(view.rating), view.review_count),
    );
    if let Some(badge) = view.badge {
        ctx.output.kv("Badge", badge.label());
    }
    if !product.in_stock {
        ctx.output.warn("Out of stock");
    }
    if !view.description.is_empty() {
        ctx.output.info(&view.description);
    }

    Ok(())
}

/// Accept a bare id (`7`) as well as a detail page query (`?id=7`).
fn detail_query(input: &str) -> String {
    let input = input.trim();
    if input.contains('=') {
        input.to_string()
    } else {
        format!("?id={}", input)
    }
}
