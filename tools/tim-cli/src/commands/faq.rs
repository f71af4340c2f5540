//! FAQ browsing.

use anyhow::{bail, Result};
use console::style;
use serde::Serialize;
use tim_commerce::faq::{default_entries, FaqAction, FaqState, ALL_CATEGORIES};
use tim_storefront::render_faq;

use super::FaqArgs;
use crate::context::Context;

/// Run the faq command.
pub async fn run(args: FaqArgs, ctx: &Context) -> Result<()> {
    let mut state = FaqState::new(default_entries()).with_logger(ctx.logger.clone());

    let category = args.category.trim().to_lowercase();
    if category != ALL_CATEGORIES && !state.categories().contains(&category.as_str()) {
        bail!(
            "Unknown FAQ category {:?} (expected one of: all, {})",
            args.category,
            state.categories().join(", ")
        );
    }
    state.apply(FaqAction::SetCategory(category));

    if let Some(search) = args.search {
        state.apply(FaqAction::SetSearch(search));
    }

    if let Some(position) = args.open {
        open_position(&mut state, position)?;
    }

    if args.html {
        ctx.output.raw(&render_faq(&state));
        return Ok(());
    }

    if ctx.output.is_json() {
        ctx.output.json(&listings(&state));
        return Ok(());
    }

    ctx.output.header("Frequently Asked Questions");

    if state.no_results() {
        ctx.output
            .warn("No questions match your search. Try different keywords or browse all categories.");
        return Ok(());
    }

    for listing in listings(&state) {
        let marker = if listing.open { "▾" } else { "▸" };
        println!(
            "  {} {} {}",
            style(listing.position).dim(),
            marker,
            style(listing.question).bold()
        );
        if listing.open {
            println!("      {}", listing.answer);
        }
    }

    Ok(())
}

/// A shown question, numbered the way `--open` counts.
#[derive(Debug, Serialize)]
struct Listing<'a> {
    position: usize,
    category: &'a str,
    question: &'a str,
    answer: &'a str,
    open: bool,
}

fn listings(state: &FaqState) -> Vec<Listing<'_>> {
    state
        .visible_indices()
        .into_iter()
        .filter_map(|i| state.items().get(i))
        .enumerate()
        .map(|(n, item)| Listing {
            position: n + 1,
            category: &item.category,
            question: &item.question,
            answer: &item.answer,
            open: item.is_open,
        })
        .collect()
}

/// Open the question at 1-based `position` among those shown.
fn open_position(state: &mut FaqState, position: usize) -> Result<()> {
    let visible = state.visible_indices();
    let Some(&index) = position.checked_sub(1).and_then(|i| visible.get(i)) else {
        bail!(
            "No question at position {} ({} shown)",
            position,
            visible.len()
        );
    };
    if state.open_index() != Some(index) {
        state.apply(FaqAction::Toggle(index));
    }
    Ok(())
}
