//! Cart commands.

use std::rc::Rc;

use anyhow::Result;
use tim_commerce::cart::LineItem;
use tim_commerce::{CommerceError, ProductId};
use tim_storefront::HeaderBadge;

use super::{CartArgs, CartCommand};
use crate::context::Context;

/// Run the cart command.
pub async fn run(args: CartArgs, ctx: &Context) -> Result<()> {
    match args.command {
        CartCommand::Add { id, qty } => add(ProductId::new(id), qty, ctx),
        CartCommand::Show => show(ctx),
    }
}

fn add(id: ProductId, qty: u32, ctx: &Context) -> Result<()> {
    let product = ctx
        .catalog()
        .into_iter()
        .find(|p| p.id == id)
        .ok_or(CommerceError::ProductNotFound(id))?;

    let badge = Rc::new(HeaderBadge::new());
    let cart = ctx.cart()?.with_badge(badge.clone());
    let lines = cart.add(LineItem::from_product(&product, qty))?;

    if ctx.output.is_json() {
        ctx.output.json(&lines);
        return Ok(());
    }

    ctx.output.success(&format!("Added {} x {} to cart", qty, product.name));
    ctx.output.kv("Items in cart", &badge.count().to_string());
    Ok(())
}

fn show(ctx: &Context) -> Result<()> {
    let badge = Rc::new(HeaderBadge::new());
    let cart = ctx.cart()?.with_badge(badge.clone());
    cart.sync_badge();
    let lines = cart.get();
    let subtotal = cart.subtotal()?;

    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({
            "lines": lines,
            "total_quantity": badge.count(),
            "subtotal": subtotal.to_decimal(),
        }));
        return Ok(());
    }

    ctx.output.header("Cart");

    if lines.is_empty() {
        ctx.output.info("Your cart is empty");
        return Ok(());
    }

    let widths = [4, 32, 6, 14, 14];
    ctx.output
        .table_row(&["ID", "Name", "Qty", "Price", "Total"], &widths);
    for line in &lines {
        ctx.output.table_row(
            &[
                &line.id.to_string(),
                &line.name,
                &line.qty.to_string(),
                &ctx.format_price(&line.price),
                &ctx.format_price(&line.line_total()),
            ],
            &widths,
        );
    }

    ctx.output.info("");
    ctx.output.kv("Subtotal", &ctx.format_price(&subtotal));
    ctx.output.kv("Badge", &badge.render());
    Ok(())
}
