//! Store hours and open/closed status.

use anyhow::{Context as _, Result};
use chrono::NaiveDateTime;
use console::style;
use tim_storefront::{render_hours, render_store_status};

use super::HoursArgs;
use crate::context::Context;

const AT_FORMAT: &str = "%Y-%m-%dT%H:%M";

/// Run the hours command.
pub async fn run(args: HoursArgs, ctx: &Context) -> Result<()> {
    let now = match args.at.as_deref() {
        Some(at) => NaiveDateTime::parse_from_str(at.trim(), AT_FORMAT)
            .with_context(|| format!("Invalid --at {:?}, expected e.g. 2024-06-03T18:30", at))?,
        None => chrono::Local::now().naive_local(),
    };

    let hours = &ctx.config.hours;
    let status = hours.status_at(now);

    if args.html {
        ctx.output.raw(&render_store_status(&status));
        ctx.output.raw(&render_hours(hours));
        return Ok(());
    }

    if ctx.output.is_json() {
        let schedule: Vec<_> = hours
            .schedule()
            .into_iter()
            .map(|(day, window)| {
                serde_json::json!({
                    "day": day.to_string(),
                    "hours": window,
                })
            })
            .collect();
        ctx.output.json(&serde_json::json!({
            "at": now.format(AT_FORMAT).to_string(),
            "open": status.is_open(),
            "message": status.message(),
            "schedule": schedule,
        }));
        return Ok(());
    }

    if status.is_open() {
        println!("  {} {}", style("●").green(), status);
    } else {
        println!("  {} {}", style("●").red(), status);
    }

    ctx.output.header("Opening hours");
    for (day, window) in hours.schedule() {
        let text = match window {
            Some(window) => window.to_string(),
            None => "Closed".to_string(),
        };
        ctx.output.kv(&day.to_string(), &text);
    }

    Ok(())
}
