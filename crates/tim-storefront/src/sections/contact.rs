//! Contact page store status and opening hours.

use tim_commerce::contact::{BusinessHours, StoreStatus};

/// The open/closed indicator.
pub fn render_store_status(status: &StoreStatus) -> String {
    let class = if status.is_open() { "open" } else { "closed" };
    format!(
        r#"<div class="store-status {class}"><span class="status-dot"></span><span class="status-text">{text}</span></div>"#,
        class = class,
        text = status.message(),
    )
}

/// The weekly hours table.
pub fn render_hours(hours: &BusinessHours) -> String {
    let rows: String = hours
        .schedule()
        .iter()
        .map(|(day, window)| {
            let value = match window {
                Some(window) => window.to_string(),
                None => "Closed".to_string(),
            };
            format!(r#"<li><span class="day">{}</span><span class="hours">{}</span></li>"#, day, value)
        })
        .collect();
    format!(r#"<ul class="business-hours">{}</ul>"#, rows)
}
