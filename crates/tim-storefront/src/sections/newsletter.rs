//! Newsletter signup section.

use tim_commerce::newsletter::{NewsletterForm, NewsletterStatus};

use crate::html::html_escape;

/// Render the signup form with its inline message.
pub fn render_newsletter(form: &NewsletterForm) -> String {
    let message = match form.status() {
        NewsletterStatus::Idle => String::new(),
        status => {
            let class = match status {
                NewsletterStatus::Succeeded(_) => "success",
                NewsletterStatus::Failed(_) => "error",
                _ => "info",
            };
            format!(
                r#"<div class="newsletter-message {}" role="status">{}</div>"#,
                class,
                html_escape(status.message().unwrap_or_default())
            )
        }
    };

    format!(
        r#"<section class="newsletter-section" data-section="newsletter">
    <h2>Stay in Style</h2>
    <p>Subscribe for new arrivals, exclusive offers and style tips.</p>
    <form class="newsletter-form" novalidate>
        <input type="email" name="email" placeholder="Enter your email" value="{email}" required>
        <button type="submit"{disabled}>{label}</button>
    </form>
    {message}
</section>"#,
        email = html_escape(form.email()),
        disabled = if form.is_busy() { " disabled" } else { "" },
        label = if form.is_busy() { "Subscribing..." } else { "Subscribe" },
        message = message,
    )
}
