//! Shared markup helpers.

/// Escape text for use in element content or a quoted attribute.
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Five stars: `floor(rating)` full, one half star when the fraction is at
/// least .5, the rest empty. Out-of-range ratings are clamped.
pub fn render_stars(rating: f64) -> String {
    let rating = if rating.is_nan() { 0.0 } else { rating.clamp(0.0, 5.0) };
    let full = rating.floor() as usize;
    let half = full < 5 && rating.fract() >= 0.5;
    let empty = 5 - full - usize::from(half);

    let mut html = String::with_capacity(200);
    for _ in 0..full {
        html.push_str(r#"<span class="star">★</span>"#);
    }
    if half {
        html.push_str(r#"<span class="star half">★</span>"#);
    }
    for _ in 0..empty {
        html.push_str(r#"<span class="star empty">★</span>"#);
    }
    html
}

#[cfg(test)]
mod tests {
    use super::*;

    fn count(html: &str, class: &str) -> usize {
        html.matches(&format!("class=\"{}\"", class)).count()
    }

    #[test]
    fn test_stars_half_rule() {
        let html = render_stars(4.5);
        assert_eq!(count(&html, "star"), 4);
        assert_eq!(count(&html, "star half"), 1);
        assert_eq!(count(&html, "star empty"), 0);

        let html = render_stars(4.3);
        assert_eq!(count(&html, "star"), 4);
        assert_eq!(count(&html, "star empty"), 1);
    }

    #[test]
    fn test_stars_clamped() {
        assert_eq!(count(&render_stars(7.0), "star"), 5);
        assert_eq!(count(&render_stars(-1.0), "star empty"), 5);
        assert_eq!(count(&render_stars(f64::NAN), "star empty"), 5);
    }

    #[test]
    fn test_escape() {
        assert_eq!(
            html_escape(r#"<a href="x">Tim's & co</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tim&#39;s &amp; co&lt;/a&gt;"
        );
    }
}
