//! HTML renderers for the Tim Clothing storefront.
//!
//! Each page section is a plain function from `tim-commerce` state to an
//! HTML fragment, so a browser shell can swap fragments in and tests can
//! assert on them without a DOM:
//!
//! - Product grid with results info, active filter chips and "load more"
//! - Product cards and the quick view modal
//! - FAQ accordion
//! - Newsletter signup
//! - Contact page store status and opening hours
//! - Header cart badge

mod badge;
mod html;
pub mod sections;

pub use badge::HeaderBadge;
pub use html::{html_escape, render_stars};
pub use sections::*;
