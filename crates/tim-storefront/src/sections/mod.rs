//! Section renderers.

mod card;
mod contact;
mod faq;
mod grid;
mod newsletter;
mod quick_view;

pub use card::*;
pub use contact::*;
pub use faq::*;
pub use grid::*;
pub use newsletter::*;
pub use quick_view::*;
