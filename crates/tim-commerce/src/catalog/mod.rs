//! Product catalog module.
//!
//! Contains the product record, the fixed new-arrivals list, the seedable
//! catalog generator and the registry pages publish their products to.

mod category;
mod fixtures;
mod generator;
mod product;
mod registry;

pub use category::Category;
pub use fixtures::new_arrivals;
pub use generator::CatalogGenerator;
pub use product::{Badge, Product};
pub use registry::ProductRegistry;
