//! Product categories.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::CommerceError;

/// The department a product is listed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Men,
    Women,
    Accessories,
}

impl Category {
    /// All categories in storefront order.
    pub const ALL: [Category; 3] = [Category::Men, Category::Women, Category::Accessories];

    /// URL-friendly slug (`men`, `women`, `accessories`).
    pub fn slug(&self) -> &'static str {
        match self {
            Category::Men => "men",
            Category::Women => "women",
            Category::Accessories => "accessories",
        }
    }

    /// Display label (`Men's`, `Women's`, `Accessories`).
    pub fn label(&self) -> &'static str {
        match self {
            Category::Men => "Men's",
            Category::Women => "Women's",
            Category::Accessories => "Accessories",
        }
    }

    /// Parse a slug, ignoring case and surrounding whitespace.
    pub fn from_slug(slug: &str) -> Option<Self> {
        match slug.trim().to_lowercase().as_str() {
            "men" => Some(Category::Men),
            "women" => Some(Category::Women),
            "accessories" => Some(Category::Accessories),
            _ => None,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for Category {
    type Err = CommerceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::from_slug(s).ok_or_else(|| CommerceError::UnknownCategory(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slug_roundtrip() {
        for category in Category::ALL {
            assert_eq!(category.slug().parse::<Category>().unwrap(), category);
        }
    }

    #[test]
    fn test_labels() {
        assert_eq!(Category::Men.label(), "Men's");
        assert_eq!(Category::Accessories.label(), "Accessories");
    }

    #[test]
    fn test_unknown_slug() {
        assert!(matches!(
            "kids".parse::<Category>(),
            Err(CommerceError::UnknownCategory(_))
        ));
    }
}
