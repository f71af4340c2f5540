//! Procedural catalog for the products page.
//!
//! Cycles twelve name/category/image templates and randomizes price,
//! discount, rating, review count, badge and stock. Seeded generators are
//! reproducible; [`CatalogGenerator::for_page_load`] seeds from the load
//! time so each visit sees a fresh catalog.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::catalog::product::clamp_rating;
use crate::catalog::{Badge, Category, Product};
use crate::ids::ProductId;
use crate::money::Money;
use crate::timer::Timestamp;

struct Template {
    name: &'static str,
    category: Category,
    image: &'static str,
}

const TEMPLATES: [Template; 12] = [
    Template { name: "Mufulira Classic White Tee", category: Category::Men, image: "https://images.unsplash.com/photo-1521572163474-6864f9cf17ab?ixlib=rb-4.0.3&auto=format&fit=crop&w=800&q=80" },
    Template { name: "Lusaka Linen Summer Dress", category: Category::Women, image: "https://images.unsplash.com/photo-1541099649105-f69ad21f3246?ixlib=rb-4.0.3&auto=format&fit=crop&w=800&q=80" },
    Template { name: "Zambezi Leather Strap Watch", category: Category::Accessories, image: "https://images.unsplash.com/photo-1519744792095-2f2205e87b6f?ixlib=rb-4.0.3&auto=format&fit=crop&w=800&q=80" },
    Template { name: "Copperbelt Slim Denim", category: Category::Men, image: "https://images.unsplash.com/photo-1541099649105-16a7b67d2f7c?ixlib=rb-4.0.3&auto=format&fit=crop&w=800&q=80" },
    Template { name: "Tropical Knit Sweater", category: Category::Women, image: "https://images.unsplash.com/photo-1520975919074-6c3a4d5d0b12?ixlib=rb-4.0.3&auto=format&fit=crop&w=800&q=80" },
    Template { name: "Sable Polarized Sunglasses", category: Category::Accessories, image: "https://images.unsplash.com/photo-1503341455253-b2e723bb3dbb?ixlib=rb-4.0.3&auto=format&fit=crop&w=800&q=80" },
    Template { name: "Kabwe Tailored Blazer", category: Category::Men, image: "https://images.unsplash.com/photo-1541099649105-19f2a3d1f60b?ixlib=rb-4.0.3&auto=format&fit=crop&w=800&q=80" },
    Template { name: "Victoria Maxi Skirt", category: Category::Women, image: "https://images.unsplash.com/photo-1520975919074-4f3c9dbae2d1?ixlib=rb-4.0.3&auto=format&fit=crop&w=800&q=80" },
    Template { name: "Nomad Canvas Backpack", category: Category::Accessories, image: "https://images.unsplash.com/photo-1511988617509-a57c8a288659?ixlib=rb-4.0.3&auto=format&fit=crop&w=800&q=80" },
    Template { name: "Choma Polo Shirt", category: Category::Men, image: "https://images.unsplash.com/photo-1541099649105-3dfb1b51c9d6?ixlib=rb-4.0.3&auto=format&fit=crop&w=800&q=80" },
    Template { name: "Kafue Wrap Top", category: Category::Women, image: "https://images.unsplash.com/photo-1541099649105-3dfb1b51c9d6?ixlib=rb-4.0.3&auto=format&fit=crop&w=800&q=80" },
    Template { name: "Safari Leather Belt", category: Category::Accessories, image: "https://images.unsplash.com/photo-1519744792095-2f2205e87b6f?ixlib=rb-4.0.3&auto=format&fit=crop&w=800&q=80" },
];

/// Probability that a generated product is discounted.
pub const DISCOUNT_PROBABILITY: f64 = 0.4;
/// Probability that a generated product carries a badge.
pub const BADGE_PROBABILITY: f64 = 0.2;
/// Probability that a generated product is in stock.
pub const IN_STOCK_PROBABILITY: f64 = 0.95;

/// Random product generator.
pub struct CatalogGenerator {
    rng: StdRng,
}

impl CatalogGenerator {
    /// A reproducible generator.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// A generator seeded from the page load time.
    pub fn for_page_load(loaded_at: Timestamp) -> Self {
        Self::seeded(loaded_at.as_millis())
    }

    /// Generate `count` products with ids `1..=count`.
    pub fn generate(&mut self, count: u32) -> Vec<Product> {
        (1..=count).map(|id| self.product(id)).collect()
    }

    fn product(&mut self, id: u32) -> Product {
        let rounds = TEMPLATES.len() as u32;
        let template = &TEMPLATES[(id % rounds) as usize];
        let rng = &mut self.rng;

        let base: i64 = rng.gen_range(20..100);
        let (price, original_price) = if rng.gen_bool(DISCOUNT_PROBABILITY) {
            let original = (base as f64 * (1.0 + rng.gen::<f64>() * 0.6)).round() as i64;
            let price = (original as f64 * (0.6 + rng.gen::<f64>() * 0.35)).round() as i64;
            // 0.95 * original rounds below original for every original >= 20
            (price.min(original - 1), Some(Money::kwacha(original)))
        } else {
            (base, None)
        };

        let rating = ((4.0 + rng.gen::<f64>()) * 10.0).round() / 10.0;
        let review_count = rng.gen_range(5..205);
        let badge = if rng.gen_bool(BADGE_PROBABILITY) {
            Some(if rng.gen_bool(0.5) { Badge::New } else { Badge::Sale })
        } else {
            None
        };
        let in_stock = rng.gen_bool(IN_STOCK_PROBABILITY);

        Product {
            id: ProductId::new(id),
            name: format!("{} {}", template.name, id / rounds + 1),
            category: template.category,
            price: Money::kwacha(price),
            original_price,
            image: template.image.to_string(),
            rating: clamp_rating(rating),
            review_count,
            badge,
            description: format!(
                "High-quality {} item \u{2014} {} crafted for style and comfort.",
                template.category.slug(),
                template.name
            ),
            in_stock,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_generate_length_and_ids() {
        let products = CatalogGenerator::seeded(1).generate(50);
        assert_eq!(products.len(), 50);
        let ids: Vec<u32> = products.iter().map(|p| p.id.get()).collect();
        assert_eq!(ids, (1..=50).collect::<Vec<_>>());
        assert_eq!(ids.iter().collect::<HashSet<_>>().len(), 50);
    }

    #[test]
    fn test_generated_fields_in_range() {
        for p in CatalogGenerator::seeded(7).generate(200) {
            assert!((4.0..=5.0).contains(&p.rating), "rating {}", p.rating);
            assert!((5..205).contains(&p.review_count));
            assert!(p.price.amount_cents > 0);
            if let Some(original) = p.original_price {
                assert!(original.amount_cents > p.price.amount_cents);
            } else {
                assert!((2000..10000).contains(&p.price.amount_cents));
            }
        }
    }

    #[test]
    fn test_template_cycling() {
        let products = CatalogGenerator::seeded(3).generate(13);
        assert_eq!(products[0].name, "Lusaka Linen Summer Dress 1");
        assert_eq!(products[10].name, "Safari Leather Belt 1");
        assert_eq!(products[11].name, "Mufulira Classic White Tee 2");
        assert_eq!(products[12].category, Category::Women);
        assert!(products[11].description.starts_with("High-quality men item"));
    }

    #[test]
    fn test_seeded_is_reproducible() {
        let a = CatalogGenerator::seeded(42).generate(30);
        let b = CatalogGenerator::seeded(42).generate(30);
        assert_eq!(a, b);
    }

    #[test]
    fn test_page_load_seed() {
        let loaded_at = Timestamp::from_millis(1_717_400_000_000);
        assert_eq!(
            CatalogGenerator::for_page_load(loaded_at).generate(12),
            CatalogGenerator::seeded(1_717_400_000_000).generate(12)
        );
        assert_ne!(
            CatalogGenerator::for_page_load(loaded_at).generate(12),
            CatalogGenerator::for_page_load(loaded_at + std::time::Duration::from_millis(1)).generate(12)
        );
    }

    #[test]
    fn test_zero_count() {
        assert!(CatalogGenerator::seeded(0).generate(0).is_empty());
    }
}
