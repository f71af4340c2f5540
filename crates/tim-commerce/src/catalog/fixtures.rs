//! The fixed "New Arrivals" list shown on the home page.

use crate::catalog::{Badge, Category, Product};
use crate::ids::ProductId;
use crate::money::Money;

const IMG_TEE: &str = "https://images.unsplash.com/photo-1521572163474-6864f9cf17ab?ixlib=rb-4.0.3&auto=format&fit=crop&w=800&q=80";
const IMG_DRESS: &str = "https://images.unsplash.com/photo-1541099649105-f69ad21f3246?ixlib=rb-4.0.3&auto=format&fit=crop&w=800&q=80";
const IMG_WATCH: &str = "https://images.unsplash.com/photo-1519744792095-2f2205e87b6f?ixlib=rb-4.0.3&auto=format&fit=crop&w=800&q=80";
const IMG_DENIM: &str = "https://images.unsplash.com/photo-1541099649105-f69ad21f3246?ixlib=rb-4.0.3&auto=format&fit=crop&w=900&q=80";
const IMG_SWEATER: &str = "https://images.unsplash.com/photo-1520975919074-6c3a4d5d0b12?ixlib=rb-4.0.3&auto=format&fit=crop&w=800&q=80";
const IMG_SUNGLASSES: &str = "https://images.unsplash.com/photo-1503341455253-b2e723bb3dbb?ixlib=rb-4.0.3&auto=format&fit=crop&w=800&q=80";
const IMG_BLAZER: &str = "https://images.unsplash.com/photo-1541099649105-16a7b67d2f7c?ixlib=rb-4.0.3&auto=format&fit=crop&w=800&q=80";
const IMG_SKIRT: &str = "https://images.unsplash.com/photo-1520975919074-4f3c9dbae2d1?ixlib=rb-4.0.3&auto=format&fit=crop&w=800&q=80";
const IMG_BACKPACK: &str = "https://images.unsplash.com/photo-1511988617509-a57c8a288659?ixlib=rb-4.0.3&auto=format&fit=crop&w=800&q=80";
const IMG_POLO: &str = "https://images.unsplash.com/photo-1541099649105-19f2a3d1f60b?ixlib=rb-4.0.3&auto=format&fit=crop&w=800&q=80";
const IMG_WRAP: &str = "https://images.unsplash.com/photo-1541099649105-3dfb1b51c9d6?ixlib=rb-4.0.3&auto=format&fit=crop&w=800&q=80";

struct Row {
    id: u32,
    name: &'static str,
    category: Category,
    price: i64,
    original: Option<i64>,
    image: &'static str,
    rating: f64,
    reviews: u32,
    badge: Option<Badge>,
    description: &'static str,
}

const ROWS: [Row; 12] = [
    Row { id: 1, name: "Mufulira Classic White Tee", category: Category::Men, price: 1200, original: Some(1500), image: IMG_TEE, rating: 4.5, reviews: 128, badge: Some(Badge::New), description: "Premium 100% cotton tee with modern cut \u{2014} breathable and soft." },
    Row { id: 2, name: "Lusaka Linen Summer Dress", category: Category::Women, price: 2500, original: Some(3200), image: IMG_DRESS, rating: 4.8, reviews: 89, badge: Some(Badge::Sale), description: "Light linen dress, comfortable and perfect for warm weather." },
    Row { id: 3, name: "Zambezi Leather Strap Watch", category: Category::Accessories, price: 6800, original: None, image: IMG_WATCH, rating: 4.9, reviews: 256, badge: Some(Badge::New), description: "Classic leather strap watch with minimalist face and precise movement." },
    Row { id: 4, name: "Copperbelt Slim Denim", category: Category::Men, price: 4200, original: Some(5200), image: IMG_DENIM, rating: 4.3, reviews: 204, badge: None, description: "Stretch denim with tailored slim fit for everyday comfort." },
    Row { id: 5, name: "Tropical Knit Sweater", category: Category::Women, price: 3800, original: None, image: IMG_SWEATER, rating: 4.6, reviews: 167, badge: Some(Badge::New), description: "Cozy knit sweater made from blended wool for warmth and softness." },
    Row { id: 6, name: "Sable Polarized Sunglasses", category: Category::Accessories, price: 2100, original: Some(2600), image: IMG_SUNGLASSES, rating: 4.7, reviews: 93, badge: Some(Badge::Sale), description: "Polarized lenses with anti-glare coating and UV protection." },
    Row { id: 7, name: "Kabwe Tailored Blazer", category: Category::Men, price: 7600, original: Some(9200), image: IMG_BLAZER, rating: 4.8, reviews: 58, badge: Some(Badge::New), description: "Tailored blazer in premium fabric, sharp silhouette for formal wear." },
    Row { id: 8, name: "Victoria Maxi Skirt", category: Category::Women, price: 2100, original: Some(2600), image: IMG_SKIRT, rating: 4.4, reviews: 42, badge: None, description: "Flowy maxi skirt with a comfortable waist and flattering drape." },
    Row { id: 9, name: "Nomad Canvas Backpack", category: Category::Accessories, price: 3400, original: None, image: IMG_BACKPACK, rating: 4.6, reviews: 74, badge: Some(Badge::New), description: "Durable canvas backpack with padded straps and laptop sleeve." },
    Row { id: 10, name: "Choma Polo Shirt", category: Category::Men, price: 1750, original: Some(2200), image: IMG_POLO, rating: 4.2, reviews: 110, badge: None, description: "Classic polo with breathable fabric and neat collar." },
    Row { id: 11, name: "Kafue Wrap Top", category: Category::Women, price: 1850, original: None, image: IMG_WRAP, rating: 4.5, reviews: 38, badge: None, description: "Versatile wrap top that pairs well with skirts and trousers." },
    Row { id: 12, name: "Safari Leather Belt", category: Category::Accessories, price: 950, original: Some(1200), image: IMG_WATCH, rating: 4.3, reviews: 26, badge: Some(Badge::Sale), description: "Sturdy leather belt with classic buckle for everyday use." },
];

/// The twelve hand-picked products featured on the home page, four per
/// category, in display order.
pub fn new_arrivals() -> Vec<Product> {
    ROWS.iter()
        .map(|row| Product {
            id: ProductId::new(row.id),
            name: row.name.to_string(),
            category: row.category,
            price: Money::kwacha(row.price),
            original_price: row.original.map(Money::kwacha),
            image: row.image.to_string(),
            rating: row.rating,
            review_count: row.reviews,
            badge: row.badge,
            description: row.description.to_string(),
            in_stock: true,
        })
        .collect()
}
