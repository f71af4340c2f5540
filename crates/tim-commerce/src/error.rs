//! Commerce error types.

use std::time::Duration;

use thiserror::Error;

use crate::ids::ProductId;

/// Errors that can occur in storefront operations.
#[derive(Error, Debug)]
pub enum CommerceError {
    /// Product not found.
    #[error("Product not found: {0}")]
    ProductNotFound(ProductId),

    /// Invalid quantity.
    #[error("Invalid quantity: {0}")]
    InvalidQuantity(i64),

    /// Product id text could not be parsed.
    #[error("Invalid product id: {0:?}")]
    InvalidProductId(String),

    /// Unknown category slug.
    #[error("Unknown category: {0:?}")]
    UnknownCategory(String),

    /// Unknown sort key.
    #[error("Unknown sort option: {0:?}")]
    UnknownSortKey(String),

    /// Unknown currency code.
    #[error("Unknown currency: {0:?}")]
    UnknownCurrency(String),

    /// Currency mismatch.
    #[error("Currency mismatch: expected {expected}, got {got}")]
    CurrencyMismatch { expected: String, got: String },

    /// Cache error.
    #[error("Cache error: {0}")]
    CacheError(String),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// Validation error.
    #[error("Validation error: {0}")]
    ValidationError(String),
}

impl From<tim_cache::CacheError> for CommerceError {
    fn from(e: tim_cache::CacheError) -> Self {
        CommerceError::CacheError(e.to_string())
    }
}

impl From<serde_json::Error> for CommerceError {
    fn from(e: serde_json::Error) -> Self {
        CommerceError::SerializationError(e.to_string())
    }
}

/// Errors from resolving a product for the detail page.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LookupError {
    /// No usable `id` query parameter.
    #[error("No product id in request")]
    MissingId,

    /// The product never appeared in the registry.
    #[error("Product {id} not found after {attempts} attempts")]
    NotFound { id: ProductId, attempts: u32 },

    /// The accumulated wait exceeded the policy timeout.
    #[error("Lookup for product {id} timed out after {waited:?}")]
    TimedOut { id: ProductId, waited: Duration },
}

/// Errors from the newsletter signup form.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NewsletterError {
    /// The address failed local validation.
    #[error("Invalid email address: {0:?}")]
    InvalidEmail(String),

    /// A submission is already in flight.
    #[error("A subscription request is already in progress")]
    InProgress,
}
