//! Structured logging for the Tim Clothing storefront.
//!
//! This crate provides:
//! - `StructuredLogger` - Structured logging with page and component context
//! - `LogBuilder` - Fluent construction of entries with typed fields
//! - `LogCapture` - In-memory capture of emitted entries, for tests

mod logging;

pub use logging::*;
