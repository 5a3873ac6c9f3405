//! Catalog API client and in-memory product cache.
//!
//! # Architecture
//!
//! - The catalog API is the source of truth - products are fetched, never
//!   synced or persisted locally
//! - [`CatalogClient`] speaks plain JSON REST via `reqwest` and normalizes
//!   wire records into [`Product`]
//! - [`CatalogCache`] holds exactly one authoritative snapshot at a time;
//!   each load replaces the whole collection, and a request-sequence token
//!   keeps a stale response from overwriting a newer one
//!
//! # Example
//!
//! ```rust,ignore
//! use souq_storefront::catalog::{CatalogCache, CatalogClient};
//!
//! let cache = CatalogCache::new(CatalogClient::new(&config.catalog));
//! cache.load_all().await?;
//! let top = cache.top_rated(6);
//! ```

mod cache;
mod client;
mod conversions;
pub mod types;

pub use cache::{CatalogCache, CatalogStatus};
pub use client::CatalogClient;
pub use types::{CATEGORIES, Category, Product};

use souq_core::ProductId;
use thiserror::Error;

/// Errors that can occur when talking to the catalog API.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned a non-success status.
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Product not found.
    #[error("Product not found: {0}")]
    NotFound(ProductId),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_error_display() {
        let err = CatalogError::NotFound(ProductId::new(123));
        assert_eq!(err.to_string(), "Product not found: 123");

        let err = CatalogError::Api {
            status: 502,
            message: "bad gateway".to_string(),
        };
        assert_eq!(err.to_string(), "API error: 502 - bad gateway");
    }
}
