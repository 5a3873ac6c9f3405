//! Unified error handling for the storefront core.
//!
//! Every failure in this crate is local and recoverable: the UI surfaces it
//! as a transient notification and the user retries by re-navigating or
//! re-submitting. Nothing here is fatal to the process and nothing is
//! retried automatically.

use thiserror::Error;

use crate::catalog::CatalogError;
use crate::config::ConfigError;
use crate::services::MailError;
use crate::storage::StorageError;
use crate::store::CartError;

/// Application-level error type for the storefront core.
#[derive(Debug, Error)]
pub enum AppError {
    /// Catalog API operation failed.
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// Product rejected at the cart boundary.
    #[error("Cart error: {0}")]
    Cart(#[from] CartError),

    /// Persistence operation failed.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Mail relay operation failed.
    #[error("Mail error: {0}")]
    Mail(#[from] MailError),

    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl AppError {
    /// Notification text safe to show a user.
    ///
    /// Internal details (URLs, response bodies, file paths) never leak into
    /// the UI.
    #[must_use]
    pub const fn user_message(&self) -> &'static str {
        match self {
            Self::Catalog(_) => "Couldn't load products. Please try again.",
            Self::Cart(_) => "This product can't be added to the cart.",
            Self::Mail(_) => "Couldn't send your message. Please try again.",
            Self::Storage(_) | Self::Config(_) => "Something went wrong. Please try again.",
        }
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;
