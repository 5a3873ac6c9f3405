//! Application state shared across the UI layer.

use std::sync::Arc;

use crate::catalog::{CatalogCache, CatalogClient};
use crate::config::StorefrontConfig;
use crate::services::MailClient;
use crate::storage::StorageAdapter;
use crate::store::{CartStore, FavoritesStore};

/// Application state shared across all UI consumers.
///
/// Explicitly constructed and passed by argument - never a module-level
/// global. Cheaply cloneable via `Arc`. Construction performs rehydration,
/// so cart and favorites reflect the persisted snapshots before the first
/// dependent view renders; until then consumers simply see empty stores.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    catalog: CatalogCache,
    cart: CartStore,
    favorites: FavoritesStore,
    mail: Option<MailClient>,
}

impl AppState {
    /// Create the application state, rehydrating cart and favorites from
    /// the given storage adapter.
    ///
    /// The catalog starts empty in the `Idle` state; the first page load
    /// triggers a fetch.
    #[must_use]
    pub fn new(config: StorefrontConfig, storage: Arc<dyn StorageAdapter>) -> Self {
        let catalog = CatalogCache::new(CatalogClient::new(&config.catalog));
        let cart = CartStore::load(Arc::clone(&storage));
        let favorites = FavoritesStore::load(storage);
        let mail = config.mail.as_ref().map(MailClient::new);

        Self {
            inner: Arc::new(AppStateInner {
                config,
                catalog,
                cart,
                favorites,
                mail,
            }),
        }
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the catalog cache.
    #[must_use]
    pub fn catalog(&self) -> &CatalogCache {
        &self.inner.catalog
    }

    /// Get a reference to the cart store.
    #[must_use]
    pub fn cart(&self) -> &CartStore {
        &self.inner.cart
    }

    /// Get a reference to the favorites store.
    #[must_use]
    pub fn favorites(&self) -> &FavoritesStore {
        &self.inner.favorites
    }

    /// Get the mail relay client, if the contact form is configured.
    #[must_use]
    pub fn mail(&self) -> Option<&MailClient> {
        self.inner.mail.as_ref()
    }
}
