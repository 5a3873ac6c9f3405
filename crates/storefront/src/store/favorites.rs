//! Favorites store: an insertion-ordered set of product IDs.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use souq_core::ProductId;

use crate::storage::{self, StorageAdapter};

const FAVORITES_KEY: &str = "favorites";
const SNAPSHOT_VERSION: u32 = 1;

/// Persisted projection of the favorites set.
#[derive(Debug, Serialize, Deserialize)]
struct FavoritesSnapshot {
    version: u32,
    items: Vec<ProductId>,
}

/// The favorites set.
///
/// Membership is O(1); insertion order is preserved for display. This store
/// is the only favorites code path - persistence always goes through the
/// storage adapter, never directly to the backing medium.
#[derive(Clone)]
pub struct FavoritesStore {
    inner: Arc<FavoritesStoreInner>,
}

struct FavoritesStoreInner {
    items: Mutex<IndexSet<ProductId>>,
    storage: Arc<dyn StorageAdapter>,
}

impl FavoritesStore {
    /// Rehydrate the favorites set from storage. A corrupt, absent, or
    /// unknown-version snapshot yields an empty set; duplicate IDs in a
    /// snapshot collapse to one entry.
    #[must_use]
    pub fn load(storage: Arc<dyn StorageAdapter>) -> Self {
        let items = match storage::load_json::<FavoritesSnapshot>(storage.as_ref(), FAVORITES_KEY)
        {
            Some(snapshot) if snapshot.version == SNAPSHOT_VERSION => {
                snapshot.items.into_iter().collect()
            }
            Some(snapshot) => {
                tracing::warn!(
                    version = snapshot.version,
                    "unknown favorites snapshot version, starting empty"
                );
                IndexSet::new()
            }
            None => IndexSet::new(),
        };

        Self {
            inner: Arc::new(FavoritesStoreInner {
                items: Mutex::new(items),
                storage,
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, IndexSet<ProductId>> {
        self.inner
            .items
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn persist(&self, items: &IndexSet<ProductId>) {
        let snapshot = FavoritesSnapshot {
            version: SNAPSHOT_VERSION,
            items: items.iter().copied().collect(),
        };
        if let Err(e) = storage::save_json(self.inner.storage.as_ref(), FAVORITES_KEY, &snapshot) {
            tracing::warn!(error = %e, "failed to persist favorites snapshot");
        }
    }

    /// Toggle membership for a product.
    ///
    /// Returns the new membership: `true` if the product is now a favorite.
    /// Two successive toggles always restore the original state.
    pub fn toggle(&self, product_id: ProductId) -> bool {
        let mut items = self.lock();
        let now_favorite = if items.shift_remove(&product_id) {
            false
        } else {
            items.insert(product_id);
            true
        };
        self.persist(&items);
        now_favorite
    }

    /// Whether a product is currently a favorite. O(1) expected.
    #[must_use]
    pub fn is_favorite(&self, product_id: ProductId) -> bool {
        self.lock().contains(&product_id)
    }

    /// Empty the set.
    pub fn clear(&self) {
        let mut items = self.lock();
        items.clear();
        self.persist(&items);
    }

    /// Favorite product IDs in insertion order.
    #[must_use]
    pub fn ids(&self) -> Vec<ProductId> {
        self.lock().iter().copied().collect()
    }

    /// Number of favorites.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Whether the set is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }
}
