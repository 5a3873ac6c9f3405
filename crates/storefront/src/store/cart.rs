//! Cart store: line items with snapshot prices and write-through persistence.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use serde::{Deserialize, Serialize};
use souq_core::{Price, ProductId};
use thiserror::Error;

use crate::catalog::Product;
use crate::storage::{self, StorageAdapter};

const CART_KEY: &str = "cart";
const SNAPSHOT_VERSION: u32 = 1;

/// Errors surfaced at the cart boundary.
#[derive(Debug, Error)]
pub enum CartError {
    /// Product is missing a field the cart needs. Rejected before entering
    /// the store so bad records never corrupt persisted state.
    #[error("invalid product {id}: {reason}")]
    InvalidProduct { id: ProductId, reason: String },
}

/// One row in the cart.
///
/// Name, price, and image are snapshots captured at add time - a later
/// catalog refresh never changes an existing line item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLineItem {
    /// Catalog identifier of the product (not enforced against the cache).
    pub product_id: ProductId,
    /// Display name snapshot.
    pub name: String,
    /// Unit price snapshot.
    pub price: Price,
    /// Image URL snapshot.
    pub image: String,
    /// Requested quantity, always at least 1.
    pub quantity: u32,
}

impl CartLineItem {
    /// Exact line total (unit price x quantity).
    #[must_use]
    pub fn line_total(&self) -> Price {
        Price::new(self.price.amount() * rust_decimal::Decimal::from(self.quantity))
    }
}

/// Persisted projection of the cart. The version field gates future schema
/// evolution; an unrecognized version is treated as absent.
#[derive(Debug, Serialize, Deserialize)]
struct CartSnapshot {
    version: u32,
    items: Vec<CartLineItem>,
}

/// The cart: an ordered collection of line items, at most one per product.
///
/// All mutations are synchronous and write through to the storage adapter
/// before returning; a failed write is logged and never blocks the
/// in-memory state.
#[derive(Clone)]
pub struct CartStore {
    inner: Arc<CartStoreInner>,
}

struct CartStoreInner {
    items: Mutex<Vec<CartLineItem>>,
    storage: Arc<dyn StorageAdapter>,
}

impl CartStore {
    /// Rehydrate the cart from storage. A corrupt, absent, or
    /// unknown-version snapshot yields an empty cart.
    #[must_use]
    pub fn load(storage: Arc<dyn StorageAdapter>) -> Self {
        let items = match storage::load_json::<CartSnapshot>(storage.as_ref(), CART_KEY) {
            Some(snapshot) if snapshot.version == SNAPSHOT_VERSION => snapshot.items,
            Some(snapshot) => {
                tracing::warn!(
                    version = snapshot.version,
                    "unknown cart snapshot version, starting empty"
                );
                Vec::new()
            }
            None => Vec::new(),
        };

        Self {
            inner: Arc::new(CartStoreInner {
                items: Mutex::new(items),
                storage,
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Vec<CartLineItem>> {
        self.inner
            .items
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn persist(&self, items: &[CartLineItem]) {
        let snapshot = CartSnapshot {
            version: SNAPSHOT_VERSION,
            items: items.to_vec(),
        };
        if let Err(e) = storage::save_json(self.inner.storage.as_ref(), CART_KEY, &snapshot) {
            tracing::warn!(error = %e, "failed to persist cart snapshot");
        }
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Add a product to the cart.
    ///
    /// If a line item for the product already exists its quantity is
    /// incremented by `quantity`, saturating at `u32::MAX`; otherwise a new
    /// line is created with the product's current price as the snapshot. A
    /// `quantity` of 0 is treated as 1.
    ///
    /// # Errors
    ///
    /// Returns `CartError::InvalidProduct` if the product has no usable
    /// identifier, name, image, or price. The cart is left untouched so the
    /// caller can surface a notification.
    pub fn add_item(&self, product: &Product, quantity: u32) -> Result<(), CartError> {
        validate_product(product)?;
        let quantity = quantity.max(1);

        let mut items = self.lock();
        if let Some(line) = items.iter_mut().find(|l| l.product_id == product.id) {
            line.quantity = line.quantity.saturating_add(quantity);
        } else {
            items.push(CartLineItem {
                product_id: product.id,
                name: product.name.clone(),
                price: product.price,
                image: product.image.clone(),
                quantity,
            });
        }
        self.persist(&items);
        Ok(())
    }

    /// Remove the line item for a product. No-op if absent.
    pub fn remove_item(&self, product_id: ProductId) {
        let mut items = self.lock();
        let before = items.len();
        items.retain(|l| l.product_id != product_id);
        if items.len() != before {
            self.persist(&items);
        }
    }

    /// Set a line item's quantity to exactly `quantity`.
    ///
    /// A quantity below 1 behaves as removal. No-op if the item is absent.
    pub fn set_quantity(&self, product_id: ProductId, quantity: u32) {
        if quantity < 1 {
            self.remove_item(product_id);
            return;
        }
        let mut items = self.lock();
        if let Some(line) = items.iter_mut().find(|l| l.product_id == product_id) {
            line.quantity = quantity;
            self.persist(&items);
        }
    }

    /// Increase a line item's quantity by 1, saturating at `u32::MAX`.
    /// No-op if absent.
    pub fn increment_quantity(&self, product_id: ProductId) {
        let mut items = self.lock();
        if let Some(line) = items.iter_mut().find(|l| l.product_id == product_id) {
            line.quantity = line.quantity.saturating_add(1);
            self.persist(&items);
        }
    }

    /// Decrease a line item's quantity by 1, clamped at 1.
    ///
    /// Reaching the minimum is not an error and does not remove the line -
    /// removal is always an explicit action.
    pub fn decrement_quantity(&self, product_id: ProductId) {
        let mut items = self.lock();
        if let Some(line) = items.iter_mut().find(|l| l.product_id == product_id)
            && line.quantity > 1
        {
            line.quantity -= 1;
            self.persist(&items);
        }
    }

    /// Empty the cart.
    pub fn clear(&self) {
        let mut items = self.lock();
        items.clear();
        self.persist(&items);
    }

    // =========================================================================
    // Derived Views
    // =========================================================================

    /// Current line items, in insertion order.
    #[must_use]
    pub fn items(&self) -> Vec<CartLineItem> {
        self.lock().clone()
    }

    /// Number of distinct line items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Whether the cart has no line items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Total quantity across all line items.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.lock().iter().map(|l| l.quantity).sum()
    }

    /// Exact subtotal over all line items. Rounding happens only in
    /// [`Price::display`].
    #[must_use]
    pub fn subtotal(&self) -> Price {
        let total = self
            .lock()
            .iter()
            .map(|l| l.price.amount() * rust_decimal::Decimal::from(l.quantity))
            .sum();
        Price::new(total)
    }
}

/// Reject products missing a field the cart depends on.
fn validate_product(product: &Product) -> Result<(), CartError> {
    let reason = if product.id.as_i64() <= 0 {
        Some("missing identifier")
    } else if product.name.trim().is_empty() {
        Some("missing name")
    } else if product.image.trim().is_empty() {
        Some("missing image")
    } else if product.price.is_negative() {
        Some("negative price")
    } else {
        None
    };

    match reason {
        Some(reason) => Err(CartError::InvalidProduct {
            id: product.id,
            reason: reason.to_string(),
        }),
        None => Ok(()),
    }
}
