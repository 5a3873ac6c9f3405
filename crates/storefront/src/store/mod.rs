//! Client-side state stores for cart and favorites.
//!
//! Both stores own the in-memory truth and write through to a
//! [`crate::storage::StorageAdapter`] on every mutation; the persisted
//! snapshot is only read back once, at construction (rehydration). Derived
//! values (counts, totals, membership) are plain functions recomputed on
//! read - there is no memoization layer.

mod cart;
mod favorites;

pub use cart::{CartError, CartLineItem, CartStore};
pub use favorites::FavoritesStore;
