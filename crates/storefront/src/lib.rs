//! Souq Storefront core.
//!
//! Client-side state for a storefront UI: a product catalog cache fed by an
//! external REST API, a cart, a favorites set, and a persistence adapter
//! that stands in for browser local storage. The UI layer (routing, pages,
//! rendering) lives elsewhere and talks to this crate only through
//! [`state::AppState`] and the store operations.
//!
//! # Architecture
//!
//! - The catalog API is the source of truth for products - the cache holds
//!   exactly one snapshot at a time and is never persisted
//! - Cart and favorites own the in-memory truth and write through to the
//!   [`storage::StorageAdapter`] on every mutation
//! - All state lives in an explicitly constructed [`state::AppState`];
//!   there are no module-level singletons

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod catalog;
pub mod config;
pub mod error;
pub mod services;
pub mod state;
pub mod storage;
pub mod store;
