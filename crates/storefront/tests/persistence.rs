//! Integration tests for persisted state across simulated reloads.
//!
//! Each test builds a full `AppState` against a throwaway state directory,
//! mutates the stores, drops everything, and rebuilds from the same
//! directory - the closest analog to closing and reopening the browser tab.

#![allow(clippy::unwrap_used)]

use std::sync::Arc;

use rust_decimal::Decimal;
use souq_core::{Price, ProductId};
use souq_storefront::catalog::Product;
use souq_storefront::config::{CatalogConfig, StorefrontConfig};
use souq_storefront::state::AppState;
use souq_storefront::storage::FileStorage;

fn test_config(state_dir: &std::path::Path) -> StorefrontConfig {
    StorefrontConfig {
        catalog: CatalogConfig {
            base_url: "http://127.0.0.1:9".to_string(),
            page_limit: 10,
        },
        state_dir: state_dir.to_path_buf(),
        mail: None,
    }
}

fn test_state(state_dir: &std::path::Path) -> AppState {
    let storage = Arc::new(FileStorage::new(state_dir).unwrap());
    AppState::new(test_config(state_dir), storage)
}

fn product(id: i64, price: Decimal) -> Product {
    Product {
        id: ProductId::new(id),
        name: format!("Product {id}"),
        name_localized: format!("Product {id}"),
        description: String::new(),
        description_localized: String::new(),
        price: Price::new(price),
        discount_percentage: Decimal::ZERO,
        image: format!("https://cdn.example.com/{id}.jpg"),
        images: vec![],
        category: "laptops".to_string(),
        rating: 4.0,
        in_stock: true,
        is_new: true,
        is_featured: false,
    }
}

#[test]
fn cart_survives_reload_with_snapshot_prices() {
    let temp = tempfile::tempdir().unwrap();

    {
        let state = test_state(temp.path());
        state.cart().add_item(&product(1, Decimal::new(1099, 2)), 2).unwrap();
        state.cart().add_item(&product(2, Decimal::new(500, 2)), 1).unwrap();
    }

    // Simulated reload: fresh AppState over the same directory
    let state = test_state(temp.path());
    let items = state.cart().items();
    assert_eq!(items.len(), 2);
    assert_eq!(items.first().unwrap().price, Price::new(Decimal::new(1099, 2)));
    assert_eq!(items.first().unwrap().quantity, 2);
    assert_eq!(state.cart().subtotal(), Price::new(Decimal::new(2698, 2)));
}

#[test]
fn favorites_survive_reload_in_order() {
    let temp = tempfile::tempdir().unwrap();

    {
        let state = test_state(temp.path());
        state.favorites().toggle(ProductId::new(9));
        state.favorites().toggle(ProductId::new(3));
        // Toggled off before the reload, must not come back
        state.favorites().toggle(ProductId::new(9));
        state.favorites().toggle(ProductId::new(5));
    }

    let state = test_state(temp.path());
    assert_eq!(
        state.favorites().ids(),
        vec![ProductId::new(3), ProductId::new(5)]
    );
    assert!(!state.favorites().is_favorite(ProductId::new(9)));
}

#[test]
fn catalog_is_never_persisted() {
    let temp = tempfile::tempdir().unwrap();

    {
        let state = test_state(temp.path());
        state.cart().add_item(&product(1, Decimal::ONE), 1).unwrap();
    }

    // Only the cart wrote a snapshot; no catalog file may exist
    let names: Vec<String> = std::fs::read_dir(temp.path())
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, vec!["cart.json".to_string()]);
}

#[test]
fn corrupt_snapshots_yield_empty_state() {
    let temp = tempfile::tempdir().unwrap();
    std::fs::write(temp.path().join("cart.json"), "{broken").unwrap();
    std::fs::write(temp.path().join("favorites.json"), "42").unwrap();

    let state = test_state(temp.path());
    assert!(state.cart().is_empty());
    assert!(state.favorites().is_empty());
}

#[test]
fn stores_start_empty_without_snapshots() {
    let temp = tempfile::tempdir().unwrap();
    let state = test_state(temp.path());

    assert!(state.cart().is_empty());
    assert_eq!(state.cart().item_count(), 0);
    assert_eq!(state.cart().subtotal(), Price::ZERO);
    assert!(state.favorites().is_empty());
    assert!(state.mail().is_none());
}
