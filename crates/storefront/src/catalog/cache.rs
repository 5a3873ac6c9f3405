//! Single-snapshot product cache with a stale-response guard.

use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use souq_core::ProductId;
use tracing::instrument;

use super::CatalogError;
use super::client::CatalogClient;
use super::types::{CATEGORIES, Category, Product};

/// Loading status of the catalog cache.
///
/// Transitions: `Idle -> Loading -> {Loaded, Error}`, and back to `Loading`
/// on any new request. There is no terminal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CatalogStatus {
    /// No load has been requested yet.
    #[default]
    Idle,
    /// The latest request is still in flight.
    Loading,
    /// The snapshot reflects the latest successful load.
    Loaded,
    /// The latest request failed; the previous snapshot is retained.
    Error,
}

struct CacheState {
    products: Vec<Product>,
    status: CatalogStatus,
    /// Token of the most recently issued request. A completion carrying any
    /// other token is superseded and gets discarded.
    latest_token: u64,
}

/// In-memory product cache fed by a [`CatalogClient`].
///
/// Holds exactly one authoritative snapshot at a time. Every load replaces
/// the whole collection; overlapping loads resolve last-issued-wins via a
/// monotonically increasing request token, so a late response from a
/// superseded request never overwrites a newer one. On failure the previous
/// successful snapshot is retained.
#[derive(Clone)]
pub struct CatalogCache {
    inner: Arc<CatalogCacheInner>,
}

struct CatalogCacheInner {
    client: CatalogClient,
    state: RwLock<CacheState>,
}

impl CatalogCache {
    /// Create an empty cache in the `Idle` state.
    #[must_use]
    pub fn new(client: CatalogClient) -> Self {
        Self {
            inner: Arc::new(CatalogCacheInner {
                client,
                state: RwLock::new(CacheState {
                    products: Vec::new(),
                    status: CatalogStatus::Idle,
                    latest_token: 0,
                }),
            }),
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, CacheState> {
        self.inner.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, CacheState> {
        self.inner
            .state
            .write()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Issue a new request token and move the cache to `Loading`.
    fn begin_request(&self) -> u64 {
        let mut state = self.write();
        state.latest_token += 1;
        state.status = CatalogStatus::Loading;
        state.latest_token
    }

    /// Apply a completed request. Superseded completions are discarded
    /// wholesale; the request that superseded them owns the status now.
    fn apply(
        &self,
        token: u64,
        outcome: Result<Vec<Product>, CatalogError>,
    ) -> Result<(), CatalogError> {
        let mut state = self.write();
        if token != state.latest_token {
            tracing::debug!(token, latest = state.latest_token, "discarding superseded catalog response");
            return Ok(());
        }
        match outcome {
            Ok(products) => {
                tracing::debug!(count = products.len(), "catalog snapshot replaced");
                state.products = products;
                state.status = CatalogStatus::Loaded;
                Ok(())
            }
            Err(e) => {
                // Keep the previous successful snapshot, only flip the status
                tracing::warn!(error = %e, "catalog load failed, retaining previous snapshot");
                state.status = CatalogStatus::Error;
                Err(e)
            }
        }
    }

    // =========================================================================
    // Load Operations
    // =========================================================================

    /// Replace the snapshot with the full product list.
    ///
    /// # Errors
    ///
    /// Returns the fetch error if this request was still the latest when it
    /// failed; the previous snapshot is retained either way.
    #[instrument(skip(self))]
    pub async fn load_all(&self) -> Result<(), CatalogError> {
        let token = self.begin_request();
        let outcome = self.inner.client.fetch_all().await;
        self.apply(token, outcome)
    }

    /// Replace the snapshot with the products of one category.
    ///
    /// # Errors
    ///
    /// Same contract as [`Self::load_all`].
    #[instrument(skip(self), fields(category = %category))]
    pub async fn load_by_category(&self, category: &str) -> Result<(), CatalogError> {
        let token = self.begin_request();
        let outcome = self.inner.client.fetch_by_category(category).await;
        self.apply(token, outcome)
    }

    /// Replace the snapshot with the results of a search query.
    ///
    /// # Errors
    ///
    /// Same contract as [`Self::load_all`].
    #[instrument(skip(self), fields(query = %query))]
    pub async fn search(&self, query: &str) -> Result<(), CatalogError> {
        let token = self.begin_request();
        let outcome = self.inner.client.search(query).await;
        self.apply(token, outcome)
    }

    /// Product for a detail view.
    ///
    /// Served from the snapshot when present; otherwise fetched from the
    /// single-product endpoint. The fallback fetch does not touch the
    /// snapshot or the status, so a deep link into a detail page never
    /// disturbs a listing load in flight.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::NotFound` if the product does not exist, or
    /// the fetch error if the fallback request fails.
    #[instrument(skip(self), fields(product_id = %id))]
    pub async fn product_details(&self, id: ProductId) -> Result<Product, CatalogError> {
        if let Some(product) = self.product_by_id(id) {
            return Ok(product);
        }
        self.inner.client.fetch_by_id(id).await
    }

    // =========================================================================
    // Selectors (pure reads, safe on an empty or not-yet-loaded cache)
    // =========================================================================

    /// Current loading status.
    #[must_use]
    pub fn status(&self) -> CatalogStatus {
        self.read().status
    }

    /// The current snapshot.
    #[must_use]
    pub fn products(&self) -> Vec<Product> {
        self.read().products.clone()
    }

    /// Look up a product by ID.
    #[must_use]
    pub fn product_by_id(&self, id: ProductId) -> Option<Product> {
        self.read().products.iter().find(|p| p.id == id).cloned()
    }

    /// Products sharing a category, excluding one product (the one being
    /// viewed).
    #[must_use]
    pub fn related_in_category(&self, category: &str, exclude: ProductId) -> Vec<Product> {
        self.read()
            .products
            .iter()
            .filter(|p| p.category == category && p.id != exclude)
            .cloned()
            .collect()
    }

    /// The `n` highest-rated products.
    #[must_use]
    pub fn top_rated(&self, n: usize) -> Vec<Product> {
        let mut products = self.read().products.clone();
        products.sort_by(|a, b| b.rating.total_cmp(&a.rating));
        products.truncate(n);
        products
    }

    /// Featured products (rating at or above the featured threshold).
    #[must_use]
    pub fn featured(&self) -> Vec<Product> {
        self.read()
            .products
            .iter()
            .filter(|p| p.is_featured)
            .cloned()
            .collect()
    }

    /// The fixed category list.
    #[must_use]
    pub fn categories(&self) -> &'static [Category] {
        CATEGORIES
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal::Decimal;
    use souq_core::Price;

    use crate::config::CatalogConfig;

    use super::*;

    fn test_client() -> CatalogClient {
        // Points at a closed local port; only used by tests that expect
        // the fetch itself to fail.
        CatalogClient::new(&CatalogConfig {
            base_url: "http://127.0.0.1:9".to_string(),
            page_limit: 10,
        })
    }

    fn product(id: i64, category: &str, rating: f64) -> Product {
        Product {
            id: ProductId::new(id),
            name: format!("Product {id}"),
            name_localized: format!("Product {id}"),
            description: String::new(),
            description_localized: String::new(),
            price: Price::new(Decimal::new(1000, 2)),
            discount_percentage: Decimal::ZERO,
            image: format!("https://cdn.example.com/{id}.jpg"),
            images: vec![],
            category: category.to_string(),
            rating,
            in_stock: true,
            is_new: true,
            is_featured: rating >= 4.5,
        }
    }

    #[test]
    fn test_empty_cache_selectors() {
        let cache = CatalogCache::new(test_client());
        assert_eq!(cache.status(), CatalogStatus::Idle);
        assert!(cache.products().is_empty());
        assert!(cache.product_by_id(ProductId::new(1)).is_none());
        assert!(cache.related_in_category("laptops", ProductId::new(1)).is_empty());
        assert!(cache.top_rated(5).is_empty());
        assert!(cache.featured().is_empty());
    }

    #[test]
    fn test_apply_replaces_snapshot() {
        let cache = CatalogCache::new(test_client());
        let token = cache.begin_request();
        assert_eq!(cache.status(), CatalogStatus::Loading);

        cache
            .apply(token, Ok(vec![product(1, "laptops", 4.0)]))
            .unwrap();
        assert_eq!(cache.status(), CatalogStatus::Loaded);
        assert_eq!(cache.products().len(), 1);

        // A second load replaces the whole collection
        let token = cache.begin_request();
        cache
            .apply(token, Ok(vec![product(2, "tops", 3.0), product(3, "tops", 5.0)]))
            .unwrap();
        assert_eq!(cache.products().len(), 2);
        assert!(cache.product_by_id(ProductId::new(1)).is_none());
    }

    #[test]
    fn test_superseded_response_is_discarded() {
        let cache = CatalogCache::new(test_client());
        let first = cache.begin_request();
        let second = cache.begin_request();

        // Newest request completes first
        cache.apply(second, Ok(vec![product(2, "tops", 3.0)])).unwrap();
        // The older request completes late; its data must not win
        cache.apply(first, Ok(vec![product(1, "laptops", 4.0)])).unwrap();

        let products = cache.products();
        assert_eq!(products.len(), 1);
        assert_eq!(products.first().unwrap().id, ProductId::new(2));
        assert_eq!(cache.status(), CatalogStatus::Loaded);
    }

    #[test]
    fn test_superseded_error_does_not_flip_status() {
        let cache = CatalogCache::new(test_client());
        let first = cache.begin_request();
        let second = cache.begin_request();

        cache.apply(second, Ok(vec![product(2, "tops", 3.0)])).unwrap();
        let result = cache.apply(
            first,
            Err(CatalogError::Api {
                status: 500,
                message: "boom".to_string(),
            }),
        );

        assert!(result.is_ok());
        assert_eq!(cache.status(), CatalogStatus::Loaded);
    }

    #[test]
    fn test_error_retains_previous_snapshot() {
        let cache = CatalogCache::new(test_client());
        let token = cache.begin_request();
        let fifty: Vec<Product> = (1..=50).map(|id| product(id, "laptops", 4.0)).collect();
        cache.apply(token, Ok(fifty)).unwrap();

        let token = cache.begin_request();
        let result = cache.apply(
            token,
            Err(CatalogError::Api {
                status: 502,
                message: "bad gateway".to_string(),
            }),
        );

        assert!(result.is_err());
        assert_eq!(cache.status(), CatalogStatus::Error);
        assert_eq!(cache.products().len(), 50);
    }

    #[test]
    fn test_retry_after_error_moves_to_loading() {
        let cache = CatalogCache::new(test_client());
        let token = cache.begin_request();
        cache
            .apply(
                token,
                Err(CatalogError::Api {
                    status: 500,
                    message: "boom".to_string(),
                }),
            )
            .unwrap_err();
        assert_eq!(cache.status(), CatalogStatus::Error);

        cache.begin_request();
        assert_eq!(cache.status(), CatalogStatus::Loading);
    }

    #[test]
    fn test_selectors() {
        let cache = CatalogCache::new(test_client());
        let token = cache.begin_request();
        cache
            .apply(
                token,
                Ok(vec![
                    product(1, "laptops", 4.7),
                    product(2, "laptops", 3.2),
                    product(3, "tops", 4.9),
                    product(4, "laptops", 4.5),
                ]),
            )
            .unwrap();

        assert_eq!(
            cache.product_by_id(ProductId::new(3)).unwrap().category,
            "tops"
        );

        let related = cache.related_in_category("laptops", ProductId::new(1));
        assert_eq!(related.len(), 2);
        assert!(related.iter().all(|p| p.id != ProductId::new(1)));

        let top = cache.top_rated(2);
        assert_eq!(
            top.iter().map(|p| p.id).collect::<Vec<_>>(),
            vec![ProductId::new(3), ProductId::new(1)]
        );

        let featured = cache.featured();
        assert_eq!(featured.len(), 3);
    }

    #[test]
    fn test_categories_start_with_all() {
        let cache = CatalogCache::new(test_client());
        let categories = cache.categories();
        assert_eq!(categories.first().unwrap().id, "all");
        assert!(categories.iter().any(|c| c.id == "smartphones"));
    }

    #[tokio::test]
    async fn test_product_details_served_from_snapshot() {
        let cache = CatalogCache::new(test_client());
        let token = cache.begin_request();
        cache.apply(token, Ok(vec![product(1, "laptops", 4.0)])).unwrap();

        // The client points at a closed port, so a hit must not fetch
        let details = cache.product_details(ProductId::new(1)).await.unwrap();
        assert_eq!(details.id, ProductId::new(1));
    }

    #[tokio::test]
    async fn test_product_details_miss_leaves_cache_untouched() {
        let cache = CatalogCache::new(test_client());
        let token = cache.begin_request();
        cache.apply(token, Ok(vec![product(1, "laptops", 4.0)])).unwrap();

        let result = cache.product_details(ProductId::new(99)).await;
        assert!(result.is_err());
        assert_eq!(cache.status(), CatalogStatus::Loaded);
        assert_eq!(cache.products().len(), 1);
    }

    #[tokio::test]
    async fn test_load_all_failure_keeps_snapshot() {
        let cache = CatalogCache::new(test_client());
        let token = cache.begin_request();
        cache.apply(token, Ok(vec![product(1, "laptops", 4.0)])).unwrap();

        // The client points at a closed port, so the fetch itself fails
        let result = cache.load_all().await;
        assert!(result.is_err());
        assert_eq!(cache.status(), CatalogStatus::Error);
        assert_eq!(cache.products().len(), 1);
    }
}
