//! Catalog REST API client.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use souq_core::ProductId;
use tracing::instrument;

use crate::config::CatalogConfig;

use super::CatalogError;
use super::conversions::convert_product;
use super::types::{ApiProduct, ApiProductList, Product};

/// Client for the catalog REST API.
///
/// Stateless and cheaply cloneable; all caching lives in
/// [`super::CatalogCache`].
#[derive(Clone)]
pub struct CatalogClient {
    inner: Arc<CatalogClientInner>,
}

struct CatalogClientInner {
    client: reqwest::Client,
    base_url: String,
    page_limit: u32,
}

impl CatalogClient {
    /// Create a new catalog API client.
    #[must_use]
    pub fn new(config: &CatalogConfig) -> Self {
        Self {
            inner: Arc::new(CatalogClientInner {
                client: reqwest::Client::new(),
                base_url: config.base_url.clone(),
                page_limit: config.page_limit,
            }),
        }
    }

    /// Execute a GET request and deserialize the JSON body.
    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, CatalogError> {
        let response = self.inner.client.get(url).send().await?;
        let status = response.status();

        // Read the body as text first for better error diagnostics
        let body = response.text().await?;

        if !status.is_success() {
            tracing::error!(
                status = %status,
                body = %body.chars().take(500).collect::<String>(),
                "Catalog API returned non-success status"
            );
            return Err(CatalogError::Api {
                status: status.as_u16(),
                message: body.chars().take(200).collect(),
            });
        }

        serde_json::from_str(&body).map_err(|e| {
            tracing::error!(
                error = %e,
                body = %body.chars().take(500).collect::<String>(),
                "Failed to parse catalog API response"
            );
            CatalogError::Parse(e)
        })
    }

    /// Fetch the full product list.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails or the response cannot be
    /// parsed.
    #[instrument(skip(self))]
    pub async fn fetch_all(&self) -> Result<Vec<Product>, CatalogError> {
        let url = format!(
            "{}/products?limit={}",
            self.inner.base_url, self.inner.page_limit
        );
        let list: ApiProductList = self.get_json(&url).await?;
        Ok(list.products.into_iter().map(convert_product).collect())
    }

    /// Fetch all products in a category.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails or the response cannot be
    /// parsed.
    #[instrument(skip(self), fields(category = %category))]
    pub async fn fetch_by_category(&self, category: &str) -> Result<Vec<Product>, CatalogError> {
        let url = format!(
            "{}/products/category/{}",
            self.inner.base_url,
            urlencoding::encode(category)
        );
        let list: ApiProductList = self.get_json(&url).await?;
        Ok(list.products.into_iter().map(convert_product).collect())
    }

    /// Search products by free-text query.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails or the response cannot be
    /// parsed.
    #[instrument(skip(self), fields(query = %query))]
    pub async fn search(&self, query: &str) -> Result<Vec<Product>, CatalogError> {
        let url = format!(
            "{}/products/search?q={}",
            self.inner.base_url,
            urlencoding::encode(query)
        );
        let list: ApiProductList = self.get_json(&url).await?;
        Ok(list.products.into_iter().map(convert_product).collect())
    }

    /// Fetch a single product by ID.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::NotFound` if the product does not exist, or
    /// another error if the request fails.
    #[instrument(skip(self), fields(product_id = %id))]
    pub async fn fetch_by_id(&self, id: ProductId) -> Result<Product, CatalogError> {
        let url = format!("{}/products/{}", self.inner.base_url, id);
        match self.get_json::<ApiProduct>(&url).await {
            Ok(api) => Ok(convert_product(api)),
            Err(e) => Err(not_found_for(id, e)),
        }
    }
}

/// Map a 404 from the single-product endpoint to `NotFound`; every other
/// error passes through unchanged.
fn not_found_for(id: ProductId, err: CatalogError) -> CatalogError {
    match err {
        CatalogError::Api { status: 404, .. } => CatalogError::NotFound(id),
        other => other,
    }
}
