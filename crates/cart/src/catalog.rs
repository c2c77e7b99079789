//! Catalog service client.
//!
//! The catalog service owns the live product records; this component only
//! ever issues fallible, idempotent reads against it. The HTTP client uses
//! `reqwest` with a bounded request timeout (a timeout is indistinguishable
//! from any other fetch failure to callers) and caches the full product
//! list with `moka` so rehydration and UI refreshes don't hammer the API.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use reqwest::StatusCode;
use secrecy::ExposeSecret;
use thiserror::Error;
use tracing::{debug, instrument};
use url::Url;
use velvet_orris_core::{Product, ProductId};

use crate::config::CatalogConfig;

const PRODUCTS_CACHE_KEY: &str = "products";

/// Catalog service failure.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Transport-level failure (connect, timeout, TLS, body read).
    #[error("catalog request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The service answered with a non-success status.
    #[error("catalog returned HTTP {0}")]
    Status(StatusCode),

    /// An endpoint URL could not be built from the configured base.
    #[error("invalid catalog endpoint: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

/// Read access to the product catalog.
///
/// Both operations are idempotent reads; implementations may cache.
// Send bounds are left to implementors; stores drive these futures on the
// caller's own task.
#[allow(async_fn_in_trait)]
pub trait CatalogClient {
    /// Fetch the full current catalog.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError`] when the service is unreachable or answers
    /// with a failure status.
    async fn products(&self) -> Result<Vec<Product>, CatalogError>;

    /// Fetch a single product by id. `Ok(None)` when the id is unknown.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError`] when the service is unreachable or answers
    /// with a failure status.
    async fn product(&self, id: ProductId) -> Result<Option<Product>, CatalogError>;
}

// =============================================================================
// HttpCatalogClient
// =============================================================================

/// JSON/HTTP client for the catalog service.
///
/// Cheaply cloneable via `Arc`. The product list is cached for the
/// configured TTL (5 minutes by default); single-product lookups are not
/// cached since they back interactive detail views.
#[derive(Clone)]
pub struct HttpCatalogClient {
    inner: Arc<HttpCatalogClientInner>,
}

struct HttpCatalogClientInner {
    client: reqwest::Client,
    base_url: Url,
    access_token: Option<String>,
    cache: Cache<String, Vec<Product>>,
}

impl HttpCatalogClient {
    /// Create a new catalog client from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Http`] if the underlying HTTP client cannot
    /// be constructed.
    pub fn new(config: &CatalogConfig) -> Result<Self, CatalogError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        let cache = Cache::builder()
            .max_capacity(8)
            .time_to_live(Duration::from_secs(config.cache_ttl_secs))
            .build();

        Ok(Self {
            inner: Arc::new(HttpCatalogClientInner {
                client,
                base_url: config.base_url.clone(),
                access_token: config
                    .access_token
                    .as_ref()
                    .map(|token| token.expose_secret().to_string()),
                cache,
            }),
        })
    }

    fn endpoint(&self, path: &str) -> Result<Url, CatalogError> {
        // Url::join only fails on malformed paths, which ours never are,
        // but propagate rather than panic
        Ok(self.inner.base_url.join(path)?)
    }

    async fn get(&self, url: Url) -> Result<reqwest::Response, CatalogError> {
        let mut request = self.inner.client.get(url);
        if let Some(token) = &self.inner.access_token {
            request = request.bearer_auth(token);
        }
        Ok(request.send().await?)
    }
}

impl CatalogClient for HttpCatalogClient {
    #[instrument(skip(self))]
    async fn products(&self) -> Result<Vec<Product>, CatalogError> {
        if let Some(products) = self.inner.cache.get(PRODUCTS_CACHE_KEY).await {
            debug!("catalog cache hit");
            return Ok(products);
        }

        let url = self.endpoint("products")?;
        let response = self.get(url).await?;
        let status = response.status();
        if !status.is_success() {
            return Err(CatalogError::Status(status));
        }

        let products: Vec<Product> = response.json().await?;
        let products = validate(products);

        self.inner
            .cache
            .insert(PRODUCTS_CACHE_KEY.to_string(), products.clone())
            .await;
        Ok(products)
    }

    #[instrument(skip(self))]
    async fn product(&self, id: ProductId) -> Result<Option<Product>, CatalogError> {
        let url = self.endpoint(&format!("products/{id}"))?;
        let response = self.get(url).await?;
        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !status.is_success() {
            return Err(CatalogError::Status(status));
        }

        let product: Product = response.json().await?;
        Ok(validate_requested(product))
    }
}

/// Invariant check for a record fetched by id. Reads as absent like a
/// 404, but with its own message so the two cases stay distinguishable
/// in the logs.
fn validate_requested(product: Product) -> Option<Product> {
    if product.price.amount < rust_decimal::Decimal::ZERO {
        tracing::warn!(
            product_id = %product.id,
            "requested catalog record has negative price; treating as absent"
        );
        return None;
    }
    Some(product)
}

/// Drop records that violate catalog invariants rather than letting them
/// into a store. Currently: prices must be non-negative.
fn validate(products: Vec<Product>) -> Vec<Product> {
    products
        .into_iter()
        .filter(|product| {
            let valid = product.price.amount >= rust_decimal::Decimal::ZERO;
            if !valid {
                tracing::warn!(
                    product_id = %product.id,
                    "dropping catalog record with negative price"
                );
            }
            valid
        })
        .collect()
}
