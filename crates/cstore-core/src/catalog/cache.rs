//! Time-bounded cache in front of a [`CatalogSource`].
//!
//! One catalog value is cached for `ttl`; within that window every caller
//! sees the same `Arc<ProductCatalog>`. Failed loads are not cached, so the
//! next call retries the source.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use tracing::{debug, warn};

use cstore_types::error::CatalogError;
use cstore_types::product::CatalogSummary;

use super::ProductCatalog;
use super::source::CatalogSource;

/// Default catalog lifetime.
pub const DEFAULT_CATALOG_TTL: Duration = Duration::from_secs(3600);

pub struct CatalogCache<S> {
    source: S,
    cache: Cache<(), Arc<ProductCatalog>>,
}

impl<S: CatalogSource> CatalogCache<S> {
    pub fn new(source: S, ttl: Duration) -> Self {
        let cache = Cache::builder().max_capacity(1).time_to_live(ttl).build();
        Self { source, cache }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Return the cached catalog, loading it from the source on a miss.
    ///
    /// Concurrent misses share a single load.
    pub async fn get(&self) -> Result<Arc<ProductCatalog>, CatalogError> {
        self.cache
            .try_get_with((), async {
                debug!(source = %self.source.describe(), "loading product catalog");
                let products = self.source.load().await?;
                debug!(count = products.len(), "product catalog loaded");
                Ok::<_, CatalogError>(Arc::new(ProductCatalog::new(products)))
            })
            .await
            .map_err(|e: Arc<CatalogError>| (*e).clone())
    }

    /// Headline statistics, or `None` when the catalog cannot be loaded.
    pub async fn summary(&self) -> Option<CatalogSummary> {
        match self.get().await {
            Ok(catalog) => Some(catalog.summary()),
            Err(e) => {
                warn!(error = %e, "catalog unavailable for summary");
                None
            }
        }
    }

    /// Drop the cached catalog so the next `get` reloads it.
    pub async fn invalidate(&self) {
        self.cache.invalidate_all();
        self.cache.run_pending_tasks().await;
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use cstore_types::error::CatalogError;
    use cstore_types::product::Product;

    use crate::catalog::CatalogSource;

    /// In-memory source that counts how many times it was loaded.
    pub struct CountingSource {
        pub products: Option<Vec<Product>>,
        pub loads: Arc<AtomicUsize>,
    }

    impl CountingSource {
        pub fn new(products: Vec<Product>) -> Self {
            Self {
                products: Some(products),
                loads: Arc::new(AtomicUsize::new(0)),
            }
        }

        pub fn failing() -> Self {
            Self {
                products: None,
                loads: Arc::new(AtomicUsize::new(0)),
            }
        }

        pub fn load_count(&self) -> usize {
            self.loads.load(Ordering::SeqCst)
        }
    }

    impl CatalogSource for CountingSource {
        fn describe(&self) -> String {
            "memory".to_string()
        }

        async fn load(&self) -> Result<Vec<Product>, CatalogError> {
            self.loads.fetch_add(1, Ordering::SeqCst);
            self.products
                .clone()
                .ok_or_else(|| CatalogError::NotFound("memory".to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::CountingSource;
    use super::*;
    use crate::catalog::test_support::sample_products;

    #[tokio::test]
    async fn test_get_within_ttl_loads_once() {
        let cache = CatalogCache::new(CountingSource::new(sample_products()), DEFAULT_CATALOG_TTL);

        let first = cache.get().await.unwrap();
        let second = cache.get().await.unwrap();

        assert_eq!(cache.source().load_count(), 1);
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(cache.summary().await, Some(first.summary()));
        assert_eq!(cache.source().load_count(), 1);
    }

    #[tokio::test]
    async fn test_get_reloads_after_ttl() {
        let cache = CatalogCache::new(
            CountingSource::new(sample_products()),
            Duration::from_millis(50),
        );

        cache.get().await.unwrap();
        tokio::time::sleep(Duration::from_millis(150)).await;
        cache.get().await.unwrap();

        assert_eq!(cache.source().load_count(), 2);
    }

    #[tokio::test]
    async fn test_failed_load_is_not_cached() {
        let cache = CatalogCache::new(CountingSource::failing(), DEFAULT_CATALOG_TTL);

        assert!(matches!(cache.get().await, Err(CatalogError::NotFound(_))));
        assert!(cache.get().await.is_err());
        assert_eq!(cache.source().load_count(), 2);
        assert_eq!(cache.summary().await, None);
    }

    #[tokio::test]
    async fn test_invalidate_forces_reload() {
        let cache = CatalogCache::new(CountingSource::new(sample_products()), DEFAULT_CATALOG_TTL);

        cache.get().await.unwrap();
        cache.invalidate().await;
        cache.get().await.unwrap();

        assert_eq!(cache.source().load_count(), 2);
    }
}
