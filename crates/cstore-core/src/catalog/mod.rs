//! Product catalog: the loaded listing set, its source port, and the
//! time-bounded cache in front of it.

pub mod cache;
pub mod source;

use std::collections::{BTreeMap, BTreeSet};

use cstore_types::product::{BrandStat, CatalogSummary, EventCount, Product};

pub use cache::CatalogCache;
pub use source::CatalogSource;

/// An immutable, loaded set of promotional listings in file order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductCatalog {
    products: Vec<Product>,
}

impl ProductCatalog {
    pub fn new(products: Vec<Product>) -> Self {
        Self { products }
    }

    /// All listings, in catalog order.
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Total listing count and number of distinct brands.
    pub fn summary(&self) -> CatalogSummary {
        let brands: BTreeSet<&str> = self.products.iter().map(|p| p.brand.as_str()).collect();
        CatalogSummary {
            total_count: self.products.len(),
            brands_count: brands.len(),
        }
    }

    /// Per-brand listing counts with an event-label breakdown.
    ///
    /// Brands are ordered by listing count descending, ties by name.
    pub fn brand_stats(&self) -> Vec<BrandStat> {
        let mut by_brand: BTreeMap<&str, BTreeMap<&str, usize>> = BTreeMap::new();
        for product in &self.products {
            *by_brand
                .entry(product.brand.as_str())
                .or_default()
                .entry(product.event.as_str())
                .or_default() += 1;
        }

        let mut stats: Vec<BrandStat> = by_brand
            .into_iter()
            .map(|(brand, events)| {
                let mut events: Vec<EventCount> = events
                    .into_iter()
                    .map(|(event, count)| EventCount {
                        event: event.to_string(),
                        count,
                    })
                    .collect();
                events.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.event.cmp(&b.event)));
                BrandStat {
                    brand: brand.to_string(),
                    product_count: events.iter().map(|e| e.count).sum(),
                    events,
                }
            })
            .collect();

        stats.sort_by(|a, b| {
            b.product_count
                .cmp(&a.product_count)
                .then_with(|| a.brand.cmp(&b.brand))
        });
        stats
    }

    /// Listings whose name contains `query` (case-insensitive), optionally
    /// restricted to one brand (exact, case-insensitive), in catalog order.
    pub fn search(&self, query: &str, brand: Option<&str>) -> Vec<&Product> {
        let needle = query.to_lowercase();
        self.products
            .iter()
            .filter(|p| brand.is_none_or(|b| p.brand.eq_ignore_ascii_case(b)))
            .filter(|p| p.name_contains(&needle))
            .collect()
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use cstore_types::product::Product;

    pub fn product(brand: &str, name: &str, price: i64, event: &str) -> Product {
        Product {
            brand: brand.to_string(),
            name: name.to_string(),
            price,
            event: event.to_string(),
            category: "음료".to_string(),
        }
    }

    /// Small catalog spanning all four brands.
    pub fn sample_products() -> Vec<Product> {
        vec![
            product("CU", "서울우유 바나나맛", 1800, "1+1"),
            product("GS25", "코카콜라 제로 500ml", 2200, "2+1"),
            product("CU", "새우깡", 1500, "2+1"),
            product("7Eleven", "바나나킥", 1700, "1+1"),
            product("emart24", "막걸리 750ml", 2000, "1+1"),
            product("GS25", "오징어땅콩", 1900, "1+1"),
        ]
    }
}
