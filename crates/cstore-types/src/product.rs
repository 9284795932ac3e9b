//! Product catalog types.
//!
//! A `Product` is one promotional listing as it appears in the catalog
//! file. Products are immutable once loaded and uniqueness is not enforced:
//! the same item can legitimately appear twice (e.g. under two events).

use serde::{Deserialize, Serialize};

/// A single promotional product listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Store brand (e.g. "CU", "GS25", "7Eleven", "emart24").
    pub brand: String,
    /// Product display name.
    pub name: String,
    /// Price in won.
    pub price: i64,
    /// Promotion label (e.g. "1+1", "2+1").
    pub event: String,
    /// Product category (e.g. "음료", "과자").
    pub category: String,
}

impl Product {
    /// Case-insensitive substring match against the product name.
    ///
    /// `needle_lower` must already be lowercased; callers match many
    /// products against one needle.
    pub fn name_contains(&self, needle_lower: &str) -> bool {
        self.name.to_lowercase().contains(needle_lower)
    }
}

/// Headline statistics shown in the dashboard sidebar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogSummary {
    /// Total number of promotional listings.
    pub total_count: usize,
    /// Number of distinct brands participating.
    pub brands_count: usize,
}

/// Per-brand listing counts, used by the summary command and brand table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrandStat {
    pub brand: String,
    pub product_count: usize,
    /// Listing count per event label, sorted by count desc then label.
    pub events: Vec<EventCount>,
}

/// Number of listings carrying one event label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventCount {
    pub event: String,
    pub count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(name: &str) -> Product {
        Product {
            brand: "CU".to_string(),
            name: name.to_string(),
            price: 1500,
            event: "1+1".to_string(),
            category: "음료".to_string(),
        }
    }

    #[test]
    fn test_name_contains_is_case_insensitive() {
        let p = product("Coca-Cola Zero 500ml");
        assert!(p.name_contains("coca"));
        assert!(p.name_contains("zero"));
        assert!(!p.name_contains("pepsi"));
    }

    #[test]
    fn test_name_contains_korean() {
        let p = product("서울우유 바나나맛");
        assert!(p.name_contains("바나나"));
        assert!(p.name_contains(""));
    }

    #[test]
    fn test_product_serde() {
        let p = product("새우깡");
        let json = serde_json::to_string(&p).unwrap();
        let parsed: Product = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, p);
    }
}
