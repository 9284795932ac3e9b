use rand::Rng;
use rand::seq::index;
use serde::Serialize;

use cstore_types::product::Product;

/// Number of leading query characters used as the match key.
pub const QUERY_KEY_CHARS: usize = 4;

/// Cap on products taken from a name match.
pub const MAX_MATCHED: usize = 30;

/// Cap on products taken by the random fallback.
pub const MAX_SAMPLED: usize = 20;

/// The match key for a query: its first four characters.
///
/// Counts characters, not bytes, so a Hangul query keeps four syllables.
pub fn query_key(query: &str) -> String {
    query.chars().take(QUERY_KEY_CHARS).collect()
}

/// How a context subset was chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionStrategy {
    /// Name substring match on the query key.
    Matched,
    /// No name matched; uniform random sample of the catalog.
    Sampled,
}

/// A bounded subset of the catalog to ground one answer.
#[derive(Debug, Clone, PartialEq)]
pub struct ContextSelection {
    pub key: String,
    pub strategy: SelectionStrategy,
    pub products: Vec<Product>,
}

/// Picks which products are shown to the model for a given query.
///
/// If any product name contains the query key (case-insensitive), the
/// first `max_matched` matches in catalog order are used. Otherwise a
/// uniform sample without replacement of `min(len, max_sampled)` products
/// is drawn, kept in catalog order.
#[derive(Debug, Clone, Copy)]
pub struct ContextSelector {
    max_matched: usize,
    max_sampled: usize,
}

impl Default for ContextSelector {
    fn default() -> Self {
        Self {
            max_matched: MAX_MATCHED,
            max_sampled: MAX_SAMPLED,
        }
    }
}

impl ContextSelector {
    pub fn new(max_matched: usize, max_sampled: usize) -> Self {
        Self {
            max_matched,
            max_sampled,
        }
    }

    pub fn select<R: Rng + ?Sized>(
        &self,
        query: &str,
        catalog: &[Product],
        rng: &mut R,
    ) -> ContextSelection {
        let key = query_key(query);
        let needle = key.to_lowercase();

        let matched: Vec<Product> = catalog
            .iter()
            .filter(|p| p.name_contains(&needle))
            .take(self.max_matched)
            .cloned()
            .collect();

        if !matched.is_empty() {
            return ContextSelection {
                key,
                strategy: SelectionStrategy::Matched,
                products: matched,
            };
        }

        let amount = catalog.len().min(self.max_sampled);
        let mut picks = index::sample(rng, catalog.len(), amount).into_vec();
        picks.sort_unstable();

        ContextSelection {
            key,
            strategy: SelectionStrategy::Sampled,
            products: picks.into_iter().map(|i| catalog[i].clone()).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::test_support::product;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn numbered_catalog(n: usize, name_prefix: &str) -> Vec<Product> {
        (0..n)
            .map(|i| product("CU", &format!("{name_prefix} {i}"), 1000 + i as i64, "1+1"))
            .collect()
    }

    #[test]
    fn test_query_key_counts_characters() {
        assert_eq!(query_key("막걸리 안주 추천"), "막걸리 ");
        assert_eq!(query_key("cola"), "cola");
        assert_eq!(query_key("ab"), "ab");
        assert_eq!(query_key(""), "");
    }

    #[test]
    fn test_match_caps_at_thirty_in_catalog_order() {
        let catalog = numbered_catalog(45, "Banana");
        let mut rng = StdRng::seed_from_u64(7);

        let selection = ContextSelector::default().select("banana milk", &catalog, &mut rng);

        assert_eq!(selection.strategy, SelectionStrategy::Matched);
        assert_eq!(selection.key, "bana");
        assert_eq!(selection.products.len(), 30);
        assert_eq!(selection.products, catalog[..30].to_vec());
    }

    #[test]
    fn test_match_is_case_insensitive_and_skips_non_matches() {
        let catalog = vec![
            product("CU", "새우깡", 1500, "2+1"),
            product("GS25", "COCA-COLA 500ml", 2200, "1+1"),
            product("CU", "콘칩", 1400, "1+1"),
            product("emart24", "Coca-Cola Zero", 2100, "2+1"),
        ];
        let mut rng = StdRng::seed_from_u64(1);

        let selection = ContextSelector::default().select("Coca please", &catalog, &mut rng);

        assert_eq!(selection.strategy, SelectionStrategy::Matched);
        let names: Vec<&str> = selection.products.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["COCA-COLA 500ml", "Coca-Cola Zero"]);
    }

    #[test]
    fn test_fallback_samples_twenty_distinct() {
        let catalog = numbered_catalog(100, "상품");
        let mut rng = StdRng::seed_from_u64(42);

        let selection = ContextSelector::default().select("xyzw", &catalog, &mut rng);

        assert_eq!(selection.strategy, SelectionStrategy::Sampled);
        assert_eq!(selection.products.len(), 20);
        let mut names: Vec<&str> = selection.products.iter().map(|p| p.name.as_str()).collect();
        let before = names.len();
        names.dedup();
        assert_eq!(names.len(), before);
        assert!(selection.products.iter().all(|p| catalog.contains(p)));
    }

    #[test]
    fn test_fallback_keeps_catalog_order() {
        let catalog = numbered_catalog(100, "상품");
        let mut rng = StdRng::seed_from_u64(3);

        let selection = ContextSelector::default().select("zzzz", &catalog, &mut rng);

        let prices: Vec<i64> = selection.products.iter().map(|p| p.price).collect();
        let mut sorted = prices.clone();
        sorted.sort_unstable();
        assert_eq!(prices, sorted);
    }

    #[test]
    fn test_fallback_small_catalog_returns_whole_catalog() {
        let catalog = numbered_catalog(5, "상품");
        let mut rng = StdRng::seed_from_u64(9);

        let selection = ContextSelector::default().select("없는말", &catalog, &mut rng);

        assert_eq!(selection.strategy, SelectionStrategy::Sampled);
        assert_eq!(selection.products, catalog);
    }

    #[test]
    fn test_fallback_is_reproducible_with_seed() {
        let catalog = numbered_catalog(100, "상품");
        let selector = ContextSelector::default();

        let a = selector.select("zzzz", &catalog, &mut StdRng::seed_from_u64(11));
        let b = selector.select("zzzz", &catalog, &mut StdRng::seed_from_u64(11));

        assert_eq!(a, b);
    }

    #[test]
    fn test_empty_catalog_yields_empty_selection() {
        let mut rng = StdRng::seed_from_u64(0);
        let selection = ContextSelector::default().select("아무거나", &[], &mut rng);
        assert!(selection.products.is_empty());
    }

    #[test]
    fn test_empty_query_matches_first_thirty() {
        let catalog = numbered_catalog(40, "상품");
        let mut rng = StdRng::seed_from_u64(0);

        let selection = ContextSelector::default().select("", &catalog, &mut rng);

        assert_eq!(selection.strategy, SelectionStrategy::Matched);
        assert_eq!(selection.products.len(), 30);
    }
}
