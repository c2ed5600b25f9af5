//! Oracle price table, built once per run and immutable afterward.

use std::collections::HashMap;

/// Quote currency suffix carried by every feed id (e.g. "SOLUSD").
const QUOTE_SUFFIX: &str = "USD";

/// Raw oracle feed entry as served by the price endpoint.
#[derive(Debug, Clone)]
pub struct FeedRecord {
    pub feed_id: String,
    /// Price magnitude; true price is `price × 10^expo`.
    pub price: u64,
    pub timestamp: i64,
    pub expo: i32,
}

/// Scaled oracle price: true price = mantissa × 10^expo.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OraclePrice {
    pub mantissa: u64,
    pub expo: i32,
}

/// Symbol-keyed price table.
///
/// Symbols absent from the feed list are simply absent here; the valuer
/// treats a missing entry as "no price", not an error.
#[derive(Debug, Clone, Default)]
pub struct PriceTable {
    prices: HashMap<String, OraclePrice>,
}

impl PriceTable {
    /// Table with no prices at all. Used when the feed fetch failed;
    /// every floating-price valuation then runs in fallback mode.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build from raw feed entries, keying each price by the asset symbol
    /// obtained by stripping the quote-currency suffix from the feed id.
    pub fn from_feeds(feeds: &[FeedRecord]) -> Self {
        let mut prices = HashMap::new();
        for feed in feeds {
            let symbol = feed
                .feed_id
                .strip_suffix(QUOTE_SUFFIX)
                .unwrap_or(&feed.feed_id)
                .to_string();
            prices.insert(
                symbol,
                OraclePrice {
                    mantissa: feed.price,
                    expo: feed.expo,
                },
            );
        }
        Self { prices }
    }

    pub fn get(&self, symbol: &str) -> Option<OraclePrice> {
        self.prices.get(symbol).copied()
    }

    pub fn len(&self) -> usize {
        self.prices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feed(id: &str, price: u64, expo: i32) -> FeedRecord {
        FeedRecord {
            feed_id: id.to_string(),
            price,
            timestamp: 0,
            expo,
        }
    }

    #[test]
    fn test_suffix_stripped() {
        let table = PriceTable::from_feeds(&[feed("SOLUSD", 15_000_000_000, -8)]);

        let price = table.get("SOL").unwrap();
        assert_eq!(price.mantissa, 15_000_000_000);
        assert_eq!(price.expo, -8);
        assert!(table.get("SOLUSD").is_none());
    }

    #[test]
    fn test_suffix_only_at_end() {
        // "USDCUSD" must key as "USDC", not lose its leading letters.
        let table = PriceTable::from_feeds(&[feed("USDCUSD", 99_995_001, -8)]);
        assert!(table.get("USDC").is_some());
    }

    #[test]
    fn test_id_without_suffix_kept_verbatim() {
        let table = PriceTable::from_feeds(&[feed("SOLEUR", 1, 0)]);
        assert!(table.get("SOLEUR").is_some());
    }

    #[test]
    fn test_absent_symbol() {
        let table = PriceTable::from_feeds(&[feed("BTCUSD", 1, 0)]);
        assert!(table.get("ETH").is_none());
    }

    #[test]
    fn test_empty_table() {
        let table = PriceTable::empty();
        assert!(table.is_empty());
        assert_eq!(table.len(), 0);
        assert!(table.get("SOL").is_none());
    }
}
