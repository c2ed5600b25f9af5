//! Pool aggregation: fold per-custody valuations into a snapshot.

use crate::custody::{value_custody, AssetValuation, CustodyState};
use crate::error::{CustodyFailure, PoolError, PoolWarning};
use crate::math::{self, U256};
use crate::price::PriceTable;

/// Basis points in 100%; shares carry two decimal places.
const BPS_SCALE: u64 = 10_000;

/// Per-custody processing outcome handed to the aggregator.
pub type CustodyResult = Result<CustodyState, CustodyFailure>;

/// Valuations in custody-list order plus the pool total.
#[derive(Debug, Clone)]
pub struct PoolSnapshot {
    pub assets: Vec<AssetValuation>,
    /// Σ usd_value over all included assets, USD × 10^6.
    pub total_usd: U256,
}

/// A (possibly partial) snapshot plus the non-fatal conditions hit while
/// producing it.
#[derive(Debug, Clone)]
pub struct PoolReport {
    pub snapshot: PoolSnapshot,
    pub warnings: Vec<PoolWarning>,
}

/// Run the valuer over every custody, in list order, and fold the results.
///
/// A failed custody is dropped from the snapshot and recorded as a warning
/// rather than aborting the run. An empty custody list is fatal: there is
/// no snapshot to report.
pub fn aggregate(
    custodies: &[CustodyResult],
    prices: &PriceTable,
) -> Result<PoolReport, PoolError> {
    if custodies.is_empty() {
        return Err(PoolError::EmptyPool);
    }

    let mut assets = Vec::with_capacity(custodies.len());
    let mut warnings = Vec::new();

    for item in custodies {
        match item {
            Ok(custody) => {
                let (valuation, warning) = value_custody(custody, prices);
                warnings.extend(warning);
                assets.push(valuation);
            }
            Err(failure) => warnings.push(PoolWarning::CustodySkipped {
                address: failure.address.clone(),
                reason: failure.reason.clone(),
            }),
        }
    }

    // Single fold after all valuations are known, so the total never
    // depends on fetch-side completion order.
    let total_usd = assets
        .iter()
        .fold(U256::zero(), |acc, asset| math::add(acc, asset.usd_value));

    Ok(PoolReport {
        snapshot: PoolSnapshot { assets, total_usd },
        warnings,
    })
}

/// Floor share of the pool in basis points. Undefined when the pool
/// values to zero; the caller reports "not available" instead of dividing.
pub fn share_bps(usd_value: U256, total_usd: U256) -> Option<u64> {
    if total_usd.is_zero() {
        return None;
    }

    let bps = math::mul(usd_value, U256::from(BPS_SCALE)) / total_usd;
    Some(bps.low_u64())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::asset::AssetKind;
    use crate::price::FeedRecord;
    use proptest::prelude::*;

    fn sol_price_table() -> PriceTable {
        PriceTable::from_feeds(&[FeedRecord {
            feed_id: "SOLUSD".to_string(),
            price: 15_000_000_000,
            timestamp: 0,
            expo: -8,
        }])
    }

    fn sol_custody() -> CustodyState {
        CustodyState {
            kind: AssetKind::Sol,
            decimals: 9,
            owned: 1_000_000_000_000,
            locked: 100_000_000_000,
            guaranteed_usd: 0,
            fallback_avg_price: 0,
        }
    }

    fn usdc_custody() -> CustodyState {
        CustodyState {
            kind: AssetKind::Usdc,
            decimals: 6,
            owned: 500_000_000_000,
            locked: 0,
            guaranteed_usd: 0,
            fallback_avg_price: 0,
        }
    }

    #[test]
    fn test_aggregate_two_assets() {
        let custodies: Vec<CustodyResult> = vec![Ok(sol_custody()), Ok(usdc_custody())];

        let report = aggregate(&custodies, &sol_price_table()).unwrap();
        let snapshot = &report.snapshot;

        assert!(report.warnings.is_empty());
        assert_eq!(snapshot.assets.len(), 2);
        // $135,000 + $500,000 = $635,000
        assert_eq!(snapshot.total_usd, U256::from(635_000_000_000u64));

        // 135000000000 × 10000 / 635000000000 floors to 2125 = 21.25%
        let share = share_bps(snapshot.assets[0].usd_value, snapshot.total_usd);
        assert_eq!(share, Some(2_125));
    }

    #[test]
    fn test_empty_pool_is_fatal() {
        let result = aggregate(&[], &PriceTable::empty());
        assert_eq!(result.unwrap_err(), PoolError::EmptyPool);
    }

    #[test]
    fn test_failed_custody_yields_partial_snapshot() {
        let custodies: Vec<CustodyResult> = vec![
            Ok(usdc_custody()),
            Err(CustodyFailure {
                address: "4vkN".to_string(),
                reason: "decode failed".to_string(),
            }),
        ];

        let report = aggregate(&custodies, &PriceTable::empty()).unwrap();

        assert_eq!(report.snapshot.assets.len(), 1);
        assert_eq!(report.snapshot.total_usd, U256::from(500_000_000_000u64));
        assert_eq!(report.warnings.len(), 1);
        assert!(matches!(
            report.warnings[0],
            PoolWarning::CustodySkipped { .. }
        ));
    }

    #[test]
    fn test_missing_price_still_included() {
        let custodies: Vec<CustodyResult> = vec![Ok(sol_custody()), Ok(usdc_custody())];

        let report = aggregate(&custodies, &PriceTable::empty()).unwrap();

        // SOL appears with zero value; USDC carries the whole pool.
        assert_eq!(report.snapshot.assets.len(), 2);
        assert_eq!(report.snapshot.assets[0].usd_value, U256::zero());
        assert_eq!(report.snapshot.total_usd, U256::from(500_000_000_000u64));
        assert_eq!(report.warnings.len(), 1);
    }

    #[test]
    fn test_zero_total_has_no_shares() {
        assert_eq!(share_bps(U256::zero(), U256::zero()), None);
        assert_eq!(share_bps(U256::from(5u8), U256::zero()), None);
    }

    #[test]
    fn test_order_follows_custody_list() {
        let custodies: Vec<CustodyResult> = vec![Ok(usdc_custody()), Ok(sol_custody())];

        let report = aggregate(&custodies, &sol_price_table()).unwrap();

        assert_eq!(report.snapshot.assets[0].symbol, "USDC");
        assert_eq!(report.snapshot.assets[1].symbol, "SOL");
    }

    proptest! {
        // Floor rounding loses strictly less than one basis point per
        // asset, so the shares sum to within assets.len() bps of 100%.
        #[test]
        fn shares_sum_within_floor_tolerance(
            values in proptest::collection::vec(0u64..1_000_000_000_000, 1..10)
        ) {
            let total = values
                .iter()
                .fold(U256::zero(), |acc, v| math::add(acc, U256::from(*v)));
            prop_assume!(!total.is_zero());

            let sum: u64 = values
                .iter()
                .map(|v| share_bps(U256::from(*v), total).unwrap())
                .sum();

            prop_assert!(sum <= BPS_SCALE);
            prop_assert!(sum + values.len() as u64 > BPS_SCALE);
        }
    }
}
