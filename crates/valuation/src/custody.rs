//! Per-custody valuation.
//!
//! Converts one custody's raw on-chain integers into a held quantity
//! (token units × 10^decimals) and a USD value (×10^6). Stablecoins are
//! rescaled 1:1; floating-price assets are marked at the oracle price,
//! with the guaranteed USD exposure converted into token units and added
//! to the spot holdings.

use crate::asset::AssetKind;
use crate::error::PoolWarning;
use crate::math::{self, U256};
use crate::price::{OraclePrice, PriceTable};

/// USD amounts are fixed-point ×10^USD_DECIMALS.
pub const USD_DECIMALS: u32 = 6;

/// Decoded custody fields the valuer consumes.
#[derive(Debug, Clone)]
pub struct CustodyState {
    pub kind: AssetKind,
    /// Native token decimals: quantities are token units × 10^decimals.
    pub decimals: u8,
    /// Tokens owned by the pool.
    pub owned: u64,
    /// Tokens locked as collateral for open positions.
    pub locked: u64,
    /// USD exposure guaranteed to open shorts, ×10^6.
    pub guaranteed_usd: u64,
    /// Average short entry price, consulted only when the oracle is silent.
    pub fallback_avg_price: u64,
}

/// One asset's valuation within the pool.
#[derive(Debug, Clone)]
pub struct AssetValuation {
    pub symbol: String,
    /// Token units × 10^decimals.
    pub quantity: U256,
    /// USD × 10^6.
    pub usd_value: U256,
    pub decimals: u8,
}

/// Value a single custody against the price table.
///
/// Never fails: a missing or zero oracle price degrades the result
/// (fallback quantity, zero USD value) and surfaces a warning instead.
pub fn value_custody(
    custody: &CustodyState,
    prices: &PriceTable,
) -> (AssetValuation, Option<PoolWarning>) {
    if custody.kind.is_stablecoin() {
        (stablecoin_valuation(custody), None)
    } else {
        floating_valuation(custody, prices)
    }
}

/// Pegged 1:1 to USD: quantity is the full owned balance and the USD value
/// is that balance rescaled from 10^decimals to 10^6.
fn stablecoin_valuation(custody: &CustodyState) -> AssetValuation {
    let quantity = U256::from(custody.owned);

    AssetValuation {
        symbol: custody.kind.symbol().to_string(),
        quantity,
        usd_value: rescale_to_usd(quantity, custody.decimals),
        decimals: custody.decimals,
    }
}

fn floating_valuation(
    custody: &CustodyState,
    prices: &PriceTable,
) -> (AssetValuation, Option<PoolWarning>) {
    let symbol = custody.kind.symbol();
    let base = U256::from(custody.owned.saturating_sub(custody.locked));
    let price = prices.get(symbol).filter(|p| p.mantissa > 0);

    let quantity = if custody.guaranteed_usd == 0 {
        base
    } else {
        match price {
            Some(price) => math::add(
                base,
                guaranteed_usd_in_tokens(custody.guaranteed_usd, custody.decimals, price),
            ),
            // No oracle: convert the exposure at the custody's own average
            // short price, or contribute nothing if that is absent too.
            None if custody.fallback_avg_price > 0 => math::add(
                base,
                math::div(
                    math::mul(
                        U256::from(custody.guaranteed_usd),
                        math::pow10(custody.decimals as u32),
                    ),
                    U256::from(custody.fallback_avg_price),
                ),
            ),
            None => base,
        }
    };

    match price {
        Some(price) => (
            AssetValuation {
                symbol: symbol.to_string(),
                quantity,
                usd_value: tokens_to_usd(quantity, custody.decimals, price),
                decimals: custody.decimals,
            },
            None,
        ),
        None => (
            AssetValuation {
                symbol: symbol.to_string(),
                quantity,
                usd_value: U256::zero(),
                decimals: custody.decimals,
            },
            Some(PoolWarning::MissingPrice {
                symbol: symbol.to_string(),
            }),
        ),
    }
}

/// Convert a USD ×10^6 exposure into token units × 10^decimals at the
/// oracle price mantissa × 10^expo.
///
/// The scale gap is d = decimals − (6 + expo): the power of ten multiplies
/// the exposure when d ≥ 0 and joins the divisor otherwise, so the single
/// floor division always comes last.
fn guaranteed_usd_in_tokens(guaranteed_usd: u64, decimals: u8, price: OraclePrice) -> U256 {
    let exposure = U256::from(guaranteed_usd);
    let mantissa = U256::from(price.mantissa);
    let d = decimals as i64 - (USD_DECIMALS as i64 + price.expo as i64);

    if d >= 0 {
        math::div(math::mul(exposure, math::pow10(d as u32)), mantissa)
    } else {
        math::div(exposure, math::mul(mantissa, math::pow10((-d) as u32)))
    }
}

/// Convert token units × 10^decimals into USD ×10^6 at the oracle price.
///
/// e = expo + 6 − decimals decides whether the power of ten multiplies
/// the quantity times mantissa product or divides it.
fn tokens_to_usd(quantity: U256, decimals: u8, price: OraclePrice) -> U256 {
    let mantissa = U256::from(price.mantissa);
    let e = price.expo as i64 + USD_DECIMALS as i64 - decimals as i64;

    if e >= 0 {
        math::mul(math::mul(quantity, mantissa), math::pow10(e as u32))
    } else {
        math::div(math::mul(quantity, mantissa), math::pow10((-e) as u32))
    }
}

/// Rescale a 1:1-pegged balance from 10^decimals to USD ×10^6.
fn rescale_to_usd(quantity: U256, decimals: u8) -> U256 {
    let decimals = decimals as u32;

    if decimals <= USD_DECIMALS {
        math::mul(quantity, math::pow10(USD_DECIMALS - decimals))
    } else {
        math::div(quantity, math::pow10(decimals - USD_DECIMALS))
    }
}
