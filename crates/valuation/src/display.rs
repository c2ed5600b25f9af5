//! Integer-exact report formatting.
//!
//! All strings are produced by integer divide/modulo on the fixed-point
//! values; nothing round-trips through floating point.

use crate::custody::USD_DECIMALS;
use crate::math::{self, U256};

/// Human-readable token quantity: `quantity / 10^decimals` with up to
/// `decimals` fractional digits, trailing zeros trimmed.
pub fn format_token_amount(quantity: U256, decimals: u8) -> String {
    let scale = math::pow10(decimals as u32);
    let whole = group_thousands(&(quantity / scale).to_string());
    let frac = quantity % scale;

    if decimals == 0 || frac.is_zero() {
        return whole;
    }

    let frac = format!("{:0>width$}", frac.to_string(), width = decimals as usize);
    format!("{}.{}", whole, frac.trim_end_matches('0'))
}

/// USD ×10^6 rendered as dollars with exactly two decimals (floor).
pub fn format_usd(value: U256) -> String {
    let scale = math::pow10(USD_DECIMALS);
    let dollars = value / scale;
    let cents = (value % scale) / math::pow10(USD_DECIMALS - 2);

    format!(
        "${}.{:02}",
        group_thousands(&dollars.to_string()),
        cents.low_u64()
    )
}

/// Percentage share from basis points; `None` means the pool values to
/// zero and no share is defined.
pub fn format_share(bps: Option<u64>) -> String {
    match bps {
        Some(bps) => format!("{}.{:02}%", bps / 100, bps % 100),
        None => "not available".to_string(),
    }
}

fn group_thousands(digits: &str) -> String {
    let bytes = digits.as_bytes();
    let mut out = String::with_capacity(bytes.len() + bytes.len() / 3);

    for (i, b) in bytes.iter().enumerate() {
        if i > 0 && (bytes.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(*b as char);
    }

    out
}
