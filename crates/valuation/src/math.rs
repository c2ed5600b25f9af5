//! Exact arithmetic on 256-bit unsigned integers.
//!
//! Raw on-chain amounts are u64, but intermediates like
//! quantity × mantissa × 10^e exceed 128 bits, so every scale conversion
//! runs in U256. All helpers are total: addition and multiplication
//! saturate at MAX, division of or by zero yields zero.

use uint::construct_uint;

construct_uint! {
    /// 256-bit unsigned integer for price and amount intermediates.
    pub struct U256(4);
}

/// 10^exp.
pub fn pow10(exp: u32) -> U256 {
    U256::from(10u8)
        .checked_pow(U256::from(exp))
        .unwrap_or(U256::MAX)
}

/// Add with saturation at MAX.
pub fn add(a: U256, b: U256) -> U256 {
    a.checked_add(b).unwrap_or(U256::MAX)
}

/// Multiply with saturation at MAX.
pub fn mul(a: U256, b: U256) -> U256 {
    a.checked_mul(b).unwrap_or(U256::MAX)
}

/// Floor division; a zero divisor yields zero.
pub fn div(a: U256, b: U256) -> U256 {
    if b.is_zero() {
        U256::zero()
    } else {
        a / b
    }
}
