//! Fatal errors and accumulated warnings for the valuation pipeline.

use std::fmt;
use thiserror::Error;

/// Aggregate-level failure: no meaningful snapshot can be produced.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PoolError {
    #[error("pool has no custodies")]
    EmptyPool,
}

/// Non-fatal condition attached to a partial snapshot. The caller decides
/// whether to still present results.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PoolWarning {
    /// No usable oracle price for a floating-price asset; its USD value
    /// is reported as zero.
    MissingPrice { symbol: String },
    /// A custody could not be processed and was left out of the snapshot.
    CustodySkipped { address: String, reason: String },
}

impl fmt::Display for PoolWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PoolWarning::MissingPrice { symbol } => {
                write!(f, "no oracle price for {}, value reported as zero", symbol)
            }
            PoolWarning::CustodySkipped { address, reason } => {
                write!(f, "custody {} skipped: {}", address, reason)
            }
        }
    }
}

/// Per-custody processing failure (fetch or decode) recorded by the
/// collaborator that produced the custody list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustodyFailure {
    pub address: String,
    pub reason: String,
}
