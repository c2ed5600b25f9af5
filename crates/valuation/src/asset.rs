//! Asset classification for pool custodies.

/// Backing asset held by one custody.
///
/// Classification is closed: the known pool assets, plus `Other` for a
/// custody this build does not recognize, carrying a display label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssetKind {
    Sol,
    Eth,
    Btc,
    Usdc,
    Usdt,
    Other(String),
}

impl AssetKind {
    /// Symbol used for oracle lookups and display.
    pub fn symbol(&self) -> &str {
        match self {
            AssetKind::Sol => "SOL",
            AssetKind::Eth => "ETH",
            AssetKind::Btc => "BTC",
            AssetKind::Usdc => "USDC",
            AssetKind::Usdt => "USDT",
            AssetKind::Other(label) => label,
        }
    }

    /// Stablecoins are valued 1:1 to USD and bypass the oracle.
    pub fn is_stablecoin(&self) -> bool {
        matches!(self, AssetKind::Usdc | AssetKind::Usdt)
    }
}
