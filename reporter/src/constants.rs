//! Known program and account addresses for the perpetuals pool.

use solana_sdk::pubkey::Pubkey;
use valuation::AssetKind;

/// Perpetuals program id.
pub const PERPETUALS_PROGRAM: &str = "PERPHjGBqRHArX4DySjwM6UJHiR3sWAatqfdBS2qQJu";

/// Liquidity pool account.
pub const POOL_ACCOUNT: &str = "5BUwFW4nRbftYTDMbgxykoFWqWHPzahFSNAaaaJtVKsq";

/// Custody accounts, one per backing asset.
pub const CUSTODY_SOL: &str = "7xS2gz2bTp3fwCC7knJvUWTEU9Tycczu6VhJYKgi1wdz";
pub const CUSTODY_ETH: &str = "AQCGyheWPLeo6Qp9WpYS9m3Qj479t7R636N9ey1rEjEn";
pub const CUSTODY_BTC: &str = "5Pv3gM9JrFFH883SWAhvJC9RPYmo8UNxuFtv5bMMALkm";
pub const CUSTODY_USDC: &str = "G18jKKXQwBbrHeiK3C9MRXhkHsLHf7XgCSisykV46EZa";
pub const CUSTODY_USDT: &str = "4vkNeXiYEUizLdrpdPS1eC2mccyM4NUPRtERrk6ZETkk";

/// Feed ids tracked by default, one per pool asset.
pub const DEFAULT_FEED_IDS: &[&str] = &["BTCUSD", "ETHUSD", "SOLUSD", "USDCUSD", "USDTUSD"];

/// Characters of the address kept as the display label for a custody this
/// build does not recognize.
const UNKNOWN_LABEL_LEN: usize = 8;

/// Map a custody address to the asset it backs.
pub fn classify_custody(custody: &Pubkey) -> AssetKind {
    let address = custody.to_string();

    match address.as_str() {
        CUSTODY_SOL => AssetKind::Sol,
        CUSTODY_ETH => AssetKind::Eth,
        CUSTODY_BTC => AssetKind::Btc,
        CUSTODY_USDC => AssetKind::Usdc,
        CUSTODY_USDT => AssetKind::Usdt,
        _ => AssetKind::Other(address.chars().take(UNKNOWN_LABEL_LEN).collect()),
    }
}
