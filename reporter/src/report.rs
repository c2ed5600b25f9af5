//! Console presentation of a pool snapshot.

use valuation::display::{format_share, format_token_amount, format_usd};
use valuation::{share_bps, PoolReport};

/// Print the snapshot to stdout, one line per asset in custody-list order,
/// and surface accumulated warnings through the log.
pub fn render(report: &PoolReport) {
    let snapshot = &report.snapshot;

    println!("--- Pool composition ---");
    println!("Total value: {}", format_usd(snapshot.total_usd));

    for asset in &snapshot.assets {
        let share = share_bps(asset.usd_value, snapshot.total_usd);
        println!(
            "{}: {} ({}) {}",
            asset.symbol,
            format_token_amount(asset.quantity, asset.decimals),
            format_usd(asset.usd_value),
            format_share(share),
        );
    }

    println!("------------------------");

    for warning in &report.warnings {
        log::warn!("{}", warning);
    }
}
