//! Poolwatch Reporter
//!
//! Off-chain service that reports the composition of a perpetuals
//! liquidity pool: per-asset holdings, USD value, and share of total
//! pool value.

mod config;
mod constants;
mod decode;
mod oracle;
mod report;

use anyhow::{bail, Context, Result};
use config::Config;
use futures::future::join_all;
use solana_client::nonblocking::rpc_client::RpcClient;
use solana_sdk::{commitment_config::CommitmentConfig, pubkey::Pubkey};
use std::time::Duration;
use tokio::time;
use valuation::{aggregate, CustodyFailure, CustodyResult, PriceTable};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    log::info!("Starting Poolwatch Reporter");

    // Load configuration
    let config = Config::load().unwrap_or_else(|_| {
        log::warn!("Failed to load config, using default mainnet config");
        Config::default_mainnet()
    });

    log::info!("Connected to RPC: {}", config.rpc_url);
    log::info!("Reporting on pool: {}", config.pool_account);

    // Initialize RPC and HTTP clients
    let client = RpcClient::new_with_commitment(
        config.rpc_url.clone(),
        CommitmentConfig::confirmed(),
    );
    let http = reqwest::Client::new();

    if config.poll_interval_secs == 0 {
        return run_report(&client, &http, &config).await;
    }

    log::info!(
        "Reporter started. Refreshing every {}s...",
        config.poll_interval_secs
    );

    let mut interval = time::interval(Duration::from_secs(config.poll_interval_secs));

    loop {
        interval.tick().await;

        if let Err(e) = run_report(&client, &http, &config).await {
            log::error!("Error producing report: {:#}", e);
        }
    }
}

/// Run the pipeline once: prices, pool, custodies, aggregate, render.
async fn run_report(client: &RpcClient, http: &reqwest::Client, config: &Config) -> Result<()> {
    // Price table first; a failed feed fetch degrades to no-price mode
    // rather than aborting the report.
    let prices = match oracle::fetch_feeds(http, &config.oracle_url, &config.feed_ids).await {
        Ok(feeds) => {
            let table = PriceTable::from_feeds(&feeds);
            log::info!("Oracle prices fetched: {} feeds", table.len());
            table
        }
        Err(e) => {
            log::warn!("Oracle fetch failed, valuing without prices: {:#}", e);
            PriceTable::empty()
        }
    };

    // Custody list from the pool account.
    let pool_account = client
        .get_account(&config.pool_account)
        .await
        .context("failed to fetch pool account")?;

    let program: Pubkey = constants::PERPETUALS_PROGRAM
        .parse()
        .context("perpetuals program id")?;
    if pool_account.owner != program {
        bail!(
            "pool account {} is not owned by the perpetuals program",
            config.pool_account
        );
    }

    let custody_keys =
        decode::decode_pool(&pool_account.data).context("failed to decode pool account")?;

    log::info!("Pool lists {} custodies", custody_keys.len());

    // Fetch custodies concurrently; join_all keeps custody-list order, so
    // the report never depends on completion order.
    let fetches = custody_keys.iter().map(|key| fetch_custody(client, key));
    let custodies: Vec<CustodyResult> = join_all(fetches).await;

    let report = aggregate(&custodies, &prices).context("failed to aggregate pool snapshot")?;

    report::render(&report);

    Ok(())
}

/// Fetch and decode one custody. Failures become per-item records so one
/// bad custody cannot sink the snapshot.
async fn fetch_custody(client: &RpcClient, key: &Pubkey) -> CustodyResult {
    let data = client.get_account_data(key).await.map_err(|e| CustodyFailure {
        address: key.to_string(),
        reason: format!("fetch failed: {}", e),
    })?;

    decode::decode_custody(key, &data).map_err(|e| CustodyFailure {
        address: key.to_string(),
        reason: format!("decode failed: {:#}", e),
    })
}
