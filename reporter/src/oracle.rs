//! Oracle feed client
//!
//! Fetches the tracked price feeds from the oracle HTTP endpoint in one
//! request and converts them into the valuation engine's feed records.

use anyhow::{Context, Result};
use serde::Deserialize;
use valuation::FeedRecord;

/// One feed entry as served by the oracle endpoint.
#[derive(Debug, Deserialize)]
pub struct DovesFeed {
    #[serde(rename = "feedId")]
    pub feed_id: String,
    pub price: u64,
    pub ts: i64,
    pub expo: i32,
}

impl From<DovesFeed> for FeedRecord {
    fn from(feed: DovesFeed) -> Self {
        FeedRecord {
            feed_id: feed.feed_id,
            price: feed.price,
            timestamp: feed.ts,
            expo: feed.expo,
        }
    }
}

/// Fetch all tracked feeds. The endpoint takes the feed ids joined with
/// commas, lowercase, as the final path segment.
pub async fn fetch_feeds(
    client: &reqwest::Client,
    base_url: &str,
    feed_ids: &[String],
) -> Result<Vec<FeedRecord>> {
    let url = format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        feed_ids.join(",").to_lowercase()
    );

    let response = client
        .get(&url)
        .send()
        .await
        .context("oracle request failed")?
        .error_for_status()
        .context("oracle returned error status")?;

    let body = response
        .text()
        .await
        .context("failed to read oracle response")?;
    let feeds: Vec<DovesFeed> =
        serde_json::from_str(&body).context("failed to decode oracle response")?;

    Ok(feeds.into_iter().map(FeedRecord::from).collect())
}
