//! # `trialfeed-rss`: Daily Feed Fetcher
//!
//! This crate fetches the ClinicalTrials.gov syndication feed for a single
//! "first posted" day and turns its item links into trial identifiers.

use chrono::NaiveDate;
use reqwest::{Client, StatusCode, Url};
use rss::Channel;
use thiserror::Error;
use tracing::{debug, info};
use trialfeed::constants::{FEED_DATE_FIELD, FEED_PATH, STUDY_LINK_MARKER};
use trialfeed::format_report_date;

/// Custom error types for the feed fetching process.
#[derive(Error, Debug)]
pub enum FeedError {
    #[error("Invalid feed URL: {0}")]
    InvalidUrl(String),
    #[error("Failed to fetch data. Status code: {}", .0.as_u16())]
    Status(StatusCode),
    #[error("Failed to fetch RSS feed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("Failed to parse RSS feed: {0}")]
    Parse(#[from] rss::Error),
}

/// Builds the feed URL for studies first posted on `date`.
///
/// The date is used as both ends of the range filter, e.g.
/// `<base>/api/rss?firstPost=2024-07-14_2024-07-14&dateField=StudyFirstPostDate`.
pub fn feed_url(base_url: &str, date: NaiveDate) -> Result<Url, FeedError> {
    let day = format_report_date(date);
    let endpoint = format!("{}{}", base_url.trim_end_matches('/'), FEED_PATH);
    Url::parse_with_params(
        &endpoint,
        &[
            ("firstPost", format!("{day}_{day}")),
            ("dateField", FEED_DATE_FIELD.to_string()),
        ],
    )
    .map_err(|e| FeedError::InvalidUrl(format!("{endpoint}: {e}")))
}

/// Pulls the trial identifier out of a feed link.
///
/// Returns the text after the first `study/` marker, cut at any further marker
/// and at the query string. Links without the marker, or with nothing after
/// it, yield `None`.
pub fn extract_trial_id(link: &str) -> Option<&str> {
    let after_marker = link.split(STUDY_LINK_MARKER).nth(1)?;
    let id = after_marker.split('?').next().unwrap_or_default();
    (!id.is_empty()).then_some(id)
}

/// Collects identifiers from every item of a parsed channel, in feed order.
pub fn trial_ids_from_channel(channel: &Channel) -> Vec<String> {
    channel
        .items()
        .iter()
        .filter_map(|item| item.link())
        .filter_map(|link| {
            let id = extract_trial_id(link);
            if id.is_none() {
                debug!("Skipping feed link without a study identifier: {link}");
            }
            id
        })
        .map(str::to_string)
        .collect()
}

/// Fetches the daily feed from a configured ClinicalTrials.gov host.
#[derive(Debug, Clone)]
pub struct FeedFetcher {
    client: Client,
    base_url: String,
}

impl FeedFetcher {
    /// Creates a new `FeedFetcher` sharing the given HTTP client.
    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    /// Fetches the feed for `date` and returns the identifiers it lists.
    ///
    /// A non-success status is reported as [`FeedError::Status`]; the caller
    /// treats it as fatal for the whole run.
    pub async fn fetch_trial_ids(&self, date: NaiveDate) -> Result<Vec<String>, FeedError> {
        let url = feed_url(&self.base_url, date)?;
        info!("Fetching RSS feed from: {url}");

        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FeedError::Status(status));
        }

        let content = response.bytes().await?;
        let channel = Channel::read_from(&content[..])?;
        let ids = trial_ids_from_channel(&channel);

        info!(
            "Feed listed {} items, {} with a study identifier.",
            channel.items().len(),
            ids.len()
        );
        Ok(ids)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_trial_id_strips_query_string() {
        assert_eq!(
            extract_trial_id("https://clinicaltrials.gov/study/NCT06500001?tab=history"),
            Some("NCT06500001")
        );
        assert_eq!(
            extract_trial_id("https://clinicaltrials.gov/study/NCT06500002"),
            Some("NCT06500002")
        );
    }

    #[test]
    fn test_extract_trial_id_rejects_links_without_marker() {
        assert_eq!(extract_trial_id("https://clinicaltrials.gov/search?term=x"), None);
        assert_eq!(extract_trial_id("https://clinicaltrials.gov/study/"), None);
    }

    #[test]
    fn test_extract_trial_id_stops_at_second_marker() {
        assert_eq!(
            extract_trial_id("https://host/study/NCT1/study/NCT2"),
            Some("NCT1/")
        );
    }

    #[test]
    fn test_feed_url_uses_date_as_both_range_ends() {
        let date = NaiveDate::from_ymd_opt(2024, 7, 14).unwrap();
        let url = feed_url("https://clinicaltrials.gov/", date).unwrap();
        assert_eq!(url.path(), "/api/rss");
        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert_eq!(
            pairs,
            vec![
                ("firstPost".to_string(), "2024-07-14_2024-07-14".to_string()),
                ("dateField".to_string(), "StudyFirstPostDate".to_string()),
            ]
        );
    }

    #[test]
    fn test_feed_url_rejects_garbage_base() {
        let date = NaiveDate::from_ymd_opt(2024, 7, 14).unwrap();
        assert!(matches!(
            feed_url("not a url", date),
            Err(FeedError::InvalidUrl(_))
        ));
    }
}
