//! # `trialfeed-studies`: Study Metadata Fetcher
//!
//! Retrieves study records from the ClinicalTrials.gov v2 studies endpoint for a
//! list of trial identifiers. Identifiers are sent in pipe-joined batches of
//! [`BATCH_SIZE`]. A failed batch contributes no records and never aborts the
//! run.
//!
//! After the primary batches, a catch-up loop keeps requesting while fewer
//! records than identifiers have arrived. The loop works on counts only: it
//! resumes at the identifier whose index equals the number of records received,
//! so it can re-request identifiers that are already covered and it cannot tell
//! which identifiers are actually missing. It also ends as soon as a catch-up
//! request returns no records: the next request would ask for the same
//! identifiers, so carrying on would never terminate.

use reqwest::{Client, StatusCode, Url};
use thiserror::Error;
use tracing::{error, info, warn};
use trialfeed::constants::{BATCH_SIZE, ID_SEPARATOR, STUDIES_PATH};
use trialfeed::{StudiesResponse, StudyRecord};

/// Errors that can occur while fetching a single batch of studies.
#[derive(Error, Debug)]
pub enum StudiesError {
    #[error("Invalid studies URL: {0}")]
    InvalidUrl(String),
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("Request failed with status: {0}")]
    Status(StatusCode),
    #[error("Failed to decode studies response: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Splits identifiers into pipe-joined `filter.ids` values of at most
/// [`BATCH_SIZE`] identifiers each, preserving order.
pub fn batch_queries(ids: &[String]) -> Vec<String> {
    ids.chunks(BATCH_SIZE)
        .map(|chunk| chunk.join(ID_SEPARATOR))
        .collect()
}

/// Builds `<base>/api/v2/studies?filter.ids=<joined>`.
pub fn studies_url(base_url: &str, joined_ids: &str) -> Result<Url, StudiesError> {
    let endpoint = format!("{}{}", base_url.trim_end_matches('/'), STUDIES_PATH);
    Url::parse_with_params(&endpoint, &[("filter.ids", joined_ids)])
        .map_err(|e| StudiesError::InvalidUrl(format!("{endpoint}: {e}")))
}

/// Client for the studies endpoint of a configured ClinicalTrials.gov host.
#[derive(Debug, Clone)]
pub struct StudiesClient {
    client: Client,
    base_url: String,
}

impl StudiesClient {
    /// Creates a new `StudiesClient` sharing the given HTTP client.
    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    /// Fetches one batch, surfacing every failure.
    pub async fn try_fetch_batch(&self, joined_ids: &str) -> Result<Vec<StudyRecord>, StudiesError> {
        let url = studies_url(&self.base_url, joined_ids)?;
        let response = self.client.get(url).send().await?;
        if !response.status().is_success() {
            return Err(StudiesError::Status(response.status()));
        }
        let body = response.bytes().await?;
        let parsed: StudiesResponse = serde_json::from_slice(&body)?;
        if parsed.next_page_token.is_some() {
            info!("Studies response has further pages; only the first page is used.");
        }
        Ok(parsed.studies)
    }

    /// Fetches one batch. Any failure is logged and yields no records.
    pub async fn fetch_batch(&self, joined_ids: &str) -> Vec<StudyRecord> {
        match self.try_fetch_batch(joined_ids).await {
            Ok(studies) => studies,
            Err(e) => {
                error!("Error fetching data: {e}");
                Vec::new()
            }
        }
    }

    /// Fetches records for all identifiers: one request per batch, then the
    /// count-driven catch-up loop.
    pub async fn fetch_studies(&self, ids: &[String]) -> Vec<StudyRecord> {
        let mut records = Vec::new();

        for query in batch_queries(ids) {
            let studies = self.fetch_batch(&query).await;
            records.extend(studies);
        }
        info!(
            "Primary batches returned {} records for {} identifiers.",
            records.len(),
            ids.len()
        );

        while records.len() < ids.len() {
            let start = records.len();
            let end = (start + BATCH_SIZE).min(ids.len());
            let Some(next_chunk) = ids.get(start..end).filter(|chunk| !chunk.is_empty()) else {
                break;
            };

            let studies = self.fetch_batch(&next_chunk.join(ID_SEPARATOR)).await;
            if studies.is_empty() {
                // The next request would be identical.
                warn!(
                    "Catch-up request for identifiers {}..{} returned no records; stopping.",
                    start, end
                );
                break;
            }
            records.extend(studies);
        }

        if records.len() != ids.len() {
            warn!(
                "Received {} study records for {} identifiers; records are not matched to identifiers.",
                records.len(),
                ids.len()
            );
        }
        records
    }
}
