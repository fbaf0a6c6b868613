//! Shared fixtures for the `trialfeed` test suites: feed XML, study JSON, and
//! wiremock responders standing in for the ClinicalTrials.gov endpoints.

use serde_json::{json, Value};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use wiremock::{Request, Respond, ResponseTemplate};

// --- Feed Fixtures ---

/// Builds an RSS 2.0 document with one `<item>` per link.
pub fn feed_xml(links: &[&str]) -> String {
    let items: String = links
        .iter()
        .enumerate()
        .map(|(i, link)| {
            format!(
                "<item><title>Study {i}</title><link>{link}</link><description>New study.</description></item>"
            )
        })
        .collect();
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0">
<channel>
    <title>ClinicalTrials.gov</title>
    <link>https://clinicaltrials.gov</link>
    <description>Newly posted studies</description>
    {items}
</channel>
</rss>"#
    )
}

/// A study link in the shape the public feed uses.
pub fn study_link(nct_id: &str) -> String {
    format!("https://clinicaltrials.gov/study/{nct_id}?tab=results")
}

// --- Study Fixtures ---

/// A study record with a title, lead sponsor and the given central contacts
/// as `(name, phone, email)` triples.
pub fn study_json(nct_id: &str, title: &str, sponsor: &str, contacts: &[(&str, &str, &str)]) -> Value {
    let contacts: Vec<Value> = contacts
        .iter()
        .map(|(name, phone, email)| json!({ "name": name, "phone": phone, "email": email }))
        .collect();
    json!({
        "protocolSection": {
            "identificationModule": { "nctId": nct_id, "briefTitle": title },
            "sponsorCollaboratorsModule": { "leadSponsor": { "name": sponsor, "class": "INDUSTRY" } },
            "contactsLocationsModule": { "centralContacts": contacts }
        },
        "hasResults": false
    })
}

/// Wraps study records in the studies endpoint's response envelope.
pub fn studies_body(studies: Vec<Value>) -> Value {
    json!({ "studies": studies })
}

// --- Responders ---

/// Answers a studies request with one minimal record per identifier found in
/// its `filter.ids` parameter, and counts the requests it served.
#[derive(Clone, Default)]
pub struct EchoStudies {
    served: Arc<AtomicUsize>,
}

impl EchoStudies {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of requests answered so far.
    pub fn served(&self) -> usize {
        self.served.load(Ordering::SeqCst)
    }
}

impl Respond for EchoStudies {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        self.served.fetch_add(1, Ordering::SeqCst);
        let ids = filter_ids(request);
        let studies = ids
            .iter()
            .map(|id| study_json(id, &format!("Title of {id}"), "Echo Sponsor", &[]))
            .collect();
        ResponseTemplate::new(200).set_body_json(studies_body(studies))
    }
}

/// The identifiers a studies request asked for, in order.
pub fn filter_ids(request: &Request) -> Vec<String> {
    request
        .url
        .query_pairs()
        .find(|(key, _)| key == "filter.ids")
        .map(|(_, value)| value.split('|').map(str::to_string).collect())
        .unwrap_or_default()
}
