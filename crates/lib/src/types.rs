use crate::constants::PLACEHOLDER;
use chrono::NaiveDate;
use serde::Deserialize;
use std::path::PathBuf;

// --- Studies API Model ---
//
// Only the fields the report reads are modelled. Every level is optional so a
// sparse record still deserializes; defaults are applied at the read sites in
// `extract`.

/// The body returned by `GET /api/v2/studies`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudiesResponse {
    pub studies: Vec<StudyRecord>,
    pub next_page_token: Option<String>,
}

/// One trial's metadata as returned by the studies API.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StudyRecord {
    pub protocol_section: Option<ProtocolSection>,
}

impl StudyRecord {
    /// The record's NCT identifier, when the identification module carries one.
    pub fn nct_id(&self) -> Option<&str> {
        self.protocol_section
            .as_ref()
            .and_then(|p| p.identification_module.as_ref())
            .and_then(|m| m.nct_id.as_deref())
    }
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProtocolSection {
    pub identification_module: Option<IdentificationModule>,
    pub sponsor_collaborators_module: Option<SponsorCollaboratorsModule>,
    pub contacts_locations_module: Option<ContactsLocationsModule>,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct IdentificationModule {
    pub nct_id: Option<String>,
    pub brief_title: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SponsorCollaboratorsModule {
    pub lead_sponsor: Option<LeadSponsor>,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct LeadSponsor {
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ContactsLocationsModule {
    pub central_contacts: Option<Vec<CentralContact>>,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct CentralContact {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
}

// --- Report Model ---

/// One flattened (study, contact) line of the report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedRow {
    pub brief_title: String,
    pub lead_sponsor: String,
    pub contact_name: String,
    pub contact_phone: String,
    pub contact_email: String,
}

impl ExtractedRow {
    /// Column headers, in the same order as [`ExtractedRow::cells`].
    pub const HEADERS: [&'static str; 5] = [
        "Brief Title",
        "Lead Sponsor",
        "Contact Name",
        "Contact Phone",
        "Contact Email",
    ];

    /// A row for a study with no central contacts.
    pub fn without_contact(brief_title: &str, lead_sponsor: &str) -> Self {
        Self {
            brief_title: brief_title.to_string(),
            lead_sponsor: lead_sponsor.to_string(),
            contact_name: PLACEHOLDER.to_string(),
            contact_phone: PLACEHOLDER.to_string(),
            contact_email: PLACEHOLDER.to_string(),
        }
    }

    /// The row's values in column order.
    pub fn cells(&self) -> [&str; 5] {
        [
            self.brief_title.as_str(),
            self.lead_sponsor.as_str(),
            self.contact_name.as_str(),
            self.contact_phone.as_str(),
            self.contact_email.as_str(),
        ]
    }
}

/// Summary of a completed pipeline run.
#[derive(Debug, Clone)]
pub struct RunReport {
    pub report_date: NaiveDate,
    pub identifiers: usize,
    pub records: usize,
    pub rows: usize,
    pub output_path: PathBuf,
}
