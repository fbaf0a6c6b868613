//! # Field Extraction
//!
//! Flattens study records into report rows. Each study yields one row per
//! central contact, or a single row with placeholder contact fields when it
//! lists none. Studies without a protocol section are skipped.

use crate::constants::PLACEHOLDER;
use crate::types::{ExtractedRow, StudyRecord};
use tracing::debug;

impl ExtractedRow {
    /// Builds the rows contributed by a single study record.
    pub fn from_study(study: &StudyRecord) -> Vec<ExtractedRow> {
        let Some(protocol) = study.protocol_section.as_ref() else {
            return Vec::new();
        };

        let brief_title = protocol
            .identification_module
            .as_ref()
            .and_then(|m| m.brief_title.as_deref())
            .unwrap_or(PLACEHOLDER);
        let lead_sponsor = protocol
            .sponsor_collaborators_module
            .as_ref()
            .and_then(|m| m.lead_sponsor.as_ref())
            .and_then(|s| s.name.as_deref())
            .unwrap_or(PLACEHOLDER);
        let contacts = protocol
            .contacts_locations_module
            .as_ref()
            .and_then(|m| m.central_contacts.as_deref())
            .unwrap_or_default();

        if contacts.is_empty() {
            return vec![ExtractedRow::without_contact(brief_title, lead_sponsor)];
        }

        contacts
            .iter()
            .map(|contact| ExtractedRow {
                brief_title: brief_title.to_string(),
                lead_sponsor: lead_sponsor.to_string(),
                contact_name: contact.name.as_deref().unwrap_or(PLACEHOLDER).to_string(),
                contact_phone: contact.phone.as_deref().unwrap_or(PLACEHOLDER).to_string(),
                contact_email: contact.email.as_deref().unwrap_or(PLACEHOLDER).to_string(),
            })
            .collect()
    }
}

/// Flattens all study records into report rows, preserving record order.
pub fn extract_rows(studies: &[StudyRecord]) -> Vec<ExtractedRow> {
    let mut rows = Vec::new();
    for study in studies {
        let extracted = ExtractedRow::from_study(study);
        debug!(
            "Study {} contributed {} rows.",
            study.nct_id().unwrap_or(PLACEHOLDER),
            extracted.len()
        );
        rows.extend(extracted);
    }
    let skipped = studies
        .iter()
        .filter(|s| s.protocol_section.is_none())
        .count();
    debug!(
        "Extracted {} rows from {} studies ({} without a protocol section).",
        rows.len(),
        studies.len(),
        skipped
    );
    rows
}
