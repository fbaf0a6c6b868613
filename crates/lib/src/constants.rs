//! # Shared Constants
//!
//! Values shared across the `trialfeed` workspace crates. Keeping them here
//! avoids "magic strings" drifting apart between the fetchers and the writer.

/// Literal written in place of any field missing from a study record.
pub const PLACEHOLDER: &str = "N/A";

/// The public ClinicalTrials.gov host used when no override is configured.
pub const DEFAULT_BASE_URL: &str = "https://clinicaltrials.gov";

/// Path of the syndication feed, relative to the base URL.
pub const FEED_PATH: &str = "/api/rss";

/// Path of the studies endpoint, relative to the base URL.
pub const STUDIES_PATH: &str = "/api/v2/studies";

/// Date field the feed's range filter applies to.
pub const FEED_DATE_FIELD: &str = "StudyFirstPostDate";

/// Path segment that marks a feed link as pointing at a single study.
pub const STUDY_LINK_MARKER: &str = "study/";

/// Maximum number of identifiers sent in one studies request.
pub const BATCH_SIZE: usize = 100;

/// Separator used to join identifiers in the `filter.ids` parameter.
pub const ID_SEPARATOR: &str = "|";

/// Format of the report date in URLs and file names.
pub const DATE_FORMAT: &str = "%Y-%m-%d";
