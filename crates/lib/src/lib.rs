//! # `trialfeed`: Core Library
//!
//! This crate holds the pieces of the daily clinical-trials report that do not
//! touch the network or the filesystem: the study data model returned by the
//! studies API, the flattened row type written to the spreadsheet, the report
//! date resolver, and the field extractor that turns one into the other.
//!
//! The fetching and writing stages live in the plugin crates (`trialfeed-rss`,
//! `trialfeed-studies`, `trialfeed-sheets`) and are composed by `trialfeed-cli`.

pub mod constants;
pub mod date;
pub mod extract;
pub mod types;

pub use date::{format_report_date, resolve_report_date};
pub use extract::extract_rows;
pub use types::{ExtractedRow, RunReport, StudiesResponse, StudyRecord};
