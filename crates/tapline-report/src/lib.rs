//! Report composition and output formatting for the tapline keg depletion engine.
//!
//! This crate turns store lookups and engine output into rendered reports:
//!
//! - [`ReportService`] - Runs the lookups and the engine, yields report payloads
//! - [`ReportFormatter`] - Renders reports to a writer (JSON, text, CSV)

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/tapline/tapline/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod csv;
mod formatter;
mod json;
mod service;
mod text;

pub use crate::csv::CsvReportFormatter;
pub use formatter::{FormatError, ReportFormat, ReportFormatter};
pub use json::JsonReportFormatter;
pub use service::{BarrelReport, EventReport, ReportError, ReportService};
pub use text::TextReportFormatter;
