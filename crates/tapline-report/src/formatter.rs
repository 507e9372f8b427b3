//! Report output abstraction.

use std::io::Write;
use thiserror::Error;

use crate::service::{BarrelReport, EventReport};

/// Report output format identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ReportFormat {
    /// Human-readable text.
    #[default]
    Text,
    /// JSON object format.
    Json,
    /// CSV format.
    Csv,
}

impl ReportFormat {
    /// Returns the file extension for this format.
    #[must_use]
    pub const fn extension(&self) -> &'static str {
        match self {
            Self::Text => "txt",
            Self::Json => "json",
            Self::Csv => "csv",
        }
    }

    /// Returns all available formats.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Text, Self::Json, Self::Csv]
    }
}

impl std::fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.extension())
    }
}

impl std::str::FromStr for ReportFormat {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            "csv" => Ok(Self::Csv),
            _ => Err(FormatError::UnknownFormat(s.to_string())),
        }
    }
}

/// Errors that can occur during formatting.
#[derive(Error, Debug)]
pub enum FormatError {
    /// Unknown output format.
    #[error("Unknown format: {0}")]
    UnknownFormat(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Trait for report formatters.
pub trait ReportFormatter: Send + Sync {
    /// Writes a barrel depletion report to the output.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    fn write_barrel_report<W: Write + Send>(
        &self,
        report: &BarrelReport,
        writer: W,
    ) -> Result<(), FormatError>;

    /// Writes an event session report to the output.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    fn write_event_report<W: Write + Send>(
        &self,
        report: &EventReport,
        writer: W,
    ) -> Result<(), FormatError>;

    /// Returns the file extension for this format.
    fn extension(&self) -> &str;
}
