//! JSON report output.

use std::io::Write;

use crate::service::{BarrelReport, EventReport};
use crate::{FormatError, ReportFormatter};

/// JSON report formatter.
///
/// Writes one report object per call, terminated with a newline. The wire
/// field names match the dashboard payloads (camelCase).
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonReportFormatter {
    /// Whether to pretty-print.
    pretty: bool,
}

impl JsonReportFormatter {
    /// Creates a new JSON report formatter with compact output.
    #[must_use]
    pub const fn new() -> Self {
        Self { pretty: false }
    }

    /// Sets whether to pretty-print output.
    #[must_use]
    pub const fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    fn write_value<W: Write + Send, T: serde::Serialize>(
        &self,
        value: &T,
        mut writer: W,
    ) -> Result<(), FormatError> {
        if self.pretty {
            serde_json::to_writer_pretty(&mut writer, value)?;
        } else {
            serde_json::to_writer(&mut writer, value)?;
        }
        writeln!(writer)?;
        Ok(())
    }
}

impl ReportFormatter for JsonReportFormatter {
    fn write_barrel_report<W: Write + Send>(
        &self,
        report: &BarrelReport,
        writer: W,
    ) -> Result<(), FormatError> {
        self.write_value(report, writer)
    }

    fn write_event_report<W: Write + Send>(
        &self,
        report: &EventReport,
        writer: W,
    ) -> Result<(), FormatError> {
        self.write_value(report, writer)
    }

    fn extension(&self) -> &str {
        "json"
    }
}
