//! CSV report output.

use chrono::{DateTime, Utc};
use std::io::Write;

use crate::service::{BarrelReport, EventReport};
use crate::{FormatError, ReportFormatter};

const TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// CSV report formatter.
///
/// A barrel report becomes a single flat row; an event report becomes one
/// row per session. Column names match the JSON wire names. Values the
/// engine could not compute become empty cells.
#[derive(Debug, Clone)]
pub struct CsvReportFormatter {
    /// Field delimiter (default: comma).
    delimiter: char,
    /// Whether to include header row.
    include_header: bool,
}

impl CsvReportFormatter {
    /// Creates a new CSV formatter with default settings.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            delimiter: ',',
            include_header: true,
        }
    }

    /// Sets the field delimiter.
    #[must_use]
    pub const fn with_delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Sets whether to include a header row.
    #[must_use]
    pub const fn with_header(mut self, include: bool) -> Self {
        self.include_header = include;
        self
    }

    /// Creates a tab-separated values (TSV) formatter.
    #[must_use]
    pub const fn tsv() -> Self {
        Self {
            delimiter: '\t',
            include_header: true,
        }
    }
}

impl Default for CsvReportFormatter {
    fn default() -> Self {
        Self::new()
    }
}

fn cell<T: std::fmt::Display>(value: Option<T>) -> String {
    value.map_or_else(String::new, |v| v.to_string())
}

fn time_cell(timestamp: Option<DateTime<Utc>>) -> String {
    timestamp.map_or_else(String::new, |t| t.format(TIME_FORMAT).to_string())
}

impl ReportFormatter for CsvReportFormatter {
    fn write_barrel_report<W: Write + Send>(
        &self,
        report: &BarrelReport,
        mut writer: W,
    ) -> Result<(), FormatError> {
        let d = self.delimiter;

        if self.include_header {
            writeln!(
                writer,
                "series{d}status{d}asOf{d}orderNumber{d}size{d}remainingUnits{d}totalUnits{d}\
                 methodUsed{d}currentBeersPerHour{d}historicalBeersPerHour{d}matchingStrategy{d}\
                 fullBarrelsUsed{d}emptyAtByCurrent{d}emptyAtByHistorical"
            )?;
        }

        let barrel = report.barrel;
        let prediction = &report.prediction;
        writeln!(
            writer,
            "{}{d}{}{d}{}{d}{}{d}{}{d}{}{d}{}{d}{}{d}{}{d}{}{d}{}{d}{}{d}{}{d}{}",
            report.series,
            prediction.status,
            prediction.as_of.format(TIME_FORMAT),
            cell(barrel.map(|b| b.order_number)),
            cell(barrel.map(|b| b.size.liters())),
            cell(barrel.map(|b| b.remaining_units)),
            cell(barrel.map(|b| b.total_units)),
            cell(prediction.current.map(|c| c.method_used)),
            cell(prediction.current.and_then(|c| c.selected_rate())),
            cell(prediction.historical.and_then(|h| h.beers_per_hour)),
            cell(prediction.historical.and_then(|h| h.matching_strategy)),
            cell(prediction.historical.map(|h| h.full_barrels_used)),
            time_cell(prediction.eta.empty_at_by_current),
            time_cell(prediction.eta.empty_at_by_historical)
        )?;

        Ok(())
    }

    fn write_event_report<W: Write + Send>(
        &self,
        report: &EventReport,
        mut writer: W,
    ) -> Result<(), FormatError> {
        let d = self.delimiter;

        if self.include_header {
            writeln!(
                writer,
                "eventId{d}asOf{d}session{d}startedAt{d}endedAt{d}events{d}durationHours"
            )?;
        }

        for (index, session) in report.sessions.iter().enumerate() {
            writeln!(
                writer,
                "{}{d}{}{d}{}{d}{}{d}{}{d}{}{d}{}",
                report.event_id,
                report.as_of.format(TIME_FORMAT),
                index + 1,
                session.started_at.format(TIME_FORMAT),
                session.ended_at.format(TIME_FORMAT),
                session.events,
                session.duration_hours()
            )?;
        }

        Ok(())
    }

    fn extension(&self) -> &str {
        "csv"
    }
}
