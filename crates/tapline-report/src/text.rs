//! Human-readable text report output.

use chrono::{DateTime, Utc};
use std::io::Write;

use crate::service::{BarrelReport, EventReport};
use crate::{FormatError, ReportFormatter};

const TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";
const LABEL_WIDTH: usize = 21;

/// Plain-text report formatter.
///
/// Renders one labelled line per field, with `-` standing in for values the
/// engine could not compute.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextReportFormatter;

impl TextReportFormatter {
    /// Creates a new text report formatter.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

fn opt_time(timestamp: Option<DateTime<Utc>>) -> String {
    timestamp.map_or_else(|| "-".to_string(), |t| t.format(TIME_FORMAT).to_string())
}

fn opt_rate(rate: Option<f64>) -> String {
    rate.map_or_else(|| "-".to_string(), |r| format!("{r:.1} beers/hour"))
}

impl ReportFormatter for TextReportFormatter {
    fn write_barrel_report<W: Write + Send>(
        &self,
        report: &BarrelReport,
        mut writer: W,
    ) -> Result<(), FormatError> {
        let prediction = &report.prediction;

        let barrel = report.barrel.map_or_else(
            || "-".to_string(),
            |b| {
                format!(
                    "#{} ({}), {}/{} units left",
                    b.order_number, b.size, b.remaining_units, b.total_units
                )
            },
        );
        let method = prediction
            .current
            .map_or("-", |c| c.method_used.as_str());
        let current = opt_rate(prediction.current.and_then(|c| c.selected_rate()));
        let historical = match prediction.historical {
            Some(h) => match (h.matching_strategy, h.beers_per_hour) {
                (Some(strategy), Some(rate)) => {
                    format!("{rate:.1} beers/hour ({strategy}, {} used)", h.full_barrels_used)
                }
                _ => "-".to_string(),
            },
            None => "-".to_string(),
        };

        writeln!(writer, "{:<LABEL_WIDTH$}{}", "Series:", report.series)?;
        writeln!(writer, "{:<LABEL_WIDTH$}{}", "Status:", prediction.status)?;
        writeln!(
            writer,
            "{:<LABEL_WIDTH$}{}",
            "As of:",
            prediction.as_of.format(TIME_FORMAT)
        )?;
        writeln!(writer, "{:<LABEL_WIDTH$}{barrel}", "Barrel:")?;
        writeln!(writer, "{:<LABEL_WIDTH$}{method}", "Pace method:")?;
        writeln!(writer, "{:<LABEL_WIDTH$}{current}", "Current pace:")?;
        writeln!(writer, "{:<LABEL_WIDTH$}{historical}", "Historical pace:")?;
        writeln!(
            writer,
            "{:<LABEL_WIDTH$}{}",
            "Empty (current):",
            opt_time(prediction.eta.empty_at_by_current)
        )?;
        writeln!(
            writer,
            "{:<LABEL_WIDTH$}{}",
            "Empty (historical):",
            opt_time(prediction.eta.empty_at_by_historical)
        )?;

        Ok(())
    }

    fn write_event_report<W: Write + Send>(
        &self,
        report: &EventReport,
        mut writer: W,
    ) -> Result<(), FormatError> {
        let pace = &report.pace;

        writeln!(writer, "{:<LABEL_WIDTH$}{}", "Event:", report.event_id)?;
        writeln!(
            writer,
            "{:<LABEL_WIDTH$}{}",
            "As of:",
            report.as_of.format(TIME_FORMAT)
        )?;
        writeln!(writer, "{:<LABEL_WIDTH$}{}", "Drinks:", pace.total_events)?;
        writeln!(writer, "{:<LABEL_WIDTH$}{}", "Sessions:", pace.sessions)?;
        writeln!(
            writer,
            "{:<LABEL_WIDTH$}{:.2}",
            "Active hours:", pace.active_hours
        )?;
        writeln!(
            writer,
            "{:<LABEL_WIDTH$}{}",
            "Average pace:",
            opt_rate(pace.avg_beers_per_active_hour)
        )?;
        writeln!(
            writer,
            "{:<LABEL_WIDTH$}{:.1} beers/hour",
            "Current pace:", pace.current_beers_per_hour
        )?;

        if !report.sessions.is_empty() {
            writeln!(writer)?;
            writeln!(
                writer,
                "{:>3}  {:<20}  {:<20}  {:>6}  {:>5}",
                "#", "Started", "Ended", "Drinks", "Hours"
            )?;
            for (index, session) in report.sessions.iter().enumerate() {
                writeln!(
                    writer,
                    "{:>3}  {}  {}  {:>6}  {:>5.2}",
                    index + 1,
                    session.started_at.format(TIME_FORMAT),
                    session.ended_at.format(TIME_FORMAT),
                    session.events,
                    session.duration_hours()
                )?;
            }
        }

        Ok(())
    }

    fn extension(&self) -> &str {
        "txt"
    }
}
