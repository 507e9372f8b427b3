//! Display utilities, output dispatch and input resolution for the tapline CLI.

use anyhow::{Context, Result, bail};
use chrono::{DateTime, Utc};
use clap::ValueEnum;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tapline_lib::prelude::*;

/// Output format for rendered reports.
#[derive(Clone, Copy, ValueEnum)]
pub(crate) enum Format {
    Text,
    Json,
    Csv,
}

impl Format {
    /// Returns the file extension for this format.
    pub(crate) const fn extension(&self) -> &'static str {
        match self {
            Self::Text => "txt",
            Self::Json => "json",
            Self::Csv => "csv",
        }
    }
}

impl std::fmt::Display for Format {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.extension())
    }
}

/// Write a barrel report to the given path, or stdout when none is given.
pub(crate) fn write_barrel_report(
    report: &BarrelReport,
    output: Option<&Path>,
    format: Format,
) -> Result<()> {
    match output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create {}", path.display()))?;
            write_barrel_to(report, BufWriter::new(file), format)
        }
        None => write_barrel_to(report, std::io::stdout(), format),
    }
}

fn write_barrel_to<W: Write + Send>(
    report: &BarrelReport,
    writer: W,
    format: Format,
) -> Result<()> {
    match format {
        Format::Text => TextReportFormatter::new().write_barrel_report(report, writer)?,
        Format::Json => JsonReportFormatter::new().write_barrel_report(report, writer)?,
        Format::Csv => CsvReportFormatter::new().write_barrel_report(report, writer)?,
    }
    Ok(())
}

/// Write an event report to the given path, or stdout when none is given.
pub(crate) fn write_event_report(
    report: &EventReport,
    output: Option<&Path>,
    format: Format,
) -> Result<()> {
    match output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create {}", path.display()))?;
            write_event_to(report, BufWriter::new(file), format)
        }
        None => write_event_to(report, std::io::stdout(), format),
    }
}

fn write_event_to<W: Write + Send>(
    report: &EventReport,
    writer: W,
    format: Format,
) -> Result<()> {
    match format {
        Format::Text => TextReportFormatter::new().write_event_report(report, writer)?,
        Format::Json => JsonReportFormatter::new().write_event_report(report, writer)?,
        Format::Csv => CsvReportFormatter::new().write_event_report(report, writer)?,
    }
    Ok(())
}

/// Parse the `--at` flag into a report instant, defaulting to now.
pub(crate) fn parse_at(at: Option<&str>) -> Result<DateTime<Utc>> {
    match at {
        Some(raw) => {
            let parsed = DateTime::parse_from_rfc3339(raw)
                .with_context(|| format!("Invalid timestamp: {raw} (expected RFC 3339)"))?;
            Ok(parsed.with_timezone(&Utc))
        }
        None => Ok(Utc::now()),
    }
}

/// Resolve the barrel to report on from the `--barrel` / `--order` flags.
///
/// Without a flag, picks the lowest-order barrel that still holds beer.
pub(crate) fn resolve_barrel(
    store: &LedgerStore,
    barrel: Option<&str>,
    order: Option<u32>,
) -> Result<BarrelId> {
    if let Some(raw) = barrel {
        return raw
            .parse::<BarrelId>()
            .with_context(|| format!("Invalid barrel id: {raw}"));
    }
    if let Some(order_number) = order {
        return store
            .barrel_by_order(order_number)
            .map(|b| b.id)
            .with_context(|| format!("No barrel #{order_number} in ledger"));
    }

    store
        .barrels()
        .iter()
        .filter(|b| !b.is_depleted())
        .min_by_key(|b| b.order_number)
        .map(|b| b.id)
        .context("No barrel with beer left in ledger; pass --barrel or --order")
}

/// Resolve the event to report on from the `--event` flag.
///
/// Without the flag the ledger must track exactly one event.
pub(crate) fn resolve_event(store: &LedgerStore, event: Option<&str>) -> Result<EventId> {
    if let Some(raw) = event {
        return raw
            .parse::<EventId>()
            .with_context(|| format!("Invalid event id: {raw}"));
    }

    let ids = store.event_ids();
    match ids.as_slice() {
        [] => bail!("Ledger has no consumption events"),
        [only] => Ok(*only),
        _ => bail!(
            "Ledger spans {} events; pass --event with one of: {}",
            ids.len(),
            ids.iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(", ")
        ),
    }
}
