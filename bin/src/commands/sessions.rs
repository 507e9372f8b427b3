//! Sessions command implementation.
//!
//! This module prints the drinking-session breakdown the gap segmentation
//! produces for one event.

use anyhow::{Context, Result};
use std::path::Path;
use tapline_lib::prelude::*;

use crate::PolicyArgs;
use crate::display;

/// Print the session breakdown for an event.
pub(crate) async fn sessions(
    ledger: &Path,
    event: Option<&str>,
    at: Option<&str>,
    policy_args: &PolicyArgs,
) -> Result<()> {
    let store = LedgerStore::from_file(ledger)
        .await
        .with_context(|| format!("Failed to load ledger {}", ledger.display()))?;

    let as_of = display::parse_at(at)?;
    let policy = policy_args.resolve(store.embedded_policy());
    let event_id = display::resolve_event(&store, event)?;

    let service = ReportService::new(store, policy)?;
    let report = service.event_report(event_id, as_of).await?;

    if report.sessions.is_empty() {
        println!("No drinks recorded for event {event_id}.");
        return Ok(());
    }

    println!("Event: {event_id}\n");
    println!(
        "{:<4} {:<17} {:<17} {:>7} {:>7}",
        "#", "STARTED", "ENDED", "DRINKS", "HOURS"
    );
    println!("{}", "-".repeat(56));

    for (index, session) in report.sessions.iter().enumerate() {
        println!(
            "{:<4} {:<17} {:<17} {:>7} {:>7.2}",
            index + 1,
            session.started_at.format("%Y-%m-%d %H:%M").to_string(),
            session.ended_at.format("%Y-%m-%d %H:%M").to_string(),
            session.events,
            session.duration_hours(),
        );
    }

    println!(
        "\nTotal: {} drinks across {} sessions ({:.2} active hours)",
        report.pace.total_events, report.pace.sessions, report.pace.active_hours
    );
    Ok(())
}
