//! Pace command implementation.

use anyhow::{Context, Result};
use std::path::Path;
use tapline_lib::prelude::*;

use crate::PolicyArgs;
use crate::display::{self, Format};

/// Report the event-wide drinking pace in the requested format.
pub(crate) async fn pace(
    ledger: &Path,
    event: Option<&str>,
    at: Option<&str>,
    policy_args: &PolicyArgs,
    format: Format,
    output: Option<&Path>,
) -> Result<()> {
    let store = LedgerStore::from_file(ledger)
        .await
        .with_context(|| format!("Failed to load ledger {}", ledger.display()))?;

    let as_of = display::parse_at(at)?;
    let policy = policy_args.resolve(store.embedded_policy());
    let event_id = display::resolve_event(&store, event)?;

    let service = ReportService::new(store, policy)?;
    let report = service.event_report(event_id, as_of).await?;

    display::write_event_report(&report, output, format)
}
