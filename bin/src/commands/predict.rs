//! Predict command implementation.
//!
//! Loads a ledger, resolves the barrel to report on, and renders the
//! depletion prediction in the requested format.

use anyhow::{Context, Result};
use std::path::Path;
use tapline_lib::prelude::*;

use crate::PolicyArgs;
use crate::display::{self, Format};

/// Predict when a barrel runs dry and render the report.
pub(crate) async fn predict(
    ledger: &Path,
    barrel: Option<&str>,
    order: Option<u32>,
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
    let series = store.series().to_string();
    let barrel_id = display::resolve_barrel(&store, barrel, order)?;

    let service = ReportService::new(store, policy)?;
    let report = service.barrel_report(&series, barrel_id, as_of).await?;

    display::write_barrel_report(&report, output, format)
}
