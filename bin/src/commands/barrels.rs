//! Barrels command implementation.
//!
//! This module handles listing the barrels tracked by a ledger file,
//! including fill state and spill counts.

use anyhow::{Context, Result};
use std::path::Path;
use tapline_lib::prelude::*;

/// List the barrels in a ledger.
pub(crate) async fn list_barrels(ledger: &Path) -> Result<()> {
    let store = LedgerStore::from_file(ledger)
        .await
        .with_context(|| format!("Failed to load ledger {}", ledger.display()))?;

    let mut barrels = store.barrels().to_vec();
    if barrels.is_empty() {
        println!("No barrels in ledger.");
        return Ok(());
    }
    barrels.sort_by_key(|b| b.order_number);

    println!("Series: {}\n", store.series());
    println!(
        "{:<4} {:<6} {:>9} {:>8} {:<17} {:<9} {}",
        "#", "SIZE", "UNITS", "SPILLED", "TAPPED", "STATUS", "ID"
    );
    println!("{}", "-".repeat(95));

    for barrel in &barrels {
        let status = if barrel.is_depleted() {
            "depleted"
        } else {
            "active"
        };
        println!(
            "{:<4} {:<6} {:>9} {:>8} {:<17} {:<9} {}",
            barrel.order_number,
            barrel.size.to_string(),
            format!("{}/{}", barrel.remaining_units, barrel.total_units),
            store.spilled_count(Some(barrel.id)),
            barrel.created_at_utc.format("%Y-%m-%d %H:%M").to_string(),
            status,
            barrel.id,
        );
    }

    println!("\nTotal: {} barrels", barrels.len());
    Ok(())
}
