//! Async trait boundary for consumption, barrel and history lookups.

use std::path::PathBuf;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tapline_types::{BarrelId, BarrelSnapshot, EventId, HistoricalBarrelRecord};
use thiserror::Error;

/// Errors that can occur during store operations.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Failed to read a ledger file.
    #[error("Failed to read ledger '{}': {source}", .path.display())]
    Io {
        /// The path that could not be read.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// Failed to parse a ledger document.
    #[error("Failed to parse ledger '{}': {source}", .path.display())]
    Parse {
        /// The path that could not be parsed.
        path: PathBuf,
        /// The underlying JSON error.
        source: serde_json::Error,
    },

    /// A storage backend failed.
    #[error("Backend error: {0}")]
    Backend(String),
}

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;

/// Scope of a consumption timeline query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConsumptionScope {
    /// Drinks drawn from a single barrel.
    Barrel(BarrelId),
    /// Every drink logged for an event, across all of its barrels.
    Event(EventId),
}

/// Source of consumption timestamps.
#[async_trait]
pub trait ConsumptionStore: Send + Sync {
    /// Returns the timestamps of all drinks in scope, ascending.
    ///
    /// Spilled drinks are included; they drained volume like any other pour.
    /// `since` restricts the result to timestamps at or after the bound.
    async fn consumption_timestamps(
        &self,
        scope: ConsumptionScope,
        since: Option<DateTime<Utc>>,
    ) -> Result<Vec<DateTime<Utc>>>;
}

/// Source of barrel snapshots.
#[async_trait]
pub trait BarrelStore: Send + Sync {
    /// Returns the barrel's current snapshot, or `None` for an unknown id.
    async fn barrel_snapshot(&self, id: BarrelId) -> Result<Option<BarrelSnapshot>>;
}

/// Source of completed-barrel history.
#[async_trait]
pub trait HistoryStore: Send + Sync {
    /// Returns the catalog of fully depleted barrels for a series.
    ///
    /// `excluding` drops the record tracking the given barrel, so a barrel's
    /// own partial life never feeds its prediction.
    async fn completed_barrel_history(
        &self,
        series: &str,
        excluding: Option<BarrelId>,
    ) -> Result<Vec<HistoricalBarrelRecord>>;
}
