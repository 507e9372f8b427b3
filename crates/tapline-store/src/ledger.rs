//! JSON ledger document and the in-memory store over it.

use std::path::Path;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tapline_types::{
    BarrelId, BarrelSize, BarrelSnapshot, ConsumptionEvent, EventId, HistoricalBarrelRecord,
    PacePolicy,
};

use crate::store::{
    BarrelStore, ConsumptionScope, ConsumptionStore, HistoryStore, Result, StoreError,
};

/// A catalog entry for a fully depleted barrel.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletedBarrel {
    /// Identity of the tracked barrel row, when known.
    ///
    /// Entries imported from past events may have no barrel row anymore;
    /// they still contribute to the historical catalog.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub barrel_id: Option<BarrelId>,
    /// Position of the barrel within its event series (1-based).
    pub order_number: u32,
    /// Keg size.
    pub size: BarrelSize,
    /// Capacity in units (beers).
    pub total_units: u32,
    /// Hours from tapping to running dry.
    pub full_duration_hours: f64,
}

impl CompletedBarrel {
    /// Converts the catalog entry into the engine's history record.
    #[must_use]
    pub const fn record(&self) -> HistoricalBarrelRecord {
        HistoricalBarrelRecord::new(
            self.order_number,
            self.size,
            self.full_duration_hours,
            self.total_units,
        )
    }
}

/// A self-contained event ledger.
///
/// One document carries everything the engine needs for a series: the barrels
/// in play, the full consumption timeline, the completed-barrel catalog and
/// an optional embedded pace policy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ledger {
    /// Name of the event series the ledger belongs to.
    pub series: String,
    /// Embedded pace policy, when the ledger carries one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub policy: Option<PacePolicy>,
    /// Barrels known to the series, tapped or finished.
    #[serde(default)]
    pub barrels: Vec<BarrelSnapshot>,
    /// The full consumption timeline.
    #[serde(default)]
    pub events: Vec<ConsumptionEvent>,
    /// Catalog of fully depleted barrels.
    #[serde(default)]
    pub completed_barrels: Vec<CompletedBarrel>,
}

impl Ledger {
    /// Parses a ledger from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns an error if the document is not valid ledger JSON.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

/// In-memory store backed by a [`Ledger`] document.
///
/// Implements all three lookup traits over the parsed document. Nothing is
/// filtered at load time; suspicious records are logged and kept so the
/// engine can discount them itself.
#[derive(Debug, Clone)]
pub struct LedgerStore {
    ledger: Ledger,
}

impl LedgerStore {
    /// Creates a store over an already-parsed ledger.
    #[must_use]
    pub fn new(ledger: Ledger) -> Self {
        tracing::debug!(
            series = %ledger.series,
            barrels = ledger.barrels.len(),
            events = ledger.events.len(),
            completed = ledger.completed_barrels.len(),
            "loaded ledger"
        );
        for completed in &ledger.completed_barrels {
            if completed.full_duration_hours <= 0.0 {
                tracing::warn!(
                    order_number = completed.order_number,
                    full_duration_hours = completed.full_duration_hours,
                    "completed barrel has a non-positive duration"
                );
            }
        }
        Self { ledger }
    }

    /// Loads a ledger file from disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub async fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| StoreError::Io {
                path: path.to_path_buf(),
                source: e,
            })?;
        let ledger = Ledger::from_json(&content).map_err(|e| StoreError::Parse {
            path: path.to_path_buf(),
            source: e,
        })?;
        Ok(Self::new(ledger))
    }

    /// Returns the underlying ledger document.
    #[must_use]
    pub const fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    /// Returns the series name the ledger belongs to.
    #[must_use]
    pub fn series(&self) -> &str {
        &self.ledger.series
    }

    /// Returns the ledger's embedded pace policy, if any.
    #[must_use]
    pub const fn embedded_policy(&self) -> Option<PacePolicy> {
        self.ledger.policy
    }

    /// Returns all barrels in the ledger.
    #[must_use]
    pub fn barrels(&self) -> &[BarrelSnapshot] {
        &self.ledger.barrels
    }

    /// Finds a barrel by its position in the series.
    #[must_use]
    pub fn barrel_by_order(&self, order_number: u32) -> Option<&BarrelSnapshot> {
        self.ledger
            .barrels
            .iter()
            .find(|b| b.order_number == order_number)
    }

    /// Returns the distinct event (party) ids on the timeline, in first-seen
    /// order.
    #[must_use]
    pub fn event_ids(&self) -> Vec<EventId> {
        let mut ids = Vec::new();
        for event in &self.ledger.events {
            if !ids.contains(&event.event_id) {
                ids.push(event.event_id);
            }
        }
        ids
    }

    /// Counts spilled drinks, optionally restricted to one barrel.
    #[must_use]
    pub fn spilled_count(&self, barrel_id: Option<BarrelId>) -> usize {
        self.ledger
            .events
            .iter()
            .filter(|e| e.spilled)
            .filter(|e| barrel_id.is_none_or(|id| e.is_from_barrel(id)))
            .count()
    }
}

#[async_trait]
impl ConsumptionStore for LedgerStore {
    async fn consumption_timestamps(
        &self,
        scope: ConsumptionScope,
        since: Option<DateTime<Utc>>,
    ) -> Result<Vec<DateTime<Utc>>> {
        let mut timestamps: Vec<DateTime<Utc>> = self
            .ledger
            .events
            .iter()
            .filter(|e| match scope {
                ConsumptionScope::Barrel(id) => e.is_from_barrel(id),
                ConsumptionScope::Event(id) => e.event_id == id,
            })
            .filter(|e| since.is_none_or(|bound| e.timestamp_utc >= bound))
            .map(|e| e.timestamp_utc)
            .collect();
        timestamps.sort_unstable();

        tracing::debug!(?scope, count = timestamps.len(), "collected consumption timestamps");
        Ok(timestamps)
    }
}

#[async_trait]
impl BarrelStore for LedgerStore {
    async fn barrel_snapshot(&self, id: BarrelId) -> Result<Option<BarrelSnapshot>> {
        Ok(self.ledger.barrels.iter().find(|b| b.id == id).copied())
    }
}

#[async_trait]
impl HistoryStore for LedgerStore {
    async fn completed_barrel_history(
        &self,
        series: &str,
        excluding: Option<BarrelId>,
    ) -> Result<Vec<HistoricalBarrelRecord>> {
        if self.ledger.series != series {
            tracing::debug!(
                requested = series,
                ledger = %self.ledger.series,
                "series mismatch, returning empty catalog"
            );
            return Ok(Vec::new());
        }

        let records = self
            .ledger
            .completed_barrels
            .iter()
            .filter(|c| excluding.is_none_or(|id| c.barrel_id != Some(id)))
            .map(CompletedBarrel::record)
            .collect();
        Ok(records)
    }
}
