//! Report composition over the store traits.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tapline_pace::{EventPace, EventPaceAggregator, Session, segment_sessions};
use tapline_predict::{BarrelPrediction, DepletionPredictor, PredictError};
use tapline_store::{BarrelStore, ConsumptionScope, ConsumptionStore, HistoryStore, StoreError};
use tapline_types::{BarrelId, BarrelSnapshot, EventId, PacePolicy, PolicyError};
use thiserror::Error;

use crate::formatter::FormatError;

/// Errors from report composition.
#[derive(Error, Debug)]
pub enum ReportError {
    /// A storage lookup failed.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// The engine rejected its input.
    #[error(transparent)]
    Predict(#[from] PredictError),

    /// Rendering the report failed.
    #[error(transparent)]
    Format(#[from] FormatError),
}

/// A barrel's depletion report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BarrelReport {
    /// The event series the report belongs to.
    pub series: String,
    /// The barrel under report, when the store knows it.
    pub barrel: Option<BarrelSnapshot>,
    /// The prediction computed for it.
    pub prediction: BarrelPrediction,
}

/// An event's session and pace report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventReport {
    /// The event (party) under report.
    pub event_id: EventId,
    /// The instant the report was computed for.
    pub as_of: DateTime<Utc>,
    /// Event-wide pace metrics.
    pub pace: EventPace,
    /// The session breakdown behind the metrics.
    pub sessions: Vec<Session>,
}

/// Composes reports by running the engine over store lookups.
///
/// The service owns no state beyond the validated policy; every report is
/// computed from scratch against the store's current data.
#[derive(Debug, Clone)]
pub struct ReportService<S> {
    store: S,
    predictor: DepletionPredictor,
    aggregator: EventPaceAggregator,
}

impl<S> ReportService<S> {
    /// Creates a service after validating the policy.
    ///
    /// # Errors
    ///
    /// Returns an error when the policy carries a negative minute threshold.
    pub fn new(store: S, policy: PacePolicy) -> Result<Self, PolicyError> {
        let predictor = DepletionPredictor::new(policy)?;
        let aggregator = EventPaceAggregator::new(policy)?;
        Ok(Self {
            store,
            predictor,
            aggregator,
        })
    }

    /// Returns the policy in effect.
    #[must_use]
    pub const fn policy(&self) -> &PacePolicy {
        self.predictor.policy()
    }

    /// Returns the underlying store.
    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }
}

impl<S> ReportService<S>
where
    S: ConsumptionStore + BarrelStore + HistoryStore,
{
    /// Builds the depletion report for one barrel.
    ///
    /// The barrel's own completed record, if any, is excluded from the
    /// historical catalog before prediction.
    ///
    /// # Errors
    ///
    /// Returns an error when a lookup fails or the snapshot is inconsistent.
    pub async fn barrel_report(
        &self,
        series: &str,
        barrel_id: BarrelId,
        as_of: DateTime<Utc>,
    ) -> Result<BarrelReport, ReportError> {
        let barrel = self.store.barrel_snapshot(barrel_id).await?;
        let events = self
            .store
            .consumption_timestamps(ConsumptionScope::Barrel(barrel_id), None)
            .await?;
        let history = self
            .store
            .completed_barrel_history(series, Some(barrel_id))
            .await?;

        tracing::debug!(
            %barrel_id,
            events = events.len(),
            history = history.len(),
            "composing barrel report"
        );
        let prediction = self
            .predictor
            .predict(barrel.as_ref(), &events, &history, as_of)?;

        Ok(BarrelReport {
            series: series.to_string(),
            barrel,
            prediction,
        })
    }

    /// Builds the session and pace report for one event.
    ///
    /// # Errors
    ///
    /// Returns an error when the timeline lookup fails.
    pub async fn event_report(
        &self,
        event_id: EventId,
        as_of: DateTime<Utc>,
    ) -> Result<EventReport, ReportError> {
        let timeline = self
            .store
            .consumption_timestamps(ConsumptionScope::Event(event_id), None)
            .await?;

        tracing::debug!(%event_id, events = timeline.len(), "composing event report");
        let pace = self.aggregator.event_pace(&timeline, as_of);
        let sessions = segment_sessions(&timeline, self.policy().sleep_gap_minutes);

        Ok(EventReport {
            event_id,
            as_of,
            pace,
            sessions,
        })
    }
}
