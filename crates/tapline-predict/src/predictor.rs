//! Barrel status classification and empty-at estimation.

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use tapline_pace::{CurrentPace, PaceCalculator};
use tapline_types::{BarrelSnapshot, HistoricalBarrelRecord, PacePolicy, PolicyError, SnapshotError};
use thiserror::Error;

use crate::history::{HistoricalPace, resolve_historical_pace};

/// Errors from depletion prediction.
///
/// Only malformed input errors; degenerate data (no events, no history, zero
/// rates) produces absent fields instead.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PredictError {
    /// The barrel snapshot is internally inconsistent.
    #[error(transparent)]
    Snapshot(#[from] SnapshotError),
}

/// Barrel lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BarrelStatus {
    /// No barrel is tapped, or the tapped barrel is already empty.
    NoActiveBarrel,
    /// The barrel has remaining units but no consumption recorded yet.
    WarmingUp,
    /// Consumption is under way but no historical barrel matched.
    NoHistory,
    /// Both the current and the historical branch are populated.
    Ok,
}

impl BarrelStatus {
    /// Returns the status as a string slice.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::NoActiveBarrel => "no_active_barrel",
            Self::WarmingUp => "warming_up",
            Self::NoHistory => "no_history",
            Self::Ok => "ok",
        }
    }
}

impl std::fmt::Display for BarrelStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Empty-at timestamps per pace branch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EtaEstimate {
    /// When the barrel runs dry at the current pace.
    pub empty_at_by_current: Option<DateTime<Utc>>,
    /// When the barrel runs dry at the historical rate.
    pub empty_at_by_historical: Option<DateTime<Utc>>,
}

impl EtaEstimate {
    /// Creates an estimate with both timestamps absent.
    #[must_use]
    pub const fn unknown() -> Self {
        Self {
            empty_at_by_current: None,
            empty_at_by_historical: None,
        }
    }
}

/// Full prediction for a barrel at an instant.
///
/// Both pace breakdowns are nested in full, including the sub-estimate the
/// warm-up policy did not select, so a consumer can show why a given
/// empty-at was chosen.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BarrelPrediction {
    /// Barrel lifecycle status.
    pub status: BarrelStatus,
    /// The instant the prediction was computed for.
    pub as_of: DateTime<Utc>,
    /// Live pace breakdown, absent without an active barrel.
    pub current: Option<CurrentPace>,
    /// Historical pace breakdown, absent without an active barrel.
    pub historical: Option<HistoricalPace>,
    /// Empty-at timestamps.
    pub eta: EtaEstimate,
}

impl BarrelPrediction {
    /// Creates the prediction for an absent or depleted barrel.
    #[must_use]
    pub const fn no_active_barrel(as_of: DateTime<Utc>) -> Self {
        Self {
            status: BarrelStatus::NoActiveBarrel,
            as_of,
            current: None,
            historical: None,
            eta: EtaEstimate::unknown(),
        }
    }
}

/// Depletion predictor over barrel, event and history snapshots.
#[derive(Debug, Clone)]
pub struct DepletionPredictor {
    calculator: PaceCalculator,
}

impl DepletionPredictor {
    /// Creates a predictor after validating the policy.
    ///
    /// # Errors
    ///
    /// Returns an error when the policy carries a negative minute threshold.
    pub const fn new(policy: PacePolicy) -> Result<Self, PolicyError> {
        let calculator = match PaceCalculator::new(policy) {
            Ok(c) => c,
            Err(e) => return Err(e),
        };
        Ok(Self { calculator })
    }

    /// Returns the policy in effect.
    #[must_use]
    pub const fn policy(&self) -> &PacePolicy {
        self.calculator.policy()
    }

    /// Predicts the barrel's status and empty-at timestamps for `as_of`.
    ///
    /// Statuses are evaluated in order: `no_active_barrel`, `warming_up`,
    /// `no_history`, then `ok`. Each empty-at branch is computed
    /// independently and only when its rate is present and positive.
    ///
    /// # Errors
    ///
    /// Returns an error when the snapshot's unit accounting is inconsistent.
    pub fn predict(
        &self,
        barrel: Option<&BarrelSnapshot>,
        events: &[DateTime<Utc>],
        history: &[HistoricalBarrelRecord],
        as_of: DateTime<Utc>,
    ) -> Result<BarrelPrediction, PredictError> {
        let Some(barrel) = barrel else {
            return Ok(BarrelPrediction::no_active_barrel(as_of));
        };
        barrel.validate()?;
        if barrel.is_depleted() {
            return Ok(BarrelPrediction::no_active_barrel(as_of));
        }

        let historical = resolve_historical_pace(barrel.order_number, barrel.size, history);
        let current = self
            .calculator
            .current_pace(events, barrel.created_at_utc, as_of);

        if events.is_empty() {
            return Ok(BarrelPrediction {
                status: BarrelStatus::WarmingUp,
                as_of,
                current: Some(current),
                historical: Some(historical),
                eta: EtaEstimate::unknown(),
            });
        }

        let status = if historical.matching_strategy.is_some() {
            BarrelStatus::Ok
        } else {
            BarrelStatus::NoHistory
        };
        let eta = EtaEstimate {
            empty_at_by_current: empty_at(as_of, barrel.remaining_units, current.selected_rate()),
            empty_at_by_historical: empty_at(
                as_of,
                barrel.remaining_units,
                historical.beers_per_hour,
            ),
        };

        Ok(BarrelPrediction {
            status,
            as_of,
            current: Some(current),
            historical: Some(historical),
            eta,
        })
    }
}

/// Extrapolates when the remaining units run out at the given rate.
///
/// A rate of zero means the barrel never empties, so no timestamp is
/// produced; arithmetic that leaves the representable time range also yields
/// `None` rather than overflowing.
fn empty_at(
    as_of: DateTime<Utc>,
    remaining_units: u32,
    rate: Option<f64>,
) -> Option<DateTime<Utc>> {
    let rate = rate?;
    if rate <= 0.0 {
        return None;
    }

    let hours_remaining = f64::from(remaining_units) / rate;
    let millis = hours_remaining * 3_600_000.0;
    if !millis.is_finite() || millis > i64::MAX as f64 {
        return None;
    }

    TimeDelta::try_milliseconds(millis as i64).and_then(|delta| as_of.checked_add_signed(delta))
}
