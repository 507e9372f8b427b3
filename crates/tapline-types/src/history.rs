//! Historical barrel depletion records.

use serde::{Deserialize, Serialize};

use crate::barrel::BarrelSize;

/// Rate reference from a fully depleted barrel of a prior event.
///
/// Records are read-only catalog entries: one per barrel that reached zero
/// remaining units, annotated with the wall-clock duration from tapping to
/// depletion.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoricalBarrelRecord {
    /// Position of the barrel within its event series (1-based).
    pub order_number: u32,
    /// Keg size.
    pub size: BarrelSize,
    /// Wall-clock hours from tapping to depletion.
    pub full_duration_hours: f64,
    /// Capacity in units (beers).
    pub total_units: u32,
}

impl HistoricalBarrelRecord {
    /// Creates a new historical record.
    #[must_use]
    pub const fn new(
        order_number: u32,
        size: BarrelSize,
        full_duration_hours: f64,
        total_units: u32,
    ) -> Self {
        Self {
            order_number,
            size,
            full_duration_hours,
            total_units,
        }
    }

    /// Returns the average drain rate over the barrel's full lifetime.
    ///
    /// Returns `None` when the recorded duration is not positive, since no
    /// rate can be derived from it.
    #[must_use]
    pub fn beers_per_hour(&self) -> Option<f64> {
        if self.full_duration_hours > 0.0 {
            Some(f64::from(self.total_units) / self.full_duration_hours)
        } else {
            None
        }
    }
}
