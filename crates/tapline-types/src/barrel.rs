//! Barrel (keg) snapshot and size definitions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::SnapshotError;
use crate::event::BarrelId;

/// Keg size in litres.
///
/// Serialized as the bare litre number (`15`, `30`, `50`), matching the
/// dashboard payloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(into = "u32", try_from = "u32")]
pub enum BarrelSize {
    /// 15-litre keg.
    Liters15,
    /// 30-litre keg.
    #[default]
    Liters30,
    /// 50-litre keg.
    Liters50,
}

impl BarrelSize {
    /// Returns the size in litres.
    #[must_use]
    pub const fn liters(&self) -> u32 {
        match self {
            Self::Liters15 => 15,
            Self::Liters30 => 30,
            Self::Liters50 => 50,
        }
    }

    /// Returns the conventional unit count for this size (half-litre pours).
    #[must_use]
    pub const fn default_units(&self) -> u32 {
        match self {
            Self::Liters15 => 30,
            Self::Liters30 => 60,
            Self::Liters50 => 100,
        }
    }

    /// Returns all legal barrel sizes.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Liters15, Self::Liters30, Self::Liters50]
    }
}

impl std::fmt::Display for BarrelSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}l", self.liters())
    }
}

impl From<BarrelSize> for u32 {
    fn from(size: BarrelSize) -> Self {
        size.liters()
    }
}

impl TryFrom<u32> for BarrelSize {
    type Error = BarrelSizeError;

    fn try_from(liters: u32) -> Result<Self, Self::Error> {
        match liters {
            15 => Ok(Self::Liters15),
            30 => Ok(Self::Liters30),
            50 => Ok(Self::Liters50),
            other => Err(BarrelSizeError(other)),
        }
    }
}

/// Error returned for a litre count that is not a legal keg size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BarrelSizeError(u32);

impl std::fmt::Display for BarrelSizeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "invalid barrel size {}, expected one of: 15, 30, 50",
            self.0
        )
    }
}

impl std::error::Error for BarrelSizeError {}

/// Point-in-time view of a barrel.
///
/// `remaining_units` is maintained by the tracking side (decremented per
/// drink, restored on deletion) and is treated as ground truth; it is never
/// recomputed from an event list here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BarrelSnapshot {
    /// Unique identifier.
    pub id: BarrelId,
    /// Position of the barrel within its event series (1-based).
    pub order_number: u32,
    /// Keg size.
    pub size: BarrelSize,
    /// Capacity in units (beers).
    pub total_units: u32,
    /// Units still in the barrel.
    pub remaining_units: u32,
    /// When the barrel was tapped (UTC).
    pub created_at_utc: DateTime<Utc>,
}

impl BarrelSnapshot {
    /// Creates a new barrel snapshot.
    #[must_use]
    pub const fn new(
        id: BarrelId,
        order_number: u32,
        size: BarrelSize,
        total_units: u32,
        remaining_units: u32,
        created_at_utc: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            order_number,
            size,
            total_units,
            remaining_units,
            created_at_utc,
        }
    }

    /// Validates the snapshot's unit accounting.
    ///
    /// A snapshot with more remaining than total units indicates a
    /// data-integrity bug upstream and is rejected rather than clamped.
    ///
    /// # Errors
    ///
    /// Returns an error if `remaining_units > total_units`.
    pub const fn validate(&self) -> Result<(), SnapshotError> {
        if self.remaining_units > self.total_units {
            return Err(SnapshotError::RemainingExceedsTotal {
                id: self.id,
                remaining: self.remaining_units,
                total: self.total_units,
            });
        }
        Ok(())
    }

    /// Returns the number of units already drawn from the barrel.
    #[must_use]
    pub const fn consumed_units(&self) -> u32 {
        self.total_units.saturating_sub(self.remaining_units)
    }

    /// Returns true if the barrel is fully depleted.
    #[must_use]
    pub const fn is_depleted(&self) -> bool {
        self.remaining_units == 0
    }

    /// Returns the remaining fill as a ratio in `[0, 1]`.
    #[must_use]
    pub fn fill_ratio(&self) -> f64 {
        if self.total_units == 0 {
            return 0.0;
        }
        f64::from(self.remaining_units) / f64::from(self.total_units)
    }
}

impl std::fmt::Display for BarrelSnapshot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "barrel #{} ({}, {}/{} units)",
            self.order_number, self.size, self.remaining_units, self.total_units
        )
    }
}
