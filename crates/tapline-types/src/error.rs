//! Error types for tapline.

use thiserror::Error;

use crate::BarrelId;

/// Result type alias for tapline operations.
pub type Result<T> = std::result::Result<T, TaplineError>;

/// Errors that can occur while computing pace and depletion reports.
#[derive(Error, Debug)]
pub enum TaplineError {
    /// Invalid pace policy.
    #[error(transparent)]
    Policy(#[from] PolicyError),

    /// Invalid barrel snapshot.
    #[error(transparent)]
    Snapshot(#[from] SnapshotError),

    /// A storage backend failed.
    #[error("Store error: {0}")]
    Store(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Error for invalid pace policies.
///
/// Each variant carries the offending value. These are caller configuration
/// bugs, not data problems, so they surface immediately at construction.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PolicyError {
    /// Rolling window width is negative.
    #[error("Invalid policy: windowMinutes must be non-negative, got {0}")]
    NegativeWindowMinutes(i64),

    /// Minimum elapsed threshold is negative.
    #[error("Invalid policy: minElapsedMinutes must be non-negative, got {0}")]
    NegativeMinElapsedMinutes(i64),

    /// Session gap threshold is negative.
    #[error("Invalid policy: sleepGapMinutes must be non-negative, got {0}")]
    NegativeSleepGapMinutes(i64),
}

/// Error for inconsistent barrel snapshots.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapshotError {
    /// Remaining units exceed the barrel's total capacity.
    #[error("Invalid barrel {id}: remaining {remaining} exceeds total {total}")]
    RemainingExceedsTotal {
        /// The barrel with the inconsistent counts.
        id: BarrelId,
        /// The reported remaining units.
        remaining: u32,
        /// The barrel's total capacity in units.
        total: u32,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_policy_error_display() {
        let err = PolicyError::NegativeWindowMinutes(-5);
        assert_eq!(
            err.to_string(),
            "Invalid policy: windowMinutes must be non-negative, got -5"
        );
    }

    #[test]
    fn test_snapshot_error_display() {
        let id = BarrelId::nil();
        let err = SnapshotError::RemainingExceedsTotal {
            id,
            remaining: 70,
            total: 60,
        };
        let msg = err.to_string();
        assert!(msg.contains("remaining 70 exceeds total 60"));
    }

    #[test]
    fn test_policy_error_converts_to_tapline_error() {
        let err: TaplineError = PolicyError::NegativeSleepGapMinutes(-1).into();
        assert!(matches!(
            err,
            TaplineError::Policy(PolicyError::NegativeSleepGapMinutes(-1))
        ));
    }
}
