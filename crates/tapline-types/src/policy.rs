//! Pace computation policy constants.

use chrono::TimeDelta;
use serde::{Deserialize, Serialize};

use crate::PolicyError;

/// Caller-supplied thresholds steering pace computation.
///
/// Nothing in the engine hardcodes these; they arrive per invocation and the
/// defaults only exist as a convenience for callers without their own
/// configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PacePolicy {
    /// Width of the rolling pace window in minutes.
    pub window_minutes: i64,
    /// Minimum drinks inside the window before the rolling rate is trusted.
    pub min_consumed: u32,
    /// Minimum elapsed window minutes before the rolling rate is trusted.
    pub min_elapsed_minutes: i64,
    /// Inactivity gap (minutes) that splits an event timeline into sessions.
    pub sleep_gap_minutes: i64,
}

impl PacePolicy {
    /// Creates a new policy from explicit thresholds.
    #[must_use]
    pub const fn new(
        window_minutes: i64,
        min_consumed: u32,
        min_elapsed_minutes: i64,
        sleep_gap_minutes: i64,
    ) -> Self {
        Self {
            window_minutes,
            min_consumed,
            min_elapsed_minutes,
            sleep_gap_minutes,
        }
    }

    /// Validates that all minute thresholds are non-negative.
    ///
    /// Negative values indicate a configuration bug and are rejected rather
    /// than clamped.
    ///
    /// # Errors
    ///
    /// Returns the first offending threshold.
    pub const fn validate(&self) -> Result<(), PolicyError> {
        if self.window_minutes < 0 {
            return Err(PolicyError::NegativeWindowMinutes(self.window_minutes));
        }
        if self.min_elapsed_minutes < 0 {
            return Err(PolicyError::NegativeMinElapsedMinutes(
                self.min_elapsed_minutes,
            ));
        }
        if self.sleep_gap_minutes < 0 {
            return Err(PolicyError::NegativeSleepGapMinutes(self.sleep_gap_minutes));
        }
        Ok(())
    }

    /// Returns the rolling window width as a time delta.
    #[must_use]
    pub const fn window(&self) -> TimeDelta {
        TimeDelta::minutes(self.window_minutes)
    }

    /// Returns the session inactivity gap as a time delta.
    #[must_use]
    pub const fn sleep_gap(&self) -> TimeDelta {
        TimeDelta::minutes(self.sleep_gap_minutes)
    }
}

impl Default for PacePolicy {
    fn default() -> Self {
        Self {
            window_minutes: 60,
            min_consumed: 3,
            min_elapsed_minutes: 15,
            sleep_gap_minutes: 90,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_policy() {
        let policy = PacePolicy::default();

        assert_eq!(policy.window_minutes, 60);
        assert_eq!(policy.min_consumed, 3);
        assert_eq!(policy.min_elapsed_minutes, 15);
        assert_eq!(policy.sleep_gap_minutes, 90);
        assert!(policy.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_negative_window() {
        let policy = PacePolicy::new(-1, 3, 15, 90);
        assert!(matches!(
            policy.validate(),
            Err(PolicyError::NegativeWindowMinutes(-1))
        ));
    }

    #[test]
    fn test_validate_rejects_negative_min_elapsed() {
        let policy = PacePolicy::new(60, 3, -15, 90);
        assert!(matches!(
            policy.validate(),
            Err(PolicyError::NegativeMinElapsedMinutes(-15))
        ));
    }

    #[test]
    fn test_validate_rejects_negative_sleep_gap() {
        let policy = PacePolicy::new(60, 3, 15, -90);
        assert!(matches!(
            policy.validate(),
            Err(PolicyError::NegativeSleepGapMinutes(-90))
        ));
    }

    #[test]
    fn test_zero_thresholds_are_valid() {
        assert!(PacePolicy::new(0, 0, 0, 0).validate().is_ok());
    }

    #[test]
    fn test_partial_policy_deserializes_with_defaults() {
        let policy: PacePolicy = serde_json::from_str("{\"windowMinutes\":30}").unwrap();

        assert_eq!(policy.window_minutes, 30);
        assert_eq!(policy.min_consumed, 3);
        assert_eq!(policy.sleep_gap_minutes, 90);
    }

    #[test]
    fn test_window_delta() {
        let policy = PacePolicy::default();
        assert_eq!(policy.window(), TimeDelta::hours(1));
        assert_eq!(policy.sleep_gap(), TimeDelta::minutes(90));
    }
}
