//! Rolling-window and from-start pace computation.

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use tapline_types::{PacePolicy, PolicyError};

/// Floor for the from-start elapsed time, in hours (one second).
///
/// Keeps the from-start rate finite when the first pour lands moments after
/// the barrel is tapped.
const MIN_ELAPSED_HOURS: f64 = 1.0 / 3600.0;

/// Pace computation method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaceMethod {
    /// Rate over the recent rolling window.
    RollingWindow,
    /// Average rate since the barrel was tapped.
    FromStart,
}

impl PaceMethod {
    /// Returns the method as a string slice.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::RollingWindow => "rolling_window",
            Self::FromStart => "from_start",
        }
    }
}

impl std::fmt::Display for PaceMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single pace measurement.
///
/// `beers_per_hour` is `None` when the measurement is undefined (no events
/// yet, or no elapsed time), which is distinct from a measured rate of `0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaceReading {
    /// Number of drinks counted by this measurement.
    pub consumed: u32,
    /// Elapsed time covered by this measurement, in minutes.
    pub elapsed_minutes: f64,
    /// Consumption rate in drinks per hour, when defined.
    pub beers_per_hour: Option<f64>,
}

impl PaceReading {
    /// Creates a new pace reading.
    #[must_use]
    pub const fn new(consumed: u32, elapsed_minutes: f64, beers_per_hour: Option<f64>) -> Self {
        Self {
            consumed,
            elapsed_minutes,
            beers_per_hour,
        }
    }
}

/// Both pace measurements plus the method the warm-up policy selected.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentPace {
    /// The measurement selected by the warm-up policy.
    pub method_used: PaceMethod,
    /// Average pace since the barrel was tapped.
    pub from_start: PaceReading,
    /// Pace over the recent rolling window.
    pub rolling_window: PaceReading,
}

impl CurrentPace {
    /// Returns the reading picked by the warm-up policy.
    #[must_use]
    pub const fn selected(&self) -> &PaceReading {
        match self.method_used {
            PaceMethod::RollingWindow => &self.rolling_window,
            PaceMethod::FromStart => &self.from_start,
        }
    }

    /// Returns the selected rate in drinks per hour, when defined.
    #[must_use]
    pub const fn selected_rate(&self) -> Option<f64> {
        self.selected().beers_per_hour
    }
}

/// Pace calculator over a barrel's consumption timeline.
///
/// Computes the from-start and rolling-window rates for an explicit `as_of`
/// instant and selects between them: `rolling_window` once the window meets
/// the policy's consumed and elapsed thresholds, `from_start` otherwise.
#[derive(Debug, Clone)]
pub struct PaceCalculator {
    policy: PacePolicy,
}

impl PaceCalculator {
    /// Creates a calculator after validating the policy.
    ///
    /// # Errors
    ///
    /// Returns an error when the policy carries a negative minute threshold.
    pub const fn new(policy: PacePolicy) -> Result<Self, PolicyError> {
        if let Err(e) = policy.validate() {
            return Err(e);
        }
        Ok(Self { policy })
    }

    /// Returns the policy in effect.
    #[must_use]
    pub const fn policy(&self) -> &PacePolicy {
        &self.policy
    }

    /// Computes both pace readings for `as_of` and selects one.
    ///
    /// Input order does not matter; the timeline may arrive unsorted. Total
    /// for all inputs, including an empty timeline (both rates `None`,
    /// `from_start` selected).
    #[must_use]
    pub fn current_pace(
        &self,
        events: &[DateTime<Utc>],
        created_at: DateTime<Utc>,
        as_of: DateTime<Utc>,
    ) -> CurrentPace {
        let from_start = from_start_reading(events, created_at, as_of);
        let rolling_window = self.rolling_reading(events, created_at, as_of);

        let method_used = if rolling_window.beers_per_hour.is_some()
            && rolling_window.consumed >= self.policy.min_consumed
            && rolling_window.elapsed_minutes >= self.policy.min_elapsed_minutes as f64
        {
            PaceMethod::RollingWindow
        } else {
            PaceMethod::FromStart
        };

        CurrentPace {
            method_used,
            from_start,
            rolling_window,
        }
    }

    /// Measures pace over events inside the rolling window ending at `as_of`.
    ///
    /// The window cannot claim more elapsed time than the barrel has existed,
    /// so the elapsed span is clamped to `as_of - created_at`.
    fn rolling_reading(
        &self,
        events: &[DateTime<Utc>],
        created_at: DateTime<Utc>,
        as_of: DateTime<Utc>,
    ) -> PaceReading {
        let cutoff = as_of - self.policy.window();

        let mut consumed: u32 = 0;
        let mut earliest: Option<DateTime<Utc>> = None;
        for &ts in events {
            if ts >= cutoff {
                consumed += 1;
                earliest = Some(earliest.map_or(ts, |e| e.min(ts)));
            }
        }

        let Some(earliest) = earliest else {
            return PaceReading::new(0, 0.0, None);
        };

        let elapsed_minutes = delta_minutes(as_of - earliest)
            .min(delta_minutes(as_of - created_at))
            .min(self.policy.window_minutes as f64);
        let beers_per_hour = if elapsed_minutes > 0.0 {
            Some(f64::from(consumed) / (elapsed_minutes / 60.0))
        } else {
            None
        };

        PaceReading::new(consumed, elapsed_minutes, beers_per_hour)
    }
}

/// Measures average pace since the barrel was tapped.
fn from_start_reading(
    events: &[DateTime<Utc>],
    created_at: DateTime<Utc>,
    as_of: DateTime<Utc>,
) -> PaceReading {
    let consumed = events.len() as u32;
    let elapsed = as_of - created_at;
    let elapsed_minutes = delta_minutes(elapsed);

    let beers_per_hour = if consumed == 0 || elapsed <= TimeDelta::zero() {
        None
    } else {
        let hours = (elapsed_minutes / 60.0).max(MIN_ELAPSED_HOURS);
        Some(f64::from(consumed) / hours)
    };

    PaceReading::new(consumed, elapsed_minutes, beers_per_hour)
}

/// Converts a time delta to fractional minutes.
pub(crate) fn delta_minutes(delta: TimeDelta) -> f64 {
    delta.num_milliseconds() as f64 / 60_000.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use chrono::TimeZone;

    fn tap_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 18, 0, 0).unwrap()
    }

    fn minutes_after(base: DateTime<Utc>, minutes: i64) -> DateTime<Utc> {
        base + TimeDelta::minutes(minutes)
    }

    fn make_calculator(
        window_minutes: i64,
        min_consumed: u32,
        min_elapsed_minutes: i64,
    ) -> PaceCalculator {
        PaceCalculator::new(PacePolicy::new(window_minutes, min_consumed, min_elapsed_minutes, 90))
            .unwrap()
    }

    #[test]
    fn test_rolling_window_selected_after_warm_up() {
        let calc = make_calculator(60, 2, 15);
        let t0 = tap_time();
        let events = vec![
            minutes_after(t0, 5),
            minutes_after(t0, 10),
            minutes_after(t0, 65),
        ];

        let pace = calc.current_pace(&events, t0, minutes_after(t0, 70));

        // Window covers [T0+10m, T0+70m]: two events, a full hour elapsed
        assert_eq!(pace.rolling_window.consumed, 2);
        assert_relative_eq!(pace.rolling_window.elapsed_minutes, 60.0, epsilon = 1e-10);
        assert_relative_eq!(
            pace.rolling_window.beers_per_hour.unwrap(),
            2.0,
            epsilon = 1e-10
        );

        assert_eq!(pace.from_start.consumed, 3);
        assert_relative_eq!(
            pace.from_start.beers_per_hour.unwrap(),
            3.0 / (70.0 / 60.0),
            epsilon = 1e-10
        );

        assert_eq!(pace.method_used, PaceMethod::RollingWindow);
        assert_eq!(pace.selected_rate(), pace.rolling_window.beers_per_hour);
    }

    #[test]
    fn test_empty_timeline_selects_from_start() {
        let t0 = tap_time();
        for (window, min_consumed, min_elapsed) in [(60, 3, 15), (0, 0, 0), (120, 1, 0)] {
            let calc = make_calculator(window, min_consumed, min_elapsed);
            let pace = calc.current_pace(&[], t0, minutes_after(t0, 60));

            assert_eq!(pace.from_start.consumed, 0);
            assert_eq!(pace.rolling_window.consumed, 0);
            assert!(pace.from_start.beers_per_hour.is_none());
            assert!(pace.rolling_window.beers_per_hour.is_none());
            assert_eq!(pace.method_used, PaceMethod::FromStart);
            assert!(pace.selected_rate().is_none());
        }
    }

    #[test]
    fn test_zero_elapsed_yields_no_rates() {
        let calc = make_calculator(60, 0, 0);
        let t0 = tap_time();

        let pace = calc.current_pace(&[t0], t0, t0);

        assert_eq!(pace.from_start.consumed, 1);
        assert!(pace.from_start.beers_per_hour.is_none());
        assert!(pace.rolling_window.beers_per_hour.is_none());
        assert_eq!(pace.method_used, PaceMethod::FromStart);
    }

    #[test]
    fn test_sub_second_elapsed_is_floored() {
        let calc = make_calculator(60, 3, 15);
        let t0 = tap_time();

        let pace = calc.current_pace(&[t0], t0, t0 + TimeDelta::milliseconds(200));

        // One drink over the one-second floor
        assert_relative_eq!(
            pace.from_start.beers_per_hour.unwrap(),
            3600.0,
            epsilon = 1e-10
        );
    }

    #[test]
    fn test_window_consumed_is_subset_of_total() {
        let calc = make_calculator(30, 1, 0);
        let t0 = tap_time();
        let events: Vec<_> = (0..12).map(|i| minutes_after(t0, i * 10)).collect();

        let pace = calc.current_pace(&events, t0, minutes_after(t0, 115));

        assert_eq!(pace.from_start.consumed, 12);
        assert!(pace.rolling_window.consumed <= pace.from_start.consumed);
        // Window [T0+85m, T0+115m] holds the 90m, 100m and 110m events
        assert_eq!(pace.rolling_window.consumed, 3);
    }

    #[test]
    fn test_window_clamped_to_barrel_age() {
        let calc = make_calculator(60, 1, 0);
        let t0 = tap_time();
        // Pour logged before the tap timestamp (clock skew upstream)
        let events = vec![minutes_after(t0, -10)];

        let pace = calc.current_pace(&events, t0, minutes_after(t0, 20));

        assert_relative_eq!(pace.rolling_window.elapsed_minutes, 20.0, epsilon = 1e-10);
        assert_relative_eq!(
            pace.rolling_window.beers_per_hour.unwrap(),
            3.0,
            epsilon = 1e-10
        );
    }

    #[test]
    fn test_future_events_yield_no_rolling_rate() {
        let calc = make_calculator(60, 1, 0);
        let t0 = tap_time();
        let events = vec![minutes_after(t0, 10)];

        let pace = calc.current_pace(&events, t0, t0);

        assert_eq!(pace.rolling_window.consumed, 1);
        assert!(pace.rolling_window.beers_per_hour.is_none());
        assert_eq!(pace.method_used, PaceMethod::FromStart);
    }

    #[test]
    fn test_unsorted_timeline_tolerated() {
        let calc = make_calculator(60, 2, 15);
        let t0 = tap_time();
        let sorted = vec![
            minutes_after(t0, 5),
            minutes_after(t0, 10),
            minutes_after(t0, 65),
        ];
        let shuffled = vec![sorted[2], sorted[0], sorted[1]];
        let as_of = minutes_after(t0, 70);

        assert_eq!(
            calc.current_pace(&sorted, t0, as_of),
            calc.current_pace(&shuffled, t0, as_of)
        );
    }

    #[test]
    fn test_sparse_window_falls_back_to_from_start() {
        let calc = make_calculator(60, 3, 15);
        let t0 = tap_time();
        // Only one recent pour: below the consumed threshold
        let events = vec![minutes_after(t0, 5), minutes_after(t0, 118)];

        let pace = calc.current_pace(&events, t0, minutes_after(t0, 120));

        assert_eq!(pace.rolling_window.consumed, 1);
        assert!(pace.rolling_window.beers_per_hour.is_some());
        assert_eq!(pace.method_used, PaceMethod::FromStart);
        assert_eq!(pace.selected(), &pace.from_start);
    }

    #[test]
    fn test_invalid_policy_rejected() {
        let result = PaceCalculator::new(PacePolicy::new(-60, 3, 15, 90));
        assert!(matches!(result, Err(PolicyError::NegativeWindowMinutes(-60))));
    }

    #[test]
    fn test_method_serialization() {
        assert_eq!(
            serde_json::to_string(&PaceMethod::RollingWindow).unwrap(),
            "\"rolling_window\""
        );
        assert_eq!(
            serde_json::to_string(&PaceMethod::FromStart).unwrap(),
            "\"from_start\""
        );
        assert_eq!(PaceMethod::RollingWindow.as_str(), "rolling_window");
    }

    #[test]
    fn test_current_pace_serde_field_names() {
        let calc = make_calculator(60, 2, 15);
        let t0 = tap_time();
        let pace = calc.current_pace(&[minutes_after(t0, 5)], t0, minutes_after(t0, 30));

        let json = serde_json::to_string(&pace).unwrap();

        assert!(json.contains("\"methodUsed\""));
        assert!(json.contains("\"fromStart\""));
        assert!(json.contains("\"rollingWindow\""));
        assert!(json.contains("\"beersPerHour\""));
        assert!(json.contains("\"elapsedMinutes\""));
    }
}
