//! Session segmentation and event-wide pace metrics.

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use tapline_types::{PacePolicy, PolicyError};

use crate::window::delta_minutes;

/// A contiguous run of drinking activity.
///
/// A session with a single event has zero duration but still counts as a
/// session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    /// Timestamp of the first event in the session.
    pub started_at: DateTime<Utc>,
    /// Timestamp of the last event in the session.
    pub ended_at: DateTime<Utc>,
    /// Number of events in the session.
    pub events: u32,
}

impl Session {
    /// Creates a new session.
    #[must_use]
    pub const fn new(started_at: DateTime<Utc>, ended_at: DateTime<Utc>, events: u32) -> Self {
        Self {
            started_at,
            ended_at,
            events,
        }
    }

    /// Returns the session's span from first to last event.
    #[must_use]
    pub fn duration(&self) -> TimeDelta {
        self.ended_at - self.started_at
    }

    /// Returns the session's span in fractional hours.
    #[must_use]
    pub fn duration_hours(&self) -> f64 {
        delta_minutes(self.duration()) / 60.0
    }
}

/// Splits a timeline into sessions at inactivity gaps.
///
/// Timestamps are sorted first; a new session starts whenever the gap between
/// consecutive events is strictly greater than `gap_minutes`.
#[must_use]
pub fn segment_sessions(timestamps: &[DateTime<Utc>], gap_minutes: i64) -> Vec<Session> {
    let mut sorted = timestamps.to_vec();
    sorted.sort_unstable();

    let gap = TimeDelta::minutes(gap_minutes);
    let mut sessions = Vec::new();

    let Some((&first, rest)) = sorted.split_first() else {
        return sessions;
    };

    let mut started_at = first;
    let mut ended_at = first;
    let mut events: u32 = 1;
    for &ts in rest {
        if ts - ended_at > gap {
            sessions.push(Session::new(started_at, ended_at, events));
            started_at = ts;
            events = 0;
        }
        ended_at = ts;
        events += 1;
    }
    sessions.push(Session::new(started_at, ended_at, events));

    sessions
}

/// Event-wide activity metrics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventPace {
    /// Total number of consumption events on the timeline.
    pub total_events: u32,
    /// Number of drinking sessions.
    pub sessions: u32,
    /// Total hours of drinking activity across all sessions.
    pub active_hours: f64,
    /// Average consumption rate over active hours, `None` when no time was
    /// active.
    pub avg_beers_per_active_hour: Option<f64>,
    /// Rolling-window rate at `as_of`; `0` when the window holds nothing.
    pub current_beers_per_hour: f64,
}

/// Aggregates an event's full consumption timeline into activity metrics.
///
/// Independent of barrel-level prediction: the timeline here spans every
/// barrel poured at the event.
#[derive(Debug, Clone)]
pub struct EventPaceAggregator {
    policy: PacePolicy,
}

impl EventPaceAggregator {
    /// Creates an aggregator after validating the policy.
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

    /// Computes session and pace metrics for the timeline at `as_of`.
    ///
    /// Input order does not matter. Unlike the per-barrel reading, the
    /// current rate is always reported and falls back to `0` when undefined.
    #[must_use]
    pub fn event_pace(&self, timeline: &[DateTime<Utc>], as_of: DateTime<Utc>) -> EventPace {
        let sessions = segment_sessions(timeline, self.policy.sleep_gap_minutes);
        let active_hours: f64 = sessions.iter().map(Session::duration_hours).sum();

        let total_events = timeline.len() as u32;
        let avg_beers_per_active_hour = if active_hours > 0.0 {
            Some(f64::from(total_events) / active_hours)
        } else {
            None
        };

        EventPace {
            total_events,
            sessions: sessions.len() as u32,
            active_hours,
            avg_beers_per_active_hour,
            current_beers_per_hour: self.rolling_rate(timeline, as_of),
        }
    }

    /// Rolling-window rate over the timeline, without a tap-time clamp.
    fn rolling_rate(&self, timeline: &[DateTime<Utc>], as_of: DateTime<Utc>) -> f64 {
        let cutoff = as_of - self.policy.window();

        let mut consumed: u32 = 0;
        let mut earliest: Option<DateTime<Utc>> = None;
        for &ts in timeline {
            if ts >= cutoff {
                consumed += 1;
                earliest = Some(earliest.map_or(ts, |e| e.min(ts)));
            }
        }

        let Some(earliest) = earliest else {
            return 0.0;
        };

        let elapsed_minutes =
            delta_minutes(as_of - earliest).min(self.policy.window_minutes as f64);
        if elapsed_minutes > 0.0 {
            f64::from(consumed) / (elapsed_minutes / 60.0)
        } else {
            0.0
        }
    }
}
