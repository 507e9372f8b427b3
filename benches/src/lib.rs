//! Benchmark utilities for tapline.
//!
//! Deterministic synthetic ledger data, so benchmark runs are reproducible
//! without external input.

use chrono::{DateTime, TimeDelta, TimeZone, Utc};
use tapline_types::{BarrelSize, BarrelSnapshot, HistoricalBarrelRecord};
use uuid::Uuid;

/// Fixed tap instant all synthetic data hangs off.
#[must_use]
pub fn origin() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 9, 21, 12, 0, 0).unwrap()
}

/// Generates `count` drink timestamps starting just after [`origin`].
///
/// Gaps cycle through 2, 7, 3 and 45 minutes so the timeline mixes bursts
/// with lulls long enough to split sessions.
#[must_use]
pub fn drink_timeline(count: usize) -> Vec<DateTime<Utc>> {
    const GAP_MINUTES: [i64; 4] = [2, 7, 3, 45];

    let mut timestamps = Vec::with_capacity(count);
    let mut cursor = origin();
    for index in 0..count {
        cursor += TimeDelta::minutes(GAP_MINUTES[index % GAP_MINUTES.len()]);
        timestamps.push(cursor);
    }
    timestamps
}

/// A half-drained 50-litre barrel tapped at [`origin`].
#[must_use]
pub fn tapped_barrel() -> BarrelSnapshot {
    BarrelSnapshot::new(
        Uuid::from_u128(0xBE27),
        3,
        BarrelSize::Liters50,
        100,
        50,
        origin(),
    )
}

/// A completed-barrel catalog of `count` records cycling through the keg
/// sizes, with durations between 4 and 10 hours.
#[must_use]
pub fn history_catalog(count: usize) -> Vec<HistoricalBarrelRecord> {
    (0..count)
        .map(|index| {
            let size = BarrelSize::all()[index % BarrelSize::all().len()];
            HistoricalBarrelRecord::new(
                index as u32 + 1,
                size,
                4.0 + (index % 7) as f64,
                size.default_units(),
            )
        })
        .collect()
}
