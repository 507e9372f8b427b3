//! Historical pace resolution from completed barrels.

use serde::{Deserialize, Serialize};
use tapline_types::{BarrelSize, HistoricalBarrelRecord};

/// How the historical rate was matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStrategy {
    /// A completed barrel with the same order index and size.
    ///
    /// The Nth barrel of a size tends to drain at a similar rate across
    /// events, which makes an exact index match the strongest signal.
    SameIndexSize,
    /// Arithmetic mean over all completed barrels of the same size.
    AvgSameSize,
}

impl MatchStrategy {
    /// Returns the strategy as a string slice.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::SameIndexSize => "same_index_size",
            Self::AvgSameSize => "avg_same_size",
        }
    }
}

impl std::fmt::Display for MatchStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Historical rate resolved from the completed-barrel catalog.
///
/// `full_barrels_used` counts the records behind the estimate (1 for an index
/// match, N for a same-size average, 0 for no match) so consumers can gauge
/// its weight.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoricalPace {
    /// The strategy that produced the rate, `None` when nothing matched.
    pub matching_strategy: Option<MatchStrategy>,
    /// Resolved drain rate in drinks per hour, when matched.
    pub beers_per_hour: Option<f64>,
    /// Number of completed barrels behind the estimate.
    pub full_barrels_used: u32,
}

impl HistoricalPace {
    /// Creates the result for a catalog with no usable match.
    #[must_use]
    pub const fn no_match() -> Self {
        Self {
            matching_strategy: None,
            beers_per_hour: None,
            full_barrels_used: 0,
        }
    }
}

/// Finds the best-matching historical rate for a barrel.
///
/// Tries an exact match on both order index and size first, then the mean
/// rate over all same-size records. Records whose recorded duration yields no
/// rate are skipped by both strategies.
#[must_use]
pub fn resolve_historical_pace(
    order_number: u32,
    size: BarrelSize,
    history: &[HistoricalBarrelRecord],
) -> HistoricalPace {
    let index_match = history
        .iter()
        .filter(|r| r.order_number == order_number && r.size == size)
        .find_map(HistoricalBarrelRecord::beers_per_hour);
    if let Some(rate) = index_match {
        return HistoricalPace {
            matching_strategy: Some(MatchStrategy::SameIndexSize),
            beers_per_hour: Some(rate),
            full_barrels_used: 1,
        };
    }

    let same_size: Vec<f64> = history
        .iter()
        .filter(|r| r.size == size)
        .filter_map(HistoricalBarrelRecord::beers_per_hour)
        .collect();
    if same_size.is_empty() {
        return HistoricalPace::no_match();
    }

    let mean = same_size.iter().sum::<f64>() / same_size.len() as f64;
    HistoricalPace {
        matching_strategy: Some(MatchStrategy::AvgSameSize),
        beers_per_hour: Some(mean),
        full_barrels_used: same_size.len() as u32,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn completed(order: u32, size: BarrelSize, hours: f64, units: u32) -> HistoricalBarrelRecord {
        HistoricalBarrelRecord::new(order, size, hours, units)
    }

    #[test]
    fn test_same_index_and_size_wins() {
        let history = vec![completed(1, BarrelSize::Liters30, 4.0, 60)];

        let pace = resolve_historical_pace(1, BarrelSize::Liters30, &history);

        assert_eq!(pace.matching_strategy, Some(MatchStrategy::SameIndexSize));
        assert_relative_eq!(pace.beers_per_hour.unwrap(), 15.0, epsilon = 1e-10);
        assert_eq!(pace.full_barrels_used, 1);
    }

    #[test]
    fn test_falls_back_to_same_size_average() {
        let history = vec![
            completed(1, BarrelSize::Liters30, 6.0, 60),
            completed(2, BarrelSize::Liters30, 3.0, 60),
            completed(1, BarrelSize::Liters50, 5.0, 100),
        ];

        let pace = resolve_historical_pace(7, BarrelSize::Liters30, &history);

        assert_eq!(pace.matching_strategy, Some(MatchStrategy::AvgSameSize));
        // Mean of 10 and 20 drinks per hour, the 50l record doesn't count
        assert_relative_eq!(pace.beers_per_hour.unwrap(), 15.0, epsilon = 1e-10);
        assert_eq!(pace.full_barrels_used, 2);
    }

    #[test]
    fn test_average_is_unweighted_by_duration() {
        let history = vec![
            completed(1, BarrelSize::Liters30, 4.0, 60),
            completed(2, BarrelSize::Liters30, 2.0, 60),
        ];

        let pace = resolve_historical_pace(3, BarrelSize::Liters30, &history);

        // (15 + 30) / 2, not total units over total hours
        assert_relative_eq!(pace.beers_per_hour.unwrap(), 22.5, epsilon = 1e-10);
    }

    #[test]
    fn test_index_match_on_wrong_size_does_not_count() {
        let history = vec![completed(1, BarrelSize::Liters50, 5.0, 100)];

        let pace = resolve_historical_pace(1, BarrelSize::Liters30, &history);

        assert_eq!(pace, HistoricalPace::no_match());
    }

    #[test]
    fn test_empty_history_yields_no_match() {
        let pace = resolve_historical_pace(1, BarrelSize::Liters30, &[]);

        assert!(pace.matching_strategy.is_none());
        assert!(pace.beers_per_hour.is_none());
        assert_eq!(pace.full_barrels_used, 0);
    }

    #[test]
    fn test_unusable_duration_falls_through() {
        let history = vec![
            completed(1, BarrelSize::Liters30, 0.0, 60),
            completed(2, BarrelSize::Liters30, 4.0, 60),
        ];

        let pace = resolve_historical_pace(1, BarrelSize::Liters30, &history);

        // The zero-duration index match is skipped everywhere
        assert_eq!(pace.matching_strategy, Some(MatchStrategy::AvgSameSize));
        assert_relative_eq!(pace.beers_per_hour.unwrap(), 15.0, epsilon = 1e-10);
        assert_eq!(pace.full_barrels_used, 1);
    }

    #[test]
    fn test_strategy_serialization() {
        assert_eq!(
            serde_json::to_string(&MatchStrategy::SameIndexSize).unwrap(),
            "\"same_index_size\""
        );
        assert_eq!(
            serde_json::to_string(&MatchStrategy::AvgSameSize).unwrap(),
            "\"avg_same_size\""
        );
        assert_eq!(MatchStrategy::AvgSameSize.as_str(), "avg_same_size");
    }

    #[test]
    fn test_historical_pace_serde_field_names() {
        let history = vec![completed(1, BarrelSize::Liters30, 4.0, 60)];
        let pace = resolve_historical_pace(1, BarrelSize::Liters30, &history);

        let json = serde_json::to_string(&pace).unwrap();

        assert!(json.contains("\"matchingStrategy\":\"same_index_size\""));
        assert!(json.contains("\"beersPerHour\""));
        assert!(json.contains("\"fullBarrelsUsed\":1"));
    }
}
