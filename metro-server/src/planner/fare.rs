//! Fare and travel-time aggregation along a path.
//!
//! Segments are looked up hop by hop. A hop with no record is skipped and
//! reported, for fare and time alike, so the totals are a partial sum
//! rather than an error.

use crate::domain::StationId;
use crate::network::FareTable;

/// A hop whose fare or time was not in the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MissingSegment {
    pub from: StationId,
    pub to: StationId,
    pub fare_missing: bool,
    pub time_missing: bool,
}

/// Totals for a path.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FareSummary {
    /// Sum of hop fares, rounded once to 2 decimal places.
    pub total_fare: f64,
    /// Sum of hop durations in minutes.
    pub total_minutes: u32,
    /// Hops that contributed nothing to one or both totals.
    pub missing: Vec<MissingSegment>,
}

impl FareSummary {
    /// Whether every hop had both a fare and a time.
    pub fn is_complete(&self) -> bool {
        self.missing.is_empty()
    }
}

/// Round a fare to 2 decimal places.
pub fn round_fare(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Sum fares and times over consecutive pairs of `path`.
///
/// Rounding happens once at the end so per-hop rounding never drifts the
/// total. A path of zero or one station costs nothing.
pub fn aggregate(path: &[StationId], table: &FareTable) -> FareSummary {
    let mut fare = 0.0;
    let mut minutes: u32 = 0;
    let mut missing = Vec::new();

    for hop in path.windows(2) {
        let (from, to) = (hop[0], hop[1]);
        let record = table.get(from, to).unwrap_or_default();

        if let Some(price) = record.price {
            fare += price;
        }
        if let Some(m) = record.minutes {
            minutes = minutes.saturating_add(m);
        }
        if record.price.is_none() || record.minutes.is_none() {
            missing.push(MissingSegment {
                from,
                to,
                fare_missing: record.price.is_none(),
                time_missing: record.minutes.is_none(),
            });
        }
    }

    FareSummary {
        total_fare: round_fare(fare),
        total_minutes: minutes,
        missing,
    }
}
