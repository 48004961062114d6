//! Domain error types.
//!
//! These errors represent validation failures in the network model.
//! They are distinct from load (IO/parse) and routing errors.

use super::StationId;

/// Domain-level errors for validation and data consistency.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DomainError {
    /// Station name is empty after normalization
    #[error("station name is empty")]
    EmptyStationName,

    /// Coordinate outside the WGS84 range
    #[error("invalid coordinate: ({0}, {1})")]
    InvalidCoordinate(f64, f64),

    /// Line has no stations
    #[error("line {0} has no stations")]
    EmptyLine(String),

    /// Line lists the same station twice in a row
    #[error("line {line} repeats station {station} consecutively")]
    DuplicateConsecutive { line: String, station: StationId },

    /// Interchange connects a station to itself
    #[error("interchange connects station {0} to itself")]
    SelfInterchange(StationId),

    /// Fare is negative or not a number
    #[error("invalid fare: {0}")]
    InvalidFare(f64),

    /// Duration is negative
    #[error("invalid duration: {0} minutes")]
    InvalidDuration(i64),
}
