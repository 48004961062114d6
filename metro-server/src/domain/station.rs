//! Station identity types.

use std::fmt;

use serde::Serialize;

use super::error::DomainError;

/// Interned station identifier.
///
/// A dense index into the station catalog, assigned once at ingestion.
/// Two stations are the same station if and only if their ids are equal.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StationId(pub u32);

impl StationId {
    /// Returns the id as a vector index.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for StationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StationId({})", self.0)
    }
}

impl fmt::Display for StationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A station name in normalized form.
///
/// Normalization trims the name and collapses runs of internal whitespace
/// to a single space. The display form keeps its original casing; the
/// lookup key is the display form lowercased.
///
/// # Examples
///
/// ```
/// use metro_server::domain::StationName;
///
/// let name = StationName::parse("  Pasar   Seni (KJL) ").unwrap();
/// assert_eq!(name.display(), "Pasar Seni (KJL)");
/// assert_eq!(name.key(), "pasar seni (kjl)");
///
/// assert!(StationName::parse("   ").is_err());
/// ```
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct StationName {
    display: String,
    key: String,
}

impl StationName {
    /// Parse and normalize a raw station name.
    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        let display = raw.split_whitespace().collect::<Vec<_>>().join(" ");
        if display.is_empty() {
            return Err(DomainError::EmptyStationName);
        }
        let key = display.to_lowercase();
        Ok(Self { display, key })
    }

    /// The normalized display name.
    pub fn display(&self) -> &str {
        &self.display
    }

    /// The case-folded lookup key.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Compute the lookup key for a raw name without allocating a `StationName`.
    pub fn key_of(raw: &str) -> String {
        raw.split_whitespace()
            .collect::<Vec<_>>()
            .join(" ")
            .to_lowercase()
    }
}

impl fmt::Debug for StationName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StationName({})", self.display)
    }
}

impl fmt::Display for StationName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display)
    }
}

/// A verified WGS84 coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    /// Create a coordinate, rejecting out-of-range or non-finite values.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, DomainError> {
        if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
            return Err(DomainError::InvalidCoordinate(latitude, longitude));
        }
        if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
            return Err(DomainError::InvalidCoordinate(latitude, longitude));
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }
}

/// A station in the catalog.
#[derive(Debug, Clone)]
pub struct Station {
    pub id: StationId,
    pub name: StationName,

    /// `None` means no verified coordinate is known.
    pub coordinates: Option<Coordinates>,

    /// Lines this station belongs to, in line definition order.
    pub lines: Vec<super::LineId>,
}

impl Station {
    /// Create a station with no coordinates and no line memberships.
    pub fn new(id: StationId, name: StationName) -> Self {
        Self {
            id,
            name,
            coordinates: None,
            lines: Vec::new(),
        }
    }

    /// Whether this station sits on more than one line.
    pub fn is_interchange(&self) -> bool {
        self.lines.len() > 1
    }
}
