//! Rail lines and interchanges.

use std::fmt;

use super::error::DomainError;
use super::station::StationId;

/// Index of a line in network definition order.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LineId(pub u32);

impl LineId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for LineId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LineId({})", self.0)
    }
}

/// One physical rail line: an ordered sequence of stations.
///
/// Consecutive stations are directly connected. The sequence is never
/// empty and never repeats a station in consecutive positions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    name: String,
    stations: Vec<StationId>,
}

impl Line {
    /// Create a line, validating its station sequence.
    pub fn new(name: impl Into<String>, stations: Vec<StationId>) -> Result<Self, DomainError> {
        let name = name.into();
        if stations.is_empty() {
            return Err(DomainError::EmptyLine(name));
        }
        if let Some(pair) = stations.windows(2).find(|w| w[0] == w[1]) {
            return Err(DomainError::DuplicateConsecutive {
                line: name,
                station: pair[0],
            });
        }
        Ok(Self { name, stations })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn stations(&self) -> &[StationId] {
        &self.stations
    }

    pub fn len(&self) -> usize {
        self.stations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }

    /// Position of a station on this line, if it is a member.
    pub fn index_of(&self, station: StationId) -> Option<usize> {
        self.stations.iter().position(|&s| s == station)
    }

    pub fn contains(&self, station: StationId) -> bool {
        self.index_of(station).is_some()
    }

    /// Consecutive station pairs, in line order.
    pub fn segments(&self) -> impl Iterator<Item = (StationId, StationId)> + '_ {
        self.stations.windows(2).map(|w| (w[0], w[1]))
    }

    /// The contiguous run of stations from `from` to `to`, inclusive.
    ///
    /// The run is reversed when `from` sits after `to` on the line.
    /// Returns `None` if either station is not on this line.
    pub fn slice(&self, from: StationId, to: StationId) -> Option<Vec<StationId>> {
        let i = self.index_of(from)?;
        let j = self.index_of(to)?;
        if i <= j {
            Some(self.stations[i..=j].to_vec())
        } else {
            Some(self.stations[j..=i].iter().rev().copied().collect())
        }
    }
}

/// A walkable connection between two stations on different lines.
///
/// Stored with the endpoints in the order they were defined; equality and
/// hashing treat the pair as unordered.
#[derive(Debug, Clone, Copy)]
pub struct Interchange {
    a: StationId,
    b: StationId,
}

impl Interchange {
    pub fn new(a: StationId, b: StationId) -> Result<Self, DomainError> {
        if a == b {
            return Err(DomainError::SelfInterchange(a));
        }
        Ok(Self { a, b })
    }

    pub fn endpoints(&self) -> (StationId, StationId) {
        (self.a, self.b)
    }

    fn ordered(&self) -> (StationId, StationId) {
        (self.a.min(self.b), self.a.max(self.b))
    }
}

impl PartialEq for Interchange {
    fn eq(&self, other: &Self) -> bool {
        self.ordered() == other.ordered()
    }
}

impl Eq for Interchange {}

impl std::hash::Hash for Interchange {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.ordered().hash(state);
    }
}
