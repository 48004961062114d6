//! Station catalog: interning of station names to dense ids.

use std::collections::HashMap;

use crate::domain::{Coordinates, DomainError, LineId, Station, StationId, StationName};

/// Authoritative list of stations, keyed by normalized name.
///
/// Ids are assigned in first-seen order and index directly into the
/// catalog. An id handed out by one catalog is only meaningful for that
/// catalog.
#[derive(Debug, Clone, Default)]
pub struct StationCatalog {
    stations: Vec<Station>,
    by_key: HashMap<String, StationId>,
}

impl StationCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the id for `raw`, adding a new station if the name is unseen.
    ///
    /// The first spelling seen becomes the display name.
    pub fn intern(&mut self, raw: &str) -> Result<StationId, DomainError> {
        let name = StationName::parse(raw)?;
        if let Some(&id) = self.by_key.get(name.key()) {
            return Ok(id);
        }
        let id = StationId(self.stations.len() as u32);
        self.by_key.insert(name.key().to_string(), id);
        self.stations.push(Station::new(id, name));
        Ok(id)
    }

    /// Look up a station by name, ignoring case and extra whitespace.
    pub fn lookup(&self, raw: &str) -> Option<StationId> {
        self.by_key.get(&StationName::key_of(raw)).copied()
    }

    pub fn get(&self, id: StationId) -> Option<&Station> {
        self.stations.get(id.index())
    }

    /// Display name of a station.
    ///
    /// # Panics
    ///
    /// Panics if `id` was not issued by this catalog.
    pub fn name(&self, id: StationId) -> &str {
        self.stations[id.index()].name.display()
    }

    /// Display names for a sequence of ids.
    pub fn names(&self, ids: &[StationId]) -> Vec<String> {
        ids.iter().map(|&id| self.name(id).to_string()).collect()
    }

    pub fn set_coordinates(&mut self, id: StationId, coordinates: Coordinates) {
        if let Some(station) = self.stations.get_mut(id.index()) {
            station.coordinates = Some(coordinates);
        }
    }

    /// Record that `id` is served by `line`. Repeated calls are ignored.
    pub fn add_line_membership(&mut self, id: StationId, line: LineId) {
        if let Some(station) = self.stations.get_mut(id.index())
            && !station.lines.contains(&line)
        {
            station.lines.push(line);
        }
    }

    /// Lines serving a station, in line definition order.
    pub fn lines_of(&self, id: StationId) -> &[LineId] {
        self.stations
            .get(id.index())
            .map(|s| s.lines.as_slice())
            .unwrap_or(&[])
    }

    /// All stations in id order.
    pub fn iter(&self) -> impl Iterator<Item = &Station> {
        self.stations.iter()
    }

    pub fn len(&self) -> usize {
        self.stations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }
}
