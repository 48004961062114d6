//! Route search: the single entry point for trip queries.
//!
//! Resolves station names, picks a path strategy, and aggregates fares
//! and times along the chosen path.

use tracing::{debug, warn};

use crate::domain::StationId;
use crate::network::Network;

use super::bfs::{PathError, find_path};
use super::fare::{FareSummary, aggregate};
use super::lines::{PathSegment, cross_line_path, same_line_path, tag_segments};

/// Error from route search.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RouteError {
    /// Name is not in the station catalog
    #[error("unknown station: {0}")]
    UnknownStation(String),

    /// Both stations are known but the network does not connect them
    #[error("no route from {origin} to {destination}")]
    NoPath { origin: String, destination: String },
}

/// How the returned path was produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// Origin and destination are the same station.
    Identity,
    /// Run of a single shared line.
    SameLine,
    /// Two lines joined by one bridge.
    CrossLine,
    /// General breadth-first search.
    Search,
}

impl Strategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Strategy::Identity => "identity",
            Strategy::SameLine => "same_line",
            Strategy::CrossLine => "cross_line",
            Strategy::Search => "search",
        }
    }
}

/// A routed trip between two stations.
#[derive(Debug, Clone, PartialEq)]
pub struct Route {
    pub origin: StationId,
    pub destination: StationId,
    /// Full station sequence including both endpoints.
    pub path: Vec<StationId>,
    pub segments: Vec<PathSegment>,
    pub fare: FareSummary,
    /// Table fare for the whole origin/destination pair, when the fare
    /// source covers non-adjacent pairs.
    pub direct_fare: Option<f64>,
    pub strategy: Strategy,
}

impl Route {
    /// Number of edges travelled.
    pub fn hops(&self) -> usize {
        self.path.len().saturating_sub(1)
    }
}

/// Route planner over one network snapshot.
pub struct Router<'a> {
    network: &'a Network,
}

impl<'a> Router<'a> {
    pub fn new(network: &'a Network) -> Self {
        Self { network }
    }

    /// Resolve a station name, case- and whitespace-insensitively.
    pub fn resolve(&self, name: &str) -> Result<StationId, RouteError> {
        self.network
            .station(name)
            .filter(|&id| self.network.graph().contains(id))
            .ok_or_else(|| RouteError::UnknownStation(name.trim().to_string()))
    }

    /// Route between two station names.
    pub fn route(&self, origin: &str, destination: &str) -> Result<Route, RouteError> {
        let origin = self.resolve(origin)?;
        let destination = self.resolve(destination)?;
        self.route_ids(origin, destination)
    }

    /// Route between two resolved stations.
    pub fn route_ids(&self, origin: StationId, destination: StationId) -> Result<Route, RouteError> {
        let (path, strategy) = self.find_path(origin, destination)?;

        if strategy == Strategy::Identity {
            return Ok(Route {
                origin,
                destination,
                segments: Vec::new(),
                path,
                fare: FareSummary::default(),
                direct_fare: None,
                strategy,
            });
        }

        let fare = aggregate(&path, self.network.fares());
        let catalog = self.network.catalog();
        for gap in &fare.missing {
            warn!(
                from = catalog.name(gap.from),
                to = catalog.name(gap.to),
                fare_missing = gap.fare_missing,
                time_missing = gap.time_missing,
                "segment missing from fare table, total is partial"
            );
        }

        Ok(Route {
            origin,
            destination,
            segments: tag_segments(self.network, &path),
            direct_fare: self.network.fares().price(origin, destination),
            path,
            fare,
            strategy,
        })
    }

    /// Find the station path and the strategy that produced it.
    ///
    /// The BFS path is always the answer. The line-aware strategies only
    /// label it, and only when they produce that same path; a different
    /// path of equal length would break the BFS tie-break.
    pub fn find_path(
        &self,
        origin: StationId,
        destination: StationId,
    ) -> Result<(Vec<StationId>, Strategy), RouteError> {
        let graph = self.network.graph();
        let shortest = find_path(graph, origin, destination).map_err(|e| match e {
            PathError::NotInGraph(id) => RouteError::UnknownStation(self.display(id)),
            PathError::Disconnected {
                origin,
                destination,
            } => RouteError::NoPath {
                origin: self.display(origin),
                destination: self.display(destination),
            },
        })?;

        if origin == destination {
            return Ok((shortest, Strategy::Identity));
        }

        let candidate = match same_line_path(self.network, origin, destination) {
            Some(path) => Some((path, Strategy::SameLine)),
            None => cross_line_path(self.network, origin, destination)
                .map(|path| (path, Strategy::CrossLine)),
        };

        match candidate {
            Some((path, strategy)) if path == shortest => Ok((path, strategy)),
            Some((path, strategy)) => {
                debug!(
                    strategy = strategy.as_str(),
                    line_stops = path.len(),
                    bfs_stops = shortest.len(),
                    "line-aware path differs from BFS path, using BFS"
                );
                Ok((shortest, Strategy::Search))
            }
            None => Ok((shortest, Strategy::Search)),
        }
    }

    fn display(&self, id: StationId) -> String {
        self.network
            .catalog()
            .get(id)
            .map(|s| s.name.display().to_string())
            .unwrap_or_else(|| id.to_string())
    }
}
