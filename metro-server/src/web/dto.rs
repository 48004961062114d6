//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

use crate::network::{LoadReport, Network};
use crate::planner::{MissingSegment, PathSegment, Route, SegmentKind};

/// Query parameters naming a station pair.
///
/// Both are optional so a missing one can be reported as a
/// `missing_parameter` error rather than a generic rejection.
#[derive(Debug, Default, Deserialize)]
pub struct PairQuery {
    /// Origin station name
    pub from: Option<String>,

    /// Destination station name
    pub to: Option<String>,
}

/// A station in the station list.
#[derive(Debug, Serialize)]
pub struct StationResult {
    /// Station display name
    pub name: String,

    /// Latitude, if verified
    pub latitude: Option<f64>,

    /// Longitude, if verified
    pub longitude: Option<f64>,

    /// Names of the lines serving the station
    pub lines: Vec<String>,
}

/// A line and its stations in order.
#[derive(Debug, Serialize)]
pub struct LineResult {
    pub name: String,
    pub stations: Vec<String>,
}

/// Direct fare between two stations.
#[derive(Debug, Serialize)]
pub struct FareResponse {
    pub from: String,
    pub to: String,

    /// Price for the pair
    pub price: f64,

    /// Travel time in minutes, if the time table has one
    pub minutes: Option<u32>,
}

/// A routed trip.
#[derive(Debug, Serialize)]
pub struct RouteResponse {
    pub from: String,
    pub to: String,

    /// Stations in travel order, including both ends
    pub path: Vec<String>,

    /// Path split by line and interchange
    pub segments: Vec<SegmentResult>,

    /// Sum of hop fares, rounded to 2 decimal places
    pub total_fare: f64,

    /// Sum of hop times
    pub total_time_minutes: u32,

    /// Number of hops
    pub hops: usize,

    /// False if any hop was missing a fare or time
    pub complete: bool,

    /// Hops the totals had to skip
    pub missing_segments: Vec<MissingSegmentResult>,

    /// Fare table entry for the whole pair, if present
    pub direct_fare: Option<f64>,

    /// How the path was found
    pub strategy: &'static str,
}

/// A segment of a route.
#[derive(Debug, Serialize)]
#[serde(tag = "type")]
pub enum SegmentResult {
    Line(LineSegmentResult),
    Interchange(InterchangeResult),
}

/// A ride along one line.
#[derive(Debug, Serialize)]
pub struct LineSegmentResult {
    /// Line name
    pub line: String,

    /// Stations ridden through, including boarding and alighting
    pub stations: Vec<String>,
}

/// A walk between interchange stations.
#[derive(Debug, Serialize)]
pub struct InterchangeResult {
    pub stations: Vec<String>,
}

/// A hop missing from the fare/time table.
#[derive(Debug, Serialize)]
pub struct MissingSegmentResult {
    pub from: String,
    pub to: String,
    pub fare_missing: bool,
    pub time_missing: bool,
}

/// Result of a network reload.
#[derive(Debug, Serialize)]
pub struct ReloadResponse {
    pub generation: u64,
    pub stations: usize,
    pub lines: usize,
    pub edges: usize,
    pub skipped: usize,
    pub isolated: Vec<String>,
}

/// Result of publishing a position update.
#[derive(Debug, Serialize)]
pub struct PublishResponse {
    /// Subscribers the update was queued for
    pub receivers: usize,
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,

    /// Machine-readable error category
    pub code: &'static str,
}

// Conversion implementations

impl StationResult {
    /// All stations in catalog order.
    pub fn all(network: &Network) -> Vec<Self> {
        network
            .catalog()
            .iter()
            .map(|station| Self {
                name: station.name.display().to_string(),
                latitude: station.coordinates.map(|c| c.latitude),
                longitude: station.coordinates.map(|c| c.longitude),
                lines: station
                    .lines
                    .iter()
                    .filter_map(|&id| network.line(id))
                    .map(|line| line.name().to_string())
                    .collect(),
            })
            .collect()
    }
}

impl LineResult {
    /// All lines in definition order.
    pub fn all(network: &Network) -> Vec<Self> {
        network
            .lines()
            .iter()
            .map(|line| Self {
                name: line.name().to_string(),
                stations: network.catalog().names(line.stations()),
            })
            .collect()
    }
}

impl RouteResponse {
    /// Create from a planner Route.
    pub fn from_route(route: &Route, network: &Network) -> Self {
        let catalog = network.catalog();
        Self {
            from: catalog.name(route.origin).to_string(),
            to: catalog.name(route.destination).to_string(),
            path: catalog.names(&route.path),
            segments: route
                .segments
                .iter()
                .map(|s| SegmentResult::from_segment(s, network))
                .collect(),
            total_fare: route.fare.total_fare,
            total_time_minutes: route.fare.total_minutes,
            hops: route.hops(),
            complete: route.fare.is_complete(),
            missing_segments: route
                .fare
                .missing
                .iter()
                .map(|m| MissingSegmentResult::from_missing(m, network))
                .collect(),
            direct_fare: route.direct_fare,
            strategy: route.strategy.as_str(),
        }
    }
}

impl SegmentResult {
    pub fn from_segment(segment: &PathSegment, network: &Network) -> Self {
        let stations = network.catalog().names(&segment.stations);
        match segment.kind {
            SegmentKind::Line(id) => SegmentResult::Line(LineSegmentResult {
                line: network
                    .line(id)
                    .map(|l| l.name().to_string())
                    .unwrap_or_default(),
                stations,
            }),
            SegmentKind::Interchange => SegmentResult::Interchange(InterchangeResult { stations }),
        }
    }
}

impl MissingSegmentResult {
    pub fn from_missing(missing: &MissingSegment, network: &Network) -> Self {
        Self {
            from: network.catalog().name(missing.from).to_string(),
            to: network.catalog().name(missing.to).to_string(),
            fare_missing: missing.fare_missing,
            time_missing: missing.time_missing,
        }
    }
}

impl From<LoadReport> for ReloadResponse {
    fn from(report: LoadReport) -> Self {
        Self {
            generation: report.generation,
            stations: report.stations,
            lines: report.lines,
            edges: report.edges,
            skipped: report.skipped,
            isolated: report.isolated,
        }
    }
}
