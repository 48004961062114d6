//! The station network: catalog, lines, connection graph and fares.
//!
//! A `Network` is built in one pass from a `NetworkSource` and never
//! mutated afterwards. Reloading builds a fresh `Network` and swaps it in
//! through a `NetworkHandle`.

mod builtin;
mod catalog;
mod error;
mod fares;
mod graph;
mod handle;
mod source;

use std::collections::HashSet;

use tracing::{info, warn};

use crate::domain::{Coordinates, Interchange, Line, LineId, StationId, StationName};

pub use builtin::klang_valley;
pub use catalog::StationCatalog;
pub use error::LoadError;
pub use fares::{FareRecord, FareTable};
pub use graph::{BuildReport, ConnectionGraph, GraphBuilder, build_graph};
pub use handle::NetworkHandle;
pub use source::{
    DefinitionSource, LineDef, MatrixCell, NetworkDefinition, NetworkSource, SourceData,
    StationDef, parse_matrix, read_matrix,
};

/// Counts from building a network. Skipped records were logged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    pub generation: u64,
    pub stations: usize,
    pub lines: usize,
    pub interchanges: usize,
    pub connections: usize,
    pub edges: usize,
    pub fares_loaded: usize,
    pub times_loaded: usize,
    pub skipped: usize,
    /// Display names of stations with no connections.
    pub isolated: Vec<String>,
}

/// An immutable snapshot of the whole network.
#[derive(Debug, Clone)]
pub struct Network {
    generation: u64,
    catalog: StationCatalog,
    lines: Vec<Line>,
    interchanges: Vec<Interchange>,
    graph: ConnectionGraph,
    fares: FareTable,
}

impl Network {
    /// Read a source and build a network from it.
    pub fn load(source: &NetworkSource, generation: u64) -> Result<(Self, LoadReport), LoadError> {
        let data = source.read()?;
        Ok(Self::build(data, generation))
    }

    /// Build a network from already-read source data.
    ///
    /// Invalid records are logged and skipped; building never fails.
    pub fn build(data: SourceData, generation: u64) -> (Self, LoadReport) {
        let SourceData {
            definition,
            fares: fare_cells,
            times: time_cells,
        } = data;
        let mut report = LoadReport {
            generation,
            ..LoadReport::default()
        };

        let excluded: HashSet<String> = definition
            .excluded
            .iter()
            .map(|name| StationName::key_of(name))
            .collect();
        let is_excluded = |name: &str| excluded.contains(&StationName::key_of(name));

        let mut catalog = StationCatalog::new();

        for def in &definition.stations {
            if is_excluded(&def.name) {
                continue;
            }
            let id = match catalog.intern(&def.name) {
                Ok(id) => id,
                Err(e) => {
                    warn!(name = %def.name, error = %e, "skipping station");
                    report.skipped += 1;
                    continue;
                }
            };
            match (def.latitude, def.longitude) {
                (Some(lat), Some(lon)) => match Coordinates::new(lat, lon) {
                    Ok(coords) => catalog.set_coordinates(id, coords),
                    Err(e) => warn!(station = %def.name, error = %e, "ignoring coordinates"),
                },
                (None, None) => {}
                _ => warn!(station = %def.name, "ignoring coordinates with one axis missing"),
            }
        }

        let mut lines = Vec::with_capacity(definition.lines.len());
        for def in &definition.lines {
            let mut ids: Vec<StationId> = Vec::with_capacity(def.stations.len());
            let mut after_excluded = false;
            for name in &def.stations {
                if is_excluded(name) {
                    after_excluded = true;
                    continue;
                }
                match catalog.intern(name) {
                    // Dropping an excluded station can leave its neighbours
                    // adjacent twice; that repeat is expected and silent.
                    Ok(id) if ids.last() == Some(&id) => {
                        if !after_excluded {
                            warn!(
                                line = %def.name,
                                station = %catalog.name(id),
                                "dropping repeated consecutive station"
                            );
                            report.skipped += 1;
                        }
                    }
                    Ok(id) => ids.push(id),
                    Err(e) => {
                        warn!(line = %def.name, error = %e, "skipping line entry");
                        report.skipped += 1;
                    }
                }
                after_excluded = false;
            }
            match Line::new(def.name.clone(), ids) {
                Ok(line) => {
                    let line_id = LineId(lines.len() as u32);
                    for &station in line.stations() {
                        catalog.add_line_membership(station, line_id);
                    }
                    lines.push(line);
                }
                Err(e) => {
                    warn!(line = %def.name, error = %e, "skipping line");
                    report.skipped += 1;
                }
            }
        }

        let mut interchanges = Vec::with_capacity(definition.interchanges.len());
        for (a, b) in &definition.interchanges {
            if is_excluded(a) || is_excluded(b) {
                continue;
            }
            let pair = catalog
                .intern(a)
                .and_then(|a| catalog.intern(b).map(|b| (a, b)))
                .and_then(|(a, b)| Interchange::new(a, b));
            match pair {
                Ok(interchange) if !interchanges.contains(&interchange) => {
                    interchanges.push(interchange)
                }
                Ok(_) => {}
                Err(e) => {
                    warn!(from = %a, to = %b, error = %e, "skipping interchange");
                    report.skipped += 1;
                }
            }
        }

        let mut connections = Vec::with_capacity(definition.connections.len());
        for (a, b) in &definition.connections {
            if is_excluded(a) || is_excluded(b) {
                continue;
            }
            match catalog.intern(a).and_then(|a| catalog.intern(b).map(|b| (a, b))) {
                Ok((a, b)) if a == b => {
                    warn!(station = %catalog.name(a), "skipping connection to itself");
                    report.skipped += 1;
                }
                Ok(pair) => connections.push(pair),
                Err(e) => {
                    warn!(from = %a, to = %b, error = %e, "skipping connection");
                    report.skipped += 1;
                }
            }
        }

        let (graph, build) = build_graph(catalog.len(), &lines, &interchanges, &connections);
        for &station in &build.isolated {
            warn!(station = %catalog.name(station), "station has no connections");
        }

        let mut fares = FareTable::new();
        for cell in &fare_cells {
            let Some((origin, destination)) = resolve_cell(&catalog, cell, &is_excluded) else {
                continue;
            };
            let stored = cell
                .raw
                .parse::<f64>()
                .map_err(|e| e.to_string())
                .and_then(|price| {
                    fares
                        .set_price(origin, destination, price)
                        .map_err(|e| e.to_string())
                });
            match stored {
                Ok(()) => report.fares_loaded += 1,
                Err(error) => {
                    warn!(
                        from = %cell.origin,
                        to = %cell.destination,
                        value = %cell.raw,
                        %error,
                        "could not parse fare value"
                    );
                    report.skipped += 1;
                }
            }
        }

        for cell in &time_cells {
            let Some((origin, destination)) = resolve_cell(&catalog, cell, &is_excluded) else {
                continue;
            };
            let stored = cell
                .raw
                .parse::<i64>()
                .map_err(|e| e.to_string())
                .and_then(|minutes| {
                    fares
                        .set_minutes(origin, destination, minutes)
                        .map_err(|e| e.to_string())
                });
            match stored {
                Ok(()) => report.times_loaded += 1,
                Err(error) => {
                    warn!(
                        from = %cell.origin,
                        to = %cell.destination,
                        value = %cell.raw,
                        %error,
                        "could not parse travel time"
                    );
                    report.skipped += 1;
                }
            }
        }

        for station in catalog.iter().filter(|s| s.coordinates.is_none()) {
            warn!(station = %station.name, "no verified coordinates");
        }

        report.stations = catalog.len();
        report.lines = lines.len();
        report.interchanges = interchanges.len();
        report.connections = connections.len();
        report.edges = build.edges;
        report.isolated = catalog.names(&build.isolated);

        info!(
            generation,
            stations = report.stations,
            lines = report.lines,
            interchanges = report.interchanges,
            edges = report.edges,
            fares = report.fares_loaded,
            times = report.times_loaded,
            skipped = report.skipped,
            "network built"
        );

        let network = Self {
            generation,
            catalog,
            lines,
            interchanges,
            graph,
            fares,
        };
        (network, report)
    }

    /// Monotonic build counter; each reload gets a larger value.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn catalog(&self) -> &StationCatalog {
        &self.catalog
    }

    pub fn graph(&self) -> &ConnectionGraph {
        &self.graph
    }

    pub fn fares(&self) -> &FareTable {
        &self.fares
    }

    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    pub fn line(&self, id: LineId) -> Option<&Line> {
        self.lines.get(id.index())
    }

    pub fn interchanges(&self) -> &[Interchange] {
        &self.interchanges
    }

    /// Resolve a station name to its id.
    pub fn station(&self, name: &str) -> Option<StationId> {
        self.catalog.lookup(name)
    }
}

/// Resolve a matrix cell's endpoints, skipping excluded and unknown stations.
///
/// Fare matrices often cover stations outside the modelled lines, so an
/// unknown name is logged at debug level rather than counted as bad data.
fn resolve_cell(
    catalog: &StationCatalog,
    cell: &MatrixCell,
    is_excluded: &impl Fn(&str) -> bool,
) -> Option<(StationId, StationId)> {
    if is_excluded(&cell.origin) || is_excluded(&cell.destination) {
        return None;
    }
    match (catalog.lookup(&cell.origin), catalog.lookup(&cell.destination)) {
        (Some(origin), Some(destination)) => Some((origin, destination)),
        _ => {
            tracing::debug!(
                from = %cell.origin,
                to = %cell.destination,
                "matrix cell names an unknown station"
            );
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cell(o: &str, d: &str, raw: &str) -> MatrixCell {
        MatrixCell {
            origin: o.to_string(),
            destination: d.to_string(),
            raw: raw.to_string(),
        }
    }

    fn definition(lines: &[(&str, &[&str])], interchanges: &[(&str, &str)]) -> NetworkDefinition {
        NetworkDefinition {
            stations: Vec::new(),
            lines: lines
                .iter()
                .map(|(name, stations)| LineDef {
                    name: name.to_string(),
                    stations: stations.iter().map(|s| s.to_string()).collect(),
                })
                .collect(),
            interchanges: interchanges
                .iter()
                .map(|(a, b)| (a.to_string(), b.to_string()))
                .collect(),
            connections: Vec::new(),
            excluded: Vec::new(),
        }
    }

    #[test]
    fn builds_from_lines_and_fares() {
        let data = SourceData {
            definition: definition(&[("Red", &["A", "B", "C", "D"])], &[]),
            fares: vec![cell("A", "B", "1.0"), cell("B", "C", "1.5"), cell("C", "D", "2.0")],
            times: vec![cell("A", "B", "2")],
        };
        let (network, report) = Network::build(data, 1);

        assert_eq!(report.stations, 4);
        assert_eq!(report.lines, 1);
        assert_eq!(report.edges, 3);
        assert_eq!(report.fares_loaded, 3);
        assert_eq!(report.times_loaded, 1);
        assert_eq!(report.skipped, 0);
        assert_eq!(network.generation(), 1);

        let a = network.station("a").unwrap();
        let b = network.station("B").unwrap();
        assert_eq!(network.fares().price(a, b), Some(1.0));
        assert_eq!(network.fares().minutes(b, a), Some(2));
    }

    #[test]
    fn bad_fare_cells_are_skipped_not_fatal() {
        let data = SourceData {
            definition: definition(&[("Red", &["A", "B", "C"])], &[]),
            fares: vec![cell("A", "B", "abc"), cell("B", "C", "-3"), cell("A", "C", "2.0")],
            times: vec![cell("A", "B", "1.5")],
        };
        let (network, report) = Network::build(data, 0);
        assert_eq!(report.fares_loaded, 1);
        assert_eq!(report.skipped, 3);
        let a = network.station("A").unwrap();
        let c = network.station("C").unwrap();
        assert_eq!(network.fares().price(a, c), Some(2.0));
    }

    #[test]
    fn unknown_matrix_names_are_ignored() {
        let data = SourceData {
            definition: definition(&[("Red", &["A", "B"])], &[]),
            fares: vec![cell("A", "Nowhere", "1.0")],
            times: Vec::new(),
        };
        let (network, report) = Network::build(data, 0);
        assert_eq!(report.fares_loaded, 0);
        assert_eq!(report.skipped, 0);
        assert_eq!(network.catalog().len(), 2);
    }

    #[test]
    fn excluded_stations_vanish_everywhere() {
        let mut def = definition(&[("Red", &["A", "X", "B"])], &[("X", "C")]);
        def.excluded = vec!["x".to_string()];
        def.stations = vec![StationDef {
            name: "X".to_string(),
            latitude: None,
            longitude: None,
        }];
        let data = SourceData {
            definition: def,
            fares: vec![cell("A", "X", "1.0")],
            times: Vec::new(),
        };
        let (network, report) = Network::build(data, 0);

        assert!(network.station("X").is_none());
        assert!(network.station("C").is_none());
        assert_eq!(report.interchanges, 0);
        let a = network.station("A").unwrap();
        let b = network.station("B").unwrap();
        assert!(network.graph().has_edge(a, b));
    }

    #[test]
    fn repeated_consecutive_station_is_logged_and_counted() {
        let data = SourceData {
            definition: definition(&[("Red", &["A", " a ", "B"])], &[]),
            ..SourceData::default()
        };
        let (network, report) = Network::build(data, 0);
        assert_eq!(report.lines, 1);
        assert_eq!(report.skipped, 1);
        assert_eq!(network.lines()[0].len(), 2);
        assert_eq!(report.edges, 1);
    }

    #[test]
    fn neighbours_of_excluded_station_collapse_silently() {
        let mut def = definition(&[("Red", &["A", "X", "A", "B"])], &[]);
        def.excluded = vec!["X".to_string()];
        let (network, report) = Network::build(
            SourceData {
                definition: def,
                ..SourceData::default()
            },
            0,
        );
        assert_eq!(report.skipped, 0);
        assert_eq!(network.lines()[0].len(), 2);
    }

    #[test]
    fn invalid_line_skipped() {
        let data = SourceData {
            definition: definition(&[("Empty", &[]), ("Red", &["A", "B"])], &[]),
            ..SourceData::default()
        };
        let (network, report) = Network::build(data, 0);
        assert_eq!(report.lines, 1);
        assert_eq!(report.skipped, 1);
        assert_eq!(network.lines()[0].name(), "Red");
        let a = network.station("A").unwrap();
        assert_eq!(network.catalog().lines_of(a), &[LineId(0)]);
    }

    #[test]
    fn self_interchange_skipped() {
        let data = SourceData {
            definition: definition(&[("Red", &["A", "B"])], &[("A", " a ")]),
            ..SourceData::default()
        };
        let (_, report) = Network::build(data, 0);
        assert_eq!(report.interchanges, 0);
        assert_eq!(report.skipped, 1);
    }

    #[test]
    fn explicit_connections_join_stations_after_lines() {
        let mut def = definition(&[("Red", &["A", "B"]), ("Blue", &["C", "D"])], &[]);
        def.connections = vec![
            ("B".to_string(), "C".to_string()),
            ("A".to_string(), "B".to_string()),
            ("D".to_string(), " d".to_string()),
        ];
        let (network, report) = Network::build(
            SourceData {
                definition: def,
                ..SourceData::default()
            },
            0,
        );

        assert_eq!(report.connections, 2);
        assert_eq!(report.skipped, 1);
        assert_eq!(report.edges, 3);
        let b = network.station("B").unwrap();
        let c = network.station("C").unwrap();
        assert!(network.graph().has_edge(b, c));
        let a = network.station("A").unwrap();
        assert_eq!(network.graph().neighbors(b), &[a, c]);
    }

    #[test]
    fn isolated_stations_reported_by_name() {
        let mut def = definition(&[("Red", &["A", "B"])], &[]);
        def.stations = vec![StationDef {
            name: "Lonely".to_string(),
            latitude: Some(3.0),
            longitude: Some(101.0),
        }];
        let (_, report) = Network::build(
            SourceData {
                definition: def,
                ..SourceData::default()
            },
            0,
        );
        assert_eq!(report.isolated, vec!["Lonely".to_string()]);
    }

    #[test]
    fn builtin_network_is_connected() {
        let (network, report) = Network::load(&NetworkSource::builtin(), 0).unwrap();
        assert_eq!(report.stations, 66);
        assert_eq!(report.lines, 2);
        assert_eq!(report.interchanges, 2);
        assert_eq!(report.edges, 36 + 28 + 2);
        assert!(report.isolated.is_empty());
        assert!(network.station("Sungai Buloh").is_none());

        let pasar_seni = network.station("Pasar Seni (KJL)").unwrap();
        let sbk = network.station("pasar seni (sbk)").unwrap();
        assert!(network.graph().has_edge(pasar_seni, sbk));
    }
}
