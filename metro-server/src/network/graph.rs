//! Connection graph and its builder.
//!
//! The graph is an undirected adjacency structure indexed by `StationId`.
//! Neighbour order is part of the contract: lines contribute edges in
//! definition order, then interchanges, then explicit connections, and the
//! first insertion of an edge fixes its position. Breadth-first search explores
//! neighbours in this order, so it decides between equally short routes.

use std::collections::BTreeSet;

use crate::domain::{Interchange, Line, StationId};

/// Undirected station adjacency, read-only once built.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConnectionGraph {
    adjacency: Vec<Vec<StationId>>,
}

impl ConnectionGraph {
    /// Whether the station has an entry in the graph.
    pub fn contains(&self, station: StationId) -> bool {
        station.index() < self.adjacency.len()
    }

    /// Neighbours of a station in canonical exploration order.
    pub fn neighbors(&self, station: StationId) -> &[StationId] {
        self.adjacency
            .get(station.index())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn has_edge(&self, a: StationId, b: StationId) -> bool {
        self.neighbors(a).contains(&b)
    }

    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Number of undirected edges.
    pub fn edge_count(&self) -> usize {
        self.adjacency.iter().map(Vec::len).sum::<usize>() / 2
    }

    /// All stations with an entry, in id order.
    pub fn stations(&self) -> impl Iterator<Item = StationId> + '_ {
        (0..self.adjacency.len()).map(|i| StationId(i as u32))
    }

    /// Stations with no neighbours at all.
    pub fn isolated(&self) -> Vec<StationId> {
        self.stations()
            .filter(|&s| self.neighbors(s).is_empty())
            .collect()
    }

    /// The edge set as `(lower, higher)` pairs, for order-independent comparison.
    pub fn edge_set(&self) -> BTreeSet<(StationId, StationId)> {
        self.stations()
            .flat_map(|a| self.neighbors(a).iter().map(move |&b| (a.min(b), a.max(b))))
            .collect()
    }
}

/// Summary of a graph build.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildReport {
    pub edges: usize,
    /// Edges offered more than once; only the first insertion counts.
    pub duplicate_edges: usize,
    /// Stations with no connection. This is a data error in the source.
    pub isolated: Vec<StationId>,
}

/// Incremental builder for a `ConnectionGraph`.
#[derive(Debug, Default)]
pub struct GraphBuilder {
    adjacency: Vec<Vec<StationId>>,
    duplicate_edges: usize,
}

impl GraphBuilder {
    /// Create a builder with an entry for each of `station_count` stations.
    pub fn new(station_count: usize) -> Self {
        Self {
            adjacency: vec![Vec::new(); station_count],
            duplicate_edges: 0,
        }
    }

    fn ensure(&mut self, station: StationId) {
        if station.index() >= self.adjacency.len() {
            self.adjacency.resize(station.index() + 1, Vec::new());
        }
    }

    /// Add an undirected edge. Self-loops and repeats are ignored.
    ///
    /// Returns `true` if the edge was new.
    pub fn add_edge(&mut self, a: StationId, b: StationId) -> bool {
        self.ensure(a);
        self.ensure(b);
        if a == b {
            return false;
        }
        if self.adjacency[a.index()].contains(&b) {
            self.duplicate_edges += 1;
            return false;
        }
        self.adjacency[a.index()].push(b);
        self.adjacency[b.index()].push(a);
        true
    }

    /// Connect every pair of consecutive stations on the line.
    pub fn add_line(&mut self, line: &Line) {
        for &station in line.stations() {
            self.ensure(station);
        }
        for (a, b) in line.segments() {
            self.add_edge(a, b);
        }
    }

    pub fn add_interchange(&mut self, interchange: &Interchange) {
        let (a, b) = interchange.endpoints();
        self.add_edge(a, b);
    }

    pub fn build(self) -> (ConnectionGraph, BuildReport) {
        let graph = ConnectionGraph {
            adjacency: self.adjacency,
        };
        let report = BuildReport {
            edges: graph.edge_count(),
            duplicate_edges: self.duplicate_edges,
            isolated: graph.isolated(),
        };
        (graph, report)
    }
}

/// Build a graph from lines, then interchanges, then explicit connections.
///
/// `station_count` is the catalog size, so every catalog station gets an
/// entry even if nothing connects it. Isolated stations are listed in the
/// report.
pub fn build_graph(
    station_count: usize,
    lines: &[Line],
    interchanges: &[Interchange],
    connections: &[(StationId, StationId)],
) -> (ConnectionGraph, BuildReport) {
    let mut builder = GraphBuilder::new(station_count);
    for line in lines {
        builder.add_line(line);
    }
    for interchange in interchanges {
        builder.add_interchange(interchange);
    }
    for &(a, b) in connections {
        builder.add_edge(a, b);
    }
    builder.build()
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    /// Lines over a small id space, with consecutive repeats removed.
    fn lines_strategy() -> impl Strategy<Value = Vec<Line>> {
        prop::collection::vec(prop::collection::vec(0u32..20, 1..8), 1..5).prop_map(|raw| {
            raw.into_iter()
                .enumerate()
                .map(|(i, mut ids)| {
                    ids.dedup();
                    Line::new(format!("L{i}"), ids.into_iter().map(StationId).collect()).unwrap()
                })
                .collect()
        })
    }

    fn interchanges_strategy() -> impl Strategy<Value = Vec<Interchange>> {
        prop::collection::vec((0u32..20, 0u32..20), 0..5).prop_map(|pairs| {
            pairs
                .into_iter()
                .filter_map(|(a, b)| Interchange::new(StationId(a), StationId(b)).ok())
                .collect()
        })
    }

    proptest! {
        /// Every edge is present in both directions
        #[test]
        fn adjacency_is_symmetric(lines in lines_strategy(), ics in interchanges_strategy()) {
            let (graph, _) = build_graph(20, &lines, &ics, &[]);
            for a in graph.stations() {
                for &b in graph.neighbors(a) {
                    prop_assert!(graph.has_edge(b, a), "{:?} -> {:?} not mirrored", a, b);
                    prop_assert_ne!(a, b);
                }
            }
        }

        /// Same input, same edge set
        #[test]
        fn rebuild_is_idempotent(lines in lines_strategy(), ics in interchanges_strategy()) {
            let (first, _) = build_graph(20, &lines, &ics, &[]);
            let (second, _) = build_graph(20, &lines, &ics, &[]);
            prop_assert_eq!(first.edge_set(), second.edge_set());
        }

        /// Reordering lines changes neighbour order but never the edge set
        #[test]
        fn edge_set_independent_of_line_order(lines in lines_strategy(), ics in interchanges_strategy()) {
            let (forward, _) = build_graph(20, &lines, &ics, &[]);
            let mut reversed_lines = lines.clone();
            reversed_lines.reverse();
            let mut reversed_ics = ics.clone();
            reversed_ics.reverse();
            let (backward, _) = build_graph(20, &reversed_lines, &reversed_ics, &[]);
            prop_assert_eq!(forward.edge_set(), backward.edge_set());
        }

        /// Every consecutive line pair becomes an edge
        #[test]
        fn line_pairs_are_edges(lines in lines_strategy()) {
            let (graph, _) = build_graph(20, &lines, &[], &[]);
            for line in &lines {
                for (a, b) in line.segments() {
                    prop_assert!(graph.has_edge(a, b));
                }
            }
        }
    }
}
