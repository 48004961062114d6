//! Line-aware path construction.
//!
//! When both stations sit on one line the path is the run of that line
//! between them. When they sit on two different lines the path rides the
//! origin's line to a bridge, crosses it, and rides the destination's line.
//! These paths carry line identity, which BFS alone does not.

use crate::domain::{LineId, StationId};
use crate::network::Network;

/// What a run of stations in a path travels on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentKind {
    Line(LineId),
    /// A hop no line travels: an interchange or explicit connection.
    Interchange,
}

/// A maximal run of a path travelled on one line or across interchanges.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathSegment {
    pub kind: SegmentKind,
    /// Stations in travel order; the first is shared with the previous segment.
    pub stations: Vec<StationId>,
}

/// Lines serving both stations, in definition order.
pub fn shared_lines(network: &Network, a: StationId, b: StationId) -> Vec<LineId> {
    let on_b = network.catalog().lines_of(b);
    network
        .catalog()
        .lines_of(a)
        .iter()
        .copied()
        .filter(|line| on_b.contains(line))
        .collect()
}

/// Path along a line shared by both stations.
///
/// If several lines serve both, the shortest run wins, then the line
/// defined first.
pub fn same_line_path(
    network: &Network,
    origin: StationId,
    destination: StationId,
) -> Option<Vec<StationId>> {
    shared_lines(network, origin, destination)
        .into_iter()
        .filter_map(|id| network.line(id)?.slice(origin, destination))
        .min_by_key(Vec::len)
}

/// Path from a line serving `origin` to a line serving `destination`
/// through exactly one bridge.
///
/// A bridge is either an interchange pair or a station served by both
/// lines. The shortest composed path wins; ties go to the first found,
/// scanning origin lines, destination lines, then bridges in definition
/// order.
pub fn cross_line_path(
    network: &Network,
    origin: StationId,
    destination: StationId,
) -> Option<Vec<StationId>> {
    let catalog = network.catalog();
    let mut best: Option<Vec<StationId>> = None;

    for &from_id in catalog.lines_of(origin) {
        for &to_id in catalog.lines_of(destination) {
            if from_id == to_id {
                continue;
            }
            let (Some(from_line), Some(to_line)) = (network.line(from_id), network.line(to_id))
            else {
                continue;
            };

            let mut consider = |first: Vec<StationId>, second: Vec<StationId>, skip: usize| {
                let mut path = first;
                path.extend(second.into_iter().skip(skip));
                if best.as_ref().is_none_or(|b| path.len() < b.len()) {
                    best = Some(path);
                }
            };

            for &shared in from_line.stations() {
                if !to_line.contains(shared) {
                    continue;
                }
                if let (Some(first), Some(second)) = (
                    from_line.slice(origin, shared),
                    to_line.slice(shared, destination),
                ) {
                    consider(first, second, 1);
                }
            }

            for interchange in network.interchanges() {
                let (a, b) = interchange.endpoints();
                for (x, y) in [(a, b), (b, a)] {
                    if let (Some(first), Some(second)) =
                        (from_line.slice(origin, x), to_line.slice(y, destination))
                    {
                        consider(first, second, 0);
                    }
                }
            }
        }
    }

    best
}

/// Split a path into runs tagged by the line (or interchange) used.
///
/// Each hop takes the current run's line if that line has the hop as a
/// consecutive pair, otherwise the first line in definition order that
/// does, otherwise it is an interchange hop.
pub fn tag_segments(network: &Network, path: &[StationId]) -> Vec<PathSegment> {
    let mut segments: Vec<PathSegment> = Vec::new();

    for hop in path.windows(2) {
        let (a, b) = (hop[0], hop[1]);
        let rides = |id: LineId| {
            network
                .line(id)
                .is_some_and(|line| line.segments().any(|(x, y)| (x, y) == (a, b) || (x, y) == (b, a)))
        };

        let current = segments.last().map(|s| s.kind);
        let kind = match current {
            Some(SegmentKind::Line(id)) if rides(id) => SegmentKind::Line(id),
            _ => shared_lines(network, a, b)
                .into_iter()
                .find(|&id| rides(id))
                .map(SegmentKind::Line)
                .unwrap_or(SegmentKind::Interchange),
        };

        match segments.last_mut() {
            Some(segment) if segment.kind == kind => segment.stations.push(b),
            _ => segments.push(PathSegment {
                kind,
                stations: vec![a, b],
            }),
        }
    }

    segments
}
