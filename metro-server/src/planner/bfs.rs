//! Breadth-first shortest path over the connection graph.
//!
//! Finds a path with the fewest stops, not the cheapest or fastest one.
//! Neighbours are explored in the graph's canonical order and the first
//! path to reach the destination wins, so ties between equally short
//! routes are decided by line and interchange definition order.

use std::collections::VecDeque;

use tracing::trace;

use crate::domain::StationId;
use crate::network::ConnectionGraph;

/// Why no path was returned.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PathError {
    /// Station has no entry in the graph
    #[error("station {0} is not in the graph")]
    NotInGraph(StationId),

    /// Both stations are known but no path joins them
    #[error("no path from {origin} to {destination}")]
    Disconnected {
        origin: StationId,
        destination: StationId,
    },
}

/// Find a path with the minimum number of edges from `origin` to `destination`.
///
/// Returns the full station sequence including both endpoints. When the
/// endpoints are equal the path is that single station and no search runs.
pub fn find_path(
    graph: &ConnectionGraph,
    origin: StationId,
    destination: StationId,
) -> Result<Vec<StationId>, PathError> {
    if !graph.contains(origin) {
        return Err(PathError::NotInGraph(origin));
    }
    if !graph.contains(destination) {
        return Err(PathError::NotInGraph(destination));
    }
    if origin == destination {
        return Ok(vec![origin]);
    }

    let mut parent: Vec<Option<StationId>> = vec![None; graph.node_count()];
    let mut visited = vec![false; graph.node_count()];
    visited[origin.index()] = true;

    let mut queue = VecDeque::from([origin]);
    let mut explored = 0usize;

    while let Some(current) = queue.pop_front() {
        explored += 1;
        for &next in graph.neighbors(current) {
            if visited[next.index()] {
                continue;
            }
            visited[next.index()] = true;
            parent[next.index()] = Some(current);

            if next == destination {
                trace!(%origin, %destination, explored, "BFS reached destination");
                return Ok(reconstruct(&parent, destination));
            }
            queue.push_back(next);
        }
    }

    trace!(%origin, %destination, explored, "BFS frontier exhausted");
    Err(PathError::Disconnected {
        origin,
        destination,
    })
}

/// Walk parent links back from `destination` to the root.
fn reconstruct(parent: &[Option<StationId>], destination: StationId) -> Vec<StationId> {
    let mut path = vec![destination];
    let mut current = destination;
    while let Some(prev) = parent[current.index()] {
        path.push(prev);
        current = prev;
    }
    path.reverse();
    path
}
