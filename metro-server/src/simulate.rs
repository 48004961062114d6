//! Simulated train feed.
//!
//! Drives one pretend train around the network so the live relay has
//! something to show without a real vehicle feed. The train follows a
//! random walk over the connection graph and reports each station in
//! turn, looping forever.

use std::time::Duration;

use chrono::Utc;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use tracing::{debug, info};

use crate::domain::StationId;
use crate::live::{Broadcaster, TrainUpdate};
use crate::network::{ConnectionGraph, NetworkHandle};

/// Route used when the graph yields no walk at all.
const FALLBACK_ROUTE: &[&str] = &["Kajang", "Stadium Kajang", "Sungai Jernih", "Batu 11 Cheras"];

/// Configuration for the simulated train.
#[derive(Debug, Clone)]
pub struct SimulationConfig {
    /// Time between position reports.
    pub interval: Duration,

    /// Number of stations in the generated route.
    pub route_length: usize,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(4),
            route_length: 10,
        }
    }
}

/// Random walk of up to `length` stations.
///
/// Starts at a random station that has at least one neighbour and stops
/// early only if it reaches a station with none. Returns an empty walk
/// for a graph with no edges.
pub fn random_walk<R: Rng>(graph: &ConnectionGraph, rng: &mut R, length: usize) -> Vec<StationId> {
    let starts: Vec<StationId> = graph
        .stations()
        .filter(|&s| !graph.neighbors(s).is_empty())
        .collect();
    let Some(&start) = starts.choose(rng) else {
        return Vec::new();
    };

    let mut route = vec![start];
    let mut current = start;
    while route.len() < length {
        let Some(&next) = graph.neighbors(current).choose(rng) else {
            break;
        };
        route.push(next);
        current = next;
    }
    route
}

/// Generate a train id of the form `Train-NNNN`.
pub fn train_id<R: Rng>(rng: &mut R) -> String {
    format!("Train-{}", rng.gen_range(1000..=9999))
}

/// Run the simulated train until the task is dropped.
pub async fn run(network: NetworkHandle, broadcaster: Broadcaster, config: SimulationConfig) {
    let mut rng = StdRng::from_entropy();
    let train = train_id(&mut rng);

    let snapshot = network.snapshot().await;
    let walk = random_walk(snapshot.graph(), &mut rng, config.route_length);
    let route: Vec<String> = if walk.is_empty() {
        FALLBACK_ROUTE.iter().map(|s| s.to_string()).collect()
    } else {
        snapshot.catalog().names(&walk)
    };
    drop(snapshot);

    info!(train = %train, stops = route.len(), "starting simulated train");

    let mut interval = tokio::time::interval(config.interval);
    for station in route.iter().cycle() {
        interval.tick().await;
        let update = TrainUpdate::new(train.clone(), station.clone())
            .with_field("timestamp", Utc::now().timestamp_millis() as f64 / 1000.0);
        let receivers = broadcaster.publish(update);
        debug!(train = %train, station = %station, receivers, "simulated position");
    }
}
