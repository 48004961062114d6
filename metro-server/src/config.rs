//! Server configuration from environment variables.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use tracing::warn;

use crate::cache::CacheConfig;
use crate::network::{DefinitionSource, NetworkSource};
use crate::simulate::SimulationConfig;

/// Default listen port.
const DEFAULT_PORT: u16 = 5000;

/// Everything `main` needs to start the server.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to listen on (`METRO_BIND`).
    pub bind: SocketAddr,

    /// Network definition and fare/time matrices.
    pub source: NetworkSource,

    /// Run the simulated train feed (`METRO_SIMULATE`).
    pub simulate: bool,

    pub simulation: SimulationConfig,

    pub cache: CacheConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: SocketAddr::from(([127, 0, 0, 1], DEFAULT_PORT)),
            source: NetworkSource::builtin(),
            simulate: false,
            simulation: SimulationConfig::default(),
            cache: CacheConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through `lookup`.
    ///
    /// Unset variables take their defaults. Invalid values are logged and
    /// also fall back to the default.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        if let Some(raw) = get("METRO_BIND") {
            match raw.parse() {
                Ok(addr) => config.bind = addr,
                Err(_) => warn!(value = %raw, "invalid METRO_BIND, using default"),
            }
        }

        if let Some(path) = get("METRO_NETWORK_PATH") {
            config.source.definition = DefinitionSource::File(PathBuf::from(path));
        }
        config.source.fares = get("METRO_FARES_PATH").map(PathBuf::from);
        config.source.times = get("METRO_TIMES_PATH").map(PathBuf::from);

        if let Some(raw) = get("METRO_SIMULATE") {
            match parse_flag(&raw) {
                Some(flag) => config.simulate = flag,
                None => warn!(value = %raw, "invalid METRO_SIMULATE, using default"),
            }
        }

        if let Some(raw) = get("METRO_SIMULATION_INTERVAL_SECS") {
            match raw.parse::<u64>() {
                Ok(secs) if secs > 0 => config.simulation.interval = Duration::from_secs(secs),
                _ => warn!(value = %raw, "invalid METRO_SIMULATION_INTERVAL_SECS, using default"),
            }
        }

        if let Some(raw) = get("METRO_ROUTE_CACHE_TTL_SECS") {
            match raw.parse::<u64>() {
                Ok(secs) => config.cache.ttl = Duration::from_secs(secs),
                Err(_) => warn!(value = %raw, "invalid METRO_ROUTE_CACHE_TTL_SECS, using default"),
            }
        }

        config
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
