//! Domain types for the station network.
//!
//! This module contains the core model types for stations, lines and
//! interchanges. All types enforce their invariants at construction
//! time, so code that receives these types can trust their validity.

mod error;
mod line;
mod station;

pub use error::DomainError;
pub use line::{Interchange, Line, LineId};
pub use station::{Coordinates, Station, StationId, StationName};
