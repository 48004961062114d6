//! Web layer for the station network router.
//!
//! Provides HTTP endpoints for stations, fares and routes, plus a websocket
//! relay for live train positions.

mod dto;
mod routes;
mod state;
mod ws;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::AppState;
