//! Station network router server.
//!
//! Builds a connection graph from rail lines and interchanges, answers
//! "how do I get from here to there, and what does it cost?", and relays
//! live train positions to websocket subscribers.

pub mod cache;
pub mod config;
pub mod domain;
pub mod live;
pub mod network;
pub mod planner;
pub mod simulate;
pub mod web;
