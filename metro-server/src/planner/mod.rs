//! Route planning over the station network.
//!
//! Answers "how do I get from A to B, and what does it cost?". Paths are
//! found by breadth-first search (fewest stops), with line-aware paths
//! preferred when they are equally short so results read naturally as
//! "ride this line, change here, ride that line".

mod bfs;
mod fare;
mod lines;
mod search;

#[cfg(test)]
mod search_tests;

pub use bfs::{PathError, find_path};
pub use fare::{FareSummary, MissingSegment, aggregate, round_fare};
pub use lines::{PathSegment, SegmentKind, cross_line_path, same_line_path, tag_segments};
pub use search::{Route, RouteError, Router, Strategy};
