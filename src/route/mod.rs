//! Cheapest-route quoting over a road map.

pub mod engine;
pub mod graph;

pub use engine::{compute_route, fuel_cost, RouteQuote};
pub use graph::{GraphPath, RoadGraph};

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum RouteError {
    /// Origin or destination is not a node of the map, or nothing connects them
    #[error("no route from '{origin}' to '{destination}'")]
    EndpointNotFound { origin: String, destination: String },

    /// Road data that Dijkstra cannot handle
    #[error("invalid road graph: {0}")]
    InvalidGraph(String),

    /// Distance or fuel cost does not fit in an f64
    #[error("route cost out of range (distance {distance})")]
    CostOutOfRange { distance: f64 },
}
