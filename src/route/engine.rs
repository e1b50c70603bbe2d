use serde::Serialize;
use tracing::debug;

use crate::models::Road;
use crate::route::{RoadGraph, RouteError};

/// Cheapest route between two nodes and what it costs to drive it
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteQuote {
    pub path: Vec<String>,
    /// Fuel cost in currency units
    pub cost: f64,
    /// Raw path length the cost was derived from
    #[serde(skip)]
    pub distance: f64,
}

/// Fuel cost of driving `distance`: `(distance * gas_price) / autonomy`.
///
/// `autonomy` is distance per fuel unit, `gas_price` is currency per fuel unit.
pub fn fuel_cost(distance: f64, autonomy: f64, gas_price: f64) -> f64 {
    (distance * gas_price) / autonomy
}

/// Build a graph from `roads`, find the cheapest path from `origin` to
/// `destination` and price it with [`fuel_cost`].
///
/// `autonomy` and `gas_price` must be positive; the request layer checks that
/// before calling in.
pub fn compute_route(
    roads: &[Road],
    origin: &str,
    destination: &str,
    autonomy: f64,
    gas_price: f64,
) -> Result<RouteQuote, RouteError> {
    let graph = RoadGraph::from_roads(roads)?;

    let path = graph
        .shortest_path(origin, destination)
        .ok_or_else(|| RouteError::EndpointNotFound {
            origin: origin.to_string(),
            destination: destination.to_string(),
        })?;

    let cost = fuel_cost(path.distance, autonomy, gas_price);
    if !cost.is_finite() {
        return Err(RouteError::CostOutOfRange {
            distance: path.distance,
        });
    }

    debug!(
        origin,
        destination,
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        hops = path.nodes.len().saturating_sub(1),
        distance = path.distance,
        cost,
        "Route computed"
    );

    Ok(RouteQuote {
        path: path.nodes,
        cost,
        distance: path.distance,
    })
}
