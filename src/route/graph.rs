use ordered_float::OrderedFloat;
use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap, HashSet};

use crate::models::Road;
use crate::route::RouteError;

/// Directed weighted graph built from a road map.
///
/// Adjacency is `origin -> (destination -> cost)`. A repeated
/// origin/destination pair keeps the cost of the last road seen.
#[derive(Debug, Clone, Default)]
pub struct RoadGraph {
    adjacency: HashMap<String, HashMap<String, f64>>,
    nodes: HashSet<String>,
}

/// A path found by [`RoadGraph::shortest_path`]
#[derive(Debug, Clone, PartialEq)]
pub struct GraphPath {
    /// Node names from origin to destination, both inclusive
    pub nodes: Vec<String>,
    /// Sum of the edge costs along `nodes`
    pub distance: f64,
}

impl RoadGraph {
    /// Build the graph from a road list
    ///
    /// Fails with [`RouteError::InvalidGraph`] on a negative or non-finite cost.
    pub fn from_roads(roads: &[Road]) -> Result<Self, RouteError> {
        let mut graph = Self::default();

        for (position, road) in roads.iter().enumerate() {
            if !road.cost.is_finite() || road.cost < 0.0 {
                return Err(RouteError::InvalidGraph(format!(
                    "road {} ({} -> {}) has invalid cost {}",
                    position, road.origin, road.destination, road.cost
                )));
            }

            graph.nodes.insert(road.origin.clone());
            graph.nodes.insert(road.destination.clone());
            graph
                .adjacency
                .entry(road.origin.clone())
                .or_default()
                .insert(road.destination.clone(), road.cost);
        }

        Ok(graph)
    }

    pub fn contains(&self, node: &str) -> bool {
        self.nodes.contains(node)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.adjacency.values().map(HashMap::len).sum()
    }

    /// Cost of the direct edge `from -> to`, if there is one
    pub fn edge_cost(&self, from: &str, to: &str) -> Option<f64> {
        self.adjacency.get(from).and_then(|edges| edges.get(to)).copied()
    }

    /// Minimum-cost path from `from` to `to` (Dijkstra).
    ///
    /// Returns `None` when either node is unknown or `to` is unreachable.
    /// Ties between equal-cost paths are settled by node name order.
    pub fn shortest_path(&self, from: &str, to: &str) -> Option<GraphPath> {
        if !self.contains(from) || !self.contains(to) {
            return None;
        }

        let mut dist: HashMap<&str, f64> = HashMap::new();
        let mut prev: HashMap<&str, &str> = HashMap::new();
        let mut heap: BinaryHeap<Reverse<(OrderedFloat<f64>, &str)>> = BinaryHeap::new();

        dist.insert(from, 0.0);
        heap.push(Reverse((OrderedFloat(0.0), from)));

        while let Some(Reverse((OrderedFloat(cost), node))) = heap.pop() {
            if node == to {
                return Some(reconstruct(&prev, from, to, cost));
            }

            // Stale entry
            if dist.get(node).is_some_and(|&best| cost > best) {
                continue;
            }

            let Some(edges) = self.adjacency.get(node) else {
                continue;
            };

            for (neighbor, &weight) in edges {
                let next = cost + weight;
                let improves = dist.get(neighbor.as_str()).map_or(true, |&best| next < best);
                if improves {
                    dist.insert(neighbor.as_str(), next);
                    prev.insert(neighbor.as_str(), node);
                    heap.push(Reverse((OrderedFloat(next), neighbor.as_str())));
                }
            }
        }

        None
    }
}

fn reconstruct(prev: &HashMap<&str, &str>, from: &str, to: &str, distance: f64) -> GraphPath {
    let mut nodes = vec![to.to_string()];
    let mut current = to;
    while current != from {
        match prev.get(current) {
            Some(&parent) => {
                nodes.push(parent.to_string());
                current = parent;
            }
            None => break,
        }
    }
    nodes.reverse();

    GraphPath { nodes, distance }
}
