// SPDX-License-Identifier: MIT

//! A* route planning over a weighted road-network graph.
//!
//! The road network is represented as a [Graph] of nodes with positions
//! normalized to the unit square, linked by undirected road segments whose
//! cost is the euclidean distance between their endpoints. A [RoutePlanner]
//! runs a single A* query over such a graph and produces a [Route]: the
//! ordered node sequence of the cheapest path and its total length in
//! real-world units.
//!
//! # Example
//!
//! ```
//! let mut g = waypath::Graph::new(1000.0);
//! let a = g.add_node(0.0, 0.0);
//! let b = g.add_node(0.5, 0.0);
//! let c = g.add_node(0.5, 0.5);
//! g.add_link(a, b);
//! g.add_link(b, c);
//!
//! // Endpoints are given as percentages of the map extent.
//! let planner = waypath::RoutePlanner::new(&g, (0.0, 0.0), (50.0, 50.0))
//!     .expect("graph must not be empty");
//! let route = planner.run().expect("route must exist");
//!
//! assert_eq!(route.nodes.len(), 3);
//! assert!((route.distance - 1000.0).abs() < 1e-3);
//! ```

mod astar;
mod distance;
mod graph;
mod kd;

pub use astar::{Route, RouteError, RoutePlanner};
pub use distance::euclidean_distance;
pub use graph::Graph;
pub use kd::KDTree;

/// Represents an element of the [Graph].
///
/// `id` is the node's index into the graph's node arena and is stable for
/// the lifetime of the graph. `x` and `y` are fractions of the map extent,
/// normalized to the `[0, 1]` range.
///
/// This is a plain position snapshot: all mutable A* bookkeeping (visited
/// flag, accumulated cost, heuristic, parent back-reference) lives in a
/// per-session side table owned by the [RoutePlanner], never on the node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Node {
    pub id: usize,
    pub x: f32,
    pub y: f32,
}

impl Node {
    /// Straight-line distance to `other` in normalized coordinate space.
    ///
    /// Symmetric, non-negative and satisfying the triangle inequality,
    /// which makes it usable both as the edge cost and as an admissible
    /// A* heuristic.
    pub fn distance(&self, other: &Node) -> f32 {
        euclidean_distance(self.x, self.y, other.x, other.y)
    }
}
