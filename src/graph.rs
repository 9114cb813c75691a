// SPDX-License-Identifier: MIT

use crate::{euclidean_distance, Node};

/// Represents a road network as a set of [Nodes](Node) in normalized
/// coordinate space, connected by undirected road segments.
///
/// Nodes are stored in a contiguous arena and addressed by their index,
/// so all cross-references (adjacency entries, parent back-references held
/// by a search session) are plain indices rather than owning pointers.
///
/// The topology is immutable from the route planner's point of view: a
/// search only reads the graph, keeping its own bookkeeping on the side.
/// Independent searches may therefore share one `&Graph`.
#[derive(Debug, Clone, PartialEq)]
pub struct Graph {
    nodes: Vec<Node>,
    adjacency: Vec<Vec<usize>>,
    metric_scale: f32,
}

impl Graph {
    /// Creates an empty graph.
    ///
    /// `metric_scale` converts a distance in normalized coordinate space
    /// into real-world units (e.g. the map extent in meters) and must be
    /// positive and finite.
    pub fn new(metric_scale: f32) -> Self {
        assert!(metric_scale.is_finite() && metric_scale > 0.0);
        Self {
            nodes: Vec::new(),
            adjacency: Vec::new(),
            metric_scale,
        }
    }

    /// Returns the number of nodes in the graph.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true if the graph contains no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Returns an iterator over all [Nodes](Node) in the graph, in id order.
    pub fn iter(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter()
    }

    /// The factor converting normalized coordinate-space distance into
    /// real-world distance units.
    pub fn metric_scale(&self) -> f32 {
        self.metric_scale
    }

    /// Adds a [Node] at the given normalized position and returns its id.
    ///
    /// Both coordinates must lie in the `[0, 1]` range.
    pub fn add_node(&mut self, x: f32, y: f32) -> usize {
        assert!((0.0..=1.0).contains(&x) && (0.0..=1.0).contains(&y));

        let id = self.nodes.len();
        self.nodes.push(Node { id, x, y });
        self.adjacency.push(Vec::new());
        id
    }

    /// Connects two existing nodes with an undirected road segment.
    ///
    /// The segment's cost is implied by the euclidean distance between the
    /// two endpoints. Self-loops are disallowed; re-adding an existing
    /// link is a no-op.
    pub fn add_link(&mut self, a: usize, b: usize) {
        assert!(a < self.nodes.len() && b < self.nodes.len());
        assert_ne!(a, b);

        if !self.adjacency[a].contains(&b) {
            self.adjacency[a].push(b);
        }
        if !self.adjacency[b].contains(&a) {
            self.adjacency[b].push(a);
        }
    }

    /// Retrieves a [Node] with the provided id.
    pub fn get_node(&self, id: usize) -> Option<Node> {
        self.nodes.get(id).copied()
    }

    /// Gets the ids of all nodes adjacent to the node with a given id.
    ///
    /// The returned slice is in link-insertion order and stable across
    /// calls; looking up the neighbors of the same node repeatedly always
    /// yields the same set.
    pub fn neighbors(&self, id: usize) -> &[usize] {
        self.adjacency.get(id).map(Vec::as_slice).unwrap_or_default()
    }

    /// Finds the closest [Node] to the given normalized position, or [None]
    /// if the graph is empty.
    ///
    /// Deterministic: among equally-close nodes, the one with the lowest id
    /// wins. This function computes the distance to every node in the graph
    /// and is not suitable for repeated queries over large graphs; build a
    /// [KDTree](crate::KDTree) for those.
    pub fn find_closest_node(&self, x: f32, y: f32) -> Option<Node> {
        self.nodes
            .iter()
            .min_by(|a, b| {
                let a_dist = euclidean_distance(x, y, a.x, a.y);
                let b_dist = euclidean_distance(x, y, b.x, b.y);
                a_dist.partial_cmp(&b_dist).unwrap()
            })
            .copied()
    }
}
