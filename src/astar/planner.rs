// SPDX-License-Identifier: MIT

use log::{debug, trace};

use super::error::RouteError;
use super::frontier::Frontier;
use crate::{Graph, Node};

/// Per-node A* bookkeeping, kept in a side table indexed by node id.
///
/// The graph itself is never mutated by a search, so independent
/// sessions can run over the same `&Graph` one after another (or in
/// parallel, each with its own table).
///
/// `g_value`, `h_value` and `parent` are only meaningful once `visited`
/// is set; from that point on they are frozen for the rest of the search.
#[derive(Debug, Clone, Copy, Default)]
struct NodeState {
    visited: bool,
    g_value: f32,
    h_value: f32,
    parent: Option<usize>,
}

/// A path found by [RoutePlanner::run].
#[derive(Debug, Clone, PartialEq)]
pub struct Route {
    /// Node snapshots along the path, from the start node to the end node,
    /// with no repetitions. Every consecutive pair is linked in the graph.
    pub nodes: Vec<Node>,

    /// Total length of the path in real-world units, i.e. the sum of
    /// link lengths multiplied by [Graph::metric_scale].
    pub distance: f32,
}

/// A single-query A* session over a [Graph].
///
/// A planner is created per query, resolves its endpoints once, runs to
/// completion in [run](RoutePlanner::run) and is consumed by it; no search
/// state survives across queries.
pub struct RoutePlanner<'a> {
    graph: &'a Graph,
    start: Node,
    end: Node,
    frontier: Frontier,
    states: Vec<NodeState>,
}

impl<'a> RoutePlanner<'a> {
    /// Creates a session for a route between two positions given as
    /// percentages (0–100) of the map extent.
    ///
    /// Each position is normalized to `[0, 1]` and resolved to the closest
    /// graph node. Fails with [RouteError::EmptyGraph] if the graph has no
    /// nodes to resolve to.
    pub fn new(
        graph: &'a Graph,
        (start_x, start_y): (f32, f32),
        (end_x, end_y): (f32, f32),
    ) -> Result<Self, RouteError> {
        // Convert the inputs from percentages to coordinate-space fractions
        let start = graph
            .find_closest_node(start_x * 0.01, start_y * 0.01)
            .ok_or(RouteError::EmptyGraph)?;
        let end = graph
            .find_closest_node(end_x * 0.01, end_y * 0.01)
            .ok_or(RouteError::EmptyGraph)?;

        debug!(
            "resolved start to node {} and end to node {}",
            start.id, end.id
        );
        Ok(Self::with_endpoints(graph, start, end))
    }

    /// Creates a session for a route between two already-resolved nodes,
    /// e.g. looked up through a [KDTree](crate::KDTree).
    ///
    /// Fails with [RouteError::InvalidNode] if either id does not exist
    /// in the graph.
    pub fn between(graph: &'a Graph, start_id: usize, end_id: usize) -> Result<Self, RouteError> {
        let start = graph
            .get_node(start_id)
            .ok_or(RouteError::InvalidNode(start_id))?;
        let end = graph
            .get_node(end_id)
            .ok_or(RouteError::InvalidNode(end_id))?;
        Ok(Self::with_endpoints(graph, start, end))
    }

    fn with_endpoints(graph: &'a Graph, start: Node, end: Node) -> Self {
        Self {
            graph,
            start,
            end,
            frontier: Frontier::default(),
            states: vec![NodeState::default(); graph.len()],
        }
    }

    /// Runs the A* search to completion, consuming the session.
    ///
    /// Returns the cheapest discovered path, or [None] if the end node is
    /// not reachable from the start node. When start and end resolve to the
    /// same node, the result is a single-node route with distance 0 (still
    /// a successful search, distinct from the no-route case).
    ///
    /// Known limitation: a node is committed to the first path that
    /// discovers it. A cheaper path found later to an already-visited node
    /// is not adopted, so optimality relies on the heuristic being
    /// consistent with the euclidean link costs.
    pub fn run(mut self) -> Option<Route> {
        let mut expansions = 0usize;

        let start_h = self.h_value(&self.start);
        self.states[self.start.id].visited = true;
        self.states[self.start.id].h_value = start_h;
        self.frontier.push(self.start.id, start_h);

        while let Some(current_id) = self.next_node() {
            if current_id == self.end.id {
                let route = self.construct_final_path();
                debug!(
                    "route found after {} expansions: {} nodes, {} units long",
                    expansions,
                    route.nodes.len(),
                    route.distance
                );
                return Some(route);
            }

            expansions += 1;
            trace!(
                "expanding node {} ({} nodes left in the frontier)",
                current_id,
                self.frontier.len()
            );
            self.add_neighbors(current_id);
        }

        debug!("frontier exhausted after {} expansions: no route", expansions);
        None
    }

    /// The heuristic: straight-line distance from `node` to the end node.
    /// Admissible (and consistent), as links cannot be shorter than the
    /// straight line between their endpoints.
    fn h_value(&self, node: &Node) -> f32 {
        node.distance(&self.end)
    }

    /// Discovers all not-yet-visited neighbors of the expanded node:
    /// records their parent, g- and h-values, marks them visited and
    /// pushes them onto the frontier.
    ///
    /// The visited gate guarantees every node enters the frontier at most
    /// once per search, no matter how often its neighbors are expanded.
    fn add_neighbors(&mut self, current_id: usize) {
        let graph = self.graph;
        let current = match graph.get_node(current_id) {
            Some(node) => node,
            None => return,
        };
        let current_g = self.states[current_id].g_value;

        for &neighbor_id in graph.neighbors(current_id) {
            if self.states[neighbor_id].visited {
                continue;
            }
            let neighbor = match graph.get_node(neighbor_id) {
                Some(node) => node,
                None => continue,
            };

            let h_value = self.h_value(&neighbor);
            let state = &mut self.states[neighbor_id];
            state.parent = Some(current_id);
            state.h_value = h_value;
            state.g_value = current_g + current.distance(&neighbor);
            state.visited = true;
            let f_value = state.g_value + state.h_value;

            self.frontier.push(neighbor_id, f_value);
        }
    }

    /// Selects the next node to expand: the frontier entry with the lowest
    /// estimated total cost. [None] means the search is exhausted.
    fn next_node(&mut self) -> Option<usize> {
        self.frontier.pop()
    }

    /// Follows the chain of parents from the end node back to the start
    /// node, accumulating the true link distance at every step, then
    /// reverses the sequence and scales the distance to real-world units.
    fn construct_final_path(&self) -> Route {
        let mut distance = 0.0f32;
        let mut nodes = Vec::new();

        let mut current = self.end;
        while let Some(parent_id) = self.states[current.id].parent {
            nodes.push(current);
            match self.graph.get_node(parent_id) {
                Some(parent) => {
                    distance += current.distance(&parent);
                    current = parent;
                }
                None => break,
            }
        }

        // `current` is now the start node (the only one without a parent)
        nodes.push(current);
        nodes.reverse();

        Route {
            nodes,
            distance: distance * self.graph.metric_scale(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    macro_rules! assert_almost_eq {
        ($a:expr, $b:expr) => {
            assert!(
                (($a - $b).abs() < 1e-3),
                "assertion failed: {} ≈ {}",
                $a,
                $b
            )
        };
    }

    /// Unit square with a diagonal shortcut:
    ///
    ///   3────2
    ///   │  ⟋ │
    ///   │ ⟋  │
    ///   0────1
    fn square_with_diagonal() -> Graph {
        let mut g = square();
        g.add_link(0, 2);
        g
    }

    fn square() -> Graph {
        let mut g = Graph::new(100.0);
        g.add_node(0.0, 0.0);
        g.add_node(1.0, 0.0);
        g.add_node(1.0, 1.0);
        g.add_node(0.0, 1.0);
        g.add_link(0, 1);
        g.add_link(1, 2);
        g.add_link(2, 3);
        g.add_link(3, 0);
        g
    }

    /// 3×3 lattice with 0.5 spacing, ids row by row from the bottom-left.
    fn lattice() -> Graph {
        let mut g = Graph::new(1.0);
        for row in 0..3 {
            for col in 0..3 {
                g.add_node(0.5 * col as f32, 0.5 * row as f32);
            }
        }
        for row in 0..3 {
            for col in 0..3 {
                let id = row * 3 + col;
                if col < 2 {
                    g.add_link(id, id + 1);
                }
                if row < 2 {
                    g.add_link(id, id + 3);
                }
            }
        }
        g
    }

    fn ids(route: &Route) -> Vec<usize> {
        route.nodes.iter().map(|n| n.id).collect()
    }

    #[test]
    fn diagonal_beats_perimeter() {
        let g = square_with_diagonal();
        let route = RoutePlanner::new(&g, (0.0, 0.0), (100.0, 100.0))
            .unwrap()
            .run()
            .unwrap();

        assert_eq!(ids(&route), vec![0, 2]);
        assert_almost_eq!(route.distance, 2.0f32.sqrt() * 100.0);
    }

    #[test]
    fn equal_cost_paths_resolve_by_insertion_order() {
        // Without the diagonal, both perimeter paths cost the same;
        // node 1 is discovered before node 3 and must win the tie.
        let g = square();
        let route = RoutePlanner::between(&g, 0, 2).unwrap().run().unwrap();

        assert_eq!(ids(&route), vec![0, 1, 2]);
        assert_almost_eq!(route.distance, 200.0);
    }

    #[test]
    fn coincident_endpoints_give_single_node_route() {
        let g = square();
        let route = RoutePlanner::new(&g, (1.0, 2.0), (2.0, 1.0))
            .unwrap()
            .run()
            .unwrap();

        assert_eq!(ids(&route), vec![0]);
        assert_eq!(route.distance, 0.0);
    }

    #[test]
    fn disconnected_components_give_no_route() {
        let mut g = Graph::new(1.0);
        g.add_node(0.0, 0.0);
        g.add_node(0.1, 0.0);
        g.add_node(0.9, 1.0);
        g.add_node(1.0, 1.0);
        g.add_link(0, 1);
        g.add_link(2, 3);

        let result = RoutePlanner::between(&g, 0, 3).unwrap().run();
        assert_eq!(result, None);
    }

    #[test]
    fn repeated_queries_are_identical() {
        let g = lattice();
        let first = RoutePlanner::new(&g, (0.0, 0.0), (100.0, 100.0))
            .unwrap()
            .run()
            .unwrap();
        let second = RoutePlanner::new(&g, (0.0, 0.0), (100.0, 100.0))
            .unwrap()
            .run()
            .unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn route_is_a_simple_path_over_graph_links() {
        let g = lattice();
        let route = RoutePlanner::between(&g, 0, 8).unwrap().run().unwrap();

        assert_eq!(route.nodes.first().unwrap().id, 0);
        assert_eq!(route.nodes.last().unwrap().id, 8);
        assert_almost_eq!(route.distance, 2.0);

        let ids = ids(&route);
        for window in ids.windows(2) {
            assert!(
                g.neighbors(window[0]).contains(&window[1]),
                "{} and {} are not linked",
                window[0],
                window[1],
            );
        }

        let mut deduplicated = ids.clone();
        deduplicated.sort_unstable();
        deduplicated.dedup();
        assert_eq!(deduplicated.len(), ids.len());
    }

    #[test]
    fn repeated_expansion_never_repushes_a_node() {
        let g = square_with_diagonal();
        let mut planner = RoutePlanner::between(&g, 0, 2).unwrap();
        planner.states[0].visited = true;

        planner.add_neighbors(0);
        let discovered = planner.frontier.len();
        assert_eq!(discovered, 3);

        planner.add_neighbors(0);
        assert_eq!(planner.frontier.len(), discovered);
    }

    #[test]
    fn empty_graph_fails_at_initialization() {
        let g = Graph::new(1.0);
        let result = RoutePlanner::new(&g, (0.0, 0.0), (100.0, 100.0));
        assert_eq!(result.err(), Some(RouteError::EmptyGraph));
    }

    #[test]
    fn unknown_endpoint_id_fails_at_initialization() {
        let g = square();
        let result = RoutePlanner::between(&g, 0, 7);
        assert_eq!(result.err(), Some(RouteError::InvalidNode(7)));
    }

    #[test]
    fn percentage_inputs_resolve_to_the_closest_node() {
        let g = square();
        let route = RoutePlanner::new(&g, (90.0, 10.0), (85.0, 95.0))
            .unwrap()
            .run()
            .unwrap();
        assert_eq!(ids(&route), vec![1, 2]);
    }
}
