// SPDX-License-Identifier: MIT

/// Error conditions which may occur when creating a [RoutePlanner](crate::RoutePlanner).
///
/// Note that the absence of a route is not an error: a well-formed search
/// over a disconnected graph simply exhausts its frontier, and
/// [RoutePlanner::run](crate::RoutePlanner::run) reports that as [None].
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum RouteError {
    /// The graph contains no nodes, so start and end positions
    /// cannot be resolved.
    #[error("cannot plan a route over an empty graph")]
    EmptyGraph,

    /// The provided node id does not exist in the graph.
    #[error("invalid node: {0}")]
    InvalidNode(usize),
}
