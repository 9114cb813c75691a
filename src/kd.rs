// SPDX-License-Identifier: MIT

use crate::{euclidean_distance, Node};

/// KDTree implements the [k-d tree data structure](https://en.wikipedia.org/wiki/K-d_tree),
/// which can be used to speed up closest-node search for large datasets. Practice shows
/// that [crate::Graph::find_closest_node] takes significantly more time than
/// a single A* run when resolving many queries over the same graph. A k-d tree
/// can help with that, trading memory usage for CPU time.
///
/// The tree is a static snapshot: nodes added to the graph after building
/// the tree are not visible to it.
#[derive(Debug, Clone)]
pub struct KDTree {
    pivot: Node,
    left: Option<Box<KDTree>>,
    right: Option<Box<KDTree>>,
}

impl KDTree {
    /// Finds the closest [Node] to the given normalized position.
    pub fn find_closest_node(&self, x: f32, y: f32) -> Node {
        self.find_closest_node_impl(x, y, false).0
    }

    fn find_closest_node_impl(&self, x: f32, y: f32, y_divides: bool) -> (Node, f32) {
        // Start by assuming that pivot is the closest
        let mut best = self.pivot;
        let mut best_dist = euclidean_distance(x, y, best.x, best.y);

        // Select which branch to recurse into first
        let first_left = if y_divides { y < best.y } else { x < best.x };
        let (first, second) = if first_left {
            (&self.left, &self.right)
        } else {
            (&self.right, &self.left)
        };

        // Recurse into the first branch
        if let Some(ref branch) = first {
            let (alt, alt_dist) = branch.find_closest_node_impl(x, y, !y_divides);
            if alt_dist < best_dist {
                best = alt;
                best_dist = alt_dist;
            }
        }

        // (Optionally) recurse into the second branch
        if let Some(ref branch) = second {
            // A closer node is possible in the second branch if and only if
            // the splitting axis is closer than the current best candidate.
            let (axis_x, axis_y) = if y_divides {
                (x, self.pivot.y)
            } else {
                (self.pivot.x, y)
            };
            let dist_to_axis = euclidean_distance(x, y, axis_x, axis_y);

            if dist_to_axis < best_dist {
                let (alt, alt_dist) = branch.find_closest_node_impl(x, y, !y_divides);
                if alt_dist < best_dist {
                    best = alt;
                    best_dist = alt_dist;
                }
            }
        }

        return (best, best_dist);
    }

    /// Builds a k-d tree from an iterable of [Nodes](Node),
    /// e.g. from [Graph::iter](crate::Graph::iter).
    pub fn from_iter<I: IntoIterator<Item = Node>>(nodes: I) -> Option<Self> {
        let mut nodes = nodes.into_iter().collect::<Vec<_>>();
        Self::build(nodes.as_mut_slice())
    }

    /// Builds a k-d tree from a mutable slice of [Nodes](Node). Nodes will be
    /// reordered in the slice to facilitate building the tree.
    pub fn build(nodes: &mut [Node]) -> Option<Self> {
        Self::build_impl(nodes, false)
    }

    fn build_impl(nodes: &mut [Node], y_divides: bool) -> Option<Self> {
        match nodes.len() {
            0 => None,
            1 => Some(Self {
                pivot: nodes[0],
                left: None,
                right: None,
            }),
            _ => {
                if y_divides {
                    nodes.sort_by(|a, b| a.y.partial_cmp(&b.y).unwrap());
                } else {
                    nodes.sort_by(|a, b| a.x.partial_cmp(&b.x).unwrap());
                }
                let median = nodes.len() / 2;
                let pivot = nodes[median];
                let (left, right_and_pivot) = nodes.split_at_mut(median);
                let right = &mut right_and_pivot[1..];
                Some(Self {
                    pivot,
                    left: box_option(Self::build_impl(left, !y_divides)),
                    right: box_option(Self::build_impl(right, !y_divides)),
                })
            }
        }
    }
}

#[inline]
fn box_option<T>(o: Option<T>) -> Option<Box<T>> {
    o.map(|thing| Box::new(thing))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(id: usize, x: f32, y: f32) -> Node {
        Node { id, x, y }
    }

    #[test]
    fn kd_tree() {
        let tree = KDTree::build(&mut [
            node(1, 0.01, 0.01),
            node(2, 0.01, 0.05),
            node(3, 0.03, 0.09),
            node(4, 0.04, 0.03),
            node(5, 0.04, 0.07),
            node(6, 0.07, 0.03),
            node(7, 0.07, 0.01),
            node(8, 0.08, 0.05),
            node(9, 0.08, 0.09),
        ])
        .expect("k-d tree from non-empty slice must not be empty");

        assert_eq!(tree.find_closest_node(0.02, 0.02).id, 1);
        assert_eq!(tree.find_closest_node(0.05, 0.03).id, 4);
        assert_eq!(tree.find_closest_node(0.05, 0.08).id, 5);
        assert_eq!(tree.find_closest_node(0.09, 0.06).id, 8);
    }

    #[test]
    fn kd_tree_from_empty_iter() {
        assert!(KDTree::from_iter(std::iter::empty()).is_none());
    }

    #[test]
    fn kd_tree_agrees_with_linear_scan() {
        let mut g = crate::Graph::new(1.0);
        g.add_node(0.12, 0.91);
        g.add_node(0.55, 0.44);
        g.add_node(0.72, 0.18);
        g.add_node(0.31, 0.67);
        g.add_node(0.94, 0.83);
        let tree = KDTree::from_iter(g.iter().copied()).unwrap();

        for &(x, y) in &[(0.1, 0.9), (0.5, 0.5), (0.8, 0.2), (0.99, 0.99)] {
            assert_eq!(
                tree.find_closest_node(x, y).id,
                g.find_closest_node(x, y).unwrap().id,
            );
        }
    }
}
