//! Iteration over the canonical edge order and the node registry.

use std::collections::btree_map;
use std::fmt;
use std::iter::FusedIterator;
use std::ptr;

use super::{Degrees, Edge};

/// A detached position in the canonical edge sequence.
///
/// Unlike [`EdgeIter`], a position does not borrow the graph, which is what
/// lets [`Graph::erase_at`](super::Graph::erase_at) consume one and hand back
/// the position of the successor. A position is only meaningful for the
/// graph it was obtained from and is invalidated by any structural mutation
/// other than the `erase_at` call it is passed to; a stale position past the
/// current edge count is treated as the end position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EdgePosition {
    index: usize,
}

impl EdgePosition {
    pub(crate) fn new(index: usize) -> Self {
        Self { index }
    }

    pub(crate) fn index(&self) -> usize {
        self.index
    }
}

/// Read-only bidirectional iterator over edges in canonical
/// `(src, dst, weight)` order, yielding `(&src, &dst, &weight)` triples.
///
/// Obtained from [`Graph::edges`](super::Graph::edges) (the full range) or
/// [`Graph::find`](super::Graph::find) (positioned at a match, or at the end
/// position when there is none). Two iterators compare equal iff they denote
/// the same position in the same underlying sequence, so an exhausted
/// iterator, a missed `find` and the end of a fresh range are all equal.
pub struct EdgeIter<'a, N, E> {
    edges: &'a [Edge<N, E>],
    front: usize,
    back: usize,
}

impl<'a, N, E> EdgeIter<'a, N, E> {
    pub(crate) fn new(edges: &'a [Edge<N, E>]) -> Self {
        Self {
            edges,
            front: 0,
            back: edges.len(),
        }
    }

    pub(crate) fn starting_at(edges: &'a [Edge<N, E>], front: usize) -> Self {
        Self {
            edges,
            front: front.min(edges.len()),
            back: edges.len(),
        }
    }

    /// The triple at the current position, without advancing. `None` at the
    /// end position.
    pub fn peek(&self) -> Option<(&'a N, &'a N, &'a E)> {
        if self.front < self.back {
            let edge = &self.edges[self.front];
            Some((&edge.src, &edge.dst, &edge.weight))
        } else {
            None
        }
    }

    /// The current position as a detached cursor.
    pub fn position(&self) -> EdgePosition {
        EdgePosition::new(self.front)
    }
}

impl<N, E> Clone for EdgeIter<'_, N, E> {
    fn clone(&self) -> Self {
        Self {
            edges: self.edges,
            front: self.front,
            back: self.back,
        }
    }
}

impl<N: fmt::Debug, E: fmt::Debug> fmt::Debug for EdgeIter<'_, N, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EdgeIter")
            .field("front", &self.front)
            .field("back", &self.back)
            .field("remaining", &&self.edges[self.front..self.back])
            .finish()
    }
}

impl<N, E> PartialEq for EdgeIter<'_, N, E> {
    fn eq(&self, other: &Self) -> bool {
        // Same underlying sequence (fat pointer compares address and
        // length), same position.
        ptr::eq(self.edges, other.edges) && self.front == other.front
    }
}

impl<N, E> Eq for EdgeIter<'_, N, E> {}

impl<'a, N, E> Iterator for EdgeIter<'a, N, E> {
    type Item = (&'a N, &'a N, &'a E);

    fn next(&mut self) -> Option<Self::Item> {
        if self.front < self.back {
            let edge = &self.edges[self.front];
            self.front += 1;
            Some((&edge.src, &edge.dst, &edge.weight))
        } else {
            None
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.back - self.front;
        (remaining, Some(remaining))
    }
}

impl<N, E> DoubleEndedIterator for EdgeIter<'_, N, E> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.front < self.back {
            self.back -= 1;
            let edge = &self.edges[self.back];
            Some((&edge.src, &edge.dst, &edge.weight))
        } else {
            None
        }
    }
}

impl<N, E> ExactSizeIterator for EdgeIter<'_, N, E> {}

impl<N, E> FusedIterator for EdgeIter<'_, N, E> {}

/// Iterator over node values in ascending order, as returned by
/// [`Graph::nodes`](super::Graph::nodes).
pub struct Nodes<'a, N> {
    inner: btree_map::Keys<'a, N, Degrees>,
}

impl<'a, N> Nodes<'a, N> {
    pub(crate) fn new(inner: btree_map::Keys<'a, N, Degrees>) -> Self {
        Self { inner }
    }
}

impl<N> Clone for Nodes<'_, N> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<N: fmt::Debug> fmt::Debug for Nodes<'_, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.inner.clone()).finish()
    }
}

impl<'a, N> Iterator for Nodes<'a, N> {
    type Item = &'a N;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<N> DoubleEndedIterator for Nodes<'_, N> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back()
    }
}

impl<N> ExactSizeIterator for Nodes<'_, N> {}

impl<N> FusedIterator for Nodes<'_, N> {}

#[cfg(test)]
mod tests {
    use crate::core::weight::OrderedFloat;
    use crate::graph::Graph;

    fn w(weight: f64) -> OrderedFloat<f64> {
        OrderedFloat(weight)
    }

    fn create_string_graph() -> Graph<&'static str, OrderedFloat<f64>> {
        Graph::from_edges([
            ("d", "a", w(5.4)),
            ("a", "b", w(-3.4)),
            ("a", "b", w(1.8)),
            ("a", "c", w(3.7)),
            ("a", "c", w(1.1)),
            ("c", "a", w(8.6)),
        ])
    }

    fn canonical_order() -> Vec<(&'static str, &'static str, OrderedFloat<f64>)> {
        vec![
            ("a", "b", w(-3.4)),
            ("a", "b", w(1.8)),
            ("a", "c", w(1.1)),
            ("a", "c", w(3.7)),
            ("c", "a", w(8.6)),
            ("d", "a", w(5.4)),
        ]
    }

    #[test]
    fn forward_traversal_is_canonical() {
        let graph = create_string_graph();

        let collected: Vec<_> = graph.edges().map(|(s, d, w)| (*s, *d, *w)).collect();

        assert_eq!(collected, canonical_order());
    }

    #[test]
    fn reverse_traversal_mirrors_forward() {
        let graph = create_string_graph();

        let collected: Vec<_> = graph.edges().rev().map(|(s, d, w)| (*s, *d, *w)).collect();

        let mut expected = canonical_order();
        expected.reverse();
        assert_eq!(collected, expected);
    }

    #[test]
    fn traversal_can_alternate_ends() {
        let graph = create_string_graph();
        let mut edges = graph.edges();

        assert_eq!(edges.len(), 6);
        assert_eq!(edges.next(), Some((&"a", &"b", &w(-3.4))));
        assert_eq!(edges.next_back(), Some((&"d", &"a", &w(5.4))));
        assert_eq!(edges.len(), 4);

        // Both cursors meet in the middle and the iterator fuses.
        assert_eq!(edges.by_ref().count(), 4);
        assert_eq!(edges.next(), None);
        assert_eq!(edges.next_back(), None);
    }

    #[test]
    fn find_positions_at_exact_triple() {
        let graph = create_string_graph();

        let it = graph.find(&"a", &"b", &w(1.8));

        assert_eq!(it.peek(), Some((&"a", &"b", &w(1.8))));

        // Iteration continues through the rest of the canonical order.
        let rest: Vec<_> = it.map(|(s, d, w)| (*s, *d, *w)).collect();
        assert_eq!(rest, canonical_order()[1..].to_vec());
    }

    #[test]
    fn find_miss_equals_end() {
        let graph = create_string_graph();

        let missed = graph.find(&"a", &"b", &w(-2.0));

        assert_eq!(missed.peek(), None);
        assert_eq!(missed.position(), graph.end_position());

        let mut exhausted = graph.edges();
        exhausted.by_ref().for_each(drop);
        assert_eq!(missed, exhausted);
    }

    #[test]
    fn iterator_equality_is_positional() {
        let graph = create_string_graph();

        assert_eq!(graph.edges(), graph.edges());

        let mut advanced = graph.edges();
        advanced.next();
        assert_ne!(advanced, graph.edges());

        // find() lands on the same position as stepping there.
        assert_eq!(advanced, graph.find(&"a", &"b", &w(1.8)));
    }

    #[test]
    fn erase_at_returns_next_position() {
        let mut graph = create_string_graph();

        let pos = graph.find(&"a", &"b", &w(1.8)).position();
        let next = graph.erase_at(pos);

        assert_eq!(graph.edge_at(next), Some((&"a", &"c", &w(1.1))));
        assert_eq!(graph.edge_count(), 5);
        assert_eq!(graph.weights(&"a", &"b").unwrap(), vec![w(-3.4)]);

        // Resuming iteration from the returned position follows the
        // canonical order.
        let rest: Vec<_> = graph.edges_at(next).map(|(s, d, w)| (*s, *d, *w)).collect();
        assert_eq!(
            rest,
            vec![
                ("a", "c", w(1.1)),
                ("a", "c", w(3.7)),
                ("c", "a", w(8.6)),
                ("d", "a", w(5.4)),
            ]
        );
    }

    #[test]
    fn erase_at_last_edge_returns_end() {
        let mut graph = Graph::from_edges([(1, 1, w(3.0))]);

        let pos = graph.find(&1, &1, &w(3.0)).position();
        let next = graph.erase_at(pos);

        assert_eq!(next, graph.end_position());
        assert_eq!(graph.edge_count(), 0);
        assert_eq!(graph.nodes().count(), 1);
    }

    #[test]
    fn erase_at_end_is_noop() {
        let mut graph = create_string_graph();

        let end = graph.find(&"a", &"b", &w(-2.0)).position();
        let next = graph.erase_at(end);

        assert_eq!(next, graph.end_position());
        assert_eq!(graph.edge_count(), 6);
    }

    #[test]
    fn nodes_iterate_both_directions() {
        let graph = create_string_graph();

        let forward: Vec<_> = graph.nodes().copied().collect();
        assert_eq!(forward, vec!["a", "b", "c", "d"]);

        let backward: Vec<_> = graph.nodes().rev().copied().collect();
        assert_eq!(backward, vec!["d", "c", "b", "a"]);
        assert_eq!(graph.nodes().len(), 4);
    }

    #[test]
    fn graph_reference_iterates_edges() {
        let graph = create_string_graph();

        let collected: Vec<_> = (&graph).into_iter().map(|(s, d, w)| (*s, *d, *w)).collect();

        assert_eq!(collected, canonical_order());
    }
}
