//! The directed weighted multigraph container.
//!
//! Nodes are registered by value in ascending order; edges live in a single
//! store sorted by the canonical `(src, dst, weight)` key. Edges hold their
//! endpoint *values*, not references into the registry, so removing a node
//! simply drops the registry entry together with every incident edge and can
//! never leave a dangling endpoint behind.

use std::collections::btree_map::{BTreeMap, Entry};
use std::fmt;

use crate::core::error::GraphError;

mod iter;

pub use iter::{EdgeIter, EdgePosition, Nodes};

/// Incident-edge counts of a registered node. A self-loop counts once as
/// outgoing and once as incoming.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct Degrees {
    pub(crate) incoming: usize,
    pub(crate) outgoing: usize,
}

// The derived ordering over (src, dst, weight) in field order *is* the
// canonical edge order.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub(crate) struct Edge<N, E> {
    pub(crate) src: N,
    pub(crate) dst: N,
    pub(crate) weight: E,
}

impl<N: Ord, E: Ord> Edge<N, E> {
    fn cmp_triple(&self, src: &N, dst: &N, weight: &E) -> std::cmp::Ordering {
        self.src
            .cmp(src)
            .then_with(|| self.dst.cmp(dst))
            .then_with(|| self.weight.cmp(weight))
    }
}

/// A directed weighted multigraph with value-keyed nodes.
///
/// Node values of type `N` are unique; edges are identified by the full
/// `(src, dst, weight)` triple, so several edges may connect the same ordered
/// pair of nodes as long as their weights differ. The edge store is kept in
/// ascending triple order at all times and that order is what [`edges`],
/// [`find`], [`Display`] and graph equality operate on.
///
/// Operations whose documented precondition (a referenced node must exist) is
/// violated return [`GraphError`]; every other failure outcome is a `bool`.
///
/// [`edges`]: Graph::edges
/// [`find`]: Graph::find
/// [`Display`]: std::fmt::Display
#[derive(Debug, Clone)]
pub struct Graph<N, E> {
    nodes: BTreeMap<N, Degrees>,
    edges: Vec<Edge<N, E>>,
}

impl<N, E> Default for Graph<N, E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N, E> Graph<N, E> {
    /// Creates an empty graph.
    pub fn new() -> Self {
        Self {
            nodes: BTreeMap::new(),
            edges: Vec::new(),
        }
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Removes all nodes and edges. The graph stays usable.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.edges.clear();
    }

    /// Returns an iterator over node values in ascending order.
    pub fn nodes(&self) -> Nodes<'_, N> {
        Nodes::new(self.nodes.keys())
    }

    /// Returns a bidirectional iterator over all edges in canonical
    /// `(src, dst, weight)` order. Reverse traversal is `edges().rev()`.
    pub fn edges(&self) -> EdgeIter<'_, N, E> {
        EdgeIter::new(&self.edges)
    }

    /// Returns an iterator resuming the canonical order at `pos`.
    pub fn edges_at(&self, pos: EdgePosition) -> EdgeIter<'_, N, E> {
        EdgeIter::starting_at(&self.edges, pos.index())
    }

    /// Returns the edge triple at `pos`, or `None` if `pos` is the end
    /// position.
    pub fn edge_at(&self, pos: EdgePosition) -> Option<(&N, &N, &E)> {
        self.edges
            .get(pos.index())
            .map(|edge| (&edge.src, &edge.dst, &edge.weight))
    }

    /// The one-past-last position in the canonical edge order.
    pub fn end_position(&self) -> EdgePosition {
        EdgePosition::new(self.edges.len())
    }
}

impl<N: Ord, E> Graph<N, E> {
    /// Adds a node. Returns `false` without modification if the value is
    /// already registered.
    pub fn insert_node(&mut self, node: N) -> bool {
        match self.nodes.entry(node) {
            Entry::Occupied(_) => false,
            Entry::Vacant(entry) => {
                entry.insert(Degrees::default());
                true
            }
        }
    }

    pub fn is_node(&self, node: &N) -> bool {
        self.nodes.contains_key(node)
    }

    /// Whether at least one edge `src -> dst` exists.
    ///
    /// Total query: returns `false`, not an error, when either endpoint is
    /// absent.
    pub fn is_connected(&self, src: &N, dst: &N) -> bool {
        let start = self
            .edges
            .partition_point(|edge| (&edge.src, &edge.dst) < (src, dst));
        self.edges
            .get(start)
            .is_some_and(|edge| edge.src == *src && edge.dst == *dst)
    }

    /// Number of edges arriving at `node`, or `None` if it is not registered.
    pub fn in_degree(&self, node: &N) -> Option<usize> {
        self.nodes.get(node).map(|degrees| degrees.incoming)
    }

    /// Number of edges leaving `node`, or `None` if it is not registered.
    pub fn out_degree(&self, node: &N) -> Option<usize> {
        self.nodes.get(node).map(|degrees| degrees.outgoing)
    }

    /// Removes a node and, in the same operation, every edge in which it
    /// appears as source or destination. Returns `false` without
    /// modification if the value is not registered.
    pub fn delete_node(&mut self, node: &N) -> bool {
        if self.nodes.remove(node).is_none() {
            return false;
        }

        let nodes = &mut self.nodes;
        self.edges.retain(|edge| {
            if edge.src != *node && edge.dst != *node {
                return true;
            }
            // Counterpart endpoints survive the node removal and need their
            // counts adjusted; lookups for the removed node itself miss.
            if let Some(degrees) = nodes.get_mut(&edge.src) {
                degrees.outgoing -= 1;
            }
            if let Some(degrees) = nodes.get_mut(&edge.dst) {
                degrees.incoming -= 1;
            }
            false
        });

        true
    }

    /// Removes the edge at `pos` and returns the position of its successor
    /// in canonical order (the end position if the erased edge was last).
    /// Erasing at the end position is a no-op that returns the end position.
    pub fn erase_at(&mut self, pos: EdgePosition) -> EdgePosition {
        if pos.index() >= self.edges.len() {
            return self.end_position();
        }
        self.remove_edge_at(pos.index());
        pos
    }

    fn remove_edge_at(&mut self, at: usize) {
        let edge = self.edges.remove(at);
        if let Some(degrees) = self.nodes.get_mut(&edge.src) {
            degrees.outgoing -= 1;
        }
        if let Some(degrees) = self.nodes.get_mut(&edge.dst) {
            degrees.incoming -= 1;
        }
    }

    fn rebuild_degrees(&mut self) {
        let Self { nodes, edges } = self;
        for degrees in nodes.values_mut() {
            *degrees = Degrees::default();
        }
        for edge in edges.iter() {
            if let Some(degrees) = nodes.get_mut(&edge.src) {
                degrees.outgoing += 1;
            }
            if let Some(degrees) = nodes.get_mut(&edge.dst) {
                degrees.incoming += 1;
            }
        }
    }
}

impl<N: Ord, E: Ord> Graph<N, E> {
    /// Adds an edge, keeping the store canonically sorted.
    ///
    /// Both endpoints must already be registered, otherwise
    /// [`GraphError::EdgeEndpointAbsent`] is returned. An already existing
    /// `(src, dst, weight)` triple is not duplicated; the call returns
    /// `Ok(false)` and changes nothing.
    pub fn insert_edge(&mut self, src: N, dst: N, weight: E) -> Result<bool, GraphError> {
        if !(self.nodes.contains_key(&src) && self.nodes.contains_key(&dst)) {
            return Err(GraphError::EdgeEndpointAbsent);
        }
        Ok(self.insert_edge_sorted(src, dst, weight))
    }

    // Endpoints are known to be registered.
    fn insert_edge_sorted(&mut self, src: N, dst: N, weight: E) -> bool {
        match self
            .edges
            .binary_search_by(|edge| edge.cmp_triple(&src, &dst, &weight))
        {
            Ok(_) => false,
            Err(at) => {
                if let Some(degrees) = self.nodes.get_mut(&src) {
                    degrees.outgoing += 1;
                }
                if let Some(degrees) = self.nodes.get_mut(&dst) {
                    degrees.incoming += 1;
                }
                self.edges.insert(at, Edge { src, dst, weight });
                true
            }
        }
    }

    /// Removes the edge matching the exact triple. Returns `false` if no
    /// such edge exists.
    pub fn erase_edge(&mut self, src: &N, dst: &N, weight: &E) -> bool {
        match self
            .edges
            .binary_search_by(|edge| edge.cmp_triple(src, dst, weight))
        {
            Ok(at) => {
                self.remove_edge_at(at);
                true
            }
            Err(_) => false,
        }
    }

    /// Returns an iterator positioned at the edge matching the exact triple,
    /// or at the end position if there is none.
    pub fn find(&self, src: &N, dst: &N, weight: &E) -> EdgeIter<'_, N, E> {
        let at = self
            .edges
            .binary_search_by(|edge| edge.cmp_triple(src, dst, weight))
            .unwrap_or(self.edges.len());
        EdgeIter::starting_at(&self.edges, at)
    }
}

impl<N: Ord, E: Clone> Graph<N, E> {
    /// All weights of edges `src -> dst`, ascending. Empty when both nodes
    /// exist but no edge connects them.
    pub fn weights(&self, src: &N, dst: &N) -> Result<Vec<E>, GraphError> {
        if !(self.nodes.contains_key(src) && self.nodes.contains_key(dst)) {
            return Err(GraphError::WeightsEndpointAbsent);
        }

        let start = self
            .edges
            .partition_point(|edge| (&edge.src, &edge.dst) < (src, dst));
        let weights = self.edges[start..]
            .iter()
            .take_while(|edge| edge.src == *src && edge.dst == *dst)
            .map(|edge| edge.weight.clone())
            .collect();

        Ok(weights)
    }
}

impl<N: Ord + Clone, E> Graph<N, E> {
    /// Destinations reachable from `src` by exactly one edge, ascending and
    /// de-duplicated across parallel edges.
    pub fn connected(&self, src: &N) -> Result<Vec<N>, GraphError> {
        if !self.nodes.contains_key(src) {
            return Err(GraphError::ConnectedSourceAbsent);
        }

        let start = self.edges.partition_point(|edge| edge.src < *src);
        let mut connected: Vec<N> = Vec::new();
        for edge in &self.edges[start..] {
            if edge.src != *src {
                break;
            }
            // Destinations arrive in ascending order, so parallel edges are
            // adjacent.
            if connected.last() != Some(&edge.dst) {
                connected.push(edge.dst.clone());
            }
        }

        Ok(connected)
    }
}

impl<N: Ord + Clone, E: Ord> Graph<N, E> {
    /// Seeds a graph from node values, collapsing duplicates.
    pub fn from_nodes<I>(nodes: I) -> Self
    where
        I: IntoIterator<Item = N>,
    {
        let mut graph = Self::new();
        graph.extend(nodes);
        graph
    }

    /// Seeds a graph from `(src, dst, weight)` triples. Endpoint nodes are
    /// created as needed and duplicate triples collapse into one edge.
    pub fn from_edges<I>(edges: I) -> Self
    where
        I: IntoIterator<Item = (N, N, E)>,
    {
        let mut graph = Self::new();
        graph.extend(edges);
        graph
    }

    /// Renames a node in place, rewriting every incident edge to reference
    /// the new value and re-establishing the canonical order.
    ///
    /// Returns [`GraphError::ReplaceNodeAbsent`] if `old` is not registered
    /// and `Ok(false)` if `new` already is (use [`merge_replace`] to combine
    /// two existing nodes).
    ///
    /// [`merge_replace`]: Graph::merge_replace
    pub fn replace(&mut self, old: &N, new: N) -> Result<bool, GraphError> {
        if !self.nodes.contains_key(old) {
            return Err(GraphError::ReplaceNodeAbsent);
        }
        if self.nodes.contains_key(&new) {
            return Ok(false);
        }

        if let Some(degrees) = self.nodes.remove(old) {
            self.nodes.insert(new.clone(), degrees);
        }
        for edge in &mut self.edges {
            if edge.src == *old {
                edge.src = new.clone();
            }
            if edge.dst == *old {
                edge.dst = new.clone();
            }
        }
        // The rename keeps triples unique, only their order changes.
        self.edges.sort_unstable();

        Ok(true)
    }

    /// Redirects every edge incident to `old` onto `new` (self-loops may
    /// arise), collapses any duplicate triples this produces and removes
    /// `old` from the registry.
    ///
    /// Both values must be registered, otherwise
    /// [`GraphError::MergeReplaceNodeAbsent`] is returned. Merging a node
    /// into itself is a no-op.
    pub fn merge_replace(&mut self, old: &N, new: &N) -> Result<(), GraphError> {
        if !(self.nodes.contains_key(old) && self.nodes.contains_key(new)) {
            return Err(GraphError::MergeReplaceNodeAbsent);
        }
        if old == new {
            return Ok(());
        }

        self.nodes.remove(old);
        for edge in &mut self.edges {
            if edge.src == *old {
                edge.src = new.clone();
            }
            if edge.dst == *old {
                edge.dst = new.clone();
            }
        }
        self.edges.sort_unstable();
        self.edges.dedup();
        self.rebuild_degrees();

        Ok(())
    }
}

impl<N: Ord + Clone, E: Ord> Extend<N> for Graph<N, E> {
    fn extend<I: IntoIterator<Item = N>>(&mut self, nodes: I) {
        for node in nodes {
            self.insert_node(node);
        }
    }
}

impl<N: Ord + Clone, E: Ord> Extend<(N, N, E)> for Graph<N, E> {
    fn extend<I: IntoIterator<Item = (N, N, E)>>(&mut self, edges: I) {
        for (src, dst, weight) in edges {
            self.insert_node(src.clone());
            self.insert_node(dst.clone());
            self.insert_edge_sorted(src, dst, weight);
        }
    }
}

impl<N: Ord + Clone, E: Ord> FromIterator<N> for Graph<N, E> {
    fn from_iter<I: IntoIterator<Item = N>>(nodes: I) -> Self {
        Self::from_nodes(nodes)
    }
}

impl<N: Ord + Clone, E: Ord> FromIterator<(N, N, E)> for Graph<N, E> {
    fn from_iter<I: IntoIterator<Item = (N, N, E)>>(edges: I) -> Self {
        Self::from_edges(edges)
    }
}

impl<N: Ord + Clone, E: Ord, const K: usize> From<[N; K]> for Graph<N, E> {
    fn from(nodes: [N; K]) -> Self {
        Self::from_nodes(nodes)
    }
}

impl<'a, N, E> IntoIterator for &'a Graph<N, E> {
    type Item = (&'a N, &'a N, &'a E);
    type IntoIter = EdgeIter<'a, N, E>;

    fn into_iter(self) -> Self::IntoIter {
        self.edges()
    }
}

/// Graphs are equal iff their node sequences and their canonical edge triple
/// sequences are identical.
impl<N: PartialEq, E: PartialEq> PartialEq for Graph<N, E> {
    fn eq(&self, other: &Self) -> bool {
        self.nodes.keys().eq(other.nodes.keys()) && self.edges == other.edges
    }
}

impl<N: Eq, E: Eq> Eq for Graph<N, E> {}

/// Prints each node in ascending order followed by its outgoing edges in
/// canonical order:
///
/// ```text
/// a (
///   b | -3.4
///   b | 1.8
/// )
/// b (
/// )
/// ```
///
/// An empty graph prints nothing.
impl<N, E> fmt::Display for Graph<N, E>
where
    N: PartialEq + fmt::Display,
    E: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Both the registry and the edge store are ascending by source, so a
        // single pass over the edges suffices.
        let mut edges = self.edges.iter().peekable();
        for node in self.nodes.keys() {
            writeln!(f, "{node} (")?;
            while let Some(edge) = edges.peek() {
                if edge.src != *node {
                    break;
                }
                writeln!(f, "  {} | {}", edge.dst, edge.weight)?;
                edges.next();
            }
            writeln!(f, ")")?;
        }
        Ok(())
    }
}
