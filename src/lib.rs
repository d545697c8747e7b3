//! Generic directed weighted multigraph container.
//!
//! [`Graph<N, E>`](Graph) keeps a registry of unique node values and an edge
//! store maintained in canonical `(src, dst, weight)` ascending order. The
//! canonical order is the single source of truth for iteration, printing and
//! graph equality. Multiple edges between the same ordered pair of nodes are
//! allowed as long as their weights differ; exact duplicate triples are not.

pub mod core;
pub mod graph;

pub use crate::core::{error::GraphError, weight::OrderedFloat};
pub use crate::graph::{EdgeIter, EdgePosition, Graph, Nodes};
