use thiserror::Error;

/// Precondition violation raised by an operation that requires its node
/// arguments to exist in the graph.
///
/// Only precondition violations are errors. Every other failure outcome
/// (duplicate insert, erase of a non-existent edge, rename onto an existing
/// node) is reported as a boolean return value instead.
///
/// The display strings are a stable part of the public contract; callers
/// match on them literally.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GraphError {
    #[error("Cannot call Graph::InsertEdge when either src or dst node does not exist")]
    EdgeEndpointAbsent,

    #[error("Cannot call Graph::GetConnected if src doesn't exist in the graph")]
    ConnectedSourceAbsent,

    #[error("Cannot call Graph::GetWeights if src or dst node don't exist in the graph")]
    WeightsEndpointAbsent,

    #[error("Cannot call Graph::Replace on a node that doesn't exist")]
    ReplaceNodeAbsent,

    #[error("Cannot call Graph::MergeReplace on old or new data if they don't exist in the graph")]
    MergeReplaceNodeAbsent,
}
