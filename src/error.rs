//! Error types.

use crate::graph::{ConnectorId, NodeId, WireId};
use thiserror::Error;

/// Failure of a graph store operation. A failed transaction leaves the store untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    #[error("node {0} not found")]
    NodeNotFound(NodeId),
    #[error("wire {0} not found")]
    WireNotFound(WireId),
    #[error("node {node} has no connector {connector}")]
    ConnectorNotFound { node: NodeId, connector: ConnectorId },
    #[error("connector {connector} on node {node} has the wrong direction")]
    WrongDirection { node: NodeId, connector: ConnectorId },
    #[error("node {0} already exists")]
    DuplicateNode(NodeId),
    #[error("wire {0} already exists")]
    DuplicateWire(WireId),
    #[error("node {0} is already an endpoint of the wire")]
    AlreadyOnWire(NodeId),
    #[error("cannot remove an empty set of wires")]
    EmptyRemoval,
    #[error("unknown node type {0}")]
    UnknownNodeType(String),
}

/// Failure reported by the host surface for pointer capture.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CaptureError {
    #[error("pointer {0} is not captured")]
    NotCaptured(i32),
    #[error("pointer {0} is captured by another handler")]
    Busy(i32),
}

/// Crate-level error.
#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid registry: {0}")]
    Registry(String),
}
