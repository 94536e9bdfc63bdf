//! Error types for tree construction, parsing and layout requests.
//!
//! Everything in the core is a pure computation, so every error here is a
//! precondition violation reported to the caller. Nothing is retried.

use thiserror::Error;

use crate::graph::VertexId;

/// Errors raised while building a tree or requesting a layout.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TreeError {
    /// A vertex id (edge endpoint or requested root) is not in `0..count`.
    #[error("{vertex} is out of range for a tree with {count} vertices")]
    VertexOutOfRange { vertex: VertexId, count: usize },

    /// An edge connects a vertex to itself.
    #[error("self-loop on {0}")]
    SelfLoop(VertexId),

    /// The edge `(u, v)` closes a cycle (duplicate edges included).
    #[error("edge {u} - {v} closes a cycle")]
    Cycle { u: VertexId, v: VertexId },

    /// The edges leave the vertex set split into several components.
    #[error("tree is disconnected ({components} components)")]
    Disconnected { components: usize },

    /// A Prüfer sequence of the wrong length for the requested vertex count.
    #[error(
        "Prüfer sequence for {num_vertices} vertices must have {expected} entries, got {found}"
    )]
    PruferLength {
        num_vertices: usize,
        expected: usize,
        found: usize,
    },

    /// Malformed edge-list text.
    #[error("line {line}: {message}")]
    Parse { line: usize, message: String },
}

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, TreeError>;
