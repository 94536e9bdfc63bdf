//! Tree data structure and its text encodings.
//!
//! This module provides the immutable `Tree` (dense vertex ids, neighbour
//! lists in insertion order), validation at construction, the edge-list
//! text format and Prüfer decoding.

mod edge_list;
mod prufer;
mod tree;
mod vertex;

pub use edge_list::{parse_edge_lines, parse_edge_list, to_edge_list};
pub use tree::Tree;
pub use vertex::VertexId;
