//! Spatial indexing for O(log n) hit testing.
//!
//! This module provides an R-tree based spatial index over settled vertex
//! positions, used to resolve pointer hover and click targets.

mod rtree;

pub use rtree::{SpatialIndex, VertexPoint};
