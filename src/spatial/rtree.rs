//! R-tree based spatial index using the rstar crate.
//!
//! Provides O(log n) nearest-vertex queries for pointer hit testing.

use rstar::{AABB, PointDistance, RTree, RTreeObject};

use crate::graph::VertexId;
use crate::layout::Point;

/// A vertex position in the spatial index.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VertexPoint {
    pub id: VertexId,
    pub x: f32,
    pub y: f32,
}

impl VertexPoint {
    pub fn new(id: VertexId, x: f32, y: f32) -> Self {
        Self { id, x, y }
    }
}

impl RTreeObject for VertexPoint {
    type Envelope = AABB<[f32; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_point([self.x, self.y])
    }
}

impl PointDistance for VertexPoint {
    fn distance_2(&self, point: &[f32; 2]) -> f32 {
        let dx = self.x - point[0];
        let dy = self.y - point[1];
        dx * dx + dy * dy
    }

    fn contains_point(&self, point: &[f32; 2]) -> bool {
        (self.x - point[0]).abs() < f32::EPSILON && (self.y - point[1]).abs() < f32::EPSILON
    }
}

/// Spatial index over vertex positions.
///
/// Rebuilt in bulk whenever the positions settle; never updated while an
/// animation is running.
#[derive(Default)]
pub struct SpatialIndex {
    tree: RTree<VertexPoint>,
}

impl SpatialIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild the index from positions indexed by vertex id.
    pub fn rebuild(&mut self, positions: &[Point]) {
        let points: Vec<_> = positions
            .iter()
            .enumerate()
            .map(|(i, p)| VertexPoint::new(VertexId::from_index(i), p.x, p.y))
            .collect();

        self.tree = RTree::bulk_load(points);
    }

    /// Find the nearest vertex to a point.
    pub fn nearest(&self, x: f32, y: f32) -> Option<VertexId> {
        self.tree.nearest_neighbor(&[x, y]).map(|point| point.id)
    }

    /// Find the nearest vertex within a maximum distance.
    pub fn nearest_within(&self, x: f32, y: f32, max_distance: f32) -> Option<VertexId> {
        let max_distance_sq = max_distance * max_distance;
        self.tree
            .nearest_neighbor(&[x, y])
            .filter(|point| point.distance_2(&[x, y]) <= max_distance_sq)
            .map(|point| point.id)
    }

    pub fn clear(&mut self) {
        self.tree = RTree::new();
    }

    pub fn len(&self) -> usize {
        self.tree.size()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.size() == 0
    }
}

impl std::fmt::Debug for SpatialIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpatialIndex").field("len", &self.len()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn indexed(points: &[(f32, f32)]) -> SpatialIndex {
        let positions: Vec<Point> = points.iter().map(|&(x, y)| Point::new(x, y)).collect();
        let mut index = SpatialIndex::new();
        index.rebuild(&positions);
        index
    }

    #[test]
    fn test_nearest() {
        let index = indexed(&[(0.0, 0.0), (10.0, 10.0), (5.0, 5.0)]);

        assert_eq!(index.nearest(0.0, 0.0), Some(VertexId(0)));
        assert_eq!(index.nearest(6.0, 6.0), Some(VertexId(2)));
        assert_eq!(index.nearest(11.0, 11.0), Some(VertexId(1)));
    }

    #[test]
    fn test_nearest_within() {
        let index = indexed(&[(0.0, 0.0), (10.0, 10.0)]);

        assert_eq!(index.nearest_within(0.0, 0.0, 5.0), Some(VertexId(0)));
        // Nothing within 1 of (5, 5)
        assert_eq!(index.nearest_within(5.0, 5.0, 1.0), None);
        // Vertex 0 is ~7.07 from (5, 5)
        assert_eq!(index.nearest_within(5.0, 5.0, 8.0), Some(VertexId(0)));
    }

    #[test]
    fn test_rebuild_replaces() {
        let mut index = indexed(&[(0.0, 0.0)]);
        index.rebuild(&[Point::new(3.0, 3.0), Point::new(1.0, 1.0)]);
        assert_eq!(index.len(), 2);
        assert_eq!(index.nearest(0.0, 0.0), Some(VertexId(1)));
    }

    #[test]
    fn test_clear() {
        let mut index = indexed(&[(0.0, 0.0), (1.0, 1.0)]);
        index.clear();
        assert!(index.is_empty());
        assert_eq!(index.nearest(0.0, 0.0), None);
    }
}
