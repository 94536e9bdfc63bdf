//! Output types of the radial layout.

use serde::{Deserialize, Serialize};

use crate::graph::{Tree, VertexId};

/// A 2D point in canvas coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

    #[inline]
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Point at `radius` along `angle` (radians) from the origin.
    #[inline]
    pub fn polar(radius: f32, angle: f32) -> Self {
        Self::new(radius * angle.cos(), radius * angle.sin())
    }

    #[inline]
    pub fn translate(self, by: Point) -> Self {
        Self::new(self.x + by.x, self.y + by.y)
    }

    /// Linear interpolation `self + t * (other - self)`.
    #[inline]
    pub fn lerp(self, other: Point, t: f32) -> Self {
        Self::new(
            self.x + t * (other.x - self.x),
            self.y + t * (other.y - self.y),
        )
    }

    #[inline]
    pub fn distance(self, other: Point) -> f32 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// One parent→child angular split, kept for the framework overlay.
///
/// The overlay draws two boundary lines from `center` to the points at
/// `radius` and `start_angle` / `end_angle` around the canvas origin.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Wedge {
    /// Parent position, in the same frame as the target positions.
    pub center: Point,
    /// Radius of the ring the children sit on.
    pub radius: f32,
    pub start_angle: f32,
    pub end_angle: f32,
}

/// Everything one layout pass produces. Rebuilt from scratch on every call.
///
/// All per-vertex vectors are indexed by vertex id and have the tree's
/// vertex count as length.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutResult {
    /// Target positions, shifted by the configured canvas origin.
    pub target_positions: Vec<Point>,
    /// Edge distance from the layout root (or from the nearer center).
    pub depths: Vec<u32>,
    /// Leaves in each vertex's subtree under the current rooting.
    pub widths: Vec<u32>,
    /// Parent under the current rooting. In a two-center layout each center
    /// points at the other.
    pub parent_map: Vec<Option<VertexId>>,
    /// Vertices the layout is rooted at.
    pub center_nodes: Vec<VertexId>,
    /// The tree's graph-theoretic center from the last true-center pass.
    pub true_center_nodes: Vec<VertexId>,
    pub max_depth: u32,
    /// Ring radii around the canvas origin, ascending, without duplicates.
    pub framework_circles: Vec<f32>,
    /// Angular splits in traversal order.
    pub framework_wedges: Vec<Wedge>,
    /// Spacing between consecutive rings this result was computed with.
    pub delta: f32,
}

impl LayoutResult {
    pub fn num_vertices(&self) -> usize {
        self.target_positions.len()
    }

    pub fn is_center(&self, vertex: VertexId) -> bool {
        self.center_nodes.contains(&vertex)
    }

    pub fn is_true_center(&self, vertex: VertexId) -> bool {
        self.true_center_nodes.contains(&vertex)
    }

    /// Colour-gradient parameter in `[0, 1]` for a vertex.
    ///
    /// Depth 1 maps to 0 and the deepest ring to 1, so the first ring keeps
    /// the start colour when the tree is deeper than one level.
    pub fn depth_gradient(&self, vertex: VertexId) -> f32 {
        let depth = self.depths.get(vertex.index()).copied().unwrap_or(0);
        if self.max_depth > 1 {
            depth.saturating_sub(1) as f32 / (self.max_depth - 1) as f32
        } else if depth > 0 {
            1.0
        } else {
            0.0
        }
    }

    /// `vertex` and all of its descendants under the current rooting.
    ///
    /// Never crosses the central edge of a two-center layout. Out-of-range
    /// ids yield an empty list.
    pub fn subtree(&self, tree: &Tree, vertex: VertexId) -> Vec<VertexId> {
        if vertex.index() >= self.parent_map.len() {
            return Vec::new();
        }
        let mut found = Vec::new();
        let mut stack = vec![vertex];
        while let Some(u) = stack.pop() {
            found.push(u);
            for &v in tree.neighbors(u).iter().rev() {
                let is_child = self.parent_map.get(v.index()) == Some(&Some(u));
                let is_partner = self.parent_map[u.index()] == Some(v);
                if is_child && !is_partner {
                    stack.push(v);
                }
            }
        }
        found
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_ops() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(10.0, -4.0);
        assert_eq!(a.lerp(b, 0.5), Point::new(5.0, -2.0));
        assert_eq!(a.lerp(b, 1.0), b);
        assert_eq!(b.translate(Point::new(1.0, 1.0)), Point::new(11.0, -3.0));
        assert!((Point::new(3.0, 4.0).distance(a) - 5.0).abs() < 1e-6);

        let p = Point::polar(2.0, std::f32::consts::FRAC_PI_2);
        assert!(p.x.abs() < 1e-6 && (p.y - 2.0).abs() < 1e-6);
    }

    #[test]
    fn test_depth_gradient() {
        let result = LayoutResult {
            depths: vec![0, 1, 2, 3],
            max_depth: 3,
            ..Default::default()
        };
        assert_eq!(result.depth_gradient(VertexId(0)), 0.0);
        assert_eq!(result.depth_gradient(VertexId(1)), 0.0);
        assert_eq!(result.depth_gradient(VertexId(2)), 0.5);
        assert_eq!(result.depth_gradient(VertexId(3)), 1.0);

        let shallow = LayoutResult {
            depths: vec![0, 1],
            max_depth: 1,
            ..Default::default()
        };
        assert_eq!(shallow.depth_gradient(VertexId(0)), 0.0);
        assert_eq!(shallow.depth_gradient(VertexId(1)), 1.0);
    }
}
