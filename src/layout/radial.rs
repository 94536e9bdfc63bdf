//! Radial wedge layout for free (unrooted) trees.
//!
//! Every vertex sits on a ring whose radius grows with its depth from the
//! layout root, and every subtree is confined to an angular wedge whose size
//! is proportional to its leaf count, so sibling subtrees never overlap.
//!
//! # Algorithm Overview
//!
//! 1. **Measure (top-down, then bottom-up):** walk the tree from the root
//!    recording parent and depth, then sum leaf counts back up into widths.
//! 2. **Place (top-down):** each vertex splits the angle it hands to its
//!    children among them proportionally to their widths. The angle is
//!    capped by `tau = 2 * acos(r / (r + delta))`, the angle under which a
//!    ring of radius `r` sees the next ring out, which keeps grandchildren
//!    from spilling into a cousin's wedge.
//! 3. **Shift:** translate everything by the canvas origin.
//!
//! A tree with one center is laid out around that vertex at the origin with
//! `radius = (depth + 1) * delta`. A tree with two centers puts them at
//! `(-delta/2, 0)` and `(delta/2, 0)`, gives each a half plane, and uses
//! `radius = (depth + 0.5) * delta`.
//!
//! Both walks use an explicit stack, so deep trees cannot overflow the call
//! stack, and visit children in neighbour order exactly as a recursive walk
//! would.

use std::f32::consts::{FRAC_PI_2, TAU};

use serde::{Deserialize, Serialize};

use super::result::{LayoutResult, Point, Wedge};
use crate::center::find_center;
use crate::error::Result;
use crate::graph::{Tree, VertexId};

/// Smallest ring spacing accepted by [`RadialLayout::set_delta`].
pub const MIN_DELTA: f32 = 5.0;

/// How much of the full circle a single root may hand to its children.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RootWedge {
    /// Cap the root's children like any other vertex, at `tau`.
    #[default]
    Bounded,
    /// Spread the root's children around the whole circle.
    Full,
}

/// Configuration for the radial layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RadialLayoutConfig {
    /// Radial spacing between consecutive depth rings.
    pub delta: f32,
    /// Canvas point every position is shifted by.
    pub origin: Point,
    /// Angular budget of a single root.
    pub root_wedge: RootWedge,
}

impl Default for RadialLayoutConfig {
    fn default() -> Self {
        Self {
            delta: 50.0,
            origin: Point::new(400.0, 300.0),
            root_wedge: RootWedge::Bounded,
        }
    }
}

/// What the current layout is rooted at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CenterMode {
    /// The tree's own center (one or two vertices).
    TrueCenter,
    /// A vertex picked by the user.
    Root(VertexId),
}

/// The radial layout engine.
///
/// Holds the spacing, the current root choice and the last true-center
/// snapshot. One engine serves one `Tree`; replacing the tree means creating
/// a new engine.
#[derive(Debug, Clone)]
pub struct RadialLayout {
    config: RadialLayoutConfig,
    mode: CenterMode,
    true_center: Option<Vec<VertexId>>,
}

impl RadialLayout {
    /// Create a new radial layout with the given configuration.
    pub fn new(mut config: RadialLayoutConfig) -> Self {
        config.delta = clamp_delta(config.delta);
        Self {
            config,
            mode: CenterMode::TrueCenter,
            true_center: None,
        }
    }

    /// Create a radial layout with default configuration.
    pub fn with_defaults() -> Self {
        Self::new(RadialLayoutConfig::default())
    }

    pub fn config(&self) -> &RadialLayoutConfig {
        &self.config
    }

    pub fn delta(&self) -> f32 {
        self.config.delta
    }

    pub fn mode(&self) -> CenterMode {
        self.mode
    }

    /// Lay the tree out around an arbitrary vertex.
    ///
    /// The true-center snapshot is kept as is; it is only computed here if
    /// no true-center pass has run yet.
    pub fn layout_from_root(&mut self, tree: &Tree, root: VertexId) -> Result<LayoutResult> {
        tree.check_vertex(root)?;
        self.mode = CenterMode::Root(root);
        let true_center = self
            .true_center
            .get_or_insert_with(|| find_center(tree))
            .clone();

        let mut pass = Pass::new(tree, &self.config, 1.0);
        pass.measure(root, None);
        pass.place_root(root, Point::ORIGIN, None, 0.0, TAU);

        tracing::debug!(
            vertices = tree.num_vertices(),
            %root,
            delta = self.config.delta,
            "radial layout from root"
        );
        Ok(pass.finish(vec![root], true_center))
    }

    /// Lay the tree out around its graph-theoretic center and refresh the
    /// true-center snapshot.
    pub fn layout_true_center(&mut self, tree: &Tree) -> LayoutResult {
        self.mode = CenterMode::TrueCenter;
        let center = find_center(tree);
        self.true_center = Some(center.clone());

        let result = match (center.first().copied(), center.get(1).copied()) {
            (Some(root), None) => {
                let mut pass = Pass::new(tree, &self.config, 1.0);
                pass.measure(root, None);
                pass.place_root(root, Point::ORIGIN, None, 0.0, TAU);
                pass.finish(center.clone(), center)
            }
            (Some(u), Some(v)) => {
                let half = self.config.delta / 2.0;
                let mut pass = Pass::new(tree, &self.config, 0.5);
                pass.measure(u, Some(v));
                pass.measure(v, Some(u));
                pass.place_root(u, Point::new(-half, 0.0), Some(v), 3.0 * FRAC_PI_2, FRAC_PI_2);
                pass.place_root(v, Point::new(half, 0.0), Some(u), FRAC_PI_2, -FRAC_PI_2);
                pass.finish(center.clone(), center)
            }
            _ => Pass::new(tree, &self.config, 1.0).finish(center.clone(), center),
        };

        tracing::debug!(
            vertices = tree.num_vertices(),
            centers = ?result.center_nodes,
            max_depth = result.max_depth,
            "radial layout from true center"
        );
        result
    }

    /// Re-run the layout for the current root choice.
    pub fn relayout(&mut self, tree: &Tree) -> Result<LayoutResult> {
        match self.mode {
            CenterMode::TrueCenter => Ok(self.layout_true_center(tree)),
            CenterMode::Root(root) => self.layout_from_root(tree, root),
        }
    }

    /// Change the ring spacing (clamped to [`MIN_DELTA`]) and re-layout.
    pub fn set_delta(&mut self, tree: &Tree, delta: f32) -> Result<LayoutResult> {
        self.config.delta = clamp_delta(delta);
        self.relayout(tree)
    }
}

impl Default for RadialLayout {
    fn default() -> Self {
        Self::with_defaults()
    }
}

/// `f32::max` ignores NaN, so NaN clamps to the minimum as well.
fn clamp_delta(delta: f32) -> f32 {
    delta.max(MIN_DELTA)
}

/// A vertex waiting to be placed.
struct Visit {
    vertex: VertexId,
    parent: Option<VertexId>,
    start: f32,
    end: f32,
    /// The split that produced this visit; `None` for a layout root, whose
    /// position is fixed up front.
    split: Option<Wedge>,
}

/// Per-call state of one layout pass. Owned by the top-level call and
/// dropped into a `LayoutResult` at the end.
struct Pass<'a> {
    tree: &'a Tree,
    delta: f32,
    origin: Point,
    root_wedge: RootWedge,
    /// Depth offset of the radius formula (1.0 single root, 0.5 two centers).
    ring_offset: f32,
    positions: Vec<Point>,
    depths: Vec<u32>,
    widths: Vec<u32>,
    parents: Vec<Option<VertexId>>,
    circles: Vec<f32>,
    wedges: Vec<Wedge>,
}

impl<'a> Pass<'a> {
    fn new(tree: &'a Tree, config: &RadialLayoutConfig, ring_offset: f32) -> Self {
        let n = tree.num_vertices();
        Self {
            tree,
            delta: config.delta,
            origin: config.origin,
            root_wedge: config.root_wedge,
            ring_offset,
            positions: vec![Point::ORIGIN; n],
            depths: vec![0; n],
            widths: vec![0; n],
            parents: vec![None; n],
            circles: Vec::new(),
            wedges: Vec::new(),
        }
    }

    fn radius(&self, vertex: VertexId) -> f32 {
        (self.depths[vertex.index()] as f32 + self.ring_offset) * self.delta
    }

    fn children(
        &self,
        vertex: VertexId,
        parent: Option<VertexId>,
    ) -> impl Iterator<Item = VertexId> + '_ {
        self.tree
            .neighbors(vertex)
            .iter()
            .copied()
            .filter(move |&v| Some(v) != parent)
    }

    /// Record parents and depths from `root`, then leaf counts bottom-up.
    /// `parent` is excluded from the walk (the other center, if any).
    fn measure(&mut self, root: VertexId, parent: Option<VertexId>) {
        let mut preorder = Vec::new();
        let mut stack = vec![(root, parent, 0u32)];
        while let Some((u, p, depth)) = stack.pop() {
            self.parents[u.index()] = p;
            self.depths[u.index()] = depth;
            preorder.push((u, p));
            let first_stack_len = stack.len();
            stack.extend(self.children(u, p).map(|v| (v, Some(u), depth + 1)));
            stack[first_stack_len..].reverse();
        }

        for &(u, p) in preorder.iter().rev() {
            let mut is_leaf = true;
            let mut leaves = 0;
            for v in self.children(u, p) {
                is_leaf = false;
                leaves += self.widths[v.index()];
            }
            self.widths[u.index()] = if is_leaf { 1 } else { leaves };
        }
    }

    /// Place `root` at `at` and its subtree inside the wedge `[start, end]`.
    fn place_root(
        &mut self,
        root: VertexId,
        at: Point,
        parent: Option<VertexId>,
        start: f32,
        end: f32,
    ) {
        self.positions[root.index()] = at;
        let mut stack = vec![Visit {
            vertex: root,
            parent,
            start,
            end,
            split: None,
        }];

        while let Some(visit) = stack.pop() {
            let u = visit.vertex;
            let r = self.radius(u);
            let mid = (visit.start + visit.end) / 2.0;
            if let Some(split) = visit.split {
                self.wedges.push(split);
                self.positions[u.index()] = Point::polar(r, mid);
            }
            self.circles.push(r);

            let width = self.widths[u.index()];
            if width == 0 {
                continue;
            }

            let total = self.children_angle(r, visit.end - visit.start);
            let from = self.positions[u.index()];
            let mut cursor = mid - total / 2.0;
            let first_stack_len = stack.len();
            for v in self.children(u, visit.parent) {
                let share = self.widths[v.index()] as f32 / width as f32 * total;
                let split = Wedge {
                    center: from,
                    radius: r + self.delta,
                    start_angle: cursor,
                    end_angle: cursor + share,
                };
                stack.push(Visit {
                    vertex: v,
                    parent: Some(u),
                    start: cursor,
                    end: cursor + share,
                    split: Some(split),
                });
                cursor += share;
            }
            stack[first_stack_len..].reverse();
        }
    }

    /// Angle handed to the children of a vertex on ring `r` whose own wedge
    /// spans `span` radians (negative for wedges laid out clockwise).
    ///
    /// The magnitude is capped at `tau`; the sign follows `span`.
    fn children_angle(&self, r: f32, span: f32) -> f32 {
        let tau = if r + self.delta > 0.0 {
            2.0 * (r / (r + self.delta)).min(1.0).acos()
        } else {
            0.0
        };

        if span.abs() >= TAU {
            match self.root_wedge {
                RootWedge::Bounded => tau,
                RootWedge::Full => span,
            }
        } else {
            tau.min(span.abs()).copysign(span)
        }
    }

    fn finish(self, center_nodes: Vec<VertexId>, true_center_nodes: Vec<VertexId>) -> LayoutResult {
        let origin = self.origin;
        let target_positions = self.positions.into_iter().map(|p| p.translate(origin)).collect();
        let framework_wedges = self
            .wedges
            .into_iter()
            .map(|w| Wedge {
                center: w.center.translate(origin),
                ..w
            })
            .collect();

        let mut framework_circles = self.circles;
        framework_circles.sort_by(f32::total_cmp);
        framework_circles.dedup();

        LayoutResult {
            target_positions,
            max_depth: self.depths.iter().copied().max().unwrap_or(0),
            depths: self.depths,
            widths: self.widths,
            parent_map: self.parents,
            center_nodes,
            true_center_nodes,
            framework_circles,
            framework_wedges,
            delta: self.delta,
        }
    }
}
