//! Radial Tree - WASM Module
//!
//! This module lays out free (unrooted) trees radially around their center,
//! re-roots them interactively and replays the leaf-pruning search for the
//! center. It is compiled to WebAssembly and exposes a JavaScript-friendly
//! API via wasm-bindgen; the host owns the canvas and draws from the typed
//! arrays returned here once per frame.
//!
//! # Architecture
//!
//! - `graph`: Validated tree structure, edge-list text format, Prüfer decoding
//! - `center`: Center finding by iterative leaf pruning
//! - `layout`: Radial wedge layout (positions, depths, widths, framework)
//! - `spatial`: R-tree spatial indexing for O(log n) hit testing
//! - `scene`: Application state, transitions and find-center playback

use js_sys::Float32Array;
use wasm_bindgen::prelude::*;

pub mod center;
pub mod error;
pub mod graph;
pub mod layout;
pub mod scene;
pub mod spatial;

pub use error::{Result, TreeError};

use graph::{Tree, VertexId, parse_edge_list};
use layout::Point;
use scene::{Scene, SceneConfig};

/// Initialize the WASM module.
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
    #[cfg(target_arch = "wasm32")]
    tracing_wasm::set_as_global_default();
}

/// Sentinel written into `parentMap` for vertices without a parent.
pub const NO_PARENT: u32 = u32::MAX;

/// Main entry point for the radial tree viewer.
///
/// This struct wraps the internal `Scene` and provides the public API
/// exposed to JavaScript.
#[wasm_bindgen]
pub struct RadialTreeWasm {
    scene: Scene,
}

#[wasm_bindgen]
impl RadialTreeWasm {
    /// Create a viewer holding the empty tree.
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            scene: Scene::with_defaults(Tree::default()),
        }
    }

    /// Create a viewer from edge-list text (`n` followed by `u v` pairs).
    #[wasm_bindgen(js_name = fromEdgeList)]
    pub fn from_edge_list(text: &str) -> std::result::Result<RadialTreeWasm, JsError> {
        let tree = parse_edge_list(text)?;
        Ok(Self {
            scene: Scene::with_defaults(tree),
        })
    }

    /// Create a viewer from a vertex count and a Uint32Array of pairs.
    ///
    /// The edges array should be [u0, v0, u1, v1, ...].
    #[wasm_bindgen(js_name = fromEdges)]
    pub fn from_edges(
        num_vertices: usize,
        edges: &[u32],
    ) -> std::result::Result<RadialTreeWasm, JsError> {
        let tree = Tree::from_pairs(num_vertices, edges)?;
        Ok(Self {
            scene: Scene::with_defaults(tree),
        })
    }

    /// Create a viewer from a Prüfer sequence of length `num_vertices - 2`.
    #[wasm_bindgen(js_name = fromPrufer)]
    pub fn from_prufer(
        num_vertices: usize,
        sequence: &[u32],
    ) -> std::result::Result<RadialTreeWasm, JsError> {
        let tree = Tree::from_prufer(num_vertices, sequence)?;
        Ok(Self {
            scene: Scene::with_defaults(tree),
        })
    }

    /// Create a viewer from edge-list text and a (partial) config object.
    ///
    /// Missing fields take their defaults, e.g. `{ layout: { delta: 40 } }`.
    #[wasm_bindgen(js_name = withConfig)]
    pub fn with_config(
        text: &str,
        config: JsValue,
    ) -> std::result::Result<RadialTreeWasm, JsError> {
        let config: SceneConfig = if config.is_undefined() || config.is_null() {
            SceneConfig::default()
        } else {
            serde_wasm_bindgen::from_value(config)?
        };
        let tree = parse_edge_list(text)?;
        Ok(Self {
            scene: Scene::new(tree, config),
        })
    }

    // =========================================================================
    // Tree Replacement
    // =========================================================================

    /// Replace the tree with one parsed from edge-list text.
    ///
    /// On error the current tree stays in place.
    #[wasm_bindgen(js_name = loadEdgeList)]
    pub fn load_edge_list(&mut self, text: &str) -> std::result::Result<(), JsError> {
        Ok(self.scene.load_edge_list(text)?)
    }

    /// Replace the tree from editor input: vertex count plus one edge per line.
    #[wasm_bindgen(js_name = loadEdges)]
    pub fn load_edges(
        &mut self,
        num_vertices: usize,
        text: &str,
    ) -> std::result::Result<(), JsError> {
        Ok(self.scene.load_edges(num_vertices, text)?)
    }

    /// Replace the tree with one decoded from a Prüfer sequence.
    #[wasm_bindgen(js_name = loadPrufer)]
    pub fn load_prufer(
        &mut self,
        num_vertices: usize,
        sequence: &[u32],
    ) -> std::result::Result<(), JsError> {
        Ok(self.scene.load_prufer(num_vertices, sequence)?)
    }

    /// Serialize the current tree in edge-list format.
    #[wasm_bindgen(js_name = toEdgeList)]
    pub fn to_edge_list(&self) -> String {
        self.scene.tree().to_string()
    }

    #[wasm_bindgen(js_name = vertexCount)]
    pub fn vertex_count(&self) -> usize {
        self.scene.tree().num_vertices()
    }

    // =========================================================================
    // Frame Update & Interaction
    // =========================================================================

    /// Advance animations by `dt` seconds. Call once per frame.
    pub fn tick(&mut self, dt: f32) {
        self.scene.tick(dt);
    }

    /// Update hover from the pointer position in canvas coordinates.
    ///
    /// The current pan is subtracted before the lookup. Returns the hovered
    /// vertex ID, or None.
    pub fn hover(&mut self, x: f32, y: f32) -> Option<u32> {
        self.scene.hover(x, y).map(VertexId::raw)
    }

    /// Re-root at the vertex under the pointer, in the same coordinates as
    /// `hover`.
    ///
    /// Returns true if a transition started.
    pub fn click(&mut self, x: f32, y: f32) -> std::result::Result<bool, JsError> {
        Ok(self.scene.click(x, y)?)
    }

    /// Shift the camera, e.g. by a right-button drag delta. Reset whenever
    /// a new tree is loaded.
    pub fn pan(&mut self, dx: f32, dy: f32) {
        self.scene.pan(dx, dy);
    }

    /// Current camera offset as [x, y]; add it to `positions` when drawing.
    #[wasm_bindgen(js_name = panOffset)]
    pub fn pan_offset(&self) -> Vec<f32> {
        let offset = self.scene.pan_offset();
        vec![offset.x, offset.y]
    }

    /// Re-root at a vertex by ID.
    pub fn reroot(&mut self, vertex: u32) -> std::result::Result<bool, JsError> {
        Ok(self.scene.reroot(VertexId(vertex))?)
    }

    /// Return to the true-center layout.
    pub fn reset(&mut self) -> bool {
        self.scene.reset_to_true_center()
    }

    /// Change the ring spacing by wheel notches (positive widens).
    pub fn scroll(&mut self, notches: f32) -> std::result::Result<bool, JsError> {
        Ok(self.scene.scroll(notches)?)
    }

    #[wasm_bindgen(js_name = setDelta)]
    pub fn set_delta(&mut self, delta: f32) -> std::result::Result<bool, JsError> {
        Ok(self.scene.set_delta(delta)?)
    }

    pub fn delta(&self) -> f32 {
        self.scene.delta()
    }

    /// Toggle the framework overlay. Returns the new flag.
    #[wasm_bindgen(js_name = toggleFramework)]
    pub fn toggle_framework(&mut self) -> bool {
        self.scene.toggle_framework()
    }

    #[wasm_bindgen(js_name = showFramework)]
    pub fn show_framework(&self) -> bool {
        self.scene.show_framework()
    }

    /// Start or stop the find-center animation.
    #[wasm_bindgen(js_name = toggleFindCenter)]
    pub fn toggle_find_center(&mut self) {
        self.scene.toggle_find_center();
    }

    /// Current find-center step, or None when not playing.
    #[wasm_bindgen(js_name = findCenterStep)]
    pub fn find_center_step(&self) -> Option<u32> {
        self.scene.find_center_step().map(|step| step as u32)
    }

    /// One of `idle`, `animatingLayout`, `animatingFindCenter`.
    pub fn state(&self) -> String {
        self.scene.state().as_str().to_string()
    }

    pub fn hovered(&self) -> Option<u32> {
        self.scene.hovered().map(VertexId::raw)
    }

    // =========================================================================
    // Render Buffers
    // =========================================================================

    /// Current positions as [x0, y0, x1, y1, ...].
    pub fn positions(&self) -> Float32Array {
        Float32Array::from(&interleave(self.scene.positions())[..])
    }

    /// Target positions of the latest layout as [x0, y0, x1, y1, ...].
    #[wasm_bindgen(js_name = targetPositions)]
    pub fn target_positions(&self) -> Float32Array {
        Float32Array::from(&interleave(&self.scene.layout().target_positions)[..])
    }

    pub fn depths(&self) -> Vec<u32> {
        self.scene.layout().depths.clone()
    }

    pub fn widths(&self) -> Vec<u32> {
        self.scene.layout().widths.clone()
    }

    /// Parent of each vertex; `u32::MAX` marks a layout root.
    #[wasm_bindgen(js_name = parentMap)]
    pub fn parent_map(&self) -> Vec<u32> {
        self.scene
            .layout()
            .parent_map
            .iter()
            .map(|p| p.map_or(NO_PARENT, VertexId::raw))
            .collect()
    }

    #[wasm_bindgen(js_name = centerNodes)]
    pub fn center_nodes(&self) -> Vec<u32> {
        raw_ids(&self.scene.layout().center_nodes)
    }

    #[wasm_bindgen(js_name = trueCenterNodes)]
    pub fn true_center_nodes(&self) -> Vec<u32> {
        raw_ids(&self.scene.layout().true_center_nodes)
    }

    /// Tree edges as [u0, v0, u1, v1, ...] with `u < v`.
    pub fn edges(&self) -> Vec<u32> {
        self.scene
            .tree()
            .edges()
            .into_iter()
            .flat_map(|(u, v)| [u.raw(), v.raw()])
            .collect()
    }

    /// Framework ring radii around the canvas origin, ascending.
    #[wasm_bindgen(js_name = frameworkCircles)]
    pub fn framework_circles(&self) -> Vec<f32> {
        self.scene.layout().framework_circles.clone()
    }

    /// Framework wedges as `{ center: {x, y}, radius, startAngle, endAngle }`.
    #[wasm_bindgen(js_name = frameworkWedges)]
    pub fn framework_wedges(&self) -> std::result::Result<JsValue, JsError> {
        Ok(serde_wasm_bindgen::to_value(&self.scene.layout().framework_wedges)?)
    }

    /// Per-vertex pruning status (0 active, 1 pruned, 2 center).
    #[wasm_bindgen(js_name = pruneStatus)]
    pub fn prune_status(&self) -> Vec<u8> {
        self.scene.prune_status_codes()
    }

    /// Per-vertex colour-gradient parameter in [0, 1].
    #[wasm_bindgen(js_name = depthGradient)]
    pub fn depth_gradient(&self) -> Vec<f32> {
        let layout = self.scene.layout();
        self.scene
            .tree()
            .vertices()
            .map(|v| layout.depth_gradient(v))
            .collect()
    }

    /// Subtree of a vertex under the current rooting.
    pub fn subtree(&self, vertex: u32) -> Vec<u32> {
        raw_ids(&self.scene.layout().subtree(self.scene.tree(), VertexId(vertex)))
    }

    /// Subtree of the hovered vertex, empty when nothing is hovered.
    #[wasm_bindgen(js_name = hoveredSubtree)]
    pub fn hovered_subtree(&self) -> Vec<u32> {
        raw_ids(&self.scene.hovered_subtree())
    }

    /// The whole latest layout result as a JS object.
    #[wasm_bindgen(js_name = layoutSnapshot)]
    pub fn layout_snapshot(&self) -> std::result::Result<JsValue, JsError> {
        Ok(serde_wasm_bindgen::to_value(self.scene.layout())?)
    }
}

impl Default for RadialTreeWasm {
    fn default() -> Self {
        Self::new()
    }
}

/// Flatten points into [x0, y0, x1, y1, ...].
fn interleave(points: &[Point]) -> Vec<f32> {
    points.iter().flat_map(|p| [p.x, p.y]).collect()
}

fn raw_ids(ids: &[VertexId]) -> Vec<u32> {
    ids.iter().map(|v| v.raw()).collect()
}
