//! Interactive scene state.
//!
//! `Scene` is the one place application state lives: the tree and its
//! layout, the current (possibly mid-transition) vertex positions, the
//! find-center playback, hover and the framework overlay flag. The host
//! calls `tick(dt)` once per frame and forwards pointer events; everything
//! it draws is read back through accessors.
//!
//! ```text
//!             reroot / reset / scroll            transition done
//!   Idle  ------------------------------>  AnimatingLayout  ----> Idle
//!    |  ^
//!    |  |  playback done / toggled off
//!    v  |
//!   AnimatingFindCenter
//! ```

mod find_center;
mod transition;

pub use find_center::FindCenterPlayback;
pub use transition::PositionTransition;

use serde::{Deserialize, Serialize};

use crate::center::{PruneStatus, PruningGenerations, pruning_generations};
use crate::error::Result;
use crate::graph::{Tree, VertexId, parse_edge_lines, parse_edge_list};
use crate::layout::{LayoutResult, Point, RadialLayout, RadialLayoutConfig};
use crate::spatial::SpatialIndex;

/// What the scene is currently doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneState {
    Idle,
    AnimatingLayout,
    AnimatingFindCenter,
}

impl SceneState {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::AnimatingLayout => "animatingLayout",
            Self::AnimatingFindCenter => "animatingFindCenter",
        }
    }
}

/// Timing and interaction settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SceneConfig {
    /// Duration of a layout transition in seconds.
    pub transition_secs: f32,
    /// Seconds per find-center step.
    pub step_secs: f32,
    /// Pointer distance within which a vertex counts as hit.
    pub hover_radius: f32,
    /// Spacing change per scroll notch.
    pub scroll_step: f32,
    pub layout: RadialLayoutConfig,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            transition_secs: 0.4,
            step_secs: 0.8,
            hover_radius: 8.0,
            scroll_step: 2.0,
            layout: RadialLayoutConfig::default(),
        }
    }
}

/// A tree together with the engine and result laid out for it.
/// Always replaced as a whole.
#[derive(Debug, Clone)]
struct Model {
    tree: Tree,
    layout: RadialLayout,
    result: LayoutResult,
}

impl Model {
    fn new(tree: Tree, config: &RadialLayoutConfig) -> Self {
        let mut layout = RadialLayout::new(config.clone());
        let result = layout.layout_true_center(&tree);
        Self { tree, layout, result }
    }
}

#[derive(Debug)]
pub struct Scene {
    config: SceneConfig,
    model: Model,
    transition: PositionTransition,
    generations: PruningGenerations,
    playback: Option<FindCenterPlayback>,
    state: SceneState,
    hovered: Option<VertexId>,
    show_framework: bool,
    /// Camera offset added to every drawn position.
    pan: Point,
    index: SpatialIndex,
}

impl Scene {
    /// Lay out `tree` around its true center with every vertex already at
    /// its target.
    pub fn new(tree: Tree, config: SceneConfig) -> Self {
        let model = Model::new(tree, &config.layout);
        let mut scene = Self {
            transition: PositionTransition::settled(model.result.target_positions.clone()),
            config,
            model,
            generations: PruningGenerations::default(),
            playback: None,
            state: SceneState::Idle,
            hovered: None,
            show_framework: false,
            pan: Point::ORIGIN,
            index: SpatialIndex::new(),
        };
        scene.index.rebuild(scene.transition.positions());
        scene
    }

    pub fn with_defaults(tree: Tree) -> Self {
        Self::new(tree, SceneConfig::default())
    }

    // =========================================================================
    // Tree replacement
    // =========================================================================

    /// Swap in a new tree, laid out around its true center with no
    /// transition. Any running animation is dropped and the pan resets.
    pub fn replace_tree(&mut self, tree: Tree) {
        let model = Model::new(tree, &self.config.layout);
        tracing::info!(
            vertices = model.tree.num_vertices(),
            centers = ?model.result.center_nodes,
            "tree replaced"
        );
        self.transition = PositionTransition::settled(model.result.target_positions.clone());
        self.model = model;
        self.generations = PruningGenerations::default();
        self.playback = None;
        self.state = SceneState::Idle;
        self.hovered = None;
        self.pan = Point::ORIGIN;
        self.index.rebuild(self.transition.positions());
    }

    /// Parse edge-list text and swap the tree in. On error the current tree
    /// is kept.
    pub fn load_edge_list(&mut self, text: &str) -> Result<()> {
        let tree = parse_edge_list(text)
            .inspect_err(|err| tracing::warn!(%err, "rejected edge list"))?;
        self.replace_tree(tree);
        Ok(())
    }

    /// Build a tree from a vertex count and one edge per line.
    pub fn load_edges(&mut self, num_vertices: usize, text: &str) -> Result<()> {
        let tree = parse_edge_lines(num_vertices, text)
            .inspect_err(|err| tracing::warn!(%err, "rejected edges"))?;
        self.replace_tree(tree);
        Ok(())
    }

    /// Decode a Prüfer sequence and swap the tree in.
    pub fn load_prufer(&mut self, num_vertices: usize, sequence: &[u32]) -> Result<()> {
        let tree = Tree::from_prufer(num_vertices, sequence)
            .inspect_err(|err| tracing::warn!(%err, "rejected Prüfer sequence"))?;
        self.replace_tree(tree);
        Ok(())
    }

    // =========================================================================
    // Frame update
    // =========================================================================

    /// Advance animations by `dt` seconds.
    pub fn tick(&mut self, dt: f32) {
        let was_moving = self.transition.is_active();
        let moving = self.transition.advance(dt);
        if was_moving && !moving {
            self.index.rebuild(self.transition.positions());
        }

        if let Some(playback) = self.playback.as_mut() {
            if playback.advance(dt, self.generations.len()) {
                tracing::debug!(steps = playback.step(), "find-center playback finished");
                self.playback = None;
            }
        }

        self.state = self.settled_state();
    }

    fn settled_state(&self) -> SceneState {
        if self.playback.is_some() {
            SceneState::AnimatingFindCenter
        } else if self.transition.is_active() {
            SceneState::AnimatingLayout
        } else {
            SceneState::Idle
        }
    }

    fn is_idle(&self) -> bool {
        self.state == SceneState::Idle
    }

    /// Adopt a fresh layout result and start moving towards it.
    fn animate_to(&mut self, result: LayoutResult) {
        let from = self.transition.positions().to_vec();
        self.transition
            .start(from, result.target_positions.clone(), self.config.transition_secs);
        self.model.result = result;
        self.hovered = None;
        if !self.transition.is_active() {
            self.index.rebuild(self.transition.positions());
        }
        self.state = self.settled_state();
    }

    // =========================================================================
    // Interaction
    // =========================================================================

    /// Shift the camera by `(dx, dy)` canvas units, e.g. from a drag.
    pub fn pan(&mut self, dx: f32, dy: f32) {
        self.pan = self.pan.translate(Point::new(dx, dy));
    }

    /// Vertex within the hover radius of a pointer at canvas `(x, y)`.
    fn pick(&self, x: f32, y: f32) -> Option<VertexId> {
        self.index.nearest_within(x - self.pan.x, y - self.pan.y, self.config.hover_radius)
    }

    /// Update the hovered vertex from a pointer position.
    ///
    /// `(x, y)` is in canvas coordinates, so the current pan is taken off
    /// before the lookup. Nothing is hovered while an animation runs.
    pub fn hover(&mut self, x: f32, y: f32) -> Option<VertexId> {
        self.hovered = if self.is_idle() { self.pick(x, y) } else { None };
        self.hovered
    }

    /// Re-root at the vertex under the pointer, if any. Same coordinates as
    /// [`Scene::hover`].
    pub fn click(&mut self, x: f32, y: f32) -> Result<bool> {
        if !self.is_idle() {
            return Ok(false);
        }
        match self.pick(x, y) {
            Some(vertex) => self.reroot(vertex),
            None => Ok(false),
        }
    }

    /// Re-root the layout at `vertex` and start a transition.
    ///
    /// Ignored while animating and on the tree's true center vertices.
    /// Returns whether a new layout was started.
    pub fn reroot(&mut self, vertex: VertexId) -> Result<bool> {
        if !self.is_idle() || self.model.result.is_true_center(vertex) {
            return Ok(false);
        }
        let result = self.model.layout.layout_from_root(&self.model.tree, vertex)?;
        tracing::info!(%vertex, max_depth = result.max_depth, "re-rooted");
        self.animate_to(result);
        Ok(true)
    }

    /// Go back to the true-center layout.
    pub fn reset_to_true_center(&mut self) -> bool {
        if !self.is_idle() {
            return false;
        }
        let result = self.model.layout.layout_true_center(&self.model.tree);
        tracing::info!(centers = ?result.center_nodes, "reset to true center");
        self.animate_to(result);
        true
    }

    /// Change the spacing by `notches * scroll_step`.
    pub fn scroll(&mut self, notches: f32) -> Result<bool> {
        let delta = self.delta() + notches * self.config.scroll_step;
        self.set_delta(delta)
    }

    /// Change the spacing (clamped) and start a transition.
    pub fn set_delta(&mut self, delta: f32) -> Result<bool> {
        if !self.is_idle() {
            return Ok(false);
        }
        let result = self.model.layout.set_delta(&self.model.tree, delta)?;
        tracing::debug!(delta = result.delta, "spacing changed");
        self.animate_to(result);
        Ok(true)
    }

    /// Flip the framework overlay. Only honoured while idle; returns the
    /// resulting flag.
    pub fn toggle_framework(&mut self) -> bool {
        if self.is_idle() {
            self.show_framework = !self.show_framework;
        }
        self.show_framework
    }

    /// Start the find-center playback, or stop it if it is running.
    pub fn toggle_find_center(&mut self) {
        if self.playback.take().is_some() {
            tracing::debug!("find-center playback stopped");
        } else {
            self.generations = pruning_generations(&self.model.tree);
            self.playback = Some(FindCenterPlayback::new(self.config.step_secs));
            self.hovered = None;
            tracing::debug!(rounds = self.generations.len(), "find-center playback started");
        }
        self.state = self.settled_state();
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    pub fn tree(&self) -> &Tree {
        &self.model.tree
    }

    /// The most recent layout result (the transition's end state).
    pub fn layout(&self) -> &LayoutResult {
        &self.model.result
    }

    /// Current interpolated positions.
    pub fn positions(&self) -> &[Point] {
        self.transition.positions()
    }

    pub fn delta(&self) -> f32 {
        self.model.layout.delta()
    }

    pub fn state(&self) -> SceneState {
        self.state
    }

    pub fn hovered(&self) -> Option<VertexId> {
        self.hovered
    }

    /// Camera offset to add to [`Scene::positions`] when drawing.
    pub fn pan_offset(&self) -> Point {
        self.pan
    }

    /// The hovered vertex and its descendants under the current rooting.
    pub fn hovered_subtree(&self) -> Vec<VertexId> {
        self.hovered
            .map(|v| self.model.result.subtree(&self.model.tree, v))
            .unwrap_or_default()
    }

    pub fn show_framework(&self) -> bool {
        self.show_framework
    }

    pub fn generations(&self) -> &PruningGenerations {
        &self.generations
    }

    /// Current playback step, if the find-center animation is running.
    pub fn find_center_step(&self) -> Option<usize> {
        self.playback.as_ref().map(FindCenterPlayback::step)
    }

    /// Pruning status of `vertex` at the current playback step.
    pub fn prune_status(&self, vertex: VertexId) -> PruneStatus {
        match &self.playback {
            Some(playback) => self.generations.status(vertex, playback.step()),
            None => PruneStatus::Active,
        }
    }

    /// Status codes for every vertex (see [`PruneStatus::code`]).
    pub fn prune_status_codes(&self) -> Vec<u8> {
        let n = self.model.tree.num_vertices();
        match &self.playback {
            Some(playback) => self.generations.status_codes(n, playback.step()),
            None => vec![PruneStatus::Active.code(); n],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-3;

    fn path5() -> Tree {
        parse_edge_list("5\n0 1\n1 2\n2 3\n3 4\n").unwrap()
    }

    fn star5() -> Tree {
        parse_edge_list("5\n0 1\n0 2\n0 3\n0 4\n").unwrap()
    }

    fn finish(scene: &mut Scene) {
        for _ in 0..100 {
            if scene.state() == SceneState::Idle {
                return;
            }
            scene.tick(0.1);
        }
    }

    #[test]
    fn test_new_scene_is_settled() {
        let scene = Scene::with_defaults(path5());
        assert_eq!(scene.state(), SceneState::Idle);
        assert_eq!(scene.positions(), &scene.layout().target_positions[..]);
        assert_eq!(scene.layout().center_nodes, vec![VertexId(2)]);
        assert!(!scene.show_framework());
        assert_eq!(scene.prune_status_codes(), vec![0; 5]);
    }

    #[test]
    fn test_reroot_transition() {
        let mut scene = Scene::with_defaults(path5());
        let before = scene.positions().to_vec();

        assert!(scene.reroot(VertexId(0)).unwrap());
        assert_eq!(scene.state(), SceneState::AnimatingLayout);
        assert_eq!(scene.layout().center_nodes, vec![VertexId(0)]);
        assert_eq!(scene.layout().true_center_nodes, vec![VertexId(2)]);
        let after = scene.layout().target_positions.clone();

        scene.tick(0.2);
        assert_eq!(scene.state(), SceneState::AnimatingLayout);
        for v in 0..5 {
            let mid = before[v].lerp(after[v], 0.5);
            assert!(scene.positions()[v].distance(mid) < EPS);
        }

        scene.tick(0.3);
        assert_eq!(scene.state(), SceneState::Idle);
        assert_eq!(scene.positions(), &after[..]);
    }

    #[test]
    fn test_reroot_ignored_on_true_center() {
        let mut scene = Scene::with_defaults(path5());
        assert!(!scene.reroot(VertexId(2)).unwrap());
        assert_eq!(scene.state(), SceneState::Idle);
    }

    #[test]
    fn test_reroot_ignored_while_animating() {
        let mut scene = Scene::with_defaults(path5());
        assert!(scene.reroot(VertexId(0)).unwrap());
        assert!(!scene.reroot(VertexId(4)).unwrap());
        assert!(!scene.reset_to_true_center());
        assert!(!scene.set_delta(80.0).unwrap());
        assert_eq!(scene.layout().center_nodes, vec![VertexId(0)]);
    }

    #[test]
    fn test_reroot_out_of_range() {
        let mut scene = Scene::with_defaults(path5());
        assert!(scene.reroot(VertexId(9)).is_err());
        assert_eq!(scene.state(), SceneState::Idle);
    }

    #[test]
    fn test_hover_and_click() {
        let mut scene = Scene::with_defaults(path5());
        let p = scene.positions()[4];

        assert_eq!(scene.hover(p.x + 3.0, p.y), Some(VertexId(4)));
        assert_eq!(scene.hovered_subtree(), vec![VertexId(4)]);
        assert_eq!(scene.hover(-1000.0, -1000.0), None);

        let centre = scene.positions()[2];
        scene.hover(centre.x, centre.y);
        assert_eq!(scene.hovered_subtree().len(), 5);

        assert!(scene.click(p.x, p.y).unwrap());
        assert_eq!(scene.layout().center_nodes, vec![VertexId(4)]);

        // No hover while the transition runs.
        assert_eq!(scene.hover(p.x, p.y), None);
        finish(&mut scene);

        // Vertex 4 is now the root at the canvas origin.
        assert_eq!(scene.hover(400.0, 300.0), Some(VertexId(4)));
    }

    #[test]
    fn test_pan_shifts_pointer_lookup() {
        let mut scene = Scene::with_defaults(path5());
        let p = scene.positions()[4];

        scene.pan(40.0, 0.0);
        scene.pan(0.0, -10.0);
        assert_eq!(scene.pan_offset(), Point::new(40.0, -10.0));
        assert_eq!(scene.hover(p.x + 40.0, p.y - 10.0), Some(VertexId(4)));
        assert_ne!(scene.hover(p.x, p.y), Some(VertexId(4)));

        assert!(scene.click(p.x + 40.0, p.y - 10.0).unwrap());
        assert_eq!(scene.layout().center_nodes, vec![VertexId(4)]);
        finish(&mut scene);

        scene.load_edge_list("3\n0 1\n1 2\n").unwrap();
        assert_eq!(scene.pan_offset(), Point::ORIGIN);
        let centre = scene.positions()[1];
        assert_eq!(scene.hover(centre.x, centre.y), Some(VertexId(1)));
    }

    #[test]
    fn test_click_on_empty_space() {
        let mut scene = Scene::with_defaults(path5());
        assert!(!scene.click(0.0, 0.0).unwrap());
        assert_eq!(scene.state(), SceneState::Idle);
    }

    #[test]
    fn test_reset_to_true_center() {
        let mut scene = Scene::with_defaults(path5());
        let initial = scene.positions().to_vec();
        scene.reroot(VertexId(0)).unwrap();
        finish(&mut scene);

        assert!(scene.reset_to_true_center());
        finish(&mut scene);
        assert_eq!(scene.layout().center_nodes, vec![VertexId(2)]);
        assert_eq!(scene.positions(), &initial[..]);
    }

    #[test]
    fn test_scroll_changes_delta() {
        let mut scene = Scene::with_defaults(star5());
        assert!(scene.scroll(5.0).unwrap());
        assert_eq!(scene.delta(), 60.0);
        finish(&mut scene);

        assert!(scene.scroll(-100.0).unwrap());
        assert_eq!(scene.delta(), 5.0);
        finish(&mut scene);
        assert_eq!(scene.layout().delta, 5.0);
    }

    #[test]
    fn test_toggle_framework_idle_only() {
        let mut scene = Scene::with_defaults(star5());
        assert!(scene.toggle_framework());
        assert!(!scene.toggle_framework());

        scene.reroot(VertexId(1)).unwrap();
        assert!(!scene.toggle_framework());
        assert!(!scene.show_framework());
    }

    #[test]
    fn test_find_center_playback() {
        let mut scene = Scene::with_defaults(star5());
        scene.toggle_find_center();
        assert_eq!(scene.state(), SceneState::AnimatingFindCenter);
        assert_eq!(scene.generations().len(), 2);
        assert_eq!(scene.find_center_step(), Some(0));
        assert_eq!(scene.prune_status_codes(), vec![0, 0, 0, 0, 0]);

        scene.tick(0.8);
        assert_eq!(scene.prune_status_codes(), vec![0, 1, 1, 1, 1]);
        assert_eq!(scene.prune_status(VertexId(0)), PruneStatus::Active);

        scene.tick(0.8);
        assert_eq!(scene.prune_status_codes(), vec![2, 1, 1, 1, 1]);

        scene.tick(0.8);
        assert_eq!(scene.state(), SceneState::AnimatingFindCenter);
        scene.tick(0.8);
        assert_eq!(scene.state(), SceneState::Idle);
        assert_eq!(scene.find_center_step(), None);
        assert_eq!(scene.prune_status_codes(), vec![0; 5]);
    }

    #[test]
    fn test_find_center_toggle_off() {
        let mut scene = Scene::with_defaults(path5());
        scene.toggle_find_center();
        assert!(!scene.reroot(VertexId(0)).unwrap());
        scene.toggle_find_center();
        assert_eq!(scene.state(), SceneState::Idle);
        assert!(scene.reroot(VertexId(0)).unwrap());
    }

    #[test]
    fn test_load_replaces_tree() {
        let mut scene = Scene::with_defaults(path5());
        scene.reroot(VertexId(0)).unwrap();

        scene.load_prufer(6, &[3, 3, 3, 4]).unwrap();
        assert_eq!(scene.state(), SceneState::Idle);
        assert_eq!(scene.tree().num_vertices(), 6);
        assert_eq!(scene.positions().len(), 6);
        assert_eq!(scene.positions(), &scene.layout().target_positions[..]);

        scene.load_edges(3, "0 1\n# comment\n1 2\n").unwrap();
        assert_eq!(scene.tree().edge_count(), 2);
        assert_eq!(scene.layout().center_nodes, vec![VertexId(1)]);
    }

    #[test]
    fn test_failed_load_keeps_tree() {
        let mut scene = Scene::with_defaults(path5());
        assert!(scene.load_edge_list("3\n0 1\n1 0\n").is_err());
        assert!(scene.load_edge_list("3\n0 x\n").is_err());
        assert_eq!(scene.tree(), &path5());
        assert_eq!(scene.layout().center_nodes, vec![VertexId(2)]);
    }

    #[test]
    fn test_empty_tree_scene() {
        let mut scene = Scene::with_defaults(Tree::default());
        assert!(scene.positions().is_empty());
        assert_eq!(scene.hover(400.0, 300.0), None);
        scene.toggle_find_center();
        scene.tick(10.0);
        assert_eq!(scene.state(), SceneState::Idle);
    }
}
