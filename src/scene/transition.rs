//! Linear position transition between two layouts.

use crate::layout::Point;

/// Interpolates every vertex from a start to an end position over a fixed
/// duration.
///
/// Values are polled each frame via `positions()` after calling
/// `advance(dt)`; nothing runs on its own.
#[derive(Debug, Clone, Default)]
pub struct PositionTransition {
    from: Vec<Point>,
    to: Vec<Point>,
    current: Vec<Point>,
    duration: f32,
    elapsed: f32,
    active: bool,
}

impl PositionTransition {
    /// A transition that has already arrived at `positions`.
    pub fn settled(positions: Vec<Point>) -> Self {
        Self {
            current: positions.clone(),
            to: positions,
            ..Default::default()
        }
    }

    /// Begin interpolating from `from` to `to`.
    ///
    /// Jumps straight to `to` when the lengths differ or the duration is
    /// not positive.
    pub fn start(&mut self, from: Vec<Point>, to: Vec<Point>, duration: f32) {
        if from.len() != to.len() || !(duration > 0.0) {
            *self = Self::settled(to);
            return;
        }
        self.current = from.clone();
        self.from = from;
        self.to = to;
        self.duration = duration;
        self.elapsed = 0.0;
        self.active = true;
    }

    /// Advance by `dt` seconds. Returns true while still animating.
    pub fn advance(&mut self, dt: f32) -> bool {
        if !self.active {
            return false;
        }
        self.elapsed += dt.max(0.0);
        let t = self.progress();
        if t >= 1.0 {
            self.current.clone_from(&self.to);
            self.active = false;
            return false;
        }
        for ((cur, a), b) in self.current.iter_mut().zip(&self.from).zip(&self.to) {
            *cur = a.lerp(*b, t);
        }
        true
    }

    /// Fraction of the duration elapsed, in `[0, 1]`.
    pub fn progress(&self) -> f32 {
        if self.active {
            (self.elapsed / self.duration).min(1.0)
        } else {
            1.0
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Current interpolated positions.
    pub fn positions(&self) -> &[Point] {
        &self.current
    }

    /// End positions of the running (or last) transition.
    pub fn target(&self) -> &[Point] {
        &self.to
    }
}
