//! Replayable pruning rounds for the find-center animation.

use serde::Serialize;

use crate::graph::VertexId;

/// How a vertex is drawn at a given playback step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PruneStatus {
    /// Not yet removed.
    Active,
    /// Removed in an earlier round.
    Pruned,
    /// Part of the final center, shown once every round has played.
    Center,
}

impl PruneStatus {
    /// Compact code for typed-array export (0 = active, 1 = pruned, 2 = center).
    pub fn code(self) -> u8 {
        match self {
            Self::Active => 0,
            Self::Pruned => 1,
            Self::Center => 2,
        }
    }
}

/// Ordered leaf-removal rounds; the last round is the center set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PruningGenerations {
    generations: Vec<Vec<VertexId>>,
}

impl PruningGenerations {
    pub(crate) fn new(generations: Vec<Vec<VertexId>>) -> Self {
        Self { generations }
    }

    /// Number of rounds, center round included.
    pub fn len(&self) -> usize {
        self.generations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.generations.is_empty()
    }

    pub fn get(&self, round: usize) -> Option<&[VertexId]> {
        self.generations.get(round).map(Vec::as_slice)
    }

    pub fn iter(&self) -> impl Iterator<Item = &[VertexId]> {
        self.generations.iter().map(Vec::as_slice)
    }

    /// The final round, or an empty slice when there were no rounds.
    pub fn center(&self) -> &[VertexId] {
        self.generations.last().map(Vec::as_slice).unwrap_or(&[])
    }

    /// Status of `vertex` after `step` rounds have played.
    ///
    /// Rounds `[0, step)` are pruned. Once `step` reaches the number of
    /// rounds, the vertices of the last round are reported as the center.
    pub fn status(&self, vertex: VertexId, step: usize) -> PruneStatus {
        if step >= self.len() && self.center().contains(&vertex) {
            return PruneStatus::Center;
        }
        let pruned = self
            .generations
            .iter()
            .take(step)
            .any(|round| round.contains(&vertex));
        if pruned {
            PruneStatus::Pruned
        } else {
            PruneStatus::Active
        }
    }

    /// Status codes for every vertex in `0..num_vertices`.
    pub fn status_codes(&self, num_vertices: usize, step: usize) -> Vec<u8> {
        (0..num_vertices)
            .map(|i| self.status(VertexId::from_index(i), step).code())
            .collect()
    }
}
