//! Tree center computation by iterative leaf pruning.
//!
//! All current leaves are removed together in one round, their neighbours'
//! degrees drop, and the vertices that become leaves form the next round.
//! Peeling stops once at most two vertices remain; those are the center.
//!
//! ```text
//!   0 - 1 - 2 - 3 - 4      round 1 removes {0, 4}
//!                          round 2 removes {1, 3}
//!                          center = {2}
//! ```

mod pruning;

pub use pruning::{PruneStatus, PruningGenerations};

use crate::graph::{Tree, VertexId};

/// Find the 1 or 2 center vertices of `tree`.
///
/// Trees with at most two vertices have no interior, so every vertex is a
/// center. The order of a two-vertex center follows the order in which the
/// vertices entered the final frontier.
pub fn find_center(tree: &Tree) -> Vec<VertexId> {
    if tree.num_vertices() <= 2 {
        return tree.vertices().collect();
    }
    peel(tree, |_| {})
}

/// Record every pruning round of `tree`, ending with the center set.
///
/// Returns an empty sequence for trees with at most two vertices.
pub fn pruning_generations(tree: &Tree) -> PruningGenerations {
    if tree.num_vertices() <= 2 {
        return PruningGenerations::default();
    }
    let mut generations = Vec::new();
    let center = peel(tree, |frontier| generations.push(frontier.to_vec()));
    generations.push(center);
    PruningGenerations::new(generations)
}

/// Peel leaves round by round, reporting each removed frontier.
///
/// Returns the terminal frontier. Requires `tree.num_vertices() > 2`.
fn peel(tree: &Tree, mut on_generation: impl FnMut(&[VertexId])) -> Vec<VertexId> {
    let mut degree: Vec<usize> = tree.vertices().map(|v| tree.degree(v)).collect();
    let mut frontier: Vec<VertexId> = tree.vertices().filter(|&v| degree[v.index()] == 1).collect();
    let mut remaining = tree.num_vertices();

    while remaining > 2 {
        if frontier.is_empty() {
            break;
        }
        on_generation(&frontier);
        remaining -= frontier.len();

        let mut next = Vec::new();
        for &u in &frontier {
            for &v in tree.neighbors(u) {
                let d = &mut degree[v.index()];
                *d = d.saturating_sub(1);
                if *d == 1 {
                    next.push(v);
                }
            }
        }
        frontier = next;
    }

    frontier
}
