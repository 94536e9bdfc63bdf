//! Prüfer sequence decoding.
//!
//! Every labelled tree on `n ≥ 2` vertices corresponds to exactly one
//! sequence of `n - 2` labels, so a uniformly random sequence (supplied by
//! the host) decodes to a uniformly random tree.

use std::collections::BTreeSet;

use super::tree::Tree;
use super::vertex::VertexId;
use crate::error::{Result, TreeError};

impl Tree {
    /// Decode a Prüfer sequence into a tree on `num_vertices` vertices.
    ///
    /// Each label joins the smallest current leaf; the last two remaining
    /// leaves are joined at the end.
    pub fn from_prufer(num_vertices: usize, sequence: &[u32]) -> Result<Self> {
        let expected = num_vertices.saturating_sub(2);
        if sequence.len() != expected {
            return Err(TreeError::PruferLength {
                num_vertices,
                expected,
                found: sequence.len(),
            });
        }
        if let Some(&label) = sequence.iter().find(|&&l| l as usize >= num_vertices) {
            return Err(TreeError::VertexOutOfRange {
                vertex: VertexId(label),
                count: num_vertices,
            });
        }
        if num_vertices < 2 {
            return Self::from_edges(num_vertices, Vec::new());
        }

        let mut degree = vec![1usize; num_vertices];
        for &label in sequence {
            degree[label as usize] += 1;
        }
        let mut leaves: BTreeSet<usize> = (0..num_vertices).filter(|&v| degree[v] == 1).collect();

        let mut edges = Vec::with_capacity(num_vertices - 1);
        for &label in sequence {
            let Some(leaf) = leaves.pop_first() else {
                break;
            };
            let parent = label as usize;
            edges.push((VertexId(label), VertexId::from_index(leaf)));
            degree[leaf] -= 1;
            degree[parent] -= 1;
            if degree[parent] == 1 {
                leaves.insert(parent);
            }
        }

        let mut remaining = leaves.into_iter();
        if let (Some(u), Some(v)) = (remaining.next(), remaining.next()) {
            edges.push((VertexId::from_index(u), VertexId::from_index(v)));
        }

        Self::from_edges(num_vertices, edges)
    }
}
