//! Tree - immutable undirected adjacency structure.
//!
//! A `Tree` is validated once at construction and never mutated afterwards.
//! Editing the tree in the UI builds a brand new `Tree` which replaces the
//! old one wholesale.
//!
//! Neighbour lists keep edge insertion order. The center finder and the
//! radial layout both walk neighbours in this order, which is what makes
//! every layout a deterministic function of the edge list.

use petgraph::unionfind::UnionFind;

use super::vertex::VertexId;
use crate::error::{Result, TreeError};

/// An undirected, connected, acyclic graph over the vertex ids `0..n`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Tree {
    /// Neighbour lists, one per vertex, in edge insertion order.
    adjacency: Vec<Vec<VertexId>>,
}

impl Tree {
    /// Build a tree from `num_vertices` and its undirected edges.
    ///
    /// Rejects out-of-range endpoints, self-loops, edges that close a cycle
    /// (duplicates included) and edge sets that leave the tree disconnected.
    pub fn from_edges<I>(num_vertices: usize, edges: I) -> Result<Self>
    where
        I: IntoIterator<Item = (VertexId, VertexId)>,
    {
        let edges: Vec<(VertexId, VertexId)> = edges.into_iter().collect();
        for &(u, v) in &edges {
            for vertex in [u, v] {
                if vertex.index() >= num_vertices {
                    return Err(TreeError::VertexOutOfRange {
                        vertex,
                        count: num_vertices,
                    });
                }
            }
            if u == v {
                return Err(TreeError::SelfLoop(u));
            }
        }

        // Too few edges to connect every vertex. Checked before anything is
        // sized by `num_vertices`.
        if edges.len() + 1 < num_vertices {
            return Err(TreeError::Disconnected {
                components: num_vertices - edges.len(),
            });
        }

        let mut adjacency = vec![Vec::new(); num_vertices];
        let mut components = UnionFind::<usize>::new(num_vertices);
        let mut merged = 0usize;

        for (u, v) in edges {
            if !components.union(u.index(), v.index()) {
                return Err(TreeError::Cycle { u, v });
            }
            merged += 1;

            adjacency[u.index()].push(v);
            adjacency[v.index()].push(u);
        }

        // An acyclic edge set on n vertices has n - merged components.
        let component_count = num_vertices - merged;
        if component_count > 1 {
            return Err(TreeError::Disconnected {
                components: component_count,
            });
        }

        Ok(Self { adjacency })
    }

    /// Build a tree from flat endpoint pairs `[u0, v0, u1, v1, ...]`.
    pub fn from_pairs(num_vertices: usize, pairs: &[u32]) -> Result<Self> {
        if pairs.len() % 2 != 0 {
            return Err(TreeError::Parse {
                line: 1,
                message: format!("odd number of edge endpoints ({})", pairs.len()),
            });
        }
        let edges = pairs
            .chunks_exact(2)
            .map(|pair| (VertexId(pair[0]), VertexId(pair[1])));
        Self::from_edges(num_vertices, edges)
    }

    /// Get the number of vertices.
    pub fn num_vertices(&self) -> usize {
        self.adjacency.len()
    }

    /// Check if the tree has no vertices.
    pub fn is_empty(&self) -> bool {
        self.adjacency.is_empty()
    }

    /// Get the number of edges (always `num_vertices - 1` for a non-empty tree).
    pub fn edge_count(&self) -> usize {
        self.num_vertices().saturating_sub(1)
    }

    /// Check that `vertex` names a vertex of this tree.
    pub fn check_vertex(&self, vertex: VertexId) -> Result<()> {
        if vertex.index() < self.num_vertices() {
            Ok(())
        } else {
            Err(TreeError::VertexOutOfRange {
                vertex,
                count: self.num_vertices(),
            })
        }
    }

    /// Get neighbours of a vertex in edge insertion order.
    ///
    /// Out-of-range ids have no neighbours.
    pub fn neighbors(&self, vertex: VertexId) -> &[VertexId] {
        self.adjacency
            .get(vertex.index())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Get the degree of a vertex.
    pub fn degree(&self, vertex: VertexId) -> usize {
        self.neighbors(vertex).len()
    }

    /// Iterate over all vertex ids in order.
    pub fn vertices(&self) -> impl Iterator<Item = VertexId> + '_ {
        (0..self.num_vertices()).map(VertexId::from_index)
    }

    /// Count the degree-1 vertices.
    pub fn leaf_count(&self) -> usize {
        self.adjacency.iter().filter(|n| n.len() == 1).count()
    }

    /// Get each undirected edge once as `(u, v)` with `u < v`, in vertex order.
    pub fn edges(&self) -> Vec<(VertexId, VertexId)> {
        let mut edges = Vec::with_capacity(self.edge_count());
        for u in self.vertices() {
            for &v in self.neighbors(u) {
                if u < v {
                    edges.push((u, v));
                }
            }
        }
        edges
    }
}
