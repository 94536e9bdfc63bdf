//! Edge-list text format.
//!
//! The persisted format is a vertex count followed by whitespace-separated
//! endpoint pairs, any number per line:
//!
//! ```text
//! 5
//! 0 1
//! 1 2 2 3
//! 3 4
//! ```
//!
//! The tree editor uses a looser variant where the vertex count is entered
//! separately and every line that starts with two integers is one edge.

use std::fmt;
use std::str::FromStr;

use super::tree::Tree;
use super::vertex::VertexId;
use crate::error::{Result, TreeError};

/// Parse the persisted edge-list format into a validated tree.
pub fn parse_edge_list(text: &str) -> Result<Tree> {
    let mut tokens = Vec::new();
    for (line_idx, line) in text.lines().enumerate() {
        let line_no = line_idx + 1;
        for token in line.split_whitespace() {
            let value = token.parse::<u32>().map_err(|_| TreeError::Parse {
                line: line_no,
                message: format!("expected an integer, found `{token}`"),
            })?;
            tokens.push((line_no, value));
        }
    }

    let Some((&(_, count), rest)) = tokens.split_first() else {
        return Err(TreeError::Parse {
            line: 1,
            message: "missing vertex count".to_string(),
        });
    };

    if rest.len() % 2 != 0 {
        let (line, value) = rest[rest.len() - 1];
        return Err(TreeError::Parse {
            line,
            message: format!("vertex {value} has no partner"),
        });
    }

    let edges = rest
        .chunks_exact(2)
        .map(|pair| (VertexId(pair[0].1), VertexId(pair[1].1)));
    Tree::from_edges(count as usize, edges)
}

/// Parse editor text: one edge per line, `num_vertices` given separately.
///
/// Lines that do not start with two integers are skipped.
pub fn parse_edge_lines(num_vertices: usize, text: &str) -> Result<Tree> {
    let mut edges = Vec::new();
    for (line_idx, line) in text.lines().enumerate() {
        let mut fields = line.split_whitespace().map(str::parse::<u32>);
        match (fields.next(), fields.next()) {
            (Some(Ok(u)), Some(Ok(v))) => edges.push((VertexId(u), VertexId(v))),
            (None, _) => {}
            _ => tracing::debug!(line_no = line_idx + 1, "skipping edge line {line:?}"),
        }
    }
    Tree::from_edges(num_vertices, edges)
}

/// Serialize a tree in the persisted edge-list format.
pub fn to_edge_list(tree: &Tree) -> String {
    tree.to_string()
}

impl fmt::Display for Tree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.num_vertices())?;
        for (u, v) in self.edges() {
            writeln!(f, "{} {}", u.raw(), v.raw())?;
        }
        Ok(())
    }
}

impl FromStr for Tree {
    type Err = TreeError;

    fn from_str(s: &str) -> Result<Self> {
        parse_edge_list(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_pairs_across_lines() {
        let tree = parse_edge_list("5\n0 1\n1 2 2 3\n3\n4\n").unwrap();
        assert_eq!(tree.num_vertices(), 5);
        assert_eq!(tree.edge_count(), 4);
        assert_eq!(tree.neighbors(VertexId(3)), &[VertexId(2), VertexId(4)]);
    }

    #[test]
    fn test_parse_count_only() {
        let tree: Tree = "1".parse().unwrap();
        assert_eq!(tree.num_vertices(), 1);
    }

    #[test]
    fn test_parse_errors() {
        let err = parse_edge_list("   \n").unwrap_err();
        assert!(matches!(err, TreeError::Parse { line: 1, .. }));

        let err = parse_edge_list("3\n0 1\n1 x\n").unwrap_err();
        assert_eq!(
            err,
            TreeError::Parse {
                line: 3,
                message: "expected an integer, found `x`".to_string()
            }
        );

        let err = parse_edge_list("3\n0 1\n1\n").unwrap_err();
        assert!(matches!(err, TreeError::Parse { line: 3, .. }));
    }

    #[test]
    fn test_parse_validates_tree() {
        let err = parse_edge_list("3\n0 1\n1 2\n2 0\n").unwrap_err();
        assert!(matches!(err, TreeError::Cycle { .. }));
    }

    #[test]
    fn test_huge_vertex_count_is_an_error() {
        let err = parse_edge_list("4000000000\n0 1\n").unwrap_err();
        assert!(matches!(err, TreeError::Disconnected { .. }));

        let err = parse_edge_lines(usize::MAX, "0 1\n").unwrap_err();
        assert!(matches!(err, TreeError::Disconnected { .. }));
    }

    #[test]
    fn test_edge_lines_skip_noise() {
        let tree = parse_edge_lines(3, "0 1\n\nnot an edge\n1 2 extra\n").unwrap();
        assert_eq!(tree.edge_count(), 2);
        assert_eq!(tree.neighbors(VertexId(1)), &[VertexId(0), VertexId(2)]);
    }

    #[test]
    fn test_to_edge_list() {
        let tree = parse_edge_list("4 3 0 0 1 2 1").unwrap();
        assert_eq!(to_edge_list(&tree), "4\n0 3\n0 1\n1 2\n");

        let reparsed: Tree = to_edge_list(&tree).parse().unwrap();
        assert_eq!(reparsed.edges(), tree.edges());
    }
}
