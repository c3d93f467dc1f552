//! Join-path resolution over the schema graph.
//!
//! Breadth-first search through foreign-key edges, so a resolved path
//! always has the minimum number of joins. Among equal-length paths the
//! first-discovered one wins, which follows per-node edge insertion
//! order: deterministic for a given graph build, but dependent on
//! introspection order across rebuilds.

use std::collections::{HashMap, HashSet, VecDeque};

use petgraph::graph::NodeIndex;
use thiserror::Error;

use super::graph::{FkEdge, SchemaGraph};

/// Errors raised while resolving join paths.
///
/// These are request-level validation failures, not server faults: the
/// caller asked to relate tables the schema does not connect.
#[derive(Debug, Error)]
pub enum PathError {
    #[error("no join path found between {from} and {to}")]
    NoPathFound { from: String, to: String },

    #[error("no direct edge between {from} and {to}")]
    NoDirectEdge { from: String, to: String },
}

/// Result type for path operations.
pub type PathResult<T> = Result<T, PathError>;

/// A single step in a join path: the edge walked to reach `to_table`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JoinStep {
    pub edge: FkEdge,
}

impl JoinStep {
    /// The table this step joins in.
    pub fn to_table(&self) -> &str {
        &self.edge.to_table
    }
}

/// The sequence of edges connecting two tables.
///
/// Empty when source and destination are the same table.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct JoinPath {
    pub steps: Vec<JoinStep>,
}

impl JoinPath {
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Number of joins in the path (the BFS distance).
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Render the path as a join-clause fragment:
    /// `JOIN t1 ON a.x=t1.y JOIN t2 ON t1.z=t2.w`.
    ///
    /// Empty string for an empty path.
    pub fn to_join_fragment(&self) -> String {
        self.steps
            .iter()
            .map(|step| format!("JOIN {} ON {}", step.to_table(), step.edge.condition()))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl SchemaGraph {
    /// Find the shortest join path between two tables.
    ///
    /// Returns an empty path when `source == destination`. Fails with
    /// [`PathError::NoPathFound`] when the destination is unreachable
    /// (unknown table or disconnected component); no partial path is
    /// ever returned.
    pub fn join_path(&self, source: &str, destination: &str) -> PathResult<JoinPath> {
        if source == destination {
            return Ok(JoinPath::default());
        }

        let no_path = || PathError::NoPathFound {
            from: source.to_string(),
            to: destination.to_string(),
        };

        let src_idx = self.node_index(source).ok_or_else(no_path)?;
        let dst_idx = self.node_index(destination).ok_or_else(no_path)?;

        let mut queue = VecDeque::new();
        let mut visited = HashSet::new();
        let mut parent: HashMap<NodeIndex, (NodeIndex, FkEdge)> = HashMap::new();

        queue.push_back(src_idx);
        visited.insert(src_idx);

        while let Some(current) = queue.pop_front() {
            if current == dst_idx {
                return Ok(reconstruct(src_idx, dst_idx, &parent));
            }

            for (neighbor, edge) in self.outgoing(current) {
                if !visited.contains(&neighbor) {
                    visited.insert(neighbor);
                    parent.insert(neighbor, (current, edge.clone()));
                    queue.push_back(neighbor);
                }
            }
        }

        Err(no_path())
    }

    /// First outgoing edge of `source` landing on `destination`.
    ///
    /// For adjacency lookups where the path is already known to be a
    /// single join; fails with [`PathError::NoDirectEdge`] otherwise.
    pub fn edge_between(&self, source: &str, destination: &str) -> PathResult<FkEdge> {
        self.edges_from(source)
            .into_iter()
            .find(|edge| edge.to_table == destination)
            .ok_or_else(|| PathError::NoDirectEdge {
                from: source.to_string(),
                to: destination.to_string(),
            })
    }
}

/// Walk the BFS parent map backward from target to source.
fn reconstruct(
    src_idx: NodeIndex,
    dst_idx: NodeIndex,
    parent: &HashMap<NodeIndex, (NodeIndex, FkEdge)>,
) -> JoinPath {
    let mut steps = Vec::new();
    let mut current = dst_idx;

    while current != src_idx {
        // Every visited node other than the source has a parent entry.
        let (prev, edge) = &parent[&current];
        steps.push(JoinStep { edge: edge.clone() });
        current = *prev;
    }

    steps.reverse();
    JoinPath { steps }
}
