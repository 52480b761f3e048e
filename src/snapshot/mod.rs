//! Snapshot value types for the visualized data structures
//!
//! A snapshot captures a structure's full state at one instant.  Snapshots are
//! plain values: producers copy them on entry and every mutation-bearing event
//! carries its own copy, so no emitted snapshot ever aliases the working copy
//! a producer is still mutating.
//!
//! - Arrays, stack buffers and queue buffers are ordered `Vec<f64>`.
//! - Binary search trees are [`TreeSnapshot`]s (see [`tree`]).
//!
//! [`Container`] is the sum of the two and is what the registry-level
//! producer interface and the `init` event carry.

pub mod tree;

pub use tree::{NodeId, Side, TreeError, TreeNode, TreeSnapshot};

use serde::{Deserialize, Serialize};
use std::fmt;

/// Full state of one visualized structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Container {
    /// Sort input, stack buffer (top = last) or queue buffer (front = index 0)
    Array(Vec<f64>),
    Tree(TreeSnapshot),
}

impl Container {
    pub fn as_array(&self) -> Option<&[f64]> {
        match self {
            Container::Array(values) => Some(values),
            Container::Tree(_) => None,
        }
    }

    pub fn as_tree(&self) -> Option<&TreeSnapshot> {
        match self {
            Container::Tree(tree) => Some(tree),
            Container::Array(_) => None,
        }
    }

    /// Number of elements (array slots or tree nodes)
    pub fn len(&self) -> usize {
        match self {
            Container::Array(values) => values.len(),
            Container::Tree(tree) => tree.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for Container {
    fn default() -> Self {
        Container::Array(Vec::new())
    }
}

/// Which structure an algorithm operates on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StructureKind {
    Array,
    Stack,
    Queue,
    Tree,
}

impl StructureKind {
    /// Stacks and queues share the array representation
    pub fn is_buffer(self) -> bool {
        matches!(self, StructureKind::Array | StructureKind::Stack | StructureKind::Queue)
    }
}

impl fmt::Display for StructureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            StructureKind::Array => "array",
            StructureKind::Stack => "stack",
            StructureKind::Queue => "queue",
            StructureKind::Tree => "tree",
        };
        f.write_str(name)
    }
}
