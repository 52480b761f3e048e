//! Binary search tree snapshot
//!
//! Nodes live in an id-keyed map and refer to each other by [`NodeId`]; a
//! snapshot never refers to a node outside itself, so cloning it is a deep copy.
//!
//! # Invariants
//!
//! - Every non-root node's `parent` is the one node whose `left` or `right`
//!   points back to it.
//! - `root_id` is absent (empty tree) or names the unique node with no parent.
//! - Ids come from a counter owned by the snapshot and are never reused, even
//!   after deletions.
//! - Keys obey binary-search ordering: left subtree `<` node `<=` right subtree
//!   (duplicates are routed right on insert).
//!
//! [`TreeSnapshot::validate`] checks all of the above.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use thiserror::Error;

/// Node identifier, unique within one tree's lifetime
pub type NodeId = u64;

/// Which child slot of a parent a node occupies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    #[serde(rename = "L")]
    Left,
    #[serde(rename = "R")]
    Right,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreeNode {
    pub id: NodeId,
    pub key: f64,
    pub left: Option<NodeId>,
    pub right: Option<NodeId>,
    pub parent: Option<NodeId>,
}

impl TreeNode {
    fn leaf(id: NodeId, key: f64, parent: Option<NodeId>) -> Self {
        TreeNode {
            id,
            key,
            left: None,
            right: None,
            parent,
        }
    }

    pub fn child(&self, side: Side) -> Option<NodeId> {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }
}

/// Structural problems found by [`TreeSnapshot::validate`]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TreeError {
    #[error("root {0} is not a node of this tree")]
    MissingRoot(NodeId),

    #[error("root {0} has a parent")]
    RootHasParent(NodeId),

    #[error("node {node} links to missing node {link}")]
    DanglingLink { node: NodeId, link: NodeId },

    #[error("node {node} and its parent disagree about their link")]
    ParentMismatch { node: NodeId },

    #[error("node {0} has no parent but is not the root")]
    OrphanNode(NodeId),

    #[error("node {0} is reachable through more than one link")]
    SharedNode(NodeId),

    #[error("node {0} is not reachable from the root")]
    Unreachable(NodeId),

    #[error("node {0} has a key that is not a number")]
    NonFiniteKey(NodeId),

    #[error("node {0} breaks binary-search ordering")]
    OrderViolation(NodeId),

    #[error("id counter {next_id} would reuse an existing id")]
    StaleIdCounter { next_id: NodeId },
}

/// Self-contained binary search tree value
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TreeSnapshot {
    root_id: Option<NodeId>,
    nodes: BTreeMap<NodeId, TreeNode>,
    next_id: NodeId,
}

impl TreeSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a tree by inserting `keys` in order.  Non-finite keys are skipped.
    pub fn from_keys(keys: &[f64]) -> Self {
        let mut tree = Self::new();
        for &key in keys.iter().filter(|k| k.is_finite()) {
            tree.insert(key);
        }
        tree
    }

    /// Assemble a tree from explicit nodes.
    ///
    /// The id counter resumes at the largest existing id + 1, which is the
    /// only safe choice when the tree's history is unknown.
    pub fn from_nodes(
        root_id: Option<NodeId>,
        nodes: impl IntoIterator<Item = TreeNode>,
    ) -> Result<Self, TreeError> {
        let nodes: BTreeMap<NodeId, TreeNode> = nodes.into_iter().map(|n| (n.id, n)).collect();
        let next_id = nodes.keys().next_back().map_or(0, |max| max + 1);
        let tree = TreeSnapshot {
            root_id,
            nodes,
            next_id,
        };
        tree.validate()?;
        Ok(tree)
    }

    pub fn root_id(&self) -> Option<NodeId> {
        self.root_id
    }

    pub fn root(&self) -> Option<&TreeNode> {
        self.root_id.and_then(|id| self.nodes.get(&id))
    }

    pub fn node(&self, id: NodeId) -> Option<&TreeNode> {
        self.nodes.get(&id)
    }

    /// All nodes in ascending id order
    pub fn nodes(&self) -> impl Iterator<Item = &TreeNode> {
        self.nodes.values()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Id the next attached node will receive
    pub fn next_id(&self) -> NodeId {
        self.next_id
    }

    /// Keys in in-order (ascending) sequence
    pub fn keys_in_order(&self) -> Vec<f64> {
        let mut keys = Vec::with_capacity(self.nodes.len());
        let mut stack = Vec::new();
        let mut cur = self.root_id;
        while cur.is_some() || !stack.is_empty() {
            while let Some(node) = cur.and_then(|id| self.nodes.get(&id)) {
                stack.push(node);
                cur = node.left;
            }
            let Some(node) = stack.pop() else {
                break;
            };
            keys.push(node.key);
            cur = node.right;
        }
        keys
    }

    /// First node holding `key` on the search path, if any
    pub fn find(&self, key: f64) -> Option<NodeId> {
        let mut cur = self.root_id;
        while let Some(node) = cur.and_then(|id| self.nodes.get(&id)) {
            if key == node.key {
                return Some(node.id);
            }
            cur = if key < node.key { node.left } else { node.right };
        }
        None
    }

    /// Number of edges between the root and `id`
    pub fn depth(&self, id: NodeId) -> Option<usize> {
        let mut node = self.nodes.get(&id)?;
        let mut depth = 0;
        while let Some(parent) = node.parent.and_then(|p| self.nodes.get(&p)) {
            depth += 1;
            node = parent;
        }
        Some(depth)
    }

    /// Plain BST insert without event emission; duplicates go right.
    pub fn insert(&mut self, key: f64) -> NodeId {
        let mut slot = None;
        let mut cur = self.root_id;
        while let Some(node) = cur.and_then(|id| self.nodes.get(&id)) {
            let side = if key < node.key { Side::Left } else { Side::Right };
            slot = Some((node.id, side));
            cur = node.child(side);
        }
        self.attach(key, slot)
    }

    /// Add a new leaf under `parent` (or as the root when `None`)
    pub(crate) fn attach(&mut self, key: f64, parent: Option<(NodeId, Side)>) -> NodeId {
        let id = self.next_id;
        self.next_id += 1;
        self.nodes
            .insert(id, TreeNode::leaf(id, key, parent.map(|(p, _)| p)));

        match parent {
            Some((parent_id, side)) => {
                if let Some(parent) = self.nodes.get_mut(&parent_id) {
                    match side {
                        Side::Left => parent.left = Some(id),
                        Side::Right => parent.right = Some(id),
                    }
                }
            }
            None => self.root_id = Some(id),
        }
        id
    }

    pub(crate) fn set_key(&mut self, id: NodeId, key: f64) {
        if let Some(node) = self.nodes.get_mut(&id) {
            node.key = key;
        }
    }

    /// Remove a node with at most one child, reattaching that child to the
    /// removed node's parent.
    pub(crate) fn splice_out(&mut self, id: NodeId) -> Option<TreeNode> {
        let node = self.nodes.remove(&id)?;
        debug_assert!(
            node.left.is_none() || node.right.is_none(),
            "splice_out on a node with two children"
        );
        let child = node.left.or(node.right);

        if let Some(child) = child.and_then(|c| self.nodes.get_mut(&c)) {
            child.parent = node.parent;
        }

        match node.parent.and_then(|p| self.nodes.get_mut(&p)) {
            Some(parent) => {
                if parent.left == Some(id) {
                    parent.left = child;
                } else if parent.right == Some(id) {
                    parent.right = child;
                }
            }
            None => self.root_id = child,
        }
        Some(node)
    }

    /// Check every structural and ordering invariant
    pub fn validate(&self) -> Result<(), TreeError> {
        if let Some(max) = self.nodes.keys().next_back() {
            if self.next_id <= *max {
                return Err(TreeError::StaleIdCounter {
                    next_id: self.next_id,
                });
            }
        }

        let Some(root_id) = self.root_id else {
            return match self.nodes.keys().next() {
                Some(&id) => Err(TreeError::OrphanNode(id)),
                None => Ok(()),
            };
        };
        let root = self
            .nodes
            .get(&root_id)
            .ok_or(TreeError::MissingRoot(root_id))?;
        if root.parent.is_some() {
            return Err(TreeError::RootHasParent(root_id));
        }

        for node in self.nodes.values() {
            if !node.key.is_finite() {
                return Err(TreeError::NonFiniteKey(node.id));
            }
            for link in [node.left, node.right].into_iter().flatten() {
                let child = self.nodes.get(&link).ok_or(TreeError::DanglingLink {
                    node: node.id,
                    link,
                })?;
                if child.parent != Some(node.id) {
                    return Err(TreeError::ParentMismatch { node: link });
                }
            }
            match node.parent {
                Some(parent_id) => {
                    let parent = self.nodes.get(&parent_id).ok_or(TreeError::DanglingLink {
                        node: node.id,
                        link: parent_id,
                    })?;
                    if parent.left != Some(node.id) && parent.right != Some(node.id) {
                        return Err(TreeError::ParentMismatch { node: node.id });
                    }
                }
                None if node.id != root_id => return Err(TreeError::OrphanNode(node.id)),
                None => {}
            }
        }

        // Walk from the root carrying the key bounds each subtree must respect:
        // lower bound inclusive, upper bound exclusive.
        let mut seen = BTreeSet::new();
        let mut pending = vec![(root_id, None::<f64>, None::<f64>)];
        while let Some((id, low, high)) = pending.pop() {
            if !seen.insert(id) {
                return Err(TreeError::SharedNode(id));
            }
            let node = self
                .nodes
                .get(&id)
                .ok_or(TreeError::DanglingLink { node: id, link: id })?;
            let above_low = low.map_or(true, |low| node.key >= low);
            let below_high = high.map_or(true, |high| node.key < high);
            if !above_low || !below_high {
                return Err(TreeError::OrderViolation(id));
            }
            if let Some(left) = node.left {
                pending.push((left, low, Some(node.key)));
            }
            if let Some(right) = node.right {
                pending.push((right, Some(node.key), high));
            }
        }

        match self.nodes.keys().find(|id| !seen.contains(id)) {
            Some(&id) => Err(TreeError::Unreachable(id)),
            None => Ok(()),
        }
    }
}
