//! Binary search tree producers: insert, search, delete
//!
//! Every log starts with `init` carrying the tree before the operation; the
//! descent emits `setCurrent` + `compareNode` for each visited node.
//!
//! - Insert routes equal keys right and ends `insertNode`, `clear`, `done`;
//!   `insertNode` carries the whole tree after the insert.
//! - Search ends with `found` or `notFound`.
//! - Delete ends `updateTree`, `clear`, `done`, or `notFound` on a miss.
//!
//! Search or delete on an empty tree is a single `notFound` event.
//!
//! # Delete policy
//!
//! A node with zero or one child is unlinked and its child (if any) takes its
//! place under the parent.  A node with two children takes the key of its
//! in-order successor (the leftmost node of its right subtree, reached with one
//! `setCurrent` per hop); the successor has no left child and is unlinked with
//! the first rule.

use crate::errors::ValidationError;
use crate::event::{Event, EventKind, EventLog, EventType, LogBuilder};
use crate::producers::{check_operand, reject, AlgorithmMeta, Producer};
use crate::snapshot::{Container, Side, StructureKind, TreeSnapshot};

pub const INSERT_SOURCE: &[&str] = &[
    "fn insert(tree: &mut Tree, key: f64) {",
    "    let mut parent = None;",
    "    let mut cur = tree.root;",
    "    while let Some(id) = cur {",
    "        parent = Some(id);",
    "        cur = if key < tree[id].key {",
    "            tree[id].left",
    "        } else {",
    "            tree[id].right // duplicates go right",
    "        };",
    "    }",
    "    tree.attach(key, parent);",
    "}",
];

pub const SEARCH_SOURCE: &[&str] = &[
    "fn search(tree: &Tree, key: f64) -> Option<NodeId> {",
    "    let mut cur = tree.root;",
    "    while let Some(id) = cur {",
    "        if key == tree[id].key {",
    "            return Some(id);",
    "        }",
    "        cur = if key < tree[id].key { tree[id].left } else { tree[id].right };",
    "    }",
    "    None",
    "}",
];

pub const DELETE_SOURCE: &[&str] = &[
    "fn delete(tree: &mut Tree, key: f64) -> bool {",
    "    let Some(id) = search(tree, key) else {",
    "        return false;",
    "    };",
    "    let target = match (tree[id].left, tree[id].right) {",
    "        (Some(_), Some(right)) => {",
    "            let mut succ = right;",
    "            while let Some(next) = tree[succ].left {",
    "                succ = next;",
    "            }",
    "            tree[id].key = tree[succ].key;",
    "            succ",
    "        }",
    "        _ => id,",
    "    };",
    "    tree.unlink(target); // child moves up",
    "    true",
    "}",
];

pub const INSERT_META: AlgorithmMeta = AlgorithmMeta {
    id: "bst-insert",
    name: "BST Insert",
    structure: StructureKind::Tree,
    takes_operand: true,
    source: INSERT_SOURCE,
    fallback_lines: &[
        (EventType::Init, 1),
        (EventType::SetCurrent, 5),
        (EventType::CompareNode, 6),
        (EventType::InsertNode, 12),
        (EventType::Done, 13),
    ],
};

pub const SEARCH_META: AlgorithmMeta = AlgorithmMeta {
    id: "bst-search",
    name: "BST Search",
    structure: StructureKind::Tree,
    takes_operand: true,
    source: SEARCH_SOURCE,
    fallback_lines: &[
        (EventType::Init, 2),
        (EventType::SetCurrent, 3),
        (EventType::CompareNode, 4),
        (EventType::Found, 5),
        (EventType::NotFound, 9),
    ],
};

pub const DELETE_META: AlgorithmMeta = AlgorithmMeta {
    id: "bst-delete",
    name: "BST Delete",
    structure: StructureKind::Tree,
    takes_operand: true,
    source: DELETE_SOURCE,
    fallback_lines: &[
        (EventType::Init, 1),
        (EventType::SetCurrent, 2),
        (EventType::CompareNode, 2),
        (EventType::NotFound, 3),
        (EventType::UpdateTree, 16),
        (EventType::Done, 17),
    ],
};

pub struct BstInsert;
pub struct BstSearch;
pub struct BstDelete;

impl Producer for BstInsert {
    fn produce(&self, input: &Container, operand: Option<f64>) -> EventLog {
        with_tree(input, operand, "insert", insert)
    }
}

impl Producer for BstSearch {
    fn produce(&self, input: &Container, operand: Option<f64>) -> EventLog {
        with_tree(input, operand, "search", search)
    }
}

impl Producer for BstDelete {
    fn produce(&self, input: &Container, operand: Option<f64>) -> EventLog {
        with_tree(input, operand, "delete", delete)
    }
}

fn with_tree(
    input: &Container,
    operand: Option<f64>,
    verb: &'static str,
    f: fn(&TreeSnapshot, f64) -> EventLog,
) -> EventLog {
    let Some(tree) = input.as_tree() else {
        return reject(&ValidationError::WrongStructure {
            expected: StructureKind::Tree,
        });
    };
    match operand {
        Some(key) => f(tree, key),
        None => reject(&ValidationError::InvalidOperand { verb }),
    }
}

/// Shared entry checks: finite key, well-formed tree
fn check(tree: &TreeSnapshot, key: f64, verb: &'static str) -> Result<f64, ValidationError> {
    let key = check_operand(key, verb)?;
    tree.validate()?;
    Ok(key)
}

fn start(tree: &TreeSnapshot, line: u32) -> LogBuilder {
    let mut log = LogBuilder::new();
    log.emit(
        EventKind::Init {
            data: Container::Tree(tree.clone()),
        },
        Some(line),
    );
    log
}

fn lone_not_found(key: f64, line: u32) -> EventLog {
    vec![Event {
        t: 0,
        kind: EventKind::NotFound { key },
        line: Some(line),
    }]
}

pub fn insert(tree: &TreeSnapshot, key: f64) -> EventLog {
    let key = match check(tree, key, "insert") {
        Ok(key) => key,
        Err(err) => return reject(&err),
    };

    let mut work = tree.clone();
    let mut log = start(&work, 1);

    let mut slot = None;
    let mut cur = work.root_id();
    while let Some(node) = cur.and_then(|id| work.node(id)) {
        log.emit(EventKind::SetCurrent { id: node.id }, Some(5));
        log.emit(EventKind::CompareNode { id: node.id, key }, Some(6));
        let side = if key < node.key { Side::Left } else { Side::Right };
        slot = Some((node.id, side));
        cur = node.child(side);
    }

    let id = work.attach(key, slot);
    log.emit(
        EventKind::InsertNode {
            id,
            key,
            parent_id: slot.map(|(parent, _)| parent),
            side: slot.map(|(_, side)| side),
            tree: work,
        },
        Some(12),
    );
    log.emit(EventKind::Clear, None);
    log.emit(EventKind::Done, Some(13));
    log.finish()
}

pub fn search(tree: &TreeSnapshot, key: f64) -> EventLog {
    let key = match check(tree, key, "search") {
        Ok(key) => key,
        Err(err) => return reject(&err),
    };
    if tree.is_empty() {
        return lone_not_found(key, 9);
    }

    let mut log = start(tree, 2);
    let mut cur = tree.root_id();
    while let Some(node) = cur.and_then(|id| tree.node(id)) {
        log.emit(EventKind::SetCurrent { id: node.id }, Some(3));
        log.emit(EventKind::CompareNode { id: node.id, key }, Some(4));
        if key == node.key {
            log.emit(EventKind::Found { id: node.id, key }, Some(5));
            return log.finish();
        }
        cur = if key < node.key { node.left } else { node.right };
    }

    log.emit(EventKind::NotFound { key }, Some(9));
    log.finish()
}

pub fn delete(tree: &TreeSnapshot, key: f64) -> EventLog {
    let key = match check(tree, key, "delete") {
        Ok(key) => key,
        Err(err) => return reject(&err),
    };
    if tree.is_empty() {
        return lone_not_found(key, 3);
    }

    let mut work = tree.clone();
    let mut log = start(&work, 1);

    let mut found = None;
    let mut cur = work.root_id();
    while let Some(node) = cur.and_then(|id| work.node(id)) {
        log.emit(EventKind::SetCurrent { id: node.id }, Some(2));
        log.emit(EventKind::CompareNode { id: node.id, key }, Some(2));
        if key == node.key {
            found = Some((node.id, node.left, node.right));
            break;
        }
        cur = if key < node.key { node.left } else { node.right };
    }

    let Some((id, left, right)) = found else {
        log.emit(EventKind::NotFound { key }, Some(3));
        return log.finish();
    };

    let target = match (left, right) {
        (Some(_), Some(right)) => {
            let mut succ = right;
            log.emit(EventKind::SetCurrent { id: succ }, Some(7));
            while let Some(next) = work.node(succ).and_then(|n| n.left) {
                succ = next;
                log.emit(EventKind::SetCurrent { id: succ }, Some(8));
            }
            if let Some(succ_key) = work.node(succ).map(|n| n.key) {
                work.set_key(id, succ_key);
            }
            succ
        }
        _ => id,
    };
    work.splice_out(target);

    log.emit(
        EventKind::UpdateTree {
            removed_id: target,
            key,
            tree: work,
        },
        Some(16),
    );
    log.emit(EventKind::Clear, None);
    log.emit(EventKind::Done, Some(17));
    log.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn types(log: &[Event]) -> Vec<EventType> {
        log.iter().map(|e| e.event_type()).collect()
    }

    #[test]
    fn test_insert_into_empty_tree() {
        let log = insert(&TreeSnapshot::new(), 5.0);
        assert_eq!(
            types(&log),
            vec![
                EventType::Init,
                EventType::InsertNode,
                EventType::Clear,
                EventType::Done
            ]
        );
        match &log[1].kind {
            EventKind::InsertNode {
                parent_id,
                side,
                tree,
                ..
            } => {
                assert_eq!(*parent_id, None);
                assert_eq!(*side, None);
                assert_eq!(tree.len(), 1);
            }
            other => panic!("expected insertNode, got {:?}", other),
        }
    }

    #[test]
    fn test_search_empty_tree_is_lone_not_found() {
        let log = search(&TreeSnapshot::new(), 4.0);
        assert_eq!(log.len(), 1);
        assert_eq!(log[0].t, 0);
        assert_eq!(log[0].kind, EventKind::NotFound { key: 4.0 });
    }

    #[test]
    fn test_delete_successor_hops() {
        // 50 -> right 70 -> left 60 -> left 55: successor of 50 is 55
        let tree = TreeSnapshot::from_keys(&[50.0, 30.0, 70.0, 60.0, 55.0]);
        let log = delete(&tree, 50.0);

        let hops = log
            .iter()
            .filter(|e| e.line == Some(7) || e.line == Some(8))
            .count();
        assert_eq!(hops, 3);

        let updated = log
            .iter()
            .filter(|e| e.event_type() == EventType::UpdateTree)
            .count();
        assert_eq!(updated, 1);
    }

    #[test]
    fn test_nan_key_rejected() {
        let log = insert(&TreeSnapshot::new(), f64::NAN);
        assert_eq!(
            log[0].kind,
            EventKind::Error {
                message: "Enter a number to insert.".to_string()
            }
        );
    }

    #[test]
    fn test_missing_operand_rejected() {
        let log = BstDelete.produce(&Container::Tree(TreeSnapshot::new()), None);
        assert_eq!(
            log[0].kind,
            EventKind::Error {
                message: "Enter a number to delete.".to_string()
            }
        );
    }
}
