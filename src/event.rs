//! Event vocabulary and log construction
//!
//! An [`Event`] is one discrete step of an algorithm run: a tick, a tag from the
//! closed [`EventKind`] enumeration with its payload, and an optional line hint
//! into the algorithm's display source.
//!
//! # Payload contract
//!
//! Events that change a rendered value carry a full copy of the affected
//! container after the change, never a delta.  A renderer driven only by the
//! events it has been handed therefore stays consistent when playback resumes
//! mid-log or after a seek.
//!
//! # Wire shape
//!
//! ```text
//! { "t": 3, "type": "swap", "payload": { "i": 0, "j": 1, "a": [1.0, 2.0] }, "line": 9 }
//! ```

use crate::errors::ValidationError;
use crate::snapshot::{Container, NodeId, Side, TreeSnapshot};
use serde::Serialize;
use std::fmt;

/// Integer logical-time coordinate within one log
pub type Tick = u64;

/// Complete ordered output of one producer call
pub type EventLog = Vec<Event>;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Event {
    pub t: Tick,
    #[serde(flatten)]
    pub kind: EventKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<u32>,
}

impl Event {
    pub fn event_type(&self) -> EventType {
        self.kind.event_type()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "payload", rename_all = "camelCase")]
pub enum EventKind {
    /// First event of a log; carries the starting contents
    Init { data: Container },

    // ----- comparisons (no mutation) -----
    Compare {
        i: usize,
        j: usize,
        /// Value held aside by insertion sort while it searches for a slot
        #[serde(skip_serializing_if = "Option::is_none")]
        key: Option<f64>,
    },
    CompareWithPivot { j: usize, p: usize },
    CompareNode { id: NodeId, key: f64 },

    // ----- array mutations (full post-mutation array) -----
    Swap {
        i: usize,
        j: usize,
        #[serde(rename = "a")]
        array: Vec<f64>,
    },
    Shift {
        from: usize,
        to: usize,
        #[serde(rename = "a")]
        array: Vec<f64>,
    },
    Insert {
        index: usize,
        value: f64,
        #[serde(rename = "a")]
        array: Vec<f64>,
    },
    Overwrite {
        k: usize,
        value: f64,
        #[serde(rename = "a")]
        array: Vec<f64>,
    },
    Push {
        index: usize,
        value: f64,
        #[serde(rename = "a")]
        array: Vec<f64>,
    },
    Pop {
        index: usize,
        value: f64,
        #[serde(rename = "a")]
        array: Vec<f64>,
    },
    Enqueue {
        index: usize,
        value: f64,
        #[serde(rename = "a")]
        array: Vec<f64>,
    },
    Dequeue {
        from: usize,
        value: f64,
        #[serde(rename = "a")]
        array: Vec<f64>,
    },

    // ----- tree mutations (full post-mutation tree) -----
    #[serde(rename_all = "camelCase")]
    InsertNode {
        id: NodeId,
        key: f64,
        parent_id: Option<NodeId>,
        side: Option<Side>,
        tree: TreeSnapshot,
    },
    #[serde(rename_all = "camelCase")]
    UpdateTree {
        removed_id: NodeId,
        key: f64,
        tree: TreeSnapshot,
    },

    // ----- scope / markers (advisory) -----
    MarkSubarray { l: usize, r: usize },
    SetPivot { p: usize, value: f64 },
    MarkSortedEnd { index: usize },
    #[serde(rename_all = "camelCase")]
    MarkSortedPrefix { up_to: usize },
    MarkSortedIndex { index: usize },
    SetCurrent { id: NodeId },

    // ----- lifecycle -----
    /// Discard transient highlights; not a data mutation
    Clear,
    Done,
    Found { id: NodeId, key: f64 },
    NotFound { key: f64 },
    Error { message: String },
}

/// Fieldless tag of an [`EventKind`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventType {
    Init,
    Compare,
    CompareWithPivot,
    CompareNode,
    Swap,
    Shift,
    Insert,
    Overwrite,
    Push,
    Pop,
    Enqueue,
    Dequeue,
    InsertNode,
    UpdateTree,
    MarkSubarray,
    SetPivot,
    MarkSortedEnd,
    MarkSortedPrefix,
    MarkSortedIndex,
    SetCurrent,
    Clear,
    Done,
    Found,
    NotFound,
    Error,
}

impl EventType {
    /// Wire name of the tag
    pub fn as_str(self) -> &'static str {
        match self {
            EventType::Init => "init",
            EventType::Compare => "compare",
            EventType::CompareWithPivot => "compareWithPivot",
            EventType::CompareNode => "compareNode",
            EventType::Swap => "swap",
            EventType::Shift => "shift",
            EventType::Insert => "insert",
            EventType::Overwrite => "overwrite",
            EventType::Push => "push",
            EventType::Pop => "pop",
            EventType::Enqueue => "enqueue",
            EventType::Dequeue => "dequeue",
            EventType::InsertNode => "insertNode",
            EventType::UpdateTree => "updateTree",
            EventType::MarkSubarray => "markSubarray",
            EventType::SetPivot => "setPivot",
            EventType::MarkSortedEnd => "markSortedEnd",
            EventType::MarkSortedPrefix => "markSortedPrefix",
            EventType::MarkSortedIndex => "markSortedIndex",
            EventType::SetCurrent => "setCurrent",
            EventType::Clear => "clear",
            EventType::Done => "done",
            EventType::Found => "found",
            EventType::NotFound => "notFound",
            EventType::Error => "error",
        }
    }

    pub fn is_comparison(self) -> bool {
        matches!(
            self,
            EventType::Compare | EventType::CompareWithPivot | EventType::CompareNode
        )
    }

    /// Events that change a rendered value and carry a snapshot
    pub fn is_mutation(self) -> bool {
        matches!(
            self,
            EventType::Swap
                | EventType::Shift
                | EventType::Insert
                | EventType::Overwrite
                | EventType::Push
                | EventType::Pop
                | EventType::Enqueue
                | EventType::Dequeue
                | EventType::InsertNode
                | EventType::UpdateTree
        )
    }

    /// Events after which a log never continues
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            EventType::Done | EventType::Error | EventType::Found | EventType::NotFound
        )
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Borrowed view of the container an event carries
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SnapshotRef<'a> {
    Array(&'a [f64]),
    Tree(&'a TreeSnapshot),
}

impl SnapshotRef<'_> {
    pub fn to_container(self) -> Container {
        match self {
            SnapshotRef::Array(values) => Container::Array(values.to_vec()),
            SnapshotRef::Tree(tree) => Container::Tree(tree.clone()),
        }
    }
}

impl EventKind {
    pub fn event_type(&self) -> EventType {
        match self {
            EventKind::Init { .. } => EventType::Init,
            EventKind::Compare { .. } => EventType::Compare,
            EventKind::CompareWithPivot { .. } => EventType::CompareWithPivot,
            EventKind::CompareNode { .. } => EventType::CompareNode,
            EventKind::Swap { .. } => EventType::Swap,
            EventKind::Shift { .. } => EventType::Shift,
            EventKind::Insert { .. } => EventType::Insert,
            EventKind::Overwrite { .. } => EventType::Overwrite,
            EventKind::Push { .. } => EventType::Push,
            EventKind::Pop { .. } => EventType::Pop,
            EventKind::Enqueue { .. } => EventType::Enqueue,
            EventKind::Dequeue { .. } => EventType::Dequeue,
            EventKind::InsertNode { .. } => EventType::InsertNode,
            EventKind::UpdateTree { .. } => EventType::UpdateTree,
            EventKind::MarkSubarray { .. } => EventType::MarkSubarray,
            EventKind::SetPivot { .. } => EventType::SetPivot,
            EventKind::MarkSortedEnd { .. } => EventType::MarkSortedEnd,
            EventKind::MarkSortedPrefix { .. } => EventType::MarkSortedPrefix,
            EventKind::MarkSortedIndex { .. } => EventType::MarkSortedIndex,
            EventKind::SetCurrent { .. } => EventType::SetCurrent,
            EventKind::Clear => EventType::Clear,
            EventKind::Done => EventType::Done,
            EventKind::Found { .. } => EventType::Found,
            EventKind::NotFound { .. } => EventType::NotFound,
            EventKind::Error { .. } => EventType::Error,
        }
    }

    /// The container snapshot this event carries, if any
    pub fn snapshot(&self) -> Option<SnapshotRef<'_>> {
        match self {
            EventKind::Init { data } => Some(match data {
                Container::Array(values) => SnapshotRef::Array(values),
                Container::Tree(tree) => SnapshotRef::Tree(tree),
            }),
            EventKind::Swap { array, .. }
            | EventKind::Shift { array, .. }
            | EventKind::Insert { array, .. }
            | EventKind::Overwrite { array, .. }
            | EventKind::Push { array, .. }
            | EventKind::Pop { array, .. }
            | EventKind::Enqueue { array, .. }
            | EventKind::Dequeue { array, .. } => Some(SnapshotRef::Array(array)),
            EventKind::InsertNode { tree, .. } | EventKind::UpdateTree { tree, .. } => {
                Some(SnapshotRef::Tree(tree))
            }
            _ => None,
        }
    }
}

/// Contents after the last snapshot-bearing event of `events`
pub fn final_snapshot(events: &[Event]) -> Option<Container> {
    events
        .iter()
        .rev()
        .find_map(|e| e.kind.snapshot())
        .map(SnapshotRef::to_container)
}

/// Assigns strictly increasing ticks, starting at 0, in emission order
#[derive(Debug, Default)]
pub struct LogBuilder {
    events: Vec<Event>,
    tick: Tick,
}

impl LogBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn emit(&mut self, kind: EventKind, line: Option<u32>) {
        self.events.push(Event {
            t: self.tick,
            kind,
            line,
        });
        self.tick += 1;
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn finish(self) -> EventLog {
        self.events
    }
}

/// Single-event log reporting a rejected input
pub fn error_log(err: &ValidationError) -> EventLog {
    vec![Event {
        t: 0,
        kind: EventKind::Error {
            message: err.to_string(),
        },
        line: None,
    }]
}
