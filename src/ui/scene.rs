//! Renderer that folds delivered batches into a drawable scene
//!
//! [`Scene`] holds the contents currently on screen plus the transient
//! highlights the last few events asked for.  Mutation events carry full
//! snapshots, so the contents are always the ones the latest snapshot-bearing
//! event reported; highlights are cleared by `clear` and by terminal events.

use crate::event::{Event, EventKind, EventType};
use crate::playback::Renderer;
use crate::producers::AlgorithmMeta;
use crate::snapshot::{Container, NodeId, StructureKind};
use rustc_hash::FxHashSet;

/// How a status message should be presented
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Info,
    Success,
    Error,
}

#[derive(Debug, Clone)]
pub struct Scene {
    meta: AlgorithmMeta,
    /// Contents when the log was bound; restored by `clear`
    base: Container,
    contents: Container,

    compared: Option<(usize, usize)>,
    pivot: Option<usize>,
    subarray: Option<(usize, usize)>,
    sorted: FxHashSet<usize>,
    touched: FxHashSet<usize>,
    held_key: Option<f64>,

    current_node: Option<NodeId>,
    compared_node: Option<NodeId>,
    found_node: Option<NodeId>,
    new_node: Option<NodeId>,

    message: Option<(Tone, String)>,
    line: Option<u32>,
    last_event: Option<EventType>,
    finished: bool,
}

impl Scene {
    pub fn new(meta: AlgorithmMeta, base: Container) -> Self {
        Scene {
            meta,
            contents: base.clone(),
            base,
            compared: None,
            pivot: None,
            subarray: None,
            sorted: FxHashSet::default(),
            touched: FxHashSet::default(),
            held_key: None,
            current_node: None,
            compared_node: None,
            found_node: None,
            new_node: None,
            message: None,
            line: None,
            last_event: None,
            finished: false,
        }
    }

    /// Show a different algorithm's log, starting from `base`
    pub fn rebind(&mut self, meta: AlgorithmMeta, base: Container) {
        *self = Scene::new(meta, base);
    }

    pub fn apply(&mut self, event: &Event) {
        self.last_event = Some(event.event_type());
        if let Some(line) = self.meta.line_for(event) {
            self.line = Some(line);
        }

        match &event.kind {
            EventKind::Init { data } => {
                self.contents = data.clone();
                self.clear_highlights();
            }
            EventKind::Compare { i, j, key } => {
                self.compared = Some((*i, *j));
                self.held_key = *key;
            }
            EventKind::CompareWithPivot { j, p } => self.compared = Some((*j, *p)),
            EventKind::CompareNode { id, .. } => self.compared_node = Some(*id),

            EventKind::Swap { i, j, array } => {
                self.set_array(array, &[*i, *j]);
            }
            EventKind::Shift { to, array, .. } => self.set_array(array, &[*to]),
            EventKind::Insert { index, array, .. } => {
                self.set_array(array, &[*index]);
                self.held_key = None;
            }
            EventKind::Overwrite { k, array, .. } => self.set_array(array, &[*k]),
            EventKind::Push { index, value, array } => {
                self.set_array(array, &[*index]);
                self.say(Tone::Info, format!("Pushed {}", format_value(*value)));
            }
            EventKind::Pop { value, array, .. } => {
                self.set_array(array, &[]);
                self.say(Tone::Info, format!("Popped {}", format_value(*value)));
            }
            EventKind::Enqueue { index, value, array } => {
                self.set_array(array, &[*index]);
                self.say(Tone::Info, format!("Enqueued {}", format_value(*value)));
            }
            EventKind::Dequeue { value, array, .. } => {
                self.set_array(array, &[]);
                self.say(Tone::Info, format!("Dequeued {}", format_value(*value)));
            }

            EventKind::InsertNode { id, key, tree, .. } => {
                self.contents = Container::Tree(tree.clone());
                self.new_node = Some(*id);
                self.say(Tone::Info, format!("Inserted {}", format_value(*key)));
            }
            EventKind::UpdateTree { key, tree, .. } => {
                self.contents = Container::Tree(tree.clone());
                self.current_node = None;
                self.compared_node = None;
                self.say(Tone::Info, format!("Deleted {}", format_value(*key)));
            }

            EventKind::MarkSubarray { l, r } => self.subarray = Some((*l, *r)),
            EventKind::SetPivot { p, .. } => self.pivot = Some(*p),
            EventKind::MarkSortedEnd { index } | EventKind::MarkSortedIndex { index } => {
                self.sorted.insert(*index);
            }
            EventKind::MarkSortedPrefix { up_to } => self.sorted.extend(0..=*up_to),
            EventKind::SetCurrent { id } => self.current_node = Some(*id),

            EventKind::Clear => {
                self.compared = None;
                self.compared_node = None;
                self.touched.clear();
                self.held_key = None;
            }
            EventKind::Done => {
                self.clear_highlights();
                if self.meta.structure == StructureKind::Array {
                    self.sorted.extend(0..self.contents.len());
                }
                self.finish(Tone::Success, "Done".to_string());
            }
            EventKind::Found { id, key } => {
                self.found_node = Some(*id);
                self.current_node = None;
                self.compared_node = None;
                self.finish(Tone::Success, format!("Found {}", format_value(*key)));
            }
            EventKind::NotFound { key } => {
                self.current_node = None;
                self.compared_node = None;
                self.finish(Tone::Info, format!("{} not found", format_value(*key)));
            }
            EventKind::Error { message } => self.finish(Tone::Error, message.clone()),
        }
    }

    fn set_array(&mut self, array: &[f64], touched: &[usize]) {
        self.contents = Container::Array(array.to_vec());
        self.touched.clear();
        self.touched.extend(touched.iter().copied());
    }

    fn say(&mut self, tone: Tone, text: String) {
        self.message = Some((tone, text));
    }

    fn finish(&mut self, tone: Tone, text: String) {
        self.finished = true;
        if tone != Tone::Success || self.message.is_none() {
            self.say(tone, text);
        }
    }

    fn clear_highlights(&mut self) {
        self.compared = None;
        self.pivot = None;
        self.subarray = None;
        self.touched.clear();
        self.held_key = None;
        self.current_node = None;
        self.compared_node = None;
    }

    pub fn meta(&self) -> &AlgorithmMeta {
        &self.meta
    }

    pub fn contents(&self) -> &Container {
        &self.contents
    }

    pub fn compared(&self) -> Option<(usize, usize)> {
        self.compared
    }

    pub fn pivot(&self) -> Option<usize> {
        self.pivot
    }

    /// Range a divide-and-conquer sort is working on, inclusive
    pub fn subarray(&self) -> Option<(usize, usize)> {
        self.subarray
    }

    pub fn is_sorted(&self, index: usize) -> bool {
        self.sorted.contains(&index)
    }

    /// Written by the latest mutation
    pub fn is_touched(&self, index: usize) -> bool {
        self.touched.contains(&index)
    }

    pub fn held_key(&self) -> Option<f64> {
        self.held_key
    }

    pub fn current_node(&self) -> Option<NodeId> {
        self.current_node
    }

    pub fn compared_node(&self) -> Option<NodeId> {
        self.compared_node
    }

    pub fn found_node(&self) -> Option<NodeId> {
        self.found_node
    }

    pub fn new_node(&self) -> Option<NodeId> {
        self.new_node
    }

    pub fn message(&self) -> Option<(Tone, &str)> {
        self.message.as_ref().map(|(tone, text)| (*tone, text.as_str()))
    }

    /// 1-based display source line of the latest event
    pub fn line(&self) -> Option<u32> {
        self.line
    }

    pub fn last_event(&self) -> Option<EventType> {
        self.last_event
    }

    /// A terminal event has been applied
    pub fn is_finished(&self) -> bool {
        self.finished
    }
}

impl Renderer for Scene {
    fn render(&mut self, batch: &[Event]) {
        for event in batch {
            self.apply(event);
        }
    }

    fn clear(&mut self) {
        let base = std::mem::take(&mut self.base);
        self.rebind(self.meta, base);
    }
}

/// Whole numbers without a fractional part, everything else as-is
pub fn format_value(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::producers::sorting::bubble;

    #[test]
    fn test_format_value() {
        assert_eq!(format_value(3.0), "3");
        assert_eq!(format_value(-7.0), "-7");
        assert_eq!(format_value(2.5), "2.5");
    }

    #[test]
    fn test_clear_restores_base() {
        let base = Container::Array(vec![2.0, 1.0]);
        let mut scene = Scene::new(bubble::META, base.clone());
        scene.render(&bubble::bubble_sort(&[2.0, 1.0]));
        assert_eq!(scene.contents(), &Container::Array(vec![1.0, 2.0]));
        assert!(scene.is_finished());

        scene.clear();
        assert_eq!(scene.contents(), &base);
        assert!(!scene.is_finished());
        assert_eq!(scene.line(), None);
        assert!(!scene.is_sorted(0));
    }

    #[test]
    fn test_empty_batch_is_noop() {
        let mut scene = Scene::new(bubble::META, Container::Array(vec![2.0, 1.0]));
        let log = bubble::bubble_sort(&[2.0, 1.0]);
        scene.render(&log[..2]);
        let before = scene.compared();
        scene.render(&[]);
        assert_eq!(scene.compared(), before);
        assert_eq!(before, Some((0, 1)));
    }
}
