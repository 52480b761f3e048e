//! Event log producers and the algorithm registry
//!
//! A producer maps an input snapshot (plus an optional numeric operand) to an
//! [`EventLog`].  Producers are pure: they copy their input before working on
//! it, keep no state between calls, and return byte-identical logs for
//! identical inputs.
//!
//! # Failure channel
//!
//! Producers never return `Err` for expected domain conditions.  Invalid input
//! yields a one-event log holding an `error` event (see [`ValidationError`]);
//! a search or delete miss ends the log with `notFound`.
//!
//! # Modules
//!
//! - [`sorting`]: bubble, insertion, merge and quick sort
//! - [`bst`]: binary search tree insert, search and delete
//! - [`stack`]: push and pop (top = end of the buffer)
//! - [`queue`]: enqueue and dequeue (front = index 0)
//!
//! # Registry
//!
//! [`Registry`] maps a stable algorithm id to its producer and its
//! instructional metadata ([`AlgorithmMeta`]): the display source shown in the
//! code pane and a fallback event-type → line table for events that carry no
//! line hint.  New algorithms are added with [`Registry::register`]; existing
//! producers never change.

pub mod bst;
pub mod queue;
pub mod sorting;
pub mod stack;

use crate::errors::ValidationError;
use crate::event::{error_log, Event, EventKind, EventLog, EventType, LogBuilder};
use crate::snapshot::{Container, StructureKind};
use std::ops::Index;
use tracing::debug;

/// One capability: turn an input snapshot into an event log
pub trait Producer {
    fn produce(&self, input: &Container, operand: Option<f64>) -> EventLog;
}

impl<F> Producer for F
where
    F: Fn(&Container, Option<f64>) -> EventLog,
{
    fn produce(&self, input: &Container, operand: Option<f64>) -> EventLog {
        self(input, operand)
    }
}

/// Static instructional data attached to a registered algorithm
#[derive(Debug, Clone, Copy)]
pub struct AlgorithmMeta {
    /// Stable identifier, e.g. `"bubble-sort"`
    pub id: &'static str,
    pub name: &'static str,
    pub structure: StructureKind,
    /// Whether the producer needs a key / value operand
    pub takes_operand: bool,
    /// Display source, one entry per line (line hints are 1-based)
    pub source: &'static [&'static str],
    pub fallback_lines: &'static [(EventType, u32)],
}

impl AlgorithmMeta {
    /// Source line to highlight for `event`: its own hint, else the fallback
    pub fn line_for(&self, event: &Event) -> Option<u32> {
        event.line.or_else(|| {
            let event_type = event.event_type();
            self.fallback_lines
                .iter()
                .find(|(t, _)| *t == event_type)
                .map(|(_, line)| *line)
        })
    }
}

/// A registered producer with its metadata
pub struct Algorithm {
    meta: AlgorithmMeta,
    producer: Box<dyn Producer>,
}

impl Algorithm {
    pub fn meta(&self) -> &AlgorithmMeta {
        &self.meta
    }

    pub fn produce(&self, input: &Container, operand: Option<f64>) -> EventLog {
        let log = self.producer.produce(input, operand);
        debug!(
            algorithm = self.meta.id,
            events = log.len(),
            "produced event log"
        );
        log
    }
}

impl std::fmt::Debug for Algorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Algorithm").field("meta", &self.meta).finish()
    }
}

/// Ordered collection of algorithms keyed by id
#[derive(Debug)]
pub struct Registry {
    algorithms: Vec<Algorithm>,
}

impl Registry {
    /// An empty registry
    pub fn new() -> Self {
        Registry {
            algorithms: Vec::new(),
        }
    }

    /// Every algorithm shipped with the crate, in menu order
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        registry.register(sorting::bubble::META, sorting::bubble::BubbleSort);
        registry.register(sorting::insertion::META, sorting::insertion::InsertionSort);
        registry.register(sorting::merge::META, sorting::merge::MergeSort);
        registry.register(sorting::quick::META, sorting::quick::QuickSort);
        registry.register(bst::INSERT_META, bst::BstInsert);
        registry.register(bst::SEARCH_META, bst::BstSearch);
        registry.register(bst::DELETE_META, bst::BstDelete);
        registry.register(stack::PUSH_META, stack::StackPush);
        registry.register(stack::POP_META, stack::StackPop);
        registry.register(queue::ENQUEUE_META, queue::QueueEnqueue);
        registry.register(queue::DEQUEUE_META, queue::QueueDequeue);
        registry
    }

    /// Add an algorithm, replacing any existing entry with the same id
    pub fn register(&mut self, meta: AlgorithmMeta, producer: impl Producer + 'static) {
        let algorithm = Algorithm {
            meta,
            producer: Box::new(producer),
        };
        match self.position(meta.id) {
            Some(index) => self.algorithms[index] = algorithm,
            None => self.algorithms.push(algorithm),
        }
    }

    pub fn get(&self, id: &str) -> Option<&Algorithm> {
        self.algorithms.iter().find(|a| a.meta.id == id)
    }

    pub fn get_index(&self, index: usize) -> Option<&Algorithm> {
        self.algorithms.get(index)
    }

    pub fn position(&self, id: &str) -> Option<usize> {
        self.algorithms.iter().position(|a| a.meta.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Algorithm> {
        self.algorithms.iter()
    }

    pub fn ids(&self) -> Vec<&'static str> {
        self.algorithms.iter().map(|a| a.meta.id).collect()
    }

    pub fn len(&self) -> usize {
        self.algorithms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.algorithms.is_empty()
    }
}

impl Index<usize> for Registry {
    type Output = Algorithm;

    fn index(&self, index: usize) -> &Algorithm {
        &self.algorithms[index]
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Single-event log that shows `data` as-is
pub fn init_log(data: &Container) -> EventLog {
    let checked = match data {
        Container::Array(values) => check_values(values),
        Container::Tree(tree) => tree.validate().map_err(ValidationError::from),
    };
    if let Err(err) = checked {
        return reject(&err);
    }
    let mut log = LogBuilder::new();
    log.emit(EventKind::Init { data: data.clone() }, None);
    log.finish()
}

/// Log a rejected input and build its one-event log
pub(crate) fn reject(err: &ValidationError) -> EventLog {
    debug!(%err, "rejected producer input");
    error_log(err)
}

pub(crate) fn check_values(values: &[f64]) -> Result<(), ValidationError> {
    match values.iter().position(|v| !v.is_finite()) {
        Some(index) => Err(ValidationError::InvalidValue { index }),
        None => Ok(()),
    }
}

pub(crate) fn check_operand(operand: f64, verb: &'static str) -> Result<f64, ValidationError> {
    if operand.is_finite() {
        Ok(operand)
    } else {
        Err(ValidationError::InvalidOperand { verb })
    }
}

/// Run `f` on the input array, or reject a tree input
pub(crate) fn with_array(input: &Container, f: impl FnOnce(&[f64]) -> EventLog) -> EventLog {
    match input.as_array() {
        Some(values) => f(values),
        None => reject(&ValidationError::WrongStructure {
            expected: StructureKind::Array,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_ids_are_unique() {
        let registry = Registry::builtin();
        let mut ids = registry.ids();
        let total = ids.len();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), total);
        assert_eq!(total, 11);
    }

    #[test]
    fn test_register_replaces_same_id() {
        let mut registry = Registry::builtin();
        let before = registry.len();
        registry.register(sorting::bubble::META, |_: &Container, _: Option<f64>| {
            EventLog::new()
        });
        assert_eq!(registry.len(), before);
        let log = registry
            .get("bubble-sort")
            .unwrap()
            .produce(&Container::Array(vec![2.0, 1.0]), None);
        assert!(log.is_empty());
    }

    #[test]
    fn test_line_hints_point_into_source() {
        let registry = Registry::builtin();
        for algorithm in registry.iter() {
            let meta = algorithm.meta();
            for (_, line) in meta.fallback_lines {
                assert!(
                    (*line as usize) >= 1 && (*line as usize) <= meta.source.len(),
                    "{}: line {} outside source",
                    meta.id,
                    line
                );
            }
        }
    }

    #[test]
    fn test_fallback_line_used_without_hint() {
        let meta = sorting::bubble::META;
        let event = Event {
            t: 0,
            kind: EventKind::Done,
            line: None,
        };
        assert_eq!(meta.line_for(&event), Some(16));
    }

    #[test]
    fn test_init_log_rejects_nan() {
        let log = init_log(&Container::Array(vec![1.0, f64::NAN]));
        assert_eq!(log.len(), 1);
        assert_eq!(
            log[0].kind,
            EventKind::Error {
                message: "Value at index 1 is not a number.".to_string()
            }
        );
    }

    #[test]
    fn test_tree_input_rejected_by_sort() {
        let log = Registry::builtin()
            .get("merge-sort")
            .unwrap()
            .produce(&Container::Tree(Default::default()), None);
        assert_eq!(log.len(), 1);
        assert_eq!(log[0].event_type(), EventType::Error);
    }
}
