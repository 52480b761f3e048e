//! Algorithm selection and the input each structure carries between runs
//!
//! Every structure kind keeps its own current contents.  Sorting never
//! changes the stored array, while a completed stack, queue or tree operation
//! stores its resulting container so the next operation starts from it: a
//! tree grows insert by insert, a stack push by push.

use crate::errors::AppError;
use crate::event::{final_snapshot, Event, EventLog, EventType};
use crate::input::{build_input, random_input};
use crate::producers::{Algorithm, AlgorithmMeta, Registry};
use crate::snapshot::{Container, StructureKind};
use rand::rngs::StdRng;
use rustc_hash::FxHashMap;
use tracing::{debug, info};

const KINDS: [StructureKind; 4] = [
    StructureKind::Array,
    StructureKind::Stack,
    StructureKind::Queue,
    StructureKind::Tree,
];

pub struct Session {
    registry: Registry,
    selected: usize,
    inputs: FxHashMap<StructureKind, Container>,
    rng: StdRng,
    size: usize,
}

impl Session {
    /// Start on `algorithm_id`.
    ///
    /// With `values`, every structure starts from them; otherwise each
    /// structure gets `size` random elements from `rng`.
    pub fn new(
        registry: Registry,
        algorithm_id: &str,
        values: Option<&[f64]>,
        size: usize,
        mut rng: StdRng,
    ) -> Result<Self, AppError> {
        let selected = registry
            .position(algorithm_id)
            .ok_or_else(|| AppError::UnknownAlgorithm {
                id: algorithm_id.to_string(),
                known: registry.ids().join(", "),
            })?;

        let inputs = KINDS
            .iter()
            .map(|&kind| {
                let input = match values {
                    Some(values) => build_input(kind, values),
                    None => random_input(&mut rng, kind, size),
                };
                (kind, input)
            })
            .collect();

        Ok(Session {
            registry,
            selected,
            inputs,
            rng,
            size,
        })
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn algorithm(&self) -> &Algorithm {
        &self.registry[self.selected]
    }

    pub fn meta(&self) -> &AlgorithmMeta {
        self.algorithm().meta()
    }

    pub fn structure(&self) -> StructureKind {
        self.meta().structure
    }

    /// Index of the selected algorithm in registry order
    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn select(&mut self, id: &str) -> Result<(), AppError> {
        self.selected = self
            .registry
            .position(id)
            .ok_or_else(|| AppError::UnknownAlgorithm {
                id: id.to_string(),
                known: self.registry.ids().join(", "),
            })?;
        info!(algorithm = id, "algorithm selected");
        Ok(())
    }

    /// Select the next algorithm, wrapping around
    pub fn select_next(&mut self) {
        self.selected = (self.selected + 1) % self.registry.len();
        info!(algorithm = self.meta().id, "algorithm selected");
    }

    /// Select the previous algorithm, wrapping around
    pub fn select_prev(&mut self) {
        let len = self.registry.len();
        self.selected = (self.selected + len - 1) % len;
        info!(algorithm = self.meta().id, "algorithm selected");
    }

    /// Current contents of the selected algorithm's structure
    pub fn input(&self) -> Container {
        self.inputs
            .get(&self.structure())
            .cloned()
            .unwrap_or_else(|| build_input(self.structure(), &[]))
    }

    /// Produce the selected algorithm's log for the current input
    pub fn run(&self, operand: Option<f64>) -> EventLog {
        self.algorithm().produce(&self.input(), operand)
    }

    /// Store the outcome of a completed structural operation.
    ///
    /// Returns whether the stored input changed.  Sorts, rejected inputs and
    /// logs without a snapshot leave the input alone.
    pub fn apply(&mut self, log: &[Event]) -> bool {
        let structure = self.structure();
        if structure == StructureKind::Array
            || log.iter().any(|e| e.event_type() == EventType::Error)
        {
            return false;
        }
        let Some(result) = final_snapshot(log) else {
            return false;
        };
        debug!(%structure, len = result.len(), "stored operation result");
        let changed = self.inputs.get(&structure) != Some(&result);
        self.inputs.insert(structure, result);
        changed
    }

    /// Replace the current structure's contents with fresh random input
    pub fn randomize(&mut self) {
        let structure = self.structure();
        let input = random_input(&mut self.rng, structure, self.size);
        info!(%structure, len = input.len(), "randomized input");
        self.inputs.insert(structure, input);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn session(id: &str, values: &[f64]) -> Session {
        Session::new(
            Registry::builtin(),
            id,
            Some(values),
            8,
            StdRng::seed_from_u64(0),
        )
        .unwrap()
    }

    #[test]
    fn test_unknown_algorithm() {
        let result = Session::new(
            Registry::builtin(),
            "bogo-sort",
            None,
            8,
            StdRng::seed_from_u64(0),
        );
        assert!(matches!(result, Err(AppError::UnknownAlgorithm { .. })));
    }

    #[test]
    fn test_push_result_feeds_next_push() {
        let mut session = session("stack-push", &[]);
        let log = session.run(Some(1.0));
        assert!(session.apply(&log));
        let log = session.run(Some(2.0));
        session.apply(&log);
        assert_eq!(session.input(), Container::Array(vec![1.0, 2.0]));
    }

    #[test]
    fn test_sort_leaves_input() {
        let mut session = session("bubble-sort", &[2.0, 1.0]);
        let log = session.run(None);
        assert!(!session.apply(&log));
        assert_eq!(session.input(), Container::Array(vec![2.0, 1.0]));
    }

    #[test]
    fn test_error_leaves_input() {
        let mut session = session("stack-pop", &[]);
        let log = session.run(None);
        assert!(!session.apply(&log));
        assert!(session.input().is_empty());
    }

    #[test]
    fn test_selection_wraps() {
        let mut session = session("bubble-sort", &[]);
        session.select_prev();
        assert_eq!(session.meta().id, "queue-dequeue");
        session.select_next();
        assert_eq!(session.meta().id, "bubble-sort");
    }
}
