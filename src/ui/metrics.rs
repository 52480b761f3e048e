//! Operation counters fed by the animator's observation channel

use crate::event::{Event, EventType};
use crate::playback::Observer;

/// Counts of what has been delivered since the last reset
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Metrics {
    /// Every delivered event except `init` and `clear`
    pub ops: u64,
    pub comparisons: u64,
    pub swaps: u64,
    /// Mutations other than swaps
    pub writes: u64,
}

impl Metrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn record(&mut self, event: &Event) {
        let event_type = event.event_type();
        if matches!(event_type, EventType::Init | EventType::Clear) {
            return;
        }
        self.ops += 1;
        if event_type.is_comparison() {
            self.comparisons += 1;
        } else if event_type == EventType::Swap {
            self.swaps += 1;
        } else if event_type.is_mutation() {
            self.writes += 1;
        }
    }
}

impl Observer for Metrics {
    fn observe(&mut self, time: f64, batch: &[Event]) {
        // (0, []) is only ever reported by a reset
        if time == 0.0 && batch.is_empty() {
            self.reset();
            return;
        }
        for event in batch {
            self.record(event);
        }
    }
}
