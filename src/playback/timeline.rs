//! Tick-indexed read access over one event log

use crate::event::{Event, EventLog, Tick};
use tracing::trace;

/// One fixed event log plus a forward-only read cursor.
///
/// Events are sorted by tick on construction; the sort is stable, so events
/// sharing a tick keep their emission order.
#[derive(Debug, Clone, Default)]
pub struct Timeline {
    events: EventLog,
    /// Index of the next unread event
    cursor: usize,
    /// Integer tick most recently served; `None` before the first `next`
    last_tick: Option<i64>,
}

impl Timeline {
    pub fn new(mut events: EventLog) -> Self {
        events.sort_by_key(|e| e.t);
        Timeline {
            events,
            cursor: 0,
            last_tick: None,
        }
    }

    /// Serve every unread event with tick `<= floor(now)`.
    ///
    /// Only crossing into a new integer tick serves anything: a second call
    /// within the same tick returns an empty batch, so callers may poll at
    /// sub-tick granularity without double delivery.
    pub fn next(&mut self, now: f64) -> &[Event] {
        let tick = floor_tick(now);
        if self.last_tick == Some(tick) {
            return &[];
        }
        self.last_tick = Some(tick);

        let start = self.cursor;
        while let Some(event) = self.events.get(self.cursor) {
            if tick_as_i64(event.t) > tick {
                break;
            }
            self.cursor += 1;
        }
        if self.cursor > start {
            trace!(tick, served = self.cursor - start, "timeline batch");
        }
        &self.events[start..self.cursor]
    }

    /// Reposition the cursor at the first event with tick `>= tick`.
    ///
    /// The served-tick marker is set just below `tick`, so a following
    /// `next(tick)` (or later) serves everything from there on.
    pub fn seek(&mut self, tick: Tick) {
        self.cursor = self.events.partition_point(|e| e.t < tick);
        self.last_tick = Some(tick_as_i64(tick) - 1);
        trace!(tick, cursor = self.cursor, "timeline seek");
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Index of the next unread event
    pub fn position(&self) -> usize {
        self.cursor
    }

    /// Tick of the last event, `None` for an empty log
    pub fn end_tick(&self) -> Option<Tick> {
        self.events.last().map(|e| e.t)
    }

    /// Whether every event has been served
    pub fn is_exhausted(&self) -> bool {
        self.cursor >= self.events.len()
    }
}

// `as` saturates, and NaN maps to 0; logical time is always finite here.
fn floor_tick(now: f64) -> i64 {
    now.floor() as i64
}

fn tick_as_i64(tick: Tick) -> i64 {
    i64::try_from(tick).unwrap_or(i64::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::EventKind;

    fn event(t: Tick) -> Event {
        Event {
            t,
            kind: EventKind::Clear,
            line: None,
        }
    }

    #[test]
    fn test_sorts_on_construction() {
        let timeline = Timeline::new(vec![event(2), event(0), event(1)]);
        let ticks: Vec<_> = timeline.events().iter().map(|e| e.t).collect();
        assert_eq!(ticks, vec![0, 1, 2]);
    }

    #[test]
    fn test_equal_ticks_keep_emission_order() {
        let mut first = event(1);
        first.line = Some(10);
        let mut second = event(1);
        second.line = Some(20);
        let timeline = Timeline::new(vec![first, event(0), second]);

        let lines: Vec<_> = timeline.events().iter().map(|e| e.line).collect();
        assert_eq!(lines, vec![None, Some(10), Some(20)]);
    }

    #[test]
    fn test_sub_tick_calls_serve_once() {
        let mut timeline = Timeline::new(vec![event(0), event(1)]);
        assert_eq!(timeline.next(0.2).len(), 1);
        assert!(timeline.next(0.7).is_empty());
        assert_eq!(timeline.next(1.0).len(), 1);
        assert!(timeline.is_exhausted());
    }

    #[test]
    fn test_empty_log_never_yields() {
        let mut timeline = Timeline::new(Vec::new());
        assert!(timeline.next(10.0).is_empty());
        assert_eq!(timeline.end_tick(), None);
    }

    #[test]
    fn test_seek_past_end() {
        let mut timeline = Timeline::new(vec![event(0), event(1)]);
        timeline.seek(9);
        assert_eq!(timeline.position(), 2);
        assert!(timeline.next(20.0).is_empty());
    }
}
