//! Queue producers (front = index 0, rear = end of the buffer)
//!
//! Strictly FIFO: enqueue appends at the rear, dequeue removes index 0 and
//! the remaining elements move one slot toward the front.  Each operation
//! returns `[enqueue|dequeue, clear]`; underflow and bad values are a single
//! `error` event.

use crate::errors::ValidationError;
use crate::event::{EventKind, EventLog, EventType, LogBuilder};
use crate::producers::{check_operand, check_values, reject, AlgorithmMeta, Producer};
use crate::snapshot::{Container, StructureKind};

pub const SOURCE: &[&str] = &[
    "fn enqueue(queue: &mut VecDeque<f64>, value: f64) {",
    "    queue.push_back(value);",
    "}",
    "",
    "fn dequeue(queue: &mut VecDeque<f64>) -> Option<f64> {",
    "    queue.pop_front()",
    "}",
];

const LINES: &[(EventType, u32)] = &[(EventType::Enqueue, 2), (EventType::Dequeue, 6)];

pub const ENQUEUE_META: AlgorithmMeta = AlgorithmMeta {
    id: "queue-enqueue",
    name: "Queue Enqueue",
    structure: StructureKind::Queue,
    takes_operand: true,
    source: SOURCE,
    fallback_lines: LINES,
};

pub const DEQUEUE_META: AlgorithmMeta = AlgorithmMeta {
    id: "queue-dequeue",
    name: "Queue Dequeue",
    structure: StructureKind::Queue,
    takes_operand: false,
    source: SOURCE,
    fallback_lines: LINES,
};

pub struct QueueEnqueue;
pub struct QueueDequeue;

impl Producer for QueueEnqueue {
    fn produce(&self, input: &Container, operand: Option<f64>) -> EventLog {
        let Some(queue) = input.as_array() else {
            return wrong_structure();
        };
        match operand {
            Some(value) => enqueue(queue, value),
            None => reject(&ValidationError::InvalidOperand { verb: "enqueue" }),
        }
    }
}

impl Producer for QueueDequeue {
    fn produce(&self, input: &Container, _operand: Option<f64>) -> EventLog {
        match input.as_array() {
            Some(queue) => dequeue(queue),
            None => wrong_structure(),
        }
    }
}

fn wrong_structure() -> EventLog {
    reject(&ValidationError::WrongStructure {
        expected: StructureKind::Queue,
    })
}

pub fn enqueue(queue: &[f64], value: f64) -> EventLog {
    let checked = check_operand(value, "enqueue").and_then(|v| check_values(queue).map(|_| v));
    let value = match checked {
        Ok(value) => value,
        Err(err) => return reject(&err),
    };

    let mut a = queue.to_vec();
    let index = a.len();
    a.push(value);

    let mut log = LogBuilder::new();
    log.emit(
        EventKind::Enqueue {
            index,
            value,
            array: a,
        },
        Some(2),
    );
    log.emit(EventKind::Clear, None);
    log.finish()
}

pub fn dequeue(queue: &[f64]) -> EventLog {
    if let Err(err) = check_values(queue) {
        return reject(&err);
    }
    let Some((&value, rest)) = queue.split_first() else {
        return reject(&ValidationError::QueueUnderflow);
    };

    let mut log = LogBuilder::new();
    log.emit(
        EventKind::Dequeue {
            from: 0,
            value,
            array: rest.to_vec(),
        },
        Some(6),
    );
    log.emit(EventKind::Clear, None);
    log.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dequeue_empty_underflows() {
        let log = dequeue(&[]);
        assert_eq!(
            log[0].kind,
            EventKind::Error {
                message: "Queue underflow (empty queue).".to_string()
            }
        );
    }

    #[test]
    fn test_fifo_order() {
        let log = dequeue(&[4.0, 5.0]);
        assert_eq!(
            log[0].kind,
            EventKind::Dequeue {
                from: 0,
                value: 4.0,
                array: vec![5.0]
            }
        );
    }
}
