//! Stack producers (top of stack = end of the buffer)
//!
//! Each operation returns `[push|pop, clear]`.  Pop on an empty stack and a
//! missing or non-numeric push value are rejected with a single `error`
//! event; the input buffer is never touched either way.

use crate::errors::ValidationError;
use crate::event::{EventKind, EventLog, EventType, LogBuilder};
use crate::producers::{check_operand, check_values, reject, AlgorithmMeta, Producer};
use crate::snapshot::{Container, StructureKind};

pub const SOURCE: &[&str] = &[
    "fn push(stack: &mut Vec<f64>, value: f64) {",
    "    stack.push(value);",
    "}",
    "",
    "fn pop(stack: &mut Vec<f64>) -> Option<f64> {",
    "    stack.pop()",
    "}",
];

const LINES: &[(EventType, u32)] = &[(EventType::Push, 2), (EventType::Pop, 6)];

pub const PUSH_META: AlgorithmMeta = AlgorithmMeta {
    id: "stack-push",
    name: "Stack Push",
    structure: StructureKind::Stack,
    takes_operand: true,
    source: SOURCE,
    fallback_lines: LINES,
};

pub const POP_META: AlgorithmMeta = AlgorithmMeta {
    id: "stack-pop",
    name: "Stack Pop",
    structure: StructureKind::Stack,
    takes_operand: false,
    source: SOURCE,
    fallback_lines: LINES,
};

pub struct StackPush;
pub struct StackPop;

impl Producer for StackPush {
    fn produce(&self, input: &Container, operand: Option<f64>) -> EventLog {
        let Some(stack) = input.as_array() else {
            return wrong_structure();
        };
        match operand {
            Some(value) => push(stack, value),
            None => reject(&ValidationError::InvalidOperand { verb: "push" }),
        }
    }
}

impl Producer for StackPop {
    fn produce(&self, input: &Container, _operand: Option<f64>) -> EventLog {
        match input.as_array() {
            Some(stack) => pop(stack),
            None => wrong_structure(),
        }
    }
}

fn wrong_structure() -> EventLog {
    reject(&ValidationError::WrongStructure {
        expected: StructureKind::Stack,
    })
}

pub fn push(stack: &[f64], value: f64) -> EventLog {
    let checked = check_operand(value, "push").and_then(|v| check_values(stack).map(|_| v));
    let value = match checked {
        Ok(value) => value,
        Err(err) => return reject(&err),
    };

    let mut a = stack.to_vec();
    let index = a.len();
    a.push(value);

    let mut log = LogBuilder::new();
    log.emit(
        EventKind::Push {
            index,
            value,
            array: a,
        },
        Some(2),
    );
    log.emit(EventKind::Clear, None);
    log.finish()
}

pub fn pop(stack: &[f64]) -> EventLog {
    if let Err(err) = check_values(stack) {
        return reject(&err);
    }

    let mut a = stack.to_vec();
    let Some(value) = a.pop() else {
        return reject(&ValidationError::StackUnderflow);
    };
    let index = a.len();

    let mut log = LogBuilder::new();
    log.emit(
        EventKind::Pop {
            index,
            value,
            array: a,
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
    fn test_pop_removes_top() {
        let log = pop(&[1.0, 2.0, 3.0]);
        assert_eq!(
            log[0].kind,
            EventKind::Pop {
                index: 2,
                value: 3.0,
                array: vec![1.0, 2.0]
            }
        );
        assert_eq!(log[1].kind, EventKind::Clear);
    }

    #[test]
    fn test_push_appends_at_top() {
        let log = push(&[1.0], 4.0);
        assert_eq!(
            log[0].kind,
            EventKind::Push {
                index: 1,
                value: 4.0,
                array: vec![1.0, 4.0]
            }
        );
    }

    #[test]
    fn test_push_infinite_rejected() {
        let log = push(&[], f64::INFINITY);
        assert_eq!(log.len(), 1);
        assert_eq!(log[0].event_type(), EventType::Error);
    }
}
