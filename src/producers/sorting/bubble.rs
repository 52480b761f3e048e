//! Bubble sort with early exit
//!
//! One visual step per adjacent pair: `compare`, an optional `swap`, then
//! `clear`.  Each outer pass ends with `markSortedEnd` for the slot that is now
//! final.

use crate::event::{EventKind, EventLog, EventType, LogBuilder};
use crate::producers::{check_values, reject, with_array, AlgorithmMeta, Producer};
use crate::snapshot::{Container, StructureKind};

pub const SOURCE: &[&str] = &[
    "fn bubble_sort(arr: &[f64]) -> Vec<f64> {",
    "    let mut a = arr.to_vec();",
    "    let mut swapped = true;",
    "    let mut i = 0;",
    "    while i + 1 < a.len() && swapped {",
    "        swapped = false;",
    "        for j in 0..a.len() - 1 - i {",
    "            if a[j] > a[j + 1] {",
    "                a.swap(j, j + 1);",
    "                swapped = true;",
    "            }",
    "        }",
    "        // a[len - 1 - i] is now in place",
    "        i += 1;",
    "    }",
    "    a",
    "}",
];

pub const META: AlgorithmMeta = AlgorithmMeta {
    id: "bubble-sort",
    name: "Bubble Sort",
    structure: StructureKind::Array,
    takes_operand: false,
    source: SOURCE,
    fallback_lines: &[
        (EventType::Init, 2),
        (EventType::Compare, 8),
        (EventType::Swap, 9),
        (EventType::MarkSortedEnd, 13),
        (EventType::Done, 16),
    ],
};

pub struct BubbleSort;

impl Producer for BubbleSort {
    fn produce(&self, input: &Container, _operand: Option<f64>) -> EventLog {
        with_array(input, bubble_sort)
    }
}

pub fn bubble_sort(values: &[f64]) -> EventLog {
    if let Err(err) = check_values(values) {
        return reject(&err);
    }

    let mut a = values.to_vec();
    let n = a.len();
    let mut log = LogBuilder::new();
    log.emit(
        EventKind::Init {
            data: Container::Array(a.clone()),
        },
        Some(2),
    );

    let mut swapped = true;
    let mut i = 0;
    while i + 1 < n && swapped {
        swapped = false;
        for j in 0..n - 1 - i {
            log.emit(
                EventKind::Compare {
                    i: j,
                    j: j + 1,
                    key: None,
                },
                Some(8),
            );
            if a[j] > a[j + 1] {
                a.swap(j, j + 1);
                swapped = true;
                log.emit(
                    EventKind::Swap {
                        i: j,
                        j: j + 1,
                        array: a.clone(),
                    },
                    Some(9),
                );
            }
            log.emit(EventKind::Clear, None);
        }
        log.emit(EventKind::MarkSortedEnd { index: n - 1 - i }, Some(13));
        i += 1;
    }

    log.emit(EventKind::Done, Some(16));
    log.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_early_exit_on_sorted_input() {
        let log = bubble_sort(&[1.0, 2.0, 3.0]);
        let types: Vec<_> = log.iter().map(|e| e.event_type()).collect();
        // one pass, no swaps, then stop
        assert_eq!(
            types,
            vec![
                EventType::Init,
                EventType::Compare,
                EventType::Clear,
                EventType::Compare,
                EventType::Clear,
                EventType::MarkSortedEnd,
                EventType::Done,
            ]
        );
    }

    #[test]
    fn test_single_element() {
        let log = bubble_sort(&[7.0]);
        assert_eq!(log.len(), 2);
        assert_eq!(log[1].event_type(), EventType::Done);
    }
}
