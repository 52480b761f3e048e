//! Insertion sort
//!
//! For each index the held key is compared against the sorted prefix; larger
//! elements `shift` right one slot at a time and the key is then `insert`ed
//! into the hole.  `markSortedPrefix` closes each outer iteration.

use crate::event::{EventKind, EventLog, EventType, LogBuilder};
use crate::producers::{check_values, reject, with_array, AlgorithmMeta, Producer};
use crate::snapshot::{Container, StructureKind};

pub const SOURCE: &[&str] = &[
    "fn insertion_sort(arr: &[f64]) -> Vec<f64> {",
    "    let mut a = arr.to_vec();",
    "    for i in 1..a.len() {",
    "        let key = a[i];",
    "        let mut j = i as isize - 1;",
    "        while j >= 0 && a[j] > key {",
    "            a[j + 1] = a[j];",
    "            j -= 1;",
    "        }",
    "        a[j + 1] = key;",
    "        // a[0..=i] is sorted",
    "    }",
    "    a",
    "}",
];

pub const META: AlgorithmMeta = AlgorithmMeta {
    id: "insertion-sort",
    name: "Insertion Sort",
    structure: StructureKind::Array,
    takes_operand: false,
    source: SOURCE,
    fallback_lines: &[
        (EventType::Init, 2),
        (EventType::Compare, 6),
        (EventType::Shift, 7),
        (EventType::Insert, 10),
        (EventType::MarkSortedPrefix, 11),
        (EventType::Done, 13),
    ],
};

pub struct InsertionSort;

impl Producer for InsertionSort {
    fn produce(&self, input: &Container, _operand: Option<f64>) -> EventLog {
        with_array(input, insertion_sort)
    }
}

pub fn insertion_sort(values: &[f64]) -> EventLog {
    if let Err(err) = check_values(values) {
        return reject(&err);
    }

    let mut a = values.to_vec();
    let mut log = LogBuilder::new();
    log.emit(
        EventKind::Init {
            data: Container::Array(a.clone()),
        },
        Some(2),
    );

    for i in 1..a.len() {
        let key = a[i];
        log.emit(EventKind::Clear, None);
        log.emit(
            EventKind::Compare {
                i,
                j: i - 1,
                key: Some(key),
            },
            Some(4),
        );

        // `hole` is the slot the key would land in; a[hole - 1] is the
        // element currently compared against.
        let mut hole = i;
        while hole > 0 && a[hole - 1] > key {
            log.emit(
                EventKind::Compare {
                    i,
                    j: hole - 1,
                    key: Some(key),
                },
                Some(6),
            );
            a[hole] = a[hole - 1];
            log.emit(
                EventKind::Shift {
                    from: hole - 1,
                    to: hole,
                    array: a.clone(),
                },
                Some(7),
            );
            hole -= 1;
            log.emit(EventKind::Clear, Some(8));
        }

        a[hole] = key;
        log.emit(
            EventKind::Insert {
                index: hole,
                value: key,
                array: a.clone(),
            },
            Some(10),
        );
        log.emit(EventKind::MarkSortedPrefix { up_to: i }, Some(11));
    }

    log.emit(EventKind::Done, Some(13));
    log.finish()
}
