//! Quick sort with Lomuto partitioning
//!
//! The pivot is the last element of the range.  Each scanned element gets a
//! `compareWithPivot`, then either a `swap` into the `<= pivot` region or
//! nothing, and a `clear`.  The pivot is swapped into place and locked with
//! `markSortedIndex`.
//!
//! Only non-empty ranges recurse, so every `markSubarray` has `l <= r`.

use crate::event::{EventKind, EventLog, EventType, LogBuilder};
use crate::producers::{check_values, reject, with_array, AlgorithmMeta, Producer};
use crate::snapshot::{Container, StructureKind};

pub const SOURCE: &[&str] = &[
    "fn quick_sort(arr: &[f64]) -> Vec<f64> {",
    "    let mut a = arr.to_vec();",
    "    sort(&mut a, 0, a.len() - 1);",
    "    a",
    "}",
    "",
    "fn sort(a: &mut [f64], low: usize, high: usize) {",
    "    if low >= high { return; }",
    "    let p = partition(a, low, high);",
    "    sort(a, low, p - 1);",
    "    sort(a, p + 1, high);",
    "}",
    "",
    "fn partition(a: &mut [f64], low: usize, high: usize) -> usize {",
    "    let pivot = a[high];",
    "    let mut i = low;",
    "    for j in low..high {",
    "        if a[j] <= pivot {",
    "            a.swap(i, j);",
    "            i += 1;",
    "        }",
    "    }",
    "    a.swap(i, high);",
    "    i",
    "}",
];

pub const META: AlgorithmMeta = AlgorithmMeta {
    id: "quick-sort",
    name: "Quick Sort",
    structure: StructureKind::Array,
    takes_operand: false,
    source: SOURCE,
    fallback_lines: &[
        (EventType::Init, 2),
        (EventType::MarkSubarray, 8),
        (EventType::SetPivot, 15),
        (EventType::CompareWithPivot, 18),
        (EventType::Swap, 19),
        (EventType::MarkSortedIndex, 24),
        (EventType::Done, 4),
    ],
};

pub struct QuickSort;

impl Producer for QuickSort {
    fn produce(&self, input: &Container, _operand: Option<f64>) -> EventLog {
        with_array(input, quick_sort)
    }
}

pub fn quick_sort(values: &[f64]) -> EventLog {
    if let Err(err) = check_values(values) {
        return reject(&err);
    }

    let mut run = QuickRun {
        a: values.to_vec(),
        log: LogBuilder::new(),
    };
    run.log.emit(
        EventKind::Init {
            data: Container::Array(run.a.clone()),
        },
        Some(2),
    );

    if !run.a.is_empty() {
        run.sort(0, run.a.len() - 1);
    }

    run.log.emit(EventKind::Done, Some(4));
    run.log.finish()
}

struct QuickRun {
    a: Vec<f64>,
    log: LogBuilder,
}

impl QuickRun {
    fn sort(&mut self, low: usize, high: usize) {
        self.log
            .emit(EventKind::MarkSubarray { l: low, r: high }, Some(8));
        if low >= high {
            return;
        }
        let p = self.partition(low, high);
        if p > low {
            self.sort(low, p - 1);
        }
        if p < high {
            self.sort(p + 1, high);
        }
    }

    fn partition(&mut self, low: usize, high: usize) -> usize {
        self.log
            .emit(EventKind::MarkSubarray { l: low, r: high }, Some(14));

        let pivot = self.a[high];
        self.log.emit(
            EventKind::SetPivot {
                p: high,
                value: pivot,
            },
            Some(15),
        );

        let mut i = low;
        for j in low..high {
            self.log
                .emit(EventKind::CompareWithPivot { j, p: high }, Some(18));
            if self.a[j] <= pivot {
                if i != j {
                    self.swap(i, j, 19);
                }
                i += 1;
            }
            self.log.emit(EventKind::Clear, None);
        }

        if i != high {
            self.swap(i, high, 23);
        }
        self.log.emit(EventKind::MarkSortedIndex { index: i }, Some(24));
        i
    }

    fn swap(&mut self, i: usize, j: usize, line: u32) {
        self.a.swap(i, j);
        self.log.emit(
            EventKind::Swap {
                i,
                j,
                array: self.a.clone(),
            },
            Some(line),
        );
    }
}
