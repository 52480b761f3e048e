//! Top-down merge sort
//!
//! Every recursive call focuses its range with `markSubarray`.  A merge step
//! copies the range into a scratch buffer, then writes back with `overwrite`:
//! head-to-head steps are bracketed as `compare`, `overwrite`, `clear`; the
//! leftover tail of either run is copied with bare `overwrite`s.  Ties are
//! taken from the left run, so the sort is stable.

use crate::event::{EventKind, EventLog, EventType, LogBuilder};
use crate::producers::{check_values, reject, with_array, AlgorithmMeta, Producer};
use crate::snapshot::{Container, StructureKind};

pub const SOURCE: &[&str] = &[
    "fn merge_sort(arr: &[f64]) -> Vec<f64> {",
    "    let mut a = arr.to_vec();",
    "    let mut temp = vec![0; a.len()];",
    "    sort(&mut a, &mut temp, 0, a.len() - 1);",
    "    a",
    "}",
    "",
    "fn sort(a: &mut [f64], temp: &mut [f64], l: usize, r: usize) {",
    "    if l >= r { return; }",
    "    let m = (l + r) / 2;",
    "    sort(a, temp, l, m);",
    "    sort(a, temp, m + 1, r);",
    "    merge(a, temp, l, m, r);",
    "}",
    "",
    "fn merge(a: &mut [f64], temp: &mut [f64], l: usize, m: usize, r: usize) {",
    "    temp[l..=r].copy_from_slice(&a[l..=r]);",
    "    let (mut i, mut j) = (l, m + 1);",
    "    for k in l..=r {",
    "        if j > r || (i <= m && temp[i] <= temp[j]) {",
    "            a[k] = temp[i]; i += 1;",
    "        } else {",
    "            a[k] = temp[j]; j += 1;",
    "        }",
    "    }",
    "}",
];

const LINE_MARK: u32 = 9;
const LINE_COMPARE: u32 = 20;
const LINE_TAKE_LEFT: u32 = 21;
const LINE_TAKE_RIGHT: u32 = 23;

pub const META: AlgorithmMeta = AlgorithmMeta {
    id: "merge-sort",
    name: "Merge Sort",
    structure: StructureKind::Array,
    takes_operand: false,
    source: SOURCE,
    fallback_lines: &[
        (EventType::Init, 2),
        (EventType::MarkSubarray, LINE_MARK),
        (EventType::Compare, LINE_COMPARE),
        (EventType::Overwrite, LINE_TAKE_LEFT),
        (EventType::Done, 5),
    ],
};

pub struct MergeSort;

impl Producer for MergeSort {
    fn produce(&self, input: &Container, _operand: Option<f64>) -> EventLog {
        with_array(input, merge_sort)
    }
}

pub fn merge_sort(values: &[f64]) -> EventLog {
    if let Err(err) = check_values(values) {
        return reject(&err);
    }

    let mut run = MergeRun {
        a: values.to_vec(),
        temp: values.to_vec(),
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

    run.log.emit(EventKind::Done, Some(5));
    run.log.finish()
}

/// Working state for one merge sort run
struct MergeRun {
    a: Vec<f64>,
    temp: Vec<f64>,
    log: LogBuilder,
}

impl MergeRun {
    fn sort(&mut self, l: usize, r: usize) {
        self.log.emit(EventKind::MarkSubarray { l, r }, Some(LINE_MARK));
        if l >= r {
            return;
        }
        let m = l + (r - l) / 2;
        self.sort(l, m);
        self.sort(m + 1, r);
        self.merge(l, m, r);
    }

    fn merge(&mut self, l: usize, m: usize, r: usize) {
        self.temp[l..=r].copy_from_slice(&self.a[l..=r]);
        let (mut i, mut j, mut k) = (l, m + 1, l);

        while i <= m && j <= r {
            self.log
                .emit(EventKind::Compare { i, j, key: None }, Some(LINE_COMPARE));
            if self.temp[i] <= self.temp[j] {
                self.write(k, self.temp[i], LINE_TAKE_LEFT);
                i += 1;
            } else {
                self.write(k, self.temp[j], LINE_TAKE_RIGHT);
                j += 1;
            }
            k += 1;
            self.log.emit(EventKind::Clear, None);
        }

        while i <= m {
            self.write(k, self.temp[i], LINE_TAKE_LEFT);
            i += 1;
            k += 1;
        }
        while j <= r {
            self.write(k, self.temp[j], LINE_TAKE_RIGHT);
            j += 1;
            k += 1;
        }
    }

    fn write(&mut self, k: usize, value: f64, line: u32) {
        self.a[k] = value;
        self.log.emit(
            EventKind::Overwrite {
                k,
                value,
                array: self.a.clone(),
            },
            Some(line),
        );
    }
}
