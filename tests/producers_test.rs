// Integration tests for the event log producers

use algoviz::event::{final_snapshot, EventKind, EventType};
use algoviz::producers::sorting::{bubble, insertion, merge, quick};
use algoviz::producers::{queue, stack, Registry};
use algoviz::snapshot::Container;

fn types(log: &[algoviz::event::Event]) -> Vec<EventType> {
    log.iter().map(|e| e.event_type()).collect()
}

#[test]
fn test_bubble_sort_two_elements() {
    let log = bubble::bubble_sort(&[2.0, 1.0]);

    let compares: Vec<_> = log
        .iter()
        .filter(|e| e.event_type() == EventType::Compare)
        .collect();
    assert_eq!(compares.len(), 1);
    assert_eq!(
        compares[0].kind,
        EventKind::Compare {
            i: 0,
            j: 1,
            key: None
        }
    );

    let swaps: Vec<_> = log
        .iter()
        .filter_map(|e| match &e.kind {
            EventKind::Swap { array, .. } => Some(array.clone()),
            _ => None,
        })
        .collect();
    assert_eq!(swaps, vec![vec![1.0, 2.0]]);

    let sorted_ends: Vec<_> = log
        .iter()
        .filter_map(|e| match e.kind {
            EventKind::MarkSortedEnd { index } => Some(index),
            _ => None,
        })
        .collect();
    assert_eq!(sorted_ends, vec![1]);
    assert_eq!(log.last().map(|e| e.event_type()), Some(EventType::Done));
}

#[test]
fn test_pop_empty_stack_wire_format() {
    let log = stack::pop(&[]);
    assert_eq!(log.len(), 1);
    let json = serde_json::to_string(&log[0]).unwrap();
    assert_eq!(
        json,
        r#"{"t":0,"type":"error","payload":{"message":"Stack underflow (empty stack)."}}"#
    );
}

#[test]
fn test_dequeue_then_enqueue() {
    let queue_contents = vec![1.0, 2.0, 3.0];

    let dequeued = queue::dequeue(&queue_contents);
    assert_eq!(types(&dequeued), vec![EventType::Dequeue, EventType::Clear]);
    match &dequeued[0].kind {
        EventKind::Dequeue { value, array, .. } => {
            assert_eq!(*value, 1.0);
            assert_eq!(array, &vec![2.0, 3.0]);
        }
        other => panic!("expected dequeue, got {:?}", other),
    }

    let Some(Container::Array(rest)) = final_snapshot(&dequeued) else {
        panic!("dequeue carries no array");
    };
    let enqueued = queue::enqueue(&rest, 9.0);
    assert_eq!(types(&enqueued), vec![EventType::Enqueue, EventType::Clear]);
    assert_eq!(enqueued[0].t, 0);
    assert_eq!(
        final_snapshot(&enqueued),
        Some(Container::Array(vec![2.0, 3.0, 9.0]))
    );
    // the input is untouched
    assert_eq!(queue_contents, vec![1.0, 2.0, 3.0]);
}

#[test]
fn test_push_then_pop() {
    let pushed = stack::push(&[4.0], 6.0);
    assert_eq!(
        pushed[0].kind,
        EventKind::Push {
            index: 1,
            value: 6.0,
            array: vec![4.0, 6.0]
        }
    );
    let popped = stack::pop(&[4.0, 6.0]);
    assert_eq!(
        popped[0].kind,
        EventKind::Pop {
            index: 1,
            value: 6.0,
            array: vec![4.0]
        }
    );
}

#[test]
fn test_push_non_numeric_operand() {
    let algorithm = Registry::builtin();
    let log = algorithm
        .get("stack-push")
        .unwrap()
        .produce(&Container::Array(vec![1.0]), None);
    assert_eq!(log.len(), 1);
    assert_eq!(
        log[0].kind,
        EventKind::Error {
            message: "Enter a number to push.".to_string()
        }
    );
}

#[test]
fn test_every_sort_sorts() {
    let input = [5.0, -1.0, 3.5, 3.5, 0.0, 9.0, 2.0];
    let mut expected = input.to_vec();
    expected.sort_by(f64::total_cmp);

    for log in [
        bubble::bubble_sort(&input),
        insertion::insertion_sort(&input),
        merge::merge_sort(&input),
        quick::quick_sort(&input),
    ] {
        assert_eq!(log.first().map(|e| e.event_type()), Some(EventType::Init));
        assert_eq!(log.last().map(|e| e.event_type()), Some(EventType::Done));
        assert_eq!(final_snapshot(&log), Some(Container::Array(expected.clone())));
    }
}

#[test]
fn test_empty_array_sorts_to_init_done() {
    for log in [
        bubble::bubble_sort(&[]),
        insertion::insertion_sort(&[]),
        merge::merge_sort(&[]),
        quick::quick_sort(&[]),
    ] {
        assert_eq!(types(&log), vec![EventType::Init, EventType::Done]);
    }
}

#[test]
fn test_insertion_sort_carries_key() {
    let log = insertion::insertion_sort(&[3.0, 1.0]);
    let keys: Vec<_> = log
        .iter()
        .filter_map(|e| match e.kind {
            EventKind::Compare { key, .. } => key,
            _ => None,
        })
        .collect();
    // take-key compare, then the loop compare against 3
    assert_eq!(keys, vec![1.0, 1.0]);
}

#[test]
fn test_quick_sort_marks_every_index() {
    let input = [4.0, 2.0, 7.0, 1.0, 5.0];
    let log = quick::quick_sort(&input);
    let mut marked: Vec<_> = log
        .iter()
        .filter_map(|e| match e.kind {
            EventKind::MarkSortedIndex { index } => Some(index),
            _ => None,
        })
        .collect();
    marked.sort_unstable();
    marked.dedup();
    // single-element ranges are not partitioned, so not every index is marked,
    // but every marked index holds its final value
    let Some(Container::Array(sorted)) = final_snapshot(&log) else {
        panic!("quick sort produced no array");
    };
    let mut expected = input.to_vec();
    expected.sort_by(f64::total_cmp);
    for index in marked {
        assert_eq!(sorted[index], expected[index]);
    }
}

#[test]
fn test_merge_sort_is_stable_on_ties() {
    let log = merge::merge_sort(&[2.0, 1.0, 2.0]);
    assert_eq!(
        final_snapshot(&log),
        Some(Container::Array(vec![1.0, 2.0, 2.0]))
    );
    let subarrays = log
        .iter()
        .filter(|e| e.event_type() == EventType::MarkSubarray)
        .count();
    assert!(subarrays >= 3);
}

#[test]
fn test_registry_produces_for_every_algorithm() {
    let registry = Registry::builtin();
    for algorithm in registry.iter() {
        let meta = algorithm.meta();
        let input = if meta.structure == algoviz::snapshot::StructureKind::Tree {
            Container::Tree(algoviz::snapshot::TreeSnapshot::from_keys(&[5.0, 3.0, 8.0]))
        } else {
            Container::Array(vec![5.0, 3.0, 8.0])
        };
        let operand = meta.takes_operand.then_some(3.0);
        let log = algorithm.produce(&input, operand);
        assert!(!log.is_empty(), "{} produced nothing", meta.id);
        assert!(
            log.iter().all(|e| e.event_type() != EventType::Error),
            "{} rejected valid input",
            meta.id
        );
    }
}
