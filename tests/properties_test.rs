// Integration tests for producer and playback properties over random input

use algoviz::event::{final_snapshot, Event, EventType, Tick};
use algoviz::playback::{Animator, Timeline};
use algoviz::producers::{queue, stack, Registry};
use algoviz::snapshot::{Container, StructureKind, TreeSnapshot};
use proptest::prelude::*;

fn values() -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec((-50i32..50).prop_map(f64::from), 0..24)
}

fn ticks_are_dense(log: &[Event]) -> bool {
    log.iter().enumerate().all(|(i, e)| e.t == i as Tick)
}

#[derive(Debug, Clone, Copy)]
enum TreeOp {
    Insert(f64),
    Delete(f64),
}

fn tree_ops() -> impl Strategy<Value = Vec<TreeOp>> {
    let op = prop_oneof![
        2 => (0i32..20).prop_map(|k| TreeOp::Insert(f64::from(k))),
        1 => (0i32..20).prop_map(|k| TreeOp::Delete(f64::from(k))),
    ];
    prop::collection::vec(op, 0..40)
}

const SORTS: &[&str] = &["bubble-sort", "insertion-sort", "merge-sort", "quick-sort"];

proptest! {
    #[test]
    fn test_sorts_end_sorted(input in values()) {
        let registry = Registry::builtin();
        let mut expected = input.clone();
        expected.sort_by(f64::total_cmp);

        for id in SORTS {
            let log = registry.get(id).unwrap().produce(&Container::Array(input.clone()), None);
            prop_assert!(ticks_are_dense(&log), "{}: ticks not dense", id);
            prop_assert_eq!(log[0].event_type(), EventType::Init);
            prop_assert_eq!(log.last().map(Event::event_type), Some(EventType::Done));
            prop_assert_eq!(
                final_snapshot(&log),
                Some(Container::Array(expected.clone())),
                "{} did not sort", id
            );
        }
    }

    #[test]
    fn test_producers_are_deterministic(input in values(), operand in -50i32..50) {
        let registry = Registry::builtin();
        let operand = Some(f64::from(operand));
        for algorithm in registry.iter() {
            let data = match algorithm.meta().structure {
                StructureKind::Tree => Container::Tree(TreeSnapshot::from_keys(&input)),
                _ => Container::Array(input.clone()),
            };
            let before = data.clone();
            let first = algorithm.produce(&data, operand);
            let second = algorithm.produce(&data, operand);
            prop_assert_eq!(&data, &before);
            prop_assert_eq!(
                serde_json::to_string(&first).unwrap(),
                serde_json::to_string(&second).unwrap()
            );
        }
    }

    #[test]
    fn test_buffer_ops_log_shape(input in values(), value in -50i32..50) {
        let value = f64::from(value);
        for log in [
            stack::push(&input, value),
            queue::enqueue(&input, value),
        ] {
            prop_assert_eq!(log.len(), 2);
            prop_assert!(ticks_are_dense(&log));
            prop_assert_eq!(log[1].event_type(), EventType::Clear);
        }

        let popped = stack::pop(&input);
        let dequeued = queue::dequeue(&input);
        if input.is_empty() {
            prop_assert_eq!(popped[0].event_type(), EventType::Error);
            prop_assert_eq!(dequeued[0].event_type(), EventType::Error);
        } else {
            prop_assert_eq!(
                final_snapshot(&popped),
                Some(Container::Array(input[..input.len() - 1].to_vec()))
            );
            prop_assert_eq!(
                final_snapshot(&dequeued),
                Some(Container::Array(input[1..].to_vec()))
            );
        }
    }

    #[test]
    fn test_tree_ops_keep_order(ops in tree_ops()) {
        let registry = Registry::builtin();
        let mut tree = TreeSnapshot::new();
        let mut model: Vec<f64> = Vec::new();

        for op in ops {
            let (id, key) = match op {
                TreeOp::Insert(key) => ("bst-insert", key),
                TreeOp::Delete(key) => ("bst-delete", key),
            };
            let log = registry
                .get(id)
                .unwrap()
                .produce(&Container::Tree(tree.clone()), Some(key));
            prop_assert!(ticks_are_dense(&log));

            match op {
                TreeOp::Insert(key) => model.push(key),
                TreeOp::Delete(key) => {
                    if let Some(at) = model.iter().position(|k| *k == key) {
                        model.swap_remove(at);
                    }
                }
            }
            model.sort_by(f64::total_cmp);

            let next_id = tree.next_id();
            if let Some(Container::Tree(next)) = final_snapshot(&log) {
                tree = next;
            }
            prop_assert!(tree.validate().is_ok());
            prop_assert!(tree.next_id() >= next_id);
            prop_assert_eq!(tree.keys_in_order(), model.clone());
        }
    }

    #[test]
    fn test_seek_serves_suffix(input in values(), tick in 0u64..200) {
        let log = algoviz::producers::sorting::merge::merge_sort(&input);
        let mut timeline = Timeline::new(log.clone());
        timeline.seek(tick);
        let rest = timeline.next(f64::MAX).to_vec();
        let expected: Vec<Event> = log.into_iter().filter(|e| e.t >= tick).collect();
        prop_assert_eq!(rest, expected);
    }

    #[test]
    fn test_playback_delivers_in_order(
        input in values(),
        speed in 0.1f64..4.0,
        frames in 0usize..400,
    ) {
        let log = algoviz::producers::sorting::quick::quick_sort(&input);
        let mut delivered: Vec<Tick> = Vec::new();
        let mut last_time = 0.0;
        {
            let renderer = |batch: &[Event]| delivered.extend(batch.iter().map(|e| e.t));
            let mut animator = Animator::new(renderer);
            animator.set_timeline(Timeline::new(log.clone()));
            animator.set_speed(speed);
            animator.play();
            for _ in 0..frames {
                animator.frame();
                prop_assert!(animator.time() >= last_time);
                last_time = animator.time();
            }
        }
        let expected: Vec<Tick> = if frames == 0 {
            Vec::new()
        } else {
            let floor = last_time.floor() as Tick;
            log.iter().map(|e| e.t).filter(|t| *t <= floor).collect()
        };
        prop_assert_eq!(delivered, expected);
    }
}
