// Integration tests for the terminal renderer and metrics observer

use algoviz::playback::{Animator, Renderer, Timeline};
use algoviz::producers::sorting::{bubble, quick};
use algoviz::producers::{bst, init_log, stack, Registry};
use algoviz::session::Session;
use algoviz::snapshot::{Container, TreeSnapshot};
use algoviz::ui::scene::Tone;
use algoviz::ui::{Metrics, Scene};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn animator(meta: algoviz::producers::AlgorithmMeta, input: Container) -> Animator<Scene, Metrics> {
    Animator::with_observer(Scene::new(meta, input), Metrics::new())
}

#[test]
fn test_scene_tracks_compare_then_swap() {
    let input = vec![2.0, 1.0];
    let mut animator = animator(bubble::META, Container::Array(input.clone()));
    animator.set_timeline(Timeline::new(bubble::bubble_sort(&input)));

    animator.step(); // init + compare
    assert_eq!(animator.renderer().compared(), Some((0, 1)));
    assert_eq!(animator.renderer().line(), Some(8));

    animator.step(); // swap
    let scene = animator.renderer();
    assert_eq!(scene.contents(), &Container::Array(vec![1.0, 2.0]));
    assert!(scene.is_touched(0) && scene.is_touched(1));
    assert_eq!(animator.observer().swaps, 1);
}

#[test]
fn test_scene_done_marks_all_sorted() {
    let input = vec![4.0, 1.0, 3.0];
    let mut animator = animator(quick::META, Container::Array(input.clone()));
    let log = quick::quick_sort(&input);
    let end = log.len() as u64;
    animator.set_timeline(Timeline::new(log));
    animator.seek(end);

    let scene = animator.renderer();
    assert!(scene.is_finished());
    assert!((0..3).all(|i| scene.is_sorted(i)));
    assert_eq!(scene.message(), Some((Tone::Success, "Done")));
    assert_eq!(scene.pivot(), None);
}

#[test]
fn test_reset_restores_base_and_counters() {
    let input = vec![3.0, 2.0, 1.0];
    let mut animator = animator(bubble::META, Container::Array(input.clone()));
    animator.set_timeline(Timeline::new(bubble::bubble_sort(&input)));
    for _ in 0..5 {
        animator.step();
    }
    assert!(animator.observer().comparisons > 0);

    animator.reset();
    assert_eq!(animator.renderer().contents(), &Container::Array(input));
    assert_eq!(*animator.observer(), Metrics::default());
}

#[test]
fn test_error_event_shows_message() {
    let mut scene = Scene::new(stack::POP_META, Container::Array(Vec::new()));
    scene.render(&stack::pop(&[]));
    assert_eq!(
        scene.message(),
        Some((Tone::Error, "Stack underflow (empty stack)."))
    );
    assert!(scene.is_finished());
}

#[test]
fn test_tree_search_highlights() {
    let tree = TreeSnapshot::from_keys(&[8.0, 4.0, 12.0]);
    let target = tree.find(12.0).unwrap();
    let mut scene = Scene::new(bst::SEARCH_META, Container::Tree(tree.clone()));

    let log = bst::search(&tree, 12.0);
    scene.render(&log[..3]); // init, root visit
    assert_eq!(scene.current_node(), tree.root_id());

    scene.render(&log[3..]);
    assert_eq!(scene.found_node(), Some(target));
    assert_eq!(scene.message(), Some((Tone::Success, "Found 12")));
}

#[test]
fn test_insert_message_survives_done() {
    let tree = TreeSnapshot::from_keys(&[8.0]);
    let mut scene = Scene::new(bst::INSERT_META, Container::Tree(tree.clone()));
    scene.render(&bst::insert(&tree, 3.0));
    assert_eq!(scene.message(), Some((Tone::Info, "Inserted 3")));
    assert_eq!(scene.contents().len(), 2);
}

#[test]
fn test_init_log_shows_contents_only() {
    let input = Container::Array(vec![1.0, 2.0]);
    let mut scene = Scene::new(stack::PUSH_META, Container::Array(Vec::new()));
    scene.render(&init_log(&input));
    assert_eq!(scene.contents(), &input);
    assert!(!scene.is_finished());
}

#[test]
fn test_session_operations_chain_through_scene() {
    let mut session = Session::new(
        Registry::builtin(),
        "bst-insert",
        Some(&[][..]),
        4,
        StdRng::seed_from_u64(9),
    )
    .unwrap();

    for key in [5.0, 3.0, 8.0] {
        let log = session.run(Some(key));
        let mut scene = Scene::new(*session.meta(), session.input());
        scene.render(&log);
        assert!(session.apply(&log));
        assert_eq!(scene.contents(), &session.input());
    }
    let tree = session.input();
    assert_eq!(
        tree.as_tree().unwrap().keys_in_order(),
        vec![3.0, 5.0, 8.0]
    );
}
