//! Logical-time driver for a bound [`Timeline`]

use super::timeline::Timeline;
use crate::event::{Event, Tick};
use tracing::{debug, trace};

/// Lowest accepted speed multiplier
pub const MIN_SPEED: f64 = 0.1;
pub const DEFAULT_SPEED: f64 = 1.0;

/// Receives every delivered batch, in log order.
///
/// Frames that cross no tick boundary deliver an empty batch, so `render`
/// must accept one as "nothing happened".  [`Animator::reset`] goes through
/// [`Renderer::clear`] instead, which by default is also an empty `render`;
/// renderers that keep state override it to return to tick 0.
pub trait Renderer {
    fn render(&mut self, batch: &[Event]);

    fn clear(&mut self) {
        self.render(&[]);
    }
}

impl<F> Renderer for F
where
    F: FnMut(&[Event]),
{
    fn render(&mut self, batch: &[Event]) {
        self(batch)
    }
}

/// Receives `(logical time, batch)` after every advancement, step and reset
pub trait Observer {
    fn observe(&mut self, time: f64, batch: &[Event]);
}

impl<F> Observer for F
where
    F: FnMut(f64, &[Event]),
{
    fn observe(&mut self, time: f64, batch: &[Event]) {
        self(time, batch)
    }
}

/// Observer that ignores everything
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl Observer for NoopObserver {
    fn observe(&mut self, _time: f64, _batch: &[Event]) {}
}

/// Playback state machine.
///
/// With no timeline bound the animator is idle and every operation except
/// [`Animator::set_timeline`] and [`Animator::set_speed`] does nothing.
/// Otherwise it is playing or paused depending on [`Animator::is_playing`].
pub struct Animator<R, O = NoopObserver> {
    renderer: R,
    observer: O,
    timeline: Option<Timeline>,
    time: f64,
    speed: f64,
    playing: bool,
}

impl<R: Renderer> Animator<R> {
    pub fn new(renderer: R) -> Self {
        Self::with_observer(renderer, NoopObserver)
    }
}

impl<R: Renderer, O: Observer> Animator<R, O> {
    pub fn with_observer(renderer: R, observer: O) -> Self {
        Animator {
            renderer,
            observer,
            timeline: None,
            time: 0.0,
            speed: DEFAULT_SPEED,
            playing: false,
        }
    }

    /// Bind a new log and rewind logical time to 0.
    ///
    /// Nothing is rendered and the playing flag is left as it was.
    pub fn set_timeline(&mut self, timeline: Timeline) {
        debug!(events = timeline.len(), "timeline bound");
        self.timeline = Some(timeline);
        self.time = 0.0;
    }

    /// Set the speed multiplier.
    ///
    /// Non-finite, zero and negative values fall back to [`DEFAULT_SPEED`];
    /// anything else is floored at [`MIN_SPEED`].
    pub fn set_speed(&mut self, speed: f64) {
        self.speed = if speed.is_finite() && speed > 0.0 {
            speed.max(MIN_SPEED)
        } else {
            DEFAULT_SPEED
        };
        debug!(speed = self.speed, "speed changed");
    }

    pub fn play(&mut self) {
        if self.timeline.is_none() || self.playing {
            return;
        }
        self.playing = true;
        debug!(time = self.time, "play");
    }

    pub fn pause(&mut self) {
        if self.playing {
            debug!(time = self.time, "pause");
        }
        self.playing = false;
    }

    /// Advance exactly one tick, whatever the speed or playing state
    pub fn step(&mut self) {
        if self.timeline.is_some() {
            self.advance(1.0);
        }
    }

    /// One host frame: advance by the speed multiplier while playing.
    ///
    /// Returns whether an advancement happened; the renderer and observer
    /// fire exactly when it does, even for an empty batch.
    pub fn frame(&mut self) -> bool {
        if !self.playing || self.timeline.is_none() {
            return false;
        }
        self.advance(self.speed);
        true
    }

    /// Rewind to time 0 and clear the renderer
    pub fn reset(&mut self) {
        let Some(timeline) = self.timeline.as_mut() else {
            return;
        };
        timeline.seek(0);
        self.time = 0.0;
        self.renderer.clear();
        self.observer.observe(0.0, &[]);
        debug!("reset");
    }

    /// Jump to `tick`.
    ///
    /// Performs a reset, then delivers every event with tick `<= tick` as one
    /// batch, leaving the renderer in the state a plain forward playback would
    /// have reached at that time.
    pub fn seek(&mut self, tick: Tick) {
        if self.timeline.is_none() {
            return;
        }
        self.reset();
        let Some(timeline) = self.timeline.as_mut() else {
            return;
        };
        self.time = tick as f64;
        let batch = timeline.next(self.time);
        self.renderer.render(batch);
        self.observer.observe(self.time, batch);
        debug!(tick, delivered = batch.len(), "seek");
    }

    /// Seek one whole tick back; at tick 0 or before this is a reset
    pub fn step_back(&mut self) {
        if self.timeline.is_none() {
            return;
        }
        let current = self.time.floor();
        if current <= 0.0 {
            self.reset();
        } else {
            self.seek(current as Tick - 1);
        }
    }

    fn advance(&mut self, dt: f64) {
        let Some(timeline) = self.timeline.as_mut() else {
            return;
        };
        self.time += dt;
        let batch = timeline.next(self.time);
        trace!(time = self.time, delivered = batch.len(), "advance");
        self.renderer.render(batch);
        self.observer.observe(self.time, batch);
    }

    pub fn time(&self) -> f64 {
        self.time
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// No timeline bound
    pub fn is_idle(&self) -> bool {
        self.timeline.is_none()
    }

    /// A timeline is bound and every event in it has been delivered
    pub fn is_finished(&self) -> bool {
        self.timeline.as_ref().is_some_and(Timeline::is_exhausted)
    }

    pub fn timeline(&self) -> Option<&Timeline> {
        self.timeline.as_ref()
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    pub fn observer(&self) -> &O {
        &self.observer
    }

    pub fn observer_mut(&mut self) -> &mut O {
        &mut self.observer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::EventKind;

    #[derive(Default)]
    struct Recorder {
        batches: Vec<Vec<Tick>>,
    }

    impl Renderer for Recorder {
        fn render(&mut self, batch: &[Event]) {
            self.batches.push(batch.iter().map(|e| e.t).collect());
        }
    }

    fn timeline(ticks: &[Tick]) -> Timeline {
        Timeline::new(
            ticks
                .iter()
                .map(|&t| Event {
                    t,
                    kind: EventKind::Clear,
                    line: None,
                })
                .collect(),
        )
    }

    #[test]
    fn test_idle_operations_are_noops() {
        let mut animator = Animator::new(Recorder::default());
        animator.play();
        animator.step();
        animator.reset();
        animator.seek(3);
        animator.step_back();
        assert!(!animator.frame());
        assert!(!animator.is_playing());
        assert!(animator.is_idle());
        assert!(animator.renderer().batches.is_empty());
    }

    #[test]
    fn test_speed_clamp() {
        let mut animator = Animator::new(Recorder::default());
        animator.set_speed(0.01);
        assert_eq!(animator.speed(), MIN_SPEED);
        animator.set_speed(-2.0);
        assert_eq!(animator.speed(), DEFAULT_SPEED);
        animator.set_speed(f64::NAN);
        assert_eq!(animator.speed(), DEFAULT_SPEED);
        animator.set_speed(3.5);
        assert_eq!(animator.speed(), 3.5);
    }

    #[test]
    fn test_step_ignores_speed() {
        let mut animator = Animator::new(Recorder::default());
        animator.set_timeline(timeline(&[0, 1, 2, 3]));
        animator.set_speed(4.0);
        animator.step();
        assert_eq!(animator.time(), 1.0);
        assert_eq!(animator.renderer().batches, vec![vec![0, 1]]);
    }

    #[test]
    fn test_frame_only_while_playing() {
        let mut animator = Animator::new(Recorder::default());
        animator.set_timeline(timeline(&[0, 1]));
        assert!(!animator.frame());
        animator.play();
        assert!(animator.frame());
        animator.pause();
        let time = animator.time();
        assert!(!animator.frame());
        assert_eq!(animator.time(), time);
    }

    #[test]
    fn test_reset_renders_empty_batch() {
        let mut observed = Vec::new();
        let observer = |time: f64, batch: &[Event]| observed.push((time, batch.len()));
        let mut animator = Animator::with_observer(Recorder::default(), observer);
        animator.set_timeline(timeline(&[0, 1]));
        animator.step();
        animator.reset();
        assert_eq!(animator.time(), 0.0);
        assert_eq!(animator.renderer().batches.last(), Some(&Vec::new()));
        drop(animator);
        assert_eq!(observed, vec![(1.0, 2), (0.0, 0)]);
    }

    #[test]
    fn test_seek_replays_prefix() {
        let mut animator = Animator::new(Recorder::default());
        animator.set_timeline(timeline(&[0, 1, 2, 3]));
        animator.seek(2);
        assert_eq!(animator.time(), 2.0);
        assert_eq!(animator.renderer().batches, vec![vec![], vec![0, 1, 2]]);
        animator.step();
        assert_eq!(animator.renderer().batches.last(), Some(&vec![3]));
        assert!(animator.is_finished());
    }

    #[test]
    fn test_step_back_from_start_resets() {
        let mut animator = Animator::new(Recorder::default());
        animator.set_timeline(timeline(&[0, 1, 2]));
        animator.step();
        animator.step();
        animator.step_back();
        assert_eq!(animator.time(), 1.0);
        animator.step_back();
        assert_eq!(animator.time(), 0.0);
        animator.step_back();
        assert_eq!(animator.time(), 0.0);
    }
}
