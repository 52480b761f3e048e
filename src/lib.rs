//! # Introduction
//!
//! AlgoViz turns an algorithm run into a deterministic, replayable log of
//! discrete events and plays that log back like a video timeline: play, pause,
//! single-step, step back, scrub, and vary the speed.  A terminal UI built with
//! [ratatui](https://docs.rs/ratatui) renders the events as they are delivered.
//!
//! ## Playback pipeline
//!
//! ```text
//! Snapshot → Producer → Event log → Timeline → Animator → Renderer (TUI)
//! ```
//!
//! 1. [`snapshot`]: value types for the visualized structures: number arrays
//!    (also used as stack and queue buffers) and binary search trees.
//! 2. [`producers`]: one pure function per algorithm or structure operation,
//!    mapping an input snapshot (plus an optional operand) to an event log, and
//!    a [`producers::Registry`] that pairs each producer with its display source.
//! 3. [`event`]: the closed event vocabulary and the tick-assigning
//!    [`event::LogBuilder`].
//! 4. [`playback`]: [`playback::Timeline`] serves a log tick by tick;
//!    [`playback::Animator`] owns logical time and forwards event batches to a
//!    [`playback::Renderer`] and an optional [`playback::Observer`].
//! 5. [`ui`]: ratatui-based TUI acting as the renderer; not part of the
//!    stable library API.
//!
//! ## Supported algorithms
//!
//! Sorts: bubble (early exit), insertion, merge (top-down), quick (Lomuto).
//! Binary search tree: insert, search, delete.
//! Stack: push, pop.  Queue: enqueue, dequeue.

pub mod config;
pub mod errors;
pub mod event;
pub mod input;
pub mod playback;
pub mod producers;
pub mod session;
pub mod snapshot;
pub mod ui;
