//! Deterministic playback over an event log
//!
//! - [`timeline`]: [`Timeline`] holds one log and serves it tick by tick, with
//!   random access through [`Timeline::seek`].
//! - [`animator`]: [`Animator`] owns continuous logical time, speed and
//!   play/pause state, pulls batches from its bound timeline, and forwards
//!   them to a [`Renderer`] and an [`Observer`].
//!
//! # Scheduling
//!
//! Playback is single-threaded and cooperative.  The host calls
//! [`Animator::frame`] once per frame at whatever cadence it chooses; while
//! playing, each frame advances logical time by the speed multiplier.
//! [`Animator::pause`] only clears the playing flag, so a frame already being
//! processed still delivers its batch and the next frame does nothing.
//!
//! # Delivery guarantees
//!
//! Events inside one batch arrive in log order.  Successive batches never
//! overlap; an event is delivered twice only after a seek or reset rewinds the
//! cursor.

pub mod animator;
pub mod timeline;

pub use animator::{Animator, NoopObserver, Observer, Renderer, DEFAULT_SPEED, MIN_SPEED};
pub use timeline::Timeline;
