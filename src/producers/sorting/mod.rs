//! Sorting producers
//!
//! Each sort works on a copy of the input array and emits `init` first and
//! `done` last.  Comparisons are emitted before the mutation they decide, and
//! every mutation carries the whole array after the write.
//!
//! - [`bubble`]: adjacent compare/swap with early exit
//! - [`insertion`]: shift larger elements right, then insert the held key
//! - [`merge`]: top-down, stable (ties taken from the left run)
//! - [`quick`]: Lomuto partition, pivot = last element of the range

pub mod bubble;
pub mod insertion;
pub mod merge;
pub mod quick;
