//! Error types
//!
//! Expected domain conditions (bad operands, underflow, missing keys) never
//! surface as Rust errors: producers turn them into terminal events so the
//! playback engine has a single failure channel.  [`ValidationError`] exists to
//! name those conditions and to supply the message text the `error` event
//! carries.
//!
//! [`AppError`] covers the front-end only: terminal I/O, command-line input and
//! JSON output.

use crate::snapshot::{StructureKind, TreeError};
use std::io;
use thiserror::Error;

/// Input rejected by a producer before any event is generated.
///
/// The `Display` output is user-facing and is copied verbatim into the
/// `error` event's `message` payload.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// Operand missing or not a finite number
    #[error("Enter a number to {verb}.")]
    InvalidOperand { verb: &'static str },

    /// Input array holds a NaN or infinite value
    #[error("Value at index {index} is not a number.")]
    InvalidValue { index: usize },

    #[error("Stack underflow (empty stack).")]
    StackUnderflow,

    #[error("Queue underflow (empty queue).")]
    QueueUnderflow,

    /// Producer was handed the wrong kind of snapshot
    #[error("This operation needs {expected} input.")]
    WrongStructure { expected: StructureKind },

    #[error("Invalid tree: {0}")]
    InvalidTree(#[from] TreeError),
}

/// Front-end errors
#[derive(Debug, Error)]
pub enum AppError {
    #[error("terminal I/O failed: {0}")]
    Io(#[from] io::Error),

    #[error("could not encode event log: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid --values entry '{item}': expected a number")]
    InvalidValues { item: String },

    #[error("unknown algorithm '{id}' (known: {known})")]
    UnknownAlgorithm { id: String, known: String },
}
