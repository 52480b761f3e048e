//! Command-line configuration

use crate::errors::AppError;
use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser, Debug, Clone)]
#[command(
    name = "algoviz",
    version,
    about = "Step through algorithms on a replayable event timeline"
)]
pub struct Config {
    /// Algorithm to start with
    #[arg(short, long, default_value = "bubble-sort")]
    pub algorithm: String,

    /// Initial contents as a comma-separated list, e.g. "5,3,8".
    /// Tree algorithms insert the values one by one.
    #[arg(long)]
    pub values: Option<String>,

    /// Length of randomly generated input
    #[arg(long, default_value_t = 12)]
    pub size: usize,

    /// Seed for random input (reproducible runs)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Initial playback speed multiplier
    #[arg(long, default_value_t = 1.0)]
    pub speed: f64,

    /// Frames per second of the playback loop
    #[arg(long, default_value_t = 30)]
    pub fps: u32,

    /// Key or value for operations that take one (insert, push, ...)
    #[arg(long, allow_negative_numbers = true)]
    pub operand: Option<f64>,

    /// Print the produced event log as JSON lines and exit
    #[arg(long)]
    pub dump: bool,

    /// List the available algorithms and exit
    #[arg(long)]
    pub list: bool,

    /// Write logs to this file (the terminal UI owns stdout)
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

impl Config {
    /// Parsed `--values`, if given
    pub fn values(&self) -> Result<Option<Vec<f64>>, AppError> {
        self.values.as_deref().map(parse_values).transpose()
    }

    /// Time between two playback frames
    pub fn frame_interval(&self) -> Duration {
        Duration::from_secs_f64(1.0 / f64::from(self.fps.max(1)))
    }

    /// Seeded generator when `--seed` is given, otherwise entropy-seeded
    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}

/// Parse a comma-separated list of numbers. Blank items are skipped.
pub fn parse_values(text: &str) -> Result<Vec<f64>, AppError> {
    text.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(|item| match item.parse::<f64>() {
            Ok(value) if value.is_finite() => Ok(value),
            _ => Err(AppError::InvalidValues {
                item: item.to_string(),
            }),
        })
        .collect()
}
