//! Initial and randomized input for each structure kind

use crate::snapshot::{Container, StructureKind, TreeSnapshot};
use rand::seq::SliceRandom;
use rand::Rng;

/// Smallest and largest generated value
pub const MIN_VALUE: u32 = 1;
pub const MAX_VALUE: u32 = 99;

/// Wrap `values` for `structure`; trees insert them in order
pub fn build_input(structure: StructureKind, values: &[f64]) -> Container {
    match structure {
        StructureKind::Tree => Container::Tree(TreeSnapshot::from_keys(values)),
        _ => Container::Array(values.to_vec()),
    }
}

/// `len` whole numbers in `MIN_VALUE..=MAX_VALUE`, repeats allowed
pub fn random_values<R: Rng + ?Sized>(rng: &mut R, len: usize) -> Vec<f64> {
    (0..len)
        .map(|_| f64::from(rng.gen_range(MIN_VALUE..=MAX_VALUE)))
        .collect()
}

/// Up to `len` distinct keys, in random insertion order
pub fn random_keys<R: Rng + ?Sized>(rng: &mut R, len: usize) -> Vec<f64> {
    let mut keys: Vec<u32> = (MIN_VALUE..=MAX_VALUE).collect();
    keys.shuffle(rng);
    keys.truncate(len);
    keys.into_iter().map(f64::from).collect()
}

/// Fresh random input for `structure`.
///
/// Stacks and queues start half full so both directions have room to show.
pub fn random_input<R: Rng + ?Sized>(
    rng: &mut R,
    structure: StructureKind,
    len: usize,
) -> Container {
    match structure {
        StructureKind::Array => Container::Array(random_values(rng, len)),
        StructureKind::Stack | StructureKind::Queue => {
            Container::Array(random_values(rng, len.div_ceil(2)))
        }
        StructureKind::Tree => Container::Tree(TreeSnapshot::from_keys(&random_keys(rng, len))),
    }
}
