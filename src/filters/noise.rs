//! Synthetic impulsive (salt-style) noise injection.
//!
//! Noise is an additive, wrapping perturbation: an affected cell becomes
//! `(value + amplitude) mod 255`, NOT a full value replacement. The
//! modulo is 255, not 256, so a near-max input can wrap to a small value,
//! including exactly 0. Both quirks are preserved behavioral contracts;
//! changing them would change the noise distribution the scoring
//! experiments evaluate.
//!
//! Randomness comes from a [`UniformSource`] so tests can script draws
//! deterministically. The default source is a seedable MINSTD LCG.

use ndarray::{Array2, ArrayView2};

// ============================================================================
// Uniform random source
// ============================================================================

/// Source of uniform random values in [0, 1).
///
/// Exactly one draw is consumed per cell during injection, regardless of
/// the probability, so a seeded run is reproducible cell for cell.
pub trait UniformSource {
    /// Next uniform value in [0, 1).
    fn next_unit(&mut self) -> f32;
}

/// Seedable linear congruential generator with MINSTD parameters.
pub struct MinstdRng {
    state: u64,
}

impl MinstdRng {
    pub fn new(seed: u64) -> Self {
        MinstdRng {
            state: seed.wrapping_add(1), // Avoid zero
        }
    }

    fn next_u32(&mut self) -> u32 {
        // MINSTD LCG
        self.state = self.state.wrapping_mul(48271).wrapping_add(1) % 2147483647;
        self.state as u32
    }
}

impl UniformSource for MinstdRng {
    fn next_unit(&mut self) -> f32 {
        (self.next_u32() as f32) / (2147483647.0f32)
    }
}

// ============================================================================
// Impulsive noise
// ============================================================================

/// Salt a grid with impulsive noise.
///
/// For every cell one uniform draw is consumed; if it falls below
/// `probability` the cell becomes `(value + amplitude) mod 255`,
/// otherwise it is copied unchanged. The input grid is never mutated.
///
/// # Arguments
/// * `input` - Intensity grid (height, width), values 0-255
/// * `amplitude` - Additive perturbation, wrapped modulo 255
/// * `probability` - Fraction of cells affected, in [0, 1)
/// * `source` - Uniform random source, one draw per cell
///
/// # Returns
/// New grid with the perturbation applied
pub fn add_impulsive_noise(
    input: ArrayView2<f32>,
    amplitude: i32,
    probability: f32,
    source: &mut impl UniformSource,
) -> Array2<f32> {
    let (height, width) = input.dim();
    let mut output = Array2::<f32>::zeros((height, width));

    for y in 0..height {
        for x in 0..width {
            let value = input[[y, x]];
            output[[y, x]] = if source.next_unit() < probability {
                (value + amplitude as f32).rem_euclid(255.0)
            } else {
                value
            };
        }
    }

    output
}
