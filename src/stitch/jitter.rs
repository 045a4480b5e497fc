//! Grid point perturbation
//!
//! Randomized fills shift each grid point by up to a fifth of the pitch on
//! each axis. The source is passed in explicitly so runs are reproducible.

use crate::board::Coord;

/// Source of uniform samples in [-1, 1]
pub trait Jitter {
    fn next_unit(&mut self) -> f64;
}

/// SplitMix64 generator seeded by the caller
#[derive(Clone, Debug)]
pub struct SeededJitter {
    state: u64,
}

impl SeededJitter {
    pub fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    fn next_u64(&mut self) -> u64 {
        self.state = self.state.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = self.state;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^ (z >> 31)
    }
}

impl Jitter for SeededJitter {
    fn next_unit(&mut self) -> f64 {
        // 53 random bits -> [0, 1]
        let unit = (self.next_u64() >> 11) as f64 / ((1u64 << 53) - 1) as f64;
        unit * 2.0 - 1.0
    }
}

/// Always returns 0; grid points stay on pitch
#[derive(Clone, Copy, Debug, Default)]
pub struct NoJitter;

impl Jitter for NoJitter {
    fn next_unit(&mut self) -> f64 {
        0.0
    }
}

/// Offset of at most `step / 5` in either direction
pub fn jitter_offset(jitter: &mut dyn Jitter, step: Coord) -> Coord {
    (jitter.next_unit() * step as f64 / 5.0).round() as Coord
}
