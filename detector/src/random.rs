// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2024 Hyperpolymath

//! Pluggable randomness for the scorer
//!
//! The scorer only ever asks for a float in `[0, 1)`. Seeded ChaCha gives
//! reproducible sessions; `SequenceSource` replays fixed draws in tests.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Source of uniform draws in `[0, 1)`
pub trait RandomSource: Send {
    fn next_f64(&mut self) -> f64;

    /// Uniform integer in `[0, span)`
    fn below(&mut self, span: u32) -> u32 {
        let draw = (self.next_f64() * span as f64).floor() as u32;
        draw.min(span.saturating_sub(1))
    }
}

/// ChaCha8-backed source
#[derive(Debug, Clone)]
pub struct ChaChaSource {
    rng: ChaCha8Rng,
}

impl ChaChaSource {
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    pub fn from_entropy() -> Self {
        Self {
            rng: ChaCha8Rng::from_entropy(),
        }
    }
}

impl RandomSource for ChaChaSource {
    fn next_f64(&mut self) -> f64 {
        self.rng.gen()
    }
}

/// Replays a fixed list of draws, wrapping around when exhausted
#[derive(Debug, Clone)]
pub struct SequenceSource {
    draws: Vec<f64>,
    position: usize,
}

impl SequenceSource {
    /// Draws outside `[0, 1)` are clamped into range
    pub fn new(draws: Vec<f64>) -> Self {
        let draws = if draws.is_empty() {
            vec![0.0]
        } else {
            draws.into_iter().map(|d| d.clamp(0.0, 1.0 - f64::EPSILON)).collect()
        };
        Self { draws, position: 0 }
    }

    /// Number of draws consumed so far
    pub fn consumed(&self) -> usize {
        self.position
    }
}

impl RandomSource for SequenceSource {
    fn next_f64(&mut self) -> f64 {
        let draw = self.draws[self.position % self.draws.len()];
        self.position += 1;
        draw
    }
}
