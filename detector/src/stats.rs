// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2024 Hyperpolymath

//! Running verdict counters and derived percentages

use crate::labels::Prediction;
use crate::scorer::AnalysisResult;
use serde::{Deserialize, Serialize};

/// Initial counter values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CounterSeed {
    pub total: u64,
    pub real: u64,
    pub fake: u64,
}

impl Default for CounterSeed {
    fn default() -> Self {
        Self {
            total: 47,
            real: 34,
            fake: 13,
        }
    }
}

/// Point-in-time view of the counters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Statistics {
    pub total: u64,
    pub real: u64,
    pub fake: u64,
    /// `round(100 * real / total)`
    pub real_pct: u32,
    /// `round(100 * fake / total)`, rounded independently of `real_pct`
    pub fake_pct: u32,
}

impl Statistics {
    pub fn format(&self) -> String {
        format!(
            "Analyses: {} | Real: {}% | Fake: {}%",
            self.total, self.real_pct, self.fake_pct
        )
    }
}

/// Aggregate counters over every completed analysis
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Counters {
    total: u64,
    real: u64,
    fake: u64,
}

impl Default for Counters {
    fn default() -> Self {
        Self::from_seed(CounterSeed::default())
    }
}

impl Counters {
    pub fn from_seed(seed: CounterSeed) -> Self {
        Self {
            total: seed.total,
            real: seed.real,
            fake: seed.fake,
        }
    }

    /// Fold one completed analysis into the totals
    pub fn apply(&mut self, result: &AnalysisResult) {
        self.total += 1;
        match result.prediction {
            Prediction::Real => self.real += 1,
            Prediction::Fake => self.fake += 1,
        }
    }

    pub fn snapshot(&self) -> Statistics {
        Statistics {
            total: self.total,
            real: self.real,
            fake: self.fake,
            real_pct: percentage(self.real, self.total),
            fake_pct: percentage(self.fake, self.total),
        }
    }
}

fn percentage(count: u64, total: u64) -> u32 {
    if total == 0 {
        return 0;
    }
    (count as f64 / total as f64 * 100.0).round() as u32
}
