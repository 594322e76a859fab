// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2024 Hyperpolymath

//! Verdict and sentiment labels

use serde::{Deserialize, Serialize};
use std::fmt;

/// Binary verdict for a news sample
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Prediction {
    /// Content judged credible
    Real,
    /// Content judged fabricated or sensationalist
    Fake,
}

impl Prediction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Prediction::Real => "REAL",
            Prediction::Fake => "FAKE",
        }
    }
}

impl fmt::Display for Prediction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Simulated sentiment label, drawn independently of the verdict
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sentiment {
    Neutral,
    Positive,
    Negative,
    Mixed,
}

impl Sentiment {
    /// Draw order used by the scorer
    pub const ALL: [Sentiment; 4] = [
        Sentiment::Neutral,
        Sentiment::Positive,
        Sentiment::Negative,
        Sentiment::Mixed,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Sentiment::Neutral => "Neutral",
            Sentiment::Positive => "Positive",
            Sentiment::Negative => "Negative",
            Sentiment::Mixed => "Mixed",
        }
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
