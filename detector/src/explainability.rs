// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2024 Hyperpolymath

//! Evidence collected while scoring a text
//!
//! Provides:
//! - Typed signals (lexicon hits and structural anomalies) with their weights
//! - Score accumulation per verdict side
//! - Rendering to the human-readable feature list, with the generic fallback
//!   used when nothing fired

use crate::labels::{Prediction, Sentiment};
use serde::Serialize;
use std::fmt;

/// Upper bound on the rendered feature list
pub const MAX_FEATURES: usize = 5;

/// A single piece of evidence detected in the text
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum Signal {
    /// Fake-lexicon phrase found
    SuspiciousPhrase(&'static str),
    /// Real-lexicon phrase found
    CrediblePhrase(&'static str),
    /// Text under the short-content threshold
    ShortContent,
    /// Run of two or more `!`
    ExclamationRun,
    /// Run of three or more capitals
    CapitalRun,
}

impl Signal {
    /// Amount added to the score of the side this signal favours
    pub fn weight(&self) -> f64 {
        match self {
            Signal::SuspiciousPhrase(_) | Signal::CrediblePhrase(_) => 1.0,
            Signal::ShortContent | Signal::ExclamationRun => 0.5,
            Signal::CapitalRun => 0.3,
        }
    }

    pub fn favours(&self) -> Prediction {
        match self {
            Signal::CrediblePhrase(_) => Prediction::Real,
            _ => Prediction::Fake,
        }
    }
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Signal::SuspiciousPhrase(phrase) => write!(f, "Suspicious phrase: \"{}\"", phrase),
            Signal::CrediblePhrase(phrase) => write!(f, "Credible phrase: \"{}\"", phrase),
            Signal::ShortContent => f.write_str("Very short content"),
            Signal::ExclamationRun => f.write_str("Excessive exclamation marks"),
            Signal::CapitalRun => f.write_str("Excessive capitalization"),
        }
    }
}

/// Signals in detection order
#[derive(Debug, Clone, Default, Serialize)]
pub struct Evidence {
    signals: Vec<Signal>,
}

impl Evidence {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, signal: Signal) {
        self.signals.push(signal);
    }

    pub fn signals(&self) -> &[Signal] {
        &self.signals
    }

    pub fn is_empty(&self) -> bool {
        self.signals.is_empty()
    }

    /// Sum of weights for signals favouring `side`, in insertion order
    pub fn score(&self, side: Prediction) -> f64 {
        self.signals
            .iter()
            .filter(|signal| signal.favours() == side)
            .fold(0.0, |acc, signal| acc + signal.weight())
    }

    /// Feature list for display: signals in detection order, or the generic
    /// set when none fired, capped at [`MAX_FEATURES`]
    pub fn features(&self, char_count: usize, sentiment: Sentiment) -> Vec<String> {
        if self.is_empty() {
            return generic_features(char_count, sentiment);
        }
        self.signals
            .iter()
            .take(MAX_FEATURES)
            .map(|signal| signal.to_string())
            .collect()
    }
}

/// Placeholder description for texts that triggered no signal
pub fn generic_features(char_count: usize, sentiment: Sentiment) -> Vec<String> {
    vec![
        format!("Article length: {} characters", char_count),
        "Language complexity: Moderate".to_string(),
        "Source attribution: Present".to_string(),
        "Factual claims: Multiple".to_string(),
        format!("Emotional tone: {}", sentiment),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signal_rendering() {
        assert_eq!(
            Signal::SuspiciousPhrase("miracle").to_string(),
            "Suspicious phrase: \"miracle\""
        );
        assert_eq!(
            Signal::CrediblePhrase("journal").to_string(),
            "Credible phrase: \"journal\""
        );
        assert_eq!(Signal::CapitalRun.to_string(), "Excessive capitalization");
    }

    #[test]
    fn test_scores_per_side() {
        let mut evidence = Evidence::new();
        evidence.add(Signal::SuspiciousPhrase("shocking"));
        evidence.add(Signal::CrediblePhrase("university"));
        evidence.add(Signal::ExclamationRun);
        evidence.add(Signal::CapitalRun);

        assert!((evidence.score(Prediction::Fake) - 1.8).abs() < 1e-9);
        assert_eq!(evidence.score(Prediction::Real), 1.0);
    }

    #[test]
    fn test_features_capped_in_insertion_order() {
        let mut evidence = Evidence::new();
        for phrase in ["shocking", "breaking", "miracle", "click here"] {
            evidence.add(Signal::SuspiciousPhrase(phrase));
        }
        evidence.add(Signal::CrediblePhrase("journal"));
        evidence.add(Signal::ShortContent);

        let features = evidence.features(40, Sentiment::Neutral);
        assert_eq!(features.len(), MAX_FEATURES);
        assert_eq!(features[0], "Suspicious phrase: \"shocking\"");
        assert_eq!(features[4], "Credible phrase: \"journal\"");
    }

    #[test]
    fn test_generic_fallback() {
        let features = Evidence::new().features(240, Sentiment::Negative);
        assert_eq!(
            features,
            vec![
                "Article length: 240 characters",
                "Language complexity: Moderate",
                "Source attribution: Present",
                "Factual claims: Multiple",
                "Emotional tone: Negative",
            ]
        );
    }
}
