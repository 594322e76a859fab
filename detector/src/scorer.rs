// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2024 Hyperpolymath

//! Heuristic credibility scorer
//!
//! Scoring is keyword membership plus three structural checks:
//! - each fake-lexicon hit adds 1.0 to the fake score, each real-lexicon
//!   hit adds 1.0 to the real score
//! - short content (+0.5), repeated `!` (+0.5) and capital runs (+0.3)
//!   add to the fake score
//!
//! The larger score wins with confidence `min(95, 70 + 10 * margin)`. With
//! no signal at all the verdict leans REAL (70/30) with confidence in
//! `[60, 90)`; a nonzero tie is a coin flip with confidence in `[50, 70)`.
//! Confidence is finally capped by the model's nominal accuracy.
//!
//! Draw order from the random source: decision draws (prediction, then
//! confidence) only on the zero and tie branches, then sentiment, then
//! processing time.

use crate::error::Result;
use crate::explainability::{Evidence, Signal};
use crate::labels::{Prediction, Sentiment};
use crate::lexicon::{self, SHORT_CONTENT_CHARS};
use crate::models;
use crate::random::RandomSource;
use serde::{Deserialize, Serialize};

/// Ceiling applied to margin-based confidence
const MAX_MARGIN_CONFIDENCE: f64 = 95.0;

/// Outcome of scoring a single text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub prediction: Prediction,
    /// Whole percent, never above the model's accuracy
    pub confidence: u32,
    pub sentiment: Sentiment,
    /// At most five explanations, in detection order
    pub features: Vec<String>,
    /// Model display name
    pub model: String,
    pub model_id: String,
    /// Cosmetic processing time in `[1200, 1700)` ms
    pub processing_time_ms: u64,
    pub fake_score: f64,
    pub real_score: f64,
}

impl AnalysisResult {
    /// Details block shown beneath the verdict
    pub fn format(&self) -> String {
        let mut lines = vec![
            format!("Prediction: {}", self.prediction),
            format!("Confidence: {}%", self.confidence),
            format!("Sentiment: {}", self.sentiment),
            "Key features:".to_string(),
        ];
        for feature in &self.features {
            lines.push(format!("  • {}", feature));
        }
        lines.push(format!("Model Used: {}", self.model));
        lines.push(format!("Processing Time: {}ms", self.processing_time_ms));
        lines.push("Analysis Method: Natural Language Processing + Machine Learning".to_string());
        lines.push(format!("Features Analyzed: {} key indicators", self.features.len()));
        lines.join("\n")
    }
}

/// Collect every signal the text triggers, in reporting order
pub fn collect_evidence(text: &str) -> Evidence {
    let text_lower = text.to_lowercase();
    let mut evidence = Evidence::new();

    for phrase in lexicon::fake_matches(&text_lower) {
        evidence.add(Signal::SuspiciousPhrase(phrase));
    }
    for phrase in lexicon::real_matches(&text_lower) {
        evidence.add(Signal::CrediblePhrase(phrase));
    }

    if text.chars().count() < SHORT_CONTENT_CHARS {
        evidence.add(Signal::ShortContent);
    }
    if lexicon::has_exclamation_run(text) {
        evidence.add(Signal::ExclamationRun);
    }
    if lexicon::has_capital_run(text) {
        evidence.add(Signal::CapitalRun);
    }

    evidence
}

fn margin_confidence(margin: f64) -> u32 {
    (70.0 + margin * 10.0).min(MAX_MARGIN_CONFIDENCE).round() as u32
}

/// Score `text` with the profile named `model_id`
///
/// Fails with `InvalidModel` before drawing any randomness when the
/// identifier is unknown.
pub fn score(text: &str, model_id: &str, rng: &mut dyn RandomSource) -> Result<AnalysisResult> {
    let profile = models::lookup(model_id)?;
    let evidence = collect_evidence(text);

    let fake_score = evidence.score(Prediction::Fake);
    let real_score = evidence.score(Prediction::Real);

    let (prediction, confidence) = if fake_score + real_score == 0.0 {
        let prediction = if rng.next_f64() > 0.3 {
            Prediction::Real
        } else {
            Prediction::Fake
        };
        (prediction, rng.below(30) + 60)
    } else if real_score > fake_score {
        (Prediction::Real, margin_confidence(real_score - fake_score))
    } else if fake_score > real_score {
        (Prediction::Fake, margin_confidence(fake_score - real_score))
    } else {
        let prediction = if rng.next_f64() > 0.5 {
            Prediction::Real
        } else {
            Prediction::Fake
        };
        (prediction, rng.below(20) + 50)
    };

    let confidence = confidence.min(profile.confidence_ceiling());

    let sentiment = Sentiment::ALL[rng.below(Sentiment::ALL.len() as u32) as usize];
    let features = evidence.features(text.chars().count(), sentiment);
    let processing_time_ms = u64::from(rng.below(500)) + 1200;

    tracing::debug!(
        model = profile.id,
        fake_score,
        real_score,
        signals = evidence.signals().len(),
        "scored text as {} ({}%)",
        prediction,
        confidence
    );

    Ok(AnalysisResult {
        prediction,
        confidence,
        sentiment,
        features,
        model: profile.name.to_string(),
        model_id: profile.id.to_string(),
        processing_time_ms,
        fake_score,
        real_score,
    })
}
