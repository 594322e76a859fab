// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2024 Hyperpolymath

//! Static model profiles
//!
//! Each profile documents the nominal evaluation figures of a named
//! classifier. No inference happens behind a profile: the scorer only uses
//! the accuracy figure as a ceiling on reported confidence.

use crate::error::{DetectorError, Result};
use serde::Serialize;

/// Nominal performance figures for a named classifier (percentages)
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ModelProfile {
    /// Lookup identifier (e.g. "random_forest")
    pub id: &'static str,
    /// Display name
    pub name: &'static str,
    pub accuracy: f64,
    pub precision: f64,
    pub recall: f64,
    pub f1_score: f64,
}

/// Identifier of the profile used when none is selected
pub const DEFAULT_MODEL: &str = "random_forest";

static MODEL_PROFILES: [ModelProfile; 3] = [
    ModelProfile {
        id: "random_forest",
        name: "Random Forest Classifier",
        accuracy: 99.95,
        precision: 99.94,
        recall: 99.96,
        f1_score: 99.95,
    },
    ModelProfile {
        id: "svm",
        name: "Support Vector Machine",
        accuracy: 99.55,
        precision: 99.57,
        recall: 99.53,
        f1_score: 99.55,
    },
    ModelProfile {
        id: "roberta",
        name: "RoBERTa Transformer",
        accuracy: 98.39,
        precision: 98.50,
        recall: 98.20,
        f1_score: 98.35,
    },
];

/// All known profiles in display order
pub fn list_models() -> &'static [ModelProfile] {
    &MODEL_PROFILES
}

/// Resolve a profile by identifier
pub fn lookup(id: &str) -> Result<&'static ModelProfile> {
    MODEL_PROFILES
        .iter()
        .find(|profile| profile.id == id)
        .ok_or_else(|| DetectorError::InvalidModel(id.to_string()))
}

impl ModelProfile {
    /// Highest whole-number confidence this model may report
    pub fn confidence_ceiling(&self) -> u32 {
        self.accuracy.floor() as u32
    }

    /// One-line summary shown next to the model selector
    pub fn format(&self) -> String {
        format!("{} ({:.2}% accuracy)", self.name, self.accuracy)
    }

    /// Full metrics block
    pub fn format_metrics(&self) -> String {
        format!(
            r#"{} [{}]
  Accuracy:  {:.2}%
  Precision: {:.2}%
  Recall:    {:.2}%
  F1 Score:  {:.2}%"#,
            self.name, self.id, self.accuracy, self.precision, self.recall, self.f1_score,
        )
    }
}
