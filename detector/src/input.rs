// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2024 Hyperpolymath

//! Analysis requests and input-mode validation

use crate::error::{DetectorError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Minimum text length accepted in text mode
pub const MIN_TEXT_CHARS: usize = 50;

/// Prefix of the placeholder content produced for URL mode
pub const URL_CONTENT_PREFIX: &str = "Simulated content from URL: ";

/// Where the analyzed text came from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum InputSource {
    /// Pasted text
    Text,
    /// Fetched (simulated) from a URL
    Url(String),
}

impl InputSource {
    pub fn label(&self) -> &str {
        match self {
            InputSource::Text => "Text Input",
            InputSource::Url(url) => url,
        }
    }
}

impl fmt::Display for InputSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A request to score one text with one model
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisInput {
    pub text: String,
    pub source: InputSource,
    pub model_id: String,
}

impl AnalysisInput {
    /// Build a request without input-mode validation
    pub fn new(text: impl Into<String>, source: InputSource, model_id: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            source,
            model_id: model_id.into(),
        }
    }

    /// Text mode: trimmed text of at least `min_chars` characters
    pub fn from_text_with_min(text: &str, model_id: &str, min_chars: usize) -> Result<Self> {
        let trimmed = text.trim();
        let len = trimmed.chars().count();
        if len < min_chars {
            return Err(DetectorError::InputTooShort { len, min: min_chars });
        }
        Ok(Self::new(trimmed, InputSource::Text, model_id))
    }

    /// Text mode with the default minimum of [`MIN_TEXT_CHARS`]
    pub fn from_text(text: &str, model_id: &str) -> Result<Self> {
        Self::from_text_with_min(text, model_id, MIN_TEXT_CHARS)
    }

    /// URL mode: content extraction is simulated from the URL itself
    pub fn from_url(url: &str, model_id: &str) -> Result<Self> {
        let url = url.trim();
        if url.is_empty() {
            return Err(DetectorError::EmptyUrl);
        }
        Ok(Self::new(
            format!("{}{}", URL_CONTENT_PREFIX, url),
            InputSource::Url(url.to_string()),
            model_id,
        ))
    }
}
