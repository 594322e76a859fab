// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2024 Hyperpolymath

//! Error taxonomy for the detector core
//!
//! Every variant is recoverable by the caller: surface a message and take
//! no further action. The core performs no I/O, so nothing here is transient.

use thiserror::Error;

/// Errors returned by the scoring, ledger and session operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DetectorError {
    /// Model identifier does not resolve to a known profile
    #[error("unknown model '{0}'")]
    InvalidModel(String),

    /// Ledger access past the number of stored entries
    #[error("history index {index} out of range (len {len})")]
    IndexOutOfRange { index: usize, len: usize },

    /// Entry content is a truncated preview and cannot be analyzed again
    #[error("history entry {index} holds a truncated preview and cannot be re-analyzed")]
    NonReplayable { index: usize },

    /// An analysis is already in flight for this session
    #[error("an analysis is already in progress")]
    Busy,

    /// Completed analysis committed to a session that did not start it
    #[error("analysis was started by a different session")]
    ForeignAnalysis,

    /// Text input below the minimum length
    #[error("text input has {len} characters, at least {min} required")]
    InputTooShort { len: usize, min: usize },

    /// URL mode selected without a URL
    #[error("a non-empty URL is required")]
    EmptyUrl,

    /// Session configuration failed validation
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, DetectorError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            DetectorError::InvalidModel("xgboost".to_string()).to_string(),
            "unknown model 'xgboost'"
        );
        assert_eq!(
            DetectorError::IndexOutOfRange { index: 12, len: 3 }.to_string(),
            "history index 12 out of range (len 3)"
        );
        assert!(DetectorError::NonReplayable { index: 0 }
            .to_string()
            .contains("truncated preview"));
    }
}
