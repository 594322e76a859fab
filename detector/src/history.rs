// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2024 Hyperpolymath

//! Bounded, most-recent-first ledger of past analyses

use crate::error::{DetectorError, Result};
use crate::scorer::AnalysisResult;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Marker appended to previews cut at the preview length
pub const ELLIPSIS: &str = "...";

/// Default number of entries retained
pub const DEFAULT_CAPACITY: usize = 10;

/// Default preview length in characters
pub const DEFAULT_PREVIEW_CHARS: usize = 100;

/// A recorded analysis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// Input text, or its first `preview_chars` characters plus [`ELLIPSIS`]
    pub content: String,
    /// "Text Input" or the analyzed URL
    pub source: String,
    pub result: AnalysisResult,
    pub timestamp: DateTime<Utc>,
    /// Model display name
    pub model: String,
}

impl HistoryEntry {
    pub fn new(text: &str, source: &str, result: AnalysisResult, preview_chars: usize) -> Self {
        Self {
            content: preview(text, preview_chars),
            source: source.to_string(),
            model: result.model.clone(),
            result,
            timestamp: Utc::now(),
        }
    }

    /// Whether `content` can be fed back for an identical analysis
    pub fn is_replayable(&self) -> bool {
        !self.content.ends_with(ELLIPSIS)
    }

    /// One-line listing: verdict, confidence, model and local time
    pub fn format(&self) -> String {
        format!(
            "[{}] {}% confidence | {} | {}\n    {}",
            self.result.prediction,
            self.result.confidence,
            self.model,
            self.timestamp.format("%Y-%m-%d %H:%M:%S UTC"),
            self.content
        )
    }
}

/// First `max_chars` characters of `text`, with [`ELLIPSIS`] when cut
pub fn preview(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => format!("{}{}", &text[..byte_idx], ELLIPSIS),
        None => text.to_string(),
    }
}

/// Capacity-bounded log, newest first
#[derive(Debug, Clone, Serialize)]
pub struct HistoryLedger {
    entries: VecDeque<HistoryEntry>,
    capacity: usize,
}

impl Default for HistoryLedger {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }
}

impl HistoryLedger {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity + 1),
            capacity,
        }
    }

    /// Prepend `entry`, evicting the oldest when over capacity
    pub fn record(&mut self, entry: HistoryEntry) {
        self.entries.push_front(entry);
        if self.entries.len() > self.capacity {
            if let Some(evicted) = self.entries.pop_back() {
                tracing::debug!("History full, evicted entry from {}", evicted.timestamp);
            }
        }
    }

    /// Entries, most recent first
    pub fn list(&self) -> impl ExactSizeIterator<Item = &HistoryEntry> {
        self.entries.iter()
    }

    pub fn get(&self, index: usize) -> Result<&HistoryEntry> {
        self.entries.get(index).ok_or(DetectorError::IndexOutOfRange {
            index,
            len: self.entries.len(),
        })
    }

    /// Stored text for entry `index`, refusing truncated previews
    pub fn replay(&self, index: usize) -> Result<&str> {
        let entry = self.get(index)?;
        if !entry.is_replayable() {
            return Err(DetectorError::NonReplayable { index });
        }
        Ok(&entry.content)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
