// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2024 Hyperpolymath

//! Heuristic news credibility detector
//!
//! This crate provides:
//! - Static model profiles (accuracy, precision, recall, F1)
//! - Keyword lexicons and structural checks for sensationalist text
//! - A seedable scorer producing a REAL/FAKE verdict with explanations
//! - A bounded history ledger and running verdict statistics
//! - A session object with simulated, cancellable inference latency

pub mod error;
pub mod explainability;
pub mod history;
pub mod input;
pub mod labels;
pub mod lexicon;
pub mod models;
pub mod random;
pub mod samples;
pub mod scorer;
pub mod session;
pub mod stats;

pub use error::{DetectorError, Result};
pub use explainability::{Evidence, Signal};
pub use history::{HistoryEntry, HistoryLedger};
pub use input::{AnalysisInput, InputSource};
pub use labels::{Prediction, Sentiment};
pub use models::{list_models, ModelProfile};
pub use random::{ChaChaSource, RandomSource, SequenceSource};
pub use samples::{sample_articles, SampleArticle};
pub use scorer::{score, AnalysisResult};
pub use session::{CompletedAnalysis, PendingAnalysis, Session, SessionConfig, SharedSession};
pub use stats::{CounterSeed, Counters, Statistics};
