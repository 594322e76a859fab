// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2024 Hyperpolymath

//! Per-instance analysis session
//!
//! Orchestrates:
//! - Scoring with the session's random source
//! - Recording into the history ledger and folding into the counters
//! - Simulated inference latency with a single in-flight analysis
//!
//! A `Session` is the single writer of its ledger and counters. Wrap it in a
//! [`SharedSession`] when several tasks need to drive it.

use crate::error::{DetectorError, Result};
use crate::history::{HistoryEntry, HistoryLedger, DEFAULT_CAPACITY, DEFAULT_PREVIEW_CHARS};
use crate::input::{AnalysisInput, MIN_TEXT_CHARS};
use crate::models::{self, ModelProfile};
use crate::random::{ChaChaSource, RandomSource};
use crate::samples::SampleArticle;
use crate::scorer::{self, AnalysisResult};
use crate::stats::{CounterSeed, Counters, Statistics};
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Session tunables
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Seed for the random source; entropy when absent
    pub seed: Option<u64>,
    /// Initial counter values
    pub counters: CounterSeed,
    /// Entries kept in the history ledger
    pub history_capacity: usize,
    /// Characters kept in a history preview
    pub preview_chars: usize,
    /// Minimum text length accepted in text mode
    pub min_text_chars: usize,
    /// Simulated inference latency
    pub latency_ms: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            seed: None,
            counters: CounterSeed::default(),
            history_capacity: DEFAULT_CAPACITY,
            preview_chars: DEFAULT_PREVIEW_CHARS,
            min_text_chars: MIN_TEXT_CHARS,
            latency_ms: 2000,
        }
    }
}

impl SessionConfig {
    pub fn validate(&self) -> Result<()> {
        let seed = &self.counters;
        if seed.real + seed.fake != seed.total {
            return Err(DetectorError::InvalidConfig(format!(
                "counter seed real ({}) + fake ({}) must equal total ({})",
                seed.real, seed.fake, seed.total
            )));
        }
        if self.history_capacity == 0 {
            return Err(DetectorError::InvalidConfig(
                "history_capacity must be at least 1".to_string(),
            ));
        }
        if self.preview_chars == 0 {
            return Err(DetectorError::InvalidConfig(
                "preview_chars must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Load and validate a JSON config file; missing fields take defaults
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let config: Self = serde_json::from_str(&raw)
            .with_context(|| format!("Failed to parse config {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn latency(&self) -> Duration {
        Duration::from_millis(self.latency_ms)
    }
}

/// Session handle shared between tasks; the mutex serializes all writes
pub type SharedSession = Arc<tokio::sync::Mutex<Session>>;

static NEXT_SESSION_ID: AtomicU64 = AtomicU64::new(1);

/// Clears the in-flight flag when the pending analysis goes away
#[derive(Debug)]
struct BusyGuard(Arc<AtomicBool>);

impl Drop for BusyGuard {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// An analysis whose result becomes visible after the simulated latency
///
/// Cancelling, or dropping the handle or its `finish` future early, discards
/// the result. Nothing is recorded until [`Session::commit`] on the session
/// that started it.
#[derive(Debug)]
#[must_use = "a pending analysis does nothing unless finished"]
pub struct PendingAnalysis {
    session_id: u64,
    input: AnalysisInput,
    result: AnalysisResult,
    delay: Duration,
    _guard: BusyGuard,
}

impl PendingAnalysis {
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Wait out the latency and hand back the result
    pub async fn finish(self) -> CompletedAnalysis {
        tokio::time::sleep(self.delay).await;
        CompletedAnalysis {
            session_id: self.session_id,
            input: self.input,
            result: self.result,
        }
    }

    /// Abandon the analysis; the session becomes idle immediately
    pub fn cancel(self) {
        tracing::debug!("Analysis cancelled before completion");
    }
}

/// A finished analysis ready to be committed
#[derive(Debug, Clone)]
pub struct CompletedAnalysis {
    session_id: u64,
    input: AnalysisInput,
    result: AnalysisResult,
}

impl CompletedAnalysis {
    pub fn input(&self) -> &AnalysisInput {
        &self.input
    }

    pub fn result(&self) -> &AnalysisResult {
        &self.result
    }
}

/// Scorer state, history and statistics for one application instance
pub struct Session {
    id: u64,
    config: SessionConfig,
    ledger: HistoryLedger,
    counters: Counters,
    rng: Box<dyn RandomSource>,
    in_flight: Arc<AtomicBool>,
}

impl Session {
    /// Session drawing from ChaCha, seeded from the config or from entropy
    pub fn new(config: SessionConfig) -> Result<Self> {
        let rng: Box<dyn RandomSource> = match config.seed {
            Some(seed) => Box::new(ChaChaSource::seeded(seed)),
            None => Box::new(ChaChaSource::from_entropy()),
        };
        Self::with_random_source(config, rng)
    }

    pub fn with_random_source(config: SessionConfig, rng: Box<dyn RandomSource>) -> Result<Self> {
        config.validate()?;
        tracing::info!(
            seed = ?config.seed,
            history_capacity = config.history_capacity,
            "Session created with {} prior analyses",
            config.counters.total
        );
        Ok(Self {
            id: NEXT_SESSION_ID.fetch_add(1, Ordering::Relaxed),
            ledger: HistoryLedger::with_capacity(config.history_capacity),
            counters: Counters::from_seed(config.counters),
            config,
            rng,
            in_flight: Arc::new(AtomicBool::new(false)),
        })
    }

    pub fn into_shared(self) -> SharedSession {
        Arc::new(tokio::sync::Mutex::new(self))
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn list_models(&self) -> &'static [ModelProfile] {
        models::list_models()
    }

    /// Score `input` without recording it
    pub fn analyze(&mut self, input: &AnalysisInput) -> Result<AnalysisResult> {
        scorer::score(&input.text, &input.model_id, self.rng.as_mut())
    }

    /// Record `result` in the ledger and counters; returns the stored entry
    pub fn record_and_aggregate(&mut self, input: &AnalysisInput, result: AnalysisResult) -> HistoryEntry {
        tracing::info!(
            source = %input.source,
            "Recorded {} ({}%) from {}",
            result.prediction,
            result.confidence,
            result.model
        );
        self.counters.apply(&result);
        let entry = HistoryEntry::new(
            &input.text,
            input.source.label(),
            result,
            self.config.preview_chars,
        );
        self.ledger.record(entry.clone());
        entry
    }

    /// Analyze and record in one step, without simulated latency
    ///
    /// Refused with `Busy` while a pending analysis is alive.
    pub fn run(&mut self, input: &AnalysisInput) -> Result<HistoryEntry> {
        self.ensure_idle()?;
        let result = self.analyze(input)?;
        Ok(self.record_and_aggregate(input, result))
    }

    /// Start analyzing a built-in sample as text input, with the usual latency
    pub fn analyze_sample(&mut self, article: &SampleArticle, model_id: &str) -> Result<PendingAnalysis> {
        let input = self.text_input(article.text, model_id)?;
        self.start(input)
    }

    /// Text-mode input validated against this session's minimum length
    pub fn text_input(&self, text: &str, model_id: &str) -> Result<AnalysisInput> {
        AnalysisInput::from_text_with_min(text, model_id, self.config.min_text_chars)
    }

    /// History, most recent first
    pub fn history(&self) -> impl ExactSizeIterator<Item = &HistoryEntry> {
        self.ledger.list()
    }

    pub fn ledger(&self) -> &HistoryLedger {
        &self.ledger
    }

    pub fn statistics(&self) -> Statistics {
        self.counters.snapshot()
    }

    /// Full text of history entry `index` for another analysis
    pub fn reanalyze(&self, index: usize) -> Result<String> {
        match self.ledger.replay(index) {
            Ok(text) => Ok(text.to_string()),
            Err(err) => {
                tracing::warn!("Re-analysis refused: {}", err);
                Err(err)
            }
        }
    }

    /// Whether a pending analysis is still alive
    pub fn is_busy(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Score `input` now and release the result after the configured latency
    pub fn start(&mut self, input: AnalysisInput) -> Result<PendingAnalysis> {
        self.ensure_idle()?;
        let result = self.analyze(&input)?;
        self.in_flight.store(true, Ordering::Release);
        Ok(PendingAnalysis {
            session_id: self.id,
            input,
            result,
            delay: self.config.latency(),
            _guard: BusyGuard(Arc::clone(&self.in_flight)),
        })
    }

    fn ensure_idle(&self) -> Result<()> {
        if self.is_busy() {
            tracing::warn!("Analysis requested while another is in progress");
            return Err(DetectorError::Busy);
        }
        Ok(())
    }

    /// Record a finished analysis started by this session
    pub fn commit(&mut self, completed: CompletedAnalysis) -> Result<HistoryEntry> {
        let CompletedAnalysis {
            session_id,
            input,
            result,
        } = completed;
        if session_id != self.id {
            tracing::warn!("Refused analysis started by session {}", session_id);
            return Err(DetectorError::ForeignAnalysis);
        }
        Ok(self.record_and_aggregate(&input, result))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::history::ELLIPSIS;
    use crate::labels::Prediction;
    use crate::random::SequenceSource;
    use crate::samples::sample_articles;

    const FAKE_TEXT: &str = "You won't believe this miracle cure that doctors shocked by the results \
                             refuse to discuss, click here before it disappears!!";

    fn session_with(draws: &[f64]) -> Session {
        Session::with_random_source(
            SessionConfig::default(),
            Box::new(SequenceSource::new(draws.to_vec())),
        )
        .unwrap()
    }

    #[test]
    fn test_config_validation() {
        assert!(SessionConfig::default().validate().is_ok());

        let mut config = SessionConfig::default();
        config.counters.real = 40;
        assert!(matches!(config.validate(), Err(DetectorError::InvalidConfig(_))));

        let config = SessionConfig {
            history_capacity: 0,
            ..Default::default()
        };
        assert!(Session::new(config).is_err());
    }

    #[test]
    fn test_config_load_applies_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        std::io::Write::write_all(
            &mut file,
            br#"{"seed": 42, "counters": {"total": 10, "real": 6, "fake": 4}}"#,
        )
        .unwrap();

        let config = SessionConfig::load(file.path()).unwrap();
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.counters.total, 10);
        assert_eq!(config.history_capacity, 10);
        assert_eq!(config.latency_ms, 2000);
    }

    #[test]
    fn test_config_load_rejects_bad_seed() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        std::io::Write::write_all(&mut file, br#"{"counters": {"total": 3, "real": 1, "fake": 1}}"#)
            .unwrap();
        assert!(SessionConfig::load(file.path()).is_err());
    }

    #[test]
    fn test_record_and_aggregate() {
        let mut session = session_with(&[0.0]);
        let input = session.text_input(FAKE_TEXT, "svm").unwrap();
        let result = session.analyze(&input).unwrap();
        assert_eq!(result.prediction, Prediction::Fake);

        let entry = session.record_and_aggregate(&input, result.clone());
        assert_eq!(entry.source, "Text Input");
        assert_eq!(entry.model, "Support Vector Machine");
        assert_eq!(entry.result, result);
        assert!(entry.content.ends_with(ELLIPSIS));

        let stats = session.statistics();
        assert_eq!((stats.total, stats.real, stats.fake), (48, 34, 14));
        assert_eq!(session.history().len(), 1);
    }

    #[test]
    fn test_analyze_unknown_model() {
        let mut session = session_with(&[0.0]);
        let input = AnalysisInput::new(FAKE_TEXT, crate::input::InputSource::Text, "bert");
        assert_eq!(
            session.analyze(&input).unwrap_err(),
            DetectorError::InvalidModel("bert".to_string())
        );
        assert_eq!(session.statistics().total, 47);
    }

    #[test]
    fn test_reanalyze() {
        let mut session = session_with(&[0.0]);
        let short = "Data indicates a modest rise in rainfall across the region this spring.";
        session.run(&session.text_input(short, "roberta").unwrap()).unwrap();
        session.run(&session.text_input(FAKE_TEXT, "roberta").unwrap()).unwrap();

        assert!(matches!(
            session.reanalyze(0),
            Err(DetectorError::NonReplayable { index: 0 })
        ));
        assert_eq!(session.reanalyze(1).unwrap(), short);
        assert!(matches!(
            session.reanalyze(2),
            Err(DetectorError::IndexOutOfRange { index: 2, len: 2 })
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn test_samples_match_their_labels() {
        // the miracle-cure sample ties 1-1; a 0.0 draw breaks the tie towards FAKE
        let mut session = session_with(&[0.0]);
        for article in sample_articles() {
            let pending = session.analyze_sample(article, "random_forest").unwrap();
            assert!(session.is_busy());
            assert_eq!(pending.delay(), Duration::from_millis(2000));
            let entry = session.commit(pending.finish().await).unwrap();
            assert_eq!(entry.result.prediction, article.label, "{}", article.title);
        }
        assert_eq!(session.statistics().total, 51);
    }

    #[tokio::test(start_paused = true)]
    async fn test_no_recording_while_analysis_in_flight() {
        let mut session = session_with(&[0.0]);
        let input = session.text_input(FAKE_TEXT, "svm").unwrap();

        let pending = session.start(input.clone()).unwrap();
        assert_eq!(session.run(&input).unwrap_err(), DetectorError::Busy);
        assert_eq!(
            session.analyze_sample(&sample_articles()[0], "svm").unwrap_err(),
            DetectorError::Busy
        );
        assert_eq!(session.history().len(), 0);
        assert_eq!(session.statistics().total, 47);

        session.commit(pending.finish().await).unwrap();
        assert_eq!(session.history().len(), 1);
        assert_eq!(session.statistics().total, 48);
        assert!(session.run(&input).is_ok());
    }

    #[tokio::test(start_paused = true)]
    async fn test_commit_rejects_analysis_from_other_session() {
        let mut first = session_with(&[0.0]);
        let mut second = session_with(&[0.0]);
        let input = first.text_input(FAKE_TEXT, "roberta").unwrap();

        let completed = first.start(input).unwrap().finish().await;
        assert_eq!(completed.input().source.label(), "Text Input");
        assert_eq!(completed.result().prediction, Prediction::Fake);

        assert_eq!(
            second.commit(completed.clone()).unwrap_err(),
            DetectorError::ForeignAnalysis
        );
        assert_eq!(second.history().len(), 0);
        assert_eq!(second.statistics().total, 47);

        first.commit(completed).unwrap();
        assert_eq!(first.history().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_pending_analysis_waits_and_blocks_second_request() {
        let mut session = session_with(&[0.0]);
        let input = session.text_input(FAKE_TEXT, "random_forest").unwrap();

        let pending = session.start(input.clone()).unwrap();
        assert!(session.is_busy());
        assert_eq!(pending.delay(), Duration::from_millis(2000));
        assert_eq!(session.start(input).unwrap_err(), DetectorError::Busy);

        let started = tokio::time::Instant::now();
        let completed = pending.finish().await;
        assert!(started.elapsed() >= Duration::from_millis(2000));
        assert!(!session.is_busy());
        assert_eq!(session.statistics().total, 47);

        let entry = session.commit(completed).unwrap();
        assert_eq!(entry.result.prediction, Prediction::Fake);
        assert_eq!(session.statistics().total, 48);
        assert_eq!(session.history().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_discards_result() {
        let mut session = session_with(&[0.0]);
        let input = session.text_input(FAKE_TEXT, "svm").unwrap();

        session.start(input.clone()).unwrap().cancel();
        assert!(!session.is_busy());

        let pending = session.start(input).unwrap();
        let timed_out = tokio::time::timeout(Duration::from_millis(500), pending.finish()).await;
        assert!(timed_out.is_err());
        assert!(!session.is_busy());
        assert_eq!(session.history().len(), 0);
        assert_eq!(session.statistics().total, 47);
    }

    #[test]
    fn test_start_with_unknown_model_stays_idle() {
        let mut session = session_with(&[0.0]);
        let input = AnalysisInput::new(FAKE_TEXT, crate::input::InputSource::Text, "lstm");
        assert!(session.start(input).is_err());
        assert!(!session.is_busy());
    }

    #[tokio::test]
    async fn test_shared_session_serializes_writes() {
        let shared = session_with(&[0.2, 0.7]).into_shared();
        let mut handles = Vec::new();
        for _ in 0..5 {
            let shared = Arc::clone(&shared);
            handles.push(tokio::spawn(async move {
                let mut session = shared.lock().await;
                let input = session.text_input(FAKE_TEXT, "svm").unwrap();
                session.run(&input).unwrap();
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        let session = shared.lock().await;
        assert_eq!(session.statistics().total, 52);
        assert_eq!(session.statistics().fake, 18);
        assert_eq!(session.history().len(), 5);
    }
}
