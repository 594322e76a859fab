// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2024 Hyperpolymath

//! Command-line front end for the news credibility detector
//!
//! Usage:
//!   news-detector article.txt --model svm
//!   news-detector --url https://example.com/story
//!   news-detector --samples --seed 42 --no-delay

use anyhow::{Context, Result};
use clap::Parser;
use news_detector::input::AnalysisInput;
use news_detector::{list_models, sample_articles, Session, SessionConfig};
use std::io::Read;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "news-detector")]
#[command(about = "Classify news text as real or fake with lexical heuristics")]
#[command(version)]
struct Args {
    /// Text files to analyze (reads stdin if none and no other source given)
    files: Vec<PathBuf>,

    /// Model profile (random_forest, svm, roberta)
    #[arg(short, long, default_value = "random_forest")]
    model: String,

    /// Random seed for reproducible verdicts
    #[arg(short, long)]
    seed: Option<u64>,

    /// Analyze simulated content for a URL
    #[arg(short, long)]
    url: Option<String>,

    /// Analyze the built-in sample articles
    #[arg(long)]
    samples: bool,

    /// Session configuration file (JSON)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print history entries as JSON
    #[arg(long)]
    json: bool,

    /// Skip the simulated inference latency
    #[arg(long)]
    no_delay: bool,

    /// List available model profiles
    #[arg(long)]
    list_models: bool,
}

fn collect_inputs(args: &Args, session: &Session) -> Result<Vec<AnalysisInput>> {
    let mut inputs = Vec::new();

    if let Some(ref url) = args.url {
        inputs.push(AnalysisInput::from_url(url, &args.model)?);
    }

    if args.samples {
        for article in sample_articles() {
            tracing::info!("Queued sample: {} ({})", article.title, article.outlet);
            inputs.push(session.text_input(article.text, &args.model)?);
        }
    }

    for path in &args.files {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let input = session
            .text_input(&text, &args.model)
            .with_context(|| format!("Rejected input {}", path.display()))?;
        inputs.push(input);
    }

    if inputs.is_empty() {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("Failed to read stdin")?;
        inputs.push(session.text_input(&text, &args.model)?);
    }

    Ok(inputs)
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    if args.list_models {
        println!("Available models:");
        println!("-----------------");
        for profile in list_models() {
            println!("{}\n", profile.format_metrics());
        }
        return Ok(());
    }

    let mut config = match args.config {
        Some(ref path) => SessionConfig::load(path)?,
        None => SessionConfig::default(),
    };
    if args.seed.is_some() {
        config.seed = args.seed;
    }
    if args.no_delay {
        config.latency_ms = 0;
    }

    let mut session = Session::new(config)?;
    tracing::debug!("Simulated latency: {}ms", session.config().latency_ms);
    let profile = news_detector::models::lookup(&args.model)?;
    tracing::info!("Model: {}", profile.format());

    let inputs = collect_inputs(&args, &session)?;

    for input in inputs {
        tracing::info!("Analyzing {} characters from {}", input.text.chars().count(), input.source);
        let pending = session.start(input)?;
        let completed = pending.finish().await;
        tracing::debug!(
            model = %completed.input().model_id,
            "Finished with {} ({}%)",
            completed.result().prediction,
            completed.result().confidence
        );
        let entry = session.commit(completed)?;

        if args.json {
            println!("{}", serde_json::to_string_pretty(&entry)?);
        } else {
            println!("\n{}", "=".repeat(60));
            println!("{}", entry.result.format());
            println!("{}", "-".repeat(60));
            println!("{}", entry.format());
        }
    }

    println!("\n{}", "=".repeat(60));
    println!("{}", session.statistics().format());
    println!("History: {} of {} entries", session.history().len(), session.ledger().capacity());

    Ok(())
}
