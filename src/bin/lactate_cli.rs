// ABOUTME: Lactate CLI - command-line front end for the lactate threshold engine
// ABOUTME: Reads step tests from JSON files and prints threshold reports as JSON
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
//!
//! Usage:
//! ```bash
//! # Analyze one step test
//! lactate-cli analyze test.json
//!
//! # Use a custom configuration and compact output
//! lactate-cli analyze test.json --config thresholds.json --compact
//!
//! # Analyze several tests in parallel
//! lactate-cli batch athlete_a.json athlete_b.json
//!
//! # Print the effective configuration
//! lactate-cli config
//! ```

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use lactate_threshold::input::{load_step_test, resolve_config};
use lactate_threshold::intelligence::LactateThresholdEngine;
use lactate_threshold::logging::LoggingConfig;
use lactate_threshold::output::{analysis_output, batch_output, render_json};
use std::path::PathBuf;
use tracing::info;

#[derive(Parser)]
#[command(
    name = "lactate-cli",
    about = "Lactate threshold detection",
    long_about = "Computes aerobic (LT1) and anaerobic (LT2) lactate thresholds from incremental step tests."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// JSON configuration file (defaults plus LACTATE_* environment overrides otherwise)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Print single-line JSON
    #[arg(long, global = true)]
    compact: bool,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(long, short = 'v', global = true, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[non_exhaustive]
#[derive(Subcommand)]
enum Command {
    /// Analyze a single step test
    Analyze {
        /// Step test JSON file
        input: PathBuf,

        /// Include the three-zone training model
        #[arg(long)]
        zones: bool,
    },

    /// Analyze several step tests in parallel
    Batch {
        /// Step test JSON files
        #[arg(required = true)]
        inputs: Vec<PathBuf>,
    },

    /// Print the effective configuration
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    LoggingConfig::from_env()
        .with_verbosity(cli.verbose)
        .init()
        .context("failed to initialize logging")?;

    let config = resolve_config(cli.config.as_deref())?;

    let output = match cli.command {
        Command::Analyze { input, zones } => {
            let engine = LactateThresholdEngine::new(config)?;
            let test = load_step_test(&input)?;
            info!(file = %input.display(), stages = test.len(), "Analyzing step test");

            let report = engine.analyze(&test)?;
            analysis_output(&report, zones)
        }
        Command::Batch { inputs } => {
            let engine = LactateThresholdEngine::new(config)?;
            let tests = inputs
                .iter()
                .map(|path| load_step_test(path).with_context(|| path.display().to_string()))
                .collect::<Result<Vec<_>>>()?;
            batch_output(&inputs, engine.analyze_batch(&tests))
        }
        Command::Config => serde_json::to_value(&config)?,
    };

    println!("{}", render_json(&output, cli.compact)?);
    Ok(())
}
