//! # Command Line Interface
//!
//! `process` builds the datasets, `inspect` checks an emitted dataset file.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::info;

use crate::config::ProjectionConfig;
use crate::engine::ProjectionEngine;
use crate::models::{PerformanceBucket, RunReport, FEATURE_DIMENSION, FEATURE_NAMES};
use crate::reader::DatasetReader;

/// Projection dataset CLI
#[derive(Parser, Debug)]
#[command(name = "projection-data")]
#[command(about = "Builds training and testing datasets for the weekly fantasy performance classifier")]
pub struct Cli {
    /// TOML configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Log skipped windows and per-sample routing
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build training and testing datasets from raw weekly stats
    Process {
        /// Raw weekly stats CSV
        #[arg(long)]
        input: Option<PathBuf>,
        /// Training dataset output
        #[arg(long)]
        training: Option<PathBuf>,
        /// Testing dataset output
        #[arg(long)]
        testing: Option<PathBuf>,
        /// JSON run report output
        #[arg(long)]
        report: Option<PathBuf>,
        /// Build player windows in parallel
        #[arg(long)]
        parallel: bool,
        /// Worker threads for parallel builds
        #[arg(long)]
        threads: Option<usize>,
    },
    /// Check an emitted dataset and show its label distribution
    Inspect {
        /// Dataset file written by `process`
        file: PathBuf,
    },
}

/// CLI handler
pub struct CliHandler {
    config: ProjectionConfig,
}

impl CliHandler {
    /// Create a handler from an optional config file plus environment overrides
    pub fn new(config_path: Option<&Path>) -> Result<Self> {
        let mut config = match config_path {
            Some(path) => ProjectionConfig::from_file(path)
                .with_context(|| format!("Failed to load config from {}", path.display()))?,
            None => ProjectionConfig::default(),
        };
        config.apply_env();
        Ok(Self { config })
    }

    pub fn config(&self) -> &ProjectionConfig {
        &self.config
    }

    /// Handle CLI commands
    pub fn handle_command(&self, command: Commands) -> Result<()> {
        match command {
            Commands::Process { .. } => {
                let config = self.process_config(&command);
                self.process(config)?;
            }
            Commands::Inspect { file } => {
                self.inspect(&file)?;
            }
        }
        Ok(())
    }

    /// Configuration for a `process` run with command-line flags applied last
    pub fn process_config(&self, command: &Commands) -> ProjectionConfig {
        let mut config = self.config.clone();
        if let Commands::Process { input, training, testing, report, parallel, threads } = command {
            if let Some(input) = input {
                config.paths.raw_data = input.clone();
            }
            if let Some(training) = training {
                config.paths.training_data = training.clone();
            }
            if let Some(testing) = testing {
                config.paths.testing_data = testing.clone();
            }
            if let Some(report) = report {
                config.paths.report = Some(report.clone());
            }
            if *parallel {
                config.window.parallel = true;
            }
            if threads.is_some() {
                config.window.threads = *threads;
            }
        }
        config
    }

    fn process(&self, config: ProjectionConfig) -> Result<()> {
        println!("Processing data.");
        info!("Building datasets from {:?}", config.paths.raw_data);

        let engine = ProjectionEngine::new(config).context("Invalid configuration")?;
        let report = engine.run().context("Dataset build failed")?;

        print_report(&report, engine.config());
        Ok(())
    }

    fn inspect(&self, file: &Path) -> Result<()> {
        let dataset = DatasetReader::read_path(file)
            .with_context(|| format!("Failed to read dataset {}", file.display()))?;

        println!("📊 {}", file.display());
        println!("{}", "=".repeat(50));
        println!("Records: {}  Features: {}", dataset.len(), FEATURE_DIMENSION);
        println!("Columns: {}, label", FEATURE_NAMES.join(", "));
        for (bucket, count) in PerformanceBucket::ALL.iter().zip(dataset.label_counts()) {
            println!("  {:>6} pts: {}", bucket.range_label(), count);
        }
        Ok(())
    }
}

fn print_report(report: &RunReport, config: &ProjectionConfig) {
    println!("{}", "=".repeat(50));
    println!("Rows read:          {}", report.rows_read);
    println!("Records loaded:     {}", report.records_loaded);
    println!("Players indexed:    {}", report.players_indexed);
    println!("Max week:           {}", report.max_week);
    println!("Incomplete windows: {}", report.incomplete_windows);
    println!(
        "Training samples:   {} -> {}",
        report.training_samples,
        config.paths.training_data.display()
    );
    println!(
        "Testing samples:    {} -> {}",
        report.testing_samples,
        config.paths.testing_data.display()
    );

    if !report.issues.is_empty() {
        println!("⚠️  {} rows or records dropped:", report.issues.len());
        for kind in ["schema_mismatch", "invalid_stat", "duplicate_week_entry"] {
            let count = report.issue_count(kind);
            if count > 0 {
                println!("  {kind}: {count}");
            }
        }
        if report.issue_count("insufficient_history") > 0 {
            println!("  insufficient history: max week {}", report.max_week);
        }
    }
}
