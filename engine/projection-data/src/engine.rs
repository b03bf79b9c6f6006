use chrono::Utc;
use std::fs;
use tracing::info;
use weekly_stats::{LoadOutcome, PlayerWeekIndex, RawStatsLoader};

use crate::{
    config::ProjectionConfig,
    error::Result,
    models::{RunReport, SplitDatasets},
    splitter::DatasetSplitter,
    window::FeatureWindowBuilder,
    writer::DatasetWriter,
};

/// Batch pipeline: load raw stats, index by player-week, build windows, split, write
pub struct ProjectionEngine {
    config: ProjectionConfig,
    builder: FeatureWindowBuilder,
}

impl ProjectionEngine {
    pub fn new(config: ProjectionConfig) -> Result<Self> {
        config.validate()?;
        let builder = FeatureWindowBuilder::new(config.window.clone());
        Ok(Self { config, builder })
    }

    pub fn config(&self) -> &ProjectionConfig {
        &self.config
    }

    /// Run the full pipeline against the configured files
    pub fn run(&self) -> Result<RunReport> {
        let loaded = RawStatsLoader::load_path(&self.config.paths.raw_data)?;
        let (datasets, report) = self.build_datasets(loaded)?;

        DatasetWriter::write_path(&self.config.paths.training_data, &datasets.training)?;
        DatasetWriter::write_path(&self.config.paths.testing_data, &datasets.testing)?;

        if let Some(report_path) = &self.config.paths.report {
            info!("Writing run report to {:?}", report_path);
            fs::write(report_path, serde_json::to_string_pretty(&report)?)?;
        }

        Ok(report)
    }

    /// Index loaded records, build windows and split them; no file output
    pub fn build_datasets(&self, loaded: LoadOutcome) -> Result<(SplitDatasets, RunReport)> {
        let LoadOutcome { rows_read, records, mut issues } = loaded;
        let records_loaded = records.len();

        let (index, index_issues) = PlayerWeekIndex::build(records);
        issues.extend(index_issues);

        let windows = self.builder.build(&index)?;
        let samples_emitted = windows.samples.len();
        let datasets = DatasetSplitter::new(index.max_week()).split(windows.samples);

        let report = RunReport {
            generated_at: Utc::now(),
            rows_read,
            records_loaded,
            players_indexed: index.player_count(),
            records_indexed: index.record_count(),
            max_week: index.max_week(),
            incomplete_windows: windows.incomplete_windows,
            samples_emitted,
            training_samples: datasets.training.len(),
            testing_samples: datasets.testing.len(),
            training_labels: datasets.training.label_counts(),
            testing_labels: datasets.testing.label_counts(),
            issues,
        };

        Ok((datasets, report))
    }
}
