use csv::WriterBuilder;
use std::fs::File;
use std::io::Write;
use std::path::Path;
use tracing::info;

use crate::error::Result;
use crate::models::{Dataset, PerformanceBucket, FEATURE_DIMENSION};

/// Writes a dataset in the classifier's CSV-with-header format
///
/// The header row is `count, 11, 0-5, 5-10, 10-15, 15-20, 20+`; every following
/// row holds the 11 features and then the label.
pub struct DatasetWriter;

impl DatasetWriter {
    /// Header row for a dataset of `record_count` samples
    pub fn header(record_count: usize) -> Vec<String> {
        let mut header = vec![record_count.to_string(), FEATURE_DIMENSION.to_string()];
        header.extend(PerformanceBucket::ALL.iter().map(|bucket| bucket.range_label().to_string()));
        header
    }

    /// Write a dataset to a file, replacing any existing content
    pub fn write_path<P: AsRef<Path>>(path: P, dataset: &Dataset) -> Result<()> {
        info!("Writing {} records to {:?}", dataset.len(), path.as_ref());
        let file = File::create(path.as_ref())?;
        Self::write_to(file, dataset)
    }

    /// Write a dataset to any sink
    pub fn write_to<W: Write>(sink: W, dataset: &Dataset) -> Result<()> {
        // Header and data rows have different widths
        let mut writer = WriterBuilder::new().flexible(true).from_writer(sink);

        writer.write_record(Self::header(dataset.len()))?;

        for sample in dataset.samples() {
            let mut row: Vec<String> =
                sample.vector.features().iter().map(|value| value.to_string()).collect();
            row.push(sample.vector.label().label().to_string());
            writer.write_record(&row)?;
        }

        writer.flush()?;
        Ok(())
    }
}
