use csv::ReaderBuilder;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::error::{ProjectionError, Result};
use crate::models::{FeatureVector, PerformanceBucket, FEATURE_DIMENSION};

/// A dataset file read back from disk
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedDataset {
    /// Class names from the header, in label order
    pub class_names: Vec<String>,
    /// Rows in file order
    pub vectors: Vec<FeatureVector>,
}

impl LoadedDataset {
    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }

    /// Row count per label, indexed by class id
    pub fn label_counts(&self) -> [usize; PerformanceBucket::COUNT] {
        let mut counts = [0; PerformanceBucket::COUNT];
        for vector in &self.vectors {
            counts[vector.label().label() as usize] += 1;
        }
        counts
    }
}

/// Reads datasets written by [`crate::writer::DatasetWriter`], checking them the way
/// the classifier's loader does: the header count must match the rows and every row
/// must carry exactly the declared feature dimension plus a label.
pub struct DatasetReader;

impl DatasetReader {
    pub fn read_path<P: AsRef<Path>>(path: P) -> Result<LoadedDataset> {
        info!("Reading dataset from {:?}", path.as_ref());
        let file = File::open(path.as_ref())?;
        Self::read_from(file, path.as_ref())
    }

    /// Read a dataset from any source; `origin` names it in error messages
    pub fn read_from<R: Read>(source: R, origin: &Path) -> Result<LoadedDataset> {
        let malformed = |reason: String| ProjectionError::malformed(PathBuf::from(origin), reason);

        let mut reader = ReaderBuilder::new().has_headers(false).flexible(true).from_reader(source);
        let mut records = reader.records();

        let header = records.next().ok_or_else(|| malformed("missing header row".to_string()))??;
        let declared_count: usize = header
            .get(0)
            .and_then(|value| value.parse().ok())
            .ok_or_else(|| malformed("header record count is not a number".to_string()))?;
        let dimension: usize = header
            .get(1)
            .and_then(|value| value.parse().ok())
            .ok_or_else(|| malformed("header feature dimension is not a number".to_string()))?;
        if dimension != FEATURE_DIMENSION {
            return Err(malformed(format!(
                "feature dimension {dimension}, expected {FEATURE_DIMENSION}"
            )));
        }
        let class_names: Vec<String> = header.iter().skip(2).map(str::to_string).collect();
        if class_names.len() != PerformanceBucket::COUNT {
            return Err(malformed(format!(
                "{} class names in header, expected {}",
                class_names.len(),
                PerformanceBucket::COUNT
            )));
        }

        let mut vectors = Vec::new();
        for result in records {
            let row = result?;
            let line = row.position().map(|p| p.line()).unwrap_or_default();

            if row.len() != FEATURE_DIMENSION + 1 {
                return Err(malformed(format!(
                    "line {line}: {} values, expected {}",
                    row.len(),
                    FEATURE_DIMENSION + 1
                )));
            }

            let mut features = [0.0; FEATURE_DIMENSION];
            for (slot, value) in features.iter_mut().zip(row.iter()) {
                *slot = value
                    .parse()
                    .map_err(|_| malformed(format!("line {line}: invalid feature '{value}'")))?;
            }

            let label_text = &row[FEATURE_DIMENSION];
            let label = label_text
                .parse::<u8>()
                .ok()
                .and_then(PerformanceBucket::from_label)
                .ok_or_else(|| malformed(format!("line {line}: invalid label '{label_text}'")))?;

            vectors.push(FeatureVector::new(features, label));
        }

        if vectors.len() != declared_count {
            return Err(malformed(format!(
                "header declares {declared_count} records, found {}",
                vectors.len()
            )));
        }

        Ok(LoadedDataset { class_names, vectors })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Dataset, Sample};
    use crate::writer::DatasetWriter;

    fn read(text: &str) -> Result<LoadedDataset> {
        DatasetReader::read_from(text.as_bytes(), Path::new("model_data.test.csv"))
    }

    #[test]
    fn test_reads_written_dataset() {
        let mut dataset = Dataset::new();
        for (week, points) in [(4, 3.5), (5, 12.0), (6, 31.0)] {
            dataset.push(Sample {
                player_id: "P1".to_string(),
                week,
                vector: FeatureVector::new(
                    [22.0 / 3.0; FEATURE_DIMENSION],
                    PerformanceBucket::from_points(points),
                ),
            });
        }

        let mut buffer = Vec::new();
        DatasetWriter::write_to(&mut buffer, &dataset).unwrap();
        let loaded = DatasetReader::read_from(buffer.as_slice(), Path::new("memory")).unwrap();

        assert_eq!(loaded.len(), 3);
        assert_eq!(loaded.class_names, vec!["0-5", "5-10", "10-15", "15-20", "20+"]);
        assert_eq!(loaded.label_counts(), [1, 0, 1, 0, 1]);
        let expected: Vec<_> = dataset.samples().iter().map(|s| s.vector.clone()).collect();
        assert_eq!(loaded.vectors, expected);
    }

    #[test]
    fn test_empty_dataset() {
        let loaded = read("0,11,0-5,5-10,10-15,15-20,20+\n").unwrap();
        assert!(loaded.is_empty());
    }

    #[test]
    fn test_count_mismatch_is_rejected() {
        let err = read("2,11,0-5,5-10,10-15,15-20,20+\n1,1,1,1,1,1,1,1,1,1,1,1\n").unwrap_err();
        assert!(err.to_string().contains("declares 2 records, found 1"));
    }

    #[test]
    fn test_oversized_declared_count_is_rejected() {
        let err = read("18446744073709551615,11,0-5,5-10,10-15,15-20,20+\n").unwrap_err();
        assert!(matches!(err, ProjectionError::MalformedDataset { .. }));
        assert!(err.to_string().contains("declares 18446744073709551615 records, found 0"));
    }

    #[test]
    fn test_wrong_dimension_is_rejected() {
        let err = read("0,10,0-5,5-10,10-15,15-20,20+\n").unwrap_err();
        assert!(matches!(err, ProjectionError::MalformedDataset { .. }));
    }

    #[test]
    fn test_short_row_is_rejected() {
        let err = read("1,11,0-5,5-10,10-15,15-20,20+\n1,1,1\n").unwrap_err();
        assert!(err.to_string().contains("3 values, expected 12"));
    }

    #[test]
    fn test_label_out_of_range_is_rejected() {
        let err = read("1,11,0-5,5-10,10-15,15-20,20+\n1,1,1,1,1,1,1,1,1,1,1,5\n").unwrap_err();
        assert!(err.to_string().contains("invalid label '5'"));
    }

    #[test]
    fn test_missing_header() {
        assert!(read("").is_err());
    }
}
