use tracing::{debug, info};

use crate::models::{Dataset, Sample, SplitDatasets};

/// Which partition a sample belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Partition {
    Training,
    Testing,
}

/// Temporal train/test split: samples anchored at the latest week are held out for testing
pub struct DatasetSplitter {
    max_week: u32,
}

impl DatasetSplitter {
    /// Create a splitter for a dataset whose latest week is `max_week`
    pub fn new(max_week: u32) -> Self {
        Self { max_week }
    }

    /// Partition for a sample anchored at `week`
    pub fn route(&self, week: u32) -> Partition {
        if week == self.max_week {
            Partition::Testing
        } else {
            Partition::Training
        }
    }

    /// Split samples, keeping their relative order within each partition
    pub fn split<I>(&self, samples: I) -> SplitDatasets
    where
        I: IntoIterator<Item = Sample>,
    {
        let mut training = Dataset::new();
        let mut testing = Dataset::new();

        for sample in samples {
            match self.route(sample.week) {
                Partition::Testing => {
                    debug!(
                        "Adding week {} for player {} to testing data",
                        sample.week, sample.player_id
                    );
                    testing.push(sample);
                }
                Partition::Training => {
                    debug!(
                        "Adding week {} for player {} to training data",
                        sample.week, sample.player_id
                    );
                    training.push(sample);
                }
            }
        }

        info!(
            "Split {} training and {} testing samples at week {}",
            training.len(),
            testing.len(),
            self.max_week
        );

        SplitDatasets { training, testing }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{FeatureVector, PerformanceBucket, FEATURE_DIMENSION};

    fn sample(player_id: &str, week: u32) -> Sample {
        Sample {
            player_id: player_id.to_string(),
            week,
            vector: FeatureVector::new([week as f64; FEATURE_DIMENSION], PerformanceBucket::UnderFive),
        }
    }

    #[test]
    fn test_route_by_max_week() {
        let splitter = DatasetSplitter::new(9);
        assert_eq!(splitter.route(9), Partition::Testing);
        assert_eq!(splitter.route(8), Partition::Training);
        assert_eq!(splitter.route(4), Partition::Training);
    }

    #[test]
    fn test_split_conserves_count_and_order() {
        let samples = vec![
            sample("A", 4),
            sample("A", 5),
            sample("A", 6),
            sample("B", 5),
            sample("B", 6),
            sample("C", 4),
        ];
        let split = DatasetSplitter::new(6).split(samples.clone());

        assert_eq!(split.training.len() + split.testing.len(), samples.len());

        let training: Vec<_> =
            split.training.samples().iter().map(|s| (s.player_id.as_str(), s.week)).collect();
        assert_eq!(training, vec![("A", 4), ("A", 5), ("B", 5), ("C", 4)]);

        let testing: Vec<_> =
            split.testing.samples().iter().map(|s| (s.player_id.as_str(), s.week)).collect();
        assert_eq!(testing, vec![("A", 6), ("B", 6)]);
    }

    #[test]
    fn test_split_empty() {
        let split = DatasetSplitter::new(0).split(Vec::new());
        assert!(split.training.is_empty());
        assert!(split.testing.is_empty());
    }
}
