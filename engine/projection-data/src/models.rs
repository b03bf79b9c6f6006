use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use weekly_stats::StatsIssue;

/// Number of features in every projection sample
pub const FEATURE_DIMENSION: usize = 11;

/// Feature column names, in emitted order
pub const FEATURE_NAMES: [&str; FEATURE_DIMENSION] = [
    "avg_attempts",
    "avg_yards",
    "avg_tds",
    "avg_points",
    "att",
    "rush_yds",
    "rush_td",
    "targets",
    "pass_yds",
    "pass_td",
    "fantasy_points",
];

/// Width of each fantasy points bucket
pub const BUCKET_WIDTH_POINTS: f64 = 5.0;

/// Discrete weekly performance class used as the classifier label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PerformanceBucket {
    /// [0, 5) points
    UnderFive,
    /// [5, 10) points
    FiveToTen,
    /// [10, 15) points
    TenToFifteen,
    /// [15, 20) points
    FifteenToTwenty,
    /// 20 points or more
    TwentyPlus,
}

impl PerformanceBucket {
    /// All buckets in label order
    pub const ALL: [PerformanceBucket; 5] = [
        PerformanceBucket::UnderFive,
        PerformanceBucket::FiveToTen,
        PerformanceBucket::TenToFifteen,
        PerformanceBucket::FifteenToTwenty,
        PerformanceBucket::TwentyPlus,
    ];

    /// Number of label classes
    pub const COUNT: usize = Self::ALL.len();

    /// Bucket for a week's fantasy points: floor(points / 5), clamped to the label range
    pub fn from_points(points: f64) -> Self {
        let bucket = (points / BUCKET_WIDTH_POINTS).floor();
        let top = (Self::COUNT - 1) as f64;
        // NaN falls through clamp unchanged and casts to 0
        Self::ALL[bucket.clamp(0.0, top) as usize]
    }

    /// Bucket for a numeric class id
    pub fn from_label(label: u8) -> Option<Self> {
        Self::ALL.get(label as usize).copied()
    }

    /// Numeric class id (0-4)
    pub fn label(self) -> u8 {
        self as u8
    }

    /// Points range name used in dataset headers
    pub fn range_label(self) -> &'static str {
        match self {
            PerformanceBucket::UnderFive => "0-5",
            PerformanceBucket::FiveToTen => "5-10",
            PerformanceBucket::TenToFifteen => "10-15",
            PerformanceBucket::FifteenToTwenty => "15-20",
            PerformanceBucket::TwentyPlus => "20+",
        }
    }
}

/// Features plus label for one projection sample
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeatureVector {
    features: [f64; FEATURE_DIMENSION],
    label: PerformanceBucket,
}

impl FeatureVector {
    /// Create a new feature vector
    pub fn new(features: [f64; FEATURE_DIMENSION], label: PerformanceBucket) -> Self {
        Self { features, label }
    }

    /// Features in emitted order
    pub fn features(&self) -> &[f64; FEATURE_DIMENSION] {
        &self.features
    }

    /// Performance bucket of the anchor week
    pub fn label(&self) -> PerformanceBucket {
        self.label
    }
}

/// A feature vector tagged with the player and week it projects
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Sample {
    pub player_id: String,
    /// Anchor week: the week whose outcome the vector predicts
    pub week: u32,
    pub vector: FeatureVector,
}

/// Ordered sequence of samples forming one partition
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Dataset {
    samples: Vec<Sample>,
}

impl Dataset {
    /// Create a new empty dataset
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, sample: Sample) {
        self.samples.push(sample);
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    /// Sample count per label, indexed by class id
    pub fn label_counts(&self) -> [usize; PerformanceBucket::COUNT] {
        let mut counts = [0; PerformanceBucket::COUNT];
        for sample in &self.samples {
            counts[sample.vector.label().label() as usize] += 1;
        }
        counts
    }
}

/// Training and testing partitions of one run
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SplitDatasets {
    pub training: Dataset,
    pub testing: Dataset,
}

/// Summary of one dataset build
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub generated_at: DateTime<Utc>,
    pub rows_read: usize,
    pub records_loaded: usize,
    pub players_indexed: usize,
    pub records_indexed: usize,
    pub max_week: u32,
    pub incomplete_windows: usize,
    pub samples_emitted: usize,
    pub training_samples: usize,
    pub testing_samples: usize,
    pub training_labels: [usize; PerformanceBucket::COUNT],
    pub testing_labels: [usize; PerformanceBucket::COUNT],
    pub issues: Vec<StatsIssue>,
}

impl RunReport {
    /// Number of reported issues of the given kind
    pub fn issue_count(&self, kind: &str) -> usize {
        self.issues.iter().filter(|issue| issue.kind() == kind).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_bucket_boundaries() {
        assert_eq!(PerformanceBucket::from_points(0.0), PerformanceBucket::UnderFive);
        assert_eq!(PerformanceBucket::from_points(4.99), PerformanceBucket::UnderFive);
        assert_eq!(PerformanceBucket::from_points(5.0), PerformanceBucket::FiveToTen);
        assert_eq!(PerformanceBucket::from_points(14.9), PerformanceBucket::TenToFifteen);
        assert_eq!(PerformanceBucket::from_points(19.99), PerformanceBucket::FifteenToTwenty);
        assert_eq!(PerformanceBucket::from_points(20.0), PerformanceBucket::TwentyPlus);
        assert_eq!(PerformanceBucket::from_points(47.3), PerformanceBucket::TwentyPlus);
    }

    #[test]
    fn test_negative_points_land_in_lowest_bucket() {
        assert_eq!(PerformanceBucket::from_points(-0.1), PerformanceBucket::UnderFive);
        assert_eq!(PerformanceBucket::from_points(-12.0), PerformanceBucket::UnderFive);
    }

    #[test]
    fn test_label_round_trip_and_names() {
        for (id, bucket) in PerformanceBucket::ALL.iter().enumerate() {
            assert_eq!(bucket.label() as usize, id);
            assert_eq!(PerformanceBucket::from_label(id as u8), Some(*bucket));
        }
        assert_eq!(PerformanceBucket::from_label(5), None);

        let names: Vec<_> = PerformanceBucket::ALL.iter().map(|b| b.range_label()).collect();
        assert_eq!(names, vec!["0-5", "5-10", "10-15", "15-20", "20+"]);
    }

    #[test]
    fn test_dataset_label_counts() {
        let mut dataset = Dataset::new();
        for (week, points) in [(4, 3.0), (5, 22.0), (6, 21.0)] {
            dataset.push(Sample {
                player_id: "P1".to_string(),
                week,
                vector: FeatureVector::new(
                    [0.0; FEATURE_DIMENSION],
                    PerformanceBucket::from_points(points),
                ),
            });
        }

        assert_eq!(dataset.len(), 3);
        assert_eq!(dataset.label_counts(), [1, 0, 0, 0, 2]);
    }

    proptest! {
        #[test]
        fn prop_label_matches_floor_rule(points in 0.0f64..200.0) {
            let label = PerformanceBucket::from_points(points).label();
            let expected = ((points / 5.0).floor() as u8).min(4);
            prop_assert_eq!(label, expected);
            prop_assert!(label <= 4);
        }

        #[test]
        fn prop_label_always_in_range(points in proptest::num::f64::ANY) {
            prop_assert!(PerformanceBucket::from_points(points).label() <= 4);
        }
    }
}
