//! Error types for raw stats loading and indexing

use serde::Serialize;
use thiserror::Error;

/// Result type alias for weekly stats operations
pub type Result<T> = std::result::Result<T, StatsError>;

/// Fatal errors: the raw stats table cannot be read at all
#[derive(Error, Debug)]
pub enum StatsError {
    /// I/O errors opening or reading the raw stats file
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV stream errors (unreadable header or underlying read failure)
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Header row lacks one of the schema columns
    #[error("Raw stats header is missing column '{0}'")]
    MissingColumn(String),
}

/// Non-fatal data issues. The offending row or record is dropped and the run continues.
#[derive(Error, Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StatsIssue {
    /// Row cell count differs from the schema width
    #[error("Line {line}: expected {expected} columns, found {found}")]
    SchemaMismatch { line: u64, expected: usize, found: usize },

    /// Cell could not be parsed into its typed field
    #[error("Line {line}: invalid value '{value}' in column {column}")]
    InvalidStat { line: u64, column: String, value: String },

    /// Second record for a player-week already in the index
    #[error("Duplicate stats found for player {player_id} during week {week}")]
    DuplicateWeekEntry { player_id: String, week: u32 },

    /// Not enough weeks in the dataset to build any projection window
    #[error("Insufficient data to pull historical weekly data. Max week: {max_week}")]
    InsufficientHistory { max_week: u32 },
}

impl StatsIssue {
    /// Short stable name for grouping issues in reports
    pub fn kind(&self) -> &'static str {
        match self {
            StatsIssue::SchemaMismatch { .. } => "schema_mismatch",
            StatsIssue::InvalidStat { .. } => "invalid_stat",
            StatsIssue::DuplicateWeekEntry { .. } => "duplicate_week_entry",
            StatsIssue::InsufficientHistory { .. } => "insufficient_history",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_issue_display() {
        let issue = StatsIssue::DuplicateWeekEntry { player_id: "P1".to_string(), week: 3 };
        assert_eq!(issue.to_string(), "Duplicate stats found for player P1 during week 3");
        assert_eq!(issue.kind(), "duplicate_week_entry");

        let issue = StatsIssue::SchemaMismatch { line: 7, expected: 17, found: 15 };
        assert_eq!(issue.to_string(), "Line 7: expected 17 columns, found 15");
    }

    #[test]
    fn test_missing_column_display() {
        let err = StatsError::MissingColumn("Week".to_string());
        assert_eq!(err.to_string(), "Raw stats header is missing column 'Week'");
    }
}
