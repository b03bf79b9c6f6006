//! Weekly Stats - raw player-week box scores
//!
//! Loads the flat weekly stats table produced by the stats scraper and groups
//! it into a per-player, per-week index that downstream feature building reads.

pub mod error;
pub mod index;
pub mod loader;
pub mod types;

pub use error::{Result, StatsError, StatsIssue};
pub use index::{PlayerWeekIndex, PlayerWeeks};
pub use loader::{LoadOutcome, RawStatsLoader};
pub use types::{WeeklyStatRecord, SCHEMA_WIDTH, STAT_COLUMNS};

/// Number of consecutive weeks a projection window spans (three prior weeks plus the anchor week)
pub const WINDOW_WEEKS: u32 = 4;
