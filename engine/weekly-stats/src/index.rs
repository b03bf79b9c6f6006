use std::collections::BTreeMap;
use tracing::{info, warn};

use crate::error::StatsIssue;
use crate::types::WeeklyStatRecord;
use crate::WINDOW_WEEKS;

/// One player's records keyed by week
pub type PlayerWeeks = BTreeMap<u32, WeeklyStatRecord>;

/// Player Week Index - groups weekly records by player, then by week
///
/// Holds at most one record per player-week. The first record seen for a
/// player-week is kept and later ones are rejected.
#[derive(Debug, Clone, Default)]
pub struct PlayerWeekIndex {
    /// Map from player ID to that player's weekly records
    players: BTreeMap<String, PlayerWeeks>,

    /// Highest week seen across all players
    max_week: u32,

    /// Total number of indexed records
    record_count: usize,
}

impl PlayerWeekIndex {
    /// Create a new empty index
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an index from a full record sequence in a single pass
    ///
    /// Returns the index together with every duplicate rejected along the way,
    /// plus an insufficient-history warning when no week can anchor a window.
    pub fn build<I>(records: I) -> (Self, Vec<StatsIssue>)
    where
        I: IntoIterator<Item = WeeklyStatRecord>,
    {
        let mut index = Self::new();
        let mut issues = Vec::new();

        for record in records {
            if let Err(issue) = index.insert(record) {
                warn!("{}", issue);
                issues.push(issue);
            }
        }

        info!(
            "Stats grouped across {} players ({} records, max week {})",
            index.player_count(),
            index.record_count,
            index.max_week
        );

        if index.max_week < WINDOW_WEEKS {
            let issue = StatsIssue::InsufficientHistory { max_week: index.max_week };
            warn!("{}", issue);
            issues.push(issue);
        }

        (index, issues)
    }

    /// Insert one record, rejecting it if its player-week is already indexed
    pub fn insert(&mut self, record: WeeklyStatRecord) -> Result<(), StatsIssue> {
        let weeks = self.players.entry(record.player_id.clone()).or_default();

        if weeks.contains_key(&record.week) {
            return Err(StatsIssue::DuplicateWeekEntry {
                player_id: record.player_id,
                week: record.week,
            });
        }

        self.max_week = self.max_week.max(record.week);
        self.record_count += 1;
        weeks.insert(record.week, record);
        Ok(())
    }

    /// Highest week seen across all players (0 when empty)
    pub fn max_week(&self) -> u32 {
        self.max_week
    }

    /// Number of distinct players
    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    /// Number of indexed player-week records
    pub fn record_count(&self) -> usize {
        self.record_count
    }

    /// Check if the index is empty
    pub fn is_empty(&self) -> bool {
        self.record_count == 0
    }

    /// All players and their weekly records, ordered by player ID
    pub fn players(&self) -> &BTreeMap<String, PlayerWeeks> {
        &self.players
    }

    /// Record for one player-week
    pub fn get(&self, player_id: &str, week: u32) -> Option<&WeeklyStatRecord> {
        self.players.get(player_id).and_then(|weeks| weeks.get(&week))
    }
}
