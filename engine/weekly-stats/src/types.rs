use serde::{Deserialize, Serialize};

/// Column names of the raw weekly stats table, in file order
pub const STAT_COLUMNS: [&str; 17] = [
    "ID",
    "Name",
    "Position",
    "Week",
    "Team",
    "Opp",
    "Att",
    "RushYds",
    "RushYds/Att",
    "RushTD",
    "Targets",
    "Rec",
    "PassYds",
    "PassTD",
    "Fum",
    "Lost",
    "FantasyPoints",
];

/// Number of cells every raw stats row must carry
pub const SCHEMA_WIDTH: usize = STAT_COLUMNS.len();

/// One player's box score for one week
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WeeklyStatRecord {
    /// Stable player identifier used for grouping
    pub player_id: String,
    /// Player name (e.g., "Adrian Peterson")
    pub name: String,
    /// Position (QB, RB, WR, TE)
    pub position: String,
    /// Team abbreviation (e.g., "MIN")
    pub team: String,
    /// Opponent team
    pub opponent: String,
    /// Week number, starting at 1
    pub week: u32,
    /// Rush attempts
    pub att: i32,
    /// Passing targets
    pub targets: i32,
    /// Rushing yards (can be negative)
    pub rush_yds: i32,
    /// Receiving/passing yards (can be negative)
    pub pass_yds: i32,
    /// Rushing touchdowns
    pub rush_td: i32,
    /// Receiving/passing touchdowns
    pub pass_td: i32,
    /// Fantasy points scored this week
    pub fantasy_points: f64,
}

impl WeeklyStatRecord {
    /// Rush attempts plus targets
    pub fn touches(&self) -> i64 {
        i64::from(self.att) + i64::from(self.targets)
    }

    /// Rushing plus passing yards
    pub fn total_yards(&self) -> i64 {
        i64::from(self.rush_yds) + i64::from(self.pass_yds)
    }

    /// Rushing plus passing touchdowns
    pub fn total_tds(&self) -> i64 {
        i64::from(self.rush_td) + i64::from(self.pass_td)
    }
}
