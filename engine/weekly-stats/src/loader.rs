use csv::{ReaderBuilder, StringRecord, Trim};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;
use tracing::{info, warn};

use crate::error::{Result, StatsError, StatsIssue};
use crate::types::{WeeklyStatRecord, SCHEMA_WIDTH};

/// Records parsed from a raw stats table along with the rows that were dropped
#[derive(Debug, Clone, Default)]
pub struct LoadOutcome {
    /// Data rows seen after the header
    pub rows_read: usize,
    /// Successfully parsed records, in file order
    pub records: Vec<WeeklyStatRecord>,
    /// Rows that were dropped and why
    pub issues: Vec<StatsIssue>,
}

/// Header positions of the columns a record is built from
#[derive(Debug, Clone, Copy)]
struct ColumnMap {
    player_id: usize,
    name: usize,
    position: usize,
    week: usize,
    team: usize,
    opponent: usize,
    att: usize,
    rush_yds: usize,
    rush_td: usize,
    targets: usize,
    pass_yds: usize,
    pass_td: usize,
    fantasy_points: usize,
}

impl ColumnMap {
    fn from_headers(headers: &StringRecord) -> Result<Self> {
        let find = |name: &str| {
            headers
                .iter()
                .position(|header| header == name)
                .ok_or_else(|| StatsError::MissingColumn(name.to_string()))
        };

        Ok(Self {
            player_id: find("ID")?,
            name: find("Name")?,
            position: find("Position")?,
            week: find("Week")?,
            team: find("Team")?,
            opponent: find("Opp")?,
            att: find("Att")?,
            rush_yds: find("RushYds")?,
            rush_td: find("RushTD")?,
            targets: find("Targets")?,
            pass_yds: find("PassYds")?,
            pass_td: find("PassTD")?,
            fantasy_points: find("FantasyPoints")?,
        })
    }

    fn parse_record(
        &self,
        row: &StringRecord,
        line: u64,
    ) -> std::result::Result<WeeklyStatRecord, StatsIssue> {
        let week: u32 = parse_cell(row, self.week, "Week", line)?;
        if week == 0 {
            return Err(invalid_stat(row, self.week, "Week", line));
        }

        let fantasy_points: f64 = parse_cell(row, self.fantasy_points, "FantasyPoints", line)?;
        if !fantasy_points.is_finite() {
            return Err(invalid_stat(row, self.fantasy_points, "FantasyPoints", line));
        }

        Ok(WeeklyStatRecord {
            player_id: text_cell(row, self.player_id),
            name: text_cell(row, self.name),
            position: text_cell(row, self.position),
            team: text_cell(row, self.team),
            opponent: text_cell(row, self.opponent),
            week,
            att: parse_cell(row, self.att, "Att", line)?,
            targets: parse_cell(row, self.targets, "Targets", line)?,
            rush_yds: parse_cell(row, self.rush_yds, "RushYds", line)?,
            pass_yds: parse_cell(row, self.pass_yds, "PassYds", line)?,
            rush_td: parse_cell(row, self.rush_td, "RushTD", line)?,
            pass_td: parse_cell(row, self.pass_td, "PassTD", line)?,
            fantasy_points,
        })
    }
}

fn text_cell(row: &StringRecord, index: usize) -> String {
    row.get(index).unwrap_or_default().to_string()
}

fn parse_cell<T: FromStr>(
    row: &StringRecord,
    index: usize,
    column: &str,
    line: u64,
) -> std::result::Result<T, StatsIssue> {
    row.get(index)
        .and_then(|value| value.parse::<T>().ok())
        .ok_or_else(|| invalid_stat(row, index, column, line))
}

fn invalid_stat(row: &StringRecord, index: usize, column: &str, line: u64) -> StatsIssue {
    StatsIssue::InvalidStat {
        line,
        column: column.to_string(),
        value: row.get(index).unwrap_or_default().to_string(),
    }
}

/// Loader for the raw weekly stats CSV table
///
/// Only the row shape and the typed cells are checked here. Duplicate weeks and
/// missing history are the index's concern.
pub struct RawStatsLoader;

impl RawStatsLoader {
    /// Load raw stats from a CSV file on disk
    pub fn load_path<P: AsRef<Path>>(path: P) -> Result<LoadOutcome> {
        info!("Loading raw data from: {:?}", path.as_ref());
        let file = File::open(path.as_ref())?;
        Self::load_reader(file)
    }

    /// Load raw stats from any CSV source with a header row
    pub fn load_reader<R: Read>(source: R) -> Result<LoadOutcome> {
        let mut reader =
            ReaderBuilder::new().has_headers(true).flexible(true).trim(Trim::All).from_reader(source);

        let headers = reader.headers()?.clone();
        let columns = ColumnMap::from_headers(&headers)?;

        let mut outcome = LoadOutcome::default();
        for result in reader.byte_records() {
            let raw = result?;
            outcome.rows_read += 1;
            let line = raw.position().map(|p| p.line()).unwrap_or(outcome.rows_read as u64 + 1);

            let row = match StringRecord::from_byte_record(raw) {
                Ok(row) => row,
                Err(err) => {
                    let field = err.utf8_error().field();
                    let raw = err.into_byte_record();
                    let issue = StatsIssue::InvalidStat {
                        line,
                        column: headers.get(field).unwrap_or_default().to_string(),
                        value: String::from_utf8_lossy(raw.get(field).unwrap_or_default())
                            .into_owned(),
                    };
                    warn!("Skipping raw stats row: {}", issue);
                    outcome.issues.push(issue);
                    continue;
                }
            };

            if row.len() != SCHEMA_WIDTH {
                let issue =
                    StatsIssue::SchemaMismatch { line, expected: SCHEMA_WIDTH, found: row.len() };
                warn!("Skipping raw stats row: {}", issue);
                outcome.issues.push(issue);
                continue;
            }

            match columns.parse_record(&row, line) {
                Ok(record) => outcome.records.push(record),
                Err(issue) => {
                    warn!("Skipping raw stats row: {}", issue);
                    outcome.issues.push(issue);
                }
            }
        }

        info!(
            "Loaded {} entries ({} rows read, {} dropped)",
            outcome.records.len(),
            outcome.rows_read,
            outcome.issues.len()
        );

        Ok(outcome)
    }
}
