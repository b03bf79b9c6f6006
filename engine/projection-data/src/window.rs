use rayon::prelude::*;
use tracing::{debug, info};
use weekly_stats::{PlayerWeekIndex, PlayerWeeks, WeeklyStatRecord, WINDOW_WEEKS};

use crate::config::WindowConfig;
use crate::error::Result;
use crate::models::{FeatureVector, PerformanceBucket, Sample, FEATURE_DIMENSION};

/// Samples built from an index plus the windows that had to be skipped
#[derive(Debug, Clone, Default)]
pub struct WindowOutcome {
    /// Emitted samples ordered by player ID, then anchor week
    pub samples: Vec<Sample>,
    /// Player-weeks skipped because one of the four window weeks was missing
    pub incomplete_windows: usize,
}

/// Builds trailing-window feature vectors for every player and eligible week
pub struct FeatureWindowBuilder {
    config: WindowConfig,
}

impl FeatureWindowBuilder {
    /// Create a new window builder
    pub fn new(config: WindowConfig) -> Self {
        Self { config }
    }

    /// Build samples for all players in the index
    pub fn build(&self, index: &PlayerWeekIndex) -> Result<WindowOutcome> {
        let max_week = index.max_week();
        info!(
            "Constructing model input for {} players (anchor weeks {}..={})",
            index.player_count(),
            WINDOW_WEEKS,
            max_week
        );

        let outcome = if self.config.parallel {
            self.build_parallel(index, max_week)?
        } else {
            index.players().iter().map(|(id, weeks)| build_player(id, weeks, max_week)).fold(
                WindowOutcome::default(),
                |mut acc, player| {
                    acc.samples.extend(player.samples);
                    acc.incomplete_windows += player.incomplete_windows;
                    acc
                },
            )
        };

        info!(
            "Built {} samples ({} incomplete windows skipped)",
            outcome.samples.len(),
            outcome.incomplete_windows
        );

        Ok(outcome)
    }

    fn build_parallel(&self, index: &PlayerWeekIndex, max_week: u32) -> Result<WindowOutcome> {
        let run = || {
            index
                .players()
                .par_iter()
                .map(|(id, weeks)| build_player(id, weeks, max_week))
                .collect::<Vec<_>>()
        };

        let per_player = match self.config.threads {
            Some(threads) => rayon::ThreadPoolBuilder::new().num_threads(threads).build()?.install(run),
            None => run(),
        };

        let mut outcome = WindowOutcome::default();
        for player in per_player {
            outcome.samples.extend(player.samples);
            outcome.incomplete_windows += player.incomplete_windows;
        }

        // Completion order is not stable across workers
        outcome.samples.sort_by(|a, b| a.player_id.cmp(&b.player_id).then(a.week.cmp(&b.week)));
        Ok(outcome)
    }
}

/// Build every complete window for one player
///
/// Anchor weeks run from `WINDOW_WEEKS` through the dataset-wide `max_week`. Only
/// weeks the player actually has can anchor a window; every other anchor week in
/// that range counts as incomplete.
pub fn build_player(player_id: &str, weeks: &PlayerWeeks, max_week: u32) -> WindowOutcome {
    let mut outcome = WindowOutcome::default();
    if max_week < WINDOW_WEEKS {
        return outcome;
    }

    for (&week, current) in weeks.range(WINDOW_WEEKS..=max_week) {
        let history = (weeks.get(&(week - 1)), weeks.get(&(week - 2)), weeks.get(&(week - 3)));

        match history {
            (Some(prev1), Some(prev2), Some(prev3)) => {
                outcome.samples.push(Sample {
                    player_id: player_id.to_string(),
                    week,
                    vector: compute_features([prev1, prev2, prev3], current),
                });
            }
            _ => {
                debug!(
                    "Insufficient data found for player {} to project a week {} score",
                    player_id, week
                );
            }
        }
    }

    let anchor_weeks = (max_week - WINDOW_WEEKS + 1) as usize;
    outcome.incomplete_windows = anchor_weeks - outcome.samples.len();
    outcome
}

/// Feature vector for one anchor week from its three prior weeks (most recent first)
pub fn compute_features(history: [&WeeklyStatRecord; 3], current: &WeeklyStatRecord) -> FeatureVector {
    let mean = |stat: fn(&WeeklyStatRecord) -> f64| history.iter().map(|r| stat(r)).sum::<f64>() / 3.0;

    let avg_attempts = mean(|r| r.touches() as f64);
    let avg_yards = mean(|r| r.total_yards() as f64);
    let avg_tds = mean(|r| r.total_tds() as f64);
    // Points are averaged on their own, not summed with another stat
    let avg_points = mean(|r| r.fantasy_points);

    let last = history[0];
    let features: [f64; FEATURE_DIMENSION] = [
        avg_attempts,
        avg_yards,
        avg_tds,
        avg_points,
        f64::from(last.att),
        f64::from(last.rush_yds),
        f64::from(last.rush_td),
        f64::from(last.targets),
        f64::from(last.pass_yds),
        f64::from(last.pass_td),
        last.fantasy_points,
    ];

    FeatureVector::new(features, PerformanceBucket::from_points(current.fantasy_points))
}
