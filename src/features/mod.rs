//! Feature extraction
//!
//! Rolling team, venue, toss and player statistics, and the engine that
//! turns an ordered match sequence into feature rows.

pub mod engine;
pub mod player_form;
pub mod rolling;
pub mod row;
pub mod team_stats;
pub mod toss;
pub mod venue;

pub use engine::FeatureEngine;
pub use player_form::PlayerFormTracker;
pub use rolling::RollingStatistics;
pub use row::{FeatureRow, FeatureSet, MatchMetadata};

/// Mean of the last `window` values, or None when there are none
pub(crate) fn recent_mean<T: Copy + Into<f64>>(values: &[T], window: usize) -> Option<f64> {
    let recent = &values[values.len().saturating_sub(window)..];
    if recent.is_empty() {
        return None;
    }
    let sum: f64 = recent.iter().map(|&v| v.into()).sum();
    Some(sum / recent.len() as f64)
}

#[cfg(test)]
pub(crate) mod testing {
    //! Synthetic match builders shared by the feature tests

    use crate::{Delivery, Innings, MatchRecord, Outcome, Over, Runs, Toss, Wicket};

    /// A match where each side bats one innings of a single delivery worth
    /// its full total, so team totals are exact.
    pub fn synthetic_match(
        team_a: &str,
        team_b: &str,
        winner: Option<&str>,
        venue: &str,
        date: &str,
        runs_a: u32,
        runs_b: u32,
    ) -> MatchRecord {
        let mut record = MatchRecord::default();
        record.info.match_type = Some("T20".to_string());
        record.info.teams = vec![team_a.to_string(), team_b.to_string()];
        record.info.venue = Some(venue.to_string());
        record.info.dates = vec![date.to_string()];
        record.info.toss = Some(Toss {
            winner: Some(team_a.to_string()),
            decision: Some("bat".to_string()),
        });
        record.info.outcome = Some(Outcome {
            winner: winner.map(str::to_string),
            result: if winner.is_none() {
                Some("no result".to_string())
            } else {
                None
            },
        });
        record.innings = vec![
            single_ball_innings(team_a, &format!("{} opener", team_a), &format!("{} quick", team_b), runs_a),
            single_ball_innings(team_b, &format!("{} opener", team_b), &format!("{} quick", team_a), runs_b),
        ];
        record
    }

    pub fn single_ball_innings(team: &str, batter: &str, bowler: &str, total: u32) -> Innings {
        Innings {
            team: Some(team.to_string()),
            overs: vec![Over {
                over: 0,
                deliveries: vec![delivery(batter, bowler, total, total, false)],
            }],
        }
    }

    pub fn delivery(batter: &str, bowler: &str, batter_runs: u32, total: u32, wicket: bool) -> Delivery {
        Delivery {
            batter: Some(batter.to_string()),
            bowler: Some(bowler.to_string()),
            runs: Runs {
                batter: batter_runs,
                extras: total.saturating_sub(batter_runs),
                total,
            },
            wickets: if wicket {
                vec![Wicket {
                    player_out: Some(batter.to_string()),
                    kind: Some("bowled".to_string()),
                }]
            } else {
                Vec::new()
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::recent_mean;

    #[test]
    fn test_recent_mean_uses_last_window() {
        let values: Vec<u32> = vec![100, 1, 2, 3, 4, 5];
        assert_eq!(recent_mean(&values, 5), Some(3.0));
        assert_eq!(recent_mean(&values[..2], 5), Some(50.5));
        assert_eq!(recent_mean::<u32>(&[], 5), None);
    }
}
