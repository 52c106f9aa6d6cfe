//! Feature engineering engine
//!
//! Walks matches one at a time. For each match every feature is read from
//! the trackers first, the row is emitted, and only then is the match
//! folded into the trackers, so no row sees its own outcome.

use super::player_form::PlayerFormTracker;
use super::rolling::{MatchResult, RollingStatistics};
use super::row::{FeatureRow, FeatureSet, MatchMetadata};
use super::toss::BatFirstRule;
use crate::{FeatureConfig, MatchRecord};

/// Sequential feature builder owning all rolling state for one run
#[derive(Debug, Clone)]
pub struct FeatureEngine {
    stats: RollingStatistics,
    players: PlayerFormTracker,
    bat_first_rule: BatFirstRule,
    processed: usize,
}

impl Default for FeatureEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl FeatureEngine {
    /// Engine with empty state and default parameters
    pub fn new() -> Self {
        Self::with_state(
            RollingStatistics::default(),
            PlayerFormTracker::new(),
            BatFirstRule::default(),
        )
    }

    pub fn from_config(config: &FeatureConfig) -> Self {
        Self::with_state(
            RollingStatistics::new(config.recent_window),
            PlayerFormTracker::with_params(config.form_window, config.player_of_match_weight),
            config.bat_first_rule,
        )
    }

    /// Engine over caller-supplied state, e.g. to continue a previous run
    pub fn with_state(
        stats: RollingStatistics,
        players: PlayerFormTracker,
        bat_first_rule: BatFirstRule,
    ) -> Self {
        FeatureEngine {
            stats,
            players,
            bat_first_rule,
            processed: 0,
        }
    }

    pub fn statistics(&self) -> &RollingStatistics {
        &self.stats
    }

    pub fn players(&self) -> &PlayerFormTracker {
        &self.players
    }

    pub fn bat_first_rule(&self) -> BatFirstRule {
        self.bat_first_rule
    }

    /// Matches processed by this engine so far
    pub fn processed(&self) -> usize {
        self.processed
    }

    /// Clear all team and player state so the engine can start a new run
    pub fn reset(&mut self) {
        self.stats.reset();
        self.players.reset();
        self.processed = 0;
    }

    pub fn into_parts(self) -> (RollingStatistics, PlayerFormTracker) {
        (self.stats, self.players)
    }

    /// Sort matches by date, then process them in that order
    pub fn run(&mut self, mut matches: Vec<MatchRecord>) -> Vec<FeatureRow> {
        sort_chronologically(&mut matches);
        self.run_in_order(&matches)
    }

    /// Process matches exactly in the given order
    pub fn run_in_order(&mut self, matches: &[MatchRecord]) -> Vec<FeatureRow> {
        log::info!("Building features for {} matches", matches.len());

        let rows: Vec<FeatureRow> = matches.iter().map(|m| self.process_match(m)).collect();

        let team_a_wins = rows.iter().filter(|r| r.match_winner_team_a == 1).count();
        log::info!(
            "Built {} feature rows ({} team A wins)",
            rows.len(),
            team_a_wins
        );
        rows
    }

    /// Feature values for a fixture given the current state, without
    /// changing it
    pub fn compute_features(
        &self,
        meta: &MatchMetadata,
        team_a_players: &[String],
        team_b_players: &[String],
    ) -> FeatureSet {
        let rolling = self.stats.compute(meta);
        let chose_bat = meta.toss_decision == "bat";

        FeatureSet {
            team_a_win_pct_last5: rolling.team_a_win_pct,
            team_b_win_pct_last5: rolling.team_b_win_pct,
            team_a_vs_team_b_h2h: rolling.head_to_head,
            team_a_avg_runs_scored: rolling.team_a_avg_runs_scored,
            team_b_avg_runs_conceded: rolling.team_b_avg_runs_conceded,
            team_b_avg_runs_scored: rolling.team_b_avg_runs_scored,
            team_a_avg_runs_conceded: rolling.team_a_avg_runs_conceded,
            venue_win_bias_team_a: rolling.venue_win_pct_team_a,
            venue_win_bias_team_b: rolling.venue_win_pct_team_b,
            toss_helped_win_rate: rolling.toss_win_rate,
            batting_first_win_pct: rolling.bat_first_win_pct,
            toss_decision_match_team_a: flag(chose_bat && rolling.team_a_win_pct > 0.5),
            toss_decision_match_team_b: flag(chose_bat && rolling.team_b_win_pct > 0.5),
            is_home_team_a: flag(is_home(&meta.team_a, &meta.venue)),
            team_a_form_score: self.players.team_form_score(team_a_players),
            team_b_form_score: self.players.team_form_score(team_b_players),
        }
    }

    /// Emit the row for one match, then fold the match into the state
    pub fn process_match(&mut self, record: &MatchRecord) -> FeatureRow {
        let meta = MatchMetadata::from_record(record);
        let features = self.compute_features(
            &meta,
            record.players_for(&meta.team_a),
            record.players_for(&meta.team_b),
        );
        let row = FeatureRow::new(meta, features);

        self.players.update_player_stats(record);

        let m = &row.metadata;
        let bat_first_team =
            self.bat_first_rule
                .resolve(&m.team_a, &m.team_b, &m.toss_winner, &m.toss_decision);
        self.stats.record(&MatchResult {
            team_a: &m.team_a,
            team_b: &m.team_b,
            venue: &m.venue,
            winner: &m.winner,
            toss_winner: &m.toss_winner,
            bat_first_team,
            runs_a: record.total_runs(&m.team_a),
            runs_b: record.total_runs(&m.team_b),
        });
        self.processed += 1;

        row
    }
}

/// Order matches by date; ties keep a stable order by source file.
///
/// Unparseable dates sort before all valid ones.
pub fn sort_chronologically(matches: &mut [MatchRecord]) {
    matches.sort_by_cached_key(|m| (m.parsed_date(), m.date().to_string(), m.source_file.clone()));
}

/// Team name appears in the venue name, ignoring case
pub fn is_home(team: &str, venue: &str) -> bool {
    venue.to_lowercase().contains(&team.to_lowercase())
}

fn flag(value: bool) -> f64 {
    if value {
        1.0
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::testing::synthetic_match;
    use crate::NO_RESULT;

    #[test]
    fn test_two_match_sequence() {
        let matches = vec![
            synthetic_match("A", "B", Some("A"), "Ground", "2024-01-01", 160, 140),
            synthetic_match("A", "B", Some("B"), "Ground", "2024-01-08", 150, 151),
        ];

        let rows = FeatureEngine::new().run(matches);
        assert_eq!(rows.len(), 2);

        let first = &rows[0].features;
        assert_eq!(first.team_a_win_pct_last5, 0.5);
        assert_eq!(first.team_a_vs_team_b_h2h, 0.5);
        assert_eq!(first.team_a_avg_runs_scored, 150.0);
        assert_eq!(first.team_b_avg_runs_conceded, 160.0);

        let second = &rows[1].features;
        assert_eq!(second.team_a_win_pct_last5, 1.0);
        assert_eq!(second.team_b_win_pct_last5, 0.0);
        assert_eq!(second.team_a_vs_team_b_h2h, 1.0);
        assert_eq!(second.team_a_avg_runs_scored, 160.0);
        assert_eq!(second.team_b_avg_runs_conceded, 160.0);
        assert_eq!(second.team_b_avg_runs_scored, 140.0);
        assert_eq!(second.team_a_avg_runs_conceded, 140.0);
        assert_eq!(second.venue_win_bias_team_a, 1.0);
        assert_eq!(second.venue_win_bias_team_b, 0.0);

        assert_eq!(rows[0].match_winner_team_a, 1);
        assert_eq!(rows[1].match_winner_team_a, 0);
    }

    #[test]
    fn test_no_result_label_is_zero() {
        let rows = FeatureEngine::new().run(vec![synthetic_match(
            "A", "B", None, "Ground", "2024-01-01", 0, 0,
        )]);
        assert_eq!(rows[0].metadata.winner, NO_RESULT);
        assert_eq!(rows[0].match_winner_team_a, 0);
    }

    #[test]
    fn test_run_sorts_by_date() {
        let later = synthetic_match("A", "B", Some("B"), "Ground", "2024-03-01", 100, 120);
        let earlier = synthetic_match("A", "B", Some("A"), "Ground", "2024-02-01", 160, 140);

        let rows = FeatureEngine::new().run(vec![later, earlier]);

        assert_eq!(rows[0].metadata.date, "2024-02-01");
        assert_eq!(rows[1].metadata.date, "2024-03-01");
        assert_eq!(rows[1].features.team_a_win_pct_last5, 1.0);
    }

    #[test]
    fn test_run_in_order_keeps_given_order() {
        let later = synthetic_match("A", "B", Some("B"), "Ground", "2024-03-01", 100, 120);
        let earlier = synthetic_match("A", "B", Some("A"), "Ground", "2024-02-01", 160, 140);

        let rows = FeatureEngine::new().run_in_order(&[later, earlier]);

        assert_eq!(rows[0].metadata.date, "2024-03-01");
        assert_eq!(rows[1].features.team_a_win_pct_last5, 0.0);
    }

    #[test]
    fn test_sort_uses_source_file_for_same_day() {
        let mut first = synthetic_match("C", "D", Some("C"), "Ground", "2024-01-01", 1, 0);
        first.source_file = "1001.json".to_string();
        let mut second = synthetic_match("A", "B", Some("A"), "Ground", "2024-01-01", 1, 0);
        second.source_file = "1002.json".to_string();

        let mut matches = vec![second, first];
        sort_chronologically(&mut matches);
        assert_eq!(matches[0].source_file, "1001.json");
    }

    #[test]
    fn test_form_scores_are_pre_match() {
        let mut first = synthetic_match("A", "B", Some("A"), "Ground", "2024-01-01", 160, 140);
        first.info.players.insert("A".to_string(), vec!["A opener".to_string()]);
        first.info.players.insert("B".to_string(), vec!["B opener".to_string()]);
        let second = first.clone();

        let rows = FeatureEngine::new().run_in_order(&[first, second]);

        assert_eq!(rows[0].features.team_a_form_score, 0.0);
        assert_eq!(rows[0].features.team_b_form_score, 0.0);
        assert_eq!(rows[1].features.team_a_form_score, 160.0);
        assert_eq!(rows[1].features.team_b_form_score, 140.0);
    }

    #[test]
    fn test_toss_alignment_and_home_flags() {
        let mut first = synthetic_match("Kolkata", "Chennai", Some("Kolkata"), "Eden Gardens, Kolkata", "2024-04-01", 200, 150);
        first.info.toss = Some(crate::Toss {
            winner: Some("Chennai".to_string()),
            decision: Some("bat".to_string()),
        });
        let second = first.clone();

        let rows = FeatureEngine::new().run_in_order(&[first, second]);

        assert_eq!(rows[0].features.is_home_team_a, 1.0);
        assert_eq!(rows[0].features.toss_decision_match_team_a, 0.0);
        assert_eq!(rows[1].features.toss_decision_match_team_a, 1.0);
        assert_eq!(rows[1].features.toss_decision_match_team_b, 0.0);
        // Chennai won the toss and lost
        assert_eq!(rows[1].features.toss_helped_win_rate, 0.0);
        // Legacy rule names Kolkata as batting first, and Kolkata won
        assert_eq!(rows[1].features.batting_first_win_pct, 1.0);
    }

    #[test]
    fn test_toss_decision_rule_changes_bat_first_team() {
        let mut record = synthetic_match("Kolkata", "Chennai", Some("Kolkata"), "Chepauk", "2024-04-01", 200, 150);
        record.info.toss = Some(crate::Toss {
            winner: Some("Chennai".to_string()),
            decision: Some("bat".to_string()),
        });

        let config = FeatureConfig {
            bat_first_rule: BatFirstRule::TossDecision,
            ..FeatureConfig::default()
        };
        let mut engine = FeatureEngine::from_config(&config);
        engine.run_in_order(&[record]);

        assert_eq!(engine.statistics().bat_first_win_pct(), 0.0);
    }

    #[test]
    fn test_independent_engines_do_not_share_state() {
        let matches = vec![
            synthetic_match("A", "B", Some("A"), "Ground", "2024-01-01", 160, 140),
            synthetic_match("A", "B", Some("A"), "Ground", "2024-01-02", 160, 140),
        ];

        let mut first = FeatureEngine::new();
        let rows_first = first.run(matches.clone());
        let rows_second = FeatureEngine::new().run(matches);

        assert_eq!(rows_first, rows_second);
        assert_eq!(first.processed(), 2);
    }

    #[test]
    fn test_reset_between_runs() {
        let matches = vec![synthetic_match("A", "B", Some("A"), "Ground", "2024-01-01", 160, 140)];

        let mut engine = FeatureEngine::new();
        engine.run(matches.clone());
        engine.reset();
        let rows = engine.run(matches);

        assert_eq!(rows[0].features.team_a_win_pct_last5, 0.5);
        assert_eq!(engine.players().form_score("A opener"), 160.0);
        assert_eq!(engine.processed(), 1);
    }

    #[test]
    fn test_is_home_ignores_case() {
        assert!(is_home("kolkata", "Eden Gardens, KOLKATA"));
        assert!(!is_home("Sri Lanka", "R Premadasa Stadium, Colombo"));
    }
}
