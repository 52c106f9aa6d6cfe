//! Feature table rows

use serde::{Deserialize, Serialize};

use crate::MatchRecord;

/// Identity fields of a match, with defaults filled in
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchMetadata {
    pub team_a: String,
    pub team_b: String,
    pub winner: String,
    pub venue: String,
    pub date: String,
    pub toss_winner: String,
    pub toss_decision: String,
    pub competition: String,
}

impl MatchMetadata {
    pub fn from_record(record: &MatchRecord) -> Self {
        MatchMetadata {
            team_a: record.team_a().to_string(),
            team_b: record.team_b().to_string(),
            winner: record.winner().to_string(),
            venue: record.venue().to_string(),
            date: record.date().to_string(),
            toss_winner: record.toss_winner().to_string(),
            toss_decision: record.toss_decision().to_string(),
            competition: record.competition().to_string(),
        }
    }
}

/// The 16 derived features for one match
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct FeatureSet {
    pub team_a_win_pct_last5: f64,
    pub team_b_win_pct_last5: f64,
    pub team_a_vs_team_b_h2h: f64,
    pub team_a_avg_runs_scored: f64,
    pub team_b_avg_runs_conceded: f64,
    pub team_b_avg_runs_scored: f64,
    pub team_a_avg_runs_conceded: f64,
    pub venue_win_bias_team_a: f64,
    pub venue_win_bias_team_b: f64,
    pub toss_helped_win_rate: f64,
    pub batting_first_win_pct: f64,
    pub toss_decision_match_team_a: f64,
    pub toss_decision_match_team_b: f64,
    pub is_home_team_a: f64,
    pub team_a_form_score: f64,
    pub team_b_form_score: f64,
}

impl FeatureSet {
    pub const DIM: usize = 16;

    /// Column names, in `to_vec` order
    pub const NAMES: [&'static str; Self::DIM] = [
        "teamA_win_pct_last5",
        "teamB_win_pct_last5",
        "teamA_vs_teamB_h2h",
        "teamA_avg_runs_scored",
        "teamB_avg_runs_conceded",
        "teamB_avg_runs_scored",
        "teamA_avg_runs_conceded",
        "venue_win_bias_teamA",
        "venue_win_bias_teamB",
        "toss_helped_win_rate",
        "batting_first_win_pct",
        "toss_decision_match_teamA",
        "toss_decision_match_teamB",
        "is_home_teamA",
        "teamA_form_score",
        "teamB_form_score",
    ];

    /// Values the serving side substitutes when it cannot compute features
    pub fn serving_fallback() -> Self {
        FeatureSet {
            team_a_win_pct_last5: 0.48,
            team_b_win_pct_last5: 0.48,
            team_a_vs_team_b_h2h: 0.48,
            team_a_avg_runs_scored: 140.0,
            team_b_avg_runs_conceded: 139.7,
            team_b_avg_runs_scored: 139.5,
            team_a_avg_runs_conceded: 140.1,
            venue_win_bias_team_a: 0.18,
            venue_win_bias_team_b: 0.14,
            toss_helped_win_rate: 0.48,
            batting_first_win_pct: 0.46,
            toss_decision_match_team_a: 0.18,
            toss_decision_match_team_b: 0.18,
            is_home_team_a: 0.01,
            team_a_form_score: 14.5,
            team_b_form_score: 14.4,
        }
    }

    pub fn to_vec(&self) -> Vec<f64> {
        vec![
            self.team_a_win_pct_last5,
            self.team_b_win_pct_last5,
            self.team_a_vs_team_b_h2h,
            self.team_a_avg_runs_scored,
            self.team_b_avg_runs_conceded,
            self.team_b_avg_runs_scored,
            self.team_a_avg_runs_conceded,
            self.venue_win_bias_team_a,
            self.venue_win_bias_team_b,
            self.toss_helped_win_rate,
            self.batting_first_win_pct,
            self.toss_decision_match_team_a,
            self.toss_decision_match_team_b,
            self.is_home_team_a,
            self.team_a_form_score,
            self.team_b_form_score,
        ]
    }
}

/// One output row: identity, features and label
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureRow {
    pub metadata: MatchMetadata,
    pub features: FeatureSet,
    /// 1 iff the winner is team A
    pub match_winner_team_a: u8,
}

impl FeatureRow {
    /// Output column order
    pub const COLUMNS: [&'static str; 25] = [
        "teamA",
        "teamB",
        "winner",
        "venue",
        "date",
        "toss_winner",
        "toss_decision",
        "competition",
        "teamA_win_pct_last5",
        "teamB_win_pct_last5",
        "teamA_vs_teamB_h2h",
        "teamA_avg_runs_scored",
        "teamB_avg_runs_conceded",
        "teamB_avg_runs_scored",
        "teamA_avg_runs_conceded",
        "venue_win_bias_teamA",
        "venue_win_bias_teamB",
        "toss_helped_win_rate",
        "batting_first_win_pct",
        "toss_decision_match_teamA",
        "toss_decision_match_teamB",
        "is_home_teamA",
        "teamA_form_score",
        "teamB_form_score",
        "match_winner_teamA",
    ];

    pub fn new(metadata: MatchMetadata, features: FeatureSet) -> Self {
        let match_winner_team_a = u8::from(metadata.winner == metadata.team_a);
        FeatureRow {
            metadata,
            features,
            match_winner_team_a,
        }
    }

    /// Cell values in `COLUMNS` order
    pub fn to_record(&self) -> Vec<String> {
        let m = &self.metadata;
        let mut record = vec![
            m.team_a.clone(),
            m.team_b.clone(),
            m.winner.clone(),
            m.venue.clone(),
            m.date.clone(),
            m.toss_winner.clone(),
            m.toss_decision.clone(),
            m.competition.clone(),
        ];
        record.extend(self.features.to_vec().iter().map(|v| v.to_string()));
        record.push(self.match_winner_team_a.to_string());
        record
    }
}
