//! Model input for an upcoming fixture
//!
//! The serving model takes the six categorical fixture fields plus the 16
//! features. Features come either from a finished feature run or from the
//! fixed fallback values used when no history is available.

use serde::{Deserialize, Serialize};

use crate::features::{FeatureEngine, FeatureSet, MatchMetadata};
use crate::{MISSING, NO_RESULT};

/// Model input columns, in order
pub const TRAINING_COLUMNS: [&str; 22] = [
    "teamA",
    "teamB",
    "venue",
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
];

/// An upcoming match as described by the caller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fixture {
    pub team_a: String,
    pub team_b: String,
    pub venue: String,
    pub toss_winner: String,
    pub toss_decision: String,
    pub competition: String,
    #[serde(default)]
    pub team_a_players: Vec<String>,
    #[serde(default)]
    pub team_b_players: Vec<String>,
}

impl Fixture {
    /// Metadata for a match that has not been played yet
    pub fn metadata(&self) -> MatchMetadata {
        MatchMetadata {
            team_a: self.team_a.clone(),
            team_b: self.team_b.clone(),
            winner: NO_RESULT.to_string(),
            venue: self.venue.clone(),
            date: MISSING.to_string(),
            toss_winner: self.toss_winner.clone(),
            toss_decision: self.toss_decision.clone(),
            competition: self.competition.clone(),
        }
    }
}

/// A fixture with its feature values, ready for the model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InferenceRow {
    pub fixture: Fixture,
    pub features: FeatureSet,
}

impl InferenceRow {
    /// Row using the serving fallback features
    pub fn from_fixture(fixture: Fixture) -> Self {
        InferenceRow {
            fixture,
            features: FeatureSet::serving_fallback(),
        }
    }

    /// Row using the engine's current state, which is left untouched
    pub fn from_state(engine: &FeatureEngine, fixture: Fixture) -> Self {
        let features = engine.compute_features(
            &fixture.metadata(),
            &fixture.team_a_players,
            &fixture.team_b_players,
        );
        InferenceRow { fixture, features }
    }

    /// (column, value) pairs in `TRAINING_COLUMNS` order
    pub fn values(&self) -> Vec<(&'static str, String)> {
        let f = &self.fixture;
        let categorical = [
            f.team_a.clone(),
            f.team_b.clone(),
            f.venue.clone(),
            f.toss_winner.clone(),
            f.toss_decision.clone(),
            f.competition.clone(),
        ];
        let numeric = self.features.to_vec().into_iter().map(|v| v.to_string());

        TRAINING_COLUMNS
            .iter()
            .copied()
            .zip(categorical.into_iter().chain(numeric))
            .collect()
    }
}
