//! T20 cricket match feature engineering
//!
//! Walks ball-by-ball match records in date order and turns them into a
//! point-in-time feature table for match winner prediction.

pub mod data;
pub mod features;
pub mod predict;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

use crate::features::toss::BatFirstRule;

/// Placeholder for a missing team name or date
pub const MISSING: &str = "?";
/// Placeholder for a missing venue, toss field or competition
pub const UNKNOWN: &str = "Unknown";
/// Winner value when the outcome has no winner
pub const NO_RESULT: &str = "No Result";

/// A single match as stored in a Cricsheet-style JSON file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchRecord {
    pub info: MatchInfo,
    pub innings: Vec<Innings>,
    /// File the record was read from (empty for records built in memory)
    #[serde(skip)]
    pub source_file: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchInfo {
    pub match_type: Option<String>,
    pub teams: Vec<String>,
    pub venue: Option<String>,
    pub dates: Vec<String>,
    pub toss: Option<Toss>,
    pub competition: Option<String>,
    pub event: Option<Event>,
    pub outcome: Option<Outcome>,
    pub players: HashMap<String, Vec<String>>,
    pub player_of_match: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Toss {
    pub winner: Option<String>,
    pub decision: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Event {
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Outcome {
    pub winner: Option<String>,
    /// "no result", "tie", ... when there is no outright winner
    pub result: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Innings {
    pub team: Option<String>,
    pub overs: Vec<Over>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Over {
    pub over: u32,
    pub deliveries: Vec<Delivery>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Delivery {
    pub batter: Option<String>,
    pub bowler: Option<String>,
    pub runs: Runs,
    pub wickets: Vec<Wicket>,
}

impl Delivery {
    /// True if the ball produced at least one dismissal
    pub fn is_wicket(&self) -> bool {
        !self.wickets.is_empty()
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Runs {
    pub batter: u32,
    pub extras: u32,
    pub total: u32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Wicket {
    pub player_out: Option<String>,
    pub kind: Option<String>,
}

impl MatchRecord {
    /// First listed team, "?" if absent
    pub fn team_a(&self) -> &str {
        self.info.teams.first().map(String::as_str).unwrap_or(MISSING)
    }

    /// Second listed team, "?" if absent
    pub fn team_b(&self) -> &str {
        self.info.teams.get(1).map(String::as_str).unwrap_or(MISSING)
    }

    pub fn venue(&self) -> &str {
        self.info.venue.as_deref().unwrap_or(UNKNOWN)
    }

    /// First match date as written in the source
    pub fn date(&self) -> &str {
        self.info.dates.first().map(String::as_str).unwrap_or(MISSING)
    }

    /// First match date, if it is a valid ISO date
    pub fn parsed_date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(self.date(), "%Y-%m-%d").ok()
    }

    pub fn toss_winner(&self) -> &str {
        self.info
            .toss
            .as_ref()
            .and_then(|t| t.winner.as_deref())
            .unwrap_or(UNKNOWN)
    }

    pub fn toss_decision(&self) -> &str {
        self.info
            .toss
            .as_ref()
            .and_then(|t| t.decision.as_deref())
            .unwrap_or(UNKNOWN)
    }

    /// Competition name, falling back to the event name
    pub fn competition(&self) -> &str {
        match self.info.competition.as_deref() {
            Some(c) if !c.is_empty() => c,
            _ => self
                .info
                .event
                .as_ref()
                .and_then(|e| e.name.as_deref())
                .unwrap_or(UNKNOWN),
        }
    }

    /// Outcome winner, "No Result" when there is none
    pub fn winner(&self) -> &str {
        self.info
            .outcome
            .as_ref()
            .and_then(|o| o.winner.as_deref())
            .unwrap_or(NO_RESULT)
    }

    /// Whether the outcome names a winner
    pub fn result_given(&self) -> bool {
        self.info
            .outcome
            .as_ref()
            .is_some_and(|o| o.winner.is_some())
    }

    pub fn is_match_type(&self, match_type: &str) -> bool {
        self.info.match_type.as_deref() == Some(match_type)
    }

    /// Listed players for a team (empty if the roster is missing)
    pub fn players_for(&self, team: &str) -> &[String] {
        self.info
            .players
            .get(team)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Every delivery of the match in innings order
    pub fn deliveries(&self) -> impl Iterator<Item = &Delivery> {
        self.innings
            .iter()
            .flat_map(|inning| inning.overs.iter())
            .flat_map(|over| over.deliveries.iter())
    }

    /// Total runs (including extras) across all innings batted by `team`
    pub fn total_runs(&self, team: &str) -> u32 {
        self.innings
            .iter()
            .filter(|inning| inning.team.as_deref() == Some(team))
            .flat_map(|inning| inning.overs.iter())
            .flat_map(|over| over.deliveries.iter())
            .map(|d| d.runs.total)
            .sum()
    }
}

/// Application-wide errors
#[derive(Debug, Error)]
pub enum CricketError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Parse error: {0}")]
    Parse(String),
}

pub type Result<T> = std::result::Result<T, CricketError>;

/// Application configuration loaded from config.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub data: DataConfig,
    #[serde(default)]
    pub features: FeatureConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    pub matches_dir: String,
    pub output_csv: String,
    pub database_path: String,
    pub match_type: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FeatureConfig {
    pub recent_window: usize,
    pub form_window: usize,
    pub player_of_match_weight: f64,
    pub bat_first_rule: BatFirstRule,
}

impl Default for DataConfig {
    fn default() -> Self {
        DataConfig {
            matches_dir: "data".to_string(),
            output_csv: "t20_features_full.csv".to_string(),
            database_path: "data/features.db".to_string(),
            match_type: "T20".to_string(),
        }
    }
}

impl Default for FeatureConfig {
    fn default() -> Self {
        FeatureConfig {
            recent_window: features::team_stats::RECENT_WINDOW,
            form_window: features::player_form::FORM_WINDOW,
            player_of_match_weight: features::player_form::PLAYER_OF_MATCH_WEIGHT,
            bat_first_rule: BatFirstRule::default(),
        }
    }
}

impl Config {
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            CricketError::Config(format!("Failed to read config file {}: {}", path, e))
        })?;
        toml::from_str(&content)
            .map_err(|e| CricketError::Config(format!("Failed to parse config: {}", e)))
    }

    pub fn save(&self, path: &str) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| CricketError::Config(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
