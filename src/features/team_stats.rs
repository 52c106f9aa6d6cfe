//! Team statistics computation
//!
//! Rolling per-team result and run histories, and head-to-head records.

use std::collections::HashMap;

use super::recent_mean;

/// Number of recent matches considered for win % and average runs
pub const RECENT_WINDOW: usize = 5;
/// Win percentage when there is no history
pub const DEFAULT_WIN_PCT: f64 = 0.5;
/// Average runs scored when there is no history
pub const DEFAULT_RUNS_SCORED: f64 = 150.0;
/// Average runs conceded when there is no history
pub const DEFAULT_RUNS_CONCEDED: f64 = 160.0;

/// Per-match history for one team, one entry per match played
#[derive(Debug, Clone, Default)]
pub struct TeamHistory {
    /// 1 if the team won, else 0
    pub wins: Vec<u8>,
    pub runs_scored: Vec<u32>,
    pub runs_conceded: Vec<u32>,
}

impl TeamHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one match result
    pub fn record(&mut self, won: bool, runs_scored: u32, runs_conceded: u32) {
        self.wins.push(u8::from(won));
        self.runs_scored.push(runs_scored);
        self.runs_conceded.push(runs_conceded);
    }

    pub fn matches_played(&self) -> usize {
        self.wins.len()
    }

    pub fn recent_win_pct(&self, window: usize) -> Option<f64> {
        recent_mean(&self.wins, window)
    }

    pub fn recent_avg_runs_scored(&self, window: usize) -> Option<f64> {
        recent_mean(&self.runs_scored, window)
    }

    pub fn recent_avg_runs_conceded(&self, window: usize) -> Option<f64> {
        recent_mean(&self.runs_conceded, window)
    }
}

/// Histories for all teams seen so far
#[derive(Debug, Clone)]
pub struct TeamHistories {
    teams: HashMap<String, TeamHistory>,
    window: usize,
}

impl Default for TeamHistories {
    fn default() -> Self {
        Self::new(RECENT_WINDOW)
    }
}

impl TeamHistories {
    pub fn new(window: usize) -> Self {
        TeamHistories {
            teams: HashMap::new(),
            window,
        }
    }

    pub fn get(&self, team: &str) -> Option<&TeamHistory> {
        self.teams.get(team)
    }

    /// Win share over the last matches, 0.5 with no history
    pub fn recent_win_pct(&self, team: &str) -> f64 {
        self.get(team)
            .and_then(|h| h.recent_win_pct(self.window))
            .unwrap_or(DEFAULT_WIN_PCT)
    }

    /// Average runs scored over the last matches, 150 with no history
    pub fn recent_avg_runs_scored(&self, team: &str) -> f64 {
        self.get(team)
            .and_then(|h| h.recent_avg_runs_scored(self.window))
            .unwrap_or(DEFAULT_RUNS_SCORED)
    }

    /// Average runs conceded over the last matches, 160 with no history
    pub fn recent_avg_runs_conceded(&self, team: &str) -> f64 {
        self.get(team)
            .and_then(|h| h.recent_avg_runs_conceded(self.window))
            .unwrap_or(DEFAULT_RUNS_CONCEDED)
    }

    pub fn record(&mut self, team: &str, won: bool, runs_scored: u32, runs_conceded: u32) {
        self.teams
            .entry(team.to_string())
            .or_default()
            .record(won, runs_scored, runs_conceded);
    }

    pub fn len(&self) -> usize {
        self.teams.len()
    }

    pub fn clear(&mut self) {
        self.teams.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.teams.is_empty()
    }
}

/// Head-to-head results keyed by (team A, team B) in listing order.
///
/// (A, B) and (B, A) are separate histories.
#[derive(Debug, Clone, Default)]
pub struct HeadToHead {
    records: HashMap<String, HashMap<String, Vec<u8>>>,
}

impl HeadToHead {
    pub fn new() -> Self {
        Self::default()
    }

    /// Share of (A, B) meetings won by A over all history, 0.5 if none
    pub fn win_pct(&self, team_a: &str, team_b: &str) -> f64 {
        self.history(team_a, team_b)
            .and_then(|h| recent_mean(h, h.len()))
            .unwrap_or(DEFAULT_WIN_PCT)
    }

    pub fn history(&self, team_a: &str, team_b: &str) -> Option<&[u8]> {
        self.records
            .get(team_a)
            .and_then(|opponents| opponents.get(team_b))
            .map(Vec::as_slice)
    }

    pub fn record(&mut self, team_a: &str, team_b: &str, team_a_won: bool) {
        self.records
            .entry(team_a.to_string())
            .or_default()
            .entry(team_b.to_string())
            .or_default()
            .push(u8::from(team_a_won));
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }
}
