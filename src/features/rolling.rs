//! Rolling statistics store
//!
//! Every read reflects the matches folded in so far. Callers compute all
//! reads for a match before calling `record` with that match's outcome.

use super::row::MatchMetadata;
use super::team_stats::{HeadToHead, TeamHistories, RECENT_WINDOW};
use super::toss::{BatFirstOutcome, TossTracker};
use super::venue::VenueTracker;

/// Team-level features read from the store for one match
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RollingFeatures {
    pub team_a_win_pct: f64,
    pub team_b_win_pct: f64,
    pub head_to_head: f64,
    pub team_a_avg_runs_scored: f64,
    pub team_b_avg_runs_conceded: f64,
    pub team_b_avg_runs_scored: f64,
    pub team_a_avg_runs_conceded: f64,
    pub venue_win_pct_team_a: f64,
    pub venue_win_pct_team_b: f64,
    pub toss_win_rate: f64,
    pub bat_first_win_pct: f64,
}

/// Outcome of a processed match, applied after its features are read
#[derive(Debug, Clone, Copy)]
pub struct MatchResult<'a> {
    pub team_a: &'a str,
    pub team_b: &'a str,
    pub venue: &'a str,
    pub winner: &'a str,
    pub toss_winner: &'a str,
    pub bat_first_team: &'a str,
    pub runs_a: u32,
    pub runs_b: u32,
}

/// Team, head-to-head, venue, toss and bat-first statistics
#[derive(Debug, Clone)]
pub struct RollingStatistics {
    teams: TeamHistories,
    head_to_head: HeadToHead,
    venues: VenueTracker,
    toss: TossTracker,
    bat_first: BatFirstOutcome,
}

impl Default for RollingStatistics {
    fn default() -> Self {
        Self::new(RECENT_WINDOW)
    }
}

impl RollingStatistics {
    pub fn new(window: usize) -> Self {
        RollingStatistics {
            teams: TeamHistories::new(window),
            head_to_head: HeadToHead::new(),
            venues: VenueTracker::new(),
            toss: TossTracker::new(),
            bat_first: BatFirstOutcome::default(),
        }
    }

    pub fn recent_win_pct(&self, team: &str) -> f64 {
        self.teams.recent_win_pct(team)
    }

    pub fn recent_avg_runs_scored(&self, team: &str) -> f64 {
        self.teams.recent_avg_runs_scored(team)
    }

    pub fn recent_avg_runs_conceded(&self, team: &str) -> f64 {
        self.teams.recent_avg_runs_conceded(team)
    }

    pub fn h2h_win_pct(&self, team_a: &str, team_b: &str) -> f64 {
        self.head_to_head.win_pct(team_a, team_b)
    }

    pub fn venue_win_pct(&self, venue: &str, team: &str) -> f64 {
        self.venues.win_pct(venue, team)
    }

    pub fn toss_win_rate(&self, toss_winner: &str) -> f64 {
        self.toss.win_rate(toss_winner)
    }

    pub fn bat_first_win_pct(&self) -> f64 {
        self.bat_first.win_pct()
    }

    pub fn teams(&self) -> &TeamHistories {
        &self.teams
    }

    pub fn head_to_head(&self) -> &HeadToHead {
        &self.head_to_head
    }

    pub fn bat_first(&self) -> BatFirstOutcome {
        self.bat_first
    }

    /// Drop all recorded matches
    pub fn reset(&mut self) {
        self.teams.clear();
        self.head_to_head.clear();
        self.venues.reset();
        self.toss.clear();
        self.bat_first = BatFirstOutcome::default();
    }

    /// Read all team-level features for a match (call BEFORE record)
    pub fn compute(&self, meta: &MatchMetadata) -> RollingFeatures {
        let (a, b) = (meta.team_a.as_str(), meta.team_b.as_str());
        RollingFeatures {
            team_a_win_pct: self.recent_win_pct(a),
            team_b_win_pct: self.recent_win_pct(b),
            head_to_head: self.h2h_win_pct(a, b),
            team_a_avg_runs_scored: self.recent_avg_runs_scored(a),
            team_b_avg_runs_conceded: self.recent_avg_runs_conceded(b),
            team_b_avg_runs_scored: self.recent_avg_runs_scored(b),
            team_a_avg_runs_conceded: self.recent_avg_runs_conceded(a),
            venue_win_pct_team_a: self.venue_win_pct(&meta.venue, a),
            venue_win_pct_team_b: self.venue_win_pct(&meta.venue, b),
            toss_win_rate: self.toss_win_rate(&meta.toss_winner),
            bat_first_win_pct: self.bat_first_win_pct(),
        }
    }

    /// Fold a finished match into every statistic
    pub fn record(&mut self, result: &MatchResult<'_>) {
        let a_won = result.winner == result.team_a;
        let b_won = result.winner == result.team_b;

        self.teams
            .record(result.team_a, a_won, result.runs_a, result.runs_b);
        self.teams
            .record(result.team_b, b_won, result.runs_b, result.runs_a);
        self.head_to_head.record(result.team_a, result.team_b, a_won);
        self.venues.record(result.venue, result.winner);
        self.toss.record(result.toss_winner, result.winner);
        self.bat_first
            .record(result.bat_first_team, result.winner);

        log::debug!(
            "Recorded {} vs {} at {}: winner {}",
            result.team_a,
            result.team_b,
            result.venue,
            result.winner
        );
    }
}
