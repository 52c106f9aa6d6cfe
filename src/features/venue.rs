//! Venue performance tracking
//!
//! Tracks how many matches each team has won at each venue.

use std::collections::HashMap;

use super::team_stats::DEFAULT_WIN_PCT;

/// Win counts per venue, keyed by the recorded winner
#[derive(Debug, Clone, Default)]
pub struct VenueTracker {
    /// venue -> winner -> wins
    wins: HashMap<String, HashMap<String, u32>>,
}

impl VenueTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wins recorded for a team at a venue
    pub fn wins(&self, venue: &str, team: &str) -> u32 {
        self.wins
            .get(venue)
            .and_then(|w| w.get(team))
            .copied()
            .unwrap_or(0)
    }

    /// All outcomes recorded at a venue, including no-result entries
    pub fn total(&self, venue: &str) -> u32 {
        self.wins
            .get(venue)
            .map(|w| w.values().sum())
            .unwrap_or(0)
    }

    /// Team's share of recorded outcomes at the venue (call BEFORE update)
    pub fn win_pct(&self, venue: &str, team: &str) -> f64 {
        let total = self.total(venue);
        if total == 0 {
            DEFAULT_WIN_PCT
        } else {
            self.wins(venue, team) as f64 / total as f64
        }
    }

    /// Count one outcome at the venue under the winner's name.
    ///
    /// "No Result" is stored like any other winner so it still counts
    /// towards the venue total.
    pub fn record(&mut self, venue: &str, winner: &str) {
        *self
            .wins
            .entry(venue.to_string())
            .or_default()
            .entry(winner.to_string())
            .or_insert(0) += 1;
    }

    /// Reset all state
    pub fn reset(&mut self) {
        self.wins.clear();
    }
}
