//! Player form tracking
//!
//! Ball-level batting and bowling contributions per player, plus
//! player-of-the-match awards, blended into a single form score.

use std::collections::HashMap;

use super::recent_mean;
use crate::MatchRecord;

/// Number of recent deliveries averaged for form
pub const FORM_WINDOW: usize = 5;
/// Form bonus per player-of-the-match award
pub const PLAYER_OF_MATCH_WEIGHT: f64 = 0.1;

/// Running contribution history for one player
#[derive(Debug, Clone, Default)]
pub struct PlayerFormState {
    /// Batter runs off each ball faced
    pub batting_runs: Vec<u32>,
    /// 1 if the ball bowled took a wicket, else 0
    pub dismissals: Vec<u8>,
    /// Player-of-the-match awards
    pub player_of_match: u32,
}

/// Tracks player form across a single feature run
#[derive(Debug, Clone)]
pub struct PlayerFormTracker {
    players: HashMap<String, PlayerFormState>,
    window: usize,
    player_of_match_weight: f64,
}

impl Default for PlayerFormTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl PlayerFormTracker {
    pub fn new() -> Self {
        Self::with_params(FORM_WINDOW, PLAYER_OF_MATCH_WEIGHT)
    }

    pub fn with_params(window: usize, player_of_match_weight: f64) -> Self {
        PlayerFormTracker {
            players: HashMap::new(),
            window,
            player_of_match_weight,
        }
    }

    /// Fold every delivery and award of a match into player state
    pub fn update_player_stats(&mut self, record: &MatchRecord) {
        for delivery in record.deliveries() {
            if let Some(batter) = &delivery.batter {
                self.entry(batter).batting_runs.push(delivery.runs.batter);
            }
            if let Some(bowler) = &delivery.bowler {
                let wicket = u8::from(delivery.is_wicket());
                self.entry(bowler).dismissals.push(wicket);
            }
        }

        for player in &record.info.player_of_match {
            self.entry(player).player_of_match += 1;
        }
    }

    fn entry(&mut self, player: &str) -> &mut PlayerFormState {
        self.players.entry(player.to_string()).or_default()
    }

    pub fn get(&self, player: &str) -> Option<&PlayerFormState> {
        self.players.get(player)
    }

    /// Mean batter runs over the player's last balls faced (0 if none)
    pub fn batting_average(&self, player: &str) -> f64 {
        self.get(player)
            .and_then(|s| recent_mean(&s.batting_runs, self.window))
            .unwrap_or(0.0)
    }

    /// Wickets per ball over the player's last balls bowled (0 if none)
    pub fn bowling_average(&self, player: &str) -> f64 {
        self.get(player)
            .and_then(|s| recent_mean(&s.dismissals, self.window))
            .unwrap_or(0.0)
    }

    pub fn player_of_match_count(&self, player: &str) -> u32 {
        self.get(player).map(|s| s.player_of_match).unwrap_or(0)
    }

    /// Composite form: batting average + bowling average + award bonus.
    ///
    /// Runs and wicket rate are added directly; downstream models were
    /// trained on this exact blend.
    pub fn form_score(&self, player: &str) -> f64 {
        self.batting_average(player)
            + self.bowling_average(player)
            + self.player_of_match_weight * self.player_of_match_count(player) as f64
    }

    /// Sum of form scores over a roster
    pub fn team_form_score(&self, players: &[String]) -> f64 {
        players.iter().map(|p| self.form_score(p)).sum()
    }

    /// Clear all player state
    pub fn reset(&mut self) {
        self.players.clear();
    }

    /// Number of players with any recorded history
    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }
}
