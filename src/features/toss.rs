//! Toss and batting-order statistics

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::team_stats::DEFAULT_WIN_PCT;

/// How the team batting first is worked out from the toss
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BatFirstRule {
    /// Historical precedence: team A whenever team B won the toss,
    /// otherwise team B if the toss winner fielded, else the toss winner.
    /// Misassigns the bat-first side when team B won the toss and batted.
    #[default]
    Legacy,
    /// Toss winner if they chose to bat, their opponent if they fielded
    TossDecision,
}

impl std::str::FromStr for BatFirstRule {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "legacy" => Ok(BatFirstRule::Legacy),
            "toss_decision" => Ok(BatFirstRule::TossDecision),
            _ => Err(format!(
                "Unknown bat-first rule: {}. Use legacy or toss-decision.",
                s
            )),
        }
    }
}

impl BatFirstRule {
    /// Team taken to have batted first
    pub fn resolve<'a>(
        &self,
        team_a: &'a str,
        team_b: &'a str,
        toss_winner: &'a str,
        toss_decision: &str,
    ) -> &'a str {
        match self {
            BatFirstRule::Legacy => {
                if toss_winner == team_b {
                    team_a
                } else if toss_decision == "field" {
                    team_b
                } else {
                    toss_winner
                }
            }
            BatFirstRule::TossDecision => {
                if toss_decision != "field" {
                    toss_winner
                } else if toss_winner == team_a {
                    team_b
                } else if toss_winner == team_b {
                    team_a
                } else {
                    toss_winner
                }
            }
        }
    }
}

/// Toss outcomes for one team
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TossRecord {
    pub toss_wins: u32,
    /// Matches won after winning the toss
    pub match_wins: u32,
}

/// Toss records keyed by toss winner
#[derive(Debug, Clone, Default)]
pub struct TossTracker {
    records: HashMap<String, TossRecord>,
}

impl TossTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, toss_winner: &str) -> TossRecord {
        self.records.get(toss_winner).copied().unwrap_or_default()
    }

    /// How often this toss winner went on to win, 0.5 with no history
    pub fn win_rate(&self, toss_winner: &str) -> f64 {
        let record = self.get(toss_winner);
        if record.toss_wins == 0 {
            DEFAULT_WIN_PCT
        } else {
            record.match_wins as f64 / record.toss_wins as f64
        }
    }

    pub fn record(&mut self, toss_winner: &str, winner: &str) {
        let record = self.records.entry(toss_winner.to_string()).or_default();
        record.toss_wins += 1;
        if winner == toss_winner {
            record.match_wins += 1;
        }
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }
}

/// Process-wide count of matches won by the side batting first
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatFirstOutcome {
    pub wins: u32,
    pub total: u32,
}

impl BatFirstOutcome {
    pub fn win_pct(&self) -> f64 {
        if self.total == 0 {
            DEFAULT_WIN_PCT
        } else {
            self.wins as f64 / self.total as f64
        }
    }

    pub fn record(&mut self, bat_first_team: &str, winner: &str) {
        if winner == bat_first_team {
            self.wins += 1;
        }
        self.total += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_legacy_rule() {
        let rule = BatFirstRule::Legacy;
        assert_eq!(rule.resolve("A", "B", "A", "bat"), "A");
        assert_eq!(rule.resolve("A", "B", "A", "field"), "B");
        assert_eq!(rule.resolve("A", "B", "B", "field"), "A");
        // Historical quirk: B won the toss and batted, still resolves to A
        assert_eq!(rule.resolve("A", "B", "B", "bat"), "A");
        assert_eq!(rule.resolve("A", "B", "Unknown", "Unknown"), "Unknown");
    }

    #[test]
    fn test_toss_decision_rule() {
        let rule = BatFirstRule::TossDecision;
        assert_eq!(rule.resolve("A", "B", "A", "bat"), "A");
        assert_eq!(rule.resolve("A", "B", "A", "field"), "B");
        assert_eq!(rule.resolve("A", "B", "B", "field"), "A");
        assert_eq!(rule.resolve("A", "B", "B", "bat"), "B");
    }

    #[test]
    fn test_rule_from_str() {
        assert_eq!("legacy".parse::<BatFirstRule>(), Ok(BatFirstRule::Legacy));
        assert_eq!(
            "toss-decision".parse::<BatFirstRule>(),
            Ok(BatFirstRule::TossDecision)
        );
        assert!("coin".parse::<BatFirstRule>().is_err());
    }

    #[test]
    fn test_toss_win_rate() {
        let mut toss = TossTracker::new();
        assert_eq!(toss.win_rate("India"), 0.5);

        toss.record("India", "India");
        toss.record("India", "Australia");
        toss.record("India", "India");
        toss.record("India", "India");

        assert_eq!(toss.get("India"), TossRecord { toss_wins: 4, match_wins: 3 });
        assert_eq!(toss.win_rate("India"), 0.75);
        assert_eq!(toss.win_rate("Australia"), 0.5);
    }

    #[test]
    fn test_bat_first_outcome() {
        let mut outcome = BatFirstOutcome::default();
        assert_eq!(outcome.win_pct(), 0.5);

        outcome.record("India", "India");
        outcome.record("India", "No Result");

        assert_eq!(outcome.total, 2);
        assert_eq!(outcome.win_pct(), 0.5);
    }
}
