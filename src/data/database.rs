//! SQLite storage for the feature table

use chrono::NaiveDate;
use rusqlite::{params, Connection};
use std::path::Path;

use crate::features::FeatureRow;
use crate::Result;

/// Feature table database
pub struct FeatureStore {
    conn: Connection,
}

impl FeatureStore {
    /// Open or create database at the given path
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let conn = Connection::open(path)?;
        let store = FeatureStore { conn };
        store.init_schema()?;
        Ok(store)
    }

    /// Create an in-memory database (for testing)
    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let store = FeatureStore { conn };
        store.init_schema()?;
        Ok(store)
    }

    fn init_schema(&self) -> Result<()> {
        self.conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS features (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                teamA TEXT NOT NULL,
                teamB TEXT NOT NULL,
                winner TEXT NOT NULL,
                venue TEXT NOT NULL,
                date TEXT NOT NULL,
                toss_winner TEXT NOT NULL,
                toss_decision TEXT NOT NULL,
                competition TEXT NOT NULL,
                teamA_win_pct_last5 REAL NOT NULL,
                teamB_win_pct_last5 REAL NOT NULL,
                teamA_vs_teamB_h2h REAL NOT NULL,
                teamA_avg_runs_scored REAL NOT NULL,
                teamB_avg_runs_conceded REAL NOT NULL,
                teamB_avg_runs_scored REAL NOT NULL,
                teamA_avg_runs_conceded REAL NOT NULL,
                venue_win_bias_teamA REAL NOT NULL,
                venue_win_bias_teamB REAL NOT NULL,
                toss_helped_win_rate REAL NOT NULL,
                batting_first_win_pct REAL NOT NULL,
                toss_decision_match_teamA REAL NOT NULL,
                toss_decision_match_teamB REAL NOT NULL,
                is_home_teamA REAL NOT NULL,
                teamA_form_score REAL NOT NULL,
                teamB_form_score REAL NOT NULL,
                match_winner_teamA INTEGER NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_features_date ON features(date);
            CREATE INDEX IF NOT EXISTS idx_features_teams ON features(teamA, teamB);
            "#,
        )?;
        Ok(())
    }

    /// Replace the stored table with the rows of a run
    pub fn replace_rows(&mut self, rows: &[FeatureRow]) -> Result<usize> {
        let tx = self.conn.transaction()?;
        tx.execute("DELETE FROM features", [])?;
        {
            let mut stmt = tx.prepare(
                "INSERT INTO features (
                    teamA, teamB, winner, venue, date, toss_winner, toss_decision, competition,
                    teamA_win_pct_last5, teamB_win_pct_last5, teamA_vs_teamB_h2h,
                    teamA_avg_runs_scored, teamB_avg_runs_conceded, teamB_avg_runs_scored,
                    teamA_avg_runs_conceded, venue_win_bias_teamA, venue_win_bias_teamB,
                    toss_helped_win_rate, batting_first_win_pct, toss_decision_match_teamA,
                    toss_decision_match_teamB, is_home_teamA, teamA_form_score, teamB_form_score,
                    match_winner_teamA
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15,
                          ?16, ?17, ?18, ?19, ?20, ?21, ?22, ?23, ?24, ?25)",
            )?;
            for row in rows {
                let m = &row.metadata;
                let f = &row.features;
                stmt.execute(params![
                    m.team_a,
                    m.team_b,
                    m.winner,
                    m.venue,
                    m.date,
                    m.toss_winner,
                    m.toss_decision,
                    m.competition,
                    f.team_a_win_pct_last5,
                    f.team_b_win_pct_last5,
                    f.team_a_vs_team_b_h2h,
                    f.team_a_avg_runs_scored,
                    f.team_b_avg_runs_conceded,
                    f.team_b_avg_runs_scored,
                    f.team_a_avg_runs_conceded,
                    f.venue_win_bias_team_a,
                    f.venue_win_bias_team_b,
                    f.toss_helped_win_rate,
                    f.batting_first_win_pct,
                    f.toss_decision_match_team_a,
                    f.toss_decision_match_team_b,
                    f.is_home_team_a,
                    f.team_a_form_score,
                    f.team_b_form_score,
                    row.match_winner_team_a,
                ])?;
            }
        }
        tx.commit()?;
        log::info!("Stored {} feature rows", rows.len());
        Ok(rows.len())
    }

    pub fn row_count(&self) -> Result<usize> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM features", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    /// Summary of the stored table
    pub fn stats(&self) -> Result<FeatureStoreStats> {
        let (rows, team_a_wins, min_date, max_date): (i64, Option<i64>, Option<String>, Option<String>) =
            self.conn.query_row(
                "SELECT COUNT(*), SUM(match_winner_teamA), MIN(date), MAX(date) FROM features",
                [],
                |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?)),
            )?;
        let teams: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM (SELECT teamA AS team FROM features UNION SELECT teamB FROM features)",
            [],
            |row| row.get(0),
        )?;

        Ok(FeatureStoreStats {
            row_count: rows as usize,
            team_count: teams as usize,
            team_a_wins: team_a_wins.unwrap_or(0) as usize,
            earliest_match: min_date.and_then(|s| NaiveDate::parse_from_str(&s, "%Y-%m-%d").ok()),
            latest_match: max_date.and_then(|s| NaiveDate::parse_from_str(&s, "%Y-%m-%d").ok()),
        })
    }
}

/// Feature table statistics
#[derive(Debug, Clone)]
pub struct FeatureStoreStats {
    pub row_count: usize,
    pub team_count: usize,
    pub team_a_wins: usize,
    pub earliest_match: Option<NaiveDate>,
    pub latest_match: Option<NaiveDate>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::testing::synthetic_match;
    use crate::features::FeatureEngine;

    #[test]
    fn test_create_database() {
        let store = FeatureStore::in_memory().unwrap();
        let stats = store.stats().unwrap();
        assert_eq!(stats.row_count, 0);
        assert_eq!(stats.team_a_wins, 0);
        assert!(stats.earliest_match.is_none());
    }

    #[test]
    fn test_replace_rows() {
        let mut store = FeatureStore::in_memory().unwrap();
        let rows = FeatureEngine::new().run(vec![
            synthetic_match("India", "England", Some("India"), "Adelaide Oval", "2022-11-10", 168, 170),
            synthetic_match("Pakistan", "England", Some("England"), "MCG", "2022-11-13", 137, 138),
            synthetic_match("India", "Pakistan", None, "MCG", "2022-10-23", 0, 0),
        ]);

        assert_eq!(store.replace_rows(&rows).unwrap(), 3);
        // A second run replaces rather than appends
        assert_eq!(store.replace_rows(&rows[..2]).unwrap(), 2);

        let stats = store.stats().unwrap();
        assert_eq!(stats.row_count, 2);
        assert_eq!(stats.team_count, 3);
        assert_eq!(store.row_count().unwrap(), 2);
        assert_eq!(stats.earliest_match, NaiveDate::from_ymd_opt(2022, 10, 23));
        assert_eq!(stats.latest_match, NaiveDate::from_ymd_opt(2022, 11, 10));
        // India vs Pakistan was a no result, India beat England
        assert_eq!(stats.team_a_wins, 1);
    }
}
