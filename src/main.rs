//! T20 feature pipeline CLI
//!
//! Builds the match winner feature table from a directory of Cricsheet JSON
//! files.

use clap::{Parser, Subcommand};
use cricpred::features::toss::BatFirstRule;
use cricpred::{Config, Result};

#[derive(Parser)]
#[command(name = "cricpred")]
#[command(about = "T20 cricket match feature engineering", long_about = None)]
struct Cli {
    /// Config file path
    #[arg(short, long, default_value = "config.toml")]
    config: String,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the feature table from match files
    Features {
        /// Directory of match JSON files
        #[arg(long)]
        data: Option<String>,
        /// Output CSV path
        #[arg(long)]
        output: Option<String>,
        /// Also store the table in the SQLite database
        #[arg(long)]
        store: bool,
        /// Bat-first resolution: legacy or toss-decision
        #[arg(long)]
        bat_first: Option<BatFirstRule>,
    },
    /// Parse match metadata only, reporting files that fail
    Metadata {
        /// Directory of match JSON files
        #[arg(long)]
        data: Option<String>,
        /// Output CSV path
        #[arg(long)]
        output: Option<String>,
    },
    /// Show current form scores after processing all matches
    Form {
        /// Player names
        #[arg(required = true)]
        players: Vec<String>,
        /// Directory of match JSON files
        #[arg(long)]
        data: Option<String>,
    },
    /// Print the model input row for an upcoming fixture
    Fixture {
        team_a: String,
        team_b: String,
        #[arg(long)]
        venue: String,
        #[arg(long)]
        toss_winner: String,
        #[arg(long)]
        toss_decision: String,
        #[arg(long, default_value = "Unknown")]
        competition: String,
        /// Compute features from this match directory instead of fallbacks
        #[arg(long)]
        data: Option<String>,
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show feature database status
    Status,
    /// Write a default config file
    Init,
}

fn main() {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level))
        .format_timestamp(None)
        .init();

    // Load or create config
    let config = if std::path::Path::new(&cli.config).exists() {
        match Config::load(&cli.config) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("Error loading config: {}", e);
                std::process::exit(1);
            }
        }
    } else {
        Config::default()
    };

    let result = match cli.command {
        Commands::Features {
            data,
            output,
            store,
            bat_first,
        } => commands::features(&config, data, output, store, bat_first),
        Commands::Metadata { data, output } => commands::metadata(&config, data, output),
        Commands::Form { players, data } => commands::form(&config, data, &players),
        Commands::Fixture {
            team_a,
            team_b,
            venue,
            toss_winner,
            toss_decision,
            competition,
            data,
            json,
        } => {
            let fixture = cricpred::predict::Fixture {
                team_a,
                team_b,
                venue,
                toss_winner,
                toss_decision,
                competition,
                team_a_players: Vec::new(),
                team_b_players: Vec::new(),
            };
            commands::fixture(&config, fixture, data, json)
        }
        Commands::Status => commands::status(&config),
        Commands::Init => commands::init(&cli.config),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

mod commands {
    use super::*;
    use cricpred::data::export::{save_features, save_metadata};
    use cricpred::data::{scan_metadata, FeatureStore, MatchLoader};
    use cricpred::features::FeatureEngine;
    use cricpred::predict::{Fixture, InferenceRow};

    pub fn init(config_path: &str) -> Result<()> {
        let config = Config::default();
        config.save(config_path)?;
        println!("Created default config at {}", config_path);

        println!("\nNext steps:");
        println!(
            "  1. Put Cricsheet JSON files in {}/",
            config.data.matches_dir
        );
        println!("  2. Run 'cricpred features' to build the feature table");
        println!("  3. Run 'cricpred status' after 'cricpred features --store'");

        Ok(())
    }

    /// Load and process every match, returning the engine and its rows
    fn run_pipeline(
        config: &Config,
        data: Option<String>,
    ) -> Result<(FeatureEngine, Vec<cricpred::features::FeatureRow>, usize)> {
        let dir = data.unwrap_or_else(|| config.data.matches_dir.clone());
        let loaded = MatchLoader::new(&dir)
            .match_type(&config.data.match_type)
            .load()?;
        let skipped = loaded.failed;

        let mut engine = FeatureEngine::from_config(&config.features);
        let rows = engine.run(loaded.matches);
        Ok((engine, rows, skipped))
    }

    pub fn features(
        config: &Config,
        data: Option<String>,
        output: Option<String>,
        store: bool,
        bat_first: Option<BatFirstRule>,
    ) -> Result<()> {
        let mut config = config.clone();
        if let Some(rule) = bat_first {
            config.features.bat_first_rule = rule;
        }

        let (_, rows, skipped) = run_pipeline(&config, data)?;
        if rows.is_empty() {
            println!("No {} matches found.", config.data.match_type);
            return Ok(());
        }

        let output = output.unwrap_or_else(|| config.data.output_csv.clone());
        save_features(&output, &rows)?;

        if store {
            let mut db = FeatureStore::open(&config.data.database_path)?;
            db.replace_rows(&rows)?;
            println!("Stored feature rows in {}", config.data.database_path);
        }

        let team_a_wins = rows.iter().filter(|r| r.match_winner_team_a == 1).count();
        println!("Feature dataset saved as {}", output);
        println!("  Rows:         {}", rows.len());
        println!(
            "  Team A wins:  {}/{} ({:.1}%)",
            team_a_wins,
            rows.len(),
            100.0 * team_a_wins as f64 / rows.len() as f64
        );
        println!("  Skipped:      {} unreadable files", skipped);

        Ok(())
    }

    pub fn metadata(config: &Config, data: Option<String>, output: Option<String>) -> Result<()> {
        let dir = data.unwrap_or_else(|| config.data.matches_dir.clone());
        let scan = scan_metadata(&dir, &config.data.match_type)?;

        for failure in &scan.failures {
            println!("Failed to parse {}: {}", failure.file, failure.message);
        }
        println!("Parsed {} {} matches.", scan.rows.len(), config.data.match_type);

        if let Some(path) = output {
            save_metadata(&path, &scan.rows)?;
            println!("Metadata saved as {}", path);
        }

        Ok(())
    }

    pub fn form(config: &Config, data: Option<String>, players: &[String]) -> Result<()> {
        let (engine, rows, _) = run_pipeline(config, data)?;
        let tracker = engine.players();

        println!("Form after {} matches", rows.len());
        println!("───────────────────────────────────────────────");
        for player in players {
            println!(
                "  {:<24} {:>7.3}  (bat {:.2}, bowl {:.2}, PoM {})",
                player,
                tracker.form_score(player),
                tracker.batting_average(player),
                tracker.bowling_average(player),
                tracker.player_of_match_count(player)
            );
        }
        println!("  {:<24} {:>7.3}", "Total", tracker.team_form_score(players));

        Ok(())
    }

    pub fn fixture(config: &Config, fixture: Fixture, data: Option<String>, json: bool) -> Result<()> {
        let row = match data {
            Some(dir) => {
                let (engine, _, _) = run_pipeline(config, Some(dir))?;
                InferenceRow::from_state(&engine, fixture)
            }
            None => InferenceRow::from_fixture(fixture),
        };

        if json {
            println!("{}", serde_json::to_string_pretty(&row)?);
        } else {
            for (column, value) in row.values() {
                println!("  {:<28} {}", column, value);
            }
        }

        Ok(())
    }

    pub fn status(config: &Config) -> Result<()> {
        let db = FeatureStore::open(&config.data.database_path)?;
        let stats = db.stats()?;

        println!("Feature Database Status");
        println!("───────────────────────────────");
        println!("  Path:         {}", config.data.database_path);
        println!("  Rows:         {}", stats.row_count);
        println!("  Teams:        {}", stats.team_count);
        println!("  Team A wins:  {}", stats.team_a_wins);
        if let (Some(earliest), Some(latest)) = (stats.earliest_match, stats.latest_match) {
            println!("  Range:        {} to {}", earliest, latest);
        }

        Ok(())
    }
}
