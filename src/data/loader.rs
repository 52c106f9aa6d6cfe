//! Match file loading
//!
//! Reads one Cricsheet JSON file per match from a directory.

use std::path::{Path, PathBuf};

use crate::{MatchRecord, Result};

/// Extension of match files
pub const MATCH_FILE_EXTENSION: &str = "json";
/// Match type kept by default
pub const DEFAULT_MATCH_TYPE: &str = "T20";

/// List match files in directory enumeration order
pub fn match_files<P: AsRef<Path>>(dir: P) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir.as_ref())? {
        let path = match entry {
            Ok(entry) => entry.path(),
            Err(e) => {
                log::warn!("Skipping unreadable directory entry: {}", e);
                continue;
            }
        };
        if path.is_file() && path.extension().is_some_and(|ext| ext == MATCH_FILE_EXTENSION) {
            files.push(path);
        }
    }
    Ok(files)
}

/// Parse one match file
pub fn parse_match_file(path: &Path) -> Result<MatchRecord> {
    let content = std::fs::read_to_string(path)?;
    let mut record: MatchRecord = serde_json::from_str(&content)?;
    record.source_file = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    Ok(record)
}

/// Matches loaded from a directory, with counts of what was left out
#[derive(Debug, Clone, Default)]
pub struct LoadedMatches {
    pub matches: Vec<MatchRecord>,
    /// Files that could not be read or parsed
    pub failed: usize,
    /// Parsed files of another match type
    pub other_type: usize,
}

/// Loads matches of one type from a directory
pub struct MatchLoader {
    dir: PathBuf,
    match_type: String,
}

impl MatchLoader {
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        MatchLoader {
            dir: dir.as_ref().to_path_buf(),
            match_type: DEFAULT_MATCH_TYPE.to_string(),
        }
    }

    /// Keep only matches of this type
    pub fn match_type(mut self, match_type: &str) -> Self {
        self.match_type = match_type.to_string();
        self
    }

    /// Load every matching file. Bad files are logged and skipped; the
    /// result is in directory order, not date order.
    pub fn load(&self) -> Result<LoadedMatches> {
        let mut loaded = LoadedMatches::default();

        for path in match_files(&self.dir)? {
            match parse_match_file(&path) {
                Ok(record) if record.is_match_type(&self.match_type) => {
                    loaded.matches.push(record);
                }
                Ok(_) => {
                    log::debug!("Skipping non-{} match {}", self.match_type, path.display());
                    loaded.other_type += 1;
                }
                Err(e) => {
                    log::warn!("Failed to load {}: {}", path.display(), e);
                    loaded.failed += 1;
                }
            }
        }

        log::info!(
            "Loaded {} {} matches from {} ({} failed, {} other type)",
            loaded.matches.len(),
            self.match_type,
            self.dir.display(),
            loaded.failed,
            loaded.other_type
        );
        Ok(loaded)
    }
}

/// Load all matches of `match_type` from `dir`
pub fn load_matches<P: AsRef<Path>>(dir: P, match_type: &str) -> Result<Vec<MatchRecord>> {
    Ok(MatchLoader::new(dir).match_type(match_type).load()?.matches)
}
