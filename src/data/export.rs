//! CSV export of feature and metadata tables

use std::borrow::Cow;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use super::metadata::MetadataRow;
use crate::features::FeatureRow;
use crate::Result;

/// Quote a cell if it contains a delimiter, quote or newline
fn csv_field(value: &str) -> Cow<'_, str> {
    if value.contains([',', '"', '\n', '\r']) {
        Cow::Owned(format!("\"{}\"", value.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(value)
    }
}

fn write_line<W: Write, S: AsRef<str>>(writer: &mut W, cells: &[S]) -> Result<()> {
    let line: Vec<Cow<'_, str>> = cells.iter().map(|c| csv_field(c.as_ref())).collect();
    writeln!(writer, "{}", line.join(","))?;
    Ok(())
}

/// Write feature rows with a header line
pub fn write_features_csv<W: Write>(writer: &mut W, rows: &[FeatureRow]) -> Result<()> {
    write_line(writer, &FeatureRow::COLUMNS)?;
    for row in rows {
        write_line(writer, &row.to_record())?;
    }
    Ok(())
}

pub fn write_metadata_csv<W: Write>(writer: &mut W, rows: &[MetadataRow]) -> Result<()> {
    write_line(writer, &MetadataRow::COLUMNS)?;
    for row in rows {
        write_line(writer, &row.to_record())?;
    }
    Ok(())
}

/// Write the feature table to a CSV file, creating parent directories
pub fn save_features<P: AsRef<Path>>(path: P, rows: &[FeatureRow]) -> Result<()> {
    let mut writer = BufWriter::new(create(path.as_ref())?);
    write_features_csv(&mut writer, rows)?;
    writer.flush()?;
    Ok(())
}

pub fn save_metadata<P: AsRef<Path>>(path: P, rows: &[MetadataRow]) -> Result<()> {
    let mut writer = BufWriter::new(create(path.as_ref())?);
    write_metadata_csv(&mut writer, rows)?;
    writer.flush()?;
    Ok(())
}

fn create(path: &Path) -> Result<File> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    Ok(File::create(path)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::{FeatureSet, MatchMetadata};

    fn row() -> FeatureRow {
        FeatureRow::new(
            MatchMetadata {
                team_a: "India".to_string(),
                team_b: "Pakistan".to_string(),
                winner: "India".to_string(),
                venue: "Melbourne Cricket Ground, Melbourne".to_string(),
                date: "2022-10-23".to_string(),
                toss_winner: "India".to_string(),
                toss_decision: "field".to_string(),
                competition: "ICC Men's T20 World Cup".to_string(),
            },
            FeatureSet::default(),
        )
    }

    #[test]
    fn test_csv_field_quoting() {
        assert_eq!(csv_field("Lord's"), "Lord's");
        assert_eq!(csv_field("Eden Gardens, Kolkata"), "\"Eden Gardens, Kolkata\"");
        assert_eq!(csv_field("The \"Gabba\""), "\"The \"\"Gabba\"\"\"");
    }

    #[test]
    fn test_features_csv_layout() {
        let mut out = Vec::new();
        write_features_csv(&mut out, &[row()]).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("teamA,teamB,winner,venue,date,"));
        assert!(lines[0].ends_with("teamB_form_score,match_winner_teamA"));
        assert!(lines[1].starts_with("India,Pakistan,India,\"Melbourne Cricket Ground, Melbourne\",2022-10-23,"));
        assert!(lines[1].ends_with(",1"));
    }

    #[test]
    fn test_save_creates_parent_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out").join("features.csv");
        save_features(&path, &[row(), row()]).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text.lines().count(), 3);
    }
}
