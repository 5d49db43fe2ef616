//! Researcher name list loading.
//!
//! Two layouts are accepted:
//! - plain text, one name per line (`#` starts a comment line)
//! - CSV with a header row containing a `name` column

use crate::error::{PresenceError, Result};
use std::path::Path;
use std::str::FromStr;
use tracing::{debug, info};

/// Header of the name column in tabular input
pub const NAME_COLUMN: &str = "name";

/// Layout of a names file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    Text,
    Csv,
}

impl InputFormat {
    /// Infer the layout from the file extension (`.csv` is tabular).
    pub fn infer(path: &Path) -> Self {
        let is_csv = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("csv"));
        if is_csv {
            InputFormat::Csv
        } else {
            InputFormat::Text
        }
    }
}

impl FromStr for InputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "text" | "txt" => Ok(InputFormat::Text),
            "csv" => Ok(InputFormat::Csv),
            other => Err(format!("unknown names format '{}' (expected text or csv)", other)),
        }
    }
}

/// Load researcher names in file order.
///
/// Names are trimmed; empty entries are skipped. Duplicates are kept.
///
/// # Errors
///
/// `InputNotFound` if the path does not exist, `InputFormat` if a CSV file
/// has no `name` column, `Io`/`Csv` for read failures.
pub fn load_names(path: &Path, format: Option<InputFormat>) -> Result<Vec<String>> {
    if !path.exists() {
        return Err(PresenceError::InputNotFound(path.to_path_buf()));
    }

    let format = format.unwrap_or_else(|| InputFormat::infer(path));
    debug!(path = %path.display(), format = ?format, "Loading names");

    let names = match format {
        InputFormat::Text => parse_text(&std::fs::read_to_string(path)?),
        InputFormat::Csv => parse_csv(std::fs::File::open(path)?)?,
    };

    info!(count = names.len(), path = %path.display(), "Loaded researcher names");
    Ok(names)
}

fn parse_text(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect()
}

fn parse_csv<R: std::io::Read>(reader: R) -> Result<Vec<String>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let column = rdr
        .headers()?
        .iter()
        .position(|h| h.trim() == NAME_COLUMN)
        .ok_or_else(|| {
            PresenceError::InputFormat(format!("CSV header has no '{}' column", NAME_COLUMN))
        })?;

    let mut names = Vec::new();
    for record in rdr.records() {
        let record = record?;
        if let Some(name) = record.get(column).map(str::trim).filter(|n| !n.is_empty()) {
            names.push(name.to_string());
        }
    }
    Ok(names)
}
