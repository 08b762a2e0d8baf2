//! Reader for the reaction list: one reaction per line, a (possibly
//! quoted) name and a formula string separated by a run of two or more
//! spaces.

use std::fs;
use std::path::Path;

use thiserror::Error;

/// One named reaction formula from the input list
#[derive(Debug, Clone, PartialEq)]
pub struct ReactionEntry {
    pub name: String,
    pub formula: String,
}

/// Read a reaction list file into reaction entries, preserving file order.
/// Any malformed line aborts the read.
pub fn read_reaction_list<P: AsRef<Path>>(path: P) -> Result<Vec<ReactionEntry>, ParseError> {
    let data = match fs::read_to_string(path) {
        Ok(data) => data,
        Err(err) => return Err(ParseError::UnableToRead(format!("{:?}", err))),
    };
    parse_reaction_list(&data)
}

/// Parse reaction list text into reaction entries. Blank lines are
/// skipped; a line without the name/formula delimiter is an error.
pub fn parse_reaction_list(data: &str) -> Result<Vec<ReactionEntry>, ParseError> {
    let mut entries = Vec::new();
    for (index, line) in data.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let entry = parse_line(line).ok_or_else(|| ParseError::MissingDelimiter {
            line: index + 1,
            content: line.to_string(),
        })?;
        entries.push(entry);
    }
    Ok(entries)
}

/// Split a line at the first run of two or more spaces; the name field may
/// be wrapped in single quotes
fn parse_line(line: &str) -> Option<ReactionEntry> {
    let position = line.find("  ")?;
    let name = line[..position].trim().trim_matches('\'').to_string();
    let formula = line[position..].trim().to_string();
    if name.is_empty() || formula.is_empty() {
        return None;
    }
    Some(ReactionEntry { name, formula })
}

/// Enum representing possible reaction list errors
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("unable to read reaction list due to {0}")]
    UnableToRead(String),
    #[error("line {line} of the reaction list has no name/formula delimiter: {content:?}")]
    MissingDelimiter { line: usize, content: String },
}
