use std::path::Path;
use thiserror::Error;
use tracing::debug;

use crate::utils::validation::{check_row_limit, MAX_ROWS};

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Too many rows: {0} exceeds maximum allowed ({max})", max = MAX_ROWS)]
    TooManyRows(usize),
}

/// One record of a comma-separated table: the key plus its remaining fields
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    pub disease: String,
    pub fields: Vec<String>,
}

/// Read a table file into rows
///
/// # Errors
///
/// Returns `ParseError::Io` if the file cannot be read, or
/// `ParseError::TooManyRows` if the row limit is exceeded.
pub fn parse_rows_file(path: &Path) -> Result<Vec<Row>, ParseError> {
    let content = std::fs::read_to_string(path)?;
    parse_rows(&content)
}

/// Split table text into rows
///
/// # Errors
///
/// Returns `ParseError::TooManyRows` if the row limit is exceeded.
pub fn parse_rows(text: &str) -> Result<Vec<Row>, ParseError> {
    let mut rows = Vec::new();

    for (i, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let mut fields = line.split(',').map(|f| f.trim().to_string());
        let disease = fields.next().unwrap_or_default();
        if disease.is_empty() {
            debug!("Line {} has an empty disease name", i + 1);
        }

        // A final delimiter terminates the last field rather than opening an empty one
        let mut fields: Vec<String> = fields.collect();
        if line.ends_with(',') {
            fields.pop();
        }

        if check_row_limit(rows.len()).is_some() {
            return Err(ParseError::TooManyRows(rows.len()));
        }

        rows.push(Row { disease, fields });
    }

    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_rows_variable_width() {
        let rows = parse_rows("Flu,fever,cough\nCold,sneeze\nGhost\n").unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].disease, "Flu");
        assert_eq!(rows[0].fields, vec!["fever", "cough"]);
        assert_eq!(rows[1].fields, vec!["sneeze"]);
        assert!(rows[2].fields.is_empty());
    }

    #[test]
    fn test_parse_rows_trims_and_handles_crlf() {
        let rows = parse_rows("Flu , fever ,cough\r\nCold,sneeze\r\n").unwrap();
        assert_eq!(rows[0].disease, "Flu");
        assert_eq!(rows[0].fields, vec!["fever", "cough"]);
        assert_eq!(rows[1].fields, vec!["sneeze"]);
    }

    #[test]
    fn test_parse_rows_keeps_empty_inner_fields() {
        let rows = parse_rows("Flu,fever,,cough").unwrap();
        assert_eq!(rows[0].fields, vec!["fever", "", "cough"]);
    }

    #[test]
    fn test_parse_rows_trailing_comma_ends_the_row() {
        let rows = parse_rows("Flu,fever,\nCold,\nMalaria,chills,,\n").unwrap();
        assert_eq!(rows[0].fields, vec!["fever"]);
        assert!(rows[1].fields.is_empty());
        assert_eq!(rows[2].fields, vec!["chills", ""]);
    }

    #[test]
    fn test_parse_rows_skips_only_blank_lines() {
        let text = "# note,fever\n\n  \n,fever\nFlu,fever\n";
        let rows = parse_rows(text).unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].disease, "# note");
        assert_eq!(rows[1].disease, "");
        assert_eq!(rows[1].fields, vec!["fever"]);
        assert_eq!(rows[2].disease, "Flu");
    }

    #[test]
    fn test_too_many_rows_message_uses_limit() {
        let message = ParseError::TooManyRows(MAX_ROWS).to_string();
        assert!(message.contains(&format!("({MAX_ROWS})")));
    }

    #[test]
    fn test_parse_rows_file_missing() {
        let result = parse_rows_file(Path::new("/nonexistent/diseases.csv"));
        assert!(matches!(result, Err(ParseError::Io(_))));
    }
}
