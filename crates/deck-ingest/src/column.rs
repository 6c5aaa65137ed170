use std::path::Path;

use csv::ReaderBuilder;
use tracing::{debug, info};

use deck_model::{IdentifierList, Result, ValidationError};

fn normalize_cell(raw: &str) -> String {
    raw.trim().trim_matches('\u{feff}').to_string()
}

fn unreadable(path: &Path, error: &csv::Error) -> ValidationError {
    ValidationError::Unreadable {
        path: path.to_path_buf(),
        message: error.to_string(),
    }
}

/// Finds `column` in `headers`, exact match first, then ASCII case-insensitive.
fn find_column(headers: &[String], column: &str) -> Option<usize> {
    let wanted = column.trim();
    headers
        .iter()
        .position(|header| header == wanted)
        .or_else(|| {
            headers
                .iter()
                .position(|header| header.eq_ignore_ascii_case(wanted))
        })
}

/// Reads one identifier column from a CSV file.
///
/// The first record is the header. Rows whose cells are all blank are
/// skipped; a blank identifier inside an otherwise filled row is kept as an
/// empty entry so list positions stay aligned with slides.
pub fn read_identifier_column(path: &Path, column: &str) -> Result<IdentifierList> {
    if !path.is_file() {
        return Err(ValidationError::MissingFile {
            path: path.to_path_buf(),
        });
    }
    info!(path = %path.display(), column, "reading identifiers");
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .map_err(|error| unreadable(path, &error))?;
    let mut records = reader.records();
    let headers: Vec<String> = match records.next() {
        Some(record) => record
            .map_err(|error| unreadable(path, &error))?
            .iter()
            .map(normalize_cell)
            .collect(),
        None => Vec::new(),
    };
    let Some(column_index) = find_column(&headers, column) else {
        return Err(ValidationError::MissingColumn {
            column: column.to_string(),
            path: path.to_path_buf(),
        });
    };
    let mut entries = Vec::new();
    for record in records {
        let record = record.map_err(|error| unreadable(path, &error))?;
        if record.iter().all(|value| value.trim().is_empty()) {
            continue;
        }
        let value = record.get(column_index).map(normalize_cell).unwrap_or_default();
        if value.is_empty() {
            debug!(path = %path.display(), row = entries.len() + 1, "blank identifier kept");
        }
        entries.push(value);
    }
    debug!(path = %path.display(), count = entries.len(), "identifiers read");
    Ok(IdentifierList::new(entries).with_source(path.display().to_string()))
}

/// Reads the identifier column from both reference files; the first failure wins.
pub fn load_identifier_lists(
    first: &Path,
    second: &Path,
    column: &str,
) -> Result<(IdentifierList, IdentifierList)> {
    let first = read_identifier_column(first, column)?;
    let second = read_identifier_column(second, column)?;
    Ok((first, second))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(values: &[&str]) -> Vec<String> {
        values.iter().map(|value| (*value).to_string()).collect()
    }

    #[test]
    fn exact_match_wins_over_case_insensitive() {
        let headers = headers(&["member", "Member"]);
        assert_eq!(find_column(&headers, "Member"), Some(1));
        assert_eq!(find_column(&headers, "MEMBER"), Some(0));
        assert_eq!(find_column(&headers, "Team"), None);
    }

    #[test]
    fn normalizes_bom_and_whitespace() {
        assert_eq!(normalize_cell("\u{feff}Member "), "Member");
        assert_eq!(normalize_cell("  Ada\t"), "Ada");
    }
}
