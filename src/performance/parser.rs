//! Performance text file parser.
//!
//! Performance files are whitespace-delimited text with a header line
//! followed by one sample per line:
//!
//! ```text
//! time  mass_A  t  x  [v]
//! ```
//!
//! Lines that are too short or contain non-numeric tokens are skipped
//! without failing the whole file.

use std::path::Path;

use crate::performance::types::{ParseError, PerformanceRow, RowOutcome, SkipReason};

/// Minimum number of tokens a data line must have.
const MIN_COLUMNS: usize = 4;

/// Parse file content into rows, dropping any line that does not parse.
///
/// The first line is always treated as a header and discarded.
pub fn parse_performance_data(content: &str) -> Vec<PerformanceRow> {
    let mut rows = Vec::new();
    let mut skipped = 0usize;

    for outcome in parse_performance_lines(content) {
        match outcome {
            RowOutcome::Parsed(row) => rows.push(row),
            RowOutcome::Skipped(_) => skipped += 1,
        }
    }

    tracing::debug!("Parsed {} performance rows ({} skipped)", rows.len(), skipped);
    rows
}

/// Parse file content and report the outcome of every data line.
pub fn parse_performance_lines(content: &str) -> Vec<RowOutcome> {
    content
        .trim()
        .lines()
        .skip(1)
        .enumerate()
        .map(|(i, line)| {
            let outcome = parse_line(line);
            if let RowOutcome::Skipped(reason) = &outcome {
                // Line numbers are 1-based and count the header.
                tracing::trace!("Skipping line {}: {:?}", i + 2, reason);
            }
            outcome
        })
        .collect()
}

/// Parse a single data line.
pub fn parse_line(line: &str) -> RowOutcome {
    let parts: Vec<&str> = line.split_whitespace().collect();
    if parts.len() < MIN_COLUMNS {
        return RowOutcome::Skipped(SkipReason::TooFewColumns { found: parts.len() });
    }

    let mut values = [0.0f64; 5];
    for (column, token) in parts.iter().take(values.len()).enumerate() {
        match token.parse::<f64>() {
            Ok(value) if value.is_finite() => values[column] = value,
            // `nan` and `inf` parse as floats but cannot be aggregated or stored.
            _ => return RowOutcome::Skipped(SkipReason::InvalidNumber { column: column + 1 }),
        }
    }

    let [time, mass_a, t, x, v] = values;
    RowOutcome::Parsed(PerformanceRow {
        time,
        mass_a,
        t,
        x,
        v,
    })
}

/// Read and parse a performance file from disk.
pub fn parse_performance_file(path: &Path) -> Result<Vec<PerformanceRow>, ParseError> {
    let content = read_performance_file(path)?;
    Ok(parse_performance_data(&content))
}

/// Read a performance file fully into memory as UTF-8 text.
pub fn read_performance_file(path: &Path) -> Result<String, ParseError> {
    let bytes = std::fs::read(path).map_err(|e| ParseError::Io(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| ParseError::Encoding(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_five_columns() {
        let content = "time mass_A t x v\n0.0 0.863 0.0 0.0 7.0\n0.1 0.870 0.1 0.7 7.1";
        let rows = parse_performance_data(content);

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].time, 0.1);
        assert_eq!(rows[1].mass_a, 0.870);
        assert_eq!(rows[1].x, 0.7);
        assert_eq!(rows[1].v, 7.1);
    }

    #[test]
    fn test_missing_speed_defaults_to_zero() {
        let rows = parse_performance_data("header\n1.0 0.9 0.1 5.0");
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].v, 0.0);
    }

    #[test]
    fn test_short_and_malformed_lines_are_skipped() {
        let content = "header\n1.0 2.0 3.0\n1.0 abc 3.0 4.0 5.0\n2.0 0.9 0.1 5.0 8.0";
        let outcomes = parse_performance_lines(content);

        assert_eq!(
            outcomes[0],
            RowOutcome::Skipped(SkipReason::TooFewColumns { found: 3 })
        );
        assert_eq!(
            outcomes[1],
            RowOutcome::Skipped(SkipReason::InvalidNumber { column: 2 })
        );
        assert!(matches!(outcomes[2], RowOutcome::Parsed(row) if row.v == 8.0));
    }

    #[test]
    fn test_extra_columns_are_ignored() {
        let rows = parse_performance_data("h\n1 2 3 4 5 6 not-a-number");
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].v, 5.0);
    }

    #[test]
    fn test_tab_delimited() {
        let rows = parse_performance_data("mass A\tt\tx\tv\n0.5\t0.86\t0.1\t0.7\t7.06\n");
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].v, 7.06);
    }

    #[test]
    fn test_empty_and_header_only() {
        assert!(parse_performance_data("").is_empty());
        assert!(parse_performance_data("time mass_A t x v").is_empty());
        assert!(parse_performance_data("time mass_A t x v\n\n").is_empty());
    }

    #[test]
    fn test_parse_file_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("T01_1_0-25.txt");
        std::fs::write(&path, "time mass_A t x v\n0.0 0.86 0.0 0.0 6.9\n").unwrap();

        let rows = parse_performance_file(&path).unwrap();
        assert_eq!(rows.len(), 1);

        let missing = parse_performance_file(&dir.path().join("nope.txt"));
        assert!(matches!(missing, Err(ParseError::Io(_))));
    }
}
