//! CSV ingest and cleaning.
//!
//! This module turns the channel-statistics CSV into a clean, immutable
//! [`Dataset`] that the aggregators can borrow for the rest of the process.
//!
//! Design goals:
//! - **Strict schema** for required columns (clear errors + exit code 2)
//! - **Row-level validation** (skip bad rows, but report what happened)
//! - **One-shot cleaning**: the returned dataset is never mutated again
//! - **Separation of concerns**: no aggregation logic here
//!
//! Cleaning rules:
//! - a missing/empty `category` becomes the `"Other"` sentinel
//! - rows with a missing or unparseable `created_year` are dropped
//! - rows whose `created_year` is 1970 are dropped (a known bad-data
//!   sentinel; the platform's real founding year is 2005)
//! - rows with missing or non-numeric metric/earnings values are skipped
//!   and surfaced as line-numbered row errors
//!
//! The derived `average_monthly_earnings` column is computed here, once,
//! during record construction.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use csv::StringRecord;

use crate::domain::{ChannelRecord, Dataset, DatasetStats, RowError};
use crate::error::AppError;

/// Default dataset path, relative to the working directory.
pub const DEFAULT_DATA_FILE: &str = "Global YouTube Statistics.csv";

/// Creation year that marks bad input rather than a real founding date.
const BAD_YEAR_SENTINEL: i32 = 1970;

const REQUIRED_COLUMNS: [&str; 8] = [
    "youtuber",
    "category",
    "created_year",
    "subscribers",
    "video views",
    "uploads",
    "highest_monthly_earnings",
    "lowest_monthly_earnings",
];

/// Load and clean the dataset from a CSV file on disk.
///
/// A missing or unreadable file is fatal (exit code 2): the application
/// cannot do anything without its table.
pub fn load_dataset(path: &Path) -> Result<Dataset, AppError> {
    let bytes = fs::read(path).map_err(|e| {
        AppError::new(2, format!("Failed to open CSV '{}': {e}", path.display()))
    })?;
    let text = decode_latin1(&bytes);
    parse_dataset(&text)
}

/// Parse and clean an already-decoded CSV document.
///
/// Split from [`load_dataset`] so tests can feed literal CSV text.
pub fn parse_dataset(text: &str) -> Result<Dataset, AppError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes());

    let headers = reader
        .headers()
        .map_err(|e| AppError::new(2, format!("Failed to read CSV headers: {e}")))?
        .clone();

    let header_map = build_header_map(&headers);
    ensure_required_columns_exist(&header_map)?;

    let mut records = Vec::new();
    let mut row_errors = Vec::new();
    let mut rows_read = 0usize;
    let mut rows_dropped = 0usize;

    for (idx, result) in reader.records().enumerate() {
        // +2 because:
        // - records() starts at line 1 after headers
        // - CSV is 1-based line numbers
        let line = idx + 2;
        rows_read += 1;

        let record = match result {
            Ok(r) => r,
            Err(e) => {
                row_errors.push(RowError {
                    line,
                    name: None,
                    message: format!("CSV parse error: {e}"),
                });
                continue;
            }
        };

        match parse_row(&record, &header_map) {
            Ok(Some(channel)) => records.push(channel),
            Ok(None) => rows_dropped += 1,
            Err((name, message)) => row_errors.push(RowError {
                line,
                name,
                message,
            }),
        }
    }

    let rows_used = records.len();
    if rows_used == 0 {
        return Err(AppError::new(3, "No valid rows remain after cleaning."));
    }

    let stats = compute_stats(&records);

    Ok(Dataset {
        records,
        stats,
        row_errors,
        rows_read,
        rows_used,
        rows_dropped,
    })
}

/// Decode Latin-1 bytes into a `String`.
///
/// Latin-1 code points map 1:1 onto the first 256 Unicode scalars, so a
/// widening pass is a complete decoder. The source export is Latin-1, not
/// UTF-8; feeding it to the CSV reader raw would mangle accented names.
pub fn decode_latin1(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| b as char).collect()
}

fn build_header_map(headers: &StringRecord) -> HashMap<String, usize> {
    headers
        .iter()
        .enumerate()
        .map(|(idx, name)| (normalize_header_name(name), idx))
        .collect()
}

fn normalize_header_name(name: &str) -> String {
    // Excel and other tools sometimes emit CSVs with a BOM prefix on the
    // first header. If we don't strip it, schema validation will
    // incorrectly report missing columns.
    let name = name.trim().trim_start_matches('\u{feff}');
    name.to_ascii_lowercase()
}

fn ensure_required_columns_exist(header_map: &HashMap<String, usize>) -> Result<(), AppError> {
    for column in REQUIRED_COLUMNS {
        if !header_map.contains_key(column) {
            return Err(AppError::new(
                2,
                format!("Missing required column: `{column}`"),
            ));
        }
    }
    Ok(())
}

type RowFailure = (Option<String>, String);

/// Parse and clean one CSV row.
///
/// Returns:
/// - `Ok(Some(record))` for a surviving row
/// - `Ok(None)` for a row removed by the creation-year cleaning rules
/// - `Err((name, message))` for a row with invalid required values
fn parse_row(
    record: &StringRecord,
    header_map: &HashMap<String, usize>,
) -> Result<Option<ChannelRecord>, RowFailure> {
    let name = get_optional(record, header_map, "youtuber")
        .map(str::to_string)
        .ok_or((None, "Missing `Youtuber` value.".to_string()))?;

    let fail = |message: String| (Some(name.clone()), message);

    // Missing or unparseable years are a drop, not an error: the source
    // data has both blank years and the 1970 epoch sentinel, and neither
    // carries information worth keeping the row for.
    let created_year = match parse_opt_f64(get_optional(record, header_map, "created_year")) {
        Some(y) => y as i32,
        None => return Ok(None),
    };
    if created_year == BAD_YEAR_SENTINEL {
        return Ok(None);
    }

    let category = match get_optional(record, header_map, "category") {
        Some(c) => c.to_string(),
        None => "Other".to_string(),
    };

    let subscribers = parse_required_f64(record, header_map, "subscribers").map_err(&fail)?;
    let video_views = parse_required_f64(record, header_map, "video views").map_err(&fail)?;
    let uploads = parse_required_f64(record, header_map, "uploads").map_err(&fail)?;
    let highest = parse_required_f64(record, header_map, "highest_monthly_earnings").map_err(&fail)?;
    let lowest = parse_required_f64(record, header_map, "lowest_monthly_earnings").map_err(&fail)?;

    // The derived column. Inverted bounds (lowest > highest) are not
    // rejected; the average is still well-defined.
    let average_monthly_earnings = (highest + lowest) / 2.0;

    let display_name = letters_only(&name);

    Ok(Some(ChannelRecord {
        name,
        display_name,
        category,
        created_year,
        subscribers,
        video_views,
        uploads,
        highest_monthly_earnings: highest,
        lowest_monthly_earnings: lowest,
        average_monthly_earnings,
    }))
}

/// Presentation transform: keep ASCII letters only.
///
/// Spaces, digits, and punctuation are removed. The result is display-only
/// and must never be used as a lookup key.
fn letters_only(name: &str) -> String {
    name.chars().filter(char::is_ascii_alphabetic).collect()
}

fn compute_stats(records: &[ChannelRecord]) -> DatasetStats {
    let mut year_min = i32::MAX;
    let mut year_max = i32::MIN;
    for r in records {
        year_min = year_min.min(r.created_year);
        year_max = year_max.max(r.created_year);
    }

    let mut categories: Vec<&str> = records.iter().map(|r| r.category.as_str()).collect();
    categories.sort_unstable();
    categories.dedup();

    DatasetStats {
        n_rows: records.len(),
        n_categories: categories.len(),
        year_min,
        year_max,
    }
}

fn get_optional<'a>(
    record: &'a StringRecord,
    header_map: &HashMap<String, usize>,
    name: &str,
) -> Option<&'a str> {
    let idx = header_map.get(name)?;
    record.get(*idx).map(str::trim).filter(|s| !s.is_empty())
}

fn parse_required_f64(
    record: &StringRecord,
    header_map: &HashMap<String, usize>,
    name: &str,
) -> Result<f64, String> {
    parse_opt_f64(get_optional(record, header_map, name))
        .ok_or_else(|| format!("Missing/invalid `{name}` value."))
}

fn parse_opt_f64(s: Option<&str>) -> Option<f64> {
    let s = s?;
    let v = s.parse::<f64>().ok()?;
    if v.is_finite() { Some(v) } else { None }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "Youtuber,category,created_year,subscribers,video views,uploads,highest_monthly_earnings,lowest_monthly_earnings";

    fn csv_with(rows: &[&str]) -> String {
        let mut out = String::from(HEADER);
        for row in rows {
            out.push('\n');
            out.push_str(row);
        }
        out
    }

    #[test]
    fn drops_missing_and_sentinel_years() {
        let text = csv_with(&[
            "A,Music,,1000,5000,10,200,100",
            "B,Music,,2000,6000,20,300,100",
            "C,Music,1970,3000,7000,30,400,200",
            "D,Music,2012,4000,8000,40,500,300",
        ]);
        let dataset = parse_dataset(&text).unwrap();
        assert_eq!(dataset.rows_read, 4);
        assert_eq!(dataset.rows_used, 1);
        assert_eq!(dataset.rows_dropped, 3);
        assert_eq!(dataset.records[0].name, "D");
        assert!(dataset.records.iter().all(|r| r.created_year != 1970));
    }

    #[test]
    fn missing_category_becomes_other() {
        let text = csv_with(&[
            "A,,2010,1000,5000,10,200,100",
            "B,Gaming,2011,2000,6000,20,300,100",
        ]);
        let dataset = parse_dataset(&text).unwrap();
        assert_eq!(dataset.records[0].category, "Other");
        assert_eq!(dataset.records[1].category, "Gaming");
        assert!(dataset.records.iter().all(|r| !r.category.is_empty()));
    }

    #[test]
    fn average_earnings_is_exact_midpoint() {
        let text = csv_with(&["A,Music,2010,1000,5000,10,250.5,100.5"]);
        let dataset = parse_dataset(&text).unwrap();
        let r = &dataset.records[0];
        assert_eq!(r.average_monthly_earnings, (250.5 + 100.5) / 2.0);
    }

    #[test]
    fn invalid_numeric_is_a_row_error_not_a_crash() {
        let text = csv_with(&[
            "A,Music,2010,not-a-number,5000,10,200,100",
            "B,Music,2011,2000,6000,20,300,100",
        ]);
        let dataset = parse_dataset(&text).unwrap();
        assert_eq!(dataset.rows_used, 1);
        assert_eq!(dataset.row_errors.len(), 1);
        assert_eq!(dataset.row_errors[0].line, 2);
        assert_eq!(dataset.row_errors[0].name.as_deref(), Some("A"));
    }

    #[test]
    fn empty_table_is_fatal() {
        let text = csv_with(&["A,Music,1970,1000,5000,10,200,100"]);
        let err = parse_dataset(&text).unwrap_err();
        assert_eq!(err.exit_code(), 3);
    }

    #[test]
    fn missing_required_column_is_fatal() {
        let text = "Youtuber,category,created_year\nA,Music,2010";
        let err = parse_dataset(text).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn headers_are_case_insensitive_and_bom_tolerant() {
        let text = format!("\u{feff}{}", csv_with(&["A,Music,2010,1,2,3,4,2"]))
            .replace("Youtuber", "YOUTUBER");
        let dataset = parse_dataset(&text).unwrap();
        assert_eq!(dataset.rows_used, 1);
    }

    #[test]
    fn display_name_keeps_letters_only() {
        let text = csv_with(&["Mr. Beast 2!,Entertainment,2012,1,2,3,4,2"]);
        let dataset = parse_dataset(&text).unwrap();
        assert_eq!(dataset.records[0].display_name, "MrBeast");
        assert_eq!(dataset.records[0].name, "Mr. Beast 2!");
    }

    #[test]
    fn latin1_bytes_decode_to_expected_chars() {
        // 0xE9 is 'é' in Latin-1 and invalid as standalone UTF-8.
        let decoded = decode_latin1(&[b'c', b'a', b'f', 0xE9]);
        assert_eq!(decoded, "café");
    }

    #[test]
    fn fractional_year_strings_parse() {
        // pandas-style exports write years as floats ("2006.0").
        let text = csv_with(&["A,Music,2006.0,1,2,3,4,2"]);
        let dataset = parse_dataset(&text).unwrap();
        assert_eq!(dataset.records[0].created_year, 2006);
    }
}
