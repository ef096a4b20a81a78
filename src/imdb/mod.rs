//! IMDB list export reader.
//!
//! Turns the CSV produced by IMDB's "Export this list" into typed rows.
//! Problems with the header or a single row become a [`RowDiagnostic`] for
//! the affected rows and never abort the import.
//!
//! # Module Structure
//!
//! - [`field_parsers`] - Pure helpers for ids, years and blank fields

pub mod field_parsers;

use csv::StringRecord;
use log::{debug, info, warn};
use std::path::Path;

use crate::error::Result;
use crate::models::DesiredItem;

use field_parsers::{non_empty, parse_year, resolve_imdb_id};

/// Title used for rows that have none, so they still show up in the report
pub const UNKNOWN_TITLE: &str = "Unknown";

const NO_TITLE_COLUMN: &str = "CSV file has no 'Title' column";

/// A row that could not be turned into a [`DesiredItem`]
#[derive(Debug, Clone, PartialEq)]
pub struct RowDiagnostic {
    pub line: usize,
    pub title: String,
    pub year: Option<i32>,
    pub external_id: String,
    pub note: String,
}

impl RowDiagnostic {
    /// Best-effort item carrying whatever the row did provide
    pub fn to_item(&self) -> DesiredItem {
        DesiredItem {
            title: self.title.clone(),
            year: self.year,
            external_id: self.external_id.clone(),
            original_title: None,
            line: self.line,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ParsedRow {
    Valid(DesiredItem),
    Invalid(RowDiagnostic),
}

impl ParsedRow {
    pub fn line(&self) -> usize {
        match self {
            ParsedRow::Valid(item) => item.line,
            ParsedRow::Invalid(diag) => diag.line,
        }
    }
}

/// Parsed IMDB list, one entry per data row in file order
#[derive(Debug, Clone, Default)]
pub struct ImdbList {
    pub rows: Vec<ParsedRow>,
}

impl ImdbList {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn valid_items(&self) -> impl Iterator<Item = &DesiredItem> {
        self.rows.iter().filter_map(|row| match row {
            ParsedRow::Valid(item) => Some(item),
            ParsedRow::Invalid(_) => None,
        })
    }

    pub fn diagnostics(&self) -> impl Iterator<Item = &RowDiagnostic> {
        self.rows.iter().filter_map(|row| match row {
            ParsedRow::Invalid(diag) => Some(diag),
            ParsedRow::Valid(_) => None,
        })
    }
}

/// Column positions resolved from the header row
#[derive(Debug, Clone, Copy)]
struct Columns {
    title: Option<usize>,
    year: Option<usize>,
    original_title: Option<usize>,
    const_id: Option<usize>,
    url: Option<usize>,
}

impl Columns {
    fn from_headers(headers: &StringRecord) -> Self {
        let find = |name: &str| {
            headers
                .iter()
                .position(|h| h.trim().trim_start_matches('\u{feff}').eq_ignore_ascii_case(name))
        };

        let columns = Columns {
            title: find("Title"),
            year: find("Year"),
            original_title: find("Original Title"),
            const_id: find("Const"),
            url: find("URL"),
        };

        if columns.title.is_none() {
            warn!("{NO_TITLE_COLUMN}, every row will be reported as invalid");
        }
        if columns.year.is_none() {
            warn!("CSV has no 'Year' column, matching on titles only");
        }
        if columns.const_id.is_none() && columns.url.is_none() {
            warn!("CSV has neither 'Const' nor 'URL' column, every row will lack an IMDB id");
        }
        columns
    }
}

/// Reads an IMDB list export from disk
pub fn read_imdb_csv<P: AsRef<Path>>(path: P) -> Result<ImdbList> {
    let path = path.as_ref();
    info!("Reading IMDB list from: {}", path.display());
    let content = std::fs::read_to_string(path)?;
    debug!("CSV file size: {} bytes", content.len());
    parse_imdb_csv(&content)
}

/// Parses IMDB list CSV content
pub fn parse_imdb_csv(content: &str) -> Result<ImdbList> {
    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(content.as_bytes());

    let headers = rdr.headers()?.clone();
    let columns = Columns::from_headers(&headers);

    let mut rows = Vec::new();
    for (index, record) in rdr.records().enumerate() {
        // header occupies line 1
        let fallback_line = index + 2;
        let row = match record {
            Ok(record) => {
                let line = record
                    .position()
                    .map(|p| p.line() as usize)
                    .unwrap_or(fallback_line);
                parse_row(&record, columns, line)
            }
            Err(e) => {
                let line = e
                    .position()
                    .map(|p| p.line() as usize)
                    .unwrap_or(fallback_line);
                ParsedRow::Invalid(RowDiagnostic {
                    line,
                    title: UNKNOWN_TITLE.to_string(),
                    year: None,
                    external_id: String::new(),
                    note: format!("Unreadable row: {e}"),
                })
            }
        };

        if let ParsedRow::Invalid(diag) = &row {
            warn!("Line {}: {} - {}", diag.line, diag.title, diag.note);
        }
        rows.push(row);
    }

    let list = ImdbList { rows };
    info!(
        "Found {} movies in the CSV file ({} invalid)",
        list.len(),
        list.diagnostics().count()
    );
    Ok(list)
}

fn parse_row(record: &StringRecord, columns: Columns, line: usize) -> ParsedRow {
    let field = |idx: Option<usize>| idx.and_then(|i| record.get(i));

    let title = non_empty(field(columns.title));
    let original_title = non_empty(field(columns.original_title));
    let raw_year = field(columns.year).unwrap_or("");
    let url = field(columns.url).unwrap_or("");
    let external_id = resolve_imdb_id(field(columns.const_id), Some(url));

    let mut notes = Vec::new();
    if columns.title.is_none() {
        notes.push(NO_TITLE_COLUMN.to_string());
    } else if title.is_none() {
        notes.push("Missing title".to_string());
    }
    let year = match parse_year(raw_year) {
        Ok(year) => year,
        Err(note) => {
            notes.push(note);
            None
        }
    };
    if external_id.is_none() {
        notes.push(format!("No IMDB ID found (URL: '{url}')"));
    }

    match (title, external_id) {
        (Some(title), Some(external_id)) if notes.is_empty() => {
            let original_title = original_title.filter(|o| !o.eq_ignore_ascii_case(&title));
            ParsedRow::Valid(DesiredItem {
                title,
                year,
                external_id,
                original_title,
                line,
            })
        }
        (title, external_id) => ParsedRow::Invalid(RowDiagnostic {
            line,
            title: title.unwrap_or_else(|| UNKNOWN_TITLE.to_string()),
            year,
            external_id: external_id.unwrap_or_default(),
            note: notes.join("; "),
        }),
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
