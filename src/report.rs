//! Per-item import report and summary counts.

use chrono::{DateTime, TimeZone};
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::models::{DesiredItem, LibraryEntry, MatchMethod, MatchResult, UnmatchedReason};
use crate::plan::UpdatePlan;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ItemStatus {
    Added,
    /// Dry run: would have been added
    WouldAdd,
    AlreadyPresent,
    Missing,
    Ambiguous,
    Invalid,
    Failed,
}

impl ItemStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemStatus::Added => "ADDED",
            ItemStatus::WouldAdd => "WOULD ADD",
            ItemStatus::AlreadyPresent => "SKIPPED",
            ItemStatus::Missing => "MISSING",
            ItemStatus::Ambiguous => "AMBIGUOUS",
            ItemStatus::Invalid => "INVALID",
            ItemStatus::Failed => "ERROR",
        }
    }
}

/// What happened when a planned addition was applied
#[derive(Debug, Clone, PartialEq)]
pub enum AdditionOutcome {
    Added,
    DryRun,
    Failed(String),
}

/// Report columns, in the order [`ReportRow`] serializes them
pub const REPORT_HEADERS: [&str; 9] = [
    "Title",
    "Year",
    "Original Title",
    "IMDB_ID",
    "Status",
    "Match_Method",
    "Plex_Title",
    "Plex_Year",
    "Notes",
];

/// One line of the CSV report
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportRow {
    #[serde(rename = "Title")]
    pub title: String,
    #[serde(rename = "Year")]
    pub year: Option<i32>,
    #[serde(rename = "Original Title")]
    pub original_title: String,
    #[serde(rename = "IMDB_ID")]
    pub imdb_id: String,
    #[serde(rename = "Status", serialize_with = "serialize_status")]
    pub status: ItemStatus,
    #[serde(rename = "Match_Method")]
    pub match_method: String,
    #[serde(rename = "Plex_Title")]
    pub plex_title: String,
    #[serde(rename = "Plex_Year")]
    pub plex_year: Option<i32>,
    #[serde(rename = "Notes")]
    pub notes: String,
}

fn serialize_status<S: serde::Serializer>(
    status: &ItemStatus,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    serializer.serialize_str(status.as_str())
}

impl ReportRow {
    fn new(item: &DesiredItem, status: ItemStatus) -> Self {
        Self {
            title: item.title.clone(),
            year: item.year,
            original_title: item.original_title.clone().unwrap_or_default(),
            imdb_id: item.external_id.clone(),
            status,
            match_method: String::new(),
            plex_title: String::new(),
            plex_year: None,
            notes: String::new(),
        }
    }

    fn with_entry(mut self, entry: &LibraryEntry, method: MatchMethod) -> Self {
        self.match_method = method.as_str().to_string();
        self.plex_title = entry.title.clone();
        self.plex_year = entry.year;
        self
    }

    fn with_notes(mut self, notes: String) -> Self {
        self.notes = notes;
        self
    }
}

/// Builds one report row per result. `outcomes` runs parallel to `plan.additions`.
pub fn build_rows(
    results: &[MatchResult],
    plan: &UpdatePlan,
    outcomes: &[AdditionOutcome],
) -> Vec<ReportRow> {
    let outcome_by_index: HashMap<usize, &AdditionOutcome> = plan
        .additions
        .iter()
        .zip(outcomes)
        .map(|(addition, outcome)| (addition.index, outcome))
        .collect();

    results
        .iter()
        .enumerate()
        .map(|(index, result)| match result {
            MatchResult::Matched {
                item,
                entry,
                score,
                method,
            } => {
                let score_note = format!("score {score:.2}");
                if plan.already_present.contains(&index) {
                    return ReportRow::new(item, ItemStatus::AlreadyPresent)
                        .with_entry(entry, *method)
                        .with_notes(score_note);
                }
                match outcome_by_index.get(&index) {
                    Some(AdditionOutcome::Added) => ReportRow::new(item, ItemStatus::Added)
                        .with_entry(entry, *method)
                        .with_notes(score_note),
                    Some(AdditionOutcome::Failed(err)) => ReportRow::new(item, ItemStatus::Failed)
                        .with_entry(entry, *method)
                        .with_notes(format!("Plex API error: {err}")),
                    Some(AdditionOutcome::DryRun) | None => {
                        ReportRow::new(item, ItemStatus::WouldAdd)
                            .with_entry(entry, *method)
                            .with_notes(score_note)
                    }
                }
            }
            MatchResult::Unmatched { item, reason } => {
                let status = match reason {
                    UnmatchedReason::InvalidRow(_) => ItemStatus::Invalid,
                    _ => ItemStatus::Missing,
                };
                ReportRow::new(item, status).with_notes(reason.describe())
            }
            MatchResult::Ambiguous { item, candidates } => {
                let listed: Vec<String> = candidates
                    .iter()
                    .map(|c| format!("{} [{}] {:.2}", c.entry.label(), c.entry.internal_id, c.score))
                    .collect();
                ReportRow::new(item, ItemStatus::Ambiguous)
                    .with_notes(format!("Candidates: {}", listed.join("; ")))
            }
        })
        .collect()
}

/// Counts rendered at the end of an import
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportSummary {
    pub total: usize,
    pub matched: usize,
    pub added: usize,
    pub would_add: usize,
    pub already_present: usize,
    pub unmatched: usize,
    pub invalid: usize,
    pub ambiguous: usize,
    pub failed: usize,
}

impl ImportSummary {
    pub fn from_rows(rows: &[ReportRow]) -> Self {
        let mut summary = Self {
            total: rows.len(),
            ..Self::default()
        };
        for row in rows {
            match row.status {
                ItemStatus::Added => summary.added += 1,
                ItemStatus::WouldAdd => summary.would_add += 1,
                ItemStatus::AlreadyPresent => summary.already_present += 1,
                ItemStatus::Missing => summary.unmatched += 1,
                ItemStatus::Invalid => summary.invalid += 1,
                ItemStatus::Ambiguous => summary.ambiguous += 1,
                ItemStatus::Failed => summary.failed += 1,
            }
        }
        summary.matched =
            summary.added + summary.would_add + summary.already_present + summary.failed;
        summary
    }
}

impl fmt::Display for ImportSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} items: {} matched ({} added, {} to add, {} already in collection), \
             {} not found, {} invalid, {} ambiguous, {} failed",
            self.total,
            self.matched,
            self.added,
            self.would_add,
            self.already_present,
            self.unmatched,
            self.invalid,
            self.ambiguous,
            self.failed
        )
    }
}

/// `plex_collection_report_{collection}_{YYYYmmdd_HHMMSS}.csv`
pub fn default_report_path<Tz: TimeZone>(collection: &str, now: &DateTime<Tz>) -> PathBuf
where
    Tz::Offset: fmt::Display,
{
    let safe_name: String = collection
        .chars()
        .map(|c| if c.is_alphanumeric() || c == '-' { c } else { '_' })
        .collect();
    PathBuf::from(format!(
        "plex_collection_report_{}_{}.csv",
        safe_name,
        now.format("%Y%m%d_%H%M%S")
    ))
}

/// Writes the report rows with a header line
pub fn write_report_csv<P: AsRef<Path>>(path: P, rows: &[ReportRow]) -> Result<()> {
    let path = path.as_ref();
    let mut wtr = csv::Writer::from_path(path)?;
    // serialize only emits the header together with the first record
    if rows.is_empty() {
        wtr.write_record(REPORT_HEADERS)?;
    }
    for row in rows {
        wtr.serialize(row)?;
    }
    wtr.flush()?;
    log::info!("Detailed report saved to: {}", path.display());
    Ok(())
}

#[cfg(test)]
#[path = "report_tests.rs"]
mod tests;
