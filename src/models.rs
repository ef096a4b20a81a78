//! Core data types shared by the reader, the matcher and the Plex client.

use serde::Serialize;

/// One movie from the IMDB list export that should end up in the collection
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DesiredItem {
    pub title: String,
    pub year: Option<i32>,
    /// IMDB id (`tt0133093`)
    pub external_id: String,
    pub original_title: Option<String>,
    /// 1-based line in the source CSV (header is line 1)
    pub line: usize,
}

/// One movie already present in the Plex library
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LibraryEntry {
    pub title: String,
    pub year: Option<i32>,
    /// Plex rating key
    pub internal_id: String,
    pub imdb_id: Option<String>,
    pub section_id: Option<String>,
}

impl LibraryEntry {
    /// Display form used in logs and reports: `Title (Year)`
    pub fn label(&self) -> String {
        match self.year {
            Some(year) => format!("{} ({})", self.title, year),
            None => self.title.clone(),
        }
    }
}

/// How a desired item was tied to a library entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MatchMethod {
    /// IMDB id found in the Plex GUIDs
    ExternalId,
    /// Fuzzy title match with equal release years
    TitleYear,
    /// Fuzzy title match where the years differ or are unknown
    Title,
}

impl MatchMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchMethod::ExternalId => "IMDB ID",
            MatchMethod::TitleYear => "Title + Year Fuzzy Match",
            MatchMethod::Title => "Title Only Fuzzy Match",
        }
    }
}

/// A scored library entry offered for manual resolution
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Candidate {
    pub entry: LibraryEntry,
    pub score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum UnmatchedReason {
    /// Library snapshot was empty
    EmptyLibrary,
    /// Every entry was already claimed or excluded by the year guard
    NoCandidate,
    /// Best candidate scored below the threshold
    BelowThreshold { best_score: f64, best_title: String },
    /// Row could not be parsed into a usable item
    InvalidRow(String),
}

impl UnmatchedReason {
    pub fn describe(&self) -> String {
        match self {
            UnmatchedReason::EmptyLibrary => "Plex library is empty".to_string(),
            UnmatchedReason::NoCandidate => "No unclaimed library entry within year range".to_string(),
            UnmatchedReason::BelowThreshold {
                best_score,
                best_title,
            } => format!(
                "Best candidate '{}' scored {:.2}, below threshold",
                best_title, best_score
            ),
            UnmatchedReason::InvalidRow(note) => note.clone(),
        }
    }
}

/// Outcome of matching a single desired item
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum MatchResult {
    Matched {
        item: DesiredItem,
        entry: LibraryEntry,
        score: f64,
        method: MatchMethod,
    },
    Unmatched {
        item: DesiredItem,
        reason: UnmatchedReason,
    },
    /// Ordered by descending score
    Ambiguous {
        item: DesiredItem,
        candidates: Vec<Candidate>,
    },
}

impl MatchResult {
    pub fn item(&self) -> &DesiredItem {
        match self {
            MatchResult::Matched { item, .. }
            | MatchResult::Unmatched { item, .. }
            | MatchResult::Ambiguous { item, .. } => item,
        }
    }

    /// Library entry claimed by this result, if any
    pub fn matched_entry(&self) -> Option<&LibraryEntry> {
        match self {
            MatchResult::Matched { entry, .. } => Some(entry),
            _ => None,
        }
    }

    pub fn is_matched(&self) -> bool {
        matches!(self, MatchResult::Matched { .. })
    }

    pub fn is_ambiguous(&self) -> bool {
        matches!(self, MatchResult::Ambiguous { .. })
    }
}
