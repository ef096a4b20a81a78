//! IMDB Plex Sync - IMDB list to Plex collection importer
//!
//! Reads an IMDB list export, matches every title against a Plex movie
//! library (IMDB id first, fuzzy title and year second) and tags the matches
//! with a collection. Ambiguous matches are reported, never guessed.

pub mod config;
pub mod error;
pub mod imdb;
pub mod matching;
pub mod models;
pub mod plan;
pub mod plex;
pub mod report;
pub mod sync;

pub use config::ServerConfig;
pub use error::{Error, Result, SyncError};
pub use imdb::{parse_imdb_csv, read_imdb_csv, ImdbList, ParsedRow, RowDiagnostic};
pub use matching::{reconcile, reconcile_rows, MatchOptions};
pub use models::{Candidate, DesiredItem, LibraryEntry, MatchMethod, MatchResult, UnmatchedReason};
pub use plan::{build_plan, PlannedAddition, UpdatePlan};
pub use plex::{Collection, LibrarySection, PlexClient};
pub use report::{write_report_csv, ImportSummary, ItemStatus, ReportRow};
pub use sync::{run_import, ImportReport, ImportRequest};
