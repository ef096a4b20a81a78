//! Fuzzy matching of IMDB list items against the Plex library.
//!
//! # Module Structure
//!
//! - [`normalize`] - Title normalization before comparison
//! - [`score`] - Similarity scoring with the release-year blend
//! - [`options`] - Threshold, margin and year settings
//! - [`reconciler`] - Greedy at-most-once assignment of entries to items

pub mod normalize;
pub mod options;
pub mod reconciler;
pub mod score;

pub use normalize::normalize_title;
pub use options::MatchOptions;
pub use reconciler::{reconcile, reconcile_rows};
