//! Library sections and their contents.

use log::{debug, info};

use super::models::LibrarySection;
use super::PlexClient;
use crate::error::{Result, SyncError};
use crate::models::LibraryEntry;

/// Plex metadata type for movies
const MOVIE_TYPE: &str = "1";

impl PlexClient {
    /// Lists all library sections on the server
    pub async fn sections(&self) -> Result<Vec<LibrarySection>> {
        let container = self.get_container("/library/sections", &[]).await?;
        let sections: Vec<LibrarySection> = container
            .directories
            .into_iter()
            .map(LibrarySection::from)
            .collect();
        debug!("Server has {} library sections", sections.len());
        Ok(sections)
    }

    /// Finds a section by title, ignoring case
    pub async fn find_section(&self, name: &str) -> Result<LibrarySection> {
        let sections = self.sections().await?;
        if let Some(section) = sections
            .iter()
            .find(|s| s.title.eq_ignore_ascii_case(name.trim()))
        {
            info!(
                "Found library '{}' (key {}, type {})",
                section.title, section.key, section.kind
            );
            return Ok(section.clone());
        }

        Err(SyncError::LibraryNotFound {
            name: name.to_string(),
            available: sections.into_iter().map(|s| s.title).collect(),
        })
    }

    /// Fetches every movie of a section, with external GUIDs
    pub async fn fetch_library(&self, section: &LibrarySection) -> Result<Vec<LibraryEntry>> {
        info!("Retrieving movies from Plex library: {}", section.title);
        let path = format!("/library/sections/{}/all", section.key);
        let container = self
            .get_container(&path, &[("type", MOVIE_TYPE), ("includeGuids", "1")])
            .await?;

        let entries: Vec<LibraryEntry> = container
            .metadata
            .into_iter()
            .map(|m| m.into_entry(&section.key))
            .collect();
        info!(
            "Found {} movies in Plex library ({} with IMDB id)",
            entries.len(),
            entries.iter().filter(|e| e.imdb_id.is_some()).count()
        );
        Ok(entries)
    }
}
