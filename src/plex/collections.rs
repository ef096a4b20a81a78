//! Collection lookup and membership edits.

use log::{debug, info, warn};

use super::models::{Collection, LibrarySection};
use super::PlexClient;
use crate::error::{Error, Result};
use crate::models::LibraryEntry;

impl PlexClient {
    /// Lists the collections of a section
    pub async fn collections(&self, section: &LibrarySection) -> Result<Vec<Collection>> {
        let path = format!("/library/sections/{}/collections", section.key);
        let container = self.get_container(&path, &[]).await?;
        Ok(container
            .metadata
            .into_iter()
            .map(|m| Collection {
                rating_key: m.rating_key,
                title: m.title,
            })
            .collect())
    }

    /// Returns the movies already in the named collection. A collection that
    /// does not exist yet simply has no members.
    ///
    /// Titles compare case-insensitively, like [`PlexClient::find_section`];
    /// an exact title wins over a case variant.
    pub async fn fetch_collection_members(
        &self,
        section: &LibrarySection,
        name: &str,
    ) -> Result<Vec<LibraryEntry>> {
        let collections = self.collections(section).await?;
        let found = collections.iter().find(|c| c.title == name).or_else(|| {
            collections
                .iter()
                .find(|c| c.title.eq_ignore_ascii_case(name.trim()))
        });
        let Some(collection) = found else {
            info!("Collection '{name}' does not exist yet, it will be created");
            return Ok(Vec::new());
        };

        let path = format!("/library/collections/{}/children", collection.rating_key);
        let container = self
            .get_container(&path, &[("includeGuids", "1")])
            .await?;
        let members: Vec<LibraryEntry> = container
            .metadata
            .into_iter()
            .map(|m| m.into_entry(&section.key))
            .collect();

        info!(
            "Found {} movies already in collection '{}'",
            members.len(),
            name
        );
        Ok(members)
    }

    /// Tags a movie with the collection name; Plex creates the collection on first use
    pub async fn add_to_collection(
        &self,
        section: &LibrarySection,
        entry: &LibraryEntry,
        name: &str,
    ) -> Result<()> {
        let url = format!("{}/library/sections/{}/all", self.base_url, section.key);
        debug!("Adding '{}' (key {}) to '{}'", entry.title, entry.internal_id, name);

        let response = self
            .client
            .put(&url)
            .header("X-Plex-Token", &self.token)
            .header("Accept", "application/json")
            .query(&[
                ("type", "1"),
                ("id", entry.internal_id.as_str()),
                ("collection[0].tag.tag", name),
                ("collection.locked", "1"),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            warn!("Adding '{}' to '{}' failed: {}", entry.title, name, status);
            return Err(Error::HttpStatus(status));
        }
        Ok(())
    }
}
