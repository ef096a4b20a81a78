//! Response shapes of the Plex JSON API.

use serde::Deserialize;

use crate::models::LibraryEntry;

/// Every Plex response is wrapped in a `MediaContainer`
#[derive(Debug, Deserialize)]
pub(crate) struct ContainerResponse {
    #[serde(rename = "MediaContainer")]
    pub media_container: MediaContainer,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct MediaContainer {
    #[serde(rename = "Directory", default)]
    pub directories: Vec<DirectoryItem>,
    #[serde(rename = "Metadata", default)]
    pub metadata: Vec<MetadataItem>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct DirectoryItem {
    pub key: String,
    pub title: String,
    #[serde(rename = "type", default)]
    pub kind: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct MetadataItem {
    pub rating_key: String,
    pub title: String,
    #[serde(default)]
    pub year: Option<i32>,
    /// Primary GUID; legacy agents embed the IMDB id here
    #[serde(default)]
    pub guid: Option<String>,
    /// External GUIDs, present when requested with `includeGuids=1`
    #[serde(rename = "Guid", default)]
    pub guids: Vec<GuidItem>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct GuidItem {
    pub id: String,
}

impl MetadataItem {
    /// IMDB id from the external GUIDs, falling back to the legacy primary GUID
    pub fn imdb_id(&self) -> Option<String> {
        self.guids
            .iter()
            .find_map(|g| imdb_from_guid(&g.id))
            .or_else(|| self.guid.as_deref().and_then(imdb_from_guid))
    }

    pub fn into_entry(self, section_id: &str) -> LibraryEntry {
        let imdb_id = self.imdb_id();
        LibraryEntry {
            title: self.title,
            year: self.year,
            internal_id: self.rating_key,
            imdb_id,
            section_id: Some(section_id.to_string()),
        }
    }
}

/// `imdb://tt0133093` or `com.plexapp.agents.imdb://tt0133093?lang=en` -> `tt0133093`
pub(crate) fn imdb_from_guid(guid: &str) -> Option<String> {
    let (_, rest) = guid.split_once("imdb://")?;
    let id = rest.split(&['?', '/'][..]).next().unwrap_or(rest);
    if id.starts_with("tt") && id.len() > 2 {
        Some(id.to_string())
    } else {
        None
    }
}

/// Library section (`Movies`, `TV Shows`, ...)
#[derive(Debug, Clone, PartialEq)]
pub struct LibrarySection {
    pub key: String,
    pub title: String,
    /// `movie`, `show`, `artist`, `photo`
    pub kind: String,
}

impl From<DirectoryItem> for LibrarySection {
    fn from(dir: DirectoryItem) -> Self {
        Self {
            key: dir.key,
            title: dir.title,
            kind: dir.kind,
        }
    }
}

/// Collection inside a library section
#[derive(Debug, Clone, PartialEq)]
pub struct Collection {
    pub rating_key: String,
    pub title: String,
}
