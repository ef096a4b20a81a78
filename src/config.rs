//! Saved Plex server settings.
//!
//! URL, token and library name are kept in a small JSON file so repeated
//! imports do not need them on the command line. Loading and saving are
//! explicit; the loaded value is handed to [`crate::plex::PlexClient`].

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{Result, SyncError};

pub const DEFAULT_URL: &str = "http://127.0.0.1:32400";
pub const DEFAULT_LIBRARY: &str = "Movies";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig {
    pub url: String,
    #[serde(default)]
    pub token: String,
    #[serde(default = "default_library")]
    pub library: String,
}

fn default_library() -> String {
    DEFAULT_LIBRARY.to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_URL.to_string(),
            token: String::new(),
            library: default_library(),
        }
    }
}

impl ServerConfig {
    /// Default config file path: ~/.config/imdb_plex_sync/config.json
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("imdb_plex_sync")
            .join("config.json")
    }

    /// Loads the config, or defaults when the file does not exist yet
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            log::info!("No saved config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        log::debug!("Saved config to {}", path.display());
        Ok(())
    }

    /// Overrides saved values with whichever ones were given explicitly
    pub fn merge(
        mut self,
        url: Option<String>,
        token: Option<String>,
        library: Option<String>,
    ) -> Self {
        if let Some(url) = url {
            self.url = url;
        }
        if let Some(token) = token {
            self.token = token;
        }
        if let Some(library) = library {
            self.library = library;
        }
        self.url = normalize_url(&self.url);
        self
    }

    /// A token is required; everything else has a default
    pub fn validate(&self) -> Result<()> {
        if self.token.trim().is_empty() {
            return Err(SyncError::Config(
                "Plex token is required (--token or saved config)".to_string(),
            ));
        }
        if self.library.trim().is_empty() {
            return Err(SyncError::Config("Library name cannot be empty".to_string()));
        }
        Ok(())
    }
}

/// Adds `http://` to bare host names and drops trailing slashes
pub fn normalize_url(url: &str) -> String {
    let trimmed = url.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        return DEFAULT_URL.to_string();
    }
    if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        trimmed.to_string()
    } else {
        format!("http://{trimmed}")
    }
}
