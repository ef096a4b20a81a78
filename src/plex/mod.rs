//! Plex Media Server API client.
//!
//! Covers the handful of endpoints the import needs: connection check,
//! library sections, library contents, collections and collection edits.

mod client;
mod collections;
mod library;
mod models;

use reqwest::Client;

use crate::config::ServerConfig;

pub use models::{Collection, LibrarySection};

/// Plex API client bound to one server and token
pub struct PlexClient {
    pub(crate) client: Client,
    pub(crate) token: String,
    pub(crate) base_url: String,
}

impl PlexClient {
    /// Creates a client for the server at `base_url`
    pub fn new(base_url: &str, token: String) -> Self {
        log::info!("Creating Plex client for {}", base_url);
        log::debug!("Plex token length: {}", token.len());
        Self {
            client: Client::new(),
            token,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn from_config(config: &ServerConfig) -> Self {
        Self::new(&config.url, config.token.clone())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[cfg(test)]
#[path = "tests/mod.rs"]
mod tests;
