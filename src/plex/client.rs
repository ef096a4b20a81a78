//! HTTP plumbing and connection testing.

use log::{debug, info, warn};

use super::models::{ContainerResponse, MediaContainer};
use super::PlexClient;
use crate::error::{Error, Result};

impl PlexClient {
    /// Checks that the server answers and accepts the token
    pub async fn test_connection(&self) -> Result<()> {
        info!("Testing Plex connection at {}", self.base_url);
        let url = format!("{}/identity", self.base_url);

        let response = self
            .client
            .get(&url)
            .header("X-Plex-Token", &self.token)
            .header("Accept", "application/json")
            .send()
            .await?;

        let status = response.status();
        debug!("Connection test status: {status}");
        if !status.is_success() {
            warn!("Plex connection test failed with status {status}");
            return Err(Error::HttpStatus(status));
        }

        info!("Connected to Plex server at {}", self.base_url);
        Ok(())
    }

    /// GETs `path` and unwraps the `MediaContainer`
    pub(crate) async fn get_container(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<MediaContainer> {
        let url = format!("{}{}", self.base_url, path);
        debug!("GET {url}");

        let response = self
            .client
            .get(&url)
            .header("X-Plex-Token", &self.token)
            .header("Accept", "application/json")
            .query(query)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            warn!("GET {path} failed with status {status}");
            return Err(Error::HttpStatus(status));
        }

        let body = response.text().await?;
        let parsed: ContainerResponse = serde_json::from_str(&body)?;
        Ok(parsed.media_container)
    }
}
