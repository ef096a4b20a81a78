//! Unit tests for the Plex API module.


use super::PlexClient;

pub(super) fn client_with_mock(mock_uri: &str) -> PlexClient {
    PlexClient::new(mock_uri, "test_token".to_string())
}

pub(super) fn movies_section() -> super::LibrarySection {
    super::LibrarySection {
        key: "1".to_string(),
        title: "Movies".to_string(),
        kind: "movie".to_string(),
    }
}
