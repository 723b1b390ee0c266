pub mod endpoints;
mod error;
mod macros;
pub mod repositories;

pub use crate::error::{ErrorDetail, SpotifyApiError};
use endpoints::player::{GetPlaybackState, PlaybackState};
use repositories::*;
use secrecy::{ExposeSecret, SecretString};
use tower_api_client::{Client as ApiClient, Request as ApiRequest, StatusCode};

const BASE_URL: &str = "https://api.spotify.com/v1";

pub struct Client {
    inner: ApiClient,
    http: reqwest::Client,
    base_url: String,
    access_token: SecretString,
}

impl Client {
    pub fn new(access_token: &str) -> Self {
        Self::with_base_url(BASE_URL, access_token)
    }

    pub fn with_base_url(base_url: &str, access_token: &str) -> Self {
        Self {
            inner: ApiClient::new(base_url).bearer_auth(access_token),
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            access_token: SecretString::from(access_token.to_owned()),
        }
    }

    pub async fn send<R>(&self, request: R) -> Result<R::Response, SpotifyApiError>
    where
        R: ApiRequest,
    {
        self.inner.send(request).await.map_err(From::from)
    }

    /// Current playback, `None` when no device is active
    pub async fn playback_state(&self) -> Result<Option<PlaybackState>, SpotifyApiError> {
        let request = GetPlaybackState;
        let response = self
            .http
            .get(format!("{}{}", self.base_url, request.endpoint()))
            .bearer_auth(self.access_token.expose_secret())
            .send()
            .await?;

        let status = response.status();
        if status == reqwest::StatusCode::NO_CONTENT {
            return Ok(None);
        }

        let body = response.text().await?;
        if !status.is_success() {
            let status =
                StatusCode::from_u16(status.as_u16()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
            return Err(SpotifyApiError::from_body(status, &body));
        }
        if body.trim().is_empty() {
            return Ok(None);
        }

        serde_json::from_str(&body)
            .map(Some)
            .map_err(SpotifyApiError::Decode)
    }
}

pub struct Request;

impl Request {
    pub fn player() -> PlayerRepository {
        PlayerRepository::new()
    }

    pub fn playlists() -> PlaylistRepository {
        PlaylistRepository::new()
    }

    pub fn library() -> LibraryRepository {
        LibraryRepository::new()
    }

    pub fn albums() -> AlbumRepository {
        AlbumRepository::new()
    }

    pub fn artists() -> ArtistRepository {
        ArtistRepository::new()
    }

    pub fn search() -> SearchRepository {
        SearchRepository::new()
    }

    pub fn user() -> UserRepository {
        UserRepository::new()
    }
}
