use serde::{Deserialize, Serialize};
use tower_api_client::{Error as ApiError, StatusCode};

#[derive(Debug)]
pub enum SpotifyApiError {
    Spotify(StatusCode, ErrorDetail),
    Internal(ApiError),
    Http(reqwest::Error),
    Decode(serde_json::Error),
}

impl SpotifyApiError {
    /// Build from a non-success status and its raw body
    pub(crate) fn from_body(status: StatusCode, body: &str) -> Self {
        let detail = match serde_json::from_str::<ErrorResponse>(body) {
            Ok(response) => response.error,
            // Not every failure carries the JSON envelope (gateway errors, HTML pages)
            Err(_) => ErrorDetail {
                status: status.as_u16(),
                message: body.trim().to_string(),
                reason: None,
            },
        };
        SpotifyApiError::Spotify(status, detail)
    }

    pub fn status(&self) -> Option<StatusCode> {
        match self {
            SpotifyApiError::Spotify(status, _) => Some(*status),
            SpotifyApiError::Http(e) => e
                .status()
                .and_then(|status| StatusCode::from_u16(status.as_u16()).ok()),
            SpotifyApiError::Internal(_) | SpotifyApiError::Decode(_) => None,
        }
    }

    /// The access token was rejected and should be refreshed
    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(StatusCode::UNAUTHORIZED)
    }

    /// Playback commands need an active device first
    pub fn is_no_active_device(&self) -> bool {
        matches!(
            self,
            SpotifyApiError::Spotify(_, ErrorDetail { reason: Some(reason), .. })
                if reason == "NO_ACTIVE_DEVICE"
        )
    }
}

impl From<ApiError> for SpotifyApiError {
    fn from(value: ApiError) -> Self {
        match value {
            ApiError::ClientError(status, detail) | ApiError::ServerError(status, detail) => {
                SpotifyApiError::from_body(status, &detail)
            }
            e => SpotifyApiError::Internal(e),
        }
    }
}

impl From<reqwest::Error> for SpotifyApiError {
    fn from(value: reqwest::Error) -> Self {
        SpotifyApiError::Http(value)
    }
}

impl std::fmt::Display for SpotifyApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SpotifyApiError::Internal(e) => write!(f, "Internal error: {}", e),
            SpotifyApiError::Http(e) => write!(f, "HTTP error: {}", e),
            SpotifyApiError::Decode(e) => write!(f, "Unexpected response: {}", e),
            SpotifyApiError::Spotify(status, detail) => match &detail.reason {
                Some(reason) => write!(f, "({}) {}: {}", status, reason, detail.message),
                None => write!(f, "({}) {}", status, detail.message),
            },
        }
    }
}

impl std::error::Error for SpotifyApiError {}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorDetail {
    pub status: u16,
    pub message: String,
    /// Player errors carry a machine-readable reason such as `NO_ACTIVE_DEVICE`
    pub reason: Option<String>,
}
