use super::{Track, device_query};
use crate::macros::setter;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use tower_api_client::{EmptyResponse, Method, Request, RequestData};

// Common

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Device {
    /// Unavailable for restricted devices
    pub id: Option<String>,
    pub name: String,
    #[serde(rename = "type")]
    pub device_type: String,
    pub is_active: bool,
    #[serde(default)]
    pub is_restricted: bool,
    pub volume_percent: Option<u8>,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RepeatState {
    #[default]
    Off,
    Context,
    Track,
}

impl RepeatState {
    /// off → context → track → off
    pub fn cycle(self) -> Self {
        match self {
            RepeatState::Off => RepeatState::Context,
            RepeatState::Context => RepeatState::Track,
            RepeatState::Track => RepeatState::Off,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RepeatState::Off => "off",
            RepeatState::Context => "context",
            RepeatState::Track => "track",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaybackContext {
    pub uri: String,
    #[serde(rename = "type")]
    pub context_type: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaybackState {
    pub device: Option<Device>,
    #[serde(default)]
    pub repeat_state: RepeatState,
    #[serde(default)]
    pub shuffle_state: bool,
    pub context: Option<PlaybackContext>,
    pub progress_ms: Option<u64>,
    pub is_playing: bool,
    pub item: Option<Track>,
}

impl PlaybackState {
    pub fn volume_percent(&self) -> Option<u8> {
        self.device.as_ref().and_then(|device| device.volume_percent)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayOffset {
    pub position: u32,
}

// Requests

/// Current playback; answered with `204 No Content` when nothing is active,
/// so it is sent through [`crate::Client::playback_state`]
#[derive(Default, Debug, Clone)]
pub struct GetPlaybackState;

impl Request for GetPlaybackState {
    type Data = ();
    type Response = PlaybackState;

    fn endpoint(&self) -> Cow<'_, str> {
        "/me/player".into()
    }
}

#[derive(Default, Debug, Clone)]
pub struct GetDevices;

impl Request for GetDevices {
    type Data = ();
    type Response = DevicesResponse;

    fn endpoint(&self) -> Cow<'_, str> {
        "/me/player/devices".into()
    }
}

/// Start or resume playback. With no context and no URIs the current track resumes.
#[derive(Default, Debug, Clone, Serialize)]
pub struct Play {
    #[serde(skip)]
    device_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    context_uri: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    uris: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    offset: Option<PlayOffset>,
    #[serde(skip_serializing_if = "Option::is_none")]
    position_ms: Option<u64>,
}

impl Play {
    pub fn new() -> Self {
        Self::default()
    }

    setter!(device_id: Option<String>);
    setter!(opt context_uri: String);
    setter!(opt uris: Vec<String>);
    setter!(opt position_ms: u64);

    /// Start at the given position within the context
    pub fn offset(mut self, position: u32) -> Self {
        self.offset = Some(PlayOffset { position });
        self
    }

    pub fn is_resume(&self) -> bool {
        self.context_uri.is_none() && self.uris.is_none()
    }
}

impl Request for Play {
    type Data = Self;
    type Response = EmptyResponse;
    const METHOD: Method = Method::PUT;

    fn endpoint(&self) -> Cow<'_, str> {
        format!("/me/player/play{}", device_query(&self.device_id)).into()
    }

    fn data(&self) -> RequestData<&Self::Data> {
        RequestData::Json(self)
    }
}

#[derive(Default, Debug, Clone)]
pub struct Pause {
    device_id: Option<String>,
}

impl Pause {
    pub fn new() -> Self {
        Self::default()
    }

    setter!(device_id: Option<String>);
}

impl Request for Pause {
    type Data = ();
    type Response = EmptyResponse;
    const METHOD: Method = Method::PUT;

    fn endpoint(&self) -> Cow<'_, str> {
        format!("/me/player/pause{}", device_query(&self.device_id)).into()
    }
}

#[derive(Default, Debug, Clone)]
pub struct SkipToNext {
    device_id: Option<String>,
}

impl SkipToNext {
    pub fn new() -> Self {
        Self::default()
    }

    setter!(device_id: Option<String>);
}

impl Request for SkipToNext {
    type Data = ();
    type Response = EmptyResponse;
    const METHOD: Method = Method::POST;

    fn endpoint(&self) -> Cow<'_, str> {
        format!("/me/player/next{}", device_query(&self.device_id)).into()
    }
}

#[derive(Default, Debug, Clone)]
pub struct SkipToPrevious {
    device_id: Option<String>,
}

impl SkipToPrevious {
    pub fn new() -> Self {
        Self::default()
    }

    setter!(device_id: Option<String>);
}

impl Request for SkipToPrevious {
    type Data = ();
    type Response = EmptyResponse;
    const METHOD: Method = Method::POST;

    fn endpoint(&self) -> Cow<'_, str> {
        format!("/me/player/previous{}", device_query(&self.device_id)).into()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Seek {
    position_ms: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    device_id: Option<String>,
}

impl Seek {
    pub fn new(position_ms: u64) -> Self {
        Self {
            position_ms,
            device_id: None,
        }
    }

    setter!(device_id: Option<String>);
}

impl Request for Seek {
    type Data = Self;
    type Response = EmptyResponse;
    const METHOD: Method = Method::PUT;

    fn endpoint(&self) -> Cow<'_, str> {
        "/me/player/seek".into()
    }

    fn data(&self) -> RequestData<&Self> {
        RequestData::Query(self)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SetVolume {
    volume_percent: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    device_id: Option<String>,
}

impl SetVolume {
    /// Volume is clamped to 0..=100
    pub fn new(volume_percent: i32) -> Self {
        Self {
            volume_percent: volume_percent.clamp(0, 100) as u8,
            device_id: None,
        }
    }

    setter!(device_id: Option<String>);

    pub fn volume_percent(&self) -> u8 {
        self.volume_percent
    }
}

impl Request for SetVolume {
    type Data = Self;
    type Response = EmptyResponse;
    const METHOD: Method = Method::PUT;

    fn endpoint(&self) -> Cow<'_, str> {
        "/me/player/volume".into()
    }

    fn data(&self) -> RequestData<&Self> {
        RequestData::Query(self)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SetShuffle {
    state: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    device_id: Option<String>,
}

impl SetShuffle {
    pub fn new(state: bool) -> Self {
        Self {
            state,
            device_id: None,
        }
    }

    setter!(device_id: Option<String>);
}

impl Request for SetShuffle {
    type Data = Self;
    type Response = EmptyResponse;
    const METHOD: Method = Method::PUT;

    fn endpoint(&self) -> Cow<'_, str> {
        "/me/player/shuffle".into()
    }

    fn data(&self) -> RequestData<&Self> {
        RequestData::Query(self)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SetRepeat {
    state: RepeatState,
    #[serde(skip_serializing_if = "Option::is_none")]
    device_id: Option<String>,
}

impl SetRepeat {
    pub fn new(state: RepeatState) -> Self {
        Self {
            state,
            device_id: None,
        }
    }

    setter!(device_id: Option<String>);
}

impl Request for SetRepeat {
    type Data = Self;
    type Response = EmptyResponse;
    const METHOD: Method = Method::PUT;

    fn endpoint(&self) -> Cow<'_, str> {
        "/me/player/repeat".into()
    }

    fn data(&self) -> RequestData<&Self> {
        RequestData::Query(self)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TransferPlayback {
    device_ids: Vec<String>,
    play: bool,
}

impl TransferPlayback {
    pub fn new(device_id: impl Into<String>) -> Self {
        Self {
            device_ids: vec![device_id.into()],
            play: false,
        }
    }

    // Start playing on the new device instead of keeping the current state
    setter!(play: bool);
}

impl Request for TransferPlayback {
    type Data = Self;
    type Response = EmptyResponse;
    const METHOD: Method = Method::PUT;

    fn endpoint(&self) -> Cow<'_, str> {
        "/me/player".into()
    }

    fn data(&self) -> RequestData<&Self> {
        RequestData::Json(self)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct AddToQueue {
    uri: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    device_id: Option<String>,
}

impl AddToQueue {
    pub fn new(uri: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            device_id: None,
        }
    }

    setter!(device_id: Option<String>);
}

impl Request for AddToQueue {
    type Data = Self;
    type Response = EmptyResponse;
    const METHOD: Method = Method::POST;

    fn endpoint(&self) -> Cow<'_, str> {
        "/me/player/queue".into()
    }

    fn data(&self) -> RequestData<&Self> {
        RequestData::Query(self)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RecentlyPlayed {
    limit: u32,
}

impl Default for RecentlyPlayed {
    fn default() -> Self {
        Self { limit: 20 }
    }
}

impl RecentlyPlayed {
    pub fn new() -> Self {
        Self::default()
    }

    setter!(limit: u32);
}

impl Request for RecentlyPlayed {
    type Data = Self;
    type Response = RecentlyPlayedResponse;

    fn endpoint(&self) -> Cow<'_, str> {
        "/me/player/recently-played".into()
    }

    fn data(&self) -> RequestData<&Self> {
        RequestData::Query(self)
    }
}

// Responses

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DevicesResponse {
    pub devices: Vec<Device>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayHistory {
    pub track: Track,
    pub played_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecentlyPlayedResponse {
    pub items: Vec<PlayHistory>,
    pub next: Option<String>,
}
