use super::{PageQuery, Paging, Track};
use crate::macros::setter;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use tower_api_client::{Request, RequestData};

// Common

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaylistOwner {
    pub id: String,
    pub display_name: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaylistTracksRef {
    pub total: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimplifiedPlaylist {
    pub id: String,
    pub name: String,
    pub uri: String,
    pub owner: PlaylistOwner,
    pub description: Option<String>,
    pub public: Option<bool>,
    #[serde(default)]
    pub collaborative: bool,
    pub tracks: Option<PlaylistTracksRef>,
}

impl SimplifiedPlaylist {
    pub fn track_count(&self) -> u32 {
        self.tracks.map(|tracks| tracks.total).unwrap_or_default()
    }

    pub fn owner_name(&self) -> &str {
        self.owner.display_name.as_deref().unwrap_or(&self.owner.id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaylistItem {
    pub added_at: Option<DateTime<Utc>>,
    /// Null when the track is no longer available
    pub track: Option<Track>,
}

// Requests

#[derive(Default, Debug, Clone)]
pub struct ListPlaylists {
    page: PageQuery,
}

impl ListPlaylists {
    pub fn new() -> Self {
        Self::default()
    }

    setter!(page.limit: u32);
    setter!(page.offset: u32);
}

impl Request for ListPlaylists {
    type Data = PageQuery;
    type Response = Paging<SimplifiedPlaylist>;

    fn endpoint(&self) -> Cow<'_, str> {
        "/me/playlists".into()
    }

    fn data(&self) -> RequestData<&PageQuery> {
        RequestData::Query(&self.page)
    }
}

#[derive(Debug, Clone)]
pub struct ListPlaylistTracks {
    playlist_id: String,
    page: PageQuery,
}

impl ListPlaylistTracks {
    pub fn new(playlist_id: impl Into<String>) -> Self {
        Self {
            playlist_id: playlist_id.into(),
            page: PageQuery::default(),
        }
    }

    setter!(page.limit: u32);
    setter!(page.offset: u32);
}

impl Request for ListPlaylistTracks {
    type Data = PageQuery;
    type Response = Paging<PlaylistItem>;

    fn endpoint(&self) -> Cow<'_, str> {
        format!("/playlists/{}/tracks", self.playlist_id).into()
    }

    fn data(&self) -> RequestData<&PageQuery> {
        RequestData::Query(&self.page)
    }
}
