use super::artists::Artist;
use super::playlists::SimplifiedPlaylist;
use super::{Paging, SimplifiedAlbum, Track};
use crate::macros::setter;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use tower_api_client::{Request, RequestData};

// Common

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchType {
    Track,
    Album,
    Artist,
    Playlist,
}

impl SearchType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SearchType::Track => "track",
            SearchType::Album => "album",
            SearchType::Artist => "artist",
            SearchType::Playlist => "playlist",
        }
    }

    pub fn all() -> Vec<SearchType> {
        vec![
            SearchType::Track,
            SearchType::Album,
            SearchType::Artist,
            SearchType::Playlist,
        ]
    }
}

// Requests

#[derive(Debug, Clone, Serialize)]
pub struct Search {
    q: String,
    #[serde(rename = "type")]
    types: String,
    limit: u32,
}

impl Search {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            q: query.into(),
            types: SearchType::Track.as_str().to_string(),
            limit: 20,
        }
    }

    setter!(limit: u32);

    pub fn types(mut self, types: &[SearchType]) -> Self {
        self.types = types
            .iter()
            .map(SearchType::as_str)
            .collect::<Vec<_>>()
            .join(",");
        self
    }

    pub fn query(&self) -> &str {
        &self.q
    }
}

impl Request for Search {
    type Data = Self;
    type Response = SearchResponse;

    fn endpoint(&self) -> Cow<'_, str> {
        "/search".into()
    }

    fn data(&self) -> RequestData<&Self> {
        RequestData::Query(self)
    }
}

// Responses

/// Only the categories that were asked for are present
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchResponse {
    pub tracks: Option<Paging<Track>>,
    pub albums: Option<Paging<SimplifiedAlbum>>,
    pub artists: Option<Paging<Artist>>,
    // Spotify pads playlist results with nulls
    pub playlists: Option<Paging<Option<SimplifiedPlaylist>>>,
}

impl SearchResponse {
    pub fn tracks(&self) -> &[Track] {
        self.tracks
            .as_ref()
            .map(|page| page.items.as_slice())
            .unwrap_or_default()
    }

    pub fn albums(&self) -> &[SimplifiedAlbum] {
        self.albums
            .as_ref()
            .map(|page| page.items.as_slice())
            .unwrap_or_default()
    }

    pub fn artists(&self) -> &[Artist] {
        self.artists
            .as_ref()
            .map(|page| page.items.as_slice())
            .unwrap_or_default()
    }

    /// Playlist hits with the null padding removed
    pub fn playlists(&self) -> impl Iterator<Item = &SimplifiedPlaylist> {
        self.playlists
            .iter()
            .flat_map(|page| page.items.iter())
            .flatten()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_types_are_comma_joined() {
        let search = Search::new("daft punk").types(&SearchType::all());
        assert_eq!(search.types, "track,album,artist,playlist");
        assert_eq!(search.query(), "daft punk");
    }

    #[test]
    fn test_missing_categories_are_none() {
        let response: SearchResponse = serde_json::from_value(json!({
            "tracks": {"items": [], "total": 0, "limit": 20, "offset": 0, "next": null}
        }))
        .unwrap();

        assert!(response.tracks().is_empty());
        assert!(response.albums.is_none());
    }

    #[test]
    fn test_null_playlists_are_tolerated() {
        let response: SearchResponse = serde_json::from_value(json!({
            "playlists": {"items": [null], "total": 1, "limit": 20, "offset": 0, "next": null}
        }))
        .unwrap();

        assert_eq!(response.playlists().count(), 0);
        assert_eq!(response.playlists.unwrap().items, vec![None]);
    }
}
