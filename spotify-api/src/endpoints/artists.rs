use super::{Paging, SimplifiedAlbum, Track};
use crate::macros::setter;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use tower_api_client::{Request, RequestData};

// Common

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Followers {
    pub total: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Artist {
    pub id: String,
    pub name: String,
    pub uri: String,
    #[serde(default)]
    pub genres: Vec<String>,
    pub popularity: Option<u32>,
    pub followers: Option<Followers>,
}

impl Artist {
    pub fn follower_count(&self) -> u32 {
        self.followers.map(|f| f.total).unwrap_or_default()
    }
}

// Requests

#[derive(Debug, Clone)]
pub struct GetArtist {
    artist_id: String,
}

impl GetArtist {
    pub fn new(artist_id: impl Into<String>) -> Self {
        Self {
            artist_id: artist_id.into(),
        }
    }
}

impl Request for GetArtist {
    type Data = ();
    type Response = Artist;

    fn endpoint(&self) -> Cow<'_, str> {
        format!("/artists/{}", self.artist_id).into()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct MarketQuery {
    pub market: String,
}

/// Most popular tracks; `from_token` picks the signed-in user's market
#[derive(Debug, Clone)]
pub struct ArtistTopTracks {
    artist_id: String,
    query: MarketQuery,
}

impl ArtistTopTracks {
    pub fn new(artist_id: impl Into<String>) -> Self {
        Self {
            artist_id: artist_id.into(),
            query: MarketQuery {
                market: "from_token".to_string(),
            },
        }
    }

    setter!(query.market: String);
}

impl Request for ArtistTopTracks {
    type Data = MarketQuery;
    type Response = TopTracksResponse;

    fn endpoint(&self) -> Cow<'_, str> {
        format!("/artists/{}/top-tracks", self.artist_id).into()
    }

    fn data(&self) -> RequestData<&MarketQuery> {
        RequestData::Query(&self.query)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ArtistAlbumsQuery {
    pub include_groups: String,
    pub limit: u32,
    pub offset: u32,
}

/// Albums and singles, newest first
#[derive(Debug, Clone)]
pub struct ListArtistAlbums {
    artist_id: String,
    query: ArtistAlbumsQuery,
}

impl ListArtistAlbums {
    pub fn new(artist_id: impl Into<String>) -> Self {
        Self {
            artist_id: artist_id.into(),
            query: ArtistAlbumsQuery {
                include_groups: "album,single".to_string(),
                limit: 50,
                offset: 0,
            },
        }
    }

    setter!(query.include_groups: String);
    setter!(query.limit: u32);
    setter!(query.offset: u32);
}

impl Request for ListArtistAlbums {
    type Data = ArtistAlbumsQuery;
    type Response = Paging<SimplifiedAlbum>;

    fn endpoint(&self) -> Cow<'_, str> {
        format!("/artists/{}/albums", self.artist_id).into()
    }

    fn data(&self) -> RequestData<&ArtistAlbumsQuery> {
        RequestData::Query(&self.query)
    }
}

// Responses

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopTracksResponse {
    pub tracks: Vec<Track>,
}
