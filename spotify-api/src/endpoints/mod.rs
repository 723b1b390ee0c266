pub mod albums;
pub mod artists;
pub mod library;
pub mod player;
pub mod playlists;
pub mod search;
pub mod user;

use serde::{Deserialize, Serialize};

/// Paged collection as returned by every list endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Paging<T> {
    pub items: Vec<T>,
    #[serde(default)]
    pub total: u32,
    #[serde(default)]
    pub limit: u32,
    #[serde(default)]
    pub offset: u32,
    pub next: Option<String>,
}

impl<T> Paging<T> {
    pub fn has_more(&self) -> bool {
        self.next.is_some()
    }
}

/// Offset/limit query shared by the paged endpoints
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageQuery {
    pub limit: u32,
    pub offset: u32,
}

impl Default for PageQuery {
    fn default() -> Self {
        Self {
            limit: 50,
            offset: 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimplifiedArtist {
    pub id: Option<String>,
    pub name: String,
    pub uri: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimplifiedAlbum {
    pub id: Option<String>,
    pub name: String,
    pub uri: Option<String>,
    pub release_date: Option<String>,
    /// `album`, `single` or `compilation`
    pub album_type: Option<String>,
    pub total_tracks: Option<u32>,
    #[serde(default)]
    pub artists: Vec<SimplifiedArtist>,
}

impl SimplifiedAlbum {
    /// Leading year of the release date, which may be just a year
    pub fn release_year(&self) -> Option<&str> {
        self.release_date.as_deref().and_then(|date| date.get(..4))
    }
}

/// A playable item. Episodes deserialize here too, without artists or album.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    /// Absent for local files
    pub id: Option<String>,
    pub name: String,
    pub uri: String,
    pub duration_ms: u64,
    #[serde(default)]
    pub artists: Vec<SimplifiedArtist>,
    pub album: Option<SimplifiedAlbum>,
    #[serde(default)]
    pub explicit: bool,
    pub popularity: Option<u32>,
}

impl Track {
    pub fn artist_names(&self) -> Vec<&str> {
        self.artists.iter().map(|artist| artist.name.as_str()).collect()
    }
}

/// Append `?device_id=..` when a target device was chosen
pub(crate) fn device_query(device_id: &Option<String>) -> String {
    match device_id {
        Some(id) => format!("?device_id={}", id),
        None => String::new(),
    }
}
