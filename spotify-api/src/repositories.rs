use crate::endpoints::{
    albums::ListAlbumTracks,
    artists::{ArtistTopTracks, GetArtist, ListArtistAlbums},
    library::{CheckSavedTracks, ListSavedTracks, RemoveSavedTracks, SaveTracks},
    player::{
        AddToQueue, GetDevices, Pause, Play, RecentlyPlayed, RepeatState, Seek, SetRepeat,
        SetShuffle, SetVolume, SkipToNext, SkipToPrevious, TransferPlayback,
    },
    playlists::{ListPlaylists, ListPlaylistTracks},
    search::{Search, SearchType},
    user::GetCurrentUser,
};

/// Player commands, optionally pinned to one device
#[derive(Default)]
pub struct PlayerRepository {
    device_id: Option<String>,
}

impl PlayerRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_device(mut self, device_id: Option<String>) -> Self {
        self.device_id = device_id;
        self
    }

    pub fn devices(&self) -> GetDevices {
        GetDevices
    }

    pub fn resume(&self) -> Play {
        Play::new().device_id(self.device_id.clone())
    }

    pub fn play_context(&self, context_uri: impl Into<String>, offset: u32) -> Play {
        Play::new()
            .device_id(self.device_id.clone())
            .context_uri(context_uri.into())
            .offset(offset)
    }

    pub fn play_tracks(&self, uris: Vec<String>) -> Play {
        Play::new().device_id(self.device_id.clone()).uris(uris)
    }

    pub fn pause(&self) -> Pause {
        Pause::new().device_id(self.device_id.clone())
    }

    pub fn next(&self) -> SkipToNext {
        SkipToNext::new().device_id(self.device_id.clone())
    }

    pub fn previous(&self) -> SkipToPrevious {
        SkipToPrevious::new().device_id(self.device_id.clone())
    }

    pub fn seek(&self, position_ms: u64) -> Seek {
        Seek::new(position_ms).device_id(self.device_id.clone())
    }

    pub fn volume(&self, volume_percent: i32) -> SetVolume {
        SetVolume::new(volume_percent).device_id(self.device_id.clone())
    }

    pub fn shuffle(&self, state: bool) -> SetShuffle {
        SetShuffle::new(state).device_id(self.device_id.clone())
    }

    pub fn repeat(&self, state: RepeatState) -> SetRepeat {
        SetRepeat::new(state).device_id(self.device_id.clone())
    }

    pub fn transfer(&self, device_id: impl Into<String>) -> TransferPlayback {
        TransferPlayback::new(device_id)
    }

    pub fn add_to_queue(&self, uri: impl Into<String>) -> AddToQueue {
        AddToQueue::new(uri).device_id(self.device_id.clone())
    }

    pub fn recently_played(&self) -> RecentlyPlayed {
        RecentlyPlayed::new()
    }
}

pub struct PlaylistRepository;

impl PlaylistRepository {
    pub fn new() -> Self {
        Self {}
    }

    pub fn list(&self) -> ListPlaylists {
        ListPlaylists::new()
    }

    pub fn tracks(&self, playlist_id: impl Into<String>) -> ListPlaylistTracks {
        ListPlaylistTracks::new(playlist_id)
    }
}

pub struct LibraryRepository;

impl LibraryRepository {
    pub fn new() -> Self {
        Self {}
    }

    pub fn saved_tracks(&self) -> ListSavedTracks {
        ListSavedTracks::new()
    }

    pub fn save(&self, track_ids: &[String]) -> SaveTracks {
        SaveTracks::new(track_ids)
    }

    pub fn remove(&self, track_ids: &[String]) -> RemoveSavedTracks {
        RemoveSavedTracks::new(track_ids)
    }

    pub fn contains(&self, track_ids: &[String]) -> CheckSavedTracks {
        CheckSavedTracks::new(track_ids)
    }
}

pub struct AlbumRepository;

impl AlbumRepository {
    pub fn new() -> Self {
        Self {}
    }

    pub fn tracks(&self, album_id: impl Into<String>) -> ListAlbumTracks {
        ListAlbumTracks::new(album_id)
    }
}

pub struct ArtistRepository;

impl ArtistRepository {
    pub fn new() -> Self {
        Self {}
    }

    pub fn get(&self, artist_id: impl Into<String>) -> GetArtist {
        GetArtist::new(artist_id)
    }

    pub fn top_tracks(&self, artist_id: impl Into<String>) -> ArtistTopTracks {
        ArtistTopTracks::new(artist_id)
    }

    pub fn albums(&self, artist_id: impl Into<String>) -> ListArtistAlbums {
        ListArtistAlbums::new(artist_id)
    }
}

pub struct SearchRepository;

impl SearchRepository {
    pub fn new() -> Self {
        Self {}
    }

    pub fn tracks(&self, query: impl Into<String>) -> Search {
        Search::new(query)
    }

    pub fn everything(&self, query: impl Into<String>) -> Search {
        Search::new(query).types(&SearchType::all())
    }
}

pub struct UserRepository;

impl UserRepository {
    pub fn new() -> Self {
        Self {}
    }

    pub fn current(&self) -> GetCurrentUser {
        GetCurrentUser
    }
}
