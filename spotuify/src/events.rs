use crate::state::SearchResults;
use spotify_api::endpoints::{
    artists::Artist,
    player::{Device, PlaybackState, RepeatState},
    playlists::SimplifiedPlaylist,
    user::CurrentUser,
    SimplifiedAlbum, Track,
};

/// Commands to execute (user actions → state changes and background work)
#[derive(Debug, Clone, PartialEq)]
pub enum AppCommand {
    SelectNext,
    SelectPrevious,
    NavigateToTop,
    NavigateToBottom,
    NavigateBack,

    // Screens
    LoadLibrary {
        force_refresh: bool,
    },
    OpenPlaylist {
        playlist: Box<SimplifiedPlaylist>,
    },
    OpenLikedSongs,
    OpenAlbum {
        album: Box<SimplifiedAlbum>,
    },
    OpenArtist {
        artist_id: String,
        name: String,
    },
    OpenRecentlyPlayed,
    OpenSearch,
    NextSearchSection,
    SwitchArtistPane,
    LoadDevices,
    NavigateToLogs,

    // Playback
    TogglePlayback,
    NextTrack,
    PreviousTrack,
    ToggleShuffle,
    CycleRepeat,
    VolumeUp,
    VolumeDown,
    ToggleMute,
    SeekForward,
    SeekBackward,
    PlayContext {
        context_uri: String,
        offset: u32,
    },
    PlayTracks {
        uris: Vec<String>,
        offset: u32,
    },
    AddToQueue {
        uri: String,
        name: String,
    },
    TransferPlayback {
        device_id: String,
    },
    RefreshPlayback,

    // Library
    ToggleLike {
        track_id: String,
        name: String,
    },

    // Search input
    EnterSearchInput,
    ExitSearchInput,
    AppendSearchChar(char),
    DeleteSearchChar,
    ClearSearch,
    SubmitSearch,

    // Logs
    ScrollLogsUp,
    ScrollLogsDown,
    ScrollLogsPageUp,
    ScrollLogsPageDown,
    ScrollLogsToTop,
    ScrollLogsToBottom,

    ToggleHelp,
    SetPendingKey(char),
    ClearPendingKey,
    Quit,
}

/// Background work a command asks for. Each variant maps to one Web API call.
#[derive(Debug, Clone, PartialEq)]
pub enum DataRequest {
    CurrentUser,
    Playlists,
    PlaylistTracks { playlist_id: String },
    SavedTracks,
    AlbumTracks { album_id: String },
    Artist { artist_id: String },
    RecentlyPlayed,
    ToggleSaved { track_id: String, name: String },
    Search { query: String },
    Devices,
    Playback,
    Player {
        action: PlayerAction,
        device_id: Option<String>,
    },
}

impl DataRequest {
    /// Task key for the background task manager. Requests sharing a key
    /// supersede each other.
    pub fn task_id(&self) -> String {
        match self {
            DataRequest::CurrentUser => "load_user".to_string(),
            DataRequest::Playlists => "load_playlists".to_string(),
            DataRequest::PlaylistTracks { playlist_id } => format!("load_tracks_{}", playlist_id),
            DataRequest::SavedTracks => "load_saved_tracks".to_string(),
            DataRequest::AlbumTracks { album_id } => format!("load_album_{}", album_id),
            DataRequest::Artist { artist_id } => format!("load_artist_{}", artist_id),
            DataRequest::RecentlyPlayed => "load_recently_played".to_string(),
            DataRequest::ToggleSaved { track_id, .. } => format!("like_{}", track_id),
            DataRequest::Search { .. } => "search".to_string(),
            DataRequest::Devices => "load_devices".to_string(),
            DataRequest::Playback => "load_playback".to_string(),
            DataRequest::Player { action, .. } => format!("player_{}", action.name()),
        }
    }
}

/// A player control call
#[derive(Debug, Clone, PartialEq)]
pub enum PlayerAction {
    Resume,
    Pause,
    Next,
    Previous,
    Seek { position_ms: u64 },
    Volume { percent: u8 },
    Shuffle { state: bool },
    Repeat { state: RepeatState },
    PlayContext { context_uri: String, offset: u32 },
    PlayTracks { uris: Vec<String>, offset: u32 },
    Queue { uri: String, name: String },
    Transfer { device_id: String },
}

impl PlayerAction {
    pub fn name(&self) -> &'static str {
        match self {
            PlayerAction::Resume => "resume",
            PlayerAction::Pause => "pause",
            PlayerAction::Next => "next",
            PlayerAction::Previous => "previous",
            PlayerAction::Seek { .. } => "seek",
            PlayerAction::Volume { .. } => "volume",
            PlayerAction::Shuffle { .. } => "shuffle",
            PlayerAction::Repeat { .. } => "repeat",
            PlayerAction::PlayContext { .. } | PlayerAction::PlayTracks { .. } => "play",
            PlayerAction::Queue { .. } => "queue",
            PlayerAction::Transfer { .. } => "transfer",
        }
    }
}

#[derive(Debug, Clone)]
pub enum DataEvent {
    UserLoaded {
        user: CurrentUser,
    },
    PlaylistsLoaded {
        playlists: Vec<SimplifiedPlaylist>,
    },
    /// Tracks for the list whose source has id `source_id`
    TracksLoaded {
        source_id: String,
        tracks: Vec<Track>,
    },
    SearchResultsLoaded {
        query: String,
        results: SearchResults,
    },
    ArtistLoaded {
        artist: Box<Artist>,
        top_tracks: Vec<Track>,
        albums: Vec<SimplifiedAlbum>,
    },
    /// `saved` is the new state
    SavedToggled {
        track_id: String,
        name: String,
        saved: bool,
    },
    SaveFailed {
        error: String,
    },
    DevicesLoaded {
        devices: Vec<Device>,
    },
    PlaybackLoaded {
        playback: Option<Box<PlaybackState>>,
    },
    PlayerActionCompleted {
        action: PlayerAction,
    },
    PlayerActionFailed {
        action: PlayerAction,
        error: String,
    },

    LoadError {
        error: String,
    },
}
