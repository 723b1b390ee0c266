pub mod reducer;

use crate::ui::screens::Screen;
use ratatui::widgets::TableState;
use spotify_api::endpoints::{
    artists::Artist,
    player::{Device, PlaybackState},
    playlists::SimplifiedPlaylist,
    user::CurrentUser,
    SimplifiedAlbum, Track,
};
use std::cell::RefCell;
use std::time::Duration;
use throbber_widgets_tui::ThrobberState;

/// Source id the saved-tracks list is loaded under
pub const LIKED_SONGS_ID: &str = "liked";

/// Source id the play history is loaded under
pub const RECENTLY_PLAYED_ID: &str = "recent";

pub const DEFAULT_VOLUME_STEP: u8 = 5;

/// Seek distance for ←/→
pub const SEEK_STEP_MS: u64 = 5_000;

/// Represents loading state separate from data state
#[derive(Default, Debug, Clone, PartialEq)]
pub enum LoadingState {
    #[default]
    NotStarted,
    Loading(ThrobberState),
    Loaded,
    Error(String),
}

impl LoadingState {
    pub fn loading() -> Self {
        LoadingState::Loading(ThrobberState::default())
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, LoadingState::Loading(_))
    }
}

#[derive(Default, Debug, Clone, Copy, PartialEq)]
pub enum InputMode {
    #[default]
    Normal,
    Search,
}

/// Message shown in the now playing bar until the next player command
#[derive(Debug, Clone, PartialEq)]
pub enum Notice {
    Info(String),
    Error(String),
}

/// Player status shown under every screen
#[derive(Default, Debug, Clone)]
pub struct NowPlaying {
    pub playback: Option<PlaybackState>,
    pub loading: LoadingState,
    /// Volume to restore when unmuting
    pub muted_volume: Option<u8>,
    pub notice: Option<Notice>,
}

impl NowPlaying {
    pub fn track(&self) -> Option<&Track> {
        self.playback.as_ref().and_then(|p| p.item.as_ref())
    }

    pub fn is_playing(&self) -> bool {
        self.playback.as_ref().is_some_and(|p| p.is_playing)
    }

    pub fn device(&self) -> Option<&Device> {
        self.playback.as_ref().and_then(|p| p.device.as_ref())
    }

    pub fn device_id(&self) -> Option<String> {
        self.device().and_then(|d| d.id.clone())
    }

    pub fn volume(&self) -> Option<u8> {
        self.playback.as_ref().and_then(|p| p.volume_percent())
    }

    pub fn progress_ms(&self) -> Option<u64> {
        self.playback.as_ref().and_then(|p| p.progress_ms)
    }

    pub fn duration_ms(&self) -> Option<u64> {
        self.track().map(|t| t.duration_ms)
    }

    pub fn is_muted(&self) -> bool {
        self.muted_volume.is_some()
    }

    /// Fraction of the track played, 0.0 when unknown
    pub fn ratio(&self) -> f64 {
        match (self.progress_ms(), self.duration_ms()) {
            (Some(progress), Some(duration)) if duration > 0 => {
                (progress as f64 / duration as f64).clamp(0.0, 1.0)
            }
            _ => 0.0,
        }
    }

    /// Advance the local progress between polls
    pub fn tick(&mut self, elapsed: Duration) {
        let duration = self.duration_ms();
        if let Some(playback) = self.playback.as_mut() {
            if !playback.is_playing {
                return;
            }
            if let Some(progress) = playback.progress_ms.as_mut() {
                let advanced = *progress + elapsed.as_millis() as u64;
                *progress = match duration {
                    Some(duration) => advanced.min(duration),
                    None => advanced,
                };
            }
        }
    }

    pub(crate) fn set_volume(&mut self, percent: u8) {
        if let Some(device) = self.playback.as_mut().and_then(|p| p.device.as_mut()) {
            device.volume_percent = Some(percent);
        }
    }

    pub(crate) fn set_progress(&mut self, position_ms: u64) {
        if let Some(playback) = self.playback.as_mut() {
            playback.progress_ms = Some(position_ms);
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppState {
    pub history: Vec<Screen>,

    pub now_playing: NowPlaying,
    pub user: Option<CurrentUser>,
    pub volume_step: u8,

    // UI state
    pub help_visible: bool,
    pub pending_key: Option<char>,

    // System
    pub should_quit: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            history: vec![Screen::Library(LibraryState::default())],

            now_playing: NowPlaying::default(),
            user: None,
            volume_step: DEFAULT_VOLUME_STEP,

            help_visible: false,
            pending_key: None,

            should_quit: false,
        }
    }

    pub fn with_volume_step(mut self, volume_step: u8) -> Self {
        self.volume_step = volume_step;
        self
    }

    /// Get the current screen (last in navigation stack)
    pub fn current_screen(&self) -> &Screen {
        match self.history.last() {
            Some(screen) => screen,
            None => unreachable!("navigation stack is never empty"),
        }
    }

    /// Get mutable reference to current screen
    pub fn current_screen_mut(&mut self) -> &mut Screen {
        match self.history.last_mut() {
            Some(screen) => screen,
            None => unreachable!("navigation stack is never empty"),
        }
    }

    /// Navigate to a new screen (push to stack)
    pub fn navigate_to(&mut self, screen: Screen) {
        tracing::debug!(
            "Navigating to new screen, stack depth: {} -> {}",
            self.history.len(),
            self.history.len() + 1
        );
        self.history.push(screen);
    }

    /// Navigate back (pop from stack)
    /// Returns true if navigation succeeded, false if already at root
    pub fn navigate_back(&mut self) -> bool {
        if self.history.len() > 1 {
            tracing::debug!(
                "Navigating back, stack depth: {} -> {}",
                self.history.len(),
                self.history.len() - 1
            );
            self.history.pop();
            true
        } else {
            tracing::debug!("Cannot navigate back, already at root screen");
            false
        }
    }

    /// Pop back to the most recent screen matching `predicate` instead of
    /// stacking a duplicate. Returns false when none is open.
    pub fn pop_to(&mut self, predicate: impl Fn(&Screen) -> bool) -> bool {
        match self.history.iter().rposition(predicate) {
            Some(index) => {
                self.history.truncate(index + 1);
                true
            }
            None => false,
        }
    }

    /// Throbber of whatever is loading on the current screen
    pub fn loading_state(&mut self) -> Option<&mut ThrobberState> {
        let loading = match self.current_screen_mut() {
            Screen::Library(state) => &mut state.loading,
            Screen::Tracks(state) => &mut state.loading,
            Screen::Search(state) => &mut state.loading,
            Screen::Devices(state) => &mut state.loading,
            Screen::Artist(state) => &mut state.loading,
            Screen::Logs(_) => return None,
        };

        match loading {
            LoadingState::Loading(throbber_state) => Some(throbber_state),
            _ => None,
        }
    }
}

impl AppState {
    /// Track under the cursor on whichever list is showing
    pub fn selected_track(&self) -> Option<&Track> {
        match self.current_screen() {
            Screen::Tracks(state) => state.selected_track(),
            Screen::Search(state) => state.selected_track(),
            Screen::Artist(state) => state.selected_track(),
            _ => None,
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

/// User playlists, preceded by a Liked Songs row
#[derive(Default, Debug, Clone)]
pub struct LibraryState {
    pub playlists: Vec<SimplifiedPlaylist>,
    pub loading: LoadingState,
    pub table_state: RefCell<TableState>,
}

/// What the library row under the cursor opens
#[derive(Debug, Clone, PartialEq)]
pub enum LibraryEntry<'a> {
    LikedSongs,
    Playlist(&'a SimplifiedPlaylist),
}

impl LibraryState {
    pub fn selected_entry(&self) -> Option<LibraryEntry<'_>> {
        match self.table_state.borrow().selected()? {
            0 => Some(LibraryEntry::LikedSongs),
            index => self.playlists.get(index - 1).map(LibraryEntry::Playlist),
        }
    }
}

/// Where a track list came from
#[derive(Debug, Clone, PartialEq)]
pub enum TrackSource {
    Playlist {
        id: String,
        name: String,
        uri: String,
    },
    Album {
        id: String,
        name: String,
        uri: String,
    },
    LikedSongs,
    RecentlyPlayed,
}

impl TrackSource {
    pub fn id(&self) -> &str {
        match self {
            TrackSource::Playlist { id, .. } | TrackSource::Album { id, .. } => id,
            TrackSource::LikedSongs => LIKED_SONGS_ID,
            TrackSource::RecentlyPlayed => RECENTLY_PLAYED_ID,
        }
    }

    pub fn title(&self) -> &str {
        match self {
            TrackSource::Playlist { name, .. } | TrackSource::Album { name, .. } => name,
            TrackSource::LikedSongs => "Liked Songs",
            TrackSource::RecentlyPlayed => "Recently Played",
        }
    }

    /// Playlists and albums play as a context so next/previous follow them
    pub fn context_uri(&self) -> Option<&str> {
        match self {
            TrackSource::Playlist { uri, .. } | TrackSource::Album { uri, .. } => Some(uri),
            TrackSource::LikedSongs | TrackSource::RecentlyPlayed => None,
        }
    }

    /// Album track lists leave out the album column
    pub fn shows_album(&self) -> bool {
        !matches!(self, TrackSource::Album { .. })
    }
}

#[derive(Debug, Clone)]
pub struct TracksState {
    pub source: TrackSource,
    pub tracks: Vec<Track>,
    pub loading: LoadingState,
    pub table_state: RefCell<TableState>,
}

impl TracksState {
    pub fn new(source: TrackSource) -> Self {
        Self {
            source,
            tracks: Vec::new(),
            loading: LoadingState::loading(),
            table_state: RefCell::new(TableState::default()),
        }
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.table_state
            .borrow()
            .selected()
            .filter(|index| *index < self.tracks.len())
    }

    pub fn selected_track(&self) -> Option<&Track> {
        self.selected_index().and_then(|index| self.tracks.get(index))
    }
}

/// Result category shown on the search screen, cycled with Tab
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchSection {
    #[default]
    Tracks,
    Albums,
    Artists,
    Playlists,
}

impl SearchSection {
    pub const ALL: [SearchSection; 4] = [
        SearchSection::Tracks,
        SearchSection::Albums,
        SearchSection::Artists,
        SearchSection::Playlists,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            SearchSection::Tracks => "Tracks",
            SearchSection::Albums => "Albums",
            SearchSection::Artists => "Artists",
            SearchSection::Playlists => "Playlists",
        }
    }

    pub fn next(self) -> Self {
        match self {
            SearchSection::Tracks => SearchSection::Albums,
            SearchSection::Albums => SearchSection::Artists,
            SearchSection::Artists => SearchSection::Playlists,
            SearchSection::Playlists => SearchSection::Tracks,
        }
    }
}

/// Everything one search returned, by category
#[derive(Default, Debug, Clone, PartialEq)]
pub struct SearchResults {
    pub tracks: Vec<Track>,
    pub albums: Vec<SimplifiedAlbum>,
    pub artists: Vec<Artist>,
    pub playlists: Vec<SimplifiedPlaylist>,
}

impl SearchResults {
    pub fn len(&self, section: SearchSection) -> usize {
        match section {
            SearchSection::Tracks => self.tracks.len(),
            SearchSection::Albums => self.albums.len(),
            SearchSection::Artists => self.artists.len(),
            SearchSection::Playlists => self.playlists.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        SearchSection::ALL.iter().all(|section| self.len(*section) == 0)
    }

    /// First category with anything in it
    pub fn first_section(&self) -> Option<SearchSection> {
        SearchSection::ALL
            .into_iter()
            .find(|section| self.len(*section) > 0)
    }
}

/// What the search row under the cursor opens
#[derive(Debug, Clone, PartialEq)]
pub enum SearchItem<'a> {
    Track(&'a Track),
    Album(&'a SimplifiedAlbum),
    Artist(&'a Artist),
    Playlist(&'a SimplifiedPlaylist),
}

#[derive(Default, Debug, Clone)]
pub struct SearchState {
    pub query: String,
    pub input_mode: InputMode,
    /// Query the current results belong to
    pub submitted_query: Option<String>,
    pub results: SearchResults,
    pub section: SearchSection,
    pub loading: LoadingState,
    pub table_state: RefCell<TableState>,
}

impl SearchState {
    pub fn editing() -> Self {
        Self {
            input_mode: InputMode::Search,
            ..Default::default()
        }
    }

    /// Switch category and put the cursor on its first row
    pub fn show_section(&mut self, section: SearchSection) {
        self.section = section;
        let selected = (self.results.len(section) > 0).then_some(0);
        self.table_state.borrow_mut().select(selected);
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.table_state
            .borrow()
            .selected()
            .filter(|index| *index < self.results.len(self.section))
    }

    pub fn selected_item(&self) -> Option<SearchItem<'_>> {
        let index = self.selected_index()?;
        let item = match self.section {
            SearchSection::Tracks => SearchItem::Track(&self.results.tracks[index]),
            SearchSection::Albums => SearchItem::Album(&self.results.albums[index]),
            SearchSection::Artists => SearchItem::Artist(&self.results.artists[index]),
            SearchSection::Playlists => SearchItem::Playlist(&self.results.playlists[index]),
        };
        Some(item)
    }

    pub fn selected_track(&self) -> Option<&Track> {
        match self.selected_item()? {
            SearchItem::Track(track) => Some(track),
            _ => None,
        }
    }
}

/// Which half of the artist screen has the cursor
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtistPane {
    #[default]
    TopTracks,
    Albums,
}

#[derive(Debug, Clone)]
pub struct ArtistState {
    pub artist_id: String,
    /// Known before the details arrive
    pub name: String,
    pub artist: Option<Artist>,
    pub top_tracks: Vec<Track>,
    pub albums: Vec<SimplifiedAlbum>,
    pub pane: ArtistPane,
    pub loading: LoadingState,
    pub tracks_table: RefCell<TableState>,
    pub albums_table: RefCell<TableState>,
}

impl ArtistState {
    pub fn new(artist_id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            artist_id: artist_id.into(),
            name: name.into(),
            artist: None,
            top_tracks: Vec::new(),
            albums: Vec::new(),
            pane: ArtistPane::default(),
            loading: LoadingState::loading(),
            tracks_table: RefCell::new(TableState::default()),
            albums_table: RefCell::new(TableState::default()),
        }
    }

    pub fn toggle_pane(&mut self) {
        self.pane = match self.pane {
            ArtistPane::TopTracks => ArtistPane::Albums,
            ArtistPane::Albums => ArtistPane::TopTracks,
        };
        if self.table_state().borrow().selected().is_none() {
            self.select_top();
        }
    }

    pub fn selected_track_index(&self) -> Option<usize> {
        if self.pane != ArtistPane::TopTracks {
            return None;
        }
        self.tracks_table
            .borrow()
            .selected()
            .filter(|index| *index < self.top_tracks.len())
    }

    pub fn selected_track(&self) -> Option<&Track> {
        self.selected_track_index()
            .and_then(|index| self.top_tracks.get(index))
    }

    pub fn selected_album(&self) -> Option<&SimplifiedAlbum> {
        if self.pane != ArtistPane::Albums {
            return None;
        }
        let index = self.albums_table.borrow().selected()?;
        self.albums.get(index)
    }
}

#[derive(Default, Debug, Clone)]
pub struct DevicesState {
    pub devices: Vec<Device>,
    pub loading: LoadingState,
    pub table_state: RefCell<TableState>,
}

impl DevicesState {
    pub fn selected_device(&self) -> Option<&Device> {
        let index = self.table_state.borrow().selected()?;
        self.devices.get(index)
    }
}

#[derive(Default, Debug, Clone)]
pub struct LogsState {
    pub scroll_offset: usize,
    pub total_entries: usize,
}

pub trait Scrollable {
    fn num_items(&self) -> usize;
    fn table_state(&self) -> &RefCell<TableState>;

    fn select_prev(&mut self) {
        let mut table_state = self.table_state().borrow_mut();
        if self.num_items() > 0 {
            if table_state.selected().unwrap_or(0) == 0 {
                table_state.select(Some(self.num_items() - 1));
            } else {
                table_state.scroll_up_by(1)
            }
        }
    }

    fn select_next(&mut self) {
        let num_items = self.num_items();
        let mut table_state = self.table_state().borrow_mut();
        if num_items > 0 {
            if table_state.selected().unwrap_or(num_items - 1) == num_items - 1 {
                table_state.select_first();
            } else {
                table_state.scroll_down_by(1)
            }
        }
    }

    fn select_top(&mut self) {
        if self.num_items() > 0 {
            self.table_state().borrow_mut().select_first();
        }
    }

    fn select_bottom(&mut self) {
        let num_items = self.num_items();
        if num_items > 0 {
            self.table_state().borrow_mut().select(Some(num_items - 1));
        }
    }
}

impl Scrollable for LibraryState {
    fn num_items(&self) -> usize {
        self.playlists.len() + 1
    }

    fn table_state(&self) -> &RefCell<TableState> {
        &self.table_state
    }
}

impl Scrollable for TracksState {
    fn num_items(&self) -> usize {
        self.tracks.len()
    }

    fn table_state(&self) -> &RefCell<TableState> {
        &self.table_state
    }
}

impl Scrollable for SearchState {
    fn num_items(&self) -> usize {
        self.results.len(self.section)
    }

    fn table_state(&self) -> &RefCell<TableState> {
        &self.table_state
    }
}

impl Scrollable for ArtistState {
    fn num_items(&self) -> usize {
        match self.pane {
            ArtistPane::TopTracks => self.top_tracks.len(),
            ArtistPane::Albums => self.albums.len(),
        }
    }

    fn table_state(&self) -> &RefCell<TableState> {
        match self.pane {
            ArtistPane::TopTracks => &self.tracks_table,
            ArtistPane::Albums => &self.albums_table,
        }
    }
}

impl Scrollable for DevicesState {
    fn num_items(&self) -> usize {
        self.devices.len()
    }

    fn table_state(&self) -> &RefCell<TableState> {
        &self.table_state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn playback(is_playing: bool, progress_ms: u64) -> PlaybackState {
        serde_json::from_value(json!({
            "device": {
                "id": "dev1",
                "name": "Laptop",
                "type": "Computer",
                "is_active": true,
                "volume_percent": 40
            },
            "repeat_state": "off",
            "shuffle_state": false,
            "progress_ms": progress_ms,
            "is_playing": is_playing,
            "item": {
                "id": "t1",
                "name": "Song",
                "uri": "spotify:track:t1",
                "duration_ms": 10_000,
                "artists": []
            }
        }))
        .unwrap()
    }

    #[test]
    fn test_tick_advances_progress_while_playing() {
        let mut now_playing = NowPlaying {
            playback: Some(playback(true, 1_000)),
            ..Default::default()
        };

        now_playing.tick(Duration::from_millis(250));
        assert_eq!(now_playing.progress_ms(), Some(1_250));

        now_playing.tick(Duration::from_secs(60));
        assert_eq!(now_playing.progress_ms(), Some(10_000));
    }

    #[test]
    fn test_tick_holds_progress_when_paused() {
        let mut now_playing = NowPlaying {
            playback: Some(playback(false, 1_000)),
            ..Default::default()
        };

        now_playing.tick(Duration::from_millis(250));
        assert_eq!(now_playing.progress_ms(), Some(1_000));
    }

    #[test]
    fn test_ratio() {
        let mut now_playing = NowPlaying::default();
        assert_eq!(now_playing.ratio(), 0.0);

        now_playing.playback = Some(playback(true, 2_500));
        assert!((now_playing.ratio() - 0.25).abs() < f64::EPSILON);
    }

    #[test]
    fn test_library_selection_starts_with_liked_songs() {
        let library = LibraryState::default();
        assert_eq!(library.selected_entry(), None);

        library.table_state.borrow_mut().select(Some(0));
        assert_eq!(library.selected_entry(), Some(LibraryEntry::LikedSongs));

        library.table_state.borrow_mut().select(Some(1));
        assert_eq!(library.selected_entry(), None);
    }

    #[test]
    fn test_selection_wraps() {
        let mut library = LibraryState::default();
        // Only the Liked Songs row
        library.select_next();
        assert_eq!(library.table_state.borrow().selected(), Some(0));
        library.select_prev();
        assert_eq!(library.table_state.borrow().selected(), Some(0));
    }

    fn track(id: &str) -> Track {
        serde_json::from_value(json!({
            "id": id,
            "name": id,
            "uri": format!("spotify:track:{}", id),
            "duration_ms": 1_000
        }))
        .unwrap()
    }

    fn album(id: &str) -> SimplifiedAlbum {
        serde_json::from_value(json!({
            "id": id,
            "name": id,
            "uri": format!("spotify:album:{}", id),
            "release_date": null
        }))
        .unwrap()
    }

    #[test]
    fn test_search_selection_follows_section() {
        let mut search = SearchState {
            results: SearchResults {
                tracks: vec![track("t1")],
                albums: vec![album("al1"), album("al2")],
                ..Default::default()
            },
            ..Default::default()
        };
        search.show_section(SearchSection::Tracks);
        assert!(matches!(search.selected_item(), Some(SearchItem::Track(t)) if t.name == "t1"));

        search.show_section(SearchSection::Albums);
        search.select_bottom();
        assert!(matches!(search.selected_item(), Some(SearchItem::Album(a)) if a.name == "al2"));
        assert!(search.selected_track().is_none());

        search.show_section(SearchSection::Artists);
        assert_eq!(search.table_state.borrow().selected(), None);
        assert_eq!(search.selected_item(), None);
    }

    #[test]
    fn test_first_non_empty_section() {
        let results = SearchResults {
            albums: vec![album("al1")],
            ..Default::default()
        };
        assert_eq!(results.first_section(), Some(SearchSection::Albums));
        assert_eq!(SearchResults::default().first_section(), None);
        assert!(SearchResults::default().is_empty());
    }

    #[test]
    fn test_artist_panes_scroll_independently() {
        let mut artist = ArtistState::new("ar1", "Band");
        artist.top_tracks = vec![track("t1"), track("t2")];
        artist.albums = vec![album("al1")];
        artist.select_top();
        artist.select_next();
        assert_eq!(artist.selected_track().map(|t| t.name.as_str()), Some("t2"));
        assert_eq!(artist.selected_album(), None);

        artist.toggle_pane();
        assert_eq!(artist.selected_track(), None);
        assert_eq!(artist.selected_album().map(|a| a.name.as_str()), Some("al1"));

        artist.toggle_pane();
        assert_eq!(artist.selected_track_index(), Some(1));
    }

    #[test]
    fn test_album_and_history_sources() {
        let album = TrackSource::Album {
            id: "al1".to_string(),
            name: "Debut".to_string(),
            uri: "spotify:album:al1".to_string(),
        };
        assert_eq!(album.context_uri(), Some("spotify:album:al1"));
        assert!(!album.shows_album());

        assert_eq!(TrackSource::RecentlyPlayed.id(), RECENTLY_PLAYED_ID);
        assert_eq!(TrackSource::RecentlyPlayed.context_uri(), None);
    }

    #[test]
    fn test_pop_to_truncates_history() {
        let mut state = AppState::new();
        state.navigate_to(Screen::Devices(DevicesState::default()));
        state.navigate_to(Screen::Logs(LogsState::default()));

        assert!(state.pop_to(|screen| matches!(screen, Screen::Library(_))));
        assert_eq!(state.history.len(), 1);

        assert!(!state.pop_to(|screen| matches!(screen, Screen::Search(_))));
        assert_eq!(state.history.len(), 1);
    }
}
