pub mod artist_screen;
pub mod devices_screen;
pub mod library_screen;
pub mod logs_screen;
pub mod search_screen;
pub mod tracks_screen;

use crate::state::{ArtistState, DevicesState, LibraryState, LogsState, SearchState, TracksState};

#[derive(Debug, Clone)]
pub enum Screen {
    Library(LibraryState),
    Tracks(TracksState),
    Search(SearchState),
    Artist(ArtistState),
    Devices(DevicesState),
    Logs(LogsState),
}
