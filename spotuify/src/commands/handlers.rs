use crate::events::AppCommand;
use crate::input::{Key, KeyEvent};
use crate::state::*;
use crate::ui::screens::Screen;

/// Map user input (KeyEvent) to AppCommand based on current UI state
/// Returns None if the key should be ignored
pub fn handle_key_input(event: KeyEvent, state: &AppState) -> Option<AppCommand> {
    let key = event.key;

    // Priority 0: Ctrl+C always quits
    if event.modifiers.ctrl && key == Key::Char('c') {
        return Some(AppCommand::Quit);
    }

    // Priority 1: Typing a search query
    if let Screen::Search(search_state) = state.current_screen() {
        if search_state.input_mode == InputMode::Search {
            return handle_search_input_keys(event);
        }
    }

    // Priority 2: Help popup swallows everything but close and quit
    if state.help_visible {
        return match key {
            Key::Char('?') | Key::Esc => Some(AppCommand::ToggleHelp),
            Key::Char('q') => Some(AppCommand::Quit),
            _ => None,
        };
    }

    // Priority 3: Second key of a multi-key sequence
    if let Some(pending) = state.pending_key {
        return match (pending, key) {
            ('g', Key::Char('g')) => Some(AppCommand::NavigateToTop),
            _ => Some(AppCommand::ClearPendingKey),
        };
    }

    // Priority 4: Keys that work on every screen
    if let Some(command) = handle_global_keys(key, state) {
        return Some(command);
    }

    // Priority 5: Screen-specific keys
    match (state.current_screen(), key) {
        // Logs screen
        (Screen::Logs(..), Key::Up | Key::Char('k')) => Some(AppCommand::ScrollLogsUp),
        (Screen::Logs(..), Key::Down | Key::Char('j')) => Some(AppCommand::ScrollLogsDown),
        (Screen::Logs(..), Key::PageUp) => Some(AppCommand::ScrollLogsPageUp),
        (Screen::Logs(..), Key::PageDown) => Some(AppCommand::ScrollLogsPageDown),
        (Screen::Logs(..), Key::Home) => Some(AppCommand::ScrollLogsToTop),
        (Screen::Logs(..), Key::End) => Some(AppCommand::ScrollLogsToBottom),

        // List navigation
        (_, Key::Down | Key::Char('j')) => Some(AppCommand::SelectNext),
        (_, Key::Up | Key::Char('k')) => Some(AppCommand::SelectPrevious),
        (_, Key::Home) => Some(AppCommand::NavigateToTop),
        (_, Key::End) => Some(AppCommand::NavigateToBottom),

        // Library screen
        (Screen::Library(library_state), Key::Enter) => {
            match library_state.selected_entry()? {
                LibraryEntry::LikedSongs => Some(AppCommand::OpenLikedSongs),
                LibraryEntry::Playlist(playlist) => Some(AppCommand::OpenPlaylist {
                    playlist: Box::new(playlist.clone()),
                }),
            }
        }
        (Screen::Library(..), Key::Char('R')) => {
            Some(AppCommand::LoadLibrary { force_refresh: true })
        }

        // Track lists
        (Screen::Tracks(tracks_state), Key::Enter) => {
            let offset = tracks_state.selected_index()? as u32;
            match tracks_state.source.context_uri() {
                Some(context_uri) => Some(AppCommand::PlayContext {
                    context_uri: context_uri.to_string(),
                    offset,
                }),
                None => Some(AppCommand::PlayTracks {
                    uris: tracks_state.tracks.iter().map(|t| t.uri.clone()).collect(),
                    offset,
                }),
            }
        }

        // Search screen
        (Screen::Search(search_state), Key::Enter) => match search_state.selected_item()? {
            SearchItem::Track(_) => Some(AppCommand::PlayTracks {
                uris: search_state
                    .results
                    .tracks
                    .iter()
                    .map(|t| t.uri.clone())
                    .collect(),
                offset: search_state.selected_index()? as u32,
            }),
            SearchItem::Album(album) => Some(AppCommand::OpenAlbum {
                album: Box::new(album.clone()),
            }),
            SearchItem::Artist(artist) => Some(AppCommand::OpenArtist {
                artist_id: artist.id.clone(),
                name: artist.name.clone(),
            }),
            SearchItem::Playlist(playlist) => Some(AppCommand::OpenPlaylist {
                playlist: Box::new(playlist.clone()),
            }),
        },
        (Screen::Search(..), Key::Tab) => Some(AppCommand::NextSearchSection),

        // Artist screen
        (Screen::Artist(artist_state), Key::Enter) => match artist_state.pane {
            ArtistPane::TopTracks => Some(AppCommand::PlayTracks {
                uris: artist_state.top_tracks.iter().map(|t| t.uri.clone()).collect(),
                offset: artist_state.selected_track_index()? as u32,
            }),
            ArtistPane::Albums => Some(AppCommand::OpenAlbum {
                album: Box::new(artist_state.selected_album()?.clone()),
            }),
        },
        (Screen::Artist(..), Key::Tab) => Some(AppCommand::SwitchArtistPane),

        // Any list with tracks in it
        (_, Key::Char('a')) => {
            let track = state.selected_track()?;
            Some(AppCommand::AddToQueue {
                uri: track.uri.clone(),
                name: track.name.clone(),
            })
        }
        (_, Key::Char('A')) => {
            let artist = state.selected_track()?.artists.first()?;
            Some(AppCommand::OpenArtist {
                artist_id: artist.id.clone()?,
                name: artist.name.clone(),
            })
        }

        // Devices screen
        (Screen::Devices(devices_state), Key::Enter) => {
            let device_id = devices_state.selected_device()?.id.clone()?;
            Some(AppCommand::TransferPlayback { device_id })
        }
        (Screen::Devices(..), Key::Char('R')) => Some(AppCommand::LoadDevices),

        (_, Key::Char('R')) => Some(AppCommand::RefreshPlayback),

        _ => None,
    }
}

fn handle_global_keys(key: Key, state: &AppState) -> Option<AppCommand> {
    let on_search = matches!(state.current_screen(), Screen::Search(..));

    match key {
        Key::Char('?') => Some(AppCommand::ToggleHelp),
        Key::Char('q') => Some(AppCommand::Quit),
        Key::Esc | Key::Char('h') => Some(AppCommand::NavigateBack),

        // Multi-key sequence initiator: 'g' sets pending key
        Key::Char('g') => Some(AppCommand::SetPendingKey('g')),
        Key::Char('G') => Some(AppCommand::NavigateToBottom),

        // Playback
        Key::Char(' ') => Some(AppCommand::TogglePlayback),
        Key::Char('n') => Some(AppCommand::NextTrack),
        Key::Char('p') => Some(AppCommand::PreviousTrack),
        Key::Char('z') => Some(AppCommand::ToggleShuffle),
        Key::Char('r') => Some(AppCommand::CycleRepeat),
        Key::Char('+') | Key::Char('=') => Some(AppCommand::VolumeUp),
        Key::Char('-') => Some(AppCommand::VolumeDown),
        Key::Char('m') => Some(AppCommand::ToggleMute),
        Key::Left => Some(AppCommand::SeekBackward),
        Key::Right => Some(AppCommand::SeekForward),

        // Screens
        Key::Char('/') | Key::Char('s') if on_search => Some(AppCommand::EnterSearchInput),
        Key::Char('/') | Key::Char('s') => Some(AppCommand::OpenSearch),
        Key::Char('l') => Some(AppCommand::LoadLibrary {
            force_refresh: false,
        }),
        Key::Char('d') => Some(AppCommand::LoadDevices),
        Key::Char('H') => Some(AppCommand::OpenRecentlyPlayed),
        Key::Char('L') => Some(AppCommand::NavigateToLogs),

        // Selected track, or the one playing when nothing is selected
        Key::Char('f') => {
            let track = state.selected_track().or(state.now_playing.track())?;
            Some(AppCommand::ToggleLike {
                track_id: track.id.clone()?,
                name: track.name.clone(),
            })
        }

        _ => None,
    }
}

fn handle_search_input_keys(event: KeyEvent) -> Option<AppCommand> {
    if event.modifiers.ctrl {
        return match event.key {
            Key::Char('u') => Some(AppCommand::ClearSearch),
            _ => None,
        };
    }

    match event.key {
        Key::Enter => Some(AppCommand::SubmitSearch),
        Key::Esc | Key::Down | Key::Tab => Some(AppCommand::ExitSearchInput),
        Key::Backspace => Some(AppCommand::DeleteSearchChar),
        Key::Char(c) => Some(AppCommand::AppendSearchChar(c)),
        _ => None,
    }
}
