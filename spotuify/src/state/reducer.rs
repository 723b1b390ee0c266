use super::{AppState, LoadingState, Notice, TrackSource};
use crate::events::{DataEvent, PlayerAction};
use crate::ui::screens::Screen;
use crate::utils::formatting::format_track_info;

/// Pure state transition function for data events
pub fn reduce_data_event(state: &mut AppState, event: DataEvent) {
    match event {
        DataEvent::UserLoaded { user } => {
            state.user = Some(user);
        }

        DataEvent::PlaylistsLoaded { playlists } => {
            // The library stays at the bottom of the stack, update it wherever it is
            if let Some(Screen::Library(library_state)) = state.history.first_mut() {
                library_state.playlists = playlists;
                library_state.loading = LoadingState::Loaded;

                let mut table_state = library_state.table_state.borrow_mut();
                let last = library_state.playlists.len();
                match table_state.selected() {
                    Some(index) if index > last => table_state.select(Some(last)),
                    None => table_state.select(Some(0)),
                    _ => {}
                }
            }
        }

        DataEvent::TracksLoaded { source_id, tracks } => {
            if let Screen::Tracks(tracks_state) = state.current_screen_mut() {
                // A late response for a list we already left
                if tracks_state.source.id() != source_id {
                    tracing::debug!("Dropping tracks for {}", source_id);
                    return;
                }
                tracks_state.tracks = tracks;
                tracks_state.loading = LoadingState::Loaded;
                let selected = (!tracks_state.tracks.is_empty()).then_some(0);
                tracks_state.table_state.borrow_mut().select(selected);
            }
        }

        DataEvent::SearchResultsLoaded { query, results } => {
            if let Screen::Search(search_state) = state.current_screen_mut() {
                if search_state.submitted_query.as_deref() != Some(query.as_str()) {
                    tracing::debug!("Dropping stale results for {:?}", query);
                    return;
                }
                // Land on the first category that found something
                let section = results.first_section().unwrap_or_default();
                search_state.results = results;
                search_state.loading = LoadingState::Loaded;
                search_state.show_section(section);
            }
        }

        DataEvent::ArtistLoaded {
            artist,
            top_tracks,
            albums,
        } => {
            if let Screen::Artist(artist_state) = state.current_screen_mut() {
                if artist_state.artist_id != artist.id {
                    tracing::debug!("Dropping details for artist {}", artist.id);
                    return;
                }
                artist_state.name = artist.name.clone();
                artist_state.artist = Some(*artist);
                artist_state.top_tracks = top_tracks;
                artist_state.albums = albums;
                artist_state.loading = LoadingState::Loaded;
                let tracks = (!artist_state.top_tracks.is_empty()).then_some(0);
                artist_state.tracks_table.borrow_mut().select(tracks);
                let albums = (!artist_state.albums.is_empty()).then_some(0);
                artist_state.albums_table.borrow_mut().select(albums);
            }
        }

        DataEvent::SavedToggled {
            track_id,
            name,
            saved,
        } => {
            let message = if saved {
                format!("Added {} to Liked Songs", name)
            } else {
                format!("Removed {} from Liked Songs", name)
            };
            state.now_playing.notice = Some(Notice::Info(message));

            if saved {
                return;
            }
            // An open Liked Songs list loses the row, wherever it is in the stack
            for screen in state.history.iter_mut() {
                if let Screen::Tracks(tracks_state) = screen {
                    if tracks_state.source != TrackSource::LikedSongs {
                        continue;
                    }
                    tracks_state
                        .tracks
                        .retain(|track| track.id.as_deref() != Some(track_id.as_str()));
                    let last = tracks_state.tracks.len().checked_sub(1);
                    let mut table_state = tracks_state.table_state.borrow_mut();
                    if let (Some(selected), Some(last)) = (table_state.selected(), last) {
                        table_state.select(Some(selected.min(last)));
                    } else if last.is_none() {
                        table_state.select(None);
                    }
                }
            }
        }

        DataEvent::SaveFailed { error } => {
            state.now_playing.notice = Some(Notice::Error(error));
        }

        DataEvent::DevicesLoaded { devices } => {
            if let Screen::Devices(devices_state) = state.current_screen_mut() {
                // Start on the active device
                let selected = devices
                    .iter()
                    .position(|d| d.is_active)
                    .or((!devices.is_empty()).then_some(0));
                devices_state.devices = devices;
                devices_state.loading = LoadingState::Loaded;
                devices_state.table_state.borrow_mut().select(selected);
            }
        }

        DataEvent::PlaybackLoaded { playback } => {
            let now_playing = &mut state.now_playing;
            let previous_uri = now_playing.track().map(|t| t.uri.clone());
            now_playing.playback = playback.map(|p| *p);
            if now_playing.track().map(|t| &t.uri) != previous_uri.as_ref() {
                tracing::info!("Now playing: {}", format_track_info(now_playing.track()));
            }
            now_playing.loading = LoadingState::Loaded;

            // Someone turned the volume up elsewhere
            if now_playing.volume().is_some_and(|v| v > 0) {
                now_playing.muted_volume = None;
            }
        }

        DataEvent::PlayerActionCompleted { action } => match action {
            PlayerAction::Queue { name, .. } => {
                state.now_playing.notice = Some(Notice::Info(format!("Queued {}", name)));
            }
            PlayerAction::Transfer { .. } => {
                state.now_playing.notice = Some(Notice::Info("Playback transferred".to_string()));
            }
            _ => {}
        },

        DataEvent::PlayerActionFailed { action, error } => {
            tracing::warn!("{} failed: {}", action.name(), error);
            state.now_playing.notice = Some(Notice::Error(error));
        }

        DataEvent::LoadError { error } => {
            let loading = match state.current_screen_mut() {
                Screen::Library(s) => Some(&mut s.loading),
                Screen::Tracks(s) => Some(&mut s.loading),
                Screen::Search(s) => Some(&mut s.loading),
                Screen::Devices(s) => Some(&mut s.loading),
                Screen::Artist(s) => Some(&mut s.loading),
                Screen::Logs(_) => None,
            };
            // Screens waiting on data show the error in place
            match loading.filter(|loading| loading.is_loading()) {
                Some(loading) => *loading = LoadingState::Error(error),
                None => state.now_playing.notice = Some(Notice::Error(error)),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{
        ArtistState, DevicesState, SearchResults, SearchSection, SearchState, TracksState,
    };
    use serde_json::json;
    use spotify_api::endpoints::{
        artists::Artist,
        player::{Device, PlaybackState},
        playlists::SimplifiedPlaylist,
        SimplifiedAlbum, Track,
    };

    fn track(id: &str) -> Track {
        serde_json::from_value(json!({
            "id": id,
            "name": format!("Track {}", id),
            "uri": format!("spotify:track:{}", id),
            "duration_ms": 200_000
        }))
        .unwrap()
    }

    fn playlist(id: &str) -> SimplifiedPlaylist {
        serde_json::from_value(json!({
            "id": id,
            "name": format!("Playlist {}", id),
            "uri": format!("spotify:playlist:{}", id),
            "owner": {"id": "me", "display_name": null}
        }))
        .unwrap()
    }

    fn device(id: &str, active: bool) -> Device {
        serde_json::from_value(json!({
            "id": id,
            "name": id,
            "type": "Speaker",
            "is_active": active,
            "volume_percent": 50
        }))
        .unwrap()
    }

    #[test]
    fn test_playlists_loaded_selects_first_row() {
        let mut state = AppState::new();
        reduce_data_event(
            &mut state,
            DataEvent::PlaylistsLoaded {
                playlists: vec![playlist("a"), playlist("b")],
            },
        );

        let Screen::Library(library) = state.current_screen() else {
            panic!("expected library");
        };
        assert_eq!(library.playlists.len(), 2);
        assert_eq!(library.loading, LoadingState::Loaded);
        assert_eq!(library.table_state.borrow().selected(), Some(0));
    }

    #[test]
    fn test_playlists_loaded_while_library_is_buried() {
        let mut state = AppState::new();
        state.navigate_to(Screen::Devices(DevicesState::default()));

        reduce_data_event(
            &mut state,
            DataEvent::PlaylistsLoaded {
                playlists: vec![playlist("a")],
            },
        );

        let Some(Screen::Library(library)) = state.history.first() else {
            panic!("expected library at the root");
        };
        assert_eq!(library.playlists.len(), 1);
    }

    #[test]
    fn test_tracks_for_other_source_are_dropped() {
        let mut state = AppState::new();
        state.navigate_to(Screen::Tracks(TracksState::new(TrackSource::LikedSongs)));

        reduce_data_event(
            &mut state,
            DataEvent::TracksLoaded {
                source_id: "some_playlist".to_string(),
                tracks: vec![track("1")],
            },
        );

        let Screen::Tracks(tracks) = state.current_screen() else {
            panic!("expected tracks");
        };
        assert!(tracks.tracks.is_empty());
        assert!(tracks.loading.is_loading());
    }

    #[test]
    fn test_stale_search_results_are_dropped() {
        let mut state = AppState::new();
        state.navigate_to(Screen::Search(SearchState {
            submitted_query: Some("new".to_string()),
            loading: LoadingState::loading(),
            ..Default::default()
        }));

        reduce_data_event(
            &mut state,
            DataEvent::SearchResultsLoaded {
                query: "old".to_string(),
                results: SearchResults {
                    tracks: vec![track("1")],
                    ..Default::default()
                },
            },
        );
        reduce_data_event(
            &mut state,
            DataEvent::SearchResultsLoaded {
                query: "new".to_string(),
                results: SearchResults {
                    tracks: vec![track("2"), track("3")],
                    ..Default::default()
                },
            },
        );

        let Screen::Search(search) = state.current_screen() else {
            panic!("expected search");
        };
        assert_eq!(search.results.tracks.len(), 2);
        assert_eq!(search.results.tracks[0].id.as_deref(), Some("2"));
    }

    #[test]
    fn test_search_without_tracks_opens_on_albums() {
        let mut state = AppState::new();
        state.navigate_to(Screen::Search(SearchState {
            submitted_query: Some("debut".to_string()),
            loading: LoadingState::loading(),
            ..Default::default()
        }));

        let album: SimplifiedAlbum = serde_json::from_value(json!({
            "id": "al1", "name": "Debut", "uri": "spotify:album:al1", "release_date": null
        }))
        .unwrap();
        reduce_data_event(
            &mut state,
            DataEvent::SearchResultsLoaded {
                query: "debut".to_string(),
                results: SearchResults {
                    albums: vec![album],
                    ..Default::default()
                },
            },
        );

        let Screen::Search(search) = state.current_screen() else {
            panic!("expected search");
        };
        assert_eq!(search.section, SearchSection::Albums);
        assert_eq!(search.table_state.borrow().selected(), Some(0));
    }

    fn artist(id: &str) -> Box<Artist> {
        Box::new(
            serde_json::from_value(json!({
                "id": id,
                "name": format!("Artist {}", id),
                "uri": format!("spotify:artist:{}", id)
            }))
            .unwrap(),
        )
    }

    #[test]
    fn test_artist_details_for_current_artist_only() {
        let mut state = AppState::new();
        state.navigate_to(Screen::Artist(ArtistState::new("ar2", "Two")));

        reduce_data_event(
            &mut state,
            DataEvent::ArtistLoaded {
                artist: artist("ar1"),
                top_tracks: vec![track("1")],
                albums: vec![],
            },
        );
        let Screen::Artist(current) = state.current_screen() else {
            panic!("expected artist");
        };
        assert!(current.artist.is_none());
        assert!(current.loading.is_loading());

        reduce_data_event(
            &mut state,
            DataEvent::ArtistLoaded {
                artist: artist("ar2"),
                top_tracks: vec![track("1"), track("2")],
                albums: vec![],
            },
        );
        let Screen::Artist(current) = state.current_screen() else {
            panic!("expected artist");
        };
        assert_eq!(current.name, "Artist ar2");
        assert_eq!(current.tracks_table.borrow().selected(), Some(0));
        assert_eq!(current.albums_table.borrow().selected(), None);
    }

    #[test]
    fn test_unliked_track_leaves_liked_songs() {
        let mut state = AppState::new();
        let mut liked = TracksState::new(TrackSource::LikedSongs);
        liked.tracks = vec![track("1"), track("2")];
        liked.table_state.borrow_mut().select(Some(1));
        state.navigate_to(Screen::Tracks(liked));
        state.navigate_to(Screen::Devices(DevicesState::default()));

        reduce_data_event(
            &mut state,
            DataEvent::SavedToggled {
                track_id: "2".to_string(),
                name: "Track 2".to_string(),
                saved: false,
            },
        );

        assert_eq!(
            state.now_playing.notice,
            Some(Notice::Info("Removed Track 2 from Liked Songs".to_string()))
        );
        let Screen::Tracks(liked) = &state.history[1] else {
            panic!("expected liked songs");
        };
        assert_eq!(liked.tracks.len(), 1);
        assert_eq!(liked.table_state.borrow().selected(), Some(0));
    }

    #[test]
    fn test_liked_track_sets_notice() {
        let mut state = AppState::new();
        reduce_data_event(
            &mut state,
            DataEvent::SavedToggled {
                track_id: "1".to_string(),
                name: "Song".to_string(),
                saved: true,
            },
        );
        assert_eq!(
            state.now_playing.notice,
            Some(Notice::Info("Added Song to Liked Songs".to_string()))
        );
    }

    #[test]
    fn test_devices_loaded_selects_active_device() {
        let mut state = AppState::new();
        state.navigate_to(Screen::Devices(DevicesState::default()));

        reduce_data_event(
            &mut state,
            DataEvent::DevicesLoaded {
                devices: vec![device("phone", false), device("laptop", true)],
            },
        );

        let Screen::Devices(devices) = state.current_screen() else {
            panic!("expected devices");
        };
        assert_eq!(devices.table_state.borrow().selected(), Some(1));
    }

    #[test]
    fn test_playback_with_volume_clears_mute() {
        let mut state = AppState::new();
        state.now_playing.muted_volume = Some(30);

        let playback: PlaybackState = serde_json::from_value(json!({
            "device": {
                "id": "dev", "name": "dev", "type": "Computer",
                "is_active": true, "volume_percent": 30
            },
            "is_playing": true,
            "item": null
        }))
        .unwrap();

        reduce_data_event(
            &mut state,
            DataEvent::PlaybackLoaded {
                playback: Some(Box::new(playback)),
            },
        );

        assert!(!state.now_playing.is_muted());
        assert_eq!(state.now_playing.volume(), Some(30));
    }

    #[test]
    fn test_player_failure_sets_notice() {
        let mut state = AppState::new();
        reduce_data_event(
            &mut state,
            DataEvent::PlayerActionFailed {
                action: PlayerAction::Next,
                error: "No active device".to_string(),
            },
        );

        assert_eq!(
            state.now_playing.notice,
            Some(Notice::Error("No active device".to_string()))
        );
    }

    #[test]
    fn test_load_error_marks_loading_screen() {
        let mut state = AppState::new();
        state.navigate_to(Screen::Devices(DevicesState {
            loading: LoadingState::loading(),
            ..Default::default()
        }));

        reduce_data_event(
            &mut state,
            DataEvent::LoadError {
                error: "boom".to_string(),
            },
        );

        let Screen::Devices(devices) = state.current_screen() else {
            panic!("expected devices");
        };
        assert_eq!(devices.loading, LoadingState::Error("boom".to_string()));
        assert!(state.now_playing.notice.is_none());
    }
}
