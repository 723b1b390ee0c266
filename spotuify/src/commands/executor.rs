use crate::background::{data_loader::DataLoader, BackgroundTaskManager};
use crate::events::{AppCommand, DataRequest, PlayerAction};
use crate::state::*;
use crate::ui::screens::Screen;

const LOG_PAGE_SIZE: usize = 20;

/// Execute a command: update state, then hand any resulting API work to a
/// background task
pub fn execute_command(
    command: AppCommand,
    state: &mut AppState,
    task_manager: &mut BackgroundTaskManager,
    data_loader: &DataLoader,
) {
    if let Some(request) = execute_command_sync(command, state) {
        spawn_request(request, task_manager, data_loader);
    }
}

/// Run a data request in the background, superseding any running request
/// with the same task id
pub fn spawn_request(
    request: DataRequest,
    task_manager: &mut BackgroundTaskManager,
    data_loader: &DataLoader,
) {
    let data_loader = data_loader.clone();
    let task_id = request.task_id();
    let future = async move {
        data_loader.run(request).await;
    };

    task_manager.spawn_load_task(task_id, future);
}

/// Apply a command to the state without side effects.
///
/// Returns the API work the command needs, if any. Tests drive the app
/// through this directly.
pub fn execute_command_sync(command: AppCommand, state: &mut AppState) -> Option<DataRequest> {
    // Save whether we're setting a pending key (we don't want to clear it in that case)
    let is_setting_pending_key = matches!(command, AppCommand::SetPendingKey(_));

    let request = apply(command, state);

    // Clear pending key after any command except SetPendingKey
    if !is_setting_pending_key && state.pending_key.is_some() {
        state.pending_key = None;
    }

    // A new player command replaces whatever the last one reported
    if let Some(DataRequest::Player { .. }) = request {
        state.now_playing.notice = None;
    }

    request
}

fn apply(command: AppCommand, state: &mut AppState) -> Option<DataRequest> {
    match command {
        // Simple state updates
        AppCommand::Quit => state.should_quit = true,
        AppCommand::ToggleHelp => state.help_visible = !state.help_visible,
        AppCommand::SetPendingKey(c) => state.pending_key = Some(c),
        AppCommand::ClearPendingKey => state.pending_key = None,

        // Navigation
        AppCommand::NavigateBack => {
            state.navigate_back();
        }
        AppCommand::SelectNext => match state.current_screen_mut() {
            Screen::Library(s) => s.select_next(),
            Screen::Tracks(s) => s.select_next(),
            Screen::Search(s) => s.select_next(),
            Screen::Devices(s) => s.select_next(),
            Screen::Artist(s) => s.select_next(),
            Screen::Logs(_) => {} // Uses scroll commands instead
        },
        AppCommand::SelectPrevious => match state.current_screen_mut() {
            Screen::Library(s) => s.select_prev(),
            Screen::Tracks(s) => s.select_prev(),
            Screen::Search(s) => s.select_prev(),
            Screen::Devices(s) => s.select_prev(),
            Screen::Artist(s) => s.select_prev(),
            Screen::Logs(_) => {}
        },
        AppCommand::NavigateToTop => match state.current_screen_mut() {
            Screen::Library(s) => s.select_top(),
            Screen::Tracks(s) => s.select_top(),
            Screen::Search(s) => s.select_top(),
            Screen::Devices(s) => s.select_top(),
            Screen::Artist(s) => s.select_top(),
            Screen::Logs(s) => s.scroll_offset = s.total_entries.saturating_sub(1),
        },
        AppCommand::NavigateToBottom => match state.current_screen_mut() {
            Screen::Library(s) => s.select_bottom(),
            Screen::Tracks(s) => s.select_bottom(),
            Screen::Search(s) => s.select_bottom(),
            Screen::Devices(s) => s.select_bottom(),
            Screen::Artist(s) => s.select_bottom(),
            Screen::Logs(s) => s.scroll_offset = 0,
        },

        // Screens
        AppCommand::LoadLibrary { force_refresh } => {
            // The library is always at the root of the stack
            state.pop_to(|screen| matches!(screen, Screen::Library(_)));
            if let Screen::Library(library_state) = state.current_screen_mut() {
                let needs_load = matches!(
                    library_state.loading,
                    LoadingState::NotStarted | LoadingState::Error(_)
                );
                if force_refresh || needs_load {
                    tracing::debug!("Loading playlists (force_refresh={})", force_refresh);
                    library_state.loading = LoadingState::loading();
                    return Some(DataRequest::Playlists);
                }
            }
        }
        AppCommand::OpenPlaylist { playlist } => {
            tracing::debug!("Opening playlist {}", playlist.name);
            let playlist_id = playlist.id.clone();
            state.navigate_to(Screen::Tracks(TracksState::new(TrackSource::Playlist {
                id: playlist.id,
                name: playlist.name,
                uri: playlist.uri,
            })));
            return Some(DataRequest::PlaylistTracks { playlist_id });
        }
        AppCommand::OpenLikedSongs => {
            state.navigate_to(Screen::Tracks(TracksState::new(TrackSource::LikedSongs)));
            return Some(DataRequest::SavedTracks);
        }
        AppCommand::OpenAlbum { album } => {
            let Some(album_id) = album.id else {
                tracing::debug!("Album {} has no id", album.name);
                return None;
            };
            tracing::debug!("Opening album {}", album.name);
            let uri = album
                .uri
                .unwrap_or_else(|| format!("spotify:album:{}", album_id));
            state.navigate_to(Screen::Tracks(TracksState::new(TrackSource::Album {
                id: album_id.clone(),
                name: album.name,
                uri,
            })));
            return Some(DataRequest::AlbumTracks { album_id });
        }
        AppCommand::OpenArtist { artist_id, name } => {
            tracing::debug!("Opening artist {}", name);
            state.navigate_to(Screen::Artist(ArtistState::new(artist_id.clone(), name)));
            return Some(DataRequest::Artist { artist_id });
        }
        AppCommand::OpenRecentlyPlayed => {
            let is_history = |screen: &Screen| {
                matches!(screen, Screen::Tracks(s) if s.source == TrackSource::RecentlyPlayed)
            };
            if !state.pop_to(is_history) {
                state.navigate_to(Screen::Tracks(TracksState::new(
                    TrackSource::RecentlyPlayed,
                )));
            }
            // History changes with every play
            if let Screen::Tracks(tracks_state) = state.current_screen_mut() {
                tracks_state.loading = LoadingState::loading();
            }
            return Some(DataRequest::RecentlyPlayed);
        }
        AppCommand::NextSearchSection => {
            if let Screen::Search(s) = state.current_screen_mut() {
                s.show_section(s.section.next());
            }
        }
        AppCommand::SwitchArtistPane => {
            if let Screen::Artist(s) = state.current_screen_mut() {
                s.toggle_pane();
            }
        }
        AppCommand::OpenSearch => {
            if state.pop_to(|screen| matches!(screen, Screen::Search(_))) {
                if let Screen::Search(search_state) = state.current_screen_mut() {
                    search_state.input_mode = InputMode::Search;
                }
            } else {
                state.navigate_to(Screen::Search(SearchState::editing()));
            }
        }
        AppCommand::LoadDevices => {
            if !state.pop_to(|screen| matches!(screen, Screen::Devices(_))) {
                state.navigate_to(Screen::Devices(DevicesState::default()));
            }
            if let Screen::Devices(devices_state) = state.current_screen_mut() {
                devices_state.loading = LoadingState::loading();
            }
            return Some(DataRequest::Devices);
        }
        AppCommand::NavigateToLogs => {
            // No logging here to avoid a feedback loop on the logs screen
            if !state.pop_to(|screen| matches!(screen, Screen::Logs(_))) {
                state.navigate_to(Screen::Logs(LogsState::default()));
            }
        }

        // Playback
        AppCommand::TogglePlayback => {
            let device_id = state.now_playing.device_id();
            let action = if state.now_playing.is_playing() {
                PlayerAction::Pause
            } else {
                PlayerAction::Resume
            };
            if let Some(playback) = state.now_playing.playback.as_mut() {
                playback.is_playing = !playback.is_playing;
            }
            return player(action, device_id);
        }
        AppCommand::NextTrack => {
            return player(PlayerAction::Next, state.now_playing.device_id());
        }
        AppCommand::PreviousTrack => {
            return player(PlayerAction::Previous, state.now_playing.device_id());
        }
        AppCommand::ToggleShuffle => {
            let device_id = state.now_playing.device_id();
            let playback = state.now_playing.playback.as_mut()?;
            playback.shuffle_state = !playback.shuffle_state;
            let action = PlayerAction::Shuffle {
                state: playback.shuffle_state,
            };
            return player(action, device_id);
        }
        AppCommand::CycleRepeat => {
            let device_id = state.now_playing.device_id();
            let playback = state.now_playing.playback.as_mut()?;
            playback.repeat_state = playback.repeat_state.cycle();
            let action = PlayerAction::Repeat {
                state: playback.repeat_state,
            };
            return player(action, device_id);
        }
        AppCommand::VolumeUp | AppCommand::VolumeDown => {
            let Some(current) = state.now_playing.volume() else {
                tracing::debug!("Active device has no volume control");
                return None;
            };
            let step = state.volume_step;
            let percent = match command {
                AppCommand::VolumeUp => current.saturating_add(step).min(100),
                _ => current.saturating_sub(step),
            };
            state.now_playing.muted_volume = None;
            state.now_playing.set_volume(percent);
            return player(
                PlayerAction::Volume { percent },
                state.now_playing.device_id(),
            );
        }
        AppCommand::ToggleMute => {
            let percent = match state.now_playing.muted_volume.take() {
                Some(previous) => previous,
                None => {
                    let current = state.now_playing.volume()?;
                    state.now_playing.muted_volume = Some(current);
                    0
                }
            };
            state.now_playing.set_volume(percent);
            return player(
                PlayerAction::Volume { percent },
                state.now_playing.device_id(),
            );
        }
        AppCommand::SeekForward | AppCommand::SeekBackward => {
            let progress = state.now_playing.progress_ms()?;
            let position_ms = match command {
                AppCommand::SeekForward => {
                    let target = progress + SEEK_STEP_MS;
                    match state.now_playing.duration_ms() {
                        Some(duration) => target.min(duration),
                        None => target,
                    }
                }
                _ => progress.saturating_sub(SEEK_STEP_MS),
            };
            state.now_playing.set_progress(position_ms);
            return player(
                PlayerAction::Seek { position_ms },
                state.now_playing.device_id(),
            );
        }
        AppCommand::PlayContext {
            context_uri,
            offset,
        } => {
            return player(
                PlayerAction::PlayContext {
                    context_uri,
                    offset,
                },
                state.now_playing.device_id(),
            );
        }
        AppCommand::PlayTracks { uris, offset } => {
            if uris.is_empty() {
                return None;
            }
            return player(
                PlayerAction::PlayTracks { uris, offset },
                state.now_playing.device_id(),
            );
        }
        AppCommand::AddToQueue { uri, name } => {
            return player(
                PlayerAction::Queue { uri, name },
                state.now_playing.device_id(),
            );
        }
        AppCommand::TransferPlayback { device_id } => {
            if let Screen::Devices(devices_state) = state.current_screen_mut() {
                for device in devices_state.devices.iter_mut() {
                    device.is_active = device.id.as_deref() == Some(device_id.as_str());
                }
            }
            // The transfer names its target in the body
            return player(PlayerAction::Transfer { device_id }, None);
        }
        AppCommand::RefreshPlayback => return Some(DataRequest::Playback),

        // Library
        AppCommand::ToggleLike { track_id, name } => {
            return Some(DataRequest::ToggleSaved { track_id, name });
        }

        // Search input
        AppCommand::EnterSearchInput => {
            if let Screen::Search(s) = state.current_screen_mut() {
                s.input_mode = InputMode::Search;
            }
        }
        AppCommand::ExitSearchInput => {
            if let Screen::Search(s) = state.current_screen_mut() {
                s.input_mode = InputMode::Normal;
            }
        }
        AppCommand::AppendSearchChar(c) => {
            if let Screen::Search(s) = state.current_screen_mut() {
                s.query.push(c);
            }
        }
        AppCommand::DeleteSearchChar => {
            if let Screen::Search(s) = state.current_screen_mut() {
                s.query.pop();
            }
        }
        AppCommand::ClearSearch => {
            if let Screen::Search(s) = state.current_screen_mut() {
                s.query.clear();
            }
        }
        AppCommand::SubmitSearch => {
            if let Screen::Search(s) = state.current_screen_mut() {
                let query = s.query.trim().to_string();
                if query.is_empty() {
                    return None;
                }
                tracing::debug!("Searching for {:?}", query);
                s.input_mode = InputMode::Normal;
                s.submitted_query = Some(query.clone());
                s.results = SearchResults::default();
                s.show_section(SearchSection::Tracks);
                s.loading = LoadingState::loading();
                return Some(DataRequest::Search { query });
            }
        }

        // Logs
        AppCommand::ScrollLogsUp => {
            if let Screen::Logs(logs_state) = state.current_screen_mut() {
                // Scroll up means going back in time (increase offset)
                if logs_state.scroll_offset < logs_state.total_entries.saturating_sub(1) {
                    logs_state.scroll_offset += 1;
                }
            }
        }
        AppCommand::ScrollLogsDown => {
            if let Screen::Logs(logs_state) = state.current_screen_mut() {
                logs_state.scroll_offset = logs_state.scroll_offset.saturating_sub(1);
            }
        }
        AppCommand::ScrollLogsPageUp => {
            if let Screen::Logs(logs_state) = state.current_screen_mut() {
                logs_state.scroll_offset = (logs_state.scroll_offset + LOG_PAGE_SIZE)
                    .min(logs_state.total_entries.saturating_sub(1));
            }
        }
        AppCommand::ScrollLogsPageDown => {
            if let Screen::Logs(logs_state) = state.current_screen_mut() {
                logs_state.scroll_offset = logs_state.scroll_offset.saturating_sub(LOG_PAGE_SIZE);
            }
        }
        AppCommand::ScrollLogsToTop => {
            if let Screen::Logs(logs_state) = state.current_screen_mut() {
                logs_state.scroll_offset = logs_state.total_entries.saturating_sub(1);
            }
        }
        AppCommand::ScrollLogsToBottom => {
            if let Screen::Logs(logs_state) = state.current_screen_mut() {
                logs_state.scroll_offset = 0;
            }
        }
    }

    None
}

fn player(action: PlayerAction, device_id: Option<String>) -> Option<DataRequest> {
    Some(DataRequest::Player { action, device_id })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use spotify_api::endpoints::player::{PlaybackState, RepeatState};

    fn playing_state(volume: u8, progress_ms: u64) -> AppState {
        let mut state = AppState::new();
        state.now_playing.playback = Some(
            serde_json::from_value::<PlaybackState>(json!({
                "device": {
                    "id": "dev1",
                    "name": "Laptop",
                    "type": "Computer",
                    "is_active": true,
                    "volume_percent": volume
                },
                "repeat_state": "off",
                "shuffle_state": false,
                "progress_ms": progress_ms,
                "is_playing": true,
                "item": {
                    "id": "t1",
                    "name": "Song",
                    "uri": "spotify:track:t1",
                    "duration_ms": 60_000
                }
            }))
            .unwrap(),
        );
        state
    }

    fn player_action(request: Option<DataRequest>) -> PlayerAction {
        match request {
            Some(DataRequest::Player { action, .. }) => action,
            other => panic!("expected a player request, got {other:?}"),
        }
    }

    #[test]
    fn test_toggle_playback_pauses_and_resumes() {
        let mut state = playing_state(50, 0);

        let request = execute_command_sync(AppCommand::TogglePlayback, &mut state);
        assert_eq!(
            request,
            Some(DataRequest::Player {
                action: PlayerAction::Pause,
                device_id: Some("dev1".to_string()),
            })
        );
        assert!(!state.now_playing.is_playing());

        let request = execute_command_sync(AppCommand::TogglePlayback, &mut state);
        assert_eq!(player_action(request), PlayerAction::Resume);
        assert!(state.now_playing.is_playing());
    }

    #[test]
    fn test_toggle_playback_without_device_still_resumes() {
        let mut state = AppState::new();
        let request = execute_command_sync(AppCommand::TogglePlayback, &mut state);
        assert_eq!(
            request,
            Some(DataRequest::Player {
                action: PlayerAction::Resume,
                device_id: None,
            })
        );
    }

    #[test]
    fn test_volume_is_clamped() {
        let mut state = playing_state(98, 0);
        let request = execute_command_sync(AppCommand::VolumeUp, &mut state);
        assert_eq!(player_action(request), PlayerAction::Volume { percent: 100 });
        assert_eq!(state.now_playing.volume(), Some(100));

        let mut state = playing_state(3, 0);
        let request = execute_command_sync(AppCommand::VolumeDown, &mut state);
        assert_eq!(player_action(request), PlayerAction::Volume { percent: 0 });
    }

    #[test]
    fn test_volume_uses_configured_step() {
        let mut state = playing_state(50, 0).with_volume_step(10);
        let request = execute_command_sync(AppCommand::VolumeUp, &mut state);
        assert_eq!(player_action(request), PlayerAction::Volume { percent: 60 });
    }

    #[test]
    fn test_volume_without_playback_is_ignored() {
        let mut state = AppState::new();
        assert_eq!(execute_command_sync(AppCommand::VolumeUp, &mut state), None);
    }

    #[test]
    fn test_mute_restores_previous_volume() {
        let mut state = playing_state(65, 0);

        let request = execute_command_sync(AppCommand::ToggleMute, &mut state);
        assert_eq!(player_action(request), PlayerAction::Volume { percent: 0 });
        assert_eq!(state.now_playing.muted_volume, Some(65));
        assert_eq!(state.now_playing.volume(), Some(0));

        let request = execute_command_sync(AppCommand::ToggleMute, &mut state);
        assert_eq!(player_action(request), PlayerAction::Volume { percent: 65 });
        assert_eq!(state.now_playing.muted_volume, None);
        assert_eq!(state.now_playing.volume(), Some(65));
    }

    #[test]
    fn test_volume_change_while_muted_unmutes() {
        let mut state = playing_state(40, 0);
        execute_command_sync(AppCommand::ToggleMute, &mut state);

        let request = execute_command_sync(AppCommand::VolumeUp, &mut state);
        assert_eq!(player_action(request), PlayerAction::Volume { percent: 5 });
        assert!(!state.now_playing.is_muted());
    }

    #[test]
    fn test_seek_is_bounded_by_track() {
        let mut state = playing_state(50, 58_000);
        let request = execute_command_sync(AppCommand::SeekForward, &mut state);
        assert_eq!(
            player_action(request),
            PlayerAction::Seek {
                position_ms: 60_000
            }
        );

        let mut state = playing_state(50, 3_000);
        let request = execute_command_sync(AppCommand::SeekBackward, &mut state);
        assert_eq!(player_action(request), PlayerAction::Seek { position_ms: 0 });
        assert_eq!(state.now_playing.progress_ms(), Some(0));

        let mut state = playing_state(50, 10_000);
        let request = execute_command_sync(AppCommand::SeekForward, &mut state);
        assert_eq!(
            player_action(request),
            PlayerAction::Seek {
                position_ms: 15_000
            }
        );
    }

    #[test]
    fn test_repeat_cycles_through_modes() {
        let mut state = playing_state(50, 0);

        let expected = [RepeatState::Context, RepeatState::Track, RepeatState::Off];
        for repeat in expected {
            let request = execute_command_sync(AppCommand::CycleRepeat, &mut state);
            assert_eq!(player_action(request), PlayerAction::Repeat { state: repeat });
        }
    }

    #[test]
    fn test_shuffle_toggles() {
        let mut state = playing_state(50, 0);
        let request = execute_command_sync(AppCommand::ToggleShuffle, &mut state);
        assert_eq!(player_action(request), PlayerAction::Shuffle { state: true });
    }

    #[test]
    fn test_player_command_clears_notice() {
        let mut state = playing_state(50, 0);
        state.now_playing.notice = Some(Notice::Error("No active device".to_string()));

        execute_command_sync(AppCommand::NextTrack, &mut state);
        assert!(state.now_playing.notice.is_none());
    }

    #[test]
    fn test_submit_search_trims_and_requests() {
        let mut state = AppState::new();
        execute_command_sync(AppCommand::OpenSearch, &mut state);
        for c in "  daft punk ".chars() {
            execute_command_sync(AppCommand::AppendSearchChar(c), &mut state);
        }

        let request = execute_command_sync(AppCommand::SubmitSearch, &mut state);
        assert_eq!(
            request,
            Some(DataRequest::Search {
                query: "daft punk".to_string()
            })
        );

        let Screen::Search(search) = state.current_screen() else {
            panic!("expected search screen");
        };
        assert_eq!(search.input_mode, InputMode::Normal);
        assert!(search.loading.is_loading());
    }

    #[test]
    fn test_empty_search_is_not_submitted() {
        let mut state = AppState::new();
        execute_command_sync(AppCommand::OpenSearch, &mut state);
        execute_command_sync(AppCommand::AppendSearchChar(' '), &mut state);

        assert_eq!(execute_command_sync(AppCommand::SubmitSearch, &mut state), None);
    }

    #[test]
    fn test_library_loads_once_unless_forced() {
        let mut state = AppState::new();
        assert_eq!(
            execute_command_sync(
                AppCommand::LoadLibrary {
                    force_refresh: false
                },
                &mut state
            ),
            Some(DataRequest::Playlists)
        );

        if let Screen::Library(library) = state.current_screen_mut() {
            library.loading = LoadingState::Loaded;
        }
        assert_eq!(
            execute_command_sync(
                AppCommand::LoadLibrary {
                    force_refresh: false
                },
                &mut state
            ),
            None
        );
        assert_eq!(
            execute_command_sync(AppCommand::LoadLibrary { force_refresh: true }, &mut state),
            Some(DataRequest::Playlists)
        );
    }

    #[test]
    fn test_open_album_plays_as_context() {
        let mut state = AppState::new();
        let album: spotify_api::endpoints::SimplifiedAlbum = serde_json::from_value(json!({
            "id": "al1",
            "name": "Debut",
            "uri": "spotify:album:al1",
            "release_date": "1991"
        }))
        .unwrap();

        let request = execute_command_sync(
            AppCommand::OpenAlbum {
                album: Box::new(album),
            },
            &mut state,
        );
        assert_eq!(
            request,
            Some(DataRequest::AlbumTracks {
                album_id: "al1".to_string()
            })
        );

        let Screen::Tracks(tracks) = state.current_screen() else {
            panic!("expected tracks screen");
        };
        assert_eq!(tracks.source.context_uri(), Some("spotify:album:al1"));
        assert!(tracks.loading.is_loading());
    }

    #[test]
    fn test_album_without_id_is_not_opened() {
        let mut state = AppState::new();
        let album: spotify_api::endpoints::SimplifiedAlbum =
            serde_json::from_value(json!({"id": null, "name": "Local", "uri": null, "release_date": null}))
                .unwrap();

        let request = execute_command_sync(
            AppCommand::OpenAlbum {
                album: Box::new(album),
            },
            &mut state,
        );
        assert_eq!(request, None);
        assert_eq!(state.history.len(), 1);
    }

    #[test]
    fn test_recently_played_reloads_without_stacking() {
        let mut state = AppState::new();
        assert_eq!(
            execute_command_sync(AppCommand::OpenRecentlyPlayed, &mut state),
            Some(DataRequest::RecentlyPlayed)
        );
        execute_command_sync(AppCommand::LoadDevices, &mut state);
        assert_eq!(
            execute_command_sync(AppCommand::OpenRecentlyPlayed, &mut state),
            Some(DataRequest::RecentlyPlayed)
        );

        assert_eq!(state.history.len(), 2);
        let Screen::Tracks(tracks) = state.current_screen() else {
            panic!("expected tracks screen");
        };
        assert_eq!(tracks.source, TrackSource::RecentlyPlayed);
    }

    #[test]
    fn test_toggle_like_requests_library_change() {
        let mut state = AppState::new();
        let request = execute_command_sync(
            AppCommand::ToggleLike {
                track_id: "t1".to_string(),
                name: "Song".to_string(),
            },
            &mut state,
        );
        let request = request.unwrap();
        assert_eq!(request.task_id(), "like_t1");
    }

    #[test]
    fn test_opening_devices_twice_does_not_stack() {
        let mut state = AppState::new();
        execute_command_sync(AppCommand::LoadDevices, &mut state);
        execute_command_sync(AppCommand::NavigateToLogs, &mut state);
        execute_command_sync(AppCommand::LoadDevices, &mut state);

        assert_eq!(state.history.len(), 2);
        assert!(matches!(state.current_screen(), Screen::Devices(_)));
    }

    #[test]
    fn test_pending_key_cleared_by_other_commands() {
        let mut state = AppState::new();
        execute_command_sync(AppCommand::SetPendingKey('g'), &mut state);
        assert_eq!(state.pending_key, Some('g'));

        execute_command_sync(AppCommand::SelectNext, &mut state);
        assert_eq!(state.pending_key, None);
    }

    #[test]
    fn test_log_scrolling_is_bounded() {
        let mut state = AppState::new();
        state.navigate_to(Screen::Logs(LogsState {
            scroll_offset: 0,
            total_entries: 30,
        }));

        execute_command_sync(AppCommand::ScrollLogsDown, &mut state);
        execute_command_sync(AppCommand::ScrollLogsPageUp, &mut state);
        execute_command_sync(AppCommand::ScrollLogsPageUp, &mut state);

        let Screen::Logs(logs) = state.current_screen() else {
            panic!("expected logs screen");
        };
        assert_eq!(logs.scroll_offset, 29);
    }
}
