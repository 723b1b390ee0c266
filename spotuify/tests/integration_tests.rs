use serde_json::json;
use spotify_api::endpoints::{
    artists::Artist,
    player::{Device, PlaybackState, RepeatState},
    playlists::SimplifiedPlaylist,
    SimplifiedAlbum, Track,
};
use spotuify::events::{DataEvent, DataRequest, PlayerAction};
use spotuify::input::{Key, KeyEvent};
use spotuify::state::{InputMode, LoadingState, Notice, SearchResults, SearchSection, TrackSource};
use spotuify::testing::TestApp;
use spotuify::ui::screens::Screen;

fn track(id: &str) -> Track {
    serde_json::from_value(json!({
        "id": id,
        "name": format!("Track {}", id),
        "uri": format!("spotify:track:{}", id),
        "duration_ms": 180_000,
        "artists": [{ "id": "a1", "name": "Artist", "uri": "spotify:artist:a1" }]
    }))
    .unwrap()
}

fn playlist(id: &str) -> SimplifiedPlaylist {
    serde_json::from_value(json!({
        "id": id,
        "name": format!("Playlist {}", id),
        "uri": format!("spotify:playlist:{}", id),
        "owner": { "id": "me", "display_name": "Me" },
        "tracks": { "total": 3 }
    }))
    .unwrap()
}

fn device(id: &str, is_active: bool) -> Device {
    serde_json::from_value(json!({
        "id": id,
        "name": format!("Device {}", id),
        "type": "Computer",
        "is_active": is_active,
        "volume_percent": 40
    }))
    .unwrap()
}

fn playback(is_playing: bool, volume: u8) -> Box<PlaybackState> {
    Box::new(
        serde_json::from_value(json!({
            "device": {
                "id": "dev1",
                "name": "Desk",
                "type": "Computer",
                "is_active": true,
                "volume_percent": volume
            },
            "repeat_state": "off",
            "shuffle_state": false,
            "progress_ms": 60_000,
            "is_playing": is_playing,
            "item": serde_json::to_value(track("now")).unwrap()
        }))
        .unwrap(),
    )
}

fn album(id: &str) -> SimplifiedAlbum {
    serde_json::from_value(json!({
        "id": id,
        "name": format!("Album {}", id),
        "uri": format!("spotify:album:{}", id),
        "release_date": "2001-06-01",
        "album_type": "album"
    }))
    .unwrap()
}

fn artist(id: &str) -> Artist {
    serde_json::from_value(json!({
        "id": id,
        "name": format!("Artist {}", id),
        "uri": format!("spotify:artist:{}", id),
        "genres": ["house"],
        "followers": { "total": 42 }
    }))
    .unwrap()
}

fn searched(query: &str) -> TestApp {
    let mut app = app_with_library();
    app.send_key(Key::Char('/'));
    app.type_text(query);
    app.send_key(Key::Enter);
    app.send_data_event(DataEvent::SearchResultsLoaded {
        query: query.to_string(),
        results: SearchResults {
            tracks: vec![track("s1")],
            albums: vec![album("al1")],
            artists: vec![artist("a1")],
            playlists: vec![playlist("p9")],
        },
    });
    app
}

fn app_with_library() -> TestApp {
    let mut app = TestApp::new();
    app.send_data_event(DataEvent::PlaylistsLoaded {
        playlists: vec![playlist("p1"), playlist("p2")],
    });
    app
}

fn app_with_playback(is_playing: bool, volume: u8) -> TestApp {
    let mut app = app_with_library();
    app.send_data_event(DataEvent::PlaybackLoaded {
        playback: Some(playback(is_playing, volume)),
    });
    app
}

fn last_player_action(app: &TestApp) -> &PlayerAction {
    match app.last_request() {
        Some(DataRequest::Player { action, .. }) => action,
        other => panic!("expected a player request, got {:?}", other),
    }
}

#[test]
fn test_quit_flow() {
    let mut app = TestApp::new();
    app.assert_not_quit();

    app.send_key(Key::Char('q'));
    app.assert_should_quit();
}

#[test]
fn test_ctrl_c_quits_while_typing_a_search() {
    let mut app = TestApp::new();
    app.send_key(Key::Char('/'));
    app.type_text("abc");

    app.send_key_event(KeyEvent::with_ctrl(Key::Char('c')));
    app.assert_should_quit();
}

#[test]
fn test_help_popup_swallows_keys() {
    let mut app = app_with_playback(true, 50);

    app.send_key(Key::Char('?'));
    assert!(app.state().help_visible);

    let requests_before = app.requests().len();
    app.send_keys(&[Key::Char(' '), Key::Char('n'), Key::Char('d')]);
    assert_eq!(app.requests().len(), requests_before);
    app.assert_screen_type(std::mem::discriminant(&Screen::Library(Default::default())));

    app.send_key(Key::Esc);
    assert!(!app.state().help_visible);
}

#[test]
fn test_open_playlist_and_play_from_selection() {
    let mut app = app_with_library();

    // Row 0 is Liked Songs, row 1 the first playlist
    app.send_keys(&[Key::Char('j'), Key::Enter]);
    assert_eq!(
        app.last_request(),
        Some(&DataRequest::PlaylistTracks {
            playlist_id: "p1".to_string()
        })
    );

    app.send_data_event(DataEvent::TracksLoaded {
        source_id: "p1".to_string(),
        tracks: vec![track("t1"), track("t2"), track("t3")],
    });

    app.send_keys(&[Key::Char('j'), Key::Enter]);
    assert_eq!(
        last_player_action(&app),
        &PlayerAction::PlayContext {
            context_uri: "spotify:playlist:p1".to_string(),
            offset: 1,
        }
    );
}

#[test]
fn test_liked_songs_play_as_track_list() {
    let mut app = app_with_library();

    app.send_key(Key::Enter);
    assert_eq!(app.last_request(), Some(&DataRequest::SavedTracks));

    app.send_data_event(DataEvent::TracksLoaded {
        source_id: "liked".to_string(),
        tracks: vec![track("t1"), track("t2")],
    });
    app.send_keys(&[Key::Char('G'), Key::Enter]);

    assert_eq!(
        last_player_action(&app),
        &PlayerAction::PlayTracks {
            uris: vec![
                "spotify:track:t1".to_string(),
                "spotify:track:t2".to_string()
            ],
            offset: 1,
        }
    );
}

#[test]
fn test_late_tracks_for_another_playlist_are_dropped() {
    let mut app = app_with_library();
    app.send_keys(&[Key::Char('j'), Key::Enter]);

    app.send_data_event(DataEvent::TracksLoaded {
        source_id: "p2".to_string(),
        tracks: vec![track("wrong")],
    });

    let Screen::Tracks(tracks) = app.state().current_screen() else {
        panic!("expected tracks screen");
    };
    assert!(tracks.tracks.is_empty());
    assert!(tracks.loading.is_loading());
}

#[test]
fn test_back_returns_to_library() {
    let mut app = app_with_library();
    app.send_key(Key::Enter);
    app.send_key(Key::Char('h'));

    app.assert_screen_type(std::mem::discriminant(&Screen::Library(Default::default())));

    // The root screen can't be popped
    app.send_key(Key::Esc);
    assert_eq!(app.state().history.len(), 1);
}

#[test]
fn test_search_flow() {
    let mut app = app_with_library();

    app.send_key(Key::Char('/'));
    let Screen::Search(search) = app.state().current_screen() else {
        panic!("expected search screen");
    };
    assert_eq!(search.input_mode, InputMode::Search);

    // Playback keys are plain text while typing
    app.type_text("nmq ");
    app.send_key(Key::Backspace);
    app.send_key(Key::Enter);
    assert_eq!(
        app.last_request(),
        Some(&DataRequest::Search {
            query: "nmq".to_string()
        })
    );

    app.send_data_event(DataEvent::SearchResultsLoaded {
        query: "nmq".to_string(),
        results: SearchResults {
            tracks: vec![track("s1"), track("s2")],
            ..Default::default()
        },
    });

    app.send_keys(&[Key::Char('j'), Key::Char('a')]);
    assert_eq!(
        last_player_action(&app),
        &PlayerAction::Queue {
            uri: "spotify:track:s2".to_string(),
            name: "Track s2".to_string(),
        }
    );

    app.send_data_event(DataEvent::PlayerActionCompleted {
        action: PlayerAction::Queue {
            uri: "spotify:track:s2".to_string(),
            name: "Track s2".to_string(),
        },
    });
    assert_eq!(
        app.state().now_playing.notice,
        Some(Notice::Info("Queued Track s2".to_string()))
    );
}

#[test]
fn test_stale_search_results_are_dropped() {
    let mut app = TestApp::new();
    app.send_key(Key::Char('s'));
    app.type_text("new");
    app.send_key(Key::Enter);

    app.send_data_event(DataEvent::SearchResultsLoaded {
        query: "old".to_string(),
        results: SearchResults {
            tracks: vec![track("x")],
            ..Default::default()
        },
    });

    let Screen::Search(search) = app.state().current_screen() else {
        panic!("expected search screen");
    };
    assert!(search.results.is_empty());
}

#[test]
fn test_play_pause_toggles_optimistically() {
    let mut app = app_with_playback(true, 50);

    app.send_key(Key::Char(' '));
    assert!(!app.state().now_playing.is_playing());
    assert_eq!(
        app.last_request(),
        Some(&DataRequest::Player {
            action: PlayerAction::Pause,
            device_id: Some("dev1".to_string()),
        })
    );

    app.send_key(Key::Char(' '));
    assert!(app.state().now_playing.is_playing());
    assert_eq!(last_player_action(&app), &PlayerAction::Resume);
}

#[test]
fn test_mute_restores_previous_volume() {
    let mut app = app_with_playback(true, 65);

    app.send_key(Key::Char('m'));
    assert!(app.state().now_playing.is_muted());
    assert_eq!(last_player_action(&app), &PlayerAction::Volume { percent: 0 });

    app.send_key(Key::Char('m'));
    assert!(!app.state().now_playing.is_muted());
    assert_eq!(app.state().now_playing.volume(), Some(65));
    assert_eq!(last_player_action(&app), &PlayerAction::Volume { percent: 65 });
}

#[test]
fn test_volume_is_clamped() {
    let mut app = app_with_playback(true, 98);

    app.send_key(Key::Char('+'));
    assert_eq!(last_player_action(&app), &PlayerAction::Volume { percent: 100 });

    app.send_key(Key::Char('+'));
    assert_eq!(app.state().now_playing.volume(), Some(100));
}

#[test]
fn test_repeat_cycles_through_states() {
    let mut app = app_with_playback(true, 50);

    for expected in [RepeatState::Context, RepeatState::Track, RepeatState::Off] {
        app.send_key(Key::Char('r'));
        assert_eq!(
            last_player_action(&app),
            &PlayerAction::Repeat { state: expected }
        );
    }
}

#[test]
fn test_seek_stays_within_track() {
    let mut app = app_with_playback(true, 50);

    app.send_key(Key::Left);
    assert_eq!(
        last_player_action(&app),
        &PlayerAction::Seek { position_ms: 55_000 }
    );
    app.send_key(Key::Right);
    app.send_key(Key::Right);
    assert_eq!(app.state().now_playing.progress_ms(), Some(65_000));
}

#[test]
fn test_playback_keys_without_player_do_nothing_local() {
    let mut app = TestApp::new();

    app.send_keys(&[Key::Char('m'), Key::Char('+'), Key::Left, Key::Char('z')]);
    assert!(app.requests().is_empty());
}

#[test]
fn test_failed_player_action_shows_error_until_next_command() {
    let mut app = app_with_playback(true, 50);

    app.send_key(Key::Char('n'));
    app.send_data_event(DataEvent::PlayerActionFailed {
        action: PlayerAction::Next,
        error: "No active device, press d to pick one".to_string(),
    });
    assert!(matches!(
        app.state().now_playing.notice,
        Some(Notice::Error(_))
    ));

    app.send_key(Key::Char('p'));
    assert_eq!(app.state().now_playing.notice, None);
}

#[test]
fn test_transfer_playback_from_devices_screen() {
    let mut app = TestApp::new();

    app.send_key(Key::Char('d'));
    assert_eq!(app.last_request(), Some(&DataRequest::Devices));

    app.send_data_event(DataEvent::DevicesLoaded {
        devices: vec![device("a", true), device("b", false)],
    });
    app.send_keys(&[Key::Char('j'), Key::Enter]);

    assert_eq!(
        app.last_request(),
        Some(&DataRequest::Player {
            action: PlayerAction::Transfer {
                device_id: "b".to_string()
            },
            device_id: None,
        })
    );

    let Screen::Devices(devices) = app.state().current_screen() else {
        panic!("expected devices screen");
    };
    assert!(devices.devices[1].is_active);
    assert!(!devices.devices[0].is_active);
}

#[test]
fn test_load_error_shows_on_waiting_screen() {
    let mut app = TestApp::new();
    app.send_command(spotuify::commands::AppCommand::LoadLibrary {
        force_refresh: false,
    });

    app.send_data_event(DataEvent::LoadError {
        error: "Spotify rejected the access token".to_string(),
    });

    let Screen::Library(library) = app.state().current_screen() else {
        panic!("expected library screen");
    };
    assert_eq!(
        library.loading,
        LoadingState::Error("Spotify rejected the access token".to_string())
    );
}

#[test]
fn test_gg_jumps_to_top() {
    let mut app = app_with_library();
    app.send_key(Key::Char('G'));
    app.send_keys(&[Key::Char('g'), Key::Char('g')]);

    let Screen::Library(library) = app.state().current_screen() else {
        panic!("expected library screen");
    };
    assert_eq!(library.table_state.borrow().selected(), Some(0));
    assert_eq!(app.state().pending_key, None);
}

#[test]
fn test_search_categories_open_what_they_list() {
    let mut app = searched("daft");
    let Screen::Search(search) = app.state().current_screen() else {
        panic!("expected search screen");
    };
    assert_eq!(search.section, SearchSection::Tracks);

    // Tracks -> Albums
    app.send_keys(&[Key::Tab, Key::Enter]);
    assert_eq!(
        app.last_request(),
        Some(&DataRequest::AlbumTracks {
            album_id: "al1".to_string()
        })
    );
    let Screen::Tracks(tracks) = app.state().current_screen() else {
        panic!("expected album tracks");
    };
    assert_eq!(tracks.source.title(), "Album al1");

    // Back on search the category is kept; Albums -> Artists -> Playlists
    app.send_key(Key::Esc);
    app.send_keys(&[Key::Tab, Key::Enter]);
    assert_eq!(
        app.last_request(),
        Some(&DataRequest::Artist {
            artist_id: "a1".to_string()
        })
    );

    app.send_key(Key::Esc);
    app.send_keys(&[Key::Tab, Key::Enter]);
    assert_eq!(
        app.last_request(),
        Some(&DataRequest::PlaylistTracks {
            playlist_id: "p9".to_string()
        })
    );
}

#[test]
fn test_album_plays_in_context() {
    let mut app = searched("daft");
    app.send_keys(&[Key::Tab, Key::Enter]);
    app.send_data_event(DataEvent::TracksLoaded {
        source_id: "al1".to_string(),
        tracks: vec![track("t1"), track("t2")],
    });

    app.send_keys(&[Key::Char('j'), Key::Enter]);
    assert_eq!(
        last_player_action(&app),
        &PlayerAction::PlayContext {
            context_uri: "spotify:album:al1".to_string(),
            offset: 1,
        }
    );
}

#[test]
fn test_artist_screen_from_selected_track() {
    let mut app = app_with_library();
    app.send_key(Key::Enter);
    app.send_data_event(DataEvent::TracksLoaded {
        source_id: "liked".to_string(),
        tracks: vec![track("t1")],
    });

    app.send_key(Key::Char('A'));
    assert_eq!(
        app.last_request(),
        Some(&DataRequest::Artist {
            artist_id: "a1".to_string()
        })
    );

    app.send_data_event(DataEvent::ArtistLoaded {
        artist: Box::new(artist("a1")),
        top_tracks: vec![track("top1"), track("top2")],
        albums: vec![album("al1"), album("al2")],
    });

    app.send_keys(&[Key::Char('j'), Key::Enter]);
    assert_eq!(
        last_player_action(&app),
        &PlayerAction::PlayTracks {
            uris: vec![
                "spotify:track:top1".to_string(),
                "spotify:track:top2".to_string()
            ],
            offset: 1,
        }
    );

    app.send_keys(&[Key::Tab, Key::Char('G'), Key::Enter]);
    assert_eq!(
        app.last_request(),
        Some(&DataRequest::AlbumTracks {
            album_id: "al2".to_string()
        })
    );
}

#[test]
fn test_recently_played_flow() {
    let mut app = app_with_library();
    app.send_key(Key::Char('H'));
    assert_eq!(app.last_request(), Some(&DataRequest::RecentlyPlayed));

    app.send_data_event(DataEvent::TracksLoaded {
        source_id: "recent".to_string(),
        tracks: vec![track("r1"), track("r2")],
    });
    let Screen::Tracks(tracks) = app.state().current_screen() else {
        panic!("expected recently played");
    };
    assert_eq!(tracks.source, TrackSource::RecentlyPlayed);
    assert_eq!(tracks.tracks.len(), 2);

    app.send_key(Key::Enter);
    assert!(matches!(
        last_player_action(&app),
        PlayerAction::PlayTracks { offset: 0, .. }
    ));
}

#[test]
fn test_like_toggle_from_list_and_player() {
    let mut app = app_with_playback(true, 50);

    // Nothing selected on the library: the playing track
    app.send_key(Key::Char('f'));
    assert_eq!(
        app.last_request(),
        Some(&DataRequest::ToggleSaved {
            track_id: "now".to_string(),
            name: "Track now".to_string(),
        })
    );

    app.send_key(Key::Enter);
    app.send_data_event(DataEvent::TracksLoaded {
        source_id: "liked".to_string(),
        tracks: vec![track("t1"), track("t2")],
    });
    app.send_key(Key::Char('f'));
    assert_eq!(
        app.last_request(),
        Some(&DataRequest::ToggleSaved {
            track_id: "t1".to_string(),
            name: "Track t1".to_string(),
        })
    );

    app.send_data_event(DataEvent::SavedToggled {
        track_id: "t1".to_string(),
        name: "Track t1".to_string(),
        saved: false,
    });
    assert_eq!(
        app.state().now_playing.notice,
        Some(Notice::Info("Removed Track t1 from Liked Songs".to_string()))
    );
    let Screen::Tracks(tracks) = app.state().current_screen() else {
        panic!("expected liked songs");
    };
    assert_eq!(tracks.tracks.len(), 1);
}
