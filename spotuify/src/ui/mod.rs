pub mod components;
pub mod layouts;
pub mod screens;
pub mod theme;

use crate::log_buffer::LogBuffer;
use crate::state::AppState;
use ratatui::Frame;
use screens::*;

/// Pure render dispatcher: the current screen on top, the player bar below
/// and the help popup over both. Never mutates state.
pub fn render_app(f: &mut Frame, state: &AppState, log_buffer: &LogBuffer) {
    let (screen_area, player_area) = layouts::app_layout(f.area());

    match state.current_screen() {
        Screen::Library(library_state) => {
            library_screen::render(f, screen_area, library_state, state.user.as_ref());
        }
        Screen::Tracks(tracks_state) => {
            tracks_screen::render(f, screen_area, tracks_state);
        }
        Screen::Search(search_state) => {
            search_screen::render(f, screen_area, search_state);
        }
        Screen::Artist(artist_state) => {
            artist_screen::render(f, screen_area, artist_state);
        }
        Screen::Devices(devices_state) => {
            devices_screen::render(f, screen_area, devices_state);
        }
        Screen::Logs(logs_state) => {
            logs_screen::render(f, screen_area, logs_state, log_buffer);
        }
    }

    components::now_playing::render_now_playing(f, player_area, &state.now_playing);

    if state.help_visible {
        components::help_popup::render_help_popup(f, state.current_screen());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::DataEvent;
    use crate::state::reducer::reduce_data_event;
    use ratatui::{backend::TestBackend, Terminal};
    use spotify_api::endpoints::playlists::SimplifiedPlaylist;

    fn screen_text(terminal: &Terminal<TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    fn playlist(name: &str) -> SimplifiedPlaylist {
        serde_json::from_value(serde_json::json!({
            "id": "p1",
            "name": name,
            "uri": "spotify:playlist:p1",
            "owner": { "id": "owner", "display_name": "Owner" },
            "tracks": { "total": 12 }
        }))
        .unwrap()
    }

    #[test]
    fn test_renders_library_and_player_bar() {
        let mut state = AppState::new();
        reduce_data_event(
            &mut state,
            DataEvent::PlaylistsLoaded {
                playlists: vec![playlist("Road Trip")],
            },
        );

        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal
            .draw(|f| render_app(f, &state, &LogBuffer::new(10)))
            .unwrap();

        let text = screen_text(&terminal);
        assert!(text.contains("Liked Songs"));
        assert!(text.contains("Road Trip"));
        assert!(text.contains("No track playing"));
    }

    #[test]
    fn test_search_shows_category_tabs() {
        use crate::state::{SearchResults, SearchSection, SearchState};

        let mut search = SearchState {
            submitted_query: Some("road".to_string()),
            results: SearchResults {
                playlists: vec![playlist("Road Trip")],
                ..Default::default()
            },
            ..Default::default()
        };
        search.show_section(SearchSection::Playlists);

        let mut state = AppState::new();
        state.navigate_to(Screen::Search(search));

        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal
            .draw(|f| render_app(f, &state, &LogBuffer::new(10)))
            .unwrap();

        let text = screen_text(&terminal);
        assert!(text.contains("Tracks (0)"));
        assert!(text.contains("Playlists (1)"));
        assert!(text.contains("Road Trip"));
    }

    #[test]
    fn test_help_popup_renders_on_top() {
        let mut state = AppState::new();
        state.help_visible = true;

        let mut terminal = Terminal::new(TestBackend::new(100, 40)).unwrap();
        terminal
            .draw(|f| render_app(f, &state, &LogBuffer::new(10)))
            .unwrap();

        assert!(screen_text(&terminal).contains("Toggle this help"));
    }
}
