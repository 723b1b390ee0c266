use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Cell, Row, Table},
};

use crate::state::{LibraryState, LoadingState};
use crate::ui::{
    components::{empty_state, help_bar, screen_title},
    layouts, theme,
};
use crate::utils::formatting::{format_play_count, truncate_text};
use spotify_api::endpoints::user::CurrentUser;

pub fn render(f: &mut Frame, area: Rect, state: &LibraryState, user: Option<&CurrentUser>) {
    let (title_area, content_area, help_area) = layouts::screen_layout(area);

    let title = match user {
        Some(user) => format!("Library - {}", user.name()),
        None => "Library".to_string(),
    };
    screen_title::render_screen_title(f, title_area, &title, &state.loading);
    render_content(f, content_area, state);
    help_bar::render_help_bar(f, help_area, help_bar::HELP_TEXT_DEFAULT);
}

fn render_content(f: &mut Frame, area: Rect, state: &LibraryState) {
    if state.playlists.is_empty() {
        match &state.loading {
            LoadingState::Loading(..) => {
                empty_state::render_loading_state(f, area, "Playlists", "Loading playlists...");
                return;
            }
            LoadingState::Error(error) => {
                empty_state::render_error_state(f, area, "Playlists", error, Some("Press R to retry"));
                return;
            }
            _ => {}
        }
    }

    let header = Row::new(vec![
        Cell::from("Name"),
        Cell::from("Owner"),
        Cell::from(Text::from("Tracks").right_aligned()),
    ])
    .style(theme::header_style())
    .underlined();

    // Liked Songs is always the first row
    let mut rows = vec![Row::new(vec![
        Cell::from("♥ Liked Songs").style(theme::title_style()),
        Cell::from(""),
        Cell::from(""),
    ])];

    rows.extend(state.playlists.iter().map(|playlist| {
        Row::new(vec![
            Cell::from(truncate_text(&playlist.name, 50, "...")),
            Cell::from(playlist.owner_name().to_string()).style(theme::help_text_style()),
            Cell::from(
                Text::from(format_play_count(Some(u64::from(playlist.track_count()))))
                    .right_aligned(),
            ),
        ])
    }));

    let table = Table::new(
        rows,
        [
            Constraint::Percentage(55),
            Constraint::Percentage(30),
            Constraint::Percentage(15),
        ],
    )
    .header(header)
    .column_spacing(theme::TABLE_COLUMN_SPACING)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!("Playlists ({})", state.playlists.len())),
    )
    .row_highlight_style(theme::selection_style());

    f.render_stateful_widget(table, area, &mut state.table_state.borrow_mut());
}
