use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
};

use crate::state::{ArtistPane, ArtistState, LoadingState};
use crate::ui::{
    components::{empty_state, help_bar, screen_title},
    layouts, theme,
};
use crate::utils::formatting::{format_duration, format_play_count, truncate_text};

const HELP_TEXT: &str = "Enter: play/open | Tab: switch pane | a: queue | f: like | h: back | ?: help";

pub fn render(f: &mut Frame, area: Rect, state: &ArtistState) {
    let (title_area, content_area, help_area) = layouts::screen_layout(area);

    screen_title::render_screen_title(f, title_area, &state.name, &state.loading);
    render_content(f, content_area, state);
    help_bar::render_help_bar(f, help_area, HELP_TEXT);
}

fn render_content(f: &mut Frame, area: Rect, state: &ArtistState) {
    if state.artist.is_none() {
        match &state.loading {
            LoadingState::Error(error) => {
                empty_state::render_error_state(f, area, "Artist", error, None);
            }
            _ => {
                empty_state::render_loading_state(f, area, "Artist", "Loading artist...");
            }
        }
        return;
    }

    let [info_area, lists_area] =
        Layout::vertical([Constraint::Length(1), Constraint::Min(3)]).areas(area);
    render_info(f, info_area, state);

    let [tracks_area, albums_area] =
        Layout::horizontal([Constraint::Percentage(55), Constraint::Percentage(45)])
            .areas(lists_area);
    render_top_tracks(f, tracks_area, state);
    render_albums(f, albums_area, state);
}

/// `12.3K followers · shoegaze, dream pop`
fn render_info(f: &mut Frame, area: Rect, state: &ArtistState) {
    let Some(artist) = &state.artist else {
        return;
    };

    let mut spans = vec![Span::styled(
        format!(
            "{} followers",
            format_play_count(Some(u64::from(artist.follower_count())))
        ),
        theme::title_style(),
    )];
    if !artist.genres.is_empty() {
        spans.push(Span::styled(" · ", theme::dim_style()));
        spans.push(Span::styled(
            artist.genres.join(", "),
            theme::help_text_style(),
        ));
    }

    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn pane_block(title: String, focused: bool) -> Block<'static> {
    let border = if focused {
        theme::accent_border_style()
    } else {
        theme::dim_style()
    };
    Block::default()
        .borders(Borders::ALL)
        .border_style(border)
        .title(title)
}

fn render_top_tracks(f: &mut Frame, area: Rect, state: &ArtistState) {
    let focused = state.pane == ArtistPane::TopTracks;
    let rows: Vec<Row> = state
        .top_tracks
        .iter()
        .enumerate()
        .map(|(i, track)| {
            Row::new(vec![
                Cell::from(Text::from((i + 1).to_string()).right_aligned())
                    .style(theme::dim_style()),
                Cell::from(track.name.clone()),
                Cell::from(Text::from(format_duration(Some(track.duration_ms))).right_aligned()),
            ])
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Length(3),
            Constraint::Min(10),
            Constraint::Length(6),
        ],
    )
    .column_spacing(theme::TABLE_COLUMN_SPACING)
    .block(pane_block(
        format!("Top Tracks ({})", state.top_tracks.len()),
        focused,
    ))
    .row_highlight_style(if focused {
        theme::selection_style()
    } else {
        Style::default()
    });

    f.render_stateful_widget(table, area, &mut state.tracks_table.borrow_mut());
}

fn render_albums(f: &mut Frame, area: Rect, state: &ArtistState) {
    let focused = state.pane == ArtistPane::Albums;
    let rows: Vec<Row> = state
        .albums
        .iter()
        .map(|album| {
            Row::new(vec![
                Cell::from(truncate_text(&album.name, 40, "...")),
                Cell::from(album.album_type.clone().unwrap_or_default())
                    .style(theme::help_text_style()),
                Cell::from(album.release_year().unwrap_or_default().to_string())
                    .style(theme::dim_style()),
            ])
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Min(10),
            Constraint::Length(11),
            Constraint::Length(4),
        ],
    )
    .column_spacing(theme::TABLE_COLUMN_SPACING)
    .block(pane_block(
        format!("Releases ({})", state.albums.len()),
        focused,
    ))
    .row_highlight_style(if focused {
        theme::selection_style()
    } else {
        Style::default()
    });

    f.render_stateful_widget(table, area, &mut state.albums_table.borrow_mut());
}
