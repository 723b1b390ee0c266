use std::cell::RefCell;

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Cell, Row, Table, TableState},
};
use spotify_api::endpoints::Track;

use crate::state::{LoadingState, TracksState};
use crate::ui::{
    components::{empty_state, help_bar, screen_title},
    layouts, theme,
};
use crate::utils::formatting::{format_artist_names, format_duration};

const HELP_TEXT: &str = "Enter: play | a: queue | f: like | A: artist | h: back | ?: help";

pub fn render(f: &mut Frame, area: Rect, state: &TracksState) {
    let (title_area, content_area, help_area) = layouts::screen_layout(area);

    screen_title::render_screen_title(f, title_area, state.source.title(), &state.loading);
    render_content(f, content_area, state);
    help_bar::render_help_bar(f, help_area, HELP_TEXT);
}

fn render_content(f: &mut Frame, area: Rect, state: &TracksState) {
    if state.tracks.is_empty() {
        match &state.loading {
            LoadingState::Loading(..) => {
                empty_state::render_loading_state(f, area, "Tracks", "Loading tracks...");
            }
            LoadingState::Error(error) => {
                empty_state::render_error_state(f, area, "Tracks", error, None);
            }
            _ => {
                empty_state::render_empty_state(f, area, "Tracks", "No tracks", None);
            }
        }
        return;
    }

    let title = format!("Tracks ({})", state.tracks.len());
    render_track_table(
        f,
        area,
        &title,
        &state.tracks,
        &state.table_state,
        state.source.shows_album(),
    );
}

/// Numbered track table shared by every track list
pub(super) fn render_track_table(
    f: &mut Frame,
    area: Rect,
    title: &str,
    tracks: &[Track],
    table_state: &RefCell<TableState>,
    show_album: bool,
) {
    let mut header = vec![
        Cell::from(Text::from("#").right_aligned()),
        Cell::from("Title"),
        Cell::from("Artist"),
    ];
    if show_album {
        header.push(Cell::from("Album"));
    }
    header.push(Cell::from(Text::from("Time").right_aligned()));
    let header = Row::new(header).style(theme::header_style()).underlined();

    let rows: Vec<Row> = tracks
        .iter()
        .enumerate()
        .map(|(i, track)| {
            let title = if track.explicit {
                format!("{} [E]", track.name)
            } else {
                track.name.clone()
            };

            let mut cells = vec![
                Cell::from(Text::from((i + 1).to_string()).right_aligned())
                    .style(theme::dim_style()),
                Cell::from(title),
                Cell::from(format_artist_names(&track.artists)),
            ];
            if show_album {
                cells.push(
                    Cell::from(
                        track
                            .album
                            .as_ref()
                            .map(|album| album.name.clone())
                            .unwrap_or_default(),
                    )
                    .style(theme::help_text_style()),
                );
            }
            cells.push(Cell::from(
                Text::from(format_duration(Some(track.duration_ms))).right_aligned(),
            ));
            Row::new(cells)
        })
        .collect();

    let widths = if show_album {
        vec![
            Constraint::Length(4),
            Constraint::Percentage(40),
            Constraint::Percentage(25),
            Constraint::Percentage(25),
            Constraint::Length(6),
        ]
    } else {
        vec![
            Constraint::Length(4),
            Constraint::Percentage(55),
            Constraint::Percentage(35),
            Constraint::Length(6),
        ]
    };

    let table = Table::new(rows, widths)
    .header(header)
    .column_spacing(theme::TABLE_COLUMN_SPACING)
    .block(Block::default().borders(Borders::ALL).title(title.to_string()))
    .row_highlight_style(theme::selection_style());

    f.render_stateful_widget(table, area, &mut table_state.borrow_mut());
}
