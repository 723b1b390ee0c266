use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Cell, Row, Table, Tabs},
};

use crate::state::{InputMode, LoadingState, SearchSection, SearchState};
use crate::ui::{
    components::{empty_state, help_bar, screen_title, search_input},
    layouts, theme,
};
use crate::utils::formatting::{format_artist_names, format_play_count, truncate_text};

use super::tracks_screen::render_track_table;

pub fn render(f: &mut Frame, area: Rect, state: &SearchState) {
    let (title_area, input_area, content_area, help_area) = layouts::screen_layout_with_input(area);
    let editing = state.input_mode == InputMode::Search;

    screen_title::render_screen_title(f, title_area, "Search", &state.loading);
    search_input::render_search_input(f, input_area, &state.query, editing);
    render_content(f, content_area, state);

    let help_text = if editing {
        "Enter: search | Esc/Tab: browse results | Ctrl+U: clear"
    } else {
        "Enter: open/play | Tab: next category | a: queue | f: like | /: edit query | ?: help"
    };
    help_bar::render_help_bar(f, help_area, help_text);
}

fn render_content(f: &mut Frame, area: Rect, state: &SearchState) {
    if state.results.is_empty() {
        match (&state.loading, state.submitted_query.as_deref()) {
            (LoadingState::Loading(..), Some(query)) => {
                let message = format!("Searching for \"{}\"...", query);
                empty_state::render_loading_state(f, area, "Results", &message);
            }
            (LoadingState::Error(error), _) => {
                empty_state::render_error_state(f, area, "Results", error, None);
            }
            (_, Some(query)) => {
                let message = format!("Nothing found for \"{}\"", query);
                empty_state::render_empty_state(f, area, "Results", &message, None);
            }
            (_, None) => {
                empty_state::render_empty_state(
                    f,
                    area,
                    "Results",
                    "Type a query and press Enter",
                    None,
                );
            }
        }
        return;
    }

    let [tabs_area, table_area] =
        Layout::vertical([Constraint::Length(1), Constraint::Min(3)]).areas(area);
    render_tabs(f, tabs_area, state);

    let count = state.results.len(state.section);
    let title = match state.submitted_query.as_deref() {
        Some(query) => format!("{} for \"{}\" ({})", state.section.title(), query, count),
        None => format!("{} ({})", state.section.title(), count),
    };

    if count == 0 {
        let message = format!("No {} found", state.section.title().to_lowercase());
        let hint = Some("Tab: next category");
        empty_state::render_empty_state(f, table_area, &title, &message, hint);
        return;
    }

    match state.section {
        SearchSection::Tracks => render_track_table(
            f,
            table_area,
            &title,
            &state.results.tracks,
            &state.table_state,
            true,
        ),
        SearchSection::Albums => render_albums(f, table_area, &title, state),
        SearchSection::Artists => render_artists(f, table_area, &title, state),
        SearchSection::Playlists => render_playlists(f, table_area, &title, state),
    }
}

fn render_tabs(f: &mut Frame, area: Rect, state: &SearchState) {
    let titles = SearchSection::ALL
        .iter()
        .map(|section| format!(" {} ({}) ", section.title(), state.results.len(*section)));
    let selected = SearchSection::ALL
        .iter()
        .position(|section| *section == state.section);

    let tabs = Tabs::new(titles)
        .select(selected)
        .style(theme::dim_style())
        .highlight_style(theme::title_style())
        .divider("|");

    f.render_widget(tabs, area);
}

fn results_table<'a>(
    rows: Vec<Row<'a>>,
    header: Row<'a>,
    widths: &[Constraint],
    title: &str,
) -> Table<'a> {
    Table::new(rows, widths.to_vec())
        .header(header.style(theme::header_style()).underlined())
        .column_spacing(theme::TABLE_COLUMN_SPACING)
        .block(Block::default().borders(Borders::ALL).title(title.to_string()))
        .row_highlight_style(theme::selection_style())
}

fn render_albums(f: &mut Frame, area: Rect, title: &str, state: &SearchState) {
    let header = Row::new(vec!["Album", "Artist", "Year"]);
    let rows = state
        .results
        .albums
        .iter()
        .map(|album| {
            Row::new(vec![
                Cell::from(truncate_text(&album.name, 60, "...")),
                Cell::from(format_artist_names(&album.artists)),
                Cell::from(album.release_year().unwrap_or_default().to_string())
                    .style(theme::dim_style()),
            ])
        })
        .collect();

    let widths = [
        Constraint::Percentage(55),
        Constraint::Percentage(35),
        Constraint::Length(6),
    ];
    let table = results_table(rows, header, &widths, title);
    f.render_stateful_widget(table, area, &mut state.table_state.borrow_mut());
}

fn render_artists(f: &mut Frame, area: Rect, title: &str, state: &SearchState) {
    let header = Row::new(vec![
        Cell::from("Artist"),
        Cell::from("Genres"),
        Cell::from(Text::from("Followers").right_aligned()),
    ]);
    let rows = state
        .results
        .artists
        .iter()
        .map(|artist| {
            Row::new(vec![
                Cell::from(artist.name.clone()),
                Cell::from(artist.genres.join(", ")).style(theme::help_text_style()),
                Cell::from(
                    Text::from(format_play_count(Some(u64::from(artist.follower_count()))))
                        .right_aligned(),
                ),
            ])
        })
        .collect();

    let widths = [
        Constraint::Percentage(40),
        Constraint::Percentage(45),
        Constraint::Percentage(15),
    ];
    let table = results_table(rows, header, &widths, title);
    f.render_stateful_widget(table, area, &mut state.table_state.borrow_mut());
}

fn render_playlists(f: &mut Frame, area: Rect, title: &str, state: &SearchState) {
    let header = Row::new(vec![
        Cell::from("Playlist"),
        Cell::from("Owner"),
        Cell::from(Text::from("Tracks").right_aligned()),
    ]);
    let rows = state
        .results
        .playlists
        .iter()
        .map(|playlist| {
            Row::new(vec![
                Cell::from(truncate_text(&playlist.name, 50, "...")),
                Cell::from(playlist.owner_name().to_string()).style(theme::help_text_style()),
                Cell::from(
                    Text::from(format_play_count(Some(u64::from(playlist.track_count()))))
                        .right_aligned(),
                ),
            ])
        })
        .collect();

    let widths = [
        Constraint::Percentage(55),
        Constraint::Percentage(30),
        Constraint::Percentage(15),
    ];
    let table = results_table(rows, header, &widths, title);
    f.render_stateful_widget(table, area, &mut state.table_state.borrow_mut());
}
