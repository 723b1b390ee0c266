use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Cell, Row, Table},
};

use crate::state::{DevicesState, LoadingState};
use crate::ui::{
    components::{empty_state, help_bar, screen_title},
    layouts, theme,
};

const HELP_TEXT: &str = "Enter: transfer playback | R: reload | h: back | ?: help";

pub fn render(f: &mut Frame, area: Rect, state: &DevicesState) {
    let (title_area, content_area, help_area) = layouts::screen_layout(area);

    screen_title::render_screen_title(f, title_area, "Devices", &state.loading);
    render_content(f, content_area, state);
    help_bar::render_help_bar(f, help_area, HELP_TEXT);
}

fn render_content(f: &mut Frame, area: Rect, state: &DevicesState) {
    if state.devices.is_empty() {
        match &state.loading {
            LoadingState::Loading(..) => {
                empty_state::render_loading_state(f, area, "Devices", "Looking for devices...");
            }
            LoadingState::Error(error) => {
                empty_state::render_error_state(f, area, "Devices", error, Some("Press R to retry"));
            }
            _ => {
                empty_state::render_empty_state(
                    f,
                    area,
                    "Devices",
                    "No devices found",
                    Some("Open Spotify on a phone, desktop or speaker, then press R"),
                );
            }
        }
        return;
    }

    let header = Row::new(vec![
        Cell::from(""),
        Cell::from("Name"),
        Cell::from("Type"),
        Cell::from(Text::from("Volume").right_aligned()),
    ])
    .style(theme::header_style())
    .underlined();

    let rows: Vec<Row> = state
        .devices
        .iter()
        .map(|device| {
            let marker = if device.is_active { "▶" } else { "" };
            let volume = device
                .volume_percent
                .map(|v| format!("{}%", v))
                .unwrap_or_else(|| "--".to_string());

            // Restricted devices can't be controlled through the Web API
            let style = if device.is_restricted || device.id.is_none() {
                theme::dim_style()
            } else if device.is_active {
                theme::title_style()
            } else {
                Style::default()
            };

            Row::new(vec![
                Cell::from(marker),
                Cell::from(device.name.clone()),
                Cell::from(device.device_type.clone()),
                Cell::from(Text::from(volume).right_aligned()),
            ])
            .style(style)
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Length(2),
            Constraint::Percentage(50),
            Constraint::Percentage(30),
            Constraint::Length(8),
        ],
    )
    .header(header)
    .column_spacing(theme::TABLE_COLUMN_SPACING)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!("Devices ({})", state.devices.len())),
    )
    .row_highlight_style(theme::selection_style());

    f.render_stateful_widget(table, area, &mut state.table_state.borrow_mut());
}
