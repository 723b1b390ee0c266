use ratatui::prelude::Rect;
use ratatui::{
    layout::Position,
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::ui::theme;

/// Render the search box. While `focused`, the terminal cursor sits after
/// the query.
pub fn render_search_input(f: &mut Frame, area: Rect, query: &str, focused: bool) {
    let (title, style, border_style) = if focused {
        (
            "Search (Enter: search, Esc: done, Ctrl+U: clear)",
            theme::loading_style(),
            theme::accent_border_style(),
        )
    } else {
        ("Search (/ to edit)", theme::help_text_style(), theme::dim_style())
    };

    let input = Paragraph::new(query).style(style).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(title),
    );

    f.render_widget(input, area);

    if focused {
        let width = query.chars().count() as u16;
        let x = (area.x + 1 + width).min(area.right().saturating_sub(2));
        f.set_cursor_position(Position::new(x, area.y + 1));
    }
}
