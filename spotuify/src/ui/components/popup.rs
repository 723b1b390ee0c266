//! Centered modal frame shared by overlays.

use ratatui::prelude::Rect;
use ratatui::{
    layout::Alignment,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear},
    Frame,
};

use crate::ui::{layouts, theme};

/// Clear a centered area, draw the accent frame around it and return the
/// inner area for the content.
///
/// `size` is (width_percent, height_percent) of `parent_area`. The optional
/// `hint` sits on the bottom border, right-aligned.
pub fn render_popup_frame(
    f: &mut Frame,
    parent_area: Rect,
    size: (u16, u16),
    title: &str,
    hint: Option<&str>,
) -> Rect {
    let area = layouts::centered_popup(size.0, size.1, parent_area);
    f.render_widget(Clear, area);

    let mut block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(theme::accent_border_style())
        .title(Line::from(Span::styled(title, theme::title_style())).alignment(Alignment::Center));
    if let Some(hint) = hint {
        block = block.title_bottom(
            Line::from(Span::styled(hint, theme::help_text_style())).alignment(Alignment::Right),
        );
    }

    let inner = block.inner(area);
    f.render_widget(block, area);
    inner
}
