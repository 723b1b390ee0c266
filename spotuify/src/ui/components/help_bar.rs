//! Bottom key hint bar.

use ratatui::prelude::Rect;
use ratatui::{
    layout::Alignment,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::ui::theme;

/// Hint text shared by the screens without keys of their own
pub const HELP_TEXT_DEFAULT: &str =
    "space: play/pause | n/p: next/prev | /: search | H: recent | d: devices | ?: help";

/// Render `key: action | key: action` hints with the keys in the accent color
pub fn render_help_bar(f: &mut Frame, area: Rect, text: &str) {
    let help = Paragraph::new(hint_line(text))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme::dim_style()),
        );

    f.render_widget(help, area);
}

fn hint_line(text: &str) -> Line<'_> {
    let mut spans = Vec::new();
    for (i, hint) in text.split(" | ").enumerate() {
        if i > 0 {
            spans.push(Span::styled("  ", theme::help_text_style()));
        }
        match hint.split_once(": ") {
            Some((key, action)) => {
                spans.push(Span::styled(key, theme::title_style()));
                spans.push(Span::styled(format!(" {}", action), theme::help_text_style()));
            }
            None => spans.push(Span::styled(hint, theme::help_text_style())),
        }
    }
    Line::from(spans)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keys_take_accent() {
        let line = hint_line("enter: play | q: back");
        let texts: Vec<&str> = line.spans.iter().map(|s| s.content.as_ref()).collect();
        assert_eq!(texts, vec!["enter", " play", "  ", "q", " back"]);
        assert_eq!(line.spans[0].style, theme::title_style());
        assert_eq!(line.spans[1].style, theme::help_text_style());
    }

    #[test]
    fn test_plain_text_passes_through() {
        let line = hint_line("Loading...");
        assert_eq!(line.spans.len(), 1);
        assert_eq!(line.spans[0].content, "Loading...");
    }
}
