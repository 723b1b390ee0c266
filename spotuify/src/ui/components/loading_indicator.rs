use ratatui::{
    layout::{Alignment, Rect},
    text::Span,
    widgets::Paragraph,
    Frame,
};
use throbber_widgets_tui::{Throbber, BRAILLE_EIGHT};

use crate::state::LoadingState;
use crate::ui::theme;

/// What a settled load shows in place of the spinner
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Settled {
    /// A plain check mark
    Check,
    /// A note while music plays, a dot while paused
    Playback { playing: bool },
}

impl Settled {
    fn symbol(self) -> Span<'static> {
        match self {
            Settled::Check => Span::styled("✓", theme::accent_border_style()),
            Settled::Playback { playing: true } => Span::styled("♪", theme::title_style()),
            Settled::Playback { playing: false } => Span::styled("·", theme::dim_style()),
        }
    }
}

/// Render a one-cell indicator: a spinner while loading, `settled` once
/// loaded and a cross on error
pub fn render_loading_indicator(
    f: &mut Frame,
    area: Rect,
    loading_state: &LoadingState,
    settled: Settled,
) {
    let symbol = match loading_state {
        LoadingState::NotStarted => return,
        LoadingState::Loading(throbber_state) => {
            let throbber = Throbber::default()
                .throbber_set(BRAILLE_EIGHT)
                .throbber_style(theme::accent_border_style());
            f.render_stateful_widget(throbber, area, &mut throbber_state.clone());
            return;
        }
        LoadingState::Loaded => settled.symbol(),
        LoadingState::Error(_) => Span::styled("x", theme::error_style()),
    };

    f.render_widget(Paragraph::new(symbol).alignment(Alignment::Right), area);
}
