//! Player bar shown below every screen.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, LineGauge, Paragraph},
    Frame,
};
use spotify_api::endpoints::player::RepeatState;

use crate::state::{Notice, NowPlaying};
use crate::ui::components::loading_indicator::{self, Settled};
use crate::ui::{layouts, theme};
use crate::utils::formatting::{format_artist_names, format_duration, truncate_text};

const MAX_TITLE_LEN: usize = 60;

pub fn render_now_playing(f: &mut Frame, area: Rect, now_playing: &NowPlaying) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::accent_border_style())
        .title(" Now Playing ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(inner);

    render_track_line(f, rows[0], now_playing);
    render_progress(f, rows[1], now_playing);
    render_status_line(f, rows[2], now_playing);
}

fn render_track_line(f: &mut Frame, area: Rect, now_playing: &NowPlaying) {
    let (text_area, indicator_area) = layouts::title_with_loading(area);

    let line = match now_playing.track() {
        Some(track) => {
            let icon = if now_playing.is_playing() { "▶" } else { "⏸" };
            let mut spans = vec![
                Span::styled(format!("{} ", icon), theme::title_style()),
                Span::styled(
                    truncate_text(&track.name, MAX_TITLE_LEN, "..."),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
            ];
            if !track.artists.is_empty() {
                spans.push(Span::styled(
                    format!("  {}", format_artist_names(&track.artists)),
                    theme::help_text_style(),
                ));
            }
            Line::from(spans)
        }
        None => Line::from(Span::styled("No track playing", theme::dim_style())),
    };

    f.render_widget(Paragraph::new(line), text_area);
    loading_indicator::render_loading_indicator(
        f,
        indicator_area,
        &now_playing.loading,
        Settled::Playback {
            playing: now_playing.is_playing(),
        },
    );
}

fn render_progress(f: &mut Frame, area: Rect, now_playing: &NowPlaying) {
    let label = format!(
        "{} / {}",
        format_duration(now_playing.progress_ms()),
        format_duration(now_playing.duration_ms())
    );

    let gauge = LineGauge::default()
        .filled_style(Style::default().fg(theme::COLOR_ACCENT))
        .unfilled_style(theme::dim_style())
        .label(label)
        .ratio(now_playing.ratio());

    f.render_widget(gauge, area);
}

fn render_status_line(f: &mut Frame, area: Rect, now_playing: &NowPlaying) {
    let mut spans = Vec::new();

    let volume = match (now_playing.is_muted(), now_playing.volume()) {
        (true, _) => Span::styled("Vol: muted", theme::dim_style()),
        (false, Some(volume)) => Span::raw(format!("Vol: {}%", volume)),
        (false, None) => Span::styled("Vol: --", theme::dim_style()),
    };
    spans.push(volume);

    if let Some(playback) = now_playing.playback.as_ref() {
        spans.push(Span::raw("  "));
        spans.push(toggle_span("Shuffle", playback.shuffle_state));
        spans.push(Span::raw("  "));
        spans.push(match playback.repeat_state {
            RepeatState::Off => Span::styled("Repeat: off", theme::dim_style()),
            RepeatState::Context => Span::styled("Repeat: all", theme::title_style()),
            RepeatState::Track => Span::styled("Repeat: one", theme::title_style()),
        });
    }

    if let Some(device) = now_playing.device() {
        spans.push(Span::styled(
            format!("  on {}", device.name),
            theme::help_text_style(),
        ));
    }

    match &now_playing.notice {
        Some(Notice::Info(message)) => {
            spans.push(Span::styled(format!("  {}", message), theme::loading_style()));
        }
        Some(Notice::Error(message)) => {
            spans.push(Span::styled(format!("  {}", message), theme::error_style()));
        }
        None => {}
    }

    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn toggle_span(label: &str, enabled: bool) -> Span<'static> {
    if enabled {
        Span::styled(format!("{}: on", label), theme::title_style())
    } else {
        Span::styled(format!("{}: off", label), theme::dim_style())
    }
}
