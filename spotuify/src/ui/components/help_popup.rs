use ratatui::{
    prelude::*,
    widgets::{List, ListItem},
    Frame,
};

use crate::ui::{layouts, screens::Screen, theme};

pub fn render_help_popup(f: &mut Frame, screen: &Screen) {
    let help_items = get_help_items(screen);

    let inner = super::popup::render_popup_frame(
        f,
        f.area(),
        layouts::popup_sizes::LARGE,
        " Help ",
        Some(" ?/Esc: close "),
    );

    let items: Vec<ListItem> = help_items
        .iter()
        .map(|(key, description)| {
            ListItem::new(Line::from(vec![
                Span::styled(format!("{:15}", key), theme::header_style()),
                Span::raw(*description),
            ]))
        })
        .collect();

    let list = List::new(items).style(Style::default().fg(Color::White));

    f.render_widget(list, inner);
}

fn get_help_items(screen: &Screen) -> Vec<(&'static str, &'static str)> {
    let mut items = vec![];

    match screen {
        Screen::Library(..) => {
            items.push(("↑/k ↓/j", "Move selection"));
            items.push(("Enter", "Open playlist or Liked Songs"));
            items.push(("R", "Reload playlists"));
        }
        Screen::Tracks(..) => {
            items.push(("↑/k ↓/j", "Move selection"));
            items.push(("Enter", "Play from selected track"));
            items.push(("a", "Add selected track to queue"));
            items.push(("A", "Open the track's artist"));
        }
        Screen::Search(..) => {
            items.push(("/ or s", "Edit the search query"));
            items.push(("Enter", "Search (while typing) or open selection"));
            items.push(("Esc/Tab/↓", "Stop typing and browse results"));
            items.push(("Tab", "Next category: tracks, albums, artists, playlists"));
            items.push(("Ctrl+U", "Clear the query"));
            items.push(("a", "Add selected track to queue"));
            items.push(("A", "Open the track's artist"));
        }
        Screen::Artist(..) => {
            items.push(("↑/k ↓/j", "Move selection"));
            items.push(("Tab", "Switch between top tracks and releases"));
            items.push(("Enter", "Play from top track or open release"));
            items.push(("a", "Add selected track to queue"));
        }
        Screen::Devices(..) => {
            items.push(("↑/k ↓/j", "Move selection"));
            items.push(("Enter", "Transfer playback to selected device"));
            items.push(("R", "Reload devices"));
        }
        Screen::Logs(..) => {
            items.push(("↑/k", "Scroll up (older logs)"));
            items.push(("↓/j", "Scroll down (newer logs)"));
            items.push(("Page Up", "Scroll up one page"));
            items.push(("Page Down", "Scroll down one page"));
            items.push(("g then g", "Scroll to oldest logs"));
            items.push(("G", "Scroll to newest logs"));
        }
    }

    items.push(("", ""));
    items.push(("--- Playback ---", ""));
    items.push(("space", "Play/pause"));
    items.push(("n / p", "Next / previous track"));
    items.push(("←/→", "Seek 5 seconds"));
    items.push(("+ / -", "Volume up / down"));
    items.push(("m", "Mute / unmute"));
    items.push(("z", "Toggle shuffle"));
    items.push(("r", "Cycle repeat (off, context, track)"));
    items.push(("R", "Refresh playback status"));
    items.push(("f", "Like / unlike selected or playing track"));

    items.push(("", ""));
    items.push(("--- Global ---", ""));
    items.push(("h/Esc", "Navigate back"));
    items.push(("l", "Library"));
    items.push(("/ or s", "Search"));
    items.push(("H", "Recently played"));
    items.push(("d", "Devices"));
    items.push(("L", "Logs"));
    items.push(("g then g", "Navigate to top of list"));
    items.push(("G", "Navigate to bottom of list"));
    items.push(("?", "Toggle this help"));
    items.push(("q", "Quit application"));

    items
}
