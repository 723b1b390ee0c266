//! Colors, layout constants and shared styles.
//!
//! Screens and components take their styling from here rather than
//! picking colors inline.

use ratatui::style::{Color, Modifier, Style};

// =============================================================================
// Colors
// =============================================================================

/// Spotify brand green, used for the accent and the progress bar
pub const COLOR_ACCENT: Color = Color::Rgb(29, 185, 84);

/// Background color for selected/highlighted rows
pub const COLOR_SELECTION_BG: Color = Color::DarkGray;

/// Color for table headers
pub const COLOR_HEADER: Color = Color::Yellow;

/// Color for help text and secondary information
pub const COLOR_HELP_TEXT: Color = Color::Gray;

/// Color for dimmed text (paused state, muted volume, missing values)
pub const COLOR_DIM: Color = Color::DarkGray;

/// Color for loading/status messages
pub const COLOR_LOADING: Color = Color::Yellow;

/// Color for error notices
pub const COLOR_ERROR: Color = Color::Red;

/// Border color for informational popups
pub const COLOR_BORDER_INFO: Color = Color::Blue;

/// Color for input fields when focused
pub const COLOR_INPUT_FOCUSED: Color = Color::Yellow;

// =============================================================================
// Layout Constants
// =============================================================================

/// Standard margin around screen content
pub const SCREEN_MARGIN: u16 = 1;

/// Height of the title/header area
pub const TITLE_HEIGHT: u16 = 1;

/// Height of the help bar at the bottom of a screen
pub const HELP_BAR_HEIGHT: u16 = 3;

/// Height of the search input box
pub const SEARCH_INPUT_HEIGHT: u16 = 3;

/// Height of the now playing bar below every screen
pub const PLAYER_BAR_HEIGHT: u16 = 5;

/// Standard column spacing for tables
pub const TABLE_COLUMN_SPACING: u16 = 2;

// =============================================================================
// Style Functions
// =============================================================================

/// Style for selected/highlighted rows in tables and lists
pub fn selection_style() -> Style {
    Style::default()
        .bg(COLOR_SELECTION_BG)
        .add_modifier(Modifier::BOLD)
}

/// Style for table headers
pub fn header_style() -> Style {
    Style::default()
        .fg(COLOR_HEADER)
        .add_modifier(Modifier::BOLD)
}

/// Style for help bar text
pub fn help_text_style() -> Style {
    Style::default().fg(COLOR_HELP_TEXT)
}

/// Style for screen titles
pub fn title_style() -> Style {
    Style::default()
        .fg(COLOR_ACCENT)
        .add_modifier(Modifier::BOLD)
}

/// Style for loading/status messages
pub fn loading_style() -> Style {
    Style::default().fg(COLOR_LOADING)
}

pub fn dim_style() -> Style {
    Style::default().fg(COLOR_DIM)
}

pub fn error_style() -> Style {
    Style::default().fg(COLOR_ERROR)
}

/// Style for info borders
pub fn info_border_style() -> Style {
    Style::default()
        .fg(COLOR_BORDER_INFO)
        .add_modifier(Modifier::BOLD)
}

/// Style for accent borders
pub fn accent_border_style() -> Style {
    Style::default().fg(COLOR_ACCENT)
}
