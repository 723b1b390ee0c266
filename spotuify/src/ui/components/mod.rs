pub mod empty_state;
pub mod help_bar;
pub mod help_popup;
pub mod loading_indicator;
pub mod now_playing;
pub mod popup;
pub mod screen_title;
pub mod search_input;
