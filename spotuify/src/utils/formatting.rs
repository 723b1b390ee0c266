use spotify_api::endpoints::{SimplifiedArtist, Track};

/// Format milliseconds as `m:ss`, or `--:--` when unknown
pub fn format_duration(ms: Option<u64>) -> String {
    match ms {
        Some(ms) => {
            let total_seconds = ms / 1000;
            format!("{}:{:02}", total_seconds / 60, total_seconds % 60)
        }
        None => "--:--".to_string(),
    }
}

/// Comma-separated artist names
pub fn format_artist_names(artists: &[SimplifiedArtist]) -> String {
    artists
        .iter()
        .map(|artist| artist.name.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

/// `Name - Artist, Artist` for the now playing line
pub fn format_track_info(track: Option<&Track>) -> String {
    match track {
        Some(track) if track.artists.is_empty() => track.name.clone(),
        Some(track) => format!("{} - {}", track.name, format_artist_names(&track.artists)),
        None => "No track playing".to_string(),
    }
}

/// Cut `text` to at most `max_len` characters, ending in `suffix` when cut
pub fn truncate_text(text: &str, max_len: usize, suffix: &str) -> String {
    if text.chars().count() <= max_len {
        return text.to_string();
    }

    let keep = max_len.saturating_sub(suffix.chars().count());
    let mut truncated: String = text.chars().take(keep).collect();
    truncated.push_str(suffix);
    truncated
}

/// Compact counts like `1.5K`, `2.0M`, `1.2B`
pub fn format_play_count(count: Option<u64>) -> String {
    let Some(count) = count else {
        return String::new();
    };

    match count {
        c if c >= 1_000_000_000 => format!("{:.1}B", c as f64 / 1_000_000_000.0),
        c if c >= 1_000_000 => format!("{:.1}M", c as f64 / 1_000_000.0),
        c if c >= 1_000 => format!("{:.1}K", c as f64 / 1_000.0),
        c => c.to_string(),
    }
}
