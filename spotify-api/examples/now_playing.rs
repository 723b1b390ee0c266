use spotify_api::{Client, SpotifyApiError};

#[tokio::main]
pub async fn main() -> Result<(), SpotifyApiError> {
    let client = Client::new("access_token");

    match client.playback_state().await? {
        Some(state) => {
            let track = state.item.map(|item| item.name).unwrap_or_default();
            println!("{} ({})", track, if state.is_playing { "playing" } else { "paused" });
        }
        None => println!("Nothing playing"),
    }
    Ok(())
}
