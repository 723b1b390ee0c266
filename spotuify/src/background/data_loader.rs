use crate::events::{DataEvent, DataRequest, PlayerAction};
use crate::state::{SearchResults, LIKED_SONGS_ID, RECENTLY_PLAYED_ID};
use spotify_api::{Client, Request, SpotifyApiError};
use std::sync::{Arc, PoisonError, RwLock};
use tokio::sync::mpsc;

/// Runs Web API calls for the UI and reports results as data events
#[derive(Clone)]
pub struct DataLoader {
    api_client: Arc<RwLock<Arc<Client>>>,
    base_url: Option<String>,
    data_tx: mpsc::UnboundedSender<DataEvent>,
}

impl DataLoader {
    pub fn new(access_token: &str, data_tx: mpsc::UnboundedSender<DataEvent>) -> Self {
        Self {
            api_client: Arc::new(RwLock::new(Arc::new(Client::new(access_token)))),
            base_url: None,
            data_tx,
        }
    }

    pub fn with_base_url(
        base_url: &str,
        access_token: &str,
        data_tx: mpsc::UnboundedSender<DataEvent>,
    ) -> Self {
        Self {
            api_client: Arc::new(RwLock::new(Arc::new(Client::with_base_url(
                base_url,
                access_token,
            )))),
            base_url: Some(base_url.to_string()),
            data_tx,
        }
    }

    /// Swap in a refreshed access token. Requests already in flight finish
    /// with the old one.
    pub fn set_access_token(&self, access_token: &str) {
        let client = match &self.base_url {
            Some(base_url) => Client::with_base_url(base_url, access_token),
            None => Client::new(access_token),
        };
        *self
            .api_client
            .write()
            .unwrap_or_else(PoisonError::into_inner) = Arc::new(client);
        tracing::info!("API client now uses the refreshed token");
    }

    fn client(&self) -> Arc<Client> {
        self.api_client
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn send(&self, event: DataEvent) {
        // The receiver only goes away on shutdown
        let _ = self.data_tx.send(event);
    }

    pub async fn run(&self, request: DataRequest) {
        match request {
            DataRequest::CurrentUser => self.load_user().await,
            DataRequest::Playlists => self.load_playlists().await,
            DataRequest::PlaylistTracks { playlist_id } => {
                self.load_playlist_tracks(playlist_id).await
            }
            DataRequest::SavedTracks => self.load_saved_tracks().await,
            DataRequest::AlbumTracks { album_id } => self.load_album_tracks(album_id).await,
            DataRequest::Artist { artist_id } => self.load_artist(artist_id).await,
            DataRequest::RecentlyPlayed => self.load_recently_played().await,
            DataRequest::ToggleSaved { track_id, name } => {
                self.toggle_saved(track_id, name).await
            }
            DataRequest::Search { query } => self.search(query).await,
            DataRequest::Devices => self.load_devices().await,
            DataRequest::Playback => self.load_playback().await,
            DataRequest::Player { action, device_id } => self.player(action, device_id).await,
        }
    }

    pub async fn load_user(&self) {
        match self.client().send(Request::user().current()).await {
            Ok(user) => {
                tracing::info!("Signed in as {}", user.name());
                self.send(DataEvent::UserLoaded { user });
            }
            Err(e) => tracing::warn!("Failed to load user profile: {}", e),
        }
    }

    pub async fn load_playlists(&self) {
        tracing::info!("Loading playlists");
        match self.client().send(Request::playlists().list()).await {
            Ok(page) => {
                tracing::info!("Loaded {} of {} playlists", page.items.len(), page.total);
                self.send(DataEvent::PlaylistsLoaded {
                    playlists: page.items,
                });
            }
            Err(e) => self.load_failed("playlists", e),
        }
    }

    pub async fn load_playlist_tracks(&self, playlist_id: String) {
        tracing::info!("Loading tracks for playlist {}", playlist_id);
        let request = Request::playlists().tracks(playlist_id.clone());
        match self.client().send(request).await {
            Ok(page) => {
                // Unavailable tracks come back as null
                let tracks: Vec<_> = page.items.into_iter().filter_map(|i| i.track).collect();
                tracing::debug!("Loaded {} tracks", tracks.len());
                self.send(DataEvent::TracksLoaded {
                    source_id: playlist_id,
                    tracks,
                });
            }
            Err(e) => self.load_failed("playlist tracks", e),
        }
    }

    pub async fn load_saved_tracks(&self) {
        tracing::info!("Loading saved tracks");
        match self.client().send(Request::library().saved_tracks()).await {
            Ok(page) => {
                self.send(DataEvent::TracksLoaded {
                    source_id: LIKED_SONGS_ID.to_string(),
                    tracks: page.items.into_iter().map(|saved| saved.track).collect(),
                });
            }
            Err(e) => self.load_failed("saved tracks", e),
        }
    }

    pub async fn load_album_tracks(&self, album_id: String) {
        tracing::info!("Loading tracks for album {}", album_id);
        match self.client().send(Request::albums().tracks(album_id.clone())).await {
            Ok(page) => {
                tracing::debug!("Loaded {} tracks", page.items.len());
                self.send(DataEvent::TracksLoaded {
                    source_id: album_id,
                    tracks: page.items,
                });
            }
            Err(e) => self.load_failed("album tracks", e),
        }
    }

    /// Details, top tracks and discography, fetched together
    pub async fn load_artist(&self, artist_id: String) {
        tracing::info!("Loading artist {}", artist_id);
        let client = self.client();
        let artists = Request::artists();
        let (artist, top_tracks, albums) = tokio::join!(
            client.send(artists.get(artist_id.clone())),
            client.send(artists.top_tracks(artist_id.clone())),
            client.send(artists.albums(artist_id)),
        );

        match (artist, top_tracks, albums) {
            (Ok(artist), Ok(top_tracks), Ok(albums)) => {
                tracing::debug!(
                    "Artist {} has {} top tracks and {} releases",
                    artist.name,
                    top_tracks.tracks.len(),
                    albums.items.len()
                );
                self.send(DataEvent::ArtistLoaded {
                    artist: Box::new(artist),
                    top_tracks: top_tracks.tracks,
                    albums: albums.items,
                });
            }
            (Err(e), _, _) | (_, Err(e), _) | (_, _, Err(e)) => self.load_failed("artist", e),
        }
    }

    pub async fn load_recently_played(&self) {
        tracing::info!("Loading recently played tracks");
        let request = Request::player().recently_played().limit(50u32);
        match self.client().send(request).await {
            Ok(response) => {
                self.send(DataEvent::TracksLoaded {
                    source_id: RECENTLY_PLAYED_ID.to_string(),
                    tracks: response.items.into_iter().map(|item| item.track).collect(),
                });
            }
            Err(e) => self.load_failed("recently played tracks", e),
        }
    }

    /// Save the track if it is not in Liked Songs, remove it otherwise
    pub async fn toggle_saved(&self, track_id: String, name: String) {
        let client = self.client();
        let ids = [track_id.clone()];
        let result = match client.send(Request::library().contains(&ids)).await {
            Ok(flags) => {
                let saved = flags.first().copied().unwrap_or(false);
                let verb = if saved { "Removing" } else { "Saving" };
                tracing::info!("{} {} in Liked Songs", verb, name);
                let change = if saved {
                    client.send(Request::library().remove(&ids)).await
                } else {
                    client.send(Request::library().save(&ids)).await
                };
                change.map(|_| !saved)
            }
            Err(e) => Err(e),
        };

        match result {
            Ok(saved) => self.send(DataEvent::SavedToggled {
                track_id,
                name,
                saved,
            }),
            Err(e) => {
                tracing::error!("Failed to update Liked Songs: {}", e);
                self.send(DataEvent::SaveFailed {
                    error: describe(&e),
                });
            }
        }
    }

    pub async fn search(&self, query: String) {
        tracing::info!("Searching for {:?}", query);
        match self
            .client()
            .send(Request::search().everything(query.clone()))
            .await
        {
            Ok(response) => {
                let results = SearchResults {
                    tracks: response.tracks().to_vec(),
                    albums: response.albums().to_vec(),
                    artists: response.artists().to_vec(),
                    playlists: response.playlists().cloned().collect(),
                };
                tracing::debug!(
                    "Search returned {} tracks, {} albums, {} artists, {} playlists",
                    results.tracks.len(),
                    results.albums.len(),
                    results.artists.len(),
                    results.playlists.len()
                );
                self.send(DataEvent::SearchResultsLoaded { query, results });
            }
            Err(e) => self.load_failed("search results", e),
        }
    }

    pub async fn load_devices(&self) {
        tracing::info!("Loading devices");
        match self.client().send(Request::player().devices()).await {
            Ok(response) => {
                tracing::debug!("Found {} devices", response.devices.len());
                self.send(DataEvent::DevicesLoaded {
                    devices: response.devices,
                });
            }
            Err(e) => self.load_failed("devices", e),
        }
    }

    /// Polled every refresh interval, so successes are not logged
    pub async fn load_playback(&self) {
        match self.client().playback_state().await {
            Ok(playback) => self.send(DataEvent::PlaybackLoaded {
                playback: playback.map(Box::new),
            }),
            Err(e) => tracing::warn!("Failed to poll playback state: {}", e),
        }
    }

    pub async fn player(&self, action: PlayerAction, device_id: Option<String>) {
        tracing::info!("Player {} (device={:?})", action.name(), device_id);

        let player = Request::player().on_device(device_id);
        let client = self.client();
        let result = match &action {
            PlayerAction::Resume => client.send(player.resume()).await.map(drop),
            PlayerAction::Pause => client.send(player.pause()).await.map(drop),
            PlayerAction::Next => client.send(player.next()).await.map(drop),
            PlayerAction::Previous => client.send(player.previous()).await.map(drop),
            PlayerAction::Seek { position_ms } => {
                client.send(player.seek(*position_ms)).await.map(drop)
            }
            PlayerAction::Volume { percent } => {
                client.send(player.volume(i32::from(*percent))).await.map(drop)
            }
            PlayerAction::Shuffle { state } => client.send(player.shuffle(*state)).await.map(drop),
            PlayerAction::Repeat { state } => client.send(player.repeat(*state)).await.map(drop),
            PlayerAction::PlayContext {
                context_uri,
                offset,
            } => client
                .send(player.play_context(context_uri.clone(), *offset))
                .await
                .map(drop),
            PlayerAction::PlayTracks { uris, offset } => client
                .send(player.play_tracks(uris.clone()).offset(*offset))
                .await
                .map(drop),
            PlayerAction::Queue { uri, .. } => {
                client.send(player.add_to_queue(uri.clone())).await.map(drop)
            }
            PlayerAction::Transfer { device_id } => client
                .send(player.transfer(device_id.clone()).play(true))
                .await
                .map(drop),
        };

        match result {
            Ok(()) => {
                self.send(DataEvent::PlayerActionCompleted { action });
                // Pick up the new state without waiting for the next poll
                self.load_playback().await;
            }
            Err(e) => {
                tracing::error!("Player {} failed: {}", action.name(), e);
                self.send(DataEvent::PlayerActionFailed {
                    action,
                    error: describe(&e),
                });
            }
        }
    }

    fn load_failed(&self, what: &str, e: SpotifyApiError) {
        tracing::error!("Failed to load {}: {}", what, e);
        self.send(DataEvent::LoadError {
            error: describe(&e),
        });
    }
}

/// Short message for the status line
fn describe(e: &SpotifyApiError) -> String {
    if e.is_no_active_device() {
        "No active device, press d to pick one".to_string()
    } else if e.is_unauthorized() {
        "Spotify rejected the access token".to_string()
    } else {
        e.to_string()
    }
}
