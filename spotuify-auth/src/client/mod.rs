mod browser;
pub(crate) mod callback;
mod config;
mod oauth_client;
mod orchestrator;
mod token_storage;

pub use browser::{BrowserOpener, SystemBrowser};
pub use callback::{
    CallbackBinder, CallbackError, CallbackListener, CallbackResponse, CallbackTransport,
    InboundRequest, LocalBinder, ResultSlot, TcpCallbackTransport,
    result_slot,
};
pub use config::{ClientCredentials, Settings, DEFAULT_CALLBACK_PORT};
pub use oauth_client::{OAuthClient, SPOTIFY_AUTH_URL, SPOTIFY_TOKEN_URL};
pub use orchestrator::{
    AuthFailure, AuthHooks, AuthOptions, AuthOutcome, AuthorizationServer, Authenticator,
};
pub use token_storage::TokenStore;

use crate::common::TokenRecord;
use crate::error::AuthError;

/// Authenticate the user on the console before starting the TUI.
///
/// Progress goes to stdout and failures to stderr. Returns a usable token or
/// the reason there is none.
pub async fn authenticate<S, B, L>(
    authenticator: &mut Authenticator<S, B, L>,
) -> Result<TokenRecord, AuthError>
where
    S: AuthorizationServer,
    B: BrowserOpener,
    L: CallbackBinder,
{
    let timeout = authenticator.options().callback_timeout.as_secs();

    let mut hooks = AuthHooks::new()
        .on_open_failed(|url| {
            eprintln!("Failed to open browser automatically.");
            eprintln!("\nPlease open this URL in your browser:");
            eprintln!("{}\n", url);
        })
        .on_waiting(|| {
            println!("\n=== Spotify Authorization ===\n");
            println!("Complete the login in your browser.");
            println!("Waiting up to {} seconds for authorization...", timeout);
        })
        .on_success(|| println!("✓ Authenticated with Spotify"))
        .on_error(|reason| eprintln!("Authorization failed: {}", reason));

    authenticator.authenticate(&mut hooks).await?.into_result()
}
