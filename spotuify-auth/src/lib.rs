// Types shared by the callback listener, the orchestrator and the token cache
pub mod common;

mod client;
mod error;

pub use client::{
    authenticate, AuthFailure, AuthHooks, AuthOptions, AuthOutcome, AuthorizationServer,
    Authenticator, BrowserOpener, CallbackBinder, CallbackError, CallbackListener,
    CallbackResponse, CallbackTransport, ClientCredentials, InboundRequest, LocalBinder,
    OAuthClient, ResultSlot, Settings, SystemBrowser, TcpCallbackTransport, TokenStore,
    DEFAULT_CALLBACK_PORT, SPOTIFY_AUTH_URL, SPOTIFY_TOKEN_URL, result_slot,
};
pub use common::{AuthorizationResult, TokenRecord};
pub use error::AuthError;
