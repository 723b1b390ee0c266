//! Authorization-code flow: cached token first, browser round-trip otherwise.

use std::time::Duration;
use thiserror::Error;
use tracing::Instrument;
use uuid::Uuid;

use super::browser::{BrowserOpener, SystemBrowser};
use super::callback::{result_slot, CallbackBinder, CallbackError, CallbackListener, LocalBinder};
use super::config::Settings;
use super::oauth_client::OAuthClient;
use super::token_storage::TokenStore;
use crate::common::{AuthorizationResult, TokenRecord};
use crate::error::AuthError;

/// The remote half of the flow
#[allow(async_fn_in_trait)]
pub trait AuthorizationServer {
    /// URL the user is sent to, carrying `state` back on the redirect
    fn authorize_url(&self, state: &str) -> String;

    async fn exchange_code(&self, code: &str) -> Result<TokenRecord, AuthError>;

    async fn refresh(&self, token: &TokenRecord) -> Result<TokenRecord, AuthError>;
}

/// Why a flow attempt ended without a token. Displays as the hook reason.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthFailure {
    #[error("timeout")]
    Timeout,

    /// Reason reported by the authorization server, verbatim
    #[error("{0}")]
    Denied(String),

    #[error("{0}")]
    Exchange(String),

    #[error("{0}")]
    Listener(String),
}

impl AuthFailure {
    pub fn reason(&self) -> String {
        self.to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthOutcome {
    Authorized(TokenRecord),
    Failed(AuthFailure),
}

impl AuthOutcome {
    pub fn into_result(self) -> Result<TokenRecord, AuthError> {
        match self {
            AuthOutcome::Authorized(token) => Ok(token),
            AuthOutcome::Failed(failure) => Err(failure.into()),
        }
    }
}

/// Optional notifications, each fired at most once per attempt
#[derive(Default)]
pub struct AuthHooks<'a> {
    on_waiting: Option<Box<dyn FnMut() + 'a>>,
    on_success: Option<Box<dyn FnMut() + 'a>>,
    on_error: Option<Box<dyn FnMut(&str) + 'a>>,
    on_open_failed: Option<Box<dyn FnMut(&str) + 'a>>,
}

impl<'a> AuthHooks<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Browser launched, waiting for the redirect
    pub fn on_waiting(mut self, hook: impl FnMut() + 'a) -> Self {
        self.on_waiting = Some(Box::new(hook));
        self
    }

    pub fn on_success(mut self, hook: impl FnMut() + 'a) -> Self {
        self.on_success = Some(Box::new(hook));
        self
    }

    pub fn on_error(mut self, hook: impl FnMut(&str) + 'a) -> Self {
        self.on_error = Some(Box::new(hook));
        self
    }

    /// Browser could not be launched; receives the URL to open by hand
    pub fn on_open_failed(mut self, hook: impl FnMut(&str) + 'a) -> Self {
        self.on_open_failed = Some(Box::new(hook));
        self
    }

    fn waiting(&mut self) {
        if let Some(hook) = self.on_waiting.as_mut() {
            hook();
        }
    }

    fn success(&mut self) {
        if let Some(hook) = self.on_success.as_mut() {
            hook();
        }
    }

    fn error(&mut self, reason: &str) {
        if let Some(hook) = self.on_error.as_mut() {
            hook(reason);
        }
    }

    fn open_failed(&mut self, url: &str) {
        if let Some(hook) = self.on_open_failed.as_mut() {
            hook(url);
        }
    }
}

#[derive(Debug, Clone)]
pub struct AuthOptions {
    pub callback_port: u16,
    pub callback_path: String,
    pub callback_timeout: Duration,
    /// Tokens this close to expiry count as expired
    pub expiry_margin: chrono::Duration,
}

impl AuthOptions {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            callback_port: settings.callback_port(),
            callback_path: settings.callback_path(),
            callback_timeout: settings.callback_timeout(),
            expiry_margin: settings.expiry_margin(),
        }
    }
}

impl Default for AuthOptions {
    fn default() -> Self {
        Self {
            callback_port: super::config::DEFAULT_CALLBACK_PORT,
            callback_path: "/callback".to_string(),
            callback_timeout: Duration::from_secs(120),
            expiry_margin: chrono::Duration::seconds(60),
        }
    }
}

pub struct Authenticator<S, B = SystemBrowser, L = LocalBinder> {
    server: S,
    browser: B,
    binder: L,
    store: TokenStore,
    options: AuthOptions,
    session: Option<TokenRecord>,
}

impl Authenticator<OAuthClient> {
    /// Authenticator against Spotify with the per-user token cache
    pub fn from_settings(settings: &Settings) -> Result<Self, AuthError> {
        let server = OAuthClient::new(&settings.credentials())?;
        let store = TokenStore::new()?;
        Ok(Self::new(server, store, AuthOptions::from_settings(settings)))
    }
}

impl<S> Authenticator<S> {
    pub fn new(server: S, store: TokenStore, options: AuthOptions) -> Self {
        Self {
            server,
            browser: SystemBrowser,
            binder: LocalBinder,
            store,
            options,
            session: None,
        }
    }
}

impl<S, B, L> Authenticator<S, B, L> {
    pub fn with_browser<B2: BrowserOpener>(self, browser: B2) -> Authenticator<S, B2, L> {
        Authenticator {
            server: self.server,
            browser,
            binder: self.binder,
            store: self.store,
            options: self.options,
            session: self.session,
        }
    }

    pub fn with_binder<L2: CallbackBinder>(self, binder: L2) -> Authenticator<S, B, L2> {
        Authenticator {
            server: self.server,
            browser: self.browser,
            binder,
            store: self.store,
            options: self.options,
            session: self.session,
        }
    }

    pub fn store(&self) -> &TokenStore {
        &self.store
    }

    pub fn options(&self) -> &AuthOptions {
        &self.options
    }

    /// Token produced by the last successful check or flow
    pub fn session(&self) -> Option<&TokenRecord> {
        self.session.as_ref()
    }

    /// Forget the token on disk and in memory. Succeeds when nothing is cached.
    pub fn logout(&mut self) -> Result<(), AuthError> {
        self.session = None;
        self.store.delete_token()?;
        tracing::info!("Logged out");
        Ok(())
    }
}

impl<S, B, L> Authenticator<S, B, L>
where
    S: AuthorizationServer,
    B: BrowserOpener,
    L: CallbackBinder,
{
    /// A usable token without user interaction, refreshing if needed.
    ///
    /// Never opens a browser. Every failure is logged and reported as `None`.
    pub async fn cached_token(&mut self) -> Option<TokenRecord> {
        if let Some(session) = &self.session {
            if !session.is_expired(self.options.expiry_margin) {
                return Some(session.clone());
            }
        }

        let token = match self.store.load_token() {
            Ok(Some(token)) => token,
            Ok(None) => {
                tracing::debug!("No cached token");
                return None;
            }
            Err(e) => {
                tracing::warn!(error = %e, "Ignoring unreadable token cache");
                return None;
            }
        };

        if !token.is_expired(self.options.expiry_margin) {
            tracing::debug!(expires_at = %token.expires_at, "Using cached token");
            self.session = Some(token.clone());
            return Some(token);
        }

        tracing::info!("Cached token expired, refreshing");
        match self.server.refresh(&token).await {
            Ok(refreshed) => {
                self.persist(&refreshed);
                self.session = Some(refreshed.clone());
                Some(refreshed)
            }
            Err(e) => {
                tracing::warn!(error = %e, "Token refresh failed");
                None
            }
        }
    }

    /// Produce a token, running the browser flow when the cache cannot.
    ///
    /// Flow failures come back as [`AuthOutcome::Failed`] after the error hook
    /// fires. Only a callback port that cannot be bound is an `Err`.
    pub async fn authenticate(
        &mut self,
        hooks: &mut AuthHooks<'_>,
    ) -> Result<AuthOutcome, AuthError> {
        let span = tracing::info_span!("authenticate", port = self.options.callback_port);
        self.run_flow(hooks).instrument(span).await
    }

    async fn run_flow(&mut self, hooks: &mut AuthHooks<'_>) -> Result<AuthOutcome, AuthError> {
        if let Some(token) = self.cached_token().await {
            hooks.success();
            return Ok(AuthOutcome::Authorized(token));
        }

        let (slot, mut result) = result_slot();
        let transport = self.binder.bind(self.options.callback_port).await?;

        let state = Uuid::new_v4().simple().to_string();
        let url = self.server.authorize_url(&state);

        if let Err(e) = self.browser.open(&url) {
            tracing::warn!(error = %e, "Failed to open browser");
            hooks.open_failed(&url);
        }
        tracing::info!("Waiting for authorization callback");
        hooks.waiting();

        let listener =
            CallbackListener::new(transport, self.options.callback_path.as_str()).expect_state(state);

        let outcome = match listener.run(self.options.callback_timeout, slot).await {
            Ok(()) => match result.try_recv() {
                Ok(result) => self.complete(result).await,
                Err(_) => Err(AuthFailure::Listener(
                    "listener stopped without a result".to_string(),
                )),
            },
            Err(CallbackError::Timeout) => Err(AuthFailure::Timeout),
            Err(CallbackError::Io(e)) => Err(AuthFailure::Listener(e.to_string())),
        };

        match outcome {
            Ok(token) => {
                tracing::info!("Authorization complete");
                hooks.success();
                Ok(AuthOutcome::Authorized(token))
            }
            Err(failure) => {
                tracing::warn!(reason = %failure, "Authorization failed");
                hooks.error(&failure.reason());
                Ok(AuthOutcome::Failed(failure))
            }
        }
    }

    async fn complete(&mut self, result: AuthorizationResult) -> Result<TokenRecord, AuthFailure> {
        let code = match result {
            AuthorizationResult {
                authorization_code: Some(code),
                ..
            } => code,
            AuthorizationResult {
                error: Some(error), ..
            } => return Err(AuthFailure::Denied(error)),
            _ => {
                return Err(AuthFailure::Listener(
                    "callback carried neither code nor error".to_string(),
                ))
            }
        };

        let token = self
            .server
            .exchange_code(&code)
            .await
            .map_err(|e| AuthFailure::Exchange(e.to_string()))?;

        self.persist(&token);
        self.session = Some(token.clone());
        Ok(token)
    }

    fn persist(&self, token: &TokenRecord) {
        // The token is still good for this run even if the cache is not
        if let Err(e) = self.store.save_token(token) {
            tracing::warn!(error = %e, path = %self.store.path().display(), "Failed to cache token");
        }
    }
}
