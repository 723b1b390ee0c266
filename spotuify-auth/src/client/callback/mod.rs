//! One-shot localhost listener that captures the authorization redirect.
//!
//! Requests are classified strictly one at a time on the caller's task. The first
//! request carrying `code` or `error` ends the wait; anything else (favicon
//! fetches, pre-flights, stray paths) is answered with 400 and ignored.

#[cfg(test)]
pub(crate) mod fake;
mod pages;
mod transport;

pub use transport::TcpCallbackTransport;

use std::io;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::oneshot;
use tokio::time::Instant;
use url::Url;

use crate::common::AuthorizationResult;

/// Request line of an inbound callback
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InboundRequest {
    pub method: String,
    /// Path plus query, as sent on the request line
    pub target: String,
}

impl InboundRequest {
    pub fn get(target: impl Into<String>) -> Self {
        Self {
            method: "GET".to_string(),
            target: target.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallbackResponse {
    pub status: u16,
    pub body: String,
}

/// Source of inbound callback requests.
///
/// `accept` only fails when the listener itself is unusable; a connection
/// that cannot be read yields an empty request instead.
#[allow(async_fn_in_trait)]
pub trait CallbackTransport {
    async fn accept(&mut self) -> io::Result<InboundRequest>;

    /// Answer the most recently accepted request
    async fn respond(&mut self, response: CallbackResponse) -> io::Result<()>;
}

/// Opens a transport for one flow attempt
#[allow(async_fn_in_trait)]
pub trait CallbackBinder {
    type Transport: CallbackTransport;

    async fn bind(&self, port: u16) -> Result<Self::Transport, crate::AuthError>;
}

/// Binds real loopback sockets
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalBinder;

impl CallbackBinder for LocalBinder {
    type Transport = TcpCallbackTransport;

    async fn bind(&self, port: u16) -> Result<Self::Transport, crate::AuthError> {
        TcpCallbackTransport::bind(port).await
    }
}

#[derive(Debug, Error)]
pub enum CallbackError {
    #[error("timeout")]
    Timeout,

    #[error("callback listener failed: {0}")]
    Io(#[from] io::Error),
}

/// Write half of the per-attempt result slot
#[derive(Debug)]
pub struct ResultSlot(oneshot::Sender<AuthorizationResult>);

/// Create an empty slot; a new pair is made for every flow attempt
pub fn result_slot() -> (ResultSlot, oneshot::Receiver<AuthorizationResult>) {
    let (tx, rx) = oneshot::channel();
    (ResultSlot(tx), rx)
}

impl ResultSlot {
    fn fill(self, result: AuthorizationResult) {
        // The receiver lives in the orchestrator for the whole attempt
        let _ = self.0.send(result);
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum CallbackOutcome {
    Code(String),
    Denied(String),
    Ignored,
}

/// Decide what an inbound request means for the flow
pub(crate) fn classify(
    request: &InboundRequest,
    callback_path: &str,
    expected_state: Option<&str>,
) -> CallbackOutcome {
    if request.method != "GET" || !request.target.starts_with('/') {
        return CallbackOutcome::Ignored;
    }

    let Ok(url) = Url::parse(&format!("http://localhost{}", request.target)) else {
        return CallbackOutcome::Ignored;
    };
    if url.path() != callback_path {
        return CallbackOutcome::Ignored;
    }

    let mut code = None;
    let mut error = None;
    let mut state = None;
    for (key, value) in url.query_pairs() {
        if value.is_empty() {
            continue;
        }
        match key.as_ref() {
            "code" if code.is_none() => code = Some(value.into_owned()),
            "error" if error.is_none() => error = Some(value.into_owned()),
            "state" if state.is_none() => state = Some(value.into_owned()),
            _ => {}
        }
    }

    if let (Some(expected), Some(received)) = (expected_state, state.as_deref()) {
        if expected != received {
            tracing::warn!("Callback carried an unexpected state parameter");
            return CallbackOutcome::Ignored;
        }
    }

    match (code, error) {
        (Some(code), _) => CallbackOutcome::Code(code),
        (None, Some(error)) => CallbackOutcome::Denied(error),
        (None, None) => CallbackOutcome::Ignored,
    }
}

/// Accept loop for a single flow attempt
pub struct CallbackListener<T> {
    transport: T,
    callback_path: String,
    expected_state: Option<String>,
}

impl<T: CallbackTransport> CallbackListener<T> {
    pub fn new(transport: T, callback_path: impl Into<String>) -> Self {
        Self {
            transport,
            callback_path: callback_path.into(),
            expected_state: None,
        }
    }

    pub fn expect_state(mut self, state: impl Into<String>) -> Self {
        self.expected_state = Some(state.into());
        self
    }

    /// Serve requests until one is terminal or `budget` runs out.
    ///
    /// The terminal result goes into `slot`. The transport is dropped on
    /// return, which releases the port.
    pub async fn run(mut self, budget: Duration, slot: ResultSlot) -> Result<(), CallbackError> {
        let deadline = Instant::now() + budget;

        loop {
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                return Err(CallbackError::Timeout);
            }

            let request = match tokio::time::timeout(remaining, self.transport.accept()).await {
                Ok(request) => request?,
                Err(_) => return Err(CallbackError::Timeout),
            };

            let outcome = classify(
                &request,
                &self.callback_path,
                self.expected_state.as_deref(),
            );

            let (result, response) = match outcome {
                CallbackOutcome::Code(code) => (
                    AuthorizationResult::code(code),
                    CallbackResponse {
                        status: 200,
                        body: pages::SUCCESS_HTML.to_string(),
                    },
                ),
                CallbackOutcome::Denied(error) => {
                    let body = pages::error_page(&error);
                    (
                        AuthorizationResult::denied(error),
                        CallbackResponse { status: 400, body },
                    )
                }
                CallbackOutcome::Ignored => {
                    tracing::debug!(target = %request.target, "Ignoring non-callback request");
                    self.respond(CallbackResponse {
                        status: 400,
                        body: String::new(),
                    })
                    .await;
                    continue;
                }
            };

            slot.fill(result);
            self.respond(response).await;
            return Ok(());
        }
    }

    async fn respond(&mut self, response: CallbackResponse) {
        // The page is cosmetic, a browser that went away does not matter
        if let Err(e) = self.transport.respond(response).await {
            tracing::debug!(error = %e, "Failed to answer callback request");
        }
    }
}
