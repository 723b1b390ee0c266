use axum::{
    extract::State,
    http::{Method, StatusCode, Uri},
    response::{Html, IntoResponse, Response},
    Router,
};
use hyper::server::conn::http1;
use hyper_util::rt::{TokioIo, TokioTimer};
use hyper_util::service::TowerToHyperService;
use std::io;
use std::time::Duration;
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::{mpsc, oneshot};

use super::{CallbackResponse, CallbackTransport, InboundRequest};
use crate::error::AuthError;

// A browser may open speculative connections that never send a request
const HEADER_READ_TIMEOUT: Duration = Duration::from_secs(5);

/// A request parked in its connection task until the listener answers it
#[derive(Debug)]
struct Pending {
    request: InboundRequest,
    reply: oneshot::Sender<CallbackResponse>,
}

/// Loopback HTTP transport.
///
/// Each connection is served by hyper on its own task, but every request is
/// handed to the caller and answered in order. The listener socket belongs to
/// the transport, so dropping it releases the port.
#[derive(Debug)]
pub struct TcpCallbackTransport {
    listener: TcpListener,
    router: Router,
    inbox: mpsc::Receiver<Pending>,
    reply: Option<oneshot::Sender<CallbackResponse>>,
}

impl TcpCallbackTransport {
    /// Bind the loopback port; an occupied port is reported, never retried
    pub async fn bind(port: u16) -> Result<Self, AuthError> {
        let listener = TcpListener::bind(("127.0.0.1", port))
            .await
            .map_err(|source| AuthError::Bind {
                addr: format!("127.0.0.1:{}", port),
                source,
            })?;

        let (outbox, inbox) = mpsc::channel(8);
        let router = Router::new().fallback(capture).with_state(outbox);

        tracing::debug!(port, "Callback listener bound");
        Ok(Self {
            listener,
            router,
            inbox,
            reply: None,
        })
    }

    pub fn local_port(&self) -> io::Result<u16> {
        self.listener.local_addr().map(|addr| addr.port())
    }

    fn serve(&self, stream: TcpStream) {
        let service = TowerToHyperService::new(self.router.clone());
        tokio::spawn(async move {
            let connection = http1::Builder::new()
                .timer(TokioTimer::new())
                .header_read_timeout(HEADER_READ_TIMEOUT)
                .keep_alive(false)
                .serve_connection(TokioIo::new(stream), service);
            if let Err(e) = connection.await {
                tracing::debug!(error = %e, "Callback connection ended with an error");
            }
        });
    }
}

impl CallbackTransport for TcpCallbackTransport {
    async fn accept(&mut self) -> io::Result<InboundRequest> {
        // An unanswered request gets the default 400
        self.reply = None;

        loop {
            tokio::select! {
                pending = self.inbox.recv() => {
                    let Some(pending) = pending else {
                        return Err(io::Error::other("callback router stopped"));
                    };
                    self.reply = Some(pending.reply);
                    return Ok(pending.request);
                }
                accepted = self.listener.accept() => {
                    let (stream, peer) = accepted?;
                    tracing::debug!(%peer, "Callback connection accepted");
                    self.serve(stream);
                }
            }
        }
    }

    async fn respond(&mut self, response: CallbackResponse) -> io::Result<()> {
        if let Some(reply) = self.reply.take() {
            // The connection task may already be gone if the browser hung up
            let _ = reply.send(response);
        }
        Ok(())
    }
}

async fn capture(
    State(outbox): State<mpsc::Sender<Pending>>,
    method: Method,
    uri: Uri,
) -> Response {
    let request = InboundRequest {
        method: method.to_string(),
        target: uri
            .path_and_query()
            .map(|target| target.as_str())
            .unwrap_or_else(|| uri.path())
            .to_string(),
    };

    let (reply, response) = oneshot::channel();
    if outbox.send(Pending { request, reply }).await.is_err() {
        return StatusCode::BAD_REQUEST.into_response();
    }

    match response.await {
        Ok(response) => (
            StatusCode::from_u16(response.status).unwrap_or(StatusCode::BAD_REQUEST),
            Html(response.body),
        )
            .into_response(),
        Err(_) => StatusCode::BAD_REQUEST.into_response(),
    }
}
