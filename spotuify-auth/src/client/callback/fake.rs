use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::io;
use std::rc::Rc;

use super::{CallbackBinder, CallbackResponse, CallbackTransport, InboundRequest};
use crate::error::AuthError;

pub(crate) type Responses = Rc<RefCell<Vec<CallbackResponse>>>;

/// Replays a fixed list of GET requests, then pends forever
pub(crate) struct ScriptedTransport {
    requests: VecDeque<InboundRequest>,
    responses: Responses,
}

impl ScriptedTransport {
    pub(crate) fn new(targets: &[&str]) -> (Self, Responses) {
        let responses = Responses::default();
        let transport = Self {
            requests: targets.iter().map(|t| InboundRequest::get(*t)).collect(),
            responses: responses.clone(),
        };
        (transport, responses)
    }
}

impl CallbackTransport for ScriptedTransport {
    async fn accept(&mut self) -> io::Result<InboundRequest> {
        match self.requests.pop_front() {
            Some(request) => Ok(request),
            None => std::future::pending().await,
        }
    }

    async fn respond(&mut self, response: CallbackResponse) -> io::Result<()> {
        self.responses.borrow_mut().push(response);
        Ok(())
    }
}

/// Hands out a scripted transport per bind and counts the binds
#[derive(Default)]
pub(crate) struct ScriptedBinder {
    targets: Vec<String>,
    pub(crate) binds: Rc<Cell<usize>>,
    pub(crate) responses: Responses,
    port_in_use: bool,
}

impl ScriptedBinder {
    pub(crate) fn serving(targets: &[&str]) -> Self {
        Self {
            targets: targets.iter().map(|t| t.to_string()).collect(),
            ..Self::default()
        }
    }

    pub(crate) fn port_in_use() -> Self {
        Self {
            port_in_use: true,
            ..Self::default()
        }
    }
}

impl CallbackBinder for ScriptedBinder {
    type Transport = ScriptedTransport;

    async fn bind(&self, port: u16) -> Result<ScriptedTransport, AuthError> {
        self.binds.set(self.binds.get() + 1);
        if self.port_in_use {
            return Err(AuthError::Bind {
                addr: format!("127.0.0.1:{}", port),
                source: io::Error::from(io::ErrorKind::AddrInUse),
            });
        }

        let targets: Vec<&str> = self.targets.iter().map(String::as_str).collect();
        let (mut transport, _) = ScriptedTransport::new(&targets);
        transport.responses = self.responses.clone();
        Ok(transport)
    }
}
