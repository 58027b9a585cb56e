//! Requests gateways send to the node and the responses they get back.

use std::fmt::Display;

use tokio::sync::oneshot;

use crate::{address::ServiceAddress, service::ServiceError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientRequest {
    Deploy {
        code: String,
        params: Vec<u8>,
    },
    Connect {
        address: ServiceAddress,
    },
    Call {
        address: ServiceAddress,
        method: String,
        args: Vec<u8>,
    },
}

impl Display for ClientRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ClientRequest::Deploy { code, .. } => write!(f, "deploy {code}"),
            ClientRequest::Connect { address } => write!(f, "connect {address}"),
            ClientRequest::Call {
                address, method, ..
            } => write!(f, "call {method} on {address}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostResponse {
    Deployed {
        address: ServiceAddress,
    },
    Connected {
        address: ServiceAddress,
        code: String,
    },
    CallResult {
        output: Vec<u8>,
    },
}

impl Display for HostResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HostResponse::Deployed { address } => write!(f, "deployed {address}"),
            HostResponse::Connected { address, code } => {
                write!(f, "connected to {code} at {address}")
            }
            HostResponse::CallResult { output } => {
                write!(f, "call result ({} bytes)", output.len())
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HostError {
    #[error("no service code registered as `{0}`")]
    UnknownCode(String),
    #[error("no service deployed at {0}")]
    MissingService(ServiceAddress),
    #[error("service at {address} runs `{found}`, expected `{expected}`")]
    CodeMismatch {
        address: ServiceAddress,
        expected: String,
        found: String,
    },
    #[error(transparent)]
    Service(#[from] ServiceError),
    #[error("serialization error: {0}")]
    Serialization(String),
    #[error("unexpected response: {0}")]
    UnexpectedResponse(String),
    #[error("timed out waiting for the node")]
    Timeout,
    #[error("disconnected from the node")]
    Disconnected,
}

impl HostError {
    pub fn serialization(err: impl Display) -> Self {
        Self::Serialization(err.to_string())
    }
}

pub type HostResult = Result<HostResponse, HostError>;

/// A request together with the account issuing it and the channel its answer goes back on.
pub(crate) struct RequestEnvelope {
    pub sender: ServiceAddress,
    pub request: ClientRequest,
    pub reply: oneshot::Sender<HostResult>,
}

/// Everything the node task consumes from its queue.
pub(crate) enum NodeRequest {
    Client(RequestEnvelope),
    /// Stops the node once every request queued before it has been answered.
    Shutdown,
}
