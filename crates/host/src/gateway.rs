use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

use serde::Serialize;
use tokio::sync::oneshot;

use crate::{
    address::ServiceAddress,
    client_api::{
        ClientRequest, HostError, HostResponse, HostResult, NodeRequest, RequestEnvelope,
    },
    node::NodeHandle,
    service::Service,
};

/// A deployed service a gateway is talking to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceHandle {
    address: ServiceAddress,
    code: String,
}

impl ServiceHandle {
    pub fn address(&self) -> ServiceAddress {
        self.address
    }

    pub fn code(&self) -> &str {
        &self.code
    }
}

/// Client side of the node, acting on behalf of the account owning `api_key`.
///
/// Each call to [`Gateway::new`] opens a separate connection. Clones share
/// the connection they were cloned from.
#[derive(Clone, Debug)]
pub struct Gateway {
    node: NodeHandle,
    account: ServiceAddress,
    connected: Arc<AtomicBool>,
}

impl Gateway {
    pub fn new(node: &NodeHandle, api_key: &str) -> Self {
        Self {
            node: node.clone(),
            account: ServiceAddress::from_api_key(api_key),
            connected: Arc::new(AtomicBool::new(true)),
        }
    }

    /// Address calls through this gateway are sent from.
    pub fn account(&self) -> ServiceAddress {
        self.account
    }

    pub async fn deploy(&self, code: &str, params: Vec<u8>) -> Result<ServiceHandle, HostError> {
        let request = ClientRequest::Deploy {
            code: code.to_owned(),
            params,
        };
        match self.send(request).await? {
            HostResponse::Deployed { address } => Ok(ServiceHandle {
                address,
                code: code.to_owned(),
            }),
            other => Err(HostError::UnexpectedResponse(other.to_string())),
        }
    }

    /// Deploys `S` with the JSON encoding of `params`.
    pub async fn deploy_service<S: Service>(
        &self,
        params: &impl Serialize,
    ) -> Result<ServiceHandle, HostError> {
        let params = serde_json::to_vec(params).map_err(HostError::serialization)?;
        self.deploy(S::CODE, params).await
    }

    pub async fn connect(&self, address: ServiceAddress) -> Result<ServiceHandle, HostError> {
        match self.send(ClientRequest::Connect { address }).await? {
            HostResponse::Connected { address, code } => Ok(ServiceHandle { address, code }),
            other => Err(HostError::UnexpectedResponse(other.to_string())),
        }
    }

    /// Connects to `address`, failing if something other than `S` is deployed there.
    pub async fn connect_service<S: Service>(
        &self,
        address: ServiceAddress,
    ) -> Result<ServiceHandle, HostError> {
        let handle = self.connect(address).await?;
        if handle.code != S::CODE {
            return Err(HostError::CodeMismatch {
                address,
                expected: S::CODE.to_owned(),
                found: handle.code,
            });
        }
        Ok(handle)
    }

    pub async fn call(
        &self,
        handle: &ServiceHandle,
        method: &str,
        args: Vec<u8>,
    ) -> Result<Vec<u8>, HostError> {
        let request = ClientRequest::Call {
            address: handle.address,
            method: method.to_owned(),
            args,
        };
        match self.send(request).await? {
            HostResponse::CallResult { output } => Ok(output),
            other => Err(HostError::UnexpectedResponse(other.to_string())),
        }
    }

    /// Closes this connection. Other gateways to the node are unaffected.
    pub fn disconnect(&self) {
        if self.connected.swap(false, Ordering::SeqCst) {
            tracing::debug!(account = %self.account, "gateway disconnected");
        }
    }

    pub fn is_connected(&self) -> bool {
        self.connected.load(Ordering::SeqCst) && !self.node.is_closed()
    }

    async fn send(&self, request: ClientRequest) -> HostResult {
        if !self.connected.load(Ordering::SeqCst) {
            return Err(HostError::Disconnected);
        }
        let (reply, response) = oneshot::channel();
        let envelope = RequestEnvelope {
            sender: self.account,
            request,
            reply,
        };
        let timeout = self.node.config().call_timeout;
        let exchange = async {
            self.node
                .sender()
                .send(NodeRequest::Client(envelope))
                .await
                .map_err(|_| HostError::Disconnected)?;
            response.await.map_err(|_| HostError::Disconnected)?
        };
        match tokio::time::timeout(timeout, exchange).await {
            Ok(result) => result,
            Err(_) => {
                tracing::error!(?timeout, "request to node timed out");
                Err(HostError::Timeout)
            }
        }
    }
}
