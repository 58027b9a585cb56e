//! In-process node hosting deployed services.
//!
//! The node owns every deployed instance and answers requests one at a time
//! from a single task, so each request observes and mutates service state
//! atomically. The clock is sampled exactly once per request and the sample
//! travels to the service inside its [`Context`].

use std::collections::HashMap;

use tokio::sync::mpsc;

use crate::{
    address::ServiceAddress,
    client_api::{ClientRequest, HostError, HostResponse, HostResult, NodeRequest, RequestEnvelope},
    clock::Clock,
    config::NodeConfig,
    service::{Context, ServiceInstance, ServiceRegistry},
};

pub struct LocalNode<C> {
    registry: ServiceRegistry,
    clock: C,
    services: HashMap<ServiceAddress, Box<dyn ServiceInstance>>,
    deployments: u64,
}

impl<C: Clock> LocalNode<C> {
    pub fn new(registry: ServiceRegistry, clock: C) -> Self {
        Self {
            registry,
            clock,
            services: HashMap::new(),
            deployments: 0,
        }
    }

    /// Spawns the node on the current tokio runtime.
    pub fn start(self, config: NodeConfig) -> NodeHandle {
        // mpsc panics on a zero capacity
        let buffer_size = config.request_buffer.max(1);
        let (tx, rx) = mpsc::channel(buffer_size);
        tracing::debug!(buffer_size, registry = ?self.registry, "starting node");
        tokio::spawn(self.run(rx));
        NodeHandle { tx, config }
    }

    async fn run(mut self, mut requests: mpsc::Receiver<NodeRequest>) {
        while let Some(request) = requests.recv().await {
            let RequestEnvelope {
                sender,
                request,
                reply,
            } = match request {
                NodeRequest::Client(envelope) => envelope,
                NodeRequest::Shutdown => {
                    tracing::info!("shutdown requested");
                    break;
                }
            };
            let result = self.handle(sender, request);
            if reply.send(result).is_err() {
                tracing::debug!(%sender, "client went away before the response was sent");
            }
        }
        tracing::info!(services = self.services.len(), "node stopped");
    }

    pub(crate) fn handle(&mut self, sender: ServiceAddress, request: ClientRequest) -> HostResult {
        let ctx = Context::new(sender, self.clock.now());
        tracing::debug!(%sender, now = ctx.now(), %request, "handling request");
        match request {
            ClientRequest::Deploy { code, params } => {
                let address =
                    ServiceAddress::for_deployment(&code, &params, &sender, self.deployments);
                let instance = self
                    .registry
                    .construct(&code, &ctx, &params)
                    .ok_or_else(|| HostError::UnknownCode(code.clone()))?
                    .map_err(|err| {
                        tracing::warn!(%code, %err, "service construction failed");
                        err
                    })?;
                self.deployments += 1;
                self.services.insert(address, instance);
                tracing::info!(%code, %address, "deployed service");
                Ok(HostResponse::Deployed { address })
            }
            ClientRequest::Connect { address } => {
                let instance = self
                    .services
                    .get(&address)
                    .ok_or(HostError::MissingService(address))?;
                Ok(HostResponse::Connected {
                    address,
                    code: instance.code().to_owned(),
                })
            }
            ClientRequest::Call {
                address,
                method,
                args,
            } => {
                let instance = self
                    .services
                    .get_mut(&address)
                    .ok_or(HostError::MissingService(address))?;
                let output = instance.call(&ctx, &method, &args).map_err(|err| {
                    tracing::warn!(%address, %method, %err, "service call failed");
                    err
                })?;
                Ok(HostResponse::CallResult { output })
            }
        }
    }
}

/// Cheap to clone; every gateway to the node holds one. The node also stops
/// once the last handle is dropped.
#[derive(Clone, Debug)]
pub struct NodeHandle {
    tx: mpsc::Sender<NodeRequest>,
    config: NodeConfig,
}

impl NodeHandle {
    pub fn config(&self) -> &NodeConfig {
        &self.config
    }

    /// Whether the node has stopped accepting requests.
    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }

    /// Stops the node for every gateway and waits until it has stopped.
    /// Requests queued before the shutdown are still answered.
    pub async fn shutdown(&self) -> Result<(), HostError> {
        self.tx
            .send(NodeRequest::Shutdown)
            .await
            .map_err(|_| HostError::Disconnected)?;
        self.tx.closed().await;
        Ok(())
    }

    pub(crate) fn sender(&self) -> &mpsc::Sender<NodeRequest> {
        &self.tx
    }
}
