//! The interface deployable services implement, and the registry the node
//! uses to instantiate them by code name.

use std::collections::HashMap;

use crate::{address::ServiceAddress, clock::Timestamp};

/// Per-request information handed to a service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Context {
    sender: ServiceAddress,
    now: Timestamp,
}

impl Context {
    pub fn new(sender: ServiceAddress, now: Timestamp) -> Self {
        Self { sender, now }
    }

    /// Account that issued the request.
    pub fn sender(&self) -> ServiceAddress {
        self.sender
    }

    /// The single time sample taken for this request.
    pub fn now(&self) -> Timestamp {
        self.now
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ServiceError {
    #[error("unknown method: {0}")]
    UnknownMethod(String),
    #[error("failed to decode input: {0}")]
    Deser(String),
    #[error("{0}")]
    Other(String),
}

impl ServiceError {
    pub fn deser(err: impl std::fmt::Display) -> Self {
        Self::Deser(err.to_string())
    }
}

/// A service that can be deployed on a node.
///
/// Parameters, arguments and outputs are JSON documents. Outcomes the
/// service wants its callers to see, including rejections, belong in the
/// output; `ServiceError` is reserved for requests the service cannot
/// interpret at all.
pub trait Service: Send + 'static {
    /// Name the code is registered and deployed under.
    const CODE: &'static str;

    fn construct(ctx: &Context, params: &[u8]) -> Result<Self, ServiceError>
    where
        Self: Sized;

    fn call(&mut self, ctx: &Context, method: &str, args: &[u8]) -> Result<Vec<u8>, ServiceError>;
}

/// Object safe view of a deployed [`Service`].
pub(crate) trait ServiceInstance: Send {
    fn code(&self) -> &'static str;

    fn call(&mut self, ctx: &Context, method: &str, args: &[u8]) -> Result<Vec<u8>, ServiceError>;
}

impl<S: Service> ServiceInstance for S {
    fn code(&self) -> &'static str {
        S::CODE
    }

    fn call(&mut self, ctx: &Context, method: &str, args: &[u8]) -> Result<Vec<u8>, ServiceError> {
        Service::call(self, ctx, method, args)
    }
}

type Constructor = fn(&Context, &[u8]) -> Result<Box<dyn ServiceInstance>, ServiceError>;

fn construct_boxed<S: Service>(
    ctx: &Context,
    params: &[u8],
) -> Result<Box<dyn ServiceInstance>, ServiceError> {
    Ok(Box::new(S::construct(ctx, params)?))
}

/// Code the node is able to deploy.
#[derive(Default, Clone)]
pub struct ServiceRegistry {
    constructors: HashMap<&'static str, Constructor>,
}

impl ServiceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register<S: Service>(mut self) -> Self {
        if self
            .constructors
            .insert(S::CODE, construct_boxed::<S>)
            .is_some()
        {
            tracing::warn!(code = S::CODE, "service code registered twice");
        }
        self
    }

    pub fn contains(&self, code: &str) -> bool {
        self.constructors.contains_key(code)
    }

    pub(crate) fn construct(
        &self,
        code: &str,
        ctx: &Context,
        params: &[u8],
    ) -> Option<Result<Box<dyn ServiceInstance>, ServiceError>> {
        self.constructors.get(code).map(|ctor| ctor(ctx, params))
    }
}

impl std::fmt::Debug for ServiceRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_set().entries(self.constructors.keys()).finish()
    }
}
