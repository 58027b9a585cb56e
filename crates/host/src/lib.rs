//! Local host for deployable services.
//!
//! Services implement [`Service`] and are registered with a [`ServiceRegistry`].
//! A [`LocalNode`] runs them, and clients reach the node through a [`Gateway`]
//! exposing `deploy`, `connect` and `call`.

pub mod address;
pub mod client_api;
pub mod clock;
pub mod config;
pub mod gateway;
pub mod node;
pub mod service;

pub mod prelude {
    pub use crate::address::ServiceAddress;
    pub use crate::client_api::{ClientRequest, HostError, HostResponse, HostResult};
    pub use crate::clock::{Clock, ManualClock, SystemClock, Timestamp};
    pub use crate::config::{ConfigError, NodeConfig};
    pub use crate::gateway::{Gateway, ServiceHandle};
    pub use crate::node::{LocalNode, NodeHandle};
    pub use crate::service::{Context, Service, ServiceError, ServiceRegistry};
}

pub use prelude::*;
