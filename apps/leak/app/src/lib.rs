use std::time::Duration;

use leak_contracts::{Leak, Release};
use leak_host::{Clock, Gateway, LocalNode, NodeConfig, NodeHandle, ServiceAddress, ServiceRegistry};
use leak_types::{LeakParams, Timestamp};

mod leak_client;

pub use leak_client::{ClientError, LeakClient, ReleaseClient};

/// How long after deployment the demo leak becomes public.
pub const DEMO_RELEASE_DELAY: Duration = Duration::from_secs(2 * 60);

const DEMO_DESCRIPTION: &str = "my big secret";
const DEMO_MESSAGE: &str = "i love kimchi";

/// Registry with every message service this app talks to.
pub fn registry() -> ServiceRegistry {
    ServiceRegistry::new()
        .register::<Leak>()
        .register::<Release>()
}

/// Starts a local node able to host leaks and releases.
pub fn start_local_node(config: NodeConfig, clock: impl Clock) -> NodeHandle {
    LocalNode::new(registry(), clock).start(config)
}

/// `now` shifted by `offset` seconds, clamped to the representable range.
pub fn timestamp_from_offset(now: Timestamp, offset: i64) -> Timestamp {
    now.saturating_add_signed(offset)
}

/// Deploys the demo leak, released [`DEMO_RELEASE_DELAY`] after `now`.
pub async fn deploy_demo_leak(gateway: &Gateway, now: Timestamp) -> Result<LeakClient, ClientError> {
    let params = LeakParams {
        public_description: DEMO_DESCRIPTION.to_owned(),
        message: DEMO_MESSAGE.to_owned(),
        message_release_time: now.saturating_add(DEMO_RELEASE_DELAY.as_secs()),
    };
    let leak = LeakClient::deploy(gateway, params).await?;
    tracing::info!(address = %leak.address(), "Deployed Leak");
    Ok(leak)
}

/// Reads the message of the leak deployed at `address`.
pub async fn read_message(address: ServiceAddress, gateway: &Gateway) -> Result<String, ClientError> {
    let leak = LeakClient::connect(address, gateway).await?;
    let message = leak.message().await.map_err(|err| {
        tracing::warn!(%address, %err, "could not read message");
        err
    })?;
    tracing::info!(%address, %message, "received!");
    Ok(message)
}
