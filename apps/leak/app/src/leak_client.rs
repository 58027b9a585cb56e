use serde::{de::DeserializeOwned, Serialize};

use leak_contracts::{Leak, Release};
use leak_host::{Gateway, HostError, ServiceAddress, ServiceHandle};
use leak_types::{methods, ChangeReleaseTime, LeakParams, MessageError, ReleaseParams, Timestamp};

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The service understood the request and refused it.
    #[error(transparent)]
    Message(#[from] MessageError),
    #[error(transparent)]
    Host(#[from] HostError),
    #[error("failed to decode service output: {0}")]
    Decode(#[source] serde_json::Error),
}

impl ClientError {
    pub fn as_message_error(&self) -> Option<MessageError> {
        match self {
            ClientError::Message(err) => Some(*err),
            _ => None,
        }
    }
}

async fn invoke<T: DeserializeOwned>(
    gateway: &Gateway,
    handle: &ServiceHandle,
    method: &str,
    args: &impl Serialize,
) -> Result<T, ClientError> {
    let args = serde_json::to_vec(args).map_err(HostError::serialization)?;
    let output = gateway.call(handle, method, args).await?;
    let outcome: Result<T, MessageError> =
        serde_json::from_slice(&output).map_err(ClientError::Decode)?;
    Ok(outcome?)
}

/// Client of a deployed [`Leak`].
#[derive(Debug, Clone)]
pub struct LeakClient {
    gateway: Gateway,
    handle: ServiceHandle,
}

impl LeakClient {
    pub async fn deploy(gateway: &Gateway, params: LeakParams) -> Result<Self, ClientError> {
        let handle = gateway.deploy_service::<Leak>(&params).await?;
        tracing::debug!(address = %handle.address(), "deployed leak");
        Ok(Self {
            gateway: gateway.clone(),
            handle,
        })
    }

    pub async fn connect(address: ServiceAddress, gateway: &Gateway) -> Result<Self, ClientError> {
        let handle = gateway.connect_service::<Leak>(address).await?;
        Ok(Self {
            gateway: gateway.clone(),
            handle,
        })
    }

    pub fn address(&self) -> ServiceAddress {
        self.handle.address()
    }

    pub async fn message(&self) -> Result<String, ClientError> {
        invoke(&self.gateway, &self.handle, methods::MESSAGE, &()).await
    }

    pub async fn get_public_description(&self) -> Result<String, ClientError> {
        invoke(
            &self.gateway,
            &self.handle,
            methods::GET_PUBLIC_DESCRIPTION,
            &(),
        )
        .await
    }

    pub async fn change_release_time(&self, new_time: Timestamp) -> Result<(), ClientError> {
        invoke(
            &self.gateway,
            &self.handle,
            methods::CHANGE_RELEASE_TIME,
            &ChangeReleaseTime { new_time },
        )
        .await
    }
}

/// Client of a deployed [`Release`].
#[derive(Debug, Clone)]
pub struct ReleaseClient {
    gateway: Gateway,
    handle: ServiceHandle,
}

impl ReleaseClient {
    pub async fn deploy(gateway: &Gateway, params: ReleaseParams) -> Result<Self, ClientError> {
        let handle = gateway.deploy_service::<Release>(&params).await?;
        tracing::debug!(address = %handle.address(), "deployed release");
        Ok(Self {
            gateway: gateway.clone(),
            handle,
        })
    }

    pub async fn connect(address: ServiceAddress, gateway: &Gateway) -> Result<Self, ClientError> {
        let handle = gateway.connect_service::<Release>(address).await?;
        Ok(Self {
            gateway: gateway.clone(),
            handle,
        })
    }

    pub fn address(&self) -> ServiceAddress {
        self.handle.address()
    }

    pub async fn message(&self) -> Result<String, ClientError> {
        invoke(&self.gateway, &self.handle, methods::MESSAGE, &()).await
    }
}
