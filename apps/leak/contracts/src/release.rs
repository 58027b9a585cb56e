use leak_host::{Context, Service, ServiceAddress, ServiceError};
use leak_types::{methods, GatedRead, GuardedMessage, MessageError, ReleaseParams, Timestamp};

/// A message with a fixed release time. The message itself is the only
/// thing callers can ask for.
pub struct Release {
    author: ServiceAddress,
    message: GuardedMessage,
}

impl Release {
    /// Account that deployed this release.
    pub fn author(&self) -> ServiceAddress {
        self.author
    }
}

impl GatedRead for Release {
    fn release_time(&self) -> Timestamp {
        self.message.release_time()
    }

    fn message(&self, now: Timestamp) -> Result<&str, MessageError> {
        self.message.message(now)
    }
}

impl Service for Release {
    const CODE: &'static str = "release";

    fn construct(ctx: &Context, params: &[u8]) -> Result<Self, ServiceError> {
        let params: ReleaseParams = serde_json::from_slice(params).map_err(ServiceError::deser)?;
        tracing::debug!(
            author = %ctx.sender(),
            release_time = params.message_release_time,
            "release constructed"
        );
        Ok(Self {
            author: ctx.sender(),
            message: params.into(),
        })
    }

    fn call(&mut self, ctx: &Context, method: &str, _args: &[u8]) -> Result<Vec<u8>, ServiceError> {
        match method {
            methods::MESSAGE => crate::encode_outcome(GatedRead::message(self, ctx.now())),
            other => Err(ServiceError::UnknownMethod(other.to_owned())),
        }
    }
}
