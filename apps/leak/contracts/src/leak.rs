use leak_host::{Context, Service, ServiceAddress, ServiceError};
use leak_types::{
    methods, ChangeReleaseTime, GatedRead, GuardedMessage, LeakParams, MessageError, Timestamp,
};

use crate::encode_outcome;

/// A message with an always visible public description.
///
/// Only the author who deployed the leak may change its release time, and
/// only while the message has not been released yet.
pub struct Leak {
    author: ServiceAddress,
    message: GuardedMessage,
}

impl Leak {
    fn change_release_time(
        &mut self,
        ctx: &Context,
        new_time: Timestamp,
    ) -> Result<(), MessageError> {
        if ctx.sender() != self.author {
            return Err(MessageError::PermissionDenied);
        }
        let previous = self.message.release_time();
        self.message.change_release_time(ctx.now(), new_time)?;
        tracing::info!(previous, new_time, "release time changed");
        Ok(())
    }
}

impl GatedRead for Leak {
    fn release_time(&self) -> Timestamp {
        self.message.release_time()
    }

    fn message(&self, now: Timestamp) -> Result<&str, MessageError> {
        self.message.message(now)
    }
}

impl Service for Leak {
    const CODE: &'static str = "leak";

    fn construct(ctx: &Context, params: &[u8]) -> Result<Self, ServiceError> {
        let params: LeakParams = serde_json::from_slice(params).map_err(ServiceError::deser)?;
        Ok(Self {
            author: ctx.sender(),
            message: params.into(),
        })
    }

    fn call(&mut self, ctx: &Context, method: &str, args: &[u8]) -> Result<Vec<u8>, ServiceError> {
        match method {
            methods::MESSAGE => encode_outcome(GatedRead::message(self, ctx.now())),
            methods::GET_PUBLIC_DESCRIPTION => {
                encode_outcome(Ok(self.message.public_description()))
            }
            methods::CHANGE_RELEASE_TIME => {
                let ChangeReleaseTime { new_time } =
                    serde_json::from_slice(args).map_err(ServiceError::deser)?;
                let outcome = self.change_release_time(ctx, new_time);
                if let Err(err) = &outcome {
                    tracing::warn!(sender = %ctx.sender(), %err, "release time change rejected");
                }
                encode_outcome(outcome)
            }
            other => Err(ServiceError::UnknownMethod(other.to_owned())),
        }
    }
}
