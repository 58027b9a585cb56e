//! Constructor parameters, method names and call arguments of the message services.

use serde::{Deserialize, Serialize};

use leak_host::Timestamp;

use crate::message::GuardedMessage;

pub mod methods {
    pub const MESSAGE: &str = "message";
    pub const GET_PUBLIC_DESCRIPTION: &str = "get_public_description";
    pub const CHANGE_RELEASE_TIME: &str = "change_release_time";
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeakParams {
    #[serde(alias = "publicDescription")]
    pub public_description: String,
    pub message: String,
    #[serde(alias = "messageReleaseTime")]
    pub message_release_time: Timestamp,
}

impl From<LeakParams> for GuardedMessage {
    fn from(params: LeakParams) -> Self {
        GuardedMessage::new(
            params.public_description,
            params.message,
            params.message_release_time,
        )
    }
}

/// Parameters of the variant without a mutable release time.
///
/// Older deployments call the release time `messageBecomesPublicTime`;
/// it names the same instant as `messageReleaseTime`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReleaseParams {
    pub description: String,
    pub message: String,
    #[serde(alias = "messageBecomesPublicTime", alias = "messageReleaseTime")]
    pub message_release_time: Timestamp,
}

impl From<ReleaseParams> for GuardedMessage {
    fn from(params: ReleaseParams) -> Self {
        GuardedMessage::new(
            params.description,
            params.message,
            params.message_release_time,
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeReleaseTime {
    #[serde(alias = "newTime")]
    pub new_time: Timestamp,
}
