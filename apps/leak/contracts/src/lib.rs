//! Deployable message services.
//!
//! Every method answers with the JSON encoding of `Result<T, MessageError>`.
//! Rejections are ordinary outcomes for callers, not host failures.

use serde::Serialize;

use leak_host::ServiceError;
use leak_types::MessageError;

mod leak;
mod release;

pub use leak::Leak;
pub use release::Release;

pub(crate) fn encode_outcome<T: Serialize>(
    outcome: Result<T, MessageError>,
) -> Result<Vec<u8>, ServiceError> {
    serde_json::to_vec(&outcome).map_err(|e| ServiceError::Other(e.to_string()))
}
