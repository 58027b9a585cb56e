pub mod message;
pub mod params;

pub use leak_host::Timestamp;
pub use message::{GatedRead, GuardedMessage, MessageError, ReleaseState};
pub use params::{methods, ChangeReleaseTime, LeakParams, ReleaseParams};
