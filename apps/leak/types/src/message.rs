use serde::{Deserialize, Serialize};

use leak_host::Timestamp;

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error, Serialize, Deserialize)]
pub enum MessageError {
    #[error("Message is not yet released.")]
    NotYetReleased,
    #[error("Cannot update release time of already-released message.")]
    AlreadyReleased,
    #[error("Sender does not have permission to make message public.")]
    PermissionDenied,
}

impl MessageError {
    /// Whether repeating the same request later may succeed.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, MessageError::NotYetReleased)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReleaseState {
    Pending,
    Released,
}

/// Read access shared by every message variant.
pub trait GatedRead {
    fn release_time(&self) -> Timestamp;

    fn message(&self, now: Timestamp) -> Result<&str, MessageError>;

    fn is_released(&self, now: Timestamp) -> bool {
        now >= self.release_time()
    }

    fn state(&self, now: Timestamp) -> ReleaseState {
        if self.is_released(now) {
            ReleaseState::Released
        } else {
            ReleaseState::Pending
        }
    }
}

/// A secret message that becomes readable once its release time is reached.
///
/// Release is a property of the time a request is evaluated at, not a stored
/// flag: the message is released for every `now >= release_time`. The
/// release time can be moved in either direction, but only while the
/// message is still pending.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuardedMessage {
    public_description: String,
    secret: String,
    release_time: Timestamp,
}

impl GuardedMessage {
    pub fn new(
        public_description: impl Into<String>,
        secret: impl Into<String>,
        release_time: Timestamp,
    ) -> Self {
        Self {
            public_description: public_description.into(),
            secret: secret.into(),
            release_time,
        }
    }

    pub fn public_description(&self) -> &str {
        &self.public_description
    }

    pub fn change_release_time(
        &mut self,
        now: Timestamp,
        new_time: Timestamp,
    ) -> Result<(), MessageError> {
        if self.is_released(now) {
            return Err(MessageError::AlreadyReleased);
        }
        self.release_time = new_time;
        Ok(())
    }
}

impl GatedRead for GuardedMessage {
    fn release_time(&self) -> Timestamp {
        self.release_time
    }

    fn message(&self, now: Timestamp) -> Result<&str, MessageError> {
        if !self.is_released(now) {
            return Err(MessageError::NotYetReleased);
        }
        Ok(&self.secret)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NOW: Timestamp = 1_700_000_000;
    const HOUR: Timestamp = 3600;

    fn message(release_time: Timestamp) -> GuardedMessage {
        GuardedMessage::new("My big news", "I'm in love with kimchi.", release_time)
    }

    #[test]
    fn past_message_is_readable() {
        let msg = message(NOW - HOUR);
        assert_eq!(msg.message(NOW), Ok("I'm in love with kimchi."));
        assert_eq!(msg.state(NOW), ReleaseState::Released);
    }

    #[test]
    fn future_message_is_not_readable() {
        let msg = message(NOW + HOUR);
        assert_eq!(msg.message(NOW), Err(MessageError::NotYetReleased));
        assert_eq!(msg.state(NOW), ReleaseState::Pending);
    }

    #[test]
    fn released_exactly_at_release_time() {
        let msg = message(NOW);
        assert_eq!(msg.message(NOW - 1), Err(MessageError::NotYetReleased));
        assert!(msg.message(NOW).is_ok());
    }

    #[test]
    fn gate_holds_for_every_offset() {
        let msg = message(NOW);
        for offset in [1, 2, 59, 3600, 86_400, NOW] {
            assert_eq!(msg.message(NOW - offset), Err(MessageError::NotYetReleased));
            assert_eq!(msg.message(NOW + offset), Ok("I'm in love with kimchi."));
        }
    }

    #[test]
    fn public_description_is_always_visible() {
        for release_time in [0, NOW - HOUR, NOW + HOUR, Timestamp::MAX] {
            assert_eq!(message(release_time).public_description(), "My big news");
        }
    }

    #[test]
    fn advancing_release_time_releases_the_message() {
        let mut msg = message(NOW + HOUR);
        msg.change_release_time(NOW, NOW - HOUR).unwrap();
        assert_eq!(msg.release_time(), NOW - HOUR);
        assert_eq!(msg.message(NOW), Ok("I'm in love with kimchi."));
    }

    #[test]
    fn pending_release_time_can_be_postponed() {
        let mut msg = message(NOW + HOUR);
        msg.change_release_time(NOW, NOW + 2 * HOUR).unwrap();
        assert_eq!(msg.message(NOW + HOUR), Err(MessageError::NotYetReleased));
        assert!(msg.message(NOW + 2 * HOUR).is_ok());
    }

    #[test]
    fn released_message_release_time_is_frozen() {
        let mut msg = message(NOW - HOUR);
        assert_eq!(
            msg.change_release_time(NOW, NOW + HOUR),
            Err(MessageError::AlreadyReleased)
        );
        assert_eq!(msg.release_time(), NOW - HOUR);
        assert_eq!(msg.message(NOW), Ok("I'm in love with kimchi."));

        // pulling it further into the past is refused too
        assert_eq!(
            msg.change_release_time(NOW, 0),
            Err(MessageError::AlreadyReleased)
        );
    }

    #[test]
    fn change_is_judged_against_the_time_of_the_request() {
        let mut msg = message(NOW + HOUR);
        msg.change_release_time(NOW, NOW + 2 * HOUR).unwrap();
        assert_eq!(
            msg.change_release_time(NOW + 2 * HOUR, NOW + 3 * HOUR),
            Err(MessageError::AlreadyReleased)
        );
    }

    #[test]
    fn reads_are_idempotent() {
        let msg = message(NOW - HOUR);
        let before = msg.clone();
        for _ in 0..3 {
            assert_eq!(msg.message(NOW), Ok("I'm in love with kimchi."));
        }
        assert_eq!(msg, before);
    }

    #[test]
    fn empty_fields_are_legal() {
        let msg = GuardedMessage::new("", "", 0);
        assert_eq!(msg.message(0), Ok(""));
        assert_eq!(msg.public_description(), "");
    }

    #[test]
    fn only_not_yet_released_is_recoverable() {
        assert!(MessageError::NotYetReleased.is_recoverable());
        assert!(!MessageError::AlreadyReleased.is_recoverable());
        assert!(!MessageError::PermissionDenied.is_recoverable());
    }

    #[test]
    fn error_messages() {
        assert_eq!(
            MessageError::NotYetReleased.to_string(),
            "Message is not yet released."
        );
        assert_eq!(
            MessageError::AlreadyReleased.to_string(),
            "Cannot update release time of already-released message."
        );
    }
}
