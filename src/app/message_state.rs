use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageLevel {
    Error,
    Success,
}

/// Footer message with an expiry; errors stay up longer than confirmations.
#[derive(Debug, Clone, Default)]
pub struct MessageState {
    pub last_error: Option<String>,
    pub last_success: Option<String>,
    pub expires_at: Option<Instant>,
}

impl MessageState {
    const ERROR_TIMEOUT: Duration = Duration::from_secs(5);
    const SUCCESS_TIMEOUT: Duration = Duration::from_secs(2);

    pub fn set_error_at(&mut self, msg: impl Into<String>, now: Instant) {
        self.last_error = Some(msg.into());
        self.last_success = None;
        self.expires_at = Some(now + Self::ERROR_TIMEOUT);
    }

    pub fn set_success_at(&mut self, msg: impl Into<String>, now: Instant) {
        self.last_success = Some(msg.into());
        self.last_error = None;
        self.expires_at = Some(now + Self::SUCCESS_TIMEOUT);
    }

    pub fn clear_expired_at(&mut self, now: Instant) {
        if let Some(expires) = self.expires_at
            && expires <= now
        {
            self.clear();
        }
    }

    pub fn clear(&mut self) {
        self.last_error = None;
        self.last_success = None;
        self.expires_at = None;
    }

    pub fn current(&self) -> Option<(MessageLevel, &str)> {
        if let Some(error) = &self.last_error {
            return Some((MessageLevel::Error, error));
        }
        self.last_success
            .as_deref()
            .map(|msg| (MessageLevel::Success, msg))
    }
}
