//! Welcome notification contract.
//!
//! # Responsibility
//! - Define the one-shot notification seam triggered after account creation.
//! - Provide a log-backed reference implementation.
//!
//! # Invariants
//! - Notifier failures carry an inspectable cause; the service wraps them
//!   without retrying.
//! - Reference implementations log metadata only; the address itself stays
//!   out of log lines.

use crate::model::user::User;
use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Failure reported by a notification backend.
#[derive(Debug)]
pub struct NotifyError {
    message: String,
    source: Option<Box<dyn Error + Send + Sync + 'static>>,
}

impl NotifyError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }

    /// Attaches the transport-level cause for caller inspection.
    pub fn with_source(
        message: impl Into<String>,
        source: impl Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }
}

impl Display for NotifyError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "welcome notification failed: {}", self.message)
    }
}

impl Error for NotifyError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.source
            .as_deref()
            .map(|source| source as &(dyn Error + 'static))
    }
}

/// Notification seam invoked exactly once per successful creation.
pub trait WelcomeNotifier {
    fn send_welcome(&self, user: &User) -> Result<(), NotifyError>;
}

/// Reference notifier that records the welcome event in the process log
/// instead of sending anything.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl WelcomeNotifier for LogNotifier {
    fn send_welcome(&self, user: &User) -> Result<(), NotifyError> {
        info!(
            "event=welcome_sent module=notify status=ok user_id={}",
            user.id
        );
        Ok(())
    }
}
