//! [`Notifier`] definitions.

use derive_more::Display;

/// Channel for user-visible [`Notification`]s.
pub trait Notifier {
    /// Delivers the provided [`Notification`].
    fn notify(&self, notification: Notification);
}

impl<N: Notifier + ?Sized> Notifier for &N {
    fn notify(&self, notification: Notification) {
        (**self).notify(notification);
    }
}

/// User-visible, non-blocking notification.
#[derive(Clone, Debug, Display, Eq, PartialEq)]
#[display("{severity}: {message}")]
pub struct Notification {
    /// [`Severity`] of this [`Notification`].
    pub severity: Severity,

    /// Human-readable message of this [`Notification`].
    pub message: String,
}

impl Notification {
    /// Creates a new error [`Notification`] with the provided message.
    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            message: message.into(),
        }
    }

    /// Creates a new success [`Notification`] with the provided message.
    #[must_use]
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Success,
            message: message.into(),
        }
    }
}

/// Message confirming a created [`Contract`].
///
/// [`Contract`]: crate::domain::Contract
pub const CREATED: &str = "Umowa została utworzona";

/// Message confirming a saved [`Contract`].
///
/// [`Contract`]: crate::domain::Contract
pub const SAVED: &str = "Umowa została zapisana";

/// Message confirming a deleted [`Contract`].
///
/// [`Contract`]: crate::domain::Contract
pub const DELETED: &str = "Umowa została usunięta";

/// Severity of a [`Notification`].
#[derive(Clone, Copy, Debug, Display, Eq, Hash, PartialEq)]
pub enum Severity {
    /// Operation succeeded.
    #[display("success")]
    Success,

    /// Operation failed.
    #[display("error")]
    Error,
}
