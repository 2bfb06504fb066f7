//! [`Notifier`] implementations.

use service::{
    notifier::Severity,
    Notification, Notifier,
};
use tracing as log;

/// [`Notifier`] writing [`Notification`]s into the log.
#[derive(Clone, Copy, Debug, Default)]
pub struct Logger;

impl Notifier for Logger {
    fn notify(&self, notification: Notification) {
        let Notification { severity, message } = notification;
        match severity {
            Severity::Success => log::info!("{message}"),
            Severity::Error => log::error!("{message}"),
        }
    }
}
