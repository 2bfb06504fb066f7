//! [`Backend`]-related implementations.

#[cfg(feature = "http")]
pub mod http;
#[cfg(test)]
pub(crate) mod mock;

use std::fmt;

use derive_more::{Display, Error as StdError, From};

use crate::domain::Session;

#[cfg(feature = "http")]
pub use self::http::Http;

/// Operation of an authoritative backend.
pub use common::Handler as Backend;

/// Operation `T` performed on behalf of a [`Session`].
#[derive(Clone, Debug)]
pub struct Authorized<T> {
    /// [`Session`] the operation is performed with.
    pub session: Session,

    /// Performed operation.
    pub op: T,
}

impl<T> Authorized<T> {
    /// Wraps the provided operation into the provided [`Session`].
    #[must_use]
    pub fn new(session: Session, op: T) -> Self {
        Self { session, op }
    }
}

/// [`Backend`] error.
#[derive(Debug, Display, From, StdError)]
pub enum Error {
    /// [`Http`] error.
    #[cfg(feature = "http")]
    Http(http::Error),

    /// Operation was rejected by a [`Backend`].
    Rejected(#[error(not(source))] Rejection),
}

/// Rejection of an operation by a [`Backend`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Rejection {
    /// Status code the operation was rejected with, if any.
    pub status: Option<u16>,

    /// Reason of this [`Rejection`].
    pub message: String,

    /// Indicator whether the [`Session`] has expired.
    pub session_expired: bool,
}

impl Rejection {
    /// Message of an expired [`Session`] [`Rejection`].
    pub const SESSION_EXPIRED: &'static str =
        "Sesja wygasła. Zaloguj się ponownie.";

    /// Creates a new [`Rejection`] with the provided status code and reason.
    #[must_use]
    pub fn new(status: Option<u16>, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            session_expired: false,
        }
    }

    /// Creates a new [`Rejection`] of an expired [`Session`].
    #[must_use]
    pub fn session_expired() -> Self {
        Self {
            status: Some(401),
            message: Self::SESSION_EXPIRED.to_owned(),
            session_expired: true,
        }
    }
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.status {
            Some(status) if !self.session_expired => {
                write!(f, "HTTP {status}: {}", self.message)
            }
            Some(_) | None => write!(f, "{}", self.message),
        }
    }
}
