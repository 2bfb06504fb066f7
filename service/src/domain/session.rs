//! [`Session`] definitions.

use std::sync::Arc;

use derive_more::Debug;
use secrecy::{ExposeSecret as _, SecretString};

/// Authorization capability every backend operation is performed with.
///
/// Acquiring, renewing and expiring the [`Token`] is up to the caller.
#[derive(Clone, Debug, Default)]
pub struct Session {
    /// Bearer [`Token`] of this [`Session`], if any.
    token: Option<Token>,
}

impl Session {
    /// Creates a new [`Session`] authorized with the provided [`Token`].
    #[must_use]
    pub fn new(token: Token) -> Self {
        Self { token: Some(token) }
    }

    /// Creates a new [`Session`] without any [`Token`].
    #[must_use]
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// Returns the [`Token`] of this [`Session`], if any.
    #[must_use]
    pub fn token(&self) -> Option<&Token> {
        self.token.as_ref()
    }
}

/// Bearer access token of a [`Session`].
#[derive(Clone, Debug)]
#[debug("Token(***)")]
pub struct Token(Arc<SecretString>);

impl Token {
    /// Creates a new [`Token`] if the given `raw` value is usable.
    ///
    /// Blank values and a literal `null` are not.
    #[must_use]
    pub fn new(raw: impl Into<String>) -> Option<Self> {
        let raw = raw.into();
        let trimmed = raw.trim();
        (!trimmed.is_empty() && trimmed != "null").then(|| {
            Self(Arc::new(SecretString::new(
                trimmed.to_owned().into_boxed_str(),
            )))
        })
    }

    /// Exposes the raw value of this [`Token`].
    #[must_use]
    pub fn expose(&self) -> &str {
        self.0.expose_secret()
    }
}
