//! [`Position`] definitions.

use std::slice;

use derive_more::{AsRef, Display, From, FromStr, Into};
use serde::{Deserialize, Serialize};

/// Job position an employee is hired for.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Position {
    /// ID of this [`Position`], if known.
    pub id: Option<Id>,

    /// [`Title`] of this [`Position`].
    pub title: Title,
}

/// ID of a [`Position`].
#[derive(
    Clone,
    Copy,
    Debug,
    Deserialize,
    Display,
    Eq,
    From,
    FromStr,
    Hash,
    Into,
    PartialEq,
    Serialize,
)]
#[serde(transparent)]
pub struct Id(i64);

/// Title of a [`Position`].
#[derive(AsRef, Clone, Debug, Display, Eq, Hash, PartialEq)]
#[as_ref(str, String)]
pub struct Title(String);

impl Title {
    /// Creates a new [`Title`] if the given `title` is valid.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Option<Self> {
        let title = title.into();
        (!title.trim().is_empty()).then_some(Self(title))
    }
}

impl FromStr for Title {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Title`")
    }
}

/// Selector of [`Position`]s currently open for hiring.
#[derive(Clone, Copy, Debug, Default)]
pub struct Active;

/// Flat list of [`Position`]s to resolve [`Title`]s against.
///
/// Loaded independently of [`Contract`]s, its lifecycle belongs to the
/// caller.
///
/// [`Contract`]: crate::domain::Contract
#[derive(Clone, Debug, Default, Eq, From, Into, PartialEq)]
pub struct Catalog(Vec<Position>);

impl Catalog {
    /// Resolves a [`Position`] by its exact [`Title`].
    #[must_use]
    pub fn resolve(&self, title: &str) -> Option<&Position> {
        self.0
            .iter()
            .find(|p| AsRef::<str>::as_ref(&p.title) == title)
    }

    /// Returns an iterator over the [`Position`]s of this [`Catalog`].
    pub fn iter(&self) -> slice::Iter<'_, Position> {
        self.0.iter()
    }

    /// Returns the number of [`Position`]s in this [`Catalog`].
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Indicates whether this [`Catalog`] is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<Position> for Catalog {
    fn from_iter<I: IntoIterator<Item = Position>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a Position;
    type IntoIter = slice::Iter<'a, Position>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
