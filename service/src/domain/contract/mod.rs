//! [`Contract`] definitions.

pub mod candidate;
pub mod forest;

use common::{define_kind, DateOf};
use derive_more::{AsRef, Display, From, FromStr, Into};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::{employee, Position};

pub use self::{
    candidate::{Candidate, Draft},
    forest::Forest,
};

/// Employment contract of an employee.
///
/// Either a root contract (the original agreement) or an amendment attached
/// to a root contract, as told by its [`Level`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Contract {
    /// ID of this [`Contract`].
    pub id: Id,

    /// [`Level`] of this [`Contract`] in its [`Forest`].
    pub level: Level,

    /// [`Name`] of this [`Contract`].
    pub name: Name,

    /// [`Kind`] of this [`Contract`], if known.
    pub kind: Option<Kind>,

    /// Date when this [`Contract`] was signed.
    pub signed_at: SigningDate,

    /// Date since which this [`Contract`] is in force.
    pub valid_from: StartDate,

    /// Date until which this [`Contract`] is in force.
    ///
    /// [`None`] means that this [`Contract`] is valid indefinitely.
    pub valid_to: Option<EndDate>,

    /// [`Position`] this [`Contract`] employs for.
    pub position: Option<Position>,

    /// [`EarningConditions`] of this [`Contract`].
    pub earning_conditions: EarningConditions,
}

impl Contract {
    /// Returns ID of the root [`Contract`] amended by this one, if it is an
    /// amendment.
    #[must_use]
    pub fn parent_id(&self) -> Option<Id> {
        self.level.parent_id()
    }

    /// Indicates whether this [`Contract`] is a root one.
    #[must_use]
    pub fn is_root(&self) -> bool {
        matches!(self.level, Level::Root)
    }
}

/// ID of a [`Contract`].
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
    Ord,
    PartialEq,
    PartialOrd,
    Serialize,
)]
#[serde(transparent)]
pub struct Id(i64);

/// Name of a [`Contract`] (its document title).
#[derive(AsRef, Clone, Debug, Display, Eq, PartialEq)]
#[as_ref(str, String)]
pub struct Name(String);

impl Name {
    /// Creates a new [`Name`] if the given `name` is valid.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Option<Self> {
        let name = name.into();
        Self::check(&name).then_some(Self(name))
    }

    /// Creates a placeholder [`Name`] for an unnamed [`Contract`] with the
    /// provided ID.
    #[must_use]
    pub fn placeholder(id: Id) -> Self {
        Self(format!("#{id}"))
    }

    /// Checks whether the given `name` is a valid [`Name`].
    fn check(name: impl AsRef<str>) -> bool {
        let name = name.as_ref();
        name.trim() == name && !name.is_empty() && name.chars().count() <= 512
    }
}

impl FromStr for Name {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Name`")
    }
}

/// Position of a [`Contract`] in its [`Forest`].
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Level {
    /// Original employment [`Contract`].
    Root,

    /// Amendment (annex) modifying the terms of a root [`Contract`].
    Amendment {
        /// ID of the amended root [`Contract`].
        parent_id: Id,
    },
}

impl Level {
    /// Creates a [`Level`] out of an optional parent [`Contract`] ID.
    #[must_use]
    pub fn from_parent(parent_id: Option<Id>) -> Self {
        parent_id.map_or(Self::Root, |parent_id| Self::Amendment { parent_id })
    }

    /// Returns ID of the amended [`Contract`], if any.
    #[must_use]
    pub fn parent_id(self) -> Option<Id> {
        match self {
            Self::Root => None,
            Self::Amendment { parent_id } => Some(parent_id),
        }
    }

    /// Returns the [`Depth`] this [`Level`] lives at.
    #[must_use]
    pub fn depth(self) -> Depth {
        match self {
            Self::Root => Depth::Root,
            Self::Amendment { .. } => Depth::Amendment,
        }
    }
}

/// Depth of a [`Contract`] in its [`Forest`].
///
/// Bounded at exactly two levels.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[repr(u8)]
pub enum Depth {
    /// Root [`Contract`] (depth `0`).
    Root = 0,

    /// Amendment [`Contract`] (depth `1`).
    Amendment = 1,
}

define_kind! {
    #[doc = "Kind of a [`Contract`]."]
    enum Kind {
        #[doc = "Contract of employment."]
        #[value = "Umowa o pracę"]
        Employment = 1,

        #[doc = "Commission contract."]
        #[value = "Umowa zlecenie"]
        Commission = 2,
    }
}

impl Kind {
    /// Indicates whether [`Contract`]s of this [`Kind`] must state their end
    /// date and [`Position`].
    #[must_use]
    pub fn is_fixed_term(self) -> bool {
        match self {
            Self::Commission => true,
            Self::Employment => false,
        }
    }
}

/// Earning conditions of a [`Contract`].
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct EarningConditions {
    /// Hourly rate.
    pub hourly_rate: Decimal,

    /// Indicator whether a bonus is granted.
    pub bonus_enabled: bool,

    /// Amount of the bonus.
    pub bonus: Option<Decimal>,

    /// Threshold of days to be worked to be granted the bonus.
    pub bonus_threshold: Option<Decimal>,
}

/// Marker type indicating a [`Contract`] signing.
#[derive(Clone, Copy, Debug)]
pub struct Signing;

/// Marker type indicating a [`Contract`] coming into force.
#[derive(Clone, Copy, Debug)]
pub struct Start;

/// Marker type indicating a [`Contract`] expiration.
#[derive(Clone, Copy, Debug)]
pub struct End;

/// Date when a [`Contract`] was signed.
pub type SigningDate = DateOf<(Contract, Signing)>;

/// Date since which a [`Contract`] is in force.
pub type StartDate = DateOf<(Contract, Start)>;

/// Date until which a [`Contract`] is in force.
pub type EndDate = DateOf<(Contract, End)>;

/// New [`Contract`] to be created.
#[derive(Clone, Debug)]
pub struct New {
    /// ID of the employee the new [`Contract`] belongs to.
    pub employee_id: employee::Id,

    /// ID of the root [`Contract`] the new one amends, if any.
    pub parent_id: Option<Id>,

    /// [`Name`] of the new [`Contract`], if chosen up front.
    ///
    /// It cannot be changed afterwards.
    pub name: Option<Name>,

    /// Terms of the new [`Contract`].
    pub draft: Draft,
}

/// Revision of an existing [`Contract`].
#[derive(Clone, Debug)]
pub struct Revision {
    /// ID of the revised [`Contract`].
    pub id: Id,

    /// [`Level`] of the revised [`Contract`], kept as it is.
    pub level: Level,

    /// New terms of the [`Contract`].
    pub draft: Draft,
}
