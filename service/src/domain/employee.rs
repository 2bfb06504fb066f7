//! Employee definitions.
//!
//! Employees are owned by an external collaborator, so only their identity
//! is modeled here.

use derive_more::{Display, From, FromStr, Into};
use serde::{Deserialize, Serialize};

/// ID of an employee.
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
