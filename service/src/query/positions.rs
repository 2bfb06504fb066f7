//! [`Query`] collection related to [`Position`]s.

use common::operations::By;

use crate::domain::position::{self, Catalog};
#[cfg(doc)]
use crate::{domain::Position, Query};

use super::BackendQuery;

/// Queries the [`Catalog`] of [`position::Active`] [`Position`]s.
pub type ActivePositions = BackendQuery<By<Catalog, position::Active>>;
