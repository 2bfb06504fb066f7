//! [`Query`] definition.

pub mod contract;
pub mod positions;

use std::convert::Infallible;

use common::operations::{By, Select};
use tracerr::Traced;

use crate::{
    infra::{backend, Authorized, Backend},
    Controller, Notifier, Snapshot,
};

pub use self::{contract::ContractById, positions::ActivePositions};

/// [`Query`] of the [`Controller`].
pub use common::Handler as Query;

/// [`Query`] for the current [`Snapshot`] of the [`Controller`].
#[derive(Clone, Copy, Debug, Default)]
pub struct Current;

impl<Api, N> Query<Current> for Controller<Api, N> {
    type Ok = Snapshot;
    type Err = Infallible;

    async fn execute(&self, _: Current) -> Result<Self::Ok, Self::Err> {
        Ok(self.snapshot())
    }
}

/// [`Query`] [`Select`]ing a `T`ype from a [`Backend`] on behalf of the
/// [`Controller`]'s [`Session`].
///
/// Nothing is stored in the [`Controller`].
///
/// [`Session`]: crate::domain::Session
#[derive(Clone, Copy, Debug)]
#[expect(clippy::module_name_repetitions, reason = "more readable")]
pub struct BackendQuery<T>(T);

impl<W, B> BackendQuery<By<W, B>> {
    /// Creates a new [`BackendQuery`] selecting a `W` by the provided `B`.
    #[must_use]
    pub fn by(by: B) -> Self {
        Self(By::new(by))
    }
}

impl<Api, N, W, B> Query<BackendQuery<By<W, B>>> for Controller<Api, N>
where
    Api: Backend<
        Authorized<Select<By<W, B>>>,
        Ok = W,
        Err = Traced<backend::Error>,
    >,
    N: Notifier,
{
    type Ok = W;
    type Err = Traced<backend::Error>;

    async fn execute(
        &self,
        BackendQuery(by): BackendQuery<By<W, B>>,
    ) -> Result<Self::Ok, Self::Err> {
        self.backend()
            .execute(Authorized::new(self.session().clone(), Select(by)))
            .await
            .inspect_err(|e| self.report("querying `Backend`", e.as_ref()))
            .map_err(tracerr::wrap!())
    }
}
