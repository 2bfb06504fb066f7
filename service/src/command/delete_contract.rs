//! [`Command`] for deleting a [`Contract`].

use common::operations::{By, Delete};
use derive_more::{Display, Error, From};
use tracerr::Traced;
use tracing as log;

use crate::{
    domain::{contract, Contract},
    infra::{backend, Authorized, Backend},
    notifier, Controller, Notifier,
};

use super::Command;

/// [`Command`] for deleting a [`Contract`].
///
/// Once the [`Backend`] confirms the deletion, the [`Contract`] is spliced
/// out of the loaded [`contract::Forest`] wherever it's found.
#[derive(Clone, Copy, Debug)]
pub struct DeleteContract(pub contract::Id);

impl<Api, N> Command<DeleteContract> for Controller<Api, N>
where
    Api: Backend<
        Authorized<Delete<By<Contract, contract::Id>>>,
        Ok = (),
        Err = Traced<backend::Error>,
    >,
    N: Notifier,
{
    type Ok = ();
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        DeleteContract(id): DeleteContract,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let _saving = self.start_saving();
        log::debug!("deleting `Contract(id: {id})`");

        self.backend()
            .execute(Authorized::new(
                self.session().clone(),
                Delete(By::new(id)),
            ))
            .await
            .inspect_err(|e| self.report("deleting `Contract`", e.as_ref()))
            .map_err(tracerr::map_from_and_wrap!(=> E))?;
        self.confirm(notifier::DELETED);

        self.update(|s| match s.forest.without(id) {
            Some(forest) => s.forest = forest,
            None => log::debug!("deleted `Contract(id: {id})` is not loaded"),
        });

        Ok(())
    }
}

/// Error of [`DeleteContract`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Backend`] error.
    #[display("`Backend` operation failed: {_0}")]
    Backend(backend::Error),
}
