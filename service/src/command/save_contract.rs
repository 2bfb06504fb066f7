//! [`Command`] for saving a [`Contract`].

use common::operations::Update;
use derive_more::{Display, Error, From};
use tracerr::Traced;
use tracing as log;

use crate::{
    domain::{
        contract::{self, Candidate, Draft, Level},
        Contract,
    },
    infra::{backend, Authorized, Backend},
    notifier,
    validation::FieldErrors,
    Controller, Notifier,
};

use super::{load_contracts, Command, LoadContracts};

/// [`Command`] for saving new terms of an existing [`Contract`].
///
/// Whatever the outcome, the [`contract::Forest`] of the selected employee is
/// reloaded once the [`Backend`] settles.
///
/// The [`Contract`]'s name and its place in the [`contract::Forest`] are kept
/// as they are.
#[derive(Clone, Debug)]
pub struct SaveContract {
    /// ID of the [`Contract`] to be saved.
    pub id: contract::Id,

    /// Unvalidated new terms of the [`Contract`].
    pub candidate: Candidate,
}

impl<Api, N> Command<SaveContract> for Controller<Api, N>
where
    Api: Backend<
        Authorized<Update<contract::Revision>>,
        Ok = (),
        Err = Traced<backend::Error>,
    >,
    N: Notifier,
    Self: Command<
        LoadContracts,
        Ok = load_contracts::Outcome,
        Err = Traced<load_contracts::ExecutionError>,
    >,
{
    type Ok = ();
    type Err = Traced<ExecutionError>;

    async fn execute(&self, cmd: SaveContract) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let SaveContract { id, candidate } = cmd;

        let (level, positions) = {
            let state = self.state();
            let level = state
                .forest
                .find(id)
                .map_or(Level::Root, |c: &Contract| c.level);
            (level, state.positions.clone())
        };
        let draft = Draft::new(&candidate, level.depth(), &positions)
            .map_err(E::Invalid)
            .map_err(tracerr::wrap!())?;

        let _saving = self.start_saving();
        log::debug!("saving `Contract(id: {id})`");

        let saved = self
            .backend()
            .execute(Authorized::new(
                self.session().clone(),
                Update(contract::Revision { id, level, draft }),
            ))
            .await
            .inspect_err(|e| self.report("saving `Contract`", e.as_ref()));
        if saved.is_ok() {
            self.confirm(notifier::SAVED);
        }

        let employee = self.state().employee;
        if let Err(e) = self.execute(LoadContracts(employee)).await {
            log::warn!("failed to reload `Contract`s after saving: {e}");
        }

        saved.map_err(tracerr::map_from_and_wrap!(=> E))
    }
}

/// Error of [`SaveContract`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Backend`] error.
    #[display("`Backend` operation failed: {_0}")]
    #[from]
    Backend(backend::Error),

    /// Provided [`Candidate`] is invalid.
    #[display("invalid `Contract`: {_0}")]
    Invalid(#[error(not(source))] FieldErrors),
}
