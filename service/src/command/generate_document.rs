//! [`Command`] for generating a [`Document`] of a [`Contract`].

use common::operations::{By, Select};
use derive_more::{Display, Error, From};
use tracerr::Traced;
use tracing as log;

use crate::{
    domain::{contract, Document},
    infra::{backend, Authorized, Backend},
    Controller, Notifier,
};

#[cfg(doc)]
use crate::domain::Contract;

use super::Command;

/// [`Command`] for generating a [`Document`] of a [`Contract`].
#[derive(Clone, Copy, Debug)]
pub struct GenerateDocument(pub contract::Id);

impl<Api, N> Command<GenerateDocument> for Controller<Api, N>
where
    Api: Backend<
        Authorized<Select<By<Document, contract::Id>>>,
        Ok = Document,
        Err = Traced<backend::Error>,
    >,
    N: Notifier,
{
    type Ok = Document;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        GenerateDocument(id): GenerateDocument,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        log::debug!("generating `Document` of `Contract(id: {id})`");

        self.backend()
            .execute(Authorized::new(
                self.session().clone(),
                Select(By::new(id)),
            ))
            .await
            .inspect_err(|e| self.report("generating `Document`", e.as_ref()))
            .map_err(tracerr::map_from_and_wrap!(=> E))
    }
}

/// Error of [`GenerateDocument`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Backend`] error.
    #[display("`Backend` operation failed: {_0}")]
    Backend(backend::Error),
}
