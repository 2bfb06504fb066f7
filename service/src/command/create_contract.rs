//! [`Command`] for creating a [`Contract`].

use common::operations::Insert;
use derive_more::{Display, Error, From};
use tracerr::Traced;
use tracing as log;

use crate::{
    domain::{
        contract::{self, Candidate, Depth, Draft, Level},
        Contract,
    },
    infra::{backend, Authorized, Backend},
    notifier,
    validation::{self, FieldErrors},
    Controller, Notifier,
};

use super::Command;

/// [`Command`] for creating a new [`Contract`] of the selected employee.
///
/// The created [`Contract`] is only placed into the loaded
/// [`contract::Forest`] once the [`Backend`] confirms its creation.
#[derive(Clone, Debug)]
pub struct CreateContract {
    /// Unvalidated terms of the new [`Contract`].
    pub candidate: Candidate,

    /// ID of the root [`Contract`] to be amended, if any.
    pub parent_id: Option<contract::Id>,
}

impl<Api, N> Command<CreateContract> for Controller<Api, N>
where
    Api: Backend<
        Authorized<Insert<contract::New>>,
        Ok = Contract,
        Err = Traced<backend::Error>,
    >,
    N: Notifier,
{
    type Ok = Contract;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: CreateContract,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let CreateContract {
            candidate,
            parent_id,
        } = cmd;

        let (employee_id, positions) = {
            let state = self.state();
            let employee_id = state
                .employee
                .ok_or(E::NoEmployeeSelected)
                .map_err(tracerr::wrap!())?;
            if let Some(parent_id) = parent_id {
                if state.forest.depth(parent_id) == Some(Depth::Amendment) {
                    return Err(tracerr::new!(E::ParentIsAmendment(parent_id)));
                }
            }
            (employee_id, state.positions.clone())
        };

        let draft = Draft::new(
            &candidate,
            Level::from_parent(parent_id).depth(),
            &positions,
        )
        .map_err(E::Invalid)
        .map_err(tracerr::wrap!())?;
        let name = validation::non_blank(candidate.name.as_deref())
            .and_then(contract::Name::new);

        let _saving = self.start_saving();
        log::debug!(
            "creating `Contract` of `Employee(id: {employee_id})`{}",
            parent_id
                .map(|p| format!(" amending `Contract(id: {p})`"))
                .unwrap_or_default(),
        );

        let created = self
            .backend()
            .execute(Authorized::new(
                self.session().clone(),
                Insert(contract::New {
                    employee_id,
                    parent_id,
                    name,
                    draft,
                }),
            ))
            .await
            .inspect_err(|e| self.report("creating `Contract`", e.as_ref()))
            .map_err(tracerr::map_from_and_wrap!(=> E))?;
        self.confirm(notifier::CREATED);

        let placed = self.update(|s| {
            let selected = s.employee == Some(employee_id);
            if selected {
                s.forest = s.forest.with_inserted(created.clone());
            }
            selected
        });
        if placed {
            log::debug!("`Contract(id: {})` created", created.id);
        } else {
            log::warn!(
                "`Contract(id: {})` created for no longer selected \
                 `Employee(id: {employee_id})`",
                created.id,
            );
        }

        Ok(created)
    }
}

/// Error of [`CreateContract`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Backend`] error.
    #[display("`Backend` operation failed: {_0}")]
    #[from]
    Backend(backend::Error),

    /// Provided [`Candidate`] is invalid.
    #[display("invalid `Contract`: {_0}")]
    Invalid(#[error(not(source))] FieldErrors),

    /// No employee is selected to create a [`Contract`] for.
    #[display("no employee is selected")]
    NoEmployeeSelected,

    /// Amended [`Contract`] is an amendment itself.
    #[display("`Contract(id: {_0})` is an amendment and cannot be amended")]
    ParentIsAmendment(#[error(not(source))] contract::Id),
}
