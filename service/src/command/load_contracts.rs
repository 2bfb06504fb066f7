//! [`Command`] for loading an employee's [`Contract`]s.

use common::operations::{By, Select};
use derive_more::{Display, Error, From};
use tracerr::Traced;
use tracing as log;

use crate::{
    domain::{contract::Forest, employee, Contract},
    infra::{backend, Authorized, Backend},
    Controller, Notifier,
};

use super::Command;

/// [`Command`] for loading the [`Contract`]s of the selected employee.
///
/// [`None`] deselects the current employee and clears the [`Forest`].
#[derive(Clone, Copy, Debug)]
pub struct LoadContracts(pub Option<employee::Id>);

/// Outcome of a [`LoadContracts`] [`Command`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Outcome {
    /// No employee is selected, so the [`Forest`] was cleared.
    Cleared,

    /// Loaded [`Forest`] was committed.
    Applied(Forest),

    /// Another employee got selected while loading, so the loaded
    /// [`Contract`]s were discarded.
    Discarded,
}

impl<Api, N> Command<LoadContracts> for Controller<Api, N>
where
    Api: Backend<
        Authorized<Select<By<Vec<Contract>, employee::Id>>>,
        Ok = Vec<Contract>,
        Err = Traced<backend::Error>,
    >,
    N: Notifier,
{
    type Ok = Outcome;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        LoadContracts(employee_id): LoadContracts,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let Some(employee_id) = employee_id else {
            self.update(|s| {
                s.employee = None;
                s.forest = Forest::new();
                s.is_loading = false;
                s.is_loading_error = false;
            });
            log::debug!("no employee selected, `Contract`s cleared");
            return Ok(Outcome::Cleared);
        };

        self.update(|s| {
            if s.employee != Some(employee_id) {
                s.forest = Forest::new();
            }
            s.employee = Some(employee_id);
            s.is_loading = true;
            s.is_loading_error = false;
        });
        log::debug!("loading `Contract`s of `Employee(id: {employee_id})`");

        let loaded = self
            .backend()
            .execute(Authorized::new(
                self.session().clone(),
                Select(By::new(employee_id)),
            ))
            .await;

        // Selection may have changed while awaiting.
        if self.state().employee != Some(employee_id) {
            log::warn!(
                "discarding stale `Contract`s of `Employee(id: {employee_id})`",
            );
            return loaded
                .map(|_| Outcome::Discarded)
                .map_err(tracerr::map_from_and_wrap!(=> E));
        }

        match loaded {
            Ok(contracts) => {
                let forest = Forest::from_contracts(contracts);
                log::debug!(
                    "loaded {} `Contract`s of `Employee(id: {employee_id})`",
                    forest.len(),
                );
                self.update(|s| {
                    s.forest = forest.clone();
                    s.is_loading = false;
                });
                Ok(Outcome::Applied(forest))
            }
            Err(e) => {
                self.update(|s| {
                    s.forest = Forest::new();
                    s.is_loading = false;
                    s.is_loading_error = true;
                });
                self.report("loading `Contract`s", e.as_ref());
                Err(e).map_err(tracerr::map_from_and_wrap!(=> E))
            }
        }
    }
}

/// Error of [`LoadContracts`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Backend`] error.
    #[display("`Backend` operation failed: {_0}")]
    Backend(backend::Error),
}

#[cfg(test)]
mod spec {
    use crate::{
        domain::contract::Depth,
        fixture::{contract, controller, employee, id},
        infra::backend::mock::{Call, Mock, Op},
        Command as _,
    };

    use super::{LoadContracts, Outcome};

    #[tokio::test]
    async fn clears_without_employee() {
        let ctrl = controller(
            Mock::default().with_contracts(employee(1), vec![contract(1, None)]),
        );
        _ = ctrl.execute(LoadContracts(Some(employee(1)))).await.unwrap();

        let outcome = ctrl.execute(LoadContracts(None)).await.unwrap();

        assert_eq!(outcome, Outcome::Cleared);
        let snapshot = ctrl.snapshot();
        assert!(snapshot.forest.is_empty());
        assert_eq!(snapshot.employee, None);
        assert_eq!(ctrl.backend().calls(), [Call::Fetch(employee(1))]);
    }

    #[tokio::test]
    async fn nests_loaded_contracts() {
        let ctrl = controller(Mock::default().with_contracts(
            employee(1),
            vec![
                contract(1, None),
                contract(2, Some(1)),
                contract(3, Some(2)),
                contract(4, None),
            ],
        ));

        let Outcome::Applied(forest) =
            ctrl.execute(LoadContracts(Some(employee(1)))).await.unwrap()
        else {
            panic!("`Contract`s are not applied");
        };

        assert_eq!(forest, ctrl.forest());
        for (depth, c) in forest.iter() {
            if depth == Depth::Amendment {
                let parent = forest.parent_of(c.id).unwrap();
                assert!(parent.is_root());
                assert_eq!(forest.children(c.id).count(), 0);
            }
        }
        assert_eq!(forest.depth(id(2)), Some(Depth::Amendment));
        assert_eq!(forest.depth(id(3)), Some(Depth::Root));
        assert!(!ctrl.snapshot().is_loading);
        assert_eq!(ctrl.backend().tokens(), [Some("t0k3n".to_owned())]);
    }

    #[tokio::test]
    async fn empties_forest_on_failure() {
        let ctrl = controller(
            Mock::default().with_contracts(employee(1), vec![contract(1, None)]),
        );
        _ = ctrl.execute(LoadContracts(Some(employee(1)))).await.unwrap();
        ctrl.backend().fail(Op::Fetch);

        let err = ctrl
            .execute(LoadContracts(Some(employee(1))))
            .await
            .unwrap_err();

        assert_eq!(
            err.to_string(),
            "`Backend` operation failed: HTTP 500: Fetch failed",
        );
        let snapshot = ctrl.snapshot();
        assert!(snapshot.forest.is_empty());
        assert!(snapshot.is_loading_error);
        assert!(!snapshot.is_loading);
        assert_eq!(ctrl.notifier().notifications().len(), 1);

        ctrl.backend().heal(Op::Fetch);
        _ = ctrl.execute(LoadContracts(Some(employee(1)))).await.unwrap();
        assert!(!ctrl.snapshot().is_loading_error);
        assert_eq!(ctrl.forest().len(), 1);
    }

    #[tokio::test]
    async fn discards_stale_load() {
        let ctrl = controller(
            Mock::default()
                .with_contracts(employee(1), vec![contract(1, None)])
                .with_contracts(employee(2), vec![contract(7, None)]),
        );
        let release_a = ctrl.backend().gate(employee(1));
        let release_b = ctrl.backend().gate(employee(2));

        let (a, b, ()) = futures::join!(
            ctrl.execute(LoadContracts(Some(employee(1)))),
            ctrl.execute(LoadContracts(Some(employee(2)))),
            async {
                release_b.send(()).unwrap();
                tokio::task::yield_now().await;
                release_a.send(()).unwrap();
            },
        );

        assert_eq!(a.unwrap(), Outcome::Discarded);
        assert!(matches!(b.unwrap(), Outcome::Applied(_)));
        let snapshot = ctrl.snapshot();
        assert_eq!(snapshot.employee, Some(employee(2)));
        assert!(snapshot.forest.contains(id(7)));
        assert!(!snapshot.forest.contains(id(1)));
    }

    #[tokio::test]
    async fn stale_failure_keeps_flags() {
        let ctrl = controller(
            Mock::default().with_contracts(employee(2), vec![contract(7, None)]),
        );
        ctrl.backend().fail(Op::Fetch);
        let release_a = ctrl.backend().gate(employee(1));

        let (a, ()) = futures::join!(
            ctrl.execute(LoadContracts(Some(employee(1)))),
            async {
                ctrl.backend().heal(Op::Fetch);
                _ = ctrl
                    .execute(LoadContracts(Some(employee(2))))
                    .await
                    .unwrap();
                ctrl.backend().fail(Op::Fetch);
                release_a.send(()).unwrap();
            },
        );

        assert!(a.is_err());
        let snapshot = ctrl.snapshot();
        assert!(!snapshot.is_loading_error);
        assert_eq!(snapshot.employee, Some(employee(2)));
        assert!(snapshot.forest.contains(id(7)));
    }
}
