//! [`Query`] collection related to a single [`Contract`].

use std::convert::Infallible;

use crate::{
    domain::{contract, Contract},
    Controller,
};

use super::Query;

/// Queries a loaded [`Contract`] by its [`contract::Id`].
#[derive(Clone, Copy, Debug)]
pub struct ContractById(pub contract::Id);

impl<Api, N> Query<ContractById> for Controller<Api, N> {
    type Ok = Option<Contract>;
    type Err = Infallible;

    async fn execute(
        &self,
        ContractById(id): ContractById,
    ) -> Result<Self::Ok, Self::Err> {
        Ok(self.state().forest.find(id).cloned())
    }
}

#[cfg(test)]
mod spec {
    use crate::{
        command::LoadContracts,
        fixture::{contract, controller, employee, id},
        infra::backend::mock::Mock,
        Command as _,
    };

    use super::{ContractById, Query as _};

    #[tokio::test]
    async fn finds_at_any_depth() {
        let ctrl = controller(Mock::default().with_contracts(
            employee(1),
            vec![contract(1, None), contract(2, Some(1))],
        ));
        _ = ctrl.execute(LoadContracts(Some(employee(1)))).await.unwrap();

        for i in [1, 2] {
            let found = ctrl.execute(ContractById(id(i))).await.unwrap();
            assert_eq!(found.map(|c| c.id), Some(id(i)));
        }
        assert_eq!(ctrl.execute(ContractById(id(3))).await.unwrap(), None);
    }
}
