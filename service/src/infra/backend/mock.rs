//! In-memory [`Backend`] for tests.

use std::{
    cell::RefCell,
    collections::{HashMap, HashSet},
};

use common::operations::{By, Delete, Insert, Select, Update};
use tokio::sync::oneshot;
use tracerr::Traced;

use crate::{
    domain::{
        contract::{self, Contract, Level, Name},
        employee, position, Document,
    },
    infra::backend::{self, Authorized, Backend, Rejection},
};

/// Kind of an operation performed on a [`Mock`].
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub(crate) enum Op {
    Fetch,
    Positions,
    Create,
    Update,
    Delete,
    Document,
}

/// Operation recorded by a [`Mock`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) enum Call {
    Fetch(employee::Id),
    Positions,
    Create(Option<contract::Id>),
    Update(contract::Id),
    Delete(contract::Id),
    Document(contract::Id),
}

/// In-memory [`Backend`] with switchable failures and gated fetches.
#[derive(Debug, Default)]
pub(crate) struct Mock {
    state: RefCell<State>,
}

#[derive(Debug)]
struct State {
    contracts: HashMap<employee::Id, Vec<Contract>>,
    positions: position::Catalog,
    gates: HashMap<employee::Id, oneshot::Receiver<()>>,
    failing: HashSet<Op>,
    calls: Vec<Call>,
    revisions: Vec<contract::Revision>,
    tokens: Vec<Option<String>>,
    next_id: i64,
}

impl Default for State {
    fn default() -> Self {
        Self {
            contracts: HashMap::new(),
            positions: position::Catalog::default(),
            gates: HashMap::new(),
            failing: HashSet::new(),
            calls: Vec::new(),
            revisions: Vec::new(),
            tokens: Vec::new(),
            next_id: 100,
        }
    }
}

impl Mock {
    pub(crate) fn with_contracts(
        self,
        employee: employee::Id,
        contracts: Vec<Contract>,
    ) -> Self {
        self.set_contracts(employee, contracts);
        self
    }

    pub(crate) fn with_positions(self, positions: position::Catalog) -> Self {
        self.state.borrow_mut().positions = positions;
        self
    }

    pub(crate) fn set_contracts(
        &self,
        employee: employee::Id,
        contracts: Vec<Contract>,
    ) {
        _ = self.state.borrow_mut().contracts.insert(employee, contracts);
    }

    /// Makes the provided [`Op`] fail until [`Mock::heal()`]ed.
    pub(crate) fn fail(&self, op: Op) {
        _ = self.state.borrow_mut().failing.insert(op);
    }

    pub(crate) fn heal(&self, op: Op) {
        _ = self.state.borrow_mut().failing.remove(&op);
    }

    /// Holds the next fetch of the provided employee's [`Contract`]s until
    /// the returned sender fires (or is dropped).
    pub(crate) fn gate(&self, employee: employee::Id) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        _ = self.state.borrow_mut().gates.insert(employee, rx);
        tx
    }

    pub(crate) fn calls(&self) -> Vec<Call> {
        self.state.borrow().calls.clone()
    }

    /// Returns every [`contract::Revision`] received so far.
    pub(crate) fn revisions(&self) -> Vec<contract::Revision> {
        self.state.borrow().revisions.clone()
    }

    pub(crate) fn tokens(&self) -> Vec<Option<String>> {
        self.state.borrow().tokens.clone()
    }

    fn record(
        &self,
        op: Op,
        call: Call,
        session: &crate::domain::Session,
    ) -> Result<(), Traced<backend::Error>> {
        let mut state = self.state.borrow_mut();
        state.calls.push(call);
        state
            .tokens
            .push(session.token().map(|t| t.expose().to_owned()));
        if state.failing.contains(&op) {
            return Err(tracerr::new!(backend::Error::Rejected(
                Rejection::new(Some(500), format!("{op:?} failed")),
            )));
        }
        Ok(())
    }
}

impl Backend<Authorized<Select<By<Vec<Contract>, employee::Id>>>> for Mock {
    type Ok = Vec<Contract>;
    type Err = Traced<backend::Error>;

    async fn execute(
        &self,
        Authorized { session, op: Select(by) }: Authorized<
            Select<By<Vec<Contract>, employee::Id>>,
        >,
    ) -> Result<Self::Ok, Self::Err> {
        let employee = by.into_inner();
        let gate = self.state.borrow_mut().gates.remove(&employee);
        if let Some(gate) = gate {
            _ = gate.await;
        }
        self.record(Op::Fetch, Call::Fetch(employee), &session)?;
        Ok(self
            .state
            .borrow()
            .contracts
            .get(&employee)
            .cloned()
            .unwrap_or_default())
    }
}

impl Backend<Authorized<Select<By<position::Catalog, position::Active>>>>
    for Mock
{
    type Ok = position::Catalog;
    type Err = Traced<backend::Error>;

    async fn execute(
        &self,
        Authorized { session, .. }: Authorized<
            Select<By<position::Catalog, position::Active>>,
        >,
    ) -> Result<Self::Ok, Self::Err> {
        self.record(Op::Positions, Call::Positions, &session)?;
        Ok(self.state.borrow().positions.clone())
    }
}

impl Backend<Authorized<Insert<contract::New>>> for Mock {
    type Ok = Contract;
    type Err = Traced<backend::Error>;

    async fn execute(
        &self,
        Authorized { session, op: Insert(new) }: Authorized<
            Insert<contract::New>,
        >,
    ) -> Result<Self::Ok, Self::Err> {
        self.record(Op::Create, Call::Create(new.parent_id), &session)?;
        let mut state = self.state.borrow_mut();
        let id = contract::Id::from(state.next_id);
        state.next_id += 1;
        let draft = new.draft;
        let created = Contract {
            id,
            level: Level::from_parent(new.parent_id),
            name: new.name.unwrap_or_else(|| Name::placeholder(id)),
            kind: draft.kind,
            signed_at: draft.signed_at,
            valid_from: draft.valid_from,
            valid_to: draft.valid_to,
            position: draft.position,
            earning_conditions: draft.earning_conditions,
        };
        state
            .contracts
            .entry(new.employee_id)
            .or_default()
            .push(created.clone());
        Ok(created)
    }
}

impl Backend<Authorized<Update<contract::Revision>>> for Mock {
    type Ok = ();
    type Err = Traced<backend::Error>;

    async fn execute(
        &self,
        Authorized { session, op: Update(revision) }: Authorized<
            Update<contract::Revision>,
        >,
    ) -> Result<Self::Ok, Self::Err> {
        self.record(Op::Update, Call::Update(revision.id), &session)?;
        let mut state = self.state.borrow_mut();
        state.revisions.push(revision.clone());
        let draft = revision.draft;
        for c in state.contracts.values_mut().flatten() {
            if c.id == revision.id {
                c.level = revision.level;
                c.kind = draft.kind;
                c.signed_at = draft.signed_at;
                c.valid_from = draft.valid_from;
                c.valid_to = draft.valid_to;
                c.position = draft.position.clone();
                c.earning_conditions = draft.earning_conditions;
            }
        }
        Ok(())
    }
}

impl Backend<Authorized<Delete<By<Contract, contract::Id>>>> for Mock {
    type Ok = ();
    type Err = Traced<backend::Error>;

    async fn execute(
        &self,
        Authorized { session, op: Delete(by) }: Authorized<
            Delete<By<Contract, contract::Id>>,
        >,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();
        self.record(Op::Delete, Call::Delete(id), &session)?;
        for list in self.state.borrow_mut().contracts.values_mut() {
            list.retain(|c| c.id != id && c.parent_id() != Some(id));
        }
        Ok(())
    }
}

impl Backend<Authorized<Select<By<Document, contract::Id>>>> for Mock {
    type Ok = Document;
    type Err = Traced<backend::Error>;

    async fn execute(
        &self,
        Authorized { session, op: Select(by) }: Authorized<
            Select<By<Document, contract::Id>>,
        >,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();
        self.record(Op::Document, Call::Document(id), &session)?;
        Ok(Document {
            file_name: Some(format!("umowa_{id}.pdf")),
            content: b"%PDF-1.7".to_vec(),
        })
    }
}
