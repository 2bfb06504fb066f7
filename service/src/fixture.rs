//! Test fixtures.

use std::cell::RefCell;

use rust_decimal::Decimal;

use crate::{
    domain::{
        contract::{self, Candidate, Contract, EarningConditions, Level},
        employee,
        position::{self, Position},
        session::Token,
        Session,
    },
    infra::backend::mock::Mock,
    Controller, Notification, Notifier,
};

/// [`Notifier`] remembering every delivered [`Notification`].
#[derive(Debug, Default)]
pub(crate) struct Recorder(RefCell<Vec<Notification>>);

impl Recorder {
    /// Returns all the [`Notification`]s delivered so far.
    pub(crate) fn notifications(&self) -> Vec<Notification> {
        self.0.borrow().clone()
    }
}

impl Notifier for Recorder {
    fn notify(&self, notification: Notification) {
        self.0.borrow_mut().push(notification);
    }
}

/// Creates a [`Controller`] over the provided [`Mock`] with an authorized
/// [`Session`].
pub(crate) fn controller(mock: Mock) -> Controller<Mock, Recorder> {
    Controller::new(
        mock,
        Recorder::default(),
        Session::new(Token::new("t0k3n").unwrap()),
    )
}

/// Creates a [`contract::Id`] out of the provided number.
pub(crate) fn id(id: i64) -> contract::Id {
    contract::Id::from(id)
}

/// Creates an [`employee::Id`] out of the provided number.
pub(crate) fn employee(id: i64) -> employee::Id {
    employee::Id::from(id)
}

/// Creates a valid [`Contract`], amending the `parent` one if provided.
pub(crate) fn contract(id: i64, parent: Option<i64>) -> Contract {
    Contract {
        id: self::id(id),
        level: Level::from_parent(parent.map(self::id)),
        name: format!("Umowa nr {id}").parse().unwrap(),
        kind: None,
        signed_at: "2024-01-01".parse().unwrap(),
        valid_from: "2024-01-01".parse().unwrap(),
        valid_to: None,
        position: None,
        earning_conditions: EarningConditions {
            hourly_rate: Decimal::from(30),
            ..EarningConditions::default()
        },
    }
}

/// Creates a valid root [`Candidate`].
pub(crate) fn candidate() -> Candidate {
    Candidate {
        name: None,
        kind: None,
        signed_at: "2024-01-01".into(),
        valid_from: "2024-01-01".into(),
        valid_to: Some("2024-12-31".into()),
        position: Some("Magazynier".into()),
        hourly_rate: Some(Decimal::from(30)),
        bonus_enabled: false,
        bonus: None,
        bonus_threshold: None,
    }
}

/// Creates a [`position::Catalog`] of a few [`Position`]s.
pub(crate) fn positions() -> position::Catalog {
    ["Magazynier", "Kierowca"]
        .into_iter()
        .enumerate()
        .map(|(i, title)| Position {
            id: Some(position::Id::from(i64::try_from(i).unwrap() + 1)),
            title: title.parse().unwrap(),
        })
        .collect()
}
