//! Service contains the business logic of the application.
//!
//! List of available Cargo features:
#![doc = document_features::document_features!()]
#![deny(
    nonstandard_style,
    rust_2018_idioms,
    rustdoc::all,
    trivial_casts,
    trivial_numeric_casts,
    unsafe_code
)]
#![forbid(non_ascii_idents)]
#![warn(
    clippy::allow_attributes,
    clippy::allow_attributes_without_reason,
    clippy::pedantic,
    clippy::wildcard_enum_match_arm,
    deprecated_in_future,
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs,
    unreachable_pub,
    unused_crate_dependencies,
    unused_import_braces,
    unused_labels,
    unused_lifetimes,
    unused_qualifications,
    unused_results
)]

pub mod command;
pub mod domain;
#[cfg(test)]
mod fixture;
pub mod infra;
pub mod notifier;
pub mod query;
pub mod validation;

use std::cell::{Ref, RefCell};

use tracing as log;

use crate::domain::{contract::Forest, employee, position, Session};

#[cfg(doc)]
use crate::infra::Backend;

pub use self::{
    command::Command,
    notifier::{Notification, Notifier},
    query::Query,
};

/// Synchronization controller of an employee's [`Contract`] hierarchy.
///
/// Single-threaded: its state is only ever touched between `.await` points.
///
/// [`Contract`]: domain::Contract
#[derive(Debug)]
pub struct Controller<Api, N> {
    /// [`Backend`] of this [`Controller`].
    backend: Api,

    /// [`Notifier`] reporting failures of this [`Controller`].
    notifier: N,

    /// [`Session`] every [`Backend`] operation is performed with.
    session: Session,

    /// Current [`State`] of this [`Controller`].
    state: RefCell<State>,
}

impl<Api, N> Controller<Api, N> {
    /// Creates a new [`Controller`] with the provided parameters.
    #[must_use]
    pub fn new(backend: Api, notifier: N, session: Session) -> Self {
        Self {
            backend,
            notifier,
            session,
            state: RefCell::new(State::default()),
        }
    }

    /// Returns the [`Backend`] of this [`Controller`].
    #[must_use]
    pub fn backend(&self) -> &Api {
        &self.backend
    }

    /// Returns the [`Notifier`] of this [`Controller`].
    #[must_use]
    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    /// Returns the [`Session`] of this [`Controller`].
    #[must_use]
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Returns a [`Snapshot`] of the current state of this [`Controller`].
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        let state = self.state();
        Snapshot {
            employee: state.employee,
            forest: state.forest.clone(),
            is_loading: state.is_loading,
            is_loading_error: state.is_loading_error,
            is_saving: state.pending_mutations > 0,
        }
    }

    /// Returns the currently loaded [`Forest`].
    #[must_use]
    pub fn forest(&self) -> Forest {
        self.state().forest.clone()
    }

    /// Returns the [`position::Catalog`] titles are resolved against.
    #[must_use]
    pub fn positions(&self) -> position::Catalog {
        self.state().positions.clone()
    }

    /// Replaces the [`position::Catalog`] titles are resolved against.
    pub fn replace_positions(&self, positions: position::Catalog) {
        log::debug!("replacing catalog with {} positions", positions.len());
        self.update(|s| s.positions = positions);
    }

    /// Borrows the current [`State`].
    fn state(&self) -> Ref<'_, State> {
        self.state.borrow()
    }

    /// Mutates the current [`State`] with the provided function.
    fn update<T>(&self, f: impl FnOnce(&mut State) -> T) -> T {
        f(&mut self.state.borrow_mut())
    }

    /// Marks a mutation as in flight until the returned [`Saving`] guard is
    /// dropped.
    fn start_saving(&self) -> Saving<'_> {
        self.update(|s| s.pending_mutations += 1);
        Saving(&self.state)
    }
}

impl<Api, N: Notifier> Controller<Api, N> {
    /// Reports the provided [`Backend`] failure of the named `operation`.
    fn report(&self, operation: &str, err: &infra::backend::Error) {
        log::error!("{operation} failed: {err}");
        self.notifier.notify(Notification::error(err.to_string()));
    }

    /// Confirms the successful completion of a mutation to the user.
    fn confirm(&self, message: &str) {
        log::info!("{message}");
        self.notifier.notify(Notification::success(message));
    }
}

/// Observable state of a [`Controller`].
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Snapshot {
    /// Currently selected employee, if any.
    pub employee: Option<employee::Id>,

    /// [`Forest`] of the selected employee's [`Contract`]s.
    ///
    /// [`Contract`]: domain::Contract
    pub forest: Forest,

    /// Indicator whether the [`Forest`] is being loaded.
    pub is_loading: bool,

    /// Indicator whether the last load of the [`Forest`] failed.
    pub is_loading_error: bool,

    /// Indicator whether any mutation is in flight.
    pub is_saving: bool,
}

/// Mutable state of a [`Controller`].
#[derive(Debug, Default)]
struct State {
    employee: Option<employee::Id>,
    forest: Forest,
    positions: position::Catalog,
    is_loading: bool,
    is_loading_error: bool,
    pending_mutations: usize,
}

/// Guard of an in-flight mutation.
#[derive(Debug)]
struct Saving<'s>(&'s RefCell<State>);

impl Drop for Saving<'_> {
    fn drop(&mut self) {
        let mut state = self.0.borrow_mut();
        state.pending_mutations = state.pending_mutations.saturating_sub(1);
    }
}
