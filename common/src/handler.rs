//! [`Handler`] abstractions.

use std::future::Future;

/// Executable handler.
///
/// Returned futures are not required to be [`Send`], so a [`Handler`] may keep
/// its state behind single-threaded interior mutability.
pub trait Handler<Args = ()> {
    /// Type of successful [`Handler`] result.
    type Ok;

    /// Type of this [`Handler`] error.
    type Err;

    /// Executes this [`Handler`] with the provided arguments.
    fn execute(
        &self,
        args: Args,
    ) -> impl Future<Output = Result<Self::Ok, Self::Err>>;
}
