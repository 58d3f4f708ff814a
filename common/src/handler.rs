//! [`Handler`] abstractions.

use std::future::Future;

/// Executable handler.
///
/// Every seam of the application is expressed as a [`Handler`] of some
/// operation: commands and queries of the service, as well as remote APIs
/// the service talks to.
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
