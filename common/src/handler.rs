//! [`Handler`] abstractions.

use std::future::Future;

/// Executor of an operation described by its `Args`.
///
/// A single [`Handler`] implementor may execute many operations, each
/// declaring its own success and error types.
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
