//! Abstract operations.

use std::marker::PhantomData;

/// Operation to load a whole collection of values.
#[derive(Clone, Copy, Debug)]
pub struct Load<C: ?Sized>(PhantomData<C>);

impl<C: ?Sized> Default for Load<C> {
    fn default() -> Self {
        Self(PhantomData)
    }
}

impl<C: ?Sized> Load<C> {
    /// Creates a new [`Load`] operation.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

/// Operation to persist a whole collection of values, replacing the
/// previously persisted one.
#[derive(Clone, Copy, Debug)]
pub struct Save<C>(pub C);

/// Operation to persist a binary payload.
#[derive(Clone, Debug)]
pub struct Persist<T>(pub T);

/// Operation to remove a previously persisted value.
#[derive(Clone, Debug)]
pub struct Remove<T>(pub T);
