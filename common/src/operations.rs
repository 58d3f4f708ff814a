//! Operations a [`Handler`] may be executed with.
//!
//! [`Handler`]: crate::Handler

use std::marker::PhantomData;

/// Operation creating a new remote resource out of the wrapped value.
#[derive(Clone, Copy, Debug)]
pub struct Insert<T>(pub T);

/// Operation reading a remote resource described by the wrapped selector.
#[derive(Clone, Copy, Debug)]
pub struct Select<T>(pub T);

/// Selector of a `W`hat by a `B`.
///
/// `W` only tells apart [`Select`]s of different resources sharing the same
/// `B`.
#[derive(Clone, Copy, Debug)]
pub struct By<W, B> {
    by: B,
    _what: PhantomData<fn() -> W>,
}

impl<W, B> By<W, B> {
    /// Selects a `W` by the provided `by` value.
    #[must_use]
    pub fn new(by: B) -> Self {
        Self {
            by,
            _what: PhantomData,
        }
    }

    /// Unwraps the value this [`By`] selects with.
    #[must_use]
    pub fn into_inner(self) -> B {
        self.by
    }
}
