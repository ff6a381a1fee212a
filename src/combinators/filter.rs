//! Filter combinator - forward only the warnings matching a predicate.

use crate::error::WarnError;
use crate::warning::SharedWarning;
use crate::writer::Writer;

/// A writer that forwards a warning only if the predicate holds.
///
/// Rejected warnings are dropped silently and the write succeeds.
///
/// Created by [`WriterExt::filter`](crate::WriterExt::filter) or
/// [`Scope::filter`](crate::Scope::filter).
pub struct Filter<W, P> {
    pub(crate) inner: W,
    pub(crate) predicate: P,
}

impl<W, P> Filter<W, P>
where
    W: Writer,
    P: Fn(&SharedWarning) -> bool + Send + Sync,
{
    /// Wrap `inner`, keeping warnings for which `predicate` returns `true`.
    pub fn new(inner: W, predicate: P) -> Self {
        Filter { inner, predicate }
    }
}

impl<W, P> std::fmt::Debug for Filter<W, P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Filter")
            .field("inner", &"<writer>")
            .field("predicate", &"<function>")
            .finish()
    }
}

impl<W, P> Writer for Filter<W, P>
where
    W: Writer,
    P: Fn(&SharedWarning) -> bool + Send + Sync,
{
    fn write_warning(&self, warning: SharedWarning) -> Result<(), WarnError> {
        if (self.predicate)(&warning) {
            self.inner.write_warning(warning)
        } else {
            Ok(())
        }
    }
}
