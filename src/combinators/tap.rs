//! Tap combinator - observe every warning without changing it.

use crate::error::WarnError;
use crate::warning::SharedWarning;
use crate::writer::Writer;

/// A writer that runs a side effect for each warning, then forwards it.
///
/// The side effect runs before the upstream write, so it has already happened
/// by the time the write's result is known. The warning is always forwarded.
///
/// Created by [`WriterExt::tap`](crate::WriterExt::tap) or
/// [`Scope::tap`](crate::Scope::tap).
pub struct Tap<W, F> {
    pub(crate) inner: W,
    pub(crate) f: F,
}

impl<W, F> Tap<W, F>
where
    W: Writer,
    F: Fn(&SharedWarning) + Send + Sync,
{
    /// Wrap `inner`, calling `f` on every warning.
    pub fn new(inner: W, f: F) -> Self {
        Tap { inner, f }
    }
}

impl<W, F> std::fmt::Debug for Tap<W, F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Tap")
            .field("inner", &"<writer>")
            .field("f", &"<function>")
            .finish()
    }
}

impl<W, F> Writer for Tap<W, F>
where
    W: Writer,
    F: Fn(&SharedWarning) + Send + Sync,
{
    fn write_warning(&self, warning: SharedWarning) -> Result<(), WarnError> {
        (self.f)(&warning);
        self.inner.write_warning(warning)
    }
}
