//! Map combinator - rewrite every warning before it reaches the upstream writer.

use crate::error::WarnError;
use crate::warning::SharedWarning;
use crate::writer::Writer;

/// A writer that transforms each warning and forwards the result.
///
/// Exactly one warning reaches the upstream per write: `f(w)`, never `w`.
///
/// Created by [`WriterExt::map`](crate::WriterExt::map) or
/// [`Scope::map`](crate::Scope::map).
pub struct Map<W, F> {
    pub(crate) inner: W,
    pub(crate) f: F,
}

impl<W, F> Map<W, F>
where
    W: Writer,
    F: Fn(SharedWarning) -> SharedWarning + Send + Sync,
{
    /// Wrap `inner`, rewriting warnings with `f`.
    pub fn new(inner: W, f: F) -> Self {
        Map { inner, f }
    }
}

impl<W, F> std::fmt::Debug for Map<W, F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Map")
            .field("inner", &"<writer>")
            .field("f", &"<function>")
            .finish()
    }
}

impl<W, F> Writer for Map<W, F>
where
    W: Writer,
    F: Fn(SharedWarning) -> SharedWarning + Send + Sync,
{
    fn write_warning(&self, warning: SharedWarning) -> Result<(), WarnError> {
        self.inner.write_warning((self.f)(warning))
    }
}
