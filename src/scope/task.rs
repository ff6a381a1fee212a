//! Tokio task-local ambient scope (requires the `async` feature).
//!
//! The async counterpart of [`ambient`](super::ambient): the scope follows a
//! future across `.await` points and worker threads instead of sticking to a
//! thread.
//!
//! ```rust,ignore
//! use ripple::scope::task;
//!
//! let scope = Scope::new().attach(Arc::clone(&collector));
//! task::enter(scope, async {
//!     fetch().await;
//!     let _ = task::warnf(format_args!("slow response"));
//! })
//! .await;
//! ```

use std::fmt;
use std::future::Future;

use super::Scope;
use crate::error::WarnError;
use crate::warning::SharedWarning;

tokio::task_local! {
    static CURRENT: Scope;
}

/// Run `future` with `scope` as its current scope.
pub fn enter<F>(scope: Scope, future: F) -> impl Future<Output = F::Output>
where
    F: Future,
{
    CURRENT.scope(scope, future)
}

/// A copy of the current task's scope; a scope without writer outside
/// [`enter`].
pub fn current() -> Scope {
    CURRENT.try_with(Scope::clone).unwrap_or_default()
}

/// Emit warnings through the current task's scope. See [`Scope::warn`].
pub fn warn<I>(warnings: I) -> Result<(), WarnError>
where
    I: IntoIterator<Item = SharedWarning>,
{
    current().warn(warnings)
}

/// Emit a formatted warning through the current task's scope.
pub fn warnf(args: fmt::Arguments<'_>) -> Result<(), WarnError> {
    current().warnf(args)
}
