//! Thread-local ambient scope.
//!
//! For code that cannot take a [`Scope`] parameter: [`enter`] makes a scope
//! current on this thread for the duration of a closure, and [`warn`] /
//! [`warnf`] emit through whatever scope is current. Outside of `enter` the
//! current scope has no writer, so emitting is a no-op.
//!
//! ```
//! use std::sync::Arc;
//! use ripple::prelude::*;
//! use ripple::scope::ambient;
//!
//! fn deep_helper(n: i32) -> i32 {
//!     if n < 0 {
//!         let _ = ambient::warnf(format_args!("negative input {}", n));
//!     }
//!     n.abs()
//! }
//!
//! let collector = Arc::new(Collector::new());
//! let scope = Scope::new().attach(Arc::clone(&collector));
//!
//! let result = ambient::enter(scope, || deep_helper(-3));
//! assert_eq!(result, 3);
//! assert_eq!(collector.len(), 1);
//!
//! // Outside `enter` nothing is collected.
//! deep_helper(-4);
//! assert_eq!(collector.len(), 1);
//! ```

use std::cell::RefCell;
use std::fmt;

use super::Scope;
use crate::error::WarnError;
use crate::warning::SharedWarning;

thread_local! {
    static CURRENT: RefCell<Scope> = RefCell::new(Scope::new());
}

struct Restore(Option<Scope>);

impl Drop for Restore {
    fn drop(&mut self) {
        if let Some(previous) = self.0.take() {
            let _ = CURRENT.try_with(|current| *current.borrow_mut() = previous);
        }
    }
}

/// Run `f` with `scope` as this thread's current scope.
///
/// The previous scope is restored when `f` returns or unwinds. Calls nest.
pub fn enter<R, F>(scope: Scope, f: F) -> R
where
    F: FnOnce() -> R,
{
    let previous = CURRENT.with(|current| current.replace(scope));
    let _restore = Restore(Some(previous));
    f()
}

/// A copy of this thread's current scope.
pub fn current() -> Scope {
    CURRENT
        .try_with(|current| current.borrow().clone())
        .unwrap_or_default()
}

/// Emit warnings through the current scope. See [`Scope::warn`].
pub fn warn<I>(warnings: I) -> Result<(), WarnError>
where
    I: IntoIterator<Item = SharedWarning>,
{
    current().warn(warnings)
}

/// Emit a formatted warning through the current scope. See [`Scope::warnf`].
pub fn warnf(args: fmt::Arguments<'_>) -> Result<(), WarnError> {
    current().warnf(args)
}
