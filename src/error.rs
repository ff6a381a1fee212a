//! Errors produced by warning streams
//!
//! There is exactly one sentinel failure, [`WarnError::Closed`], returned by a
//! [`Collector`](crate::Collector) once it has been closed. Failures from
//! custom writers and readers travel as [`WarnError::Other`] and are passed
//! through untouched. When several independent writes fail (fan-out through a
//! [`MultiWriter`](crate::MultiWriter) or a multi-warning
//! [`Scope::warn`](crate::Scope::warn)), the failures are joined into one
//! [`WarnError::Joined`] that can still be asked whether it contains each of
//! the originals.
//!
//! Running out of data is not an error: readers report it as `Ok(None)`.
//!
//! # Examples
//!
//! ```
//! use ripple::WarnError;
//!
//! let disk = WarnError::other("disk full");
//! let joined = WarnError::join([disk.clone(), WarnError::Closed]).unwrap();
//!
//! assert!(joined.contains(&disk));
//! assert!(joined.is_closed());
//! assert_eq!(joined.errors().len(), 2);
//! ```

use std::error::Error as StdError;
use std::fmt;
use std::sync::Arc;

/// Failure of a warning read or write.
#[derive(Debug, Clone)]
pub enum WarnError {
    /// The stream is permanently closed.
    Closed,
    /// A failure raised by a custom writer or reader.
    Other(Arc<dyn StdError + Send + Sync>),
    /// Several independent failures, in the order they happened.
    Joined(Vec<WarnError>),
}

impl WarnError {
    /// Wrap an arbitrary failure.
    ///
    /// Two `Other` values are equal only if they come from the same call to
    /// `other` (or clones of it).
    ///
    /// # Example
    ///
    /// ```
    /// use ripple::WarnError;
    ///
    /// let a = WarnError::other("boom");
    /// let b = WarnError::other("boom");
    /// assert_eq!(a, a.clone());
    /// assert_ne!(a, b);
    /// ```
    pub fn other<E>(error: E) -> Self
    where
        E: Into<Box<dyn StdError + Send + Sync>>,
    {
        WarnError::Other(Arc::from(error.into()))
    }

    /// Join failures into one.
    ///
    /// Returns `None` for no failures and the failure itself, unchanged, when
    /// there is exactly one. Nested joins are flattened.
    pub fn join<I>(errors: I) -> Option<Self>
    where
        I: IntoIterator<Item = WarnError>,
    {
        errors.into_iter().reduce(WarnError::combine)
    }

    /// Combine two failures into a joined failure.
    ///
    /// Associative: `a.combine(b).combine(c) == a.combine(b.combine(c))`.
    pub fn combine(self, other: Self) -> Self {
        match (self, other) {
            (WarnError::Joined(mut left), WarnError::Joined(right)) => {
                left.extend(right);
                WarnError::Joined(left)
            }
            (WarnError::Joined(mut left), right) => {
                left.push(right);
                WarnError::Joined(left)
            }
            (left, WarnError::Joined(right)) => {
                let mut errors = Vec::with_capacity(right.len() + 1);
                errors.push(left);
                errors.extend(right);
                WarnError::Joined(errors)
            }
            (left, right) => WarnError::Joined(vec![left, right]),
        }
    }

    /// Whether `target` is this failure or one of the failures joined into it.
    pub fn contains(&self, target: &WarnError) -> bool {
        if self == target {
            return true;
        }
        match self {
            WarnError::Joined(errors) => errors.iter().any(|e| e.contains(target)),
            _ => false,
        }
    }

    /// Whether this failure is, or contains, [`WarnError::Closed`].
    pub fn is_closed(&self) -> bool {
        self.contains(&WarnError::Closed)
    }

    /// The individual failures; a single-element slice unless joined.
    pub fn errors(&self) -> &[WarnError] {
        match self {
            WarnError::Joined(errors) => errors,
            single => std::slice::from_ref(single),
        }
    }
}

impl PartialEq for WarnError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (WarnError::Closed, WarnError::Closed) => true,
            (WarnError::Other(a), WarnError::Other(b)) => Arc::ptr_eq(a, b),
            (WarnError::Joined(a), WarnError::Joined(b)) => a == b,
            _ => false,
        }
    }
}

impl fmt::Display for WarnError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WarnError::Closed => write!(f, "warning stream is closed"),
            WarnError::Other(e) => write!(f, "{}", e),
            WarnError::Joined(errors) => {
                for (i, e) in errors.iter().enumerate() {
                    if i > 0 {
                        writeln!(f)?;
                    }
                    write!(f, "{}", e)?;
                }
                Ok(())
            }
        }
    }
}

impl StdError for WarnError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            WarnError::Other(e) => Some(&**e),
            _ => None,
        }
    }
}
