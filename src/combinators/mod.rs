//! Writer transform combinators.
//!
//! Each combinator wraps exactly one upstream [`Writer`](crate::Writer) and
//! changes what reaches it:
//!
//! - [`Map`] - rewrites every warning;
//! - [`Filter`] - drops warnings failing a predicate;
//! - [`Tap`] - runs a side effect and passes warnings through;
//! - [`reduce`] / [`Flush`] - buffers warnings and later folds them into one.
//!
//! They are usually installed through [`Scope`](crate::Scope), which swaps the
//! scope's active writer for the wrapped one, or built directly with
//! [`WriterExt`](crate::WriterExt).

mod filter;
mod map;
mod reduce;
mod tap;

pub use filter::Filter;
pub use map::Map;
pub use reduce::{reduce, Flush};
pub use tap::Tap;
