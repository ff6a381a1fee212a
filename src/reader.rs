//! Reading warnings

use crate::error::WarnError;
use crate::warning::SharedWarning;

/// A source of warnings.
///
/// `read_warning` has three distinguishable outcomes:
///
/// - `Ok(Some(w))` - the next warning;
/// - `Ok(None)` - no more warnings right now (exhausted);
/// - `Err(e)` - a failure, e.g. [`WarnError::Closed`].
pub trait Reader {
    /// Read one warning.
    fn read_warning(&mut self) -> Result<Option<SharedWarning>, WarnError>;
}

impl<R: Reader + ?Sized> Reader for &mut R {
    fn read_warning(&mut self) -> Result<Option<SharedWarning>, WarnError> {
        (**self).read_warning()
    }
}

impl<R: Reader + ?Sized> Reader for Box<R> {
    fn read_warning(&mut self) -> Result<Option<SharedWarning>, WarnError> {
        (**self).read_warning()
    }
}

/// Read every warning until the reader is exhausted.
///
/// Exhaustion ends the read normally. Any failure discards what was read so
/// far and is returned unchanged, so the result is never partial.
///
/// # Example
///
/// ```
/// use ripple::prelude::*;
///
/// let collector = Collector::new();
/// collector.write_warning(warning::new("this is a warning 1")).unwrap();
/// collector.write_warning(warning::new("this is a warning 2")).unwrap();
///
/// let warnings = read_all(&collector).unwrap();
/// let messages: Vec<String> = warnings.iter().map(|w| w.message()).collect();
/// assert_eq!(messages, vec!["this is a warning 1", "this is a warning 2"]);
/// ```
pub fn read_all<R: Reader>(mut reader: R) -> Result<Vec<SharedWarning>, WarnError> {
    let mut result = Vec::new();
    while let Some(warning) = reader.read_warning()? {
        result.push(warning);
    }
    Ok(result)
}
