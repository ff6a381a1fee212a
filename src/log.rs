//! Forwarding warnings to `tracing` (requires the `tracing` feature).

use crate::error::WarnError;
use crate::warning::SharedWarning;
use crate::writer::Writer;

/// A writer that emits every warning as a `tracing` WARN event.
///
/// Never fails. Attach it next to a [`Collector`](crate::Collector) to see
/// warnings in the application log as they happen:
///
/// ```rust,ignore
/// let scope = Scope::new()
///     .attach(Arc::clone(&collector))
///     .attach(LogWriter::new().with_source("config"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct LogWriter {
    source: Option<String>,
}

impl LogWriter {
    /// Create a log writer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Tag every event with a `source` field.
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }
}

impl Writer for LogWriter {
    fn write_warning(&self, warning: SharedWarning) -> Result<(), WarnError> {
        match &self.source {
            Some(source) => {
                tracing::warn!(source = %source, warning = %warning, "warning emitted")
            }
            None => tracing::warn!(warning = %warning, "warning emitted"),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use tracing_test::traced_test;

    use super::*;
    use crate::scope::Scope;
    use crate::warning;

    #[traced_test]
    #[test]
    fn logs_each_warning() {
        let scope = Scope::new().attach(LogWriter::new());
        scope.warn_one(warning::new("disk almost full")).unwrap();

        assert!(logs_contain("warning emitted"));
        assert!(logs_contain("disk almost full"));
    }

    #[traced_test]
    #[test]
    fn logs_source_when_named() {
        let writer = LogWriter::new().with_source("config");
        writer.write_warning(warning::new("deprecated key")).unwrap();

        assert!(logs_contain("source=config"));
        assert!(logs_contain("deprecated key"));
    }
}
