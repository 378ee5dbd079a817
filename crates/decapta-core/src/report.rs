//! Batch reports
//!
//! Sources are processed independently: one broken file is recorded here
//! and the batch moves on.

use crate::Error;

/// Outcome of processing a directory of sources.
#[derive(Debug, Default)]
pub struct BatchReport {
    /// Files written or collections produced
    pub actions: Vec<String>,
    /// Skipped inputs
    pub warnings: Vec<String>,
    /// Failed sources with their error
    pub errors: Vec<SourceFailure>,
}

/// A source that could not be processed.
#[derive(Debug)]
pub struct SourceFailure {
    pub source_name: String,
    pub error: Error,
}

impl BatchReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn action(&mut self, action: impl Into<String>) {
        self.actions.push(action.into());
    }

    pub fn warn(&mut self, warning: impl Into<String>) {
        let warning = warning.into();
        tracing::warn!("{warning}");
        self.warnings.push(warning);
    }

    pub fn fail(&mut self, source_name: impl Into<String>, error: Error) {
        let source_name = source_name.into();
        tracing::error!(source = %source_name, %error, "source failed");
        self.errors.push(SourceFailure { source_name, error });
    }

    /// Record the outcome of one source.
    pub fn record<T>(&mut self, source_name: &str, result: crate::Result<T>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(error) => {
                self.fail(source_name, error);
                None
            }
        }
    }

    pub fn is_success(&self) -> bool {
        self.errors.is_empty()
    }

    /// Fail with [`Error::BatchFailed`] when any source failed.
    pub fn check(&self) -> crate::Result<()> {
        if self.is_success() {
            Ok(())
        } else {
            Err(Error::BatchFailed {
                failed: self.errors.len(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failed_source_does_not_stop_recording() {
        let mut report = BatchReport::new();
        let failed: crate::Result<()> = Err(Error::BatchFailed { failed: 0 });
        assert!(report.record("a", failed).is_none());
        assert_eq!(report.record("b", Ok(3)), Some(3));
        report.action("wrote b");

        assert!(!report.is_success());
        assert_eq!(report.errors[0].source_name, "a");
        assert!(matches!(report.check(), Err(Error::BatchFailed { failed: 1 })));
    }
}
