//! Error publishing collaborator.
//!
//! Components that must keep going after a failure (the registry when the
//! declaration file is missing, the action runner when one project fails)
//! report through an [`ErrorSink`] instead of returning early.

/// The declaration file or another input file does not exist.
pub const FILE_NOT_FOUND: i32 = 2;

/// An input file exists but could not be read.
pub const IO_FAILURE: i32 = 5;

/// A repository action failed for one project.
pub const ACTION_FAILED: i32 = 1;

/// A virtual `alias/project` path did not resolve.
pub const INVALID_VIRTUAL_PATH: i32 = 22;

/// Receives errors that are reported without aborting the caller.
pub trait ErrorSink {
    /// Publishes one error with its code and a formatted message.
    fn publish(&mut self, code: i32, message: &str);
}

impl<S: ErrorSink + ?Sized> ErrorSink for &mut S {
    fn publish(&mut self, code: i32, message: &str) {
        (**self).publish(code, message);
    }
}

/// A published error kept in memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishedError {
    pub code: i32,
    pub message: String,
}

/// Sink that stores everything it receives.
#[derive(Debug, Default)]
pub struct CollectingErrorSink {
    errors: Vec<PublishedError>,
}

impl CollectingErrorSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn errors(&self) -> &[PublishedError] {
        &self.errors
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }
}

impl ErrorSink for CollectingErrorSink {
    fn publish(&mut self, code: i32, message: &str) {
        tracing::debug!(code, message, "error published");
        self.errors.push(PublishedError {
            code,
            message: message.to_string(),
        });
    }
}
