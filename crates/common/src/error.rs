//! Error classification shared by every layer.

use std::error::Error;

/// Broad category of a failure, independent of the concrete error type.
///
/// `Validation`, `Expected` and `NotFound` failures are caused by the caller
/// and are safe to show verbatim. `Unexpected` means a broken invariant
/// (corrupted stream, version check inconsistency) and should be logged
/// with its full chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Bad input; the caller must correct it.
    Validation,
    /// A business rule rejected the command.
    Expected,
    /// The stream does not exist.
    NotFound,
    /// The stream already exists.
    AlreadyExists,
    /// An internal invariant was violated.
    Unexpected,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Validation => "Validation",
            ErrorKind::Expected => "Expected",
            ErrorKind::NotFound => "Not Found",
            ErrorKind::AlreadyExists => "Already Exists",
            ErrorKind::Unexpected => "Unexpected",
        }
    }

    /// Returns true if the message can be shown to the caller as is.
    pub fn is_user_facing(&self) -> bool {
        !matches!(self, ErrorKind::Unexpected)
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Renders an error and all of its sources as `outer: inner: innermost`.
pub fn report(err: &(dyn Error + 'static)) -> String {
    let mut out = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        out.push_str(": ");
        out.push_str(&cause.to_string());
        source = cause.source();
    }
    out
}
