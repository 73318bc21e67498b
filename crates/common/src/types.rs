use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::validation::{Validate, ValidationError};

static STREAM_ID_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9]{3,64}$").expect("stream id pattern compiles"));

static REQUEST_ID_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[0-9a-fA-F]{8}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{12}$")
        .expect("request id pattern compiles")
});

/// Identifier of an event stream, and therefore of the aggregate instance
/// whose history the stream holds.
///
/// Valid identifiers are 3 to 64 ASCII alphanumeric characters. The wrapper
/// itself accepts any string so that untrusted input can be carried around
/// and rejected by [`Validate::validate`] at the command boundary.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StreamId(String);

impl StreamId {
    /// Wraps a raw identifier without validating it.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generates a fresh, valid identifier.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().simple().to_string())
    }

    /// Wraps and validates a raw identifier.
    pub fn parse(id: impl Into<String>) -> Result<Self, ValidationError> {
        let id = Self::new(id);
        id.validate()?;
        Ok(id)
    }

    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Validate for StreamId {
    fn validate(&self) -> Result<(), ValidationError> {
        if STREAM_ID_PATTERN.is_match(&self.0) {
            Ok(())
        } else {
            Err(ValidationError::new("id", &self.0))
        }
    }
}

impl std::fmt::Display for StreamId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for StreamId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for StreamId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl AsRef<str> for StreamId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Correlation identifier of the request that caused an event.
///
/// Must be an RFC 4122 UUID in its hyphenated text form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RequestId(String);

impl RequestId {
    /// Generates a new random request ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Wraps a raw request ID without validating it.
    pub fn from_raw(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for RequestId {
    fn default() -> Self {
        Self::new()
    }
}

impl Validate for RequestId {
    fn validate(&self) -> Result<(), ValidationError> {
        if REQUEST_ID_PATTERN.is_match(&self.0) {
            Ok(())
        } else {
            Err(ValidationError::new("request_id", &self.0))
        }
    }
}

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<Uuid> for RequestId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid.to_string())
    }
}
