//! Value objects for the bucket domain.

use std::sync::LazyLock;

use common::{Validate, ValidationError};
use regex::Regex;
use serde::{Deserialize, Serialize};

static TITLE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_ -]{3,64}$").expect("title pattern compiles"));

/// Human readable name of a bucket.
///
/// 3 to 64 characters of ASCII letters, digits, `_`, `-` and spaces.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Title(String);

impl Title {
    pub fn new(title: impl Into<String>) -> Self {
        Self(title.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Validate for Title {
    fn validate(&self) -> Result<(), ValidationError> {
        if TITLE_PATTERN.is_match(&self.0) {
            Ok(())
        } else {
            Err(ValidationError::new("title", &self.0))
        }
    }
}

impl std::fmt::Display for Title {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Title {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for Title {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Free text describing a bucket. Any string is accepted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Description(String);

impl Description {
    pub fn new(description: impl Into<String>) -> Self {
        Self(description.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Validate for Description {
    fn validate(&self) -> Result<(), ValidationError> {
        Ok(())
    }
}

impl std::fmt::Display for Description {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Description {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for Description {
    fn from(s: String) -> Self {
        Self(s)
    }
}
