//! Stateless value validation.

use thiserror::Error;

/// A value that can check its own invariants.
pub trait Validate {
    fn validate(&self) -> Result<(), ValidationError>;
}

impl<T: Validate> Validate for Option<T> {
    fn validate(&self) -> Result<(), ValidationError> {
        match self {
            Some(value) => value.validate(),
            None => Ok(()),
        }
    }
}

/// A rejected value.
///
/// Failures collected by [`validate_args`] are chained: the outermost error
/// is the last failure and [`std::error::Error::source`] leads back to the
/// earlier ones.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid value {value:?} for {field}")]
pub struct ValidationError {
    field: &'static str,
    value: String,
    #[source]
    wraps: Option<Box<ValidationError>>,
}

impl ValidationError {
    pub fn new(field: &'static str, value: impl Into<String>) -> Self {
        Self {
            field,
            value: value.into(),
            wraps: None,
        }
    }

    /// Name of the rejected field.
    pub fn field(&self) -> &'static str {
        self.field
    }

    /// The rejected value as given.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// The earlier failure this one wraps, if any.
    pub fn wrapped(&self) -> Option<&ValidationError> {
        self.wraps.as_deref()
    }

    /// Iterates the chain from this error down to the first failure.
    pub fn chain(&self) -> impl Iterator<Item = &ValidationError> {
        std::iter::successors(Some(self), |e| e.wrapped())
    }

    /// Field names along the chain, outermost first.
    pub fn fields(&self) -> Vec<&'static str> {
        self.chain().map(|e| e.field).collect()
    }

    fn wrap(&mut self, earlier: ValidationError) {
        match self.wraps {
            Some(ref mut inner) => inner.wrap(earlier),
            None => self.wraps = Some(Box::new(earlier)),
        }
    }
}

/// Validates every argument in order and folds the failures into one chain.
///
/// Returns `Ok(())` only if every argument is valid.
pub fn validate_args(args: &[&dyn Validate]) -> Result<(), ValidationError> {
    let mut failure: Option<ValidationError> = None;

    for arg in args {
        if let Err(mut err) = arg.validate() {
            if let Some(earlier) = failure.take() {
                err.wrap(earlier);
            }
            failure = Some(err);
        }
    }

    match failure {
        Some(err) => Err(err),
        None => Ok(()),
    }
}
