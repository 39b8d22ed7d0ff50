//! Top-level error type.

use std::path::PathBuf;

use thiserror::Error;

use zendgen_core::{InternalError, SpecErrors};

/// Errors from a generator run.
#[derive(Debug, Error)]
pub enum GenerateError {
    /// The declarations are invalid. Carries every violation found.
    #[error("invalid extension declarations ({count} errors):\n{0}", count = .0.len())]
    SpecInvalid(SpecErrors),

    /// The generator broke one of its own invariants.
    #[error("internal generator error: {0}")]
    Internal(#[from] InternalError),

    /// Writing the generated header failed.
    #[error("failed to write {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl From<SpecErrors> for GenerateError {
    fn from(errors: SpecErrors) -> Self {
        GenerateError::SpecInvalid(errors)
    }
}

impl GenerateError {
    /// The spec errors, if this is a [`GenerateError::SpecInvalid`].
    pub fn spec_errors(&self) -> Option<&SpecErrors> {
        match self {
            GenerateError::SpecInvalid(errors) => Some(errors),
            _ => None,
        }
    }
}

/// Result alias for generator operations.
pub type GenerateResult<T> = Result<T, GenerateError>;

#[cfg(test)]
mod tests {
    use super::*;
    use zendgen_core::{Location, SpecError, SpecErrorKind};

    #[test]
    fn spec_invalid_lists_every_error() {
        let mut errors = SpecErrors::new();
        errors.push(SpecError::new(
            SpecErrorKind::EmptyUnion,
            Location::Function("f".into()),
            "union type has no members",
        ));
        let err = GenerateError::from(errors);
        assert_eq!(
            err.to_string(),
            "invalid extension declarations (1 errors):\nempty union in function f: union type has no members"
        );
        assert_eq!(err.spec_errors().map(SpecErrors::len), Some(1));
    }

    #[test]
    fn internal_errors_convert() {
        let err: GenerateError = InternalError::NonDeterministic("differs".into()).into();
        assert!(matches!(err, GenerateError::Internal(_)));
        assert!(err.spec_errors().is_none());
    }
}
