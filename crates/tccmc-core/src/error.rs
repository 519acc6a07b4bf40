//! Error types for the model checking pipeline

use thiserror::Error;

/// Main error type for checker operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CheckerError {
    #[error("unknown proposition: {name}")]
    UnknownProposition { name: String },

    #[error("malformed formula: {message}")]
    MalformedFormula { message: String },

    #[error("mutex class member {name} is not a declared proposition")]
    UndeclaredClassMember { name: String },

    #[error("state {from} has an edge to undefined state {to}")]
    UndefinedState { from: usize, to: usize },

    #[error("malformed structure: {message}")]
    MalformedStructure { message: String },

    #[error("internal invariant violation: {message}")]
    Internal { message: String },
}

impl CheckerError {
    /// Create an unknown-proposition error
    pub fn unknown_proposition(name: impl Into<String>) -> Self {
        Self::UnknownProposition { name: name.into() }
    }

    /// Create a malformed-formula error
    pub fn malformed_formula(message: impl Into<String>) -> Self {
        Self::MalformedFormula {
            message: message.into(),
        }
    }

    /// Create a malformed-structure error
    pub fn malformed_structure(message: impl Into<String>) -> Self {
        Self::MalformedStructure {
            message: message.into(),
        }
    }

    /// Create an internal invariant violation
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }
}

/// Result type for checker operations
pub type CheckerResult<T> = Result<T, CheckerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let error = CheckerError::unknown_proposition("z=9");
        assert_eq!(error.to_string(), "unknown proposition: z=9");

        let error = CheckerError::UndefinedState { from: 3, to: 7 };
        assert_eq!(error.to_string(), "state 3 has an edge to undefined state 7");
    }

    #[test]
    fn test_helper_constructors() {
        match CheckerError::internal("atom 4 lost store consistency") {
            CheckerError::Internal { message } => {
                assert_eq!(message, "atom 4 lost store consistency");
            }
            _ => panic!("expected internal error"),
        }
    }
}
