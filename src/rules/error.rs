//! Rule parsing error definitions.

use thiserror::Error;

/// Errors that can occur while parsing rule text.
///
/// Every variant is fatal to the parse attempt: no `RuleSet` is produced.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuleError {
    /// The configuration is empty or whitespace only.
    #[error("invalid cors rules: cannot be empty")]
    EmptyConfig,

    /// A line did not split into the expected number of `;` fields.
    #[error("invalid cors rules: invalid amount of fields in rule {line}, got {got} want {want}")]
    FieldCountMismatch { line: usize, got: usize, want: usize },

    /// A path entry in the paths field is empty.
    #[error("invalid cors rules: empty path in rule {line}")]
    EmptyPath { line: usize },

    /// A method token is not an HTTP method.
    #[error("invalid cors rules: invalid method {method:?} in rule {line}")]
    InvalidMethod { method: String, line: usize },
}

/// Result type for rule parsing.
pub type RuleResult<T> = Result<T, RuleError>;

impl RuleError {
    /// 1-based line of the offending rule, if the error points at one.
    pub fn line(&self) -> Option<usize> {
        match self {
            RuleError::EmptyConfig => None,
            RuleError::FieldCountMismatch { line, .. }
            | RuleError::EmptyPath { line }
            | RuleError::InvalidMethod { line, .. } => Some(*line),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        assert_eq!(
            RuleError::EmptyConfig.to_string(),
            "invalid cors rules: cannot be empty"
        );
        assert_eq!(
            RuleError::FieldCountMismatch { line: 1, got: 3, want: 4 }.to_string(),
            "invalid cors rules: invalid amount of fields in rule 1, got 3 want 4"
        );
        assert_eq!(
            RuleError::InvalidMethod { method: "FETCH".into(), line: 2 }.to_string(),
            "invalid cors rules: invalid method \"FETCH\" in rule 2"
        );
    }

    #[test]
    fn test_line() {
        assert_eq!(RuleError::EmptyConfig.line(), None);
        assert_eq!(RuleError::EmptyPath { line: 7 }.line(), Some(7));
    }
}
