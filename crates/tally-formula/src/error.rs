//! Formula error types

use thiserror::Error;

/// Result type for formula operations
pub type FormulaResult<T> = std::result::Result<T, FormulaError>;

/// Errors that can occur while tokenizing, transforming or evaluating a formula
///
/// The `Display` text of each variant is the message reported through
/// [`FormulaParser::error_message`](crate::FormulaParser::error_message).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormulaError {
    /// A character outside the formula alphabet
    #[error("Invalid chars on expression")]
    InvalidCharacter,

    /// Malformed token, stack underflow or unmatched bracket
    #[error("Syntax error")]
    Syntax,

    /// Division whose divisor is exactly zero
    #[error("Divide by zero")]
    DivideByZero,

    /// Call to a name missing from the function registry
    #[error("Undefined function: {0}")]
    UndefinedFunction(String),

    /// Function called with an argument count it does not accept
    #[error("Wrong parameters number in: {0}")]
    ArityMismatch(String),

    /// Operator atom the evaluator has no rule for
    #[error("Invalid operator: {0}")]
    UnknownOperator(String),

    /// Rejected parser configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}
