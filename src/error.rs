// ⚠️ Error Types - shared by every calculator
// Validation, currency and expression failures surfaced to the shells

use thiserror::Error;

/// Result type alias for calculator operations
pub type Result<T> = std::result::Result<T, CalcError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CalcError {
    // =============================
    // Input validation
    // =============================
    #[error("{message}")]
    Validation { field: &'static str, message: String },

    // =============================
    // Currency conversion
    // =============================
    #[error("Please select different currencies")]
    SameCurrency,

    #[error("Conversion between {from} and {to} is not available")]
    UnsupportedCurrencyPair { from: String, to: String },

    // =============================
    // Scientific calculator
    // =============================
    #[error("Expression is incomplete")]
    IncompleteExpression,

    #[error("Syntax error at position {position}: {message}")]
    ExpressionSyntax { position: usize, message: String },

    #[error("Result is not a finite number")]
    NonFiniteResult,
}

impl CalcError {
    pub fn validation(field: &'static str, message: impl Into<String>) -> Self {
        CalcError::Validation {
            field,
            message: message.into(),
        }
    }

    pub fn syntax(position: usize, message: impl Into<String>) -> Self {
        CalcError::ExpressionSyntax {
            position,
            message: message.into(),
        }
    }

    /// True for failures the scientific calculator shows as `Error`
    pub fn is_expression_error(&self) -> bool {
        matches!(
            self,
            CalcError::ExpressionSyntax { .. } | CalcError::NonFiniteResult
        )
    }
}
