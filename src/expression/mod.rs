//! Scientific expression evaluator.
//!
//! PIPELINE: input text --> Lexer --> Tokens --> Parser --> Expr --> evaluate --> display text
//!
//! The grammar is closed: numbers, `+ - * / ^`, parentheses, the functions
//! `sin cos tan asin acos atan log ln sqrt abs pow factorial` and the
//! constants `PI` and `E`. Nothing in the input is ever executed as code.

pub mod ast;
pub mod eval;
pub mod lexer;
pub mod parser;
pub mod token;

pub use ast::{Constant, Expr, Function};
pub use eval::{factorial, AngleMode};
pub use parser::parse;

use crate::error::{CalcError, Result};
use crate::format::{js_number, round_significant, to_exponential};

/// Characters that leave an expression waiting for another operand
const TRAILING_OPERATORS: &[char] = &['+', '-', '−', '*', '×', '/', '÷', '^'];

/// Evaluate `buffer` and return the text the display should show.
///
/// Fails with `IncompleteExpression` for empty input or a dangling operator,
/// `ExpressionSyntax` for anything outside the grammar and `NonFiniteResult`
/// for NaN or infinite results.
pub fn evaluate_expression(buffer: &str, mode: AngleMode) -> Result<String> {
    let trimmed = buffer.trim();
    if trimmed.is_empty() || trimmed.ends_with(TRAILING_OPERATORS) {
        return Err(CalcError::IncompleteExpression);
    }

    let expr = parse(trimmed)?;
    let value = eval::evaluate(&expr, mode);

    if !value.is_finite() {
        tracing::debug!(expression = trimmed, value, "expression produced a non-finite value");
        return Err(CalcError::NonFiniteResult);
    }

    Ok(format_result(value))
}

/// Display rule for a finite result: snap tiny values to zero, exponent form
/// outside `[1e-4, 1e10]`, otherwise twelve significant digits.
pub fn format_result(value: f64) -> String {
    let magnitude = value.abs();
    if magnitude < 1e-10 {
        "0".to_string()
    } else if magnitude > 1e10 || magnitude < 1e-4 {
        to_exponential(value, 6)
    } else {
        js_number(round_significant(value, 12))
    }
}
