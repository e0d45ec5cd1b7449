//! Tree-walking evaluator.

use super::ast::{BinaryOp, Expr, Function, UnaryOp};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AngleMode {
    #[default]
    Degrees,
    Radians,
}

impl AngleMode {
    pub fn toggled(self) -> AngleMode {
        match self {
            AngleMode::Degrees => AngleMode::Radians,
            AngleMode::Radians => AngleMode::Degrees,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            AngleMode::Degrees => "DEG",
            AngleMode::Radians => "RAD",
        }
    }
}

impl fmt::Display for AngleMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for AngleMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "deg" | "degrees" => Ok(AngleMode::Degrees),
            "rad" | "radians" => Ok(AngleMode::Radians),
            other => Err(format!("unknown angle mode '{}'", other)),
        }
    }
}

/// `n!` over integers `2..=n`; NaN for negative input, 1 for 0 and 1.
///
/// Non-integer input multiplies every integer up to `n` (`factorial(5.5) == 120`).
pub fn factorial(n: f64) -> f64 {
    if n.is_nan() || n < 0.0 {
        return f64::NAN;
    }
    let mut result = 1.0;
    let mut i = 2.0;
    while i <= n {
        result *= i;
        if result.is_infinite() {
            break;
        }
        i += 1.0;
    }
    result
}

pub fn evaluate(expr: &Expr, mode: AngleMode) -> f64 {
    match expr {
        Expr::Number(n) => *n,
        Expr::Constant(c) => c.value(),
        Expr::Unary(op, operand) => {
            let value = evaluate(operand, mode);
            match op {
                UnaryOp::Plus => value,
                UnaryOp::Negate => -value,
            }
        }
        Expr::Binary(op, lhs, rhs) => {
            let a = evaluate(lhs, mode);
            let b = evaluate(rhs, mode);
            match op {
                BinaryOp::Add => a + b,
                BinaryOp::Subtract => a - b,
                BinaryOp::Multiply => a * b,
                BinaryOp::Divide => a / b,
                BinaryOp::Power => a.powf(b),
            }
        }
        Expr::Call(function, args) => {
            let values: Vec<f64> = args.iter().map(|arg| evaluate(arg, mode)).collect();
            apply(*function, &values, mode)
        }
    }
}

fn apply(function: Function, args: &[f64], mode: AngleMode) -> f64 {
    let x = args.first().copied().unwrap_or(f64::NAN);
    let to_radians = |v: f64| match mode {
        AngleMode::Degrees => v * std::f64::consts::PI / 180.0,
        AngleMode::Radians => v,
    };
    let from_radians = |v: f64| match mode {
        AngleMode::Degrees => v * 180.0 / std::f64::consts::PI,
        AngleMode::Radians => v,
    };

    match function {
        Function::Sin => to_radians(x).sin(),
        Function::Cos => to_radians(x).cos(),
        Function::Tan => to_radians(x).tan(),
        Function::Asin => from_radians(x.asin()),
        Function::Acos => from_radians(x.acos()),
        Function::Atan => from_radians(x.atan()),
        Function::Log => x.log10(),
        Function::Ln => x.ln(),
        Function::Sqrt => x.sqrt(),
        Function::Abs => x.abs(),
        Function::Pow => x.powf(args.get(1).copied().unwrap_or(f64::NAN)),
        Function::Factorial => factorial(x),
    }
}
