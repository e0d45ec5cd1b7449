//! Recursive-descent parser producing an [`Expr`] tree.
//!
//! Precedence, lowest first:
//! - `+ -`
//! - `* /`
//! - unary `+ -`
//! - `^` (right-associative, so `-2^2 == -4` and `2^3^2 == 512`)
//! - numbers, constants, calls, parentheses
//!
//! Nesting (parentheses, calls, unary signs, powers and operator chains) is
//! capped at [`MAX_DEPTH`] so neither parsing nor evaluation can exhaust the stack.

use super::ast::{BinaryOp, Expr, Function, UnaryOp};
use super::lexer::Lexer;
use super::token::{Spanned, Token};
use crate::error::{CalcError, Result};

/// Deepest expression tree the parser will build
pub const MAX_DEPTH: usize = 256;

pub struct Parser {
    tokens: Vec<Spanned>,
    pos: usize,
    depth: usize,
}

/// Parse a complete expression; trailing tokens are an error.
pub fn parse(input: &str) -> Result<Expr> {
    let tokens = Lexer::new(input).tokenize()?;
    let mut parser = Parser::new(tokens);
    let expr = parser.expression()?;
    parser.expect(Token::Eof)?;
    Ok(expr)
}

impl Parser {
    pub fn new(tokens: Vec<Spanned>) -> Self {
        Parser {
            tokens,
            pos: 0,
            depth: 0,
        }
    }

    /// Enter one more level of the tree, failing past `MAX_DEPTH`
    fn descend(&mut self, position: usize) -> Result<()> {
        self.depth += 1;
        if self.depth > MAX_DEPTH {
            return Err(CalcError::syntax(position, "expression nested too deeply"));
        }
        Ok(())
    }

    fn current(&self) -> Spanned {
        // tokenize() always ends with Eof, so the last token is a safe fallback
        self.tokens
            .get(self.pos)
            .or_else(|| self.tokens.last())
            .copied()
            .unwrap_or(Spanned {
                token: Token::Eof,
                position: 0,
            })
    }

    fn advance(&mut self) -> Spanned {
        let current = self.current();
        if self.pos < self.tokens.len() {
            self.pos += 1;
        }
        current
    }

    fn expect(&mut self, expected: Token) -> Result<()> {
        let current = self.current();
        if current.token == expected {
            self.advance();
            Ok(())
        } else {
            Err(unexpected(current, &format!("expected {}", expected)))
        }
    }

    pub fn expression(&mut self) -> Result<Expr> {
        // Operator chains build left-deep trees, one level per operator
        let depth = self.depth;
        let mut lhs = self.term()?;
        loop {
            let op = match self.current().token {
                Token::Plus => BinaryOp::Add,
                Token::Minus => BinaryOp::Subtract,
                _ => {
                    self.depth = depth;
                    return Ok(lhs);
                }
            };
            let position = self.advance().position;
            self.descend(position)?;
            let rhs = self.term()?;
            lhs = Expr::binary(op, lhs, rhs);
        }
    }

    fn term(&mut self) -> Result<Expr> {
        let depth = self.depth;
        let mut lhs = self.unary()?;
        loop {
            let op = match self.current().token {
                Token::Star => BinaryOp::Multiply,
                Token::Slash => BinaryOp::Divide,
                _ => {
                    self.depth = depth;
                    return Ok(lhs);
                }
            };
            let position = self.advance().position;
            self.descend(position)?;
            let rhs = self.unary()?;
            lhs = Expr::binary(op, lhs, rhs);
        }
    }

    fn unary(&mut self) -> Result<Expr> {
        let op = match self.current().token {
            Token::Minus => UnaryOp::Negate,
            Token::Plus => UnaryOp::Plus,
            _ => return self.power(),
        };
        let position = self.advance().position;
        self.descend(position)?;
        let operand = self.unary()?;
        self.depth -= 1;
        Ok(Expr::unary(op, operand))
    }

    fn power(&mut self) -> Result<Expr> {
        let base = self.primary()?;
        if self.current().token == Token::Caret {
            let position = self.advance().position;
            self.descend(position)?;
            let exponent = self.unary()?;
            self.depth -= 1;
            return Ok(Expr::binary(BinaryOp::Power, base, exponent));
        }
        Ok(base)
    }

    fn primary(&mut self) -> Result<Expr> {
        let current = self.advance();
        match current.token {
            Token::Number(n) => Ok(Expr::Number(n)),
            Token::Constant(c) => Ok(Expr::Constant(c)),
            Token::Function(function) => self.call(function),
            Token::LParen => {
                self.descend(current.position)?;
                let inner = self.expression()?;
                self.depth -= 1;
                self.expect(Token::RParen)?;
                Ok(inner)
            }
            _ => Err(unexpected(current, "expected a number, function or '('")),
        }
    }

    fn call(&mut self, function: Function) -> Result<Expr> {
        let open = self.current();
        self.expect(Token::LParen)?;
        self.descend(open.position)?;

        let mut args = vec![self.expression()?];
        while self.current().token == Token::Comma {
            self.advance();
            args.push(self.expression()?);
        }

        self.depth -= 1;
        let close = self.current();
        self.expect(Token::RParen)?;

        if args.len() != function.arity() {
            return Err(CalcError::syntax(
                close.position,
                format!(
                    "{} takes {} argument(s), got {}",
                    function.name(),
                    function.arity(),
                    args.len()
                ),
            ));
        }
        Ok(Expr::Call(function, args))
    }
}

fn unexpected(found: Spanned, hint: &str) -> CalcError {
    CalcError::syntax(found.position, format!("unexpected {}, {}", found.token, hint))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expression::ast::Constant;

    #[test]
    fn test_precedence() {
        assert_eq!(
            parse("1+2*3").unwrap(),
            Expr::binary(
                BinaryOp::Add,
                Expr::Number(1.0),
                Expr::binary(BinaryOp::Multiply, Expr::Number(2.0), Expr::Number(3.0))
            )
        );
    }

    #[test]
    fn test_power_binds_tighter_than_negation() {
        assert_eq!(
            parse("-2^2").unwrap(),
            Expr::unary(
                UnaryOp::Negate,
                Expr::binary(BinaryOp::Power, Expr::Number(2.0), Expr::Number(2.0))
            )
        );
    }

    #[test]
    fn test_power_is_right_associative() {
        assert_eq!(
            parse("2^3^2").unwrap(),
            Expr::binary(
                BinaryOp::Power,
                Expr::Number(2.0),
                Expr::binary(BinaryOp::Power, Expr::Number(3.0), Expr::Number(2.0))
            )
        );
    }

    #[test]
    fn test_calls_and_constants() {
        assert_eq!(
            parse("pow(2, PI)").unwrap(),
            Expr::Call(Function::Pow, vec![Expr::Number(2.0), Expr::Constant(Constant::Pi)])
        );
    }

    #[test]
    fn test_arity_enforced() {
        assert!(parse("pow(2)").is_err());
        assert!(parse("sin(1, 2)").is_err());
    }

    #[test]
    fn test_nesting_limit() {
        let within = format!("{}1{}", "(".repeat(MAX_DEPTH - 1), ")".repeat(MAX_DEPTH - 1));
        assert!(parse(&within).is_ok());

        let beyond = format!("{}1{}", "(".repeat(MAX_DEPTH + 1), ")".repeat(MAX_DEPTH + 1));
        assert_eq!(
            parse(&beyond),
            Err(CalcError::syntax(MAX_DEPTH, "expression nested too deeply"))
        );
    }

    #[test]
    fn test_operator_chains_are_bounded() {
        let product = vec!["(1)"; MAX_DEPTH * 2].join("*");
        assert!(parse(&product).is_err());
        let powers = vec!["2"; MAX_DEPTH * 2].join("^");
        assert!(parse(&powers).is_err());

        let sums = vec!["(1+1)"; 100].join("*");
        assert!(parse(&sums).is_ok());
    }

    #[test]
    fn test_malformed_input() {
        assert!(parse("2+").is_err());
        assert!(parse("(1+2").is_err());
        assert!(parse("1+2)").is_err());
        assert!(parse("sin 30").is_err());
        assert!(parse("2(3)").is_err());
        assert!(parse("").is_err());
        assert!(parse("*2").is_err());
    }
}
