//! Lexer: turns calculator input into tokens.
//!
//! Accepts digits, decimal points, exponent suffixes (`1.5e+10`, as produced
//! by earlier results), `+ - * / ^ ( ) ,`, the `×`/`÷` keypad glyphs, known
//! function names and the constants `PI`, `π`, `E`. Everything else is rejected.

use super::ast::{Constant, Function};
use super::token::{Spanned, Token};
use crate::error::{CalcError, Result};

pub struct Lexer<'a> {
    chars: Vec<char>,
    pos: usize,
    input: &'a str,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Lexer {
            chars: input.chars().collect(),
            pos: 0,
            input,
        }
    }

    pub fn input(&self) -> &'a str {
        self.input
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<char> {
        self.chars.get(self.pos + offset).copied()
    }

    /// Tokenize the whole input, ending with `Token::Eof`
    pub fn tokenize(mut self) -> Result<Vec<Spanned>> {
        let mut tokens = Vec::new();

        while let Some(c) = self.peek() {
            let position = self.pos;

            if c.is_whitespace() {
                self.pos += 1;
                continue;
            }

            let token = match c {
                '0'..='9' | '.' => self.number()?,
                '+' => self.single(Token::Plus),
                '-' | '−' => self.single(Token::Minus),
                '*' | '×' => self.single(Token::Star),
                '/' | '÷' => self.single(Token::Slash),
                '^' => self.single(Token::Caret),
                '(' => self.single(Token::LParen),
                ')' => self.single(Token::RParen),
                ',' => self.single(Token::Comma),
                'π' => self.single(Token::Constant(Constant::Pi)),
                c if c.is_ascii_alphabetic() => self.identifier()?,
                other => {
                    return Err(CalcError::syntax(
                        position,
                        format!("unexpected character '{}'", other),
                    ))
                }
            };

            tokens.push(Spanned { token, position });
        }

        tokens.push(Spanned {
            token: Token::Eof,
            position: self.pos,
        });
        Ok(tokens)
    }

    fn single(&mut self, token: Token) -> Token {
        self.pos += 1;
        token
    }

    fn number(&mut self) -> Result<Token> {
        let start = self.pos;

        while matches!(self.peek(), Some(c) if c.is_ascii_digit()) {
            self.pos += 1;
        }
        if self.peek() == Some('.') {
            self.pos += 1;
            while matches!(self.peek(), Some(c) if c.is_ascii_digit()) {
                self.pos += 1;
            }
        }

        // Exponent only when digits follow; a bare `E` is the constant
        if matches!(self.peek(), Some('e') | Some('E')) {
            let sign = matches!(self.peek_at(1), Some('+') | Some('-'));
            let digit_offset = if sign { 2 } else { 1 };
            if matches!(self.peek_at(digit_offset), Some(c) if c.is_ascii_digit()) {
                self.pos += digit_offset;
                while matches!(self.peek(), Some(c) if c.is_ascii_digit()) {
                    self.pos += 1;
                }
            }
        }

        let text: String = self.chars[start..self.pos].iter().collect();
        text.parse::<f64>()
            .map(Token::Number)
            .map_err(|_| CalcError::syntax(start, format!("invalid number '{}'", text)))
    }

    fn identifier(&mut self) -> Result<Token> {
        let start = self.pos;
        while matches!(self.peek(), Some(c) if c.is_ascii_alphabetic()) {
            self.pos += 1;
        }
        let name: String = self.chars[start..self.pos].iter().collect();

        if let Some(function) = Function::from_name(&name) {
            Ok(Token::Function(function))
        } else if let Some(constant) = Constant::from_name(&name) {
            Ok(Token::Constant(constant))
        } else {
            Err(CalcError::syntax(start, format!("unknown name '{}'", name)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(input: &str) -> Vec<Token> {
        Lexer::new(input)
            .tokenize()
            .unwrap()
            .into_iter()
            .map(|s| s.token)
            .collect()
    }

    #[test]
    fn test_arithmetic_tokens() {
        assert_eq!(
            tokens("2+3.5*(1-.5)"),
            vec![
                Token::Number(2.0),
                Token::Plus,
                Token::Number(3.5),
                Token::Star,
                Token::LParen,
                Token::Number(1.0),
                Token::Minus,
                Token::Number(0.5),
                Token::RParen,
                Token::Eof,
            ]
        );
    }

    #[test]
    fn test_exponent_literal() {
        assert_eq!(tokens("1.234568e+10"), vec![Token::Number(1.234568e10), Token::Eof]);
        assert_eq!(tokens("5e-3"), vec![Token::Number(0.005), Token::Eof]);
    }

    #[test]
    fn test_constant_e_is_not_an_exponent() {
        assert_eq!(
            tokens("2*E"),
            vec![Token::Number(2.0), Token::Star, Token::Constant(Constant::E), Token::Eof]
        );
    }

    #[test]
    fn test_functions_and_glyphs() {
        assert_eq!(
            tokens("sqrt(9)×π"),
            vec![
                Token::Function(Function::Sqrt),
                Token::LParen,
                Token::Number(9.0),
                Token::RParen,
                Token::Star,
                Token::Constant(Constant::Pi),
                Token::Eof,
            ]
        );
    }

    #[test]
    fn test_unknown_names_rejected() {
        let err = Lexer::new("alert(1)").tokenize().unwrap_err();
        assert_eq!(err, CalcError::syntax(0, "unknown name 'alert'"));
        assert!(Lexer::new("Math.sin(1)").tokenize().is_err());
        assert!(Lexer::new("x=1").tokenize().is_err());
    }

    #[test]
    fn test_lone_decimal_point_rejected() {
        assert!(Lexer::new("1+.").tokenize().is_err());
    }
}
