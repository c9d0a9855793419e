//! Arithmetic evaluation for the `calculate` command.
//!
//! Only digits, `.`, whitespace, parentheses and `+ - * /` are accepted, which
//! still allows `//` (floor division) and `**` (power). Precedence follows the
//! usual rules: `**` binds tighter than unary minus, which binds tighter than
//! the multiplicative operators.

use crate::error::NovaError;

const ALLOWED: &str = "0123456789+-*/(). ";
/// Bound on nesting: parentheses, chained signs and chained powers all count.
const MAX_DEPTH: usize = 256;

#[derive(Debug, Clone, Copy, PartialEq)]
enum Token {
    Num(f64),
    Plus,
    Minus,
    Star,
    Slash,
    DoubleSlash,
    Pow,
    LParen,
    RParen,
}

/// Evaluate `expression` to a float.
pub fn evaluate(expression: &str) -> Result<f64, NovaError> {
    if !expression.chars().all(|c| ALLOWED.contains(c)) {
        return Err(NovaError::Calculation(
            "Invalid characters in expression".to_string(),
        ));
    }
    let tokens = tokenize(expression).map_err(invalid)?;
    if tokens.is_empty() {
        return Err(invalid("empty expression"));
    }
    let mut parser = Parser {
        tokens,
        pos: 0,
        depth: 0,
    };
    let value = parser.expr().map_err(invalid)?;
    if let Some(tok) = parser.peek() {
        return Err(invalid(format!("unexpected token {tok:?}")));
    }
    if !value.is_finite() {
        return Err(invalid("result out of range"));
    }
    Ok(value)
}

/// Float rendering used in replies: whole numbers keep one decimal (`4.0`).
pub fn format_result(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e16 {
        format!("{value:.1}")
    } else {
        format!("{value}")
    }
}

fn invalid(detail: impl std::fmt::Display) -> NovaError {
    NovaError::Calculation(format!("Invalid expression: {detail}"))
}

fn tokenize(input: &str) -> Result<Vec<Token>, String> {
    let chars: Vec<char> = input.chars().collect();
    let mut tokens = Vec::new();
    let mut i = 0;
    while i < chars.len() {
        let c = chars[i];
        match c {
            ' ' => i += 1,
            '+' => {
                tokens.push(Token::Plus);
                i += 1;
            }
            '-' => {
                tokens.push(Token::Minus);
                i += 1;
            }
            '*' if chars.get(i + 1) == Some(&'*') => {
                tokens.push(Token::Pow);
                i += 2;
            }
            '*' => {
                tokens.push(Token::Star);
                i += 1;
            }
            '/' if chars.get(i + 1) == Some(&'/') => {
                tokens.push(Token::DoubleSlash);
                i += 2;
            }
            '/' => {
                tokens.push(Token::Slash);
                i += 1;
            }
            '(' => {
                tokens.push(Token::LParen);
                i += 1;
            }
            ')' => {
                tokens.push(Token::RParen);
                i += 1;
            }
            _ => {
                let start = i;
                while i < chars.len() && (chars[i].is_ascii_digit() || chars[i] == '.') {
                    i += 1;
                }
                let literal: String = chars[start..i].iter().collect();
                if literal == "." {
                    return Err("invalid syntax".to_string());
                }
                let value = literal
                    .parse::<f64>()
                    .map_err(|_| format!("invalid number '{literal}'"))?;
                tokens.push(Token::Num(value));
            }
        }
    }
    Ok(tokens)
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    depth: usize,
}

impl Parser {
    fn peek(&self) -> Option<Token> {
        self.tokens.get(self.pos).copied()
    }

    fn next(&mut self) -> Option<Token> {
        let tok = self.peek();
        self.pos += 1;
        tok
    }

    fn nested(&mut self, f: fn(&mut Self) -> Result<f64, String>) -> Result<f64, String> {
        if self.depth >= MAX_DEPTH {
            return Err("expression is nested too deeply".to_string());
        }
        self.depth += 1;
        let result = f(self);
        self.depth -= 1;
        result
    }

    fn expr(&mut self) -> Result<f64, String> {
        let mut acc = self.term()?;
        while let Some(tok @ (Token::Plus | Token::Minus)) = self.peek() {
            self.pos += 1;
            let rhs = self.term()?;
            acc = if tok == Token::Plus { acc + rhs } else { acc - rhs };
        }
        Ok(acc)
    }

    fn term(&mut self) -> Result<f64, String> {
        let mut acc = self.unary()?;
        while let Some(tok @ (Token::Star | Token::Slash | Token::DoubleSlash)) = self.peek() {
            self.pos += 1;
            let rhs = self.unary()?;
            acc = match tok {
                Token::Star => acc * rhs,
                _ if rhs == 0.0 => return Err("division by zero".to_string()),
                Token::Slash => acc / rhs,
                _ => (acc / rhs).floor(),
            };
        }
        Ok(acc)
    }

    fn unary(&mut self) -> Result<f64, String> {
        match self.peek() {
            Some(Token::Minus) => {
                self.pos += 1;
                Ok(-self.nested(Self::unary)?)
            }
            Some(Token::Plus) => {
                self.pos += 1;
                self.nested(Self::unary)
            }
            _ => self.power(),
        }
    }

    fn power(&mut self) -> Result<f64, String> {
        let base = self.atom()?;
        if self.peek() == Some(Token::Pow) {
            self.pos += 1;
            // right-associative, and the exponent may carry its own sign
            let exponent = self.nested(Self::unary)?;
            if base == 0.0 && exponent < 0.0 {
                return Err("0.0 cannot be raised to a negative power".to_string());
            }
            return Ok(base.powf(exponent));
        }
        Ok(base)
    }

    fn atom(&mut self) -> Result<f64, String> {
        match self.next() {
            Some(Token::Num(v)) => Ok(v),
            Some(Token::LParen) => {
                let v = self.nested(Self::expr)?;
                match self.next() {
                    Some(Token::RParen) => Ok(v),
                    _ => Err("'(' was never closed".to_string()),
                }
            }
            Some(tok) => Err(format!("unexpected token {tok:?}")),
            None => Err("unexpected end of expression".to_string()),
        }
    }
}
