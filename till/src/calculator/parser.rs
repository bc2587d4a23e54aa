//! Recursive-descent parser
//!
//! ```text
//! expr    := term (('+' | '-') term)*
//! term    := unary (('*' | '/' | '%') unary)*
//! unary   := ('-' | '+') unary | primary
//! primary := NUMBER | '(' expr ')'
//! ```

use super::CalcError;
use super::ast::{BinaryOp, Expr};
use super::lexer::Token;

/// Nesting limit for parentheses and unary signs
const MAX_DEPTH: usize = 64;

pub struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    depth: usize,
}

impl Parser {
    pub fn new(tokens: Vec<Token>) -> Self {
        Self {
            tokens,
            pos: 0,
            depth: 0,
        }
    }

    /// Parse the whole token stream as one expression
    pub fn parse(mut self) -> Result<Expr, CalcError> {
        if self.tokens.is_empty() {
            return Err(CalcError::Empty);
        }
        let expr = self.expr()?;
        match self.peek() {
            None => Ok(expr),
            Some(token) => Err(CalcError::UnexpectedToken {
                found: format!("{:?}", token),
                position: self.pos,
            }),
        }
    }

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn next(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).cloned();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn enter(&mut self) -> Result<(), CalcError> {
        self.depth += 1;
        if self.depth > MAX_DEPTH {
            return Err(CalcError::TooDeep(MAX_DEPTH));
        }
        Ok(())
    }

    fn expr(&mut self) -> Result<Expr, CalcError> {
        let mut lhs = self.term()?;
        loop {
            let op = match self.peek() {
                Some(Token::Plus) => BinaryOp::Add,
                Some(Token::Minus) => BinaryOp::Sub,
                _ => return Ok(lhs),
            };
            self.pos += 1;
            let rhs = self.term()?;
            lhs = Expr::binary(op, lhs, rhs);
        }
    }

    fn term(&mut self) -> Result<Expr, CalcError> {
        let mut lhs = self.unary()?;
        loop {
            let op = match self.peek() {
                Some(Token::Star) => BinaryOp::Mul,
                Some(Token::Slash) => BinaryOp::Div,
                Some(Token::Percent) => BinaryOp::Rem,
                _ => return Ok(lhs),
            };
            self.pos += 1;
            let rhs = self.unary()?;
            lhs = Expr::binary(op, lhs, rhs);
        }
    }

    fn unary(&mut self) -> Result<Expr, CalcError> {
        match self.peek() {
            Some(Token::Minus) => {
                self.pos += 1;
                self.enter()?;
                let inner = self.unary()?;
                self.depth -= 1;
                Ok(Expr::Neg(Box::new(inner)))
            }
            Some(Token::Plus) => {
                self.pos += 1;
                self.enter()?;
                let inner = self.unary();
                self.depth -= 1;
                inner
            }
            _ => self.primary(),
        }
    }

    fn primary(&mut self) -> Result<Expr, CalcError> {
        let position = self.pos;
        match self.next() {
            Some(Token::Number(value)) => Ok(Expr::Number(value)),
            Some(Token::LParen) => {
                self.enter()?;
                let inner = self.expr()?;
                self.depth -= 1;
                match self.next() {
                    Some(Token::RParen) => Ok(inner),
                    Some(token) => Err(CalcError::UnexpectedToken {
                        found: format!("{:?}", token),
                        position: self.pos - 1,
                    }),
                    None => Err(CalcError::UnexpectedEnd),
                }
            }
            Some(token) => Err(CalcError::UnexpectedToken {
                found: format!("{:?}", token),
                position,
            }),
            None => Err(CalcError::UnexpectedEnd),
        }
    }
}
