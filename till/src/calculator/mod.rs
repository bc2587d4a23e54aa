//! Till calculator
//!
//! Evaluates arithmetic typed on the till keypad (`+ - * / %`, parentheses,
//! unary minus, decimal literals) with exact decimal arithmetic. Input is
//! tokenized, parsed into an [`Expr`] tree and evaluated; nothing else is
//! ever executed.

pub mod ast;
pub mod lexer;
pub mod parser;

pub use ast::{BinaryOp, Expr};

use rust_decimal::Decimal;
use shared::error::{AppError, ErrorCode};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CalcError {
    #[error("Expression is empty")]
    Empty,

    #[error("Unexpected character '{found}' at {position}")]
    UnexpectedChar { found: char, position: usize },

    #[error("Invalid number '{literal}' at {position}")]
    InvalidNumber { literal: String, position: usize },

    #[error("Unexpected token {found} at {position}")]
    UnexpectedToken { found: String, position: usize },

    #[error("Unexpected end of expression")]
    UnexpectedEnd,

    #[error("Expression nested deeper than {0} levels")]
    TooDeep(usize),

    #[error("Expression longer than {0} tokens")]
    TooLong(usize),

    #[error("Division by zero")]
    DivisionByZero,

    #[error("Result is out of range")]
    Overflow,
}

impl From<CalcError> for AppError {
    fn from(err: CalcError) -> Self {
        let code = match err {
            CalcError::DivisionByZero => ErrorCode::CalcDivisionByZero,
            CalcError::Overflow => ErrorCode::CalcOverflow,
            _ => ErrorCode::CalcSyntax,
        };
        AppError::with_message(code, err.to_string())
    }
}

/// Parse and evaluate `input`
pub fn evaluate(input: &str) -> Result<Decimal, CalcError> {
    let tokens = lexer::tokenize(input)?;
    let expr = parser::Parser::new(tokens).parse()?;
    Ok(expr.eval()?.normalize())
}
