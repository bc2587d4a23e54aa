//! Tokenizer for calculator input

use rust_decimal::Decimal;
use std::str::FromStr;

use super::CalcError;

#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    Number(Decimal),
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    LParen,
    RParen,
}

/// Longest accepted expression, in tokens
///
/// Binary chains build one tree level per operator, so this also bounds the
/// recursion depth of evaluation.
pub const MAX_TOKENS: usize = 1024;

/// Split `input` into tokens; whitespace is ignored
pub fn tokenize(input: &str) -> Result<Vec<Token>, CalcError> {
    let chars: Vec<char> = input.chars().collect();
    let mut tokens = Vec::new();
    let mut pos = 0;

    while pos < chars.len() {
        let c = chars[pos];
        let token = match c {
            c if c.is_whitespace() => {
                pos += 1;
                continue;
            }
            '+' => Token::Plus,
            '-' => Token::Minus,
            '*' => Token::Star,
            '/' => Token::Slash,
            '%' => Token::Percent,
            '(' => Token::LParen,
            ')' => Token::RParen,
            c if c.is_ascii_digit() || c == '.' => {
                let start = pos;
                while pos < chars.len() && (chars[pos].is_ascii_digit() || chars[pos] == '.') {
                    pos += 1;
                }
                let literal: String = chars[start..pos].iter().collect();
                let value = Decimal::from_str(&literal).map_err(|_| CalcError::InvalidNumber {
                    literal: literal.clone(),
                    position: start,
                })?;
                tokens.push(Token::Number(value));
                if tokens.len() > MAX_TOKENS {
                    return Err(CalcError::TooLong(MAX_TOKENS));
                }
                continue;
            }
            other => {
                return Err(CalcError::UnexpectedChar {
                    found: other,
                    position: pos,
                });
            }
        };
        tokens.push(token);
        pos += 1;
        if tokens.len() > MAX_TOKENS {
            return Err(CalcError::TooLong(MAX_TOKENS));
        }
    }

    Ok(tokens)
}
