//! Expression tree and its evaluation

use rust_decimal::Decimal;

use super::CalcError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Rem,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Number(Decimal),
    Neg(Box<Expr>),
    Binary {
        op: BinaryOp,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },
}

impl Expr {
    pub fn binary(op: BinaryOp, lhs: Expr, rhs: Expr) -> Self {
        Expr::Binary {
            op,
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
        }
    }

    /// Evaluate the tree in decimal arithmetic
    pub fn eval(&self) -> Result<Decimal, CalcError> {
        match self {
            Expr::Number(value) => Ok(*value),
            Expr::Neg(inner) => Ok(-inner.eval()?),
            Expr::Binary { op, lhs, rhs } => {
                let l = lhs.eval()?;
                let r = rhs.eval()?;
                match op {
                    BinaryOp::Add => l.checked_add(r).ok_or(CalcError::Overflow),
                    BinaryOp::Sub => l.checked_sub(r).ok_or(CalcError::Overflow),
                    BinaryOp::Mul => l.checked_mul(r).ok_or(CalcError::Overflow),
                    BinaryOp::Div if r.is_zero() => Err(CalcError::DivisionByZero),
                    BinaryOp::Div => l.checked_div(r).ok_or(CalcError::Overflow),
                    BinaryOp::Rem if r.is_zero() => Err(CalcError::DivisionByZero),
                    BinaryOp::Rem => l.checked_rem(r).ok_or(CalcError::Overflow),
                }
            }
        }
    }
}
