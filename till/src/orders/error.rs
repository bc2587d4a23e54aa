use shared::error::{AppError, ErrorCode};
use thiserror::Error;

/// Order builder / table ledger errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OrderError {
    #[error("Please select a table first")]
    NoTableSelected,

    #[error("Table not found: {0}")]
    UnknownTable(String),

    #[error("Cannot save an empty table: {0}")]
    EmptyTable(String),

    #[error("Cannot add more than {0} tables")]
    TableLimitReached(usize),

    #[error("Invalid item: {0}")]
    InvalidItem(String),

    #[error("Amount out of range: {0}")]
    AmountOverflow(String),
}

impl From<OrderError> for AppError {
    fn from(err: OrderError) -> Self {
        match err {
            OrderError::NoTableSelected => AppError::new(ErrorCode::NoTableSelected),
            OrderError::UnknownTable(id) => {
                AppError::with_message(ErrorCode::TableNotFound, format!("Table not found: {}", id))
                    .with_detail("table_id", id)
            }
            OrderError::EmptyTable(id) => {
                AppError::new(ErrorCode::TableEmpty).with_detail("table_id", id)
            }
            OrderError::TableLimitReached(max) => AppError::with_message(
                ErrorCode::TableLimitReached,
                format!("Cannot add more than {} tables", max),
            )
            .with_detail("max_tables", max),
            OrderError::InvalidItem(msg) => AppError::with_message(ErrorCode::InvalidItem, msg),
            OrderError::AmountOverflow(msg) => {
                AppError::with_message(ErrorCode::ValueOutOfRange, format!("Amount out of range: {}", msg))
            }
        }
    }
}

pub type OrderResult<T> = Result<T, OrderError>;
