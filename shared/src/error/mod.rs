//! Unified error system for the till
//!
//! This module provides:
//! - [`ErrorCode`]: Standardized error codes for all error types
//! - [`AppError`]: Rich error type with codes, messages, and details
//!
//! # Error Code Ranges
//!
//! - 0xxx: General errors
//! - 4xxx: Order errors
//! - 5xxx: Calculator errors
//! - 6xxx: Report errors
//! - 7xxx: Table errors
//! - 9xxx: System errors
//!
//! # Example
//!
//! ```
//! use shared::error::{AppError, ErrorCode};
//!
//! let err = AppError::new(ErrorCode::TableEmpty).with_detail("table_id", "table-1");
//! assert_eq!(err.code.code(), 7002);
//! ```

mod codes;
mod types;

pub use codes::{ErrorCode, InvalidErrorCode};
pub use types::AppError;
