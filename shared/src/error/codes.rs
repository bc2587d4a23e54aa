//! Unified error codes for the till
//!
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 4xxx: Order errors
//! - 5xxx: Calculator errors
//! - 6xxx: Report errors
//! - 7xxx: Table errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values so a front end can map them
/// to localized notices without parsing messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Validation failed
    ValidationFailed = 2,
    /// Invalid format
    InvalidFormat = 6,
    /// Value out of range
    ValueOutOfRange = 8,

    // ==================== 4xxx: Order ====================
    /// No table is selected
    NoTableSelected = 4001,
    /// Item name or price is not acceptable
    InvalidItem = 4002,

    // ==================== 5xxx: Calculator ====================
    /// Expression could not be parsed
    CalcSyntax = 5001,
    /// Division (or remainder) by zero
    CalcDivisionByZero = 5002,
    /// Result does not fit the decimal range
    CalcOverflow = 5003,

    // ==================== 6xxx: Report ====================
    /// Export artifact could not be written
    ExportFailed = 6001,

    // ==================== 7xxx: Table ====================
    /// Table id is not registered
    TableNotFound = 7001,
    /// Table has no confirmed rows
    TableEmpty = 7002,
    /// Table capacity reached
    TableLimitReached = 7003,

    // ==================== 9xxx: System ====================
    /// Internal error
    InternalError = 9000,
    /// Persistent store failure
    StorageFailure = 9001,
    /// Persisted snapshot could not be decoded
    SnapshotCorrupted = 9002,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Get the developer-facing English message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::InvalidFormat => "Invalid format",
            ErrorCode::ValueOutOfRange => "Value is out of range",

            // Order
            ErrorCode::NoTableSelected => "Please select a table first",
            ErrorCode::InvalidItem => "Invalid menu item",

            // Calculator
            ErrorCode::CalcSyntax => "Invalid expression",
            ErrorCode::CalcDivisionByZero => "Division by zero",
            ErrorCode::CalcOverflow => "Result is out of range",

            // Report
            ErrorCode::ExportFailed => "Report export failed",

            // Table
            ErrorCode::TableNotFound => "Table not found",
            ErrorCode::TableEmpty => "Cannot save an empty table",
            ErrorCode::TableLimitReached => "Table limit reached",

            // System
            ErrorCode::InternalError => "Internal error",
            ErrorCode::StorageFailure => "Storage failure",
            ErrorCode::SnapshotCorrupted => "Stored report snapshot is corrupted",
        }
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error when converting from an invalid u16 to ErrorCode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            // General
            2 => Ok(ErrorCode::ValidationFailed),
            6 => Ok(ErrorCode::InvalidFormat),
            8 => Ok(ErrorCode::ValueOutOfRange),

            // Order
            4001 => Ok(ErrorCode::NoTableSelected),
            4002 => Ok(ErrorCode::InvalidItem),

            // Calculator
            5001 => Ok(ErrorCode::CalcSyntax),
            5002 => Ok(ErrorCode::CalcDivisionByZero),
            5003 => Ok(ErrorCode::CalcOverflow),

            // Report
            6001 => Ok(ErrorCode::ExportFailed),

            // Table
            7001 => Ok(ErrorCode::TableNotFound),
            7002 => Ok(ErrorCode::TableEmpty),
            7003 => Ok(ErrorCode::TableLimitReached),

            // System
            9000 => Ok(ErrorCode::InternalError),
            9001 => Ok(ErrorCode::StorageFailure),
            9002 => Ok(ErrorCode::SnapshotCorrupted),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
