//! Shared types for the till
//!
//! Domain types used by the aggregation core and any front end:
//! order lines, report buckets and the unified error system.

pub mod error;
pub mod order;
pub mod report;

// Re-exports
pub use error::{AppError, ErrorCode};
pub use order::LineItem;
pub use report::{ReportBucket, ReportItem, ReportKind, ReportRow, ReportSnapshot};
pub use rust_decimal::Decimal;
pub use serde::{Deserialize, Serialize};
