//! Report types
//!
//! - [`ReportBucket`]: item totals for one period (a day or a month)
//! - [`ReportSnapshot`]: both collections, the export / persistence shape
//! - [`ReportRow`]: flattened view row

pub mod types;

pub use types::{ReportBucket, ReportItem, ReportKind, ReportRow, ReportSnapshot, flatten_rows};
