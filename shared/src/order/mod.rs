//! Order types
//!
//! - [`LineItem`]: one line of an in-progress order, also used verbatim as a
//!   confirmed table ledger row

pub mod types;

pub use types::{LineItem, checked_lines_total, lines_total};
