//! Order entry
//!
//! - **builder**: the in-progress order of the selected table
//! - **ledger**: table registry and the confirmed rows of each table
//!
//! ```text
//! add/remove/clear → OrderBuilder ──confirm──→ TableLedgers ──save──→ reports
//! ```

pub mod builder;
pub mod error;
pub mod ledger;

pub use builder::OrderBuilder;
pub use error::{OrderError, OrderResult};
pub use ledger::{TableLedger, TableLedgers};
