//! Worksheet data model and the decision logic that runs before XML generation.
//!
//! This module maps loosely named spreadsheet headers onto the seven required
//! logical fields, selects purchase rows and coerces their amounts.

mod columns;
mod dates;
mod error;
mod filter;
mod sanitize;
mod types;

pub use columns::*;
pub use dates::parse_day_first;
pub use error::*;
pub use filter::*;
pub use sanitize::*;
pub use types::*;
