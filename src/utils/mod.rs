//! Helpers shared by the HTTP layer and the admin CLI.
//!
//! - [`dates`] - Parsing of `YYYY-MM-DD` request dates

pub mod dates;
