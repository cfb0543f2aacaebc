//! Query builder utilities
//!
//! Equality filters, ordering options and the SQL statements built from them.

pub mod ordering;
pub mod query;
pub mod statement;


pub use ordering::{FindOptions, OrderBy, SortOrder};
pub use query::Query;
pub use statement::{Statement, StatementBuilder};
