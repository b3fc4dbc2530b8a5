//! Query language for filtering room snapshot items.
//!
//! A small `resource where condition and condition ...` language plus
//! programmatic filters (spatial radius, text search, task presence)
//! that compose with AND semantics.

mod executor;
mod output;
mod parser;

pub use executor::{execute_query, ItemFilter};
pub use output::{format_json, QueryResult};
pub use parser::{parse_query, Condition, Operator, Query, QueryError, QueryValue};
