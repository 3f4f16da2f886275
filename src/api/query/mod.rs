//! Statement query module
//!
//! Provides the filter statements shared by listing and action calls, the
//! fluent builder that renders them, and the page envelope listing calls
//! return. Follows the same pattern as operations: `Statement` is the
//! reusable value, `StatementBuilder` the fluent front.

pub mod builder;
pub mod result;
pub mod statement;
pub mod value;

pub use builder::{StatementBuilder, SUGGESTED_PAGE_LIMIT};
pub use result::PageResult;
pub use statement::Statement;
pub use value::Value;
