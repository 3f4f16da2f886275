//! Fluent statement builder
//!
//! Builds the `WHERE ... ORDER BY ... LIMIT ... OFFSET ...` text and its
//! bindings. Paging callers keep one builder and advance it with
//! `increase_offset_by` after each page.

use super::statement::Statement;
use super::value::Value;

/// Page size accepted by every listing call
pub const SUGGESTED_PAGE_LIMIT: u32 = 500;

#[derive(Debug, Clone, Default)]
pub struct StatementBuilder {
    where_clause: Option<String>,
    order_by: Option<String>,
    limit: Option<u32>,
    offset: Option<u32>,
    values: Vec<(String, Value)>,
}

impl StatementBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Filter condition; a leading `WHERE` keyword is optional
    pub fn where_clause(mut self, condition: impl Into<String>) -> Self {
        let condition = condition.into();
        let trimmed = condition.trim();
        let condition = match trimmed.get(..6) {
            Some(head) if head.eq_ignore_ascii_case("where ") => trimmed[6..].trim().to_string(),
            _ => trimmed.to_string(),
        };
        self.where_clause = Some(condition);
        self
    }

    pub fn order_by(mut self, field: impl Into<String>, ascending: bool) -> Self {
        let direction = if ascending { "ASC" } else { "DESC" };
        self.order_by = Some(format!("{} {}", field.into(), direction));
        self
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn offset(mut self, offset: u32) -> Self {
        self.offset = Some(offset);
        self
    }

    pub fn with_bind_variable(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.values.push((name.into(), value.into()));
        self
    }

    /// Advance the offset, e.g. by the size of the page just read
    pub fn increase_offset_by(&mut self, amount: u32) {
        self.offset = Some(self.offset.unwrap_or(0).saturating_add(amount));
    }

    pub fn remove_limit_and_offset(&mut self) {
        self.limit = None;
        self.offset = None;
    }

    pub fn current_offset(&self) -> u32 {
        self.offset.unwrap_or(0)
    }

    pub fn to_statement(&self) -> Statement {
        let mut parts = Vec::new();

        if let Some(condition) = &self.where_clause {
            parts.push(format!("WHERE {}", condition));
        }

        if let Some(order_by) = &self.order_by {
            parts.push(format!("ORDER BY {}", order_by));
        }

        if let Some(limit) = self.limit {
            parts.push(format!("LIMIT {}", limit));
        }

        if let Some(offset) = self.offset {
            parts.push(format!("OFFSET {}", offset));
        }

        Statement::new(String::new()).with_filter(parts.join(" "), self.values.clone())
    }
}
