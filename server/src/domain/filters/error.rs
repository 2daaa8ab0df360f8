//! Filter error types

use thiserror::Error;

use super::types::Comparator;

/// Why a single clause of a header filter expression was rejected
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClauseError {
    #[error("comparator in '{segment}' must follow a header name of [A-Za-z0-9_-]")]
    InvalidKey { segment: String },

    #[error("comparator '{comparator}' requires a numeric operand, got '{value}'")]
    NonNumericOperand { comparator: Comparator, value: String },

    #[error("comparator '{comparator}' appears more than once")]
    AmbiguousComparator { comparator: Comparator },

    #[error("unknown comparator '{symbol}'")]
    UnknownComparator { symbol: String },
}

/// Field-level validation error for a whole header filter expression.
///
/// Carries the full expression rather than the failing segment so the
/// console renders a single message for the field.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid header filter pattern '{expression}': {reason}")]
pub struct HeaderFilterError {
    pub expression: String,
    #[source]
    pub reason: ClauseError,
}

impl HeaderFilterError {
    /// Validation error key reported to the console
    pub const CODE: &'static str = "invalidHeaderFilterPattern";

    pub fn new(expression: impl Into<String>, reason: ClauseError) -> Self {
        Self {
            expression: expression.into(),
            reason,
        }
    }
}

/// Errors from parsing `filter[<field>.<operator>]` query parameters
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CriteriaError {
    #[error("malformed filter parameter '{name}', expected filter[<field>.<operator>]")]
    MalformedParam { name: String },

    #[error("invalid filter field '{field}'")]
    InvalidField { field: String },

    #[error("unknown filter operator '{operator}' in '{name}'")]
    UnknownOperator { name: String, operator: String },
}

/// Errors from parsing a console list query
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    #[error("invalid page '{value}', expected a non-negative integer")]
    InvalidPage { value: String },

    #[error("invalid size '{value}', expected an integer between 1 and {max}")]
    InvalidSize { value: String, max: u32 },

    #[error("invalid sort '{value}', expected 'field' or 'field,asc' or 'field,desc'")]
    InvalidSort { value: String },

    #[error(transparent)]
    Criteria(#[from] CriteriaError),

    #[error(transparent)]
    HeaderFilter(#[from] HeaderFilterError),
}
