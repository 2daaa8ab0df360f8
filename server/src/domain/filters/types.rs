//! Header filter type definitions
//!
//! Defines the clause, comparator and value type used by header filter
//! expressions, plus the form-row shape the console's edit dialog works with.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::error::ClauseError;

/// Characters that introduce a comparator inside a clause
pub const COMPARATOR_CHARS: [char; 4] = ['=', '~', '<', '>'];

/// Comparator between a header and the operand typed by the user
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum Comparator {
    #[default]
    #[serde(rename = "=")]
    Equals,
    #[serde(rename = "~")]
    Contains,
    #[serde(rename = ">")]
    Gt,
    #[serde(rename = ">=")]
    Gte,
    #[serde(rename = "<")]
    Lt,
    #[serde(rename = "<=")]
    Lte,
}

impl Comparator {
    pub const ALL: [Comparator; 6] = [
        Self::Equals,
        Self::Contains,
        Self::Gt,
        Self::Gte,
        Self::Lt,
        Self::Lte,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Equals => "=",
            Self::Contains => "~",
            Self::Gt => ">",
            Self::Gte => ">=",
            Self::Lt => "<",
            Self::Lte => "<=",
        }
    }

    /// Ordering comparators only accept digit operands
    pub fn is_numeric(&self) -> bool {
        matches!(self, Self::Gt | Self::Gte | Self::Lt | Self::Lte)
    }

    /// Check that `value` is an acceptable operand for this comparator
    pub fn check_operand(&self, value: &str) -> Result<(), ClauseError> {
        match self {
            Self::Equals | Self::Contains => {
                let symbol = if *self == Self::Equals { '=' } else { '~' };
                if value.contains(symbol) {
                    return Err(ClauseError::AmbiguousComparator { comparator: *self });
                }
                Ok(())
            }
            _ => {
                if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
                    return Err(ClauseError::NonNumericOperand {
                        comparator: *self,
                        value: value.to_string(),
                    });
                }
                Ok(())
            }
        }
    }
}

impl fmt::Display for Comparator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Comparator {
    type Err = ClauseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| ClauseError::UnknownComparator {
                symbol: s.to_string(),
            })
    }
}

/// Input widget hint for a clause value
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ValueType {
    #[default]
    Literal,
    Numerical,
}

/// One parsed unit of a header filter expression
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FilterClause {
    /// Header name; empty matches the value against any header
    pub key: String,
    pub comparator: Comparator,
    pub value: String,
    #[serde(default)]
    pub value_type: ValueType,
}

impl FilterClause {
    pub fn new(key: impl Into<String>, comparator: Comparator, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            comparator,
            value: value.into(),
            value_type: ValueType::Literal,
        }
    }

    /// Value-only clause (no header name, comparator fixed to `=`)
    pub fn literal(value: impl Into<String>) -> Self {
        Self::new(String::new(), Comparator::Equals, value)
    }

    pub fn has_key(&self) -> bool {
        !self.key.is_empty()
    }
}

/// One row of the header filter edit form.
///
/// `key_comparator` is always `=` and not editable; the comparator the user
/// picked lives in `value_comparator`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HeaderFilterForm {
    pub key: String,
    #[serde(default)]
    pub key_comparator: Comparator,
    pub value: String,
    #[serde(default)]
    pub value_type: ValueType,
    #[serde(default)]
    pub value_comparator: Comparator,
}

impl From<FilterClause> for HeaderFilterForm {
    fn from(clause: FilterClause) -> Self {
        // Without a key there is nothing to pick a comparator for
        let value_comparator = if clause.has_key() {
            clause.comparator
        } else {
            Comparator::Equals
        };
        Self {
            key: clause.key,
            key_comparator: Comparator::Equals,
            value: clause.value,
            value_type: clause.value_type,
            value_comparator,
        }
    }
}

impl From<HeaderFilterForm> for FilterClause {
    fn from(form: HeaderFilterForm) -> Self {
        Self {
            key: form.key,
            comparator: form.value_comparator,
            value: form.value,
            value_type: form.value_type,
        }
    }
}
