//! List filter query parameters
//!
//! Console list pages keep each active filter in a query parameter named
//! `filter[<field>.<operator>]`, e.g. `filter[scenarioName.contains]=Hello`.
//! The header filter expression is the one exception: it occupies the single
//! `filter[headers]` slot as an opaque string.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::error::CriteriaError;

/// Field name reserved for the header filter expression
pub const HEADERS_FIELD: &str = "headers";

/// Query parameter holding the header filter expression
pub const HEADERS_PARAM: &str = "filter[headers]";

const PARAM_PREFIX: &str = "filter[";
const PARAM_SUFFIX: &str = "]";

/// Criteria operator, named like the simulator's REST criteria
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub enum CriteriaOperator {
    Equals,
    NotEquals,
    Contains,
    DoesNotContain,
    GreaterThan,
    GreaterThanOrEqual,
    LessThan,
    LessThanOrEqual,
    In,
    NotIn,
    Specified,
}

impl CriteriaOperator {
    pub const ALL: [CriteriaOperator; 11] = [
        Self::Equals,
        Self::NotEquals,
        Self::Contains,
        Self::DoesNotContain,
        Self::GreaterThan,
        Self::GreaterThanOrEqual,
        Self::LessThan,
        Self::LessThanOrEqual,
        Self::In,
        Self::NotIn,
        Self::Specified,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Equals => "equals",
            Self::NotEquals => "notEquals",
            Self::Contains => "contains",
            Self::DoesNotContain => "doesNotContain",
            Self::GreaterThan => "greaterThan",
            Self::GreaterThanOrEqual => "greaterThanOrEqual",
            Self::LessThan => "lessThan",
            Self::LessThanOrEqual => "lessThanOrEqual",
            Self::In => "in",
            Self::NotIn => "notIn",
            Self::Specified => "specified",
        }
    }
}

impl fmt::Display for CriteriaOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CriteriaOperator {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL.into_iter().find(|op| op.as_str() == s).ok_or(())
    }
}

/// Validate field name: ASCII identifier (letter or underscore first)
pub fn is_valid_field(field: &str) -> bool {
    let mut chars = field.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Name of a `filter[<field>.<operator>]` query parameter
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub struct FilterParam {
    pub field: String,
    pub operator: CriteriaOperator,
}

impl FilterParam {
    pub fn new(field: impl Into<String>, operator: CriteriaOperator) -> Self {
        Self {
            field: field.into(),
            operator,
        }
    }

    /// Parse a query parameter name such as `filter[status.equals]`
    pub fn parse(name: &str) -> Result<Self, CriteriaError> {
        let malformed = || CriteriaError::MalformedParam {
            name: name.to_string(),
        };

        let inner = name
            .strip_prefix(PARAM_PREFIX)
            .and_then(|rest| rest.strip_suffix(PARAM_SUFFIX))
            .ok_or_else(malformed)?;
        let (field, operator) = inner.rsplit_once('.').ok_or_else(malformed)?;

        if !is_valid_field(field) || field == HEADERS_FIELD {
            return Err(CriteriaError::InvalidField {
                field: field.to_string(),
            });
        }
        let operator = operator
            .parse::<CriteriaOperator>()
            .map_err(|_| CriteriaError::UnknownOperator {
                name: name.to_string(),
                operator: operator.to_string(),
            })?;

        Ok(Self::new(field, operator))
    }

    pub fn query_key(&self) -> String {
        format!("{}{}.{}{}", PARAM_PREFIX, self.field, self.operator, PARAM_SUFFIX)
    }
}

/// An active filter with its value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Criterion {
    #[serde(flatten)]
    pub param: FilterParam,
    pub value: String,
}

/// All filters of a console list query
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, ToSchema)]
pub struct FilterCriteria {
    pub criteria: Vec<Criterion>,
    /// Raw header filter expression from `filter[headers]`
    pub headers: Option<String>,
}

impl FilterCriteria {
    /// Collect filters from query pairs.
    ///
    /// Parameters outside the `filter[...]` namespace are ignored and empty
    /// values are treated as absent.
    pub fn from_pairs<'a, I>(pairs: I) -> Result<Self, CriteriaError>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut criteria = Self::default();
        for (name, value) in pairs {
            if value.is_empty() || !name.starts_with(PARAM_PREFIX) {
                continue;
            }
            if name == HEADERS_PARAM {
                criteria.headers = Some(value.to_string());
                continue;
            }
            criteria.criteria.push(Criterion {
                param: FilterParam::parse(name)?,
                value: value.to_string(),
            });
        }
        Ok(criteria)
    }

    /// Query pairs in insertion order, header expression last
    pub fn to_pairs(&self) -> Vec<(String, String)> {
        let mut pairs: Vec<(String, String)> = self
            .criteria
            .iter()
            .map(|c| (c.param.query_key(), c.value.clone()))
            .collect();
        if let Some(headers) = self.headers.as_ref().filter(|h| !h.is_empty()) {
            pairs.push((HEADERS_PARAM.to_string(), headers.clone()));
        }
        pairs
    }

    pub fn is_empty(&self) -> bool {
        self.criteria.is_empty() && self.headers.is_none()
    }
}
