//! Console list query state
//!
//! Parses the URL query of a console list page (pagination, sort, filters and
//! the header filter expression) into a typed state and writes it back, and
//! merges query parameter updates the way the console's navigation does.

use serde::Serialize;
use utoipa::ToSchema;

use super::criteria::FilterCriteria;
use super::error::QueryError;
use super::header;
use super::types::FilterClause;

/// Default page number (zero-based)
pub const DEFAULT_PAGE: u32 = 0;
/// Default page size
pub const DEFAULT_PAGE_SIZE: u32 = 20;
/// Maximum page size
pub const MAX_PAGE_SIZE: u32 = 500;

const PAGE_PARAM: &str = "page";
const SIZE_PARAM: &str = "size";
const SORT_PARAM: &str = "sort";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

/// One `sort=<field>[,asc|desc]` parameter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct SortOrder {
    pub field: String,
    pub direction: SortDirection,
}

impl SortOrder {
    pub fn parse(s: &str) -> Result<Self, QueryError> {
        let parts: Vec<&str> = s.split(',').collect();
        let (field, direction) = match parts.as_slice() {
            [field] => (*field, SortDirection::Asc),
            [field, "asc"] => (*field, SortDirection::Asc),
            [field, "desc"] => (*field, SortDirection::Desc),
            _ => {
                return Err(QueryError::InvalidSort {
                    value: s.to_string(),
                });
            }
        };
        if !super::criteria::is_valid_field(field) {
            return Err(QueryError::InvalidSort {
                value: s.to_string(),
            });
        }
        Ok(Self {
            field: field.to_string(),
            direction,
        })
    }

    pub fn to_param(&self) -> String {
        format!("{},{}", self.field, self.direction.as_str())
    }
}

/// Typed state of a console list page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ConsoleQuery {
    pub page: u32,
    pub size: u32,
    pub sort: Vec<SortOrder>,
    pub filters: FilterCriteria,
    /// Clauses decoded from `filter[headers]`
    pub header_clauses: Vec<FilterClause>,
}

impl Default for ConsoleQuery {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            size: DEFAULT_PAGE_SIZE,
            sort: Vec::new(),
            filters: FilterCriteria::default(),
            header_clauses: Vec::new(),
        }
    }
}

impl ConsoleQuery {
    /// Parse decoded query pairs.
    ///
    /// An invalid header filter expression fails the whole query with the
    /// full expression attached.
    pub fn from_pairs<'a, I>(pairs: I) -> Result<Self, QueryError>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut query = Self::default();
        let mut rest = Vec::new();

        for (name, value) in pairs {
            match name {
                _ if value.is_empty() => {}
                PAGE_PARAM => {
                    query.page = value.parse().map_err(|_| QueryError::InvalidPage {
                        value: value.to_string(),
                    })?;
                }
                SIZE_PARAM => {
                    query.size = value
                        .parse()
                        .ok()
                        .filter(|size| (1..=MAX_PAGE_SIZE).contains(size))
                        .ok_or_else(|| QueryError::InvalidSize {
                            value: value.to_string(),
                            max: MAX_PAGE_SIZE,
                        })?;
                }
                SORT_PARAM => query.sort.push(SortOrder::parse(value)?),
                _ => rest.push((name, value)),
            }
        }

        query.filters = FilterCriteria::from_pairs(rest)?;
        if let Some(expression) = &query.filters.headers {
            header::check(expression)?;
            query.header_clauses = header::decode_expression(expression);
        }

        Ok(query)
    }

    /// Parse a raw url-encoded query string (without the leading `?`)
    pub fn parse(query: &str) -> Result<Self, QueryError> {
        let pairs = parse_query_string(query);
        Self::from_pairs(pairs.iter().map(|(k, v)| (k.as_str(), v.as_str())))
    }

    pub fn to_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = vec![
            (PAGE_PARAM.to_string(), self.page.to_string()),
            (SIZE_PARAM.to_string(), self.size.to_string()),
        ];
        pairs.extend(
            self.sort
                .iter()
                .map(|s| (SORT_PARAM.to_string(), s.to_param())),
        );
        pairs.extend(self.filters.to_pairs());
        pairs
    }

    pub fn to_query_string(&self) -> String {
        to_query_string(&self.to_pairs())
    }
}

/// Merge query parameter updates into the current query.
///
/// Updated keys keep the position of their first occurrence and replace every
/// earlier value; new keys are appended. Keys whose resulting value is absent
/// or empty are dropped.
pub fn merge_query_params(
    current: &[(String, String)],
    updates: &[(String, Option<String>)],
) -> Vec<(String, String)> {
    let update_for = |name: &str| updates.iter().rev().find(|(k, _)| k == name);

    let mut merged: Vec<(String, String)> = Vec::with_capacity(current.len() + updates.len());
    for (name, value) in current {
        let value = match update_for(name) {
            // Repeated keys collapse into the single updated value
            Some(_) if merged.iter().any(|(k, _)| k == name) => continue,
            Some((_, update)) => update.clone().unwrap_or_default(),
            None => value.clone(),
        };
        merged.push((name.clone(), value));
    }

    for (name, _) in updates {
        if merged.iter().any(|(k, _)| k == name) {
            continue;
        }
        let value = update_for(name)
            .and_then(|(_, v)| v.clone())
            .unwrap_or_default();
        merged.push((name.clone(), value));
    }

    merged.retain(|(_, value)| !value.is_empty());
    merged
}

/// Decode a url-encoded query string into pairs; undecodable input yields no pairs
pub fn parse_query_string(query: &str) -> Vec<(String, String)> {
    let query = query.strip_prefix('?').unwrap_or(query);
    serde_urlencoded::from_str(query).unwrap_or_else(|e| {
        tracing::debug!(error = %e, "Failed to decode query string");
        Vec::new()
    })
}

/// Encode pairs as a url-encoded query string
pub fn to_query_string(pairs: &[(String, String)]) -> String {
    serde_urlencoded::to_string(pairs).unwrap_or_default()
}
