//! Console filter system
//!
//! Header filter expression codec plus the query parameter contract used by
//! the console's list pages.
//!
//! ## Usage
//!
//! ```
//! use citrus_console::domain::filters::{decode_expression, encode_expression, validate};
//!
//! assert!(validate("key=value; key2>10"));
//! let clauses = decode_expression("key=value; key2>10");
//! assert_eq!(clauses.len(), 2);
//! assert_eq!(encode_expression(&clauses), "key=value; key2>10");
//! ```

mod criteria;
mod error;
mod header;
mod query;
mod types;

pub use criteria::{
    Criterion, CriteriaOperator, FilterCriteria, FilterParam, HEADERS_PARAM, is_valid_field,
};
pub use error::{ClauseError, CriteriaError, HeaderFilterError, QueryError};
pub use header::{
    CLAUSE_SEPARATOR, check, decode_clause, decode_expression, encode_clause, encode_expression,
    split_segments, validate,
};
pub use query::{
    ConsoleQuery, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE, SortDirection, SortOrder, merge_query_params,
    parse_query_string, to_query_string,
};
pub use types::{Comparator, FilterClause, HeaderFilterForm, ValueType};
