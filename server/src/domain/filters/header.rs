//! Header filter expression codec
//!
//! Converts between the single-line filter typed into the console's header
//! filter field and the clause list that drives the multi-row edit form.
//!
//! An expression is a list of clauses separated by `"; "` (a bare `";"` is
//! accepted too). Each clause is either
//!
//! - `key<comparator>value`, where `key` is made of ASCII letters, digits,
//!   `_` and `-`, and the comparator is one of `=`, `~`, `>`, `>=`, `<`, `<=`;
//! - a bare value without any of `=`, `~`, `<`, `>`, matched against any header.
//!
//! Ordering comparators take digit-only operands. `=` and `~` take anything
//! except a second occurrence of their own symbol.

use std::sync::LazyLock;

use regex::Regex;

use super::error::{ClauseError, HeaderFilterError};
use super::types::{COMPARATOR_CHARS, Comparator, FilterClause};

/// Separator written between clauses
pub const CLAUSE_SEPARATOR: &str = "; ";

/// `key`, comparator, operand. Two-character comparators come first in the
/// alternation so `>=` is never read as `>` followed by `=`.
static CLAUSE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)^([A-Za-z0-9_-]+)(>=|<=|=|~|<|>)(.*)$").expect("Invalid regex")
});

/// Split an expression into its clause segments.
///
/// Splits on `;` and drops one space following it. Leading spaces beyond
/// that are kept. Blank segments are skipped.
pub fn split_segments(expression: &str) -> impl Iterator<Item = &str> {
    expression
        .split(';')
        .enumerate()
        .map(|(i, segment)| {
            if i == 0 {
                segment
            } else {
                segment.strip_prefix(' ').unwrap_or(segment)
            }
        })
        .filter(|segment| !segment.trim().is_empty())
}

/// Decode one clause segment
pub fn decode_clause(segment: &str) -> Result<FilterClause, ClauseError> {
    if let Some(caps) = CLAUSE_PATTERN.captures(segment) {
        let comparator: Comparator = caps[2].parse()?;
        let value = &caps[3];
        comparator.check_operand(value)?;
        return Ok(FilterClause::new(&caps[1], comparator, value));
    }

    // A comparator without a usable key in front of it. This includes keys
    // with a leading space: " key=value" is neither a pair nor a literal.
    if segment.contains(&COMPARATOR_CHARS[..]) {
        return Err(ClauseError::InvalidKey {
            segment: segment.to_string(),
        });
    }

    Ok(FilterClause::literal(segment))
}

/// Encode one clause. Value-only clauses encode to the bare value.
pub fn encode_clause(clause: &FilterClause) -> String {
    if clause.has_key() {
        format!("{}{}{}", clause.key, clause.comparator, clause.value)
    } else {
        clause.value.clone()
    }
}

/// Encode a clause list into a single expression
pub fn encode_expression(clauses: &[FilterClause]) -> String {
    clauses
        .iter()
        .map(encode_clause)
        .collect::<Vec<_>>()
        .join(CLAUSE_SEPARATOR)
}

/// Decode every valid clause of an expression, dropping the ones that fail.
///
/// Callers that need to report failures run [`check`] first.
pub fn decode_expression(expression: &str) -> Vec<FilterClause> {
    split_segments(expression)
        .filter_map(|segment| match decode_clause(segment) {
            Ok(clause) => Some(clause),
            Err(e) => {
                tracing::trace!(segment, error = %e, "Dropping invalid header filter clause");
                None
            }
        })
        .collect()
}

/// Check that every clause of an expression decodes.
///
/// The error carries the whole expression and the first failing reason.
pub fn check(expression: &str) -> Result<(), HeaderFilterError> {
    for segment in split_segments(expression) {
        decode_clause(segment).map_err(|reason| HeaderFilterError::new(expression, reason))?;
    }
    Ok(())
}

/// True when every clause of the expression decodes. The empty expression is valid.
pub fn validate(expression: &str) -> bool {
    check(expression).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::filters::types::ValueType;

    fn clause(key: &str, comparator: Comparator, value: &str) -> FilterClause {
        FilterClause::new(key, comparator, value)
    }

    #[test]
    fn decode_key_value_pairs() {
        assert_eq!(
            decode_clause("key=value").unwrap(),
            clause("key", Comparator::Equals, "value")
        );
        assert_eq!(
            decode_clause("key~value").unwrap(),
            clause("key", Comparator::Contains, "value")
        );
        assert_eq!(
            decode_clause("X-Request_Id=abc def, ghi!").unwrap(),
            clause("X-Request_Id", Comparator::Equals, "abc def, ghi!")
        );
    }

    #[test]
    fn decode_numeric_comparators() {
        assert_eq!(
            decode_clause("key<1234").unwrap(),
            clause("key", Comparator::Lt, "1234")
        );
        assert_eq!(
            decode_clause("key<=5").unwrap(),
            clause("key", Comparator::Lte, "5")
        );
        assert_eq!(
            decode_clause("key>10").unwrap(),
            clause("key", Comparator::Gt, "10")
        );
        assert_eq!(
            decode_clause("key>=0").unwrap(),
            clause("key", Comparator::Gte, "0")
        );
    }

    #[test]
    fn numeric_comparators_reject_non_digit_operands() {
        for segment in ["key<foo", "key>bar", "key>=baz", "key<=boom", "key>", "key<=1.5"] {
            assert!(
                matches!(
                    decode_clause(segment),
                    Err(ClauseError::NonNumericOperand { .. })
                ),
                "{segment} should be rejected"
            );
        }
    }

    #[test]
    fn bare_literal_is_value_only() {
        let decoded = decode_clause("header with spaces").unwrap();
        assert_eq!(decoded, FilterClause::literal("header with spaces"));
        assert_eq!(decoded.key, "");
        assert_eq!(decoded.comparator, Comparator::Equals);
        assert_eq!(decoded.value_type, ValueType::Literal);
    }

    #[test]
    fn empty_value_after_equals_is_accepted() {
        assert_eq!(
            decode_clause("key=").unwrap(),
            clause("key", Comparator::Equals, "")
        );
    }

    #[test]
    fn repeated_comparator_is_ambiguous() {
        assert_eq!(
            decode_clause("key=a=b"),
            Err(ClauseError::AmbiguousComparator {
                comparator: Comparator::Equals
            })
        );
        assert_eq!(
            decode_clause("key~~a"),
            Err(ClauseError::AmbiguousComparator {
                comparator: Comparator::Contains
            })
        );
        // A different comparator symbol inside the value is fine
        assert_eq!(
            decode_clause("key~a=b").unwrap(),
            clause("key", Comparator::Contains, "a=b")
        );
    }

    #[test]
    fn comparator_without_key_is_rejected() {
        for segment in ["=value", "~value", ">10", "bad key=value", " key=value"] {
            assert!(
                matches!(decode_clause(segment), Err(ClauseError::InvalidKey { .. })),
                "{segment} should be rejected"
            );
        }
    }

    #[test]
    fn leading_space_literal_is_kept_verbatim() {
        let decoded = decode_clause(" key-starting-with-space").unwrap();
        assert_eq!(decoded.key, "");
        assert_eq!(decoded.value, " key-starting-with-space");

        // Encoding a clause that uses the same text as a key does not
        // reproduce the literal it was decoded from
        let keyed = clause(" key-starting-with-space", Comparator::Equals, "v");
        assert_ne!(encode_clause(&keyed), " key-starting-with-space");
    }

    #[test]
    fn encode_clause_with_and_without_key() {
        assert_eq!(
            encode_clause(&clause("key", Comparator::Gte, "10")),
            "key>=10"
        );
        assert_eq!(encode_clause(&FilterClause::literal("plain")), "plain");
    }

    #[test]
    fn round_trip_well_formed_clauses() {
        let cases = [
            clause("key", Comparator::Equals, "value"),
            clause("a-b_c", Comparator::Contains, "some text; not split"),
            clause("n", Comparator::Gt, "7"),
            clause("n", Comparator::Gte, "70"),
            clause("n", Comparator::Lt, "700"),
            clause("n", Comparator::Lte, "7000"),
            clause("empty", Comparator::Equals, ""),
        ];
        for original in cases {
            // Separators inside values only matter at the expression level
            let decoded = decode_clause(&encode_clause(&original)).unwrap();
            assert_eq!(decoded, original);
        }
    }

    #[test]
    fn validate_is_compositional() {
        assert!(validate("key=value; key2~value2"));
        assert!(!validate("key=value; key2<foo"));
        assert!(validate("a=1"));
        assert!(validate("b>2"));
        assert!(validate("a=1; b>2"));
        assert!(!validate("a=1; b>x"));
        assert!(!validate("a>x; b=2"));
    }

    #[test]
    fn validate_accepts_empty_and_blank_expressions() {
        assert!(validate(""));
        assert!(validate("   "));
        assert!(validate("key=value; "));
        assert!(decode_expression("").is_empty());
        assert!(decode_expression("  ").is_empty());
    }

    #[test]
    fn check_reports_whole_expression() {
        let err = check("key=value; key2<foo").unwrap_err();
        assert_eq!(err.expression, "key=value; key2<foo");
        assert_eq!(
            err.reason,
            ClauseError::NonNumericOperand {
                comparator: Comparator::Lt,
                value: "foo".to_string()
            }
        );
    }

    #[test]
    fn split_accepts_both_separators() {
        let segments: Vec<&str> = split_segments("a=1;b=2; c=3;  d").collect();
        assert_eq!(segments, vec!["a=1", "b=2", "c=3", " d"]);
    }

    #[test]
    fn decode_expression_end_to_end() {
        let clauses = decode_expression("key=value; key=value");
        assert_eq!(
            clauses,
            vec![
                clause("key", Comparator::Equals, "value"),
                clause("key", Comparator::Equals, "value"),
            ]
        );
        assert_eq!(encode_expression(&clauses), "key=value; key=value");
    }

    #[test]
    fn decode_expression_drops_invalid_segments() {
        let clauses = decode_expression("a=1; b<foo; just text");
        assert_eq!(
            clauses,
            vec![
                clause("a", Comparator::Equals, "1"),
                FilterClause::literal("just text"),
            ]
        );
    }

    #[test]
    fn encode_expression_of_nothing_is_empty() {
        assert_eq!(encode_expression(&[]), "");
    }
}
