//! Numeric filter grammar
//!
//! A numeric filter is a comma-separated list of terms. Each trimmed term
//! must match `^(<=|>=|<|>|=)?[0-9]+(\.[0-9]*)?$` as a whole; anything else is
//! dropped without an error.

use std::sync::LazyLock;

use regex::Regex;

use super::types::{ComparisonOp, NumericLiteral, NumericTerm};

static NUMERIC_TERM: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(<=|>=|<|>|=)?([0-9]+(?:\.[0-9]*)?)$").expect("Invalid regex")
});

/// Parse a single term, or `None` when it does not match the grammar
pub fn parse_numeric_term(term: &str) -> Option<NumericTerm> {
    let caps = NUMERIC_TERM.captures(term.trim())?;
    let op = ComparisonOp::from_prefix(caps.get(1).map(|m| m.as_str()))?;
    let literal = caps.get(2)?.as_str();
    let value = if literal.contains('.') {
        NumericLiteral::Float(literal.parse().ok()?)
    } else {
        match literal.parse::<i64>() {
            Ok(v) => NumericLiteral::Int(v),
            Err(_) => NumericLiteral::Float(literal.parse().ok()?),
        }
    };
    Some(NumericTerm { op, value })
}

/// Parse every valid term of a numeric filter, keeping their order
pub fn parse_numeric_terms(raw: &str) -> Vec<NumericTerm> {
    raw.split(',')
        .filter_map(|term| {
            let parsed = parse_numeric_term(term);
            if parsed.is_none() && !term.trim().is_empty() {
                tracing::debug!(term = term.trim(), "Dropping numeric filter term");
            }
            parsed
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn term(op: ComparisonOp, value: NumericLiteral) -> NumericTerm {
        NumericTerm { op, value }
    }

    #[test]
    fn test_bare_number_defaults_to_eq() {
        assert_eq!(
            parse_numeric_term("5"),
            Some(term(ComparisonOp::Eq, NumericLiteral::Int(5)))
        );
    }

    #[test]
    fn test_operators() {
        assert_eq!(parse_numeric_term(">=10").map(|t| t.op), Some(ComparisonOp::Gte));
        assert_eq!(parse_numeric_term("<=10").map(|t| t.op), Some(ComparisonOp::Lte));
        assert_eq!(parse_numeric_term("<10").map(|t| t.op), Some(ComparisonOp::Lt));
        assert_eq!(parse_numeric_term(">10").map(|t| t.op), Some(ComparisonOp::Gt));
        assert_eq!(parse_numeric_term("=10").map(|t| t.op), Some(ComparisonOp::Eq));
    }

    #[test]
    fn test_decimals() {
        assert_eq!(
            parse_numeric_term(">2.5"),
            Some(term(ComparisonOp::Gt, NumericLiteral::Float(2.5)))
        );
        assert_eq!(
            parse_numeric_term("7."),
            Some(term(ComparisonOp::Eq, NumericLiteral::Float(7.0)))
        );
    }

    #[test]
    fn test_surrounding_whitespace_is_trimmed() {
        assert_eq!(
            parse_numeric_term("  <3 "),
            Some(term(ComparisonOp::Lt, NumericLiteral::Int(3)))
        );
    }

    #[test]
    fn test_integer_overflow_falls_back_to_float() {
        match parse_numeric_term("99999999999999999999") {
            Some(NumericTerm {
                value: NumericLiteral::Float(v),
                ..
            }) => assert!(v > 9.9e19),
            other => panic!("unexpected parse: {other:?}"),
        }
    }

    #[test]
    fn test_rejects_partial_matches() {
        for bad in [
            "abc",
            "5abc",
            "1; DROP TABLE teams",
            "> 5",
            "-5",
            ".5",
            "5..1",
            "<>5",
            "==5",
            "",
        ] {
            assert_eq!(parse_numeric_term(bad), None, "term {bad:?} should be rejected");
        }
    }

    #[test]
    fn test_terms_keep_order_and_drop_invalid() {
        let terms = parse_numeric_terms(">10, junk,<3,,=7");
        assert_eq!(
            terms,
            vec![
                term(ComparisonOp::Gt, NumericLiteral::Int(10)),
                term(ComparisonOp::Lt, NumericLiteral::Int(3)),
                term(ComparisonOp::Eq, NumericLiteral::Int(7)),
            ]
        );
    }

    #[test]
    fn test_no_valid_terms() {
        assert!(parse_numeric_terms("abc,def").is_empty());
        assert!(parse_numeric_terms("").is_empty());
    }
}
