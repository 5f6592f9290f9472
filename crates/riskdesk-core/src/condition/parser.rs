//! Clause text parser
//!
//! Parses single clauses typed on the command line:
//! - `t:age > 30`
//! - `user_summary:trans_count_30d >= 5`
//! - `uts.geo_diversity_score < 0.4`
//! - `nationality = 'IN'` (namespace defaults to Transaction)
//!
//! Operator and value are separated from the field by whitespace. A value
//! wrapped in single quotes is unquoted (doubled quotes collapse to one).
//! Field membership in the catalog is checked by the builder, not here.

use super::types::{Clause, ComparisonOp, Literal, Namespace};
use crate::error::{CoreError, Result};

/// Parse a clause from its text form
pub fn parse_clause(input: &str) -> Result<Clause> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(invalid(input, "empty clause"));
    }

    let (target, rest) = trimmed
        .split_once(char::is_whitespace)
        .ok_or_else(|| invalid(input, "expected '<field> <operator> <value>'"))?;

    let rest = rest.trim_start();
    let (op_str, value_str) = match rest.split_once(char::is_whitespace) {
        Some((op, value)) => (op, value.trim()),
        None => (rest, ""),
    };

    let operator: ComparisonOp = op_str
        .parse()
        .map_err(|_| invalid(input, &format!("unknown operator '{}'", op_str)))?;

    let (namespace, field) = parse_target(input, target)?;

    Ok(Clause {
        namespace,
        field,
        operator,
        literal: parse_value(value_str),
    })
}

fn parse_target(input: &str, target: &str) -> Result<(Namespace, String)> {
    // Explicit "<namespace>:<field>"
    if let Some((ns, field)) = target.split_once(':') {
        let namespace = ns
            .parse()
            .map_err(|_| invalid(input, &format!("unknown namespace '{}'", ns)))?;
        return non_empty_field(input, namespace, field);
    }

    // Rendered prefix form "t.<field>" / "uts.<field>"
    for namespace in Namespace::ALL {
        if let Some(field) = target.strip_prefix(namespace.prefix()) {
            return non_empty_field(input, namespace, field);
        }
    }

    non_empty_field(input, Namespace::Transaction, target)
}

fn non_empty_field(input: &str, namespace: Namespace, field: &str) -> Result<(Namespace, String)> {
    if field.is_empty() {
        return Err(invalid(input, "empty field name"));
    }
    Ok((namespace, field.to_string()))
}

fn parse_value(value: &str) -> Literal {
    if value.len() >= 2 && value.starts_with('\'') && value.ends_with('\'') {
        let inner = &value[1..value.len() - 1];
        return Literal::Text(inner.replace("''", "'"));
    }
    Literal::Text(value.to_string())
}

fn invalid(input: &str, reason: &str) -> CoreError {
    CoreError::InvalidClause {
        input: input.to_string(),
        reason: reason.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_namespace_colon_form() {
        let clause = parse_clause("t:age > 30").unwrap();
        assert_eq!(clause.namespace, Namespace::Transaction);
        assert_eq!(clause.field, "age");
        assert_eq!(clause.operator, ComparisonOp::Gt);
        assert_eq!(clause.literal, Literal::text("30"));
    }

    #[test]
    fn test_parse_prefix_form() {
        let clause = parse_clause("uts.trans_count_30d >= 5").unwrap();
        assert_eq!(clause.namespace, Namespace::UserSummary);
        assert_eq!(clause.field, "trans_count_30d");
        assert_eq!(clause.operator, ComparisonOp::Ge);
    }

    #[test]
    fn test_parse_defaults_to_transaction() {
        let clause = parse_clause("pep_status = True").unwrap();
        assert_eq!(clause.namespace, Namespace::Transaction);
        assert_eq!(clause.literal, Literal::text("True"));
    }

    #[test]
    fn test_parse_quoted_value() {
        let clause = parse_clause("t:occupation != 'O''Neil & Sons'").unwrap();
        assert_eq!(clause.operator, ComparisonOp::Ne);
        assert_eq!(clause.literal, Literal::text("O'Neil & Sons"));
    }

    #[test]
    fn test_parse_empty_value() {
        let clause = parse_clause("t:age =").unwrap();
        assert!(clause.literal.is_blank());
    }

    #[test]
    fn test_parse_errors() {
        assert!(parse_clause("").is_err());
        assert!(parse_clause("age").is_err());
        assert!(parse_clause("t:age == 3").is_err());
        assert!(parse_clause("acct:age = 3").is_err());
        assert!(parse_clause("t: = 3").is_err());
    }
}
