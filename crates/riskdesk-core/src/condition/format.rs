//! Literal formatting for rendered predicates

use super::catalog::FieldType;
use super::types::Literal;

/// Map a literal to a boolean if it is one of the accepted spellings
///
/// Accepted: `true`/`false`, `"true"`/`"false"`, `"True"`/`"False"`,
/// `"TRUE"`/`"FALSE"`, `1`/`0`, `"1"`/`"0"`. Matching is exact.
pub fn canonical_bool(literal: &Literal) -> Option<bool> {
    match literal {
        Literal::Bool(b) => Some(*b),
        Literal::Number(n) if *n == 1.0 => Some(true),
        Literal::Number(n) if *n == 0.0 => Some(false),
        Literal::Number(_) => None,
        Literal::Text(s) => match s.as_str() {
            "true" | "True" | "TRUE" | "1" => Some(true),
            "false" | "False" | "FALSE" | "0" => Some(false),
            _ => None,
        },
    }
}

/// Wrap a value in single quotes, doubling embedded quotes
pub fn quote_string(raw: &str) -> String {
    format!("'{}'", raw.replace('\'', "''"))
}

/// Format a literal according to the declared type of its field
///
/// `None` means the field type is unknown; the literal is written raw.
pub fn format_literal(field_type: Option<FieldType>, literal: &Literal) -> String {
    match field_type {
        Some(FieldType::Boolean) => match canonical_bool(literal) {
            Some(true) => "TRUE".to_string(),
            Some(false) => "FALSE".to_string(),
            // Unrecognised spellings pass through; ConditionBuilder::issues reports them
            None => literal.to_string(),
        },
        Some(FieldType::String) => quote_string(&literal.to_string()),
        Some(FieldType::Number) | None => literal.to_string(),
    }
}
