//! Stateful condition builder

use super::catalog::{Catalogs, FieldType};
use super::format::{canonical_bool, format_literal};
use super::types::{Clause, ClauseEdit, ComparisonOp, Literal, Namespace};
use crate::error::{CoreError, Result};
use std::fmt;
use std::sync::Arc;

/// Callback receiving the freshly rendered predicate after every edit
pub type ConditionListener = Box<dyn FnMut(&str) + Send>;

/// Ordered, never-empty list of clauses joined by `AND`
///
/// # Example
///
/// ```
/// use riskdesk_core::{Catalogs, ClauseEdit, ComparisonOp, ConditionBuilder, Namespace};
/// use std::sync::Arc;
///
/// let mut builder = ConditionBuilder::new(Arc::new(Catalogs::standard()));
/// builder.update_clause(0, ClauseEdit::Operator(ComparisonOp::Gt)).unwrap();
/// builder.update_clause(0, ClauseEdit::Literal("30".into())).unwrap();
/// builder.add_clause();
/// builder.update_clause(1, ClauseEdit::Namespace(Namespace::UserSummary)).unwrap();
/// builder.update_clause(1, ClauseEdit::Field("trans_count_30d".into())).unwrap();
/// builder.update_clause(1, ClauseEdit::Operator(ComparisonOp::Ge)).unwrap();
/// builder.update_clause(1, ClauseEdit::Literal("5".into())).unwrap();
///
/// assert_eq!(builder.render(), "t.age > 30 AND uts.trans_count_30d >= 5");
/// ```
pub struct ConditionBuilder {
    catalogs: Arc<Catalogs>,
    clauses: Vec<Clause>,
    listener: Option<ConditionListener>,
}

impl ConditionBuilder {
    /// Create a builder holding one default clause
    pub fn new(catalogs: Arc<Catalogs>) -> Self {
        let default = Self::default_clause_for(&catalogs);
        Self {
            catalogs,
            clauses: vec![default],
            listener: None,
        }
    }

    /// Create a builder from existing clauses
    ///
    /// Every clause must name a field of its namespace's catalog. An empty
    /// list yields the default clause.
    pub fn from_clauses(catalogs: Arc<Catalogs>, clauses: Vec<Clause>) -> Result<Self> {
        for clause in &clauses {
            Self::check_field(&catalogs, clause.namespace, &clause.field)?;
        }

        let mut builder = Self::new(catalogs);
        if !clauses.is_empty() {
            builder.clauses = clauses;
        }
        Ok(builder)
    }

    /// Register the listener notified after every mutation
    pub fn with_listener(mut self, listener: impl FnMut(&str) + Send + 'static) -> Self {
        self.listener = Some(Box::new(listener));
        self
    }

    pub fn set_listener(&mut self, listener: impl FnMut(&str) + Send + 'static) {
        self.listener = Some(Box::new(listener));
    }

    pub fn catalogs(&self) -> &Catalogs {
        &self.catalogs
    }

    pub fn clauses(&self) -> &[Clause] {
        &self.clauses
    }

    pub fn len(&self) -> usize {
        self.clauses.len()
    }

    /// Always false; kept for API symmetry with `len`
    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    /// The clause a fresh builder starts with
    pub fn default_clause(&self) -> Clause {
        Self::default_clause_for(&self.catalogs)
    }

    /// Append a default clause
    pub fn add_clause(&mut self) {
        let clause = self.default_clause();
        self.clauses.push(clause);
        self.propagate();
    }

    /// Append an already-built clause after checking its field
    pub fn push_clause(&mut self, clause: Clause) -> Result<()> {
        Self::check_field(&self.catalogs, clause.namespace, &clause.field)?;
        self.clauses.push(clause);
        self.propagate();
        Ok(())
    }

    /// Apply one edit to the clause at `index`
    ///
    /// Switching namespace resets the field to the first entry of the new
    /// namespace's catalog. A field foreign to the clause's namespace is
    /// rejected and the clause is left untouched.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range.
    pub fn update_clause(&mut self, index: usize, edit: ClauseEdit) -> Result<()> {
        let catalogs = Arc::clone(&self.catalogs);
        let clause = &mut self.clauses[index];

        match edit {
            ClauseEdit::Namespace(namespace) => {
                if clause.namespace != namespace {
                    clause.namespace = namespace;
                    clause.field = catalogs.for_namespace(namespace).first().key.clone();
                }
            }
            ClauseEdit::Field(field) => {
                Self::check_field(&catalogs, clause.namespace, &field)?;
                clause.field = field;
            }
            ClauseEdit::Operator(op) => clause.operator = op,
            ClauseEdit::Literal(literal) => clause.literal = literal,
        }

        self.propagate();
        Ok(())
    }

    /// Remove the clause at `index`; removing the last one reinstates the default
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range.
    pub fn remove_clause(&mut self, index: usize) {
        self.clauses.remove(index);
        if self.clauses.is_empty() {
            let clause = self.default_clause();
            self.clauses.push(clause);
        }
        self.propagate();
    }

    /// Drop every clause and start over from the default
    pub fn reset(&mut self) {
        let clause = self.default_clause();
        self.clauses = vec![clause];
        self.propagate();
    }

    /// Render one clause as `{prefix}{field} {op} {literal}`
    pub fn render_clause(&self, clause: &Clause) -> String {
        let field_type = self.catalogs.field_type(clause.namespace, &clause.field);
        format!(
            "{}{} {} {}",
            clause.namespace.prefix(),
            clause.field,
            clause.operator,
            format_literal(field_type, &clause.literal)
        )
    }

    /// Render the full predicate
    pub fn render(&self) -> String {
        self.clauses
            .iter()
            .map(|c| self.render_clause(c))
            .collect::<Vec<_>>()
            .join(" AND ")
    }

    /// Literal problems that `render` writes through unchanged
    pub fn issues(&self) -> Vec<ClauseIssue> {
        self.clauses
            .iter()
            .enumerate()
            .filter_map(|(index, clause)| {
                let field_type = self.catalogs.field_type(clause.namespace, &clause.field)?;
                let kind = literal_issue(field_type, &clause.literal)?;
                Some(ClauseIssue { index, kind })
            })
            .collect()
    }

    fn propagate(&mut self) {
        let predicate = self.render();
        log::trace!("Condition updated: {}", predicate);
        if let Some(listener) = self.listener.as_mut() {
            listener(&predicate);
        }
    }

    fn default_clause_for(catalogs: &Catalogs) -> Clause {
        Clause {
            namespace: Namespace::Transaction,
            field: catalogs.for_namespace(Namespace::Transaction).first().key.clone(),
            operator: ComparisonOp::Eq,
            literal: Literal::default(),
        }
    }

    fn check_field(catalogs: &Catalogs, namespace: Namespace, field: &str) -> Result<()> {
        if catalogs.for_namespace(namespace).contains(field) {
            Ok(())
        } else {
            Err(CoreError::UnknownField {
                namespace,
                field: field.to_string(),
            })
        }
    }
}

impl fmt::Debug for ConditionBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConditionBuilder")
            .field("clauses", &self.clauses)
            .field("has_listener", &self.listener.is_some())
            .finish()
    }
}

fn literal_issue(field_type: FieldType, literal: &Literal) -> Option<IssueKind> {
    if literal.is_blank() {
        return Some(IssueKind::EmptyLiteral);
    }
    match field_type {
        FieldType::Boolean if canonical_bool(literal).is_none() => {
            Some(IssueKind::UnrecognizedBoolean(literal.to_string()))
        }
        FieldType::Number => match literal {
            Literal::Text(s) if s.trim().parse::<f64>().is_err() => {
                Some(IssueKind::NotANumber(s.clone()))
            }
            Literal::Bool(b) => Some(IssueKind::NotANumber(b.to_string())),
            _ => None,
        },
        _ => None,
    }
}

/// A literal that renders but is probably not what the operator meant
#[derive(Debug, Clone, PartialEq)]
pub struct ClauseIssue {
    /// Position of the clause in the builder
    pub index: usize,
    pub kind: IssueKind,
}

#[derive(Debug, Clone, PartialEq)]
pub enum IssueKind {
    EmptyLiteral,
    UnrecognizedBoolean(String),
    NotANumber(String),
}

impl fmt::Display for ClauseIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let n = self.index + 1;
        match &self.kind {
            IssueKind::EmptyLiteral => write!(f, "clause {}: value is empty", n),
            IssueKind::UnrecognizedBoolean(v) => {
                write!(f, "clause {}: '{}' is not a boolean (use TRUE or FALSE)", n, v)
            }
            IssueKind::NotANumber(v) => write!(f, "clause {}: '{}' is not a number", n, v),
        }
    }
}
