//! Field catalogs
//!
//! A catalog lists the fields a namespace exposes to the builder and the
//! declared type of each one. Catalogs are read-only once built and are
//! shared between builders through an `Arc<Catalogs>`.

use super::types::Namespace;
use crate::error::{CoreError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Declared type of a catalog field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    Number,
    String,
    Boolean,
}

/// One entry of a field catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSpec {
    /// Display label
    pub label: String,
    /// Identifier used in the predicate
    pub key: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
}

impl FieldSpec {
    pub fn new(label: impl Into<String>, key: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            label: label.into(),
            key: key.into(),
            field_type,
        }
    }
}

/// Ordered, non-empty list of fields for one namespace
#[derive(Debug, Clone, PartialEq)]
pub struct FieldCatalog {
    namespace: Namespace,
    fields: Vec<FieldSpec>,
}

impl FieldCatalog {
    /// Build a catalog, rejecting empty lists and duplicate keys
    pub fn new(namespace: Namespace, fields: Vec<FieldSpec>) -> Result<Self> {
        if fields.is_empty() {
            return Err(CoreError::EmptyCatalog(namespace));
        }

        let mut seen = HashSet::new();
        for field in &fields {
            if !seen.insert(field.key.as_str()) {
                return Err(CoreError::DuplicateField {
                    namespace,
                    field: field.key.clone(),
                });
            }
        }

        Ok(Self { namespace, fields })
    }

    pub fn namespace(&self) -> Namespace {
        self.namespace
    }

    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    /// The default field of the namespace
    pub fn first(&self) -> &FieldSpec {
        // Non-empty by construction
        &self.fields[0]
    }

    pub fn get(&self, key: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.key == key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    fn from_table(namespace: Namespace, table: &[(&str, &str, FieldType)]) -> Self {
        Self {
            namespace,
            fields: table
                .iter()
                .map(|(label, key, ty)| FieldSpec::new(*label, *key, *ty))
                .collect(),
        }
    }
}

const TRANSACTION_FIELDS: &[(&str, &str, FieldType)] = &[
    ("Age", "age", FieldType::Number),
    ("Transaction Amount", "trans_amt", FieldType::Number),
    ("Is New Transaction", "new_trans", FieldType::Boolean),
    ("Sex", "sex", FieldType::String),
    ("Nationality", "nationality", FieldType::String),
    ("Occupation", "occupation", FieldType::String),
    ("Balance", "balance", FieldType::Number),
    ("Origination", "origination", FieldType::String),
    ("Cross Border", "cross_border", FieldType::Boolean),
    ("Transaction Time", "trans_time", FieldType::String),
    ("PEP Status", "pep_status", FieldType::Boolean),
];

const USER_SUMMARY_FIELDS: &[(&str, &str, FieldType)] = &[
    ("Sum Amount 15d", "sum_trans_amount_15d", FieldType::Number),
    ("Sum Amount 30d", "sum_trans_amount_30d", FieldType::Number),
    ("Sum Amount 60d", "sum_trans_amount_60d", FieldType::Number),
    ("Sum Amount 90d", "sum_trans_amount_90d", FieldType::Number),
    ("Avg Amount 15d", "avg_trans_amount_15d", FieldType::Number),
    ("Avg Amount 30d", "avg_trans_amount_30d", FieldType::Number),
    ("Avg Amount 60d", "avg_trans_amount_60d", FieldType::Number),
    ("Avg Amount 90d", "avg_trans_amount_90d", FieldType::Number),
    ("Transaction Count 15d", "trans_count_15d", FieldType::Number),
    ("Transaction Count 30d", "trans_count_30d", FieldType::Number),
    ("Transaction Count 60d", "trans_count_60d", FieldType::Number),
    ("Transaction Count 90d", "trans_count_90d", FieldType::Number),
    ("High Value Count 90d", "high_value_trans_count_90d", FieldType::Number),
    ("Crypto Ratio 30d", "crypto_trans_ratio_30d", FieldType::Number),
    ("Night Ratio 30d", "night_trans_ratio_30d", FieldType::Number),
    ("Weekday Ratio", "weekday_trans_ratio", FieldType::Number),
    ("Avg Gap Between Trans", "avg_gap_between_trans", FieldType::Number),
    ("Days Since Last Trans", "days_since_last_trans", FieldType::Number),
    ("Burst Trans Count 24h", "burst_trans_count_24h", FieldType::Number),
    ("KYC Age Days", "kyc_age_days", FieldType::Number),
    ("Large Trans Change Ratio", "large_trans_change_ratio", FieldType::Number),
    ("Geo Diversity Score", "geo_diversity_score", FieldType::Number),
    ("Flagged Trans Ratio 30d", "flagged_trans_ratio_30d", FieldType::Number),
    ("Trans Below Threshold 7d", "trans_below_threshold_7d", FieldType::Number),
];

/// On-disk shape of a catalog override file
#[derive(Debug, Deserialize)]
struct CatalogFile {
    transaction: Vec<FieldSpec>,
    user_summary: Vec<FieldSpec>,
}

/// The pair of catalogs the builder validates against
#[derive(Debug, Clone, PartialEq)]
pub struct Catalogs {
    transaction: FieldCatalog,
    user_summary: FieldCatalog,
}

impl Catalogs {
    pub fn new(transaction: FieldCatalog, user_summary: FieldCatalog) -> Result<Self> {
        if transaction.namespace() != Namespace::Transaction {
            return Err(CoreError::CatalogParse(format!(
                "expected a Transaction catalog, got {}",
                transaction.namespace()
            )));
        }
        if user_summary.namespace() != Namespace::UserSummary {
            return Err(CoreError::CatalogParse(format!(
                "expected a User Summary catalog, got {}",
                user_summary.namespace()
            )));
        }
        Ok(Self {
            transaction,
            user_summary,
        })
    }

    /// Built-in catalogs matching the backend's transaction and summary tables
    pub fn standard() -> Self {
        Self {
            transaction: FieldCatalog::from_table(Namespace::Transaction, TRANSACTION_FIELDS),
            user_summary: FieldCatalog::from_table(Namespace::UserSummary, USER_SUMMARY_FIELDS),
        }
    }

    /// Parse catalogs from YAML
    ///
    /// ```yaml
    /// transaction:
    ///   - { label: Age, key: age, type: number }
    /// user_summary:
    ///   - { label: Txn Count 30d, key: trans_count_30d, type: number }
    /// ```
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        let file: CatalogFile = serde_yaml::from_str(content)?;
        let catalogs = Self::new(
            FieldCatalog::new(Namespace::Transaction, file.transaction)?,
            FieldCatalog::new(Namespace::UserSummary, file.user_summary)?,
        )?;
        log::debug!(
            "Loaded field catalogs: {} transaction fields, {} user summary fields",
            catalogs.transaction.len(),
            catalogs.user_summary.len()
        );
        Ok(catalogs)
    }

    pub fn for_namespace(&self, namespace: Namespace) -> &FieldCatalog {
        match namespace {
            Namespace::Transaction => &self.transaction,
            Namespace::UserSummary => &self.user_summary,
        }
    }

    /// Look up the declared type of a field
    pub fn field_type(&self, namespace: Namespace, key: &str) -> Option<FieldType> {
        self.for_namespace(namespace).get(key).map(|f| f.field_type)
    }
}

impl Default for Catalogs {
    fn default() -> Self {
        Self::standard()
    }
}
