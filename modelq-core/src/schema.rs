//! Schema data model produced by database introspection.

use indexmap::IndexMap;
use serde::Deserialize;

/// All tables of a database, keyed by table name.
///
/// Generation is per table, so iteration order carries no meaning.
pub type Schema = IndexMap<String, TableSchema>;

/// Ordered column list of one table. Order determines emitted field order.
pub type TableSchema = Vec<ColumnSchema>;

/// One column as reported by the database.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ColumnSchema {
    /// Column name, used verbatim in serialization tags
    #[serde(rename = "name")]
    pub column_name: String,
    /// Declared database type keyword (e.g. "bigint", "varchar")
    #[serde(rename = "type")]
    pub data_type: String,
    #[serde(default, rename = "nullable")]
    pub is_nullable: bool,
    /// Column comment, empty when the column has none
    #[serde(default)]
    pub comment: String,
}

impl ColumnSchema {
    /// Create a non-nullable column without comment.
    pub fn new(column_name: impl Into<String>, data_type: impl Into<String>) -> Self {
        Self {
            column_name: column_name.into(),
            data_type: data_type.into().to_lowercase(),
            is_nullable: false,
            comment: String::new(),
        }
    }

    /// Mark the column as nullable.
    pub fn nullable(mut self, is_nullable: bool) -> Self {
        self.is_nullable = is_nullable;
        self
    }

    /// Attach a column comment.
    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = comment.into();
        self
    }

    /// Whether the column carries a non-empty comment.
    pub fn has_comment(&self) -> bool {
        !self.comment.is_empty()
    }
}
