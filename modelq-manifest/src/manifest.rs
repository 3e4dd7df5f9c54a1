//! The `modelq.toml` manifest.

use std::{num::NonZeroUsize, path::Path, path::PathBuf, str::FromStr};

use indexmap::IndexMap;
use modelq_core::{NullablePolicy, Schema, TypeMap};
use serde::Deserialize;

use crate::{Error, Result};

/// Root of a `modelq.toml` file.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Manifest {
    /// Source database name, used for provenance comments
    pub database: String,

    #[serde(default)]
    pub output: OutputConfig,

    /// Additional or replacement type mappings, keyed by database type
    #[serde(default)]
    pub types: IndexMap<String, TypeOverride>,

    /// Tables and their ordered columns
    #[serde(default)]
    pub tables: Schema,
}

/// The `[output]` section.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    pub directory: PathBuf,
    /// Go package name, defaults to the directory's last component
    pub package: Option<String>,
    pub timestamp: bool,
    /// Use `gmq.Option*` types for nullable columns
    pub nullable_types: bool,
    pub max_concurrency: Option<NonZeroUsize>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("models"),
            package: None,
            timestamp: true,
            nullable_types: false,
            max_concurrency: None,
        }
    }
}

impl OutputConfig {
    pub fn nullable_policy(&self) -> NullablePolicy {
        if self.nullable_types {
            NullablePolicy::Optional
        } else {
            NullablePolicy::Ignore
        }
    }
}

/// A `[types.<db type>]` entry.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TypeOverride {
    /// Go type for non-nullable columns
    #[serde(rename = "type")]
    pub plain: String,
    /// Go type for nullable columns, defaults to `type`
    pub nullable: Option<String>,
}

impl FromStr for Manifest {
    type Err = Box<Error>;

    fn from_str(s: &str) -> Result<Self> {
        parse_manifest(s, "modelq.toml")
    }
}

impl Manifest {
    /// Parse a manifest file from the given path.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            Box::new(Error::Io {
                path: path.to_path_buf(),
                source: e,
            })
        })?;
        parse_manifest(&content, &path.display().to_string())
    }

    /// The standard Go mapping extended with the `[types]` overrides.
    pub fn type_map(&self) -> TypeMap {
        self.types
            .iter()
            .fold(TypeMap::go(), |map, (data_type, over)| {
                let nullable = over.nullable.as_deref().unwrap_or(&over.plain);
                map.with_type(data_type, over.plain.as_str(), nullable)
            })
    }

    /// Number of columns across all tables.
    pub fn column_count(&self) -> usize {
        self.tables.values().map(Vec::len).sum()
    }
}

fn parse_manifest(content: &str, filename: &str) -> Result<Manifest> {
    toml::from_str(content).map_err(|e| Error::parse(e, content, filename))
}

#[cfg(test)]
mod tests {
    use modelq_core::TypeMapper;

    use super::*;

    #[test]
    fn test_minimal_manifest() {
        let manifest: Manifest = r#"database = "shop""#.parse().unwrap();

        assert_eq!(manifest.database, "shop");
        assert_eq!(manifest.output.directory, PathBuf::from("models"));
        assert!(manifest.output.package.is_none());
        assert!(manifest.output.timestamp);
        assert_eq!(manifest.output.nullable_policy(), NullablePolicy::Ignore);
        assert!(manifest.tables.is_empty());
    }

    #[test]
    fn test_tables_keep_column_order() {
        let manifest: Manifest = r#"
            database = "shop"

            [[tables.users]]
            name = "id"
            type = "BIGINT"

            [[tables.users]]
            name = "user_name"
            type = "varchar"
            nullable = true
            comment = "login name"

            [[tables.orders]]
            name = "id"
            type = "bigint"
            "#
        .parse()
        .unwrap();

        assert_eq!(manifest.tables.len(), 2);
        assert_eq!(manifest.column_count(), 3);

        let users = &manifest.tables["users"];
        assert_eq!(users[0].column_name, "id");
        assert_eq!(users[0].data_type, "BIGINT");
        assert!(!users[0].is_nullable);
        assert_eq!(users[0].comment, "");
        assert_eq!(users[1].column_name, "user_name");
        assert!(users[1].is_nullable);
        assert_eq!(users[1].comment, "login name");
    }

    #[test]
    fn test_output_section() {
        let manifest: Manifest = r#"
            database = "shop"

            [output]
            directory = "gen/entity"
            package = "entity"
            timestamp = false
            nullable_types = true
            max_concurrency = 2
            "#
        .parse()
        .unwrap();

        assert_eq!(manifest.output.directory, PathBuf::from("gen/entity"));
        assert_eq!(manifest.output.package.as_deref(), Some("entity"));
        assert!(!manifest.output.timestamp);
        assert_eq!(manifest.output.nullable_policy(), NullablePolicy::Optional);
        assert_eq!(manifest.output.max_concurrency.map(NonZeroUsize::get), Some(2));
    }

    #[test]
    fn test_type_overrides() {
        let manifest: Manifest = r#"
            database = "shop"

            [types.json]
            type = "json.RawMessage"

            [types.tinyint]
            type = "int8"
            nullable = "gmq.OptionInt"
            "#
        .parse()
        .unwrap();

        let map = manifest.type_map();
        assert_eq!(map.map_type("json"), "json.RawMessage");
        assert_eq!(map.map_nullable_type("json"), "json.RawMessage");
        assert_eq!(map.map_type("tinyint"), "int8");
        assert_eq!(map.map_type("bigint"), "int64");
    }

    #[test]
    fn test_missing_database_is_a_parse_error() {
        let err = "[output]\ndirectory = \"models\"\n"
            .parse::<Manifest>()
            .unwrap_err();
        assert!(matches!(*err, Error::Parse { .. }));
    }

    #[test]
    fn test_unknown_field_is_rejected() {
        let err = "database = \"shop\"\n[output]\ndir = \"models\"\n"
            .parse::<Manifest>()
            .unwrap_err();
        assert!(matches!(*err, Error::Parse { .. }));
    }

    #[test]
    fn test_misspelled_column_field_is_rejected() {
        let err = r#"
            database = "shop"

            [[tables.users]]
            name = "id"
            type = "int"
            nulable = true
            "#
        .parse::<Manifest>()
        .unwrap_err();
        assert!(matches!(*err, Error::Parse { .. }));
    }
}
