//! Mapping from database column types to Go field types.

use indexmap::IndexMap;

use crate::schema::ColumnSchema;

/// Whether nullable columns get the optional-value field types.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum NullablePolicy {
    /// Every column uses the plain field type, nullable or not.
    #[default]
    Ignore,
    /// Nullable columns use the `gmq.Option*` field types.
    Optional,
}

/// The pair of Go types used for one database type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldTypes {
    /// Type used for non-nullable columns
    pub plain: String,
    /// Type used for nullable columns when [`NullablePolicy::Optional`] is active
    pub nullable: String,
}

impl FieldTypes {
    pub fn new(plain: impl Into<String>, nullable: impl Into<String>) -> Self {
        Self {
            plain: plain.into(),
            nullable: nullable.into(),
        }
    }
}

/// Trait for mapping database column types to target-language type strings.
///
/// Mapping never fails: unknown types resolve to the text type.
pub trait TypeMapper {
    /// Map a database type keyword to the plain field type.
    fn map_type(&self, data_type: &str) -> &str;

    /// Map a database type keyword to the optional-value field type.
    fn map_nullable_type(&self, data_type: &str) -> &str;

    /// Resolve the field type for a column under the given policy.
    fn field_type(&self, column: &ColumnSchema, policy: NullablePolicy) -> &str {
        match policy {
            NullablePolicy::Optional if column.is_nullable => {
                self.map_nullable_type(&column.data_type)
            }
            _ => self.map_type(&column.data_type),
        }
    }
}

/// Immutable lookup table from lowercase database type keywords to Go types.
///
/// Built once and handed to the emitter; alternate or extended mappings are
/// made with [`TypeMap::with_type`].
#[derive(Debug, Clone)]
pub struct TypeMap {
    entries: IndexMap<String, FieldTypes>,
    fallback: FieldTypes,
}

impl TypeMap {
    /// Go text type used for unknown database types.
    pub const TEXT: &'static str = "string";

    /// A map with no entries: every type falls back to `string`.
    pub fn empty() -> Self {
        Self {
            entries: IndexMap::new(),
            fallback: FieldTypes::new(Self::TEXT, Self::TEXT),
        }
    }

    /// The standard MySQL-to-Go mapping.
    pub fn go() -> Self {
        Self::empty()
            .with_type("bigint", "int64", "gmq.OptionInt64")
            .with_type("int", "int", "gmq.OptionInt")
            .with_type("integer", "int", "gmq.OptionInt")
            .with_type("tinyint", "int", "gmq.OptionInt")
            .with_type("smallint", "int", "gmq.OptionInt")
            .with_type("mediumint", "int", "gmq.OptionInt")
            .with_type("char", "string", "gmq.OptionString")
            .with_type("varchar", "string", "gmq.OptionString")
            .with_type("text", "string", "gmq.OptionString")
            .with_type("datetime", "time.Time", "gmq.OptionTime")
            .with_type("timestamp", "time.Time", "gmq.OptionTime")
            .with_type("date", "time.Time", "gmq.OptionTime")
            .with_type("decimal", "float64", "gmq.OptionFloat64")
            .with_type("double", "float64", "gmq.OptionFloat64")
            .with_type("float", "float64", "gmq.OptionFloat64")
    }

    /// Add or replace the mapping for a database type.
    pub fn with_type(
        mut self,
        data_type: &str,
        plain: impl Into<String>,
        nullable: impl Into<String>,
    ) -> Self {
        self.entries
            .insert(data_type.to_lowercase(), FieldTypes::new(plain, nullable));
        self
    }

    /// Look up the entry for a database type, if one is known.
    pub fn get(&self, data_type: &str) -> Option<&FieldTypes> {
        self.entries.get(&data_type.to_lowercase())
    }

    fn resolve(&self, data_type: &str) -> &FieldTypes {
        self.get(data_type).unwrap_or(&self.fallback)
    }
}

impl Default for TypeMap {
    fn default() -> Self {
        Self::go()
    }
}

impl TypeMapper for TypeMap {
    fn map_type(&self, data_type: &str) -> &str {
        &self.resolve(data_type).plain
    }

    fn map_nullable_type(&self, data_type: &str) -> &str {
        &self.resolve(data_type).nullable
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_go_type_map() {
        let map = TypeMap::go();

        assert_eq!(map.map_type("bigint"), "int64");
        assert_eq!(map.map_type("int"), "int");
        assert_eq!(map.map_type("tinyint"), "int");
        assert_eq!(map.map_type("char"), "string");
        assert_eq!(map.map_type("varchar"), "string");
        assert_eq!(map.map_type("datetime"), "time.Time");
        assert_eq!(map.map_type("decimal"), "float64");
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        let map = TypeMap::go();

        assert_eq!(map.map_type("BIGINT"), map.map_type("bigint"));
        assert_eq!(map.map_type("VarChar"), "string");
        assert_eq!(map.map_nullable_type("DateTime"), "gmq.OptionTime");
    }

    #[test]
    fn test_unknown_type_falls_back_to_text() {
        let map = TypeMap::go();

        assert_eq!(map.map_type("totally_unknown"), "string");
        assert_eq!(map.map_type(""), "string");
        assert_eq!(map.map_nullable_type("geometry"), "string");
    }

    #[test]
    fn test_nullable_types() {
        let map = TypeMap::go();

        assert_eq!(map.map_nullable_type("bigint"), "gmq.OptionInt64");
        assert_eq!(map.map_nullable_type("int"), "gmq.OptionInt");
        assert_eq!(map.map_nullable_type("varchar"), "gmq.OptionString");
        assert_eq!(map.map_nullable_type("decimal"), "gmq.OptionFloat64");
    }

    #[test]
    fn test_field_type_ignores_nullability_by_default() {
        let map = TypeMap::go();
        let column = ColumnSchema::new("age", "int").nullable(true);

        assert_eq!(map.field_type(&column, NullablePolicy::default()), "int");
        assert_eq!(map.field_type(&column, NullablePolicy::Ignore), "int");
    }

    #[test]
    fn test_field_type_optional_policy() {
        let map = TypeMap::go();
        let nullable = ColumnSchema::new("age", "int").nullable(true);
        let required = ColumnSchema::new("id", "bigint");

        assert_eq!(
            map.field_type(&nullable, NullablePolicy::Optional),
            "gmq.OptionInt"
        );
        assert_eq!(map.field_type(&required, NullablePolicy::Optional), "int64");
    }

    #[test]
    fn test_with_type_overrides_and_extends() {
        let map = TypeMap::go()
            .with_type("JSON", "json.RawMessage", "gmq.OptionString")
            .with_type("tinyint", "int8", "gmq.OptionInt");

        assert_eq!(map.map_type("json"), "json.RawMessage");
        assert_eq!(map.map_type("tinyint"), "int8");
        assert!(map.get("Json").is_some());
    }

    #[test]
    fn test_empty_map() {
        let map = TypeMap::empty();

        assert_eq!(map.map_type("bigint"), "string");
        assert!(map.get("bigint").is_none());
    }
}
