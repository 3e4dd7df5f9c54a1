//! Core types and pure transformations for the ModelQ generator.
//!
//! This crate holds the schema data model handed over by schema
//! introspection, the identifier normalization used for type and field
//! names, and the database-to-Go type mapping.

mod naming;
mod schema;
mod type_mapper;

// Identifier normalization
pub use naming::to_capital_case;
// Schema data model
pub use schema::{ColumnSchema, Schema, TableSchema};
// Type mapping
pub use type_mapper::{FieldTypes, NullablePolicy, TypeMap, TypeMapper};
