//! Check operation - describe the models a manifest produces.

use std::path::Path;

use modelq_core::{TypeMapper, to_capital_case};
use modelq_manifest::Manifest;

use crate::reports::{CheckReport, FieldInfo, ModelInfo};

/// Execute the check operation.
pub fn check(manifest: &Manifest, config_path: &Path) -> CheckReport {
    let type_map = manifest.type_map();
    let policy = manifest.output.nullable_policy();

    let models = manifest
        .tables
        .iter()
        .map(|(table, columns)| ModelInfo {
            table: table.clone(),
            type_name: to_capital_case(table),
            fields: columns
                .iter()
                .map(|column| FieldInfo {
                    name: to_capital_case(&column.column_name),
                    ty: type_map.field_type(column, policy).to_string(),
                    column: column.column_name.clone(),
                    mapped: type_map.get(&column.data_type).is_some(),
                })
                .collect(),
        })
        .collect();

    CheckReport {
        config_path: config_path.to_path_buf(),
        database: manifest.database.clone(),
        models,
    }
}
