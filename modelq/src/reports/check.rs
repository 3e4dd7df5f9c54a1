//! Check command report data structures.

use std::path::PathBuf;

use super::output::{Output, Report};

/// Models described by a manifest.
#[derive(Debug)]
pub struct CheckReport {
    /// Path to the config file.
    pub config_path: PathBuf,
    pub database: String,
    pub models: Vec<ModelInfo>,
}

/// The struct generated for one table.
#[derive(Debug)]
pub struct ModelInfo {
    pub table: String,
    pub type_name: String,
    pub fields: Vec<FieldInfo>,
}

#[derive(Debug)]
pub struct FieldInfo {
    pub name: String,
    pub ty: String,
    pub column: String,
    /// Whether the column type has an explicit mapping (otherwise `string`)
    pub mapped: bool,
}

impl CheckReport {
    /// Number of columns whose type fell back to `string`.
    pub fn unmapped_count(&self) -> usize {
        self.models
            .iter()
            .flat_map(|m| &m.fields)
            .filter(|f| !f.mapped)
            .count()
    }
}

impl Report for CheckReport {
    fn render(&self, out: &mut dyn Output) {
        out.preformatted(&format!("✓ {} is valid", self.config_path.display()));
        out.newline();
        out.key_value("Database", &self.database);
        out.section(&format!("Models ({})", self.models.len()));

        for model in &self.models {
            out.list_item(&format!("{} -> {}", model.table, model.type_name));
            for field in &model.fields {
                out.preformatted(&format!(
                    "      {} {} ({})",
                    field.name, field.ty, field.column
                ));
            }
        }

        let unmapped = self.unmapped_count();
        if unmapped > 0 {
            out.newline();
            out.warning(&format!(
                "{} column{} with unknown types will be generated as string",
                unmapped,
                if unmapped == 1 { "" } else { "s" }
            ));
        }
    }
}
