//! Generate command report data structures.

use std::path::PathBuf;

use super::output::{Output, Report};

/// Report data from code generation.
#[derive(Debug)]
pub struct GenerateReport {
    /// Source database name from manifest.
    pub database: String,
    /// Number of tables in the schema.
    pub table_count: usize,
    /// Number of columns across all tables.
    pub column_count: usize,
    /// Generation result (files written or preview).
    pub result: GenerationResult,
}

/// Result of code generation.
#[derive(Debug)]
pub enum GenerationResult {
    /// Files were written to disk.
    Written(WrittenResult),
    /// Dry-run preview.
    Preview(PreviewResult),
}

/// Result when files were written to disk.
#[derive(Debug)]
pub struct WrittenResult {
    pub output_dir: PathBuf,
    /// Files written successfully, sorted.
    pub generated: Vec<PathBuf>,
    /// Tables that failed, sorted by table name.
    pub failed: Vec<FailedTable>,
}

/// A table whose generation failed.
#[derive(Debug)]
pub struct FailedTable {
    pub table: String,
    pub message: String,
}

/// Result of a dry-run preview.
#[derive(Debug)]
pub struct PreviewResult {
    /// Files that would be generated.
    pub files: Vec<PreviewFile>,
}

/// A file in preview mode.
#[derive(Debug)]
pub struct PreviewFile {
    pub path: String,
    pub content: String,
}

impl Report for GenerateReport {
    fn render(&self, out: &mut dyn Output) {
        match &self.result {
            GenerationResult::Written(written) => self.render_written(out, written),
            GenerationResult::Preview(preview) => self.render_preview(out, preview),
        }
    }
}

impl GenerateReport {
    fn render_written(&self, out: &mut dyn Output, written: &WrittenResult) {
        out.key_value("Database", &self.database);
        out.key_value("Tables", &self.table_count.to_string());
        out.key_value("Columns", &self.column_count.to_string());
        out.newline();

        if !written.generated.is_empty() {
            out.section(&format!("Generated ({})", written.generated.len()));
            for path in &written.generated {
                out.added_item(&path.display().to_string());
            }
        }

        if !written.failed.is_empty() {
            out.newline();
            out.section(&format!("Failed ({})", written.failed.len()));
            for failed in &written.failed {
                out.failed_item(&format!("{}: {}", failed.table, failed.message));
            }
        }

        if written.generated.is_empty() && written.failed.is_empty() {
            out.warning(&format!(
                "no tables to generate into {}",
                written.output_dir.display()
            ));
        }
    }

    fn render_preview(&self, out: &mut dyn Output, preview: &PreviewResult) {
        for file in &preview.files {
            out.divider(&file.path);
            out.preformatted(&file.content);
        }

        out.divider("Summary");
        out.preformatted(&format!("{} files would be generated", preview.files.len()));
    }
}
