//! Generate operation - Go models from the manifest schema.

use std::{num::NonZeroUsize, path::PathBuf};

use eyre::{Context, Result};
use modelq_codegen::{GenerationConfig, Generator};
use modelq_core::NullablePolicy;
use modelq_manifest::Manifest;
use tracing::debug;

use crate::reports::{
    FailedTable, GenerateReport, GenerationResult, PreviewFile, PreviewResult, WrittenResult,
};

/// Command-line overrides for the generate operation.
#[derive(Debug, Clone, Default)]
pub struct GenerateOptions {
    pub output_dir: Option<PathBuf>,
    pub package: Option<String>,
    pub jobs: Option<NonZeroUsize>,
    /// Force `gmq.Option*` types for nullable columns
    pub nullable_types: bool,
    pub timestamp: bool,
    /// Whether to preview without writing files.
    pub dry_run: bool,
}

/// Merge manifest settings with command-line overrides.
pub fn generation_config(manifest: &Manifest, opts: &GenerateOptions) -> GenerationConfig {
    let output = &manifest.output;
    let dir = opts
        .output_dir
        .clone()
        .unwrap_or_else(|| output.directory.clone());
    let policy = if opts.nullable_types {
        NullablePolicy::Optional
    } else {
        output.nullable_policy()
    };

    let mut config = GenerationConfig::new(dir)
        .nullable_policy(policy)
        .timestamp(output.timestamp && opts.timestamp);
    if let Some(package) = opts.package.as_ref().or(output.package.as_ref()) {
        config = config.package_name(package);
    }
    if let Some(max) = opts.jobs.or(output.max_concurrency) {
        config = config.max_concurrency(max);
    }
    config
}

/// Execute the generate operation.
///
/// Individual table failures end up in the report; only a failure to set up
/// the output directory is returned as an error.
pub async fn generate(manifest: &Manifest, opts: GenerateOptions) -> Result<GenerateReport> {
    let config = generation_config(manifest, &opts);
    debug!(
        output_dir = %config.output_dir.display(),
        package = %config.package_name,
        dry_run = opts.dry_run,
        "resolved generation config"
    );
    let generator = Generator::with_type_map(config, manifest.type_map());

    let result = if opts.dry_run {
        let files = generator
            .preview(&manifest.database, &manifest.tables)
            .into_iter()
            .map(|f| PreviewFile {
                path: f.path,
                content: f.content,
            })
            .collect();
        GenerationResult::Preview(PreviewResult { files })
    } else {
        let report = generator
            .generate_all(&manifest.database, &manifest.tables)
            .await
            .wrap_err("Failed to generate code")?;

        let mut generated: Vec<PathBuf> = report
            .succeeded()
            .filter_map(|o| o.result.as_ref().ok().cloned())
            .collect();
        generated.sort();

        let mut failed: Vec<FailedTable> = report
            .failed()
            .filter_map(|o| {
                o.error().map(|err| FailedTable {
                    table: err.table().to_string(),
                    message: err.full_message(),
                })
            })
            .collect();
        failed.sort_by(|a, b| a.table.cmp(&b.table));

        GenerationResult::Written(WrittenResult {
            output_dir: generator.config().output_dir.clone(),
            generated,
            failed,
        })
    };

    Ok(GenerateReport {
        database: manifest.database.clone(),
        table_count: manifest.tables.len(),
        column_count: manifest.column_count(),
        result,
    })
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    const MANIFEST: &str = r#"
        database = "shop"

        [output]
        directory = "models"
        max_concurrency = 2

        [[tables.users]]
        name = "id"
        type = "bigint"

        [[tables.orders]]
        name = "id"
        type = "bigint"
        "#;

    fn options() -> GenerateOptions {
        GenerateOptions {
            timestamp: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_config_from_manifest() {
        let manifest: Manifest = MANIFEST.parse().unwrap();
        let config = generation_config(&manifest, &options());

        assert_eq!(config.output_dir, PathBuf::from("models"));
        assert_eq!(config.package_name, "models");
        assert_eq!(config.max_concurrency.get(), 2);
        assert_eq!(config.nullable_policy, NullablePolicy::Ignore);
        assert!(config.timestamp);
    }

    #[test]
    fn test_options_override_manifest() {
        let manifest: Manifest = MANIFEST.parse().unwrap();
        let opts = GenerateOptions {
            output_dir: Some(PathBuf::from("gen/entity")),
            package: Some("db".to_string()),
            jobs: NonZeroUsize::new(5),
            nullable_types: true,
            timestamp: false,
            dry_run: false,
        };
        let config = generation_config(&manifest, &opts);

        assert_eq!(config.output_dir, PathBuf::from("gen/entity"));
        assert_eq!(config.package_name, "db");
        assert_eq!(config.max_concurrency.get(), 5);
        assert_eq!(config.nullable_policy, NullablePolicy::Optional);
        assert!(!config.timestamp);
    }

    #[tokio::test]
    async fn test_dry_run_writes_nothing() {
        let temp = TempDir::new().unwrap();
        let manifest: Manifest = MANIFEST.parse().unwrap();
        let opts = GenerateOptions {
            output_dir: Some(temp.path().join("models")),
            dry_run: true,
            ..options()
        };

        let report = generate(&manifest, opts).await.unwrap();

        let GenerationResult::Preview(preview) = report.result else {
            panic!("expected a preview");
        };
        assert_eq!(preview.files.len(), 2);
        assert!(!temp.path().join("models").exists());
    }

    #[tokio::test]
    async fn test_generate_reports_failures_per_table() {
        let temp = TempDir::new().unwrap();
        let out = temp.path().join("models");
        fs::create_dir_all(out.join("orders.go")).unwrap();

        let manifest: Manifest = MANIFEST.parse().unwrap();
        let opts = GenerateOptions {
            output_dir: Some(out.clone()),
            ..options()
        };

        let report = generate(&manifest, opts).await.unwrap();

        let GenerationResult::Written(written) = report.result else {
            panic!("expected written files");
        };
        assert_eq!(written.generated, vec![out.join("users.go")]);
        assert_eq!(written.failed.len(), 1);
        assert_eq!(written.failed[0].table, "orders");
        assert_eq!(report.table_count, 2);
        assert_eq!(report.column_count, 2);
    }
}
