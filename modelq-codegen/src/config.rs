//! Per-run generation configuration.

use std::{
    num::NonZeroUsize,
    path::{Path, PathBuf},
    thread,
};

use modelq_core::NullablePolicy;

/// Immutable configuration of a single generation run.
#[derive(Debug, Clone)]
pub struct GenerationConfig {
    /// Directory receiving one file per table
    pub output_dir: PathBuf,
    /// Go package declared by every generated file
    pub package_name: String,
    pub nullable_policy: NullablePolicy,
    /// Stamp files with the generation time
    pub timestamp: bool,
    /// Upper bound on tables generated at the same time
    pub max_concurrency: NonZeroUsize,
}

impl GenerationConfig {
    /// Configuration writing into `output_dir`, with the package named after
    /// the directory's last component.
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        let output_dir = output_dir.into();
        let package_name = default_package_name(&output_dir);
        Self {
            output_dir,
            package_name,
            nullable_policy: NullablePolicy::default(),
            timestamp: true,
            max_concurrency: default_concurrency(),
        }
    }

    pub fn package_name(mut self, package_name: impl Into<String>) -> Self {
        self.package_name = package_name.into();
        self
    }

    pub fn nullable_policy(mut self, policy: NullablePolicy) -> Self {
        self.nullable_policy = policy;
        self
    }

    pub fn timestamp(mut self, timestamp: bool) -> Self {
        self.timestamp = timestamp;
        self
    }

    pub fn max_concurrency(mut self, max: NonZeroUsize) -> Self {
        self.max_concurrency = max;
        self
    }
}

fn default_package_name(output_dir: &Path) -> String {
    output_dir
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "models".to_string())
}

fn default_concurrency() -> NonZeroUsize {
    thread::available_parallelism().unwrap_or(NonZeroUsize::MIN)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_package_defaults_to_directory_name() {
        let config = GenerationConfig::new("out/models");
        assert_eq!(config.package_name, "models");
        assert_eq!(config.output_dir, PathBuf::from("out/models"));
    }

    #[test]
    fn test_package_fallback_without_file_name() {
        let config = GenerationConfig::new("/");
        assert_eq!(config.package_name, "models");
    }

    #[test]
    fn test_defaults() {
        let config = GenerationConfig::new("models");
        assert!(config.timestamp);
        assert_eq!(config.nullable_policy, NullablePolicy::Ignore);
        assert!(config.max_concurrency.get() >= 1);
    }

    #[test]
    fn test_overrides() {
        let config = GenerationConfig::new("models")
            .package_name("entity")
            .nullable_policy(NullablePolicy::Optional)
            .timestamp(false)
            .max_concurrency(NonZeroUsize::new(3).unwrap());

        assert_eq!(config.package_name, "entity");
        assert_eq!(config.nullable_policy, NullablePolicy::Optional);
        assert!(!config.timestamp);
        assert_eq!(config.max_concurrency.get(), 3);
    }
}
