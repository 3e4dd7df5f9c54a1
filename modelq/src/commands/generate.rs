use std::{num::NonZeroUsize, path::PathBuf};

use clap::Args;
use eyre::Result;
use modelq_manifest::Manifest;

use super::UnwrapOrExit;
use crate::{
    ops::{self, GenerateOptions},
    reports::{Report, TerminalOutput},
};

#[derive(Args)]
pub struct GenerateCommand {
    /// Path to modelq.toml (defaults to ./modelq.toml)
    #[arg(short, long, default_value = "modelq.toml")]
    pub config: PathBuf,

    /// Output directory (overrides modelq.toml)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Go package name (defaults to the output directory name)
    #[arg(short, long)]
    pub package: Option<String>,

    /// Maximum number of tables generated at the same time
    #[arg(short, long)]
    pub jobs: Option<NonZeroUsize>,

    /// Use gmq.Option* types for nullable columns
    #[arg(long)]
    pub nullable_types: bool,

    /// Omit the generation time from file headers
    #[arg(long)]
    pub no_timestamp: bool,

    /// Preview generated code without writing to disk
    #[arg(long)]
    pub dry_run: bool,
}

impl GenerateCommand {
    /// Run the generate command
    pub async fn run(&self) -> Result<()> {
        let manifest = Manifest::from_file(&self.config).unwrap_or_exit();

        let report = ops::generate(
            &manifest,
            GenerateOptions {
                output_dir: self.output.clone(),
                package: self.package.clone(),
                jobs: self.jobs,
                nullable_types: self.nullable_types,
                timestamp: !self.no_timestamp,
                dry_run: self.dry_run,
            },
        )
        .await?;

        report.render(&mut TerminalOutput::new());
        Ok(())
    }
}
