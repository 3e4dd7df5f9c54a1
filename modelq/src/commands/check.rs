use std::path::PathBuf;

use clap::Args;
use eyre::Result;
use modelq_manifest::Manifest;

use super::UnwrapOrExit;
use crate::{
    ops,
    reports::{Report, TerminalOutput},
};

#[derive(Args)]
pub struct CheckCommand {
    /// Path to modelq.toml (defaults to ./modelq.toml)
    #[arg(short, long, default_value = "modelq.toml")]
    pub config: PathBuf,
}

impl CheckCommand {
    /// Run the check command
    pub fn run(&self) -> Result<()> {
        let manifest = Manifest::from_file(&self.config).unwrap_or_exit();
        let report = ops::check(&manifest, &self.config);
        report.render(&mut TerminalOutput::new());
        Ok(())
    }
}
