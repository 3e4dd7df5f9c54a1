//! Parsing of `modelq.toml`, the description of a database schema and of
//! how to generate Go models from it.

// Miette's derive macro generates code that triggers these warnings
#![allow(unused_assignments)]

mod error;
mod manifest;

pub use error::{Error, Result};
pub use manifest::{Manifest, OutputConfig, TypeOverride};
