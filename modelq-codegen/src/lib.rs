//! Go model generation for ModelQ.
//!
//! Turns a [`Schema`](modelq_core::Schema) into one Go source file per
//! table, each declaring a struct whose fields mirror the table's columns.
//!
//! # Module Organization
//!
//! - [`builder`] - Tab-indenting Go source builder
//! - [`emitter`] - Rendering of one table into a source unit
//! - [`scheduler`] - Concurrent per-table generation and outcome reporting
//! - [`config`] - Per-run configuration

// Miette's derive macro generates code that triggers these warnings
#![allow(unused_assignments)]

pub mod builder;
pub mod config;
pub mod emitter;
mod error;
pub mod scheduler;

pub use config::GenerationConfig;
pub use emitter::{FILE_EXTENSION, GENERATOR_NAME, Unit, UnitEmitter};
pub use error::{EmitError, GenerateError, Phase, SetupError};
pub use scheduler::{GenerationOutcome, GenerationReport, Generator, PreviewFile, generate_all};
