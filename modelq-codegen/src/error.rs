use std::{error::Error as _, fmt, io, path::PathBuf};

use miette::Diagnostic;
use thiserror::Error;

/// Block of a generated unit being written when a failure happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Header,
    ModelStruct,
    Footer,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Header => "header",
            Phase::ModelStruct => "model struct",
            Phase::Footer => "footer",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A sink rejected one block of a unit.
#[derive(Debug, Error)]
#[error("failed to write the {phase}")]
pub struct EmitError {
    pub phase: Phase,
    #[source]
    pub source: io::Error,
}

impl EmitError {
    pub fn new(phase: Phase, source: io::Error) -> Self {
        Self { phase, source }
    }

    /// Attach the table being generated.
    pub fn for_table(self, table: impl Into<String>) -> GenerateError {
        GenerateError::EmissionFailed {
            table: table.into(),
            phase: self.phase,
            source: self.source,
        }
    }
}

/// Failure of a single table's generation task.
///
/// Failures are table-local: one table failing never affects the others.
#[derive(Debug, Error, Diagnostic)]
pub enum GenerateError {
    #[error("[{table}] cannot create destination '{path}'")]
    #[diagnostic(
        code(modelq::destination_unavailable),
        help("check that the output directory is writable")
    )]
    DestinationUnavailable {
        table: String,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("[{table}] failed to write the {phase} into file")]
    #[diagnostic(code(modelq::emission_failed))]
    EmissionFailed {
        table: String,
        phase: Phase,
        #[source]
        source: io::Error,
    },

    #[error("[{table}] generation task ended without reporting a result")]
    #[diagnostic(code(modelq::task_aborted))]
    TaskAborted { table: String },
}

impl GenerateError {
    /// Name of the table whose generation failed.
    pub fn table(&self) -> &str {
        match self {
            GenerateError::DestinationUnavailable { table, .. }
            | GenerateError::EmissionFailed { table, .. }
            | GenerateError::TaskAborted { table } => table,
        }
    }

    /// The error message followed by the messages of its sources.
    pub fn full_message(&self) -> String {
        let mut message = self.to_string();
        let mut source = self.source();
        while let Some(cause) = source {
            message.push_str(": ");
            message.push_str(&cause.to_string());
            source = cause.source();
        }
        message
    }
}

/// Failure preparing a run, before any table is attempted.
#[derive(Debug, Error, Diagnostic)]
pub enum SetupError {
    #[error("failed to create output directory '{path}'")]
    #[diagnostic(code(modelq::output_directory))]
    OutputDirectory {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phase_names() {
        assert_eq!(Phase::Header.to_string(), "header");
        assert_eq!(Phase::ModelStruct.to_string(), "model struct");
        assert_eq!(Phase::Footer.to_string(), "footer");
    }

    #[test]
    fn test_emit_error_for_table() {
        let err = EmitError::new(Phase::ModelStruct, io::Error::other("disk full"))
            .for_table("orders");

        assert_eq!(err.table(), "orders");
        assert_eq!(
            err.to_string(),
            "[orders] failed to write the model struct into file"
        );
        assert!(matches!(
            err,
            GenerateError::EmissionFailed {
                phase: Phase::ModelStruct,
                ..
            }
        ));
    }

    #[test]
    fn test_destination_unavailable_message() {
        let err = GenerateError::DestinationUnavailable {
            table: "users".to_string(),
            path: PathBuf::from("models/users.go"),
            source: io::Error::from(io::ErrorKind::PermissionDenied),
        };

        assert_eq!(err.table(), "users");
        assert_eq!(
            err.to_string(),
            "[users] cannot create destination 'models/users.go'"
        );
    }

    #[test]
    fn test_full_message_includes_source() {
        let err = GenerateError::DestinationUnavailable {
            table: "users".to_string(),
            path: PathBuf::from("models/users.go"),
            source: io::Error::other("permission denied"),
        };
        assert_eq!(
            err.full_message(),
            "[users] cannot create destination 'models/users.go': permission denied"
        );
    }
}
