//! Concurrent per-table generation.
//!
//! Every table is generated by its own task. At most
//! [`GenerationConfig::max_concurrency`] tasks run at once, each one writing a
//! single file, and every task reports exactly one [`GenerationOutcome`].
//! Failures stay local to their table; a run never aborts early.

use std::{collections::HashSet, fs::File, io::BufWriter, path::PathBuf, sync::Arc};

use chrono::Local;
use modelq_core::{ColumnSchema, Schema, TableSchema, TypeMap, TypeMapper};
use tokio::sync::{Semaphore, mpsc};
use tracing::{debug, error, info};

use crate::{
    config::GenerationConfig,
    emitter::{Unit, UnitEmitter},
    error::{GenerateError, SetupError},
};

/// Result of generating one table.
#[derive(Debug)]
pub struct GenerationOutcome {
    pub table_name: String,
    /// Destination file on success
    pub result: Result<PathBuf, GenerateError>,
}

impl GenerationOutcome {
    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }

    pub fn error(&self) -> Option<&GenerateError> {
        self.result.as_ref().err()
    }
}

/// Outcomes of a run, one per table, in completion order.
#[derive(Debug, Default)]
pub struct GenerationReport {
    pub outcomes: Vec<GenerationOutcome>,
}

impl GenerationReport {
    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    pub fn succeeded(&self) -> impl Iterator<Item = &GenerationOutcome> {
        self.outcomes.iter().filter(|o| o.is_success())
    }

    pub fn failed(&self) -> impl Iterator<Item = &GenerationOutcome> {
        self.outcomes.iter().filter(|o| !o.is_success())
    }

    /// Outcome for the given table, if it was part of the run.
    pub fn outcome(&self, table: &str) -> Option<&GenerationOutcome> {
        self.outcomes.iter().find(|o| o.table_name == table)
    }
}

/// A generated file for preview
#[derive(Debug)]
pub struct PreviewFile {
    /// Destination path the file would be written to
    pub path: String,
    pub content: String,
}

/// Generates Go model files for all tables of a schema.
pub struct Generator<M = TypeMap> {
    emitter: Arc<UnitEmitter<M>>,
    config: GenerationConfig,
}

impl Generator {
    /// Create a generator using the standard Go type mapping.
    pub fn new(config: GenerationConfig) -> Self {
        Self::with_type_map(config, TypeMap::go())
    }
}

impl<M> Generator<M>
where
    M: TypeMapper + Send + Sync + 'static,
{
    /// Create a generator with a custom type mapping.
    pub fn with_type_map(config: GenerationConfig, mapper: M) -> Self {
        let mut emitter = UnitEmitter::new(mapper).nullable_policy(config.nullable_policy);
        if config.timestamp {
            emitter = emitter.generated_at(Local::now().naive_local());
        }
        Self {
            emitter: Arc::new(emitter),
            config,
        }
    }

    pub fn config(&self) -> &GenerationConfig {
        &self.config
    }

    /// Render every table without touching the file system.
    pub fn preview(&self, database: &str, schema: &Schema) -> Vec<PreviewFile> {
        schema
            .iter()
            .map(|(table, columns)| {
                let unit = self.unit(database, table, columns);
                PreviewFile {
                    path: self
                        .config
                        .output_dir
                        .join(unit.file_name())
                        .display()
                        .to_string(),
                    content: self.emitter.render(&unit),
                }
            })
            .collect()
    }

    /// Generate one file per table into the output directory.
    ///
    /// Only a failure to create the output directory is returned as an
    /// error. Per-table failures are logged and reported in the returned
    /// [`GenerationReport`], which always holds one outcome per table.
    pub async fn generate_all(
        &self,
        database: &str,
        schema: &Schema,
    ) -> Result<GenerationReport, SetupError> {
        let dir = &self.config.output_dir;
        tokio::fs::create_dir_all(dir)
            .await
            .map_err(|source| SetupError::OutputDirectory {
                path: dir.clone(),
                source,
            })?;

        let limit = self.config.max_concurrency.get();
        let semaphore = Arc::new(Semaphore::new(limit));
        let (tx, mut rx) = mpsc::channel::<GenerationOutcome>(limit);

        debug!(
            tables = schema.len(),
            max_concurrency = limit,
            "dispatching generation tasks"
        );

        let dispatch = async move {
            for (table, columns) in schema {
                let Ok(permit) = Arc::clone(&semaphore).acquire_owned().await else {
                    break;
                };
                let task = TableTask {
                    database: database.to_string(),
                    table: table.clone(),
                    columns: columns.clone(),
                    dir: dir.clone(),
                    package: self.config.package_name.clone(),
                };
                let emitter = Arc::clone(&self.emitter);
                let tx = tx.clone();
                tokio::task::spawn_blocking(move || {
                    let result = task.run(&*emitter);
                    let outcome = GenerationOutcome {
                        table_name: task.table,
                        result,
                    };
                    if tx.blocking_send(outcome).is_err() {
                        debug!("outcome receiver dropped before the task finished");
                    }
                    drop(permit);
                });
            }
        };

        let collect = async {
            let mut outcomes = Vec::with_capacity(schema.len());
            while let Some(outcome) = rx.recv().await {
                log_outcome(&outcome);
                outcomes.push(outcome);
            }
            outcomes
        };

        let ((), mut outcomes) = tokio::join!(dispatch, collect);

        let reported: HashSet<&str> = outcomes.iter().map(|o| o.table_name.as_str()).collect();
        let aborted: Vec<GenerationOutcome> = schema
            .keys()
            .filter(|table| !reported.contains(table.as_str()))
            .map(|table| GenerationOutcome {
                table_name: table.clone(),
                result: Err(GenerateError::TaskAborted {
                    table: table.clone(),
                }),
            })
            .collect();
        for outcome in &aborted {
            log_outcome(outcome);
        }
        outcomes.extend(aborted);

        Ok(GenerationReport { outcomes })
    }

    fn unit<'a>(
        &'a self,
        database: &'a str,
        table: &'a str,
        columns: &'a [ColumnSchema],
    ) -> Unit<'a> {
        Unit {
            database,
            table,
            columns,
            package: &self.config.package_name,
        }
    }
}

/// Generate all tables of `schema` into `config.output_dir` using the
/// standard Go type mapping.
pub async fn generate_all(
    database: &str,
    schema: &Schema,
    config: GenerationConfig,
) -> Result<GenerationReport, SetupError> {
    Generator::new(config).generate_all(database, schema).await
}

/// Owned inputs of one table's generation, moved onto a blocking thread.
struct TableTask {
    database: String,
    table: String,
    columns: TableSchema,
    dir: PathBuf,
    package: String,
}

impl TableTask {
    fn run<M: TypeMapper>(&self, emitter: &UnitEmitter<M>) -> Result<PathBuf, GenerateError> {
        let unit = Unit {
            database: &self.database,
            table: &self.table,
            columns: &self.columns,
            package: &self.package,
        };
        let path = self.dir.join(unit.file_name());

        let file = File::create(&path).map_err(|source| GenerateError::DestinationUnavailable {
            table: self.table.clone(),
            path: path.clone(),
            source,
        })?;
        let mut writer = BufWriter::new(file);
        emitter
            .emit(&mut writer, &unit)
            .map_err(|e| e.for_table(&self.table))?;

        Ok(path)
    }
}

fn log_outcome(outcome: &GenerationOutcome) {
    match &outcome.result {
        Ok(path) => info!(
            table = %outcome.table_name,
            "Code generated for table {}, into {}",
            outcome.table_name,
            path.display()
        ),
        Err(err) => error!(
            table = %outcome.table_name,
            "Error when generating code for {}: {}",
            outcome.table_name,
            err.full_message()
        ),
    }
}
