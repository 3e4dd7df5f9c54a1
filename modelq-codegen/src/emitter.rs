//! Rendering of one table into a self-contained Go source unit.

use std::io::Write;

use chrono::NaiveDateTime;
use modelq_core::{ColumnSchema, NullablePolicy, TypeMap, TypeMapper, to_capital_case};

use crate::{
    builder::CodeBuilder,
    error::{EmitError, Phase},
};

/// Name written into the provenance comment.
pub const GENERATOR_NAME: &str = "ModelQ";

/// Extension of generated source files.
pub const FILE_EXTENSION: &str = "go";

/// Packages imported by every unit, whether or not a field uses them.
pub const IMPORTS: [&str; 3] = ["time", "github.com/mijia/modelq/gmq", "database/sql"];

/// Statements referencing each of [`IMPORTS`] so unused imports still compile.
const IMPORT_REFERENCES: [&str; 3] = ["var _ = time.Now", "var _ sql.DB", "var _ gmq.OptionInt"];

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Everything needed to render the unit of one table.
#[derive(Debug, Clone, Copy)]
pub struct Unit<'a> {
    /// Source database, used only for provenance
    pub database: &'a str,
    pub table: &'a str,
    pub columns: &'a [ColumnSchema],
    /// Go package the unit belongs to
    pub package: &'a str,
}

impl Unit<'_> {
    /// File name of the unit inside the output directory.
    pub fn file_name(&self) -> String {
        format!("{}.{}", self.table, FILE_EXTENSION)
    }
}

/// Renders table schemas into Go model files.
#[derive(Debug, Clone)]
pub struct UnitEmitter<M = TypeMap> {
    mapper: M,
    nullable_policy: NullablePolicy,
    generated_at: Option<String>,
}

impl Default for UnitEmitter {
    fn default() -> Self {
        Self::new(TypeMap::go())
    }
}

impl<M: TypeMapper> UnitEmitter<M> {
    /// Create an emitter with no timestamp and nullability ignored.
    pub fn new(mapper: M) -> Self {
        Self {
            mapper,
            nullable_policy: NullablePolicy::default(),
            generated_at: None,
        }
    }

    pub fn nullable_policy(mut self, policy: NullablePolicy) -> Self {
        self.nullable_policy = policy;
        self
    }

    /// Stamp generated units with the given time, at minute precision.
    pub fn generated_at(mut self, at: NaiveDateTime) -> Self {
        self.generated_at = Some(at.format(TIMESTAMP_FORMAT).to_string());
        self
    }

    /// Provenance comments, package clause and the fixed import block.
    pub fn header(&self, unit: &Unit<'_>) -> String {
        let provenance = match &self.generated_at {
            Some(at) => format!("Code generated by {}, {}", GENERATOR_NAME, at),
            None => format!("Code generated by {}", GENERATOR_NAME),
        };

        let mut b = CodeBuilder::new();
        b.push_comment(&provenance)
            .push_comment(&format!(
                "{} contains model for the database table [{}.{}]",
                unit.file_name(),
                unit.database,
                unit.table
            ))
            .push_blank()
            .push_line(&format!("package {}", unit.package))
            .push_blank()
            .push_block("import (", ")", |b| {
                for import in IMPORTS {
                    b.push_line(&format!("\"{}\"", import));
                }
            })
            .push_blank();
        b.build()
    }

    /// The model struct with one tagged field per column, in column order.
    pub fn model_struct(&self, unit: &Unit<'_>) -> String {
        let header = format!("type {} struct {{", to_capital_case(unit.table));

        let mut b = CodeBuilder::new();
        b.push_block(&header, "}", |b| {
            for column in unit.columns {
                b.push_line(&self.field(column));
            }
        })
        .push_blank();
        b.build()
    }

    /// References to every import.
    pub fn footer(&self) -> String {
        let mut b = CodeBuilder::new();
        b.push_comment("keep the fixed imports referenced even when no field uses them");
        for reference in IMPORT_REFERENCES {
            b.push_line(reference);
        }
        b.build()
    }

    /// Render the complete unit.
    pub fn render(&self, unit: &Unit<'_>) -> String {
        let mut out = self.header(unit);
        out.push_str(&self.model_struct(unit));
        out.push_str(&self.footer());
        out
    }

    /// Write the unit block by block, stopping at the first rejected write.
    ///
    /// The sink is flushed as part of the footer. A failure may leave a
    /// partial unit in the sink.
    pub fn emit<W: Write>(&self, sink: &mut W, unit: &Unit<'_>) -> Result<(), EmitError> {
        sink.write_all(self.header(unit).as_bytes())
            .map_err(|e| EmitError::new(Phase::Header, e))?;
        sink.write_all(self.model_struct(unit).as_bytes())
            .map_err(|e| EmitError::new(Phase::ModelStruct, e))?;
        sink.write_all(self.footer().as_bytes())
            .and_then(|()| sink.flush())
            .map_err(|e| EmitError::new(Phase::Footer, e))
    }

    fn field(&self, column: &ColumnSchema) -> String {
        let name = to_capital_case(&column.column_name);
        let ty = self.mapper.field_type(column, self.nullable_policy);
        let mut line = format!("{} {} `json:\"{}\"`", name, ty, column.column_name);
        if column.has_comment() {
            line.push_str(" // ");
            line.push_str(&column.comment);
        }
        line
    }
}
