//! Schema compiler orchestrator
//!
//! Renders one migration and one model per table of a [`SchemaGraph`], writes
//! them under the project root, then seeds the controller-directive sheet.

use std::path::Path;

use super::clock::MigrationClock;
use super::graph::{
    unique_method_names, ColumnSpec, ForeignKeySpec, RelationshipKind, RelationshipSpec,
    SchemaGraph, SchemaRow, TableSpec, PRIMARY_KEY,
};
use crate::config::ScaffoldConfig;
use crate::error::Result;
use crate::output::GeneratedFile;
use crate::report::{ActionKind, RunReport};
use crate::scaffold::{TemplateKind, TemplateRegistry};
use crate::sheet;

/// Compiles schema rows into migrations and models
pub struct SchemaCompiler<'a> {
    config: &'a ScaffoldConfig,
    templates: TemplateRegistry,
}

impl<'a> SchemaCompiler<'a> {
    /// Create a compiler for the configured project
    ///
    /// # Errors
    ///
    /// Returns an error if the built-in templates fail to compile.
    pub fn new(config: &'a ScaffoldConfig) -> Result<Self> {
        Ok(Self {
            config,
            templates: TemplateRegistry::new()?,
        })
    }

    /// Read a schema sheet into a graph
    ///
    /// # Errors
    ///
    /// Returns an error if the sheet is missing or unreadable.
    pub fn load(&self, input: &Path) -> Result<SchemaGraph> {
        let rows = sheet::read_rows(input, SchemaRow::WIDTH)?;
        let graph = SchemaGraph::from_rows(rows.iter().filter_map(SchemaRow::from_sheet));
        tracing::debug!(tables = graph.len(), "schema graph built");
        Ok(graph)
    }

    /// Run the whole pipeline for `input`
    ///
    /// # Errors
    ///
    /// Returns an error if the input cannot be read, the timestamp base is
    /// invalid, or any file cannot be written. Files written before the
    /// failure stay on disk.
    pub fn run(&self, input: &Path) -> Result<RunReport> {
        let graph = self.load(input)?;
        let mut report = RunReport::new();
        let source = input.display().to_string();

        for warning in graph.warnings() {
            report.record(ActionKind::Warning, &source, warning);
        }
        for (target, relation) in graph.orphaned_inverse() {
            report.record(
                ActionKind::Warning,
                &relation.related_table,
                format!(
                    "hasMany on '{target}' dropped: table '{target}' is not defined in the sheet"
                ),
            );
        }

        let mut clock = MigrationClock::for_directory(
            &self.config.resolve(&self.config.paths.migrations_dir),
            self.config.generation.timestamp_base.as_deref(),
        )?;

        for file in self.plan(&graph, &mut clock)? {
            self.emit(&file, &mut report)?;
        }

        let directive_sheet = self.config.directive_sheet();
        let existed = directive_sheet.exists();
        sheet::write_directive_sheet(&directive_sheet, &graph.model_names())?;
        report.record(
            if existed {
                ActionKind::Overwritten
            } else {
                ActionKind::Created
            },
            directive_sheet.display().to_string(),
            format!("controller directives for {} model(s)", graph.len()),
        );

        Ok(report)
    }

    /// Render every artifact of `graph` without touching the disk
    ///
    /// # Errors
    ///
    /// Returns an error if a template fails to render.
    pub fn plan(&self, graph: &SchemaGraph, clock: &mut MigrationClock) -> Result<Vec<GeneratedFile>> {
        let mut files = Vec::with_capacity(graph.len() * 2);
        for table in graph.tables() {
            files.push(self.render_migration(table, &clock.tick())?);
            files.push(self.render_model(table, graph.inverse_for(&table.name))?);
        }
        Ok(files)
    }

    /// Render the create-table migration for `table`
    ///
    /// # Errors
    ///
    /// Returns an error if the template fails to render.
    pub fn render_migration(&self, table: &TableSpec, timestamp: &str) -> Result<GeneratedFile> {
        let mut lines: Vec<String> = table
            .columns
            .iter()
            .filter(|column| column.name != PRIMARY_KEY)
            .map(column_line)
            .collect();
        lines.extend(table.foreign_keys.iter().map(foreign_key_line));
        lines.extend(
            table
                .indexes
                .iter()
                .map(|column| format!("$table->index('{column}')")),
        );

        let content = self.templates.render(
            TemplateKind::Migration,
            &serde_json::json!({
                "table_name": table.name,
                "lines": lines,
            }),
        )?;

        Ok(GeneratedFile {
            path: self
                .config
                .paths
                .migrations_dir
                .join(format!("{timestamp}_create_{}_table.php", table.name)),
            content,
            description: format!("Migration for {} table", table.name),
        })
    }

    /// Render the Eloquent model for `table`
    ///
    /// `inverse` holds the `hasMany` relationships other tables declared
    /// against this one.
    ///
    /// # Errors
    ///
    /// Returns an error if the template fails to render.
    pub fn render_model(
        &self,
        table: &TableSpec,
        inverse: &[RelationshipSpec],
    ) -> Result<GeneratedFile> {
        let model_name = table.model_name();
        let fillable = table
            .fillable
            .iter()
            .map(|column| format!("'{column}'"))
            .collect::<Vec<_>>()
            .join(", ");

        let declared = |kind: RelationshipKind| {
            table
                .relationships
                .iter()
                .filter(move |relation| relation.kind == kind)
        };
        let ordered: Vec<&RelationshipSpec> = declared(RelationshipKind::BelongsTo)
            .chain(declared(RelationshipKind::MorphTo))
            .chain(inverse.iter())
            .collect();
        let relationships: Vec<_> = ordered
            .iter()
            .zip(unique_method_names(&ordered))
            .map(|(relation, method)| {
                serde_json::json!({
                    "method": method,
                    "call": relation.call(),
                })
            })
            .collect();

        let content = self.templates.render(
            TemplateKind::Model,
            &serde_json::json!({
                "namespace": self.config.namespaces.models,
                "model_name": model_name,
                "fillable": fillable,
                "relationships": relationships,
                "uuid_column": table.uuid_column,
            }),
        )?;

        Ok(GeneratedFile {
            path: self.config.paths.models_dir.join(format!("{model_name}.php")),
            content,
            description: format!("Eloquent model {model_name}"),
        })
    }

    fn emit(&self, file: &GeneratedFile, report: &mut RunReport) -> Result<()> {
        let existed = self.config.resolve(&file.path).exists();
        let written = file.write_under(&self.config.project_root)?;
        tracing::debug!(path = %written.display(), "artifact written");
        report.record(
            if existed {
                ActionKind::Overwritten
            } else {
                ActionKind::Created
            },
            file.path.display().to_string(),
            &file.description,
        );
        Ok(())
    }
}

/// Blueprint statement for one column, without the trailing semicolon
fn column_line(column: &ColumnSpec) -> String {
    let mut line = format!("$table->{}('{}'", column.column_type, column.name);
    if let Some(scale) = &column.scale {
        line.push_str(&format!(", {scale}"));
    } else if let Some(index) = &column.morph_index {
        line.push_str(&format!(", '{index}'"));
    }
    line.push(')');

    if column.nullable {
        line.push_str("->nullable()");
    }
    if let Some(default) = &column.default {
        line.push_str(&format!("->default('{}')", php_quote(default)));
    }
    if column.unique {
        line.push_str("->unique()");
    }
    line
}

fn foreign_key_line(fk: &ForeignKeySpec) -> String {
    let mut line = format!("$table->foreign('{}'", fk.column);
    if let Some(name) = &fk.constraint_name {
        line.push_str(&format!(", '{name}'"));
    }
    line.push_str(&format!(
        ")->references('{}')->on('{}')",
        fk.references, fk.on_table
    ));
    if let Some(action) = &fk.on_delete {
        line.push_str(&format!("->onDelete('{action}')"));
    }
    line
}

/// Escape a value for a single-quoted PHP string
fn php_quote(value: &str) -> String {
    value.replace('\\', "\\\\").replace('\'', "\\'")
}
