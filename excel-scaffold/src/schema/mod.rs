//! Schema compiler
//!
//! Column-definition rows become a [`SchemaGraph`] of tables, columns and
//! relationships, which [`SchemaCompiler`] renders into one migration and one
//! model per table.

pub mod clock;
pub mod compiler;
pub mod graph;

pub use clock::MigrationClock;
pub use compiler::SchemaCompiler;
pub use graph::{
    unique_method_names, ColumnSpec, ForeignKeySpec, RelationshipKind, RelationshipSpec,
    SchemaGraph, SchemaRow, TableSpec,
};
