//! Table, column and relationship graph built from schema rows
//!
//! This is the first of two passes: every row is folded into its table
//! before anything is rendered, so inverse relationships declared on a later
//! row still reach a table seen earlier.

use indexmap::IndexMap;
use std::collections::HashMap;

use crate::scaffold::TemplateHelpers;
use crate::sheet::SheetRow;

/// Primary key column every table gets from `$table->id()`
pub const PRIMARY_KEY: &str = "id";

/// Column type used when the type cell is blank
pub const FALLBACK_COLUMN_TYPE: &str = "string";

/// One row of the schema sheet, columns A–R
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SchemaRow {
    /// Table name
    pub table: String,
    /// Column name
    pub column: String,
    /// Blueprint column type (`string`, `decimal`, `morphs`, ...)
    pub column_type: String,
    /// Raw scale/precision argument (`8, 2`)
    pub scale: Option<String>,
    /// Default value
    pub default: Option<String>,
    /// Nullable flag
    pub nullable: bool,
    /// Unique flag
    pub unique: bool,
    /// Foreign key column
    pub fk_column: Option<String>,
    /// Foreign key constraint name
    pub fk_name: Option<String>,
    /// Referenced column
    pub references: Option<String>,
    /// Referenced table
    pub on_table: Option<String>,
    /// On-delete action, lower-cased
    pub on_delete: Option<String>,
    /// Record a `hasMany` on the referenced table
    pub inverse_has_many: bool,
    /// Indexed flag
    pub indexed: bool,
    /// Polymorphic flag
    pub polymorphic: bool,
    /// Custom morph index name
    pub morph_index: Option<String>,
    /// Column carries a generated UUID
    pub uuid: bool,
    /// File column flag (carried, unused downstream)
    pub file: bool,
}

impl SchemaRow {
    /// Number of columns in the schema sheet
    pub const WIDTH: usize = 18;

    /// Map a sheet row by column position
    ///
    /// Returns `None` when the table or column cell is blank.
    #[must_use]
    pub fn from_sheet(row: &SheetRow) -> Option<Self> {
        let table = row.cell(0);
        let column = row.cell(1);
        if table.is_empty() || column.is_empty() {
            tracing::debug!(row = row.number, "skipping schema row without table or column");
            return None;
        }

        Some(Self {
            table: table.to_string(),
            column: column.to_string(),
            column_type: row.cell(2).to_string(),
            scale: row.optional(3),
            default: row.optional(4),
            nullable: row.flag(5),
            unique: row.flag(6),
            fk_column: row.optional(7),
            fk_name: row.optional(8),
            references: row.optional(9),
            on_table: row.optional(10),
            on_delete: row.optional(11).map(|value| value.to_lowercase()),
            inverse_has_many: row.flag(12),
            indexed: row.flag(13),
            polymorphic: row.flag(14),
            morph_index: row.optional(15),
            uuid: row.flag(16),
            file: row.flag(17),
        })
    }
}

/// One physical column
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnSpec {
    /// Column name
    pub name: String,
    /// Blueprint column type
    pub column_type: String,
    /// Raw scale/precision argument
    pub scale: Option<String>,
    /// Default value
    pub default: Option<String>,
    /// Nullable flag
    pub nullable: bool,
    /// Unique flag
    pub unique: bool,
    /// Indexed flag
    pub indexed: bool,
    /// Polymorphic flag
    pub polymorphic: bool,
    /// Custom morph index name
    pub morph_index: Option<String>,
}

/// Foreign key constraint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForeignKeySpec {
    /// Local column
    pub column: String,
    /// Constraint name
    pub constraint_name: Option<String>,
    /// Referenced column
    pub references: String,
    /// Referenced table
    pub on_table: String,
    /// On-delete action
    pub on_delete: Option<String>,
}

/// Relationship direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelationshipKind {
    /// Owning side of a foreign key
    BelongsTo,
    /// Inverse side of a foreign key
    HasMany,
    /// Polymorphic owner
    MorphTo,
}

impl RelationshipKind {
    /// Eloquent method that builds the relationship
    #[must_use]
    pub const fn eloquent_method(self) -> &'static str {
        match self {
            Self::BelongsTo => "belongsTo",
            Self::HasMany => "hasMany",
            Self::MorphTo => "morphTo",
        }
    }
}

/// Derived relationship, owned by the table whose model declares it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelationshipSpec {
    /// Direction
    pub kind: RelationshipKind,
    /// Related table (the morph name for `morphTo`)
    pub related_table: String,
    /// Linking column
    pub column: String,
}

impl RelationshipSpec {
    /// Model method name
    ///
    /// `hasMany` methods are plural, everything else singular.
    #[must_use]
    pub fn method_name(&self) -> String {
        match self.kind {
            RelationshipKind::BelongsTo => TemplateHelpers::to_singular_method(&self.related_table),
            RelationshipKind::HasMany => TemplateHelpers::to_plural_method(&self.related_table),
            RelationshipKind::MorphTo => TemplateHelpers::to_singular_method(&self.column),
        }
    }

    /// Method name qualified by the linking column
    ///
    /// Used when two relationships on one model would share a name:
    /// `author_id` on `users` gives `author`, its inverse gives `authorPosts`.
    #[must_use]
    pub fn qualified_method_name(&self) -> String {
        let stem = self.column.strip_suffix("_id").unwrap_or(&self.column);
        match self.kind {
            RelationshipKind::BelongsTo | RelationshipKind::MorphTo => {
                TemplateHelpers::to_camel_case(stem)
            }
            RelationshipKind::HasMany => TemplateHelpers::to_camel_case(&format!(
                "{stem}_{}",
                TemplateHelpers::pluralize(&self.related_table)
            )),
        }
    }

    /// Method body expression, e.g. `belongsTo(User::class, 'user_id')`
    #[must_use]
    pub fn call(&self) -> String {
        let method = self.kind.eloquent_method();
        match self.kind {
            RelationshipKind::MorphTo => format!("{method}()"),
            RelationshipKind::BelongsTo | RelationshipKind::HasMany => format!(
                "{method}({}::class, '{}')",
                TemplateHelpers::to_model_name(&self.related_table),
                self.column
            ),
        }
    }
}

/// Method names for relationships declared on the same model
///
/// Names shared by more than one relationship fall back to
/// [`RelationshipSpec::qualified_method_name`].
#[must_use]
pub fn unique_method_names(relations: &[&RelationshipSpec]) -> Vec<String> {
    let plain: Vec<String> = relations.iter().map(|r| r.method_name()).collect();
    relations
        .iter()
        .zip(&plain)
        .map(|(relation, name)| {
            if plain.iter().filter(|other| *other == name).count() > 1 {
                relation.qualified_method_name()
            } else {
                name.clone()
            }
        })
        .collect()
}

/// Everything known about one table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableSpec {
    /// Table name
    pub name: String,
    /// Columns in row order
    pub columns: Vec<ColumnSpec>,
    /// Foreign keys in row order
    pub foreign_keys: Vec<ForeignKeySpec>,
    /// Polymorphic column names
    pub polymorphic: Vec<String>,
    /// Mass-assignable columns
    pub fillable: Vec<String>,
    /// Indexed column names
    pub indexes: Vec<String>,
    /// Relationships declared on this table's model
    pub relationships: Vec<RelationshipSpec>,
    /// Column that receives a generated UUID on create
    pub uuid_column: Option<String>,
}

impl TableSpec {
    /// Empty table
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            columns: Vec::new(),
            foreign_keys: Vec::new(),
            polymorphic: Vec::new(),
            fillable: Vec::new(),
            indexes: Vec::new(),
            relationships: Vec::new(),
            uuid_column: None,
        }
    }

    /// Model class name
    #[must_use]
    pub fn model_name(&self) -> String {
        TemplateHelpers::to_model_name(&self.name)
    }

    /// Look up a column
    #[must_use]
    pub fn column(&self, name: &str) -> Option<&ColumnSpec> {
        self.columns.iter().find(|c| c.name == name)
    }
}

/// Result of the ingestion pass
#[derive(Debug, Clone, Default)]
pub struct SchemaGraph {
    tables: IndexMap<String, TableSpec>,
    inverse: HashMap<String, Vec<RelationshipSpec>>,
    warnings: Vec<String>,
}

impl SchemaGraph {
    /// Build the graph from rows in file order
    pub fn from_rows(rows: impl IntoIterator<Item = SchemaRow>) -> Self {
        let mut graph = Self::default();
        for row in rows {
            graph.add_row(row);
        }
        graph
    }

    /// Fold one row into its table
    pub fn add_row(&mut self, row: SchemaRow) {
        let table = self
            .tables
            .entry(row.table.clone())
            .or_insert_with(|| TableSpec::new(row.table.clone()));

        if table.column(&row.column).is_some() {
            let message = format!(
                "duplicate column '{}' in table '{}' ignored",
                row.column, row.table
            );
            self.warnings.push(message);
            return;
        }

        let column_type = if row.column_type.is_empty() {
            let message = format!(
                "column '{}.{}' has no type, using '{FALLBACK_COLUMN_TYPE}'",
                row.table, row.column
            );
            self.warnings.push(message);
            FALLBACK_COLUMN_TYPE.to_string()
        } else {
            row.column_type.clone()
        };

        table.columns.push(ColumnSpec {
            name: row.column.clone(),
            column_type,
            scale: row.scale.clone(),
            default: row.default.clone(),
            nullable: row.nullable,
            unique: row.unique,
            indexed: row.indexed,
            polymorphic: row.polymorphic,
            morph_index: row.morph_index.clone(),
        });

        if let (Some(fk_column), Some(references), Some(on_table)) =
            (&row.fk_column, &row.references, &row.on_table)
        {
            table.foreign_keys.push(ForeignKeySpec {
                column: fk_column.clone(),
                constraint_name: row.fk_name.clone(),
                references: references.clone(),
                on_table: on_table.clone(),
                on_delete: row.on_delete.clone(),
            });
            table.relationships.push(RelationshipSpec {
                kind: RelationshipKind::BelongsTo,
                related_table: on_table.clone(),
                column: fk_column.clone(),
            });

            if row.inverse_has_many {
                self.inverse
                    .entry(on_table.clone())
                    .or_default()
                    .push(RelationshipSpec {
                        kind: RelationshipKind::HasMany,
                        related_table: row.table.clone(),
                        column: fk_column.clone(),
                    });
            }
        }

        if row.polymorphic {
            table.polymorphic.push(row.column.clone());
            table.relationships.push(RelationshipSpec {
                kind: RelationshipKind::MorphTo,
                related_table: row.column.clone(),
                column: row.column.clone(),
            });
        }

        if row.column != PRIMARY_KEY && !row.polymorphic {
            table.fillable.push(row.column.clone());
        }

        if row.indexed {
            table.indexes.push(row.column.clone());
        }

        // First affirmative row wins
        if row.uuid && table.uuid_column.is_none() {
            table.uuid_column = Some(row.column);
        }
    }

    /// Tables in first-seen order
    pub fn tables(&self) -> impl Iterator<Item = &TableSpec> {
        self.tables.values()
    }

    /// Look up a table
    #[must_use]
    pub fn table(&self, name: &str) -> Option<&TableSpec> {
        self.tables.get(name)
    }

    /// Number of tables
    #[must_use]
    pub fn len(&self) -> usize {
        self.tables.len()
    }

    /// Whether no table was defined
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    /// Inverse relationships recorded against `table`
    #[must_use]
    pub fn inverse_for(&self, table: &str) -> &[RelationshipSpec] {
        self.inverse.get(table).map_or(&[], Vec::as_slice)
    }

    /// Inverse relationships whose target table has no rows of its own
    pub fn orphaned_inverse(&self) -> impl Iterator<Item = (&str, &RelationshipSpec)> {
        self.inverse
            .iter()
            .filter(|(target, _)| !self.tables.contains_key(*target))
            .flat_map(|(target, relations)| relations.iter().map(move |r| (target.as_str(), r)))
    }

    /// Model class names in table order
    #[must_use]
    pub fn model_names(&self) -> Vec<String> {
        self.tables().map(TableSpec::model_name).collect()
    }

    /// Problems found while folding rows
    #[must_use]
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }
}
