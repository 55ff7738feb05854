//! Spreadsheet fixtures shared by the integration tests

#![allow(dead_code)]

use rust_xlsxwriter::Workbook;
use std::path::Path;

pub const SCHEMA_HEADERS: [&str; 18] = [
    "Table",
    "Column",
    "Type",
    "Scale",
    "Default",
    "Nullable",
    "Unique",
    "FK Column",
    "FK Name",
    "References",
    "On Table",
    "On Delete",
    "Inverse HasMany",
    "Index",
    "Polymorphic",
    "Morph Index",
    "UUID",
    "File",
];

/// Write a single-sheet workbook: `headers` on row 1, `rows` from row 2
pub fn write_sheet(path: &Path, headers: &[&str], rows: &[Vec<&str>]) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }

    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    for (col, header) in (0u16..).zip(headers) {
        worksheet.write_string(0, col, *header).unwrap();
    }
    for (row, cells) in (1u32..).zip(rows) {
        for (col, cell) in (0u16..).zip(cells) {
            if !cell.is_empty() {
                worksheet.write_string(row, col, *cell).unwrap();
            }
        }
    }
    workbook.save(path).unwrap();
}

/// Schema row with only table, column and type filled
pub fn column<'a>(table: &'a str, column: &'a str, column_type: &'a str) -> Vec<&'a str> {
    let mut row = vec![""; SCHEMA_HEADERS.len()];
    row[0] = table;
    row[1] = column;
    row[2] = column_type;
    row
}

/// Schema row with `value` set at `index`
pub fn with<'a>(mut row: Vec<&'a str>, index: usize, value: &'a str) -> Vec<&'a str> {
    row[index] = value;
    row
}

/// Blog schema: users, posts (belongs to users, inverse hasMany), comments
/// (polymorphic)
pub fn blog_rows() -> Vec<Vec<&'static str>> {
    vec![
        column("users", "id", "id"),
        with(column("users", "email", "string"), 6, "yes"),
        with(column("users", "uuid", "uuid"), 16, "Y"),
        column("posts", "id", "id"),
        column("posts", "title", "string"),
        with(
            with(
                with(
                    with(with(column("posts", "user_id", "unsignedBigInteger"), 7, "user_id"), 9, "id"),
                    10,
                    "users",
                ),
                11,
                "CASCADE",
            ),
            12,
            "yes",
        ),
        column("comments", "id", "id"),
        column("comments", "body", "text"),
        with(column("comments", "commentable", "morphs"), 14, "y"),
    ]
}
