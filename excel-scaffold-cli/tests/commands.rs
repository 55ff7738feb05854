//! Integration tests for the CLI commands

use excel_scaffold::config::ScaffoldConfig;
use excel_scaffold::sheet::DIRECTIVE_HEADERS;
use excel_scaffold::ActionKind;
use excel_scaffold_cli_lib::{ControllerCommand, MigrationCommand};
use rust_xlsxwriter::Workbook;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn write_sheet(path: &Path, rows: &[&[&str]]) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    for (row, cells) in (0u32..).zip(rows) {
        for (col, cell) in (0u16..).zip(cells.iter()) {
            if !cell.is_empty() {
                worksheet.write_string(row, col, *cell).unwrap();
            }
        }
    }
    workbook.save(path).unwrap();
}

fn config(root: &Path) -> ScaffoldConfig {
    let mut config = ScaffoldConfig::for_root(root);
    config.generation.timestamp_base = Some("2024_03_01_090000".to_string());
    config
}

#[test]
fn test_migration_then_controller_commands() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    let config = config(root);

    write_sheet(
        &config.schema_sheet(),
        &[
            &["Table", "Column", "Type"],
            &["employees", "id", "id"],
            &["employees", "name", "string"],
        ],
    );

    let report = MigrationCommand::new(None).execute(&config).unwrap();
    assert_eq!(report.count(ActionKind::Created), 3);
    assert!(root
        .join("database/migrations/2024_03_01_090000_create_employees_table.php")
        .exists());
    assert!(root.join("app/Models/Employee.php").exists());

    // Fill in the generated directive sheet the way a user would
    write_sheet(
        &config.directive_sheet(),
        &[&DIRECTIVE_HEADERS[..], &["Employee", "Y", "Y", "", "", "Y"][..]],
    );

    let report = ControllerCommand::new(None).execute(&config).unwrap();
    assert!(!report.has_warnings());
    let routes = fs::read_to_string(root.join("routes/api.php")).unwrap();
    assert!(routes.contains(
        "Route::apiResource('employees', EmployeeController::class)->names('employees');"
    ));
}

#[test]
fn test_explicit_path_is_used_as_given() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    let config = config(root);
    let sheet = root.join("custom/schema.xlsx");
    write_sheet(&sheet, &[&["Table", "Column", "Type"], &["tags", "label", "string"]]);

    MigrationCommand::new(Some(sheet)).execute(&config).unwrap();

    assert!(root.join("app/Models/Tag.php").exists());
    assert!(config.directive_sheet().exists());
}

#[test]
fn test_missing_input_fails() {
    let temp_dir = TempDir::new().unwrap();
    let config = config(temp_dir.path());

    let error = MigrationCommand::new(None).execute(&config).unwrap_err();
    assert!(format!("{error:#}").contains("File not found"));

    let error = ControllerCommand::new(Some(temp_dir.path().join("nope.xlsx")))
        .execute(&config)
        .unwrap_err();
    assert!(format!("{error:#}").contains("nope.xlsx"));
}
