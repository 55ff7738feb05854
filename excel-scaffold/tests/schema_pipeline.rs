//! Integration tests for the schema compiler

mod common;

use common::{blog_rows, column, with, write_sheet, SCHEMA_HEADERS};
use excel_scaffold::config::ScaffoldConfig;
use excel_scaffold::schema::SchemaCompiler;
use excel_scaffold::sheet::{read_rows, DIRECTIVE_HEADERS};
use excel_scaffold::{ActionKind, ScaffoldError};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn config(root: &Path) -> ScaffoldConfig {
    let mut config = ScaffoldConfig::for_root(root);
    config.generation.timestamp_base = Some("2024_01_15_103000".to_string());
    config
}

fn migrations(root: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(root.join("database/migrations"))
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

#[test]
fn test_blog_schema_generates_migrations_and_models() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    let config = config(root);
    write_sheet(&config.schema_sheet(), &SCHEMA_HEADERS, &blog_rows());

    let compiler = SchemaCompiler::new(&config).unwrap();
    let report = compiler.run(&config.schema_sheet()).unwrap();

    assert_eq!(
        migrations(root),
        vec![
            "2024_01_15_103000_create_users_table.php",
            "2024_01_15_103001_create_posts_table.php",
            "2024_01_15_103002_create_comments_table.php",
        ]
    );
    assert!(!report.has_warnings());

    let posts_migration = fs::read_to_string(
        root.join("database/migrations/2024_01_15_103001_create_posts_table.php"),
    )
    .unwrap();
    assert!(posts_migration.contains(
        "$table->foreign('user_id')->references('id')->on('users')->onDelete('cascade');"
    ));

    let user = fs::read_to_string(root.join("app/Models/User.php")).unwrap();
    assert!(user.contains("protected $fillable = ['email', 'uuid'];"));
    assert!(user.contains("return $this->hasMany(Post::class, 'user_id');"));
    assert!(user.contains("static::creating(function ($model) {"));
    assert!(user.contains("$model->uuid = (string) \\Illuminate\\Support\\Str::uuid();"));

    let post = fs::read_to_string(root.join("app/Models/Post.php")).unwrap();
    assert!(post.contains("protected $fillable = ['title', 'user_id'];"));
    assert!(post.contains("return $this->belongsTo(User::class, 'user_id');"));
    assert!(!post.contains("hasMany"));

    let comment = fs::read_to_string(root.join("app/Models/Comment.php")).unwrap();
    assert!(comment.contains("protected $fillable = ['body'];"));
    assert!(comment.contains("public function commentable()"));
    assert!(comment.contains("return $this->morphTo();"));
}

#[test]
fn test_directive_sheet_lists_models() {
    let temp_dir = TempDir::new().unwrap();
    let config = config(temp_dir.path());
    write_sheet(&config.schema_sheet(), &SCHEMA_HEADERS, &blog_rows());

    SchemaCompiler::new(&config)
        .unwrap()
        .run(&config.schema_sheet())
        .unwrap();

    let rows = read_rows(&config.directive_sheet(), DIRECTIVE_HEADERS.len()).unwrap();
    let models: Vec<_> = rows.iter().map(|row| row.cell(0).to_string()).collect();
    assert_eq!(models, vec!["User", "Post", "Comment"]);
    assert!(rows.iter().all(|row| row.cell(1).is_empty()));
}

#[test]
fn test_second_run_continues_timestamps() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    let config = config(root);
    write_sheet(&config.schema_sheet(), &SCHEMA_HEADERS, &blog_rows());
    let compiler = SchemaCompiler::new(&config).unwrap();

    compiler.run(&config.schema_sheet()).unwrap();
    let report = compiler.run(&config.schema_sheet()).unwrap();

    let names = migrations(root);
    assert_eq!(names.len(), 6);
    assert_eq!(names[3], "2024_01_15_103003_create_users_table.php");
    assert_eq!(names[5], "2024_01_15_103005_create_comments_table.php");

    // Models and the directive sheet are rewritten in place
    assert_eq!(report.count(ActionKind::Overwritten), 4);
}

#[test]
fn test_inverse_on_undefined_table_warns() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    let config = config(root);
    let rows = vec![with(
        with(
            with(with(column("posts", "team_id", "unsignedBigInteger"), 7, "team_id"), 9, "id"),
            10,
            "teams",
        ),
        12,
        "yes",
    )];
    write_sheet(&config.schema_sheet(), &SCHEMA_HEADERS, &rows);

    let report = SchemaCompiler::new(&config)
        .unwrap()
        .run(&config.schema_sheet())
        .unwrap();

    assert_eq!(report.count(ActionKind::Warning), 1);
    assert!(!root.join("app/Models/Team.php").exists());
    let post = fs::read_to_string(root.join("app/Models/Post.php")).unwrap();
    assert!(post.contains("return $this->belongsTo(Team::class, 'team_id');"));
}

#[test]
fn test_rows_without_table_are_skipped() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    let config = config(root);
    let rows = vec![
        column("tags", "label", "string"),
        column("", "orphan", "string"),
        column("tags", "", "string"),
    ];
    write_sheet(&config.schema_sheet(), &SCHEMA_HEADERS, &rows);

    SchemaCompiler::new(&config)
        .unwrap()
        .run(&config.schema_sheet())
        .unwrap();

    assert_eq!(migrations(root), vec!["2024_01_15_103000_create_tags_table.php"]);
    let tag = fs::read_to_string(root.join("app/Models/Tag.php")).unwrap();
    assert!(tag.contains("protected $fillable = ['label'];"));
}

#[test]
fn test_missing_schema_sheet_is_an_error() {
    let temp_dir = TempDir::new().unwrap();
    let config = config(temp_dir.path());

    let result = SchemaCompiler::new(&config)
        .unwrap()
        .run(&config.schema_sheet());

    assert!(matches!(result, Err(ScaffoldError::InputNotFound(_))));
    assert!(!temp_dir.path().join("database").exists());
}
