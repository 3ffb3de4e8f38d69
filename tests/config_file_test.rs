//! 配置文件加载集成测试

use rat_metacard::*;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_export_config_from_toml() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("export.toml");
    fs::write(
        &path,
        r#"
[projection]
excluded = ["metadata"]

[[projection.attributes]]
name = "title"
alias = "Title"

[[projection.attributes]]
name = "id"

[tabular]
delimiter = ";"
quote = "'"
line_ending = "Lf"

[logging]
level = "Debug"
console = false
"#,
    )
    .unwrap();

    let config = ExportConfig::from_file(&path).unwrap();
    assert!(config.projection.is_explicit());
    assert!(config.projection.is_excluded("metadata"));
    assert_eq!(config.projection.alias_map().get("title"), Some(&"Title"));
    assert_eq!(config.tabular.delimiter, ';');
    assert_eq!(config.tabular.quote, '\'');
    assert_eq!(config.tabular.line_ending, LineEnding::Lf);
    assert_eq!(config.logging.level, LogLevel::Debug);
    assert!(config.logging.init_logger().is_ok());
}

#[test]
fn test_save_and_reload_json() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("export.json");

    let config = ExportConfig::builder()
        .projection(
            ProjectionConfig::builder()
                .attribute("id")
                .aliased_attribute("title", "Title")
                .exclude("thumbnail")
                .build()
                .unwrap(),
        )
        .tabular(TabularFormat::rfc4180())
        .logging(
            LoggingConfig::builder()
                .level(LogLevel::Warn)
                .console(false)
                .build()
                .unwrap(),
        )
        .build()
        .unwrap();

    config.save_to_file(&path).unwrap();
    let reloaded = ExportConfig::from_file(&path).unwrap();
    assert_eq!(reloaded, config);
}

#[test]
fn test_invalid_files_are_rejected() {
    let dir = TempDir::new().unwrap();

    let nameless = dir.path().join("nameless.json");
    fs::write(&nameless, r#"{"attributes": [{"alias": "X"}]}"#).unwrap();
    assert!(matches!(
        ProjectionConfig::from_file(&nameless),
        Err(MetacardError::ConfigInvalid { .. })
    ));

    let same_chars = dir.path().join("same.toml");
    fs::write(
        &same_chars,
        r#"
[projection]

[tabular]
delimiter = ","
quote = ","
line_ending = "Crlf"

[logging]
level = "Info"
console = false
"#,
    )
    .unwrap();
    assert!(matches!(
        ExportConfig::from_file(&same_chars),
        Err(MetacardError::ConfigInvalid { .. })
    ));

    assert!(matches!(
        ProjectionConfig::from_file(dir.path().join("missing.json")),
        Err(MetacardError::IoError(_))
    ));
}
