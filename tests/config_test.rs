use fixturegen::config::AppConfig;
use fixturegen::format::FileFormat;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_load_from_explicit_path() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("config.json");
    fs::write(
        &path,
        r#"{
            "global": {
                "output_dir": "generated",
                "sizes_mb": { "pdf": 1.5 }
            },
            "templates": {
                "invoices": { "types": ["pdf", "xlsx"], "counts": { "pdf": 3, "xlsx": 2 } }
            }
        }"#,
    )
    .unwrap();

    let config = AppConfig::load_or_default(Some(&path));
    assert_eq!(config.global.output_dir.to_string_lossy(), "generated");
    assert_eq!(config.size_mb(FileFormat::Pdf), 1.5);
    // Unset formats fall back to the format default
    assert_eq!(config.size_mb(FileFormat::Txt), 0.1);

    let invoices = config.template("invoices").unwrap();
    assert_eq!(invoices.types, vec![FileFormat::Pdf, FileFormat::Xlsx]);
    assert_eq!(invoices.counts[&FileFormat::Pdf], 3);
}

#[test]
fn test_missing_file_yields_defaults() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("absent.json");

    let config = AppConfig::load_or_default(Some(&path));
    assert_eq!(config.global.output_dir.to_string_lossy(), "fixtures");
    assert_eq!(config.global.locale, "en");
    assert!(config.templates.is_empty());
}

#[test]
fn test_malformed_file_falls_back_to_defaults() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("config.json");
    fs::write(&path, "{ not json").unwrap();

    let config = AppConfig::load_or_default(Some(&path));
    assert_eq!(config.global.output_dir.to_string_lossy(), "fixtures");
}

#[test]
fn test_partial_document_keeps_other_defaults() {
    let config = AppConfig::parse(r#"{ "global": { "locale": "pt_br" } }"#).unwrap();
    assert_eq!(config.global.locale, "pt_br");
    assert_eq!(config.global.output_dir.to_string_lossy(), "fixtures");
    assert_eq!(config.estimate_params(FileFormat::Txt).chars_per_line, 80);
}

#[test]
fn test_every_builtin_template_is_listed() {
    let config = AppConfig::default();
    let names = config.template_names();
    for name in ["default", "minimal", "small", "medium", "large", "realistic", "lorem"] {
        assert!(names.contains(&name.to_string()), "missing {name}");
        assert!(config.template(name).is_some());
    }
}
