use concierge_source::{
    load_tree, load_tree_with_origin, ConciergeConfig, ConfigError, FetchError, GridSource,
    JsonFileSource, TreeOrigin,
};
use concierge_tree::default_tree;
use pretty_assertions::assert_eq;
use std::io::Write;
use tempfile::{tempdir, NamedTempFile};

fn file_with(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

#[tokio::test]
async fn test_file_source_reads_sheets_shaped_json() {
    let file = file_with(r#"{"values": [["Hours"], ["", "Weekdays"], ["", "Weekends"]]}"#);
    let source = JsonFileSource::new(file.path());

    let grid = source.fetch_grid().await.unwrap();
    assert_eq!(grid.len(), 3);

    let tree = load_tree(&source).await;
    assert_eq!(tree.roots(), &["Hours".to_string()]);
    assert_eq!(tree.children_of("Hours").count(), 2);
}

#[tokio::test]
async fn test_missing_file_falls_back_to_default_menu() {
    let dir = tempdir().unwrap();
    let source = JsonFileSource::new(dir.path().join("menu.json"));

    assert!(matches!(
        source.fetch_grid().await,
        Err(FetchError::Io { .. })
    ));

    let loaded = load_tree_with_origin(&source).await;
    assert!(loaded.is_fallback());
    assert_eq!(loaded.tree, default_tree());
}

#[tokio::test]
async fn test_malformed_file_falls_back_to_default_menu() {
    let file = file_with("{\"values\": 42}");
    let loaded = load_tree_with_origin(&JsonFileSource::new(file.path())).await;

    assert!(matches!(
        loaded.origin,
        TreeOrigin::FetchFailed(FetchError::Decode(_))
    ));
    assert_eq!(loaded.tree.roots(), default_tree().roots());
}

#[test]
fn test_config_file_round_trips_through_loader() {
    let file = file_with(
        r#"
        [sheets]
        spreadsheet_id = "abc"
        timeout_secs = 3

        [storage]
        data_dir = "/tmp/concierge-data"
        "#,
    );

    let config = ConciergeConfig::from_file(file.path()).unwrap();
    assert_eq!(config.sheets.spreadsheet_id, "abc");
    assert_eq!(config.sheets.timeout().as_secs(), 3);
    assert_eq!(
        config.storage.data_dir,
        std::path::PathBuf::from("/tmp/concierge-data")
    );
}

#[test]
fn test_invalid_config_file_reports_path() {
    let file = file_with("[sheets]\ntimeout_secs = \"ten\"\n");

    let err = ConciergeConfig::from_file(file.path()).unwrap_err();
    match err {
        ConfigError::Toml { path, .. } => assert_eq!(path, file.path()),
        other => panic!("expected toml error, got {other:?}"),
    }
}

#[test]
fn test_missing_config_file_is_io_error() {
    let dir = tempdir().unwrap();
    let err = ConciergeConfig::from_file(&dir.path().join("concierge.toml")).unwrap_err();
    assert!(matches!(err, ConfigError::Io { .. }));
}
