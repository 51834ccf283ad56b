//! Integration tests for importing into the file-backed store

use std::sync::Arc;

use autotunnel_core::config::{ConfigManager, TUNNELS_FILE};
use autotunnel_core::error::ImportError;
use autotunnel_core::import::{CancellationToken, FileSource, TunnelImporter};
use autotunnel_core::models::TunnelConfig;
use autotunnel_core::naming::RandomTunnelName;
use autotunnel_core::store::TunnelStore;
use tempfile::TempDir;

use super::fixtures::{build_zip, config_text};

fn setup() -> (TempDir, Arc<ConfigManager>) {
    let dir = TempDir::new().expect("temp dir");
    let manager = Arc::new(ConfigManager::with_config_dir(dir.path().join("config")));
    (dir, manager)
}

#[tokio::test]
async fn test_import_conf_file_from_disk() {
    let (dir, store) = setup();
    let path = dir.path().join("home.conf");
    std::fs::write(&path, config_text(Some("vpn.example.com:51820"))).expect("write conf");

    let importer = TunnelImporter::new(Arc::clone(&store), RandomTunnelName);
    let source = FileSource::from_path(&path).expect("file source");
    let report = importer
        .import_source(&source, &CancellationToken::new())
        .await;

    assert!(report.is_success(), "{}", report.summary());
    assert!(dir.path().join("config").join(TUNNELS_FILE).exists());

    let reopened = ConfigManager::with_config_dir(dir.path().join("config"));
    let stored = reopened.find("home").await.expect("find");
    assert!(stored.is_some_and(|t: TunnelConfig| t.wg_quick.contains("Endpoint = vpn.example.com:51820")));
}

#[tokio::test]
async fn test_import_zip_file_from_disk() {
    let (dir, store) = setup();
    let good = config_text(None);
    let path = dir.path().join("bundle.zip");
    std::fs::write(&path, build_zip(&[("a.conf", good.as_str()), ("b.conf", good.as_str())]))
        .expect("write zip");

    let importer = TunnelImporter::new(Arc::clone(&store), RandomTunnelName);
    let source = FileSource::parse(path.to_str().expect("utf-8 path")).expect("file source");
    let report = importer
        .import_source(&source, &CancellationToken::new())
        .await;

    assert_eq!(report.imported.len(), 2);
    let mut names: Vec<_> = store
        .tunnel_names()
        .await
        .expect("names")
        .into_iter()
        .collect();
    names.sort();
    assert_eq!(names, ["a", "b"]);
}

#[tokio::test]
async fn test_missing_file_is_source_read_error() {
    let (dir, store) = setup();
    let importer = TunnelImporter::new(Arc::clone(&store), RandomTunnelName);
    let source = FileSource::from_path(dir.path().join("gone.conf")).expect("file source");

    let report = importer
        .import_source(&source, &CancellationToken::new())
        .await;

    assert!(matches!(
        &report.failures[0].error,
        ImportError::SourceRead { source_name, .. } if source_name == "gone.conf"
    ));
    assert_eq!(store.count().await.expect("count"), 0);
}

#[tokio::test]
async fn test_existing_names_on_disk_are_respected() {
    let (dir, store) = setup();
    store
        .save(TunnelConfig::new("home", "wg", "am"))
        .await
        .expect("seed");

    let path = dir.path().join("home.conf");
    std::fs::write(&path, config_text(None)).expect("write conf");
    let importer = TunnelImporter::new(Arc::clone(&store), RandomTunnelName);
    let report = importer
        .import_source(
            &FileSource::from_path(&path).expect("file source"),
            &CancellationToken::new(),
        )
        .await;

    assert_eq!(report.imported[0].name, "home(1)");
    assert_eq!(store.count().await.expect("count"), 2);
}
