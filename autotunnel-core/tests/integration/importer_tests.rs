//! Integration tests for the import orchestrator

use std::sync::Arc;

use autotunnel_core::config::ImportSettings;
use autotunnel_core::error::{ImportError, UserFacingError};
use autotunnel_core::import::{CancellationToken, MemorySource, TunnelImporter};
use autotunnel_core::naming::{FixedName, RandomTunnelName};
use autotunnel_core::store::{InMemoryTunnelStore, TunnelStore};
use autotunnel_core::wgconf::{Dialect, ParsedTunnel};

use super::fixtures::{MALFORMED, build_zip, build_zip_with_locked, config_text};

type Importer = TunnelImporter<Arc<InMemoryTunnelStore>, RandomTunnelName>;

fn importer() -> Importer {
    TunnelImporter::new(Arc::new(InMemoryTunnelStore::new()), RandomTunnelName)
}

// ============================================================================
// Single file
// ============================================================================

#[tokio::test]
async fn test_repeated_file_import_gets_numbered_names() {
    let importer = importer();
    let cancel = CancellationToken::new();
    let source = MemorySource::new("home.conf", config_text(None));

    let mut names = Vec::new();
    for _ in 0..3 {
        let report = importer.import_source(&source, &cancel).await;
        assert!(report.is_success(), "{}", report.summary());
        names.push(report.imported[0].name.clone());
    }

    assert_eq!(names, ["home", "home(1)", "home(2)"]);
    assert_eq!(importer.store().count().await.expect("count"), 3);
}

#[tokio::test]
async fn test_imported_tunnel_is_stored_in_both_dialects() {
    let importer = importer();
    let report = importer
        .import_source(
            &MemorySource::new("office.conf", config_text(Some("vpn.example.com:51820"))),
            &CancellationToken::new(),
        )
        .await;

    let tunnel = &report.imported[0];
    assert!(tunnel.am_quick.contains("Jc = 4"));
    assert!(!tunnel.wg_quick.contains("Jc"));

    let from_wg = ParsedTunnel::parse(&tunnel.wg_quick, Dialect::Baseline).expect("baseline text");
    let from_am = ParsedTunnel::parse_extended(&tunnel.am_quick).expect("extended text");
    assert_eq!(from_wg.peers, from_am.peers);
    assert!(from_wg.interface.obfuscation.is_empty());
    assert_eq!(from_am.interface.obfuscation.junk_packet_count, Some(4));
}

#[tokio::test]
async fn test_unsupported_extension_never_reaches_store() {
    let importer = importer();
    let report = importer
        .import_source(
            &MemorySource::new("notes.txt", config_text(None)),
            &CancellationToken::new(),
        )
        .await;

    assert!(matches!(
        report.failures[0].error,
        ImportError::UnsupportedExtension(ref name) if name == "notes.txt"
    ));
    assert_eq!(
        report.user_facing_error(),
        Some(UserFacingError::InvalidFileExtension)
    );
    assert_eq!(importer.store().save_calls(), 0);
}

#[tokio::test]
async fn test_extension_match_is_case_sensitive() {
    let importer = importer();
    let report = importer
        .import_source(
            &MemorySource::new("HOME.CONF", config_text(None)),
            &CancellationToken::new(),
        )
        .await;
    assert!(matches!(
        report.failures[0].error,
        ImportError::UnsupportedExtension(_)
    ));
}

#[tokio::test]
async fn test_wrong_scheme_is_rejected_before_reading() {
    let importer = importer();
    let source = MemorySource::new("home.conf", config_text(None)).with_scheme("http");
    let report = importer
        .import_source(&source, &CancellationToken::new())
        .await;

    assert!(matches!(
        &report.failures[0].error,
        ImportError::InvalidSourceScheme { scheme, expected } if scheme == "http" && expected == "file"
    ));
    assert_eq!(
        report.user_facing_error(),
        Some(UserFacingError::InvalidFileExtension)
    );
    assert_eq!(importer.store().save_calls(), 0);
}

#[tokio::test]
async fn test_accepted_scheme_is_configurable() {
    let importer = importer().with_settings(ImportSettings {
        accepted_scheme: "content".to_string(),
        ..ImportSettings::default()
    });
    let source = MemorySource::new("home.conf", config_text(None)).with_scheme("content");
    let report = importer
        .import_source(&source, &CancellationToken::new())
        .await;
    assert_eq!(report.imported.len(), 1);
}

#[tokio::test]
async fn test_malformed_file_reports_invalid_format() {
    let importer = importer();
    let report = importer
        .import_source(
            &MemorySource::new("broken.conf", MALFORMED),
            &CancellationToken::new(),
        )
        .await;

    assert!(report.failures[0].error.is_format_error());
    assert_eq!(report.failures[0].item, "broken.conf");
    assert_eq!(
        report.user_facing_error(),
        Some(UserFacingError::InvalidFormat)
    );
    assert_eq!(importer.store().save_calls(), 0);
}

#[tokio::test]
async fn test_unnamed_source_gets_generated_name_and_is_rejected() {
    let importer = TunnelImporter::new(
        Arc::new(InMemoryTunnelStore::new()),
        FixedName("tunnel48213".to_string()),
    );
    let report = importer
        .import_source(
            &MemorySource::unnamed(config_text(None)),
            &CancellationToken::new(),
        )
        .await;

    assert!(matches!(
        report.failures[0].error,
        ImportError::UnsupportedExtension(ref name) if name == "tunnel48213"
    ));
}

// ============================================================================
// Archives
// ============================================================================

#[tokio::test]
async fn test_archive_with_one_bad_entry_imports_the_rest() {
    let importer = importer();
    let good = config_text(None);
    let archive = build_zip(&[("a.conf", good.as_str()), ("b.conf", MALFORMED)]);

    let report = importer
        .import_source(
            &MemorySource::new("bundle.zip", archive),
            &CancellationToken::new(),
        )
        .await;

    assert_eq!(report.imported.len(), 1);
    assert_eq!(report.imported[0].name, "a");
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].item, "b.conf");
    assert!(report.failures[0].error.is_format_error());
    assert_eq!(importer.store().count().await.expect("count"), 1);
}

#[tokio::test]
async fn test_bad_entry_first_does_not_stop_later_entries() {
    let importer = importer();
    let good = config_text(None);
    let archive = build_zip(&[("bad.conf", MALFORMED), ("x.conf", good.as_str()), ("y.conf", good.as_str())]);

    let report = importer
        .import_archive_bytes(archive, &CancellationToken::new())
        .await;

    let names: Vec<_> = report.imported.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, ["x", "y"]);
    assert_eq!(report.failures.len(), 1);
}

#[tokio::test]
async fn test_archive_skips_directories_and_other_files() {
    let importer = importer();
    let good = config_text(None);
    let archive = build_zip(&[
        ("configs/", ""),
        ("configs/home.conf", good.as_str()),
        ("README.md", "not a tunnel"),
        ("notes.CONF", good.as_str()),
    ]);

    let report = importer
        .import_archive_bytes(archive, &CancellationToken::new())
        .await;

    assert_eq!(report.imported.len(), 1);
    assert_eq!(report.imported[0].name, "home");
    assert!(!report.has_failures());
}

#[tokio::test]
async fn test_archive_entries_with_same_name_are_numbered() {
    let importer = importer();
    let good = config_text(None);
    let archive = build_zip(&[("eu/vpn.conf", good.as_str()), ("us/vpn.conf", good.as_str())]);

    let report = importer
        .import_archive_bytes(archive, &CancellationToken::new())
        .await;

    let names: Vec<_> = report.imported.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, ["vpn", "vpn(1)"]);
}

#[tokio::test]
async fn test_corrupt_archive_is_a_single_failure() {
    let importer = importer();
    let report = importer
        .import_source(
            &MemorySource::new("bundle.zip", b"definitely not a zip".to_vec()),
            &CancellationToken::new(),
        )
        .await;

    assert!(report.imported.is_empty());
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].item, "bundle.zip");
    assert!(matches!(
        report.failures[0].error,
        ImportError::SourceRead { .. }
    ));
    assert_eq!(
        report.user_facing_error(),
        Some(UserFacingError::InvalidFormat)
    );
}

#[tokio::test]
async fn test_locked_non_config_entry_does_not_fail_archive() {
    let importer = importer();
    let conf = config_text(None);
    let bytes = build_zip_with_locked(
        &[("README.md", "read me"), ("a.conf", conf.as_str())],
        &["README.md"],
    );

    let report = importer
        .import_source(
            &MemorySource::new("bundle.zip", bytes),
            &CancellationToken::new(),
        )
        .await;

    assert!(report.is_success(), "{}", report.summary());
    assert_eq!(report.imported.len(), 1);
    assert_eq!(report.imported[0].name, "a");
}

#[tokio::test]
async fn test_oversized_entry_is_isolated() {
    let importer = importer().with_settings(ImportSettings {
        max_entry_bytes: 2048,
        ..ImportSettings::default()
    });
    let good = config_text(None);
    let padding = format!("{good}{}", "# padding\n".repeat(400));
    let archive = build_zip(&[("big.conf", padding.as_str()), ("small.conf", good.as_str())]);

    let report = importer
        .import_archive_bytes(archive, &CancellationToken::new())
        .await;

    assert_eq!(report.imported.len(), 1);
    assert_eq!(report.imported[0].name, "small");
    assert_eq!(report.failures[0].item, "big.conf");
}

#[tokio::test]
async fn test_cancelled_archive_import_saves_nothing_more() {
    let importer = importer();
    let good = config_text(None);
    let archive = build_zip(&[("a.conf", good.as_str()), ("b.conf", good.as_str())]);
    let cancel = CancellationToken::new();
    cancel.cancel();

    let report = importer.import_archive_bytes(archive, &cancel).await;

    assert!(report.cancelled);
    assert!(report.imported.is_empty());
    assert_eq!(importer.store().save_calls(), 0);
}

#[tokio::test]
async fn test_cancellation_from_another_task_stops_between_entries() {
    let store = Arc::new(InMemoryTunnelStore::new());
    let importer = Arc::new(TunnelImporter::new(Arc::clone(&store), RandomTunnelName));
    let good = config_text(None);
    let entries: Vec<(String, String)> = (0..50)
        .map(|i| (format!("t{i}.conf"), good.clone()))
        .collect();
    let refs: Vec<(&str, &str)> = entries
        .iter()
        .map(|(n, c)| (n.as_str(), c.as_str()))
        .collect();
    let archive = build_zip(&refs);
    let cancel = CancellationToken::new();

    let task = {
        let importer = Arc::clone(&importer);
        let cancel = cancel.clone();
        tokio::spawn(async move { importer.import_archive_bytes(archive, &cancel).await })
    };
    cancel.cancel();
    let report = task.await.expect("import task");

    assert_eq!(store.count().await.expect("count"), report.imported.len());
    assert!(report.imported.len() + report.failures.len() <= 50);
    if report.imported.len() < 50 {
        assert!(report.cancelled);
    }
}

// ============================================================================
// Clipboard text
// ============================================================================

#[tokio::test]
async fn test_clipboard_import_is_named_after_endpoint_host() {
    let importer = importer();
    let tunnel = importer
        .import_text(&config_text(Some("203.0.113.5:51820")))
        .await
        .expect("import");

    assert_eq!(tunnel.name, "203.0.113.5");

    let again = importer
        .import_text(&config_text(Some("203.0.113.5:51820")))
        .await
        .expect("import");
    assert_eq!(again.name, "203.0.113.5(1)");
}

#[tokio::test]
async fn test_clipboard_import_ipv6_endpoint() {
    let importer = importer();
    let tunnel = importer
        .import_text(&config_text(Some("[2001:db8::1]:51820")))
        .await
        .expect("import");
    assert_eq!(tunnel.name, "2001:db8::1");
}

#[tokio::test]
async fn test_clipboard_import_without_endpoint_uses_random_name() {
    let importer = importer();
    let tunnel = importer
        .import_text(&config_text(None))
        .await
        .expect("import");

    let digits = tunnel.name.strip_prefix("tunnel").expect("generated prefix");
    assert!(!digits.is_empty());
    assert!(digits.chars().all(|c| c.is_ascii_digit()));
}

#[tokio::test]
async fn test_clipboard_garbage_is_format_error() {
    let importer = importer();
    let err = importer
        .import_text("this is not a tunnel")
        .await
        .expect_err("should fail");
    assert_eq!(err.user_facing(), UserFacingError::InvalidFormat);
    assert_eq!(importer.store().save_calls(), 0);
}
