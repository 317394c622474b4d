// SPDX-FileCopyrightText: 2026 Dirscanner Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The checksum plugin loaded from an external package and run end to end.

use std::fs;

use dirscanner_checksum::{ChecksumHandler, SCAN_COMMAND, register_entry_points};
use dirscanner_core::{DirScannerError, ProgressReporter, ScanEngine, ScanRequest};
use dirscanner_plugin::{
    EntryPointLoader, PluginCatalog, PluginLifecycleManager, PluginRegistry, PluginSource,
};
use dirscanner_test_utils::{Outcome, RecordingReporter, ScanFixture};

fn loader() -> EntryPointLoader {
    let mut loader = EntryPointLoader::new();
    register_entry_points(&mut loader);
    loader
}

#[tokio::test]
async fn package_loads_and_indexes_with_configured_pattern() {
    let fx = ScanFixture::new().unwrap();
    let package = fx.add_package("extras", "0.3.0", &["checksum"]).unwrap();
    fx.add_plugin_config("checksum", "pattern = \"*.iso\"\n").unwrap();
    fx.add_file("one.iso", b"abc").unwrap();
    fx.add_file("two.iso", b"").unwrap();
    fx.add_file("readme.md", b"skip").unwrap();

    let mut registry =
        PluginRegistry::new(PluginCatalog::new()).with_external_dir(fx.ext_dir(), loader());
    registry.discover();
    assert_eq!(registry.get("checksum").unwrap().source, PluginSource::External(package));
    assert_eq!(registry.command_descriptors()[0].name, SCAN_COMMAND);

    let mut manager = PluginLifecycleManager::new(registry, fx.resolver());
    manager.initialize_all().await.unwrap();

    let index = fx.output_dir().join("sums.csv");
    let request = ScanRequest::builder(fx.scan_dir())
        .index_path(Some(index.clone()))
        .build();
    let mut handler = manager.create_handler("checksum").unwrap();
    let mut reporter = RecordingReporter::new();
    let dispatched = ScanEngine::new()
        .scan_and_flush(&request, handler.as_mut(), &mut reporter)
        .unwrap();

    assert_eq!(dispatched, 2);
    assert_eq!(reporter.status().processed(), 2);
    let content = fs::read_to_string(&index).unwrap();
    assert!(content.starts_with("File,Size,Sha256\n"));
    assert!(content.contains(
        "one.iso,3,ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
    ));
    assert!(content.contains(
        "two.iso,0,e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
    ));

    manager.shutdown_all_default().await;
    assert!(manager.registry().is_empty());
}

#[tokio::test]
async fn individual_mode_writes_next_to_source() {
    let fx = ScanFixture::new().unwrap();
    fx.add_package("extras", "1.0.0", &["checksum"]).unwrap();
    let source = fx.add_file("data.bin", b"abc").unwrap();

    let mut registry =
        PluginRegistry::new(PluginCatalog::new()).with_external_dir(fx.ext_dir(), loader());
    registry.discover();
    let mut manager = PluginLifecycleManager::new(registry, fx.resolver());
    manager.initialize_all().await.unwrap();

    let request = ScanRequest::builder(fx.scan_dir()).build();
    let mut reporter = RecordingReporter::new();
    let mut handler = manager.create_handler("checksum").unwrap();
    ScanEngine::new()
        .scan_and_flush(&request, handler.as_mut(), &mut reporter)
        .unwrap();

    let out = fx.scan_dir().join("data.bin.ba7816bf8f01cfea.sha256.csv");
    let content = fs::read_to_string(&out).unwrap();
    assert_eq!(
        content,
        format!(
            "Path,Size,Sha256\n{},3,ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad\n",
            source.display()
        )
    );

    // A second run sees its own output but does not hash it.
    let mut reporter = RecordingReporter::new();
    let mut handler = manager.create_handler("checksum").unwrap();
    let dispatched = ScanEngine::new()
        .scan_and_flush(&request, handler.as_mut(), &mut reporter)
        .unwrap();
    assert_eq!(dispatched, 1);
    assert_eq!(reporter.status().skipped(), 1);
}

#[test]
fn existing_index_with_overwrite_is_replaced() {
    let fx = ScanFixture::new().unwrap();
    fx.add_file("a.txt", b"abc").unwrap();
    fx.add_file("b.txt", b"").unwrap();
    let index = fx.output_dir().join("sums.csv");
    fs::write(&index, "old").unwrap();

    let request = ScanRequest::builder(fx.scan_dir())
        .index_path(Some(index.clone()))
        .overwrite(true)
        .build();
    let mut handler = ChecksumHandler::new("*.txt");
    let mut reporter = RecordingReporter::new();
    ScanEngine::new()
        .scan_and_flush(&request, &mut handler, &mut reporter)
        .unwrap();

    assert_eq!(reporter.status().processed(), 2);
    let content = fs::read_to_string(&index).unwrap();
    assert!(!content.contains("old"));
    assert_eq!(content.lines().count(), 3);
}

#[test]
fn index_inside_scanned_directory_is_not_hashed() {
    let fx = ScanFixture::new().unwrap();
    fx.add_file("a.txt", b"abc").unwrap();
    fx.add_file("b.txt", b"").unwrap();
    let index = fx.add_file("index.csv", b"old").unwrap();

    let request = ScanRequest::builder(fx.scan_dir())
        .index_path(Some(index.clone()))
        .overwrite(true)
        .build();
    let mut handler = ChecksumHandler::new("*");
    let mut reporter = RecordingReporter::new();
    ScanEngine::new()
        .scan_and_flush(&request, &mut handler, &mut reporter)
        .unwrap();

    assert_eq!(reporter.status().processed(), 2);
    assert_eq!(reporter.status().skipped(), 1);
    let skipped = reporter.with_outcome(Outcome::Skipped);
    assert!(skipped[0].file.ends_with("index.csv"));

    let content = fs::read_to_string(&index).unwrap();
    assert_eq!(content.lines().count(), 3);
    assert!(!content.contains("old"));
    assert!(!content.contains("index.csv"));
}

#[test]
fn failed_index_write_reports_unwritten_digests() {
    let fx = ScanFixture::new().unwrap();
    for n in 0..100 {
        fx.add_file(&format!("f{n:03}.dat"), n.to_string()).unwrap();
    }
    let blocker = fx.root().join("blocker");
    fs::write(&blocker, "not a directory").unwrap();
    let request = ScanRequest::builder(fx.scan_dir())
        .index_path(Some(blocker.join("sums.csv")))
        .build();

    let mut handler = ChecksumHandler::new("*.dat");
    let mut reporter = RecordingReporter::new();
    let result = ScanEngine::new().scan_and_flush(&request, &mut handler, &mut reporter);

    match result {
        Err(DirScannerError::IndexIncomplete { pending, .. }) => assert_eq!(pending, 100),
        other => panic!("expected IndexIncomplete, got {other:?}"),
    }
    assert_eq!(reporter.status().processed(), 99);
    assert_eq!(reporter.status().errored(), 1);
    assert_eq!(handler.pending(), 100);
}
