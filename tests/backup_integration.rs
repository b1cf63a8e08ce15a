//! End-to-end tests of export, backup gating, and restore.

#![allow(clippy::unwrap_used, clippy::panic)]

use notecore::models::backup_file_name;
use notecore::storage::MemoryStore;
use notecore::{
    BackupOutcome, BackupService, ConnectivityProbe, Error, NoteStore, ReachabilityCheck,
    SettingsStore,
};
use std::sync::Mutex;
use tempfile::TempDir;

/// Canned reachability checker that records every call.
struct StubChecker {
    reachable: bool,
    calls: Mutex<usize>,
}

impl StubChecker {
    const fn new(reachable: bool) -> Self {
        Self {
            reachable,
            calls: Mutex::new(0),
        }
    }
}

impl ReachabilityCheck for StubChecker {
    fn check(&self, _endpoint: &str) -> bool {
        *self.calls.lock().unwrap() += 1;
        self.reachable
    }
}

fn store_with(titles: &[&str]) -> NoteStore {
    let mut store = NoteStore::new(Box::new(MemoryStore::new()));
    for title in titles {
        store.create(title, "content").unwrap();
    }
    store
}

fn settings(offline: bool) -> SettingsStore {
    let mut s = SettingsStore::new(Box::new(MemoryStore::new()));
    s.set_offline_mode(offline).unwrap();
    s
}

#[test]
fn local_backup_then_restore_roundtrip() {
    let dir = TempDir::new().unwrap();
    let service = BackupService::new(dir.path());
    let store = store_with(&["A", "B", "C"]);

    let outcome = service.export_local(&store).unwrap();
    let BackupOutcome::Local { path, notes } = outcome else {
        panic!("expected a local backup");
    };
    assert_eq!(notes, 3);
    assert_eq!(
        path.file_name().unwrap().to_str().unwrap(),
        backup_file_name()
    );

    // Restore into a different store with unrelated content
    let mut target = store_with(&["Old"]);
    let summary = service.import_file(&mut target, &path).unwrap();
    assert_eq!(summary.notes, 3);

    let restored = target.list().unwrap();
    let titles: Vec<_> = restored.iter().map(|n| n.title.as_str()).collect();
    assert_eq!(titles, ["C", "B", "A"]);
}

#[test]
fn restore_of_empty_backup_empties_the_store() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("empty.json");
    std::fs::write(&path, r#"{"data": [], "timestamp": 1, "version": "1.0"}"#).unwrap();

    let service = BackupService::new(dir.path());
    let mut store = store_with(&["A"]);

    service.import_file(&mut store, &path).unwrap();
    assert_eq!(store.count().unwrap(), 0);
}

#[test]
fn rejected_import_never_mutates() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("bad.json");
    std::fs::write(&path, r#"{"data": [{"title": "incomplete"}]}"#).unwrap();

    let service = BackupService::new(dir.path());
    let mut store = store_with(&["Keep me"]);

    let err = service.import_file(&mut store, &path).unwrap_err();
    assert!(matches!(err, Error::ValidationError { .. }));
    assert_eq!(store.list().unwrap()[0].title, "Keep me");
}

#[test]
fn offline_flag_refuses_remote_without_network_activity() {
    let checker: &'static StubChecker = Box::leak(Box::new(StubChecker::new(true)));
    let probe = ConnectivityProbe::with_checker("https://example.com", Box::new(Shared(checker)));

    let service = BackupService::new(".");
    let store = store_with(&["A"]);

    let err = service
        .export_remote(&store, &settings(true), &probe)
        .unwrap_err();
    assert!(matches!(err, Error::OfflineModeActive));
    assert_eq!(*checker.calls.lock().unwrap(), 0);
}

/// Borrowing wrapper so a test can keep a handle on its checker.
struct Shared(&'static StubChecker);

impl ReachabilityCheck for Shared {
    fn check(&self, endpoint: &str) -> bool {
        self.0.check(endpoint)
    }
}

#[test]
fn unreachable_network_refuses_remote() {
    let probe =
        ConnectivityProbe::with_checker("https://example.com", Box::new(StubChecker::new(false)));

    let service = BackupService::new(".");
    let store = store_with(&["A"]);

    let err = service
        .export_remote(&store, &settings(false), &probe)
        .unwrap_err();
    assert!(matches!(err, Error::NoNetwork));
}

#[test]
fn auto_backup_falls_back_to_local_file() {
    let dir = TempDir::new().unwrap();
    let service = BackupService::new(dir.path());
    let store = store_with(&["A", "B"]);
    let probe =
        ConnectivityProbe::with_checker("https://example.com", Box::new(StubChecker::new(false)));

    let outcome = service
        .create_backup(&store, &settings(false), &probe)
        .unwrap();
    let BackupOutcome::Local { path, notes } = outcome else {
        panic!("expected fallback to local");
    };
    assert_eq!(notes, 2);
    assert!(path.exists());
}

#[test]
fn auto_backup_prefers_remote_when_online() {
    let dir = TempDir::new().unwrap();
    let service = BackupService::new(dir.path());
    let store = store_with(&["A"]);
    let probe =
        ConnectivityProbe::with_checker("https://example.com", Box::new(StubChecker::new(true)));

    let outcome = service
        .create_backup(&store, &settings(false), &probe)
        .unwrap();
    assert_eq!(outcome, BackupOutcome::Remote { notes: 1 });

    // Nothing written locally on the remote path
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[test]
fn empty_collection_short_circuits_every_path() {
    let dir = TempDir::new().unwrap();
    let service = BackupService::new(dir.path());
    let store = NoteStore::new(Box::new(MemoryStore::new()));
    let probe =
        ConnectivityProbe::with_checker("https://example.com", Box::new(StubChecker::new(true)));

    assert_eq!(
        service.export_local(&store).unwrap(),
        BackupOutcome::NothingToBackUp
    );
    assert_eq!(
        service
            .export_remote(&store, &settings(true), &probe)
            .unwrap(),
        BackupOutcome::NothingToBackUp
    );
    assert_eq!(
        service
            .create_backup(&store, &settings(false), &probe)
            .unwrap(),
        BackupOutcome::NothingToBackUp
    );
}

#[test]
fn legacy_backup_field_names_restore() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("legacy.json");
    std::fs::write(
        &path,
        r#"{"notes": [{"id": "z1", "title": "X", "content": "y"}], "createdAt": 42}"#,
    )
    .unwrap();

    let service = BackupService::new(dir.path());
    let mut store = NoteStore::new(Box::new(MemoryStore::new()));

    let summary = service.import_file(&mut store, &path).unwrap();
    assert_eq!(summary.notes, 1);
    // Missing version tag surfaces as a warning, not an error
    assert_eq!(summary.warnings.len(), 1);

    let notes = store.list().unwrap();
    assert_eq!(notes[0].id.as_str(), "z1");
    assert_eq!(notes[0].created_at, 42);
}

#[test]
fn dry_run_validates_without_mutating() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("backup.json");
    std::fs::write(
        &path,
        r#"{"data": [{"id": "z1", "title": "X", "content": "y"}], "timestamp": 1, "version": "1.0"}"#,
    )
    .unwrap();

    let service = BackupService::new(dir.path());
    let report = service.validate_file(&path).unwrap();
    assert!(report.is_valid());
}
