use chrono::NaiveDate;
use dbferry_core::{ArchiveInspector, archive_file_name};
use std::fs;
use tempfile::TempDir;

fn d(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

#[test]
fn test_scan_reports_parseable_archives_without_deleting() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join(archive_file_name(d("2024-05-01"))), b"x").unwrap();
    fs::write(dir.path().join(archive_file_name(d("2024-05-03"))), b"x").unwrap();
    fs::write(dir.path().join("backup_garbage.tar.gz"), b"x").unwrap();

    let inspector = ArchiveInspector::new(dir.path());
    let mut archives = inspector.scan().unwrap();
    archives.sort_by_key(|a| a.date);

    let dates: Vec<_> = archives.iter().map(|a| a.date).collect();
    assert_eq!(dates, vec![d("2024-05-01"), d("2024-05-03")]);

    // scan is read-only
    assert!(dir.path().join(archive_file_name(d("2024-05-01"))).exists());
    assert!(dir.path().join(archive_file_name(d("2024-05-03"))).exists());
}

#[test]
fn test_consume_latest_returns_max_date_and_deletes_archives() {
    let dir = TempDir::new().unwrap();
    let old = dir.path().join(archive_file_name(d("2024-04-28")));
    let new = dir.path().join(archive_file_name(d("2024-05-03")));
    fs::write(&old, b"x").unwrap();
    fs::write(&new, b"x").unwrap();

    let inspector = ArchiveInspector::new(dir.path());
    let latest = inspector.consume_latest().unwrap();

    assert_eq!(latest, Some(d("2024-05-03")));
    assert!(!old.exists());
    assert!(!new.exists());
}

#[test]
fn test_consume_latest_skips_malformed_names() {
    let dir = TempDir::new().unwrap();
    let malformed = dir.path().join("backup_yesterday.tar.gz");
    let csv = dir.path().join("events_backup_2024-05-02.csv");
    fs::write(&malformed, b"x").unwrap();
    fs::write(&csv, b"x").unwrap();

    let inspector = ArchiveInspector::new(dir.path());
    let latest = inspector.consume_latest().unwrap();

    assert_eq!(latest, None);
    // Unparseable files are left in place, and pending extracts are untouched.
    assert!(malformed.exists());
    assert!(csv.exists());
}

#[test]
fn test_consume_latest_on_empty_directory() {
    let dir = TempDir::new().unwrap();
    let inspector = ArchiveInspector::new(dir.path());
    assert_eq!(inspector.consume_latest().unwrap(), None);
}
