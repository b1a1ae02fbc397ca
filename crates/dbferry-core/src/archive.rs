use crate::Result;
use chrono::NaiveDate;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

const ARCHIVE_PREFIX: &str = "backup_";
const ARCHIVE_SUFFIX: &str = ".tar.gz";
const DATE_FORMAT: &str = "%Y-%m-%d";

/// A bundled archive sitting in the backup directory, identified by the
/// calendar day embedded in its filename.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackupArchive {
    pub date: NaiveDate,
    pub path: PathBuf,
}

/// `backup_<YYYY-MM-DD>.tar.gz`
pub fn archive_file_name(date: NaiveDate) -> String {
    format!("{}{}{}", ARCHIVE_PREFIX, date.format(DATE_FORMAT), ARCHIVE_SUFFIX)
}

/// `<table>_backup_<YYYY-MM-DD>.csv`
pub fn extract_file_name(table: &str, date: NaiveDate) -> String {
    format!("{}_backup_{}.csv", table, date.format(DATE_FORMAT))
}

/// Parse the day out of an archive filename. Anything that does not match
/// the naming convention yields `None`; malformed names are skipped by the
/// inspector, never treated as errors.
pub fn parse_archive_date(file_name: &str) -> Option<NaiveDate> {
    let date_str = file_name
        .strip_prefix(ARCHIVE_PREFIX)?
        .strip_suffix(ARCHIVE_SUFFIX)?;
    NaiveDate::parse_from_str(date_str, DATE_FORMAT).ok()
}

/// Scans the backup directory for previously produced archives.
pub struct ArchiveInspector {
    dir: PathBuf,
}

impl ArchiveInspector {
    pub fn new(dir: &Path) -> Self {
        Self { dir: dir.to_path_buf() }
    }

    /// Read-only listing of every parseable archive in the backup directory.
    pub fn scan(&self) -> Result<Vec<BackupArchive>> {
        let mut archives = Vec::new();

        for entry in WalkDir::new(&self.dir)
            .max_depth(1)
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();
            if !path.is_file() {
                continue;
            }

            let Some(file_name) = path.file_name().and_then(|n| n.to_str()) else {
                continue;
            };

            if let Some(date) = parse_archive_date(file_name) {
                archives.push(BackupArchive {
                    date,
                    path: path.to_path_buf(),
                });
            }
        }

        Ok(archives)
    }

    /// Report the most recent backed-up date and delete every parseable
    /// archive found along the way. An archive's date is durably recorded by
    /// its prior remote upload, so the local copy is disposable once read.
    /// Files that fail to parse are left in place.
    pub fn consume_latest(&self) -> Result<Option<NaiveDate>> {
        let mut latest: Option<NaiveDate> = None;

        for archive in self.scan()? {
            std::fs::remove_file(&archive.path)?;
            println!("Deleted local backup file: {}", archive.path.display());

            if latest.is_none_or(|d| archive.date > d) {
                latest = Some(archive.date);
            }
        }

        Ok(latest)
    }
}
