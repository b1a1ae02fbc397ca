use crate::Result;
use chrono::{Duration, NaiveDate};
use dbferry_core::archive_file_name;
use flate2::Compression;
use flate2::write::GzEncoder;
use serde::Serialize;
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "path", rename_all = "snake_case")]
pub enum BundleOutcome {
    /// A new archive was written and the source CSVs were removed.
    Created(PathBuf),
    /// Yesterday's archive already exists; nothing was touched.
    AlreadyBundled(PathBuf),
}

impl BundleOutcome {
    pub fn path(&self) -> &Path {
        match self {
            BundleOutcome::Created(path) | BundleOutcome::AlreadyBundled(path) => path,
        }
    }
}

/// Collect every pending CSV extract in the backup directory into one
/// gzip-compressed tar named for yesterday, deleting each CSV as it is
/// added. Re-running on the same calendar day is a no-op.
///
/// All `.csv` files are packaged regardless of table or day, so catch-up
/// extracts produced earlier in the pass ride along in the same archive.
/// Entry names are flattened to the file's base name.
pub fn bundle(dir: &Path, today: NaiveDate) -> Result<BundleOutcome> {
    let yesterday = today - Duration::days(1);
    let archive_path = dir.join(archive_file_name(yesterday));

    if archive_path.exists() {
        println!(
            "Archive for {} already exists. Skipping compression.",
            yesterday
        );
        return Ok(BundleOutcome::AlreadyBundled(archive_path));
    }

    let file = File::create(&archive_path)?;
    let encoder = GzEncoder::new(file, Compression::default());
    let mut builder = tar::Builder::new(encoder);

    for entry in WalkDir::new(dir).into_iter().filter_map(|e| e.ok()) {
        let path = entry.path();
        if !path.is_file() || path.extension().is_none_or(|e| e != "csv") {
            continue;
        }
        let Some(name) = path.file_name() else {
            continue;
        };

        builder.append_path_with_name(path, Path::new(name))?;
        fs::remove_file(path)?;
    }

    let encoder = builder.into_inner()?;
    encoder.finish()?;

    println!("All backup files are compressed into: {}", archive_path.display());
    Ok(BundleOutcome::Created(archive_path))
}
