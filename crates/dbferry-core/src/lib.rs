pub mod archive;
pub mod calendar;
pub mod config;
pub mod error;

pub use archive::{ArchiveInspector, BackupArchive, archive_file_name, extract_file_name, parse_archive_date};
pub use calendar::missing_days;
pub use config::{BackupConfig, Config, DatabaseConfig, SftpConfig, expand_tilde};
pub use error::{Error, Result};
