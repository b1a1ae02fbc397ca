use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// PostgreSQL connection parameters. One connection is opened per extract
/// call; there is no pool.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub host: String,
    #[serde(default = "default_db_port")]
    pub port: u16,
    pub user: String,
    pub password: String,
    pub dbname: String,
}

/// What to back up and where the working files live.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackupConfig {
    /// Tables to extract, in order.
    pub tables: Vec<String>,
    /// Timestamp column used for the per-day range query. Assumed to exist
    /// on every configured table.
    pub time_column: String,
    /// Directory holding CSV extracts and bundled archives.
    pub dir: PathBuf,
    /// Fixed UTC offset appended to the day bounds, e.g. "+09" or "-05:30".
    #[serde(default = "default_utc_offset")]
    pub utc_offset: String,
}

/// Remote endpoint for shipped archives, plus the local path archives are
/// copied to when the transfer fails.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SftpConfig {
    pub host: String,
    #[serde(default = "default_sftp_port")]
    pub port: u16,
    pub username: String,
    pub password: String,
    pub remote_dir: String,
    pub fallback_path: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub database: DatabaseConfig,
    pub backup: BackupConfig,
    pub sftp: SftpConfig,
}

fn default_db_port() -> u16 {
    5432
}

fn default_sftp_port() -> u16 {
    22
}

fn default_utc_offset() -> String {
    "+09".to_string()
}

impl Config {
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::Config(format!(
                "config file not found: {} (run `dbferry init` to create one)",
                path.display()
            )));
        }

        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn default_path() -> PathBuf {
        expand_tilde("~/.dbferry/config.toml")
    }

    /// A filled-in template written by `dbferry init`.
    pub fn sample() -> Self {
        Config {
            database: DatabaseConfig {
                host: "localhost".to_string(),
                port: 5432,
                user: "postgres".to_string(),
                password: "change-me".to_string(),
                dbname: "appdb".to_string(),
            },
            backup: BackupConfig {
                tables: vec!["sensor_readings".to_string(), "device_events".to_string()],
                time_column: "created_at".to_string(),
                dir: PathBuf::from("/var/lib/dbferry/backups"),
                utc_offset: default_utc_offset(),
            },
            sftp: SftpConfig {
                host: "backup.example.com".to_string(),
                port: 22,
                username: "backup".to_string(),
                password: "change-me".to_string(),
                remote_dir: "/srv/backups".to_string(),
                fallback_path: PathBuf::from("/var/lib/dbferry/failed/backup.tar.gz"),
            },
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.backup.tables.is_empty() {
            return Err(Error::Config("backup.tables must not be empty".to_string()));
        }
        if self.backup.tables.iter().any(|t| t.trim().is_empty()) {
            return Err(Error::Config(
                "backup.tables must not contain blank entries".to_string(),
            ));
        }
        if self.backup.time_column.trim().is_empty() {
            return Err(Error::Config(
                "backup.time_column must not be empty".to_string(),
            ));
        }
        if !is_valid_utc_offset(&self.backup.utc_offset) {
            return Err(Error::Config(format!(
                "backup.utc_offset must look like \"+09\" or \"-05:30\", got {:?}",
                self.backup.utc_offset
            )));
        }
        Ok(())
    }
}

/// Accepts "+HH", "-HH", "+HH:MM", "-HH:MM".
fn is_valid_utc_offset(offset: &str) -> bool {
    let Some(rest) = offset.strip_prefix(['+', '-']) else {
        return false;
    };
    let (hours, minutes) = match rest.split_once(':') {
        Some((h, m)) => (h, Some(m)),
        None => (rest, None),
    };
    let two_digits = |s: &str| s.len() == 2 && s.bytes().all(|b| b.is_ascii_digit());
    two_digits(hours) && minutes.is_none_or(two_digits)
}

/// Expand tilde (~) in paths to the user's home directory
pub fn expand_tilde(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/")
        && let Some(home) = std::env::var_os("HOME")
    {
        return PathBuf::from(home).join(stripped);
    }
    PathBuf::from(path)
}
