use crate::{Error, Result};
use dbferry_core::SftpConfig;
use serde::Serialize;
use ssh2::Session;
use std::fs::{self, File};
use std::net::TcpStream;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "path", rename_all = "snake_case")]
pub enum ShipOutcome {
    /// The archive reached the remote directory.
    Shipped(String),
    /// The transfer failed and the archive was copied to the fallback path.
    FellBack(PathBuf),
}

/// Transfers a bundled archive to the configured SFTP endpoint. Any transfer
/// failure is absorbed: the archive is copied to the local fallback path so
/// no data is lost, and only an error in that copy itself propagates.
pub struct Shipper<'a> {
    sftp: &'a SftpConfig,
}

impl<'a> Shipper<'a> {
    pub fn new(sftp: &'a SftpConfig) -> Self {
        Self { sftp }
    }

    pub fn ship(&self, local: &Path) -> Result<ShipOutcome> {
        let file_name = local
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| {
                Error::InvalidOperation(format!("archive path has no file name: {}", local.display()))
            })?;
        let remote_path = format!(
            "{}/{}",
            self.sftp.remote_dir.trim_end_matches('/'),
            file_name
        );

        match self.upload(local, &remote_path) {
            Ok(()) => {
                println!("Uploaded to SFTP: {}", remote_path);
                Ok(ShipOutcome::Shipped(remote_path))
            }
            Err(err) => {
                eprintln!("Warning: SFTP upload failed: {}", err);

                if let Some(parent) = self.sftp.fallback_path.parent() {
                    fs::create_dir_all(parent)?;
                }
                fs::copy(local, &self.sftp.fallback_path)?;
                println!(
                    "Archive copied to fallback path: {}",
                    self.sftp.fallback_path.display()
                );
                Ok(ShipOutcome::FellBack(self.sftp.fallback_path.clone()))
            }
        }
    }

    fn upload(&self, local: &Path, remote_path: &str) -> Result<()> {
        let tcp = TcpStream::connect((self.sftp.host.as_str(), self.sftp.port))?;
        let mut session = Session::new()?;
        session.set_tcp_stream(tcp);
        session.handshake()?;
        session.userauth_password(&self.sftp.username, &self.sftp.password)?;

        let sftp = session.sftp()?;
        let mut remote = sftp.create(Path::new(remote_path))?;
        let mut file = File::open(local)?;
        std::io::copy(&mut file, &mut remote)?;
        Ok(())
    }
}
