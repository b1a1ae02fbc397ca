use anyhow::Result;
use dbferry_core::Config;
use std::path::Path;

pub fn handle(config_path: &Path, force: bool) -> Result<()> {
    if config_path.exists() && !force {
        anyhow::bail!(
            "config already exists at {} (use --force to overwrite)",
            config_path.display()
        );
    }

    Config::sample().save_to(config_path)?;

    println!("Wrote sample config to {}", config_path.display());
    println!("Edit the database and sftp credentials before the first run.");
    Ok(())
}
