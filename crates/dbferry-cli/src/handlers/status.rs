use crate::args::OutputFormat;
use anyhow::Result;
use chrono::Local;
use dbferry_core::{ArchiveInspector, Config, missing_days};
use std::path::Path;

/// Read-only view of the backup directory: what the last recorded backup
/// was, and which days a run would back up right now. Unlike a real pass,
/// nothing is deleted.
pub fn handle(config_path: &Path, format: OutputFormat) -> Result<()> {
    let config = Config::load_from(config_path)?;
    let today = Local::now().date_naive();

    let inspector = ArchiveInspector::new(&config.backup.dir);
    let latest = inspector
        .scan()?
        .into_iter()
        .map(|archive| archive.date)
        .max();
    let days = missing_days(latest, today);

    match format {
        OutputFormat::Json => {
            let status = serde_json::json!({
                "latest_recorded": latest,
                "pending_days": days,
            });
            println!("{}", serde_json::to_string_pretty(&status)?);
        }
        OutputFormat::Plain => {
            match latest {
                Some(date) => println!("Latest recorded backup: {}", date),
                None => println!("Latest recorded backup: none"),
            }
            if days.is_empty() {
                println!("Nothing pending.");
            } else {
                let list: Vec<String> = days.iter().map(|d| d.to_string()).collect();
                println!("Pending days: {}", list.join(", "));
            }
        }
    }

    Ok(())
}
