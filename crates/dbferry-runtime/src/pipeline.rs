use crate::bundle::{BundleOutcome, bundle};
use crate::extract::TableExtractor;
use crate::report::{ExtractOutcome, ExtractRecord, RunReport};
use crate::ship::Shipper;
use crate::Result;
use chrono::NaiveDate;
use dbferry_core::{ArchiveInspector, Config, missing_days};
use std::fs;

/// One full backup pass, run to completion, fully sequential:
/// inspect -> compute gaps -> extract per table per missing day -> bundle ->
/// ship. No state survives between passes except what can be recovered by
/// re-reading archive filenames, so an interrupted pass resumes naturally on
/// the next invocation.
pub struct BackupPipeline<'a> {
    config: &'a Config,
}

impl<'a> BackupPipeline<'a> {
    pub fn new(config: &'a Config) -> Self {
        Self { config }
    }

    pub fn run(&self, today: NaiveDate) -> Result<RunReport> {
        let backup = &self.config.backup;
        fs::create_dir_all(&backup.dir)?;

        let inspector = ArchiveInspector::new(&backup.dir);
        let latest = inspector.consume_latest()?;
        match latest {
            Some(date) => println!("Latest recorded backup: {}", date),
            None => println!("No previous backup found. Backing up yesterday's data."),
        }

        let days = missing_days(latest, today);
        println!("Days to backup: {}", days.len());

        let extractor = TableExtractor::new(&self.config.database, backup);
        let mut extracts = Vec::new();

        for table in &backup.tables {
            for day in &days {
                println!("Backing up data for: {} ({})", day, table);
                let outcome = match extractor.extract(table, *day) {
                    Ok(summary) => {
                        println!(
                            "Backup completed: {} ({} rows)",
                            summary.path.display(),
                            summary.rows
                        );
                        ExtractOutcome::Completed { rows: summary.rows }
                    }
                    // A single failed table-day must not abort the pass.
                    Err(err) => {
                        eprintln!("Warning: backup of {} for {} failed: {}", table, day, err);
                        ExtractOutcome::Failed {
                            error: err.to_string(),
                        }
                    }
                };
                extracts.push(ExtractRecord {
                    table: table.clone(),
                    date: *day,
                    outcome,
                });
            }
        }

        let bundle = bundle(&backup.dir, today)?;
        let ship = match &bundle {
            BundleOutcome::Created(path) => Some(Shipper::new(&self.config.sftp).ship(path)?),
            BundleOutcome::AlreadyBundled(_) => None,
        };

        Ok(RunReport {
            latest_recorded: latest,
            pending_days: days,
            extracts,
            bundle,
            ship,
        })
    }
}
