use crate::args::OutputFormat;
use anyhow::Result;
use chrono::Local;
use dbferry_core::Config;
use dbferry_runtime::{BackupPipeline, ExtractOutcome, RunReport, ShipOutcome};
use std::path::Path;

pub fn handle(config_path: &Path, format: OutputFormat) -> Result<()> {
    let config = Config::load_from(config_path)?;
    let today = Local::now().date_naive();

    let report = BackupPipeline::new(&config).run(today)?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        OutputFormat::Plain => print_summary(&report),
    }

    // Partial failure never aborts the pass, but it must be visible to the
    // invoking scheduler.
    if report.has_failures() {
        let transfer_note = if matches!(report.ship, Some(ShipOutcome::FellBack(_))) {
            ", archive diverted to the fallback path"
        } else {
            ""
        };
        anyhow::bail!(
            "backup pass finished with {} failed extract(s){}",
            report.failed_extracts(),
            transfer_note
        );
    }

    Ok(())
}

fn print_summary(report: &RunReport) {
    let attempted = report.extracts.len();
    let failed = report.failed_extracts();
    println!(
        "Extracts: {} completed, {} failed ({} pending day(s))",
        attempted - failed,
        failed,
        report.pending_days.len()
    );

    for record in &report.extracts {
        if let ExtractOutcome::Failed { error } = &record.outcome {
            println!("  failed: {} on {}: {}", record.table, record.date, error);
        }
    }

    match &report.ship {
        Some(ShipOutcome::Shipped(remote)) => println!("Shipped: {}", remote),
        Some(ShipOutcome::FellBack(path)) => {
            println!("Transfer failed; archive kept at {}", path.display())
        }
        None => println!("Nothing shipped (archive for yesterday already existed)"),
    }
}
