use crate::bundle::BundleOutcome;
use crate::ship::ShipOutcome;
use chrono::NaiveDate;
use serde::Serialize;

/// Outcome of a single table-day extract.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ExtractOutcome {
    Completed { rows: u64 },
    Failed { error: String },
}

#[derive(Debug, Clone, Serialize)]
pub struct ExtractRecord {
    pub table: String,
    pub date: NaiveDate,
    #[serde(flatten)]
    pub outcome: ExtractOutcome,
}

/// Everything that happened in one backup pass. Individual failures are
/// recorded here instead of aborting the pass; the CLI turns a report with
/// failures into a non-zero exit.
#[derive(Debug, Serialize)]
pub struct RunReport {
    /// Most recent date recovered from archive filenames before this pass.
    pub latest_recorded: Option<NaiveDate>,
    /// Days this pass attempted to back up, oldest first.
    pub pending_days: Vec<NaiveDate>,
    pub extracts: Vec<ExtractRecord>,
    pub bundle: BundleOutcome,
    /// `None` when bundling was skipped and nothing was shipped.
    pub ship: Option<ShipOutcome>,
}

impl RunReport {
    pub fn failed_extracts(&self) -> usize {
        self.extracts
            .iter()
            .filter(|r| matches!(r.outcome, ExtractOutcome::Failed { .. }))
            .count()
    }

    pub fn has_failures(&self) -> bool {
        self.failed_extracts() > 0 || matches!(self.ship, Some(ShipOutcome::FellBack(_)))
    }
}
