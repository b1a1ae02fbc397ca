pub mod bundle;
pub mod error;
pub mod extract;
pub mod pipeline;
pub mod report;
pub mod ship;

pub use bundle::{BundleOutcome, bundle};
pub use error::{Error, Result};
pub use extract::{ExtractSummary, TableExtractor};
pub use pipeline::BackupPipeline;
pub use report::{ExtractOutcome, ExtractRecord, RunReport};
pub use ship::{ShipOutcome, Shipper};
