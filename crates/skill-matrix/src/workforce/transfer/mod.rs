//! CSV/JSON movement of workforce data in and out of the store: admin
//! exports per collection and bulk assessment uploads.

mod export;
mod import;

pub use export::{export_csv, export_json, ExportError, ExportFormat, ExportKind};
pub use import::{AssessmentCsvImporter, ImportError, ImportSummary, RowError};
