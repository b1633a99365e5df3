//! Type definition module

mod model;
mod report;

pub use model::{ProcessedZone, ZoneModel, ZoneSelection};
pub use report::{FileChange, FileChangeKind, RunReport, SkipReason, ZoneOutcome};

// Re-export provider types
pub use zonegen_provider::{AliasTarget, Record, RecordType, Zone};
