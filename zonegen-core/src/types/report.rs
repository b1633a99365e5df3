use std::path::PathBuf;

use serde::Serialize;

/// What happened to a file (or would have, in a dry run).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FileChangeKind {
    Created,
    Overwritten,
    Updated,
}

/// A file written by the run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileChange {
    pub path: PathBuf,
    pub kind: FileChangeKind,
    /// Full new content.
    pub content: String,
    /// Entries this change added: zone names for aggregates, target addresses for bindings.
    pub added: Vec<String>,
}

/// Why a zone was not processed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SkipReason {
    /// The zone file exists and `force` is off.
    FileExists,
    /// Private zones are skipped unless `include_private` is set.
    PrivateZone,
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::FileExists => {
                write!(f, "Terraform file already exists (use --force to overwrite)")
            }
            Self::PrivateZone => write!(f, "Private zone"),
        }
    }
}

/// Per-zone result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum ZoneOutcome {
    #[serde(rename_all = "camelCase")]
    Processed {
        zone: String,
        record_count: usize,
        /// Parent zone name for subdomain zones.
        parent: Option<String>,
        /// Set when listing the records failed; the zone was emitted without records.
        record_error: Option<String>,
    },
    Skipped {
        zone: String,
        reason: SkipReason,
    },
}

impl ZoneOutcome {
    pub fn zone(&self) -> &str {
        match self {
            Self::Processed { zone, .. } | Self::Skipped { zone, .. } => zone,
        }
    }

    pub fn is_processed(&self) -> bool {
        matches!(self, Self::Processed { .. })
    }
}

/// Result of [`GeneratorService::run`](crate::services::GeneratorService::run).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunReport {
    pub dry_run: bool,
    /// Number of zones the inventory listed.
    pub zones_found: usize,
    pub outcomes: Vec<ZoneOutcome>,
    /// File changes in the order they were made.
    pub changes: Vec<FileChange>,
    /// Files that needed no change.
    pub unchanged: Vec<PathBuf>,
    /// Manual import instructions (command mode only).
    pub instructions: Vec<String>,
}

impl RunReport {
    pub fn processed_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_processed()).count()
    }

    pub fn skipped_count(&self) -> usize {
        self.outcomes.len() - self.processed_count()
    }

    /// Change recorded for `path`, if any.
    pub fn change_for(&self, path: &std::path::Path) -> Option<&FileChange> {
        self.changes.iter().find(|c| c.path == path)
    }
}
