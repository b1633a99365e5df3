use serde::Serialize;

use super::{Record, Zone};

/// A zone ready for emission: its managed records and, for subdomain zones,
/// the parent zone that needs delegation NS records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZoneModel {
    pub zone: Zone,
    /// Records in listing order, apex NS/SOA excluded.
    pub records: Vec<Record>,
    pub parent: Option<Zone>,
}

impl ZoneModel {
    pub fn is_subdomain(&self) -> bool {
        self.parent.is_some()
    }
}

/// A zone emitted during the current run.
///
/// Collected in processing order and consumed by the aggregate merger and the
/// import planner; nothing is persisted between runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessedZone {
    pub name: String,
    pub id: String,
    pub is_subdomain: bool,
    pub has_records: bool,
}

impl From<&ZoneModel> for ProcessedZone {
    fn from(model: &ZoneModel) -> Self {
        Self {
            name: model.zone.name.clone(),
            id: model.zone.id.clone(),
            is_subdomain: model.is_subdomain(),
            has_records: !model.records.is_empty(),
        }
    }
}

/// Which zones a run processes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ZoneSelection {
    /// One zone, by name.
    Single(String),
    /// Every listed zone, in listing order.
    All,
}
