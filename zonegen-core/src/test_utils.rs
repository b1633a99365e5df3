//! Test helpers: a scripted zone inventory and small factories.

use std::collections::{HashMap, HashSet};
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use zonegen_provider::{ProviderError, Result, ZoneInventory};

use crate::config::GeneratorConfig;
use crate::types::{Record, RecordType, Zone};

// ===== MockInventory =====

pub struct MockInventory {
    zones: Vec<Zone>,
    records: HashMap<String, Vec<Record>>,
    failing: HashSet<String>,
    credentials_valid: bool,
    reachable: bool,
    record_calls: Arc<AtomicUsize>,
}

impl MockInventory {
    pub fn new(zones: Vec<Zone>) -> Self {
        Self {
            zones,
            records: HashMap::new(),
            failing: HashSet::new(),
            credentials_valid: true,
            reachable: true,
            record_calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Every call fails with a network error.
    pub fn unreachable() -> Self {
        Self {
            reachable: false,
            ..Self::new(Vec::new())
        }
    }

    pub fn with_records(mut self, zone_id: &str, records: Vec<Record>) -> Self {
        self.records.insert(zone_id.to_string(), records);
        self
    }

    /// `list_records` for `zone_id` fails.
    pub fn failing_records(mut self, zone_id: &str) -> Self {
        self.failing.insert(zone_id.to_string());
        self
    }

    pub fn rejecting_credentials(mut self) -> Self {
        self.credentials_valid = false;
        self
    }

    /// Counter of `list_records` calls.
    pub fn record_calls(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.record_calls)
    }

    fn network_error(&self) -> ProviderError {
        ProviderError::NetworkError {
            provider: self.id().to_string(),
            detail: "connection refused".to_string(),
        }
    }
}

#[async_trait]
impl ZoneInventory for MockInventory {
    fn id(&self) -> &'static str {
        "mock"
    }

    async fn validate_credentials(&self) -> Result<bool> {
        if !self.reachable {
            return Err(self.network_error());
        }
        Ok(self.credentials_valid)
    }

    async fn list_zones(&self) -> Result<Vec<Zone>> {
        if !self.reachable {
            return Err(self.network_error());
        }
        Ok(self.zones.clone())
    }

    async fn get_zone(&self, zone_id: &str) -> Result<Zone> {
        self.zones
            .iter()
            .find(|z| z.id == zone_id)
            .cloned()
            .ok_or_else(|| ProviderError::ZoneNotFound {
                provider: self.id().to_string(),
                zone: zone_id.to_string(),
                raw_message: None,
            })
    }

    async fn list_records(&self, zone_id: &str) -> Result<Vec<Record>> {
        self.record_calls.fetch_add(1, Ordering::SeqCst);
        if !self.reachable || self.failing.contains(zone_id) {
            return Err(self.network_error());
        }
        Ok(self.records.get(zone_id).cloned().unwrap_or_default())
    }
}

// ===== Factories =====

pub fn a_record(owner: &str) -> Record {
    Record::with_values(owner, RecordType::A, Some(300), vec!["192.0.2.1".to_string()])
}

/// Default config with `zones_dir` set; the root dir is its parent.
pub fn config_in(zones_dir: &str) -> GeneratorConfig {
    GeneratorConfig {
        zones_dir: PathBuf::from(zones_dir),
        ..GeneratorConfig::default()
    }
}
