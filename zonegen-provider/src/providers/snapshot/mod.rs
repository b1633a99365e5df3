//! Offline zone inventory backed by a JSON snapshot

mod types;

use std::path::PathBuf;

use async_trait::async_trait;
use tokio::sync::OnceCell;

use crate::error::{ProviderError, Result};
use crate::providers::common::{normalize_domain_name, normalize_zone_id};
use crate::traits::ZoneInventory;
use crate::types::{AliasTarget, Record, RecordType, Zone};

use types::{SnapshotDocument, SnapshotRecordSet, SnapshotZone};

const PROVIDER_NAME: &str = "snapshot";

/// Zone inventory that reads a previously exported JSON document.
///
/// The document is loaded on first use and kept for the lifetime of the
/// inventory.
///
/// ```json
/// {
///   "HostedZones": [
///     { "Id": "/hostedzone/Z1", "Name": "example.com.",
///       "Config": { "PrivateZone": false } }
///   ],
///   "ResourceRecordSets": {
///     "Z1": [
///       { "Name": "www.example.com.", "Type": "A", "TTL": 300,
///         "ResourceRecords": [{ "Value": "192.0.2.10" }] }
///     ]
///   }
/// }
/// ```
pub struct SnapshotInventory {
    path: PathBuf,
    document: OnceCell<SnapshotDocument>,
}

impl SnapshotInventory {
    /// Creates an inventory reading from `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            document: OnceCell::new(),
        }
    }

    /// Creates an inventory from an in-memory JSON document.
    pub fn from_json(json: &str) -> Result<Self> {
        let document = parse_document(json)?;
        Ok(Self {
            path: PathBuf::from("<memory>"),
            document: OnceCell::new_with(Some(document)),
        })
    }

    async fn document(&self) -> Result<&SnapshotDocument> {
        self.document
            .get_or_try_init(|| async {
                let path = self.path.display().to_string();
                log::debug!("[{PROVIDER_NAME}] Loading {path}");
                let json = tokio::fs::read_to_string(&self.path).await.map_err(|e| {
                    ProviderError::SnapshotError {
                        provider: PROVIDER_NAME.to_string(),
                        path: path.clone(),
                        detail: e.to_string(),
                    }
                })?;
                parse_document(&json)
            })
            .await
    }

    fn convert_zone(zone: &SnapshotZone) -> Zone {
        let (comment, is_private) = zone
            .config
            .as_ref()
            .map(|c| (c.comment.clone().unwrap_or_default(), c.private_zone))
            .unwrap_or_default();
        Zone {
            id: normalize_zone_id(&zone.id),
            name: normalize_domain_name(&zone.name),
            is_private,
            comment,
            record_count: zone.resource_record_set_count.unwrap_or(0),
        }
    }

    fn convert_record_set(set: &SnapshotRecordSet) -> Record {
        let owner = normalize_domain_name(&set.name);
        let record_type = RecordType::from(set.record_type.as_str());
        match &set.alias_target {
            Some(alias) => Record::with_alias(
                owner,
                record_type,
                AliasTarget {
                    target_name: normalize_domain_name(&alias.dns_name),
                    target_zone_id: alias.hosted_zone_id.clone(),
                    evaluate_target_health: alias.evaluate_target_health,
                },
            ),
            None => Record::with_values(
                owner,
                record_type,
                set.ttl,
                set.resource_records.iter().map(|v| v.value.clone()).collect(),
            ),
        }
    }
}

fn parse_document(json: &str) -> Result<SnapshotDocument> {
    serde_json::from_str(json).map_err(|e| ProviderError::ParseError {
        provider: PROVIDER_NAME.to_string(),
        detail: e.to_string(),
    })
}

#[async_trait]
impl ZoneInventory for SnapshotInventory {
    fn id(&self) -> &'static str {
        PROVIDER_NAME
    }

    async fn validate_credentials(&self) -> Result<bool> {
        self.document().await.map(|_| true)
    }

    async fn list_zones(&self) -> Result<Vec<Zone>> {
        let document = self.document().await?;
        Ok(document.hosted_zones.iter().map(Self::convert_zone).collect())
    }

    async fn get_zone(&self, zone_id: &str) -> Result<Zone> {
        let wanted = normalize_zone_id(zone_id);
        let document = self.document().await?;
        document
            .hosted_zones
            .iter()
            .map(Self::convert_zone)
            .find(|z| z.id == wanted)
            .ok_or_else(|| ProviderError::ZoneNotFound {
                provider: PROVIDER_NAME.to_string(),
                zone: wanted,
                raw_message: None,
            })
    }

    async fn list_records(&self, zone_id: &str) -> Result<Vec<Record>> {
        let zone = self.get_zone(zone_id).await?;
        let document = self.document().await?;
        let sets = document
            .resource_record_sets
            .iter()
            .find(|(key, _)| normalize_zone_id(key) == zone.id)
            .map(|(_, sets)| sets.as_slice())
            .unwrap_or_default();

        Ok(sets
            .iter()
            .map(Self::convert_record_set)
            .filter(|r| !r.is_apex_managed(&zone.name))
            .collect())
    }
}
