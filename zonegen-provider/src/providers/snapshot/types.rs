//! Snapshot document structures
//!
//! Mirrors the JSON printed by `aws route53 list-hosted-zones` and
//! `aws route53 list-resource-record-sets`, bundled into one document.

use std::collections::HashMap;

use serde::Deserialize;

/// A complete offline inventory.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SnapshotDocument {
    #[serde(default)]
    pub hosted_zones: Vec<SnapshotZone>,
    /// Record sets keyed by hosted zone id, with or without the `/hostedzone/` prefix.
    #[serde(default)]
    pub resource_record_sets: HashMap<String, Vec<SnapshotRecordSet>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SnapshotZone {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub config: Option<SnapshotZoneConfig>,
    #[serde(default)]
    pub resource_record_set_count: Option<u64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SnapshotZoneConfig {
    #[serde(default)]
    pub comment: Option<String>,
    #[serde(default)]
    pub private_zone: bool,
}

#[derive(Debug, Deserialize)]
pub struct SnapshotRecordSet {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Type")]
    pub record_type: String,
    #[serde(rename = "TTL", default)]
    pub ttl: Option<u64>,
    #[serde(rename = "ResourceRecords", default)]
    pub resource_records: Vec<SnapshotValue>,
    #[serde(rename = "AliasTarget", default)]
    pub alias_target: Option<SnapshotAliasTarget>,
}

#[derive(Debug, Deserialize)]
pub struct SnapshotValue {
    #[serde(rename = "Value")]
    pub value: String,
}

#[derive(Debug, Deserialize)]
pub struct SnapshotAliasTarget {
    #[serde(rename = "HostedZoneId")]
    pub hosted_zone_id: String,
    #[serde(rename = "DNSName")]
    pub dns_name: String,
    #[serde(rename = "EvaluateTargetHealth", default)]
    pub evaluate_target_health: bool,
}
