//! Route 53 API XML structures

use serde::Deserialize;

// ============ Hosted zones ============

/// Response payload for `ListHostedZones`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ListHostedZonesResponse {
    #[serde(default)]
    pub hosted_zones: HostedZones,
    #[serde(default)]
    pub is_truncated: bool,
    pub next_marker: Option<String>,
}

/// `<HostedZones>` wrapper element.
#[derive(Debug, Default, Deserialize)]
pub struct HostedZones {
    #[serde(rename = "HostedZone", default)]
    pub items: Vec<HostedZone>,
}

/// A single hosted zone.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct HostedZone {
    pub id: String,
    pub name: String,
    pub config: Option<HostedZoneConfig>,
    pub resource_record_set_count: Option<u64>,
}

/// `<Config>` of a hosted zone.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct HostedZoneConfig {
    pub comment: Option<String>,
    #[serde(default)]
    pub private_zone: bool,
}

/// Response payload for `GetHostedZone`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct GetHostedZoneResponse {
    pub hosted_zone: HostedZone,
}

// ============ Record sets ============

/// Response payload for `ListResourceRecordSets`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ListResourceRecordSetsResponse {
    #[serde(default)]
    pub resource_record_sets: ResourceRecordSets,
    #[serde(default)]
    pub is_truncated: bool,
    pub next_record_name: Option<String>,
    pub next_record_type: Option<String>,
    pub next_record_identifier: Option<String>,
}

/// `<ResourceRecordSets>` wrapper element.
#[derive(Debug, Default, Deserialize)]
pub struct ResourceRecordSets {
    #[serde(rename = "ResourceRecordSet", default)]
    pub items: Vec<ResourceRecordSet>,
}

/// A single resource record set.
#[derive(Debug, Deserialize)]
pub struct ResourceRecordSet {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Type")]
    pub record_type: String,
    #[serde(rename = "TTL")]
    pub ttl: Option<u64>,
    #[serde(rename = "ResourceRecords")]
    pub resource_records: Option<ResourceRecords>,
    #[serde(rename = "AliasTarget")]
    pub alias_target: Option<XmlAliasTarget>,
    #[serde(rename = "SetIdentifier")]
    pub set_identifier: Option<String>,
}

/// `<ResourceRecords>` wrapper element.
#[derive(Debug, Default, Deserialize)]
pub struct ResourceRecords {
    #[serde(rename = "ResourceRecord", default)]
    pub items: Vec<ResourceRecord>,
}

/// A single record value.
#[derive(Debug, Deserialize)]
pub struct ResourceRecord {
    #[serde(rename = "Value")]
    pub value: String,
}

/// `<AliasTarget>` of an alias record set.
#[derive(Debug, Deserialize)]
pub struct XmlAliasTarget {
    #[serde(rename = "HostedZoneId")]
    pub hosted_zone_id: String,
    #[serde(rename = "DNSName")]
    pub dns_name: String,
    #[serde(rename = "EvaluateTargetHealth", default)]
    pub evaluate_target_health: bool,
}

// ============ Errors ============

/// Error envelope returned with 4xx/5xx responses.
#[derive(Debug, Deserialize)]
pub struct ErrorResponse {
    #[serde(rename = "Error")]
    pub error: ErrorDetail,
}

/// Error details.
#[derive(Debug, Deserialize)]
pub struct ErrorDetail {
    #[serde(rename = "Code")]
    pub code: Option<String>,
    #[serde(rename = "Message")]
    pub message: Option<String>,
}
