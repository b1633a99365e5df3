use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

// ============ Zone Types ============

/// A hosted zone as listed by the inventory.
///
/// Identity is [`id`](Self::id). The name is fully qualified without the
/// trailing dot (`"example.com"`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Zone {
    /// Provider zone id with any `/hostedzone/` prefix removed (e.g. `"Z0123456789ABC"`).
    pub id: String,
    /// Zone name (e.g. `"example.com"`).
    pub name: String,
    /// Whether the zone is private (VPC-associated).
    pub is_private: bool,
    /// Free-form comment attached to the zone; empty when unset.
    pub comment: String,
    /// Number of record sets the provider reports for the zone.
    pub record_count: u64,
}

impl Zone {
    /// Builds a public zone with no comment, mostly useful in tests and snapshots.
    pub fn public(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            is_private: false,
            comment: String::new(),
            record_count: 0,
        }
    }
}

// ============ DNS Record Types ============

/// DNS record type of a record set.
///
/// Serialized as the uppercase mnemonic (`"A"`, `"AAAA"`, `"TXT"`, ...). Types the
/// enum does not know about are kept verbatim in [`Other`](Self::Other).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RecordType {
    /// IPv4 address record.
    A,
    /// IPv6 address record.
    Aaaa,
    /// Certificate Authority Authorization record.
    Caa,
    /// Canonical name record.
    Cname,
    /// Delegation signer record.
    Ds,
    /// HTTPS service binding record.
    Https,
    /// Mail exchange record.
    Mx,
    /// Naming authority pointer record.
    Naptr,
    /// Name server record.
    Ns,
    /// Reverse pointer record.
    Ptr,
    /// Start of authority record.
    Soa,
    /// Sender policy framework record (legacy type).
    Spf,
    /// Service locator record.
    Srv,
    /// SSH fingerprint record.
    Sshfp,
    /// Service binding record.
    Svcb,
    /// TLS association record.
    Tlsa,
    /// Text record.
    Txt,
    /// Any other record type, stored uppercase.
    Other(String),
}

impl RecordType {
    /// Uppercase mnemonic used by the provider API and in generated identifiers.
    pub fn as_str(&self) -> &str {
        match self {
            Self::A => "A",
            Self::Aaaa => "AAAA",
            Self::Caa => "CAA",
            Self::Cname => "CNAME",
            Self::Ds => "DS",
            Self::Https => "HTTPS",
            Self::Mx => "MX",
            Self::Naptr => "NAPTR",
            Self::Ns => "NS",
            Self::Ptr => "PTR",
            Self::Soa => "SOA",
            Self::Spf => "SPF",
            Self::Srv => "SRV",
            Self::Sshfp => "SSHFP",
            Self::Svcb => "SVCB",
            Self::Tlsa => "TLSA",
            Self::Txt => "TXT",
            Self::Other(other) => other,
        }
    }

    /// NS and SOA record sets are owned by the provider at the zone apex.
    pub fn is_provider_managed(&self) -> bool {
        matches!(self, Self::Ns | Self::Soa)
    }
}

impl FromStr for RecordType {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.to_uppercase().as_str() {
            "A" => Self::A,
            "AAAA" => Self::Aaaa,
            "CAA" => Self::Caa,
            "CNAME" => Self::Cname,
            "DS" => Self::Ds,
            "HTTPS" => Self::Https,
            "MX" => Self::Mx,
            "NAPTR" => Self::Naptr,
            "NS" => Self::Ns,
            "PTR" => Self::Ptr,
            "SOA" => Self::Soa,
            "SPF" => Self::Spf,
            "SRV" => Self::Srv,
            "SSHFP" => Self::Sshfp,
            "SVCB" => Self::Svcb,
            "TLSA" => Self::Tlsa,
            "TXT" => Self::Txt,
            other => Self::Other(other.to_string()),
        })
    }
}

impl From<&str> for RecordType {
    fn from(value: &str) -> Self {
        match value.parse() {
            Ok(record_type) => record_type,
            Err(never) => match never {},
        }
    }
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for RecordType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for RecordType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Self::from(raw.as_str()))
    }
}

/// Target of an alias record: another provider-managed resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AliasTarget {
    /// DNS name of the target, without trailing dot.
    pub target_name: String,
    /// Hosted zone id of the target resource.
    pub target_zone_id: String,
    /// Whether the provider evaluates the target's health.
    pub evaluate_target_health: bool,
}

/// A resource record set within a zone.
///
/// Exactly one of [`values`](Self::values) (non-empty) or [`alias`](Self::alias)
/// is populated. Alias records never carry a TTL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    /// Fully qualified owner name, without trailing dot.
    pub owner_name: String,
    /// Record type.
    #[serde(rename = "type")]
    pub record_type: RecordType,
    /// Time to live in seconds; absent for alias records.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ttl: Option<u64>,
    /// Record values in provider order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub values: Vec<String>,
    /// Alias target, for alias records.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alias: Option<AliasTarget>,
}

impl Record {
    /// Builds a value record.
    pub fn with_values(
        owner_name: impl Into<String>,
        record_type: RecordType,
        ttl: Option<u64>,
        values: Vec<String>,
    ) -> Self {
        Self {
            owner_name: owner_name.into(),
            record_type,
            ttl,
            values,
            alias: None,
        }
    }

    /// Builds an alias record; the TTL is always absent.
    pub fn with_alias(
        owner_name: impl Into<String>,
        record_type: RecordType,
        alias: AliasTarget,
    ) -> Self {
        Self {
            owner_name: owner_name.into(),
            record_type,
            ttl: None,
            values: Vec::new(),
            alias: Some(alias),
        }
    }

    /// Whether this is the provider-managed NS or SOA set at the apex of `zone_name`.
    pub fn is_apex_managed(&self, zone_name: &str) -> bool {
        self.record_type.is_provider_managed()
            && self.owner_name.trim_end_matches('.') == zone_name.trim_end_matches('.')
    }
}
