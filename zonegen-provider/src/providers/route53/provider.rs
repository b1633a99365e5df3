//! Route 53 `ZoneInventory` implementation

use async_trait::async_trait;

use crate::error::{ProviderError, Result};
use crate::providers::common::{normalize_domain_name, normalize_zone_id};
use crate::traits::{ErrorContext, ZoneInventory};
use crate::types::{AliasTarget, Record, RecordType, Zone};

use super::types::{
    GetHostedZoneResponse, HostedZone, ListHostedZonesResponse, ListResourceRecordSetsResponse,
    ResourceRecordSet,
};
use super::{API_VERSION, MAX_RECORDS_PER_PAGE, MAX_ZONES_PER_PAGE, Route53Provider};

impl Route53Provider {
    pub(crate) fn convert_zone(zone: HostedZone) -> Zone {
        let (comment, is_private) = zone
            .config
            .map(|c| (c.comment.unwrap_or_default(), c.private_zone))
            .unwrap_or_default();
        Zone {
            id: normalize_zone_id(&zone.id),
            name: normalize_domain_name(&zone.name),
            is_private,
            comment,
            record_count: zone.resource_record_set_count.unwrap_or(0),
        }
    }

    pub(crate) fn convert_record_set(set: ResourceRecordSet) -> Record {
        // Owner names stay in the provider's escaped form (`\052`, `\100`)
        let owner = normalize_domain_name(&set.name);
        let record_type = RecordType::from(set.record_type.as_str());

        if let Some(alias) = set.alias_target {
            return Record::with_alias(
                owner,
                record_type,
                AliasTarget {
                    target_name: normalize_domain_name(&alias.dns_name),
                    target_zone_id: alias.hosted_zone_id,
                    evaluate_target_health: alias.evaluate_target_health,
                },
            );
        }

        let values = set
            .resource_records
            .map(|r| r.items.into_iter().map(|v| v.value).collect())
            .unwrap_or_default();
        Record::with_values(owner, record_type, set.ttl, values)
    }
}

#[async_trait]
impl ZoneInventory for Route53Provider {
    fn id(&self) -> &'static str {
        "route53"
    }

    async fn validate_credentials(&self) -> Result<bool> {
        let path = format!("/{API_VERSION}/hostedzone");
        match self
            .get::<ListHostedZonesResponse>(
                &path,
                &[("maxitems", "1".to_string())],
                ErrorContext::default(),
            )
            .await
        {
            Ok(_) => Ok(true),
            Err(ProviderError::InvalidCredentials { .. }) => Ok(false),
            Err(e) => {
                log::warn!("Credential validation failed: {e}");
                Err(e)
            }
        }
    }

    async fn list_zones(&self) -> Result<Vec<Zone>> {
        let path = format!("/{API_VERSION}/hostedzone");
        let mut zones = Vec::new();
        let mut marker: Option<String> = None;

        loop {
            let mut params = vec![("maxitems", MAX_ZONES_PER_PAGE.to_string())];
            if let Some(m) = &marker {
                params.push(("marker", m.clone()));
            }

            let page: ListHostedZonesResponse = self
                .get(&path, &params, ErrorContext::default())
                .await?;

            zones.extend(page.hosted_zones.items.into_iter().map(Self::convert_zone));

            match (page.is_truncated, page.next_marker) {
                (true, Some(next)) => marker = Some(next),
                _ => break,
            }
        }

        log::debug!("[route53] Listed {} hosted zones", zones.len());
        Ok(zones)
    }

    async fn get_zone(&self, zone_id: &str) -> Result<Zone> {
        let zone_id = normalize_zone_id(zone_id);
        let path = format!("/{API_VERSION}/hostedzone/{zone_id}");
        let ctx = ErrorContext {
            zone: Some(zone_id.clone()),
            ..Default::default()
        };
        let response: GetHostedZoneResponse = self.get(&path, &[], ctx).await?;
        Ok(Self::convert_zone(response.hosted_zone))
    }

    async fn list_records(&self, zone_id: &str) -> Result<Vec<Record>> {
        let zone = self.get_zone(zone_id).await?;
        let path = format!("/{API_VERSION}/hostedzone/{}/rrset", zone.id);
        let ctx = ErrorContext {
            zone: Some(zone.id.clone()),
            ..Default::default()
        };

        let mut records = Vec::new();
        let mut start: Option<(String, Option<String>, Option<String>)> = None;

        loop {
            let mut params = vec![("maxitems", MAX_RECORDS_PER_PAGE.to_string())];
            if let Some((name, record_type, identifier)) = &start {
                params.push(("name", name.clone()));
                if let Some(t) = record_type {
                    params.push(("type", t.clone()));
                }
                if let Some(id) = identifier {
                    params.push(("identifier", id.clone()));
                }
            }

            let page: ListResourceRecordSetsResponse =
                self.get(&path, &params, ctx.clone()).await?;

            records.extend(
                page.resource_record_sets
                    .items
                    .into_iter()
                    .map(Self::convert_record_set)
                    .filter(|r| !r.is_apex_managed(&zone.name)),
            );

            match (page.is_truncated, page.next_record_name) {
                (true, Some(name)) => {
                    start = Some((name, page.next_record_type, page.next_record_identifier));
                }
                _ => break,
            }
        }

        log::debug!(
            "[route53] Listed {} record sets for {}",
            records.len(),
            zone.name
        );
        Ok(records)
    }
}
