//! Zone model construction: subdomain detection and record-name relativization

use crate::types::{Record, Zone, ZoneModel};

/// Provider escape for an `@` label.
const ESCAPED_APEX: &str = "\\100";

/// Owner name relative to `zone_name`; the apex is `""`.
///
/// An owner outside the zone is returned unchanged. The escaped apex label
/// `\100` is read as `@`, a bare `@` becomes the apex and a trailing `.@`
/// label is dropped. Every place that needs a record's short name goes
/// through this function.
pub fn relative_record_name(owner: &str, zone_name: &str) -> String {
    let mut name = if owner == zone_name {
        String::new()
    } else {
        owner
            .strip_suffix(zone_name)
            .and_then(|prefix| prefix.strip_suffix('.'))
            .unwrap_or(owner)
            .to_string()
    };

    if !name.is_empty() {
        name = name.replace(ESCAPED_APEX, "@");
        if name == "@" {
            name.clear();
        } else if name.ends_with(".@")
            && let Some((head, _)) = name.rsplit_once('.')
        {
            name = head.to_string();
        }
    }
    name
}

/// `zone_name` is a strict descendant of `parent_name`.
pub fn is_subdomain_of(zone_name: &str, parent_name: &str) -> bool {
    zone_name != parent_name
        && zone_name
            .strip_suffix(parent_name)
            .is_some_and(|prefix| prefix.ends_with('.'))
}

/// First zone in listing order that `zone_name` is a subdomain of.
///
/// With several ancestors listed (`example.com` and `sub.example.com` for
/// `a.sub.example.com`) the earlier one wins, not the nearest.
pub fn find_parent_zone<'a>(zone_name: &str, zones: &'a [Zone]) -> Option<&'a Zone> {
    zones.iter().find(|z| is_subdomain_of(zone_name, &z.name))
}

/// Builds [`ZoneModel`]s against the full zone listing.
pub struct DomainModelBuilder<'a> {
    zones: &'a [Zone],
}

impl<'a> DomainModelBuilder<'a> {
    pub fn new(zones: &'a [Zone]) -> Self {
        Self { zones }
    }

    /// Pairs `zone` with its managed records and parent zone.
    pub fn build(&self, zone: &Zone, records: Vec<Record>) -> ZoneModel {
        let records = records
            .into_iter()
            .filter(|r| !r.is_apex_managed(&zone.name))
            .collect();
        let parent = find_parent_zone(&zone.name, self.zones).cloned();
        if let Some(p) = &parent {
            log::debug!("{} detected as subdomain of {}", zone.name, p.name);
        }
        ZoneModel {
            zone: zone.clone(),
            records,
            parent,
        }
    }
}
