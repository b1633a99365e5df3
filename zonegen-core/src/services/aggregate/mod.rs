//! Additive merging of the output aggregates
//!
//! Two documents accumulate zones across runs:
//! - the group aggregate (`<zones_dir>/outputs.tf`) with one output per zone
//!   plus the combined `all_zones` output mapping every zone
//! - the root aggregate (`<root_dir>/outputs.tf`) with one `<zone>_details`
//!   output per zone referencing the group module
//!
//! Existing content is never removed or reordered. New outputs and map
//! entries are only added when missing, so merging the same zones twice is a
//! no-op.

mod document;

use std::collections::HashSet;

use crate::types::ProcessedZone;
use crate::utils::hcl::quote;
use crate::utils::naming::ModuleNames;

pub use document::OutputsDocument;

/// Name of the combined output in the group aggregate.
pub const COMBINED_OUTPUT: &str = "all_zones";

/// Name of the bootstrap output in the root aggregate.
pub const ROOT_ZONES_OUTPUT: &str = "zones";

/// Result of one aggregate update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeOutcome {
    /// Full document after the merge (the input, unchanged, when nothing was added).
    pub content: String,
    /// Zone names that gained an output or a combined-map entry.
    pub added: Vec<String>,
}

impl MergeOutcome {
    fn unchanged(content: &str) -> Self {
        Self {
            content: content.to_string(),
            added: Vec::new(),
        }
    }

    pub fn is_changed(&self) -> bool {
        !self.added.is_empty()
    }
}

/// Patches the group and root output aggregates.
#[derive(Debug, Clone)]
pub struct AggregateMerger<'a> {
    parent_module: &'a str,
}

impl<'a> AggregateMerger<'a> {
    /// `parent_module` is the root module instance wrapping the zones directory.
    pub fn new(parent_module: &'a str) -> Self {
        Self { parent_module }
    }

    /// Adds the missing zone outputs and combined-map entries to the group aggregate.
    pub fn update_group(&self, existing: Option<&str>, zones: &[ProcessedZone]) -> MergeOutcome {
        let zones = unique_zones(zones);
        let existing = existing.unwrap_or_default();

        if existing.trim().is_empty() {
            if zones.is_empty() {
                return MergeOutcome::unchanged(existing);
            }
            return MergeOutcome {
                content: fresh_group_document(&zones),
                added: zones.iter().map(|(zone, _)| zone.name.clone()).collect(),
            };
        }

        let mut doc = OutputsDocument::parse(existing);
        let missing_outputs: Vec<&(&ProcessedZone, ModuleNames)> = zones
            .iter()
            .filter(|(_, names)| !doc.contains_output(&names.base))
            .collect();

        if !doc.contains_output(COMBINED_OUTPUT) {
            if missing_outputs.is_empty() {
                return MergeOutcome::unchanged(existing);
            }
            log::warn!(
                "Output \"{COMBINED_OUTPUT}\" not found in group aggregate, appending a new one"
            );
            let appended: Vec<(&ProcessedZone, ModuleNames)> = missing_outputs
                .iter()
                .map(|(zone, names)| (*zone, names.clone()))
                .collect();
            return MergeOutcome {
                content: format!(
                    "{}\n\n{}",
                    existing.trim_end(),
                    fresh_group_document(&appended)
                ),
                added: appended.iter().map(|(zone, _)| zone.name.clone()).collect(),
            };
        }

        let missing_entries: Vec<&(&ProcessedZone, ModuleNames)> =
            match doc.map_keys(COMBINED_OUTPUT) {
                Some(keys) => zones
                    .iter()
                    .filter(|(_, names)| !keys.contains(&names.base))
                    .collect(),
                None => {
                    log::warn!(
                        "Cannot read the \"{COMBINED_OUTPUT}\" map in group aggregate, leaving it untouched"
                    );
                    Vec::new()
                }
            };

        if missing_outputs.is_empty() && missing_entries.is_empty() {
            return MergeOutcome::unchanged(existing);
        }

        let blocks: Vec<String> = missing_outputs
            .iter()
            .map(|(zone, names)| zone_output_block(zone, names))
            .collect();
        doc.insert_before(COMBINED_OUTPUT, &blocks);

        let fragments: Vec<String> = missing_entries
            .iter()
            .map(|(zone, names)| combined_fragment(zone, names))
            .collect();
        if !fragments.is_empty() && !doc.insert_into_map(COMBINED_OUTPUT, &fragments) {
            log::warn!("Failed to extend the \"{COMBINED_OUTPUT}\" map in group aggregate");
        }

        let added_names: HashSet<&str> = missing_outputs
            .iter()
            .chain(missing_entries.iter())
            .map(|(zone, _)| zone.name.as_str())
            .collect();
        MergeOutcome {
            content: doc.render(),
            added: zones
                .iter()
                .filter(|(zone, _)| added_names.contains(zone.name.as_str()))
                .map(|(zone, _)| zone.name.clone())
                .collect(),
        }
    }

    /// Adds the missing `<zone>_details` references to the root aggregate,
    /// bootstrapping the document when it does not exist yet.
    pub fn update_root(&self, existing: Option<&str>, zones: &[ProcessedZone]) -> MergeOutcome {
        let zones = unique_zones(zones);
        let bootstrapped = existing.is_none_or(|content| content.trim().is_empty());
        let base = if bootstrapped {
            self.root_bootstrap()
        } else {
            existing.unwrap_or_default().to_string()
        };

        let mut doc = OutputsDocument::parse(&base);
        let missing: Vec<&(&ProcessedZone, ModuleNames)> = zones
            .iter()
            .filter(|(_, names)| !doc.contains_output(&names.root_output()))
            .collect();

        if missing.is_empty() {
            return MergeOutcome::unchanged(existing.unwrap_or_default());
        }

        let blocks: Vec<String> = missing
            .iter()
            .map(|(zone, names)| self.root_reference_block(zone, names))
            .collect();
        doc.append(&blocks);

        MergeOutcome {
            content: doc.render(),
            added: missing.iter().map(|(zone, _)| zone.name.clone()).collect(),
        }
    }

    fn root_bootstrap(&self) -> String {
        format!(
            "output \"{ROOT_ZONES_OUTPUT}\" {{\n  description = \"All Route53 zone information\"\n  value = module.{}.{COMBINED_OUTPUT}\n}}\n",
            self.parent_module
        )
    }

    fn root_reference_block(&self, zone: &ProcessedZone, names: &ModuleNames) -> String {
        format!(
            "output \"{}\" {{\n  description = {}\n  value = module.{}.{}\n}}",
            names.root_output(),
            quote(&format!("Details for {}", zone.name)),
            self.parent_module,
            names.base
        )
    }
}

/// Zones paired with their names, first occurrence of each output name kept.
fn unique_zones(zones: &[ProcessedZone]) -> Vec<(&ProcessedZone, ModuleNames)> {
    let mut seen = HashSet::new();
    zones
        .iter()
        .map(|zone| (zone, ModuleNames::new(&zone.name, zone.is_subdomain)))
        .filter(|(_, names)| seen.insert(names.base.clone()))
        .collect()
}

/// The per-zone values, shared by the named output and the combined fragment.
fn zone_value_lines(zone: &ProcessedZone, names: &ModuleNames, indent: &str) -> String {
    let key = quote(&zone.name);
    let records = if zone.has_records {
        format!("module.{}.route53_record_name", names.records_module)
    } else {
        "{}".to_string()
    };
    format!(
        "{indent}zone_id      = module.{zm}.route53_zone_zone_id[{key}]\n\
         {indent}name_servers = module.{zm}.route53_zone_name_servers[{key}]\n\
         {indent}records      = {records}\n",
        zm = names.zone_module,
    )
}

fn zone_output_block(zone: &ProcessedZone, names: &ModuleNames) -> String {
    format!(
        "# Output {name} details\noutput \"{output}\" {{\n  description = {description}\n  value = {{\n{values}  }}\n}}",
        name = zone.name,
        output = names.base,
        description = quote(&format!("Details for {}", zone.name)),
        values = zone_value_lines(zone, names, "    "),
    )
}

fn combined_fragment(zone: &ProcessedZone, names: &ModuleNames) -> String {
    format!(
        "    {} = {{\n{}    }}",
        names.base,
        zone_value_lines(zone, names, "      ")
    )
}

fn fresh_group_document(zones: &[(&ProcessedZone, ModuleNames)]) -> String {
    let mut content = String::new();
    for (zone, names) in zones {
        content.push_str(&zone_output_block(zone, names));
        content.push_str("\n\n");
    }
    content.push_str("# Combined output of all zones\n");
    content.push_str(&format!("output \"{COMBINED_OUTPUT}\" {{\n"));
    content.push_str("  description = \"Combined information for all zones\"\n");
    content.push_str("  value = {\n");
    for (zone, names) in zones {
        content.push_str(&combined_fragment(zone, names));
        content.push('\n');
    }
    content.push_str("  }\n}\n");
    content
}

#[cfg(test)]
mod tests {
    use super::*;

    fn zone(name: &str, is_subdomain: bool, has_records: bool) -> ProcessedZone {
        ProcessedZone {
            name: name.to_string(),
            id: format!("Z{}", name.len()),
            is_subdomain,
            has_records,
        }
    }

    const EXAMPLE_COM_GROUP: &str = r#"# Output example.com details
output "example_com" {
  description = "Details for example.com"
  value = {
    zone_id      = module.example_com.route53_zone_zone_id["example.com"]
    name_servers = module.example_com.route53_zone_name_servers["example.com"]
    records      = module.example_com_records.route53_record_name
  }
}

# Combined output of all zones
output "all_zones" {
  description = "Combined information for all zones"
  value = {
    example_com = {
      zone_id      = module.example_com.route53_zone_zone_id["example.com"]
      name_servers = module.example_com.route53_zone_name_servers["example.com"]
      records      = module.example_com_records.route53_record_name
    }
  }
}
"#;

    #[test]
    fn fresh_group_document_layout() {
        let merger = AggregateMerger::new("zones");
        let outcome = merger.update_group(None, &[zone("example.com", false, true)]);
        assert_eq!(outcome.content, EXAMPLE_COM_GROUP);
        assert_eq!(outcome.added, vec!["example.com"]);
    }

    #[test]
    fn whitespace_only_group_is_treated_as_absent() {
        let merger = AggregateMerger::new("zones");
        let outcome = merger.update_group(Some("\n  \n"), &[zone("example.com", false, true)]);
        assert_eq!(outcome.content, EXAMPLE_COM_GROUP);
    }

    #[test]
    fn group_merge_is_idempotent() {
        let merger = AggregateMerger::new("zones");
        let outcome = merger.update_group(Some(EXAMPLE_COM_GROUP), &[zone("example.com", false, true)]);
        assert!(!outcome.is_changed());
        assert_eq!(outcome.content, EXAMPLE_COM_GROUP);
    }

    #[test]
    fn adding_a_zone_matches_fresh_generation() {
        let merger = AggregateMerger::new("zones");
        let zones = [
            zone("example.com", false, true),
            zone("example.org", false, false),
        ];
        let merged = merger.update_group(Some(EXAMPLE_COM_GROUP), &zones);
        let fresh = merger.update_group(None, &zones);
        assert_eq!(merged.content, fresh.content);
        assert_eq!(merged.added, vec!["example.org"]);
        assert!(merged.content.contains("    records      = {}\n"));
    }

    #[test]
    fn subdomain_outputs_reference_subdomain_modules() {
        let merger = AggregateMerger::new("zones");
        let outcome = merger.update_group(None, &[zone("dev.example.com", true, true)]);
        assert!(outcome.content.contains(
            r#"zone_id      = module.dev_example_com_subdomain_zone.route53_zone_zone_id["dev.example.com"]"#
        ));
        assert!(outcome.content.contains(
            "records      = module.dev_example_com_subdomain_zone_records.route53_record_name"
        ));
    }

    #[test]
    fn unrelated_content_is_preserved() {
        let existing = format!(
            "output \"custom\" {{\n  value = \"keep me\"\n}}\n\n{EXAMPLE_COM_GROUP}"
        );
        let merger = AggregateMerger::new("zones");
        let outcome = merger.update_group(
            Some(&existing),
            &[zone("example.com", false, true), zone("b.io", false, true)],
        );
        assert!(outcome.content.starts_with("output \"custom\" {\n  value = \"keep me\"\n}\n\n"));
        assert!(outcome.content.contains("output \"b_io\" {"));
        assert!(outcome.content.contains("    b_io = {\n"));
    }

    #[test]
    fn missing_fragment_is_added_without_duplicating_output() {
        // named output present, combined entry missing
        let existing = EXAMPLE_COM_GROUP.replace(
            "    example_com = {\n      zone_id      = module.example_com.route53_zone_zone_id[\"example.com\"]\n      name_servers = module.example_com.route53_zone_name_servers[\"example.com\"]\n      records      = module.example_com_records.route53_record_name\n    }\n",
            "",
        );
        let merger = AggregateMerger::new("zones");
        let outcome = merger.update_group(Some(&existing), &[zone("example.com", false, true)]);
        assert_eq!(outcome.content, EXAMPLE_COM_GROUP);
        assert_eq!(outcome.content.matches("output \"example_com\"").count(), 1);
    }

    #[test]
    fn missing_combined_output_falls_back_to_append() {
        let existing = "output \"legacy\" {\n  value = 1\n}\n";
        let merger = AggregateMerger::new("zones");
        let outcome = merger.update_group(Some(existing), &[zone("example.com", false, true)]);
        assert_eq!(
            outcome.content,
            format!("output \"legacy\" {{\n  value = 1\n}}\n\n{EXAMPLE_COM_GROUP}")
        );
    }

    #[test]
    fn unreadable_combined_map_only_gets_named_outputs() {
        let existing = "output \"all_zones\" {\n  value = merge(local.a, local.b)\n}\n";
        let merger = AggregateMerger::new("zones");
        let outcome = merger.update_group(Some(existing), &[zone("example.com", false, true)]);
        assert!(outcome.content.starts_with("# Output example.com details\n"));
        assert!(outcome.content.ends_with(existing));
    }

    #[test]
    fn zones_with_same_output_name_are_deduplicated() {
        let merger = AggregateMerger::new("zones");
        let outcome = merger.update_group(
            None,
            &[zone("a-b.com", false, true), zone("a.b.com", false, true)],
        );
        assert_eq!(outcome.content.matches("output \"a_b_com\"").count(), 1);
        assert_eq!(outcome.added, vec!["a-b.com"]);
    }

    #[test]
    fn fresh_root_document_has_bootstrap() {
        let merger = AggregateMerger::new("zones");
        let outcome = merger.update_root(None, &[zone("example.com", false, true)]);
        assert_eq!(
            outcome.content,
            "output \"zones\" {\n  description = \"All Route53 zone information\"\n  value = module.zones.all_zones\n}\n\n\
             output \"example_com_details\" {\n  description = \"Details for example.com\"\n  value = module.zones.example_com\n}\n"
        );
    }

    #[test]
    fn root_uses_configured_parent_module() {
        let merger = AggregateMerger::new("dns");
        let outcome = merger.update_root(None, &[zone("example.com", false, true)]);
        assert!(outcome.content.contains("value = module.dns.all_zones"));
        assert!(outcome.content.contains("value = module.dns.example_com"));
    }

    #[test]
    fn root_merge_is_idempotent() {
        let merger = AggregateMerger::new("zones");
        let zones = [zone("example.com", false, true)];
        let first = merger.update_root(None, &zones);
        let second = merger.update_root(Some(&first.content), &zones);
        assert!(!second.is_changed());
        assert_eq!(second.content, first.content);
    }

    #[test]
    fn root_appends_after_existing_content() {
        let existing = "output \"zones\" {\n  value = module.zones.all_zones\n}\n\n\n";
        let merger = AggregateMerger::new("zones");
        let outcome = merger.update_root(Some(existing), &[zone("b.io", false, false)]);
        assert_eq!(
            outcome.content,
            "output \"zones\" {\n  value = module.zones.all_zones\n}\n\n\
             output \"b_io_details\" {\n  description = \"Details for b.io\"\n  value = module.zones.b_io\n}\n"
        );
        assert_eq!(outcome.added, vec!["b.io"]);
    }
}
