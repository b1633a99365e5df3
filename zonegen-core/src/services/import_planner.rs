//! Import bindings for generated zones and records
//!
//! Every processed zone gets one binding for its hosted zone and one per
//! record set (NS and SOA excluded). Bindings are written as Terraform
//! `import` blocks or rendered as `terraform import` commands.

use std::collections::{HashMap, HashSet};
use std::path::Path;

use crate::services::model_builder::relative_record_name;
use crate::types::{ProcessedZone, Record};
use crate::utils::hcl::quote;
use crate::utils::naming::ModuleNames;

const SEPARATOR: &str = "==================================================";

/// One "bind this declared resource to that existing resource" statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportBinding {
    /// Resource address, with the instance key already HCL-quoted.
    pub to: String,
    /// Provider id, unescaped.
    pub id: String,
    /// Zone name for zone bindings, `"<name> <TYPE>"` key for record bindings.
    pub label: String,
}

/// Bindings of one zone's record sets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordBindings {
    pub zone: String,
    pub bindings: Vec<ImportBinding>,
}

/// Ordered bindings for a run: zones first, then records grouped by zone.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportPlan {
    pub zones: Vec<ImportBinding>,
    pub records: Vec<RecordBindings>,
}

impl ImportPlan {
    pub fn is_empty(&self) -> bool {
        self.zones.is_empty() && self.records.iter().all(|g| g.bindings.is_empty())
    }

    pub fn addresses(&self) -> impl Iterator<Item = &str> {
        self.zones
            .iter()
            .chain(self.records.iter().flat_map(|g| g.bindings.iter()))
            .map(|b| b.to.as_str())
    }

    /// Drops every binding whose address is in `known`.
    fn without(self, known: &HashSet<String>) -> Self {
        Self {
            zones: self
                .zones
                .into_iter()
                .filter(|b| !known.contains(&b.to))
                .collect(),
            records: self
                .records
                .into_iter()
                .map(|group| RecordBindings {
                    zone: group.zone,
                    bindings: group
                        .bindings
                        .into_iter()
                        .filter(|b| !known.contains(&b.to))
                        .collect(),
                })
                .collect(),
        }
    }
}

/// New content for the bindings file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BindingsUpdate {
    pub content: String,
    /// Addresses of the bindings this update adds.
    pub added: Vec<String>,
}

impl BindingsUpdate {
    pub fn is_changed(&self) -> bool {
        !self.added.is_empty()
    }
}

/// Plans and renders import bindings.
#[derive(Debug, Clone)]
pub struct ImportPlanner<'a> {
    parent_module: &'a str,
}

impl<'a> ImportPlanner<'a> {
    pub fn new(parent_module: &'a str) -> Self {
        Self { parent_module }
    }

    /// Builds the bindings for `zones`, taking each zone's records from
    /// `records` (keyed by zone id, missing means none).
    ///
    /// An address is bound at most once per plan.
    pub fn plan(
        &self,
        zones: &[ProcessedZone],
        records: &HashMap<String, Vec<Record>>,
    ) -> ImportPlan {
        let mut seen = HashSet::new();
        let mut plan = ImportPlan::default();

        for zone in zones {
            let names = ModuleNames::new(&zone.name, zone.is_subdomain);
            let binding = ImportBinding {
                to: format!(
                    "module.{}.module.{}.aws_route53_zone.this[{}]",
                    self.parent_module,
                    names.zone_module,
                    quote(&zone.name)
                ),
                id: zone.id.clone(),
                label: zone.name.clone(),
            };
            if seen.insert(binding.to.clone()) {
                plan.zones.push(binding);
            }
        }

        for zone in zones {
            let names = ModuleNames::new(&zone.name, zone.is_subdomain);
            let zone_records = records.get(&zone.id).map(Vec::as_slice).unwrap_or_default();
            let bindings = zone_records
                .iter()
                .filter(|record| !record.record_type.is_provider_managed())
                .map(|record| self.record_binding(zone, &names, record))
                .filter(|binding| seen.insert(binding.to.clone()))
                .collect();
            plan.records.push(RecordBindings {
                zone: zone.name.clone(),
                bindings,
            });
        }

        plan
    }

    fn record_binding(
        &self,
        zone: &ProcessedZone,
        names: &ModuleNames,
        record: &Record,
    ) -> ImportBinding {
        let key = format!(
            "{} {}",
            relative_record_name(&record.owner_name, &zone.name),
            record.record_type
        );
        ImportBinding {
            to: format!(
                "module.{}.module.{}.aws_route53_record.this[{}]",
                self.parent_module,
                names.records_module,
                quote(&key)
            ),
            id: format!(
                "{}_{}_{}",
                zone.id,
                record.owner_name.trim_end_matches('.'),
                record.record_type
            ),
            label: key,
        }
    }

    /// Content of the bindings file after adding `plan`.
    ///
    /// With `force` or without an existing file the plan is written whole.
    /// Otherwise bindings whose address is already bound are dropped and the
    /// rest is appended; nothing new leaves the file unchanged.
    pub fn update_file(&self, existing: Option<&str>, plan: ImportPlan, force: bool) -> BindingsUpdate {
        let existing = existing.filter(|content| !content.trim().is_empty());
        let (existing, plan) = match existing {
            Some(content) if !force => {
                let known = existing_addresses(content);
                (Some(content), plan.without(&known))
            }
            _ => (None, plan),
        };

        let added: Vec<String> = plan.addresses().map(str::to_string).collect();
        let blocks = render_blocks(&plan);
        let content = match existing {
            None => blocks,
            Some(content) if added.is_empty() => content.to_string(),
            Some(content) => format!("{}\n\n{}", content.trim_end(), blocks),
        };
        BindingsUpdate { content, added }
    }

    /// Manual instructions: verification commands, then one
    /// `terraform import` per binding.
    pub fn render_commands(&self, plan: &ImportPlan, root_dir: &Path) -> Vec<String> {
        let root = root_dir.display();
        let mut lines = vec![
            String::new(),
            SEPARATOR.to_string(),
            "Verification Commands:".to_string(),
            SEPARATOR.to_string(),
            String::new(),
            "Before importing, run these commands to see the exact resource addresses:".to_string(),
            String::new(),
            "1. First, run terraform plan to see what resources will be created:".to_string(),
            format!("   cd {root} && terraform plan"),
            String::new(),
            "2. Check the exact resource addresses with:".to_string(),
            "   terraform show -json terraform.plan | jq '.planned_values.root_module'".to_string(),
            String::new(),
            "3. Or list all resources that would be created:".to_string(),
            "   terraform plan -out=plan.out".to_string(),
            "   terraform show -json plan.out | jq -r '.planned_values.root_module.child_modules[].resources[].address'".to_string(),
            String::new(),
            "This will show you the exact resource addresses to use in import commands.".to_string(),
            String::new(),
            SEPARATOR.to_string(),
            "Terraform Import Commands:".to_string(),
            SEPARATOR.to_string(),
            String::new(),
            format!("Run these commands from the '{root}' directory after reviewing the generated files:"),
            String::new(),
            "1. First initialize Terraform:".to_string(),
            "   terraform init".to_string(),
            String::new(),
            "2. Import the zones:".to_string(),
        ];
        lines.extend(plan.zones.iter().map(import_command));

        lines.push(String::new());
        lines.push("3. Import the DNS records:".to_string());
        for group in &plan.records {
            lines.push(String::new());
            lines.push(format!("   # Records for {}", group.zone));
            lines.extend(group.bindings.iter().map(import_command));
        }

        lines.extend(
            [
                "",
                "4. After importing, run terraform plan to see what changes are needed:",
                "   terraform plan",
                "",
                "5. If everything looks good, apply the configuration:",
                "   terraform apply",
                "",
                "Notes:",
                "- Record keys are '{record_name} {record_type}' (empty name for apex records)",
                "- Record import ids are '{zone_id}_{full_record_name}_{record_type}'",
                "- NS and SOA records are skipped as they're managed by AWS",
                "- You may need to escape quotes differently depending on your shell",
                "- Use the verification commands above to check exact resource addresses",
            ]
            .map(str::to_string),
        );
        lines
    }
}

/// Addresses already bound in a bindings file: the right-hand side of every
/// `to = ...` line, surrounding quotes removed.
pub fn existing_addresses(content: &str) -> HashSet<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| line.starts_with("to"))
        .filter_map(|line| line.split_once('='))
        .map(|(_, rhs)| rhs.trim().trim_matches('"').to_string())
        .collect()
}

fn push_import_block(out: &mut Vec<String>, comment: String, binding: &ImportBinding) {
    out.push(comment);
    out.push("import {".to_string());
    out.push(format!("  to = {}", binding.to));
    out.push(format!("  id = {}", quote(&binding.id)));
    out.push("}".to_string());
    out.push(String::new());
}

fn render_blocks(plan: &ImportPlan) -> String {
    let mut lines = Vec::new();
    for binding in &plan.zones {
        push_import_block(&mut lines, "# Import hosted zone".to_string(), binding);
    }
    for group in plan.records.iter().filter(|g| !g.bindings.is_empty()) {
        lines.push(format!("# Records for {}", group.zone));
        for binding in &group.bindings {
            push_import_block(&mut lines, format!("# Import record: {}", binding.label), binding);
        }
    }
    format!("{}\n", lines.join("\n").trim_end())
}

fn import_command(binding: &ImportBinding) -> String {
    // backslashes in record ids must survive the shell
    let id = if binding.id.contains('\\') {
        format!("'{}'", binding.id)
    } else {
        binding.id.clone()
    };
    format!("   terraform import '{}' {id}", binding.to)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::RecordType;

    fn zone(name: &str, id: &str, is_subdomain: bool) -> ProcessedZone {
        ProcessedZone {
            name: name.to_string(),
            id: id.to_string(),
            is_subdomain,
            has_records: true,
        }
    }

    fn a(owner: &str) -> Record {
        Record::with_values(owner, RecordType::A, Some(300), vec!["192.0.2.1".to_string()])
    }

    fn records(entries: Vec<(&str, Vec<Record>)>) -> HashMap<String, Vec<Record>> {
        entries
            .into_iter()
            .map(|(id, records)| (id.to_string(), records))
            .collect()
    }

    #[test]
    fn record_id_uses_full_owner_name() {
        let planner = ImportPlanner::new("zones");
        let plan = planner.plan(
            &[zone("example.com", "Z1", false)],
            &records(vec![("Z1", vec![a("api.example.com")])]),
        );
        let binding = &plan.records[0].bindings[0];
        assert_eq!(binding.id, "Z1_api.example.com_A");
        assert_eq!(
            binding.to,
            r#"module.zones.module.example_com_records.aws_route53_record.this["api A"]"#
        );
    }

    #[test]
    fn zone_bindings_follow_subdomain_naming() {
        let planner = ImportPlanner::new("zones");
        let plan = planner.plan(
            &[
                zone("example.com", "Z1", false),
                zone("dev.example.com", "Z2", true),
            ],
            &HashMap::new(),
        );
        assert_eq!(
            plan.zones[0].to,
            r#"module.zones.module.example_com.aws_route53_zone.this["example.com"]"#
        );
        assert_eq!(
            plan.zones[1].to,
            r#"module.zones.module.dev_example_com_subdomain_zone.aws_route53_zone.this["dev.example.com"]"#
        );
        assert_eq!(plan.zones[1].id, "Z2");
    }

    #[test]
    fn ns_and_soa_are_never_bound() {
        let planner = ImportPlanner::new("zones");
        let delegation = Record::with_values(
            "dev.example.com",
            RecordType::Ns,
            Some(300),
            vec!["ns-1.awsdns-00.com.".to_string()],
        );
        let plan = planner.plan(
            &[zone("example.com", "Z1", false)],
            &records(vec![("Z1", vec![delegation, a("example.com")])]),
        );
        let labels: Vec<&str> = plan.records[0].bindings.iter().map(|b| b.label.as_str()).collect();
        assert_eq!(labels, vec![" A"]);
    }

    #[test]
    fn apex_escape_is_kept_in_id_only() {
        let planner = ImportPlanner::new("zones");
        let plan = planner.plan(
            &[zone("example.com", "Z1", false)],
            &records(vec![("Z1", vec![a("\\100.example.com")])]),
        );
        let binding = &plan.records[0].bindings[0];
        assert_eq!(binding.label, " A");
        assert_eq!(binding.id, "Z1_\\100.example.com_A");

        let content = planner.update_file(None, plan, false).content;
        assert!(content.contains(r#"  id = "Z1_\\100.example.com_A""#));
    }

    #[test]
    fn wildcard_key_is_escaped_in_address() {
        let planner = ImportPlanner::new("zones");
        let plan = planner.plan(
            &[zone("example.com", "Z1", false)],
            &records(vec![("Z1", vec![a("\\052.example.com")])]),
        );
        assert_eq!(
            plan.records[0].bindings[0].to,
            r#"module.zones.module.example_com_records.aws_route53_record.this["\\052 A"]"#
        );
    }

    #[test]
    fn duplicate_addresses_in_one_run_are_bound_once() {
        let planner = ImportPlanner::new("zones");
        let plan = planner.plan(
            &[zone("example.com", "Z1", false)],
            &records(vec![("Z1", vec![a("www.example.com"), a("www.example.com")])]),
        );
        assert_eq!(plan.records[0].bindings.len(), 1);
    }

    #[test]
    fn fresh_file_layout() {
        let planner = ImportPlanner::new("zones");
        let plan = planner.plan(
            &[zone("example.com", "Z1", false)],
            &records(vec![("Z1", vec![a("example.com"), a("www.example.com")])]),
        );
        let update = planner.update_file(None, plan, false);
        let expected = r#"# Import hosted zone
import {
  to = module.zones.module.example_com.aws_route53_zone.this["example.com"]
  id = "Z1"
}

# Records for example.com
# Import record:  A
import {
  to = module.zones.module.example_com_records.aws_route53_record.this[" A"]
  id = "Z1_example.com_A"
}

# Import record: www A
import {
  to = module.zones.module.example_com_records.aws_route53_record.this["www A"]
  id = "Z1_www.example.com_A"
}
"#;
        assert_eq!(update.content, expected);
        assert_eq!(update.added.len(), 3);
    }

    #[test]
    fn zone_bindings_come_before_record_groups() {
        let planner = ImportPlanner::new("zones");
        let plan = planner.plan(
            &[zone("a.com", "Z1", false), zone("b.com", "Z2", false)],
            &records(vec![("Z1", vec![a("www.a.com")]), ("Z2", vec![a("www.b.com")])]),
        );
        let content = planner.update_file(None, plan, false).content;
        let zone_b = content.find(r#"aws_route53_zone.this["b.com"]"#).unwrap();
        let records_a = content.find("# Records for a.com").unwrap();
        let records_b = content.find("# Records for b.com").unwrap();
        assert!(zone_b < records_a);
        assert!(records_a < records_b);
    }

    #[test]
    fn rerun_against_existing_file_adds_nothing() {
        let planner = ImportPlanner::new("zones");
        let zones = [zone("example.com", "Z1", false)];
        let recs = records(vec![("Z1", vec![a("api.example.com")])]);
        let first = planner.update_file(None, planner.plan(&zones, &recs), false);
        let second = planner.update_file(Some(&first.content), planner.plan(&zones, &recs), false);
        assert!(!second.is_changed());
        assert_eq!(second.content, first.content);
    }

    #[test]
    fn new_bindings_are_appended() {
        let planner = ImportPlanner::new("zones");
        let existing = "import {\n  to = module.zones.module.example_com.aws_route53_zone.this[\"example.com\"]\n  id = \"Z1\"\n}\n\n";
        let plan = planner.plan(
            &[zone("example.com", "Z1", false)],
            &records(vec![("Z1", vec![a("api.example.com")])]),
        );
        let update = planner.update_file(Some(existing), plan, false);
        assert_eq!(
            update.added,
            vec![r#"module.zones.module.example_com_records.aws_route53_record.this["api A"]"#]
        );
        assert!(update.content.starts_with(
            "import {\n  to = module.zones.module.example_com.aws_route53_zone.this[\"example.com\"]\n  id = \"Z1\"\n}\n\n# Records for example.com\n"
        ));
        assert_eq!(update.content.matches("# Import hosted zone").count(), 0);
        assert!(update.content.ends_with("}\n"));
    }

    #[test]
    fn force_rewrites_file() {
        let planner = ImportPlanner::new("zones");
        let existing = "# hand written\n";
        let plan = planner.plan(&[zone("example.com", "Z1", false)], &HashMap::new());
        let update = planner.update_file(Some(existing), plan, true);
        assert!(update.content.starts_with("# Import hosted zone\n"));
        assert!(!update.content.contains("hand written"));
    }

    #[test]
    fn parses_existing_addresses() {
        let content = "import {\n  to = module.a.b[\"x\"]\n  id = \"1\"\n}\n# total = 3\ntopic = 1\n";
        let addresses = existing_addresses(content);
        assert!(addresses.contains("module.a.b[\"x\"]"));
        assert!(addresses.contains("1"));
        assert_eq!(addresses.len(), 2);
    }

    #[test]
    fn commands_list_every_binding() {
        let planner = ImportPlanner::new("zones");
        let plan = planner.plan(
            &[zone("example.com", "Z1", false)],
            &records(vec![("Z1", vec![a("api.example.com"), a("\\052.example.com")])]),
        );
        let lines = planner.render_commands(&plan, Path::new("root"));
        assert!(lines.contains(&"   cd root && terraform plan".to_string()));
        assert!(lines.contains(
            &r#"   terraform import 'module.zones.module.example_com.aws_route53_zone.this["example.com"]' Z1"#
                .to_string()
        ));
        assert!(lines.contains(
            &r#"   terraform import 'module.zones.module.example_com_records.aws_route53_record.this["api A"]' Z1_api.example.com_A"#
                .to_string()
        ));
        assert!(lines.contains(
            &r#"   terraform import 'module.zones.module.example_com_records.aws_route53_record.this["\\052 A"]' 'Z1_\052.example.com_A'"#
                .to_string()
        ));
        assert!(lines.contains(&"   # Records for example.com".to_string()));
    }
}
