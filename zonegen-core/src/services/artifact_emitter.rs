//! Per-zone Terraform document rendering

use crate::config::{ModuleSettings, TagSettings};
use crate::services::model_builder::relative_record_name;
use crate::types::{Record, RecordType, ZoneModel};
use crate::utils::hcl::{escape, quote, strip_outer_quotes};
use crate::utils::naming::ModuleNames;

/// TTL of the NS records delegating a subdomain zone from its parent.
pub const DELEGATION_TTL: u64 = 300;

/// Renders a [`ZoneModel`] as a Terraform document built on the Route 53
/// module collection (`zones`, `records`, `delegation-sets`).
pub struct ArtifactEmitter<'a> {
    modules: &'a ModuleSettings,
    tags: &'a TagSettings,
}

impl<'a> ArtifactEmitter<'a> {
    pub fn new(modules: &'a ModuleSettings, tags: &'a TagSettings) -> Self {
        Self { modules, tags }
    }

    /// Full document text, ending with a single newline.
    pub fn render(&self, model: &ZoneModel) -> String {
        let mut lines = self.emit(model);
        while lines.last().is_some_and(String::is_empty) {
            lines.pop();
        }
        let mut content = lines.join("\n");
        content.push('\n');
        content
    }

    /// Document lines in emission order: header, delegation set, zone,
    /// records, parent delegation records.
    pub fn emit(&self, model: &ZoneModel) -> Vec<String> {
        let names = ModuleNames::new(&model.zone.name, model.is_subdomain());
        let mut lines = Vec::new();

        self.push_header(&mut lines, model);
        if model.is_subdomain() {
            self.push_delegation_set(&mut lines, model, &names);
        }
        self.push_zone(&mut lines, model, &names);
        if !model.records.is_empty() {
            self.push_records(&mut lines, model, &names);
        }
        if let Some(parent) = &model.parent {
            self.push_delegation_records(&mut lines, model, &parent.name, &names);
        }
        lines
    }

    fn push_header(&self, lines: &mut Vec<String>, model: &ZoneModel) {
        lines.push(format!("# Terraform configuration for {}", model.zone.name));
        lines.push("# Generated automatically - review before applying".to_string());
        lines.push(String::new());
    }

    fn push_module_header(&self, lines: &mut Vec<String>, name: &str, submodule: &str) {
        lines.push(format!("module \"{name}\" {{"));
        lines.push(format!("  source  = {}", quote(&self.modules.submodule(submodule))));
        lines.push(format!("  version = {}", quote(&self.modules.version)));
        lines.push(String::new());
    }

    fn push_delegation_set(&self, lines: &mut Vec<String>, model: &ZoneModel, names: &ModuleNames) {
        lines.push("# Create delegation set for subdomain".to_string());
        self.push_module_header(lines, &names.delegation_set_module, "delegation-sets");
        lines.push("  delegation_sets = {".to_string());
        lines.push(format!("    \"{}\" = {{", names.delegation_set_key));
        lines.push(format!("      reference_name = {}", quote(&model.zone.name)));
        lines.push("    }".to_string());
        lines.push("  }".to_string());
        lines.push("}".to_string());
        lines.push(String::new());
    }

    fn push_zone(&self, lines: &mut Vec<String>, model: &ZoneModel, names: &ModuleNames) {
        let zone_name = &model.zone.name;
        let comment = if model.zone.comment.is_empty() {
            format!("{zone_name} managed by Terraform")
        } else {
            model.zone.comment.clone()
        };

        if model.is_subdomain() {
            lines.push("# Create the subdomain zone".to_string());
        } else {
            lines.push("# Create the zone".to_string());
        }
        self.push_module_header(lines, &names.zone_module, "zones");
        lines.push("  zones = {".to_string());
        lines.push(format!("    {} = {{", quote(zone_name)));
        lines.push(format!("      comment = {}", quote(&comment)));
        if model.is_subdomain() {
            lines.push(format!(
                "      delegation_set_id = module.{}.route53_delegation_set_id[\"{}\"]",
                names.delegation_set_module, names.delegation_set_key
            ));
        }
        lines.push("      tags = merge(".to_string());
        lines.push(format!("        {},", self.tags.common_tags));
        lines.push("        {".to_string());
        lines.push(format!("          Environment = {}", self.tags.environment));
        lines.push(format!("          Zone        = {}", quote(zone_name)));
        lines.push("        }".to_string());
        lines.push("      )".to_string());
        lines.push("    }".to_string());
        lines.push("  }".to_string());
        if model.is_subdomain() {
            lines.push(String::new());
            lines.push(format!(
                "  depends_on = [module.{}]",
                names.delegation_set_module
            ));
        }
        lines.push("}".to_string());
        lines.push(String::new());
    }

    fn push_records(&self, lines: &mut Vec<String>, model: &ZoneModel, names: &ModuleNames) {
        lines.push("# Create zone records".to_string());
        self.push_module_header(lines, &names.records_module, "records");
        lines.push(format!("  zone_name = {}", quote(&model.zone.name)));
        lines.push(String::new());
        lines.push("  records = [".to_string());
        for record in &model.records {
            push_record_entry(lines, record, &model.zone.name);
        }
        lines.push("  ]".to_string());
        lines.push(String::new());
        lines.push("}".to_string());
        lines.push(String::new());
    }

    fn push_delegation_records(
        &self,
        lines: &mut Vec<String>,
        model: &ZoneModel,
        parent_name: &str,
        names: &ModuleNames,
    ) {
        let prefix = relative_record_name(&model.zone.name, parent_name);

        lines.push("# Add NS records to the parent zone for delegation".to_string());
        self.push_module_header(lines, &names.delegation_records_module, "records");
        lines.push(format!("  zone_name = {}", quote(parent_name)));
        lines.push(String::new());
        lines.push("  records = [".to_string());
        lines.push("    {".to_string());
        lines.push(format!("      name = {}", quote(&prefix)));
        lines.push("      type = \"NS\"".to_string());
        lines.push(format!("      ttl  = {DELEGATION_TTL}"));
        lines.push(format!(
            "      records = module.{}.route53_zone_name_servers[{}]",
            names.zone_module,
            quote(&model.zone.name)
        ));
        lines.push("    }".to_string());
        lines.push("  ]".to_string());
        lines.push(String::new());
        lines.push("}".to_string());
    }
}

/// One entry of a records module's `records` list.
fn push_record_entry(lines: &mut Vec<String>, record: &Record, zone_name: &str) {
    let name = relative_record_name(&record.owner_name, zone_name);

    lines.push("    {".to_string());
    lines.push(format!("      name = {}", quote(&name)));
    lines.push(format!("      type = {}", quote(record.record_type.as_str())));

    if let Some(alias) = &record.alias {
        lines.push("      alias = {".to_string());
        lines.push(format!("        name    = {}", quote(&alias.target_name)));
        lines.push(format!("        zone_id = {}", quote(&alias.target_zone_id)));
        lines.push(format!(
            "        evaluate_target_health = {}",
            alias.evaluate_target_health
        ));
        lines.push("      }".to_string());
    } else {
        if let Some(ttl) = record.ttl.filter(|t| *t > 0) {
            lines.push(format!("      ttl  = {ttl}"));
        }

        let values: Vec<String> = record
            .values
            .iter()
            .map(|v| format_value(&record.record_type, v))
            .collect();
        match values.as_slice() {
            [] => {}
            [single] => lines.push(format!("      records = [{single}]")),
            many => {
                lines.push("      records = [".to_string());
                for value in many {
                    lines.push(format!("        {value},"));
                }
                lines.push("      ]".to_string());
            }
        }
    }

    lines.push("    },".to_string());
}

/// A record value as an HCL string literal.
///
/// TXT payloads lose one layer of surrounding quotes first, so the provider
/// receives the underlying text.
fn format_value(record_type: &RecordType, value: &str) -> String {
    let raw = if *record_type == RecordType::Txt {
        strip_outer_quotes(value)
    } else {
        value
    };
    format!("\"{}\"", escape(raw))
}
