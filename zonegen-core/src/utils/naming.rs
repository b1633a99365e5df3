//! Module and output names derived from a zone name

use super::hcl::sanitize_identifier;

/// Names of every Terraform block generated for one zone.
///
/// Subdomain zones use a `_subdomain_zone` infix so the delegation set and the
/// parent's NS records can refer to them unambiguously.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleNames {
    /// Sanitized zone name; also the group output name and combined-map key.
    pub base: String,
    pub zone_module: String,
    pub records_module: String,
    pub delegation_set_module: String,
    /// Key inside the delegation set module's `delegation_sets` map.
    pub delegation_set_key: String,
    pub delegation_records_module: String,
}

impl ModuleNames {
    pub fn new(zone_name: &str, is_subdomain: bool) -> Self {
        let base = sanitize_identifier(zone_name);
        let zone_module = if is_subdomain {
            format!("{base}_subdomain_zone")
        } else {
            base.clone()
        };
        Self {
            records_module: format!("{zone_module}_records"),
            delegation_set_module: format!("{base}_delegation_set"),
            delegation_set_key: format!("{base}_set"),
            delegation_records_module: format!("{base}_delegation_records"),
            zone_module,
            base,
        }
    }

    /// Root-level output name referencing this zone's group output.
    pub fn root_output(&self) -> String {
        format!("{}_details", self.base)
    }
}
