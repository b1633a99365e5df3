//! Generator configuration
//!
//! Every component receives its settings from a [`GeneratorConfig`] value at
//! construction. The value can be deserialized from TOML; every field has a
//! default so a config file only needs to name what it changes.
//!
//! ```toml
//! zones_dir = "infra/root/zones"
//! import_mode = "blocks"
//!
//! [modules]
//! version = "~> 5.1"
//!
//! [tags]
//! common_tags = "local.tags"
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::utils::hcl::is_identifier;

/// How import bindings are delivered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImportMode {
    /// Write `import {}` blocks to `<root_dir>/imports.tf`.
    Blocks,
    /// Print `terraform import` commands for the operator.
    #[default]
    Commands,
}

/// Terraform module coordinates used in generated configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModuleSettings {
    /// Registry source of the Route 53 module collection; submodules are
    /// addressed as `{source}//modules/{name}`.
    pub source: String,
    /// Version constraint for every module block.
    pub version: String,
    /// Name of the root-level module that instantiates the zones directory.
    pub parent_module: String,
}

impl Default for ModuleSettings {
    fn default() -> Self {
        Self {
            source: "terraform-aws-modules/route53/aws".to_string(),
            version: "~> 5.0".to_string(),
            parent_module: "zones".to_string(),
        }
    }
}

impl ModuleSettings {
    /// `source` of a submodule, e.g. `terraform-aws-modules/route53/aws//modules/zones`.
    pub fn submodule(&self, name: &str) -> String {
        format!("{}//modules/{name}", self.source)
    }
}

/// Expressions merged into every zone's tags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TagSettings {
    /// Map expression merged first.
    pub common_tags: String,
    /// Expression assigned to the `Environment` tag.
    pub environment: String,
}

impl Default for TagSettings {
    fn default() -> Self {
        Self {
            common_tags: "var.common_tags".to_string(),
            environment: "var.environment".to_string(),
        }
    }
}

/// Generator configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Directory receiving one `.tf` file per zone plus the group `outputs.tf`.
    pub zones_dir: PathBuf,
    /// Directory holding the root `outputs.tf` and `imports.tf`.
    /// Defaults to the parent of `zones_dir`.
    pub root_dir: Option<PathBuf>,
    /// Compute everything, write nothing.
    pub dry_run: bool,
    /// Regenerate zone files that already exist and rewrite `imports.tf` from scratch.
    pub force: bool,
    pub import_mode: ImportMode,
    /// Process private (VPC) zones instead of skipping them.
    pub include_private: bool,
    pub modules: ModuleSettings,
    pub tags: TagSettings,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            zones_dir: PathBuf::from("root").join("zones"),
            root_dir: None,
            dry_run: false,
            force: false,
            import_mode: ImportMode::default(),
            include_private: false,
            modules: ModuleSettings::default(),
            tags: TagSettings::default(),
        }
    }
}

impl GeneratorConfig {
    /// Parses a TOML document.
    pub fn from_toml_str(content: &str) -> CoreResult<Self> {
        toml::from_str(content).map_err(|e| CoreError::ConfigError(e.to_string()))
    }

    /// Reads and parses a TOML config file.
    pub fn load(path: &Path) -> CoreResult<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| CoreError::ConfigError(format!("{}: {e}", path.display())))?;
        Self::from_toml_str(&content)
    }

    /// Checks values the generated HCL depends on.
    pub fn validate(&self) -> CoreResult<()> {
        if self.zones_dir.as_os_str().is_empty() {
            return Err(CoreError::ValidationError(
                "zones_dir must not be empty".to_string(),
            ));
        }
        if self.modules.source.trim().is_empty() {
            return Err(CoreError::ValidationError(
                "modules.source must not be empty".to_string(),
            ));
        }
        if self.modules.version.trim().is_empty() {
            return Err(CoreError::ValidationError(
                "modules.version must not be empty".to_string(),
            ));
        }
        if !is_identifier(&self.modules.parent_module) {
            return Err(CoreError::ValidationError(format!(
                "modules.parent_module '{}' is not a valid Terraform identifier",
                self.modules.parent_module
            )));
        }
        Ok(())
    }

    /// Effective root directory.
    pub fn root_dir(&self) -> PathBuf {
        if let Some(dir) = &self.root_dir {
            return dir.clone();
        }
        match self.zones_dir.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        }
    }

    /// `<zones_dir>/<zone>.tf`
    pub fn zone_file(&self, zone_name: &str) -> PathBuf {
        self.zones_dir.join(format!("{zone_name}.tf"))
    }

    /// `<zones_dir>/outputs.tf`
    pub fn group_outputs_file(&self) -> PathBuf {
        self.zones_dir.join("outputs.tf")
    }

    /// `<root_dir>/outputs.tf`
    pub fn root_outputs_file(&self) -> PathBuf {
        self.root_dir().join("outputs.tf")
    }

    /// `<root_dir>/imports.tf`
    pub fn imports_file(&self) -> PathBuf {
        self.root_dir().join("imports.tf")
    }
}
