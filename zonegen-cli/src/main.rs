//! zonegen - Terraform configuration for existing Route 53 hosted zones

mod logging;
mod report;

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{ArgAction, ArgGroup, Parser};
use zonegen_core::{
    CoreError, FsArtifactStore, GeneratorConfig, GeneratorService, ImportMode, ZoneSelection,
};
use zonegen_provider::{AwsCredentials, InventorySource, create_inventory};

#[derive(Parser, Debug)]
#[command(name = "zonegen", version)]
#[command(about = "Generate Terraform configuration files for Route53 zones")]
#[command(group(ArgGroup::new("selection").required(true).args(["domain", "all_domains"])))]
#[command(after_help = "\
EXAMPLES:
  zonegen --domain example.com                 # Process a single domain
  zonegen --all-domains                        # Process all domains
  zonegen --all-domains --dry-run              # Show what would be created
  zonegen --domain example.com --force         # Overwrite existing files
  zonegen --all-domains --zones-dir ./custom   # Custom zones directory
  zonegen --all-domains --snapshot zones.json  # Work from an exported snapshot

AWS credentials are read from AWS_ACCESS_KEY_ID, AWS_SECRET_ACCESS_KEY and
AWS_SESSION_TOKEN unless --snapshot is given.")]
struct Cli {
    /// Process a specific domain (e.g., example.com)
    #[arg(long, value_name = "DOMAIN")]
    domain: Option<String>,

    /// Process all domains in the AWS account
    #[arg(long)]
    all_domains: bool,

    /// Directory where zone files will be created (default: root/zones)
    #[arg(long, value_name = "DIR")]
    zones_dir: Option<PathBuf>,

    /// Directory holding the root outputs.tf and imports.tf (default: parent of the zones directory)
    #[arg(long, value_name = "DIR")]
    root_dir: Option<PathBuf>,

    /// TOML configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Read zones from a JSON snapshot instead of the Route53 API
    #[arg(long, value_name = "FILE")]
    snapshot: Option<PathBuf>,

    /// Show what would be created without making changes
    #[arg(long)]
    dry_run: bool,

    /// Force overwrite existing zone files
    #[arg(long)]
    force: bool,

    /// Generate Terraform import blocks (writes imports.tf) instead of printing commands
    #[arg(long)]
    import_blocks: bool,

    /// Process private (VPC) zones too
    #[arg(long)]
    include_private: bool,

    /// Retries for throttled or failed API requests
    #[arg(long, value_name = "N", default_value_t = 3)]
    max_retries: u32,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn selection(&self) -> ZoneSelection {
        match &self.domain {
            Some(domain) => ZoneSelection::Single(domain.clone()),
            None => ZoneSelection::All,
        }
    }

    /// Config file (or defaults) with command-line overrides applied.
    fn generator_config(&self) -> Result<GeneratorConfig> {
        let mut config = match &self.config {
            Some(path) => GeneratorConfig::load(path)?,
            None => GeneratorConfig::default(),
        };
        if let Some(dir) = &self.zones_dir {
            config.zones_dir.clone_from(dir);
        }
        if let Some(dir) = &self.root_dir {
            config.root_dir = Some(dir.clone());
        }
        config.dry_run |= self.dry_run;
        config.force |= self.force;
        config.include_private |= self.include_private;
        if self.import_blocks {
            config.import_mode = ImportMode::Blocks;
        }
        config.validate()?;
        Ok(config)
    }

    fn inventory_source(&self) -> Result<InventorySource> {
        if let Some(path) = &self.snapshot {
            return Ok(InventorySource::Snapshot { path: path.clone() });
        }
        let credentials = AwsCredentials::from_env().context(
            "AWS credentials not found: set AWS_ACCESS_KEY_ID and AWS_SECRET_ACCESS_KEY, or use --snapshot",
        )?;
        Ok(InventorySource::Route53 {
            credentials,
            max_retries: self.max_retries,
        })
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    match run(&cli).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: &Cli) -> Result<ExitCode> {
    let config = cli.generator_config()?;
    tracing::debug!("Configuration: {config:?}");

    let source = cli.inventory_source()?;
    let label = match &source {
        InventorySource::Snapshot { path } => format!("snapshot {}", path.display()),
        InventorySource::Route53 { .. } => "AWS Route53".to_string(),
    };
    let inventory = create_inventory(source)?;
    let service = GeneratorService::new(inventory, Arc::new(FsArtifactStore::new()), config);

    println!("Fetching hosted zones from {label}...");
    service
        .validate_inventory()
        .await
        .context("Cannot access the zone inventory")?;

    match service.run(&cli.selection()).await {
        Ok(report) => {
            for line in report::render(&report, service.config()) {
                println!("{line}");
            }
            Ok(ExitCode::SUCCESS)
        }
        Err(CoreError::ZoneNotFound { name, available }) => {
            eprintln!("Error: Zone '{name}' not found in Route53");
            eprintln!("Available zones:");
            for zone in available {
                eprintln!("  - {zone}");
            }
            Ok(ExitCode::FAILURE)
        }
        Err(e) => Err(e.into()),
    }
}
