//! # zonegen-provider
//!
//! Hosted-zone inventory for the zonegen Terraform generator: lists hosted
//! zones and their record sets and normalizes them into [`Zone`] and
//! [`Record`] values.
//!
//! ## Inventories
//!
//! | Inventory | Feature Flag | Source |
//! |-----------|-------------|--------|
//! | [`Route53Provider`] | `route53` | Amazon Route 53 API, AWS Signature V4 |
//! | [`SnapshotInventory`] | `snapshot` | JSON document in AWS CLI format |
//!
//! ### TLS Backend
//!
//! - **`rustls`** *(default)*: Use rustls.
//! - **`native-tls`**: Use the platform's native TLS implementation.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use zonegen_provider::{create_inventory, AwsCredentials, InventorySource};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let credentials = AwsCredentials::from_env().ok_or("AWS credentials not set")?;
//!     let inventory = create_inventory(InventorySource::Route53 {
//!         credentials,
//!         max_retries: 3,
//!     })?;
//!
//!     for zone in inventory.list_zones().await? {
//!         let records = inventory.list_records(&zone.id).await?;
//!         println!("{} ({} records)", zone.name, records.len());
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! All operations return [`Result<T, ProviderError>`](ProviderError).
//! Transient errors (`NetworkError`, `Timeout`, `RateLimited`) are retried
//! automatically with exponential backoff.

mod error;
mod factory;
mod http_client;
mod providers;
mod traits;
mod types;
mod utils;

pub use error::{ProviderError, Result};

pub use factory::{InventorySource, create_inventory};

pub use traits::ZoneInventory;

pub use types::{AliasTarget, Record, RecordType, Zone};

#[cfg(feature = "route53")]
pub use providers::{AwsCredentials, Route53Provider, Route53ProviderBuilder};

#[cfg(feature = "snapshot")]
pub use providers::SnapshotInventory;
