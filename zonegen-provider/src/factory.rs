//! Inventory factory.

use std::path::PathBuf;
use std::sync::Arc;

use crate::error::Result;
use crate::traits::ZoneInventory;

#[cfg(feature = "route53")]
use crate::providers::{AwsCredentials, Route53Provider};
#[cfg(feature = "snapshot")]
use crate::providers::SnapshotInventory;

/// Where the zone inventory comes from.
#[derive(Debug, Clone)]
pub enum InventorySource {
    /// Live Route 53 API.
    #[cfg(feature = "route53")]
    Route53 {
        /// Signing credentials.
        credentials: AwsCredentials,
        /// Retries for transient failures.
        max_retries: u32,
    },
    /// JSON snapshot on disk.
    #[cfg(feature = "snapshot")]
    Snapshot {
        /// Path of the snapshot document.
        path: PathBuf,
    },
}

/// Creates a [`ZoneInventory`] for the given source.
///
/// # Examples
///
/// ```rust,no_run
/// use zonegen_provider::{create_inventory, InventorySource};
///
/// let inventory = create_inventory(InventorySource::Snapshot {
///     path: "zones.json".into(),
/// }).unwrap();
/// ```
pub fn create_inventory(source: InventorySource) -> Result<Arc<dyn ZoneInventory>> {
    match source {
        #[cfg(feature = "route53")]
        InventorySource::Route53 {
            credentials,
            max_retries,
        } => Ok(Arc::new(
            Route53Provider::builder(credentials)
                .max_retries(max_retries)
                .build(),
        )),
        #[cfg(feature = "snapshot")]
        InventorySource::Snapshot { path } => Ok(Arc::new(SnapshotInventory::new(path))),
    }
}
