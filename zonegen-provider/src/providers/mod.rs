//! Zone inventory implementations

/// Shared utilities used by inventory implementations.
pub mod common;

#[cfg(feature = "route53")]
mod route53;
#[cfg(feature = "snapshot")]
mod snapshot;

#[cfg(feature = "route53")]
pub use route53::{AwsCredentials, Route53Provider, Route53ProviderBuilder};
#[cfg(feature = "snapshot")]
pub use snapshot::SnapshotInventory;
