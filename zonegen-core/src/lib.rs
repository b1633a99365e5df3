//! zonegen core library
//!
//! Turns the hosted zones of a [`ZoneInventory`](zonegen_provider::ZoneInventory)
//! into Terraform configuration:
//! - per-zone files built by the [`ArtifactEmitter`](services::ArtifactEmitter)
//! - the zone-group and root output aggregates, merged additively by the
//!   [`AggregateMerger`](services::AggregateMerger)
//! - import bindings planned by the [`ImportPlanner`](services::ImportPlanner)
//!
//! File access goes through the [`ArtifactStore`] trait so the generator can run
//! against the filesystem or an in-memory store.

pub mod config;
pub mod error;
pub mod services;
pub mod traits;
pub mod types;
pub mod utils;

#[cfg(test)]
mod test_utils;

pub use config::{GeneratorConfig, ImportMode, ModuleSettings, TagSettings};
pub use error::{CoreError, CoreResult};
pub use services::GeneratorService;
pub use traits::{ArtifactStore, FsArtifactStore, InMemoryArtifactStore};
pub use types::{RunReport, ZoneSelection};
