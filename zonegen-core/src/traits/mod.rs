//! Storage abstraction for generated files

mod artifact_store;

pub use artifact_store::{ArtifactStore, FsArtifactStore, InMemoryArtifactStore};
