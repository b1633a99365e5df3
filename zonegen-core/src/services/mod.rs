//! Generation services

mod aggregate;
mod artifact_emitter;
mod generator_service;
mod import_planner;
mod model_builder;

pub use aggregate::{AggregateMerger, COMBINED_OUTPUT, MergeOutcome, OutputsDocument, ROOT_ZONES_OUTPUT};
pub use artifact_emitter::{ArtifactEmitter, DELEGATION_TTL};
pub use generator_service::GeneratorService;
pub use import_planner::{
    BindingsUpdate, ImportBinding, ImportPlan, ImportPlanner, RecordBindings, existing_addresses,
};
pub use model_builder::{DomainModelBuilder, find_parent_zone, is_subdomain_of, relative_record_name};
