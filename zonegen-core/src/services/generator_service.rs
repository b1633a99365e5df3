//! Generation session: inventory listing to written Terraform files

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use zonegen_provider::{ProviderError, ZoneInventory};

use crate::config::{GeneratorConfig, ImportMode};
use crate::error::{CoreError, CoreResult};
use crate::services::{AggregateMerger, ArtifactEmitter, DomainModelBuilder, ImportPlanner};
use crate::traits::ArtifactStore;
use crate::types::{
    FileChange, FileChangeKind, ProcessedZone, Record, RunReport, SkipReason, Zone, ZoneOutcome,
    ZoneSelection,
};

/// Generator service
///
/// Processes zones one at a time in listing order, then patches the output
/// aggregates and the import bindings once for the whole batch.
pub struct GeneratorService {
    inventory: Arc<dyn ZoneInventory>,
    store: Arc<dyn ArtifactStore>,
    config: GeneratorConfig,
}

/// State accumulated over one run.
#[derive(Default)]
struct Session {
    report: RunReport,
    processed: Vec<ProcessedZone>,
    /// Managed records per zone id, fetched once.
    records: HashMap<String, Vec<Record>>,
}

impl GeneratorService {
    #[must_use]
    pub fn new(
        inventory: Arc<dyn ZoneInventory>,
        store: Arc<dyn ArtifactStore>,
        config: GeneratorConfig,
    ) -> Self {
        Self {
            inventory,
            store,
            config,
        }
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Checks the inventory is reachable with the configured credentials.
    pub async fn validate_inventory(&self) -> CoreResult<()> {
        if self.inventory.validate_credentials().await? {
            Ok(())
        } else {
            Err(CoreError::Provider(ProviderError::InvalidCredentials {
                provider: self.inventory.id().to_string(),
                raw_message: None,
            }))
        }
    }

    /// Runs one generation pass over `selection`.
    pub async fn run(&self, selection: &ZoneSelection) -> CoreResult<RunReport> {
        let zones = self.inventory.list_zones().await?;
        log::info!("Found {} hosted zone(s)", zones.len());

        let mut session = Session {
            report: RunReport {
                dry_run: self.config.dry_run,
                zones_found: zones.len(),
                ..RunReport::default()
            },
            ..Session::default()
        };

        if zones.is_empty() {
            log::warn!("No hosted zones found");
            return Ok(session.report);
        }

        let selected = select_zones(&zones, selection)?;
        let builder = DomainModelBuilder::new(&zones);

        for zone in selected {
            self.process_zone(&mut session, &builder, zone).await?;
        }

        if session.processed.is_empty() {
            log::info!("No zones processed, outputs and imports left untouched");
        } else {
            self.update_group_outputs(&mut session).await?;
            self.update_root_outputs(&mut session).await?;
            self.update_imports(&mut session).await?;
        }

        log::info!(
            "Processed {} zone(s), skipped {}",
            session.report.processed_count(),
            session.report.skipped_count()
        );
        Ok(session.report)
    }

    async fn process_zone(
        &self,
        session: &mut Session,
        builder: &DomainModelBuilder<'_>,
        zone: &Zone,
    ) -> CoreResult<()> {
        let path = self.config.zone_file(&zone.name);
        let exists = self.store.exists(&path).await?;

        let skip = if exists && !self.config.force {
            Some(SkipReason::FileExists)
        } else if zone.is_private && !self.config.include_private {
            Some(SkipReason::PrivateZone)
        } else {
            None
        };
        if let Some(reason) = skip {
            log::info!("Skipping {}: {reason}", zone.name);
            session.report.outcomes.push(ZoneOutcome::Skipped {
                zone: zone.name.clone(),
                reason,
            });
            return Ok(());
        }

        log::info!("Processing zone {} ({})", zone.name, zone.id);
        let (records, record_error) = match self.inventory.list_records(&zone.id).await {
            Ok(records) => (records, None),
            Err(e) => {
                log::warn!("Failed to list records for {}: {e}", zone.name);
                (Vec::new(), Some(e.to_string()))
            }
        };

        let model = builder.build(zone, records);
        let content = ArtifactEmitter::new(&self.config.modules, &self.config.tags).render(&model);
        let kind = if exists {
            FileChangeKind::Overwritten
        } else {
            FileChangeKind::Created
        };
        self.commit(
            session,
            FileChange {
                path,
                kind,
                content,
                added: vec![zone.name.clone()],
            },
        )
        .await?;

        session.report.outcomes.push(ZoneOutcome::Processed {
            zone: zone.name.clone(),
            record_count: model.records.len(),
            parent: model.parent.as_ref().map(|p| p.name.clone()),
            record_error,
        });
        session.processed.push(ProcessedZone::from(&model));
        session.records.insert(zone.id.clone(), model.records);
        Ok(())
    }

    async fn update_group_outputs(&self, session: &mut Session) -> CoreResult<()> {
        let path = self.config.group_outputs_file();
        let existing = self.store.read(&path).await?;
        let outcome = AggregateMerger::new(&self.config.modules.parent_module)
            .update_group(existing.as_deref(), &session.processed);
        self.commit_update(session, path, existing.is_some(), outcome.content, outcome.added)
            .await
    }

    async fn update_root_outputs(&self, session: &mut Session) -> CoreResult<()> {
        let path = self.config.root_outputs_file();
        let existing = self.store.read(&path).await?;
        let outcome = AggregateMerger::new(&self.config.modules.parent_module)
            .update_root(existing.as_deref(), &session.processed);
        self.commit_update(session, path, existing.is_some(), outcome.content, outcome.added)
            .await
    }

    async fn update_imports(&self, session: &mut Session) -> CoreResult<()> {
        let planner = ImportPlanner::new(&self.config.modules.parent_module);
        let plan = planner.plan(&session.processed, &session.records);

        match self.config.import_mode {
            ImportMode::Commands => {
                session.report.instructions =
                    planner.render_commands(&plan, &self.config.root_dir());
                Ok(())
            }
            ImportMode::Blocks => {
                let path = self.config.imports_file();
                let existing = self.store.read(&path).await?;
                let update = planner.update_file(existing.as_deref(), plan, self.config.force);
                if update.is_changed() && existing.is_some() && self.config.force {
                    let change = FileChange {
                        path,
                        kind: FileChangeKind::Overwritten,
                        content: update.content,
                        added: update.added,
                    };
                    return self.commit(session, change).await;
                }
                self.commit_update(session, path, existing.is_some(), update.content, update.added)
                    .await
            }
        }
    }

    /// Records an additive update, or a no-change notice when nothing was added.
    async fn commit_update(
        &self,
        session: &mut Session,
        path: PathBuf,
        existed: bool,
        content: String,
        added: Vec<String>,
    ) -> CoreResult<()> {
        if added.is_empty() {
            log::info!("{} already up to date, no changes", path.display());
            session.report.unchanged.push(path);
            return Ok(());
        }
        let kind = if existed {
            FileChangeKind::Updated
        } else {
            FileChangeKind::Created
        };
        self.commit(
            session,
            FileChange {
                path,
                kind,
                content,
                added,
            },
        )
        .await
    }

    /// Writes a change (unless dry-run) and adds it to the report.
    async fn commit(&self, session: &mut Session, change: FileChange) -> CoreResult<()> {
        if self.config.dry_run {
            log::info!("[DRY RUN] Would write {}", change.path.display());
        } else {
            self.store.write(&change.path, &change.content).await?;
            log::info!("{:?} {}", change.kind, change.path.display());
        }
        session.report.changes.push(change);
        Ok(())
    }
}

fn select_zones<'a>(zones: &'a [Zone], selection: &ZoneSelection) -> CoreResult<Vec<&'a Zone>> {
    match selection {
        ZoneSelection::All => Ok(zones.iter().collect()),
        ZoneSelection::Single(name) => {
            let wanted = name.trim_end_matches('.');
            zones
                .iter()
                .find(|z| z.name == wanted)
                .map(|z| vec![z])
                .ok_or_else(|| CoreError::ZoneNotFound {
                    name: wanted.to_string(),
                    available: zones.iter().map(|z| z.name.clone()).collect(),
                })
        }
    }
}
