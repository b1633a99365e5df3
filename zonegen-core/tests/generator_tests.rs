//! End-to-end generation against a temporary directory and a snapshot inventory.

use std::path::Path;
use std::sync::Arc;

use zonegen_core::types::FileChangeKind;
use zonegen_core::{
    CoreError, FsArtifactStore, GeneratorConfig, GeneratorService, ImportMode, RunReport,
    ZoneSelection,
};
use zonegen_provider::SnapshotInventory;

const SNAPSHOT: &str = r#"{
  "HostedZones": [
    { "Id": "/hostedzone/Z1", "Name": "example.com.",
      "Config": { "Comment": "", "PrivateZone": false } },
    { "Id": "/hostedzone/Z2", "Name": "dev.example.com.",
      "Config": { "Comment": "Development", "PrivateZone": false } },
    { "Id": "/hostedzone/Z3", "Name": "corp.internal.",
      "Config": { "PrivateZone": true } }
  ],
  "ResourceRecordSets": {
    "Z1": [
      { "Name": "example.com.", "Type": "NS", "TTL": 172800,
        "ResourceRecords": [{ "Value": "ns-1.awsdns-00.com." }] },
      { "Name": "example.com.", "Type": "SOA", "TTL": 900,
        "ResourceRecords": [{ "Value": "ns-1.awsdns-00.com. hostmaster 1 7200 900 1209600 86400" }] },
      { "Name": "example.com.", "Type": "A", "TTL": 300,
        "ResourceRecords": [{ "Value": "192.0.2.1" }] },
      { "Name": "www.example.com.", "Type": "A", "TTL": 300,
        "ResourceRecords": [{ "Value": "192.0.2.2" }] },
      { "Name": "api.example.com.", "Type": "A", "TTL": 60,
        "ResourceRecords": [{ "Value": "192.0.2.3" }] },
      { "Name": "dev.example.com.", "Type": "NS", "TTL": 300,
        "ResourceRecords": [{ "Value": "ns-2.awsdns-01.net." }] }
    ],
    "Z2": [
      { "Name": "app.dev.example.com.", "Type": "CNAME", "TTL": 300,
        "ResourceRecords": [{ "Value": "example.com" }] }
    ]
  }
}"#;

fn config(root: &Path, import_mode: ImportMode) -> GeneratorConfig {
    GeneratorConfig {
        zones_dir: root.join("zones"),
        import_mode,
        ..GeneratorConfig::default()
    }
}

async fn run(config: GeneratorConfig, selection: &ZoneSelection) -> Result<RunReport, CoreError> {
    let inventory = SnapshotInventory::from_json(SNAPSHOT).unwrap();
    GeneratorService::new(Arc::new(inventory), Arc::new(FsArtifactStore::new()), config)
        .run(selection)
        .await
}

fn read(path: &Path) -> String {
    std::fs::read_to_string(path).unwrap()
}

#[tokio::test]
async fn single_zone_run_creates_zone_file_and_aggregates() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    let report = run(
        config(root, ImportMode::Commands),
        &ZoneSelection::Single("example.com".to_string()),
    )
    .await
    .unwrap();

    assert_eq!(report.processed_count(), 1);
    let zone_file = read(&root.join("zones/example.com.tf"));
    assert_eq!(zone_file.matches("module \"example_com\" {").count(), 1);
    assert_eq!(zone_file.matches("module \"example_com_records\" {").count(), 1);
    assert!(zone_file.contains("      name = \"\"\n"));
    assert!(zone_file.contains("      name = \"www\"\n"));
    assert!(zone_file.contains("      name = \"dev\"\n      type = \"NS\"\n"));
    assert!(!zone_file.contains("SOA"));

    let group = read(&root.join("zones/outputs.tf"));
    assert_eq!(group.matches("output \"example_com\" {").count(), 1);
    assert_eq!(group.matches("output \"all_zones\" {").count(), 1);

    let root_outputs = read(&root.join("outputs.tf"));
    assert!(root_outputs.starts_with("output \"zones\" {\n"));
    assert!(root_outputs.contains("output \"example_com_details\" {"));

    assert!(!root.join("imports.tf").exists());
    assert!(report.instructions.iter().any(|line| line
        == "   terraform import 'module.zones.module.example_com_records.aws_route53_record.this[\"api A\"]' Z1_api.example.com_A"));
}

#[tokio::test]
async fn rerun_only_rewrites_forced_zone_file() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    let selection = ZoneSelection::Single("example.com".to_string());
    run(config(root, ImportMode::Blocks), &selection).await.unwrap();

    let group_before = read(&root.join("zones/outputs.tf"));
    let root_before = read(&root.join("outputs.tf"));
    let imports_before = read(&root.join("imports.tf"));

    let mut forced = config(root, ImportMode::Blocks);
    forced.force = true;
    let report = run(forced, &selection).await.unwrap();

    assert_eq!(report.changes.len(), 2);
    assert_eq!(report.changes[0].kind, FileChangeKind::Overwritten);
    assert_eq!(report.unchanged.len(), 2);
    assert_eq!(read(&root.join("zones/outputs.tf")), group_before);
    assert_eq!(read(&root.join("outputs.tf")), root_before);
    // force rewrites the bindings file from scratch with the same content
    assert_eq!(read(&root.join("imports.tf")), imports_before);

    let unforced = run(config(root, ImportMode::Blocks), &selection).await.unwrap();
    assert!(unforced.changes.is_empty());
    assert_eq!(unforced.skipped_count(), 1);
}

#[tokio::test]
async fn all_zones_run_delegates_subdomain_and_skips_private() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    let report = run(config(root, ImportMode::Blocks), &ZoneSelection::All)
        .await
        .unwrap();

    assert_eq!(report.processed_count(), 2);
    assert_eq!(report.skipped_count(), 1);
    assert!(!root.join("zones/corp.internal.tf").exists());

    let dev = read(&root.join("zones/dev.example.com.tf"));
    assert!(dev.contains("module \"dev_example_com_delegation_set\" {"));
    assert!(dev.contains("module \"dev_example_com_subdomain_zone\" {"));
    assert!(dev.contains("  zone_name = \"example.com\"\n\n  records = [\n    {\n      name = \"dev\"\n      type = \"NS\"\n      ttl  = 300\n"));
    assert!(dev.contains("      comment = \"Development\"\n"));

    let group = read(&root.join("zones/outputs.tf"));
    assert!(group.contains("    dev_example_com = {\n"));
    assert!(group.contains("module.dev_example_com_subdomain_zone.route53_zone_zone_id[\"dev.example.com\"]"));

    let imports = read(&root.join("imports.tf"));
    assert!(imports.contains(
        "  to = module.zones.module.dev_example_com_subdomain_zone.aws_route53_zone.this[\"dev.example.com\"]\n  id = \"Z2\"\n"
    ));
    assert!(imports.contains("  id = \"Z1_api.example.com_A\"\n"));
    assert!(imports.contains("  id = \"Z2_app.dev.example.com_CNAME\"\n"));
    assert!(!imports.contains("_NS\""));
    let zones_end = imports.find("# Records for").unwrap();
    assert!(imports[..zones_end].contains("this[\"dev.example.com\"]"));
}

#[tokio::test]
async fn bindings_are_appended_once() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    run(
        config(root, ImportMode::Blocks),
        &ZoneSelection::Single("example.com".to_string()),
    )
    .await
    .unwrap();

    let report = run(config(root, ImportMode::Blocks), &ZoneSelection::All)
        .await
        .unwrap();
    let imports_change = report
        .change_for(&root.join("imports.tf"))
        .expect("bindings for dev.example.com should be added");
    assert_eq!(imports_change.kind, FileChangeKind::Updated);
    assert!(imports_change.added.iter().all(|a| a.contains("dev_example_com")));

    let imports = read(&root.join("imports.tf"));
    assert_eq!(imports.matches("id = \"Z1_api.example.com_A\"").count(), 1);
    assert_eq!(imports.matches("id = \"Z2\"").count(), 1);

    let group = read(&root.join("zones/outputs.tf"));
    assert_eq!(group.matches("output \"example_com\" {").count(), 1);
    assert_eq!(group.matches("    example_com = {").count(), 1);
    assert_eq!(group.matches("    dev_example_com = {").count(), 1);
}

#[tokio::test]
async fn dry_run_leaves_directory_empty() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    let mut dry = config(root, ImportMode::Blocks);
    dry.dry_run = true;

    let report = run(dry, &ZoneSelection::All).await.unwrap();
    assert!(report.dry_run);
    assert_eq!(report.changes.len(), 5);
    assert!(std::fs::read_dir(root).unwrap().next().is_none());
}

#[tokio::test]
async fn unknown_zone_is_reported_with_available_names() {
    let dir = tempfile::tempdir().unwrap();
    let result = run(
        config(dir.path(), ImportMode::Commands),
        &ZoneSelection::Single("missing.org".to_string()),
    )
    .await;
    match result {
        Err(CoreError::ZoneNotFound { available, .. }) => {
            assert_eq!(available, vec!["example.com", "dev.example.com", "corp.internal"]);
        }
        other => panic!("expected ZoneNotFound, got {other:?}"),
    }
}
