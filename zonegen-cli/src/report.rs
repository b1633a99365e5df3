//! Console rendering of a generation run

use std::path::{Path, PathBuf};

use zonegen_core::types::{FileChange, FileChangeKind, ZoneOutcome};
use zonegen_core::{GeneratorConfig, ImportMode, RunReport};

const RULE: &str = "==================================================";
const FILE_PREVIEW_LINES: usize = 20;
const AGGREGATE_PREVIEW_LINES: usize = 15;

/// Report lines, in the order they should be printed.
pub fn render(report: &RunReport, config: &GeneratorConfig) -> Vec<String> {
    let mut lines = vec![format!("Found {} hosted zone(s)", report.zones_found)];
    if report.zones_found == 0 {
        lines.push("No hosted zones found in the inventory".to_string());
        return lines;
    }

    let aggregates = [config.group_outputs_file(), config.root_outputs_file()];
    let imports = config.imports_file();

    for outcome in &report.outcomes {
        push_outcome(&mut lines, outcome);
        if let ZoneOutcome::Processed { zone, .. } = outcome
            && let Some(change) = report.change_for(&config.zone_file(zone))
        {
            push_change(&mut lines, report.dry_run, change, FILE_PREVIEW_LINES);
        }
    }

    if report.processed_count() > 0 {
        lines.push(String::new());
        lines.push(RULE.to_string());
        lines.push("Updating outputs files...".to_string());
        for path in &aggregates {
            if let Some(change) = report.change_for(path) {
                push_change(&mut lines, report.dry_run, change, AGGREGATE_PREVIEW_LINES);
            }
        }
    }
    for path in &report.unchanged {
        lines.push(format!("ℹ {} already exists, no changes", path.display()));
    }

    lines.push(String::new());
    lines.push(RULE.to_string());
    lines.push("Summary:".to_string());
    lines.push(format!("  Processed: {} zone(s)", report.processed_count()));
    lines.push(format!("  Skipped:   {} zone(s)", report.skipped_count()));

    if let Some(change) = report.change_for(&imports) {
        lines.push(String::new());
        push_change(&mut lines, report.dry_run, change, FILE_PREVIEW_LINES);
    }

    if report.processed_count() > 0 && !report.dry_run {
        push_next_steps(&mut lines, config, &aggregates);
        match config.import_mode {
            ImportMode::Blocks => {
                lines.push(String::new());
                lines.push("Tip: Run 'terraform plan' to validate imports, then 'terraform apply'.".to_string());
            }
            ImportMode::Commands => lines.extend(report.instructions.iter().cloned()),
        }
    }
    lines
}

fn push_outcome(lines: &mut Vec<String>, outcome: &ZoneOutcome) {
    match outcome {
        ZoneOutcome::Skipped { zone, reason } => {
            lines.push(format!("⊘ Skipping {zone} - {reason}"));
        }
        ZoneOutcome::Processed {
            zone,
            record_count,
            parent,
            record_error,
        } => {
            lines.push(format!("→ Processing zone: {zone}"));
            if let Some(error) = record_error {
                lines.push(format!("  ⚠ Could not list records: {error}"));
            }
            lines.push(format!("  Found {record_count} records"));
            if let Some(parent) = parent {
                lines.push(format!("  Detected as subdomain of {parent}"));
            }
        }
    }
}

fn push_change(lines: &mut Vec<String>, dry_run: bool, change: &FileChange, preview_lines: usize) {
    let path = change.path.display();
    if dry_run {
        let verb = match change.kind {
            FileChangeKind::Created => "create",
            FileChangeKind::Overwritten => "overwrite",
            FileChangeKind::Updated => "update",
        };
        lines.push(format!("[DRY RUN] Would {verb} file: {path}"));
        push_added(lines, change);
        lines.push(format!("[DRY RUN] Content preview (first {preview_lines} lines):"));
        push_preview(lines, &change.content, preview_lines);
        return;
    }

    match change.kind {
        FileChangeKind::Created => lines.push(format!("✓ Created: {path}")),
        FileChangeKind::Overwritten => lines.push(format!("⚠ Overwrote: {path}")),
        FileChangeKind::Updated => lines.push(format!("✓ Updated: {path}")),
    }
    push_added(lines, change);
}

/// Added entries, except for a zone file whose only entry is its own zone.
fn push_added(lines: &mut Vec<String>, change: &FileChange) {
    if change.path.extension().is_some_and(|e| e == "tf")
        && change.added.len() == 1
        && file_stem_is(&change.path, &change.added[0])
    {
        return;
    }
    lines.extend(change.added.iter().map(|entry| format!("  + {entry}")));
}

fn file_stem_is(path: &Path, name: &str) -> bool {
    path.file_stem().is_some_and(|stem| stem == name)
}

fn push_preview(lines: &mut Vec<String>, content: &str, limit: usize) {
    let all: Vec<&str> = content.lines().collect();
    lines.extend(all.iter().take(limit).map(|line| format!("  {line}")));
    if all.len() > limit {
        lines.push(format!("  ... ({} more lines)", all.len() - limit));
    }
}

fn push_next_steps(lines: &mut Vec<String>, config: &GeneratorConfig, aggregates: &[PathBuf]) {
    lines.push(String::new());
    lines.push("Next steps:".to_string());
    lines.push(format!(
        "1. Review the generated Terraform files in: {}",
        config.zones_dir.display()
    ));
    lines.push("2. Review the updated outputs in:".to_string());
    for path in aggregates {
        lines.push(format!("   - {}", path.display()));
    }
    lines.push("3. Run 'terraform plan' to review changes".to_string());
    lines.push("4. Import existing zones using the commands below".to_string());
}
