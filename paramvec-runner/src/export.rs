//! Export: strategy metadata as JSON, resolved vectors as JSON or CSV.

use std::path::Path;

use anyhow::{Context, Result};

use crate::registry::StrategyRegistry;
use crate::runner::ResolvedStrategy;

// ─── JSON export ────────────────────────────────────────────────────

/// Metadata of every registered strategy as pretty JSON.
pub fn export_strategies(registry: &StrategyRegistry) -> Result<String> {
    let metadata = registry
        .metadata()
        .context("failed to build strategy metadata")?;
    serde_json::to_string_pretty(&metadata).context("failed to serialize strategy metadata to JSON")
}

/// Resolved vectors as pretty JSON.
pub fn export_vectors_json(resolved: &ResolvedStrategy) -> Result<String> {
    serde_json::to_string_pretty(resolved)
        .with_context(|| format!("failed to serialize vectors of '{}' to JSON", resolved.name))
}

// ─── CSV export ─────────────────────────────────────────────────────

/// Resolved vectors as CSV. The header is the argument names; cells are the
/// values' display forms.
pub fn export_vectors_csv(resolved: &ResolvedStrategy) -> Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);
    wtr.write_record(&resolved.arg_names)?;
    for vector in &resolved.vectors {
        wtr.write_record(vector.iter().map(|v| v.to_string()))?;
    }
    let data = wtr.into_inner().context("failed to flush CSV writer")?;
    String::from_utf8(data).context("CSV output is not valid UTF-8")
}

// ─── Files ──────────────────────────────────────────────────────────

/// Write an export to `path`, creating parent directories.
pub fn write_export(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create directory: {}", parent.display()))?;
    }
    std::fs::write(path, content).with_context(|| format!("failed to write {}", path.display()))
}
