use std::path::Path;

use crate::errors::GenerationError;
use crate::model::GenerationReport;

/// Writes the report as pretty-printed JSON.
pub fn write_report(path: &Path, report: &GenerationReport) -> Result<(), GenerationError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(path, serde_json::to_vec_pretty(report)?)?;
    Ok(())
}
