use super::domain::RevaluationPlanEntry;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PlanWriteError {
    #[error("failed to write revaluation plan to {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to serialize revaluation plan: {0}")]
    Json(#[from] serde_json::Error),
}

/// Serializes the plan as a pretty-printed JSON array.
pub fn render_plan(entries: &[RevaluationPlanEntry]) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(entries)
}

/// Writes the whole plan in one go, creating the parent directory first.
pub fn write_plan<P: AsRef<Path>>(
    path: P,
    entries: &[RevaluationPlanEntry],
) -> Result<(), PlanWriteError> {
    let path = path.as_ref();
    let io_error = |source: std::io::Error| PlanWriteError::Io {
        path: path.to_path_buf(),
        source,
    };

    let rendered = render_plan(entries)?;
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(io_error)?;
    }

    let mut file = fs::File::create(path).map_err(io_error)?;
    file.write_all(rendered.as_bytes()).map_err(io_error)?;
    file.flush().map_err(io_error)
}
