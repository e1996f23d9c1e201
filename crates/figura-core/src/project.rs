//! Project export and import as a JSON array of shape records.

use crate::shapes::Shape;
use std::path::Path;
use thiserror::Error;

/// Project file errors.
#[derive(Debug, Error)]
pub enum ProjectError {
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Serialize shapes (in layer order) to pretty-printed JSON.
pub fn export_project(shapes: &[Shape]) -> Result<String, ProjectError> {
    Ok(serde_json::to_string_pretty(shapes)?)
}

/// Parse a project produced by [`export_project`].
pub fn import_project(json: &str) -> Result<Vec<Shape>, ProjectError> {
    Ok(serde_json::from_str(json)?)
}

/// Write the project JSON to `path`.
pub fn save_project(path: impl AsRef<Path>, shapes: &[Shape]) -> Result<(), ProjectError> {
    let path = path.as_ref();
    std::fs::write(path, export_project(shapes)?)?;
    log::info!("Saved {} shapes to {}", shapes.len(), path.display());
    Ok(())
}

/// Read a project JSON file.
pub fn load_project(path: impl AsRef<Path>) -> Result<Vec<Shape>, ProjectError> {
    let json = std::fs::read_to_string(path)?;
    import_project(&json)
}
