//! Local-directory loader for the two atlas data files.
//!
//! A data directory holds `boundary.geojson` and `claims.json`, the same
//! files an HTTP host would serve under `/data/`.

use crate::snapshot::Snapshot;
use fra_atlas_core::boundary::{BoundaryError, BoundarySet};
use fra_atlas_core::claim::Claim;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

pub const BOUNDARY_FILE: &str = "boundary.geojson";
pub const CLAIMS_FILE: &str = "claims.json";

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("data file not found: {0}")]
    FileNotFound(PathBuf),
    #[error("failed to read data file: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("boundary parse error: {0}")]
    Boundary(#[from] BoundaryError),
}

/// Load a snapshot from a local data directory.
pub fn load_dir(dir: &Path) -> Result<Snapshot, LoadError> {
    let boundary_path = dir.join(BOUNDARY_FILE);
    if !boundary_path.exists() {
        return Err(LoadError::FileNotFound(boundary_path));
    }
    let claims_path = dir.join(CLAIMS_FILE);
    if !claims_path.exists() {
        return Err(LoadError::FileNotFound(claims_path));
    }

    let boundary = BoundarySet::from_geojson(&fs::read_to_string(&boundary_path)?)?;
    let claims: Vec<Claim> = serde_json::from_str(&fs::read_to_string(&claims_path)?)?;
    info!(
        features = boundary.len(),
        claims = claims.len(),
        dir = %dir.display(),
        "loaded snapshot from disk"
    );
    Ok(Snapshot { boundary, claims })
}
