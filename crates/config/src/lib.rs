//! Thruster catalog loaders.
//!
//! Catalogs are read from JSON, YAML or TOML files, or from a directory holding one TOML
//! record per file. Every record is validated before it is handed to the ranking core.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use select_propulsion::ThrusterSpec;
use thiserror::Error;
use tracing::{debug, warn};

/// Catalog path used when none is supplied.
pub const DEFAULT_CATALOG: &str = "thrusters.json";

/// Errors that can occur while loading a thruster catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("could not read catalog {}: {source}", path.display())]
    Unavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed catalog {}: {reason}", path.display())]
    Malformed { path: PathBuf, reason: String },
    #[error("catalog record {index} ({name:?}) is invalid: {reason}")]
    InvalidRecord {
        index: usize,
        name: String,
        reason: String,
    },
}

/// `[[thruster]]` tables in a TOML catalog.
#[derive(Debug, Deserialize)]
struct TomlCatalog {
    #[serde(default)]
    thruster: Vec<ThrusterSpec>,
}

/// Load and validate a catalog, dispatching on the path's extension.
pub fn load_catalog<P: AsRef<Path>>(path: P) -> Result<Vec<ThrusterSpec>, CatalogError> {
    let path = path.as_ref();
    let records = if path.is_dir() {
        read_dir_records(path)?
    } else {
        let contents = read_source(path)?;
        parse_records(path, &contents)?
    };
    validate(&records)?;
    debug!(path = %path.display(), count = records.len(), "loaded thruster catalog");
    Ok(records)
}

/// Like [`load_catalog`], but a missing or unreadable source yields an empty catalog.
///
/// The condition is reported as a warning. Parse and validation failures still propagate.
pub fn load_catalog_or_empty<P: AsRef<Path>>(
    path: P,
) -> Result<Vec<ThrusterSpec>, CatalogError> {
    match load_catalog(path) {
        Err(CatalogError::Unavailable { path, source }) => {
            warn!(path = %path.display(), error = %source, "thruster catalog unavailable");
            Ok(Vec::new())
        }
        other => other,
    }
}

fn read_source(path: &Path) -> Result<String, CatalogError> {
    std::fs::read_to_string(path).map_err(|source| CatalogError::Unavailable {
        path: path.to_path_buf(),
        source,
    })
}

fn parse_records(path: &Path, contents: &str) -> Result<Vec<ThrusterSpec>, CatalogError> {
    let malformed = |reason: String| CatalogError::Malformed {
        path: path.to_path_buf(),
        reason,
    };
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase());
    match extension.as_deref() {
        Some("yaml") | Some("yml") => {
            serde_yaml::from_str(contents).map_err(|err| malformed(err.to_string()))
        }
        Some("toml") => toml::from_str::<TomlCatalog>(contents)
            .map(|catalog| catalog.thruster)
            .map_err(|err| malformed(err.to_string())),
        _ => serde_json::from_str(contents).map_err(|err| malformed(err.to_string())),
    }
}

fn read_dir_records(dir: &Path) -> Result<Vec<ThrusterSpec>, CatalogError> {
    let unavailable = |source: std::io::Error| CatalogError::Unavailable {
        path: dir.to_path_buf(),
        source,
    };
    let mut entries: Vec<PathBuf> = std::fs::read_dir(dir)
        .map_err(unavailable)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.extension().map(|ext| ext == "toml").unwrap_or(false))
        .collect();
    entries.sort();

    let mut records = Vec::with_capacity(entries.len());
    for path in entries {
        let contents = read_source(&path)?;
        let record: ThrusterSpec =
            toml::from_str(&contents).map_err(|err| CatalogError::Malformed {
                path: path.clone(),
                reason: err.to_string(),
            })?;
        records.push(record);
    }
    Ok(records)
}

fn validate(records: &[ThrusterSpec]) -> Result<(), CatalogError> {
    for (index, spec) in records.iter().enumerate() {
        let reason = if spec.name.trim().is_empty() {
            Some("name must not be empty".to_string())
        } else if !spec.power_w.is_finite() || spec.power_w < 0.0 {
            Some(format!("power_W must be a non-negative number, got {}", spec.power_w))
        } else if !spec.mass_kg.is_finite() || spec.mass_kg < 0.0 {
            Some(format!("mass_kg must be a non-negative number, got {}", spec.mass_kg))
        } else if !spec.isp_s.is_finite() {
            Some(format!("isp_s must be a finite number, got {}", spec.isp_s))
        } else {
            None
        };
        if let Some(reason) = reason {
            return Err(CatalogError::InvalidRecord {
                index,
                name: spec.name.clone(),
                reason,
            });
        }
    }
    Ok(())
}
