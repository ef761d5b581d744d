//! Mapping-configuration persistence.
//!
//! The resolved mapping can be saved to a small JSON document and reloaded
//! for the next upload. A missing file is a normal "no previous settings"
//! condition, not an error.

use std::fs;
use std::path::Path;

use tracing::info;

use hri_model::{ColumnMapping, ConfigError, MappingConfig};

/// Load a previously saved mapping configuration.
///
/// Returns `Ok(None)` when the file does not exist.
///
/// # Errors
///
/// Returns [`ConfigError::Malformed`] for unparseable JSON and
/// [`ConfigError::Io`] for other read failures.
pub fn load_mapping_config(path: &Path) -> Result<Option<MappingConfig>, ConfigError> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(error) if error.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(error) => return Err(error.into()),
    };
    let config: MappingConfig = serde_json::from_str(&raw)?;
    info!(path = %path.display(), fields = config.column_mapping.len(), "loaded mapping configuration");
    Ok(Some(config))
}

/// Save a mapping with the current timestamp, returning the written config.
///
/// # Errors
///
/// Returns [`ConfigError::Io`] when the file cannot be written.
pub fn save_mapping_config(
    path: &Path,
    mapping: &ColumnMapping,
) -> Result<MappingConfig, ConfigError> {
    let config = MappingConfig {
        column_mapping: mapping.clone(),
        saved_at: chrono::Local::now().to_rfc3339(),
    };
    let json = serde_json::to_string_pretty(&config)?;
    fs::write(path, json)?;
    info!(path = %path.display(), fields = mapping.len(), "saved mapping configuration");
    Ok(config)
}
