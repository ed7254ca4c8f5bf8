use std::path::Path;

use tracing::debug;

use crate::error::{AppError, AppResult, ConfigError};
use crate::spec::Spec;

/// Reads and decodes a spec document from a `.toml`, `.json`, `.yaml` or
/// `.yml` file.
///
/// # Errors
///
/// Returns an error when the file cannot be read, has an unsupported
/// extension, or cannot be decoded.
pub fn load_spec_file(path: &Path) -> AppResult<Spec> {
    let content = std::fs::read_to_string(path).map_err(|err| {
        AppError::config(ConfigError::ReadSpec {
            path: path.to_path_buf(),
            source: err,
        })
    })?;
    let spec: Spec = match path.extension().and_then(|ext| ext.to_str()) {
        Some("toml") => toml::from_str(&content).map_err(|err| {
            AppError::config(ConfigError::ParseToml {
                path: path.to_path_buf(),
                source: err,
            })
        })?,
        Some("json") => serde_json::from_str(&content).map_err(|err| {
            AppError::config(ConfigError::ParseJson {
                path: path.to_path_buf(),
                source: err,
            })
        })?,
        Some("yaml" | "yml") => serde_yaml::from_str(&content).map_err(|err| {
            AppError::config(ConfigError::ParseYaml {
                path: path.to_path_buf(),
                source: err,
            })
        })?,
        Some(ext) => {
            return Err(AppError::config(ConfigError::UnsupportedExtension {
                ext: ext.to_owned(),
            }));
        }
        None => return Err(AppError::config(ConfigError::MissingExtension)),
    };
    debug!(
        "Loaded spec '{}' with {} request(s)",
        path.display(),
        spec.requests().len()
    );
    Ok(spec)
}
