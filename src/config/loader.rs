//! Config file loader and serialization.

use super::ScoringConfig;
use crate::error::ConfigError;
use std::fs;
use std::path::{Path, PathBuf};

/// Serialization format, chosen by file extension.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConfigFormat {
    Json,
    Toml,
}

/// Get the global config path: ~/.config/cvti/scoring.toml
pub fn get_global_config_path() -> Result<PathBuf, ConfigError> {
    let home = dirs::home_dir().ok_or_else(|| {
        ConfigError::ValidationFailed("Cannot determine home directory".to_string())
    })?;

    Ok(home.join(".config/cvti").join("scoring.toml"))
}

/// Load config from a `.json` or `.toml` file.
pub fn load_config_from_file(path: &Path) -> Result<ScoringConfig, ConfigError> {
    let format = validate_config_path(path)?;

    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            ConfigError::FileNotFound(format!(
                "Configuration file not found at: {}",
                path.display()
            ))
        } else {
            ConfigError::IoError(e)
        }
    })?;

    let config: ScoringConfig = match format {
        ConfigFormat::Json => serde_json::from_str(&content)?,
        ConfigFormat::Toml => toml::from_str(&content)?,
    };

    log::info!("[Config] loaded scoring config from {}", path.display());
    Ok(config)
}

/// Load `path` when given, else the global config if it exists, else defaults.
pub fn load_or_default(path: Option<&Path>) -> Result<ScoringConfig, ConfigError> {
    if let Some(path) = path {
        return load_config_from_file(path);
    }

    match get_global_config_path() {
        Ok(global) if global.exists() => load_config_from_file(&global),
        _ => {
            log::debug!("[Config] no config file; using defaults");
            Ok(ScoringConfig::default())
        }
    }
}

/// Save config, format chosen by extension.
pub fn save_config_to_file(config: &ScoringConfig, path: &Path) -> Result<(), ConfigError> {
    let format = validate_config_path(path)?;

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let content = match format {
        ConfigFormat::Json => serde_json::to_string_pretty(config)?,
        ConfigFormat::Toml => toml::to_string_pretty(config)?,
    };

    fs::write(path, content)?;
    Ok(())
}

/// Validate config path (.json or .toml extension required).
pub fn validate_config_path(path: &Path) -> Result<ConfigFormat, ConfigError> {
    if path.as_os_str().is_empty() {
        return Err(ConfigError::ValidationFailed(
            "Configuration path cannot be empty".to_string(),
        ));
    }

    if path.to_str().is_none() {
        return Err(ConfigError::ValidationFailed(
            "Configuration path contains invalid characters".to_string(),
        ));
    }

    match path.extension().and_then(|ext| ext.to_str()) {
        Some("json") => Ok(ConfigFormat::Json),
        Some("toml") => Ok(ConfigFormat::Toml),
        Some(ext) => Err(ConfigError::ValidationFailed(format!(
            "Configuration file must have .json or .toml extension, got .{}",
            ext
        ))),
        None => Err(ConfigError::ValidationFailed(
            "Configuration file must have .json or .toml extension".to_string(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ApathyRuleKind, TieBreakMode};
    use std::io::Write;
    use tempfile::TempDir;

    #[test]
    fn test_save_and_load_toml() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("scoring.toml");

        let mut original = ScoringConfig::default();
        original.apathy.probability = 0.25;
        original.tie_break.pg = Some('P');
        original.seed = Some(77);

        save_config_to_file(&original, &config_path).expect("Failed to save config");
        let loaded = load_config_from_file(&config_path).expect("Failed to load config");
        assert_eq!(loaded, original);
    }

    #[test]
    fn test_save_and_load_json() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("nested/scoring.json");

        let mut original = ScoringConfig::default();
        original.apathy.rule = ApathyRuleKind::Dominant;
        original.tie_break.mode = TieBreakMode::Random;

        save_config_to_file(&original, &config_path).expect("Failed to save config");
        assert!(config_path.parent().unwrap().exists());
        assert_eq!(load_config_from_file(&config_path).unwrap(), original);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("partial.toml");
        fs::write(&config_path, "[apathy]\nprobability = 0.8\n").unwrap();

        let loaded = load_config_from_file(&config_path).unwrap();
        assert_eq!(loaded.apathy.probability, 0.8);
        assert_eq!(loaded.apathy.certain_count, 3);
        assert_eq!(loaded.tie_break.mode, TieBreakMode::Table);
        assert!(loaded.seed.is_none());
    }

    #[test]
    fn test_validate_config_path() {
        assert_eq!(validate_config_path(Path::new("a.json")).unwrap(), ConfigFormat::Json);
        assert_eq!(validate_config_path(Path::new("/tmp/a.toml")).unwrap(), ConfigFormat::Toml);
        assert!(validate_config_path(Path::new("config.yaml")).is_err());
        assert!(validate_config_path(Path::new("config")).is_err());
        assert!(validate_config_path(Path::new("")).is_err());
    }

    #[test]
    fn test_load_nonexistent_file() {
        let result = load_config_from_file(Path::new("/nonexistent/path/scoring.toml"));
        assert!(matches!(result, Err(ConfigError::FileNotFound(_))));
    }

    #[test]
    fn test_load_invalid_content() {
        let temp_dir = TempDir::new().unwrap();

        let json_path = temp_dir.path().join("invalid.json");
        let mut file = fs::File::create(&json_path).unwrap();
        file.write_all(b"{ invalid json }").unwrap();
        assert!(matches!(load_config_from_file(&json_path), Err(ConfigError::InvalidJson(_))));

        let toml_path = temp_dir.path().join("invalid.toml");
        fs::write(&toml_path, "apathy = [[[").unwrap();
        assert!(matches!(load_config_from_file(&toml_path), Err(ConfigError::InvalidToml(_))));
    }

    #[test]
    fn test_load_or_default_explicit_path() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("scoring.toml");
        fs::write(&config_path, "seed = 5\n").unwrap();
        assert_eq!(load_or_default(Some(config_path.as_path())).unwrap().seed, Some(5));
    }
}
