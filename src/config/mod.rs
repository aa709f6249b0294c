mod init;
mod schema;

pub use init::write_default_config;
pub use schema::{Config, DEFAULT_CURRENCY_SYMBOL};

use anyhow::{Context, Result};
use log::{debug, info};
use std::fs;
use std::path::{Path, PathBuf};

/// Get the config directory path (~/.config/port-tariff/)
pub fn get_config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir().context("Could not determine home directory")?;
    Ok(home.join(".config").join("port-tariff"))
}

/// Get the default config file path (~/.config/port-tariff/config.yaml)
pub fn get_config_path() -> Result<PathBuf> {
    Ok(get_config_dir()?.join("config.yaml"))
}

/// Load configuration from a YAML file
///
/// # Arguments
///
/// * `path` - Optional path to config file. If None, uses default path (~/.config/port-tariff/config.yaml)
///
/// A missing default config is not an error: the published tariff applies.
///
/// # Errors
///
/// Returns an error if:
/// - An explicitly given config file does not exist
/// - The config file cannot be read
/// - The YAML cannot be parsed
pub fn load_config(path: Option<PathBuf>) -> Result<Config> {
    match path {
        Some(explicit) => {
            if !explicit.exists() {
                anyhow::bail!("Config file not found at {}", explicit.display());
            }
            read_config(&explicit)
        }
        None => {
            let default_path = match get_config_path() {
                Ok(p) => p,
                Err(e) => {
                    debug!("No default config location ({}), using built-in rates", e);
                    return Ok(Config::default());
                }
            };
            if !default_path.exists() {
                debug!(
                    "No config at {}, using built-in rates",
                    default_path.display()
                );
                return Ok(Config::default());
            }
            read_config(&default_path)
        }
    }
}

fn read_config(config_path: &Path) -> Result<Config> {
    let config_content = fs::read_to_string(config_path)
        .with_context(|| format!("Failed to read config file at {}", config_path.display()))?;

    let config: Config = serde_saphyr::from_str(&config_content)
        .with_context(|| format!("Failed to parse config: invalid YAML in {}", config_path.display()))?;

    info!("Loaded config from {}", config_path.display());
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use std::env;

    #[test]
    fn test_load_explicit_missing_file_fails() {
        let temp_path = env::temp_dir().join("port_tariff_test_missing.yaml");
        let _ = fs::remove_file(&temp_path);

        let err = load_config(Some(temp_path)).unwrap_err();
        assert!(err.to_string().contains("Config file not found"));
    }

    #[test]
    fn test_load_explicit_file() {
        let temp_path = env::temp_dir().join("port_tariff_test_load.yaml");
        fs::write(&temp_path, "rates:\n  lcl:\n    free_days: 7\n").unwrap();

        let config = load_config(Some(temp_path.clone())).unwrap();
        assert_eq!(config.effective_rates().lcl.free_days, 7);
        assert_eq!(config.effective_rates().lcl.stripping_per_cbm, dec!(5.3));

        let _ = fs::remove_file(&temp_path);
    }

    #[test]
    fn test_load_invalid_yaml_reports_path() {
        let temp_path = env::temp_dir().join("port_tariff_test_invalid.yaml");
        fs::write(&temp_path, "rates: [not, a, table]\n").unwrap();

        let err = load_config(Some(temp_path.clone())).unwrap_err();
        assert!(err.to_string().contains("port_tariff_test_invalid.yaml"));

        let _ = fs::remove_file(&temp_path);
    }
}
