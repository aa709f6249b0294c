use anyhow::{Context, Result};
use atomic_write_file::AtomicWriteFile;
use std::io::Write;
use std::path::Path;

use super::schema::{Config, DEFAULT_CURRENCY_SYMBOL};
use crate::tariff::RateTable;

const HEADER: &str = "\
# port-tariff configuration
# Every rate below is the published tariff. Edit a value to override it;
# air and lcl entries may be deleted to fall back to the built-in default.
";

/// Write the published tariff to `path` as an editable YAML config.
///
/// Refuses to replace an existing file unless `force` is set. The write is
/// atomic, so an interrupted run never leaves a half-written config behind.
pub fn write_default_config(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        anyhow::bail!(
            "Config already exists at {}. Use --force to overwrite.",
            path.display()
        );
    }

    let config = Config {
        currency_symbol: Some(DEFAULT_CURRENCY_SYMBOL.to_string()),
        rates: Some(RateTable::default()),
    };

    let yaml = serde_saphyr::to_string(&config)
        .map_err(|e| anyhow::anyhow!("Failed to serialize config: {}", e))?;

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }

    let mut file = AtomicWriteFile::open(path)
        .with_context(|| format!("Failed to open atomic write file at {}", path.display()))?;
    file.write_all(HEADER.as_bytes())
        .with_context(|| format!("Failed to write config to {}", path.display()))?;
    file.write_all(yaml.as_bytes())
        .with_context(|| format!("Failed to write config to {}", path.display()))?;
    file.commit()
        .with_context(|| format!("Failed to save config to {}", path.display()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::load_config;
    use std::env;
    use std::fs;

    #[test]
    fn test_written_config_loads_back_as_defaults() {
        let temp_dir = env::temp_dir().join("port_tariff_test_init");
        let temp_path = temp_dir.join("config.yaml");
        let _ = fs::remove_file(&temp_path);

        write_default_config(&temp_path, false).unwrap();
        let config = load_config(Some(temp_path.clone())).unwrap();
        assert_eq!(config.effective_rates(), RateTable::default());
        assert_eq!(config.currency_symbol(), "$");

        let _ = fs::remove_dir_all(&temp_dir);
    }

    #[test]
    fn test_existing_config_needs_force() {
        let temp_path = env::temp_dir().join("port_tariff_test_init_force.yaml");
        fs::write(&temp_path, "currency_symbol: \"EUR \"\n").unwrap();

        let err = write_default_config(&temp_path, false).unwrap_err();
        assert!(err.to_string().contains("--force"));
        assert_eq!(
            fs::read_to_string(&temp_path).unwrap(),
            "currency_symbol: \"EUR \"\n"
        );

        write_default_config(&temp_path, true).unwrap();
        let config = load_config(Some(temp_path.clone())).unwrap();
        assert_eq!(config.currency_symbol(), "$");

        let _ = fs::remove_file(&temp_path);
    }
}
