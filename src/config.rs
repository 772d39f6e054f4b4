use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Customers generated when neither the CLI nor the config file say otherwise
pub const DEFAULT_SAMPLE_SIZE: usize = 3;

/// Country used by the demo filter query
pub const DEFAULT_COUNTRY: &str = "LU";

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct ShopConfig {
    pub database: Option<String>,
    pub sample_size: Option<usize>,
    pub rng_seed: Option<u64>,
    pub country: Option<String>,
}

impl ShopConfig {
    /// Database path: explicit flag, then config, then `shop.db`
    pub fn database_path(&self, cli: Option<PathBuf>) -> PathBuf {
        cli.or_else(|| self.database.as_ref().map(PathBuf::from))
            .unwrap_or_else(default_database_path)
    }

    pub fn sample_size(&self, cli: Option<usize>) -> usize {
        cli.or(self.sample_size).unwrap_or(DEFAULT_SAMPLE_SIZE)
    }

    pub fn rng_seed(&self, cli: Option<u64>) -> Option<u64> {
        cli.or(self.rng_seed)
    }

    pub fn country(&self, cli: Option<String>) -> String {
        cli.or_else(|| self.country.clone())
            .unwrap_or_else(|| DEFAULT_COUNTRY.to_string())
    }
}

pub fn default_config_path() -> PathBuf {
    PathBuf::from("shopdb.toml")
}

pub fn default_database_path() -> PathBuf {
    PathBuf::from("shop.db")
}

pub fn load_config(path: Option<&Path>) -> anyhow::Result<Option<ShopConfig>> {
    let path = path.map(Path::to_path_buf).unwrap_or_else(default_config_path);
    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(&path)?;
    let config: ShopConfig = toml::from_str(&contents)
        .map_err(|e| crate::Error::Config(format!("{}: {}", path.display(), e)))?;
    Ok(Some(config))
}

pub fn write_config(path: &Path, config: &ShopConfig, force: bool) -> anyhow::Result<()> {
    if path.exists() && !force {
        anyhow::bail!("config already exists at {} (use --force to overwrite)", path.display());
    }

    let contents = toml::to_string_pretty(config)?;
    std::fs::write(path, contents)?;
    Ok(())
}

pub fn ensure_db_dir(db_path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = db_path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_precedence() {
        let config = ShopConfig {
            database: Some("data/shop.db".to_string()),
            sample_size: Some(10),
            rng_seed: None,
            country: None,
        };

        assert_eq!(config.database_path(None), PathBuf::from("data/shop.db"));
        assert_eq!(config.database_path(Some("x.db".into())), PathBuf::from("x.db"));
        assert_eq!(config.sample_size(None), 10);
        assert_eq!(config.sample_size(Some(2)), 2);
        assert_eq!(config.rng_seed(Some(9)), Some(9));
        assert_eq!(config.country(None), DEFAULT_COUNTRY);

        let empty = ShopConfig::default();
        assert_eq!(empty.database_path(None), default_database_path());
        assert_eq!(empty.sample_size(None), DEFAULT_SAMPLE_SIZE);
        assert_eq!(empty.rng_seed(None), None);
    }

    #[test]
    fn test_write_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("shopdb.toml");
        let config = ShopConfig {
            database: Some("shop.db".to_string()),
            sample_size: Some(3),
            rng_seed: Some(42),
            country: Some("LU".to_string()),
        };

        write_config(&path, &config, false).unwrap();
        assert!(write_config(&path, &config, false).is_err());
        write_config(&path, &config, true).unwrap();

        let loaded = load_config(Some(path.as_path())).unwrap().unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_missing_config_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let loaded = load_config(Some(dir.path().join("absent.toml").as_path())).unwrap();
        assert!(loaded.is_none());
    }

    #[test]
    fn test_malformed_config_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("shopdb.toml");
        std::fs::write(&path, "sample_size = \"lots\"").unwrap();
        assert!(load_config(Some(path.as_path())).is_err());
    }

    #[test]
    fn test_ensure_db_dir_creates_parent() {
        let dir = tempfile::tempdir().unwrap();
        let db = dir.path().join("nested").join("shop.db");
        ensure_db_dir(&db).unwrap();
        assert!(db.parent().unwrap().is_dir());
    }
}
