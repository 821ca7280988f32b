use anyhow::{Context, Result};
use chrono::FixedOffset;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DATA_DIR_ENV: &str = "TAXIPOT_PATH";
pub const CONFIG_FILE: &str = "config.toml";

/// Resolve the data directory:
/// 1. Explicit path (with tilde expansion)
/// 2. TAXIPOT_PATH environment variable
/// 3. Platform data directory
/// 4. ~/.taxipot
pub fn resolve_data_dir(explicit_path: Option<&str>) -> Result<PathBuf> {
    if let Some(path) = explicit_path {
        return Ok(expand_tilde(path));
    }

    if let Ok(env_path) = std::env::var(DATA_DIR_ENV)
        && !env_path.is_empty()
    {
        return Ok(expand_tilde(&env_path));
    }

    if let Some(data_dir) = dirs::data_dir() {
        return Ok(data_dir.join("taxipot"));
    }

    if let Some(home) = dirs::home_dir() {
        return Ok(home.join(".taxipot"));
    }

    anyhow::bail!("Could not determine data directory: no HOME or platform data directory found")
}

fn expand_tilde(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(stripped);
    }
    PathBuf::from(path)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub base_url: String,
    pub page_size: u32,
    pub sort: String,
    pub request_timeout_secs: u64,
    /// Offset used when showing departure times.
    pub utc_offset_minutes: i32,
    /// Where the login page sends the browser afterwards.
    pub return_url: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: taxipot_api::DEFAULT_BASE_URL.to_string(),
            page_size: taxipot_api::DEFAULT_PAGE_SIZE,
            sort: taxipot_api::DEFAULT_SORT.to_string(),
            request_timeout_secs: 10,
            utc_offset_minutes: taxipot_types::SERVICE_UTC_OFFSET_SECS / 60,
            return_url: "http://localhost:5173".to_string(),
        }
    }
}

impl Config {
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Invalid config file {}", path.display()))?;
        Ok(config)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, toml::to_string_pretty(self)?)?;
        Ok(())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.max(1))
    }

    /// Display offset; falls back to the service offset when out of range.
    pub fn display_offset(&self) -> FixedOffset {
        FixedOffset::east_opt(self.utc_offset_minutes.saturating_mul(60))
            .unwrap_or_else(taxipot_types::service_offset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let config = Config::load_from(&dir.path().join(CONFIG_FILE)).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.base_url, "https://snuxi.com");
        assert_eq!(config.page_size, 10);
        assert_eq!(config.utc_offset_minutes, 540);
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        std::fs::write(&path, "page_size = 20\nbase_url = \"http://127.0.0.1:8080\"\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.page_size, 20);
        assert_eq!(config.base_url, "http://127.0.0.1:8080");
        assert_eq!(config.sort, "departureTime,asc");
    }

    #[test]
    fn test_save_round_trips() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join(CONFIG_FILE);
        let config = Config {
            page_size: 5,
            ..Config::default()
        };
        config.save_to(&path).unwrap();
        assert_eq!(Config::load_from(&path).unwrap(), config);
    }

    #[test]
    fn test_explicit_data_dir_wins() {
        let resolved = resolve_data_dir(Some("/tmp/taxipot-explicit")).unwrap();
        assert_eq!(resolved, PathBuf::from("/tmp/taxipot-explicit"));
    }

    #[test]
    fn test_invalid_offset_falls_back() {
        let config = Config {
            utc_offset_minutes: 100_000,
            ..Config::default()
        };
        assert_eq!(config.display_offset().local_minus_utc(), 9 * 3600);
    }
}
