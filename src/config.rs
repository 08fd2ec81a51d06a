use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

/// Names a JSON file with [`DashboardConfig`] overrides.
pub const CONFIG_ENV: &str = "PENGUIN_DASHBOARD_CONFIG";
/// Overrides the dataset path, taking precedence over the config file.
pub const DATA_ENV: &str = "PENGUIN_DATA";

// ---------------------------------------------------------------------------
// Dashboard configuration
// ---------------------------------------------------------------------------

/// Startup settings. Every field has a default, so a config file only needs
/// the keys it changes.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Window and page title.
    pub title: String,
    /// Dataset to load; the bundled penguins.csv when `None`.
    pub data_path: Option<PathBuf>,
    /// Target of the sidebar link.
    pub github_url: String,
    /// Rows per page in the data table.
    pub page_size: usize,
    pub window_size: [f32; 2],
    pub min_window_size: [f32; 2],
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            title: "Jaya Penguin Data".to_string(),
            data_path: None,
            github_url: "https://github.com/Jaya-srini/cintel-02-data-/blob/main/app.py".to_string(),
            page_size: 10,
            window_size: [1200.0, 800.0],
            min_window_size: [600.0, 400.0],
        }
    }
}

impl DashboardConfig {
    /// Resolve from the environment: defaults, then the file named by
    /// `PENGUIN_DASHBOARD_CONFIG`, then `PENGUIN_DATA`.
    pub fn from_env() -> Result<Self> {
        let config_path = std::env::var_os(CONFIG_ENV).map(PathBuf::from);
        let data_override = std::env::var_os(DATA_ENV).map(PathBuf::from);
        Self::resolve(config_path.as_deref(), data_override)
    }

    /// Defaults, overlaid by the config file when given, then by the data
    /// path override.
    pub fn resolve(config_path: Option<&Path>, data_override: Option<PathBuf>) -> Result<Self> {
        let mut config = match config_path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        if let Some(path) = data_override {
            config.data_path = Some(path);
        }
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        Self::from_json(&text).with_context(|| format!("parsing config file {}", path.display()))
    }

    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let config = DashboardConfig::from_json(r#"{ "page_size": 25 }"#).unwrap();
        assert_eq!(config.page_size, 25);
        assert_eq!(config.title, "Jaya Penguin Data");
        assert_eq!(config.data_path, None);
    }

    #[test]
    fn config_file_sets_data_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(br#"{ "data_path": "/data/penguins.parquet", "title": "Penguins" }"#)
            .unwrap();
        let config = DashboardConfig::from_file(file.path()).unwrap();
        assert_eq!(config.data_path, Some(PathBuf::from("/data/penguins.parquet")));
        assert_eq!(config.title, "Penguins");
    }

    #[test]
    fn no_config_file_resolves_to_defaults() {
        assert_eq!(DashboardConfig::resolve(None, None).unwrap(), DashboardConfig::default());

        let config = DashboardConfig::resolve(None, Some(PathBuf::from("full.csv"))).unwrap();
        assert_eq!(config.data_path, Some(PathBuf::from("full.csv")));
        assert_eq!(config.page_size, 10);
    }

    #[test]
    fn data_override_wins_over_config_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(br#"{ "data_path": "/data/penguins.parquet", "page_size": 20 }"#)
            .unwrap();

        let from_file = DashboardConfig::resolve(Some(file.path()), None).unwrap();
        assert_eq!(from_file.data_path, Some(PathBuf::from("/data/penguins.parquet")));

        let overridden =
            DashboardConfig::resolve(Some(file.path()), Some(PathBuf::from("/tmp/all.csv"))).unwrap();
        assert_eq!(overridden.data_path, Some(PathBuf::from("/tmp/all.csv")));
        assert_eq!(overridden.page_size, 20);
    }

    #[test]
    fn missing_config_file_is_an_error() {
        let err = DashboardConfig::resolve(Some(Path::new("/nonexistent/dashboard.json")), None)
            .unwrap_err();
        assert!(format!("{err:#}").contains("reading config file"));
    }

    #[test]
    fn malformed_config_is_an_error() {
        assert!(DashboardConfig::from_json("{ page_size: }").is_err());
        assert!(DashboardConfig::from_json(r#"{ "page_size": "ten" }"#).is_err());
    }
}
