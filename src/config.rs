use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::data::model::{DatasetKind, Year, DEFAULT_YEAR};

/// Optional configuration file looked up in the working directory.
pub const CONFIG_FILE: &str = "statewise.json";

/// Environment variable overriding [`AppConfig::data_dir`].
pub const DATA_DIR_ENV: &str = "STATEWISE_DATA_DIR";

/// Where the datasets live and which year to show first.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub data_dir: PathBuf,
    pub education_file: String,
    pub income_file: String,
    pub initial_year: Year,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            education_file: "usa_ba-degree-or-higher_2006-2019.csv".to_string(),
            income_file: "usa_personal-income-by-state_2006-2019.csv".to_string(),
            initial_year: DEFAULT_YEAR,
        }
    }
}

impl AppConfig {
    /// Read [`CONFIG_FILE`] if present, then apply the environment override.
    pub fn load() -> Result<Self> {
        let path = Path::new(CONFIG_FILE);
        let mut config = if path.exists() {
            Self::from_file(path)?
        } else {
            Self::default()
        };
        if let Some(dir) = std::env::var_os(DATA_DIR_ENV) {
            config.data_dir = PathBuf::from(dir);
        }
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        Self::from_json(&text).with_context(|| format!("parsing {}", path.display()))
    }

    /// Missing keys take their default values.
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn path_for(&self, kind: DatasetKind) -> PathBuf {
        let file = match kind {
            DatasetKind::Education => &self.education_file,
            DatasetKind::Income => &self.income_file,
        };
        self.data_dir.join(file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_the_bundled_files() {
        let config = AppConfig::default();
        assert_eq!(config.initial_year, 2006);
        assert_eq!(
            config.path_for(DatasetKind::Income),
            PathBuf::from("data").join("usa_personal-income-by-state_2006-2019.csv")
        );
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config = AppConfig::from_json(r#"{ "data_dir": "/srv/csv", "initial_year": 2012 }"#)
            .unwrap();
        assert_eq!(config.data_dir, PathBuf::from("/srv/csv"));
        assert_eq!(config.initial_year, 2012);
        assert_eq!(config.education_file, AppConfig::default().education_file);
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(AppConfig::from_json("{ data_dir: ").is_err());
    }
}
