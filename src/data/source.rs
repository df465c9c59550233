use std::path::PathBuf;

use anyhow::Result;

use super::loader::load_file;
use super::model::{DatasetKind, YearTable};
use crate::config::AppConfig;

/// Somewhere a raw dataset can be fetched from.
///
/// `fetch` is called on a worker thread, once per dataset per load.
pub trait DataSource: Send + Sync {
    fn fetch(&self, kind: DatasetKind) -> Result<YearTable>;

    fn describe(&self) -> String;
}

/// Reads both datasets as CSV files from a directory.
#[derive(Debug, Clone)]
pub struct FileSource {
    education: PathBuf,
    income: PathBuf,
}

impl FileSource {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            education: config.path_for(DatasetKind::Education),
            income: config.path_for(DatasetKind::Income),
        }
    }
}

impl DataSource for FileSource {
    fn fetch(&self, kind: DatasetKind) -> Result<YearTable> {
        match kind {
            DatasetKind::Education => load_file(&self.education),
            DatasetKind::Income => load_file(&self.income),
        }
    }

    fn describe(&self) -> String {
        format!(
            "files {} and {}",
            self.education.display(),
            self.income.display()
        )
    }
}
