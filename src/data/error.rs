use std::path::PathBuf;

use super::model::STATE_COLUMN;

/// Errors raised while reading a raw dataset.
#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    #[error("CSV has no '{}' column", STATE_COLUMN)]
    MissingStateColumn,

    #[error("malformed CSV at record {record}")]
    Csv {
        record: usize,
        #[source]
        source: csv::Error,
    },

    #[error("failed to open {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
