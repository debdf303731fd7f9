use std::path::Path;

use async_trait::async_trait;

/// Datapoints serialized as JSON lines
pub mod jsonl;

/// A dataset which can be loaded
#[async_trait]
pub trait LoadableDataset {
    /// Load the dataset
    async fn load(path: &Path) -> Result<Self, DatasetError>
    where
        Self: std::marker::Sized;
}

/// Dataset Error
#[derive(thiserror::Error, Debug)]
pub enum DatasetError {
    /// The dataset file could not be read
    #[error("unable to read dataset {0}: {1}")]
    Io(String, #[source] std::io::Error),

    /// A line is not a valid datapoint
    #[error("invalid datapoint on line {line}: {source}")]
    Datapoint {
        /// One-based line number
        line: usize,

        /// The parse error
        #[source]
        source: serde_json::Error,
    },
}
