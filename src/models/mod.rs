use std::collections::BTreeMap;

use crate::mapper::LayoutLmFeatures;

/// Classification results
pub mod results;

/// Logit decoding helpers for model implementations
pub mod decode;

/// Pretrained model configuration
pub mod config;

pub use config::Config;
pub use results::{SequenceClassResult, TokenClassResult};

/// A pretrained language model
pub trait LanguageModel {
    /// The name of the model (e.g., "microsoft/layoutlm-base-uncased")
    fn name(&self) -> &str;

    /// A mapping from class ids to class name labels
    fn categories(&self) -> &BTreeMap<usize, String>;
}

/// A model labelling each token of a sequence
pub trait TokenClassifier: LanguageModel {
    /// Predict a class for every token of every feature row
    fn predict(&self, features: &LayoutLmFeatures) -> anyhow::Result<Vec<TokenClassResult>>;
}

/// A model labelling a whole sequence
pub trait SequenceClassifier: LanguageModel {
    /// Predict one class for the page the feature rows belong to
    fn predict(&self, features: &LayoutLmFeatures) -> anyhow::Result<SequenceClassResult>;
}

/// Model Error
#[derive(thiserror::Error, Debug)]
pub enum ModelError {
    /// The config file could not be read
    #[error("unable to read {0}: {1}")]
    Io(String, #[source] std::io::Error),

    /// The config file could not be parsed
    #[error("unable to parse model config {0}: {1}")]
    Config(String, #[source] serde_json::Error),

    /// A predicted class id has no label
    #[error("no label found for class id {0}")]
    UnknownClass(usize),

    /// Model output does not match the features or the labels
    #[error("expected {expected} values but got {actual}")]
    Shape {
        /// The expected size
        expected: usize,

        /// The actual size
        actual: usize,
    },
}
