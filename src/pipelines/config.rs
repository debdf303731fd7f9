use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{cli::tokenizers::DEFAULT_TOKENIZER, mapper::FeatureOptions};

/// Configuration for the language model services
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// A Hub model name or the path of a `tokenizer.json` file
    pub tokenizer: String,

    /// How words become token rows
    pub features: FeatureOptions,

    /// Label words without a prediction as "other" with an outside tag
    pub use_other_as_default_category: bool,

    /// Tokenize one word at a time instead of encoding pre-split words
    pub legacy_mapping: bool,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            tokenizer: DEFAULT_TOKENIZER.to_string(),
            features: FeatureOptions::default(),
            use_other_as_default_category: false,
            legacy_mapping: false,
        }
    }
}

impl ServiceConfig {
    /// Load from a JSON or YAML file, chosen by extension
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(path.display().to_string(), e))?;

        match Format::of(path)? {
            Format::Json => Ok(serde_json::from_str(&contents)?),
            Format::Yaml => Ok(serde_yaml::from_str(&contents)?),
        }
    }

    /// Save to a JSON or YAML file, chosen by extension
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let path = path.as_ref();

        let contents = match Format::of(path)? {
            Format::Json => serde_json::to_string_pretty(self)?,
            Format::Yaml => serde_yaml::to_string(self)?,
        };

        std::fs::write(path, contents).map_err(|e| ConfigError::Io(path.display().to_string(), e))
    }
}

enum Format {
    Json,
    Yaml,
}

impl Format {
    fn of(path: &Path) -> Result<Self, ConfigError> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Ok(Format::Json),
            Some("yaml") | Some("yml") => Ok(Format::Yaml),
            _ => Err(ConfigError::UnsupportedFormat(path.display().to_string())),
        }
    }
}

/// Config Error
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// The file could not be read or written
    #[error("unable to access config file {0}: {1}")]
    Io(String, #[source] std::io::Error),

    /// Invalid JSON
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// Invalid YAML
    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),

    /// The extension is neither JSON nor YAML
    #[error("unsupported config format: {0}")]
    UnsupportedFormat(String),
}
