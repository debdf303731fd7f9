use std::{collections::BTreeMap, path::Path};

use serde::{Deserialize, Serialize};

use super::ModelError;

/// The label and sequence properties of a pretrained classifier, as stored in its `config.json`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// The padding token ID
    #[serde(default)]
    pub pad_token_id: usize,

    /// The max position embeddings
    #[serde(default = "default_max_position_embeddings")]
    pub max_position_embeddings: usize,

    /// A mapping from class ids to class name labels
    #[serde(default)]
    pub id2label: BTreeMap<usize, String>,

    /// A mapping from class name labels to class ids
    #[serde(default)]
    pub label2id: BTreeMap<String, usize>,
}

fn default_max_position_embeddings() -> usize {
    512
}

/// Swap the keys and values of a label map
fn invert_map<K: Ord, V: Ord>(original: BTreeMap<K, V>) -> BTreeMap<V, K> {
    original
        .into_iter()
        .map(|(key, value)| (value, key))
        .collect()
}

impl Config {
    /// A config for the given labels, numbered in order
    pub fn from_labels(labels: &[String]) -> Self {
        let id2label: BTreeMap<usize, String> = labels.iter().cloned().enumerate().collect();

        Self {
            pad_token_id: 0,
            max_position_embeddings: default_max_position_embeddings(),
            label2id: invert_map(id2label.clone()),
            id2label,
        }
    }

    /// Read a Hugging Face `config.json`. A missing `label2id` is derived from `id2label`.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ModelError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ModelError::Io(path.display().to_string(), e))?;

        let mut config: Config = serde_json::from_str(&contents)
            .map_err(|e| ModelError::Config(path.display().to_string(), e))?;

        if config.label2id.is_empty() {
            config.label2id = invert_map(config.id2label.clone());
        }

        Ok(config)
    }
}
