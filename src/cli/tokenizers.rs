use std::{fmt::Display, path::PathBuf};

use crate::tokenizer::{hf::DEFAULT_MAX_LENGTH, HfTokenizer, TokenizerError};

/// microsoft/layoutlm-base-uncased
pub static LAYOUTLM_BASE_UNCASED: &str = "microsoft/layoutlm-base-uncased";

/// microsoft/layoutlm-large-uncased
pub static LAYOUTLM_LARGE_UNCASED: &str = "microsoft/layoutlm-large-uncased";

/// All known LayoutLM tokenizers
pub static ALL_TOKENIZERS: &[&str; 2] = &[LAYOUTLM_BASE_UNCASED, LAYOUTLM_LARGE_UNCASED];

/// The default tokenizer to use
pub static DEFAULT_TOKENIZER: &str = LAYOUTLM_BASE_UNCASED;

/// Where a tokenizer is loaded from
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub enum TokenizerSource {
    /// A model on the Hugging Face Hub
    Pretrained(String),

    /// A local `tokenizer.json` file
    File(PathBuf),
}

impl TokenizerSource {
    /// Load the tokenizer
    pub async fn load(&self, max_length: Option<usize>) -> Result<HfTokenizer, TokenizerError> {
        let max_length = max_length.unwrap_or(DEFAULT_MAX_LENGTH);

        match self {
            TokenizerSource::Pretrained(name) => HfTokenizer::from_pretrained(name, max_length).await,
            TokenizerSource::File(path) => HfTokenizer::from_file(path, max_length),
        }
    }
}

impl Default for TokenizerSource {
    fn default() -> Self {
        TokenizerSource::Pretrained(DEFAULT_TOKENIZER.to_string())
    }
}

impl TryFrom<&str> for TokenizerSource {
    type Error = TokenizerSourceError;

    /// A `.json` path is a local file. Known names and `owner/name` ids are Hub models.
    fn try_from(value: &str) -> Result<Self, Self::Error> {
        if value.ends_with(".json") {
            Ok(TokenizerSource::File(PathBuf::from(value)))
        } else if ALL_TOKENIZERS.contains(&value) || value.split('/').count() == 2 {
            Ok(TokenizerSource::Pretrained(value.to_string()))
        } else {
            Err(TokenizerSourceError::Unknown(value.to_string()))
        }
    }
}

impl Display for TokenizerSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TokenizerSource::Pretrained(name) => write!(f, "{}", name),
            TokenizerSource::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Tokenizer Source Error
#[derive(thiserror::Error, Debug)]
pub enum TokenizerSourceError {
    /// Neither a file nor a Hub model
    #[error("no tokenizer found for {0}")]
    Unknown(String),
}
