use std::{path::Path, str::FromStr};

use tokenizers::Tokenizer;

use crate::utils::hugging_face::download_hf_tokenizer;

use super::{Encoding, LmTokenizer, SpecialTokens, TokenizerError};

/// The context size of LayoutLM base models
pub const DEFAULT_MAX_LENGTH: usize = 512;

/// Adapts a Hugging Face `tokenizers::Tokenizer` to [`LmTokenizer`]
#[derive(Clone)]
pub struct HfTokenizer {
    /// The wrapped tokenizer
    tokenizer: Tokenizer,

    /// Special tokens resolved from the vocabulary
    special_tokens: SpecialTokens,

    /// The maximum number of tokens the model accepts
    max_length: usize,
}

impl HfTokenizer {
    /// Wrap a tokenizer, resolving BERT-style special tokens first and RoBERTa-style ones second
    pub fn new(tokenizer: Tokenizer, max_length: usize) -> Result<Self, TokenizerError> {
        let (cls_token, cls_token_id) = resolve(&tokenizer, &["[CLS]", "<s>"])?;
        let (sep_token, sep_token_id) = resolve(&tokenizer, &["[SEP]", "</s>"])?;
        let (pad_token, pad_token_id) = resolve(&tokenizer, &["[PAD]", "<pad>"])?;
        let (unk_token, unk_token_id) = resolve(&tokenizer, &["[UNK]", "<unk>"])?;

        let special_tokens = SpecialTokens::new(
            cls_token,
            cls_token_id,
            sep_token,
            sep_token_id,
            pad_token,
            pad_token_id,
            unk_token,
            unk_token_id,
        );

        Ok(Self {
            tokenizer,
            special_tokens,
            max_length,
        })
    }

    /// Load from a `tokenizer.json` file
    pub fn from_file<P: AsRef<Path>>(path: P, max_length: usize) -> Result<Self, TokenizerError> {
        let tokenizer =
            Tokenizer::from_file(path).map_err(|e| TokenizerError::Load(e.to_string()))?;

        Self::new(tokenizer, max_length)
    }

    /// Load from the contents of a `tokenizer.json` file
    pub fn from_json(json: &str, max_length: usize) -> Result<Self, TokenizerError> {
        let tokenizer = Tokenizer::from_str(json).map_err(|e| TokenizerError::Load(e.to_string()))?;

        Self::new(tokenizer, max_length)
    }

    /// Download (or read from the local cache) the tokenizer of a Hub model
    pub async fn from_pretrained(
        model_name: &str,
        max_length: usize,
    ) -> Result<Self, TokenizerError> {
        let (tokenizer_file, _) = download_hf_tokenizer(model_name)
            .await
            .map_err(|e| TokenizerError::Load(e.to_string()))?;

        log::info!("Loading tokenizer from {}", tokenizer_file.display());

        Self::from_file(tokenizer_file, max_length)
    }
}

/// Find the first candidate token present in the vocabulary
fn resolve(tokenizer: &Tokenizer, candidates: &[&str]) -> Result<(String, u32), TokenizerError> {
    candidates
        .iter()
        .find_map(|token| tokenizer.token_to_id(token).map(|id| (token.to_string(), id)))
        .ok_or_else(|| {
            TokenizerError::MissingSpecialToken(candidates.iter().map(|c| c.to_string()).collect())
        })
}

impl From<tokenizers::Encoding> for Encoding {
    fn from(encoding: tokenizers::Encoding) -> Self {
        Self {
            ids: encoding.get_ids().to_vec(),
            tokens: encoding.get_tokens().to_vec(),
            type_ids: encoding.get_type_ids().to_vec(),
            attention_mask: encoding.get_attention_mask().to_vec(),
            special_tokens_mask: encoding.get_special_tokens_mask().to_vec(),
            word_ids: encoding.get_word_ids().to_vec(),
        }
    }
}

impl LmTokenizer for HfTokenizer {
    fn tokenize(&self, word: &str) -> Result<Vec<String>, TokenizerError> {
        let encoding = self
            .tokenizer
            .encode(word, false)
            .map_err(|e| TokenizerError::Encode(e.to_string()))?;

        Ok(encoding.get_tokens().to_vec())
    }

    fn encode(&self, text: &str) -> Result<Encoding, TokenizerError> {
        let encoding = self
            .tokenizer
            .encode(text, true)
            .map_err(|e| TokenizerError::Encode(e.to_string()))?;

        Ok(encoding.into())
    }

    fn encode_words(&self, words: &[&str]) -> Result<Encoding, TokenizerError> {
        let encoding = self
            .tokenizer
            .encode(words.to_vec(), true)
            .map_err(|e| TokenizerError::Encode(e.to_string()))?;

        Ok(encoding.into())
    }

    fn special_tokens(&self) -> &SpecialTokens {
        &self.special_tokens
    }

    fn max_length(&self) -> usize {
        self.max_length
    }
}
