#![allow(clippy::too_many_arguments)]

use derive_new::new;
use serde::{Deserialize, Serialize};

/// The Hugging Face `tokenizers` implementation
pub mod hf;

pub use hf::HfTokenizer;

/// The prefix marking a sub-word piece that continues the previous piece
pub static CONTINUING_SUBWORD_PREFIX: &str = "##";

/// The result of encoding a text or a list of words, with special tokens added
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Encoding {
    /// Token ids
    pub ids: Vec<u32>,

    /// Token strings
    pub tokens: Vec<String>,

    /// Segment ids
    pub type_ids: Vec<u32>,

    /// 1 for real tokens, 0 for padding
    pub attention_mask: Vec<u32>,

    /// 1 for special tokens, 0 otherwise
    pub special_tokens_mask: Vec<u32>,

    /// The index of the input word each token came from, `None` for special tokens
    pub word_ids: Vec<Option<u32>>,
}

impl Encoding {
    /// Number of tokens
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Whether the encoding holds no tokens
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

/// The special tokens a tokenizer frames and pads sequences with
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, new)]
pub struct SpecialTokens {
    /// Classification token opening a sequence
    pub cls_token: String,

    /// Id of the classification token
    pub cls_token_id: u32,

    /// Separator token closing a sequence
    pub sep_token: String,

    /// Id of the separator token
    pub sep_token_id: u32,

    /// Padding token
    pub pad_token: String,

    /// Id of the padding token
    pub pad_token_id: u32,

    /// Unknown token
    pub unk_token: String,

    /// Id of the unknown token
    pub unk_token_id: u32,
}

impl SpecialTokens {
    /// The special tokens of BERT-style uncased vocabularies, as used by LayoutLM
    pub fn bert() -> Self {
        Self::new(
            "[CLS]".to_string(),
            101,
            "[SEP]".to_string(),
            102,
            "[PAD]".to_string(),
            0,
            "[UNK]".to_string(),
            100,
        )
    }

    /// All special token ids
    pub fn all_ids(&self) -> [u32; 4] {
        [
            self.cls_token_id,
            self.sep_token_id,
            self.pad_token_id,
            self.unk_token_id,
        ]
    }

    /// Whether `token_id` is one of the framing or padding tokens
    pub fn is_special(&self, token_id: u32) -> bool {
        token_id == self.cls_token_id || token_id == self.sep_token_id || token_id == self.pad_token_id
    }
}

impl Default for SpecialTokens {
    fn default() -> Self {
        Self::bert()
    }
}

/// A tokenizer that can prepare words for a language model
pub trait LmTokenizer {
    /// Split a single word into sub-word pieces, without special tokens
    fn tokenize(&self, word: &str) -> Result<Vec<String>, TokenizerError>;

    /// Encode a text as one sequence, with special tokens
    fn encode(&self, text: &str) -> Result<Encoding, TokenizerError>;

    /// Encode words that are already split, with special tokens and word ids
    fn encode_words(&self, words: &[&str]) -> Result<Encoding, TokenizerError>;

    /// The special tokens of the vocabulary
    fn special_tokens(&self) -> &SpecialTokens;

    /// The maximum number of tokens the model accepts
    fn max_length(&self) -> usize;
}

/// Tokenizer Error
#[derive(thiserror::Error, Debug)]
pub enum TokenizerError {
    /// The tokenizer could not be loaded
    #[error("unable to load tokenizer: {0}")]
    Load(String),

    /// The input could not be encoded
    #[error("unable to encode: {0}")]
    Encode(String),

    /// The vocabulary has none of the candidate tokens for a special token
    #[error("no special token found among {0:?}")]
    MissingSpecialToken(Vec<String>),
}
