use serde::{Deserialize, Serialize};

use crate::{datapoint::Image, tokenizer::TokenizerError};

/// Mapping of page datapoints to LayoutLM features
pub mod layoutlm;

pub use layoutlm::{
    image_to_layoutlm, image_to_layoutlm_features, image_to_raw_features,
    raw_features_to_layoutlm_features,
};

/// A function turning a page into model-ready features. `None` means the page has nothing to
/// classify.
pub type MappingFn<T> =
    fn(&Image, &T, &FeatureOptions) -> Result<Option<LayoutLmFeatures>, MappingError>;

/// Padding strategies
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Padding {
    /// Pad every row to the maximum length
    #[default]
    MaxLength,

    /// Pad every row to the longest row of the batch
    Longest,

    /// Leave rows at their own length
    DoNotPad,
}

/// Options controlling how words become token rows
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeatureOptions {
    /// The padding strategy
    pub padding: Padding,

    /// Cut sequences longer than the maximum length
    pub truncation: bool,

    /// Split long sequences into several windows instead of cutting them
    pub return_overflowing_tokens: bool,

    /// Number of tokens consecutive windows share
    pub sliding_window_stride: usize,

    /// Overrides the maximum length of the tokenizer
    pub max_length: Option<usize>,

    /// Width of the coordinate grid boxes are scaled to
    pub input_width: u32,

    /// Height of the coordinate grid boxes are scaled to
    pub input_height: u32,
}

impl Default for FeatureOptions {
    fn default() -> Self {
        Self {
            padding: Padding::MaxLength,
            truncation: true,
            return_overflowing_tokens: false,
            sliding_window_stride: 0,
            max_length: None,
            input_width: 1000,
            input_height: 1000,
        }
    }
}

/// Word level features of a page, before tokenization
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawFeatures {
    /// The page id
    pub image_id: String,

    /// Page width in pixels
    pub width: u32,

    /// Page height in pixels
    pub height: u32,

    /// Word annotation ids, in reading order
    pub ann_ids: Vec<String>,

    /// Word texts
    pub words: Vec<String>,

    /// Word boxes on the input grid
    pub bbox: Vec<[i32; 4]>,
}

/// Token level features, one row per window of the page
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutLmFeatures {
    /// The page id of each row
    pub image_ids: Vec<String>,

    /// Page width in pixels
    pub width: u32,

    /// Page height in pixels
    pub height: u32,

    /// The word annotation id of each token, or a special token marker
    pub ann_ids: Vec<Vec<String>>,

    /// Token strings
    pub tokens: Vec<Vec<String>>,

    /// Token ids
    pub input_ids: Vec<Vec<u32>>,

    /// 1 for real tokens, 0 for padding
    pub attention_mask: Vec<Vec<u32>>,

    /// Segment ids
    pub token_type_ids: Vec<Vec<u32>>,

    /// Token boxes on the input grid
    pub bbox: Vec<Vec<[i32; 4]>>,
}

impl LayoutLmFeatures {
    /// Number of rows (windows)
    pub fn num_rows(&self) -> usize {
        self.input_ids.len()
    }
}

/// Mapping Error
#[derive(thiserror::Error, Debug)]
pub enum MappingError {
    /// A word annotation has no text
    #[error("word {0} has no characters")]
    MissingCharacters(String),

    /// Absolute boxes cannot be scaled without the page size
    #[error("image {0} has no size")]
    MissingImageSize(String),

    /// The stride leaves no room for new tokens in a window
    #[error("sliding window stride {stride} must be smaller than the window size {window}")]
    InvalidStride {
        /// The configured stride
        stride: usize,

        /// Content tokens per window
        window: usize,
    },

    /// Tokens and ids of the legacy mapping differ in length
    #[error("{tokens} tokens but {ids} input ids")]
    Misaligned {
        /// Number of tokens
        tokens: usize,

        /// Number of ids
        ids: usize,
    },

    /// The tokenizer failed
    #[error(transparent)]
    Tokenizer(#[from] TokenizerError),
}
