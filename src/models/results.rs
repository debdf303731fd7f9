use serde::{Deserialize, Serialize};

use crate::settings::split_token_tag;

/// The prediction of a token classifier for a single token
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenClassResult {
    /// Id of the word annotation the token belongs to, or a special token marker
    pub uuid: String,

    /// Vocabulary id of the token
    pub token_id: u32,

    /// Predicted class id
    pub class_id: usize,

    /// The token string
    pub token: String,

    /// Predicted label, e.g. "B-header"
    pub class_name: String,

    /// The label without its tag, e.g. "header"
    pub semantic_name: String,

    /// The tag of the label, e.g. "B"
    pub bio_tag: String,

    /// Confidence of the prediction
    pub score: Option<f32>,
}

impl TokenClassResult {
    /// Build a result from a predicted label, splitting it into semantic name and tag
    pub fn new(
        uuid: impl Into<String>,
        token_id: u32,
        class_id: usize,
        token: impl Into<String>,
        class_name: impl Into<String>,
        score: Option<f32>,
    ) -> Self {
        let class_name = class_name.into();
        let (semantic_name, bio_tag) = split_token_tag(&class_name);

        Self {
            uuid: uuid.into(),
            token_id,
            class_id,
            token: token.into(),
            class_name,
            semantic_name,
            bio_tag: bio_tag.to_string(),
            score,
        }
    }
}

/// The prediction of a sequence classifier for a whole page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SequenceClassResult {
    /// Predicted class id
    pub class_id: usize,

    /// Predicted label
    pub class_name: String,

    /// Confidence of the prediction
    pub score: Option<f32>,

    /// The label as the model's config names it
    pub class_name_orig: String,
}

impl SequenceClassResult {
    /// Build a result whose label is taken as is from the model config
    pub fn new(class_id: usize, class_name: impl Into<String>, score: Option<f32>) -> Self {
        let class_name = class_name.into();

        Self {
            class_id,
            class_name_orig: class_name.clone(),
            class_name,
            score,
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_token_result_splits_label() {
        let result = TokenClassResult::new("w1", 7592, 1, "hello", "B-header", Some(0.9));

        assert_eq!(result.semantic_name, "header");
        assert_eq!(result.bio_tag, "B");
    }

    #[test]
    fn test_token_result_outside() {
        let result = TokenClassResult::new("w1", 7592, 0, "hello", "O", None);

        assert_eq!(result.semantic_name, "other");
        assert_eq!(result.bio_tag, "O");
    }
}
