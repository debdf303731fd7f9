#![allow(dead_code)]

use std::{
    cell::{Cell, RefCell},
    collections::BTreeMap,
};

use deepdoc_lm::{
    datapoint::{BoundingBox, CategoryAnnotation, Image, ImageAnnotation, SubCategories},
    mapper::LayoutLmFeatures,
    models::{
        LanguageModel, SequenceClassResult, SequenceClassifier, TokenClassResult, TokenClassifier,
    },
    settings::{LayoutType, Relationships, WordType},
    tokenizer::{Encoding, LmTokenizer, SpecialTokens, TokenizerError},
};

pub const WORD_1: &str = "429e2ed0-7f89-31bf-bba5-0f0f65c0eb2e";
pub const WORD_2: &str = "2b46086c-a480-357d-8e07-29b177d150b8";
pub const WORD_3: &str = "8c6c765c-3e99-3154-ae2e-6d8b661e9bcb";
pub const WORD_4: &str = "16860148-9a2b-3530-b33e-9aaba857f5ce";

pub const WORD_IDS: [&str; 4] = [WORD_1, WORD_2, WORD_3, WORD_4];

/// Vocabulary shared by the mock tokenizer and the Hugging Face tokenizer fixture
pub const VOCAB: [(&str, u32); 8] = [
    ("[PAD]", 0),
    ("[UNK]", 100),
    ("[CLS]", 101),
    ("[SEP]", 102),
    ("hello", 7592),
    ("world", 2088),
    ("good", 2204),
    ("##bye", 9061),
];

fn word(annotation_id: &str, text: &str, bbox: BoundingBox, reading_order: usize) -> ImageAnnotation {
    let mut word = ImageAnnotation::new(LayoutType::Word.as_str(), bbox).with_id(annotation_id);

    word.dump_sub_category(
        WordType::Characters.as_str(),
        CategoryAnnotation::new(WordType::Characters.as_str()).with_value(text),
    );
    word.dump_sub_category(
        Relationships::ReadingOrder.as_str(),
        CategoryAnnotation::new(Relationships::ReadingOrder.as_str()).with_id(Some(reading_order)),
    );

    word
}

/// A page with two text blocks holding two words each. Words are dumped out of reading order.
pub fn dp_image_with_layout_and_word_annotations() -> Image {
    let mut dp = Image::new("sample_2.png", "/testing/sample", 1654.0, 2339.0);

    let mut block_1 = ImageAnnotation::new(
        LayoutType::Title.as_str(),
        BoundingBox::new(100.0, 160.0, 700.0, 240.0, true),
    )
    .with_id("e1dd2ea5-e1e6-3d3e-a6d5-77d9f69c82e9");
    block_1.dump_relationship(Relationships::Child.as_str(), WORD_1);
    block_1.dump_relationship(Relationships::Child.as_str(), WORD_2);

    let mut block_2 = ImageAnnotation::new(
        LayoutType::Text.as_str(),
        BoundingBox::new(100.0, 400.0, 900.0, 480.0, true),
    )
    .with_id("f7b7e7e4-9c6d-3c0e-9a2e-1b7b3ef6a4a1");
    block_2.dump_relationship(Relationships::Child.as_str(), WORD_3);
    block_2.dump_relationship(Relationships::Child.as_str(), WORD_4);

    dp.dump(block_1).unwrap();
    dp.dump(block_2).unwrap();

    dp.dump(word(
        WORD_3,
        "Goodbye",
        BoundingBox::new(110.0, 410.0, 400.0, 470.0, true),
        3,
    ))
    .unwrap();
    dp.dump(word(
        WORD_4,
        "world",
        BoundingBox::new(420.0, 410.0, 880.0, 470.0, true),
        4,
    ))
    .unwrap();
    dp.dump(word(
        WORD_1,
        "Hello",
        BoundingBox::new(110.0, 170.0, 380.0, 230.0, true),
        1,
    ))
    .unwrap();
    dp.dump(word(
        WORD_2,
        "world",
        BoundingBox::new(400.0, 170.0, 690.0, 230.0, true),
        2,
    ))
    .unwrap();

    dp
}

/// A page without any word
pub fn dp_image_without_words() -> Image {
    let mut dp = Image::new("blank.png", "/testing/sample", 1654.0, 2339.0);

    dp.dump(ImageAnnotation::new(
        LayoutType::Figure.as_str(),
        BoundingBox::new(100.0, 100.0, 1500.0, 2000.0, true),
    ))
    .unwrap();

    dp
}

/// A WordPiece tokenizer over [`VOCAB`] that records every `tokenize` call
pub struct MockTokenizer {
    vocab: BTreeMap<String, u32>,
    special: SpecialTokens,
    pub tokenize_calls: RefCell<Vec<String>>,
}

impl MockTokenizer {
    pub fn new() -> Self {
        Self {
            vocab: VOCAB.iter().map(|(t, id)| (t.to_string(), *id)).collect(),
            special: SpecialTokens::bert(),
            tokenize_calls: RefCell::new(Vec::new()),
        }
    }

    fn pieces(&self, word: &str) -> Vec<String> {
        let word = word.to_lowercase();
        let mut pieces = Vec::new();
        let mut start = 0;

        while start < word.len() {
            let mut end = word.len();
            let mut found = None;

            while end > start {
                let candidate = if start == 0 {
                    word[start..end].to_string()
                } else {
                    format!("##{}", &word[start..end])
                };

                if self.vocab.contains_key(&candidate) {
                    found = Some(candidate);
                    break;
                }

                end -= 1;
            }

            match found {
                Some(piece) => {
                    pieces.push(piece);
                    start = end;
                }
                None => return vec![self.special.unk_token.clone()],
            }
        }

        pieces
    }

    fn id(&self, piece: &str) -> u32 {
        self.vocab
            .get(piece)
            .copied()
            .unwrap_or(self.special.unk_token_id)
    }
}

impl LmTokenizer for MockTokenizer {
    fn tokenize(&self, word: &str) -> Result<Vec<String>, TokenizerError> {
        self.tokenize_calls.borrow_mut().push(word.to_string());

        Ok(self.pieces(word))
    }

    fn encode(&self, text: &str) -> Result<Encoding, TokenizerError> {
        let words: Vec<&str> = text.split_whitespace().collect();

        self.encode_words(&words)
    }

    fn encode_words(&self, words: &[&str]) -> Result<Encoding, TokenizerError> {
        let mut tokens = vec![(self.special.cls_token.clone(), None)];

        for (word_id, word) in words.iter().enumerate() {
            for piece in self.pieces(word) {
                tokens.push((piece, Some(word_id as u32)));
            }
        }

        tokens.push((self.special.sep_token.clone(), None));

        Ok(Encoding {
            ids: tokens.iter().map(|(t, _)| self.id(t)).collect(),
            type_ids: vec![0; tokens.len()],
            attention_mask: vec![1; tokens.len()],
            special_tokens_mask: tokens.iter().map(|(_, w)| u32::from(w.is_none())).collect(),
            word_ids: tokens.iter().map(|(_, w)| *w).collect(),
            tokens: tokens.into_iter().map(|(t, _)| t).collect(),
        })
    }

    fn special_tokens(&self) -> &SpecialTokens {
        &self.special
    }

    fn max_length(&self) -> usize {
        512
    }
}

pub fn token_categories() -> BTreeMap<usize, String> {
    BTreeMap::from([
        (0, "O".to_string()),
        (1, "B-header".to_string()),
        (2, "I-header".to_string()),
    ])
}

/// Predictions for the tokens of the page fixture, in reading order
pub fn token_class_result() -> Vec<TokenClassResult> {
    vec![
        TokenClassResult::new("[CLS]", 101, 0, "[CLS]", "O", Some(0.99)),
        TokenClassResult::new(WORD_1, 7592, 1, "hello", "B-header", Some(0.91)),
        TokenClassResult::new(WORD_2, 2088, 1, "world", "B-header", Some(0.72)),
        TokenClassResult::new(WORD_3, 2204, 2, "good", "I-header", Some(0.88)),
        TokenClassResult::new(WORD_3, 9061, 0, "##bye", "O", Some(0.51)),
        TokenClassResult::new(WORD_4, 2088, 2, "world", "I-header", Some(0.83)),
        TokenClassResult::new("[SEP]", 102, 0, "[SEP]", "O", Some(0.99)),
    ]
}

pub fn sequence_class_result() -> SequenceClassResult {
    SequenceClassResult::new(1, "FOO", Some(0.8))
}

/// Returns fixed predictions and counts its calls
pub struct MockTokenClassifier {
    results: Vec<TokenClassResult>,
    categories: BTreeMap<usize, String>,
    pub calls: Cell<usize>,
}

impl MockTokenClassifier {
    pub fn new(results: Vec<TokenClassResult>) -> Self {
        Self {
            results,
            categories: token_categories(),
            calls: Cell::new(0),
        }
    }
}

impl LanguageModel for MockTokenClassifier {
    fn name(&self) -> &str {
        "mock/layoutlm-token-classifier"
    }

    fn categories(&self) -> &BTreeMap<usize, String> {
        &self.categories
    }
}

impl TokenClassifier for MockTokenClassifier {
    fn predict(&self, _features: &LayoutLmFeatures) -> anyhow::Result<Vec<TokenClassResult>> {
        self.calls.set(self.calls.get() + 1);

        Ok(self.results.clone())
    }
}

/// Predicts "B-header" for every token it is given
pub struct EchoTokenClassifier {
    categories: BTreeMap<usize, String>,
}

impl EchoTokenClassifier {
    pub fn new() -> Self {
        Self {
            categories: token_categories(),
        }
    }
}

impl LanguageModel for EchoTokenClassifier {
    fn name(&self) -> &str {
        "mock/echo"
    }

    fn categories(&self) -> &BTreeMap<usize, String> {
        &self.categories
    }
}

impl TokenClassifier for EchoTokenClassifier {
    fn predict(&self, features: &LayoutLmFeatures) -> anyhow::Result<Vec<TokenClassResult>> {
        let mut results = Vec::new();

        for row in 0..features.num_rows() {
            for (i, ann_id) in features.ann_ids[row].iter().enumerate() {
                results.push(TokenClassResult::new(
                    ann_id.clone(),
                    features.input_ids[row][i],
                    1,
                    features.tokens[row][i].clone(),
                    "B-header",
                    Some(1.0),
                ));
            }
        }

        Ok(results)
    }
}

/// Returns a fixed page label
pub struct MockSequenceClassifier {
    result: SequenceClassResult,
    categories: BTreeMap<usize, String>,
    pub calls: Cell<usize>,
}

impl MockSequenceClassifier {
    pub fn new(result: SequenceClassResult) -> Self {
        Self {
            result,
            categories: BTreeMap::from([(0, "BAR".to_string()), (1, "FOO".to_string())]),
            calls: Cell::new(0),
        }
    }
}

impl LanguageModel for MockSequenceClassifier {
    fn name(&self) -> &str {
        "mock/layoutlm-sequence-classifier"
    }

    fn categories(&self) -> &BTreeMap<usize, String> {
        &self.categories
    }
}

impl SequenceClassifier for MockSequenceClassifier {
    fn predict(&self, _features: &LayoutLmFeatures) -> anyhow::Result<SequenceClassResult> {
        self.calls.set(self.calls.get() + 1);

        Ok(self.result.clone())
    }
}

/// Always fails, as a model running out of memory would
pub struct FailingModel {
    categories: BTreeMap<usize, String>,
}

impl FailingModel {
    pub fn new() -> Self {
        Self {
            categories: token_categories(),
        }
    }
}

impl LanguageModel for FailingModel {
    fn name(&self) -> &str {
        "mock/failing"
    }

    fn categories(&self) -> &BTreeMap<usize, String> {
        &self.categories
    }
}

impl TokenClassifier for FailingModel {
    fn predict(&self, _features: &LayoutLmFeatures) -> anyhow::Result<Vec<TokenClassResult>> {
        Err(anyhow::anyhow!("out of memory"))
    }
}

impl SequenceClassifier for FailingModel {
    fn predict(&self, _features: &LayoutLmFeatures) -> anyhow::Result<SequenceClassResult> {
        Err(anyhow::anyhow!("out of memory"))
    }
}

/// A BERT-style `tokenizer.json` over [`VOCAB`]
pub fn tokenizer_json() -> String {
    let vocab: serde_json::Map<String, serde_json::Value> = VOCAB
        .iter()
        .map(|(token, id)| (token.to_string(), serde_json::Value::from(*id)))
        .collect();

    serde_json::json!({
        "version": "1.0",
        "truncation": null,
        "padding": null,
        "added_tokens": [],
        "normalizer": {
            "type": "BertNormalizer",
            "clean_text": true,
            "handle_chinese_chars": true,
            "strip_accents": null,
            "lowercase": true
        },
        "pre_tokenizer": { "type": "BertPreTokenizer" },
        "post_processor": {
            "type": "BertProcessing",
            "sep": ["[SEP]", 102],
            "cls": ["[CLS]", 101]
        },
        "decoder": null,
        "model": {
            "type": "WordPiece",
            "unk_token": "[UNK]",
            "continuing_subword_prefix": "##",
            "max_input_chars_per_word": 100,
            "vocab": vocab
        }
    })
    .to_string()
}

/// The category name of a sub-category of an annotation
pub fn sub_category_name(dp: &Image, annotation_id: &str, key: &str) -> String {
    dp.get_annotation(&[annotation_id])[0]
        .get_sub_category(key)
        .unwrap()
        .category_name
        .clone()
}
