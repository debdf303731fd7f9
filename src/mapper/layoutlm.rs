use std::ops::Range;

use crate::{
    datapoint::Image,
    settings::LayoutType,
    tokenizer::{LmTokenizer, SpecialTokens},
    utils::sequences::{longest, pad_to},
};

use super::{FeatureOptions, LayoutLmFeatures, MappingError, Padding, RawFeatures};

/// Annotation id marker of the classification token
pub static CLS_ANN_ID: &str = "[CLS]";

/// Annotation id marker of the separator token
pub static SEP_ANN_ID: &str = "[SEP]";

/// Annotation id marker of padding tokens
pub static PAD_ANN_ID: &str = "[PAD]";

/// A content token together with the word it belongs to
#[derive(Debug, Clone)]
struct WordToken {
    ann_id: String,
    token: String,
    input_id: u32,
    bbox: [i32; 4],
}

/// Collect the words of a page in reading order, with boxes scaled to the input grid.
///
/// Words carrying a reading order come first, sorted by it. The rest keep their stored order.
/// Returns `None` for a page without words.
pub fn image_to_raw_features(
    dp: &Image,
    options: &FeatureOptions,
) -> Result<Option<RawFeatures>, MappingError> {
    let mut words = dp.get_annotation_by_category(&[LayoutType::Word.as_str()]);

    if words.is_empty() {
        return Ok(None);
    }

    words.sort_by_key(|word| word.reading_order().unwrap_or(usize::MAX));

    let mut raw = RawFeatures {
        image_id: dp.image_id.clone(),
        width: dp.width.round() as u32,
        height: dp.height.round() as u32,
        ann_ids: Vec::with_capacity(words.len()),
        words: Vec::with_capacity(words.len()),
        bbox: Vec::with_capacity(words.len()),
    };

    for word in words {
        let text = word
            .characters()
            .ok_or_else(|| MappingError::MissingCharacters(word.annotation_id.clone()))?;

        if word.bounding_box.absolute_coords && (dp.width <= 0.0 || dp.height <= 0.0) {
            return Err(MappingError::MissingImageSize(dp.image_id.clone()));
        }

        raw.ann_ids.push(word.annotation_id.clone());
        raw.words.push(text.to_string());
        raw.bbox.push(word.bounding_box.to_grid(
            dp.width,
            dp.height,
            options.input_width,
            options.input_height,
        ));
    }

    Ok(Some(raw))
}

/// Tokenize raw word features and align annotation ids and boxes with the tokens.
///
/// Every row is framed by the classification and separator tokens. Sequences longer than the
/// maximum length are split into windows or cut, depending on the options, then padded.
pub fn raw_features_to_layoutlm_features<T: LmTokenizer>(
    raw: &RawFeatures,
    tokenizer: &T,
    options: &FeatureOptions,
) -> Result<LayoutLmFeatures, MappingError> {
    let words: Vec<&str> = raw.words.iter().map(String::as_str).collect();
    let encoding = tokenizer.encode_words(&words)?;

    let content: Vec<WordToken> = encoding
        .word_ids
        .iter()
        .enumerate()
        .filter_map(|(i, word_id)| {
            let word_id = (*word_id)? as usize;

            Some(WordToken {
                ann_id: raw.ann_ids.get(word_id)?.clone(),
                token: encoding.tokens[i].clone(),
                input_id: encoding.ids[i],
                bbox: *raw.bbox.get(word_id)?,
            })
        })
        .collect();

    build_rows(raw, &content, tokenizer, options)
}

/// Split content tokens into rows, frame each row with the classification and separator tokens
/// and pad the batch
fn build_rows<T: LmTokenizer>(
    raw: &RawFeatures,
    content: &[WordToken],
    tokenizer: &T,
    options: &FeatureOptions,
) -> Result<LayoutLmFeatures, MappingError> {
    let max_length = options.max_length.unwrap_or_else(|| tokenizer.max_length());
    let window = max_length.saturating_sub(2).max(1);

    let ranges = windows(content.len(), window, options)?;
    let special = tokenizer.special_tokens();
    let sep_box = [
        options.input_width as i32,
        options.input_height as i32,
        options.input_width as i32,
        options.input_height as i32,
    ];

    let mut features = LayoutLmFeatures {
        width: raw.width,
        height: raw.height,
        ..Default::default()
    };

    for range in ranges {
        let tokens = &content[range];

        let mut ann_ids = vec![CLS_ANN_ID.to_string()];
        ann_ids.extend(tokens.iter().map(|t| t.ann_id.clone()));
        ann_ids.push(SEP_ANN_ID.to_string());

        let mut token_strings = vec![special.cls_token.clone()];
        token_strings.extend(tokens.iter().map(|t| t.token.clone()));
        token_strings.push(special.sep_token.clone());

        let mut input_ids = vec![special.cls_token_id];
        input_ids.extend(tokens.iter().map(|t| t.input_id));
        input_ids.push(special.sep_token_id);

        let mut bbox = vec![[0, 0, 0, 0]];
        bbox.extend(tokens.iter().map(|t| t.bbox));
        bbox.push(sep_box);

        features.image_ids.push(raw.image_id.clone());
        features.attention_mask.push(vec![1; input_ids.len()]);
        features.token_type_ids.push(vec![0; input_ids.len()]);
        features.ann_ids.push(ann_ids);
        features.tokens.push(token_strings);
        features.input_ids.push(input_ids);
        features.bbox.push(bbox);
    }

    let seq_length = match options.padding {
        Padding::MaxLength => Some(max_length),
        Padding::Longest => Some(longest(&features.input_ids)),
        Padding::DoNotPad => None,
    };

    if let Some(seq_length) = seq_length {
        pad(&mut features, special, seq_length);
    }

    Ok(features)
}

/// Split `len` content tokens into the ranges each row holds
fn windows(
    len: usize,
    window: usize,
    options: &FeatureOptions,
) -> Result<Vec<Range<usize>>, MappingError> {
    if len <= window {
        return Ok(vec![0..len]);
    }

    if options.return_overflowing_tokens {
        if options.sliding_window_stride >= window {
            return Err(MappingError::InvalidStride {
                stride: options.sliding_window_stride,
                window,
            });
        }

        let step = window - options.sliding_window_stride;
        let mut ranges = Vec::new();
        let mut start = 0;

        loop {
            let end = (start + window).min(len);
            ranges.push(start..end);

            if end == len {
                break;
            }

            start += step;
        }

        return Ok(ranges);
    }

    if options.truncation {
        log::debug!("Truncating {} tokens to {}", len, window);

        return Ok(vec![0..window]);
    }

    log::warn!(
        "Sequence of {} tokens exceeds the maximum length and is neither truncated nor split",
        len + 2
    );

    Ok(vec![0..len])
}

fn pad(features: &mut LayoutLmFeatures, special: &SpecialTokens, seq_length: usize) {
    features.ann_ids = pad_to(
        PAD_ANN_ID.to_string(),
        std::mem::take(&mut features.ann_ids),
        seq_length,
    );
    features.tokens = pad_to(
        special.pad_token.clone(),
        std::mem::take(&mut features.tokens),
        seq_length,
    );
    features.input_ids = pad_to(
        special.pad_token_id,
        std::mem::take(&mut features.input_ids),
        seq_length,
    );
    features.attention_mask = pad_to(0, std::mem::take(&mut features.attention_mask), seq_length);
    features.token_type_ids = pad_to(0, std::mem::take(&mut features.token_type_ids), seq_length);
    features.bbox = pad_to([0, 0, 0, 0], std::mem::take(&mut features.bbox), seq_length);
}

/// Map a page to LayoutLM features: words in reading order, tokenized as pre-split words
pub fn image_to_layoutlm_features<T: LmTokenizer>(
    dp: &Image,
    tokenizer: &T,
    options: &FeatureOptions,
) -> Result<Option<LayoutLmFeatures>, MappingError> {
    match image_to_raw_features(dp, options)? {
        Some(raw) => raw_features_to_layoutlm_features(&raw, tokenizer, options).map(Some),
        None => Ok(None),
    }
}

/// Map a page to LayoutLM features by tokenizing one word at a time.
///
/// Tokens, boxes and annotation ids come from the per-word pieces. Input ids come from encoding
/// the space-joined words, and both halves must agree in length. Rows are then cut, split and
/// padded like [`raw_features_to_layoutlm_features`] does.
pub fn image_to_layoutlm<T: LmTokenizer>(
    dp: &Image,
    tokenizer: &T,
    options: &FeatureOptions,
) -> Result<Option<LayoutLmFeatures>, MappingError> {
    let Some(raw) = image_to_raw_features(dp, options)? else {
        return Ok(None);
    };

    let mut content = Vec::new();

    for ((word, ann_id), word_box) in raw.words.iter().zip(&raw.ann_ids).zip(&raw.bbox) {
        for piece in tokenizer.tokenize(word)? {
            content.push(WordToken {
                ann_id: ann_id.clone(),
                token: piece,
                input_id: 0,
                bbox: *word_box,
            });
        }
    }

    let encoding = tokenizer.encode(&raw.words.join(" "))?;

    // The encoding holds the content plus CLS and SEP
    if encoding.len() != content.len() + 2 {
        return Err(MappingError::Misaligned {
            tokens: content.len() + 2,
            ids: encoding.len(),
        });
    }

    for (token, input_id) in content.iter_mut().zip(&encoding.ids[1..]) {
        token.input_id = *input_id;
    }

    build_rows(&raw, &content, tokenizer, options).map(Some)
}
