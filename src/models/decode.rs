use std::collections::BTreeMap;

use crate::mapper::LayoutLmFeatures;

use super::{ModelError, SequenceClassResult, TokenClassResult};

/// Normalize logits into probabilities
pub fn softmax(logits: &[f32]) -> Vec<f32> {
    let max = logits.iter().copied().fold(f32::NEG_INFINITY, f32::max);
    let exps: Vec<f32> = logits.iter().map(|logit| (logit - max).exp()).collect();
    let sum: f32 = exps.iter().sum();

    exps.into_iter().map(|e| e / sum).collect()
}

/// The index and value of the largest entry
pub fn argmax(values: &[f32]) -> Option<(usize, f32)> {
    values
        .iter()
        .copied()
        .enumerate()
        .fold(None, |best, (i, value)| match best {
            Some((_, best_value)) if best_value >= value => best,
            _ => Some((i, value)),
        })
}

fn classify(
    logits: &[f32],
    categories: &BTreeMap<usize, String>,
) -> Result<(usize, String, f32), ModelError> {
    if logits.len() != categories.len() {
        return Err(ModelError::Shape {
            expected: categories.len(),
            actual: logits.len(),
        });
    }

    let (class_id, score) = argmax(&softmax(logits)).ok_or(ModelError::Shape {
        expected: categories.len(),
        actual: 0,
    })?;

    let class_name = categories
        .get(&class_id)
        .ok_or(ModelError::UnknownClass(class_id))?;

    Ok((class_id, class_name.clone(), score))
}

/// A feature row that must hold `len` values
fn row_of<T>(rows: &[Vec<T>], row: usize, len: usize) -> Result<&[T], ModelError> {
    let values = rows.get(row).map(Vec::as_slice).unwrap_or_default();

    if values.len() != len {
        return Err(ModelError::Shape {
            expected: len,
            actual: values.len(),
        });
    }

    Ok(values)
}

/// Turn the per-token logits of one feature row into token results. Padding positions are
/// skipped.
pub fn token_class_results(
    features: &LayoutLmFeatures,
    row: usize,
    logits: &[Vec<f32>],
    categories: &BTreeMap<usize, String>,
) -> Result<Vec<TokenClassResult>, ModelError> {
    let input_ids = features.input_ids.get(row).ok_or(ModelError::Shape {
        expected: row + 1,
        actual: features.num_rows(),
    })?;

    let len = input_ids.len();
    let attention_mask = row_of(&features.attention_mask, row, len)?;
    let ann_ids = row_of(&features.ann_ids, row, len)?;
    let tokens = row_of(&features.tokens, row, len)?;

    if logits.len() != len {
        return Err(ModelError::Shape {
            expected: len,
            actual: logits.len(),
        });
    }

    let mut results = Vec::with_capacity(len);

    for (i, token_logits) in logits.iter().enumerate() {
        if attention_mask[i] == 0 {
            continue;
        }

        let (class_id, class_name, score) = classify(token_logits, categories)?;

        results.push(TokenClassResult::new(
            ann_ids[i].clone(),
            input_ids[i],
            class_id,
            tokens[i].clone(),
            class_name,
            Some(score),
        ));
    }

    Ok(results)
}

/// Turn the logits of a whole sequence into a sequence result
pub fn sequence_class_result(
    logits: &[f32],
    categories: &BTreeMap<usize, String>,
) -> Result<SequenceClassResult, ModelError> {
    let (class_id, class_name, score) = classify(logits, categories)?;

    Ok(SequenceClassResult::new(class_id, class_name, Some(score)))
}
