/// Pad each row with `pad` up to `seq_length`. Rows already at or past the length are kept as is.
pub fn pad_to<T: Clone>(pad: T, rows: Vec<Vec<T>>, seq_length: usize) -> Vec<Vec<T>> {
    rows.into_iter()
        .map(|mut row| {
            if row.len() < seq_length {
                row.resize(seq_length, pad.clone());
            }

            row
        })
        .collect()
}

/// The length of the longest row
pub fn longest<T>(rows: &[Vec<T>]) -> usize {
    rows.iter().map(Vec::len).max().unwrap_or(0)
}
