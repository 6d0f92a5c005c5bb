pub fn mean(data: &[f64]) -> Option<f64> {
    if data.is_empty() {
        return None;
    }
    Some(data.iter().sum::<f64>() / data.len() as f64)
}

/// Population standard deviation.
pub fn std_dev(data: &[f64]) -> Option<f64> {
    let data_mean = mean(data)?;
    let variance = data
        .iter()
        .map(|value| {
            let diff = data_mean - *value;
            diff * diff
        })
        .sum::<f64>()
        / data.len() as f64;

    Some(variance.sqrt())
}

/// Scores as floats, for feeding [`mean`] and [`std_dev`].
pub fn scores_as_f64<I: IntoIterator<Item = u8>>(scores: I) -> Vec<f64> {
    scores.into_iter().map(f64::from).collect()
}
