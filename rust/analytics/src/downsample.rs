//! Bucket averaging for score charts.

use std::ops::Range;

/// Value every chart series starts from. Never part of the analysed data.
pub const CHART_ANCHOR: f64 = 0.0;

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Replaces each run of `n` consecutive values with its mean, rounded to two decimals.
/// The last bucket may be shorter. `n <= 1` returns the series unchanged.
///
/// ```
/// use handlens_analytics::downsample::downsample;
///
/// assert_eq!(downsample(&[1.0, 2.0, 3.0, 4.0, 5.0], 2), vec![1.5, 3.5, 5.0]);
/// ```
pub fn downsample(series: &[f64], n: usize) -> Vec<f64> {
    if n <= 1 {
        return series.to_vec();
    }
    series
        .chunks(n)
        .map(|chunk| round2(chunk.iter().sum::<f64>() / chunk.len() as f64))
        .collect()
}

/// Anchored chart series: [`CHART_ANCHOR`] followed by the downsampled values.
pub fn chart_series(series: &[f64], n: usize) -> Vec<f64> {
    chart_range(series, 0..series.len(), n)
}

/// Anchored chart series over the zoom window `range`, clamped to the series.
pub fn chart_range(series: &[f64], range: Range<usize>, n: usize) -> Vec<f64> {
    let end = range.end.min(series.len());
    let start = range.start.min(end);
    let mut chart = Vec::with_capacity(1 + (end - start).div_ceil(n.max(1)));
    chart.push(CHART_ANCHOR);
    chart.extend(downsample(&series[start..end], n));
    chart
}
