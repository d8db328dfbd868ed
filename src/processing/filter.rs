use crate::dataset::{SENTINEL_VALUE, SensorDataset};
use bon::Builder;
use ndarray::{ArrayView1, Axis};
use std::collections::BTreeSet;

/// Summary of one filtering pass over a dataset.
#[derive(Debug, Builder)]
pub struct FilterReport {
    /// Rows removed from every training matrix and the label vector.
    pub dropped_train: usize,
    /// Degenerate rows found per channel on the training side.
    pub degenerate_per_channel: Vec<usize>,
    /// Degenerate rows found on the test side. These are never removed
    /// (every test sample needs a prediction); the count is diagnostic.
    pub degenerate_test: usize,
}

/// Remove degenerate training rows from the dataset.
///
/// A row is degenerate when its variance across the features is exactly
/// zero, or when it equals the sentinel vector marking a failed capture.
/// The drop set is the union over all channels and is applied to every
/// training matrix and the label vector in one step, so channels and labels
/// stay index-aligned.
pub fn drop_degenerate_rows(dataset: &mut SensorDataset) -> FilterReport {
    let mut drop: BTreeSet<usize> = BTreeSet::new();
    let mut degenerate_per_channel = Vec::with_capacity(dataset.train.len());

    for matrix in &dataset.train {
        let mut channel_count = 0usize;
        for (row_idx, row) in matrix.axis_iter(Axis(0)).enumerate() {
            if is_degenerate_train_row(row) {
                drop.insert(row_idx);
                channel_count += 1;
            }
        }
        degenerate_per_channel.push(channel_count);
    }

    let degenerate_test = dataset
        .test
        .iter()
        .flat_map(|matrix| matrix.axis_iter(Axis(0)))
        .filter(|row| row_variance(row.view()) == 0.0)
        .count();
    if degenerate_test > 0 {
        log::warn!("{degenerate_test} zero-variance test rows kept (every test sample is predicted)");
    }

    if !drop.is_empty() {
        let n_rows = dataset.labels.len();
        let keep: Vec<usize> = (0..n_rows).filter(|i| !drop.contains(i)).collect();

        for matrix in &mut dataset.train {
            *matrix = matrix.select(Axis(0), &keep);
        }
        dataset.labels = dataset.labels.select(Axis(0), &keep);

        log::info!(
            "dropped {} degenerate training rows, {} remain",
            drop.len(),
            keep.len()
        );
    }

    FilterReport::builder()
        .dropped_train(drop.len())
        .degenerate_per_channel(degenerate_per_channel)
        .degenerate_test(degenerate_test)
        .build()
}

fn is_degenerate_train_row(row: ArrayView1<f64>) -> bool {
    row_variance(row) == 0.0 || is_sentinel_row(row)
}

/// Population variance of a feature row (mean of squared deviations).
pub fn row_variance(row: ArrayView1<f64>) -> f64 {
    if row.is_empty() {
        return 0.0;
    }
    let mean = row.sum() / row.len() as f64;
    row.iter().map(|v| (v - mean) * (v - mean)).sum::<f64>() / row.len() as f64
}

/// True when every entry equals the failed-capture sentinel value.
pub fn is_sentinel_row(row: ArrayView1<f64>) -> bool {
    !row.is_empty() && row.iter().all(|&v| v == SENTINEL_VALUE)
}
