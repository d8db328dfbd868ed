use crate::error::EnsembleError;
use crate::processing::knn::KnnModel;
use itertools::Itertools;
use ndarray::{Array1, Array2, ArrayView1, Axis};
use std::cmp::Reverse;

/// One nearest-neighbor classifier per channel, trained on channel-specific
/// feature matrices and a shared label vector, fused by majority vote.
#[derive(Debug)]
pub struct ChannelEnsemble {
    models: Vec<KnnModel>,
}

impl ChannelEnsemble {
    /// Train one model per channel. Every channel must have as many
    /// training rows as there are labels; channels are otherwise
    /// independent.
    pub fn fit(
        k: usize,
        train: &[Array2<f64>],
        labels: ArrayView1<i64>,
    ) -> Result<Self, EnsembleError> {
        if train.is_empty() {
            return Err(EnsembleError::NoModels);
        }

        let mut models = Vec::with_capacity(train.len());
        for (channel, matrix) in train.iter().enumerate() {
            if matrix.nrows() != labels.len() {
                return Err(EnsembleError::ShapeMismatch {
                    channel,
                    rows: matrix.nrows(),
                    labels: labels.len(),
                });
            }
            models.push(KnnModel::fit(k, matrix.clone(), labels.to_owned())?);
        }

        log::info!("fitted {} channel models with k={k}", models.len());
        Ok(Self { models })
    }

    pub fn num_channels(&self) -> usize {
        self.models.len()
    }

    /// Predict every channel against its test matrix, stack the results
    /// into a (channels, N) matrix and fuse each column by majority vote.
    pub fn predict(&self, test: &[Array2<f64>]) -> Result<Array1<i64>, EnsembleError> {
        let predictions = self.predict_per_channel(test)?;
        Ok(fuse_predictions(&predictions))
    }

    /// The raw per-channel prediction matrix, one row per channel.
    pub fn predict_per_channel(&self, test: &[Array2<f64>]) -> Result<Array2<i64>, EnsembleError> {
        if test.len() != self.models.len() {
            return Err(EnsembleError::ChannelCount {
                expected: self.models.len(),
                found: test.len(),
            });
        }
        let n_samples = test[0].nrows();
        for (channel, matrix) in test.iter().enumerate() {
            if matrix.nrows() != n_samples {
                return Err(EnsembleError::TestShape {
                    channel,
                    rows: matrix.nrows(),
                    expected: n_samples,
                });
            }
        }

        let mut predictions = Array2::zeros((self.models.len(), n_samples));
        for (channel, (model, matrix)) in self.models.iter().zip(test).enumerate() {
            let channel_predictions = model.predict(matrix.view());
            predictions
                .row_mut(channel)
                .assign(&channel_predictions);
        }
        Ok(predictions)
    }
}

/// Fuse a (channels, N) prediction matrix into one label per sample by
/// taking the per-column mode.
pub fn fuse_predictions(predictions: &Array2<i64>) -> Array1<i64> {
    let fused: Vec<i64> = predictions
        .axis_iter(Axis(1))
        .map(|column| {
            majority_label(column.iter().copied()).expect("at least one channel per column")
        })
        .collect();
    Array1::from_vec(fused)
}

/// Mode of a vote set with a deterministic tie-break: highest count wins,
/// ties go to the numerically smallest label. `None` for an empty vote set.
pub fn majority_label<I>(votes: I) -> Option<i64>
where
    I: IntoIterator<Item = i64>,
{
    votes
        .into_iter()
        .counts()
        .into_iter()
        .min_by_key(|&(label, count)| (Reverse(count), label))
        .map(|(label, _)| label)
}
