use crate::error::EnsembleError;
use crate::processing::ensemble::majority_label;
use ndarray::{Array1, Array2, ArrayView1, ArrayView2, Axis};
use rayon::prelude::*;
use std::cmp::Ordering;

/// Brute-force k-nearest-neighbor classifier over one channel's feature
/// matrix. Fitting stores the reference samples; all work happens at
/// prediction time.
#[derive(Debug)]
pub struct KnnModel {
    k: usize,
    reference: Array2<f64>,
    labels: Array1<i64>,
}

impl KnnModel {
    /// Store the reference matrix and labels after validating that they
    /// agree on row count and that `k` is usable.
    pub fn fit(
        k: usize,
        reference: Array2<f64>,
        labels: Array1<i64>,
    ) -> Result<Self, EnsembleError> {
        if k == 0 || k > reference.nrows() {
            return Err(EnsembleError::InvalidK {
                k,
                n_samples: reference.nrows(),
            });
        }
        Ok(Self {
            k,
            reference,
            labels,
        })
    }

    pub fn k(&self) -> usize {
        self.k
    }

    pub fn n_samples(&self) -> usize {
        self.reference.nrows()
    }

    /// Predict one label per query row. Queries are scored independently,
    /// in parallel.
    pub fn predict(&self, queries: ArrayView2<f64>) -> Array1<i64> {
        let labels: Vec<i64> = queries
            .axis_iter(Axis(0))
            .into_par_iter()
            .map(|query| self.predict_one(query))
            .collect();
        Array1::from_vec(labels)
    }

    /// Majority label among the k nearest reference rows by squared
    /// Euclidean distance. Ties among neighbor labels go to the smallest
    /// class, matching the ensemble fusion rule.
    fn predict_one(&self, query: ArrayView1<f64>) -> i64 {
        let mut scored: Vec<(f64, i64)> = self
            .reference
            .axis_iter(Axis(0))
            .zip(self.labels.iter())
            .map(|(row, &label)| {
                let dist = row
                    .iter()
                    .zip(query.iter())
                    .map(|(a, b)| (a - b) * (a - b))
                    .sum::<f64>();
                (dist, label)
            })
            .collect();

        scored.sort_unstable_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(Ordering::Equal));

        let neighbors = scored[..self.k].iter().map(|&(_, label)| label);
        // fit() guarantees k >= 1, so there is at least one vote
        majority_label(neighbors).expect("k >= 1 neighbors")
    }
}
