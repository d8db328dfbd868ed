//! Per-sensor KNN ensemble for activity classification.
//!
//! The pipeline loads 31 channel-specific feature matrices per split,
//! optionally drops degenerate training rows, trains one nearest-neighbor
//! classifier per channel on a shared label vector, fuses the per-channel
//! predictions by majority vote and writes the fused labels as a
//! two-column submission CSV.

pub mod cli;
pub mod dataset;
pub mod error;
pub mod parser;
pub mod processing;
pub mod submission;
pub mod types;
pub mod utils;

pub use dataset::SensorDataset;
pub use error::{DataError, EnsembleError, SubmissionError};
pub use processing::{ChannelEnsemble, KnnModel, drop_degenerate_rows, majority_label};
pub use submission::write_submission;
pub use types::RunConfig;
