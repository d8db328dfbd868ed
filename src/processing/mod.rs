//! The numeric pipeline: degenerate-row filtering, per-channel KNN models
//! and majority-vote fusion

pub mod ensemble;
pub mod filter;
pub mod knn;

pub use ensemble::{ChannelEnsemble, fuse_predictions, majority_label};
pub use filter::{FilterReport, drop_degenerate_rows};
pub use knn::KnnModel;
