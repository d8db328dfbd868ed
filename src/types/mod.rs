//! Plain data types shared across the pipeline

pub mod config;

// Re-export the main types for convenience
pub use config::RunConfig;
