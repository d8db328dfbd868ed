//! Utility functions for file handling

pub mod file_utils;

// Re-export commonly used utility functions for convenience
pub use file_utils::*;
