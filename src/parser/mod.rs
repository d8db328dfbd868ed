//! Parsers for the whitespace-delimited sensor text files

pub mod matrix_parser;

// Re-export the parsing functions
pub use matrix_parser::{parse_row, parse_value};
