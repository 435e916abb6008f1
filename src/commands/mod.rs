//! Command-line handling
//!
//! Argument parsing and shell-style command splitting

pub mod parser;
pub mod tokenize;

pub use parser::*;
