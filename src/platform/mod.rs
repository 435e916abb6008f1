//! OS process primitives
//!
//! Thin wrappers over fork, exec, `_exit` and `nice` so the demonstrations
//! never touch `unsafe` directly.

mod unix;

pub use unix::*;
