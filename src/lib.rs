//! proclab library
//!
//! Process-management demonstrations for Linux: fork and reap, exec,
//! zombie and orphan lifecycles, /proc inspection and niceness.

pub mod commands;
pub mod config;
pub mod core;
pub mod error;
pub mod platform;
pub mod tasks;
pub mod utils;

// Re-export commonly used types for convenience
pub use commands::{Cli, ExecMode, TaskId};
pub use crate::core::models::{ExitRecord, ReapedStatus};
pub use crate::core::reaper::{ChildSet, ReapReport};
pub use error::{ErrorCategory, LabError, LabResult};
