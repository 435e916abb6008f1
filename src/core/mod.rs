//! Core process bookkeeping
//!
//! Exit-status models and the reap loop shared by the spawning demonstrations

pub mod models;
pub mod reaper;
