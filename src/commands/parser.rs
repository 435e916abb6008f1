//! Command-line definition and parsing
//!
//! Uses clap to define the single-entry-point interface

use crate::config::{
    DEFAULT_CHILD_COUNT, DEFAULT_COMMAND, DEFAULT_ITERATIONS, DEFAULT_ORPHAN_SLEEP_SECS,
    DEFAULT_ZOMBIE_REAP_DELAY_SECS,
};
use clap::{Parser, ValueEnum};
use std::ffi::OsString;
use std::fmt;

/// Demonstration selected with `--task`
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskId {
    /// Create N children and reap them
    #[value(name = "1")]
    Spawn,
    /// Children replace their image with a command
    #[value(name = "2")]
    Exec,
    /// Leave an exited child unreaped for a while
    #[value(name = "3z")]
    Zombie,
    /// Exit before the child so it is re-parented
    #[value(name = "3o")]
    Orphan,
    /// Summarise /proc/<pid>
    #[value(name = "4")]
    Inspect,
    /// CPU-bound children at different niceness
    #[value(name = "5")]
    Priority,
}

impl TaskId {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskId::Spawn => "1",
            TaskId::Exec => "2",
            TaskId::Zombie => "3z",
            TaskId::Orphan => "3o",
            TaskId::Inspect => "4",
            TaskId::Priority => "5",
        }
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How task 2 children run the command
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExecMode {
    /// Replace the child's process image
    #[default]
    Exec,
    /// Run the command as a nested subprocess, then exit
    Subprocess,
}

/// proclab - process-management lab: fork/exec, zombies, orphans, /proc, nice
#[derive(Parser, Debug, Clone)]
#[command(
    name = "proclab",
    about = "OS lab tasks: fork/exec/zombie/orphan/proc/nice",
    version
)]
pub struct Cli {
    /// Which task: 1, 2, 3z (zombie), 3o (orphan), 4, 5
    #[arg(long, value_enum)]
    pub task: TaskId,

    /// Number of child processes
    #[arg(long, default_value_t = DEFAULT_CHILD_COUNT)]
    pub n: usize,

    /// Command for task 2 (quoted)
    #[arg(long, default_value = DEFAULT_COMMAND)]
    pub cmd: String,

    /// PID for task 4
    #[arg(long)]
    pub pid: Option<u32>,

    /// Work iterations for task 5 (lower on weak machines)
    #[arg(long, default_value_t = DEFAULT_ITERATIONS)]
    pub iterations: u64,

    /// Task 2: replace the child image or run a nested subprocess
    #[arg(long, value_enum, default_value_t = ExecMode::Exec)]
    pub mode: ExecMode,

    /// Task 3o: seconds the orphaned child sleeps before re-checking its parent
    #[arg(long, default_value_t = DEFAULT_ORPHAN_SLEEP_SECS)]
    pub sleep: u64,

    /// Task 3z: seconds the zombie stays unreaped after the scan
    #[arg(long, default_value_t = DEFAULT_ZOMBIE_REAP_DELAY_SECS)]
    pub delay: u64,

    /// Log filter (trace, debug, info, warn, error); defaults to PROCLAB_LOG/RUST_LOG
    #[arg(long)]
    pub log_level: Option<String>,
}

impl Cli {
    /// Parse process arguments (clap handles errors and exits)
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Parse a custom argv (for tests)
    pub fn try_parse_args_from<I, T>(iter: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        Self::try_parse_from(iter)
    }
}
