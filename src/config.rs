use std::time::Duration;

pub const DEFAULT_CHILD_COUNT: usize = 3;
pub const DEFAULT_COMMAND: &str = "ls -l";
pub const DEFAULT_ITERATIONS: u64 = 2_000_000;

// Ascending niceness ladder handed out to priority-demo children in spawn order.
// Its length also caps how many children that demo will spawn.
pub const NICE_LADDER: [i32; 5] = [0, 5, 10, 15, 19];

pub const CHILD_GREETING_PAUSE: Duration = Duration::from_secs(1);
pub const ZOMBIE_SETTLE: Duration = Duration::from_millis(100);
pub const DEFAULT_ZOMBIE_REAP_DELAY_SECS: u64 = 2;
pub const DEFAULT_ORPHAN_SLEEP_SECS: u64 = 10;

pub const PROC_ROOT: &str = "/proc";
pub const STATUS_FIELDS: [&str; 5] = ["Name:", "State:", "VmRSS:", "VmSize:", "Threads:"];

pub const PROCESS_LISTING_BIN: &str = "ps";
pub const PROCESS_LISTING_ARGS: [&str; 1] = ["-el"];
pub const DEFUNCT_MARKER: &str = "defunct";

pub const LOG_ENV: &str = "PROCLAB_LOG";
pub const DEFAULT_LOG_FILTER: &str = "warn";

// Exit statuses used by children whose image replacement failed.
pub const EXIT_PROGRAM_NOT_FOUND: i32 = 1;
pub const EXIT_EXEC_FAILED: i32 = 127;
