//! Task 3z: an exited child lingers as a zombie until its parent waits
//!
//! The scan of `ps` output is best-effort; whether the zombie shows up
//! depends on how quickly the kernel has processed the child's exit.

use super::fork_or_drain;
use crate::config::{DEFUNCT_MARKER, PROCESS_LISTING_ARGS, PROCESS_LISTING_BIN, ZOMBIE_SETTLE};
use crate::core::reaper::{ChildSet, ReapReport};
use crate::error::{LabError, LabResult};
use crate::platform::{self, Fork};
use nix::unistd::Pid;
use std::process::Command;
use std::thread;
use std::time::Duration;

/// Lines of a process listing that mark a defunct entry
pub fn filter_defunct(listing: &str) -> Vec<&str> {
    listing
        .lines()
        .filter(|line| line.contains(DEFUNCT_MARKER))
        .collect()
}

/// Whether `pid` appears as a whitespace-separated column of `line`
pub fn mentions_pid(line: &str, pid: Pid) -> bool {
    let needle = pid.as_raw().to_string();
    line.split_whitespace().any(|column| column == needle)
}

/// Run the system process listing and keep the defunct lines
pub fn list_defunct() -> LabResult<Vec<String>> {
    let output = Command::new(PROCESS_LISTING_BIN)
        .args(PROCESS_LISTING_ARGS)
        .output()
        .map_err(|source| LabError::ProcessListing {
            command: format!("{} {}", PROCESS_LISTING_BIN, PROCESS_LISTING_ARGS.join(" ")),
            source,
        })?;
    let listing = String::from_utf8_lossy(&output.stdout);
    Ok(filter_defunct(&listing)
        .into_iter()
        .map(str::to_string)
        .collect())
}

pub fn zombie_demo(reap_delay: Duration) -> LabResult<ReapReport> {
    println!("[Task 3 - zombie] Starting demo");

    let mut children = ChildSet::new();
    let child = match fork_or_drain(&mut children)? {
        Fork::Child => {
            println!(
                "[Child] PID={} exiting immediately (becomes zombie until parent waits).",
                platform::current_pid()
            );
            platform::exit_child(0)
        }
        Fork::Parent(pid) => pid,
    };
    children.record(child);

    println!(
        "[Parent] PID={} NOT calling wait() yet. Checking for defunct processes...",
        platform::current_pid()
    );
    thread::sleep(ZOMBIE_SETTLE);
    report_defunct(child);

    thread::sleep(reap_delay);
    let report = children.reap_all(|record| {
        println!(
            "[Parent] After wait(): ({}, {})",
            record.pid,
            record.status.raw()
        )
    })?;
    println!("[Task 3 - zombie] Demo complete.");
    Ok(report)
}

fn report_defunct(child: Pid) {
    match list_defunct() {
        Ok(lines) if lines.is_empty() => {
            println!("[Parent] No defunct lines found (timing may vary).");
        }
        Ok(lines) => {
            println!("[Parent] Found defunct lines (zombie):");
            for line in &lines {
                println!("{}", line);
            }
            if lines.iter().any(|line| mentions_pid(line, child)) {
                println!("[Parent] Child {} is among them.", child);
            }
        }
        Err(err) => println!("[Parent] Could not scan for defunct processes: {}", err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const LISTING: &str = "\
F S   UID     PID    PPID  C PRI  NI ADDR SZ WCHAN  TTY          TIME CMD
4 S     0       1       0  0  80   0 -  5000 -      ?        00:00:01 systemd
0 S  1000    4100    4000  0  80   0 -  2000 -      pts/0    00:00:00 proclab
1 Z  1000    4101    4100  0  80   0 -     0 -      pts/0    00:00:00 proclab <defunct>
0 R  1000    4102    4000  0  80   0 -  2500 -      pts/0    00:00:00 ps
";

    #[test]
    fn keeps_only_defunct_lines() {
        let lines = filter_defunct(LISTING);
        assert_eq!(lines.len(), 1);
        assert!(lines[0].contains("4101"));
    }

    #[test]
    fn pid_match_is_column_exact() {
        let line = filter_defunct(LISTING)[0];
        assert!(mentions_pid(line, Pid::from_raw(4101)));
        assert!(mentions_pid(line, Pid::from_raw(4100)));
        assert!(!mentions_pid(line, Pid::from_raw(410)));
    }

    #[test]
    fn listing_without_zombies_is_empty() {
        assert!(filter_defunct("PID CMD\n1 init\n").is_empty());
    }
}
