//! Task 1: create N children and reap them

use super::fork_or_drain;
use crate::config::CHILD_GREETING_PAUSE;
use crate::core::reaper::{ChildSet, ReapReport};
use crate::error::LabResult;
use crate::platform::{self, Fork};
use nix::unistd::Pid;
use std::thread;

/// Pids in creation order plus statuses in delivery order
#[derive(Debug)]
pub struct SpawnOutcome {
    pub spawned: Vec<Pid>,
    pub report: ReapReport,
}

pub fn create_children(n: usize) -> LabResult<SpawnOutcome> {
    println!(
        "[Task 1] Parent PID: {}, creating {} children",
        platform::current_pid(),
        n
    );

    let mut children = ChildSet::new();
    for index in 1..=n {
        match fork_or_drain(&mut children)? {
            Fork::Child => greet_and_exit(index),
            Fork::Parent(pid) => {
                children.record(pid);
                println!("[Parent] spawned child PID={}", pid);
            }
        }
    }

    let report = children.reap_all(|record| {
        println!(
            "[Parent] wait() returned pid={} status={}",
            record.pid,
            record.status.raw()
        )
    })?;
    println!("[Task 1] All children reaped.");

    Ok(SpawnOutcome {
        spawned: children.spawned().to_vec(),
        report,
    })
}

fn greet_and_exit(index: usize) -> ! {
    println!(
        "[Child] PID={} PPID={} Message='Hello from child {}'",
        platform::current_pid(),
        platform::parent_pid(),
        index
    );
    thread::sleep(CHILD_GREETING_PAUSE);
    platform::exit_child(0)
}
