//! Task 5: CPU-bound children at different niceness
//!
//! The finish order is recorded as observed. Nothing checks it against the
//! niceness ladder; the scheduler only treats niceness as a hint.

use super::fork_or_drain;
use crate::config::NICE_LADDER;
use crate::core::reaper::{ChildSet, ReapReport};
use crate::error::LabResult;
use crate::platform::{self, Fork};
use std::hint::black_box;
use tracing::debug;

/// Niceness values for the first `n` children, capped at the ladder length
pub fn nice_ladder(n: usize) -> &'static [i32] {
    &NICE_LADDER[..n.min(NICE_LADDER.len())]
}

/// Sum the low bit of 0..iterations
pub fn busy_work(iterations: u64) -> u64 {
    (0..iterations).fold(0u64, |acc, k| acc + black_box(k & 1))
}

/// Try to apply `niceness`; a refusal is logged and the child carries on
fn apply_hint(niceness: i32) {
    match platform::apply_nice(niceness) {
        Ok(effective) => debug!(requested = niceness, effective, "nice applied"),
        Err(errno) => debug!(requested = niceness, %errno, "nice not applied"),
    }
}

pub fn priority_demo(n: usize, iterations: u64) -> LabResult<ReapReport> {
    let ladder = nice_ladder(n);
    println!(
        "[Task 5] Spawning {} CPU-bound children with different nice values.",
        ladder.len()
    );

    let mut children = ChildSet::new();
    for &niceness in ladder {
        match fork_or_drain(&mut children)? {
            Fork::Child => work_and_exit(niceness, iterations),
            Fork::Parent(pid) => {
                children.record(pid);
                println!("[Parent] spawned child {} with target nice={}", pid, niceness);
            }
        }
    }

    let report = children.reap_all(|record| {
        println!(
            "[Parent] Child finished: pid={} status={}",
            record.pid,
            record.status.raw()
        )
    })?;

    let order: Vec<String> = report
        .finish_order()
        .iter()
        .map(|pid| pid.to_string())
        .collect();
    println!("[Task 5] Finish order (PIDs): [{}]", order.join(", "));
    Ok(report)
}

fn work_and_exit(niceness: i32, iterations: u64) -> ! {
    apply_hint(niceness);
    let pid = platform::current_pid();
    println!("[Child] PID={} nice={} starting work.", pid, niceness);
    let result = busy_work(iterations);
    println!(
        "[Child] PID={} nice={} finished work. result={}",
        pid, niceness, result
    );
    platform::exit_child(0)
}
