//! Demonstration routines and the dispatcher that selects one
//!
//! Every routine that forks keeps the child branch inside its own module:
//! child code ends in `platform::exit_child` and never returns here.

pub mod exec;
pub mod inspect;
pub mod orphan;
pub mod priority;
pub mod spawn;
pub mod zombie;

use crate::commands::{Cli, TaskId};
use crate::core::reaper::ChildSet;
use crate::error::{LabError, LabResult};
use crate::platform::{self, Fork};
use std::time::Duration;
use tracing::{debug, warn};

/// Run the task selected on the command line
pub fn run(cli: &Cli) -> LabResult<()> {
    debug!(task = %cli.task, "dispatching");
    match cli.task {
        TaskId::Spawn => spawn::create_children(cli.n).map(drop),
        TaskId::Exec => exec::exec_children(cli.n, &cli.cmd, cli.mode).map(drop),
        TaskId::Zombie => zombie::zombie_demo(Duration::from_secs(cli.delay)).map(drop),
        TaskId::Orphan => orphan::orphan_demo(Duration::from_secs(cli.sleep)),
        TaskId::Inspect => {
            let pid = cli.pid.ok_or(LabError::MissingArgument {
                flag: "--pid",
                task: cli.task.to_string(),
            })?;
            inspect::inspect(pid).print();
            Ok(())
        }
        TaskId::Priority => priority::priority_demo(cli.n, cli.iterations).map(drop),
    }
}

/// Fork once; if that fails, reap every child already spawned before
/// handing the error back
fn fork_or_drain(children: &mut ChildSet) -> LabResult<Fork> {
    match platform::spawn() {
        Ok(fork) => Ok(fork),
        Err(err) => {
            warn!(
                error = %err,
                outstanding = children.outstanding(),
                "fork failed, draining children"
            );
            children.reap_all(|record| {
                println!("[Parent] reaped pid={} status={}", record.pid, record.status.raw())
            })?;
            Err(err)
        }
    }
}
