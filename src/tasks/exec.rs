//! Task 2: children run a command, either by replacing their own image or
//! through a nested subprocess

use super::fork_or_drain;
use crate::commands::tokenize::parse_command;
use crate::commands::ExecMode;
use crate::config::{EXIT_EXEC_FAILED, EXIT_PROGRAM_NOT_FOUND};
use crate::core::reaper::{ChildSet, ReapReport};
use crate::error::{LabError, LabResult};
use crate::platform::{self, Fork};
use std::io;
use std::process::Command;
use tracing::debug;

pub fn exec_children(n: usize, cmd: &str, mode: ExecMode) -> LabResult<ReapReport> {
    let argv = parse_command(cmd)?;
    println!(
        "[Task 2] Parent PID={}, running {} children each executing: {:?}",
        platform::current_pid(),
        n,
        argv
    );

    let mut children = ChildSet::new();
    for index in 1..=n {
        match fork_or_drain(&mut children)? {
            Fork::Child => {
                println!(
                    "[Child {}] PID={} PPID={} ABOUT TO RUN: {:?}",
                    index,
                    platform::current_pid(),
                    platform::parent_pid(),
                    argv
                );
                match mode {
                    ExecMode::Exec => replace_and_run(index, &argv),
                    ExecMode::Subprocess => run_nested(index, &argv),
                }
            }
            Fork::Parent(pid) => {
                children.record(pid);
                println!("[Parent] spawned child PID={} for command", pid);
            }
        }
    }

    let report = children.reap_all(|record| {
        println!(
            "[Parent] waited pid={} status={}",
            record.pid,
            record.status.raw()
        )
    })?;
    println!("[Task 2] All children finished.");
    Ok(report)
}

/// Resolve the program on PATH and exec it; only failures come back
fn resolve_and_replace(argv: &[String]) -> LabError {
    let program = &argv[0];
    let path = match which::which(program) {
        Ok(path) => path,
        Err(err) => {
            debug!(program = %program, error = %err, "program lookup failed");
            return LabError::ProgramNotFound {
                program: program.clone(),
            };
        }
    };

    debug!(program = %program, path = %path.display(), "replacing process image");
    match platform::replace_image(&path, argv) {
        Ok(never) => match never {},
        Err(LabError::ProgramNotFound { .. }) => LabError::ProgramNotFound {
            program: program.clone(),
        },
        Err(err) => err,
    }
}

fn replace_and_run(index: usize, argv: &[String]) -> ! {
    match resolve_and_replace(argv) {
        LabError::ProgramNotFound { program } => {
            println!("[Child {}] exec failed: {} not found", index, program);
            platform::exit_child(EXIT_PROGRAM_NOT_FOUND)
        }
        err => {
            println!("[Child {}] exec failed: {}", index, err);
            platform::exit_child(EXIT_EXEC_FAILED)
        }
    }
}

fn run_nested(index: usize, argv: &[String]) -> ! {
    match Command::new(&argv[0]).args(&argv[1..]).status() {
        Ok(status) => {
            debug!(%status, "nested subprocess exited");
            println!("[Child {}] subprocess finished, exiting", index);
            platform::exit_child(0)
        }
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            println!("[Child {}] subprocess failed: {} not found", index, argv[0]);
            platform::exit_child(EXIT_PROGRAM_NOT_FOUND)
        }
        Err(err) => {
            println!("[Child {}] subprocess failed: {}", index, err);
            platform::exit_child(EXIT_EXEC_FAILED)
        }
    }
}
