//! Child tracking and reaping
//!
//! A `ChildSet` records pids in creation order and drains them through
//! `wait(2)` until the kernel reports that no children remain. ECHILD is the
//! loop's normal terminal condition.

use crate::core::models::ExitRecord;
use crate::error::{LabError, LabResult};
use nix::errno::Errno;
use nix::sys::wait::wait;
use nix::unistd::Pid;
use std::collections::HashSet;
use tracing::{debug, warn};

/// Block for the next child state change
///
/// Returns `Ok(None)` once the caller has no children left.
pub fn reap_next() -> LabResult<Option<ExitRecord>> {
    loop {
        match wait() {
            Ok(status) => {
                if let Some(record) = ExitRecord::from_wait_status(status) {
                    return Ok(Some(record));
                }
                debug!(?status, "ignoring non-terminal wait status");
            }
            Err(Errno::EINTR) => continue,
            Err(Errno::ECHILD) => return Ok(None),
            Err(errno) => return Err(LabError::Wait(errno)),
        }
    }
}

/// Exit statuses in the order the kernel delivered them
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ReapReport {
    pub records: Vec<ExitRecord>,
}

impl ReapReport {
    pub fn finish_order(&self) -> Vec<Pid> {
        self.records.iter().map(|record| record.pid).collect()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Pids spawned by one demonstration, in creation order
#[derive(Debug, Default)]
pub struct ChildSet {
    spawned: Vec<Pid>,
    outstanding: HashSet<Pid>,
}

impl ChildSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, pid: Pid) {
        self.spawned.push(pid);
        self.outstanding.insert(pid);
    }

    pub fn spawned(&self) -> &[Pid] {
        &self.spawned
    }

    pub fn outstanding(&self) -> usize {
        self.outstanding.len()
    }

    /// Mark a reaped pid as settled; returns false if it was not one of ours
    pub fn settle(&mut self, record: &ExitRecord) -> bool {
        self.outstanding.remove(&record.pid)
    }

    /// Reap until no children remain, invoking `on_reap` per collected status
    pub fn reap_all<F>(&mut self, mut on_reap: F) -> LabResult<ReapReport>
    where
        F: FnMut(&ExitRecord),
    {
        let mut report = ReapReport::default();

        while let Some(record) = reap_next()? {
            if !self.settle(&record) {
                warn!(pid = record.pid.as_raw(), "reaped a child this set did not spawn");
            }
            debug!(pid = record.pid.as_raw(), status = %record.status, "reaped");
            on_reap(&record);
            report.records.push(record);
        }

        if !self.outstanding.is_empty() {
            warn!(
                remaining = self.outstanding.len(),
                "wait reported no children while pids were still outstanding"
            );
        }

        Ok(report)
    }
}
