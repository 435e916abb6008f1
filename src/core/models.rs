use nix::sys::signal::Signal;
use nix::sys::wait::WaitStatus;
use nix::unistd::Pid;
use std::fmt;

/// How a reaped child terminated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReapedStatus {
    Exited(i32),
    Signaled { signal: Signal, core_dumped: bool },
}

impl ReapedStatus {
    /// POSIX raw wait-status encoding, as `wait(2)` hands it back
    ///
    /// Normal exit puts the code in the second byte; termination by signal
    /// puts the signal number in the low seven bits and sets 0x80 on core dump.
    pub fn raw(&self) -> i32 {
        match *self {
            ReapedStatus::Exited(code) => (code & 0xff) << 8,
            ReapedStatus::Signaled {
                signal,
                core_dumped,
            } => (signal as i32 & 0x7f) | if core_dumped { 0x80 } else { 0 },
        }
    }

    pub fn success(&self) -> bool {
        matches!(self, ReapedStatus::Exited(0))
    }

    pub fn exit_code(&self) -> Option<i32> {
        match *self {
            ReapedStatus::Exited(code) => Some(code),
            ReapedStatus::Signaled { .. } => None,
        }
    }
}

impl fmt::Display for ReapedStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReapedStatus::Exited(code) => write!(f, "exited with code {}", code),
            ReapedStatus::Signaled {
                signal,
                core_dumped: true,
            } => write!(f, "killed by {} (core dumped)", signal),
            ReapedStatus::Signaled { signal, .. } => write!(f, "killed by {}", signal),
        }
    }
}

/// One collected exit status; produced once per child and then discarded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitRecord {
    pub pid: Pid,
    pub status: ReapedStatus,
}

impl ExitRecord {
    /// Convert a terminal `WaitStatus`; stop/continue notifications yield `None`
    pub fn from_wait_status(status: WaitStatus) -> Option<Self> {
        match status {
            WaitStatus::Exited(pid, code) => Some(Self {
                pid,
                status: ReapedStatus::Exited(code),
            }),
            WaitStatus::Signaled(pid, signal, core_dumped) => Some(Self {
                pid,
                status: ReapedStatus::Signaled {
                    signal,
                    core_dumped,
                },
            }),
            _ => None,
        }
    }
}

impl fmt::Display for ExitRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.pid, self.status.raw())
    }
}
