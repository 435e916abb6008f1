use crate::config::PROC_ROOT;
use crate::error::{LabError, LabResult};
use nix::errno::Errno;
use nix::unistd::{self, ForkResult, Pid};
use std::convert::Infallible;
use std::ffi::CString;
use std::io::{self, Write};
use std::os::unix::ffi::OsStrExt;
use std::path::Path;
use tracing::debug;

/// Which side of a `fork` the caller is running on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fork {
    /// Original process; carries the new child's pid
    Parent(Pid),
    /// Freshly duplicated process
    Child,
}

/// Verify the host exposes process duplication and a /proc filesystem
pub fn ensure_supported() -> LabResult<()> {
    if !cfg!(target_os = "linux") {
        return Err(LabError::UnsupportedPlatform {
            reason: format!("host OS is {}", std::env::consts::OS),
        });
    }

    let self_dir = Path::new(PROC_ROOT).join("self");
    if !self_dir.exists() {
        return Err(LabError::UnsupportedPlatform {
            reason: format!("{} is not mounted", PROC_ROOT),
        });
    }

    Ok(())
}

/// Duplicate the current process
///
/// Pending stdout is flushed first so buffered text is not emitted by both
/// copies.
pub fn spawn() -> LabResult<Fork> {
    let _ = io::stdout().flush();

    // The caller is single-threaded while demonstrations run; the child only
    // prints, sleeps, execs and `_exit`s.
    match unsafe { unistd::fork() } {
        Ok(ForkResult::Parent { child }) => {
            debug!(pid = child.as_raw(), "fork: parent side");
            Ok(Fork::Parent(child))
        }
        Ok(ForkResult::Child) => Ok(Fork::Child),
        Err(errno) => Err(LabError::Fork(errno)),
    }
}

/// Terminate a forked child without running the parent's shared teardown
///
/// The child's own buffered output is flushed before `_exit`.
pub fn exit_child(code: i32) -> ! {
    let _ = io::stdout().flush();
    let _ = io::stderr().flush();
    unsafe { libc::_exit(code) }
}

/// Replace the current process image with `program`, passing `argv`
///
/// Never returns on success, so the only value a caller can observe is the
/// error.
pub fn replace_image(program: &Path, argv: &[String]) -> Result<Infallible, LabError> {
    let path = CString::new(program.as_os_str().as_bytes()).map_err(|_| {
        LabError::InvalidArgument {
            arg: program.display().to_string(),
        }
    })?;
    let args = argv
        .iter()
        .map(|arg| {
            CString::new(arg.as_bytes()).map_err(|_| LabError::InvalidArgument { arg: arg.clone() })
        })
        .collect::<LabResult<Vec<_>>>()?;

    let _ = io::stdout().flush();
    unistd::execv(&path, &args).map_err(|errno| match errno {
        Errno::ENOENT => LabError::ProgramNotFound {
            program: program.display().to_string(),
        },
        errno => LabError::Exec {
            program: program.display().to_string(),
            errno,
        },
    })
}

/// Add `increment` to the calling process's niceness
///
/// Returns the resulting niceness. `nice(2)` may legitimately return -1, so
/// errno is cleared beforehand and consulted afterwards.
pub fn apply_nice(increment: i32) -> Result<i32, Errno> {
    Errno::clear();
    let result = unsafe { libc::nice(increment) };
    if result == -1 {
        match Errno::last() {
            Errno::UnknownErrno => Ok(result),
            errno => Err(errno),
        }
    } else {
        Ok(result)
    }
}

pub fn current_pid() -> Pid {
    unistd::getpid()
}

pub fn parent_pid() -> Pid {
    unistd::getppid()
}
