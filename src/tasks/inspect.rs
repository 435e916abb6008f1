//! Task 4: summarise a live process from /proc
//!
//! Each sub-read (status, exe link, fd table, every single fd) fails on its
//! own; a failure is recorded in the snapshot and the rest is still read.

use crate::config::{PROC_ROOT, STATUS_FIELDS};
use std::fs;
use std::path::{Path, PathBuf};

/// One entry of /proc/<pid>/fd
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FdEntry {
    pub name: String,
    pub target: Result<PathBuf, String>,
}

/// Point-in-time read of a process; never cached
#[derive(Debug, Clone)]
pub struct ProcessSnapshot {
    pub pid: u32,
    pub status: Result<Vec<String>, String>,
    pub exe: Result<PathBuf, String>,
    pub fds: Result<Vec<FdEntry>, String>,
}

#[derive(Debug, Clone)]
pub enum InspectOutcome {
    /// No /proc entry: the process is gone or hidden from us
    NotFound { pid: u32, path: PathBuf },
    Snapshot(ProcessSnapshot),
}

/// Keep the allow-listed fields of a /proc status file, trimmed
pub fn status_fields(content: &str) -> Vec<String> {
    content
        .lines()
        .filter(|line| STATUS_FIELDS.iter().any(|field| line.starts_with(field)))
        .map(|line| line.trim().to_string())
        .collect()
}

pub fn inspect(pid: u32) -> InspectOutcome {
    inspect_in(Path::new(PROC_ROOT), pid)
}

/// Inspect `pid` under an arbitrary procfs root
pub fn inspect_in(root: &Path, pid: u32) -> InspectOutcome {
    let dir = root.join(pid.to_string());
    if !dir.exists() {
        return InspectOutcome::NotFound { pid, path: dir };
    }

    let status = fs::read_to_string(dir.join("status"))
        .map(|content| status_fields(&content))
        .map_err(|err| err.to_string());
    let exe = fs::read_link(dir.join("exe")).map_err(|err| err.to_string());
    let fds = read_fd_table(&dir.join("fd"));

    InspectOutcome::Snapshot(ProcessSnapshot {
        pid,
        status,
        exe,
        fds,
    })
}

fn read_fd_table(fd_dir: &Path) -> Result<Vec<FdEntry>, String> {
    let entries = fs::read_dir(fd_dir).map_err(|err| err.to_string())?;

    let mut fds: Vec<FdEntry> = entries
        .filter_map(|entry| entry.ok())
        .map(|entry| FdEntry {
            name: entry.file_name().to_string_lossy().into_owned(),
            target: fs::read_link(entry.path()).map_err(|err| err.to_string()),
        })
        .collect();

    fds.sort_by_key(|fd| (fd.name.parse::<u64>().unwrap_or(u64::MAX), fd.name.clone()));
    Ok(fds)
}

impl InspectOutcome {
    pub fn print(&self) {
        match self {
            InspectOutcome::NotFound { pid, path } => {
                println!("[Task 4] Inspecting PID {}", pid);
                println!(
                    "[Task 4] {} does not exist. Process may not be running or you lack permission.",
                    path.display()
                );
            }
            InspectOutcome::Snapshot(snapshot) => snapshot.print(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, InspectOutcome::NotFound { .. })
    }
}

impl ProcessSnapshot {
    pub fn print(&self) {
        println!("[Task 4] Inspecting PID {}", self.pid);

        println!("\n-- status --");
        match &self.status {
            Ok(lines) => lines.iter().for_each(|line| println!("{}", line)),
            Err(err) => println!("Error reading status: {}", err),
        }

        match &self.exe {
            Ok(path) => println!("\n-- exe -> {}", path.display()),
            Err(err) => println!("\n-- exe not readable: {}", err),
        }

        match &self.fds {
            Ok(fds) => {
                println!("\n-- {} open file descriptors:", fds.len());
                for fd in fds {
                    match &fd.target {
                        Ok(target) => println!("{} -> {}", fd.name, target.display()),
                        Err(err) => println!("{} -> (unreadable) {}", fd.name, err),
                    }
                }
            }
            Err(err) => println!("\n-- fd not accessible: {}", err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::os::unix::fs::symlink;
    use tempfile::TempDir;

    const STATUS: &str = "Name:\tproclab\nUmask:\t0022\nState:\tS (sleeping)\nTgid:\t42\nVmSize:\t   10000 kB\nVmRSS:\t    2000 kB\nThreads:\t1\nVmPeak:\t20000 kB\n";

    #[test]
    fn status_keeps_allow_listed_fields_in_file_order() {
        assert_eq!(
            status_fields(STATUS),
            vec![
                "Name:\tproclab",
                "State:\tS (sleeping)",
                "VmSize:\t   10000 kB",
                "VmRSS:\t    2000 kB",
                "Threads:\t1",
            ]
        );
    }

    #[test]
    fn missing_pid_is_not_found_every_time() {
        let root = TempDir::new().expect("temp dir");
        for _ in 0..2 {
            match inspect_in(root.path(), 999_999) {
                InspectOutcome::NotFound { pid, path } => {
                    assert_eq!(pid, 999_999);
                    assert_eq!(path, root.path().join("999999"));
                }
                other => panic!("expected NotFound, got {other:?}"),
            }
        }
        assert!(inspect_in(root.path(), 0).is_not_found());
    }

    #[test]
    fn sub_reads_fail_independently() {
        let root = TempDir::new().expect("temp dir");
        let dir = root.path().join("42");
        fs::create_dir_all(dir.join("fd")).unwrap();
        fs::write(dir.join("status"), STATUS).unwrap();
        symlink("/usr/bin/proclab", dir.join("exe")).unwrap();
        symlink("/dev/null", dir.join("fd").join("0")).unwrap();
        symlink("pipe:[1234]", dir.join("fd").join("10")).unwrap();
        symlink("/dev/pts/0", dir.join("fd").join("2")).unwrap();
        // a plain file is not a link, so resolving it fails
        fs::write(dir.join("fd").join("3"), "").unwrap();

        let snapshot = match inspect_in(root.path(), 42) {
            InspectOutcome::Snapshot(snapshot) => snapshot,
            other => panic!("expected snapshot, got {other:?}"),
        };

        assert_eq!(snapshot.status.as_ref().unwrap().len(), 5);
        assert_eq!(snapshot.exe, Ok(PathBuf::from("/usr/bin/proclab")));

        let fds = snapshot.fds.expect("fd table readable");
        let names: Vec<&str> = fds.iter().map(|fd| fd.name.as_str()).collect();
        assert_eq!(names, vec!["0", "2", "3", "10"]);
        assert_eq!(fds[0].target, Ok(PathBuf::from("/dev/null")));
        assert!(fds[2].target.is_err());
        assert_eq!(fds[3].target, Ok(PathBuf::from("pipe:[1234]")));
    }

    #[test]
    fn unreadable_parts_are_reported_not_fatal() {
        let root = TempDir::new().expect("temp dir");
        fs::create_dir_all(root.path().join("7")).unwrap();

        let snapshot = match inspect_in(root.path(), 7) {
            InspectOutcome::Snapshot(snapshot) => snapshot,
            other => panic!("expected snapshot, got {other:?}"),
        };
        assert!(snapshot.status.is_err());
        assert!(snapshot.exe.is_err());
        assert!(snapshot.fds.is_err());
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn inspects_the_running_test_process() {
        let snapshot = match inspect(std::process::id()) {
            InspectOutcome::Snapshot(snapshot) => snapshot,
            other => panic!("expected snapshot, got {other:?}"),
        };

        let status = snapshot.status.expect("own status readable");
        for field in STATUS_FIELDS {
            assert!(
                status.iter().any(|line| line.starts_with(field)),
                "missing {field}"
            );
        }
        assert!(snapshot.exe.is_ok());
        assert!(!snapshot.fds.expect("own fd table readable").is_empty());
    }
}
