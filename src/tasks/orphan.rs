//! Task 3o: the parent exits first and the kernel re-parents the child

use crate::error::LabResult;
use crate::platform::{self, Fork};
use std::thread;
use std::time::Duration;

/// Fork, then return immediately in the parent without reaping
///
/// The child sleeps for `sleep`, reports its new parent and exits on its own.
pub fn orphan_demo(sleep: Duration) -> LabResult<()> {
    println!("[Task 3 - orphan] Demo: parent will exit immediately; child will continue.");

    match platform::spawn()? {
        Fork::Parent(child) => {
            println!(
                "[Parent] PID={} -> exiting immediately. Child PID={}",
                platform::current_pid(),
                child
            );
            Ok(())
        }
        Fork::Child => outlive_parent(sleep),
    }
}

fn outlive_parent(sleep: Duration) -> ! {
    let pid = platform::current_pid();
    let initial = platform::parent_pid();
    println!(
        "[Child] Started. PID={} initial PPID={}. Sleeping {}s...",
        pid,
        initial,
        sleep.as_secs()
    );

    thread::sleep(sleep);

    let adopted = platform::parent_pid();
    println!(
        "[Child] After sleep: PID={} now PPID={} (should be 1 if orphaned).",
        pid, adopted
    );
    if adopted == initial {
        println!("[Child] Parent has not exited yet.");
    } else if adopted.as_raw() != 1 {
        println!("[Child] Adopted by subreaper {} instead of init.", adopted);
    }
    platform::exit_child(0)
}
