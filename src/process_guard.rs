//! Subprocess lifecycle helpers
//!
//! The installer only ever spawns two kinds of children: best-effort cache
//! refresh utilities, which must never hang the worker thread, and the
//! installed launcher, which must outlive the installer.
//!
//! - Children run in their own process group so a timeout can kill the whole tree
//! - Refresh utilities get a parent-death signal and a bounded wait
//! - The launcher is detached (own group, no death signal, null stdio)

use nix::libc;
use nix::sys::signal::{self, Signal};
use nix::unistd::Pid;
use std::io::Read;
use std::process::{Child, Command, Stdio};
use std::thread::{self, JoinHandle};
use std::time::Duration;
use wait_timeout::ChildExt;

/// Result of a bounded subprocess run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutcome {
    /// Exited with status 0
    Success,
    /// Exited non-zero or was killed by a signal
    Failed { code: Option<i32>, stderr: String },
    /// Still running when the timeout expired; its process group was killed
    TimedOut,
}

/// Extension trait for std::process::Command to set up process groups
pub trait CommandProcessGroup {
    /// Run the command as leader of a new process group
    fn in_new_process_group(&mut self) -> &mut Self;

    /// Deliver SIGTERM to the child if the installer dies first
    fn die_with_parent(&mut self) -> &mut Self;
}

impl CommandProcessGroup for Command {
    fn in_new_process_group(&mut self) -> &mut Self {
        use std::os::unix::process::CommandExt;
        // PGID = child PID, so killpg(child.id()) reaches every descendant
        self.process_group(0)
    }

    fn die_with_parent(&mut self) -> &mut Self {
        use std::os::unix::process::CommandExt;
        // SAFETY: prctl is async-signal-safe and touches no parent memory
        unsafe {
            self.pre_exec(|| {
                if libc::prctl(libc::PR_SET_PDEATHSIG, libc::SIGTERM) == -1 {
                    return Err(std::io::Error::last_os_error());
                }
                Ok(())
            });
        }
        self
    }
}

/// Run `cmd` to completion, killing its process group after `timeout`.
///
/// stdout is discarded and stderr is captured for diagnostics. stderr is read
/// on a helper thread so a chatty child cannot stall on a full pipe. Spawn
/// errors (including a missing binary) are returned as `Err`.
pub fn run_with_timeout(cmd: &mut Command, timeout: Duration) -> std::io::Result<CommandOutcome> {
    let mut child = cmd
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::piped())
        .in_new_process_group()
        .die_with_parent()
        .spawn()?;
    let stderr = drain_stderr(&mut child);

    let outcome = match child.wait_timeout(timeout)? {
        Some(status) if status.success() => CommandOutcome::Success,
        Some(status) => CommandOutcome::Failed {
            code: status.code(),
            stderr: String::new(),
        },
        None => {
            log::warn!(
                "Process {} exceeded {:?}, killing its process group",
                child.id(),
                timeout
            );
            kill_group(&child);
            let _ = child.kill();
            let _ = child.wait();
            CommandOutcome::TimedOut
        }
    };

    // EOF arrives once every process holding the pipe has exited or been killed
    let captured = stderr
        .and_then(|reader| reader.join().ok())
        .unwrap_or_default();
    Ok(match outcome {
        CommandOutcome::Failed { code, .. } => CommandOutcome::Failed {
            code,
            stderr: captured.trim().to_string(),
        },
        other => other,
    })
}

/// Spawn a program that keeps running after the installer exits
pub fn spawn_detached(cmd: &mut Command) -> std::io::Result<u32> {
    let child = cmd
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .in_new_process_group()
        .spawn()?;
    let pid = child.id();
    log::info!("Spawned detached process {}", pid);
    Ok(pid)
}

fn drain_stderr(child: &mut Child) -> Option<JoinHandle<String>> {
    let mut stderr = child.stderr.take()?;
    thread::Builder::new()
        .name("stderr-drain".to_string())
        .spawn(move || {
            let mut buf = Vec::new();
            let _ = stderr.read_to_end(&mut buf);
            String::from_utf8_lossy(&buf).into_owned()
        })
        .ok()
}

fn kill_group(child: &Child) {
    let pgid = Pid::from_raw(child.id() as i32);
    if let Err(e) = signal::killpg(pgid, Signal::SIGKILL) {
        log::debug!("killpg({}) failed: {}", pgid, e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_successful_command() {
        let outcome = run_with_timeout(&mut Command::new("true"), Duration::from_secs(5)).unwrap();
        assert_eq!(outcome, CommandOutcome::Success);
    }

    #[test]
    fn test_failing_command_captures_stderr() {
        let outcome = run_with_timeout(
            Command::new("bash").args(["-c", "echo oops >&2; exit 3"]),
            Duration::from_secs(5),
        )
        .unwrap();
        assert_eq!(
            outcome,
            CommandOutcome::Failed {
                code: Some(3),
                stderr: "oops".to_string()
            }
        );
    }

    #[test]
    fn test_large_stderr_does_not_stall() {
        let start = std::time::Instant::now();
        let outcome = run_with_timeout(
            Command::new("bash").args(["-c", "head -c 200000 /dev/zero | tr '\\0' x >&2; exit 1"]),
            Duration::from_secs(5),
        )
        .unwrap();
        match outcome {
            CommandOutcome::Failed { code, stderr } => {
                assert_eq!(code, Some(1));
                assert_eq!(stderr.len(), 200000);
            }
            other => panic!("expected failure, got {:?}", other),
        }
        assert!(start.elapsed() < Duration::from_secs(5));
    }

    #[test]
    fn test_timeout_kills_process() {
        let start = std::time::Instant::now();
        let outcome = run_with_timeout(
            Command::new("bash").args(["-c", "sleep 30"]),
            Duration::from_millis(200),
        )
        .unwrap();
        assert_eq!(outcome, CommandOutcome::TimedOut);
        assert!(start.elapsed() < Duration::from_secs(10));
    }

    #[test]
    fn test_missing_binary_is_spawn_error() {
        let result = run_with_timeout(
            &mut Command::new("this_binary_definitely_does_not_exist_12345"),
            Duration::from_secs(1),
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_spawn_detached_returns_pid() {
        let pid = spawn_detached(&mut Command::new("true")).unwrap();
        assert!(pid > 0);
    }
}
