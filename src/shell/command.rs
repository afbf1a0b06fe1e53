//! Blocking subprocess execution with timeouts.
//!
//! Every external call in the diagnosis and install flows goes through
//! [`run`]. Failures never propagate as errors: a command that cannot be
//! spawned, exits non-zero, or overruns its timeout comes back as a
//! [`CommandResult`] carrying the captured output, and the caller decides
//! what that means for the report.

use std::collections::HashMap;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::thread;
use std::time::{Duration, Instant};

/// Conservative ceiling applied to every external process invocation.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Result of executing a command.
#[derive(Debug, Clone)]
pub struct CommandResult {
    /// Exit code (None if killed by signal or timed out).
    pub exit_code: Option<i32>,

    /// Standard output.
    pub stdout: String,

    /// Standard error.
    pub stderr: String,

    /// Execution duration.
    pub duration: Duration,

    /// Whether the command succeeded (exit code 0).
    pub success: bool,

    /// Whether the command was killed after overrunning its timeout.
    pub timed_out: bool,
}

impl CommandResult {
    /// Stdout and stderr concatenated, trimmed. Used when a failing version
    /// query's output is surfaced verbatim in the report.
    pub fn combined_output(&self) -> String {
        let mut out = String::new();
        out.push_str(self.stdout.trim());
        if !self.stderr.trim().is_empty() {
            if !out.is_empty() {
                out.push('\n');
            }
            out.push_str(self.stderr.trim());
        }
        out
    }

    fn spawn_failure(message: String) -> Self {
        Self {
            exit_code: None,
            stdout: String::new(),
            stderr: message,
            duration: Duration::ZERO,
            success: false,
            timed_out: false,
        }
    }
}

/// Options for command execution.
#[derive(Debug, Clone)]
pub struct CommandOptions {
    /// Working directory.
    pub cwd: Option<PathBuf>,

    /// Environment variables (merged with system env).
    pub env: HashMap<String, String>,

    /// Timeout for the call.
    pub timeout: Duration,
}

impl Default for CommandOptions {
    fn default() -> Self {
        Self {
            cwd: None,
            env: HashMap::new(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// Execute a program with arguments, capturing stdout and stderr.
pub fn run(program: &Path, args: &[&str], options: &CommandOptions) -> CommandResult {
    let start = Instant::now();

    let mut cmd = Command::new(program);
    cmd.args(args);

    if let Some(cwd) = &options.cwd {
        cmd.current_dir(cwd);
    }
    for (key, value) in &options.env {
        cmd.env(key, value);
    }

    cmd.stdin(Stdio::null());
    cmd.stdout(Stdio::piped());
    cmd.stderr(Stdio::piped());

    tracing::debug!("Running {} {:?}", program.display(), args);

    let mut child = match cmd.spawn() {
        Ok(child) => child,
        Err(e) => {
            return CommandResult::spawn_failure(format!(
                "failed to start {}: {}",
                program.display(),
                e
            ))
        }
    };

    // Drain pipes on threads so a chatty child can't deadlock against
    // the timeout polling loop below.
    let mut stdout_pipe = child.stdout.take();
    let mut stderr_pipe = child.stderr.take();
    let stdout_handle = thread::spawn(move || {
        let mut buf = String::new();
        if let Some(pipe) = stdout_pipe.as_mut() {
            let _ = pipe.read_to_string(&mut buf);
        }
        buf
    });
    let stderr_handle = thread::spawn(move || {
        let mut buf = String::new();
        if let Some(pipe) = stderr_pipe.as_mut() {
            let _ = pipe.read_to_string(&mut buf);
        }
        buf
    });

    let deadline = start + options.timeout;
    let status = loop {
        match child.try_wait() {
            Ok(Some(status)) => break Some(status),
            Ok(None) => {
                if Instant::now() >= deadline {
                    let _ = child.kill();
                    let _ = child.wait();
                    break None;
                }
                thread::sleep(Duration::from_millis(25));
            }
            Err(e) => {
                let _ = child.kill();
                let _ = child.wait();
                return CommandResult::spawn_failure(format!(
                    "failed waiting on {}: {}",
                    program.display(),
                    e
                ));
            }
        }
    };

    let stdout = stdout_handle.join().unwrap_or_default();
    let stderr = stderr_handle.join().unwrap_or_default();
    let duration = start.elapsed();

    match status {
        Some(status) => CommandResult {
            exit_code: status.code(),
            success: status.success(),
            stdout,
            stderr,
            duration,
            timed_out: false,
        },
        None => CommandResult {
            exit_code: None,
            success: false,
            stdout,
            stderr: format!(
                "timed out after {}s: {} {}",
                options.timeout.as_secs(),
                program.display(),
                args.join(" ")
            ),
            duration,
            timed_out: true,
        },
    }
}

/// Execute a program with default options.
pub fn run_default(program: &Path, args: &[&str]) -> CommandResult {
    run(program, args, &CommandOptions::default())
}

/// Capture the first stdout line of a command, if it succeeds.
///
/// Used for system facts (`sw_vers`, `uname`) where any failure simply means
/// the fact is unknown.
pub fn capture_line(program: &str, args: &[&str]) -> Option<String> {
    let result = run_default(Path::new(program), args);
    if result.success {
        result
            .stdout
            .lines()
            .next()
            .map(|line| line.trim().to_string())
            .filter(|line| !line.is_empty())
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn run_successful_command() {
        let result = run_default(Path::new("echo"), &["hello"]);
        assert!(result.success);
        assert_eq!(result.exit_code, Some(0));
        assert!(result.stdout.contains("hello"));
        assert!(!result.timed_out);
    }

    #[test]
    fn run_failing_command_captures_output() {
        let result = run_default(Path::new("sh"), &["-c", "echo boom >&2; exit 3"]);
        assert!(!result.success);
        assert_eq!(result.exit_code, Some(3));
        assert!(result.stderr.contains("boom"));
    }

    #[test]
    fn run_missing_program_is_soft_failure() {
        let result = run_default(Path::new("/nonexistent/program"), &[]);
        assert!(!result.success);
        assert!(result.exit_code.is_none());
        assert!(result.stderr.contains("failed to start"));
    }

    #[test]
    fn run_times_out_and_kills_child() {
        let options = CommandOptions {
            timeout: Duration::from_millis(100),
            ..Default::default()
        };
        let result = run(Path::new("sleep"), &["5"], &options);
        assert!(!result.success);
        assert!(result.timed_out);
        assert!(result.stderr.contains("timed out"));
        // Well under the 5s the child asked for
        assert!(result.duration < Duration::from_secs(4));
    }

    #[test]
    fn combined_output_merges_streams() {
        let result = run_default(Path::new("sh"), &["-c", "echo out; echo err >&2"]);
        let combined = result.combined_output();
        assert!(combined.contains("out"));
        assert!(combined.contains("err"));
    }

    #[test]
    fn capture_line_returns_first_line() {
        let line = capture_line("printf", &["first\\nsecond"]);
        assert_eq!(line.as_deref(), Some("first"));
    }

    #[test]
    fn capture_line_none_on_failure() {
        assert!(capture_line("/nonexistent/program", &[]).is_none());
    }

    #[test]
    fn run_with_cwd_and_env() {
        let temp = tempfile::TempDir::new().unwrap();
        let options = CommandOptions {
            cwd: Some(temp.path().to_path_buf()),
            env: HashMap::from([("UV_DOCTOR_TEST_VAR".to_string(), "42".to_string())]),
            ..Default::default()
        };
        let result = run(Path::new("sh"), &["-c", "pwd; echo $UV_DOCTOR_TEST_VAR"], &options);
        assert!(result.success);
        assert!(result.stdout.contains("42"));
    }
}
