//! Subprocess invocation for the external tools tutorctl drives.
//!
//! Every action is delegated to `docker` or `gcloud`; this module is the one
//! place that spawns them. Three modes:
//! - [`run_streamed`]: stdio inherited — builds, log following, prune chatter
//!   flow straight to the user's terminal.
//! - [`run_captured`] / [`run_captured_unchecked`]: stdout piped — short
//!   queries whose output is parsed (active account, project id, service URL).
//! - [`probe`]: all stdio nulled — success/failure only (daemon check).

use crate::error::{OpsError, Result};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

/// Locate a binary on PATH.
pub fn find_binary(name: &str) -> Option<PathBuf> {
    which::which(name).ok()
}

fn command(program: &str, args: &[String], cwd: &Path) -> Command {
    let mut cmd = Command::new(program);
    cmd.args(args);
    cmd.current_dir(cwd);
    cmd
}

/// Run to completion with inherited stdio; non-zero exit is an error.
pub fn run_streamed(program: &str, args: &[String], cwd: &Path) -> Result<()> {
    tracing::debug!("running: {program} {}", args.join(" "));
    let status = command(program, args, cwd)
        .status()
        .map_err(|e| OpsError::SpawnFailed {
            program: program.to_string(),
            source: e,
        })?;
    if !status.success() {
        return Err(OpsError::CommandFailed {
            program: program.to_string(),
            status,
        });
    }
    Ok(())
}

/// Run with piped output and return trimmed stdout. A non-zero exit becomes
/// an error carrying a truncated stderr hint.
pub fn run_captured(program: &str, args: &[String], cwd: &Path) -> Result<String> {
    let output = capture(program, args, cwd)?;
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        let hint = stderr.trim().chars().take(500).collect::<String>();
        return Err(OpsError::CommandOutput {
            program: program.to_string(),
            hint,
        });
    }
    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
}

/// Like [`run_captured`], but the exit status is ignored — only a failed
/// spawn is an error. `gcloud config get-value` exits non-zero when the value
/// is unset while still printing `(unset)`; the caller inspects the output.
pub fn run_captured_unchecked(program: &str, args: &[String], cwd: &Path) -> Result<String> {
    let output = capture(program, args, cwd)?;
    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
}

fn capture(program: &str, args: &[String], cwd: &Path) -> Result<std::process::Output> {
    tracing::debug!("running (captured): {program} {}", args.join(" "));
    command(program, args, cwd)
        .stdin(Stdio::null())
        .output()
        .map_err(|e| OpsError::SpawnFailed {
            program: program.to_string(),
            source: e,
        })
}

/// Run with all stdio nulled and report only whether the command succeeded.
pub fn probe(program: &str, args: &[String], cwd: &Path) -> bool {
    command(program, args, cwd)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(|s| s.success())
        .unwrap_or(false)
}
