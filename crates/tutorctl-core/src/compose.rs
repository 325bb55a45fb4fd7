//! Local Compose stack operations.
//!
//! Each operation is a fixed `docker compose` invocation; the argument
//! vectors are built by pure functions so tests can pin the exact command
//! lines without a Docker daemon.

use crate::config::StackConfig;
use crate::error::{OpsError, Result};
use crate::{paths, runner};
use std::path::{Path, PathBuf};

pub const DOCKER: &str = "docker";

/// Which compose definition a stack command targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Profile {
    Dev,
    Prod,
}

impl Profile {
    pub fn name(&self) -> &'static str {
        match self {
            Profile::Dev => "dev",
            Profile::Prod => "prod",
        }
    }
}

// ---------------------------------------------------------------------------
// ComposeStack
// ---------------------------------------------------------------------------

pub struct ComposeStack {
    root: PathBuf,
    config: StackConfig,
}

impl ComposeStack {
    pub fn new(root: &Path, config: StackConfig) -> Self {
        Self {
            root: root.to_path_buf(),
            config,
        }
    }

    pub fn compose_file(&self, profile: Profile) -> &str {
        match profile {
            Profile::Dev => &self.config.compose_file,
            Profile::Prod => &self.config.prod_compose_file,
        }
    }

    /// Fail-fast preconditions for dev/prod, checked in a fixed order:
    /// CLI on PATH, daemon reachable, credentials key on disk.
    pub fn preflight(&self) -> Result<()> {
        if runner::find_binary(DOCKER).is_none() {
            return Err(OpsError::DockerNotFound);
        }
        if !runner::probe(DOCKER, &info_args(), &self.root) {
            return Err(OpsError::DaemonUnreachable);
        }
        let creds = paths::resolve(&self.root, &self.config.credentials_file);
        if !creds.exists() {
            return Err(OpsError::CredentialsMissing(creds));
        }
        Ok(())
    }

    /// Tear down (volumes and orphans included), rebuild images without
    /// cache, start detached.
    pub fn rebuild(&self, profile: Profile) -> Result<()> {
        for step in rebuild_steps(self.compose_file(profile)) {
            runner::run_streamed(DOCKER, &step, &self.root)?;
        }
        Ok(())
    }

    /// Stop and remove the stack's containers. Volumes survive.
    pub fn down(&self, profile: Profile) -> Result<()> {
        runner::run_streamed(
            DOCKER,
            &down_args(self.compose_file(profile), false),
            &self.root,
        )
    }

    /// Follow one service's logs until interrupted.
    pub fn logs(&self, service: &str) -> Result<()> {
        runner::run_streamed(
            DOCKER,
            &logs_args(self.compose_file(Profile::Dev), service),
            &self.root,
        )
    }

    /// List the stack's containers on the terminal.
    pub fn ps(&self) -> Result<()> {
        runner::run_streamed(DOCKER, &ps_args(self.compose_file(Profile::Dev)), &self.root)
    }

    /// List the stack's containers as parsed JSON. `docker compose ps
    /// --format json` emits one object per line.
    pub fn ps_json(&self) -> Result<Vec<serde_json::Value>> {
        let out = runner::run_captured(
            DOCKER,
            &ps_json_args(self.compose_file(Profile::Dev)),
            &self.root,
        )?;
        parse_ps_lines(&out)
    }

    /// Run the configured test command inside the running service container,
    /// with any extra arguments appended.
    pub fn exec_tests(&self, extra: &[String]) -> Result<()> {
        let mut test_cmd = self.config.test_command.clone();
        test_cmd.extend(extra.iter().cloned());
        runner::run_streamed(
            DOCKER,
            &exec_args(
                self.compose_file(Profile::Dev),
                &self.config.service,
                &test_cmd,
            ),
            &self.root,
        )
    }

    /// Prune unused Docker system resources, then unused volumes.
    pub fn cleanup(&self) -> Result<()> {
        runner::run_streamed(DOCKER, &prune_args("system"), &self.root)?;
        runner::run_streamed(DOCKER, &prune_args("volume"), &self.root)
    }
}

// ---------------------------------------------------------------------------
// Argument builders
// ---------------------------------------------------------------------------

fn compose(file: &str, tail: &[&str]) -> Vec<String> {
    let mut args = vec!["compose".to_string(), "-f".to_string(), file.to_string()];
    args.extend(tail.iter().map(|s| s.to_string()));
    args
}

pub fn info_args() -> Vec<String> {
    vec!["info".to_string()]
}

/// The dev/prod start sequence: full teardown, cold rebuild, detached start.
pub fn rebuild_steps(file: &str) -> [Vec<String>; 3] {
    [
        down_args(file, true),
        compose(file, &["build", "--no-cache"]),
        compose(file, &["up", "-d"]),
    ]
}

pub fn down_args(file: &str, volumes: bool) -> Vec<String> {
    if volumes {
        compose(file, &["down", "--volumes", "--remove-orphans"])
    } else {
        compose(file, &["down", "--remove-orphans"])
    }
}

pub fn logs_args(file: &str, service: &str) -> Vec<String> {
    compose(file, &["logs", "--follow", service])
}

pub fn ps_args(file: &str) -> Vec<String> {
    compose(file, &["ps"])
}

pub fn ps_json_args(file: &str) -> Vec<String> {
    compose(file, &["ps", "--format", "json"])
}

pub fn exec_args(file: &str, service: &str, cmd: &[String]) -> Vec<String> {
    let mut args = compose(file, &["exec", service]);
    args.extend(cmd.iter().cloned());
    args
}

pub fn prune_args(kind: &str) -> Vec<String> {
    vec![kind.to_string(), "prune".to_string(), "--force".to_string()]
}

fn parse_ps_lines(out: &str) -> Result<Vec<serde_json::Value>> {
    out.lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| Ok(serde_json::from_str(line)?))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rebuild_is_down_build_up() {
        let [down, build, up] = rebuild_steps("docker-compose.yml");
        assert_eq!(
            down,
            [
                "compose",
                "-f",
                "docker-compose.yml",
                "down",
                "--volumes",
                "--remove-orphans"
            ]
        );
        assert_eq!(
            build,
            ["compose", "-f", "docker-compose.yml", "build", "--no-cache"]
        );
        assert_eq!(up, ["compose", "-f", "docker-compose.yml", "up", "-d"]);
    }

    #[test]
    fn down_keeps_volumes_unless_asked() {
        assert_eq!(
            down_args("f.yml", false),
            ["compose", "-f", "f.yml", "down", "--remove-orphans"]
        );
        assert_eq!(
            down_args("f.yml", true),
            ["compose", "-f", "f.yml", "down", "--volumes", "--remove-orphans"]
        );
    }

    #[test]
    fn logs_follow_one_service() {
        assert_eq!(
            logs_args("f.yml", "backend"),
            ["compose", "-f", "f.yml", "logs", "--follow", "backend"]
        );
    }

    #[test]
    fn exec_appends_the_test_command() {
        let cmd = vec!["pytest".to_string(), "-k".to_string(), "smoke".to_string()];
        assert_eq!(
            exec_args("f.yml", "backend", &cmd),
            ["compose", "-f", "f.yml", "exec", "backend", "pytest", "-k", "smoke"]
        );
    }

    #[test]
    fn prune_is_forced() {
        assert_eq!(prune_args("system"), ["system", "prune", "--force"]);
        assert_eq!(prune_args("volume"), ["volume", "prune", "--force"]);
    }

    #[test]
    fn profile_selects_the_compose_file() {
        let stack = ComposeStack::new(
            Path::new("/proj"),
            crate::config::StackConfig::default(),
        );
        assert_eq!(stack.compose_file(Profile::Dev), "docker-compose.yml");
        assert_eq!(stack.compose_file(Profile::Prod), "docker-compose.prod.yml");
    }

    #[test]
    fn ps_lines_parse_one_object_per_line() {
        let raw = "{\"Name\":\"backend-1\",\"State\":\"running\"}\n\n{\"Name\":\"db-1\",\"State\":\"running\"}\n";
        let parsed = parse_ps_lines(raw).unwrap();
        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed[0]["Name"], "backend-1");
        assert_eq!(parsed[1]["State"], "running");
    }

    #[test]
    fn ps_lines_reject_garbage() {
        assert!(parse_ps_lines("not json").is_err());
        assert!(parse_ps_lines("").unwrap().is_empty());
    }
}
