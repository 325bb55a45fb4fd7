//! Google Cloud deployment flow.
//!
//! `tutorctl deploy` is a fixed, sequential delegation to the gcloud CLI:
//! preflight (CLI, auth, project), enable the required APIs, set the run
//! region, submit the Cloud Build pipeline, read back the Cloud Run URL.
//! There is no retry and no rollback; each step either succeeds or aborts
//! the whole flow.

use crate::config::CloudConfig;
use crate::error::{OpsError, Result};
use crate::runner;
use std::path::{Path, PathBuf};

pub const GCLOUD: &str = "gcloud";

// ---------------------------------------------------------------------------
// CloudDeploy
// ---------------------------------------------------------------------------

pub struct CloudDeploy {
    root: PathBuf,
    config: CloudConfig,
}

impl CloudDeploy {
    pub fn new(root: &Path, config: CloudConfig) -> Self {
        Self {
            root: root.to_path_buf(),
            config,
        }
    }

    /// Preconditions in a fixed order: CLI on PATH, an active authenticated
    /// account, a resolvable project id. Each failure stops the chain, so a
    /// missing CLI never triggers an auth check and missing auth never
    /// triggers project resolution.
    ///
    /// Returns the active project id.
    pub fn preflight(&self) -> Result<String> {
        if runner::find_binary(GCLOUD).is_none() {
            return Err(OpsError::GcloudNotFound);
        }

        let account = runner::run_captured(GCLOUD, &auth_list_args(), &self.root)?;
        if account.is_empty() {
            return Err(OpsError::NotAuthenticated);
        }

        let project = runner::run_captured_unchecked(GCLOUD, &project_args(), &self.root)?;
        if !project_is_set(&project) {
            return Err(OpsError::ProjectUnset);
        }
        Ok(project)
    }

    /// Enable all configured APIs in one call. Already-enabled APIs are a
    /// provider-level no-op.
    pub fn enable_apis(&self) -> Result<()> {
        if self.config.apis.is_empty() {
            return Ok(());
        }
        runner::run_streamed(GCLOUD, &enable_apis_args(&self.config.apis), &self.root)
    }

    pub fn set_region(&self) -> Result<()> {
        runner::run_streamed(GCLOUD, &set_region_args(&self.config.region), &self.root)
    }

    /// Submit the Cloud Build pipeline; build output streams to the terminal.
    pub fn submit_build(&self) -> Result<()> {
        runner::run_streamed(
            GCLOUD,
            &submit_build_args(&self.config.build_config),
            &self.root,
        )
    }

    /// Resolve the deployed service's public URL.
    pub fn service_url(&self) -> Result<String> {
        runner::run_captured(
            GCLOUD,
            &describe_args(&self.config.service, &self.config.region),
            &self.root,
        )
    }
}

// ---------------------------------------------------------------------------
// Argument builders
// ---------------------------------------------------------------------------

pub fn auth_list_args() -> Vec<String> {
    [
        "auth",
        "list",
        "--filter=status:ACTIVE",
        "--format=value(account)",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

pub fn project_args() -> Vec<String> {
    ["config", "get-value", "project"]
        .into_iter()
        .map(String::from)
        .collect()
}

pub fn enable_apis_args(apis: &[String]) -> Vec<String> {
    let mut args = vec!["services".to_string(), "enable".to_string()];
    args.extend(apis.iter().cloned());
    args
}

pub fn set_region_args(region: &str) -> Vec<String> {
    ["config", "set", "run/region", region]
        .into_iter()
        .map(String::from)
        .collect()
}

pub fn submit_build_args(build_config: &str) -> Vec<String> {
    ["builds", "submit", "--config", build_config]
        .into_iter()
        .map(String::from)
        .collect()
}

pub fn describe_args(service: &str, region: &str) -> Vec<String> {
    [
        "run",
        "services",
        "describe",
        service,
        "--region",
        region,
        "--platform",
        "managed",
        "--format",
        "value(status.url)",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

/// `gcloud config get-value` prints `(unset)` when no project is configured.
pub fn project_is_set(raw: &str) -> bool {
    let value = raw.trim();
    !value.is_empty() && value != "(unset)"
}

// ---------------------------------------------------------------------------
// Derived URLs
// ---------------------------------------------------------------------------

/// Convenience URLs printed alongside the service URL. The backend serves
/// its OpenAPI docs at /docs and a liveness probe at /health.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct ServiceUrls {
    pub base: String,
    pub docs: String,
    pub health: String,
}

impl ServiceUrls {
    pub fn from_base(url: &str) -> Self {
        let base = url.trim_end_matches('/').to_string();
        Self {
            docs: format!("{base}/docs"),
            health: format!("{base}/health"),
            base,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auth_list_selects_active_accounts() {
        assert_eq!(
            auth_list_args(),
            [
                "auth",
                "list",
                "--filter=status:ACTIVE",
                "--format=value(account)"
            ]
        );
    }

    #[test]
    fn enable_apis_is_one_invocation() {
        let apis = vec!["run.googleapis.com".to_string(), "cloudbuild.googleapis.com".to_string()];
        assert_eq!(
            enable_apis_args(&apis),
            [
                "services",
                "enable",
                "run.googleapis.com",
                "cloudbuild.googleapis.com"
            ]
        );
    }

    #[test]
    fn region_is_set_under_the_run_section() {
        assert_eq!(
            set_region_args("us-central1"),
            ["config", "set", "run/region", "us-central1"]
        );
    }

    #[test]
    fn build_submits_the_configured_pipeline() {
        assert_eq!(
            submit_build_args("deploy/cloudbuild.yaml"),
            ["builds", "submit", "--config", "deploy/cloudbuild.yaml"]
        );
    }

    #[test]
    fn describe_extracts_only_the_url() {
        let args = describe_args("ai-tutor-api", "us-central1");
        assert_eq!(args[..4], ["run", "services", "describe", "ai-tutor-api"]);
        assert!(args.contains(&"--platform".to_string()));
        assert_eq!(args.last().unwrap(), "value(status.url)");
    }

    #[test]
    fn unset_project_markers_are_recognized() {
        assert!(!project_is_set(""));
        assert!(!project_is_set("  "));
        assert!(!project_is_set("(unset)"));
        assert!(project_is_set("elivision-ai-1"));
    }

    #[test]
    fn derived_urls_share_the_base() {
        let urls = ServiceUrls::from_base("https://api-xyz.a.run.app/");
        assert_eq!(urls.base, "https://api-xyz.a.run.app");
        assert_eq!(urls.docs, "https://api-xyz.a.run.app/docs");
        assert_eq!(urls.health, "https://api-xyz.a.run.app/health");
    }
}
