use crate::error::{OpsError, Result};
use crate::paths;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::OnceLock;

// ---------------------------------------------------------------------------
// ConfigWarning / WarnLevel
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigWarning {
    pub level: WarnLevel,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarnLevel {
    Warning,
    Error,
}

// ---------------------------------------------------------------------------
// StackConfig
// ---------------------------------------------------------------------------

/// Local Compose stack settings. Defaults mirror the repo layout, so the tool
/// works without a config file at all.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StackConfig {
    #[serde(default = "default_compose_file")]
    pub compose_file: String,

    #[serde(default = "default_prod_compose_file")]
    pub prod_compose_file: String,

    /// Service the `logs` and `test` commands target.
    #[serde(default = "default_service")]
    pub service: String,

    /// Google service-account key the backend container mounts.
    /// Checked for existence before dev/prod start.
    #[serde(default = "default_credentials_file")]
    pub credentials_file: String,

    /// Printed after `dev`/`prod` bring the stack up. Never probed.
    #[serde(default = "default_backend_url")]
    pub backend_url: String,

    /// Command executed inside the service container by `tutorctl test`.
    #[serde(default = "default_test_command")]
    pub test_command: Vec<String>,
}

fn default_compose_file() -> String {
    "docker-compose.yml".to_string()
}

fn default_prod_compose_file() -> String {
    "docker-compose.prod.yml".to_string()
}

fn default_service() -> String {
    "backend".to_string()
}

fn default_credentials_file() -> String {
    "service-account.json".to_string()
}

fn default_backend_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_test_command() -> Vec<String> {
    vec!["pytest".to_string()]
}

impl Default for StackConfig {
    fn default() -> Self {
        Self {
            compose_file: default_compose_file(),
            prod_compose_file: default_prod_compose_file(),
            service: default_service(),
            credentials_file: default_credentials_file(),
            backend_url: default_backend_url(),
            test_command: default_test_command(),
        }
    }
}

// ---------------------------------------------------------------------------
// CloudConfig
// ---------------------------------------------------------------------------

/// Google Cloud deployment settings for `tutorctl deploy`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CloudConfig {
    #[serde(default = "default_region")]
    pub region: String,

    /// Cloud Run service name queried for its URL after the build.
    #[serde(default = "default_cloud_service")]
    pub service: String,

    /// Cloud Build pipeline definition submitted as-is.
    #[serde(default = "default_build_config")]
    pub build_config: String,

    /// APIs enabled before the build is submitted.
    #[serde(default = "default_apis")]
    pub apis: Vec<String>,
}

fn default_region() -> String {
    "us-central1".to_string()
}

fn default_cloud_service() -> String {
    "ai-tutor-api".to_string()
}

fn default_build_config() -> String {
    "deploy/cloudbuild.yaml".to_string()
}

fn default_apis() -> Vec<String> {
    [
        "cloudbuild.googleapis.com",
        "run.googleapis.com",
        "artifactregistry.googleapis.com",
        "aiplatform.googleapis.com",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

impl Default for CloudConfig {
    fn default() -> Self {
        Self {
            region: default_region(),
            service: default_cloud_service(),
            build_config: default_build_config(),
            apis: default_apis(),
        }
    }
}

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub stack: StackConfig,

    #[serde(default)]
    pub cloud: CloudConfig,
}

impl Config {
    /// Load `tutorctl.yaml` from the project root, falling back to defaults
    /// when the file is absent.
    pub fn load(root: &Path) -> Result<Self> {
        let path = paths::config_path(root);
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(&path)?;
        Ok(serde_yaml::from_str(&content)?)
    }

    /// Check the config for common mistakes. Error-level findings make the
    /// affected commands fail; warnings are advisory.
    pub fn validate(&self, root: &Path) -> Vec<ConfigWarning> {
        let mut warnings = Vec::new();

        for name in [&self.stack.service, &self.cloud.service] {
            if let Err(e) = validate_service_name(name) {
                warnings.push(ConfigWarning {
                    level: WarnLevel::Error,
                    message: e.to_string(),
                });
            }
        }

        if self.stack.test_command.is_empty() {
            warnings.push(ConfigWarning {
                level: WarnLevel::Error,
                message: "stack.test_command is empty; 'tutorctl test' has nothing to run".into(),
            });
        }

        if self.cloud.apis.is_empty() {
            warnings.push(ConfigWarning {
                level: WarnLevel::Warning,
                message: "cloud.apis is empty; deploy will not enable any APIs".into(),
            });
        }

        for (label, file) in [
            ("stack.compose_file", &self.stack.compose_file),
            ("stack.prod_compose_file", &self.stack.prod_compose_file),
            ("stack.credentials_file", &self.stack.credentials_file),
            ("cloud.build_config", &self.cloud.build_config),
        ] {
            let path = paths::resolve(root, file);
            if !path.exists() {
                warnings.push(ConfigWarning {
                    level: WarnLevel::Warning,
                    message: format!("{label} not found: {}", path.display()),
                });
            }
        }

        warnings
    }
}

static SERVICE_NAME_RE: OnceLock<Regex> = OnceLock::new();

fn service_name_re() -> &'static Regex {
    SERVICE_NAME_RE.get_or_init(|| Regex::new(r"^[a-z0-9]+(-[a-z0-9]+)*$").unwrap())
}

/// Compose and Cloud Run both want lowercase alphanumeric-with-hyphens names.
pub fn validate_service_name(name: &str) -> Result<()> {
    if !service_name_re().is_match(name) {
        return Err(OpsError::InvalidServiceName(name.to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn defaults_match_the_repo_layout() {
        let config = Config::default();
        assert_eq!(config.stack.compose_file, "docker-compose.yml");
        assert_eq!(config.stack.prod_compose_file, "docker-compose.prod.yml");
        assert_eq!(config.stack.service, "backend");
        assert_eq!(config.stack.backend_url, "http://localhost:8000");
        assert_eq!(config.stack.test_command, vec!["pytest"]);
        assert_eq!(config.cloud.region, "us-central1");
        assert_eq!(config.cloud.build_config, "deploy/cloudbuild.yaml");
        assert_eq!(config.cloud.apis.len(), 4);
    }

    #[test]
    fn missing_file_loads_defaults() {
        let dir = TempDir::new().unwrap();
        let config = Config::load(dir.path()).unwrap();
        assert_eq!(config.stack.service, "backend");
    }

    #[test]
    fn partial_yaml_merges_with_defaults() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join("tutorctl.yaml"),
            "stack:\n  service: api\ncloud:\n  region: europe-west1\n",
        )
        .unwrap();
        let config = Config::load(dir.path()).unwrap();
        assert_eq!(config.stack.service, "api");
        assert_eq!(config.stack.compose_file, "docker-compose.yml");
        assert_eq!(config.cloud.region, "europe-west1");
        assert_eq!(config.cloud.service, "ai-tutor-api");
    }

    #[test]
    fn malformed_yaml_is_an_error() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("tutorctl.yaml"), "stack: [not a map").unwrap();
        assert!(Config::load(dir.path()).is_err());
    }

    #[test]
    fn service_names_accept_hyphenated_lowercase() {
        assert!(validate_service_name("backend").is_ok());
        assert!(validate_service_name("ai-tutor-api").is_ok());
        assert!(validate_service_name("svc-2").is_ok());
    }

    #[test]
    fn service_names_reject_everything_else() {
        assert!(validate_service_name("").is_err());
        assert!(validate_service_name("Backend").is_err());
        assert!(validate_service_name("my_service").is_err());
        assert!(validate_service_name("-leading").is_err());
        assert!(validate_service_name("trailing-").is_err());
    }

    #[test]
    fn validate_flags_bad_service_name_as_error() {
        let dir = TempDir::new().unwrap();
        let mut config = Config::default();
        config.stack.service = "Not Valid".into();
        let warnings = config.validate(dir.path());
        assert!(warnings
            .iter()
            .any(|w| w.level == WarnLevel::Error && w.message.contains("Not Valid")));
    }

    #[test]
    fn validate_warns_about_missing_files() {
        let dir = TempDir::new().unwrap();
        let config = Config::default();
        let warnings = config.validate(dir.path());
        // Nothing exists in an empty tempdir: both compose files, the
        // credentials key, and the build config are reported.
        let missing = warnings
            .iter()
            .filter(|w| w.level == WarnLevel::Warning)
            .count();
        assert_eq!(missing, 4);
    }

    #[test]
    fn validate_is_quiet_when_files_exist() {
        let dir = TempDir::new().unwrap();
        let config = Config::default();
        for file in [
            "docker-compose.yml",
            "docker-compose.prod.yml",
            "service-account.json",
        ] {
            std::fs::write(dir.path().join(file), "x").unwrap();
        }
        std::fs::create_dir_all(dir.path().join("deploy")).unwrap();
        std::fs::write(dir.path().join("deploy/cloudbuild.yaml"), "steps: []").unwrap();
        assert!(config.validate(dir.path()).is_empty());
    }
}
