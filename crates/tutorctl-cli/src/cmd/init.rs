use anyhow::Context;
use std::path::Path;
use tutorctl_core::config::Config;
use tutorctl_core::{io, paths};

/// Commented starter config; every value shown is the built-in default.
const DEFAULT_CONFIG: &str = "\
# tutorctl configuration. Every key is optional; the values below are the
# defaults the tool uses when this file is absent.

stack:
  compose_file: docker-compose.yml
  prod_compose_file: docker-compose.prod.yml
  service: backend
  credentials_file: service-account.json
  backend_url: http://localhost:8000
  test_command: [pytest]

cloud:
  region: us-central1
  service: ai-tutor-api
  build_config: deploy/cloudbuild.yaml
  apis:
    - cloudbuild.googleapis.com
    - run.googleapis.com
    - artifactregistry.googleapis.com
    - aiplatform.googleapis.com
";

/// Write a default `tutorctl.yaml`, leaving an existing one untouched, and
/// make sure the credentials key stays out of version control.
pub fn run(root: &Path) -> anyhow::Result<()> {
    let config_path = paths::config_path(root);
    let written = io::write_if_missing(&config_path, DEFAULT_CONFIG.as_bytes())
        .with_context(|| format!("failed to write {}", config_path.display()))?;
    if written {
        println!("created: {}", config_path.display());
    } else {
        println!("exists:  {}", config_path.display());
    }

    let config = Config::load(root).context("failed to load config")?;
    io::ensure_gitignore_entry(root, &config.stack.credentials_file)
        .context("failed to update .gitignore")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn template_parses_to_the_defaults() {
        let parsed = parse_via_load(DEFAULT_CONFIG);
        let defaults = Config::default();
        assert_eq!(parsed.stack.compose_file, defaults.stack.compose_file);
        assert_eq!(parsed.stack.service, defaults.stack.service);
        assert_eq!(parsed.stack.test_command, defaults.stack.test_command);
        assert_eq!(parsed.cloud.region, defaults.cloud.region);
        assert_eq!(parsed.cloud.apis, defaults.cloud.apis);
    }

    // Round-trip through Config::load to use the same deserializer path.
    fn parse_via_load(s: &str) -> Config {
        let dir = tempfile::TempDir::new().unwrap();
        std::fs::write(dir.path().join("tutorctl.yaml"), s).unwrap();
        Config::load(dir.path()).unwrap()
    }
}
