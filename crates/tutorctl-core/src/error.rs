use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum OpsError {
    #[error(
        "docker not found on PATH\n\n\
         tutorctl drives the local stack through the Docker CLI.\n\
         Install Docker Engine or Docker Desktop:\n\
         \n\
           https://docs.docker.com/get-docker/\n\
         \n\
         Then re-run: tutorctl dev"
    )]
    DockerNotFound,

    #[error(
        "Docker daemon is not reachable (probed with 'docker info').\n\
         Start Docker and try again."
    )]
    DaemonUnreachable,

    #[error(
        "credentials file not found: {0}\n\n\
         The backend container mounts a Google service-account key at startup.\n\
         Place the JSON key at the path above, or point stack.credentials_file\n\
         in tutorctl.yaml somewhere else."
    )]
    CredentialsMissing(PathBuf),

    #[error(
        "gcloud not found on PATH\n\n\
         Deployment is delegated to the Google Cloud CLI.\n\
         Install it:\n\
         \n\
           https://cloud.google.com/sdk/docs/install\n\
         \n\
         Then re-run: tutorctl deploy"
    )]
    GcloudNotFound,

    #[error(
        "no active gcloud account found.\n\
         Run: gcloud auth login"
    )]
    NotAuthenticated,

    #[error(
        "no gcloud project is set.\n\
         Run: gcloud config set project <PROJECT_ID>"
    )]
    ProjectUnset,

    #[error("invalid service name '{0}': must be lowercase alphanumeric with hyphens")]
    InvalidServiceName(String),

    #[error("failed to spawn {program}: {source}")]
    SpawnFailed {
        program: String,
        source: std::io::Error,
    },

    #[error("{program} exited with {status}")]
    CommandFailed {
        program: String,
        status: std::process::ExitStatus,
    },

    #[error("{program} failed: {hint}")]
    CommandOutput { program: String, hint: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, OpsError>;
