mod cmd;
mod output;
mod root;

use clap::{Parser, Subcommand};
use cmd::config::ConfigSubcommand;
use std::path::PathBuf;
use tutorctl_core::compose::Profile;

#[derive(Parser)]
#[command(
    name = "tutorctl",
    about = "Operations CLI for the AI-tutor backend — local Compose stacks and Cloud Run deployment",
    version,
    propagate_version = true
)]
struct Cli {
    /// Project root (default: auto-detect from tutorctl.yaml or .git/)
    #[arg(long, global = true, env = "TUTORCTL_ROOT")]
    root: Option<PathBuf>,

    /// Output as JSON where supported
    #[arg(long, global = true, short = 'j')]
    json: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Rebuild and start the dev stack (down, no-cache build, up -d)
    Dev,

    /// Rebuild and start the production stack
    Prod,

    /// Tear down both dev and prod stacks
    Stop,

    /// Follow logs of one service
    Logs {
        /// Service name (default: the configured backend service)
        service: Option<String>,
    },

    /// List running containers for the stack
    Status,

    /// Run the test suite inside the running service container
    Test {
        /// Extra arguments appended to the configured test command
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },

    /// Prune unused Docker system resources and volumes
    Cleanup,

    /// Build and deploy to Cloud Run via Cloud Build
    Deploy,

    /// Write a default tutorctl.yaml at the project root
    Init,

    /// Validate the project configuration
    Config {
        #[command(subcommand)]
        subcommand: ConfigSubcommand,
    },
}

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_target(false)
        .init();

    let root = root::resolve_root(cli.root.as_deref());

    // A bare invocation starts the dev stack.
    let command = cli.command.unwrap_or(Commands::Dev);

    let result = match command {
        Commands::Dev => cmd::up::run(&root, Profile::Dev),
        Commands::Prod => cmd::up::run(&root, Profile::Prod),
        Commands::Stop => cmd::stop::run(&root),
        Commands::Logs { service } => cmd::logs::run(&root, service.as_deref()),
        Commands::Status => cmd::status::run(&root, cli.json),
        Commands::Test { args } => cmd::test::run(&root, &args),
        Commands::Cleanup => cmd::cleanup::run(&root),
        Commands::Deploy => cmd::deploy::run(&root, cli.json),
        Commands::Init => cmd::init::run(&root),
        Commands::Config { subcommand } => cmd::config::run(&root, subcommand, cli.json),
    };

    if let Err(e) = result {
        // Print the full error chain (anyhow's alternate Display)
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}
