use anyhow::Context;
use std::path::Path;
use tutorctl_core::compose::{ComposeStack, Profile};
use tutorctl_core::config::{Config, StackConfig};

/// `tutorctl dev` / `tutorctl prod`: full teardown, cold rebuild, detached
/// start. Preflight runs first and aborts before any build command when the
/// daemon is unreachable or the credentials key is missing.
pub fn run(root: &Path, profile: Profile) -> anyhow::Result<()> {
    let config = Config::load(root).context("failed to load config")?;
    let stack = ComposeStack::new(root, config.stack.clone());

    stack.preflight()?;

    println!(
        "Starting {} stack ({})",
        profile.name(),
        stack.compose_file(profile)
    );
    stack.rebuild(profile)?;

    print_endpoints(&config.stack, profile);
    Ok(())
}

fn print_endpoints(stack: &StackConfig, profile: Profile) {
    let base = stack.backend_url.trim_end_matches('/');
    println!();
    println!("{} stack is up", profile.name());
    println!("  Backend:  {base}");
    println!("  Health:   {base}/health");
    println!("  Docs:     {base}/docs");
    println!();
    println!("Follow logs with: tutorctl logs");
}
