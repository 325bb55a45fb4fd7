use anyhow::Context;
use std::path::Path;
use tutorctl_core::compose::ComposeStack;
use tutorctl_core::config::Config;

/// Prune unused Docker system resources and volumes.
pub fn run(root: &Path) -> anyhow::Result<()> {
    let config = Config::load(root).context("failed to load config")?;
    let stack = ComposeStack::new(root, config.stack);
    stack.cleanup()?;
    println!("Cleanup complete.");
    Ok(())
}
