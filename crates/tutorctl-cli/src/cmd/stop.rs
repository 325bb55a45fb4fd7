use anyhow::Context;
use std::path::Path;
use tutorctl_core::compose::{ComposeStack, Profile};
use tutorctl_core::config::Config;

/// Tear down both stacks. Either may already be down; compose treats that as
/// a no-op, so both teardowns always run.
pub fn run(root: &Path) -> anyhow::Result<()> {
    let config = Config::load(root).context("failed to load config")?;
    let stack = ComposeStack::new(root, config.stack);

    stack.down(Profile::Dev)?;
    stack.down(Profile::Prod)?;
    println!("Stacks stopped.");
    Ok(())
}
