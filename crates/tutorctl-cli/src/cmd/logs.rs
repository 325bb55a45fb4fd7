use anyhow::Context;
use std::path::Path;
use tutorctl_core::compose::ComposeStack;
use tutorctl_core::config::Config;

/// Follow one service's logs until interrupted (Ctrl+C propagates to the
/// child and ends the stream).
pub fn run(root: &Path, service: Option<&str>) -> anyhow::Result<()> {
    let config = Config::load(root).context("failed to load config")?;
    let service = service.unwrap_or(&config.stack.service).to_string();
    let stack = ComposeStack::new(root, config.stack);
    stack.logs(&service)?;
    Ok(())
}
