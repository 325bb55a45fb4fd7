use crate::output::print_json;
use anyhow::Context;
use std::path::Path;
use tutorctl_core::compose::ComposeStack;
use tutorctl_core::config::Config;

pub fn run(root: &Path, json: bool) -> anyhow::Result<()> {
    let config = Config::load(root).context("failed to load config")?;
    let stack = ComposeStack::new(root, config.stack);

    if json {
        let containers = stack.ps_json().context("failed to list containers")?;
        return print_json(&containers);
    }

    stack.ps()?;
    Ok(())
}
