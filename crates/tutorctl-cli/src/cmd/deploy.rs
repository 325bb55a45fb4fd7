use crate::output::print_json;
use anyhow::Context;
use std::path::Path;
use tutorctl_core::cloud::{CloudDeploy, ServiceUrls};
use tutorctl_core::config::Config;

/// The full Cloud Run deployment flow: preflight, enable APIs, set the run
/// region, submit the Cloud Build pipeline, print the resulting URLs.
pub fn run(root: &Path, json: bool) -> anyhow::Result<()> {
    let config = Config::load(root).context("failed to load config")?;
    let deploy = CloudDeploy::new(root, config.cloud.clone());

    let project = deploy.preflight()?;
    println!("Deploying to project: {project}");

    println!("Enabling required APIs...");
    deploy
        .enable_apis()
        .context("failed to enable required APIs")?;

    deploy
        .set_region()
        .context("failed to set deployment region")?;

    println!(
        "Submitting build ({}), this takes a while...",
        config.cloud.build_config
    );
    deploy.submit_build().context("build failed")?;

    let url = deploy
        .service_url()
        .context("failed to resolve the service URL")?;
    let urls = ServiceUrls::from_base(&url);

    if json {
        return print_json(&serde_json::json!({
            "project": project,
            "service": config.cloud.service,
            "region": config.cloud.region,
            "url": urls.base,
            "docs": urls.docs,
            "health": urls.health,
        }));
    }

    println!();
    println!("Deployed {} ({})", config.cloud.service, config.cloud.region);
    println!("  Service:  {}", urls.base);
    println!("  Docs:     {}", urls.docs);
    println!("  Health:   {}", urls.health);
    Ok(())
}
