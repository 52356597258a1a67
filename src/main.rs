use anyhow::Context;
use tracing::{error, info};

use pennant::config::AppConfig;
use pennant::context::{install_signal_handlers, RunContext};
use pennant::controller::SidebarUpdater;
use pennant::logging::init_logging;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::load().context("failed to load configuration")?;
    init_logging(&config.logging);

    if let Err(errors) = config.validate() {
        for problem in &errors {
            error!("Configuration error: {problem}");
        }
        anyhow::bail!("invalid configuration ({} problem(s))", errors.len());
    }

    info!(
        "Pennant v{} starting for community [{}]",
        env!("CARGO_PKG_VERSION"),
        config.bot.community
    );

    let ctx = RunContext::new();
    install_signal_handlers(ctx.stop.clone());

    let updater = SidebarUpdater::new(config, ctx)?;
    updater.run().await?;
    Ok(())
}
