use atomia::{config, logging, ui};
use dotenv::dotenv;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    config::initialize_config()?;
    let config = config::get_config();
    let _logger = logging::init(&config)?;

    log::info!(
        "starting atomia against {} (timeout {}s)",
        config.api_base_url,
        config.request_timeout_secs
    );

    if let Err(e) = ui::run_ui(config).await {
        log::error!("terminal UI exited with error: {}", e);
        return Err(e.into());
    }

    log::info!("atomia closed");
    Ok(())
}
