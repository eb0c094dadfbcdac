use sheets_inventory::{
    adapters::config::app_config::AppConfig, prettyprint::prettyprint::PrettyFormatter,
};
use std::env;
use std::str::FromStr;
use tracing::{error, info, instrument, Level};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, Registry};

mod application_service_factory;
mod cli_adapter;

use application_service_factory::ApplicationServiceFactory;
use cli_adapter::CliAdapter;

const LOG_LEVEL_VAR: &str = "INVENTORY_LOG";
const LOG_FILE: &str = "inventory.log";

#[tokio::main]
#[instrument]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    setup_tracing()?;
    setup_panic_hook();

    let args: Vec<String> = env::args().collect();

    info!("Starting inventory CLI");

    let config = AppConfig::load().map_err(|report| format!("{:?}", report))?;
    let app_service = ApplicationServiceFactory::create(&config)
        .await
        .map_err(|report| format!("{:?}", report))?;
    let cli_adapter = CliAdapter::new(app_service, config.drive.public_base.clone());

    match cli_adapter.run(args).await {
        Ok(_) => {
            info!("CLI execution completed successfully");
            Ok(())
        }
        Err(e) => {
            error!("CLI execution failed: {:?}", e);
            Err(e)
        }
    }
}

fn log_level() -> Level {
    env::var(LOG_LEVEL_VAR)
        .ok()
        .and_then(|level| Level::from_str(&level).ok())
        .unwrap_or(Level::TRACE)
}

fn setup_tracing() -> Result<(), Box<dyn std::error::Error>> {
    let level = log_level();

    let stderr_layer = tracing_subscriber::fmt::layer()
        .event_format(PrettyFormatter::new(true))
        .with_writer(std::io::stderr);

    let log_file_layer = tracing_subscriber::fmt::layer()
        .event_format(PrettyFormatter::new(false))
        .with_writer(std::fs::File::create(LOG_FILE)?)
        .with_ansi(false);

    Registry::default()
        .with(
            tracing_subscriber::filter::Targets::new()
                .with_target("inventory", level)
                .with_target("sheets_inventory", level),
        )
        .with(log_file_layer)
        .with(stderr_layer)
        .init();

    Ok(())
}

fn setup_panic_hook() {
    tracing::trace!("Setting panic hook");
    std::panic::set_hook(Box::new(|info| {
        tracing::error!("panic: {info}");
    }));
}
