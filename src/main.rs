use std::env;
use std::error::Error;

use payroll_engine::api::{AppState, create_router};
use payroll_engine::config::ConfigLoader;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{EnvFilter, Layer, Registry, fmt, layer::SubscriberExt};

const DEFAULT_CONFIG_DIR: &str = "./config/default";
const DEFAULT_HOST_ADDRESS: &str = "127.0.0.1:3000";

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let subscriber = Registry::default().with(
        fmt::layer()
            .with_ansi(true)
            .with_line_number(true)
            .with_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
            ),
    );
    tracing::subscriber::set_global_default(subscriber)?;

    let config_dir = env::var("PAYROLL_CONFIG_DIR").unwrap_or_else(|_| DEFAULT_CONFIG_DIR.into());
    let host_address =
        env::var("HOST_ADDRESS").unwrap_or_else(|_| DEFAULT_HOST_ADDRESS.into());

    let config = ConfigLoader::load(&config_dir)?;
    info!(
        config_dir = %config_dir,
        daily_standard_hours = %config.settings().daily_standard_hours,
        overtime_multiplier = %config.settings().overtime_multiplier,
        include_weekends = config.settings().include_weekends,
        "Loaded settings"
    );

    let router = create_router(AppState::new(config));
    let listener = TcpListener::bind(&host_address).await?;
    info!(address = %host_address, "Payroll engine listening");

    axum::serve(listener, router).await?;
    Ok(())
}
