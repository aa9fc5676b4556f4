use tracing::info;

use academic_scheduler::config::AppConfig;
use academic_scheduler::http::{build_router, AppState};
use academic_scheduler::logging::{init_logging, LogConfig};
use academic_scheduler::{DESCRIPTION, NAME, VERSION};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::from_env()?;

    let log_config = LogConfig {
        level: config.log_level,
        ..if cfg!(debug_assertions) {
            LogConfig::development()
        } else {
            LogConfig::production()
        }
    };
    init_logging(log_config)?;

    info!(version = VERSION, name = NAME, description = DESCRIPTION, "starting up");

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(%addr, "listening");

    let state = AppState::new(config);
    let router = build_router(state);

    axum::serve(listener, router).await?;

    Ok(())
}
