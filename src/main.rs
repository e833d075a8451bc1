use anyhow::{Context, Result};
use bunkerwatch::config::{Config, find_env_file};
use bunkerwatch::cooldown::CooldownStore;
use bunkerwatch::logging::{LogContext, get_logger_with_context, init_logging};
use bunkerwatch::prices::GameApiClient;
use bunkerwatch::scheduler::{Scheduler, ShutdownSignal};
use bunkerwatch::telegram::TelegramNotifier;
use bunkerwatch::timezone::resolve_timezone;
use bunkerwatch::PriceMonitor;
use std::time::Duration;

const HTTP_TIMEOUT: Duration = Duration::from_secs(30);

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Config error: {:#}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let env_path = find_env_file()
        .context(".env file not found (checked executable dir and working dir)")?;
    let config = Config::from_env_file(&env_path)?;

    init_logging(&config.logging)?;
    let logger = get_logger_with_context(
        LogContext::new("main").with_field("version", env!("APP_VERSION").to_string()),
    );
    logger.info("Shipping Manager price alert bot starting...");
    logger.info(&format!("Loaded config from: {}", env_path.display()));

    let timezone = resolve_timezone(&config.timezone);
    logger.info(&format!(
        "Config loaded - Fuel threshold: ${}/t, CO2 threshold: ${}/t, Timezone: {}",
        config.thresholds.fuel, config.thresholds.co2, timezone
    ));
    logger.info(&format!("Telegram chat ID: {}", config.telegram.chat_id));

    let shutdown = ShutdownSignal::install().context("failed to register signal handlers")?;

    let http = reqwest::Client::builder()
        .timeout(HTTP_TIMEOUT)
        .build()
        .context("failed to build HTTP client")?;

    let monitor = PriceMonitor::new(
        Box::new(GameApiClient::new(http.clone(), &config.game)),
        Box::new(TelegramNotifier::new(http, &config.telegram)),
        CooldownStore::beside_executable(),
        config.thresholds,
        config.telegram.chat_id.clone(),
    )
    .with_timezone(timezone);
    monitor.log_restored_state();

    let mut scheduler = Scheduler::new(monitor);
    scheduler.run(shutdown.recv()).await;

    logger.info("Shutdown complete");
    Ok(())
}
