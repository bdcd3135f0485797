// Contest Upsell - HTTP service
//
// Composition root: builds the clock, metrics, event log, forwarder and
// upsell service, then serves them to the Mini App host.

use anyhow::Result;
use clap::Parser;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

use contest_upsell::{
    api::{self, AppState},
    AnalyticsLog, AppMetrics, Config, EventForwarder, HttpForwarder, NoopForwarder, SystemClock,
    UpsellService, BOOST_PRICING, SECOND_CHANCE_PRICING,
};

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&config.log_filter))
        .init();

    info!("Starting contest upsell service");
    info!("Configuration:");
    info!("  - Bind address: {}", config.bind_address);
    info!("  - Forwarding: {}", if config.forwarding_enabled { "enabled" } else { "disabled" });
    info!("  - Boost: {} Stars", BOOST_PRICING.price_stars);
    info!("  - Second chance: {} Stars", SECOND_CHANCE_PRICING.price_stars);

    let metrics = Arc::new(AppMetrics::new()?);
    let clock = Arc::new(SystemClock);

    let forwarder: Arc<dyn EventForwarder> = if config.forwarding_enabled {
        let (forwarder, _worker) = HttpForwarder::spawn(&config.forwarding(), metrics.clone())?;
        Arc::new(forwarder)
    } else {
        Arc::new(NoopForwarder)
    };

    let log = Arc::new(AnalyticsLog::new(clock.clone(), forwarder, metrics.clone()));
    let service = Arc::new(UpsellService::new(clock, log, metrics.clone()));

    let app = api::router(AppState { service, metrics });
    let listener = tokio::net::TcpListener::bind(&config.bind_address).await?;

    info!("Listening on http://{}", config.bind_address);
    axum::serve(listener, app).await?;
    Ok(())
}
