//! Backend entry-point: wires the HTTP server and the completion sweep.

use std::time::Duration;

use actix_web::{App, HttpServer, web};
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use backend::domain::completion_sweep;
use backend::inbound::http;
use backend::server::{ServerConfig, build_services, seed_demo_data};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let config = ServerConfig::parse();
    let services = build_services(&config);
    if config.seed_demo_data {
        seed_demo_data(&services);
    }

    tokio::spawn(completion_sweep::run(
        services.bookings.as_ref().clone(),
        Duration::from_secs(config.sweep_interval_secs),
    ));

    let state = services.http_state();
    info!(bind_addr = %config.bind_addr, "starting server");
    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(state.clone()))
            .configure(http::configure)
    })
    .bind(config.bind_addr)?
    .run()
    .await
}
