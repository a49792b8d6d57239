use actix_web::web;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::infrastructure::config::AppConfig;
use crate::interfaces::http::{add_log, new_log_buffer, start_server, HttpState};

/// RUST_LOG wins over the configured filter when set.
pub fn init_tracing(default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    // stdout carries JSON reports
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

pub async fn serve(config: AppConfig) -> std::io::Result<()> {
    let logs = new_log_buffer();
    let address = format!("{}:{}", config.server.host, config.server.port);
    let state = web::Data::new(HttpState::new(config, logs.clone()));

    let server = start_server(state)?;
    info!(%address, "HTTP API listening");
    add_log(&logs, "INFO", "HttpApi", &format!("Listening on http://{}/api", address));

    server.await
}
