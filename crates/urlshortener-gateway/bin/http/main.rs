mod cli;

use crate::cli::CLI;
use anyhow::Context;
use clap::Parser;
use tracing::info;
use urlshortener_gateway::{App, AppState};
use urlshortener_storage::RedbRepository;
use urlshortener_telemetry::TelemetryConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CLI::parse();

    let _telemetry = urlshortener_telemetry::init(
        TelemetryConfig::builder()
            .format(config.log_format.into())
            .log_file(config.log_file.clone())
            .otlp_endpoint(config.otlp_endpoint.clone())
            .build(),
    )
    .context("error configuring the logging")?;

    info!(
        listen_addr = %config.listen_addr,
        db_path = %config.db_path.display(),
        log_format = %config.log_format,
        "starting url shortener"
    );

    let repository = RedbRepository::open(&config.db_path)
        .with_context(|| format!("error opening the DB at {}", config.db_path.display()))?;
    repository
        .initialize()
        .context("error initializing the DB")?;

    let listener = tokio::net::TcpListener::bind(config.listen_addr)
        .await
        .with_context(|| format!("error listening at {}", config.listen_addr))?;
    info!(listen_addr = %listener.local_addr()?, "listening for requests");

    axum::serve(listener, App::router(AppState::new(repository)))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("error serving requests")?;

    info!("url shortener stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %err, "error listening for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "error listening for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("shutdown signal received");
}
