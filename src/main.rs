mod client;
mod config;
mod error;
mod routes;
mod state;

use std::future::Future;
use std::sync::Arc;

use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use client::{FlagClient, LaunchDarklyClient};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    if let Err(e) = run().await {
        tracing::error!(error = %e, "flag service exited");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = config::Config::from_env()?;

    let client = LaunchDarklyClient::start(&config.sdk_key, config.start_wait).await?;
    let client: Arc<dyn FlagClient> = Arc::new(client);

    let listener = TcpListener::bind(config.addr()).await?;
    tracing::info!(port = config.port, "flag service listening on {}", config.addr());

    serve(listener, client, shutdown_signal()).await?;
    Ok(())
}

/// Serves the façade until `shutdown` resolves, then closes the client.
async fn serve<F>(
    listener: TcpListener,
    client: Arc<dyn FlagClient>,
    shutdown: F,
) -> std::io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let app = routes::routes()
        .with_state(state::AppState::new(client.clone()))
        .layer(TraceLayer::new_for_http());

    let result = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await;

    tracing::info!("shutting down, closing flag client");
    client.close();
    result
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!(error = %e, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to listen for SIGTERM");
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
}
