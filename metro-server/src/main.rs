use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use metro_server::config::ServerConfig;
use metro_server::live::Broadcaster;
use metro_server::network::NetworkHandle;
use metro_server::simulate;
use metro_server::web::{AppState, create_router};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = ServerConfig::from_env();

    // Fail fast if the network cannot be built
    let (network, report) = match NetworkHandle::load(config.source.clone()) {
        Ok(loaded) => loaded,
        Err(e) => {
            error!(error = %e, "failed to load network");
            std::process::exit(1);
        }
    };
    info!(
        stations = report.stations,
        lines = report.lines,
        edges = report.edges,
        fares = report.fares_loaded,
        times = report.times_loaded,
        "network loaded"
    );

    let broadcaster = Broadcaster::default();

    if config.simulate {
        tokio::spawn(simulate::run(
            network.clone(),
            broadcaster.clone(),
            config.simulation.clone(),
        ));
        info!(interval = ?config.simulation.interval, "simulated train feed enabled");
    }

    let state = AppState::new(network, &config.cache, broadcaster);
    let app = create_router(state);

    let listener = match tokio::net::TcpListener::bind(config.bind).await {
        Ok(listener) => listener,
        Err(e) => {
            error!(addr = %config.bind, error = %e, "failed to bind");
            std::process::exit(1);
        }
    };
    info!("Listening on http://{}", config.bind);
    info!("  GET  /health            - Health check");
    info!("  GET  /api/stations      - Station list");
    info!("  GET  /api/lines         - Line list");
    info!("  GET  /api/fare          - Direct fare (?from=&to=)");
    info!("  GET  /api/route         - Route with fare and time (?from=&to=)");
    info!("  POST /api/reload        - Reload network sources");
    info!("  POST /api/train_update  - Publish a train position");
    info!("  GET  /ws                - Live train positions");

    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        error!(error = %e, "server error");
        std::process::exit(1);
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("shutting down");
}
