use mc_server::{build_router, error::ServerError, logger};

use mc_supervisor::{
    AllowListValidator, CommandGateway, EventBroadcaster, ProcessSupervisor, SupervisorOptions,
};
use mc_ws::{
    AppState, ConnectionConfig, ConnectionLimits, ConnectionRegistry, Metrics, ShutdownCoordinator,
};

use std::error::Error;
use std::sync::Arc;
use std::time::Duration;

use log::{error, info, warn};
use metrics_exporter_prometheus::PrometheusBuilder;
use tokio::net::TcpListener;

const METRICS_UPKEEP_INTERVAL: Duration = Duration::from_secs(5);

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // .env is optional; MC_* variables may also come from the environment
    dotenvy::dotenv().ok();

    // Load and validate configuration
    let config = mc_config::Config::load()?;
    config.validate()?;

    let log_file_path: Option<std::path::PathBuf> = match config.logging.file {
        Some(ref filename) => {
            let log_dir = mc_config::Config::config_dir()?.join(&config.logging.dir);
            std::fs::create_dir_all(&log_dir)?;
            Some(log_dir.join(filename))
        }
        None => None,
    };

    // Initialize logger (before any other logging)
    logger::initialize(config.logging.level, log_file_path, config.logging.colored)?;

    info!("Starting mc-server v{}", env!("CARGO_PKG_VERSION"));
    config.log_summary();

    let metrics_handle = PrometheusBuilder::new()
        .install_recorder()
        .map_err(|e| ServerError::Metrics {
            message: e.to_string(),
        })?;
    let upkeep_handle = metrics_handle.clone();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(METRICS_UPKEEP_INTERVAL);
        loop {
            interval.tick().await;
            upkeep_handle.run_upkeep();
        }
    });

    // Supervisor and the gateway in front of it
    let broadcaster = EventBroadcaster::new(&config.broadcast);
    let options = SupervisorOptions::from_config(&config.instance, &config.stats);
    let supervisor = ProcessSupervisor::new(config.instance.clone(), broadcaster, options);
    let validator = Arc::new(AllowListValidator::from_config(&config.commands));
    let gateway = CommandGateway::new(supervisor.clone(), validator);

    let metrics = Metrics::new();
    supervisor.add_crash_listener(Arc::new(metrics.clone()));

    let shutdown = ShutdownCoordinator::new();

    let app_state = AppState {
        supervisor: supervisor.clone(),
        gateway,
        registry: ConnectionRegistry::new(ConnectionLimits::from_config(&config.server)),
        metrics,
        shutdown: shutdown.clone(),
        config: ConnectionConfig::from_config(&config.websocket),
        default_user_id: config.commands.default_user_id.clone(),
        metrics_handle: Some(metrics_handle),
    };

    let app = build_router(app_state);

    let bind_addr = config.bind_addr();
    let listener = TcpListener::bind(&bind_addr).await?;
    info!("Server listening on {}", listener.local_addr()?);

    spawn_signal_handler(shutdown.clone());

    info!("Server ready to accept connections");
    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            shutdown.subscribe_guard().wait().await;
            info!("HTTP listener draining");
        })
        .await?;

    // The game server must not outlive its controller
    match supervisor.stop(true).await {
        Ok(outcome) => info!("Game server shutdown: {}", outcome),
        Err(e) => warn!("Game server shutdown failed: {}", e),
    }

    info!("Graceful shutdown complete");
    Ok(())
}

fn spawn_signal_handler(shutdown: ShutdownCoordinator) {
    tokio::spawn(async move {
        #[cfg(unix)]
        {
            use tokio::signal::unix::{SignalKind, signal};

            let mut sigterm = match signal(SignalKind::terminate()) {
                Ok(sigterm) => sigterm,
                Err(e) => {
                    error!("Failed to listen for SIGTERM: {}", e);
                    wait_for_ctrl_c(&shutdown).await;
                    return;
                }
            };

            tokio::select! {
                _ = sigterm.recv() => {
                    info!("Received SIGTERM, initiating graceful shutdown");
                    shutdown.shutdown();
                }
                _ = wait_for_ctrl_c(&shutdown) => {}
            }
        }

        #[cfg(not(unix))]
        wait_for_ctrl_c(&shutdown).await;
    });
}

async fn wait_for_ctrl_c(shutdown: &ShutdownCoordinator) {
    match tokio::signal::ctrl_c().await {
        Ok(()) => {
            info!("Received SIGINT (Ctrl+C), initiating graceful shutdown");
            shutdown.shutdown();
        }
        Err(e) => error!("Failed to listen for SIGINT: {}", e),
    }
}
