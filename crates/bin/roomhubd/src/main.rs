//! # roomhubd — roomhub daemon
//!
//! Composition root that wires the board, the event pipeline, and the HTTP
//! adapter together and starts the server.
//!
//! ## Responsibilities
//! - Parse configuration (TOML file, env vars) and build the room table
//! - Bring up the hardware board — a not-ready device aborts startup
//! - Create the actuation and web notification queues
//! - Spawn the long-lived tasks: executor, pollers, heartbeat, notifier
//! - Build the axum router, bind, and serve until ctrl-c
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer — no domain logic belongs here.

use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use roomhub_adapter_http_axum::clients::ClientSet;
use roomhub_adapter_http_axum::notifier::WebNotifier;
use roomhub_adapter_http_axum::sink::ChannelSink;
use roomhub_adapter_http_axum::state::AppState;
use roomhub_adapter_virtual::VirtualBoard;
use roomhub_app::commands::CommandService;
use roomhub_app::executor::ActuationExecutor;
use roomhub_app::heartbeat::Heartbeat;
use roomhub_app::queue;
use roomhub_app::registry::RoomRegistry;
use roomhub_app::switch_poller::SwitchPoller;
use roomhub_app::thermostat::ThermostatPoller;
use roomhub_domain::room::LedRole;

mod config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = config::Config::load().context("loading configuration")?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&config.logging.filter))
        .init();

    let leds = config.status_leds();
    let rooms = config.build_rooms().context("building room table")?;

    // A device that fails to come up is fatal; everything after this point
    // degrades locally instead.
    let board = Arc::new(VirtualBoard::open(&rooms, &leds).context("hardware not ready")?);

    let registry = Arc::new(RoomRegistry::new(rooms, leds).context("building room registry")?);

    let (actuation_tx, actuation_rx) = queue::channel();
    let (web_tx, web_rx) = queue::channel();

    let clients = ClientSet::new();
    let sink = ChannelSink::new(web_tx);

    tokio::spawn(ActuationExecutor::new(Arc::clone(&board), actuation_rx).run());
    tokio::spawn(
        SwitchPoller::new(
            Arc::clone(&registry),
            Arc::clone(&board),
            actuation_tx.clone(),
            sink.clone(),
            config.switch_interval(),
        )
        .run(),
    );
    tokio::spawn(
        ThermostatPoller::new(
            Arc::clone(&registry),
            Arc::clone(&board),
            actuation_tx.clone(),
            sink.clone(),
            config.thermostat_interval(),
        )
        .run(),
    );
    tokio::spawn(
        Heartbeat::new(
            registry.get_led_by_id(LedRole::Power),
            actuation_tx.clone(),
            config.heartbeat_interval(),
        )
        .run(),
    );
    tokio::spawn(WebNotifier::new(web_rx, clients.clone(), config.notifier_idle()).run());

    let commands = CommandService::new(Arc::clone(&registry), actuation_tx, sink);
    let state = AppState::new(commands, clients);
    let app = roomhub_adapter_http_axum::router::build(state, &config.ui.static_dir);

    let bind_addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind server at {bind_addr}"))?;

    tracing::info!(addr = %bind_addr, "roomhubd listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %err, "failed to listen for shutdown signal");
    }
}
