// SPDX-FileCopyrightText: 2026 Portero Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `portero serve` command implementation.
//!
//! Wires the order store, the Gemini model, the conversation engine, and the
//! dashboard gateway together, then runs the single-worker event loop:
//! inbound events are processed one at a time, in arrival order, across all
//! guests. That serialization is what makes timestamp-derived order ids and
//! the in-memory session table safe without extra locking.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, error, info, warn};
use tracing_subscriber::EnvFilter;

use portero_config::PorteroConfig;
use portero_core::types::HealthStatus;
use portero_core::{LanguageModel, MessageChannel, PluginAdapter, PorteroError};
use portero_engine::{ConversationEngine, EngineSettings};
use portero_gateway::{GatewayState, ServerConfig};
use portero_gemini::GeminiModel;
use portero_intent::IntentInterpreter;
use portero_menu::MenuCatalog;
use portero_store::{JsonFileRepository, OrderStore};

use crate::console::ConsoleChannel;

/// Seconds between idle-session sweeps.
const SWEEP_PERIOD_SECS: u64 = 60;

/// Runs the `portero serve` command until the channel closes.
pub async fn run_serve(config: PorteroConfig) -> Result<(), PorteroError> {
    init_tracing(&config.agent.log_level);
    info!(agent = %config.agent.name, hotel = %config.hotel.name, "starting portero serve");

    if config.hotel.manager_address.trim().is_empty() {
        warn!("hotel.manager_address is not set; manager notifications go nowhere");
    }

    // Order store shared by the engine and the gateway.
    let repository = Arc::new(JsonFileRepository::new(&config.store.orders_path));
    match repository.health_check().await? {
        HealthStatus::Healthy => debug!("order repository healthy"),
        status => warn!(?status, "order repository reported degraded health"),
    }
    let orders = Arc::new(OrderStore::new(repository));

    // Language model behind the interpretation seam.
    let api_key = config.model.api_key.clone().ok_or_else(|| {
        PorteroError::Config(
            "model.api_key is required (set PORTERO_MODEL_API_KEY or [model] api_key)".into(),
        )
    })?;
    let model: Arc<dyn LanguageModel> = Arc::new(GeminiModel::new(&api_key, &config.model.model)?);
    let interpreter = IntentInterpreter::new(
        model,
        Duration::from_secs(config.model.timeout_secs),
    );

    let catalog = MenuCatalog::from_config(&config.menu, &config.hotel.currency);

    // Console channel stands in for the real messaging transport.
    let mut console = ConsoleChannel::new("guest-console@c.us");
    console.connect().await?;
    let channel: Arc<dyn MessageChannel> = Arc::new(console);

    let engine = Arc::new(ConversationEngine::new(
        channel.clone(),
        orders.clone(),
        interpreter,
        catalog,
        EngineSettings {
            hotel_name: config.hotel.name.clone(),
            manager_address: config.hotel.manager_address.clone(),
            check_in_time: config.hotel.check_in_time.clone(),
            check_out_time: config.hotel.check_out_time.clone(),
            max_history: config.session.max_history,
        },
        Duration::from_secs(config.session.idle_timeout_secs),
    ));

    // Dashboard gateway runs concurrently against the same order store.
    let gateway_state = GatewayState {
        orders: orders.clone(),
        notifier: Some(channel.clone()),
        manager_address: config.hotel.manager_address.clone(),
    };
    let server_config = ServerConfig {
        host: config.gateway.host.clone(),
        port: config.gateway.port,
    };
    tokio::spawn(async move {
        if let Err(e) = portero_gateway::start_server(&server_config, gateway_state).await {
            error!(error = %e, "dashboard gateway exited");
        }
    });

    // Periodic idle-session sweep bounds session table growth.
    {
        let engine = engine.clone();
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(Duration::from_secs(SWEEP_PERIOD_SECS));
            loop {
                ticker.tick().await;
                engine.sweep_idle_sessions().await;
            }
        });
    }

    // Single-worker event loop.
    loop {
        match channel.next_event().await {
            Ok(event) => {
                if let Err(e) = engine.handle_event(event).await {
                    error!(error = %e, "event handling failed");
                }
            }
            Err(e) => {
                info!(reason = %e, "channel closed, shutting down");
                break;
            }
        }
    }

    channel.shutdown().await?;
    Ok(())
}

fn init_tracing(level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}
