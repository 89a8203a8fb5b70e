//! Process entry point shared by the three service binaries.
//!
//! Each binary serves one entity over HTTP and gRPC, backed by the same
//! database pool, outbox dispatcher and relay.

use std::sync::Arc;
use std::time::Duration;

use roomdesk_core::entity::EntityKind;
use roomdesk_db::store::PgStore;
use roomdesk_events::{
    AmqpConfig, AmqpPublisher, DisabledPublisher, EventPublisher, OutboxDispatcher, OutboxRelay,
};
use roomdesk_proto::v1::booking_service_server::BookingServiceServer;
use roomdesk_proto::v1::client_service_server::ClientServiceServer;
use roomdesk_proto::v1::room_service_server::RoomServiceServer;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::ServerConfig;
use crate::grpc::{AuthInterceptor, BookingGrpc, ClientGrpc, RoomGrpc};
use crate::router::build_app_router;
use crate::state::AppState;

/// How long background tasks get to finish after the listeners stop.
const SHUTDOWN_GRACE: Duration = Duration::from_secs(5);

/// Install the global tracing subscriber.
///
/// `RUST_LOG` overrides the default filter. `LOG_FORMAT=json` switches to
/// one JSON object per line.
pub fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        "roomdesk_api=debug,roomdesk_events=debug,roomdesk_db=info,tower_http=debug".into()
    });
    let registry = tracing_subscriber::registry().with(filter);

    if std::env::var("LOG_FORMAT").is_ok_and(|f| f.eq_ignore_ascii_case("json")) {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

/// Run the service for `service` until SIGINT or SIGTERM.
pub async fn run(service: EntityKind) -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    // --- Configuration ---
    let config = ServerConfig::from_env(service)?;
    tracing::info!(
        service = service.name(),
        host = %config.host,
        port = config.port,
        grpc_port = config.grpc_port,
        "Loaded server configuration",
    );

    // --- Database ---
    let pool = roomdesk_db::create_pool(&config.database_url).await?;
    tracing::info!("Database connection pool created");

    roomdesk_db::health_check(&pool).await?;
    tracing::info!("Database health check passed");

    roomdesk_db::run_migrations(&pool).await?;
    tracing::info!("Database migrations applied");

    let store = Arc::new(PgStore::new(pool));

    // --- Messaging ---
    let publisher: Arc<dyn EventPublisher> = if config.messaging_enabled {
        Arc::new(AmqpPublisher::new(&AmqpConfig::new(config.rabbitmq_url.clone()))?)
    } else {
        tracing::warn!("Messaging disabled, create events will not reach the broker");
        Arc::new(DisabledPublisher)
    };
    let dispatcher = Arc::new(OutboxDispatcher::new(
        publisher,
        store.clone(),
        config.outbox_max_attempts,
        config.publish_timeout(),
    ));

    let relay_cancel = CancellationToken::new();
    let relay = OutboxRelay::new(dispatcher.clone(), config.outbox_poll_interval());
    let relay_token = relay_cancel.clone();
    let relay_handle = tokio::spawn(async move {
        relay.run(relay_token).await;
    });

    // --- App state ---
    let config = Arc::new(config);
    let state = AppState::new(config.clone(), store, dispatcher);

    // --- Shutdown ---
    let shutdown = CancellationToken::new();
    let shutdown_trigger = shutdown.clone();
    tokio::spawn(async move {
        shutdown_signal().await;
        shutdown_trigger.cancel();
    });

    // --- HTTP ---
    let app = build_app_router(state.clone(), &config)?;
    let http_addr = config.http_addr()?;
    let listener = tokio::net::TcpListener::bind(http_addr).await?;
    tracing::info!(addr = %http_addr, "Starting HTTP server");

    let http_shutdown = shutdown.clone();
    let http = async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(async move { http_shutdown.cancelled().await })
            .await
            .map_err(anyhow::Error::from)
    };

    // --- gRPC ---
    let grpc_addr = config.grpc_addr()?;
    let interceptor = AuthInterceptor::new(config.jwt.clone());
    let mut builder = tonic::transport::Server::builder();
    let grpc_router = match service {
        EntityKind::Booking => builder.add_service(BookingServiceServer::with_interceptor(
            BookingGrpc::new(&state),
            interceptor,
        )),
        EntityKind::Client => builder.add_service(ClientServiceServer::with_interceptor(
            ClientGrpc::new(&state),
            interceptor,
        )),
        EntityKind::Room => builder.add_service(RoomServiceServer::with_interceptor(
            RoomGrpc::new(&state),
            interceptor,
        )),
    };
    tracing::info!(addr = %grpc_addr, "Starting gRPC server");

    let grpc_shutdown = shutdown.clone();
    let grpc = async move {
        grpc_router
            .serve_with_shutdown(grpc_addr, async move { grpc_shutdown.cancelled().await })
            .await
            .map_err(anyhow::Error::from)
    };

    let served = tokio::try_join!(http, grpc);

    // --- Post-shutdown cleanup ---
    tracing::info!("Listeners stopped, cleaning up");

    relay_cancel.cancel();
    let _ = tokio::time::timeout(SHUTDOWN_GRACE, relay_handle).await;
    tracing::info!("Outbox relay stopped");

    served?;
    tracing::info!("Graceful shutdown complete");
    Ok(())
}

/// Wait for a termination signal to initiate graceful shutdown.
///
/// Handles both SIGINT (Ctrl-C) and SIGTERM (on Unix). If a handler cannot
/// be installed the error is logged and that signal is ignored.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl-C handler");
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
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
