//! Storefront API Binary
//!
//! Starts the storefront order service.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin storefront-api
//! ```
//!
//! # Environment Variables
//!
//! - `STOREFRONT_CONFIG`: Path to config.yaml (default: ./config.yaml if present)
//! - `HTTP_PORT`: Overrides the configured HTTP port
//! - `RUST_LOG`: Log level (default: info)

use std::net::SocketAddr;
use std::sync::Arc;

use storefront_api::application::ports::NoOpEventPublisher;
use storefront_api::application::use_cases::{
    CancelOrderUseCase, OrderQueriesUseCase, PlaceOrderUseCase, SetOrderStatusUseCase,
    UpdateOrderUseCase,
};
use storefront_api::config::{Config, load_config};
use storefront_api::domain::catalog::Product;
use storefront_api::domain::ordering::services::DeliverySchedule;
use storefront_api::domain::shared::{Money, ProductId};
use storefront_api::infrastructure::http::{AppState, create_router};
use storefront_api::infrastructure::persistence::{
    InMemoryOrderRepository, InMemoryProductRepository,
};
use tokio::net::TcpListener;
use tokio::signal;

/// Concrete type alias for the wired application state.
type ConcreteAppState =
    AppState<InMemoryProductRepository, InMemoryOrderRepository, NoOpEventPublisher>;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    tracing::info!("Starting Storefront API");

    let config_path = std::env::var("STOREFRONT_CONFIG").ok();
    let mut config = load_config(config_path.as_deref())?;
    apply_env_overrides(&mut config);
    log_config(&config);

    let schedule = build_schedule(&config)?;
    let state = create_app_state(&config, schedule);

    let addr: SocketAddr = format!("{}:{}", config.server.bind_address, config.server.http_port)
        .parse()?;
    let listener = TcpListener::bind(addr).await?;
    tracing::info!(%addr, "Storefront API ready");

    axum::serve(listener, create_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Storefront API stopped");
    Ok(())
}

/// Initialize the tracing subscriber with environment filter.
///
/// Uses static directive strings that are compile-time constants guaranteed to parse.
#[allow(clippy::expect_used)]
fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(
                "storefront_api=info"
                    .parse()
                    .expect("static directive 'storefront_api=info' is valid"),
            ),
        )
        .init();
}

/// Apply environment variable overrides to the loaded configuration.
fn apply_env_overrides(config: &mut Config) {
    if let Ok(port) = std::env::var("HTTP_PORT") {
        match port.parse::<u16>() {
            Ok(port) => config.server.http_port = port,
            Err(_) => tracing::warn!(value = %port, "Ignoring unparseable HTTP_PORT"),
        }
    }
}

/// Log the effective configuration.
fn log_config(config: &Config) {
    tracing::info!(
        http_port = config.server.http_port,
        bind_address = %config.server.bind_address,
        time_slots = config.delivery.time_slots.len(),
        regions = config.delivery.regions.len(),
        blocked_weekdays = ?config.delivery.blocked_weekdays,
        seeded_products = config.catalog.products.len(),
        "Configuration loaded"
    );
}

/// Build the delivery policy from configuration data.
fn build_schedule(config: &Config) -> anyhow::Result<Arc<DeliverySchedule>> {
    let blocked = config.delivery.blocked_weekdays()?;
    Ok(Arc::new(DeliverySchedule::new(
        config.delivery.time_slots.clone(),
        config.delivery.regions.clone(),
        blocked,
    )))
}

/// Wire repositories and use cases into the shared application state.
fn create_app_state(config: &Config, schedule: Arc<DeliverySchedule>) -> ConcreteAppState {
    let products = Arc::new(InMemoryProductRepository::new());
    for seed in &config.catalog.products {
        products.add(Product::new(
            ProductId::new(&seed.id),
            seed.name.clone(),
            Money::from_f64(seed.price),
            seed.stock,
            seed.active,
        ));
    }
    if !products.is_empty() {
        tracing::info!(count = products.len(), "Catalog seeded from config");
    }

    let orders = Arc::new(InMemoryOrderRepository::new());
    let event_publisher = Arc::new(NoOpEventPublisher);

    ConcreteAppState {
        place_order: Arc::new(PlaceOrderUseCase::new(
            Arc::clone(&products),
            Arc::clone(&orders),
            Arc::clone(&event_publisher),
            Arc::clone(&schedule),
        )),
        update_order: Arc::new(UpdateOrderUseCase::new(
            Arc::clone(&products),
            Arc::clone(&orders),
            Arc::clone(&schedule),
        )),
        cancel_order: Arc::new(CancelOrderUseCase::new(
            Arc::clone(&products),
            Arc::clone(&orders),
            Arc::clone(&event_publisher),
        )),
        set_order_status: Arc::new(SetOrderStatusUseCase::new(
            Arc::clone(&products),
            Arc::clone(&orders),
            Arc::clone(&event_publisher),
        )),
        queries: Arc::new(OrderQueriesUseCase::new(Arc::clone(&orders))),
        schedule,
        version: env!("CARGO_PKG_VERSION").to_string(),
    }
}

/// Resolve when a shutdown signal arrives.
async fn shutdown_signal() {
    if let Err(e) = signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
    } else {
        tracing::info!("Shutdown signal received");
    }
}
