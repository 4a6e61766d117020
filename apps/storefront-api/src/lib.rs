// Allow unwrap/expect in tests - tests should panic on unexpected errors
#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::too_many_lines,
        clippy::match_same_arms,
        clippy::needless_pass_by_value,
        clippy::default_trait_access,
        clippy::items_after_statements
    )
)]

//! Storefront API - Order Lifecycle Core
//!
//! Backend for a small e-commerce storefront. The core of the service is
//! the order lifecycle: placement with atomic stock reservation, the status
//! state machine, cancellation with compensating stock restoration, and the
//! upcoming/past classification queries behind the dashboards.
//!
//! # Architecture (Clean Architecture + DDD + Hexagonal)
//!
//! ## Layers (inside → outside)
//!
//! - **Domain**: Core business logic (aggregates, value objects, domain events)
//!   - `ordering`: Order aggregate, status lifecycle, delivery policy
//!   - `catalog`: Product lookup and the stock ledger operations
//!   - `shared`: Typed identifiers, money, quantities
//!
//! - **Application**: Use cases and orchestration
//!   - `use_cases`: `PlaceOrder`, `UpdateOrder`, `CancelOrder`,
//!     `SetOrderStatus`, `OrderQueries`
//!   - `ports`: Interfaces for external systems (`EventPublisherPort`)
//!   - `dto`: Data transfer objects for API boundaries
//!
//! - **Infrastructure**: Adapters (implementations)
//!   - `persistence`: In-memory repositories with atomic stock operations
//!   - `http`: Axum REST API with identity-header extraction
//!
//! Identity and the product catalog surface are external collaborators; the
//! core consumes an already-authenticated current user and a product
//! lookup/stock contract.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::pedantic)]

// =============================================================================
// Clean Architecture Layers
// =============================================================================

/// Domain layer - Core business logic with no external dependencies.
pub mod domain;

/// Application layer - Use cases and port definitions.
pub mod application;

/// Infrastructure layer - Adapters and external integrations.
pub mod infrastructure;

/// Configuration loading and validation.
pub mod config;

// =============================================================================
// Re-exports from Clean Architecture
// =============================================================================

// Domain re-exports
pub use domain::catalog::{Product, ProductError, ProductRepository};
pub use domain::ordering::{
    DeliverySchedule, NewOrderParams, Order, OrderChanges, OrderError, OrderRepository,
    OrderStateMachine, OrderStatus, Page, PagedOrders, PaymentStatus, TrackingNumber,
};
pub use domain::shared::{Money, OrderId, ProductId, Quantity, UserId};

// Application re-exports
pub use application::dto::{OrderDto, PagedOrdersDto, StatisticsDto};
pub use application::ports::{EventPublisherPort, NoOpEventPublisher};
pub use application::use_cases::{
    CancelOrderUseCase, OrderQueriesUseCase, PlaceOrderRequest, PlaceOrderUseCase,
    SetOrderStatusUseCase, UpdateOrderRequest, UpdateOrderUseCase, UseCaseError,
};
pub use application::{CurrentUser, Role};

// Infrastructure re-exports
pub use infrastructure::http::{AppState, create_router};
pub use infrastructure::persistence::{InMemoryOrderRepository, InMemoryProductRepository};
