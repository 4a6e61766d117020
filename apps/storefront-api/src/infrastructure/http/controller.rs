//! HTTP Controller (Driver Adapter)
//!
//! Axum-based REST API that delegates to application use cases.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post, put},
};

use crate::application::CurrentUser;
use crate::application::dto::{OrderDto, PagedOrdersDto, StatisticsDto};
use crate::application::ports::EventPublisherPort;
use crate::application::use_cases::{
    CancelOrderUseCase, OrderQueriesUseCase, PlaceOrderRequest, PlaceOrderUseCase,
    SetOrderStatusUseCase, UpdateOrderRequest, UpdateOrderUseCase,
};
use crate::domain::catalog::ProductRepository;
use crate::domain::ordering::errors::OrderError;
use crate::domain::ordering::repository::{OrderRepository, Page};
use crate::domain::ordering::services::DeliverySchedule;
use crate::domain::ordering::value_objects::OrderStatus;

use super::request::{
    CancelOrderBody, CreateOrderBody, ListOrdersQuery, SetStatusBody, UpdateOrderBody,
};
use super::response::{
    ApiError, HealthResponse, LocationsBody, OrderBody, OrdersBody, SuccessBody, TimesBody,
};

/// Application state shared across handlers.
pub struct AppState<P, O, E>
where
    P: ProductRepository,
    O: OrderRepository,
    E: EventPublisherPort,
{
    /// Use case for placing orders.
    pub place_order: Arc<PlaceOrderUseCase<P, O, E>>,
    /// Use case for editing pending orders.
    pub update_order: Arc<UpdateOrderUseCase<P, O>>,
    /// Use case for cancelling orders.
    pub cancel_order: Arc<CancelOrderUseCase<P, O, E>>,
    /// Use case for admin status transitions.
    pub set_order_status: Arc<SetOrderStatusUseCase<P, O, E>>,
    /// Read-side queries.
    pub queries: Arc<OrderQueriesUseCase<O>>,
    /// Delivery policy for the reference-data endpoints.
    pub schedule: Arc<DeliverySchedule>,
    /// Application version.
    pub version: String,
}

impl<P, O, E> Clone for AppState<P, O, E>
where
    P: ProductRepository,
    O: OrderRepository,
    E: EventPublisherPort,
{
    fn clone(&self) -> Self {
        Self {
            place_order: Arc::clone(&self.place_order),
            update_order: Arc::clone(&self.update_order),
            cancel_order: Arc::clone(&self.cancel_order),
            set_order_status: Arc::clone(&self.set_order_status),
            queries: Arc::clone(&self.queries),
            schedule: Arc::clone(&self.schedule),
            version: self.version.clone(),
        }
    }
}

/// Create the HTTP router with all endpoints.
pub fn create_router<P, O, E>(state: AppState<P, O, E>) -> Router
where
    P: ProductRepository + 'static,
    O: OrderRepository + 'static,
    E: EventPublisherPort + 'static,
{
    Router::new()
        .route("/health", get(health_check))
        .route("/api/v1/orders", post(create_order).get(list_my_orders))
        .route("/api/v1/orders/upcoming", get(list_upcoming_orders))
        .route("/api/v1/orders/past", get(list_past_orders))
        .route("/api/v1/orders/{id}", get(get_order).patch(update_order))
        .route("/api/v1/orders/{id}/cancel", post(cancel_order))
        .route("/api/v1/admin/orders", get(list_all_orders))
        .route("/api/v1/admin/orders/statistics", get(order_statistics))
        .route("/api/v1/admin/orders/{id}/status", put(set_order_status))
        .route("/api/v1/delivery/locations", get(delivery_locations))
        .route("/api/v1/delivery/times", get(delivery_times))
        .with_state(state)
}

/// Health check endpoint.
async fn health_check<P, O, E>(State(state): State<AppState<P, O, E>>) -> impl IntoResponse
where
    P: ProductRepository,
    O: OrderRepository,
    E: EventPublisherPort,
{
    Json(HealthResponse {
        status: "healthy",
        version: state.version.clone(),
    })
}

/// Place a new order.
async fn create_order<P, O, E>(
    State(state): State<AppState<P, O, E>>,
    user: CurrentUser,
    Json(body): Json<CreateOrderBody>,
) -> Result<impl IntoResponse, ApiError>
where
    P: ProductRepository,
    O: OrderRepository,
    E: EventPublisherPort,
{
    let order = state
        .place_order
        .execute(
            &user,
            PlaceOrderRequest {
                product_id: body.product_id,
                quantity: body.quantity,
                purchase_date: body.purchase_date,
                delivery_time: body.delivery_time,
                delivery_location: body.delivery_location,
                message: body.message,
            },
        )
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(SuccessBody::with_message(
            "Order created successfully",
            OrderBody {
                order: OrderDto::from_order(&order),
            },
        )),
    ))
}

/// The requester's orders, paginated.
async fn list_my_orders<P, O, E>(
    State(state): State<AppState<P, O, E>>,
    user: CurrentUser,
    Query(query): Query<ListOrdersQuery>,
) -> Result<impl IntoResponse, ApiError>
where
    P: ProductRepository,
    O: OrderRepository,
    E: EventPublisherPort,
{
    let page = Page::new(
        query.page.unwrap_or(1),
        query.page_size.unwrap_or(Page::DEFAULT_SIZE),
    );
    let result = state
        .queries
        .list_for_user(&user, page, query.status.as_deref())
        .await?;

    Ok(Json(SuccessBody::of(PagedOrdersDto::from_page(&result))))
}

/// The requester's upcoming orders.
async fn list_upcoming_orders<P, O, E>(
    State(state): State<AppState<P, O, E>>,
    user: CurrentUser,
) -> Result<impl IntoResponse, ApiError>
where
    P: ProductRepository,
    O: OrderRepository,
    E: EventPublisherPort,
{
    let orders = state.queries.list_upcoming(&user).await?;
    Ok(Json(SuccessBody::of(OrdersBody {
        orders: orders.iter().map(OrderDto::from_order).collect(),
    })))
}

/// The requester's past orders.
async fn list_past_orders<P, O, E>(
    State(state): State<AppState<P, O, E>>,
    user: CurrentUser,
) -> Result<impl IntoResponse, ApiError>
where
    P: ProductRepository,
    O: OrderRepository,
    E: EventPublisherPort,
{
    let orders = state.queries.list_past(&user).await?;
    Ok(Json(SuccessBody::of(OrdersBody {
        orders: orders.iter().map(OrderDto::from_order).collect(),
    })))
}

/// One order, visible to its owner or an admin.
async fn get_order<P, O, E>(
    State(state): State<AppState<P, O, E>>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError>
where
    P: ProductRepository,
    O: OrderRepository,
    E: EventPublisherPort,
{
    let order = state.queries.get_order(&user, &id).await?;
    Ok(Json(SuccessBody::of(OrderBody {
        order: OrderDto::from_order(&order),
    })))
}

/// Edit a pending order.
async fn update_order<P, O, E>(
    State(state): State<AppState<P, O, E>>,
    user: CurrentUser,
    Path(id): Path<String>,
    Json(body): Json<UpdateOrderBody>,
) -> Result<impl IntoResponse, ApiError>
where
    P: ProductRepository,
    O: OrderRepository,
    E: EventPublisherPort,
{
    let order = state
        .update_order
        .execute(
            &user,
            &id,
            UpdateOrderRequest {
                purchase_date: body.purchase_date,
                delivery_time: body.delivery_time,
                delivery_location: body.delivery_location,
                message: body.message,
                quantity: body.quantity,
            },
        )
        .await?;

    Ok(Json(SuccessBody::with_message(
        "Order updated successfully",
        OrderBody {
            order: OrderDto::from_order(&order),
        },
    )))
}

/// Cancel an order.
async fn cancel_order<P, O, E>(
    State(state): State<AppState<P, O, E>>,
    user: CurrentUser,
    Path(id): Path<String>,
    Json(body): Json<CancelOrderBody>,
) -> Result<impl IntoResponse, ApiError>
where
    P: ProductRepository,
    O: OrderRepository,
    E: EventPublisherPort,
{
    let order = state.cancel_order.execute(&user, &id, body.reason).await?;
    Ok(Json(SuccessBody::with_message(
        "Order cancelled successfully",
        OrderBody {
            order: OrderDto::from_order(&order),
        },
    )))
}

/// All orders (admin), with optional status filter and search.
async fn list_all_orders<P, O, E>(
    State(state): State<AppState<P, O, E>>,
    user: CurrentUser,
    Query(query): Query<ListOrdersQuery>,
) -> Result<impl IntoResponse, ApiError>
where
    P: ProductRepository,
    O: OrderRepository,
    E: EventPublisherPort,
{
    let page = Page::new(
        query.page.unwrap_or(1),
        query.page_size.unwrap_or(Page::DEFAULT_SIZE),
    );
    let result = state
        .queries
        .list_all(&user, page, query.status.as_deref(), query.search.as_deref())
        .await?;

    Ok(Json(SuccessBody::of(PagedOrdersDto::from_page(&result))))
}

/// Admin status transition.
async fn set_order_status<P, O, E>(
    State(state): State<AppState<P, O, E>>,
    user: CurrentUser,
    Path(id): Path<String>,
    Json(body): Json<SetStatusBody>,
) -> Result<impl IntoResponse, ApiError>
where
    P: ProductRepository,
    O: OrderRepository,
    E: EventPublisherPort,
{
    let status = body
        .status
        .parse::<OrderStatus>()
        .map_err(|e| OrderError::InvalidParameters {
            field: "status".to_string(),
            message: e.to_string(),
        })?;

    let order = state.set_order_status.execute(&user, &id, status).await?;
    Ok(Json(SuccessBody::with_message(
        "Order status updated successfully",
        OrderBody {
            order: OrderDto::from_order(&order),
        },
    )))
}

/// Aggregate statistics (admin).
async fn order_statistics<P, O, E>(
    State(state): State<AppState<P, O, E>>,
    user: CurrentUser,
) -> Result<impl IntoResponse, ApiError>
where
    P: ProductRepository,
    O: OrderRepository,
    E: EventPublisherPort,
{
    let stats = state.queries.statistics(&user).await?;
    Ok(Json(SuccessBody::of(StatisticsDto::from_statistics(&stats))))
}

/// Configured delivery regions.
async fn delivery_locations<P, O, E>(State(state): State<AppState<P, O, E>>) -> impl IntoResponse
where
    P: ProductRepository,
    O: OrderRepository,
    E: EventPublisherPort,
{
    Json(SuccessBody::of(LocationsBody {
        locations: state.schedule.regions().to_vec(),
    }))
}

/// Configured delivery time slots.
async fn delivery_times<P, O, E>(State(state): State<AppState<P, O, E>>) -> impl IntoResponse
where
    P: ProductRepository,
    O: OrderRepository,
    E: EventPublisherPort,
{
    Json(SuccessBody::of(TimesBody {
        times: state.schedule.time_slots().to_vec(),
    }))
}
