//! Place Order Use Case
//!
//! Ordering is strict: validate, then reserve stock, then persist. A persist
//! failure after a successful reservation triggers a compensating release
//! and surfaces a storage error; nothing is retried.

use std::sync::Arc;

use chrono::{NaiveDate, Utc};

use super::UseCaseError;
use crate::application::current_user::CurrentUser;
use crate::application::ports::EventPublisherPort;
use crate::domain::catalog::{ProductError, ProductRepository};
use crate::domain::ordering::aggregate::{NewOrderParams, Order};
use crate::domain::ordering::repository::OrderRepository;
use crate::domain::ordering::services::DeliverySchedule;
use crate::domain::shared::{ProductId, Quantity};

/// Input for placing an order.
#[derive(Debug, Clone)]
pub struct PlaceOrderRequest {
    /// Product to order.
    pub product_id: String,
    /// Units to order.
    pub quantity: u32,
    /// Requested delivery date.
    pub purchase_date: NaiveDate,
    /// Delivery time slot.
    pub delivery_time: String,
    /// Delivery region.
    pub delivery_location: String,
    /// Optional customer message.
    pub message: Option<String>,
}

/// Use case for placing orders with atomic stock reservation.
pub struct PlaceOrderUseCase<P, O, E>
where
    P: ProductRepository,
    O: OrderRepository,
    E: EventPublisherPort,
{
    products: Arc<P>,
    orders: Arc<O>,
    event_publisher: Arc<E>,
    schedule: Arc<DeliverySchedule>,
}

impl<P, O, E> PlaceOrderUseCase<P, O, E>
where
    P: ProductRepository,
    O: OrderRepository,
    E: EventPublisherPort,
{
    /// Create a new `PlaceOrderUseCase`.
    pub const fn new(
        products: Arc<P>,
        orders: Arc<O>,
        event_publisher: Arc<E>,
        schedule: Arc<DeliverySchedule>,
    ) -> Self {
        Self {
            products,
            orders,
            event_publisher,
            schedule,
        }
    }

    /// Execute the use case.
    ///
    /// # Errors
    ///
    /// Returns validation errors, `ProductUnavailable` conditions, or
    /// `OutOfStock` if the reservation fails.
    pub async fn execute(
        &self,
        user: &CurrentUser,
        request: PlaceOrderRequest,
    ) -> Result<Order, UseCaseError> {
        let quantity = Quantity::new(request.quantity);
        let today = Utc::now().date_naive();

        self.schedule
            .validate_purchase_date(request.purchase_date, today)?;
        self.schedule.validate_time_slot(&request.delivery_time)?;
        self.schedule.validate_region(&request.delivery_location)?;

        let product_id = ProductId::new(&request.product_id);
        let product = self
            .products
            .find_by_id(&product_id)
            .await?
            .ok_or_else(|| ProductError::NotFound {
                product_id: request.product_id.clone(),
            })?;

        if !product.is_active() {
            return Err(ProductError::Inactive {
                product_id: request.product_id.clone(),
            }
            .into());
        }

        // Advisory check; the authoritative one happens inside reserve_stock.
        if !product.has_stock(quantity) {
            return Err(ProductError::OutOfStock {
                product_id: request.product_id.clone(),
                requested: quantity.get(),
                available: product.stock(),
            }
            .into());
        }

        let params = NewOrderParams {
            user_id: user.id.clone(),
            username: user.username.clone(),
            product_id: product_id.clone(),
            product_name: product.name().to_string(),
            unit_price: product.price(),
            quantity,
            purchase_date: request.purchase_date,
            delivery_time: request.delivery_time,
            delivery_location: request.delivery_location,
            message: request.message.unwrap_or_default(),
        };
        params.validate()?;

        self.products.reserve_stock(&product_id, quantity).await?;

        let mut order = match Order::place(params) {
            Ok(order) => order,
            Err(e) => {
                // Validation was done above; treat as unreachable defect and
                // hand the units back before surfacing.
                self.compensate_reservation(&product_id, quantity).await;
                return Err(e.into());
            }
        };

        // Drain before persisting so the stored copy carries no pending
        // events; publish only once the write has stuck.
        let events = order.drain_events();

        if let Err(e) = self.orders.insert(&order).await {
            tracing::error!(
                order_id = %order.id(),
                error = %e,
                "Failed to persist order after stock reservation, releasing stock"
            );
            self.compensate_reservation(&product_id, quantity).await;
            return Err(e.into());
        }

        if let Err(e) = self.event_publisher.publish_order_events(events).await {
            tracing::error!(order_id = %order.id(), error = %e, "Failed to publish order events");
        }

        tracing::info!(
            order_id = %order.id(),
            user_id = %user.id,
            product_id = %product_id,
            quantity = quantity.get(),
            "Order placed"
        );

        Ok(order)
    }

    async fn compensate_reservation(&self, product_id: &ProductId, quantity: Quantity) {
        if let Err(e) = self.products.release_stock(product_id, quantity).await {
            tracing::error!(
                product_id = %product_id,
                quantity = quantity.get(),
                error = %e,
                "Compensating stock release failed"
            );
        }
    }
}
