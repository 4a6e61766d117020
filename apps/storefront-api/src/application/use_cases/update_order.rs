//! Update Order Use Case
//!
//! Pending-only edits by the owner (or an admin). A quantity change adjusts
//! the stock reservation by the delta: the increase is reserved up front and
//! rolled back if the write loses; a decrease is released only after the
//! write sticks.

use std::sync::Arc;

use chrono::{NaiveDate, Utc};

use super::UseCaseError;
use crate::application::current_user::CurrentUser;
use crate::domain::catalog::ProductRepository;
use crate::domain::ordering::aggregate::{Order, OrderChanges};
use crate::domain::ordering::errors::OrderError;
use crate::domain::ordering::repository::OrderRepository;
use crate::domain::ordering::services::DeliverySchedule;
use crate::domain::ordering::value_objects::OrderStatus;
use crate::domain::shared::{OrderId, Quantity};

/// Editable fields of a pending order. Unset fields are left unchanged.
#[derive(Debug, Clone, Default)]
pub struct UpdateOrderRequest {
    /// New delivery date.
    pub purchase_date: Option<NaiveDate>,
    /// New delivery time slot.
    pub delivery_time: Option<String>,
    /// New delivery region.
    pub delivery_location: Option<String>,
    /// New customer message.
    pub message: Option<String>,
    /// New unit count.
    pub quantity: Option<u32>,
}

/// Use case for editing pending orders.
pub struct UpdateOrderUseCase<P, O>
where
    P: ProductRepository,
    O: OrderRepository,
{
    products: Arc<P>,
    orders: Arc<O>,
    schedule: Arc<DeliverySchedule>,
}

impl<P, O> UpdateOrderUseCase<P, O>
where
    P: ProductRepository,
    O: OrderRepository,
{
    /// Create a new `UpdateOrderUseCase`.
    pub const fn new(products: Arc<P>, orders: Arc<O>, schedule: Arc<DeliverySchedule>) -> Self {
        Self {
            products,
            orders,
            schedule,
        }
    }

    /// Execute the use case.
    ///
    /// # Errors
    ///
    /// Returns `NotFound`, `AccessDenied`, `NotEditable`, validation errors,
    /// or `OutOfStock` if a quantity increase cannot be reserved.
    pub async fn execute(
        &self,
        requester: &CurrentUser,
        order_id: &str,
        request: UpdateOrderRequest,
    ) -> Result<Order, UseCaseError> {
        let id = OrderId::new(order_id);
        let mut order = self
            .orders
            .find_by_id(&id)
            .await?
            .ok_or_else(|| OrderError::NotFound {
                order_id: order_id.to_string(),
            })?;

        if !requester.can_access(order.user_id()) {
            return Err(OrderError::AccessDenied {
                order_id: order_id.to_string(),
            }
            .into());
        }

        if order.status() != OrderStatus::Pending {
            return Err(OrderError::NotEditable {
                status: order.status(),
            }
            .into());
        }

        let today = Utc::now().date_naive();
        if let Some(date) = request.purchase_date {
            self.schedule.validate_purchase_date(date, today)?;
        }
        if let Some(ref slot) = request.delivery_time {
            self.schedule.validate_time_slot(slot)?;
        }
        if let Some(ref region) = request.delivery_location {
            self.schedule.validate_region(region)?;
        }

        let old_quantity = order.quantity();
        let new_quantity = request.quantity.map(Quantity::new);

        // Reserve any increase before touching the order; an insufficient
        // delta fails the whole edit.
        let reserved_delta = match new_quantity {
            Some(q) if q.get() > old_quantity.get() => {
                let delta = Quantity::new(q.get() - old_quantity.get());
                self.products.reserve_stock(order.product_id(), delta).await?;
                Some(delta)
            }
            _ => None,
        };

        let changes = OrderChanges {
            purchase_date: request.purchase_date,
            delivery_time: request.delivery_time,
            delivery_location: request.delivery_location,
            message: request.message,
            quantity: new_quantity,
        };

        if let Err(e) = order.apply_changes(changes) {
            if let Some(delta) = reserved_delta {
                self.release_quietly(&order, delta).await;
            }
            return Err(e.into());
        }

        if let Err(e) = self
            .orders
            .update_if_status(&order, OrderStatus::Pending)
            .await
        {
            if let Some(delta) = reserved_delta {
                self.release_quietly(&order, delta).await;
            }
            return Err(e.into());
        }

        // Release a decrease only after the write has stuck.
        if let Some(q) = new_quantity {
            if q.get() < old_quantity.get() {
                let delta = Quantity::new(old_quantity.get() - q.get());
                self.release_quietly(&order, delta).await;
            }
        }

        tracing::info!(order_id = %order.id(), user_id = %requester.id, "Order updated");

        Ok(order)
    }

    async fn release_quietly(&self, order: &Order, delta: Quantity) {
        if let Err(e) = self.products.release_stock(order.product_id(), delta).await {
            tracing::error!(
                order_id = %order.id(),
                product_id = %order.product_id(),
                quantity = delta.get(),
                error = %e,
                "Stock adjustment failed during order update"
            );
        }
    }
}
