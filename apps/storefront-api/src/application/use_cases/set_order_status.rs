//! Set Order Status Use Case (admin)
//!
//! Drives orders along the forward edges of the state machine. A transition
//! into the cancelled state carries the full cancellation semantics,
//! including the stock release.

use std::sync::Arc;

use super::UseCaseError;
use crate::application::current_user::CurrentUser;
use crate::application::ports::EventPublisherPort;
use crate::domain::catalog::{ProductError, ProductRepository};
use crate::domain::ordering::aggregate::Order;
use crate::domain::ordering::errors::OrderError;
use crate::domain::ordering::repository::OrderRepository;
use crate::domain::ordering::value_objects::OrderStatus;
use crate::domain::shared::OrderId;

/// Reason recorded when an admin cancels through the status endpoint.
const ADMIN_CANCEL_REASON: &str = "Cancelled by administrator";

/// Use case for admin-driven status transitions.
pub struct SetOrderStatusUseCase<P, O, E>
where
    P: ProductRepository,
    O: OrderRepository,
    E: EventPublisherPort,
{
    products: Arc<P>,
    orders: Arc<O>,
    event_publisher: Arc<E>,
}

impl<P, O, E> SetOrderStatusUseCase<P, O, E>
where
    P: ProductRepository,
    O: OrderRepository,
    E: EventPublisherPort,
{
    /// Create a new `SetOrderStatusUseCase`.
    pub const fn new(products: Arc<P>, orders: Arc<O>, event_publisher: Arc<E>) -> Self {
        Self {
            products,
            orders,
            event_publisher,
        }
    }

    /// Execute the use case.
    ///
    /// # Errors
    ///
    /// Returns `AccessDenied` for non-admins, `NotFound`, or
    /// `InvalidStateTransition` for edges outside the table.
    pub async fn execute(
        &self,
        requester: &CurrentUser,
        order_id: &str,
        new_status: OrderStatus,
    ) -> Result<Order, UseCaseError> {
        if !requester.is_admin() {
            return Err(OrderError::AccessDenied {
                order_id: order_id.to_string(),
            }
            .into());
        }

        let id = OrderId::new(order_id);
        let mut order = self
            .orders
            .find_by_id(&id)
            .await?
            .ok_or_else(|| OrderError::NotFound {
                order_id: order_id.to_string(),
            })?;

        let prior_status = order.status();

        if new_status == OrderStatus::Cancelled {
            order.cancel(ADMIN_CANCEL_REASON)?;
        } else {
            order.transition_to(new_status)?;
        }

        let events = order.drain_events();

        self.orders.update_if_status(&order, prior_status).await?;

        if new_status == OrderStatus::Cancelled {
            match self
                .products
                .release_stock(order.product_id(), order.quantity())
                .await
            {
                Ok(()) | Err(ProductError::NotFound { .. }) => {}
                Err(e) => {
                    tracing::error!(
                        order_id = %order.id(),
                        error = %e,
                        "Failed to restore stock for admin-cancelled order"
                    );
                }
            }
        }

        if let Err(e) = self.event_publisher.publish_order_events(events).await {
            tracing::error!(order_id = %order.id(), error = %e, "Failed to publish status events");
        }

        tracing::info!(
            order_id = %order.id(),
            from = %prior_status,
            to = %new_status,
            "Order status updated"
        );

        Ok(order)
    }
}
