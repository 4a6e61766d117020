//! Cancel Order Use Case
//!
//! Cancellation is a terminal transition with a compensating stock release.
//! The release happens exactly once, after the cancelled state has won the
//! conditional write; a lost write releases nothing.

use std::sync::Arc;

use super::UseCaseError;
use crate::application::current_user::CurrentUser;
use crate::application::ports::EventPublisherPort;
use crate::domain::catalog::{ProductError, ProductRepository};
use crate::domain::ordering::aggregate::Order;
use crate::domain::ordering::errors::OrderError;
use crate::domain::ordering::repository::OrderRepository;
use crate::domain::shared::OrderId;

/// Default reason recorded when the requester gives none.
const DEFAULT_REASON: &str = "Cancelled by user";

/// Use case for cancelling orders.
pub struct CancelOrderUseCase<P, O, E>
where
    P: ProductRepository,
    O: OrderRepository,
    E: EventPublisherPort,
{
    products: Arc<P>,
    orders: Arc<O>,
    event_publisher: Arc<E>,
}

impl<P, O, E> CancelOrderUseCase<P, O, E>
where
    P: ProductRepository,
    O: OrderRepository,
    E: EventPublisherPort,
{
    /// Create a new `CancelOrderUseCase`.
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
    /// Returns `NotFound`, `AccessDenied`, or `InvalidStateTransition` if
    /// the order is past the cancellable window.
    pub async fn execute(
        &self,
        requester: &CurrentUser,
        order_id: &str,
        reason: Option<String>,
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

        let prior_status = order.status();
        order.cancel(reason.unwrap_or_else(|| DEFAULT_REASON.to_string()))?;
        let events = order.drain_events();

        // The conditional write is the once-only gate for the stock release:
        // a racing transition wins the CAS and this cancel releases nothing.
        self.orders.update_if_status(&order, prior_status).await?;

        match self
            .products
            .release_stock(order.product_id(), order.quantity())
            .await
        {
            Ok(()) => {}
            Err(ProductError::NotFound { .. }) => {
                // Product removed from the catalog since placement; the
                // cancellation stands, there is just nothing to restore.
                tracing::warn!(
                    order_id = %order.id(),
                    product_id = %order.product_id(),
                    "Cancelled order references a product no longer in the catalog"
                );
            }
            Err(e) => {
                tracing::error!(
                    order_id = %order.id(),
                    product_id = %order.product_id(),
                    error = %e,
                    "Failed to restore stock for cancelled order"
                );
            }
        }

        if let Err(e) = self.event_publisher.publish_order_events(events).await {
            tracing::error!(order_id = %order.id(), error = %e, "Failed to publish cancel events");
        }

        tracing::info!(
            order_id = %order.id(),
            user_id = %requester.id,
            "Order cancelled"
        );

        Ok(order)
    }
}
